use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A record kind that lives in its own slot as a JSON array.
pub trait StoredRecord: Clone + Serialize + DeserializeOwned {
    const SLOT: &'static str;

    fn id(&self) -> i64;
}

/// Adoption interest form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionRecord {
    pub id: i64,
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub telefone: String,
    #[serde(default)]
    pub endereco: String,
    #[serde(default)]
    pub animal_interesse: String,
    #[serde(default)]
    pub tem_animais: String,
    #[serde(default)]
    pub mensagem: String,
    #[serde(default)]
    pub criado_em: String,
}

impl StoredRecord for AdoptionRecord {
    const SLOT: &'static str = crate::storage::ADOPTION_SLOT;

    fn id(&self) -> i64 {
        self.id
    }
}

/// Support contact form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SupportRecord {
    pub id: i64,
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub assunto: String,
    #[serde(default)]
    pub mensagem: String,
    #[serde(default)]
    pub criado_em: String,
}

impl StoredRecord for SupportRecord {
    const SLOT: &'static str = crate::storage::SUPPORT_SLOT;

    fn id(&self) -> i64 {
        self.id
    }
}
