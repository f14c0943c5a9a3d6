//! Form intake: trim, check required fields, then prepend one record to
//! its slot. Adoption and support submissions share [`submit`]; each
//! form type only says which fields it requires and how it becomes a
//! record.

use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::models::{AdoptionRecord, StoredRecord, SupportRecord};
use crate::records::RecordStore;
use crate::storage::SlotStore;
use chrono::SecondsFormat;

pub trait IntakeForm {
    type Record: StoredRecord;

    const MISSING_MESSAGE: &'static str;
    const ACCEPTED_MESSAGE: &'static str;

    fn trim(self) -> Self;

    /// `(name, value)` of every field that must be non-empty.
    fn required(&self) -> Vec<(&'static str, &str)>;

    fn into_record(self, id: i64, criado_em: String) -> Self::Record;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdoptionForm {
    pub nome: String,
    pub email: String,
    pub telefone: String,
    pub endereco: String,
    pub animal_interesse: String,
    pub tem_animais: String,
    pub mensagem: String,
}

impl IntakeForm for AdoptionForm {
    type Record = AdoptionRecord;

    const MISSING_MESSAGE: &'static str = "Por favor preencha o nome e o e-mail.";
    const ACCEPTED_MESSAGE: &'static str = "Cadastro enviado! Nossa equipe entrará em contato.";

    fn trim(self) -> Self {
        Self {
            nome: trimmed(self.nome),
            email: trimmed(self.email),
            telefone: trimmed(self.telefone),
            endereco: trimmed(self.endereco),
            animal_interesse: trimmed(self.animal_interesse),
            tem_animais: trimmed(self.tem_animais),
            mensagem: trimmed(self.mensagem),
        }
    }

    fn required(&self) -> Vec<(&'static str, &str)> {
        vec![("nome", self.nome.as_str()), ("email", self.email.as_str())]
    }

    fn into_record(self, id: i64, criado_em: String) -> AdoptionRecord {
        AdoptionRecord {
            id,
            nome: self.nome,
            email: self.email,
            telefone: self.telefone,
            endereco: self.endereco,
            animal_interesse: self.animal_interesse,
            tem_animais: self.tem_animais,
            mensagem: self.mensagem,
            criado_em,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportForm {
    pub nome: String,
    pub email: String,
    pub assunto: String,
    pub mensagem: String,
}

impl IntakeForm for SupportForm {
    type Record = SupportRecord;

    const MISSING_MESSAGE: &'static str = "Por favor preencha nome, e-mail e a mensagem.";
    const ACCEPTED_MESSAGE: &'static str =
        "Mensagem enviada! Responderemos por e-mail em até 3 dias úteis.";

    fn trim(self) -> Self {
        Self {
            nome: trimmed(self.nome),
            email: trimmed(self.email),
            assunto: trimmed(self.assunto),
            mensagem: trimmed(self.mensagem),
        }
    }

    fn required(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("nome", self.nome.as_str()),
            ("email", self.email.as_str()),
            ("mensagem", self.mensagem.as_str()),
        ]
    }

    fn into_record(self, id: i64, criado_em: String) -> SupportRecord {
        SupportRecord {
            id,
            nome: self.nome,
            email: self.email,
            assunto: self.assunto,
            mensagem: self.mensagem,
            criado_em,
        }
    }
}

fn trimmed(s: String) -> String {
    let t = s.trim();
    if t.len() == s.len() { s } else { t.to_string() }
}

/// Result of an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted<R> {
    pub record: R,
    pub total: usize,
    pub message: &'static str,
}

/// Millisecond timestamp, bumped past `newest` so ids never repeat.
pub fn next_id(now_ms: i64, newest: Option<i64>) -> Result<i64> {
    match newest {
        Some(newest) if newest >= now_ms => {
            let id = newest
                .checked_add(1)
                .ok_or(Error::IdExhausted { newest })?;
            log::debug!("id {now_ms} already taken, using {id}");
            Ok(id)
        }
        _ => Ok(now_ms),
    }
}

/// Validates `form` and prepends the resulting record to its slot.
///
/// A rejected form touches nothing. An accepted one costs one slot read
/// and one slot write.
pub fn submit<F, S, C>(slots: S, clock: &C, form: F) -> Result<Submitted<F::Record>>
where
    F: IntakeForm,
    S: SlotStore,
    C: Clock + ?Sized,
{
    let form = form.trim();
    let missing: Vec<&'static str> = form
        .required()
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect();
    if !missing.is_empty() {
        log::info!("submission rejected, missing {missing:?}");
        return Err(Error::Validation {
            missing,
            message: F::MISSING_MESSAGE,
        });
    }

    let store: RecordStore<S, F::Record> = RecordStore::new(slots);
    let now = clock.now();
    let (record, total) = store.prepend_with(|records| {
        let newest = records.iter().map(StoredRecord::id).max();
        let id = next_id(now.timestamp_millis(), newest)?;
        Ok(form.into_record(id, now.to_rfc3339_opts(SecondsFormat::Millis, true)))
    })?;
    log::info!(
        "stored record {} in {}",
        record.id(),
        <F::Record as StoredRecord>::SLOT
    );

    Ok(Submitted {
        record,
        total,
        message: F::ACCEPTED_MESSAGE,
    })
}
