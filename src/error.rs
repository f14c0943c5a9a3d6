use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A required form field was empty after trimming. `message` is the
    /// text shown to the user.
    #[error("{message}")]
    Validation {
        missing: Vec<&'static str>,
        message: &'static str,
    },

    /// The newest stored id is `i64::MAX`; no larger id exists.
    #[error("no id left after {newest}")]
    IdExhausted { newest: i64 },

    #[error("Não há registros para exportar.")]
    NothingToExport,

    #[error("slot `{slot}` holds unreadable data: {source}")]
    Corrupt {
        slot: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings: {0}")]
    Config(String),
}

impl Error {
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }
}
