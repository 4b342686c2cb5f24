use std::io;

/// Failure at the data-provider boundary.
///
/// Calendar and index code never produces these; they come from reading and
/// decoding fixture documents.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Cannot decode {what}: {reason}")]
    Decode { what: String, reason: String },

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl DataError {
    pub fn decode(what: impl Into<String>, reason: impl ToString) -> Self {
        Self::Decode {
            what: what.into(),
            reason: reason.to_string(),
        }
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

impl From<io::Error> for DataError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(err.to_string()),
            _ => Self::Unknown(err.to_string()),
        }
    }
}
