use thiserror::Error;

#[derive(Error, Debug)]
pub enum BmkgError {
    #[error("BmkgError::Http: {0}")]
    Http(String),
    #[error("BmkgError::Status: server responded with status {0}")]
    Status(u16),
    #[error("BmkgError::Document: {0}")]
    Document(String),
    #[error("BmkgError::MissingForecast: no 'cuaca' forecast in document")]
    MissingForecast,
    #[error("BmkgError::TimeParse: {0}")]
    TimeParse(String),
    #[error("BmkgError::InvalidNumber: '{value}' is not a number for {field}")]
    InvalidNumber {
        field: &'static str,
        value: String,
    },
}

impl BmkgError {
    /// Returns true if the error means that no usable data could be retrieved, as opposed
    /// to a document that was retrieved but carries a broken forecast time or number.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, BmkgError::TimeParse(_) | BmkgError::InvalidNumber { .. })
    }
}

impl From<ureq::Error> for BmkgError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::StatusCode(code) => BmkgError::Status(code),
            e => BmkgError::Http(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for BmkgError {
    fn from(e: serde_json::Error) -> Self {
        BmkgError::Document(e.to_string())
    }
}
