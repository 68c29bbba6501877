use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{name} {message}")]
    InvalidParameter { name: &'static str, message: String },
    #[error("\"{0}\" is not a number")]
    InvalidNumber(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
