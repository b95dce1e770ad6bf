use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {}", join_messages(.0))]
    Invalid(Vec<ValidationError>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Trace parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<Vec<ValidationError>> for Error {
    fn from(errors: Vec<ValidationError>) -> Self {
        Error::Invalid(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, Error>;
