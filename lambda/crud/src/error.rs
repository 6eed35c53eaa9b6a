use lambda_http::http::StatusCode;
use thiserror::Error;

/// Failures a CRUD handler can turn into a response.
#[derive(Error, Debug)]
pub(crate) enum CrudError {
    #[error("ID parameter is missing")]
    MissingIdParameter,

    #[error("ID field is missing")]
    MissingIdField,

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Number out of range: {0}")]
    NumberOutOfRange(String),

    #[error("Item not found")]
    NotFound,

    #[error("{0}")]
    Store(String),

    #[error("{0}")]
    Codec(String),
}

impl CrudError {
    pub(crate) fn status(&self) -> StatusCode {
        match self {
            CrudError::MissingIdParameter
            | CrudError::MissingIdField
            | CrudError::InvalidJson(_)
            | CrudError::NumberOutOfRange(_) => StatusCode::BAD_REQUEST,
            CrudError::NotFound => StatusCode::NOT_FOUND,
            CrudError::Store(_) | CrudError::Codec(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text sent back to the caller. Backend messages pass through unsanitized.
    pub(crate) fn body(&self) -> String {
        match self {
            CrudError::Store(_) | CrudError::Codec(_) => format!("Internal Error: {}", self),
            _ => self.to_string(),
        }
    }
}
