use axum::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("failed to fetch {source_name}: {error}")]
    Fetch {
        source_name: String,
        #[source]
        error: reqwest::Error,
    },

    #[error("failed to read {source_name}: {error}")]
    Io {
        source_name: String,
        #[source]
        error: std::io::Error,
    },

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid date '{0}'")]
    InvalidDate(String),

    #[error("{field} code {value} is out of range")]
    InvalidCode { field: &'static str, value: u8 },

    #[error("line {line}: {message}")]
    InvalidRow { line: u64, message: String },

    #[error("{0} contains no records")]
    Empty(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl DataError {
    pub fn code(field: &'static str, value: u8) -> Self {
        Self::InvalidCode { field, value }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
