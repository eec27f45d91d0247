use std::fmt;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;

#[derive(Debug, Clone)]
pub enum TrimmrrError {
    Validation(String),
    Conflict(String),
    NotFound(String),
    Unauthorized(String),
    Recording(String),
    StorageOperation(String),
    FileOperation(String),
    Serialization(String),
    AssetStore(String),
}

impl TrimmrrError {
    /// Stable error code, used in logs
    pub fn code(&self) -> &'static str {
        match self {
            TrimmrrError::Validation(_) => "E001",
            TrimmrrError::Conflict(_) => "E002",
            TrimmrrError::NotFound(_) => "E003",
            TrimmrrError::Unauthorized(_) => "E004",
            TrimmrrError::Recording(_) => "E005",
            TrimmrrError::StorageOperation(_) => "E006",
            TrimmrrError::FileOperation(_) => "E007",
            TrimmrrError::Serialization(_) => "E008",
            TrimmrrError::AssetStore(_) => "E009",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            TrimmrrError::Validation(_) => "Validation Error",
            TrimmrrError::Conflict(_) => "Short Code Conflict",
            TrimmrrError::NotFound(_) => "Resource Not Found",
            TrimmrrError::Unauthorized(_) => "Unauthorized",
            TrimmrrError::Recording(_) => "Click Recording Error",
            TrimmrrError::StorageOperation(_) => "Storage Operation Error",
            TrimmrrError::FileOperation(_) => "File Operation Error",
            TrimmrrError::Serialization(_) => "Serialization Error",
            TrimmrrError::AssetStore(_) => "Asset Store Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            TrimmrrError::Validation(msg)
            | TrimmrrError::Conflict(msg)
            | TrimmrrError::NotFound(msg)
            | TrimmrrError::Unauthorized(msg)
            | TrimmrrError::Recording(msg)
            | TrimmrrError::StorageOperation(msg)
            | TrimmrrError::FileOperation(msg)
            | TrimmrrError::Serialization(msg)
            | TrimmrrError::AssetStore(msg) => msg,
        }
    }
}

impl fmt::Display for TrimmrrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type(), self.message())
    }
}

impl std::error::Error for TrimmrrError {}

// Convenience constructors
impl TrimmrrError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        TrimmrrError::Validation(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        TrimmrrError::Conflict(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        TrimmrrError::NotFound(msg.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        TrimmrrError::Unauthorized(msg.into())
    }

    pub fn recording<T: Into<String>>(msg: T) -> Self {
        TrimmrrError::Recording(msg.into())
    }

    pub fn storage_operation<T: Into<String>>(msg: T) -> Self {
        TrimmrrError::StorageOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        TrimmrrError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        TrimmrrError::Serialization(msg.into())
    }

    pub fn asset_store<T: Into<String>>(msg: T) -> Self {
        TrimmrrError::AssetStore(msg.into())
    }
}

impl From<std::io::Error> for TrimmrrError {
    fn from(err: std::io::Error) -> Self {
        TrimmrrError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for TrimmrrError {
    fn from(err: serde_json::Error) -> Self {
        TrimmrrError::Serialization(err.to_string())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

impl actix_web::ResponseError for TrimmrrError {
    fn status_code(&self) -> StatusCode {
        match self {
            TrimmrrError::Validation(_) => StatusCode::BAD_REQUEST,
            TrimmrrError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            TrimmrrError::NotFound(_) => StatusCode::NOT_FOUND,
            TrimmrrError::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Internal failures never leak detail beyond a generic message
        let message = if self.status_code() == StatusCode::INTERNAL_SERVER_ERROR {
            "An error occurred while processing your request".to_string()
        } else {
            self.message().to_string()
        };
        HttpResponse::build(self.status_code()).json(ErrorBody { message })
    }
}

pub type Result<T> = std::result::Result<T, TrimmrrError>;
