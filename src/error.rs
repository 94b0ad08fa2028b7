//! Error handling.

use axum::{
    extract::rejection::JsonRejection,
    http::header,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::PathBuf;
use strum_macros::Display;
use thiserror::Error;
use tokio::sync::AcquireError;
use tracing::{event, Level};

use crate::models::FileFormat;
use crate::reader::ReadError;

/// Stable error kinds reported to clients.
///
/// Every [DecimatorError] variant belongs to exactly one kind.
#[derive(Clone, Copy, Debug, Deserialize, Display, PartialEq, Serialize)]
pub enum ErrorKind {
    /// Filename absent from the catalog, or file missing on disk
    NotFound,
    /// Malformed request or out of range parameter
    InvalidParameter,
    /// The parser for the requested format is not available
    ServiceUnavailable,
    /// Parse or I/O failure while reading a file
    ReadError,
    /// Anything unanticipated
    InternalError,
}

/// Decimator server error type
///
/// This type encapsulates the various errors that may occur.
/// Each variant may result in a different API error response.
#[derive(Debug, Error)]
pub enum DecimatorError {
    /// The catalog file does not exist
    #[error("{format} list file not found at {}", path.display())]
    CatalogMissing { format: FileFormat, path: PathBuf },

    /// Error reading the catalog file
    #[error("error reading {format} list")]
    CatalogRead {
        format: FileFormat,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing the catalog file
    #[error("error parsing {format} list file")]
    CatalogParse {
        format: FileFormat,
        #[source]
        source: serde_json::Error,
    },

    /// Filename has no entry in the catalog
    #[error("{format} file '{filename}' not found in the file list")]
    NotInCatalog { format: FileFormat, filename: String },

    /// Filename is catalogued but the file does not exist on disk
    #[error("{format} file '{filename}' not found in {}", dir.display())]
    FileMissing {
        format: FileFormat,
        filename: String,
        dir: PathBuf,
    },

    /// A request parameter is out of range
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Error deserialising request data
    #[error("request data is not valid")]
    RequestDataJsonRejection(#[from] JsonRejection),

    /// Error validating request data (single error)
    #[error("request data is not valid")]
    RequestDataValidationSingle(#[from] validator::ValidationError),

    /// Error validating request data (multiple errors)
    #[error("request data is not valid")]
    RequestDataValidation(#[from] validator::ValidationErrors),

    /// No reader is installed for the format
    #[error("{format} reader not available")]
    ReaderUnavailable { format: FileFormat },

    /// The reader failed to parse the file
    #[error("error reading {format} file '{filename}'")]
    Read {
        format: FileFormat,
        filename: String,
        #[source]
        source: ReadError,
    },

    /// Error acquiring a semaphore
    #[error("error acquiring resources")]
    SemaphoreAcquireError(#[from] AcquireError),

    /// A blocking read task panicked or was cancelled
    #[error("read task failed")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl DecimatorError {
    /// Returns the stable kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CatalogMissing { .. }
            | Self::NotInCatalog { .. }
            | Self::FileMissing { .. } => ErrorKind::NotFound,

            Self::InvalidParameter { .. }
            | Self::RequestDataJsonRejection(_)
            | Self::RequestDataValidationSingle(_)
            | Self::RequestDataValidation(_) => ErrorKind::InvalidParameter,

            Self::ReaderUnavailable { .. } => ErrorKind::ServiceUnavailable,

            Self::Read { .. } => ErrorKind::ReadError,

            Self::CatalogRead { .. }
            | Self::CatalogParse { .. }
            | Self::SemaphoreAcquireError(_)
            | Self::TaskJoin(_) => ErrorKind::InternalError,
        }
    }
}

impl IntoResponse for DecimatorError {
    /// Convert from a `DecimatorError` into an [axum::response::Response].
    fn into_response(self) -> Response {
        ErrorResponse::from(self).into_response()
    }
}

/// Body of error response
///
/// Implements serde (de)serialise.
#[derive(Deserialize, Serialize)]
struct ErrorBody {
    /// Stable error kind
    kind: ErrorKind,

    /// Main error message
    message: String,

    /// Optional list of causes
    #[serde(skip_serializing_if = "Option::is_none")]
    caused_by: Option<Vec<String>>,
}

impl ErrorBody {
    /// Return a new ErrorBody
    ///
    /// # Arguments
    ///
    /// * `error`: The error that occurred
    fn new(error: &DecimatorError) -> Self {
        let message = error.to_string();
        let mut caused_by = None;
        let mut current = error.source();
        while let Some(source) = current {
            let mut causes: Vec<String> = caused_by.unwrap_or_default();
            causes.push(source.to_string());
            caused_by = Some(causes);
            current = source.source();
        }
        // Remove duplicate entries.
        if let Some(caused_by) = caused_by.as_mut() {
            caused_by.dedup()
        }
        ErrorBody {
            kind: error.kind(),
            message,
            caused_by,
        }
    }
}

/// A response to send in error cases
///
/// Implements serde (de)serialise.
#[derive(Deserialize, Serialize)]
struct ErrorResponse {
    /// HTTP status of the response
    #[serde(skip)]
    status: StatusCode,

    /// Response body
    error: ErrorBody,
}

impl ErrorResponse {
    /// Return a new ErrorResponse
    ///
    /// # Arguments
    ///
    /// * `status`: HTTP status of the response
    /// * `error`: The error that occurred. This will be formatted into a suitable `ErrorBody`
    fn new(status: StatusCode, error: &DecimatorError) -> Self {
        ErrorResponse {
            status,
            error: ErrorBody::new(error),
        }
    }
}

impl From<DecimatorError> for ErrorResponse {
    /// Convert from a `DecimatorError` into an `ErrorResponse`.
    fn from(error: DecimatorError) -> Self {
        let status = match error.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::InvalidParameter => StatusCode::BAD_REQUEST,
            ErrorKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::ReadError | ErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let response = Self::new(status, &error);

        // Log server errors.
        if response.status.is_server_error() {
            event!(Level::ERROR, "{}", error.to_string());
            let mut current = error.source();
            while let Some(source) = current {
                event!(Level::ERROR, "Caused by: {}", source.to_string());
                current = source.source();
            }
        }

        response
    }
}

impl IntoResponse for ErrorResponse {
    /// Convert from an `ErrorResponse` into an `axum::response::Response`.
    ///
    /// Renders the response as JSON.
    fn into_response(self) -> Response {
        let json_body = serde_json::to_string_pretty(&self);
        match json_body {
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to serialise error response: {}", err),
            )
                .into_response(),
            Ok(json_body) => (
                self.status,
                [(&header::CONTENT_TYPE, mime::APPLICATION_JSON.to_string())],
                json_body,
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use hyper::HeaderMap;

    // Jump through the hoops to get the body as a string.
    async fn body_string(response: Response) -> String {
        String::from_utf8(
            hyper::body::to_bytes(response.into_body())
                .await
                .unwrap()
                .to_vec(),
        )
        .unwrap()
    }

    async fn test_decimator_error(
        error: DecimatorError,
        status: StatusCode,
        kind: ErrorKind,
        message: &str,
        caused_by: Option<Vec<&'static str>>,
    ) {
        let response = error.into_response();
        assert_eq!(status, response.status());
        let mut headers = HeaderMap::new();
        headers.insert(&header::CONTENT_TYPE, "application/json".parse().unwrap());
        assert_eq!(headers, *response.headers());
        let error_response: ErrorResponse =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(kind, error_response.error.kind);
        assert_eq!(message.to_string(), error_response.error.message);
        // Map Vec items from str to String
        let caused_by = caused_by.map(|cb| cb.iter().map(|s| s.to_string()).collect());
        assert_eq!(caused_by, error_response.error.caused_by);
    }

    #[tokio::test]
    async fn catalog_missing() {
        let error = DecimatorError::CatalogMissing {
            format: FileFormat::Las,
            path: PathBuf::from("/data/las-list.json"),
        };
        let message = "LAS list file not found at /data/las-list.json";
        test_decimator_error(error, StatusCode::NOT_FOUND, ErrorKind::NotFound, message, None)
            .await;
    }

    #[tokio::test]
    async fn catalog_read() {
        let error = DecimatorError::CatalogRead {
            format: FileFormat::Segy,
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
        };
        let message = "error reading SEGY list";
        let caused_by = Some(vec!["permission denied"]);
        test_decimator_error(
            error,
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::InternalError,
            message,
            caused_by,
        )
        .await;
    }

    #[tokio::test]
    async fn catalog_parse() {
        let json_error = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        let error = DecimatorError::CatalogParse {
            format: FileFormat::Las,
            source: json_error,
        };
        let message = "error parsing LAS list file";
        let caused_by = Some(vec!["EOF while parsing a list at line 1 column 1"]);
        test_decimator_error(
            error,
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::InternalError,
            message,
            caused_by,
        )
        .await;
    }

    #[tokio::test]
    async fn not_in_catalog() {
        let error = DecimatorError::NotInCatalog {
            format: FileFormat::Segy,
            filename: "foo.sgy".to_string(),
        };
        let message = "SEGY file 'foo.sgy' not found in the file list";
        test_decimator_error(error, StatusCode::NOT_FOUND, ErrorKind::NotFound, message, None)
            .await;
    }

    #[tokio::test]
    async fn file_missing() {
        let error = DecimatorError::FileMissing {
            format: FileFormat::Las,
            filename: "foo.las".to_string(),
            dir: PathBuf::from("/data/las"),
        };
        let message = "LAS file 'foo.las' not found in /data/las";
        test_decimator_error(error, StatusCode::NOT_FOUND, ErrorKind::NotFound, message, None)
            .await;
    }

    #[tokio::test]
    async fn invalid_parameter() {
        let error = DecimatorError::InvalidParameter {
            name: "dtMultiplier",
            reason: "must be greater than 0".to_string(),
        };
        let message = "invalid parameter dtMultiplier: must be greater than 0";
        test_decimator_error(
            error,
            StatusCode::BAD_REQUEST,
            ErrorKind::InvalidParameter,
            message,
            None,
        )
        .await;
    }

    #[tokio::test]
    async fn request_data_validation_single() {
        let validation_error = validator::ValidationError::new("foo");
        let error = DecimatorError::RequestDataValidationSingle(validation_error);
        let message = "request data is not valid";
        let caused_by = Some(vec!["Validation error: foo [{}]"]);
        test_decimator_error(
            error,
            StatusCode::BAD_REQUEST,
            ErrorKind::InvalidParameter,
            message,
            caused_by,
        )
        .await;
    }

    #[tokio::test]
    async fn request_data_validation() {
        let mut validation_errors = validator::ValidationErrors::new();
        let validation_error = validator::ValidationError::new("foo");
        validation_errors.add("bar", validation_error);
        let error = DecimatorError::RequestDataValidation(validation_errors);
        let message = "request data is not valid";
        let caused_by = Some(vec!["bar: Validation error: foo [{}]"]);
        test_decimator_error(
            error,
            StatusCode::BAD_REQUEST,
            ErrorKind::InvalidParameter,
            message,
            caused_by,
        )
        .await;
    }

    #[tokio::test]
    async fn reader_unavailable() {
        let error = DecimatorError::ReaderUnavailable {
            format: FileFormat::Segy,
        };
        let message = "SEGY reader not available";
        test_decimator_error(
            error,
            StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::ServiceUnavailable,
            message,
            None,
        )
        .await;
    }

    #[tokio::test]
    async fn read_error() {
        let error = DecimatorError::Read {
            format: FileFormat::Las,
            filename: "foo.las".to_string(),
            source: ReadError::Parse {
                line: 12,
                message: "expected a number, found 'abc'".to_string(),
            },
        };
        let message = "error reading LAS file 'foo.las'";
        let caused_by = Some(vec!["line 12: expected a number, found 'abc'"]);
        test_decimator_error(
            error,
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::ReadError,
            message,
            caused_by,
        )
        .await;
    }

    #[tokio::test]
    async fn read_io_error() {
        let io_error = std::io::Error::from(std::io::ErrorKind::UnexpectedEof);
        let error = DecimatorError::Read {
            format: FileFormat::Segy,
            filename: "foo.sgy".to_string(),
            source: ReadError::Io(io_error),
        };
        let message = "error reading SEGY file 'foo.sgy'";
        let caused_by = Some(vec!["I/O error", "unexpected end of file"]);
        test_decimator_error(
            error,
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::ReadError,
            message,
            caused_by,
        )
        .await;
    }

    #[tokio::test]
    async fn semaphore_acquire_error() {
        let sem = tokio::sync::Semaphore::new(1);
        sem.close();
        let error = DecimatorError::SemaphoreAcquireError(sem.acquire().await.unwrap_err());
        let message = "error acquiring resources";
        let caused_by = Some(vec!["semaphore closed"]);
        test_decimator_error(
            error,
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::InternalError,
            message,
            caused_by,
        )
        .await;
    }
}
