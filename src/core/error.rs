//! Typed error handling for the rental service
//!
//! Every operation returns [`RentalResult`], so HTTP handlers and library
//! callers can match on the failure category instead of parsing messages.
//!
//! # Error Categories
//!
//! - [`EntityError`]: a referenced identifier does not resolve (404)
//! - [`ValidationError`]: submitted data is malformed or breaks a business rule
//! - [`LifecycleError`]: the reservation is not in a state the operation needs
//! - [`ActorError`]: the acting employee could not be established
//! - [`StorageError`]: the storage backend failed
//! - [`ConfigError`]: configuration could not be loaded
//!
//! # Example
//!
//! ```rust,ignore
//! match service.register_return(id, form).await {
//!     Ok(reservation) => println!("finalized {}", reservation.id),
//!     Err(RentalError::Validation(ValidationError::Form(errors))) => {
//!         for (field, messages) in errors.iter() {
//!             eprintln!("{field}: {messages:?}");
//!         }
//!     }
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

use crate::core::validation::FormErrors;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// The main error type for the rental service
#[derive(Debug, Error)]
pub enum RentalError {
    /// Referenced record does not exist
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Submitted data failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Reservation state does not allow the operation
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// Acting employee missing or unknown
    #[error(transparent)]
    Actor(#[from] ActorError),

    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl RentalError {
    /// Shorthand for a missing record
    pub fn not_found(entity_type: &str, id: Uuid) -> Self {
        RentalError::Entity(EntityError::NotFound {
            entity_type: entity_type.to_string(),
            id,
        })
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RentalError::Entity(e) => e.status_code(),
            RentalError::Validation(e) => e.status_code(),
            RentalError::Lifecycle(_) => StatusCode::CONFLICT,
            RentalError::Actor(_) => StatusCode::UNAUTHORIZED,
            RentalError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RentalError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RentalError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            RentalError::Entity(e) => e.error_code(),
            RentalError::Validation(e) => e.error_code(),
            RentalError::Lifecycle(e) => e.error_code(),
            RentalError::Actor(e) => e.error_code(),
            RentalError::Storage(_) => "STORAGE_ERROR",
            RentalError::Config(_) => "CONFIG_ERROR",
            RentalError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    /// Field errors carried by a form validation failure
    pub fn form_errors(&self) -> Option<&FormErrors> {
        match self {
            RentalError::Validation(ValidationError::Form(errors)) => Some(errors),
            _ => None,
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            RentalError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id.to_string()
                }))
            }
            RentalError::Validation(ValidationError::Form(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            RentalError::Validation(ValidationError::InvalidSortKey { allowed, .. }) => {
                Some(serde_json::json!({ "allowed": allowed }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for RentalError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to record lookups
#[derive(Debug, Error)]
pub enum EntityError {
    /// Entity was not found
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: String, id: Uuid },

    /// Entity already exists (conflict)
    #[error("{entity_type} with id '{id}' already exists")]
    AlreadyExists { entity_type: String, id: Uuid },
}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::AlreadyExists { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::AlreadyExists { .. } => "ENTITY_ALREADY_EXISTS",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to submitted data
#[derive(Debug, Error)]
pub enum ValidationError {
    /// One or more field-level errors
    #[error("Validation errors: {0}")]
    Form(FormErrors),

    /// Sort key outside the permitted set
    #[error("Invalid sort key '{value}'")]
    InvalidSortKey {
        value: String,
        allowed: Vec<&'static str>,
    },

    /// Malformed identifier in a path or query parameter
    #[error("Invalid {field} identifier: '{value}'")]
    InvalidEntityId { field: String, value: String },

    /// Body could not be decoded at all
    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },
}

impl ValidationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ValidationError::Form(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ValidationError::InvalidSortKey { .. } => StatusCode::BAD_REQUEST,
            ValidationError::InvalidEntityId { .. } => StatusCode::BAD_REQUEST,
            ValidationError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::Form(_) => "VALIDATION_ERROR",
            ValidationError::InvalidSortKey { .. } => "INVALID_SORT_KEY",
            ValidationError::InvalidEntityId { .. } => "INVALID_ENTITY_ID",
            ValidationError::InvalidBody { .. } => "INVALID_BODY",
        }
    }
}

// =============================================================================
// Lifecycle Errors
// =============================================================================

/// Errors raised when a reservation is not in the state an operation needs
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Return attempted before any pickup fuel level was recorded
    #[error("Reservation '{reservation_id}' has no registered pickup")]
    PickupNotRegistered { reservation_id: Uuid },
}

impl LifecycleError {
    pub fn error_code(&self) -> &'static str {
        match self {
            LifecycleError::PickupNotRegistered { .. } => "PICKUP_NOT_REGISTERED",
        }
    }
}

// =============================================================================
// Actor Errors
// =============================================================================

/// Errors related to the acting employee
#[derive(Debug, Error)]
pub enum ActorError {
    /// No actor header on the request
    #[error("Missing acting employee header '{header}'")]
    Missing { header: &'static str },

    /// Header present but not an identifier
    #[error("Invalid acting employee identifier: '{value}'")]
    Invalid { value: String },

    /// Identifier does not match any employee
    #[error("Unknown employee '{id}'")]
    Unknown { id: Uuid },

    /// Fallback policy found no employee at all
    #[error("No employee is registered")]
    NoEmployees,
}

impl ActorError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ActorError::Missing { .. } | ActorError::Invalid { .. } => "ACTOR_REQUIRED",
            ActorError::Unknown { .. } => "UNKNOWN_ACTOR",
            ActorError::NoEmployees => "NO_EMPLOYEES",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// A unit of work referenced a record that does not exist
    #[error("Data integrity error: {message}")]
    IntegrityError { message: String },

    /// Any other backend failure
    #[error("{backend} error: {message}")]
    Backend { backend: String, message: String },
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config{}: {message}", .file.as_ref().map(|f| format!(" file '{}'", f)).unwrap_or_default())]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    IoError { message: String },
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_yaml::Error> for RentalError {
    fn from(err: serde_yaml::Error) -> Self {
        RentalError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

/// Storage traits return `anyhow::Error`; typed storage errors are recovered
impl From<anyhow::Error> for RentalError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<StorageError>() {
            Ok(storage) => RentalError::Storage(storage),
            Err(err) => match err.downcast::<EntityError>() {
                Ok(entity) => RentalError::Entity(entity),
                Err(err) => RentalError::Storage(StorageError::Backend {
                    backend: "store".to_string(),
                    message: format!("{:#}", err),
                }),
            },
        }
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for rental operations
pub type RentalResult<T> = Result<T, RentalError>;
