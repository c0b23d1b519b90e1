use thiserror::Error;

/// Pre-flight input errors, detected before any remote call is issued.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Required field is empty: {0}")]
    EmptyField(&'static str),
    #[error("Not a number: {field} = {value:?}")]
    NotANumber { field: &'static str, value: String },
    #[error("Negative value not allowed: {field} = {value}")]
    NegativeValue { field: &'static str, value: String },
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },
}

/// Failures while talking to the remote product service.
///
/// The client treats all of these uniformly as an operation failure;
/// the variants only shape the notice text.
#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    #[error("Transport failure: {0}")]
    Transport(String),
    #[error("Server returned status {status}: {preview}")]
    Status { status: u16, preview: String },
    #[error("Invalid response payload: {0}")]
    Decode(String),
}

/// Startup configuration errors.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Invalid API URL {value:?}: {reason}")]
    InvalidUrl { value: String, reason: String },
    #[error("Invalid request timeout {value:?}: must be a whole number of seconds")]
    InvalidTimeout { value: String },
}

/// Everything a catalog operation can fail with.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error("Unknown product: {0}")]
    UnknownProduct(String),
    #[error("Catalog service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl CatalogError {
    /// Failures the user can fix by changing their input. These surface
    /// as warnings; everything else surfaces as an error notice.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            CatalogError::Validation(_) | CatalogError::UnknownProduct(_)
        )
    }
}
