//! Trait to validate semantic errors.
//!
//! Errors could involve more than one configuration option. Some configuration
//! combinations can be incompatible.
use thiserror::Error;

/// Errors that can occur validating the configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SemanticValidationError {
    #[error("The health check API base path must start with `/`, got: {base_path}")]
    RelativeBasePath { base_path: String },

    #[error("The Firestore driver requires the `database.firestore.project_id` option.")]
    MissingFirestoreProjectId,

    #[error("Timeouts must be greater than zero: {option}")]
    ZeroTimeout { option: &'static str },
}

pub trait Validator {
    /// # Errors
    ///
    /// Will return an error if the configuration is invalid.
    fn validate(&self) -> Result<(), SemanticValidationError>;
}
