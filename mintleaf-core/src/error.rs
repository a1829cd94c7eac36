//! Error types for the mintleaf engine.

use thiserror::Error;

use crate::booking::validation::ValidationErrors;
use crate::booking::wizard::WizardStep;

/// Errors that can occur in mintleaf operations.
///
/// All variants are recoverable by the caller.
#[derive(Error, Debug)]
pub enum MintleafError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid color '{0}': expected #RRGGBB")]
    InvalidColor(String),

    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("Could not save booking: {0}")]
    StorageWrite(String),

    #[error("{0} is not available for booking")]
    DayUnavailable(String),

    #[error("Cannot {action} while {step}")]
    InvalidTransition {
        action: &'static str,
        step: WizardStep,
    },

    #[error("Select at least one day")]
    EmptySelection,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unit not found: {0}")]
    UnitNotFound(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Provider '{0}' not found in PATH")]
    ProviderNotInstalled(String),

    #[error("Provider request timed out after {0}s")]
    ProviderTimeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for mintleaf operations.
pub type MintleafResult<T> = Result<T, MintleafError>;
