//! Unit errors and their structured form
//!
//! Every failure is immediate for the call that triggered it. `UnitError`
//! is what library calls return; `ErrorReport` is the machine-readable
//! shape for consumers that ship errors as JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const DIMENSION_MISMATCH: &str = "DIMENSION_MISMATCH";
    pub const INCOMPATIBLE_UNITS: &str = "INCOMPATIBLE_UNITS";
    pub const SYMBOL_CONFLICT: &str = "SYMBOL_CONFLICT";
    pub const NON_INTEGRAL_CONVERSION: &str = "NON_INTEGRAL_CONVERSION";
    pub const ALREADY_REGISTERED: &str = "ALREADY_REGISTERED";
    pub const UNREGISTERED_COMPONENT: &str = "UNREGISTERED_COMPONENT";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const INVALID_SCALE: &str = "INVALID_SCALE";
    pub const EMPTY_SYMBOL: &str = "EMPTY_SYMBOL";
    pub const EXPONENT_OVERFLOW: &str = "EXPONENT_OVERFLOW";
}

pub type UnitResult<T> = Result<T, UnitError>;

/// Error type for unit operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("Cannot convert {from} into {to}")]
    IncompatibleUnits { from: String, to: String },

    #[error("Symbol conflict for '{symbol}': new owner {new_owner}, existing owner {existing_owner}")]
    SymbolConflict {
        symbol: String,
        new_owner: String,
        existing_owner: String,
    },

    #[error("Attempt to register a non-integral conversion for '{symbol}'")]
    NonIntegralConversion { symbol: String },

    #[error("Unit {unit} is already registered as '{symbol}'")]
    AlreadyRegistered { unit: String, symbol: String },

    #[error("Unit-type {0} is referenced before it was registered")]
    UnregisteredComponent(String),

    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    #[error("Invalid scale factor: {0}")]
    InvalidScale(String),

    #[error("Unit symbol must not be empty")]
    EmptySymbol,

    #[error("Exponent out of range: {0}")]
    ExponentOverflow(String),
}

impl UnitError {
    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            UnitError::DimensionMismatch(_) => codes::DIMENSION_MISMATCH,
            UnitError::IncompatibleUnits { .. } => codes::INCOMPATIBLE_UNITS,
            UnitError::SymbolConflict { .. } => codes::SYMBOL_CONFLICT,
            UnitError::NonIntegralConversion { .. } => codes::NON_INTEGRAL_CONVERSION,
            UnitError::AlreadyRegistered { .. } => codes::ALREADY_REGISTERED,
            UnitError::UnregisteredComponent(_) => codes::UNREGISTERED_COMPONENT,
            UnitError::UnknownUnit(_) => codes::UNKNOWN_UNIT,
            UnitError::InvalidScale(_) => codes::INVALID_SCALE,
            UnitError::EmptySymbol => codes::EMPTY_SYMBOL,
            UnitError::ExponentOverflow(_) => codes::EXPONENT_OVERFLOW,
        }
    }

    fn suggestion(&self) -> Option<&'static str> {
        match self {
            UnitError::IncompatibleUnits { .. } | UnitError::DimensionMismatch(_) => {
                Some("Check that both operands measure the same physical dimension")
            }
            UnitError::SymbolConflict { .. } => Some("Choose a symbol that is not already registered"),
            UnitError::NonIntegralConversion { .. } => {
                Some("Define the unit from integer multiples and powers of ten")
            }
            UnitError::UnknownUnit(_) => Some("Check the unit symbol spelling"),
            UnitError::ExponentOverflow(_) => Some("Use smaller powers or decimal orders"),
            _ => None,
        }
    }
}

/// Structured error for serialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ErrorReport {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl From<UnitError> for ErrorReport {
    fn from(err: UnitError) -> Self {
        let report = Self::new(err.code(), err.to_string());
        match err.suggestion() {
            Some(s) => report.with_suggestion(s),
            None => report,
        }
    }
}
