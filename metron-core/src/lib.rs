//! Metron Core - Fundamental types
//!
//! This crate provides the registry-independent pieces of the unit engine:
//! - `DimList`: sparse dimension vectors and their merge
//! - `Coefficient` / `Factor`: exact conversion constants with a decimal order
//! - `UnitError`: errors, plus `ErrorReport` for structured output

mod dimension;
mod coefficient;
mod error;
#[cfg(test)]
mod proptests;

pub use dimension::{DimList, UnitId, merge};
pub use coefficient::{Coefficient, Factor, Scalar, reduce, MAX_EXACT_BITS};
pub use error::{UnitError, UnitResult, ErrorReport, codes};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Coefficient, DimList, Factor, Scalar, UnitError, UnitId, UnitResult};
    pub use crate::error::codes;
}
