//! Metron SI - prefixes and the standard unit catalogue
//!
//! ```
//! use metron_si::standard_registry;
//!
//! let units = standard_registry()?;
//! let (km, mi) = (units.get("km")?, units.get("mi")?);
//! let miles = units.convert_value(1.609344, km, mi)?;
//! assert!((miles - 1.0).abs() < 1e-12);
//! # Ok::<(), metron_si::UnitError>(())
//! ```

mod prefixes;
mod catalogue;

pub use prefixes::{Prefix, PREFIXES, find_prefix, build_prefixed, declare_prefixed};
pub use catalogue::standard_registry;

pub use metron_units::{Quantity, UnitError, UnitId, UnitRegistry, UnitResult, Value};
