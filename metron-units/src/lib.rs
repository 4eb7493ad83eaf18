//! Metron Units - Dimensional type algebra and conversion
//!
//! Numeric values carry a unit-type tag so that arithmetic produces
//! correctly dimensioned results and compatible units convert through
//! exact rational factors plus a power of ten.
//!
//! Pieces:
//! - `UnitRegistry`: owns every unit-type, the symbol table and registration
//! - composition (`multiply`, `divide`, `scale`, `power`, ...) producing
//!   anonymous unit-types
//! - resolution (`factor_between`, `canonical`) against base units
//! - `Quantity` / `Value`: magnitudes tagged with a unit-type
//!
//! ```
//! use metron_units::{Quantity, UnitRegistry};
//!
//! let mut units = UnitRegistry::new();
//! let s = units.declare_base("s", "Seconds")?;
//! let min = units.scale(s, 60)?;
//! let min = units.register(min, "min", "Minutes")?;
//!
//! let q = units.convert(&Quantity::new(2.0, min), s)?;
//! assert_eq!(q.value, 120.0);
//! # Ok::<(), metron_units::UnitError>(())
//! ```

mod unit;
mod registry;
mod compose;
mod resolve;
mod quantity;
mod display;

pub use unit::{UnitType, ConversionRecord, Expansion};
pub use registry::UnitRegistry;
pub use compose::Composed;
pub use quantity::{Quantity, Value};
pub use display::{UnitDisplay, QuantityDisplay};

pub use metron_core::{Coefficient, DimList, ErrorReport, Factor, Scalar, UnitError, UnitId, UnitResult};
