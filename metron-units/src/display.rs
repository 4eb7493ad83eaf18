//! Rendering unit-types and quantities
//!
//! Registered types render as their symbol. Anonymous types render their
//! dimension vector, led by `(c)`, `(cx10^n)` or `(1x10^n)` when their
//! constant or order is not neutral. Quantities render the magnitude scaled
//! by their type's own constant, then the bracketed dimension form.

use std::fmt;
use metron_core::{UnitId, UnitResult};
use crate::quantity::Quantity;
use crate::registry::UnitRegistry;
use crate::unit::UnitType;

/// Display adapter for a unit-type
pub struct UnitDisplay<'a> {
    registry: &'a UnitRegistry,
    unit: &'a UnitType,
}

/// Display adapter for a quantity
pub struct QuantityDisplay<'a> {
    registry: &'a UnitRegistry,
    unit: &'a UnitType,
    value: f64,
}

impl UnitRegistry {
    pub fn display_unit(&self, unit: UnitId) -> UnitResult<UnitDisplay<'_>> {
        Ok(UnitDisplay { registry: self, unit: self.unit(unit)? })
    }

    pub fn display(&self, q: &Quantity) -> UnitResult<QuantityDisplay<'_>> {
        Ok(QuantityDisplay {
            registry: self,
            unit: self.unit(q.unit)?,
            value: q.value,
        })
    }

    /// Symbol of a registered type, else its dimension form
    pub(crate) fn describe(&self, unit: UnitId) -> String {
        match self.unit(unit) {
            Ok(ty) => self.symbolic(ty),
            Err(_) => unit.to_string(),
        }
    }

    fn symbolic(&self, ty: &UnitType) -> String {
        if let Some(symbol) = ty.symbol() {
            return symbol.to_string();
        }
        ty.dims().symbolic(|u| match self.unit(u) {
            Ok(component) => component.symbol().map(str::to_string).unwrap_or_else(|| component.label()),
            Err(_) => u.to_string(),
        })
    }
}

impl fmt::Display for UnitDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ty = self.unit;
        if ty.symbol().is_none() {
            let constant = ty.top().to_f64() / ty.bottom().to_f64();
            let order = ty.order();
            if constant != 1.0 || order != 0 {
                write!(f, "(")?;
                if constant != 1.0 {
                    write!(f, "{}", constant)?;
                } else {
                    write!(f, "1")?;
                }
                if order != 0 {
                    write!(f, "x10^{}", order)?;
                }
                write!(f, ")")?;
            }
        }
        write!(f, "{}", self.registry.symbolic(ty))
    }
}

impl fmt::Display for QuantityDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.unit.factor().apply(self.value);
        write!(f, "{}[{}]", value, self.registry.symbolic(self.unit))
    }
}
