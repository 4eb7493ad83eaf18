//! Conversion resolution
//!
//! Both loops here are work-lists over a dimension vector. Every stored
//! conversion record holds base units only, and a derived unit can only be
//! built from units created before it, so each substitution replaces the
//! highest-index derived entry with strictly lower-index base entries and
//! the loops always terminate.

use tracing::trace;
use metron_core::{DimList, Factor, UnitError, UnitId, UnitResult};
use crate::registry::UnitRegistry;
use crate::unit::{ConversionRecord, Expansion};

impl UnitRegistry {
    /// Expand `dims` (with working constant `factor`) into base units only.
    pub(crate) fn expand(&self, dims: &DimList, factor: Factor) -> UnitResult<ConversionRecord> {
        let mut pending = dims.clone();
        let mut resolved = DimList::empty();
        let mut factor = factor;

        while let Some(((unit, exp), rest)) = pending.split_first() {
            let ty = self.unit(unit)?;
            match ty.expansion() {
                Some(Expansion::Derived(record)) => {
                    trace!(unit = %unit, exp, factor = %record.factor, "substituting derived unit");
                    factor = factor.times_pow(&record.factor, exp)?;
                    pending = rest.merge(&record.dims, exp)?;
                }
                Some(Expansion::Base) => {
                    resolved = resolved.merge(&DimList::single(unit, exp), 1)?;
                    pending = rest;
                }
                None => return Err(UnitError::UnregisteredComponent(ty.label())),
            }
        }

        Ok(ConversionRecord {
            dims: resolved,
            factor: factor.reduced(),
        })
    }

    /// Canonical expansion of any unit-type in base units
    pub fn canonical(&self, unit: UnitId) -> UnitResult<ConversionRecord> {
        let ty = self.unit(unit)?;
        self.expand(ty.dims(), ty.factor())
    }

    /// Factor converting a magnitude in `from` into a magnitude in `to`:
    /// `value_to = value_from * top / bottom * 10^order`.
    ///
    /// Fails with `IncompatibleUnits` when the two types do not cancel to a
    /// dimensionless vector.
    pub fn factor_between(&self, from: UnitId, to: UnitId) -> UnitResult<Factor> {
        let a = self.unit(from)?;
        let b = self.unit(to)?;

        let mut factor = a.factor().over(&b.factor())?;
        let mut vector = a.dims().merge(b.dims(), -1)?;

        while let Some(((unit, exp), rest)) = vector.split_first() {
            match self.unit(unit)?.conversion_record() {
                Some(record) => {
                    trace!(unit = %unit, exp, "resolving conversion");
                    factor = factor.times_pow(&record.factor, exp)?;
                    vector = rest.merge(&record.dims, exp)?;
                }
                // The head is the highest remaining index, so nothing left
                // can expand into it: the residue can never cancel.
                None => {
                    return Err(UnitError::IncompatibleUnits {
                        from: self.describe(from),
                        to: self.describe(to),
                    });
                }
            }
        }

        Ok(factor.reduced())
    }

    /// Check if two unit-types measure the same dimension
    pub fn is_compatible(&self, a: UnitId, b: UnitId) -> bool {
        self.factor_between(a, b).is_ok()
    }

    /// Convert a raw magnitude from one unit-type into another
    pub fn convert_value(&self, value: f64, from: UnitId, to: UnitId) -> UnitResult<f64> {
        if from == to {
            return Ok(value);
        }
        Ok(self.factor_between(from, to)?.apply(value))
    }
}
