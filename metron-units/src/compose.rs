//! Unit-type arithmetic
//!
//! Every composition yields an anonymous descriptor, shared with any earlier
//! composition of the same dimensions and constant. Registered operands
//! contribute themselves (their dimensions are `[(self, 1)]`); anonymous
//! operands contribute their own dimensions and constants, so a derived type
//! never refers to another anonymous type.

use metron_core::{Coefficient, DimList, Factor, Scalar, UnitId, UnitResult};
use crate::registry::UnitRegistry;

/// Result of composing unit-types
#[derive(Debug, Clone, PartialEq)]
pub enum Composed {
    /// A new anonymous unit-type
    Unit(UnitId),
    /// Dimensions cancelled completely; the factor is what a magnitude in
    /// the composed type is worth as a plain number
    Dimensionless(Factor),
}

impl Composed {
    pub fn unit(&self) -> Option<UnitId> {
        match self {
            Composed::Unit(id) => Some(*id),
            Composed::Dimensionless(_) => None,
        }
    }

    pub fn is_dimensionless(&self) -> bool {
        matches!(self, Composed::Dimensionless(_))
    }
}

impl UnitRegistry {
    /// `a * b`
    pub fn multiply(&mut self, a: UnitId, b: UnitId) -> UnitResult<Composed> {
        self.combine(a, b, 1)
    }

    /// `a / b`
    pub fn divide(&mut self, a: UnitId, b: UnitId) -> UnitResult<Composed> {
        self.combine(a, b, -1)
    }

    fn combine(&mut self, a: UnitId, b: UnitId, sign: i32) -> UnitResult<Composed> {
        let ta = self.unit(a)?;
        let tb = self.unit(b)?;
        let dims = ta.dims().merge(tb.dims(), sign)?;
        let factor = ta.factor().times_pow(&tb.factor(), sign)?;
        Ok(self.compose(dims, factor))
    }

    fn compose(&mut self, dims: DimList, factor: Factor) -> Composed {
        if dims.is_empty() {
            Composed::Dimensionless(factor.reduced())
        } else {
            Composed::Unit(self.push_anonymous(dims, factor))
        }
    }

    /// `scalar * unit`, e.g. minutes from `60 * seconds`
    pub fn scale(&mut self, unit: UnitId, scalar: impl Into<Scalar>) -> UnitResult<UnitId> {
        self.scale_by(unit, scalar.into(), 1)
    }

    /// `unit / scalar`, e.g. ounces from `pounds / 16`
    pub fn scale_down(&mut self, unit: UnitId, scalar: impl Into<Scalar>) -> UnitResult<UnitId> {
        self.scale_by(unit, scalar.into(), -1)
    }

    fn scale_by(&mut self, unit: UnitId, scalar: Scalar, sign: i32) -> UnitResult<UnitId> {
        let (constant, order) = scalar.normalize()?;
        let ty = self.unit(unit)?;
        let scalar = Factor::new(constant, Coefficient::one(), order);
        let factor = ty.factor().times_pow(&scalar, sign)?;
        let dims = ty.dims().clone();
        Ok(self.push_anonymous(dims, factor))
    }

    /// `unit * 10^order`, the basis of prefixed units
    pub fn scale_order(&mut self, unit: UnitId, order: i32) -> UnitResult<UnitId> {
        let ty = self.unit(unit)?;
        let factor = ty.factor().shifted(order)?;
        let dims = ty.dims().clone();
        Ok(self.push_anonymous(dims, factor))
    }

    /// `unit^exp`; exponent zero is dimensionless
    pub fn power(&mut self, unit: UnitId, exp: i32) -> UnitResult<Composed> {
        let ty = self.unit(unit)?;
        let dims = ty.dims().scaled(exp)?;
        let factor = Factor::identity().times_pow(&ty.factor(), exp)?;
        Ok(self.compose(dims, factor))
    }

    /// `1 / unit`
    pub fn reciprocal(&mut self, unit: UnitId) -> UnitResult<UnitId> {
        let ty = self.unit(unit)?;
        let dims = ty.dims().scaled(-1)?;
        let factor = ty.factor().inverse()?;
        Ok(self.push_anonymous(dims, factor))
    }
}
