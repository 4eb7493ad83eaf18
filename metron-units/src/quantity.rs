//! Quantity type - a magnitude tagged with a unit-type
//!
//! The magnitude is stored in units of the tagged type itself, constant
//! included: 1 in "minutes / 30" is two seconds. Arithmetic goes through the
//! registry because it creates the composed result types.

use std::cmp::Ordering;
use serde::{Serialize, Deserialize};
use metron_core::{UnitError, UnitId, UnitResult};
use crate::compose::Composed;
use crate::registry::UnitRegistry;

/// A physical quantity: a numeric value with an associated unit-type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    /// The raw magnitude
    pub value: f64,
    /// The unit-type of the magnitude
    pub unit: UnitId,
}

impl Quantity {
    /// Create a new quantity
    pub fn new(value: f64, unit: UnitId) -> Self {
        Quantity { value, unit }
    }

    /// Multiply by a plain number; the unit-type is unchanged
    pub fn times(&self, k: f64) -> Quantity {
        Quantity::new(self.value * k, self.unit)
    }

    /// Divide by a plain number; the unit-type is unchanged
    pub fn divided_by(&self, k: f64) -> Quantity {
        Quantity::new(self.value / k, self.unit)
    }
}

/// Result of quantity arithmetic: fully cancelled dimensions give plain numbers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Number(f64),
    Quantity(Quantity),
}

impl Value {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Quantity(_) => None,
        }
    }

    pub fn as_quantity(&self) -> Option<&Quantity> {
        match self {
            Value::Quantity(q) => Some(q),
            Value::Number(_) => None,
        }
    }

    pub fn is_dimensionless(&self) -> bool {
        matches!(self, Value::Number(_))
    }
}

impl From<Quantity> for Value {
    fn from(q: Quantity) -> Self {
        Value::Quantity(q)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

fn tag(value: f64, composed: Composed) -> Value {
    match composed {
        Composed::Unit(unit) => Value::Quantity(Quantity::new(value, unit)),
        Composed::Dimensionless(factor) => Value::Number(factor.apply(value)),
    }
}

impl UnitRegistry {
    /// Apply a unit-type to a raw number
    pub fn quantity(&self, value: f64, unit: UnitId) -> UnitResult<Quantity> {
        self.unit(unit)?;
        Ok(Quantity::new(value, unit))
    }

    /// Multiply two quantities (dimensions are multiplied)
    pub fn mul(&mut self, a: &Quantity, b: &Quantity) -> UnitResult<Value> {
        let composed = self.multiply(a.unit, b.unit)?;
        Ok(tag(a.value * b.value, composed))
    }

    /// Divide two quantities (dimensions are divided)
    pub fn div(&mut self, a: &Quantity, b: &Quantity) -> UnitResult<Value> {
        let composed = self.divide(a.unit, b.unit)?;
        Ok(tag(a.value / b.value, composed))
    }

    /// Plain number divided by a quantity
    pub fn number_over(&mut self, n: f64, q: &Quantity) -> UnitResult<Quantity> {
        let unit = self.reciprocal(q.unit)?;
        Ok(Quantity::new(n / q.value, unit))
    }

    /// Raise quantity to an integer power
    pub fn pow(&mut self, q: &Quantity, exp: i32) -> UnitResult<Value> {
        let composed = self.power(q.unit, exp)?;
        Ok(tag(q.value.powi(exp), composed))
    }

    /// Raise quantity to a dynamically typed exponent; only plain integers
    /// are accepted
    pub fn pow_value(&mut self, q: &Quantity, exponent: &Value) -> UnitResult<Value> {
        match *exponent {
            Value::Quantity(_) => Err(UnitError::DimensionMismatch(
                "cannot raise a quantity to a quantity power".to_string(),
            )),
            Value::Number(n) if n.fract() == 0.0 && n.abs() <= i32::MAX as f64 => {
                self.pow(q, n as i32)
            }
            Value::Number(n) => Err(UnitError::DimensionMismatch(format!(
                "cannot raise a quantity to the non-integer power {}",
                n
            ))),
        }
    }

    /// Magnitude of `other` expressed in `unit`
    fn magnitude_in(&self, other: &Quantity, unit: UnitId) -> UnitResult<f64> {
        self.convert_value(other.value, other.unit, unit)
    }

    /// Add two quantities; the result has the unit-type of `a`
    pub fn add(&self, a: &Quantity, b: &Quantity) -> UnitResult<Quantity> {
        let converted = self.magnitude_in(b, a.unit)?;
        Ok(Quantity::new(a.value + converted, a.unit))
    }

    /// Subtract two quantities; the result has the unit-type of `a`
    pub fn sub(&self, a: &Quantity, b: &Quantity) -> UnitResult<Quantity> {
        let converted = self.magnitude_in(b, a.unit)?;
        Ok(Quantity::new(a.value - converted, a.unit))
    }

    /// Compare two quantities after converting `b` into the unit-type of `a`
    pub fn compare(&self, a: &Quantity, b: &Quantity) -> UnitResult<Ordering> {
        let converted = self.magnitude_in(b, a.unit)?;
        Ok(a.value.total_cmp(&converted))
    }

    /// Equality after conversion
    pub fn equals(&self, a: &Quantity, b: &Quantity) -> UnitResult<bool> {
        let converted = self.magnitude_in(b, a.unit)?;
        Ok(a.value == converted)
    }

    /// Convert to another unit-type
    pub fn convert(&self, q: &Quantity, target: UnitId) -> UnitResult<Quantity> {
        self.unit(target)?;
        let value = self.magnitude_in(q, target)?;
        Ok(Quantity::new(value, target))
    }
}
