//! Exact conversion constants using dashu
//!
//! Conversion constants stay exact integers (UBig) as long as every operand
//! is integral. A real-valued scalar makes the constant approximate (f64),
//! which is fine for tagging quantities but is refused at registration.

use std::fmt;
use std::hash::{Hash, Hasher};
use dashu_base::{BitTest, Gcd};
use dashu_int::UBig;
use serde::{Deserialize, Serialize, Serializer, Deserializer};
use crate::{UnitError, UnitResult};

/// Largest exact constant, in bits, that [`Coefficient::pow`] will build
pub const MAX_EXACT_BITS: usize = 1 << 16;

/// A positive rational-component constant
#[derive(Debug, Clone, PartialEq)]
pub enum Coefficient {
    /// Exact integer
    Exact(UBig),
    /// Floating value from a real-valued scalar
    Approx(f64),
}

impl Coefficient {
    pub fn one() -> Self {
        Coefficient::Exact(UBig::ONE)
    }

    pub fn from_u64(n: u64) -> Self {
        Coefficient::Exact(UBig::from(n))
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, Coefficient::Exact(_))
    }

    pub fn is_one(&self) -> bool {
        match self {
            Coefficient::Exact(n) => *n == UBig::ONE,
            Coefficient::Approx(f) => *f == 1.0,
        }
    }

    /// Product; exact only if both sides are exact
    pub fn mul(&self, other: &Coefficient) -> Coefficient {
        match (self, other) {
            (Coefficient::Exact(a), Coefficient::Exact(b)) => Coefficient::Exact(a * b),
            _ => Coefficient::Approx(self.to_f64() * other.to_f64()),
        }
    }

    /// Non-negative integer power. Exact results larger than
    /// [`MAX_EXACT_BITS`] fail with `ExponentOverflow`.
    pub fn pow(&self, exp: u32) -> UnitResult<Coefficient> {
        match self {
            Coefficient::Exact(n) if exp == 1 || *n == UBig::ONE => Ok(self.clone()),
            Coefficient::Exact(_) if exp == 0 => Ok(Coefficient::one()),
            Coefficient::Exact(n) => {
                let bits = (n.bit_len() as u64).saturating_mul(u64::from(exp));
                if bits > MAX_EXACT_BITS as u64 {
                    return Err(UnitError::ExponentOverflow(format!("{}^{} is too large to keep exact", n, exp)));
                }
                Ok(Coefficient::Exact(n.pow(exp as usize)))
            }
            Coefficient::Approx(f) => Ok(Coefficient::Approx(f.powf(f64::from(exp)))),
        }
    }

    /// Nearest f64 (may round for very large exact values)
    pub fn to_f64(&self) -> f64 {
        match self {
            Coefficient::Approx(f) => *f,
            Coefficient::Exact(n) => match u64::try_from(n.clone()) {
                Ok(small) => small as f64,
                // Decimal parsing rounds correctly, so go through the digits
                Err(_) => n.to_string().parse().unwrap_or(f64::INFINITY),
            },
        }
    }

    /// Exact value as u64, if it is exact and fits
    pub fn to_u64(&self) -> Option<u64> {
        match self {
            Coefficient::Exact(n) => u64::try_from(n.clone()).ok(),
            Coefficient::Approx(_) => None,
        }
    }
}

impl From<u64> for Coefficient {
    fn from(n: u64) -> Self {
        Coefficient::from_u64(n)
    }
}

// Approximate values are always positive and finite or infinite, never NaN
impl Eq for Coefficient {}

impl Hash for Coefficient {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Coefficient::Exact(n) => {
                0u8.hash(state);
                n.hash(state);
            }
            Coefficient::Approx(x) => {
                1u8.hash(state);
                x.to_bits().hash(state);
            }
        }
    }
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coefficient::Exact(n) => write!(f, "{}", n),
            Coefficient::Approx(x) => write!(f, "{}", x),
        }
    }
}

impl Serialize for Coefficient {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Coefficient::Exact(n) => serializer.serialize_str(&n.to_string()),
            Coefficient::Approx(x) => serializer.serialize_f64(*x),
        }
    }
}

impl<'de> Deserialize<'de> for Coefficient {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Digits(String),
            Float(f64),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Digits(s) => s.parse::<UBig>()
                .map(Coefficient::Exact)
                .map_err(|_| serde::de::Error::custom(format!("invalid integer constant: {}", s))),
            Repr::Float(x) => Ok(Coefficient::Approx(x)),
        }
    }
}

/// Reduce `top / bottom` to lowest terms.
///
/// Approximate operands are returned unchanged, as are zero operands.
pub fn reduce(top: Coefficient, bottom: Coefficient) -> (Coefficient, Coefficient) {
    match (top, bottom) {
        (Coefficient::Exact(mut n), Coefficient::Exact(mut d)) => {
            if n == UBig::ZERO || d == UBig::ZERO {
                return (Coefficient::Exact(n), Coefficient::Exact(d));
            }
            loop {
                let div = n.clone().gcd(d.clone());
                if div == UBig::ONE {
                    break;
                }
                n = &n / &div;
                d = &d / &div;
            }
            (Coefficient::Exact(n), Coefficient::Exact(d))
        }
        (top, bottom) => (top, bottom),
    }
}

/// A plain number used to scale a unit-type (`60 * seconds`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Int(i64),
    Real(f64),
}

impl Scalar {
    /// Split into a constant with trailing factors of ten moved into a
    /// decimal order: `453592370` becomes `(45359237, 1)`.
    pub fn normalize(self) -> UnitResult<(Coefficient, i32)> {
        match self {
            Scalar::Int(n) if n > 0 => {
                let mut n = n as u64;
                let mut order = 0;
                while n % 10 == 0 {
                    n /= 10;
                    order += 1;
                }
                Ok((Coefficient::from_u64(n), order))
            }
            Scalar::Real(x) if x.is_finite() && x > 0.0 => {
                let mut x = x;
                let mut order = 0;
                while x % 10.0 == 0.0 {
                    x /= 10.0;
                    order += 1;
                }
                Ok((Coefficient::Approx(x), order))
            }
            other => Err(UnitError::InvalidScale(other.to_string())),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Real(x) => write!(f, "{}", x),
        }
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Int(n as i64)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Int(n)
    }
}

impl From<u32> for Scalar {
    fn from(n: u32) -> Self {
        Scalar::Int(n as i64)
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Scalar::Real(x)
    }
}

/// Conversion factor: `value_b = value_a * top / bottom * 10^order`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Factor {
    pub top: Coefficient,
    pub bottom: Coefficient,
    pub order: i32,
}

impl Factor {
    pub fn identity() -> Self {
        Factor {
            top: Coefficient::one(),
            bottom: Coefficient::one(),
            order: 0,
        }
    }

    pub fn new(top: Coefficient, bottom: Coefficient, order: i32) -> Self {
        Factor { top, bottom, order }
    }

    /// Same factor with `top / bottom` in lowest terms
    pub fn reduced(self) -> Self {
        let (top, bottom) = reduce(self.top, self.bottom);
        Factor { top, bottom, order: self.order }
    }

    pub fn is_identity(&self) -> bool {
        self.top.is_one() && self.bottom.is_one() && self.order == 0
    }

    pub fn is_exact(&self) -> bool {
        self.top.is_exact() && self.bottom.is_exact()
    }

    /// `self * other^exp`, folding constants and order
    pub fn times_pow(&self, other: &Factor, exp: i32) -> UnitResult<Factor> {
        let power = exp.unsigned_abs();
        let (up, down) = if exp >= 0 {
            (other.top.pow(power)?, other.bottom.pow(power)?)
        } else {
            (other.bottom.pow(power)?, other.top.pow(power)?)
        };
        let order = other.order
            .checked_mul(exp)
            .and_then(|o| o.checked_add(self.order))
            .ok_or_else(|| UnitError::ExponentOverflow(
                format!("decimal order {} + {} x {}", self.order, other.order, exp),
            ))?;
        Ok(Factor {
            top: self.top.mul(&up),
            bottom: self.bottom.mul(&down),
            order,
        })
    }

    /// `self / other`
    pub fn over(&self, other: &Factor) -> UnitResult<Factor> {
        self.times_pow(other, -1)
    }

    pub fn inverse(&self) -> UnitResult<Factor> {
        Factor::identity().over(self)
    }

    /// Same factor times `10^order`
    pub fn shifted(&self, order: i32) -> UnitResult<Factor> {
        let shifted = self.order
            .checked_add(order)
            .ok_or_else(|| UnitError::ExponentOverflow(format!("decimal order {} + {}", self.order, order)))?;
        Ok(Factor { order: shifted, ..self.clone() })
    }

    /// The factor as a single f64
    pub fn ratio(&self) -> f64 {
        self.apply(1.0)
    }

    /// Scale `value` by this factor
    pub fn apply(&self, value: f64) -> f64 {
        let scaled = value * self.top.to_f64() / self.bottom.to_f64();
        if self.order >= 0 {
            scaled * 10_f64.powi(self.order)
        } else {
            scaled / 10_f64.powi(-self.order)
        }
    }
}

impl Default for Factor {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.top, self.bottom)?;
        if self.order != 0 {
            write!(f, "x10^{}", self.order)?;
        }
        Ok(())
    }
}
