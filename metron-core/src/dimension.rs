//! Dimensional analysis types
//!
//! A unit-type's dimensions are a sparse vector of `(unit, exponent)` pairs
//! meaning "the product of unit^exponent". Entries are kept sorted by
//! strictly decreasing creation index, each unit appears at most once and
//! no exponent is zero.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use serde::{Serialize, Deserialize};
use crate::{UnitError, UnitResult};

/// Creation index of a unit-type.
///
/// Assigned once when the descriptor is created and strictly increasing
/// across a registry; it is the canonical ordering key of dimension vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl UnitId {
    /// Position of the descriptor in its registry
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Sparse dimension vector
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DimList {
    entries: Vec<(UnitId, i32)>,
}

impl DimList {
    /// Dimensionless (no entries)
    pub const fn empty() -> Self {
        DimList { entries: Vec::new() }
    }

    /// A single `unit^exp` entry (empty when `exp` is zero)
    pub fn single(unit: UnitId, exp: i32) -> Self {
        if exp == 0 {
            return DimList::empty();
        }
        DimList { entries: vec![(unit, exp)] }
    }

    /// Build from arbitrary pairs, summing duplicates and dropping zeros
    pub fn from_entries(entries: impl IntoIterator<Item = (UnitId, i32)>) -> UnitResult<Self> {
        let mut sums: BTreeMap<UnitId, i32> = BTreeMap::new();
        for (unit, exp) in entries {
            let sum = sums.entry(unit).or_insert(0);
            let current = *sum;
            *sum = current
                .checked_add(exp)
                .ok_or_else(|| UnitError::ExponentOverflow(format!("{} + {}", current, exp)))?;
        }
        Ok(DimList {
            entries: sums.into_iter().rev().filter(|&(_, e)| e != 0).collect(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[(UnitId, i32)] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (UnitId, i32)> + '_ {
        self.entries.iter().copied()
    }

    /// Exponent of `unit`, zero if absent
    pub fn exponent_of(&self, unit: UnitId) -> i32 {
        self.entries
            .iter()
            .find(|(u, _)| *u == unit)
            .map(|&(_, e)| e)
            .unwrap_or(0)
    }

    /// Pop the highest-index entry, returning it with the remainder
    pub fn split_first(&self) -> Option<((UnitId, i32), DimList)> {
        let (&head, rest) = self.entries.split_first()?;
        Some((head, DimList { entries: rest.to_vec() }))
    }

    /// Multiply every exponent by `k`
    pub fn scaled(&self, k: i32) -> UnitResult<DimList> {
        if k == 0 {
            return Ok(DimList::empty());
        }
        let entries = self.entries
            .iter()
            .map(|&(u, e)| times(e, k).map(|exp| (u, exp)))
            .collect::<UnitResult<Vec<_>>>()?;
        Ok(DimList { entries })
    }

    /// See [`merge`]
    pub fn merge(&self, other: &DimList, multiplier: i32) -> UnitResult<DimList> {
        merge(self, other, multiplier)
    }

    /// Symbolic form: numerator entries, then `/`, then denominator entries
    /// with their sign flipped. Exponent 1 is implicit. A vector with only
    /// negative exponents keeps the signs and has no `/`.
    pub fn symbolic<F>(&self, mut symbol_of: F) -> String
    where
        F: FnMut(UnitId) -> String,
    {
        let mut render = |unit: UnitId, exp: i64| {
            let symbol = symbol_of(unit);
            if exp == 1 {
                symbol
            } else {
                format!("{}{}", symbol, exp)
            }
        };

        let top: Vec<String> = self.iter()
            .filter(|&(_, e)| e > 0)
            .map(|(u, e)| render(u, e.into()))
            .collect();
        let negatives: Vec<(UnitId, i32)> = self.iter().filter(|&(_, e)| e < 0).collect();

        if top.is_empty() {
            return negatives.into_iter()
                .map(|(u, e)| render(u, e.into()))
                .collect::<Vec<_>>()
                .join(" ");
        }
        if negatives.is_empty() {
            return top.join(" ");
        }
        let bottom: Vec<String> = negatives.into_iter().map(|(u, e)| render(u, -i64::from(e))).collect();
        format!("{}/{}", top.join(" "), bottom.join(" "))
    }
}

impl fmt::Display for DimList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "1");
        }
        write!(f, "{}", self.symbolic(|u| u.to_string()))
    }
}

fn times(exp: i32, k: i32) -> UnitResult<i32> {
    exp.checked_mul(k)
        .ok_or_else(|| UnitError::ExponentOverflow(format!("{} x {}", exp, k)))
}

/// Merge two dimension vectors into `a * b^multiplier`.
///
/// Both inputs are sorted by decreasing creation index, so this is a
/// single two-pointer pass. Matching units add their exponents and vanish
/// when the sum is zero; the output keeps the ordering invariant. Fails
/// with `ExponentOverflow` instead of wrapping.
pub fn merge(a: &DimList, b: &DimList, multiplier: i32) -> UnitResult<DimList> {
    if multiplier == 0 {
        return Ok(a.clone());
    }

    let mut out = Vec::with_capacity(a.len() + b.len());
    let mut left = a.entries.iter().copied().peekable();
    let mut right = b.entries.iter().copied().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (Some((ua, ea)), Some((ub, eb))) => match ua.cmp(&ub) {
                Ordering::Greater => {
                    out.push((ua, ea));
                    left.next();
                }
                Ordering::Less => {
                    out.push((ub, times(eb, multiplier)?));
                    right.next();
                }
                Ordering::Equal => {
                    let exp = times(eb, multiplier)?
                        .checked_add(ea)
                        .ok_or_else(|| UnitError::ExponentOverflow(format!("{} + {} x {}", ea, eb, multiplier)))?;
                    if exp != 0 {
                        out.push((ua, exp));
                    }
                    left.next();
                    right.next();
                }
            },
            (Some(entry), None) => {
                out.push(entry);
                left.next();
            }
            (None, Some((ub, eb))) => {
                out.push((ub, times(eb, multiplier)?));
                right.next();
            }
            (None, None) => break,
        }
    }

    Ok(DimList { entries: out })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> UnitId {
        UnitId(n)
    }

    #[test]
    fn test_merge_interleaves_by_index() {
        let a = DimList::from_entries([(id(5), 1), (id(1), 2)]).unwrap();
        let b = DimList::from_entries([(id(3), 1)]).unwrap();
        let merged = merge(&a, &b, 1).unwrap();
        assert_eq!(merged.entries(), &[(id(5), 1), (id(3), 1), (id(1), 2)]);
    }

    #[test]
    fn test_merge_scales_right_side() {
        let a = DimList::single(id(2), 1);
        let b = DimList::from_entries([(id(4), 2), (id(1), -1)]).unwrap();
        let merged = merge(&a, &b, -1).unwrap();
        assert_eq!(merged.entries(), &[(id(4), -2), (id(2), 1), (id(1), 1)]);
    }

    #[test]
    fn test_merge_cancels() {
        let velocity = DimList::from_entries([(id(2), 1), (id(1), -1)]).unwrap();
        assert!(merge(&velocity, &velocity, -1).unwrap().is_empty());

        let time = DimList::single(id(1), 1);
        let length = merge(&velocity, &time, 1).unwrap();
        assert_eq!(length, DimList::single(id(2), 1));
    }

    #[test]
    fn test_merge_identity() {
        let force = DimList::from_entries([(id(3), 1), (id(2), 1), (id(1), -2)]).unwrap();
        assert_eq!(merge(&force, &DimList::empty(), 1).unwrap(), force);
        assert_eq!(merge(&DimList::empty(), &force, 1).unwrap(), force);
    }

    #[test]
    fn test_from_entries_normalizes() {
        let list = DimList::from_entries([(id(1), 1), (id(7), 2), (id(1), -1), (id(3), 0)]).unwrap();
        assert_eq!(list.entries(), &[(id(7), 2)]);
    }

    #[test]
    fn test_split_first() {
        let list = DimList::from_entries([(id(1), -2), (id(9), 1)]).unwrap();
        let (head, rest) = list.split_first().unwrap();
        assert_eq!(head, (id(9), 1));
        assert_eq!(rest, DimList::single(id(1), -2));
        assert!(DimList::empty().split_first().is_none());
    }

    #[test]
    fn test_scaled() {
        let list = DimList::from_entries([(id(2), 1), (id(1), -1)]).unwrap();
        assert_eq!(list.scaled(3).unwrap().entries(), &[(id(2), 3), (id(1), -3)]);
        assert!(list.scaled(0).unwrap().is_empty());
    }

    #[test]
    fn test_symbolic() {
        let names = |u: UnitId| match u.0 {
            1 => "s".to_string(),
            2 => "m".to_string(),
            3 => "kg".to_string(),
            _ => "?".to_string(),
        };
        let force = DimList::from_entries([(id(3), 1), (id(2), 1), (id(1), -2)]).unwrap();
        assert_eq!(force.symbolic(names), "kg m/s2");

        let area = DimList::single(id(2), 2);
        assert_eq!(area.symbolic(names), "m2");

        let frequency = DimList::single(id(1), -1);
        assert_eq!(frequency.symbolic(names), "s-1");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", DimList::empty()), "1");
        assert_eq!(format!("{}", DimList::from_entries([(id(2), 1), (id(1), -1)]).unwrap()), "#2/#1");
    }

    #[test]
    fn test_exponent_overflow_is_an_error() {
        let huge = DimList::single(id(1), 1 << 20);
        assert!(matches!(huge.scaled(1 << 12), Err(UnitError::ExponentOverflow(_))));
        assert!(matches!(merge(&huge, &huge, 1 << 11), Err(UnitError::ExponentOverflow(_))));

        let max = DimList::single(id(1), i32::MAX);
        assert!(matches!(merge(&max, &DimList::single(id(1), 1), 1), Err(UnitError::ExponentOverflow(_))));
        assert_eq!(merge(&max, &DimList::single(id(1), 1), -1).unwrap(), DimList::single(id(1), i32::MAX - 1));
    }

    #[test]
    fn test_symbolic_extreme_exponent() {
        let list = DimList::single(id(1), i32::MIN);
        assert_eq!(list.symbolic(|_| "s".to_string()), "s-2147483648");
        let list = DimList::from_entries([(id(2), 1), (id(1), i32::MIN)]).unwrap();
        assert_eq!(list.symbolic(|u| if u.0 == 2 { "m".to_string() } else { "s".to_string() }), "m/s2147483648");
    }
}
