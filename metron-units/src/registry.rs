//! Unit-type registry
//!
//! Owns every descriptor in creation order (the creation index is the
//! position in the table, so it only ever grows) and the symbol table of
//! registered types. Anonymous descriptors are interned by dimensions and
//! constant, so repeating a composition reuses its descriptor.
//! Single-writer: wrap the registry in a lock before sharing it between
//! threads that declare units.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::debug;
use metron_core::{DimList, Factor, UnitError, UnitId, UnitResult};
use crate::unit::UnitType;

/// Registry of all unit-types
#[derive(Debug, Clone, Default)]
pub struct UnitRegistry {
    units: Vec<UnitType>,
    symbols: HashMap<String, UnitId>,
    anonymous: HashMap<(DimList, Factor), UnitId>,
}

impl UnitRegistry {
    /// Empty registry; declare base units first, then derived ones
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a descriptor by creation index
    pub fn unit(&self, id: UnitId) -> UnitResult<&UnitType> {
        self.units
            .get(id.index())
            .ok_or_else(|| UnitError::UnknownUnit(id.to_string()))
    }

    /// Get a registered unit-type by symbol
    pub fn lookup(&self, symbol: &str) -> Option<UnitId> {
        self.symbols.get(symbol).copied()
    }

    /// Like [`lookup`](Self::lookup), failing on unknown symbols
    pub fn get(&self, symbol: &str) -> UnitResult<UnitId> {
        self.lookup(symbol)
            .ok_or_else(|| UnitError::UnknownUnit(symbol.to_string()))
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains_key(symbol)
    }

    /// All registered symbols, sorted
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.symbols.keys().map(|s| s.as_str()).collect();
        symbols.sort_unstable();
        symbols
    }

    /// Number of registered (named) unit-types
    pub fn registered_count(&self) -> usize {
        self.symbols.len()
    }

    /// Number of descriptors created so far, anonymous ones included
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Registered descriptors in creation order
    pub fn registered(&self) -> impl Iterator<Item = &UnitType> + '_ {
        self.units.iter().filter(|u| u.is_registered())
    }

    fn next_id(&self) -> UnitId {
        UnitId(self.units.len() as u32)
    }

    /// Anonymous descriptor for `dims` scaled by `factor`, created on first use
    pub(crate) fn push_anonymous(&mut self, dims: DimList, factor: Factor) -> UnitId {
        let id = self.next_id();
        match self.anonymous.entry((dims, factor.reduced())) {
            Entry::Occupied(existing) => *existing.get(),
            Entry::Vacant(slot) => {
                let (dims, factor) = slot.key().clone();
                self.units.push(UnitType::anonymous(id, dims, factor));
                slot.insert(id);
                id
            }
        }
    }

    fn check_symbol(&self, symbol: &str, new_owner: &str) -> UnitResult<()> {
        if symbol.is_empty() {
            return Err(UnitError::EmptySymbol);
        }
        if let Some(existing) = self.lookup(symbol) {
            return Err(UnitError::SymbolConflict {
                symbol: symbol.to_string(),
                new_owner: new_owner.to_string(),
                existing_owner: self.unit(existing)?.label(),
            });
        }
        Ok(())
    }

    /// Declare an irreducible base unit (mass, length, time, ...)
    pub fn declare_base(&mut self, symbol: &str, name: &str) -> UnitResult<UnitId> {
        self.check_symbol(symbol, name)?;

        let id = self.next_id();
        self.units.push(UnitType::base(id, symbol, name));
        self.symbols.insert(symbol.to_string(), id);
        debug!(symbol, name, index = id.0, "declared base unit");
        Ok(id)
    }

    /// Give `unit` a symbol and freeze its canonical conversion record.
    ///
    /// Afterwards the type is atomic: its own dimensions are just itself and
    /// its expansion into base units lives in the record. Nothing is changed
    /// if any check fails.
    pub fn register(&mut self, unit: UnitId, symbol: &str, name: &str) -> UnitResult<UnitId> {
        let ty = self.unit(unit)?;
        if let Some(existing) = ty.symbol() {
            return Err(UnitError::AlreadyRegistered {
                unit: ty.label(),
                symbol: existing.to_string(),
            });
        }
        self.check_symbol(symbol, name)?;

        let interned = (ty.dims().clone(), ty.factor());
        let record = match self.expand(ty.dims(), ty.factor()) {
            Ok(record) if record.factor.is_exact() => record,
            Ok(_) => {
                debug!(symbol, name, "rejected non-integral conversion");
                return Err(UnitError::NonIntegralConversion { symbol: symbol.to_string() });
            }
            Err(e) => {
                debug!(symbol, name, error = %e, "rejected registration");
                return Err(e);
            }
        };

        debug!(
            symbol,
            name,
            index = unit.0,
            factor = %record.factor,
            "registered unit"
        );
        self.anonymous.remove(&interned);
        self.units[unit.index()].commit_registration(symbol, name, record);
        self.symbols.insert(symbol.to_string(), unit);
        Ok(unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metron_core::Coefficient;
    use crate::quantity::Quantity;

    #[test]
    fn test_declare_base() {
        let mut reg = UnitRegistry::new();
        let g = reg.declare_base("g", "Grams").unwrap();
        let m = reg.declare_base("m", "Metres").unwrap();

        assert!(m > g);
        assert_eq!(reg.lookup("m"), Some(m));
        assert_eq!(reg.get("g").unwrap(), g);
        assert!(reg.unit(m).unwrap().is_base());
        assert_eq!(reg.symbols(), vec!["g", "m"]);
    }

    #[test]
    fn test_unknown_symbol() {
        let reg = UnitRegistry::new();
        assert_eq!(reg.get("furlong"), Err(UnitError::UnknownUnit("furlong".to_string())));
        assert!(reg.unit(UnitId(7)).is_err());
    }

    #[test]
    fn test_symbol_conflict_names_both_owners() {
        let mut reg = UnitRegistry::new();
        reg.declare_base("m", "Metres").unwrap();
        let err = reg.declare_base("m", "Miles").unwrap_err();
        assert_eq!(err, UnitError::SymbolConflict {
            symbol: "m".to_string(),
            new_owner: "Miles".to_string(),
            existing_owner: "Metres".to_string(),
        });
    }

    #[test]
    fn test_symbol_conflict_on_register_leaves_type_unregistered() {
        let mut reg = UnitRegistry::new();
        let s = reg.declare_base("s", "Seconds").unwrap();
        let minutes = reg.scale(s, 60).unwrap();

        let err = reg.register(minutes, "s", "Minutes").unwrap_err();
        assert!(matches!(err, UnitError::SymbolConflict { .. }));
        assert!(!reg.unit(minutes).unwrap().is_registered());
        assert_eq!(reg.lookup("s"), Some(s));
    }

    #[test]
    fn test_register_resets_working_fields() {
        let mut reg = UnitRegistry::new();
        let s = reg.declare_base("s", "Seconds").unwrap();
        let anon = reg.scale(s, 60).unwrap();
        assert_eq!(reg.unit(anon).unwrap().top(), &Coefficient::from_u64(6));

        let min = reg.register(anon, "min", "Minutes").unwrap();
        assert_eq!(min, anon);

        let ty = reg.unit(min).unwrap();
        assert_eq!(ty.dims(), &DimList::single(min, 1));
        assert!(ty.factor().is_identity());

        let record = ty.conversion_record().unwrap();
        assert_eq!(record.dims, DimList::single(s, 1));
        assert_eq!(record.factor, Factor::new(Coefficient::from_u64(6), Coefficient::one(), 1));
    }

    #[test]
    fn test_register_twice_fails() {
        let mut reg = UnitRegistry::new();
        let s = reg.declare_base("s", "Seconds").unwrap();
        let min = reg.scale(s, 60).unwrap();
        reg.register(min, "min", "Minutes").unwrap();

        let err = reg.register(min, "minute", "Minutes").unwrap_err();
        assert!(matches!(err, UnitError::AlreadyRegistered { .. }));
        assert!(reg.lookup("minute").is_none());

        let err = reg.register(s, "sec", "Seconds").unwrap_err();
        assert!(matches!(err, UnitError::AlreadyRegistered { .. }));
    }

    #[test]
    fn test_register_non_integral_fails() {
        let mut reg = UnitRegistry::new();
        let m = reg.declare_base("m", "Metres").unwrap();
        let fathom = reg.scale(m, 1.8288).unwrap();

        let err = reg.register(fathom, "ftm", "Fathoms").unwrap_err();
        assert_eq!(err, UnitError::NonIntegralConversion { symbol: "ftm".to_string() });
        assert!(!reg.contains("ftm"));
        assert!(!reg.unit(fathom).unwrap().is_registered());
    }

    #[test]
    fn test_empty_symbol() {
        let mut reg = UnitRegistry::new();
        assert_eq!(reg.declare_base("", "Nothing"), Err(UnitError::EmptySymbol));
    }

    #[test]
    fn test_counts() {
        let mut reg = UnitRegistry::new();
        assert!(reg.is_empty());
        let m = reg.declare_base("m", "Metres").unwrap();
        reg.power(m, 2).unwrap();
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.registered_count(), 1);
        assert_eq!(reg.registered().count(), 1);
    }

    #[test]
    fn test_repeated_composition_reuses_descriptor() {
        let mut reg = UnitRegistry::new();
        let m = reg.declare_base("m", "Metres").unwrap();
        let s = reg.declare_base("s", "Seconds").unwrap();

        let speed = reg.divide(m, s).unwrap().unit().unwrap();
        let len = reg.len();
        for _ in 0..1000 {
            assert_eq!(reg.divide(m, s).unwrap().unit(), Some(speed));
        }
        assert_eq!(reg.len(), len);

        let a = Quantity::new(10.0, m);
        let b = Quantity::new(5.0, m);
        reg.mul(&a, &b).unwrap();
        let len = reg.len();
        reg.mul(&a, &b).unwrap();
        assert_eq!(reg.len(), len);
    }

    #[test]
    fn test_registered_type_leaves_the_intern_table() {
        let mut reg = UnitRegistry::new();
        let s = reg.declare_base("s", "Seconds").unwrap();
        let min = reg.scale(s, 60).unwrap();
        assert_eq!(reg.scale(s, 60).unwrap(), min);
        reg.register(min, "min", "Minutes").unwrap();

        let again = reg.scale(s, 60).unwrap();
        assert_ne!(again, min);
        assert!(!reg.unit(again).unwrap().is_registered());
        assert_eq!(reg.factor_between(again, min).unwrap(), Factor::identity());
    }
}
