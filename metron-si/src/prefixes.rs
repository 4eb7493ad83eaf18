//! SI prefixes and bulk derivation of prefixed units

use tracing::debug;
use metron_core::{UnitError, UnitId, UnitResult};
use metron_units::UnitRegistry;

/// A decimal prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prefix {
    pub symbol: &'static str,
    pub name: &'static str,
    pub order: i32,
}

const fn prefix(symbol: &'static str, name: &'static str, order: i32) -> Prefix {
    Prefix { symbol, name, order }
}

/// The 20 SI prefixes, largest first
pub const PREFIXES: [Prefix; 20] = [
    prefix("Y", "Yotta", 24),
    prefix("Z", "Zetta", 21),
    prefix("E", "Exa", 18),
    prefix("P", "Peta", 15),
    prefix("T", "Tera", 12),
    prefix("G", "Giga", 9),
    prefix("M", "Mega", 6),
    prefix("k", "Kilo", 3),
    prefix("h", "Hecto", 2),
    prefix("da", "Deca", 1),
    prefix("d", "Deci", -1),
    prefix("c", "Centi", -2),
    prefix("m", "Milli", -3),
    prefix("u", "Micro", -6),
    prefix("n", "Nano", -9),
    prefix("p", "Pico", -12),
    prefix("f", "Femto", -15),
    prefix("a", "Atto", -18),
    prefix("z", "Zepto", -21),
    prefix("y", "Yocto", -24),
];

/// Look up a prefix by its symbol
pub fn find_prefix(symbol: &str) -> Option<&'static Prefix> {
    PREFIXES.iter().find(|p| p.symbol == symbol)
}

/// Register every prefixed variant of a registered unit.
///
/// Symbols are `prefix + symbol` ("kg") and names are
/// `Prefix + lowercase name` ("Kilograms"). Returns `unit`.
pub fn build_prefixed(registry: &mut UnitRegistry, unit: UnitId) -> UnitResult<UnitId> {
    let ty = registry.unit(unit)?;
    let symbol = ty
        .symbol()
        .ok_or_else(|| UnitError::UnregisteredComponent(ty.label()))?
        .to_string();
    let name = ty.label().to_lowercase();

    for p in &PREFIXES {
        let scaled = registry.scale_order(unit, p.order)?;
        registry.register(
            scaled,
            &format!("{}{}", p.symbol, symbol),
            &format!("{}{}", p.name, name),
        )?;
    }
    debug!(symbol = %symbol, count = PREFIXES.len(), "registered prefixed units");
    Ok(unit)
}

/// Declare a base unit together with all of its prefixed variants
pub fn declare_prefixed(registry: &mut UnitRegistry, symbol: &str, name: &str) -> UnitResult<UnitId> {
    let base = registry.declare_base(symbol, name)?;
    build_prefixed(registry, base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use metron_core::{Coefficient, DimList, Factor};

    #[test]
    fn test_prefix_table() {
        assert_eq!(PREFIXES.len(), 20);
        assert!(PREFIXES.windows(2).all(|w| w[0].order > w[1].order));
        assert_eq!(find_prefix("da").unwrap().order, 1);
        assert_eq!(find_prefix("u").unwrap().name, "Micro");
        assert!(find_prefix("x").is_none());
    }

    #[test]
    fn test_declare_prefixed() {
        let mut reg = UnitRegistry::new();
        let g = declare_prefixed(&mut reg, "g", "Grams").unwrap();
        assert_eq!(reg.registered_count(), 21);

        let kg = reg.get("kg").unwrap();
        let ty = reg.unit(kg).unwrap();
        assert_eq!(ty.name(), Some("Kilograms"));

        let record = ty.conversion_record().unwrap();
        assert_eq!(record.dims, DimList::single(g, 1));
        assert_eq!(record.factor, Factor::new(Coefficient::one(), Coefficient::one(), 3));

        let ng = reg.get("ng").unwrap();
        assert_eq!(reg.unit(ng).unwrap().name(), Some("Nanograms"));
        assert_eq!(reg.convert_value(1.0, kg, ng).unwrap(), 1e12);
    }

    #[test]
    fn test_prefixing_derived_unit() {
        let mut reg = UnitRegistry::new();
        let s = reg.declare_base("s", "Seconds").unwrap();
        let hz = reg.power(s, -1).unwrap().unit().unwrap();
        let hz = reg.register(hz, "Hz", "Hertz").unwrap();
        build_prefixed(&mut reg, hz).unwrap();

        let khz = reg.get("kHz").unwrap();
        assert_eq!(reg.unit(khz).unwrap().name(), Some("Kilohertz"));
        let record = reg.canonical(khz).unwrap();
        assert_eq!(record.dims, DimList::single(s, -1));
        assert_eq!(record.factor.order, 3);
    }

    #[test]
    fn test_prefixing_requires_registered_unit() {
        let mut reg = UnitRegistry::new();
        let s = reg.declare_base("s", "Seconds").unwrap();
        let anon = reg.scale(s, 60).unwrap();
        assert!(matches!(
            build_prefixed(&mut reg, anon),
            Err(UnitError::UnregisteredComponent(_))
        ));
    }

    #[test]
    fn test_prefix_collision_is_reported() {
        let mut reg = UnitRegistry::new();
        reg.declare_base("km", "Kilomarks").unwrap();
        let err = declare_prefixed(&mut reg, "m", "Metres").unwrap_err();
        assert!(matches!(err, UnitError::SymbolConflict { .. }));
    }
}
