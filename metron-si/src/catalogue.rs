//! The standard unit catalogue
//!
//! SI base units with every prefix, common time units, imperial mass and
//! length, and the named SI derived units.

use tracing::info;
use metron_core::{UnitError, UnitId, UnitResult};
use metron_units::{Composed, UnitRegistry};
use crate::prefixes::{build_prefixed, declare_prefixed};

/// Build a registry holding the standard catalogue
pub fn standard_registry() -> UnitResult<UnitRegistry> {
    let mut registry = UnitRegistry::new();
    Catalogue { registry: &mut registry }.define_all()?;
    info!(units = registry.registered_count(), "standard unit catalogue loaded");
    Ok(registry)
}

struct Catalogue<'a> {
    registry: &'a mut UnitRegistry,
}

impl Catalogue<'_> {
    fn define_all(&mut self) -> UnitResult<()> {
        self.define_base_units()?;
        self.define_time_units()?;
        self.define_imperial_mass()?;
        self.define_imperial_length()?;
        self.define_area_units()?;
        self.define_temperature_units()?;
        self.define_derived_units()?;
        Ok(())
    }

    fn get(&self, symbol: &str) -> UnitResult<UnitId> {
        self.registry.get(symbol)
    }

    fn name(&mut self, unit: UnitId, symbol: &str, name: &str) -> UnitResult<UnitId> {
        self.registry.register(unit, symbol, name)
    }

    fn named_prefixed(&mut self, unit: UnitId, symbol: &str, name: &str) -> UnitResult<UnitId> {
        let unit = self.name(unit, symbol, name)?;
        build_prefixed(self.registry, unit)
    }

    fn product(&mut self, a: &str, b: &str) -> UnitResult<UnitId> {
        let (a, b) = (self.get(a)?, self.get(b)?);
        dimensioned(self.registry.multiply(a, b)?)
    }

    fn quotient(&mut self, a: &str, b: &str) -> UnitResult<UnitId> {
        let (a, b) = (self.get(a)?, self.get(b)?);
        dimensioned(self.registry.divide(a, b)?)
    }

    fn times(&mut self, k: i64, unit: &str) -> UnitResult<UnitId> {
        let unit = self.get(unit)?;
        self.registry.scale(unit, k)
    }

    fn define_base_units(&mut self) -> UnitResult<()> {
        declare_prefixed(self.registry, "g", "Grams")?;
        declare_prefixed(self.registry, "m", "Metres")?;
        declare_prefixed(self.registry, "C", "Coulombs")?;
        declare_prefixed(self.registry, "s", "Seconds")?;
        declare_prefixed(self.registry, "mol", "Moles")?;
        declare_prefixed(self.registry, "K", "Kelvins")?;
        self.registry.declare_base("rad", "Radians")?;
        Ok(())
    }

    fn define_time_units(&mut self) -> UnitResult<()> {
        let min = self.times(60, "s")?;
        self.name(min, "min", "Minutes")?;
        let h = self.times(60, "min")?;
        self.name(h, "h", "Hours")?;
        let d = self.times(24, "h")?;
        self.name(d, "d", "Days")?;
        Ok(())
    }

    fn define_imperial_mass(&mut self) -> UnitResult<()> {
        // international avoirdupois pound, exactly 0.45359237 kg
        let lb = self.times(453_592_370, "ug")?;
        let lb = self.name(lb, "lb", "Pounds")?;
        let oz = self.registry.scale_down(lb, 16)?;
        self.name(oz, "oz", "Ounces")?;
        Ok(())
    }

    fn define_imperial_length(&mut self) -> UnitResult<()> {
        let ft = self.times(304_800, "um")?;
        let ft = self.name(ft, "'", "Feet")?;
        let yd = self.times(3, "'")?;
        self.name(yd, "yds", "Yards")?;
        let inch = self.registry.scale_down(ft, 12)?;
        let inch = self.name(inch, "\"", "Inches")?;
        let mil = self.registry.scale_order(inch, -3)?;
        self.name(mil, "mil", "Mils")?;
        let ch = self.times(22, "yds")?;
        self.name(ch, "ch", "Chains")?;
        let fur = self.times(10, "ch")?;
        self.name(fur, "fur", "Furlongs")?;
        let mi = self.times(8, "fur")?;
        self.name(mi, "mi", "Miles")?;
        let lea = self.times(3, "mi")?;
        self.name(lea, "lea", "Leagues")?;
        Ok(())
    }

    fn define_area_units(&mut self) -> UnitResult<()> {
        let ac = self.product("fur", "ch")?;
        self.name(ac, "ac", "Acres")?;
        let ha = self.product("hm", "hm")?;
        self.name(ha, "ha", "Hectares")?;
        Ok(())
    }

    fn define_temperature_units(&mut self) -> UnitResult<()> {
        let five_k = self.times(5, "K")?;
        let rankine = self.registry.scale_down(five_k, 9)?;
        self.name(rankine, "R", "Rankines")?;
        Ok(())
    }

    fn define_derived_units(&mut self) -> UnitResult<()> {
        let s = self.get("s")?;
        let hz = self.registry.reciprocal(s)?;
        self.named_prefixed(hz, "Hz", "Hertz")?;

        let kg_m = self.product("kg", "m")?;
        let s2 = dimensioned(self.registry.power(s, 2)?)?;
        let newton = dimensioned(self.registry.divide(kg_m, s2)?)?;
        self.named_prefixed(newton, "N", "Newtons")?;

        let m = self.get("m")?;
        let m2 = dimensioned(self.registry.power(m, 2)?)?;
        let newton = self.get("N")?;
        let pa = dimensioned(self.registry.divide(newton, m2)?)?;
        self.named_prefixed(pa, "Pa", "Pascals")?;

        let joule = self.product("N", "m")?;
        self.named_prefixed(joule, "J", "Joules")?;
        let watt = self.quotient("J", "s")?;
        self.named_prefixed(watt, "W", "Watts")?;
        let ampere = self.quotient("C", "s")?;
        self.named_prefixed(ampere, "A", "Amperes")?;
        let volt = self.quotient("J", "C")?;
        self.named_prefixed(volt, "V", "Volts")?;
        let farad = self.quotient("C", "V")?;
        self.named_prefixed(farad, "F", "Farads")?;
        let ohm = self.quotient("V", "A")?;
        let ohm = self.named_prefixed(ohm, "ohm", "Ohms")?;
        let siemens = self.registry.reciprocal(ohm)?;
        self.named_prefixed(siemens, "S", "Siemens")?;
        let weber = self.quotient("J", "A")?;
        self.named_prefixed(weber, "Wb", "Webers")?;

        let weber = self.get("Wb")?;
        let tesla = dimensioned(self.registry.divide(weber, m2)?)?;
        self.named_prefixed(tesla, "T", "Teslas")?;
        let henry = self.product("ohm", "s")?;
        self.named_prefixed(henry, "H", "Henries")?;
        Ok(())
    }
}

fn dimensioned(composed: Composed) -> UnitResult<UnitId> {
    composed
        .unit()
        .ok_or_else(|| UnitError::DimensionMismatch("catalogue definition reduced to a pure number".to_string()))
}
