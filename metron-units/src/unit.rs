//! Unit-type descriptors

use serde::{Serialize, Deserialize};
use metron_core::{Coefficient, DimList, Factor, UnitId};

/// Canonical expansion of a derived unit purely in base units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRecord {
    /// Only base units appear here
    pub dims: DimList,
    pub factor: Factor,
}

/// What registration made of a unit-type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expansion {
    /// Irreducible reference point; its canonical form is itself
    Base,
    /// Registered in terms of base units
    Derived(ConversionRecord),
}

/// A unit-type: base, named derived, or anonymous intermediate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitType {
    id: UnitId,
    symbol: Option<String>,
    name: Option<String>,
    dims: DimList,
    top: Coefficient,
    bottom: Coefficient,
    order: i32,
    expansion: Option<Expansion>,
}

impl UnitType {
    /// Anonymous descriptor produced by composition
    pub(crate) fn anonymous(id: UnitId, dims: DimList, factor: Factor) -> Self {
        UnitType {
            id,
            symbol: None,
            name: None,
            dims,
            top: factor.top,
            bottom: factor.bottom,
            order: factor.order,
            expansion: None,
        }
    }

    /// Registered base unit, referring only to itself
    pub(crate) fn base(id: UnitId, symbol: &str, name: &str) -> Self {
        UnitType {
            id,
            symbol: Some(symbol.to_string()),
            name: Some(name.to_string()),
            dims: DimList::single(id, 1),
            top: Coefficient::one(),
            bottom: Coefficient::one(),
            order: 0,
            expansion: Some(Expansion::Base),
        }
    }

    /// Freeze the canonical record and reset the working fields so this
    /// type becomes a reference point of its own.
    pub(crate) fn commit_registration(&mut self, symbol: &str, name: &str, record: ConversionRecord) {
        self.symbol = Some(symbol.to_string());
        self.name = Some(name.to_string());
        self.expansion = Some(Expansion::Derived(record));
        self.dims = DimList::single(self.id, 1);
        self.top = Coefficient::one();
        self.bottom = Coefficient::one();
        self.order = 0;
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Name for messages: full name, else symbol, else the creation index
    pub fn label(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.symbol.clone())
            .unwrap_or_else(|| format!("UnNamed{}", self.id))
    }

    pub fn dims(&self) -> &DimList {
        &self.dims
    }

    pub fn top(&self) -> &Coefficient {
        &self.top
    }

    pub fn bottom(&self) -> &Coefficient {
        &self.bottom
    }

    pub fn order(&self) -> i32 {
        self.order
    }

    /// Working constant and order as a factor
    pub fn factor(&self) -> Factor {
        Factor::new(self.top.clone(), self.bottom.clone(), self.order)
    }

    pub fn expansion(&self) -> Option<&Expansion> {
        self.expansion.as_ref()
    }

    /// Stored record of a registered derived unit
    pub fn conversion_record(&self) -> Option<&ConversionRecord> {
        match &self.expansion {
            Some(Expansion::Derived(record)) => Some(record),
            _ => None,
        }
    }

    /// Registered types are atomic
    pub fn is_registered(&self) -> bool {
        self.expansion.is_some()
    }

    pub fn is_base(&self) -> bool {
        matches!(self.expansion, Some(Expansion::Base))
    }
}
