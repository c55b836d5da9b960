//! Symbol definitions

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable symbol identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(pub u32);

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A symbol definition
///
/// Two symbols are the same symbol iff their ids match; name and value do not
/// take part. Compare with [`Symbol::same_as`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Symbol {
    /// Unique symbol ID
    pub id: SymbolId,
    /// Display name (e.g., "Cherry", "Seven")
    pub name: String,
    /// Pay value per matched cell
    pub value: u32,
}

impl Symbol {
    /// Create a symbol
    pub fn new(id: u32, name: impl Into<String>, value: u32) -> Self {
        Self {
            id: SymbolId(id),
            name: name.into(),
            value,
        }
    }

    /// Identity comparison
    #[inline]
    pub fn same_as(&self, other: &Symbol) -> bool {
        self.id == other.id
    }

    /// Line payout for a run of `match_count` cells
    pub fn line_pay(&self, match_count: usize) -> u64 {
        u64::from(self.value) * match_count as u64
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// The stock fruit-machine symbol set, cheapest first
pub fn classic_symbols() -> Vec<Symbol> {
    vec![
        Symbol::new(0, "Cherry", 10),
        Symbol::new(1, "Lemon", 15),
        Symbol::new(2, "Orange", 20),
        Symbol::new(3, "Plum", 25),
        Symbol::new(4, "Bell", 30),
        Symbol::new(5, "Bar", 50),
        Symbol::new(6, "Seven", 100),
    ]
}
