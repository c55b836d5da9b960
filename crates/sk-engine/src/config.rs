//! Slot table configuration

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::symbols::{Symbol, SymbolId, classic_symbols};

/// Grid specification (reels × rows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Number of reels (columns)
    pub reels: u8,
    /// Number of visible rows per reel
    pub rows: u8,
}

impl GridSpec {
    pub fn new(reels: u8, rows: u8) -> Self {
        Self { reels, rows }
    }

    /// Standard 5×3
    pub fn standard_5x3() -> Self {
        Self { reels: 5, rows: 3 }
    }

    /// Total grid positions
    pub fn total_positions(&self) -> usize {
        self.reels as usize * self.rows as usize
    }

    /// Resolve an absolute cell index to `(reel, row)`.
    ///
    /// Cell indices run left to right, then top to bottom:
    /// `reel = p mod reels`, `row = p div reels`. Returns `None` when the
    /// index falls outside the grid.
    pub fn coords(&self, position: u16) -> Option<(usize, usize)> {
        let reels = self.reels as usize;
        if reels == 0 {
            return None;
        }
        let position = position as usize;
        let (reel, row) = (position % reels, position / reels);
        (row < self.rows as usize).then_some((reel, row))
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::standard_5x3()
    }
}

fn default_active() -> bool {
    true
}

/// A payline definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payline {
    /// Absolute cell indices, walked in order
    pub positions: Vec<u16>,
    /// Inactive lines are never evaluated
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Payline {
    pub fn new(positions: Vec<u16>) -> Self {
        Self {
            positions,
            active: true,
        }
    }

    /// Straight line across one row
    pub fn row(row: u8, grid: GridSpec) -> Self {
        let start = row as u16 * grid.reels as u16;
        Self::new((start..start + grid.reels as u16).collect())
    }

    /// Same line, switched off
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Complete slot table configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotConfig {
    /// Grid geometry
    pub grid: GridSpec,
    /// Minimum left-anchored run that pays
    pub min_match: u8,
    /// Ordered symbol set; the reel generator draws indices into this list
    pub symbols: Vec<Symbol>,
    /// Ordered payline definitions
    pub paylines: Vec<Payline>,
}

impl SlotConfig {
    pub fn new(grid: GridSpec, min_match: u8, symbols: Vec<Symbol>, paylines: Vec<Payline>) -> Self {
        Self {
            grid,
            min_match,
            symbols,
            paylines,
        }
    }

    /// Stock 5×3 fruit table: seven symbols, five lines, pays from 3 in a row
    pub fn classic_5x3() -> Self {
        let grid = GridSpec::standard_5x3();
        Self {
            grid,
            min_match: 3,
            symbols: classic_symbols(),
            paylines: vec![
                Payline::row(1, grid),
                Payline::row(0, grid),
                Payline::row(2, grid),
                Payline::new(vec![0, 6, 12, 8, 4]),
                Payline::new(vec![10, 6, 2, 8, 14]),
            ],
        }
    }

    /// Check the table before any spin runs
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.reels == 0 || self.grid.rows == 0 {
            return Err(ConfigError::InvalidGrid("Grid must have at least 1 reel and 1 row"));
        }

        if self.min_match == 0 || self.min_match > self.grid.reels {
            return Err(ConfigError::InvalidMinMatch {
                min_match: self.min_match,
                reels: self.grid.reels,
            });
        }

        if self.symbols.is_empty() {
            return Err(ConfigError::NoSymbols);
        }

        let mut seen = HashSet::with_capacity(self.symbols.len());
        for symbol in &self.symbols {
            if !seen.insert(symbol.id) {
                return Err(ConfigError::DuplicateSymbol(symbol.id));
            }
        }

        // The evaluator skips off-grid positions; only flag them here
        for (index, line) in self.active_paylines().enumerate() {
            let off_grid = line
                .positions
                .iter()
                .filter(|&&p| self.grid.coords(p).is_none())
                .count();
            if off_grid > 0 {
                log::warn!(
                    "Payline {} has {} position(s) outside the {}x{} grid",
                    index,
                    off_grid,
                    self.grid.reels,
                    self.grid.rows
                );
            }
        }

        Ok(())
    }

    /// Paylines that take part in evaluation, in configured order
    pub fn active_paylines(&self) -> impl Iterator<Item = &Payline> {
        self.paylines.iter().filter(|p| p.active)
    }

    /// Get symbol by ID
    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.id == id)
    }

    /// Get an active payline by the index reported in [`crate::LineWin`]
    pub fn payline(&self, index: usize) -> Option<&Payline> {
        self.active_paylines().nth(index)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Parse and validate a JSON table
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a YAML table
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_yml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yml::to_string(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Load a table from disk, picking the format from the file extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let text = std::fs::read_to_string(path)?;
        let config = match ext.as_str() {
            "json" => Self::from_json(&text)?,
            "yaml" | "yml" => Self::from_yaml(&text)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        log::info!(
            "Loaded slot table from {:?}: {}x{}, {} symbols, {} paylines",
            path,
            config.grid.reels,
            config.grid.rows,
            config.symbols.len(),
            config.paylines.len()
        );
        Ok(config)
    }
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self::classic_5x3()
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid grid: {0}")]
    InvalidGrid(&'static str),

    #[error("Minimum match {min_match} must be between 1 and the reel count ({reels})")]
    InvalidMinMatch { min_match: u8, reels: u8 },

    #[error("Symbol list is empty")]
    NoSymbols,

    #[error("Duplicate symbol id {0}")]
    DuplicateSymbol(SymbolId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coords_mapping() {
        let grid = GridSpec::standard_5x3();
        assert_eq!(grid.coords(0), Some((0, 0)));
        assert_eq!(grid.coords(7), Some((2, 1)));
        assert_eq!(grid.coords(14), Some((4, 2)));
        assert_eq!(grid.coords(15), None);
        assert_eq!(grid.total_positions(), 15);
    }

    #[test]
    fn test_payline_row() {
        let grid = GridSpec::standard_5x3();
        assert_eq!(Payline::row(1, grid).positions, vec![5, 6, 7, 8, 9]);
        assert_eq!(Payline::row(2, grid).positions, vec![10, 11, 12, 13, 14]);
    }

    #[test]
    fn test_classic_table_is_valid() {
        let config = SlotConfig::classic_5x3();
        assert!(config.validate().is_ok());
        assert_eq!(config.symbols.len(), 7);
        assert_eq!(config.active_paylines().count(), 5);
    }

    #[test]
    fn test_validation_rejects_bad_tables() {
        let mut config = SlotConfig::classic_5x3();
        config.grid.rows = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidGrid(_))));

        let mut config = SlotConfig::classic_5x3();
        config.min_match = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidMinMatch { .. })));

        let mut config = SlotConfig::classic_5x3();
        config.min_match = 6;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidMinMatch { .. })));

        let mut config = SlotConfig::classic_5x3();
        config.symbols.clear();
        assert!(matches!(config.validate(), Err(ConfigError::NoSymbols)));

        let mut config = SlotConfig::classic_5x3();
        config.symbols.push(Symbol::new(0, "Second Cherry", 10));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateSymbol(SymbolId(0)))
        ));
    }

    #[test]
    fn test_off_grid_positions_are_tolerated() {
        let mut config = SlotConfig::classic_5x3();
        config.paylines.push(Payline::new(vec![5, 6, 99]));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inactive_paylines_are_skipped_in_lookup() {
        let mut config = SlotConfig::classic_5x3();
        config.paylines[0] = config.paylines[0].clone().inactive();

        assert_eq!(config.active_paylines().count(), 4);
        // Index 0 now refers to the top row
        assert_eq!(config.payline(0).map(|p| p.positions[0]), Some(0));
        assert!(config.payline(4).is_none());
    }

    #[test]
    fn test_json_active_defaults_to_true() {
        let json = r#"{
            "grid": { "reels": 3, "rows": 1 },
            "min_match": 2,
            "symbols": [ { "id": 1, "name": "A", "value": 5 } ],
            "paylines": [ { "positions": [0, 1, 2] } ]
        }"#;
        let config = SlotConfig::from_json(json).unwrap();
        assert!(config.paylines[0].active);
        assert_eq!(config.symbol(SymbolId(1)).map(|s| s.value), Some(5));
    }

    #[test]
    fn test_yaml_roundtrip_keeps_table() {
        let config = SlotConfig::classic_5x3();
        let yaml = config.to_yaml().unwrap();
        let parsed = SlotConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.grid, config.grid);
        assert_eq!(parsed.paylines, config.paylines);
        assert_eq!(parsed.symbols.len(), config.symbols.len());
    }

    #[test]
    fn test_parse_rejects_invalid_table() {
        let json = r#"{
            "grid": { "reels": 3, "rows": 1 },
            "min_match": 2,
            "symbols": [],
            "paylines": []
        }"#;
        assert!(matches!(SlotConfig::from_json(json), Err(ConfigError::NoSymbols)));
        assert!(matches!(SlotConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_output_errors_name_serialization() {
        let err = ConfigError::Serialize("unsupported value".into());
        assert_eq!(err.to_string(), "Serialization error: unsupported value");
        assert!(!matches!(err, ConfigError::Parse(_)));

        assert!(SlotConfig::classic_5x3().to_json().is_ok());
        assert!(SlotConfig::classic_5x3().to_yaml().is_ok());
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("table.yaml");
        std::fs::write(&yaml_path, SlotConfig::classic_5x3().to_yaml().unwrap()).unwrap();
        assert_eq!(SlotConfig::load(&yaml_path).unwrap().symbols.len(), 7);

        let json_path = dir.path().join("table.json");
        std::fs::write(&json_path, SlotConfig::classic_5x3().to_json().unwrap()).unwrap();
        assert_eq!(SlotConfig::load(&json_path).unwrap().paylines.len(), 5);

        let txt_path = dir.path().join("table.txt");
        std::fs::write(&txt_path, "").unwrap();
        assert!(matches!(
            SlotConfig::load(&txt_path),
            Err(ConfigError::UnsupportedFormat(_))
        ));

        assert!(matches!(
            SlotConfig::load(dir.path().join("missing.json")),
            Err(ConfigError::Io(_))
        ));
    }
}
