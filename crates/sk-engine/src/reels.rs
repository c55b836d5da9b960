//! Reel grid and reel generation

use std::sync::Arc;

use serde::Serialize;

use crate::config::{ConfigError, GridSpec};
use crate::engine::SpinError;
use crate::rng::{RandomError, RandomProvider};
use crate::symbols::{Symbol, SymbolId};

/// Visible symbol window for one spin (reels × rows).
///
/// Cells live in one flat buffer, reel-major (`index = reel * rows + row`),
/// matching the draw order of [`generate_grid`]. The extent is fixed at
/// construction.
#[derive(Debug, Clone, Serialize)]
pub struct ReelGrid {
    spec: GridSpec,
    cells: Vec<Arc<Symbol>>,
}

impl ReelGrid {
    /// Build a grid from reel-major cells. Returns `None` if the cell count
    /// does not match the spec.
    pub fn from_cells(spec: GridSpec, cells: Vec<Arc<Symbol>>) -> Option<Self> {
        (cells.len() == spec.total_positions()).then_some(Self { spec, cells })
    }

    pub fn spec(&self) -> GridSpec {
        self.spec
    }

    pub fn reels(&self) -> usize {
        self.spec.reels as usize
    }

    pub fn rows(&self) -> usize {
        self.spec.rows as usize
    }

    /// Symbol at `(reel, row)`
    pub fn get(&self, reel: usize, row: usize) -> Option<&Arc<Symbol>> {
        if reel >= self.reels() || row >= self.rows() {
            return None;
        }
        self.cells.get(reel * self.rows() + row)
    }

    /// Symbol at an absolute cell index (see [`GridSpec::coords`])
    pub fn at_position(&self, position: u16) -> Option<&Arc<Symbol>> {
        let (reel, row) = self.spec.coords(position)?;
        self.get(reel, row)
    }

    /// All rows of one reel, top to bottom
    pub fn reel(&self, reel: usize) -> Option<&[Arc<Symbol>]> {
        if reel >= self.reels() {
            return None;
        }
        let start = reel * self.rows();
        Some(&self.cells[start..start + self.rows()])
    }

    /// Cells in reel-major order
    pub fn cells(&self) -> &[Arc<Symbol>] {
        &self.cells
    }

    /// Symbol ids as `[reel][row]`, for display and logs
    pub fn symbol_ids(&self) -> Vec<Vec<SymbolId>> {
        self.cells
            .chunks(self.rows().max(1))
            .map(|reel| reel.iter().map(|s| s.id).collect())
            .collect()
    }
}

/// Fill a fresh grid with independent uniform draws.
///
/// Draws run reel by reel, top row first, one `next_index(symbols.len())` per
/// cell. That order is part of the contract: scripted providers rely on it.
pub fn generate_grid(
    spec: GridSpec,
    symbols: &[Arc<Symbol>],
    rng: &mut dyn RandomProvider,
) -> Result<ReelGrid, SpinError> {
    if symbols.is_empty() {
        return Err(ConfigError::NoSymbols.into());
    }

    let bound = symbols.len();
    let mut cells = Vec::with_capacity(spec.total_positions());

    for _reel in 0..spec.reels {
        for _row in 0..spec.rows {
            let index = rng.next_index(bound)?;
            let symbol = symbols
                .get(index)
                .ok_or(RandomError::OutOfRange { value: index, bound })?;
            cells.push(Arc::clone(symbol));
        }
    }

    Ok(ReelGrid { spec, cells })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceRandom;

    fn symbols(n: u32) -> Vec<Arc<Symbol>> {
        (0..n)
            .map(|i| Arc::new(Symbol::new(i, format!("S{i}"), 10 + i)))
            .collect()
    }

    #[test]
    fn test_draw_order_is_reel_major() {
        let spec = GridSpec::new(3, 2);
        let mut rng = SequenceRandom::new((0..6).collect());
        let grid = generate_grid(spec, &symbols(6), &mut rng).unwrap();

        // Call k lands on reel k / rows, row k % rows
        assert_eq!(grid.get(0, 0).unwrap().id, SymbolId(0));
        assert_eq!(grid.get(0, 1).unwrap().id, SymbolId(1));
        assert_eq!(grid.get(1, 0).unwrap().id, SymbolId(2));
        assert_eq!(grid.get(2, 1).unwrap().id, SymbolId(5));
        assert_eq!(rng.draws(), 6);
    }

    #[test]
    fn test_grid_dimensions() {
        let spec = GridSpec::new(5, 4);
        let mut rng = SequenceRandom::constant(1);
        let grid = generate_grid(spec, &symbols(3), &mut rng).unwrap();

        assert_eq!(grid.reels(), 5);
        assert_eq!(grid.rows(), 4);
        assert_eq!(grid.cells().len(), 20);
        assert_eq!(grid.symbol_ids().len(), 5);
        assert!(grid.symbol_ids().iter().all(|reel| reel.len() == 4));
        assert!(grid.get(5, 0).is_none());
        assert!(grid.get(0, 4).is_none());
    }

    #[test]
    fn test_position_lookup_is_row_major() {
        let spec = GridSpec::new(3, 2);
        let mut rng = SequenceRandom::new((0..6).collect());
        let grid = generate_grid(spec, &symbols(6), &mut rng).unwrap();

        // Position 4 -> reel 1, row 1 -> fourth draw
        assert_eq!(grid.at_position(4).unwrap().id, SymbolId(3));
        assert!(grid.at_position(6).is_none());
        assert_eq!(
            grid.reel(1).unwrap().iter().map(|s| s.id).collect::<Vec<_>>(),
            vec![SymbolId(2), SymbolId(3)]
        );
    }

    #[test]
    fn test_cells_share_configured_symbols() {
        let set = symbols(2);
        let mut rng = SequenceRandom::constant(0);
        let grid = generate_grid(GridSpec::new(2, 2), &set, &mut rng).unwrap();
        assert!(grid.cells().iter().all(|c| Arc::ptr_eq(c, &set[0])));
    }

    #[test]
    fn test_empty_symbol_set_rejected_before_drawing() {
        let mut rng = SequenceRandom::constant(0);
        let err = generate_grid(GridSpec::standard_5x3(), &[], &mut rng).unwrap_err();
        assert!(matches!(err, SpinError::Config(ConfigError::NoSymbols)));
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_out_of_range_index_is_an_error() {
        let mut rng = SequenceRandom::constant(9);
        let err = generate_grid(GridSpec::new(1, 1), &symbols(3), &mut rng).unwrap_err();
        assert!(matches!(
            err,
            SpinError::Random(RandomError::OutOfRange { value: 9, bound: 3 })
        ));
    }

    #[test]
    fn test_from_cells_checks_extent() {
        let set = symbols(1);
        let spec = GridSpec::new(2, 2);
        assert!(ReelGrid::from_cells(spec, vec![set[0].clone(); 4]).is_some());
        assert!(ReelGrid::from_cells(spec, vec![set[0].clone(); 3]).is_none());
    }
}
