//! Toroidal tile grid backing the authoritative field state.
//!
//! Every coordinate handed to the grid is normalized modulo the configured
//! dimensions before any lookup, so out-of-bounds access is impossible by
//! construction rather than by validation.

use harvest_defence_core::{Direction, TileCoord, TileState};

/// Fixed-size wrap-around grid of field tiles.
#[derive(Clone, Debug)]
pub struct FieldGrid {
    columns: u32,
    rows: u32,
    tiles: Vec<TileState>,
}

impl FieldGrid {
    /// Creates a grid of empty tiles. Dimensions are clamped to at least one
    /// tile per axis so the wrap arithmetic stays total.
    pub(crate) fn new(columns: u32, rows: u32) -> Self {
        let columns = columns.max(1);
        let rows = rows.max(1);
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            tiles: vec![TileState::Empty; capacity],
        }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of tiles in the grid.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Normalizes an arbitrary integer coordinate pair onto the torus.
    #[must_use]
    pub fn wrapped(&self, column: i64, row: i64) -> TileCoord {
        let columns = i64::from(self.columns);
        let rows = i64::from(self.rows);
        let column = u32::try_from(column.rem_euclid(columns)).unwrap_or(0);
        let row = u32::try_from(row.rem_euclid(rows)).unwrap_or(0);
        TileCoord::new(column, row)
    }

    /// The tile adjacent to `cell` in the provided direction, wrap applied.
    #[must_use]
    pub fn neighbor(&self, cell: TileCoord, direction: Direction) -> TileCoord {
        let (column_delta, row_delta) = match direction {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        };
        self.wrapped(
            i64::from(cell.column()) + column_delta,
            i64::from(cell.row()) + row_delta,
        )
    }

    /// State of the provided tile. The coordinate is normalized first, so
    /// this lookup cannot fail.
    #[must_use]
    pub fn tile(&self, cell: TileCoord) -> &TileState {
        let index = self.index(cell);
        &self.tiles[index]
    }

    pub(crate) fn tile_mut(&mut self, cell: TileCoord) -> &mut TileState {
        let index = self.index(cell);
        &mut self.tiles[index]
    }

    pub(crate) fn set(&mut self, cell: TileCoord, state: TileState) {
        *self.tile_mut(cell) = state;
    }

    /// Dense row-major tile buffer used to build field views.
    #[must_use]
    pub fn tiles(&self) -> &[TileState] {
        &self.tiles
    }

    pub(crate) fn tiles_mut(&mut self) -> &mut [TileState] {
        &mut self.tiles
    }

    fn index(&self, cell: TileCoord) -> usize {
        let normalized = self.wrapped(i64::from(cell.column()), i64::from(cell.row()));
        let row = normalized.row() as usize;
        let column = normalized.column() as usize;
        row * self.columns as usize + column
    }
}
