//! The module matrix a QR symbol is drawn from.

use crate::error::{Error, Result};
use crate::morse::Cell;
use crate::neighbors::NeighborQuery;

/// A square matrix of dark and light modules.
///
/// This is the caller side of the renderer contract: it owns occupancy and
/// answers neighbor queries for one module at a time. Modules are packed
/// bitwise into bytes, row by row.
///
/// # Example
///
/// ```rust
/// use qidots::grid::ModuleGrid;
/// use qidots::morse::Cell;
/// use qidots::neighbors::NeighborQuery;
///
/// let grid = ModuleGrid::from_rows(&["##.", ".#.", "..#"]).unwrap();
/// assert!(grid.get(0, 1));
/// assert!(!grid.get(-1, 0));
///
/// let around = grid.neighbors(Cell::new(1, 1));
/// assert!(around.has_neighbor(0, -1));
/// assert!(!around.has_neighbor(1, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleGrid {
    /// Width and height of the matrix, in modules.
    size: usize,

    /// The modules (0 = light, 1 = dark), packed bitwise into bytes.
    modules: Vec<u8>,
}

impl ModuleGrid {
    /// Creates an all-light grid of `size × size` modules.
    pub fn new(size: usize) -> Self {
        ModuleGrid {
            size,
            modules: vec![0u8; (size * size + 7) / 8],
        }
    }

    /// Parses a grid from text rows, `#` or `1` marking a dark module.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RaggedGrid`] when a row's length differs from the
    /// number of rows.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let size = rows.len();
        let mut grid = ModuleGrid::new(size);
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != size {
                return Err(Error::RaggedGrid {
                    row,
                    found,
                    expected: size,
                });
            }
            for (col, c) in line.chars().enumerate() {
                grid.set(row, col, matches!(c, '#' | '1'));
            }
        }
        Ok(grid)
    }

    /// Returns this grid's size, in modules.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns whether the module at the given coordinates is dark.
    ///
    /// Coordinates outside the grid are light.
    pub fn get(&self, row: i32, col: i32) -> bool {
        let range = 0..self.size as i32;
        range.contains(&row) && range.contains(&col) && self.get_bounded(row as usize, col as usize)
    }

    fn get_bounded(&self, row: usize, col: usize) -> bool {
        let index = row * self.size + col;
        get_bit(self.modules[index >> 3].into(), (index & 7) as u8)
    }

    /// Sets the module at the given coordinates. Out-of-range writes are ignored.
    pub fn set(&mut self, row: usize, col: usize, dark: bool) {
        if row >= self.size || col >= self.size {
            return;
        }
        let index = row * self.size + col;
        let byte = &mut self.modules[index >> 3];
        let mask = 1u8 << (index & 7);
        if dark {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
    }

    /// Dark modules in row-major order.
    pub fn dark_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let size = self.size;
        (0..size * size)
            .filter(move |&index| self.get_bounded(index / size, index % size))
            .map(move |index| Cell::new((index / size) as i32, (index % size) as i32))
    }

    /// Neighbor query relative to `cell`.
    pub fn neighbors(&self, cell: Cell) -> GridNeighbors<'_> {
        GridNeighbors { grid: self, cell }
    }
}

/// Occupancy of the grid as seen from one module.
#[derive(Debug, Clone, Copy)]
pub struct GridNeighbors<'a> {
    grid: &'a ModuleGrid,
    cell: Cell,
}

impl NeighborQuery for GridNeighbors<'_> {
    fn has_neighbor(&self, dx: i32, dy: i32) -> bool {
        self.grid.get(self.cell.row + dy, self.cell.col + dx)
    }
}

// Returns true iff the i'th bit of x is set to 1.
fn get_bit(x: u32, i: u8) -> bool {
    (x >> i) & 1 != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut grid = ModuleGrid::new(5);
        assert_eq!(grid.size(), 5);
        grid.set(4, 4, true);
        grid.set(0, 3, true);
        assert!(grid.get(4, 4));
        assert!(grid.get(0, 3));
        assert!(!grid.get(3, 0));
        grid.set(4, 4, false);
        assert!(!grid.get(4, 4));
        grid.set(9, 9, true);
        assert!(!grid.get(9, 9));
        assert!(!grid.get(5, 0));
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let err = ModuleGrid::from_rows(&["##", "#"]).unwrap_err();
        assert!(matches!(
            err,
            Error::RaggedGrid {
                row: 1,
                found: 1,
                expected: 2
            }
        ));
    }

    #[test]
    fn test_dark_cells_row_major() {
        let grid = ModuleGrid::from_rows(&[".#.", "1..", "..#"]).unwrap();
        let cells: Vec<Cell> = grid.dark_cells().collect();
        assert_eq!(cells, vec![Cell::new(0, 1), Cell::new(1, 0), Cell::new(2, 2)]);
    }

    #[test]
    fn test_neighbors_use_column_then_row_offsets() {
        let grid = ModuleGrid::from_rows(&["...", "..#", "..."]).unwrap();
        let query = grid.neighbors(Cell::new(1, 1));
        assert!(query.has_neighbor(1, 0));
        assert!(!query.has_neighbor(0, 1));
        // Beyond the edge is always light.
        assert!(!grid.neighbors(Cell::new(1, 2)).has_neighbor(1, 0));
    }
}
