//! Immutable binary matrix

use std::fmt;
use std::sync::Arc;

use itertools::iproduct;

use crate::error::AnalysisError;
use crate::grid::{Coord, ORTHOGONAL, SURROUNDING};

/// Rectangular matrix of set/unset cells.
///
/// Equality and hashing cover the dimensions and the full cell pattern, so two
/// grids decoded from identical lines are interchangeable as cache keys. The
/// cell buffer is shared, which keeps clones cheap when a grid is stored in a
/// cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Number of rows
    rows: usize,

    /// Number of columns
    columns: usize,

    /// Row-major cell values, `rows * columns` long
    cells: Arc<[bool]>,
}

impl Grid {
    /// Create a grid from row-major cell values
    pub fn from_cells(rows: usize, columns: usize, cells: Vec<bool>) -> Result<Self, AnalysisError> {
        if rows == 0 || columns == 0 {
            return Err(AnalysisError::malformed(format!(
                "dimensions must be positive, got {}x{}",
                rows, columns
            )));
        }

        let expected = rows
            .checked_mul(columns)
            .ok_or_else(|| AnalysisError::malformed(format!("dimensions {}x{} overflow", rows, columns)))?;
        if cells.len() != expected {
            return Err(AnalysisError::malformed(format!(
                "expected {} cells for {}x{}, found {}",
                expected,
                rows,
                columns,
                cells.len()
            )));
        }

        Ok(Self {
            rows,
            columns,
            cells: cells.into(),
        })
    }

    /// Create a grid from a flat string of `0`/`1` symbols
    pub fn from_symbols(rows: usize, columns: usize, symbols: &str) -> Result<Self, AnalysisError> {
        let cells = symbols
            .chars()
            .map(|symbol| match symbol {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(AnalysisError::malformed(format!("unexpected symbol {:?}", other))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_cells(rows, columns, cells)
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Bounds-checked cell lookup
    pub fn value_at(&self, row: usize, column: usize) -> Result<bool, AnalysisError> {
        if row >= self.rows || column >= self.columns {
            return Err(AnalysisError::OutOfRange {
                row,
                column,
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(self.is_set(row, column))
    }

    /// Unchecked-by-contract lookup for traversal code that only visits
    /// coordinates produced by the neighbor enumerators.
    #[inline]
    pub fn is_set(&self, row: usize, column: usize) -> bool {
        self.cells[row * self.columns + column]
    }

    /// Coordinates of all set cells in row-major order
    pub fn set_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        iproduct!(0..self.rows, 0..self.columns).filter(move |&(r, c)| self.is_set(r, c))
    }

    /// Number of set cells
    pub fn set_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// In-bounds 8-connected neighbors of a cell
    pub fn neighbors8(&self, row: usize, column: usize) -> impl DoubleEndedIterator<Item = Coord> + '_ {
        SURROUNDING
            .iter()
            .filter_map(move |&offset| self.offset((row, column), offset))
    }

    /// In-bounds 4-connected neighbors of a cell, in up/down/left/right order
    pub fn neighbors4(&self, row: usize, column: usize) -> impl DoubleEndedIterator<Item = Coord> + '_ {
        ORTHOGONAL
            .iter()
            .filter_map(move |&offset| self.offset((row, column), offset))
    }

    fn offset(&self, (row, column): Coord, (dr, dc): (isize, isize)) -> Option<Coord> {
        let r = row.checked_add_signed(dr)?;
        let c = column.checked_add_signed(dc)?;
        (r < self.rows && c < self.columns).then_some((r, c))
    }
}

/// Renders the line encoding `<rows>x<columns>:<symbols>`
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}:", self.rows, self.columns)?;
        for &cell in self.cells.iter() {
            f.write_str(if cell { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_symbol_count() {
        let err = Grid::from_symbols(2, 2, "101").unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedInput { .. }));
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(Grid::from_symbols(0, 3, "").is_err());
        assert!(Grid::from_symbols(3, 0, "").is_err());
    }

    #[test]
    fn rejects_foreign_symbols() {
        assert!(Grid::from_symbols(1, 3, "1a0").is_err());
    }

    #[test]
    fn value_at_checks_bounds() {
        let grid = Grid::from_symbols(2, 3, "100001").unwrap();
        assert_eq!(grid.value_at(0, 0), Ok(true));
        assert_eq!(grid.value_at(1, 1), Ok(false));
        assert_eq!(grid.value_at(1, 2), Ok(true));
        assert_eq!(
            grid.value_at(2, 0),
            Err(AnalysisError::OutOfRange { row: 2, column: 0, rows: 2, columns: 3 })
        );
        assert!(grid.value_at(0, 3).is_err());
    }

    #[test]
    fn corner_and_center_neighbors() {
        let grid = Grid::from_symbols(3, 3, "000000000").unwrap();
        assert_eq!(grid.neighbors8(0, 0).count(), 3);
        assert_eq!(grid.neighbors8(1, 1).count(), 8);
        assert_eq!(grid.neighbors8(0, 1).count(), 5);
        assert_eq!(grid.neighbors4(0, 0).collect::<Vec<_>>(), vec![(1, 0), (0, 1)]);
        assert_eq!(
            grid.neighbors4(1, 1).collect::<Vec<_>>(),
            vec![(0, 1), (2, 1), (1, 0), (1, 2)]
        );
    }

    #[test]
    fn single_cell_has_no_neighbors() {
        let grid = Grid::from_symbols(1, 1, "1").unwrap();
        assert_eq!(grid.neighbors8(0, 0).count(), 0);
        assert_eq!(grid.neighbors4(0, 0).count(), 0);
    }

    #[test]
    fn set_cells_are_row_major() {
        let grid = Grid::from_symbols(2, 2, "0111").unwrap();
        assert_eq!(grid.set_cells().collect::<Vec<_>>(), vec![(0, 1), (1, 0), (1, 1)]);
        assert_eq!(grid.set_count(), 3);
    }

    #[test]
    fn equal_content_means_equal_grids() {
        let a = Grid::from_symbols(2, 2, "1001").unwrap();
        let b = Grid::from_symbols(2, 2, "1001").unwrap();
        let c = Grid::from_symbols(1, 4, "1001").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn display_round_trips_line_encoding() {
        let grid = Grid::from_symbols(2, 3, "010110").unwrap();
        assert_eq!(grid.to_string(), "2x3:010110");
    }
}
