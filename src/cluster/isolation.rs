//! Isolation predicates over 8-connected neighborhoods

use crate::cluster::Cluster;
use crate::grid::Grid;

/// True iff none of the eight surrounding cells is set.
///
/// The cell itself is not inspected.
pub fn is_isolated_cell(grid: &Grid, row: usize, column: usize) -> bool {
    grid.neighbors8(row, column).all(|(r, c)| !grid.is_set(r, c))
}

/// True iff no set cell outside the cluster touches any member, diagonals included.
///
/// Neighbors that belong to the cluster are ignored whatever their value.
pub fn is_isolated_cluster(grid: &Grid, cluster: &Cluster) -> bool {
    cluster.iter().all(|&(row, column)| {
        grid.neighbors8(row, column)
            .filter(|cell| !cluster.contains(cell))
            .all(|(r, c)| !grid.is_set(r, c))
    })
}

/// Number of set cells with no set 8-neighbor
pub fn count_isolated_cells(grid: &Grid) -> usize {
    grid.set_cells()
        .filter(|&(row, column)| is_isolated_cell(grid, row, column))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: usize, columns: usize, symbols: &str) -> Grid {
        Grid::from_symbols(rows, columns, symbols).unwrap()
    }

    #[test]
    fn diagonal_neighbor_breaks_isolation() {
        let g = grid(2, 2, "1001");
        assert!(!is_isolated_cell(&g, 0, 0));
        assert!(!is_isolated_cell(&g, 1, 1));
    }

    #[test]
    fn unset_cell_can_be_isolated() {
        let g = grid(3, 3, "000000001");
        assert!(is_isolated_cell(&g, 0, 0));
        assert!(!is_isolated_cell(&g, 1, 1));
    }

    #[test]
    fn cluster_ignores_its_own_members() {
        let g = grid(3, 4, "110000000000");
        let pair = Cluster::from_iter([(0, 0), (0, 1)]);
        assert!(is_isolated_cluster(&g, &pair));
        assert!(!is_isolated_cluster(&g, &Cluster::single((0, 0))));
    }

    #[test]
    fn cluster_touched_diagonally_is_not_isolated() {
        let g = grid(3, 3, "110001000");
        let pair = Cluster::from_iter([(0, 0), (0, 1)]);
        assert!(!is_isolated_cluster(&g, &pair));
    }

    #[test]
    fn counts_isolated_cells() {
        assert_eq!(count_isolated_cells(&grid(3, 3, "101010101")), 0);
        assert_eq!(count_isolated_cells(&grid(3, 3, "100000001")), 2);
        assert_eq!(count_isolated_cells(&grid(1, 1, "1")), 1);
        assert_eq!(count_isolated_cells(&grid(2, 3, "000000")), 0);
        assert_eq!(count_isolated_cells(&grid(1, 5, "10101")), 3);
    }

    #[test]
    fn setting_an_adjacent_cell_never_adds_isolated_cells() {
        // Every 3x3 pattern, and every unset cell touching a set one
        for mask in 0u32..512 {
            let cells: Vec<bool> = (0..9).map(|bit| mask & (1 << bit) != 0).collect();
            let before = Grid::from_cells(3, 3, cells.clone()).unwrap();
            let baseline = count_isolated_cells(&before);

            for idx in 0..9 {
                let (r, c) = (idx / 3, idx % 3);
                if cells[idx] || before.neighbors8(r, c).all(|(nr, nc)| !before.is_set(nr, nc)) {
                    continue;
                }
                let mut grown = cells.clone();
                grown[idx] = true;
                let after = Grid::from_cells(3, 3, grown).unwrap();
                assert!(count_isolated_cells(&after) <= baseline, "mask {:#011b} cell {}", mask, idx);
            }
        }
    }
}
