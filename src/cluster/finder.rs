//! Fixed-size cluster search
//!
//! Candidates grow over 4-connected set cells and are kept only when no set
//! cell touches them from outside (8-connectivity). Two strategies exist:
//!
//! - [`ClusterStrategy::Greedy`] grows one candidate per seed with a
//!   depth-first walk in up/down/left/right order and stops expanding as soon
//!   as the candidate holds `size` cells.
//! - [`ClusterStrategy::Exhaustive`] enumerates every 4-connected subset of
//!   `size` set cells.
//!
//! Both report the same counts: a strict subset of a 4-connected region always
//! has a set cell orthogonally adjacent to it from outside, so only whole
//! regions of exactly `size` cells can pass the isolation test, and both
//! strategies discover every such region.

use std::collections::HashSet;

use crate::cluster::isolation::is_isolated_cluster;
use crate::cluster::{Cluster, ClusterStrategy};
use crate::grid::{Coord, Grid};

/// Count distinct isolated clusters of exactly `size` cells using the greedy strategy
pub fn find_clusters(grid: &Grid, size: usize) -> usize {
    find_clusters_with(grid, size, ClusterStrategy::Greedy)
}

/// Count distinct isolated clusters of exactly `size` cells
pub fn find_clusters_with(grid: &Grid, size: usize, strategy: ClusterStrategy) -> usize {
    if size == 0 {
        return 0;
    }

    let candidates: HashSet<Cluster> = match strategy {
        ClusterStrategy::Greedy => grid
            .set_cells()
            .map(|seed| grow_greedy(grid, seed, size))
            .filter(|candidate| candidate.len() == size)
            .collect(),
        ClusterStrategy::Exhaustive => connected_subsets(grid, size),
    };

    candidates
        .iter()
        .filter(|candidate| is_isolated_cluster(grid, candidate))
        .count()
}

/// Grow a single candidate from `seed`.
///
/// Visits set cells in the preorder of a recursive depth-first walk over the
/// up/down/left/right neighbors and stops once `size` cells are collected.
/// The result may be smaller than `size` when the region is exhausted first.
pub fn grow_greedy(grid: &Grid, seed: Coord, size: usize) -> Cluster {
    let mut cluster = Cluster::default();
    if size == 0 {
        return cluster;
    }

    let mut stack = vec![seed];
    while let Some((row, column)) = stack.pop() {
        if !grid.is_set(row, column) || cluster.contains(&(row, column)) {
            continue;
        }

        cluster.insert((row, column));
        if cluster.len() == size {
            break;
        }

        // Pushed in reverse so "up" is popped first
        stack.extend(grid.neighbors4(row, column).rev());
    }

    cluster
}

/// Every 4-connected set of `size` set cells, built one orthogonal step at a time
pub fn connected_subsets(grid: &Grid, size: usize) -> HashSet<Cluster> {
    if size == 0 {
        return HashSet::new();
    }

    let mut layer: HashSet<Cluster> = grid.set_cells().map(Cluster::single).collect();

    for _ in 1..size {
        let mut next = HashSet::with_capacity(layer.len() * 2);

        for cluster in &layer {
            for &(row, column) in cluster.iter() {
                for (r, c) in grid.neighbors4(row, column) {
                    if grid.is_set(r, c) && !cluster.contains(&(r, c)) {
                        let mut grown = cluster.clone();
                        grown.insert((r, c));
                        next.insert(grown);
                    }
                }
            }
        }

        if next.is_empty() {
            return next;
        }
        layer = next;
    }

    layer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::isolation::count_isolated_cells;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn grid(rows: usize, columns: usize, symbols: &str) -> Grid {
        Grid::from_symbols(rows, columns, symbols).unwrap()
    }

    fn all_3x3() -> impl Iterator<Item = Grid> {
        (0u32..512).map(|mask| {
            let cells = (0..9).map(|bit| mask & (1 << bit) != 0).collect();
            Grid::from_cells(3, 3, cells).unwrap()
        })
    }

    #[test]
    fn checkerboard_has_no_clusters() {
        let g = grid(3, 3, "101010101");
        assert_eq!(find_clusters(&g, 2), 0);
        assert_eq!(find_clusters(&g, 3), 0);
    }

    #[test]
    fn isolated_pair_and_triple() {
        // 11000
        // 00000
        // 00111
        let g = grid(3, 5, "110000000000111");
        assert_eq!(find_clusters(&g, 2), 1);
        assert_eq!(find_clusters(&g, 3), 1);
        assert_eq!(find_clusters(&g, 1), 0);
    }

    #[test]
    fn pair_touching_diagonally_is_rejected() {
        // 110
        // 001
        let g = grid(2, 3, "110001");
        assert_eq!(find_clusters(&g, 2), 0);
    }

    #[test]
    fn larger_region_yields_no_smaller_clusters() {
        let g = grid(1, 4, "1111");
        assert_eq!(find_clusters(&g, 2), 0);
        assert_eq!(find_clusters(&g, 3), 0);
        assert_eq!(find_clusters(&g, 4), 1);
    }

    #[test]
    fn l_shape_counts_once() {
        // 10
        // 11
        let g = grid(2, 2, "1011");
        assert_eq!(find_clusters(&g, 3), 1);
        assert_eq!(find_clusters_with(&g, 3, ClusterStrategy::Exhaustive), 1);
    }

    #[test]
    fn zero_size_finds_nothing() {
        assert_eq!(find_clusters(&grid(1, 1, "1"), 0), 0);
        assert_eq!(find_clusters_with(&grid(1, 1, "1"), 0, ClusterStrategy::Exhaustive), 0);
    }

    #[test]
    fn greedy_walk_follows_direction_order() {
        // 111
        // 110
        // Seed (0,1): up is off-grid, down (1,1), then from (1,1): left (1,0)
        let g = grid(2, 3, "111110");
        let cluster = grow_greedy(&g, (0, 1), 3);
        assert_eq!(cluster, Cluster::from_iter([(0, 1), (1, 1), (1, 0)]));
    }

    #[test]
    fn greedy_walk_stops_short_on_small_regions() {
        let g = grid(1, 3, "110");
        assert_eq!(grow_greedy(&g, (0, 0), 3).len(), 2);
    }

    #[test]
    fn exhaustive_enumerates_all_connected_triples() {
        // A 2x2 block holds four L-shaped triples
        let g = grid(2, 2, "1111");
        assert_eq!(connected_subsets(&g, 3).len(), 4);
        assert_eq!(connected_subsets(&g, 2).len(), 4);
    }

    #[test]
    fn size_one_matches_isolated_cell_count() {
        for g in all_3x3() {
            let expected = count_isolated_cells(&g);
            assert_eq!(find_clusters(&g, 1), expected, "{}", g);
            assert_eq!(find_clusters_with(&g, 1, ClusterStrategy::Exhaustive), expected, "{}", g);
        }
    }

    #[test]
    fn strategies_agree_on_every_3x3_grid() {
        for g in all_3x3() {
            for size in 1..=4 {
                assert_eq!(
                    find_clusters_with(&g, size, ClusterStrategy::Greedy),
                    find_clusters_with(&g, size, ClusterStrategy::Exhaustive),
                    "{} size {}",
                    g,
                    size
                );
            }
        }
    }

    #[test]
    fn strategies_agree_on_random_grids() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let rows = rng.random_range(1..=8);
            let columns = rng.random_range(1..=8);
            let cells = (0..rows * columns).map(|_| rng.random_bool(0.5)).collect();
            let g = Grid::from_cells(rows, columns, cells).unwrap();
            for size in 1..=3 {
                assert_eq!(
                    find_clusters_with(&g, size, ClusterStrategy::Greedy),
                    find_clusters_with(&g, size, ClusterStrategy::Exhaustive),
                    "{} size {}",
                    g,
                    size
                );
            }
        }
    }
}
