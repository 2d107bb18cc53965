//! Cluster analysis module

pub mod finder;
pub mod isolation;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::grid::Coord;

/// A candidate cluster: a duplicate-free set of grid coordinates.
///
/// Members are kept ordered so two candidates holding the same cells compare
/// and hash equal regardless of the order they were discovered in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Cluster {
    members: BTreeSet<Coord>,
}

impl Cluster {
    /// Cluster holding a single cell
    pub fn single(cell: Coord) -> Self {
        Self {
            members: BTreeSet::from([cell]),
        }
    }

    /// Add a cell, returning false if it was already a member
    pub fn insert(&mut self, cell: Coord) -> bool {
        self.members.insert(cell)
    }

    pub fn contains(&self, cell: &Coord) -> bool {
        self.members.contains(cell)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &Coord> {
        self.members.iter()
    }
}

impl FromIterator<Coord> for Cluster {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

/// How candidate clusters are grown from set cells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ClusterStrategy {
    /// One depth-first candidate per seed, expansion stops at the target size
    #[default]
    Greedy,

    /// Every 4-connected subset of the target size
    Exhaustive,
}
