//! Grid representation and neighborhood model

pub mod matrix;

pub use matrix::Grid;

/// A (row, column) position inside a grid
pub type Coord = (usize, usize);

/// Offsets of the eight surrounding cells, used for isolation checks
pub static SURROUNDING: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Offsets of the four orthogonal cells in traversal order: up, down, left, right
pub static ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
