//! Core library functions for the matrix cluster analyzer

pub mod analysis;
pub mod cache;
pub mod cluster;
pub mod config;
pub mod data;
pub mod error;
pub mod grid;
pub mod pipeline;
pub mod storage;

pub use analysis::{analyze, Analyzer, ResultTriple};
pub use anyhow::{anyhow, Result};
pub use error::AnalysisError;
pub use grid::Grid;
