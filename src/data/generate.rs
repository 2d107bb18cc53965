//! Synthetic matrix file generation

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::grid::Grid;

/// Parameters for generating a set of input files
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    /// Number of files to write
    pub files: usize,

    /// Matrices per file
    pub matrices_per_file: usize,

    /// Inclusive range for both row and column counts
    pub dimensions: RangeInclusive<usize>,

    /// Base seed; each file derives its own stream from it
    pub seed: Option<u64>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            files: 50,
            matrices_per_file: 100_000,
            dimensions: 5..=10,
            seed: None,
        }
    }
}

/// Grid with uniformly random cells
pub fn random_grid<R: Rng>(rng: &mut R, rows: usize, columns: usize) -> Result<Grid> {
    let cells = (0..rows * columns).map(|_| rng.random_bool(0.5)).collect();
    Ok(Grid::from_cells(rows, columns, cells)?)
}

/// Write `count` random grids, one per line, to `path`
pub fn write_matrix_file<R: Rng>(
    path: &Path,
    count: usize,
    dimensions: &RangeInclusive<usize>,
    rng: &mut R,
) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    for _ in 0..count {
        let rows = rng.random_range(dimensions.clone());
        let columns = rng.random_range(dimensions.clone());
        writeln!(writer, "{}", random_grid(rng, rows, columns)?)?;
    }

    writer.flush()?;
    Ok(())
}

/// Create `dir` and fill it with `mat<i>.in` files
pub fn generate_inputs(dir: &Path, settings: &GeneratorSettings) -> Result<Vec<PathBuf>> {
    ensure!(
        !settings.dimensions.is_empty() && *settings.dimensions.start() > 0,
        "dimension range {:?} must be non-empty and positive",
        settings.dimensions
    );

    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let base_seed = settings.seed.unwrap_or_else(rand::random::<u64>);
    log::info!(
        "Generating {} files with {} matrices each in {} (seed {})",
        settings.files,
        settings.matrices_per_file,
        dir.display(),
        base_seed
    );

    (0..settings.files)
        .into_par_iter()
        .map(|idx| -> Result<PathBuf> {
            let path = dir.join(format!("mat{}.in", idx));
            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(idx as u64));
            write_matrix_file(&path, settings.matrices_per_file, &settings.dimensions, &mut rng)?;
            Ok(path)
        })
        .collect()
}
