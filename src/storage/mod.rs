//! Results persistence module

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::to_string_pretty;

use crate::analysis::ResultTriple;
use crate::pipeline::BatchReport;

/// Write one result line per grid, in order
pub fn save_results(path: &Path, results: &[ResultTriple]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_results(BufWriter::new(file), results).with_context(|| format!("writing {}", path.display()))
}

/// Encode result lines to any writer
pub fn write_results<W: Write>(mut writer: W, results: &[ResultTriple]) -> Result<()> {
    for result in results {
        writeln!(writer, "{}", result)?;
    }
    writer.flush()?;
    Ok(())
}

/// Save the batch summary as `summary.json` in the output directory
pub fn save_summary(report: &BatchReport, output_dir: &Path) -> Result<PathBuf> {
    log::info!("Saving run summary to {}", output_dir.display());

    fs::create_dir_all(output_dir)?;

    let path = output_dir.join("summary.json");
    let mut file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    file.write_all(to_string_pretty(report)?.as_bytes())?;

    Ok(path)
}
