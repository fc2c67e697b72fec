//! Printing gene results and persisting variant tables.
use anyhow::{Context, Result};
use std::{
    fs::{self, File},
    io::{self, BufWriter},
    path::{Path, PathBuf},
};

use crate::error::CrossError;
use crate::pairs::PairResults;
use crate::records::{GeneList, VariantTable};

/// Title of the section listing the genes common to every input.
pub const ALL_VS_ALL: &str = "All-vs-All";

/// Writes the genes common to all inputs under an `All-vs-All` title, then
/// each pair's genes under the pair's label. Sections are separated by a
/// blank line.
pub fn write_gene_report(
    mut out: impl io::Write,
    all: &GeneList,
    pairs: &PairResults<GeneList>,
) -> Result<()> {
    write_section(&mut out, ALL_VS_ALL, all)?;
    for (label, genes) in pairs {
        writeln!(out)?;
        write_section(&mut out, label, genes)?;
    }
    out.flush()?;
    Ok(())
}

fn write_section(out: &mut impl io::Write, title: &str, genes: &GeneList) -> Result<()> {
    writeln!(out, "{title}")?;
    for gene in genes {
        writeln!(out, "{gene}")?;
    }
    Ok(())
}

/// The file a result labelled `label` is written to.
#[must_use]
pub fn table_path(dir: &Path, label: &str) -> PathBuf {
    dir.join(format!("{label}.tsv"))
}

/// Fails if any of `targets` is one of `inputs`. A target that doesn't exist
/// yet can't be an input.
fn check_not_inputs(targets: &[PathBuf], inputs: &[PathBuf]) -> Result<(), CrossError> {
    let inputs: Vec<PathBuf> = inputs.iter().filter_map(|p| fs::canonicalize(p).ok()).collect();
    for target in targets {
        if let Ok(canonical) = fs::canonicalize(target) {
            if inputs.contains(&canonical) {
                return Err(CrossError::OverwritesInput(target.clone()));
            }
        }
    }
    Ok(())
}

/// Writes each table to `<dir>/<label>.tsv`, creating `dir` if needed, and
/// reports each path written to `out`, one per line. Nothing is written if
/// any of those paths is one of the `inputs`.
pub fn write_tables(
    dir: &Path,
    tables: &PairResults<VariantTable>,
    inputs: &[PathBuf],
    mut out: impl io::Write,
) -> Result<()> {
    let targets: Vec<PathBuf> = tables.keys().map(|label| table_path(dir, label)).collect();
    check_not_inputs(&targets, inputs)?;
    fs::create_dir_all(dir)
        .with_context(|| format!("Can't create directory: {}", dir.display()))?;
    for (path, table) in targets.iter().zip(tables.values()) {
        let file =
            File::create(path).with_context(|| format!("Can't create file: {}", path.display()))?;
        table
            .output_to(BufWriter::new(file))
            .with_context(|| format!("Error writing file: {}", path.display()))?;
        writeln!(out, "{}", path.display())?;
    }
    out.flush()?;
    Ok(())
}
