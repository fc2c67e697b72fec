//! The `CrossError` type names the ways a comparison can be refused or a
//! file can fail to load. I/O failures are not here: they travel as
//! `std::io::Error` inside an `anyhow::Error`, with the path as context.
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by the comparison engine itself.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CrossError {
    /// An extra key column was named that the file's header doesn't have.
    #[error("column `{0}` not found in header")]
    MissingColumn(String),

    /// A data row is too short to build its key from.
    #[error("line {line}: expected at least {needed} columns, found {found}")]
    ShortRow {
        /// 1-based line number, counting the header as line 1
        line: usize,
        /// Columns needed by the key (base columns and extra columns)
        needed: usize,
        /// Columns actually present in the row
        found: usize,
    },

    /// Exclusion is defined only for a first and a second table.
    #[error("--exclude compares exactly two variant tables, but {0} were given")]
    ExcludeNeedsTwo(usize),

    /// Exclusion is not offered for gene lists.
    #[error("--exclude is only available for variant tables")]
    ExcludeForGenes,

    /// Gene lists and variant tables can't be compared with each other.
    #[error("can't compare gene list `{gene}` with variant table `{variant}`")]
    MixedInputs {
        /// Label of a gene-list operand
        gene: String,
        /// Label of a variant-table operand
        variant: String,
    },

    /// A result would be written over one of the input files.
    #[error("refusing to overwrite input file: {}", .0.display())]
    OverwritesInput(PathBuf),

    /// At least one operand is required.
    #[error("no input files")]
    NoInputs,
}
