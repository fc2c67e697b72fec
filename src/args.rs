//! Code to parse the command line using `clap`, and definitions of the parsed
//! result

use clap::Parser;
use std::path::PathBuf;

use crate::operations::CrossOptions;

/// Returns the parsed command line.
#[must_use]
pub fn parsed() -> Args {
    Args::from(CliArgs::parse())
}

/// `Args` is the configuration a single run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The files to compare
    pub files: Vec<PathBuf>,
    /// How records are compared
    pub options: CrossOptions,
    /// Where variant-table results are written
    pub output_dir: PathBuf,
}

impl From<CliArgs> for Args {
    fn from(cli: CliArgs) -> Self {
        Args {
            files: cli.files,
            options: CrossOptions { exclude: cli.exclude, extra: cli.extra },
            output_dir: cli.output_dir,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "genecross", version)]
/// Find the gene symbols or variant rows shared by two or more files.
///
/// Gene lists are printed to standard output; variant tables (files whose
/// first line has five or more columns) are written to `<label>.tsv` files.
struct CliArgs {
    #[arg(short = 'x', long)]
    /// Keep the variants of the first file that the second file lacks,
    /// instead of the variants common to all files
    exclude: bool,
    #[arg(short, long, value_name = "COLUMN")]
    /// Add the named column to the variant key (may be repeated). Numbers are
    /// compared to two decimal places, and `.` matches an empty value
    extra: Vec<String>,
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    /// Directory for variant-table results
    output_dir: PathBuf,
    #[arg(value_name = "FILE", required = true)]
    /// Gene lists or variant tables to compare
    files: Vec<PathBuf>,
}
