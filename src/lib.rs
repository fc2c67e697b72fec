//! `genecross` compares the results of several analysis runs. Each input is
//! either a gene list (gene symbols, possibly several per line separated by
//! `;`) or a variant table (tab-separated rows whose first five columns are
//! chromosome, start, end, reference allele and alternative allele).
//!
//! * The `classify` module decides which kind a file is, from its first line.
//! * The `records` module loads gene lists and `VariantTable`s, and the `key`
//!   module builds the `VariantKey` rows are compared by.
//! * The `set` module intersects and subtracts record sets by key; `pairs`
//!   repeats a comparison for every pair of inputs.
//! * The `operations` module ties these together; `run` is the kernel of the
//!   application. The `args` module parses the command line, and the
//!   `operands` and `output` modules hide I/O details.
//!
//! Current Limitations:
//! * Every input is read into memory in its entirety.
//! * Variants match only on exact key equality; there is no interval overlap.

#![cfg_attr(debug_assertions, allow(dead_code, unused_imports))]
#![deny(unused_must_use)]
#![deny(clippy::all)]
#![allow(clippy::needless_return)]
#![deny(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![deny(missing_docs)]

pub mod args;
pub mod classify;
pub mod error;
pub mod key;
pub mod operands;
pub mod operations;
pub mod output;
pub mod pairs;
pub mod records;
pub mod set;

pub use crate::classify::{is_variant_table, InputKind};
pub use crate::error::CrossError;
pub use crate::key::{column_index, KeyBuilder, KeyField, VariantKey};
pub use crate::operations::{
    combine_pairs_genes, combine_pairs_variants, cross_variants, intersect_genes, run, CrossOptions,
};
pub use crate::records::{load_genes, load_variants, GeneList, VariantTable};
