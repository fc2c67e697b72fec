//! Loads the two kinds of record sets: gene lists and variant tables. Both
//! loaders work on text already read into memory (see the `operands` module).
use anyhow::Result;
use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use std::io;

use crate::error::CrossError;
use crate::key::{KeyBuilder, VariantKey};

/// The gene tokens of one file, in file order, duplicates included.
pub type GeneList = Vec<String>;

type RowMap = IndexMap<VariantKey, Vec<String>, FxBuildHasher>;

/// Returns every gene token in `text`. Each line has its trailing whitespace
/// and any double quotes removed, and is then split on `;`. Every piece is
/// kept, empty ones included.
#[must_use]
pub fn load_genes(text: &str) -> GeneList {
    let mut genes = GeneList::new();
    for line in text.lines() {
        let line = line.trim_end().replace('"', "");
        genes.extend(line.split(';').map(str::to_owned));
    }
    genes
}

/// A `VariantTable` maps each `VariantKey` to the full row it was built from,
/// and carries the column names of the file the rows came from.
/// * Rows keep the order of their key's first appearance
/// * A later row with an existing key replaces the earlier row's contents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariantTable {
    header: Vec<String>,
    rows: RowMap,
}

impl VariantTable {
    /// An empty table with column names `header`.
    #[must_use]
    pub fn with_header(header: Vec<String>) -> Self {
        VariantTable { header, rows: RowMap::default() }
    }

    /// The column names.
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Number of rows, not counting the header.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the table has no rows (it may still have a header).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The row stored under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &VariantKey) -> Option<&[String]> {
        self.rows.get(key).map(Vec::as_slice)
    }

    /// Is there a row stored under `key`?
    #[must_use]
    pub fn contains_key(&self, key: &VariantKey) -> bool {
        self.rows.contains_key(key)
    }

    /// The keys, in row order.
    pub fn keys(&self) -> impl Iterator<Item = &VariantKey> {
        self.rows.keys()
    }

    /// The rows, in order.
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.values().map(Vec::as_slice)
    }

    /// Stores `row` under `key`. If `key` is already present its row is
    /// replaced, but the key keeps its original position.
    pub fn insert(&mut self, key: VariantKey, row: Vec<String>) {
        self.rows.insert(key, row);
    }

    /// A new table with this table's header, holding this table's rows for
    /// each of `keys` (in the order given). Keys this table lacks are skipped.
    #[must_use]
    pub fn subset<'k>(&self, keys: impl IntoIterator<Item = &'k VariantKey>) -> VariantTable {
        let mut table = VariantTable::with_header(self.header.clone());
        for key in keys {
            if let Some(row) = self.rows.get(key) {
                table.rows.insert(key.clone(), row.clone());
            }
        }
        table
    }

    /// Writes the header and then each row, tab-separated, one per line.
    pub fn output_to(&self, mut out: impl io::Write) -> Result<()> {
        writeln!(out, "{}", self.header.join("\t"))?;
        for row in self.rows.values() {
            writeln!(out, "{}", row.join("\t"))?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Splits `line` on tabs. Only the last field has trailing whitespace
/// removed; empty fields elsewhere are kept so column positions survive.
fn split_row(line: &str) -> Vec<String> {
    let mut fields: Vec<String> = line.split('\t').map(str::to_owned).collect();
    if let Some(last) = fields.last_mut() {
        let kept = last.trim_end().len();
        last.truncate(kept);
    }
    fields
}

/// Loads the tab-separated variant table in `text`. The first line is the
/// header; `extra_columns` names header columns to fold into each row's key.
/// Empty lines are skipped, but a line of tabs is a row of empty cells.
pub fn load_variants(text: &str, extra_columns: &[String]) -> Result<VariantTable, CrossError> {
    let mut lines = text.lines();
    let header = lines.next().map(split_row).unwrap_or_default();
    let builder = KeyBuilder::new(&header, extra_columns)?;

    let mut table = VariantTable::with_header(header);
    for (n, line) in lines.enumerate() {
        if line.is_empty() {
            continue;
        }
        let row = split_row(line);
        let Some(key) = builder.key_for(&row) else {
            return Err(CrossError::ShortRow {
                line: n + 2,
                needed: builder.min_width(),
                found: row.len(),
            });
        };
        table.insert(key, row);
    }
    Ok(table)
}
