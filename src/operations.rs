//! Houses the `run` function, and the comparisons it is built from. Each
//! comparison takes operands already read into memory.
use anyhow::{Context, Result};
use itertools::Itertools;
use std::io;

use crate::args::Args;
use crate::classify::InputKind;
use crate::error::CrossError;
use crate::operands::{common_kind, read_all, Operand};
use crate::output;
use crate::pairs::{combine_all_pairs, PairResults};
use crate::records::{load_genes, load_variants, GeneList, VariantTable};
use crate::set::{common_genes, exclusive_variants};

/// How variant rows are compared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossOptions {
    /// Report rows of the first table missing from the second, rather than
    /// rows common to every table
    pub exclude: bool,
    /// Header names of extra columns to fold into each row's key
    pub extra: Vec<String>,
}

/// The gene tokens common to every operand.
#[must_use]
pub fn intersect_genes(operands: &[Operand]) -> GeneList {
    let lists: Vec<GeneList> = operands.iter().map(|o| load_genes(o.text())).collect();
    common_genes(&lists.iter().collect::<Vec<_>>())
}

/// The gene tokens common to each pair of operands, labelled
/// `<first>-<second>`.
pub fn combine_pairs_genes(operands: &[Operand]) -> Result<PairResults<GeneList>> {
    let lists: Vec<(&str, GeneList)> =
        operands.iter().map(|o| (o.label(), load_genes(o.text()))).collect();
    combine_all_pairs(&lists, |list| list.0, |a, b| Ok(common_genes(&[&a.1, &b.1])))
}

fn load_tables<'o>(
    operands: &'o [Operand],
    extra: &[String],
) -> Result<Vec<(&'o str, VariantTable)>> {
    operands
        .iter()
        .map(|o| -> Result<(&'o str, VariantTable)> {
            let table = load_variants(o.text(), extra)
                .with_context(|| format!("Can't load variant table: {}", o.label()))?;
            Ok((o.label(), table))
        })
        .collect()
}

fn cross_tables(tables: &[(&str, VariantTable)], exclude: bool) -> Result<VariantTable> {
    let tables: Vec<&VariantTable> = tables.iter().map(|(_, table)| table).collect();
    Ok(exclusive_variants(&tables, exclude)?)
}

fn pair_tables(
    tables: &[(&str, VariantTable)],
    exclude: bool,
) -> Result<PairResults<VariantTable>> {
    combine_all_pairs(tables, |t| t.0, |a, b| Ok(exclusive_variants(&[&a.1, &b.1], exclude)?))
}

/// The rows common to every operand (or, with `options.exclude`, the rows of
/// the first of exactly two operands that the second lacks). Rows come from
/// the first operand.
pub fn cross_variants(operands: &[Operand], options: &CrossOptions) -> Result<VariantTable> {
    let tables = load_tables(operands, &options.extra)?;
    cross_tables(&tables, options.exclude)
}

/// `cross_variants` applied to each pair of operands, labelled
/// `<first>-<second>`.
pub fn combine_pairs_variants(
    operands: &[Operand],
    options: &CrossOptions,
) -> Result<PairResults<VariantTable>> {
    let tables = load_tables(operands, &options.extra)?;
    pair_tables(&tables, options.exclude)
}

/// Every variant result a run persists: with three or more operands, the
/// result across all of them (labelled by joining every label with `-`),
/// followed by each pair's result. A single operand persists nothing, as its
/// result is the operand itself, but its options are still checked.
fn variant_results(operands: &[Operand], options: &CrossOptions) -> Result<PairResults<VariantTable>> {
    let tables = load_tables(operands, &options.extra)?;
    let mut results = PairResults::default();
    if tables.len() != 2 {
        let all = cross_tables(&tables, options.exclude)?;
        if tables.len() > 2 {
            results.insert(tables.iter().map(|(label, _)| label).join("-"), all);
        }
    }
    results.extend(pair_tables(&tables, options.exclude)?);
    Ok(results)
}

/// Reads the files named in `args`, compares them, and reports the results:
///
/// * gene lists are printed to `out`: the genes common to every file, then
///   (with three or more files) the genes common to each pair, and
/// * variant tables are written to `<label>.tsv` files under
///   `args.output_dir`, and the paths written are printed to `out`.
///
/// Usage errors, including a result that would land on an input file, are
/// reported before anything is printed or written.
pub fn run(args: &Args, out: impl io::Write) -> Result<()> {
    let operands = read_all(&args.files)?;
    match common_kind(&operands)? {
        InputKind::Genes => {
            if args.options.exclude {
                return Err(CrossError::ExcludeForGenes.into());
            }
            let all = intersect_genes(&operands);
            let pairs =
                if operands.len() > 2 { combine_pairs_genes(&operands)? } else { PairResults::default() };
            output::write_gene_report(out, &all, &pairs)
        }
        InputKind::Variants => {
            let results = variant_results(&operands, &args.options)?;
            output::write_tables(&args.output_dir, &results, &args.files, out)
        }
    }
}
