//! Decides whether an input is a gene list or a variant table by looking at
//! its first line only.
use crate::key::BASE_COLUMNS;

/// The two kinds of input file.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum InputKind {
    /// One or more `;`-separated gene symbols per line
    Genes,
    /// A tab-separated table with chromosome/start/end/ref/alt columns
    Variants,
}

impl InputKind {
    /// Classifies `text` with `is_variant_table`.
    #[must_use]
    pub fn of(text: &str) -> InputKind {
        if is_variant_table(text) {
            InputKind::Variants
        } else {
            InputKind::Genes
        }
    }
}

/// True if the first line of `text` has at least five whitespace-separated
/// columns. An empty input is a (empty) gene list.
#[must_use]
pub fn is_variant_table(text: &str) -> bool {
    text.lines().next().is_some_and(|header| header.split_whitespace().count() >= BASE_COLUMNS)
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn five_header_columns_make_a_variant_table() {
        assert!(is_variant_table("Chr\tStart\tEnd\tRef\tAlt\nchr1\t1\t1\tA\tG\n"));
        assert!(is_variant_table("Chr Start End Ref Alt Gene\n"));
        assert_eq!(InputKind::of("Chr\tStart\tEnd\tRef\tAlt\tExAC_ALL"), InputKind::Variants);
    }

    #[test]
    fn anything_narrower_is_a_gene_list() {
        assert!(!is_variant_table("NOC2L\nSMYD2\n"));
        assert!(!is_variant_table("chr1\t1\t1\tA\n"));
        assert!(!is_variant_table(""));
        assert_eq!(InputKind::of("ABCD;ABCE_1\n"), InputKind::Genes);
    }

    #[test]
    fn only_the_first_line_counts() {
        assert!(!is_variant_table("GENE1\nchr1\t1\t1\tA\tG\n"));
    }
}
