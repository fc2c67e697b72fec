//! The set algebra: intersection and difference over the key spaces of two or
//! more record sets. Gene lists are their own keys; a variant table's keys are
//! its `VariantKey`s, and results are rebuilt from the first table's rows.
use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use std::hash::Hash;

use crate::error::CrossError;
use crate::records::{GeneList, VariantTable};

/// The `KeyIterator` type is what a `KeySpace` returns: an iterator over the
/// keys of one operand, duplicates allowed.
pub type KeyIterator<'a, K> = Box<dyn Iterator<Item = &'a K> + 'a>;

/// Anything whose records can be compared by key.
pub trait KeySpace {
    /// The key records are compared by
    type Key: Eq + Hash;
    /// The operand's keys, in order. A key may repeat.
    fn keys(&self) -> KeyIterator<'_, Self::Key>;
}

impl KeySpace for GeneList {
    type Key = String;
    fn keys(&self) -> KeyIterator<'_, String> {
        Box::new(self.iter())
    }
}

impl KeySpace for VariantTable {
    type Key = crate::key::VariantKey;
    fn keys(&self) -> KeyIterator<'_, Self::Key> {
        Box::new(VariantTable::keys(self))
    }
}

// A `KeySet` borrows its keys from the first operand and attaches a small
// bookkeeping value to each. `IndexMap::retain` is `O(n)` and keeps order, so
// each further operand costs one pass over it and one pass over the set.
type KeySet<'data, K, Bookkeeping> = IndexMap<&'data K, Bookkeeping, FxBuildHasher>;

fn key_set_from<O: KeySpace, B: Copy>(operand: &O, b: B) -> KeySet<'_, O::Key, B> {
    let mut set = KeySet::default();
    for key in operand.keys() {
        set.insert(key, b);
    }
    set
}

/// Returns the keys present in `first` and in every operand of `rest`, each
/// once, in order of first appearance in `first`. With `rest` empty this is
/// just `first`'s keys without duplicates.
///
/// We start with each key of `first` colored with `this_cycle`, so every key in
/// the set has been seen in every operand so far. For each further operand we
/// flip `this_cycle`, recolor the keys that operand contains, and drop every
/// key still wearing the old color.
pub fn intersect<'data, 'r, O: KeySpace + 'r>(
    first: &'data O,
    rest: impl IntoIterator<Item = &'r O>,
) -> Vec<&'data O::Key> {
    let mut this_cycle = true;
    let mut set = key_set_from(first, this_cycle);
    for operand in rest {
        this_cycle = !this_cycle;
        for key in operand.keys() {
            if let Some(when_seen) = set.get_mut(key) {
                *when_seen = this_cycle;
            }
        }
        set.retain(|_, when_seen| *when_seen == this_cycle);
    }
    set.keys().copied().collect()
}

/// Returns the keys of `a` that `b` lacks, each once, in `a`'s order.
pub fn difference<'data, O: KeySpace>(a: &'data O, b: &O) -> Vec<&'data O::Key> {
    let mut set = key_set_from(a, true);
    for key in b.keys() {
        if let Some(keepme) = set.get_mut(key) {
            *keepme = false;
        }
    }
    set.retain(|_, keepme| *keepme);
    set.keys().copied().collect()
}

/// The gene tokens present in every list, without duplicates.
#[must_use]
pub fn common_genes(lists: &[&GeneList]) -> GeneList {
    match lists {
        [] => GeneList::new(),
        [first, rest @ ..] => intersect(*first, rest.iter().copied()).into_iter().cloned().collect(),
    }
}

/// The rows whose keys are present in every table. Rows (and the header) are
/// taken from the first table.
#[must_use]
pub fn common_variants(tables: &[&VariantTable]) -> VariantTable {
    match tables {
        [] => VariantTable::default(),
        [first, rest @ ..] => first.subset(intersect(*first, rest.iter().copied())),
    }
}

/// With `exclude` false, the same as `common_variants`. With `exclude` true,
/// the rows of the first table whose keys the second table lacks; exclusion is
/// defined only for exactly two tables. Either way the result carries the
/// first table's header.
pub fn exclusive_variants(
    tables: &[&VariantTable],
    exclude: bool,
) -> Result<VariantTable, CrossError> {
    if tables.is_empty() {
        return Err(CrossError::NoInputs);
    }
    if !exclude {
        return Ok(common_variants(tables));
    }
    match tables {
        [a, b] => Ok(a.subset(difference(*a, *b))),
        _ => Err(CrossError::ExcludeNeedsTwo(tables.len())),
    }
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;
    use crate::records::load_variants;
    use std::collections::HashSet;

    fn genes(tokens: &[&str]) -> GeneList {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    fn as_set<K: Eq + Hash + Clone>(keys: &[&K]) -> HashSet<K> {
        keys.iter().map(|k| (*k).clone()).collect()
    }

    const HEADER: &str = "Chr\tStart\tEnd\tRef\tAlt\n";

    fn table(positions: &[&str]) -> VariantTable {
        let mut text = HEADER.to_string();
        for pos in positions {
            text.push_str(&format!("chr1\t{pos}\t{pos}\tA\tG\n"));
        }
        load_variants(&text, &[]).unwrap()
    }

    fn starts(table: &VariantTable) -> Vec<String> {
        table.keys().map(|k| k.base()[1].clone()).collect()
    }

    #[test]
    fn gene_found_in_all_three_lists() {
        let a = genes(&["GENE1", "GENE2", "GENE3"]);
        let b = genes(&["GENE1", "GENE2", "GENE4"]);
        let c = genes(&["GENE1", "GENE4", "GENE5"]);
        assert_eq!(common_genes(&[&a, &b, &c]), ["GENE1"]);
        assert_eq!(common_genes(&[&a, &b]), ["GENE1", "GENE2"]);
        assert_eq!(common_genes(&[&a, &c]), ["GENE1"]);
    }

    #[test]
    fn intersection_is_commutative_as_a_set() {
        let a = genes(&["x", "y", "z", "y"]);
        let b = genes(&["z", "w", "y"]);
        assert_eq!(as_set(&intersect(&a, [&b])), as_set(&intersect(&b, [&a])));
    }

    #[test]
    fn a_single_operand_is_deduplicated_but_otherwise_unchanged() {
        let a = genes(&["xxx", "abc", "xxx", "yyy", "abc"]);
        assert_eq!(common_genes(&[&a]), ["xxx", "abc", "yyy"]);
        let t = table(&["14930", "762592", "14930"]);
        assert_eq!(common_variants(&[&t]), t);
    }

    #[test]
    fn disjoint_operands_have_an_empty_intersection() {
        let a = genes(&["a", "b"]);
        let b = genes(&["c", "d"]);
        assert!(common_genes(&[&a, &b]).is_empty());
        let t1 = table(&["1", "2"]);
        let t2 = table(&["3", "4"]);
        let common = common_variants(&[&t1, &t2]);
        assert!(common.is_empty());
        assert_eq!(common.header(), t1.header());
    }

    #[test]
    fn differences_and_intersection_partition_the_union() {
        let a = genes(&["GENE1", "GENE2", "GENE3"]);
        let b = genes(&["GENE1", "GENE2", "GENE4"]);
        let a_only = as_set(&difference(&a, &b));
        let b_only = as_set(&difference(&b, &a));
        let both = as_set(&intersect(&a, [&b]));
        assert!(a_only.is_disjoint(&b_only));
        assert!(a_only.is_disjoint(&both) && b_only.is_disjoint(&both));
        let union: HashSet<String> = a.iter().chain(b.iter()).cloned().collect();
        let rebuilt: HashSet<String> = a_only.into_iter().chain(b_only).chain(both).collect();
        assert_eq!(rebuilt, union);
    }

    #[test]
    fn variant_rows_come_from_the_first_table() {
        let t1 = load_variants(
            "Chr\tStart\tEnd\tRef\tAlt\tSample\nchr1\t1\t1\tA\tG\tCASE1\nchr1\t2\t2\tA\tG\tCASE1\n",
            &[],
        )
        .unwrap();
        let t2 = load_variants(
            "Chr\tStart\tEnd\tRef\tAlt\tOrigin\nchr1\t2\t2\tA\tG\tCASE2\nchr1\t3\t3\tA\tG\tCASE2\n",
            &[],
        )
        .unwrap();
        let common = common_variants(&[&t1, &t2]);
        assert_eq!(common.header()[5], "Sample");
        assert_eq!(common.rows().collect::<Vec<_>>(), [["chr1", "2", "2", "A", "G", "CASE1"]]);
    }

    #[test]
    fn intersecting_a_table_with_itself_returns_every_key_once() {
        let t = table(&["14907", "14930", "69511", "14930"]);
        let common = common_variants(&[&t, &t]);
        assert_eq!(starts(&common), ["14907", "14930", "69511"]);
        assert_eq!(common.header(), t.header());
    }

    #[test]
    fn exclusion_keeps_rows_unique_to_the_first_table() {
        let t1 = table(&["14930", "762592", "762601", "792263"]);
        let t2 = table(&["14930", "762273", "762601", "792263"]);
        let only_1 = exclusive_variants(&[&t1, &t2], true).unwrap();
        assert_eq!(starts(&only_1), ["762592"]);
        assert_eq!(only_1.header(), t1.header());
        let only_2 = exclusive_variants(&[&t2, &t1], true).unwrap();
        assert_eq!(starts(&only_2), ["762273"]);
    }

    #[test]
    fn without_exclusion_exclusive_variants_intersects() {
        let t1 = table(&["1", "2", "3"]);
        let t2 = table(&["2", "3", "4"]);
        let t3 = table(&["3", "2"]);
        let common = exclusive_variants(&[&t1, &t2, &t3], false).unwrap();
        assert_eq!(starts(&common), ["2", "3"]);
    }

    #[test]
    fn exclusion_over_three_tables_is_a_usage_failure() {
        let t = table(&["1"]);
        assert_eq!(exclusive_variants(&[&t, &t, &t], true), Err(CrossError::ExcludeNeedsTwo(3)));
        assert_eq!(exclusive_variants(&[&t], true), Err(CrossError::ExcludeNeedsTwo(1)));
        assert_eq!(exclusive_variants(&[], false), Err(CrossError::NoInputs));
    }
}
