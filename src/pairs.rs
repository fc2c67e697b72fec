//! Runs a comparison on every unordered pair of inputs.
use anyhow::Result;
use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use itertools::Itertools;

/// Results keyed by pair label, in the order the pairs were enumerated.
pub type PairResults<R> = IndexMap<String, R, FxBuildHasher>;

/// The label of the pair `(first, second)`: the two labels joined with `-`.
#[must_use]
pub fn pair_label(first: &str, second: &str) -> String {
    format!("{first}-{second}")
}

/// Calls `compare` on each 2-combination of `inputs`, in order (the first
/// member of the pair varies slowest), and stores each result under the
/// pair's label. If two pairs share a label, the later result replaces the
/// earlier one.
pub fn combine_all_pairs<T, R>(
    inputs: &[T],
    label_of: impl Fn(&T) -> &str,
    mut compare: impl FnMut(&T, &T) -> Result<R>,
) -> Result<PairResults<R>> {
    let mut results = PairResults::default();
    for (first, second) in inputs.iter().tuple_combinations() {
        let result = compare(first, second)?;
        results.insert(pair_label(label_of(first), label_of(second)), result);
    }
    Ok(results)
}
