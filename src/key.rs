//! Comparison keys for variant rows. A row's key is its first five columns
//! (chromosome, start, end, reference allele, alternative allele), optionally
//! followed by normalized values from extra columns named in the header.
use std::hash::{Hash, Hasher};

use crate::error::CrossError;

/// Number of leading columns every variant key is built from.
pub const BASE_COLUMNS: usize = 5;

/// One normalized extra-column value.
///
/// A value that parses as a float is rounded to two decimal places, so that
/// `0.942` and `0.94` compare equal; anything else is kept as text, except
/// the missing-value marker `.`, which becomes the empty string.
#[derive(Debug, Clone)]
pub enum KeyField {
    /// A value that didn't parse as a number
    Text(String),
    /// A numeric value, already rounded to hundredths
    Number(f64),
}

impl KeyField {
    /// Normalizes the raw cell `raw`.
    #[must_use]
    pub fn normalized(raw: &str) -> KeyField {
        if raw == "." {
            return KeyField::Text(String::new());
        }
        match raw.trim().parse::<f64>() {
            Ok(value) => KeyField::Number(round_to_hundredths(value)),
            Err(_) => KeyField::Text(raw.to_owned()),
        }
    }
}

/// Rounds half to even, as decimal rounding of a two-place tie does. Values
/// too large to scale are already whole and stay as they are.
fn round_to_hundredths(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value + 0.0;
    }
    // Adding positive zero turns -0.0 into 0.0, so both hash alike
    scaled.round_ties_even() / 100.0 + 0.0
}

// Numbers compare by bit pattern, which makes `KeyField` a lawful `Eq`: a NaN
// cell matches a NaN cell in another file.
impl PartialEq for KeyField {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (KeyField::Text(a), KeyField::Text(b)) => a == b,
            (KeyField::Number(a), KeyField::Number(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for KeyField {}

impl Hash for KeyField {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            KeyField::Text(s) => s.hash(state),
            KeyField::Number(n) => n.to_bits().hash(state),
        }
    }
}

/// The key used to decide whether rows from different files are the same
/// variant. Two keys are equal iff every component is equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariantKey {
    base: [String; BASE_COLUMNS],
    extra: Vec<KeyField>,
}

impl VariantKey {
    /// A key from its five base columns and already-normalized extra fields.
    #[must_use]
    pub fn new(base: [String; BASE_COLUMNS], extra: Vec<KeyField>) -> Self {
        VariantKey { base, extra }
    }

    /// Chromosome, start, end, reference allele and alternative allele, in
    /// that order.
    #[must_use]
    pub fn base(&self) -> &[String] {
        &self.base
    }

    /// The normalized extra fields, in the order the columns were requested.
    #[must_use]
    pub fn extra(&self) -> &[KeyField] {
        &self.extra
    }
}

/// Returns the zero-based position of the first header cell equal to `name`.
pub fn column_index(header: &[String], name: &str) -> Result<usize, CrossError> {
    header
        .iter()
        .position(|column| column == name)
        .ok_or_else(|| CrossError::MissingColumn(name.to_owned()))
}

/// Builds `VariantKey`s for the rows of one file. The extra column names are
/// resolved against that file's header once, when the builder is made.
#[derive(Debug, Clone, Default)]
pub struct KeyBuilder {
    extra: Vec<usize>,
}

impl KeyBuilder {
    /// A builder for a file whose header is `header`, folding in the columns
    /// named by `extra_columns`.
    pub fn new(header: &[String], extra_columns: &[String]) -> Result<Self, CrossError> {
        let extra = extra_columns
            .iter()
            .map(|name| column_index(header, name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(KeyBuilder { extra })
    }

    /// The fewest columns a row must have for `key_for` to succeed.
    #[must_use]
    pub fn min_width(&self) -> usize {
        self.extra.iter().map(|&i| i + 1).fold(BASE_COLUMNS, usize::max)
    }

    /// The key for `row`, or `None` if `row` is shorter than `min_width()`.
    #[must_use]
    pub fn key_for(&self, row: &[String]) -> Option<VariantKey> {
        if row.len() < self.min_width() {
            return None;
        }
        let base = std::array::from_fn(|i| row[i].clone());
        let extra = self.extra.iter().map(|&i| KeyField::normalized(&row[i])).collect();
        Some(VariantKey { base, extra })
    }
}
