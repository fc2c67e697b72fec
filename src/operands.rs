//! Provides the `Operand` type and `read_all`, which read each input file into
//! memory exactly once. The classifier and the loaders then work on the
//! decoded text, so no file is opened twice.
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::classify::InputKind;
use crate::error::CrossError;

/// An input file: its label and its decoded contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand {
    label: String,
    text: String,
}

impl Operand {
    /// Reads and decodes the file at `path`.
    pub fn read(path: &Path) -> Result<Operand> {
        let bytes = fs::read(path).with_context(|| format!("Can't read file: {}", path.display()))?;
        Ok(Operand { label: base_name(path), text: decode(&bytes) })
    }

    /// An operand with the given label and contents.
    #[must_use]
    pub fn from_text(label: impl Into<String>, text: impl Into<String>) -> Operand {
        Operand { label: label.into(), text: text.into() }
    }

    /// The name results derived from this operand are labelled with.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The decoded contents.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Is this a gene list or a variant table?
    #[must_use]
    pub fn kind(&self) -> InputKind {
        InputKind::of(&self.text)
    }
}

/// Reads every file in `paths`, stopping at the first that can't be read.
pub fn read_all(paths: &[PathBuf]) -> Result<Vec<Operand>> {
    paths.iter().map(|path| Operand::read(path)).collect()
}

/// Returns the kind shared by all `operands`. Mixing gene lists with variant
/// tables, or passing no operands at all, is an error.
pub fn common_kind(operands: &[Operand]) -> Result<InputKind, CrossError> {
    let Some(first) = operands.first() else { return Err(CrossError::NoInputs) };
    let kind = first.kind();
    match operands.iter().find(|o| o.kind() != kind) {
        None => Ok(kind),
        Some(other) => {
            let (gene, variant) = if kind == InputKind::Genes { (first, other) } else { (other, first) };
            Err(CrossError::MixedInputs {
                gene: gene.label().to_owned(),
                variant: variant.label().to_owned(),
            })
        }
    }
}

/// The file name of `path` without its directory or its final extension:
/// `results/CASE1.variants.tsv` becomes `CASE1.variants`.
#[must_use]
pub fn base_name(path: &Path) -> String {
    path.file_stem().map_or_else(String::new, |stem| stem.to_string_lossy().into_owned())
}

/// Decodes `bytes` to a `String`. A UTF-8, UTF-16LE or UTF-16BE Byte Order Mark
/// selects the encoding and is removed; without one we assume UTF-8.
/// Malformed sequences become the Unicode REPLACEMENT CHARACTER rather than
/// an error.
fn decode(bytes: &[u8]) -> String {
    let (text, _encoding_used, _had_malformed_sequences) = encoding_rs::UTF_8.decode(bytes);
    text.into_owned()
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;
    use assert_fs::{prelude::*, TempDir};

    fn to_utf_16le(source: &str) -> Vec<u8> {
        let mut result = b"\xff\xfe".to_vec();
        for b in source.as_bytes().iter() {
            result.push(*b);
            result.push(0);
        }
        result
    }

    fn to_utf_16be(source: &str) -> Vec<u8> {
        let mut result = b"\xfe\xff".to_vec();
        for b in source.as_bytes().iter() {
            result.push(0);
            result.push(*b);
        }
        result
    }

    #[test]
    fn utf_16_is_translated_and_its_bom_dropped() {
        let expected = "NOC2L\nSMYD2;OR2T35\n";
        assert_eq!(decode(&to_utf_16le(expected)), expected);
        assert_eq!(decode(&to_utf_16be(expected)), expected);
    }

    #[test]
    fn utf8_bom_is_dropped() {
        assert_eq!(decode(b"\xEF\xBB\xBFChr\tStart\n"), "Chr\tStart\n");
    }

    #[test]
    fn malformed_bytes_are_replaced_not_rejected() {
        assert_eq!(decode(b"GENE\xff1\n"), "GENE\u{FFFD}1\n");
    }

    #[test]
    fn base_name_drops_directory_and_final_extension() {
        assert_eq!(base_name(Path::new("test_files/genes_list2.txt")), "genes_list2");
        assert_eq!(base_name(Path::new("/tmp/CASE1.variants.tsv")), "CASE1.variants");
        assert_eq!(base_name(Path::new("plain")), "plain");
    }

    #[test]
    fn read_labels_the_operand_by_base_name() {
        let temp = TempDir::new().unwrap();
        let file = temp.child("genes_list.txt");
        file.write_str("NOC2L\n").unwrap();
        let operand = Operand::read(file.path()).unwrap();
        assert_eq!(operand.label(), "genes_list");
        assert_eq!(operand.text(), "NOC2L\n");
        assert_eq!(operand.kind(), InputKind::Genes);
    }

    #[test]
    fn missing_files_name_the_path() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.txt");
        let err = read_all(&[missing]).unwrap_err();
        assert!(err.to_string().contains("nope.txt"));
    }

    #[test]
    fn mixed_kinds_are_refused() {
        let genes = Operand::from_text("genes", "NOC2L\n");
        let table = Operand::from_text("CASE1", "Chr\tStart\tEnd\tRef\tAlt\n");
        let expected = CrossError::MixedInputs { gene: "genes".into(), variant: "CASE1".into() };
        assert_eq!(common_kind(&[genes.clone(), table.clone()]), Err(expected.clone()));
        assert_eq!(common_kind(&[table.clone(), genes]), Err(expected));
        assert_eq!(common_kind(&[table]), Ok(InputKind::Variants));
        assert_eq!(common_kind(&[]), Err(CrossError::NoInputs));
    }
}
