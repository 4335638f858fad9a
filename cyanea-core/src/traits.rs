//! Traits implemented by the parsed records of every converter crate.

/// Residue or base letters held as ASCII bytes.
///
/// Implemented by FASTA and FASTQ records. Lengths count letters, not
/// codons or lines.
pub trait Sequence {
    fn as_bytes(&self) -> &[u8];

    fn len(&self) -> usize {
        self.as_bytes().len()
    }

    fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

/// Something with an identifier: a FASTA id, a molecule title, a PDB id
/// code, a residue name.
pub trait Annotated {
    fn name(&self) -> &str;

    /// Free text that follows the identifier, when the format has any.
    fn description(&self) -> Option<&str> {
        None
    }
}

/// One-line summary, used in log messages.
pub trait Summarizable {
    fn summary(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Peptide(&'static str);

    impl Sequence for Peptide {
        fn as_bytes(&self) -> &[u8] {
            self.0.as_bytes()
        }
    }

    impl Annotated for Peptide {
        fn name(&self) -> &str {
            "pep"
        }
    }

    #[test]
    fn provided_methods() {
        let p = Peptide("MKV");
        assert_eq!(p.len(), 3);
        assert!(!p.is_empty());
        assert!(Peptide("").is_empty());
        assert_eq!(p.name(), "pep");
        assert_eq!(p.description(), None);
    }
}
