//! Alphabet classification for sequence records.
//!
//! Validation is done on uppercased bytes. The plain-nucleotide set
//! (`ACGTN`) is what free-text input is checked against; the IUPAC sets are
//! used to classify records whose kind is not known up front.

/// Kind of residues a sequence holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alphabet {
    Nucleotide,
    Protein,
}

/// Unambiguous bases plus `N`.
pub const PLAIN_NUCLEOTIDES: &[u8] = b"ACGTN";

/// IUPAC nucleotide codes, DNA and RNA.
pub const IUPAC_NUCLEOTIDES: &[u8] = b"ACGTUNRYSWKMBDHV";

/// 20 standard amino acids plus `XBZJUO*`.
pub const PROTEIN_RESIDUES: &[u8] = b"ACDEFGHIKLMNPQRSTVWYXBZJUO*";

impl Alphabet {
    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Alphabet::Nucleotide => "nucleotide",
            Alphabet::Protein => "protein",
        }
    }

    /// Whether `b` (any case) belongs to this alphabet.
    pub fn is_valid(self, b: u8) -> bool {
        let b = b.to_ascii_uppercase();
        match self {
            Alphabet::Nucleotide => IUPAC_NUCLEOTIDES.contains(&b),
            Alphabet::Protein => PROTEIN_RESIDUES.contains(&b),
        }
    }

    /// Classify a sequence: nucleotide if every byte is an IUPAC nucleotide code.
    pub fn detect(seq: &[u8]) -> Alphabet {
        if !seq.is_empty() && seq.iter().all(|&b| Alphabet::Nucleotide.is_valid(b)) {
            Alphabet::Nucleotide
        } else {
            Alphabet::Protein
        }
    }
}

/// Whether a non-empty string matches `^[ATCGN]+$`, case-insensitively.
pub fn is_plain_nucleotide(s: &str) -> bool {
    !s.is_empty()
        && s
            .bytes()
            .all(|b| PLAIN_NUCLEOTIDES.contains(&b.to_ascii_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_nucleotide_check() {
        assert!(is_plain_nucleotide("ACGTN"));
        assert!(is_plain_nucleotide("acgtn"));
        assert!(!is_plain_nucleotide(""));
        assert!(!is_plain_nucleotide("ACGU"));
        assert!(!is_plain_nucleotide("seq_1"));
    }

    #[test]
    fn detect_kind() {
        assert_eq!(Alphabet::detect(b"ACGTRY"), Alphabet::Nucleotide);
        assert_eq!(Alphabet::detect(b"acgu"), Alphabet::Nucleotide);
        assert_eq!(Alphabet::detect(b"MKLV"), Alphabet::Protein);
        assert_eq!(Alphabet::detect(b""), Alphabet::Protein);
    }

    #[test]
    fn protein_accepts_stop() {
        assert!(Alphabet::Protein.is_valid(b'*'));
        assert!(!Alphabet::Nucleotide.is_valid(b'*'));
    }
}
