//! The standard genetic code, synonymous codon lists, and codon-usage tables.
//!
//! Forward lookup goes through a 64-entry array indexed by base encoding;
//! reverse lookup (amino acid → codons) uses per-residue lists kept in their
//! conventional definition order, which is what the `first` reverse
//! translation strategy relies on.

// ---------------------------------------------------------------------------
// Base encoding: A=0, C=1, G=2, T=3
// ---------------------------------------------------------------------------

fn base_index(b: u8) -> Option<usize> {
    match b.to_ascii_uppercase() {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' => Some(3),
        _ => None,
    }
}

/// Convert a 3-base codon to an index in [0, 64).
fn codon_index(codon: &[u8]) -> Option<usize> {
    match codon {
        [b1, b2, b3] => Some(base_index(*b1)? * 16 + base_index(*b2)? * 4 + base_index(*b3)?),
        _ => None,
    }
}

/// Convert an index in [0, 64) back to a DNA codon.
fn index_to_codon(idx: usize) -> [u8; 3] {
    const BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];
    [BASES[idx >> 4], BASES[(idx >> 2) & 3], BASES[idx & 3]]
}

// ---------------------------------------------------------------------------
// Standard code
// ---------------------------------------------------------------------------

// Codon order: AAA, AAC, AAG, AAT, ACA, ... TTG, TTT

const STANDARD_AA: [u8; 64] = [
    b'K', b'N', b'K', b'N', b'T', b'T', b'T', b'T', b'R', b'S', b'R', b'S',
    b'I', b'I', b'M', b'I', b'Q', b'H', b'Q', b'H', b'P', b'P', b'P', b'P',
    b'R', b'R', b'R', b'R', b'L', b'L', b'L', b'L', b'E', b'D', b'E', b'D',
    b'A', b'A', b'A', b'A', b'G', b'G', b'G', b'G', b'V', b'V', b'V', b'V',
    b'*', b'Y', b'*', b'Y', b'S', b'S', b'S', b'S', b'*', b'C', b'W', b'C',
    b'L', b'F', b'L', b'F',
];

/// The 20 standard amino acids in alphabetical one-letter order.
pub const STANDARD_AMINO_ACIDS: &[u8; 20] = b"ACDEFGHIKLMNPQRSTVWY";

/// Residue for codons that are not three unambiguous bases.
pub const UNKNOWN_RESIDUE: u8 = b'X';

/// Translate one DNA codon (case-insensitive).
///
/// Returns the one-letter amino acid, `*` for a stop, or `X` when the codon
/// contains anything other than `ACGT` or is not three bases long. RNA input
/// must have `U` rewritten to `T` first.
pub fn translate_codon(codon: &[u8]) -> u8 {
    codon_index(codon).map_or(UNKNOWN_RESIDUE, |i| STANDARD_AA[i])
}

pub fn is_stop_codon(codon: &[u8]) -> bool {
    translate_codon(codon) == b'*'
}

/// Only `ATG` initiates.
pub fn is_start_codon(codon: &[u8]) -> bool {
    codon_index(codon) == Some(14)
}

/// Iterate all 64 DNA codons with their translation, in index order.
pub fn all_codons() -> impl Iterator<Item = ([u8; 3], u8)> {
    (0..64).map(|i| (index_to_codon(i), STANDARD_AA[i]))
}

/// Synonymous codons for `aa` (or `*`), in definition order.
///
/// Returns an empty slice for anything that is not one of the 20 standard
/// amino acids or `*`.
pub fn synonymous_codons(aa: u8) -> &'static [&'static str] {
    match aa.to_ascii_uppercase() {
        b'A' => &["GCT", "GCC", "GCA", "GCG"],
        b'R' => &["CGT", "CGC", "CGA", "CGG", "AGA", "AGG"],
        b'N' => &["AAT", "AAC"],
        b'D' => &["GAT", "GAC"],
        b'C' => &["TGT", "TGC"],
        b'Q' => &["CAA", "CAG"],
        b'E' => &["GAA", "GAG"],
        b'G' => &["GGT", "GGC", "GGA", "GGG"],
        b'H' => &["CAT", "CAC"],
        b'I' => &["ATT", "ATC", "ATA"],
        b'L' => &["TTA", "TTG", "CTT", "CTC", "CTA", "CTG"],
        b'K' => &["AAA", "AAG"],
        b'M' => &["ATG"],
        b'F' => &["TTT", "TTC"],
        b'P' => &["CCT", "CCC", "CCA", "CCG"],
        b'S' => &["TCT", "TCC", "TCA", "TCG", "AGT", "AGC"],
        b'T' => &["ACT", "ACC", "ACA", "ACG"],
        b'W' => &["TGG"],
        b'Y' => &["TAT", "TAC"],
        b'V' => &["GTT", "GTC", "GTA", "GTG"],
        b'*' => &["TAA", "TAG", "TGA"],
        _ => &[],
    }
}

// ---------------------------------------------------------------------------
// Codon usage
// ---------------------------------------------------------------------------

/// Organism whose preferred codons drive optimized reverse translation.
///
/// `Random` carries no preferences at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CodonUsageTable {
    #[default]
    Human,
    Ecoli,
    Yeast,
    Plant,
    Random,
}

// Preferred codons in the residue order below.
const PREFERRED_ORDER: &[u8; 21] = b"ARNDCQEGHILKMFPSTWYV*";

const HUMAN: [&str; 21] = [
    "GCC", "CGG", "AAC", "GAC", "TGC", "CAG", "GAG", "GGC", "CAC", "ATC", "CTG", "AAG", "ATG",
    "TTC", "CCC", "AGC", "ACC", "TGG", "TAC", "GTG", "TAA",
];

const ECOLI: [&str; 21] = [
    "GCG", "CGT", "AAC", "GAT", "TGC", "CAG", "GAA", "GGT", "CAT", "ATT", "CTG", "AAA", "ATG",
    "TTT", "CCG", "TCG", "ACC", "TGG", "TAT", "GTG", "TAA",
];

const YEAST: [&str; 21] = [
    "GCT", "AGA", "AAT", "GAT", "TGT", "CAA", "GAA", "GGT", "CAT", "ATT", "TTG", "AAA", "ATG",
    "TTT", "CCT", "TCT", "ACT", "TGG", "TAT", "GTT", "TAA",
];

const PLANT: [&str; 21] = [
    "GCT", "AGA", "AAT", "GAT", "TGT", "CAA", "GAA", "GGA", "CAT", "ATT", "CTT", "AAA", "ATG",
    "TTT", "CCT", "TCT", "ACT", "TGG", "TAT", "GTT", "TAA",
];

impl CodonUsageTable {
    pub fn name(self) -> &'static str {
        match self {
            CodonUsageTable::Human => "human",
            CodonUsageTable::Ecoli => "ecoli",
            CodonUsageTable::Yeast => "yeast",
            CodonUsageTable::Plant => "plant",
            CodonUsageTable::Random => "random",
        }
    }

    /// The organism's preferred codon for `aa` (or `*`), if it has one.
    pub fn preferred(self, aa: u8) -> Option<&'static str> {
        let table = match self {
            CodonUsageTable::Human => &HUMAN,
            CodonUsageTable::Ecoli => &ECOLI,
            CodonUsageTable::Yeast => &YEAST,
            CodonUsageTable::Plant => &PLANT,
            CodonUsageTable::Random => return None,
        };
        let aa = aa.to_ascii_uppercase();
        PREFERRED_ORDER
            .iter()
            .position(|&r| r == aa)
            .map(|i| table[i])
    }
}
