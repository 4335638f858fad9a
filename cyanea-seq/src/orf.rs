//! Open reading frame search over all six frames.
//!
//! An ORF opens at an in-frame `ATG` and closes at the next in-frame stop
//! codon, or at the end of the sequence. Positions are 1-based and refer to
//! the strand that was scanned, so reverse-frame coordinates are on the
//! reverse complement.

use crate::codon::{is_start_codon, translate_codon};
use crate::translate::{reverse_complement, Frame, Strand};

/// One open reading frame.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Orf {
    /// 1-based position of the `A` of the start codon.
    pub start: usize,
    /// 1-based inclusive end: last base of the stop codon, or the sequence
    /// length when the ORF runs off the end.
    pub end: usize,
    pub frame: Frame,
    pub strand: Strand,
    /// Translated residues, starting with `M`, stop excluded.
    pub protein: String,
}

impl Orf {
    /// Length in residues.
    pub fn len(&self) -> usize {
        self.protein.len()
    }

    pub fn is_empty(&self) -> bool {
        self.protein.is_empty()
    }
}

/// Scan one strand in one frame. `strand_seq` must already be the strand the
/// frame refers to (the reverse complement for negative frames).
fn scan_strand(strand_seq: &[u8], frame: Frame, min_len: usize, out: &mut Vec<Orf>) {
    let mut open: Option<(usize, String)> = None;
    let mut i = frame.offset();

    while i + 3 <= strand_seq.len() {
        let codon = &strand_seq[i..i + 3];
        match open.take() {
            None => {
                if is_start_codon(codon) {
                    open = Some((i, String::from("M")));
                }
            }
            Some((start, mut protein)) => {
                let aa = translate_codon(codon);
                if aa != b'*' {
                    protein.push(aa as char);
                    open = Some((start, protein));
                } else if protein.len() >= min_len {
                    out.push(Orf {
                        start: start + 1,
                        end: i + 3,
                        frame,
                        strand: frame.strand(),
                        protein,
                    });
                }
            }
        }
        i += 3;
    }

    if let Some((start, protein)) = open {
        if protein.len() >= min_len {
            out.push(Orf {
                start: start + 1,
                end: strand_seq.len(),
                frame,
                strand: frame.strand(),
                protein,
            });
        }
    }
}

/// ORFs of at least `min_len` residues in a single frame.
///
/// `seq` should be upper-case DNA.
pub fn find_orfs_in_frame(seq: &str, frame: Frame, min_len: usize) -> Vec<Orf> {
    let mut out = Vec::new();
    match frame.strand() {
        Strand::Forward => scan_strand(seq.as_bytes(), frame, min_len, &mut out),
        Strand::Reverse => scan_strand(reverse_complement(seq).as_bytes(), frame, min_len, &mut out),
    }
    out
}

/// ORFs of at least `min_len` residues across all six frames, longest first.
///
/// Equal lengths keep scan order: frame +1, −1, +2, −2, +3, −3, and
/// position within a frame.
pub fn find_orfs(seq: &str, min_len: usize) -> Vec<Orf> {
    let rc = reverse_complement(seq);
    let mut orfs = Vec::new();
    for frame in Frame::ALL {
        let strand_seq = match frame.strand() {
            Strand::Forward => seq.as_bytes(),
            Strand::Reverse => rc.as_bytes(),
        };
        scan_strand(strand_seq, frame, min_len, &mut orfs);
    }
    orfs.sort_by_key(|o| std::cmp::Reverse(o.len()));
    orfs
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dna(max: usize) -> impl Strategy<Value = String> {
        proptest::collection::vec(
            prop_oneof![Just('A'), Just('C'), Just('G'), Just('T')],
            0..max,
        )
        .prop_map(|v| v.into_iter().collect())
    }

    proptest! {
        #[test]
        fn all_results_meet_minimum(seq in dna(300), min in 0usize..30) {
            for orf in find_orfs(&seq, min) {
                prop_assert!(orf.len() >= min);
                prop_assert!(orf.protein.starts_with('M'));
            }
        }

        #[test]
        fn lowering_minimum_never_removes(seq in dna(300), a in 0usize..30, b in 0usize..30) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let strict = find_orfs(&seq, hi);
            let loose = find_orfs(&seq, lo);
            for orf in &strict {
                prop_assert!(loose.contains(orf));
            }
        }
    }
}
