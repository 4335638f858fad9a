//! Protein → DNA reverse translation.
//!
//! Each residue is replaced by one of its synonymous codons. Which one is
//! decided by a [`CodonStrategy`] and, for the optimized strategies, an
//! organism [`CodonUsageTable`]. Randomness comes from the caller's RNG, so a
//! seeded generator gives reproducible output.

use rand::Rng;

use cyanea_core::{CyaneaError, Result};

use crate::codon::{synonymous_codons, CodonUsageTable, STANDARD_AMINO_ACIDS};
use crate::fasta::{format_fasta, parse_fasta_text, SequenceRecord, FASTA_LINE_WIDTH};

/// How a codon is picked among the synonymous ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CodonStrategy {
    /// The organism's preferred codon.
    Optimized,
    /// Uniformly among synonymous codons.
    Random,
    /// Preferred codon with probability 0.7, otherwise uniform.
    #[default]
    Balanced,
    /// The first codon in definition order. Deterministic.
    First,
}

/// Probability that the balanced strategy takes the preferred codon.
pub const BALANCED_PREFERRED_PROBABILITY: f64 = 0.7;

/// Options for [`protein_to_dna`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReverseTranslationConfig {
    /// Organism codon preferences (default `Human`).
    pub codon_usage: CodonUsageTable,
    /// Codon choice (default `Balanced`).
    pub strategy: CodonStrategy,
    /// Emit stop codons for `*` and append one at the end (default true).
    pub include_stop_codon: bool,
    /// Prepend `ATG` when the protein does not start with `M` (default false).
    pub add_start_codon: bool,
    /// Skip ambiguous and unknown residues instead of substituting or
    /// failing (default true).
    pub remove_ambiguous: bool,
}

impl Default for ReverseTranslationConfig {
    fn default() -> Self {
        Self {
            codon_usage: CodonUsageTable::Human,
            strategy: CodonStrategy::Balanced,
            include_stop_codon: true,
            add_start_codon: false,
            remove_ambiguous: true,
        }
    }
}

fn uniform<R: Rng + ?Sized>(codons: &'static [&'static str], rng: &mut R) -> &'static str {
    codons[rng.random_range(0..codons.len())]
}

/// Pick a codon for `aa` (one-letter code or `*`).
///
/// Returns `None` when `aa` has no codons. RNG draws: `Random` takes one
/// index; `Balanced` takes one `f64` and, when it falls in the random
/// branch, one index.
pub fn select_codon<R: Rng + ?Sized>(
    aa: u8,
    usage: CodonUsageTable,
    strategy: CodonStrategy,
    rng: &mut R,
) -> Option<&'static str> {
    let codons = synonymous_codons(aa);
    if codons.is_empty() {
        return None;
    }
    let codon = match strategy {
        CodonStrategy::Optimized => usage.preferred(aa).unwrap_or(codons[0]),
        CodonStrategy::Random => uniform(codons, rng),
        CodonStrategy::Balanced => {
            let roll: f64 = rng.random();
            match usage.preferred(aa) {
                Some(preferred) if roll < BALANCED_PREFERRED_PROBABILITY => preferred,
                _ => uniform(codons, rng),
            }
        }
        CodonStrategy::First => codons[0],
    };
    Some(codon)
}

fn is_ambiguous(aa: u8) -> bool {
    matches!(aa, b'X' | b'B' | b'Z' | b'J')
}

/// Reverse-translate one protein sequence (case-insensitive).
pub fn reverse_translate<R: Rng + ?Sized>(
    protein: &str,
    config: &ReverseTranslationConfig,
    rng: &mut R,
) -> Result<String> {
    let protein = protein.to_ascii_uppercase();
    let usage = config.codon_usage;
    let strategy = config.strategy;
    let mut dna = String::with_capacity(protein.len() * 3 + 6);

    if config.add_start_codon && !protein.starts_with('M') {
        dna.push_str("ATG");
    }

    for aa in protein.bytes() {
        if is_ambiguous(aa) {
            if !config.remove_ambiguous {
                let substitute = STANDARD_AMINO_ACIDS[rng.random_range(0..STANDARD_AMINO_ACIDS.len())];
                if let Some(codon) = select_codon(substitute, usage, strategy, rng) {
                    dna.push_str(codon);
                }
            }
            continue;
        }
        if aa == b'*' {
            if config.include_stop_codon {
                if let Some(codon) = select_codon(b'*', usage, strategy, rng) {
                    dna.push_str(codon);
                }
            }
            continue;
        }
        match select_codon(aa, usage, strategy, rng) {
            Some(codon) => dna.push_str(codon),
            None if config.remove_ambiguous => {
                log::debug!("skipping unknown residue '{}'", aa as char);
            }
            None => {
                return Err(CyaneaError::InvalidInput(format!(
                    "Invalid amino acid: {}",
                    aa as char
                )))
            }
        }
    }

    if config.include_stop_codon && !protein.ends_with('*') {
        if let Some(codon) = select_codon(b'*', usage, strategy, rng) {
            dna.push_str(codon);
        }
    }
    Ok(dna)
}

/// Reverse-translate every FASTA record in `input`.
///
/// Headers gain a `DNA_` prefix.
pub fn reverse_translate_records<R: Rng + ?Sized>(
    input: &str,
    config: &ReverseTranslationConfig,
    rng: &mut R,
) -> Result<Vec<SequenceRecord>> {
    let proteins = parse_fasta_text(input);
    if proteins.is_empty() {
        return Err(CyaneaError::InvalidInput(
            "No valid protein sequences found in input".into(),
        ));
    }
    let records = proteins
        .iter()
        .map(|rec| {
            let dna = reverse_translate(rec.sequence(), config, rng)?;
            Ok(SequenceRecord::new(format!("DNA_{}", rec.header()), dna))
        })
        .collect::<Result<Vec<_>>>()?;
    log::debug!(
        "reverse-translated {} proteins ({:?}, {})",
        records.len(),
        config.strategy,
        config.codon_usage.name()
    );
    Ok(records)
}

/// Convert FASTA protein input to FASTA DNA wrapped at 80 columns.
pub fn protein_to_dna<R: Rng + ?Sized>(
    input: &str,
    config: &ReverseTranslationConfig,
    rng: &mut R,
) -> Result<String> {
    if input.trim().is_empty() {
        return Ok(String::new());
    }
    let records = reverse_translate_records(input, config, rng)?;
    Ok(format_fasta(&records, FASTA_LINE_WIDTH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn first() -> ReverseTranslationConfig {
        ReverseTranslationConfig {
            strategy: CodonStrategy::First,
            ..ReverseTranslationConfig::default()
        }
    }

    #[test]
    fn first_strategy_is_deterministic() {
        let dna = reverse_translate("MKW", &first(), &mut rng()).unwrap();
        assert_eq!(dna, "ATGAAATGGTAA");
    }

    #[test]
    fn optimized_uses_organism_table() {
        let mut config = ReverseTranslationConfig {
            strategy: CodonStrategy::Optimized,
            include_stop_codon: false,
            ..ReverseTranslationConfig::default()
        };
        assert_eq!(reverse_translate("LR", &config, &mut rng()).unwrap(), "CTGCGG");
        config.codon_usage = CodonUsageTable::Yeast;
        assert_eq!(reverse_translate("LR", &config, &mut rng()).unwrap(), "TTGAGA");
        config.codon_usage = CodonUsageTable::Random;
        assert_eq!(reverse_translate("LR", &config, &mut rng()).unwrap(), "TTACGT");
    }

    #[test]
    fn random_choices_are_synonymous() {
        let config = ReverseTranslationConfig {
            strategy: CodonStrategy::Random,
            include_stop_codon: false,
            ..ReverseTranslationConfig::default()
        };
        let dna = reverse_translate("LLLLSSSSRRRR", &config, &mut rng()).unwrap();
        for (i, codon) in dna.as_bytes().chunks(3).enumerate() {
            let expected = b"LLLLSSSSRRRR"[i];
            assert_eq!(crate::codon::translate_codon(codon), expected);
        }
    }

    #[test]
    fn seeded_runs_repeat() {
        let config = ReverseTranslationConfig::default();
        let a = reverse_translate("MAGICKLV", &config, &mut rng()).unwrap();
        let b = reverse_translate("MAGICKLV", &config, &mut rng()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn start_codon_added_once() {
        let config = ReverseTranslationConfig {
            add_start_codon: true,
            ..first()
        };
        assert_eq!(reverse_translate("K", &config, &mut rng()).unwrap(), "ATGAAATAA");
        assert_eq!(reverse_translate("MK", &config, &mut rng()).unwrap(), "ATGAAATAA");
    }

    #[test]
    fn stop_handling() {
        assert_eq!(reverse_translate("K*", &first(), &mut rng()).unwrap(), "AAATAA");
        assert_eq!(reverse_translate("K*K", &first(), &mut rng()).unwrap(), "AAATAAAAATAA");
        let no_stop = ReverseTranslationConfig {
            include_stop_codon: false,
            ..first()
        };
        assert_eq!(reverse_translate("K*K", &no_stop, &mut rng()).unwrap(), "AAAAAA");
    }

    #[test]
    fn ambiguous_residues() {
        let skip = first();
        assert_eq!(reverse_translate("KXBK", &skip, &mut rng()).unwrap(), "AAAAAATAA");

        let keep = ReverseTranslationConfig {
            remove_ambiguous: false,
            include_stop_codon: false,
            ..first()
        };
        let dna = reverse_translate("KXK", &keep, &mut rng()).unwrap();
        assert_eq!(dna.len(), 9);
        assert!(dna.starts_with("AAA") && dna.ends_with("AAA"));
    }

    #[test]
    fn unknown_residue() {
        assert_eq!(reverse_translate("K1K", &first(), &mut rng()).unwrap(), "AAAAAATAA");
        let strict = ReverseTranslationConfig {
            remove_ambiguous: false,
            ..first()
        };
        let err = reverse_translate("K1K", &strict, &mut rng()).unwrap_err();
        assert!(err.to_string().contains("Invalid amino acid: 1"));
    }

    #[test]
    fn fasta_output() {
        let out = protein_to_dna(">p1 kinase\nmk\n", &first(), &mut rng()).unwrap();
        assert_eq!(out, ">DNA_p1 kinase\nATGAAATAA");
    }

    #[test]
    fn output_wraps() {
        let protein = "A".repeat(40);
        let out = protein_to_dna(&format!(">p\n{protein}"), &first(), &mut rng()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].len(), 80);
        assert_eq!(lines[2].len(), 43);
    }

    #[test]
    fn no_proteins_is_error() {
        let err = protein_to_dna("MKV", &first(), &mut rng()).unwrap_err();
        assert!(err.to_string().contains("No valid protein sequences found in input"));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::codon::translate_codon;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn protein() -> impl Strategy<Value = String> {
        proptest::collection::vec(proptest::sample::select(STANDARD_AMINO_ACIDS.to_vec()), 1..80)
            .prop_map(|v| String::from_utf8(v).unwrap_or_default())
    }

    fn forward(dna: &str) -> String {
        dna.as_bytes()
            .chunks_exact(3)
            .map(|c| translate_codon(c) as char)
            .collect()
    }

    proptest! {
        #[test]
        fn first_round_trip(p in protein()) {
            let config = ReverseTranslationConfig {
                strategy: CodonStrategy::First,
                include_stop_codon: false,
                ..ReverseTranslationConfig::default()
            };
            let dna = reverse_translate(&p, &config, &mut StdRng::seed_from_u64(0)).unwrap();
            prop_assert_eq!(forward(&dna), p);
        }

        #[test]
        fn every_strategy_preserves_protein(p in protein(), seed in any::<u64>()) {
            for strategy in [CodonStrategy::Optimized, CodonStrategy::Random, CodonStrategy::Balanced] {
                let config = ReverseTranslationConfig { strategy, ..ReverseTranslationConfig::default() };
                let dna = reverse_translate(&p, &config, &mut StdRng::seed_from_u64(seed)).unwrap();
                prop_assert_eq!(forward(&dna), format!("{p}*"));
            }
        }
    }
}
