//! Free text → FASTA.
//!
//! Three line layouts are understood: one bare sequence per line, `id<TAB>seq`
//! rows, and alternating label/sequence lines. Every sequence must match
//! `^[ACGTN]+$` (case-insensitive) and is written upper-cased.

use cyanea_core::{CyaneaError, Result};

use crate::alphabet::is_plain_nucleotide;
use crate::fasta::{format_fasta, SequenceRecord};

/// Layout of the input lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TextFormat {
    /// Decide from the first two lines.
    #[default]
    Auto,
    /// One sequence per line, named `seq1`, `seq2`, ...
    Plain,
    /// `id<TAB>sequence` per line.
    Tab,
    /// Label line followed by sequence line.
    Labeled,
}

/// Options for [`text_to_fasta`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextFastaConfig {
    /// Input layout (default `Auto`).
    pub format: TextFormat,
}

/// Resolve `Auto` against the given non-blank lines.
///
/// A tab in the first line means `Tab`; a non-sequence first line followed
/// by a sequence line means `Labeled`; anything else is `Plain`.
pub fn detect_text_format(lines: &[&str]) -> TextFormat {
    match lines {
        [first, ..] if first.contains('\t') => TextFormat::Tab,
        [first, second, ..]
            if !is_plain_nucleotide(first.trim()) && is_plain_nucleotide(second.trim()) =>
        {
            TextFormat::Labeled
        }
        _ => TextFormat::Plain,
    }
}

fn checked(sequence: &str) -> Result<String> {
    if !is_plain_nucleotide(sequence) {
        let shown: String = sequence.chars().take(50).collect();
        return Err(CyaneaError::InvalidInput(format!(
            "Invalid sequence characters in: {shown}..."
        )));
    }
    Ok(sequence.to_ascii_uppercase())
}

/// Parse free text into records according to `config`.
pub fn parse_text_records(input: &str, config: &TextFastaConfig) -> Result<Vec<SequenceRecord>> {
    let lines: Vec<&str> = input
        .trim()
        .lines()
        .filter(|l| !l.trim().is_empty())
        .collect();
    if lines.is_empty() {
        return Ok(Vec::new());
    }

    let format = match config.format {
        TextFormat::Auto => detect_text_format(&lines),
        other => other,
    };

    let mut records = Vec::new();
    match format {
        TextFormat::Tab => {
            for line in &lines {
                let mut parts = line.split('\t');
                let (Some(id), Some(seq)) = (parts.next(), parts.next()) else {
                    continue;
                };
                let seq = seq.trim();
                if seq.is_empty() {
                    continue;
                }
                records.push(SequenceRecord::new(id.trim(), checked(seq)?));
            }
        }
        TextFormat::Labeled => {
            for pair in lines.chunks_exact(2) {
                let seq = pair[1].trim();
                if seq.is_empty() {
                    continue;
                }
                records.push(SequenceRecord::new(pair[0].trim(), checked(seq)?));
            }
        }
        TextFormat::Plain | TextFormat::Auto => {
            for line in &lines {
                let seq = checked(line.trim())?;
                let name = format!("seq{}", records.len() + 1);
                records.push(SequenceRecord::new(name, seq));
            }
        }
    }

    if records.is_empty() {
        return Err(CyaneaError::InvalidInput(
            "No valid sequences found in input".into(),
        ));
    }
    log::debug!("parsed {} text records as {:?}", records.len(), format);
    Ok(records)
}

/// Convert free text to FASTA. Sequences are not wrapped.
pub fn text_to_fasta(input: &str, config: &TextFastaConfig) -> Result<String> {
    if input.trim().is_empty() {
        return Ok(String::new());
    }
    let records = parse_text_records(input, config)?;
    Ok(format_fasta(&records, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auto() -> TextFastaConfig {
        TextFastaConfig::default()
    }

    #[test]
    fn detects_each_layout() {
        assert_eq!(detect_text_format(&["a\tACGT"]), TextFormat::Tab);
        assert_eq!(detect_text_format(&["gene one", "ACGT"]), TextFormat::Labeled);
        assert_eq!(detect_text_format(&["ACGT", "GGCC"]), TextFormat::Plain);
        assert_eq!(detect_text_format(&["ACGT"]), TextFormat::Plain);
    }

    #[test]
    fn plain_lines_get_synthetic_ids() {
        let out = text_to_fasta("acgt\n\nGGNN\n", &auto()).unwrap();
        assert_eq!(out, ">seq1\nACGT\n>seq2\nGGNN");
    }

    #[test]
    fn tab_separated() {
        let out = text_to_fasta("g1\tacgt\n>g2\tTTTT\nno_tab_here\n", &auto()).unwrap();
        assert_eq!(out, ">g1\nACGT\n>g2\nTTTT");
    }

    #[test]
    fn labeled_pairs() {
        let out = text_to_fasta("first gene\nACGT\nsecond\nGG\norphan", &auto()).unwrap();
        assert_eq!(out, ">first gene\nACGT\n>second\nGG");
    }

    #[test]
    fn explicit_format_overrides_detection() {
        let cfg = TextFastaConfig {
            format: TextFormat::Labeled,
        };
        let out = text_to_fasta("ACGT\nGGCC", &cfg).unwrap();
        assert_eq!(out, ">ACGT\nGGCC");
    }

    #[test]
    fn invalid_characters_fail_whole_input() {
        let err = text_to_fasta("ACGT\nACGU", &auto()).unwrap_err();
        assert!(err.to_string().contains("Invalid sequence characters in: ACGU..."));
    }

    #[test]
    fn long_invalid_sequence_truncated_in_error() {
        let bad = format!("{}X", "A".repeat(60));
        let err = text_to_fasta(&bad, &auto()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(&format!("{}...", "A".repeat(50))));
        assert!(!msg.contains('X'));
    }

    #[test]
    fn tab_rows_without_sequence_yield_nothing() {
        let err = text_to_fasta("a\t\nb\t  ", &auto()).unwrap_err();
        assert!(err.to_string().contains("No valid sequences found in input"));
    }

    #[test]
    fn blank_input_is_empty_output() {
        assert_eq!(text_to_fasta("\n  \n", &auto()).unwrap(), "");
    }
}
