//! FASTA records: reading, writing, and line wrapping.

use std::path::Path;

use cyanea_core::{Annotated, Result, Sequence, Summarizable};

use crate::alphabet::Alphabet;

/// Residues per line when writing FASTA.
pub const FASTA_LINE_WIDTH: usize = 80;

/// One FASTA/FASTQ/plain-text sequence record.
///
/// The header is stored without its leading `>`; the sequence never holds
/// whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequenceRecord {
    header: String,
    sequence: String,
    alphabet: Alphabet,
}

impl SequenceRecord {
    /// Create a record, stripping any leading `>` from the header and any
    /// whitespace from the sequence. The alphabet is detected from the residues.
    pub fn new(header: impl Into<String>, sequence: impl AsRef<str>) -> Self {
        let sequence: String = sequence
            .as_ref()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let alphabet = Alphabet::detect(sequence.as_bytes());
        Self::with_alphabet(header, sequence, alphabet)
    }

    /// Create a record with an explicit alphabet.
    pub fn with_alphabet(header: impl Into<String>, sequence: String, alphabet: Alphabet) -> Self {
        let header = header.into();
        let header = match header.strip_prefix('>') {
            Some(rest) => rest.to_string(),
            None => header,
        };
        SequenceRecord {
            header,
            sequence,
            alphabet,
        }
    }

    /// Header text without the `>`.
    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// Render as FASTA, wrapping the sequence at `width` columns (0 = no wrap).
    pub fn to_fasta(&self, width: usize) -> String {
        let mut out = String::with_capacity(self.header.len() + self.sequence.len() + 8);
        out.push('>');
        out.push_str(&self.header);
        for line in wrap(&self.sequence, width) {
            out.push('\n');
            out.push_str(line);
        }
        out
    }
}

impl Sequence for SequenceRecord {
    fn as_bytes(&self) -> &[u8] {
        self.sequence.as_bytes()
    }
}

impl Annotated for SequenceRecord {
    /// The identifier: the header up to the first whitespace.
    fn name(&self) -> &str {
        self.header.split_whitespace().next().unwrap_or("")
    }

    fn description(&self) -> Option<&str> {
        self.header
            .trim_start()
            .split_once(char::is_whitespace)
            .map(|(_, rest)| rest.trim())
            .filter(|d| !d.is_empty())
    }
}

impl Summarizable for SequenceRecord {
    fn summary(&self) -> String {
        let unit = match self.alphabet {
            Alphabet::Nucleotide => "bp",
            Alphabet::Protein => "aa",
        };
        format!("{} ({} {})", self.name(), self.sequence.len(), unit)
    }
}

/// Split `seq` into chunks of at most `width` characters (0 = one chunk).
pub fn wrap(seq: &str, width: usize) -> impl Iterator<Item = &str> {
    let width = if width == 0 { seq.len().max(1) } else { width };
    let mut rest = seq;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let mut cut = width.min(rest.len());
        while !rest.is_char_boundary(cut) {
            cut += 1;
        }
        let (head, tail) = rest.split_at(cut);
        rest = tail;
        Some(head)
    })
}

/// Parse FASTA text into records.
///
/// Blank lines are skipped and whitespace inside sequence lines is removed.
/// Lines before the first header, and headers with no sequence, are dropped.
pub fn parse_fasta_text(text: &str) -> Vec<SequenceRecord> {
    let mut records = Vec::new();
    let mut header: Option<&str> = None;
    let mut sequence = String::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('>') {
            if let Some(h) = header.take() {
                if !sequence.is_empty() {
                    records.push(SequenceRecord::new(h, &sequence));
                }
            }
            header = Some(line);
            sequence.clear();
        } else {
            sequence.extend(line.chars().filter(|c| !c.is_whitespace()));
        }
    }
    if let Some(h) = header {
        if !sequence.is_empty() {
            records.push(SequenceRecord::new(h, &sequence));
        }
    }

    records
}

/// Read and parse a FASTA file.
pub fn parse_fasta_file(path: impl AsRef<Path>) -> Result<Vec<SequenceRecord>> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_fasta_text(&text))
}

/// Write records as FASTA, one after another, without a trailing newline.
pub fn format_fasta(records: &[SequenceRecord], width: usize) -> String {
    records
        .iter()
        .map(|r| r.to_fasta(width))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parse_multi_record() {
        let text = ">seq1 first\nACGT\nAC GT\n\n>seq2\nMKV\n";
        let recs = parse_fasta_text(text);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].header(), "seq1 first");
        assert_eq!(recs[0].sequence(), "ACGTACGT");
        assert_eq!(recs[0].alphabet(), Alphabet::Nucleotide);
        assert_eq!(recs[1].alphabet(), Alphabet::Protein);
        assert_eq!(recs[0].name(), "seq1");
        assert_eq!(recs[0].description(), Some("first"));
    }

    #[test]
    fn header_without_sequence_dropped() {
        let recs = parse_fasta_text(">empty\n>full\nACGT\n");
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].header(), "full");
    }

    #[test]
    fn lines_before_header_ignored() {
        let recs = parse_fasta_text("ACGT\n>a\nGG\n");
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].sequence(), "GG");
    }

    #[test]
    fn wraps_at_width() {
        let rec = SequenceRecord::new(">x", "A".repeat(170));
        let fasta = rec.to_fasta(FASTA_LINE_WIDTH);
        let lines: Vec<&str> = fasta.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], ">x");
        assert_eq!(lines[1].len(), 80);
        assert_eq!(lines[2].len(), 80);
        assert_eq!(lines[3].len(), 10);
    }

    #[test]
    fn zero_width_does_not_wrap() {
        let rec = SequenceRecord::new("x", "ACGT".repeat(50));
        assert_eq!(rec.to_fasta(0).lines().count(), 2);
    }

    #[test]
    fn format_joins_records() {
        let recs = vec![SequenceRecord::new("a", "AC"), SequenceRecord::new("b", "GT")];
        assert_eq!(format_fasta(&recs, 80), ">a\nAC\n>b\nGT");
    }

    #[test]
    fn summary_reports_length() {
        let rec = SequenceRecord::new("gene1 putative", "ATGAAA");
        assert_eq!(rec.summary(), "gene1 (6 bp)");
        assert_eq!(rec.len(), 6);
    }

    #[test]
    fn read_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, ">seq1").unwrap();
        writeln!(file, "ATCGATCG").unwrap();
        writeln!(file, ">seq2").unwrap();
        writeln!(file, "GCGCGCGC").unwrap();
        file.flush().unwrap();

        let recs = parse_fasta_file(file.path()).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[1].sequence(), "GCGCGCGC");
    }
}
