//! FASTQ record parsing and FASTQ → FASTA conversion.
//!
//! Records are strict 4-line frames: `@header`, sequence, `+[id]`, quality.
//! A prefix violation anywhere fails the whole input, since partial output
//! would be misleading. A trailing partial frame (fewer than four lines) is
//! dropped silently.

use std::path::Path;

use cyanea_core::{Annotated, CyaneaError, Result, Sequence, Summarizable};

use crate::fasta::{format_fasta, SequenceRecord};

/// A single FASTQ record. Quality is kept verbatim and never decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FastqRecord {
    header: String,
    sequence: String,
    quality: String,
}

impl FastqRecord {
    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn quality(&self) -> &str {
        &self.quality
    }

    /// Drop the quality line, keeping header and sequence as-is.
    pub fn into_fasta_record(self) -> SequenceRecord {
        SequenceRecord::new(self.header, self.sequence)
    }
}

impl Sequence for FastqRecord {
    fn as_bytes(&self) -> &[u8] {
        self.sequence.as_bytes()
    }
}

impl Annotated for FastqRecord {
    fn name(&self) -> &str {
        self.header.split_whitespace().next().unwrap_or("")
    }

    fn description(&self) -> Option<&str> {
        self.header
            .split_once(char::is_whitespace)
            .map(|(_, rest)| rest.trim())
            .filter(|d| !d.is_empty())
    }
}

impl Summarizable for FastqRecord {
    fn summary(&self) -> String {
        format!("FASTQ {} ({} bp)", self.name(), self.sequence.len())
    }
}

/// Parse FASTQ text into records.
///
/// Line numbers in errors are 1-based and count from the first line of the
/// trimmed input.
pub fn parse_fastq_text(text: &str) -> Result<Vec<FastqRecord>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let lines: Vec<&str> = text
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect();

    let mut records = Vec::with_capacity(lines.len() / 4);
    for (i, frame) in lines.chunks(4).enumerate() {
        let [header, sequence, plus, quality] = frame else {
            log::debug!("dropping partial FASTQ record of {} lines", frame.len());
            break;
        };
        let first = i * 4;
        let Some(header) = header.strip_prefix('@') else {
            return Err(CyaneaError::format(
                first + 1,
                format!("Header at line {} should start with '@'", first + 1),
            ));
        };
        if !plus.starts_with('+') {
            return Err(CyaneaError::format(
                first + 3,
                format!("Plus line at line {} should start with '+'", first + 3),
            ));
        }
        records.push(FastqRecord {
            header: header.to_string(),
            sequence: sequence.to_string(),
            quality: quality.to_string(),
        });
    }
    Ok(records)
}

/// Read and parse a FASTQ file.
pub fn parse_fastq_file(path: impl AsRef<Path>) -> Result<Vec<FastqRecord>> {
    let text = std::fs::read_to_string(path)?;
    parse_fastq_text(&text)
}

/// Convert FASTQ text to FASTA, one `>header` / sequence pair per record.
///
/// Sequences are written on a single line, exactly as they appeared.
pub fn fastq_to_fasta(input: &str) -> Result<String> {
    let records: Vec<SequenceRecord> = parse_fastq_text(input)?
        .into_iter()
        .map(FastqRecord::into_fasta_record)
        .collect();
    log::debug!("converted {} FASTQ records", records.len());
    Ok(format_fasta(&records, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TWO: &str = "@read1 sample\nACGT\n+\nIIII\n@read2\nGGCC\n+read2\n!!!!\n";

    #[test]
    fn converts_records_in_order() {
        let fasta = fastq_to_fasta(TWO).unwrap();
        assert_eq!(fasta, ">read1 sample\nACGT\n>read2\nGGCC");
    }

    #[test]
    fn parsed_fields() {
        let recs = parse_fastq_text(TWO).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].name(), "read1");
        assert_eq!(recs[0].description(), Some("sample"));
        assert_eq!(recs[1].quality(), "!!!!");
    }

    #[test]
    fn partial_trailing_record_dropped() {
        let input = format!("{TWO}@read3\nAC\n+");
        let recs = parse_fastq_text(&input).unwrap();
        assert_eq!(recs.len(), 2);
    }

    #[test]
    fn bad_header_names_line() {
        let input = "@ok\nAC\n+\nII\nbad\nAC\n+\nII";
        let err = parse_fastq_text(input).unwrap_err();
        assert_eq!(err.line(), Some(5));
        assert!(err.to_string().contains("Header at line 5 should start with '@'"));
    }

    #[test]
    fn bad_plus_line_names_line() {
        let err = fastq_to_fasta("@r\nACGT\n-\nIIII").unwrap_err();
        assert_eq!(err.line(), Some(3));
        assert!(err.to_string().contains("Plus line at line 3"));
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert_eq!(fastq_to_fasta("  \n ").unwrap(), "");
    }

    #[test]
    fn crlf_line_endings() {
        let fasta = fastq_to_fasta("@r1\r\nACGT\r\n+\r\nIIII\r\n").unwrap();
        assert_eq!(fasta, ">r1\nACGT");
    }

    #[test]
    fn read_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{TWO}").unwrap();
        file.flush().unwrap();
        let recs = parse_fastq_file(file.path()).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[1].summary(), "FASTQ read2 (4 bp)");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn fastq_record() -> impl Strategy<Value = (String, String)> {
        ("[A-Za-z0-9_]{1,12}", "[ACGTN]{1,40}")
    }

    proptest! {
        #[test]
        fn record_count_and_headers_preserved(recs in proptest::collection::vec(fastq_record(), 1..20)) {
            let mut input = String::new();
            for (id, seq) in &recs {
                input.push_str(&format!("@{id}\n{seq}\n+\n{}\n", "I".repeat(seq.len())));
            }
            let fasta = fastq_to_fasta(&input).unwrap();
            let lines: Vec<&str> = fasta.lines().collect();
            prop_assert_eq!(lines.len(), recs.len() * 2);
            for (i, (id, seq)) in recs.iter().enumerate() {
                prop_assert_eq!(lines[2 * i], format!(">{id}"));
                prop_assert_eq!(lines[2 * i + 1], seq.as_str());
            }
        }

        #[test]
        fn never_panics(s in "\\PC{0,200}") {
            let _ = parse_fastq_text(&s);
        }
    }
}
