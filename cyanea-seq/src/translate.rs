//! Six-frame DNA → protein translation.
//!
//! Translation never stops at a stop codon: stops are written as `-` (or `*`
//! when requested) and the frame continues to its last complete triplet.
//! Negative frames are read from the reverse complement.

use std::fmt;

use cyanea_core::{CyaneaError, Result};

use crate::codon::translate_codon;
use crate::fasta::{parse_fasta_text, wrap, SequenceRecord, FASTA_LINE_WIDTH};
use crate::orf::find_orfs;

// ---------------------------------------------------------------------------
// Reverse complement
// ---------------------------------------------------------------------------

fn complement_base(b: u8) -> u8 {
    let c = match b.to_ascii_uppercase() {
        b'A' => b'T',
        b'T' => b'A',
        b'G' => b'C',
        b'C' => b'G',
        b'R' => b'Y',
        b'Y' => b'R',
        b'M' => b'K',
        b'K' => b'M',
        b'B' => b'V',
        b'V' => b'B',
        b'D' => b'H',
        b'H' => b'D',
        // N, S, W complement to themselves; anything else passes through.
        _ => return b,
    };
    if b.is_ascii_lowercase() {
        c.to_ascii_lowercase()
    } else {
        c
    }
}

/// Reverse complement of a nucleotide string, IUPAC-aware.
///
/// Characters outside the IUPAC DNA set are reversed but left unchanged.
pub fn reverse_complement(seq: &str) -> String {
    seq.chars()
        .rev()
        .map(|c| if c.is_ascii() { complement_base(c as u8) as char } else { c })
        .collect()
}

// ---------------------------------------------------------------------------
// Frames
// ---------------------------------------------------------------------------

/// Which strand a frame or ORF was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    pub fn name(self) -> &'static str {
        match self {
            Strand::Forward => "forward",
            Strand::Reverse => "reverse",
        }
    }
}

/// A reading frame: ±1, ±2 or ±3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "i8", into = "i8"))]
pub struct Frame(i8);

impl Frame {
    /// All six frames in scan order: +1, −1, +2, −2, +3, −3.
    pub const ALL: [Frame; 6] = [
        Frame(1),
        Frame(-1),
        Frame(2),
        Frame(-2),
        Frame(3),
        Frame(-3),
    ];

    pub fn new(n: i8) -> Result<Frame> {
        match n {
            1..=3 | -3..=-1 => Ok(Frame(n)),
            _ => Err(CyaneaError::InvalidInput(format!(
                "reading frame must be one of ±1, ±2, ±3, got {n}"
            ))),
        }
    }

    pub fn number(self) -> i8 {
        self.0
    }

    /// 0-based offset of the first codon on the strand being read.
    pub fn offset(self) -> usize {
        usize::from(self.0.unsigned_abs()) - 1
    }

    pub fn strand(self) -> Strand {
        if self.0 < 0 {
            Strand::Reverse
        } else {
            Strand::Forward
        }
    }
}

impl TryFrom<i8> for Frame {
    type Error = CyaneaError;

    fn try_from(n: i8) -> Result<Frame> {
        Frame::new(n)
    }
}

impl From<Frame> for i8 {
    fn from(f: Frame) -> i8 {
        f.0
    }
}

/// Plain number, no `+` on forward frames.
impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Frames to translate when ORF search is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrameSelection {
    /// All six frames.
    #[default]
    All,
    Single(Frame),
}

impl FrameSelection {
    pub fn frames(self) -> Vec<Frame> {
        match self {
            FrameSelection::All => Frame::ALL.to_vec(),
            FrameSelection::Single(f) => vec![f],
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Options for [`dna_to_protein`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TranslationConfig {
    /// Frames to translate in frame mode (default `All`).
    pub reading_frame: FrameSelection,
    /// Write stops as `*` instead of `-` (default false).
    pub include_stop_codons: bool,
    /// Minimum ORF length in residues (default 20).
    pub min_protein_length: usize,
    /// Report ORFs instead of whole frames (default false).
    pub find_orfs: bool,
    /// Rewrite `U` to `T` before translating (default false).
    pub treat_t_as_u: bool,
    /// Fill [`ReadingFrameResult::positions`] (default false).
    pub show_positions: bool,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            reading_frame: FrameSelection::All,
            include_stop_codons: false,
            min_protein_length: 20,
            find_orfs: false,
            treat_t_as_u: false,
            show_positions: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Frame translation
// ---------------------------------------------------------------------------

/// One translated reading frame.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadingFrameResult {
    pub frame: Frame,
    pub protein: String,
    /// 1-based position of the first codon on the strand that was read.
    pub start: usize,
    /// 1-based start of every codon, when requested.
    pub positions: Option<Vec<usize>>,
}

/// Upper-case and, if configured, turn RNA into DNA.
pub fn normalize_nucleotides(seq: &str, treat_t_as_u: bool) -> String {
    let upper = seq.to_ascii_uppercase();
    if treat_t_as_u {
        upper.replace('U', "T")
    } else {
        upper
    }
}

/// Translate a normalized sequence in one frame.
pub fn translate_frame(seq: &str, frame: Frame, include_stop_codons: bool) -> ReadingFrameResult {
    translate_frame_inner(seq, frame, include_stop_codons, false)
}

fn translate_frame_inner(
    seq: &str,
    frame: Frame,
    include_stop_codons: bool,
    with_positions: bool,
) -> ReadingFrameResult {
    let strand = match frame.strand() {
        Strand::Forward => seq.to_string(),
        Strand::Reverse => reverse_complement(seq),
    };
    let bytes = strand.as_bytes();
    let offset = frame.offset();
    let stop = if include_stop_codons { '*' } else { '-' };

    let mut protein = String::with_capacity(bytes.len() / 3 + 1);
    let mut positions = with_positions.then(Vec::new);
    let mut i = offset;
    while i + 3 <= bytes.len() {
        let aa = translate_codon(&bytes[i..i + 3]);
        protein.push(if aa == b'*' { stop } else { aa as char });
        if let Some(p) = positions.as_mut() {
            p.push(i + 1);
        }
        i += 3;
    }

    ReadingFrameResult {
        frame,
        protein,
        start: offset + 1,
        positions,
    }
}

/// Translate `seq` in every frame `config.reading_frame` selects.
///
/// Frames that yield no residues are still returned.
pub fn translate_frames(seq: &str, config: &TranslationConfig) -> Vec<ReadingFrameResult> {
    let seq = normalize_nucleotides(seq, config.treat_t_as_u);
    config
        .reading_frame
        .frames()
        .into_iter()
        .map(|f| translate_frame_inner(&seq, f, config.include_stop_codons, config.show_positions))
        .collect()
}

// ---------------------------------------------------------------------------
// Output assembly
// ---------------------------------------------------------------------------

/// One output record: header (no `>`), a `#` info line, and a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TranslationRecord {
    pub header: String,
    pub info: String,
    pub sequence: String,
}

impl TranslationRecord {
    fn write_to(&self, out: &mut String) {
        out.push('>');
        out.push_str(&self.header);
        out.push('\n');
        if !self.info.is_empty() {
            out.push_str("# ");
            out.push_str(&self.info);
            out.push('\n');
        }
        for line in wrap(&self.sequence, FASTA_LINE_WIDTH) {
            out.push_str(line);
            out.push('\n');
        }
    }
}

fn frame_records(rec: &SequenceRecord, config: &TranslationConfig) -> Vec<TranslationRecord> {
    let all = config.reading_frame == FrameSelection::All;
    translate_frames(rec.sequence(), config)
        .into_iter()
        .filter(|r| !all || !r.protein.is_empty())
        .map(|r| {
            let sign = if r.frame.number() > 0 { "+" } else { "" };
            TranslationRecord {
                header: format!("Frame{}_{}", r.frame, rec.header()),
                info: format!(
                    "Reading frame: {sign}{}, Length: {} aa",
                    r.frame,
                    r.protein.len()
                ),
                sequence: r.protein,
            }
        })
        .collect()
}

fn orf_records(rec: &SequenceRecord, config: &TranslationConfig) -> Vec<TranslationRecord> {
    let seq = normalize_nucleotides(rec.sequence(), config.treat_t_as_u);
    let orfs = find_orfs(&seq, config.min_protein_length);
    if orfs.is_empty() {
        return vec![TranslationRecord {
            header: format!("No_ORFs_found_{}", rec.header()),
            info: "No ORFs found meeting minimum length criteria".into(),
            sequence: String::new(),
        }];
    }
    orfs.into_iter()
        .enumerate()
        .map(|(k, orf)| TranslationRecord {
            header: format!("ORF{}_frame{}_{}", k + 1, orf.frame, rec.header()),
            info: format!(
                "Frame: {}, Strand: {}, Length: {} aa, Pos: {}-{}",
                orf.frame,
                orf.strand.name(),
                orf.len(),
                orf.start,
                orf.end
            ),
            sequence: orf.protein,
        })
        .collect()
}

/// Translate every FASTA record in `input` into output records.
pub fn translate_records(input: &str, config: &TranslationConfig) -> Result<Vec<TranslationRecord>> {
    let sequences = parse_fasta_text(input);
    if sequences.is_empty() {
        return Err(CyaneaError::InvalidInput(
            "No valid DNA sequences found in input".into(),
        ));
    }
    let records: Vec<TranslationRecord> = sequences
        .iter()
        .flat_map(|rec| {
            if config.find_orfs {
                orf_records(rec, config)
            } else {
                frame_records(rec, config)
            }
        })
        .collect();
    log::debug!(
        "translated {} sequences into {} records",
        sequences.len(),
        records.len()
    );
    Ok(records)
}

/// Translate FASTA DNA/RNA input to protein FASTA text.
///
/// Each record is written as its header, a `# ` info line, and the protein
/// wrapped at 80 columns.
pub fn dna_to_protein(input: &str, config: &TranslationConfig) -> Result<String> {
    if input.trim().is_empty() {
        return Ok(String::new());
    }
    let mut out = String::new();
    for rec in translate_records(input, config)? {
        rec.write_to(&mut out);
    }
    Ok(out.trim().to_string())
}
