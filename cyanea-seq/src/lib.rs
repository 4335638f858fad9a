//! Sequence conversion and translation for the Cyanea format converters.
//!
//! Every conversion is a pure function from input text plus a typed config
//! to output text:
//!
//! - **FASTA**: [`SequenceRecord`], [`parse_fasta_text`], [`format_fasta`]
//! - **FASTQ → FASTA**: [`fastq_to_fasta`]
//! - **Free text → FASTA**: [`text_to_fasta`] with [`TextFormat`] detection
//! - **Translation**: [`dna_to_protein`], six frames, [`find_orfs`]
//! - **Reverse translation**: [`protein_to_dna`] with [`CodonStrategy`] and
//!   [`CodonUsageTable`], driven by a caller-supplied RNG
//!
//! # Example
//!
//! ```
//! use cyanea_seq::{dna_to_protein, protein_to_dna, FrameSelection, Frame};
//! use cyanea_seq::{CodonStrategy, ReverseTranslationConfig, TranslationConfig};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let config = TranslationConfig {
//!     reading_frame: FrameSelection::Single(Frame::new(1).unwrap()),
//!     ..TranslationConfig::default()
//! };
//! let protein = dna_to_protein(">gene\nATGAAATAA", &config).unwrap();
//! assert_eq!(protein, ">Frame1_gene\n# Reading frame: +1, Length: 3 aa\nMK-");
//!
//! let config = ReverseTranslationConfig {
//!     strategy: CodonStrategy::First,
//!     ..ReverseTranslationConfig::default()
//! };
//! let mut rng = StdRng::seed_from_u64(7);
//! let dna = protein_to_dna(">p\nMK", &config, &mut rng).unwrap();
//! assert_eq!(dna, ">DNA_p\nATGAAATAA");
//! ```

pub mod alphabet;
pub mod codon;
pub mod fasta;
pub mod fastq;
pub mod orf;
pub mod reverse;
pub mod text;
pub mod translate;

pub use alphabet::{is_plain_nucleotide, Alphabet};

pub use codon::{synonymous_codons, translate_codon, CodonUsageTable};

pub use fasta::{
    format_fasta, parse_fasta_file, parse_fasta_text, wrap, SequenceRecord, FASTA_LINE_WIDTH,
};

pub use fastq::{fastq_to_fasta, parse_fastq_file, parse_fastq_text, FastqRecord};

pub use text::{detect_text_format, text_to_fasta, TextFastaConfig, TextFormat};

pub use translate::{
    dna_to_protein, reverse_complement, translate_frame, translate_frames, translate_records,
    Frame, FrameSelection, ReadingFrameResult, Strand, TranslationConfig, TranslationRecord,
};

pub use orf::{find_orfs, find_orfs_in_frame, Orf};

pub use reverse::{
    protein_to_dna, reverse_translate, reverse_translate_records, select_codon, CodonStrategy,
    ReverseTranslationConfig,
};
