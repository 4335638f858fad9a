//! PDB to FASTA: one protein sequence per chain.

use std::collections::BTreeMap;

use cyanea_core::{CyaneaError, Result, Warnings};
use cyanea_seq::{format_fasta, Alphabet, SequenceRecord, FASTA_LINE_WIDTH};

use crate::pdb::{parse_pdb, PdbFile};
use crate::types::ChainSelection;

/// Options for [`pdb_to_fasta`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PdbFastaConfig {
    /// Chains to extract (default all).
    pub chains: ChainSelection,
    /// Include HETATM residues, writing unknown ones as `X` (default false).
    pub include_het: bool,
}

/// One-letter code for a residue name, including common modified residues.
pub fn three_to_one(res_name: &str) -> Option<char> {
    let code = match res_name {
        "ALA" => 'A',
        "ARG" => 'R',
        "ASN" => 'N',
        "ASP" => 'D',
        "CYS" => 'C',
        "GLU" => 'E',
        "GLN" => 'Q',
        "GLY" => 'G',
        "HIS" => 'H',
        "ILE" => 'I',
        "LEU" => 'L',
        "LYS" => 'K',
        "MET" => 'M',
        "PHE" => 'F',
        "PRO" => 'P',
        "SER" => 'S',
        "THR" => 'T',
        "TRP" => 'W',
        "TYR" => 'Y',
        "VAL" => 'V',
        "SEC" => 'U',
        "PYL" => 'O',
        "MSE" => 'M',
        "SEP" => 'S',
        "TPO" => 'T',
        "PTR" | "TYS" => 'Y',
        _ => return None,
    };
    Some(code)
}

/// Per-chain protein sequences plus any unknown-residue warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainSequences {
    pub records: Vec<SequenceRecord>,
    pub warnings: Warnings,
}

/// Extract one sequence record per selected chain.
///
/// Residues come from CA atoms of ATOM records, plus every HETATM residue
/// when `include_het` is set, ordered by residue number. Records are emitted
/// in sorted chain order, or in the requested order for a specific selection.
///
/// # Errors
///
/// Fails when the file has no usable chains, when none of the requested
/// chains exist, or when no selected chain yields a residue.
pub fn chain_sequences(pdb: &PdbFile, config: &PdbFastaConfig) -> Result<ChainSequences> {
    let s = &pdb.structure;
    let mut chains: BTreeMap<char, BTreeMap<i32, &str>> = BTreeMap::new();
    for atom in &s.atoms {
        let wanted = if atom.is_hetatm {
            config.include_het
        } else {
            atom.is_alpha_carbon()
        };
        if !wanted {
            continue;
        }
        let residue = s.residue_of(atom);
        chains
            .entry(s.chain_id_of(atom))
            .or_default()
            .entry(residue.seq_num)
            .or_insert(residue.name.as_str());
    }

    if chains.is_empty() {
        return Err(CyaneaError::InvalidInput(
            "No valid protein chains found in PDB file".into(),
        ));
    }
    let available: Vec<char> = chains.keys().copied().collect();

    let selected: Vec<char> = match &config.chains {
        ChainSelection::All => available.clone(),
        ChainSelection::Specific(ids) => {
            let found: Vec<char> = ids.iter().copied().filter(|c| chains.contains_key(c)).collect();
            if found.is_empty() {
                let requested: Vec<String> = ids.iter().map(char::to_string).collect();
                let available: Vec<String> = available.iter().map(char::to_string).collect();
                return Err(CyaneaError::InvalidInput(format!(
                    "None of the specified chains ({}) were found in the PDB file. Available chains: {}",
                    requested.join(","),
                    available.join(", ")
                )));
            }
            found
        }
    };

    let mut records = Vec::new();
    let mut warnings = Warnings::new();
    for chain_id in selected {
        let Some(residues) = chains.get(&chain_id) else {
            continue;
        };
        let mut sequence = String::with_capacity(residues.len());
        let mut unknown = 0usize;
        for (seq_num, name) in residues {
            match three_to_one(name) {
                Some(code) => sequence.push(code),
                None if config.include_het => {
                    sequence.push('X');
                    unknown += 1;
                    warnings.push(format!(
                        "Unknown residue {name} {seq_num} in chain {chain_id} written as X"
                    ));
                }
                None => {}
            }
        }
        if sequence.is_empty() {
            continue;
        }

        let title = pdb
            .chain_title(chain_id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Chain {chain_id}"));
        let mut header = format!("{chain_id}|{title}");
        if unknown > 0 {
            header.push_str(&format!(" | {unknown} unknown residues as X"));
        }
        records.push(SequenceRecord::with_alphabet(header, sequence, Alphabet::Protein));
    }

    if records.is_empty() {
        return Err(CyaneaError::InvalidInput(
            "No valid amino acid sequences could be extracted from the selected chains".into(),
        ));
    }
    Ok(ChainSequences { records, warnings })
}

/// Convert PDB text to FASTA, wrapping sequences at 80 columns.
pub fn pdb_to_fasta(input: &str, config: &PdbFastaConfig) -> Result<String> {
    if input.trim().is_empty() {
        return Ok(String::new());
    }
    let pdb = parse_pdb(input);
    let out = chain_sequences(&pdb, config)?;
    log::debug!("PDB to FASTA: {} chain(s)", out.records.len());
    Ok(format_fasta(&out.records, FASTA_LINE_WIDTH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::atom_line;

    fn two_chains() -> String {
        let mut lines = vec![
            "COMPND   2 MOLECULE: HEMOGLOBIN ALPHA;".to_string(),
            "COMPND   3 CHAIN: A;".into(),
        ];
        // Chain A written out of order: residues 2 then 1.
        lines.push(atom_line("ATOM", 1, " N  ", "GLY", 'A', 2, [0.0; 3], "N"));
        lines.push(atom_line("ATOM", 2, " CA ", "GLY", 'A', 2, [1.0, 0.0, 0.0], "C"));
        lines.push(atom_line("ATOM", 3, " CA ", "MET", 'A', 1, [2.0, 0.0, 0.0], "C"));
        lines.push(atom_line("ATOM", 4, " CA ", "LYS", 'B', 1, [3.0, 0.0, 0.0], "C"));
        lines.push(atom_line("HETATM", 5, " CA ", "MSE", 'B', 2, [4.0, 0.0, 0.0], "C"));
        lines.push(atom_line("HETATM", 6, " FE ", "HEM", 'B', 3, [5.0, 0.0, 0.0], "FE"));
        lines.join("\n")
    }

    #[test]
    fn residues_sorted_and_titled() {
        let fasta = pdb_to_fasta(&two_chains(), &PdbFastaConfig::default()).unwrap();
        assert_eq!(fasta, ">A|HEMOGLOBIN ALPHA\nMG\n>B|Chain B\nK");
    }

    #[test]
    fn het_residues_and_unknowns() {
        let config = PdbFastaConfig {
            include_het: true,
            ..PdbFastaConfig::default()
        };
        let pdb = parse_pdb(&two_chains());
        let out = chain_sequences(&pdb, &config).unwrap();
        assert_eq!(out.records[1].header(), "B|Chain B | 1 unknown residues as X");
        assert_eq!(out.records[1].sequence(), "KMX");
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings.mentions("HEM"));
    }

    #[test]
    fn specific_chain_selection() {
        let config = PdbFastaConfig {
            chains: ChainSelection::from_list("b"),
            ..PdbFastaConfig::default()
        };
        let fasta = pdb_to_fasta(&two_chains(), &config).unwrap();
        assert_eq!(fasta, ">B|Chain B\nK");
    }

    #[test]
    fn missing_chains_list_available() {
        let config = PdbFastaConfig {
            chains: ChainSelection::from_list("X,Y"),
            ..PdbFastaConfig::default()
        };
        let err = pdb_to_fasta(&two_chains(), &config).unwrap_err().to_string();
        assert!(err.contains("None of the specified chains (X,Y)"));
        assert!(err.contains("Available chains: A, B"));
    }

    #[test]
    fn no_chains() {
        let err = pdb_to_fasta("HEADER    EMPTY\n", &PdbFastaConfig::default()).unwrap_err();
        assert!(err.to_string().contains("No valid protein chains found in PDB file"));
        assert_eq!(pdb_to_fasta("", &PdbFastaConfig::default()).unwrap(), "");
    }

    #[test]
    fn only_unknown_residues() {
        let input = atom_line("ATOM", 1, " CA ", "UNK", 'A', 1, [0.0; 3], "C");
        let err = pdb_to_fasta(&input, &PdbFastaConfig::default()).unwrap_err();
        assert!(err.to_string().contains("No valid amino acid sequences"));
    }

    #[test]
    fn long_chain_wraps_at_80() {
        let lines: Vec<String> = (1..=100)
            .map(|i| atom_line("ATOM", i as u32, " CA ", "ALA", 'A', i, [i as f64, 0.0, 0.0], "C"))
            .collect();
        let fasta = pdb_to_fasta(&lines.join("\n"), &PdbFastaConfig::default()).unwrap();
        let body: Vec<&str> = fasta.lines().skip(1).collect();
        assert_eq!(body.len(), 2);
        assert_eq!(body[0].len(), 80);
        assert_eq!(body[1].len(), 20);
    }

    #[test]
    fn modified_residue_codes() {
        assert_eq!(three_to_one("SEC"), Some('U'));
        assert_eq!(three_to_one("PYL"), Some('O'));
        assert_eq!(three_to_one("TYS"), Some('Y'));
        assert_eq!(three_to_one("HOH"), None);
    }
}
