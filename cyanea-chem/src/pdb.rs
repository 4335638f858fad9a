//! SDF to PDB: each molecule becomes a HETATM-only PDB fragment.

use std::collections::BTreeMap;
use std::io::Write;

use cyanea_core::{write_to_string, CyaneaError, Result};

use crate::molecule::Molecule;
use crate::sdf::parse_sdf;

/// Largest serial that fits the five-column PDB serial field.
pub const MAX_PDB_SERIAL: usize = 99_999;

/// Bonded partners per CONECT line.
pub const CONECT_PER_LINE: usize = 4;

/// Options for [`sdf_to_pdb`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SdfToPdbConfig {
    /// Write HEADER, TITLE, COMPND, AUTHOR and property REMARKs (default true).
    pub include_header: bool,
    /// Write CONECT records from the bond list (default true).
    pub include_connect: bool,
    /// Chain identifier for every atom (default `A`).
    pub chain_id: char,
    /// Residue name, at most three characters (default `UNL`).
    pub residue_name: String,
    /// Write formal charges in columns 79-80 (default true).
    pub preserve_charges: bool,
    /// HEADER deposition date, e.g. `18-OCT-26` (default none, written blank).
    pub date: Option<String>,
}

impl Default for SdfToPdbConfig {
    fn default() -> Self {
        SdfToPdbConfig {
            include_header: true,
            include_connect: true,
            chain_id: 'A',
            residue_name: "UNL".to_string(),
            preserve_charges: true,
            date: None,
        }
    }
}

/// Convert SDF text to PDB text.
///
/// # Errors
///
/// Propagates [`parse_sdf`] errors, and fails when no molecule survives.
pub fn sdf_to_pdb(input: &str, config: &SdfToPdbConfig) -> Result<String> {
    if input.trim().is_empty() {
        return Ok(String::new());
    }
    let sdf = parse_sdf(input)?;
    if sdf.molecules.is_empty() {
        return Err(CyaneaError::InvalidInput(
            "No valid molecules found in SDF file".into(),
        ));
    }
    log::debug!("SDF to PDB: {} molecule(s)", sdf.molecules.len());
    write_to_string(|buf| write_pdb(buf, &sdf.molecules, config))
}

/// Write molecules as consecutive PDB fragments separated by blank lines.
/// Molecule `k` (1-based) uses residue number `k` and id code `MOLk`.
pub fn write_pdb<W: Write>(mut writer: W, molecules: &[Molecule], config: &SdfToPdbConfig) -> Result<()> {
    for (i, mol) in molecules.iter().enumerate() {
        if mol.atom_count() > MAX_PDB_SERIAL {
            return Err(CyaneaError::InvalidInput(format!(
                "{}: {} atoms exceed the PDB serial limit",
                mol.name,
                mol.atom_count()
            )));
        }
        if i > 0 {
            writeln!(writer)?;
        }
        let index = i + 1;
        if config.include_header {
            write_header(&mut writer, mol, index, config)?;
        }
        write_hetatms(&mut writer, mol, index, config)?;
        if config.include_connect && mol.bond_count() > 0 {
            write_conect(&mut writer, mol)?;
        }
        writeln!(writer, "END")?;
    }
    Ok(())
}

fn write_header<W: Write>(w: &mut W, mol: &Molecule, index: usize, config: &SdfToPdbConfig) -> Result<()> {
    let name = if mol.name.is_empty() {
        format!("MOLECULE_{index}")
    } else {
        mol.name.clone()
    };
    let date = config.date.as_deref().unwrap_or("");
    writeln!(w, "HEADER    {:<40}{date:<9}   MOL{index}", "SMALL MOLECULE")?;
    writeln!(w, "TITLE     {}", truncate(&name, 70).to_uppercase())?;
    writeln!(w, "COMPND    MOL_ID: {index};")?;
    writeln!(w, "COMPND   2 MOLECULE: {};", truncate(&name, 50))?;
    writeln!(w, "COMPND   3 CHAIN: {};", config.chain_id)?;
    writeln!(w, "AUTHOR    SDF TO PDB CONVERTER")?;
    if !mol.properties.is_empty() {
        writeln!(w, "REMARK   2 PROPERTIES FROM SDF FILE:")?;
        for (key, value) in &mol.properties {
            writeln!(w, "REMARK   2 {key}: {}", value.replace('\n', " "))?;
        }
    }
    Ok(())
}

fn write_hetatms<W: Write>(w: &mut W, mol: &Molecule, index: usize, config: &SdfToPdbConfig) -> Result<()> {
    let res_name = truncate(&config.residue_name, 3);
    for (i, atom) in mol.atoms.iter().enumerate() {
        let element = truncate(&atom.symbol, 2).to_ascii_uppercase();
        let charge = match atom.formal_charge {
            c if c > 0 && config.preserve_charges => format!("{c}+"),
            c if c < 0 && config.preserve_charges => format!("{}-", c.unsigned_abs()),
            _ => String::new(),
        };
        let [x, y, z] = atom.coords;
        writeln!(
            w,
            "HETATM{:>5} {:<4} {res_name:>3} {}{index:>4}    {x:>8.3}{y:>8.3}{z:>8.3}{:>6.2}{:>6.2}          {element:>2}{charge:<2}",
            i + 1,
            atom_name(&element),
            config.chain_id,
            1.0,
            20.0,
        )?;
    }
    Ok(())
}

/// PDB atom name: one-letter elements start in column 14, two-letter
/// elements in column 13.
fn atom_name(element: &str) -> String {
    if element.len() == 1 {
        format!(" {element}")
    } else {
        element.to_string()
    }
}

/// One CONECT line per (atom, up to four partners), atoms and partners
/// ascending.
fn write_conect<W: Write>(w: &mut W, mol: &Molecule) -> Result<()> {
    let mut partners: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for bond in &mol.bonds {
        partners.entry(bond.atom1 + 1).or_default().push(bond.atom2 + 1);
        partners.entry(bond.atom2 + 1).or_default().push(bond.atom1 + 1);
    }
    for (serial, mut bonded) in partners {
        bonded.sort_unstable();
        for chunk in bonded.chunks(CONECT_PER_LINE) {
            write!(w, "CONECT{serial:>5}")?;
            for p in chunk {
                write!(w, "{p:>5}")?;
            }
            writeln!(w)?;
        }
    }
    Ok(())
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}
