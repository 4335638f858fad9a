//! PDB to Tripos MOL2 conversion.
//!
//! Each selected chain becomes one MOL2 molecule. Atom types are assigned by
//! a residue-aware Sybyl heuristic (or the bare element symbol), and bonds
//! are guessed from interatomic distances.

use std::io::Write;

use cyanea_core::{write_to_string, CyaneaError, Result};

use crate::pdb::{parse_pdb, PdbFile};
use crate::types::{Atom, ChainSelection, Point3D, BACKBONE_ATOMS};

/// Default bond-guessing distance cutoff in Angstroms.
pub const DEFAULT_BOND_CUTOFF: f64 = 1.8;

/// How MOL2 atom types are assigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AtomTyping {
    /// Residue-aware Sybyl types (`C.3`, `N.ar`, `O.co2`, ...).
    #[default]
    Sybyl,
    /// The element symbol.
    Element,
}

/// Options for [`pdb_to_mol2`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Mol2Config {
    /// Infer bonds from distances (default true).
    pub bond_guessing: bool,
    /// Maximum bond length in Angstroms (default 1.8).
    pub bond_cutoff: f64,
    pub atom_typing: AtomTyping,
    /// Chains to convert (default all).
    pub chains: ChainSelection,
    /// Keep hydrogen atoms (default true).
    pub include_hydrogens: bool,
}

impl Default for Mol2Config {
    fn default() -> Self {
        Self {
            bond_guessing: true,
            bond_cutoff: DEFAULT_BOND_CUTOFF,
            atom_typing: AtomTyping::Sybyl,
            chains: ChainSelection::All,
            include_hydrogens: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mol2Atom {
    pub name: String,
    pub coords: Point3D,
    pub atom_type: String,
    pub res_seq: i32,
    pub res_name: String,
    /// Index of the source residue, used to keep intra-residue bonds apart
    /// from inter-residue ones.
    pub residue: usize,
    pub charge: f64,
}

impl Mol2Atom {
    fn is_backbone(&self) -> bool {
        BACKBONE_ATOMS.contains(&self.name.as_str())
    }
}

/// A bond between two 1-based atom ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mol2Bond {
    pub atom1: usize,
    pub atom2: usize,
    pub order: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mol2Molecule {
    pub name: String,
    pub chain: char,
    pub atoms: Vec<Mol2Atom>,
    pub bonds: Vec<Mol2Bond>,
}

// ---------------------------------------------------------------------------
// Atom typing
// ---------------------------------------------------------------------------

const STANDARD_RESIDUES: [&str; 20] = [
    "ALA", "ARG", "ASN", "ASP", "CYS", "GLU", "GLN", "GLY", "HIS", "ILE", "LEU", "LYS", "MET",
    "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL",
];

const AROMATIC_RESIDUES: [&str; 4] = ["PHE", "TYR", "TRP", "HIS"];

/// Element used for MOL2 typing: the element column, else the first
/// character of the atom name.
pub fn mol2_element(atom: &Atom) -> String {
    match &atom.element {
        Some(e) => e.clone(),
        None => atom.name.chars().next().map(String::from).unwrap_or_default(),
    }
}

/// Heuristic Sybyl atom type from atom name, residue name and element.
///
/// Unrecognized elements pass through unchanged.
pub fn sybyl_type(atom_name: &str, res_name: &str, element: &str) -> String {
    let name = atom_name.to_ascii_uppercase();
    let ty = match element {
        "C" => {
            if name == "CA" || name.contains("CB") || name.contains("CG") {
                "C.3"
            } else if name == "C" || (name.contains("CD") && STANDARD_RESIDUES.contains(&res_name))
            {
                "C.2"
            } else if AROMATIC_RESIDUES.contains(&res_name) {
                "C.ar"
            } else {
                "C.3"
            }
        }
        "N" => match (res_name, name.as_str()) {
            ("ARG", "NE" | "NH1" | "NH2") => "N.pl3",
            ("HIS", "ND1" | "NE2") => "N.ar",
            _ => "N.3",
        },
        "O" => {
            if name == "O" {
                "O.2"
            } else if res_name == "ASP" || res_name == "GLU" {
                "O.co2"
            } else {
                "O.3"
            }
        }
        "S" => "S.3",
        "P" => "P.3",
        "H" => "H",
        other => other,
    };
    ty.to_string()
}

// ---------------------------------------------------------------------------
// Bond guessing
// ---------------------------------------------------------------------------

/// Connect atom pairs closer than `cutoff`.
///
/// Atoms of the same residue bond on distance alone. Atoms of different
/// residues bond only when the residue numbers differ by exactly one and
/// both are backbone atoms.
pub fn guess_bonds(atoms: &[Mol2Atom], cutoff: f64) -> Vec<Mol2Bond> {
    let mut bonds = Vec::new();
    for (i, a) in atoms.iter().enumerate() {
        for (j, b) in atoms.iter().enumerate().skip(i + 1) {
            let allowed = a.residue == b.residue
                || ((a.res_seq - b.res_seq).abs() == 1 && a.is_backbone() && b.is_backbone());
            if allowed && a.coords.distance_to(&b.coords) <= cutoff {
                bonds.push(Mol2Bond {
                    atom1: i + 1,
                    atom2: j + 1,
                    order: 1,
                });
            }
        }
    }
    bonds
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

/// Build one MOL2 molecule per selected chain, in first-seen chain order.
///
/// Molecules are named `{base}_chain_{id}`, where `base` is the last COMPND
/// molecule name, else the HEADER classification, else `Unknown`.
pub fn build_molecules(pdb: &PdbFile, config: &Mol2Config) -> Vec<Mol2Molecule> {
    let base = pdb.molecule_name().unwrap_or("Unknown");
    let s = &pdb.structure;
    let mut molecules = Vec::new();

    for chain in s.chains.iter().filter(|c| config.chains.includes(c.id)) {
        let mut atoms = Vec::new();
        for atom in s.chain_atoms(chain) {
            if !config.include_hydrogens && atom.is_hydrogen() {
                continue;
            }
            if !atom.coords.is_finite() {
                log::warn!("MOL2: skipped atom {} with non-finite coordinates", atom.serial);
                continue;
            }
            let residue = s.residue_of(atom);
            let element = mol2_element(atom);
            let atom_type = match config.atom_typing {
                AtomTyping::Sybyl => sybyl_type(&atom.name, &residue.name, &element),
                AtomTyping::Element => element,
            };
            atoms.push(Mol2Atom {
                name: atom.name.clone(),
                coords: atom.coords,
                atom_type,
                res_seq: residue.seq_num,
                res_name: residue.name.clone(),
                residue: atom.residue,
                charge: 0.0,
            });
        }
        if atoms.is_empty() {
            continue;
        }
        let bonds = if config.bond_guessing {
            guess_bonds(&atoms, config.bond_cutoff)
        } else {
            Vec::new()
        };
        molecules.push(Mol2Molecule {
            name: format!("{base}_chain_{}", chain.id),
            chain: chain.id,
            atoms,
            bonds,
        });
    }
    molecules
}

/// Write molecules as consecutive MOL2 blocks separated by blank lines.
pub fn write_mol2<W: Write>(mut writer: W, molecules: &[Mol2Molecule]) -> Result<()> {
    for (m, molecule) in molecules.iter().enumerate() {
        if m > 0 {
            writeln!(writer)?;
        }
        writeln!(writer, "# MOL2 file generated from PDB")?;
        writeln!(writer, "# Molecule: {}", molecule.name)?;
        writeln!(writer)?;
        writeln!(writer, "@<TRIPOS>MOLECULE")?;
        writeln!(writer, "{}", molecule.name)?;
        writeln!(writer, "{} {} 0 0 0", molecule.atoms.len(), molecule.bonds.len())?;
        writeln!(writer, "SMALL")?;
        writeln!(writer, "NO_CHARGES")?;
        writeln!(writer)?;

        writeln!(writer, "@<TRIPOS>ATOM")?;
        for (i, atom) in molecule.atoms.iter().enumerate() {
            writeln!(
                writer,
                "{:>7} {:<8} {:>10.4} {:>10.4} {:>10.4} {:<8} {:>4} {:<8} {:.4}",
                i + 1,
                atom.name,
                atom.coords.x,
                atom.coords.y,
                atom.coords.z,
                atom.atom_type,
                atom.res_seq,
                atom.res_name,
                atom.charge
            )?;
        }

        if !molecule.bonds.is_empty() {
            writeln!(writer)?;
            writeln!(writer, "@<TRIPOS>BOND")?;
            for (i, bond) in molecule.bonds.iter().enumerate() {
                writeln!(
                    writer,
                    "{:>6} {:>5} {:>5} {}",
                    i + 1,
                    bond.atom1,
                    bond.atom2,
                    bond.order
                )?;
            }
        }
    }
    Ok(())
}

/// Convert PDB text to MOL2 text.
///
/// # Errors
///
/// Returns [`CyaneaError::InvalidInput`] when no selected chain has atoms.
pub fn pdb_to_mol2(input: &str, config: &Mol2Config) -> Result<String> {
    if input.trim().is_empty() {
        return Ok(String::new());
    }
    let pdb = parse_pdb(input);
    let molecules = build_molecules(&pdb, config);
    if molecules.is_empty() {
        return Err(CyaneaError::InvalidInput(
            "No valid molecules found in PDB file".into(),
        ));
    }
    log::debug!("MOL2: {} molecule(s)", molecules.len());
    write_to_string(|buf| write_mol2(buf, &molecules))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn bond_rows_respect_cutoff(xs in proptest::collection::vec(-5.0f64..5.0, 2..12), cutoff in 0.5f64..3.0) {
            let atoms: Vec<Mol2Atom> = xs
                .iter()
                .map(|&x| Mol2Atom {
                    name: "CB".into(),
                    coords: Point3D::new(x, 0.0, 0.0),
                    atom_type: "C.3".into(),
                    res_seq: 1,
                    res_name: "ALA".into(),
                    residue: 0,
                    charge: 0.0,
                })
                .collect();
            for bond in guess_bonds(&atoms, cutoff) {
                prop_assert!(bond.atom1 < bond.atom2);
                let d = atoms[bond.atom1 - 1].coords.distance_to(&atoms[bond.atom2 - 1].coords);
                prop_assert!(d <= cutoff);
            }
        }
    }
}
