//! SMILES → SDF conversion.
//!
//! Input holds one structure per line: a SMILES string, optionally followed
//! by whitespace and a name. Each structure is parsed, optionally embedded
//! in 3D, and written as a V2000 MOL block.

use rand::Rng;

use cyanea_core::{write_to_string, CyaneaError, Result, Warnings};

use crate::embed::embed_3d;
use crate::molecule::Molecule;
use crate::sdf::{write_sdf, SdfFile};
use crate::smiles::parse_smiles_with_warnings;

/// Program line written to every generated MOL block.
pub const SMILES_GENERATOR: &str = "  Generated from SMILES";

/// Options for [`smiles_to_sdf`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SmilesToSdfConfig {
    /// Lay atoms out with [`embed_3d`]; otherwise every atom sits at the
    /// origin (default true).
    pub generate_3d: bool,
    /// Use the line's name for the header line and a `Name` data item.
    /// When false the header line reads `Molecule` (default true).
    pub include_name: bool,
    /// Write `Name` and `SMILES` data items after `M  END` (default true).
    pub include_properties: bool,
    /// Convert every line; when false stop after the first success
    /// (default true).
    pub multiple_structures: bool,
}

impl Default for SmilesToSdfConfig {
    fn default() -> Self {
        SmilesToSdfConfig {
            generate_3d: true,
            include_name: true,
            include_properties: true,
            multiple_structures: true,
        }
    }
}

fn is_smiles_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "[]()=#+-@/\\%.:".contains(c)
}

/// Split a line into its SMILES and name. `None` for a blank line.
fn split_line(line: &str) -> Option<(&str, Option<String>)> {
    let mut parts = line.split_whitespace();
    let smiles = parts.next()?;
    let name = parts.collect::<Vec<_>>().join(" ");
    Some((smiles, (!name.is_empty()).then_some(name)))
}

fn build_molecule<R: Rng + ?Sized>(
    smiles: &str,
    name: &str,
    config: &SmilesToSdfConfig,
    warnings: &mut Warnings,
    rng: &mut R,
) -> Result<Molecule> {
    if !smiles.chars().all(is_smiles_char) {
        return Err(CyaneaError::Parse(format!(
            "Invalid SMILES characters in: {smiles}"
        )));
    }
    let mut mol = parse_smiles_with_warnings(smiles, name, warnings)?;
    if mol.atom_count() == 0 {
        return Err(CyaneaError::InvalidInput(format!(
            "No atoms found in SMILES: {smiles}"
        )));
    }
    if config.generate_3d {
        embed_3d(&mut mol, rng);
    }

    mol.generator = SMILES_GENERATOR.to_string();
    if !config.include_name {
        mol.name = "Molecule".to_string();
    }
    if config.include_properties {
        if config.include_name {
            mol.properties.push(("Name".to_string(), name.to_string()));
        }
        mol.properties.push(("SMILES".to_string(), smiles.to_string()));
    }
    Ok(mol)
}

/// Parse and embed every SMILES line of `input`.
///
/// With a single non-blank line, its error is returned as is. With several,
/// a failing line is recorded in the warnings and skipped. Unnamed lines are
/// called `molecule_{n}`, where `n` counts the molecules converted so far
/// plus one.
///
/// # Errors
///
/// Fails when no line produces a molecule.
pub fn smiles_to_molecules<R: Rng + ?Sized>(
    input: &str,
    config: &SmilesToSdfConfig,
    rng: &mut R,
) -> Result<SdfFile> {
    let lines: Vec<(&str, Option<String>)> = input.lines().filter_map(split_line).collect();
    let mut out = SdfFile::default();

    for (smiles, name) in &lines {
        let name = name
            .clone()
            .unwrap_or_else(|| format!("molecule_{}", out.molecules.len() + 1));
        match build_molecule(smiles, &name, config, &mut out.warnings, rng) {
            Ok(mol) => {
                out.molecules.push(mol);
                if !config.multiple_structures {
                    break;
                }
            }
            Err(e) if lines.len() == 1 => return Err(e),
            Err(e) => out
                .warnings
                .push(format!("Failed to process molecule \"{smiles}\": {e}")),
        }
    }

    if out.molecules.is_empty() {
        return Err(CyaneaError::InvalidInput(
            "No valid molecules could be processed".into(),
        ));
    }
    log::debug!(
        "SMILES to SDF: {} of {} line(s) converted",
        out.molecules.len(),
        lines.len()
    );
    Ok(out)
}

/// Convert SMILES lines to SDF text. Empty input gives an empty string.
pub fn smiles_to_sdf<R: Rng + ?Sized>(
    input: &str,
    config: &SmilesToSdfConfig,
    rng: &mut R,
) -> Result<String> {
    if input.trim().is_empty() {
        return Ok(String::new());
    }
    let converted = smiles_to_molecules(input, config, rng)?;
    write_to_string(|buf| write_sdf(buf, &converted.molecules))
}
