//! SDF and MOL V2000 reading and writing.
//!
//! An SDF file is a sequence of MOL blocks, each ended by a line that is
//! exactly `$$$$`. Header, counts, atom and bond lines are read through
//! [`Field`] tables. The trailer after the bond block is classified line by
//! line with [`SdfLine::of`].

use std::io::Write;
use std::path::Path;

use cyanea_core::fixed::{Field, FixedRecord};
use cyanea_core::{write_to_string, CyaneaError, Result, Warnings};

use crate::element::element_by_symbol;
use crate::molecule::{BondOrder, MolAtom, Molecule};

/// Block separator line.
pub const SDF_TERMINATOR: &str = "$$$$";

/// V2000 counts and bond blocks use three-column integers.
pub const V2000_MAX_ENTRIES: usize = 999;

static COUNTS_FIELDS: &[Field] = &[
    Field::integer("atom_count", 0, 3),
    Field::integer("bond_count", 3, 6),
    Field::text("version", 33, 39),
];

static ATOM_FIELDS: &[Field] = &[
    Field::real("x", 0, 10),
    Field::real("y", 10, 20),
    Field::real("z", 20, 30),
    Field::text("symbol", 31, 34),
    Field::integer("charge_code", 36, 39),
];

static BOND_FIELDS: &[Field] = &[
    Field::integer("atom1", 0, 3),
    Field::integer("atom2", 3, 6),
    Field::integer("order", 6, 9),
];

// ---------------------------------------------------------------------------
// Trailer line classification
// ---------------------------------------------------------------------------

/// Kinds of line found after the bond block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdfLine<'a> {
    /// `$$$$`
    Terminator,
    /// `M  END`
    End,
    /// `M  CHG`
    Charge,
    /// `> <name>`, with the name between the angle brackets.
    PropertyHeader(&'a str),
    /// Anything else: other `M` lines, data values, blank lines.
    Data,
}

impl<'a> SdfLine<'a> {
    pub fn of(line: &'a str) -> Self {
        let line = line.trim_end();
        if line == SDF_TERMINATOR {
            SdfLine::Terminator
        } else if line.starts_with("M  END") {
            SdfLine::End
        } else if line.starts_with("M  CHG") {
            SdfLine::Charge
        } else if let Some(name) = property_name(line) {
            SdfLine::PropertyHeader(name)
        } else {
            SdfLine::Data
        }
    }
}

/// Name inside `> <...>`. Registry numbers before or after the brackets
/// (`> 25 <MW> (MD-1)`) are ignored.
fn property_name(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('>')?;
    let open = rest.find('<')?;
    let close = rest[open + 1..].find('>')?;
    Some(&rest[open + 1..open + 1 + close])
}

// ---------------------------------------------------------------------------
// Charge codes
// ---------------------------------------------------------------------------

/// Formal charge for an MDL atom-block charge code.
pub fn charge_from_mdl(code: i64) -> i8 {
    match code {
        1 => 3,
        2 => 2,
        3 => 1,
        5 => -1,
        6 => -2,
        7 => -3,
        _ => 0,
    }
}

/// MDL atom-block charge code for a formal charge; 0 outside -3..=3.
pub fn mdl_charge_code(charge: i8) -> u8 {
    match charge {
        3 => 1,
        2 => 2,
        1 => 3,
        -1 => 5,
        -2 => 6,
        -3 => 7,
        _ => 0,
    }
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Molecules read from an SDF file, with recoverable problems.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SdfFile {
    pub molecules: Vec<Molecule>,
    pub warnings: Warnings,
}

/// A MOL block and the 1-based input line it starts on.
struct Block<'a> {
    first_line: usize,
    lines: Vec<&'a str>,
}

fn split_blocks(input: &str) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    let mut current = Block {
        first_line: 1,
        lines: Vec::new(),
    };
    for (i, raw) in input.lines().enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if SdfLine::of(line) == SdfLine::Terminator {
            let next = Block {
                first_line: i + 2,
                lines: Vec::new(),
            };
            blocks.push(std::mem::replace(&mut current, next));
        } else {
            current.lines.push(line);
        }
    }
    blocks.push(current);
    blocks.retain(|b| b.lines.iter().any(|l| !l.trim().is_empty()));
    blocks
}

/// Parse SDF text.
///
/// With a single block, a malformed block is an error. With several blocks,
/// each malformed block is skipped and recorded in [`SdfFile::warnings`].
/// Empty input gives an empty file.
///
/// # Errors
///
/// A [`CyaneaError::Format`] naming the offending line for a bad single
/// block, or an error when every block of a multi-block file is bad.
pub fn parse_sdf(input: &str) -> Result<SdfFile> {
    let blocks = split_blocks(input);
    let mut out = SdfFile::default();

    if let [block] = blocks.as_slice() {
        let mol = parse_block(block, &mut out.warnings)?;
        out.molecules.push(mol);
        return Ok(out);
    }

    for (k, block) in blocks.iter().enumerate() {
        match parse_block(block, &mut out.warnings) {
            Ok(mol) => out.molecules.push(mol),
            Err(e) => out.warnings.push(format!(
                "Skipped SDF block {} (starting at line {}): {e}",
                k + 1,
                block.first_line
            )),
        }
    }
    if !blocks.is_empty() && out.molecules.is_empty() {
        return Err(CyaneaError::InvalidInput(
            "No valid molecules found in SDF file".into(),
        ));
    }
    log::debug!(
        "parsed {} of {} SDF block(s)",
        out.molecules.len(),
        blocks.len()
    );
    Ok(out)
}

/// Parse a single MOL block. Line numbers in errors count from the block's
/// first line.
pub fn parse_mol_block(input: &str) -> Result<Molecule> {
    let block = Block {
        first_line: 1,
        lines: input
            .lines()
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .collect(),
    };
    parse_block(&block, &mut Warnings::new())
}

/// Read and parse an SDF file from disk.
pub fn parse_sdf_file(path: impl AsRef<Path>) -> Result<SdfFile> {
    let contents = std::fs::read_to_string(path)?;
    parse_sdf(&contents)
}

fn parse_block(block: &Block<'_>, warnings: &mut Warnings) -> Result<Molecule> {
    let lines = &block.lines;
    let line_no = |idx: usize| block.first_line + idx;
    let line_at = |idx: usize, what: &str| {
        lines.get(idx).copied().ok_or_else(|| {
            CyaneaError::format(line_no(idx), format!("block ended before the {what}"))
        })
    };

    let counts_line = line_at(3, "counts line")?;
    let counts = FixedRecord::new(counts_line, COUNTS_FIELDS);
    if counts.text("version").eq_ignore_ascii_case("V3000") {
        return Err(CyaneaError::format(
            line_no(3),
            "V3000 blocks are not supported",
        ));
    }
    let count = |name| -> Result<usize> {
        let n = counts.require_integer(name, line_no(3))?;
        usize::try_from(n)
            .map_err(|_| CyaneaError::format(line_no(3), format!("negative {name} {n}")))
    };
    let n_atoms = count("atom_count")?;
    let n_bonds = count("bond_count")?;

    let mut mol = Molecule::with_name(lines[0].trim());
    mol.generator = lines[1].trim_end().to_string();
    mol.comment = lines[2].trim_end().to_string();

    for k in 0..n_atoms {
        let idx = 4 + k;
        let rec = FixedRecord::new(line_at(idx, &format!("atom {} line", k + 1))?, ATOM_FIELDS);
        let coords = [
            rec.require_real("x", line_no(idx))?,
            rec.require_real("y", line_no(idx))?,
            rec.require_real("z", line_no(idx))?,
        ];
        let symbol = rec.text("symbol");
        if symbol.is_empty() {
            return Err(CyaneaError::format(line_no(idx), "missing element symbol"));
        }
        let atomic_number = match element_by_symbol(symbol) {
            Some(e) => e.atomic_number,
            None => {
                warnings.push(format!(
                    "Unknown element symbol '{symbol}' at line {}",
                    line_no(idx)
                ));
                0
            }
        };
        let mut atom = MolAtom::new(symbol, atomic_number);
        atom.coords = coords;
        atom.formal_charge = charge_from_mdl(rec.integer("charge_code").unwrap_or(0));
        mol.push_atom(atom);
    }

    for k in 0..n_bonds {
        let idx = 4 + n_atoms + k;
        let rec = FixedRecord::new(line_at(idx, &format!("bond {} line", k + 1))?, BOND_FIELDS);
        let endpoint = |name| -> Result<usize> {
            let serial = rec.require_integer(name, line_no(idx))?;
            usize::try_from(serial)
                .ok()
                .filter(|s| (1..=n_atoms).contains(s))
                .map(|s| s - 1)
                .ok_or_else(|| {
                    CyaneaError::format(
                        line_no(idx),
                        format!("bond references atom {serial}, block has {n_atoms} atoms"),
                    )
                })
        };
        let (a1, a2) = (endpoint("atom1")?, endpoint("atom2")?);
        let code = rec.require_integer("order", line_no(idx))?;
        let order = BondOrder::from_mdl_code(code).unwrap_or_else(|| {
            warnings.push(format!(
                "Bond type {code} at line {} read as single",
                line_no(idx)
            ));
            BondOrder::Single
        });
        mol.push_bond(a1, a2, order)
            .map_err(|e| CyaneaError::format(line_no(idx), e.to_string()))?;
        if order == BondOrder::Aromatic {
            mol.atoms[a1].is_aromatic = true;
            mol.atoms[a2].is_aromatic = true;
        }
    }

    read_trailer(&mut mol, lines, 4 + n_atoms + n_bonds, block.first_line)?;
    mol.mark_ring_bonds();
    Ok(mol)
}

/// Read `M  CHG` lines up to `M  END`, then data items.
fn read_trailer(mol: &mut Molecule, lines: &[&str], start: usize, first_line: usize) -> Result<()> {
    let mut charges_reset = false;
    let mut past_end = false;
    let mut idx = start;

    while idx < lines.len() {
        let line = lines[idx];
        match SdfLine::of(line) {
            SdfLine::End => past_end = true,
            SdfLine::Charge if !past_end => {
                if !charges_reset {
                    mol.atoms.iter_mut().for_each(|a| a.formal_charge = 0);
                    charges_reset = true;
                }
                apply_charge_line(mol, line, first_line + idx)?;
            }
            SdfLine::PropertyHeader(name) => {
                let mut value = Vec::new();
                while let Some(next) = lines.get(idx + 1) {
                    if next.trim().is_empty() || SdfLine::of(next) == SdfLine::Terminator {
                        break;
                    }
                    value.push(next.trim_end());
                    idx += 1;
                }
                mol.properties.push((name.to_string(), value.join("\n")));
            }
            SdfLine::Charge | SdfLine::Terminator | SdfLine::Data => {}
        }
        idx += 1;
    }
    Ok(())
}

/// `M  CHG  n  aaa vvv  aaa vvv ...`
fn apply_charge_line(mol: &mut Molecule, line: &str, line_no: usize) -> Result<()> {
    let bad = |what: &str| CyaneaError::format(line_no, format!("invalid M  CHG {what}"));
    let mut tokens = line["M  CHG".len()..].split_whitespace();
    let count: usize = tokens
        .next()
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| bad("entry count"))?;
    for _ in 0..count {
        let (Some(atom), Some(value)) = (tokens.next(), tokens.next()) else {
            return Err(bad("entry list"));
        };
        let atom: usize = atom.parse().map_err(|_| bad("atom number"))?;
        let value: i8 = value.parse().map_err(|_| bad("charge value"))?;
        let target = atom
            .checked_sub(1)
            .and_then(|i| mol.atoms.get_mut(i))
            .ok_or_else(|| bad("atom number"))?;
        target.formal_charge = value;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Write one V2000 MOL block followed by its data items and `$$$$`.
///
/// Charges go into the atom-block charge column as MDL codes and, for every
/// charged atom, into `M  CHG` lines.
///
/// # Errors
///
/// Fails on write errors or when the molecule has more than 999 atoms or
/// bonds.
pub fn write_mol_block<W: Write>(mut writer: W, mol: &Molecule) -> Result<()> {
    if mol.atom_count() > V2000_MAX_ENTRIES || mol.bond_count() > V2000_MAX_ENTRIES {
        return Err(CyaneaError::InvalidInput(format!(
            "{}: V2000 holds at most {V2000_MAX_ENTRIES} atoms and bonds",
            mol.name
        )));
    }

    writeln!(writer, "{}", mol.name)?;
    writeln!(writer, "{}", mol.generator)?;
    writeln!(writer, "{}", mol.comment)?;
    writeln!(
        writer,
        "{:>3}{:>3}  0  0  0  0  0  0  0  0999 V2000",
        mol.atom_count(),
        mol.bond_count()
    )?;

    for atom in &mol.atoms {
        let [x, y, z] = atom.coords;
        writeln!(
            writer,
            "{x:>10.4}{y:>10.4}{z:>10.4} {:<3} 0{:>3}  0  0  0  0  0  0  0  0  0  0",
            atom.symbol,
            mdl_charge_code(atom.formal_charge)
        )?;
    }
    for bond in &mol.bonds {
        writeln!(
            writer,
            "{:>3}{:>3}{:>3}  0  0  0  0",
            bond.atom1 + 1,
            bond.atom2 + 1,
            bond.order.mdl_code()
        )?;
    }

    let charged: Vec<(usize, i8)> = mol
        .atoms
        .iter()
        .enumerate()
        .filter(|(_, a)| a.formal_charge != 0)
        .map(|(i, a)| (i + 1, a.formal_charge))
        .collect();
    for chunk in charged.chunks(8) {
        write!(writer, "M  CHG{:>3}", chunk.len())?;
        for (serial, charge) in chunk {
            write!(writer, " {serial:>3} {charge:>3}")?;
        }
        writeln!(writer)?;
    }
    writeln!(writer, "M  END")?;

    for (name, value) in &mol.properties {
        writeln!(writer, "> <{name}>")?;
        writeln!(writer, "{value}")?;
        writeln!(writer)?;
    }
    writeln!(writer, "{SDF_TERMINATOR}")?;
    Ok(())
}

/// Write molecules as an SDF file.
pub fn write_sdf<W: Write>(mut writer: W, molecules: &[Molecule]) -> Result<()> {
    for mol in molecules {
        write_mol_block(&mut writer, mol)?;
    }
    Ok(())
}

/// SDF text for `molecules`.
pub fn format_sdf(molecules: &[Molecule]) -> Result<String> {
    write_to_string(|buf| write_sdf(buf, molecules))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn never_panics(s in "\\PC{0,400}") {
            let _ = parse_sdf(&s);
        }

        #[test]
        fn never_panics_on_mol_shaped_input(
            atoms in 0usize..5,
            bonds in 0usize..5,
            body in proptest::collection::vec("[ 0-9.A-Za-z$<>M-]{0,70}", 0..12),
        ) {
            let input = format!("n\np\nc\n{atoms:>3}{bonds:>3}\n{}", body.join("\n"));
            let _ = parse_sdf(&input);
        }
    }
}
