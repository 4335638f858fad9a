//! PDB format parser.
//!
//! Each line is classified once by [`RecordKind::of`] and its columns are read
//! through static [`Field`] tables. The parser is lenient: malformed ATOM or
//! HETATM lines are skipped with a warning, and unknown record types are
//! ignored. Only the first MODEL is read for multi-model (NMR) files.

use std::path::Path;

use cyanea_core::fixed::{column, Field, FixedRecord};
use cyanea_core::{Result, Warnings};

use crate::types::{Atom, Point3D, ResidueKey, Structure};

/// Minimum line length for an ATOM/HETATM record (through the z coordinate).
pub const MIN_ATOM_LINE: usize = 54;

/// Default occupancy when the column is absent or unreadable.
pub const DEFAULT_OCCUPANCY: f64 = 1.0;

/// Default B-factor when the column is absent or unreadable.
pub const DEFAULT_TEMP_FACTOR: f64 = 20.0;

/// Chain id assigned to atoms with a blank chain column.
pub const DEFAULT_CHAIN: char = 'A';

// ---------------------------------------------------------------------------
// Record kinds and column tables
// ---------------------------------------------------------------------------

/// The record types the parser distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Header,
    Title,
    Compnd,
    Remark,
    Atom,
    Hetatm,
    Conect,
    Helix,
    Sheet,
    Ter,
    Model,
    EndMdl,
    End,
    Other,
}

impl RecordKind {
    /// Classify a line by its first six columns.
    pub fn of(line: &str) -> Self {
        match column(line, 0, 6).trim() {
            "HEADER" => RecordKind::Header,
            "TITLE" => RecordKind::Title,
            "COMPND" => RecordKind::Compnd,
            "REMARK" => RecordKind::Remark,
            "ATOM" => RecordKind::Atom,
            "HETATM" => RecordKind::Hetatm,
            "CONECT" => RecordKind::Conect,
            "HELIX" => RecordKind::Helix,
            "SHEET" => RecordKind::Sheet,
            "TER" => RecordKind::Ter,
            "MODEL" => RecordKind::Model,
            "ENDMDL" => RecordKind::EndMdl,
            "END" => RecordKind::End,
            _ => RecordKind::Other,
        }
    }
}

static HEADER_FIELDS: &[Field] = &[
    Field::text("classification", 10, 50),
    Field::text("dep_date", 50, 59),
    Field::text("id_code", 62, 66),
];

/// Free-text continuation records (TITLE, COMPND) and REMARK.
static TEXT_FIELDS: &[Field] = &[
    Field::text("remark_num", 7, 10),
    Field::text("text", 10, usize::MAX),
];

static ATOM_FIELDS: &[Field] = &[
    Field::integer("serial", 6, 11),
    Field::text("name", 12, 16),
    Field::char("alt_loc", 16),
    Field::text("res_name", 17, 20),
    Field::char("chain_id", 21),
    Field::integer("res_seq", 22, 26),
    Field::char("i_code", 26),
    Field::real("x", 30, 38),
    Field::real("y", 38, 46),
    Field::real("z", 46, 54),
    Field::real("occupancy", 54, 60),
    Field::real("temp_factor", 60, 66),
    Field::text("element", 76, 78),
    Field::text("charge", 78, 80),
];

static CONECT_FIELDS: &[Field] = &[Field::integer("serial", 6, 11)];

/// Bonded serials follow the atom serial in 5-column windows.
const CONECT_PARTNER_START: usize = 11;
const CONECT_PARTNER_WIDTH: usize = 5;

/// Bonded serials of a CONECT line, read window by window up to the first
/// blank window or the end of the line. Unparseable windows are skipped.
fn conect_partners(line: &str) -> Vec<u32> {
    (CONECT_PARTNER_START..line.len())
        .step_by(CONECT_PARTNER_WIDTH)
        .map(|start| column(line, start, start + CONECT_PARTNER_WIDTH).trim())
        .take_while(|window| !window.is_empty())
        .filter_map(|window| window.parse().ok())
        .collect()
}

static HELIX_FIELDS: &[Field] = &[
    Field::text("id", 7, 10),
    Field::char("init_chain", 19),
    Field::integer("init_seq", 21, 25),
    Field::char("end_chain", 31),
    Field::integer("end_seq", 33, 37),
];

static SHEET_FIELDS: &[Field] = &[
    Field::text("id", 7, 10),
    Field::char("init_chain", 21),
    Field::integer("init_seq", 22, 26),
    Field::char("end_chain", 32),
    Field::integer("end_seq", 33, 37),
];

// ---------------------------------------------------------------------------
// Parsed model
// ---------------------------------------------------------------------------

/// HEADER record contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PdbHeader {
    pub classification: String,
    pub dep_date: String,
    pub id_code: String,
}

/// One REMARK line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Remark {
    /// Remark number as written (e.g. "2", "350").
    pub num: String,
    /// Text from column 11, trimmed.
    pub text: String,
}

/// A COMPND molecule and the chains it covers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Compound {
    pub molecule: String,
    pub chains: Vec<char>,
}

/// One CONECT record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Conect {
    pub serial: u32,
    pub bonded: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SecondaryKind {
    Helix,
    Sheet,
}

impl SecondaryKind {
    /// mmCIF `_struct_conf.conf_type_id` value.
    pub fn conf_type_id(self) -> &'static str {
        match self {
            SecondaryKind::Helix => "HELX_P",
            SecondaryKind::Sheet => "STRN",
        }
    }
}

/// A HELIX or SHEET span.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SecondaryStructure {
    pub kind: SecondaryKind,
    /// Helix serial or strand number.
    pub id: String,
    pub init_chain: Option<char>,
    pub init_seq: Option<i32>,
    pub end_chain: Option<char>,
    pub end_seq: Option<i32>,
}

/// Everything read from a PDB file.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PdbFile {
    pub header: PdbHeader,
    /// TITLE continuation lines joined with single spaces.
    pub title: String,
    pub remarks: Vec<Remark>,
    /// From `REMARK   2 RESOLUTION.`, in Angstroms.
    pub resolution: Option<f64>,
    pub compounds: Vec<Compound>,
    pub structure: Structure,
    pub conects: Vec<Conect>,
    pub secondary: Vec<SecondaryStructure>,
    pub warnings: Warnings,
}

impl PdbFile {
    /// COMPND molecule name covering `chain`, if any.
    pub fn chain_title(&self, chain: char) -> Option<&str> {
        self.compounds
            .iter()
            .rev()
            .find(|c| c.chains.contains(&chain) && !c.molecule.is_empty())
            .map(|c| c.molecule.as_str())
    }

    /// Last COMPND molecule name, else the HEADER classification. A later
    /// `MOLECULE:` entry replaces an earlier one.
    pub fn molecule_name(&self) -> Option<&str> {
        self.compounds
            .iter()
            .rev()
            .map(|c| c.molecule.as_str())
            .find(|m| !m.is_empty())
            .or_else(|| Some(self.header.classification.as_str()).filter(|c| !c.is_empty()))
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse PDB-format text.
///
/// Never fails: problems with individual records are recorded in
/// [`PdbFile::warnings`]. Callers decide whether an empty structure is an
/// error for their conversion.
pub fn parse_pdb(input: &str) -> PdbFile {
    let mut pdb = PdbFile::default();
    let mut past_first_model = false;
    let mut skipped_model_atoms = 0usize;

    for (i, raw) in input.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.strip_suffix('\r').unwrap_or(raw);

        match RecordKind::of(line) {
            RecordKind::Header => {
                let rec = FixedRecord::new(line, HEADER_FIELDS);
                pdb.header = PdbHeader {
                    classification: rec.text("classification").to_string(),
                    dep_date: rec.text("dep_date").to_string(),
                    id_code: rec.text("id_code").to_string(),
                };
            }
            RecordKind::Title => {
                let text = FixedRecord::new(line, TEXT_FIELDS).text("text");
                if !text.is_empty() {
                    if !pdb.title.is_empty() {
                        pdb.title.push(' ');
                    }
                    pdb.title.push_str(text);
                }
            }
            RecordKind::Compnd => {
                parse_compnd(FixedRecord::new(line, TEXT_FIELDS).text("text"), &mut pdb.compounds);
            }
            RecordKind::Remark => {
                let rec = FixedRecord::new(line, TEXT_FIELDS);
                let remark = Remark {
                    num: rec.text("remark_num").to_string(),
                    text: rec.text("text").to_string(),
                };
                if remark.num == "2" {
                    if let Some(r) = parse_resolution(&remark.text) {
                        pdb.resolution = Some(r);
                    }
                }
                pdb.remarks.push(remark);
            }
            kind @ (RecordKind::Atom | RecordKind::Hetatm) => {
                if past_first_model {
                    skipped_model_atoms += 1;
                    continue;
                }
                parse_atom_line(line, line_no, kind == RecordKind::Hetatm, &mut pdb);
            }
            RecordKind::Conect => {
                let rec = FixedRecord::new(line, CONECT_FIELDS);
                let Some(serial) = rec.integer("serial").and_then(|s| u32::try_from(s).ok())
                else {
                    pdb.warnings
                        .push(format!("Skipped CONECT line {line_no}: invalid atom serial"));
                    continue;
                };
                let bonded = conect_partners(line);
                pdb.conects.push(Conect { serial, bonded });
            }
            RecordKind::Helix => {
                let rec = FixedRecord::new(line, HELIX_FIELDS);
                pdb.secondary.push(secondary_from(&rec, SecondaryKind::Helix));
            }
            RecordKind::Sheet => {
                let rec = FixedRecord::new(line, SHEET_FIELDS);
                pdb.secondary.push(secondary_from(&rec, SecondaryKind::Sheet));
            }
            RecordKind::EndMdl => past_first_model = true,
            RecordKind::Ter | RecordKind::Model | RecordKind::End | RecordKind::Other => {}
        }
    }

    if skipped_model_atoms > 0 {
        log::debug!("ignored {skipped_model_atoms} atom records beyond the first MODEL");
    }
    pdb.structure.id = pdb.header.id_code.clone();
    log::debug!(
        "parsed PDB {}: {} atoms, {} CONECT, {} secondary",
        pdb.structure.id,
        pdb.structure.atom_count(),
        pdb.conects.len(),
        pdb.secondary.len()
    );
    pdb
}

/// Read and parse a PDB file from disk.
pub fn parse_pdb_file(path: impl AsRef<Path>) -> Result<PdbFile> {
    let contents = std::fs::read_to_string(path)?;
    Ok(parse_pdb(&contents))
}

fn parse_atom_line(line: &str, line_no: usize, is_hetatm: bool, pdb: &mut PdbFile) {
    let record = if is_hetatm { "HETATM" } else { "ATOM" };
    if line.len() < MIN_ATOM_LINE {
        pdb.warnings.push(format!(
            "Skipped short {record} line {line_no} ({} chars)",
            line.len()
        ));
        return;
    }

    let rec = FixedRecord::new(line, ATOM_FIELDS);
    let serial = rec.integer("serial").and_then(|s| u32::try_from(s).ok());
    let res_seq = rec.integer("res_seq").and_then(|s| i32::try_from(s).ok());
    let (Some(serial), Some(res_seq)) = (serial, res_seq) else {
        pdb.warnings.push(format!(
            "Skipped {record} line {line_no}: invalid serial or residue number"
        ));
        return;
    };

    let coord = |name| rec.real(name).unwrap_or(f64::NAN);
    let element = Some(rec.text("element"))
        .filter(|e| !e.is_empty())
        .map(str::to_string);

    let atom = Atom {
        serial,
        name: rec.text("name").to_string(),
        alt_loc: rec.char("alt_loc"),
        coords: Point3D::new(coord("x"), coord("y"), coord("z")),
        occupancy: rec.real("occupancy").unwrap_or(DEFAULT_OCCUPANCY),
        temp_factor: rec.real("temp_factor").unwrap_or(DEFAULT_TEMP_FACTOR),
        element,
        charge: parse_pdb_charge(rec.text("charge")),
        is_hetatm,
        residue: 0,
    };
    let key = ResidueKey {
        chain_id: rec.char("chain_id").unwrap_or(DEFAULT_CHAIN),
        name: rec.text("res_name"),
        seq_num: res_seq,
        i_code: rec.char("i_code"),
    };
    pdb.structure.push_atom(atom, key);
}

fn secondary_from(rec: &FixedRecord<'_>, kind: SecondaryKind) -> SecondaryStructure {
    let seq = |name| rec.integer(name).and_then(|s| i32::try_from(s).ok());
    SecondaryStructure {
        kind,
        id: rec.text("id").to_string(),
        init_chain: rec.char("init_chain"),
        init_seq: seq("init_seq"),
        end_chain: rec.char("end_chain"),
        end_seq: seq("end_seq"),
    }
}

/// Fold one COMPND text line into the compound list.
///
/// `MOLECULE:` opens a new compound. `CHAIN:` assigns chain ids to the most
/// recent one.
fn parse_compnd(text: &str, compounds: &mut Vec<Compound>) {
    if let Some(pos) = text.find("MOLECULE:") {
        let name = text[pos + "MOLECULE:".len()..].trim();
        let name = name.strip_suffix(';').unwrap_or(name).trim();
        compounds.push(Compound {
            molecule: name.to_string(),
            chains: Vec::new(),
        });
    } else if let Some(pos) = text.find("CHAIN:") {
        let list: String = text[pos + "CHAIN:".len()..]
            .chars()
            .take_while(|c| c.is_ascii_uppercase() || *c == ',' || c.is_whitespace())
            .collect();
        let chains = list
            .split(',')
            .filter_map(|c| c.trim().chars().next());
        match compounds.last_mut() {
            Some(last) => last.chains.extend(chains),
            None => compounds.push(Compound {
                molecule: String::new(),
                chains: chains.collect(),
            }),
        }
    }
}

/// Extract the value following `RESOLUTION.` in a REMARK 2 line.
fn parse_resolution(text: &str) -> Option<f64> {
    let pos = text.find("RESOLUTION.")?;
    let rest = text[pos + "RESOLUTION.".len()..].trim_start();
    let end = rest
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

/// Parse a PDB charge column: "2+", "1-", "+2" or "-1".
pub fn parse_pdb_charge(s: &str) -> Option<i8> {
    let mut chars = s.trim().chars();
    let (a, b) = (chars.next()?, chars.next()?);
    if chars.next().is_some() {
        return None;
    }
    let (digit, sign) = match (a.to_digit(10), b.to_digit(10)) {
        (Some(d), None) => (d, b),
        (None, Some(d)) => (d, a),
        _ => return None,
    };
    let magnitude = i8::try_from(digit).ok()?;
    match sign {
        '+' => Some(magnitude),
        '-' => Some(-magnitude),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{atom_line, header_line};

    fn crambin_fragment() -> String {
        [
            header_line("PLANT PROTEIN", "30-APR-81", "1CRN"),
            "TITLE     WATER STRUCTURE OF A HYDROPHOBIC PROTEIN AT ATOMIC RESOLUTION.".into(),
            "TITLE    2 PENTACOORDINATE".into(),
            "COMPND    MOL_ID: 1;".into(),
            "COMPND   2 MOLECULE: CRAMBIN;".into(),
            "COMPND   3 CHAIN: A;".into(),
            "REMARK   2 RESOLUTION.    1.50 ANGSTROMS.".into(),
            "HELIX    1  H1 ILE A    7  PRO A   19  1".into(),
            "SHEET    1   A 2 THR A   1  CYS A   4  0".into(),
            atom_line("ATOM", 1, " N  ", "THR", 'A', 1, [17.047, 14.099, 3.625], "N"),
            atom_line("ATOM", 2, " CA ", "THR", 'A', 1, [16.967, 12.784, 4.338], "C"),
            atom_line("ATOM", 3, " C  ", "THR", 'A', 1, [15.685, 12.755, 5.133], "C"),
            atom_line("ATOM", 4, " N  ", "THR", 'A', 2, [15.115, 11.555, 5.265], "N"),
            atom_line("ATOM", 5, " CA ", "THR", 'A', 2, [13.856, 11.469, 6.066], "C"),
            atom_line("HETATM", 6, " O  ", "HOH", 'A', 101, [1.0, 2.0, 3.0], "O"),
            "CONECT    1    2".into(),
            "END".into(),
        ]
        .join("\n")
    }

    #[test]
    fn record_kind_dispatch() {
        assert_eq!(RecordKind::of("ATOM      1"), RecordKind::Atom);
        assert_eq!(RecordKind::of("HETATM    1"), RecordKind::Hetatm);
        assert_eq!(RecordKind::of("END"), RecordKind::End);
        assert_eq!(RecordKind::of("ENDMDL"), RecordKind::EndMdl);
        assert_eq!(RecordKind::of("MODEL        1"), RecordKind::Model);
        assert_eq!(RecordKind::of("SEQRES   1 A"), RecordKind::Other);
        assert_eq!(RecordKind::of(""), RecordKind::Other);
    }

    #[test]
    fn parses_header_block() {
        let pdb = parse_pdb(&crambin_fragment());
        assert_eq!(pdb.header.id_code, "1CRN");
        assert_eq!(pdb.header.classification, "PLANT PROTEIN");
        assert_eq!(pdb.header.dep_date, "30-APR-81");
        assert_eq!(pdb.structure.id, "1CRN");
        assert_eq!(
            pdb.title,
            "WATER STRUCTURE OF A HYDROPHOBIC PROTEIN AT ATOMIC RESOLUTION. PENTACOORDINATE"
        );
        assert_eq!(pdb.resolution, Some(1.5));
        assert_eq!(pdb.remarks.len(), 1);
        assert_eq!(pdb.remarks[0].num, "2");
    }

    #[test]
    fn parses_compounds() {
        let pdb = parse_pdb(&crambin_fragment());
        assert_eq!(pdb.compounds.len(), 1);
        assert_eq!(pdb.compounds[0].molecule, "CRAMBIN");
        assert_eq!(pdb.compounds[0].chains, vec!['A']);
        assert_eq!(pdb.chain_title('A'), Some("CRAMBIN"));
        assert_eq!(pdb.chain_title('B'), None);
        assert_eq!(pdb.molecule_name(), Some("CRAMBIN"));
    }

    #[test]
    fn parses_atoms_into_arena() {
        let pdb = parse_pdb(&crambin_fragment());
        let s = &pdb.structure;
        assert_eq!(s.atom_count(), 6);
        assert_eq!(s.residue_count(), 3);
        assert_eq!(s.chain_ids(), vec!['A']);
        let water = s.atom_by_serial(6).unwrap();
        assert!(water.is_hetatm);
        assert_eq!(s.residue_of(water).name, "HOH");
        assert_eq!(water.element.as_deref(), Some("O"));
        assert!(pdb.warnings.is_empty());
    }

    #[test]
    fn conect_reads_every_partner_window() {
        let pdb = parse_pdb("CONECT    1    2    3    4    5    6\nCONECT    7    8         9\nEND\n");
        assert_eq!(pdb.conects[0].bonded, vec![2, 3, 4, 5, 6]);
        assert_eq!(pdb.conects[1].bonded, vec![8]);
        assert_eq!(conect_partners("CONECT   10"), Vec::<u32>::new());
    }

    #[test]
    fn parses_conect_and_secondary() {
        let pdb = parse_pdb(&crambin_fragment());
        assert_eq!(pdb.conects, vec![Conect { serial: 1, bonded: vec![2] }]);
        assert_eq!(pdb.secondary.len(), 2);

        let helix = &pdb.secondary[0];
        assert_eq!(helix.kind, SecondaryKind::Helix);
        assert_eq!(helix.id, "1");
        assert_eq!((helix.init_chain, helix.init_seq), (Some('A'), Some(7)));
        assert_eq!((helix.end_chain, helix.end_seq), (Some('A'), Some(19)));

        let sheet = &pdb.secondary[1];
        assert_eq!(sheet.kind, SecondaryKind::Sheet);
        assert_eq!((sheet.init_chain, sheet.init_seq), (Some('A'), Some(1)));
        assert_eq!((sheet.end_chain, sheet.end_seq), (Some('A'), Some(4)));
        assert_eq!(sheet.kind.conf_type_id(), "STRN");
    }

    #[test]
    fn short_atom_line_is_warned_and_skipped() {
        let input = format!(
            "ATOM      1  N   THR A   1      17.047\n{}",
            atom_line("ATOM", 2, " CA ", "THR", 'A', 1, [1.0, 2.0, 3.0], "C")
        );
        let pdb = parse_pdb(&input);
        assert_eq!(pdb.structure.atom_count(), 1);
        assert_eq!(pdb.warnings.len(), 1);
        assert!(pdb.warnings.mentions("line 1"));
    }

    #[test]
    fn defaults_for_missing_columns() {
        let line = atom_line("ATOM", 1, " CA ", "ALA", ' ', 1, [1.0, 2.0, 3.0], "C");
        let pdb = parse_pdb(&line[..54]);
        let atom = &pdb.structure.atoms[0];
        assert_eq!(atom.occupancy, DEFAULT_OCCUPANCY);
        assert_eq!(atom.temp_factor, DEFAULT_TEMP_FACTOR);
        assert_eq!(atom.element, None);
        assert_eq!(pdb.structure.chain_ids(), vec![DEFAULT_CHAIN]);
    }

    #[test]
    fn unparseable_coordinate_is_nan() {
        let mut line = atom_line("ATOM", 1, " CA ", "ALA", 'A', 1, [1.0, 2.0, 3.0], "C");
        line.replace_range(30..38, "   ?????");
        let pdb = parse_pdb(&line);
        assert_eq!(pdb.structure.atom_count(), 1);
        assert!(pdb.structure.atoms[0].coords.x.is_nan());
        assert!(!pdb.structure.atoms[0].coords.is_finite());
    }

    #[test]
    fn only_first_model() {
        let input = [
            "MODEL        1".to_string(),
            atom_line("ATOM", 1, " CA ", "ALA", 'A', 1, [1.0, 2.0, 3.0], "C"),
            "ENDMDL".into(),
            "MODEL        2".into(),
            atom_line("ATOM", 1, " CA ", "ALA", 'A', 1, [1.5, 2.0, 3.0], "C"),
            "ENDMDL".into(),
            "CONECT    1    1".into(),
        ]
        .join("\n");
        let pdb = parse_pdb(&input);
        assert_eq!(pdb.structure.atom_count(), 1);
        assert_eq!(pdb.structure.atoms[0].coords.x, 1.0);
        assert_eq!(pdb.conects.len(), 1);
    }

    #[test]
    fn insertion_codes_split_residues() {
        let a = atom_line("ATOM", 1, " CA ", "ALA", 'A', 10, [1.0, 2.0, 3.0], "C");
        let mut b = atom_line("ATOM", 2, " CA ", "ALA", 'A', 10, [4.0, 5.0, 6.0], "C");
        b.replace_range(26..27, "A");
        let pdb = parse_pdb(&format!("{a}\n{b}"));
        assert_eq!(pdb.structure.residue_count(), 2);
        assert_eq!(pdb.structure.residues[1].i_code, Some('A'));
    }

    #[test]
    fn invalid_serial_is_skipped() {
        let mut line = atom_line("ATOM", 1, " CA ", "ALA", 'A', 1, [1.0, 2.0, 3.0], "C");
        line.replace_range(6..11, "  ***");
        let pdb = parse_pdb(&line);
        assert_eq!(pdb.structure.atom_count(), 0);
        assert!(pdb.warnings.mentions("invalid serial"));
    }

    #[test]
    fn charge_formats() {
        assert_eq!(parse_pdb_charge("2+"), Some(2));
        assert_eq!(parse_pdb_charge("1-"), Some(-1));
        assert_eq!(parse_pdb_charge("+2"), Some(2));
        assert_eq!(parse_pdb_charge("-3"), Some(-3));
        assert_eq!(parse_pdb_charge(""), None);
        assert_eq!(parse_pdb_charge("2"), None);
        assert_eq!(parse_pdb_charge("ab"), None);
    }

    #[test]
    fn resolution_text() {
        assert_eq!(parse_resolution("RESOLUTION.    2.20 ANGSTROMS."), Some(2.2));
        assert_eq!(parse_resolution("RESOLUTION. NOT APPLICABLE."), None);
    }

    #[test]
    fn reads_from_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", crambin_fragment()).unwrap();
        let pdb = parse_pdb_file(file.path()).unwrap();
        assert_eq!(pdb.structure.atom_count(), 6);
    }
}
