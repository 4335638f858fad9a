//! Arena model for macromolecular structures.
//!
//! A [`Structure`] owns three flat vectors: atoms, residues, and chains.
//! Residues and chains refer to their members by index into those vectors,
//! and every atom knows the index of its residue. Serializers can filter or
//! reorder atoms freely without invalidating anything.

use std::collections::HashMap;

use cyanea_core::{Annotated, Summarizable};

/// A point in 3D Cartesian space.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point3D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Whether all three coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Backbone atom names shared by all standard amino acids.
pub const BACKBONE_ATOMS: [&str; 4] = ["N", "CA", "C", "O"];

/// A single ATOM or HETATM record.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Atom {
    /// Serial number from the file.
    pub serial: u32,
    /// Atom name, trimmed (e.g. "CA", "OD1").
    pub name: String,
    pub alt_loc: Option<char>,
    /// Coordinates in Angstroms. A coordinate that did not parse is NaN.
    pub coords: Point3D,
    pub occupancy: f64,
    /// Temperature factor (B-factor).
    pub temp_factor: f64,
    /// Element symbol from columns 77-78, when present.
    pub element: Option<String>,
    pub charge: Option<i8>,
    pub is_hetatm: bool,
    /// Index of the owning residue in [`Structure::residues`].
    pub residue: usize,
}

impl Atom {
    /// Whether this atom is a backbone atom (N, CA, C, O).
    pub fn is_backbone(&self) -> bool {
        BACKBONE_ATOMS.contains(&self.name.as_str())
    }

    pub fn is_alpha_carbon(&self) -> bool {
        self.name == "CA"
    }

    /// The element column, or the atom name with digits removed.
    pub fn element_symbol(&self) -> String {
        match &self.element {
            Some(e) => e.clone(),
            None => self.name.chars().filter(|c| !c.is_ascii_digit()).collect(),
        }
    }

    pub fn is_hydrogen(&self) -> bool {
        match &self.element {
            Some(e) => e.eq_ignore_ascii_case("H") || e.eq_ignore_ascii_case("D"),
            None => self.name.starts_with('H'),
        }
    }

    /// `ATOM` or `HETATM`.
    pub fn record_name(&self) -> &'static str {
        if self.is_hetatm {
            "HETATM"
        } else {
            "ATOM"
        }
    }
}

/// A residue: consecutive atoms sharing name, sequence number, and
/// insertion code within one chain.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Residue {
    /// Residue name (e.g. "ALA", "HOH").
    pub name: String,
    pub seq_num: i32,
    pub i_code: Option<char>,
    /// Index of the owning chain in [`Structure::chains`].
    pub chain: usize,
    /// Atom indices, in file order.
    pub atoms: Vec<usize>,
}

impl Annotated for Residue {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A chain: residues in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chain {
    /// Single-character PDB chain identifier. Two-character mmCIF
    /// `auth_asym_id` values are not representable; the PDB reader never
    /// produces them.
    pub id: char,
    pub residues: Vec<usize>,
}

/// A complete structure held as index-linked arenas.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "StructureArenas"))]
pub struct Structure {
    /// PDB identifier or user-supplied name.
    pub id: String,
    pub atoms: Vec<Atom>,
    pub residues: Vec<Residue>,
    pub chains: Vec<Chain>,
    #[cfg_attr(feature = "serde", serde(skip))]
    serial_index: HashMap<u32, usize>,
}

/// Serialized form of [`Structure`]; the serial index is rebuilt on load.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct StructureArenas {
    id: String,
    atoms: Vec<Atom>,
    residues: Vec<Residue>,
    chains: Vec<Chain>,
}

#[cfg(feature = "serde")]
impl From<StructureArenas> for Structure {
    fn from(arenas: StructureArenas) -> Self {
        let mut structure = Structure {
            id: arenas.id,
            atoms: arenas.atoms,
            residues: arenas.residues,
            chains: arenas.chains,
            serial_index: HashMap::new(),
        };
        structure.reindex();
        structure
    }
}

/// Fields identifying the residue an incoming atom belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidueKey<'a> {
    pub chain_id: char,
    pub name: &'a str,
    pub seq_num: i32,
    pub i_code: Option<char>,
}

impl Structure {
    pub fn new(id: impl Into<String>) -> Self {
        Structure {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Append an atom, creating its chain and residue on first sight.
    ///
    /// A new residue starts whenever the key differs from the chain's last
    /// residue. The atom's `residue` field is overwritten. Returns the
    /// atom's index.
    pub fn push_atom(&mut self, mut atom: Atom, key: ResidueKey<'_>) -> usize {
        let chain = match self.chains.iter().position(|c| c.id == key.chain_id) {
            Some(c) => c,
            None => {
                self.chains.push(Chain {
                    id: key.chain_id,
                    residues: Vec::new(),
                });
                self.chains.len() - 1
            }
        };

        let same_residue = self.chains[chain].residues.last().is_some_and(|&r| {
            let res = &self.residues[r];
            res.seq_num == key.seq_num && res.i_code == key.i_code && res.name == key.name
        });
        let residue = if same_residue {
            self.chains[chain].residues[self.chains[chain].residues.len() - 1]
        } else {
            self.residues.push(Residue {
                name: key.name.to_string(),
                seq_num: key.seq_num,
                i_code: key.i_code,
                chain,
                atoms: Vec::new(),
            });
            let r = self.residues.len() - 1;
            self.chains[chain].residues.push(r);
            r
        };

        let index = self.atoms.len();
        atom.residue = residue;
        self.residues[residue].atoms.push(index);
        self.serial_index.entry(atom.serial).or_insert(index);
        self.atoms.push(atom);
        index
    }

    /// Rebuild the serial lookup after the public vectors were edited.
    /// The first atom with a given serial wins.
    pub fn reindex(&mut self) {
        self.serial_index.clear();
        for (i, atom) in self.atoms.iter().enumerate() {
            self.serial_index.entry(atom.serial).or_insert(i);
        }
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }

    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }

    /// First atom with the given serial number.
    pub fn atom_by_serial(&self, serial: u32) -> Option<&Atom> {
        self.serial_index.get(&serial).map(|&i| &self.atoms[i])
    }

    pub fn residue_of(&self, atom: &Atom) -> &Residue {
        &self.residues[atom.residue]
    }

    /// Chain id of an atom.
    pub fn chain_id_of(&self, atom: &Atom) -> char {
        self.chains[self.residues[atom.residue].chain].id
    }

    pub fn chain(&self, id: char) -> Option<&Chain> {
        self.chains.iter().find(|c| c.id == id)
    }

    /// Chain ids in order of first appearance.
    pub fn chain_ids(&self) -> Vec<char> {
        self.chains.iter().map(|c| c.id).collect()
    }

    /// Atoms of one chain, in file order.
    pub fn chain_atoms<'a>(&'a self, chain: &'a Chain) -> impl Iterator<Item = &'a Atom> + 'a {
        chain
            .residues
            .iter()
            .flat_map(move |&r| self.residues[r].atoms.iter().map(move |&a| &self.atoms[a]))
    }
}

/// Which chains a conversion should include.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ChainSelection {
    #[default]
    All,
    /// Upper-case chain ids.
    Specific(Vec<char>),
}

impl ChainSelection {
    /// Parse a comma-separated id list such as `"a, B"`.
    ///
    /// Ids are upper-cased; blank entries are ignored. An empty list or
    /// `"all"` selects every chain.
    pub fn from_list(list: &str) -> Self {
        if list.trim().eq_ignore_ascii_case("all") {
            return ChainSelection::All;
        }
        let ids: Vec<char> = list
            .split(',')
            .filter_map(|c| c.trim().chars().next())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        if ids.is_empty() {
            ChainSelection::All
        } else {
            ChainSelection::Specific(ids)
        }
    }

    pub fn includes(&self, chain: char) -> bool {
        match self {
            ChainSelection::All => true,
            ChainSelection::Specific(ids) => ids.contains(&chain),
        }
    }
}

impl Annotated for Structure {
    fn name(&self) -> &str {
        &self.id
    }
}

impl Summarizable for Structure {
    fn summary(&self) -> String {
        format!(
            "Structure {}: {} chain(s), {} residue(s), {} atom(s)",
            self.id,
            self.chain_count(),
            self.residue_count(),
            self.atom_count(),
        )
    }
}
