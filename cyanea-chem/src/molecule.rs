//! Arena-style molecular graph.
//!
//! Atoms and bonds live in owned vectors and refer to each other by index.
//! Bonds are added through [`Molecule::push_bond`], which rejects self-bonds
//! and dangling endpoints, so every bond in a `Molecule` is valid.

use std::collections::VecDeque;

use cyanea_core::{Annotated, CyaneaError, Result, Summarizable};

/// Bond order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    /// Numeric bond order for valence sums.
    pub fn as_f64(self) -> f64 {
        match self {
            BondOrder::Single => 1.0,
            BondOrder::Double => 2.0,
            BondOrder::Triple => 3.0,
            BondOrder::Aromatic => 1.5,
        }
    }

    /// MDL bond type code (1, 2, 3, or 4 for aromatic).
    pub fn mdl_code(self) -> u8 {
        match self {
            BondOrder::Single => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
            BondOrder::Aromatic => 4,
        }
    }

    pub fn from_mdl_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(BondOrder::Single),
            2 => Some(BondOrder::Double),
            3 => Some(BondOrder::Triple),
            4 => Some(BondOrder::Aromatic),
            _ => None,
        }
    }
}

/// An atom in a molecular graph.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MolAtom {
    /// Element symbol as written in the input. Kept even when unknown.
    pub symbol: String,
    /// 0 when the symbol is not in the element table.
    pub atomic_number: u8,
    pub formal_charge: i8,
    pub implicit_hydrogens: u8,
    pub is_aromatic: bool,
    /// Cartesian coordinates in Angstroms.
    pub coords: [f64; 3],
}

impl MolAtom {
    /// A neutral, non-aromatic atom at the origin.
    pub fn new(symbol: impl Into<String>, atomic_number: u8) -> Self {
        MolAtom {
            symbol: symbol.into(),
            atomic_number,
            formal_charge: 0,
            implicit_hydrogens: 0,
            is_aromatic: false,
            coords: [0.0; 3],
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.atomic_number == 0
    }

    pub fn distance_to(&self, other: &MolAtom) -> f64 {
        let [dx, dy, dz] = [0, 1, 2].map(|k| self.coords[k] - other.coords[k]);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// A bond between two atoms, by atom index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bond {
    pub atom1: usize,
    pub atom2: usize,
    pub order: BondOrder,
    /// Set by [`Molecule::mark_ring_bonds`].
    pub in_ring: bool,
}

impl Bond {
    /// The endpoint opposite `atom`.
    pub fn other(&self, atom: usize) -> usize {
        if self.atom1 == atom {
            self.atom2
        } else {
            self.atom1
        }
    }
}

/// A molecule: atoms, bonds, SDF header lines, and data items.
///
/// The adjacency index is not serialized; it is rebuilt on deserialization.
/// Call [`Molecule::reindex`] after editing `atoms` or `bonds` directly.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "MoleculeArenas"))]
pub struct Molecule {
    pub name: String,
    /// MOL header line 2 (program/timestamp).
    pub generator: String,
    /// MOL header line 3.
    pub comment: String,
    pub atoms: Vec<MolAtom>,
    pub bonds: Vec<Bond>,
    /// SDF data items in input order.
    pub properties: Vec<(String, String)>,
    /// adjacency[atom] = (neighbor, bond index)
    #[cfg_attr(feature = "serde", serde(skip))]
    adjacency: Vec<Vec<(usize, usize)>>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct MoleculeArenas {
    name: String,
    generator: String,
    comment: String,
    atoms: Vec<MolAtom>,
    bonds: Vec<Bond>,
    properties: Vec<(String, String)>,
}

#[cfg(feature = "serde")]
impl From<MoleculeArenas> for Molecule {
    fn from(arenas: MoleculeArenas) -> Self {
        let mut mol = Molecule {
            name: arenas.name,
            generator: arenas.generator,
            comment: arenas.comment,
            atoms: arenas.atoms,
            bonds: arenas.bonds,
            properties: arenas.properties,
            adjacency: Vec::new(),
        };
        mol.reindex();
        mol
    }
}

impl Molecule {
    pub fn with_name(name: impl Into<String>) -> Self {
        Molecule {
            name: name.into(),
            ..Molecule::default()
        }
    }

    /// Append an atom and return its index.
    pub fn push_atom(&mut self, atom: MolAtom) -> usize {
        self.atoms.push(atom);
        self.adjacency.push(Vec::new());
        self.atoms.len() - 1
    }

    /// Append a bond and return its index.
    ///
    /// # Errors
    ///
    /// Fails on a self-bond or an endpoint past the end of the atom list.
    pub fn push_bond(&mut self, atom1: usize, atom2: usize, order: BondOrder) -> Result<usize> {
        let n = self.atoms.len();
        if atom1 >= n || atom2 >= n {
            return Err(CyaneaError::InvalidInput(format!(
                "bond {}-{} references a missing atom ({n} atoms)",
                atom1 + 1,
                atom2 + 1
            )));
        }
        if atom1 == atom2 {
            return Err(CyaneaError::InvalidInput(format!(
                "atom {} cannot bond to itself",
                atom1 + 1
            )));
        }
        let idx = self.bonds.len();
        self.bonds.push(Bond {
            atom1,
            atom2,
            order,
            in_ring: false,
        });
        self.adjacency[atom1].push((atom2, idx));
        self.adjacency[atom2].push((atom1, idx));
        Ok(idx)
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    /// Neighbor atom indices, in bond insertion order.
    pub fn neighbors(&self, atom: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency[atom].iter().map(|&(n, _)| n)
    }

    /// (neighbor, bond) pairs, in bond insertion order.
    pub fn bonds_of(&self, atom: usize) -> impl Iterator<Item = (usize, &Bond)> + '_ {
        self.adjacency[atom]
            .iter()
            .map(move |&(n, bi)| (n, &self.bonds[bi]))
    }

    pub fn degree(&self, atom: usize) -> usize {
        self.adjacency[atom].len()
    }

    pub fn bond_between(&self, a1: usize, a2: usize) -> Option<&Bond> {
        self.adjacency
            .get(a1)?
            .iter()
            .find(|&&(n, _)| n == a2)
            .map(|&(_, bi)| &self.bonds[bi])
    }

    /// Sum of bond orders at an atom, rounded.
    pub fn valence_used(&self, atom: usize) -> usize {
        let total: f64 = self.bonds_of(atom).map(|(_, b)| b.order.as_f64()).sum();
        total.round() as usize
    }

    /// Value of a data item by name.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Connected components as lists of atom indices, each in BFS order
    /// from its lowest-index atom.
    pub fn components(&self) -> Vec<Vec<usize>> {
        let mut seen = vec![false; self.atoms.len()];
        let mut out = Vec::new();
        for start in 0..self.atoms.len() {
            if seen[start] {
                continue;
            }
            seen[start] = true;
            let mut order = vec![start];
            let mut queue = VecDeque::from([start]);
            while let Some(cur) = queue.pop_front() {
                for n in self.neighbors(cur) {
                    if !seen[n] {
                        seen[n] = true;
                        order.push(n);
                        queue.push_back(n);
                    }
                }
            }
            out.push(order);
        }
        out
    }

    /// Flag every bond that lies on a cycle.
    ///
    /// A bond is a ring bond when its endpoints stay connected after the bond
    /// is removed.
    pub fn mark_ring_bonds(&mut self) {
        for bi in 0..self.bonds.len() {
            let in_ring = self.connected_without(self.bonds[bi].atom1, self.bonds[bi].atom2, bi);
            self.bonds[bi].in_ring = in_ring;
        }
    }

    fn connected_without(&self, from: usize, to: usize, skip_bond: usize) -> bool {
        let mut seen = vec![false; self.atoms.len()];
        seen[from] = true;
        let mut queue = VecDeque::from([from]);
        while let Some(cur) = queue.pop_front() {
            for &(n, bi) in &self.adjacency[cur] {
                if bi == skip_bond || seen[n] {
                    continue;
                }
                if n == to {
                    return true;
                }
                seen[n] = true;
                queue.push_back(n);
            }
        }
        false
    }

    /// Rebuild the adjacency index after the public vectors were edited.
    pub fn reindex(&mut self) {
        self.adjacency = vec![Vec::new(); self.atoms.len()];
        for (bi, b) in self.bonds.iter().enumerate() {
            if b.atom1 < self.atoms.len() && b.atom2 < self.atoms.len() {
                self.adjacency[b.atom1].push((b.atom2, bi));
                self.adjacency[b.atom2].push((b.atom1, bi));
            }
        }
    }
}

impl Annotated for Molecule {
    fn name(&self) -> &str {
        &self.name
    }

    /// The MOL header comment line.
    fn description(&self) -> Option<&str> {
        let comment = self.comment.trim();
        (!comment.is_empty()).then_some(comment)
    }
}

impl Summarizable for Molecule {
    fn summary(&self) -> String {
        format!(
            "{}: {} atoms, {} bonds",
            if self.name.is_empty() { "Molecule" } else { &self.name },
            self.atom_count(),
            self.bond_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carbon() -> MolAtom {
        MolAtom::new("C", 6)
    }

    fn cyclopropane_with_tail() -> Molecule {
        let mut mol = Molecule::with_name("methylcyclopropane");
        for _ in 0..4 {
            mol.push_atom(carbon());
        }
        mol.push_bond(0, 1, BondOrder::Single).unwrap();
        mol.push_bond(1, 2, BondOrder::Single).unwrap();
        mol.push_bond(2, 0, BondOrder::Single).unwrap();
        mol.push_bond(2, 3, BondOrder::Single).unwrap();
        mol
    }

    #[test]
    fn arena_construction() {
        let mol = cyclopropane_with_tail();
        assert_eq!(mol.atom_count(), 4);
        assert_eq!(mol.bond_count(), 4);
        assert_eq!(mol.degree(2), 3);
        assert_eq!(mol.neighbors(0).collect::<Vec<_>>(), vec![1, 2]);
        assert!(mol.bond_between(3, 2).is_some());
        assert!(mol.bond_between(3, 0).is_none());
        assert_eq!(mol.bonds[3].other(3), 2);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip_rebuilds_adjacency() {
        let mol = cyclopropane_with_tail();
        let json = serde_json::to_string(&mol).unwrap();
        assert!(!json.contains("adjacency"));
        let back: Molecule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mol);
        assert_eq!(back.degree(2), 3);
        assert_eq!(back.neighbors(0).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn invalid_bonds_rejected() {
        let mut mol = Molecule::default();
        mol.push_atom(carbon());
        mol.push_atom(carbon());
        assert!(mol.push_bond(0, 0, BondOrder::Single).is_err());
        assert!(mol.push_bond(0, 2, BondOrder::Single).is_err());
        assert_eq!(mol.bond_count(), 0);
    }

    #[test]
    fn ring_bonds() {
        let mut mol = cyclopropane_with_tail();
        mol.mark_ring_bonds();
        let flags: Vec<bool> = mol.bonds.iter().map(|b| b.in_ring).collect();
        assert_eq!(flags, vec![true, true, true, false]);
    }

    #[test]
    fn components_and_valence() {
        let mut mol = cyclopropane_with_tail();
        let o = mol.push_atom(MolAtom::new("O", 8));
        let c = mol.push_atom(carbon());
        mol.push_bond(o, c, BondOrder::Double).unwrap();
        let comps = mol.components();
        assert_eq!(comps, vec![vec![0, 1, 2, 3], vec![4, 5]]);
        assert_eq!(mol.valence_used(o), 2);
        assert_eq!(mol.valence_used(2), 3);
    }

    #[test]
    fn reindex_after_edit() {
        let mut mol = cyclopropane_with_tail();
        mol.bonds.pop();
        mol.reindex();
        assert_eq!(mol.degree(3), 0);
        assert_eq!(mol.degree(2), 2);
    }

    #[test]
    fn mdl_codes() {
        for order in [BondOrder::Single, BondOrder::Double, BondOrder::Triple, BondOrder::Aromatic] {
            assert_eq!(BondOrder::from_mdl_code(i64::from(order.mdl_code())), Some(order));
        }
        assert_eq!(BondOrder::from_mdl_code(8), None);
    }

    #[test]
    fn summary_and_properties() {
        let mut mol = cyclopropane_with_tail();
        mol.properties.push(("MW".into(), "56.1".into()));
        assert_eq!(mol.summary(), "methylcyclopropane: 4 atoms, 4 bonds");
        assert_eq!(mol.property("MW"), Some("56.1"));
        assert_eq!(mol.property("LogP"), None);
        assert_eq!(Molecule::default().summary(), "Molecule: 0 atoms, 0 bonds");
    }
}
