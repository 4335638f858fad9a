//! Small-molecule conversion for the Cyanea format converters.
//!
//! - **Molecular graph**: [`Molecule`] holds atoms and bonds in flat arenas
//!   addressed by index, with an adjacency list for neighbor queries
//! - **SDF / MOL V2000**: [`parse_sdf`], [`write_mol_block`], [`format_sdf`]
//! - **SDF → PDB**: [`sdf_to_pdb`] writes HETATM and CONECT records
//! - **SMILES**: [`parse_smiles`] builds a [`Molecule`] with implicit
//!   hydrogens and ring bonds marked
//! - **3D embedding**: [`embed_3d`], a fast placement heuristic driven by a
//!   caller-supplied RNG
//! - **SMILES → SDF**: [`smiles_to_sdf`]
//!
//! # Example
//!
//! ```
//! use cyanea_chem::{parse_smiles, smiles_to_sdf, sdf_to_pdb, SdfToPdbConfig, SmilesToSdfConfig};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let benzene = parse_smiles("c1ccccc1").unwrap();
//! assert_eq!(benzene.atom_count(), 6);
//! assert!(benzene.bonds.iter().all(|b| b.in_ring));
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let sdf = smiles_to_sdf("CCO ethanol", &SmilesToSdfConfig::default(), &mut rng).unwrap();
//! assert!(sdf.starts_with("ethanol\n"));
//!
//! let pdb = sdf_to_pdb(&sdf, &SdfToPdbConfig::default()).unwrap();
//! assert_eq!(pdb.lines().filter(|l| l.starts_with("HETATM")).count(), 3);
//! ```

pub mod convert;
pub mod element;
pub mod embed;
pub mod molecule;
pub mod pdb;
pub mod sdf;
pub mod smiles;

pub use convert::{smiles_to_molecules, smiles_to_sdf, SmilesToSdfConfig};
pub use element::{bond_length, element_by_number, element_by_symbol, Element};
pub use embed::embed_3d;
pub use molecule::{Bond, BondOrder, MolAtom, Molecule};
pub use pdb::{sdf_to_pdb, write_pdb, SdfToPdbConfig};
pub use sdf::{
    format_sdf, parse_mol_block, parse_sdf, parse_sdf_file, write_mol_block, write_sdf, SdfFile,
};
pub use smiles::{parse_smiles, parse_smiles_named, parse_smiles_with_warnings};
