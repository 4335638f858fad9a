//! Macromolecular structure conversion for the Cyanea format converters.
//!
//! - **PDB parsing**: [`pdb::parse_pdb`] reads HEADER, TITLE, COMPND, REMARK,
//!   ATOM/HETATM, CONECT, HELIX and SHEET records into an index-linked
//!   [`Structure`]
//! - **PDB → mmCIF**: [`mmcif::pdb_to_cif`]
//! - **PDB → MOL2**: [`mol2::pdb_to_mol2`] with Sybyl typing and bond guessing
//! - **PDB → FASTA**: [`fasta::pdb_to_fasta`]
//!
//! # Quick start
//!
//! ```
//! use cyanea_struct::{parse_pdb, pdb_to_fasta, PdbFastaConfig};
//! use cyanea_core::Summarizable;
//!
//! let pdb_text = "\
//! HEADER                                                        1TST
//! ATOM      1  N   ALA A   1       1.000   2.000   3.000  1.00  0.00           N
//! ATOM      2  CA  ALA A   1       2.000   2.000   3.000  1.00  0.00           C
//! ATOM      3  C   ALA A   1       3.000   2.000   3.000  1.00  0.00           C
//! ATOM      4  O   ALA A   1       3.000   3.000   3.000  1.00  0.00           O
//! TER
//! END
//! ";
//!
//! let pdb = parse_pdb(pdb_text);
//! assert_eq!(pdb.structure.chain_count(), 1);
//! assert!(pdb.structure.summary().contains("1TST"));
//!
//! let fasta = pdb_to_fasta(pdb_text, &PdbFastaConfig::default()).unwrap();
//! assert_eq!(fasta, ">A|Chain A\nA");
//! ```

pub mod fasta;
pub mod mmcif;
pub mod mol2;
pub mod pdb;
pub mod types;

#[cfg(test)]
pub(crate) mod testutil;

pub use fasta::{chain_sequences, pdb_to_fasta, three_to_one, ChainSequences, PdbFastaConfig};
pub use mmcif::{cif_quote, pdb_to_cif, read_loop, write_cif, CifConfig};
pub use mol2::{
    build_molecules, guess_bonds, pdb_to_mol2, sybyl_type, write_mol2, AtomTyping, Mol2Atom,
    Mol2Bond, Mol2Config, Mol2Molecule,
};
pub use pdb::{
    parse_pdb, parse_pdb_file, Compound, Conect, PdbFile, PdbHeader, RecordKind, Remark,
    SecondaryKind, SecondaryStructure,
};
pub use types::{Atom, Chain, ChainSelection, Point3D, Residue, ResidueKey, Structure};

#[cfg(test)]
mod tests {
    use super::*;

    const PEPTIDE: &str = "\
HEADER    DE NOVO PROTEIN                         12-JUN-24   1INT
ATOM      1  N   ALA A   1       0.000   0.000   0.000  1.00  0.00           N
ATOM      2  CA  ALA A   1       1.458   0.000   0.000  1.00  0.00           C
ATOM      3  C   ALA A   1       2.009   1.420   0.000  1.00  0.00           C
ATOM      4  O   ALA A   1       1.246   2.390   0.000  1.00  0.00           O
ATOM      5  N   GLY A   2       3.325   1.506   0.000  1.00  0.00           N
ATOM      6  CA  GLY A   2       3.988   2.802   0.000  1.00  0.00           C
ATOM      7  C   GLY A   2       5.504   2.714   0.000  1.00  0.00           C
ATOM      8  O   GLY A   2       6.092   1.635   0.000  1.00  0.00           O
ATOM      9  N   VAL A   3       6.120   3.898   0.000  1.00  0.00           N
ATOM     10  CA  VAL A   3       7.574   3.984   0.000  1.00  0.00           C
ATOM     11  C   VAL A   3       8.173   2.578   0.000  1.00  0.00           C
ATOM     12  O   VAL A   3       9.398   2.445   0.000  1.00  0.00           O
TER
END
";

    #[test]
    fn one_file_three_formats() {
        let pdb = parse_pdb(PEPTIDE);
        assert_eq!(pdb.header.id_code, "1INT");
        assert_eq!(pdb.structure.residue_count(), 3);

        let fasta = pdb_to_fasta(PEPTIDE, &PdbFastaConfig::default()).unwrap();
        assert_eq!(fasta, ">A|Chain A\nAGV");

        let cif = pdb_to_cif(PEPTIDE, &CifConfig::default()).unwrap();
        assert_eq!(read_loop(&cif, "_atom_site").len(), 12);

        let mol2 = pdb_to_mol2(PEPTIDE, &Mol2Config::default()).unwrap();
        assert!(mol2.contains("@<TRIPOS>MOLECULE\nDE NOVO PROTEIN_chain_A\n"));
    }

    #[test]
    fn peptide_bonds_are_guessed() {
        let pdb = parse_pdb(PEPTIDE);
        let molecules = build_molecules(&pdb, &Mol2Config::default());
        assert_eq!(molecules.len(), 1);
        let bonds = &molecules[0].bonds;
        // C(3) of ALA 1 to N(5) of GLY 2 is 1.32 A.
        assert!(bonds.iter().any(|b| (b.atom1, b.atom2) == (3, 5)));
        // N-CA within each residue.
        assert!(bonds.iter().any(|b| (b.atom1, b.atom2) == (1, 2)));
    }
}
