//! SMILES parser.
//!
//! A single left-to-right scan builds the molecule directly into a
//! [`Molecule`] arena. The parser keeps the previous atom, a stack of branch
//! points, and the open ring-closure labels. Stereo markers are read and
//! discarded, and isotopes are skipped.

use std::collections::BTreeMap;

use cyanea_core::{CyaneaError, Result, Warnings};

use crate::element::element_by_symbol;
use crate::molecule::{BondOrder, MolAtom, Molecule};

/// Parse a SMILES string into an unnamed molecule.
pub fn parse_smiles(smiles: &str) -> Result<Molecule> {
    parse_smiles_named(smiles, "")
}

/// Parse a SMILES string into a molecule called `name`.
///
/// Unknown bracket elements are logged and kept with atomic number 0; use
/// [`parse_smiles_with_warnings`] to collect them.
pub fn parse_smiles_named(smiles: &str, name: &str) -> Result<Molecule> {
    parse_smiles_with_warnings(smiles, name, &mut Warnings::new())
}

/// Parse a SMILES string, recording unknown element symbols in `warnings`.
///
/// # Errors
///
/// - [`CyaneaError::Unclosed`] for an unmatched `(` or `)`, or a ring label
///   still open at the end.
/// - [`CyaneaError::Parse`] for characters outside the grammar, malformed
///   bracket atoms, and ring closures that would bond an atom to itself or
///   duplicate a bond.
pub fn parse_smiles_with_warnings(smiles: &str, name: &str, warnings: &mut Warnings) -> Result<Molecule> {
    let mut parser = SmilesParser::new(smiles, name, warnings);
    parser.parse()?;
    parser.finish()
}

struct SmilesParser<'a, 'w> {
    src: &'a str,
    input: &'a [u8],
    pos: usize,
    mol: Molecule,
    /// Bracket atoms carry their own hydrogen count.
    bracketed: Vec<bool>,
    /// label -> (opening atom, bond symbol written at the opening, position)
    ring_open: BTreeMap<u16, (usize, Option<BondOrder>, usize)>,
    /// (branch point atom, position of the `(`)
    branches: Vec<(usize, usize)>,
    prev: Option<usize>,
    pending_bond: Option<BondOrder>,
    warnings: &'w mut Warnings,
}

impl<'a, 'w> SmilesParser<'a, 'w> {
    fn new(src: &'a str, name: &str, warnings: &'w mut Warnings) -> Self {
        SmilesParser {
            src,
            input: src.as_bytes(),
            pos: 0,
            mol: Molecule::with_name(name),
            bracketed: Vec::new(),
            ring_open: BTreeMap::new(),
            branches: Vec::new(),
            prev: None,
            pending_bond: None,
            warnings,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let ch = self.peek();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn error(&self, message: impl std::fmt::Display) -> CyaneaError {
        CyaneaError::Parse(format!("{message} at position {} in '{}'", self.pos + 1, self.src))
    }

    fn parse(&mut self) -> Result<()> {
        while let Some(ch) = self.peek() {
            match ch {
                b'(' => {
                    let Some(prev) = self.prev else {
                        return Err(self.error("branch opened before any atom"));
                    };
                    self.branches.push((prev, self.pos));
                    self.advance();
                }
                b')' => {
                    let Some((atom, _)) = self.branches.pop() else {
                        return Err(CyaneaError::Unclosed(format!(
                            "unmatched ')' at position {} in '{}'",
                            self.pos + 1,
                            self.src
                        )));
                    };
                    self.prev = Some(atom);
                    self.pending_bond = None;
                    self.advance();
                }
                b'-' | b'/' | b'\\' => self.set_bond(BondOrder::Single),
                b'=' => self.set_bond(BondOrder::Double),
                b'#' => self.set_bond(BondOrder::Triple),
                b':' => self.set_bond(BondOrder::Aromatic),
                b'.' => {
                    self.advance();
                    self.prev = None;
                    self.pending_bond = None;
                }
                b'%' => {
                    self.advance();
                    let label = self.two_digit_label()?;
                    self.ring_closure(label)?;
                }
                b'0'..=b'9' => {
                    self.advance();
                    self.ring_closure(u16::from(ch - b'0'))?;
                }
                b'[' => self.bracket_atom()?,
                _ if is_organic_start(ch) => self.organic_atom(ch)?,
                _ => {
                    let shown = self
                        .src
                        .get(self.pos..)
                        .and_then(|rest| rest.chars().next())
                        .unwrap_or('?');
                    return Err(self.error(format!("unexpected character '{shown}'")));
                }
            }
        }
        Ok(())
    }

    fn set_bond(&mut self, order: BondOrder) {
        self.pending_bond = Some(order);
        self.advance();
    }

    fn finish(mut self) -> Result<Molecule> {
        if let Some(&(_, pos)) = self.branches.first() {
            return Err(CyaneaError::Unclosed(format!(
                "branch opened at position {} in '{}' is never closed",
                pos + 1,
                self.src
            )));
        }
        if !self.ring_open.is_empty() {
            let labels: Vec<String> = self.ring_open.keys().map(u16::to_string).collect();
            return Err(CyaneaError::Unclosed(format!(
                "ring closure {} in '{}' is never closed",
                labels.join(", "),
                self.src
            )));
        }
        if self.pending_bond.is_some() {
            return Err(self.error("bond symbol with no atom after it"));
        }
        self.fill_implicit_hydrogens();
        self.mol.mark_ring_bonds();
        Ok(self.mol)
    }

    // -----------------------------------------------------------------------
    // Atoms
    // -----------------------------------------------------------------------

    fn organic_atom(&mut self, ch: u8) -> Result<()> {
        let start = self.pos;
        self.advance();
        let two_letter = match (ch, self.peek()) {
            (b'B', Some(b'r')) => Some("Br"),
            (b'C', Some(b'l')) => Some("Cl"),
            _ => None,
        };
        let (symbol, aromatic) = match two_letter {
            Some(sym) => {
                self.advance();
                (sym.to_string(), false)
            }
            None => (
                char::from(ch.to_ascii_uppercase()).to_string(),
                ch.is_ascii_lowercase(),
            ),
        };
        let atomic_number = element_by_symbol(&symbol)
            .map(|e| e.atomic_number)
            .ok_or_else(|| CyaneaError::Parse(format!("unknown organic atom at position {}", start + 1)))?;
        let mut atom = MolAtom::new(symbol, atomic_number);
        atom.is_aromatic = aromatic;
        self.place_atom(atom, false)
    }

    /// `[` isotope? symbol chirality? hcount? charge? class? `]`
    fn bracket_atom(&mut self) -> Result<()> {
        let open = self.pos;
        self.advance();
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        let first = match self.advance() {
            Some(c) if c.is_ascii_alphabetic() => c,
            Some(_) => return Err(self.error("expected element symbol in bracket atom")),
            None => return Err(self.error("bracket atom is never closed")),
        };
        let aromatic = first.is_ascii_lowercase();
        let mut symbol = String::from(char::from(first.to_ascii_uppercase()));
        let run_start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_lowercase()) {
            self.advance();
        }
        symbol.push_str(&self.src[run_start..self.pos]);

        if aromatic && !matches!(symbol.as_str(), "B" | "C" | "N" | "O" | "P" | "S" | "Se" | "As") {
            return Err(self.error(format!("'{}' cannot be aromatic", &self.src[run_start - 1..self.pos])));
        }

        let atomic_number = match element_by_symbol(&symbol) {
            Some(e) => e.atomic_number,
            None => {
                self.warnings.push(format!(
                    "Unknown element symbol '{symbol}' at position {} in '{}'",
                    open + 1,
                    self.src
                ));
                0
            }
        };

        let mut chiral = false;
        while self.peek() == Some(b'@') {
            self.advance();
            chiral = true;
        }
        // @TH1, @SP2, @OH12 style classes
        if chiral && self.peek().is_some_and(|c| c.is_ascii_uppercase() && c != b'H') {
            while self.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
                self.advance();
            }
        }

        let mut hydrogens = 0u8;
        if self.peek() == Some(b'H') {
            self.advance();
            hydrogens = self.digit().unwrap_or(1);
        }

        let charge = self.charge()?;

        if self.peek() == Some(b':') {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        match self.advance() {
            Some(b']') => {}
            Some(_) => {
                self.pos -= 1;
                return Err(self.error("unexpected character in bracket atom"));
            }
            None => return Err(self.error("bracket atom is never closed")),
        }

        let mut atom = MolAtom::new(symbol, atomic_number);
        atom.is_aromatic = aromatic;
        atom.implicit_hydrogens = hydrogens;
        atom.formal_charge = charge;
        self.place_atom(atom, true)
    }

    fn digit(&mut self) -> Option<u8> {
        let d = self.peek().filter(u8::is_ascii_digit)?;
        self.advance();
        Some(d - b'0')
    }

    /// `+`, `++`, `+2`, `-`, `--`, `-2`, or nothing.
    fn charge(&mut self) -> Result<i8> {
        let sign: i8 = match self.peek() {
            Some(b'+') => 1,
            Some(b'-') => -1,
            _ => return Ok(0),
        };
        let sign_char = self.advance();
        if let Some(d) = self.digit() {
            let mut magnitude = i8::try_from(d).unwrap_or(0);
            if let Some(d2) = self.digit() {
                magnitude = magnitude * 10 + i8::try_from(d2).unwrap_or(0);
            }
            return Ok(sign * magnitude);
        }
        let mut magnitude: i8 = 1;
        while self.peek() == sign_char {
            self.advance();
            magnitude = magnitude
                .checked_add(1)
                .ok_or_else(|| self.error("charge out of range"))?;
        }
        Ok(sign * magnitude)
    }

    fn place_atom(&mut self, atom: MolAtom, bracketed: bool) -> Result<()> {
        let idx = self.mol.push_atom(atom);
        self.bracketed.push(bracketed);
        if let Some(prev) = self.prev {
            let order = self.pending_bond.take().unwrap_or_else(|| self.implied_order(prev, idx));
            self.mol.push_bond(prev, idx, order)?;
        }
        self.pending_bond = None;
        self.prev = Some(idx);
        Ok(())
    }

    fn implied_order(&self, a: usize, b: usize) -> BondOrder {
        if self.mol.atoms[a].is_aromatic && self.mol.atoms[b].is_aromatic {
            BondOrder::Aromatic
        } else {
            BondOrder::Single
        }
    }

    // -----------------------------------------------------------------------
    // Rings
    // -----------------------------------------------------------------------

    fn two_digit_label(&mut self) -> Result<u16> {
        match (self.digit(), self.digit()) {
            (Some(a), Some(b)) => Ok(u16::from(a) * 10 + u16::from(b)),
            _ => Err(self.error("expected two digits after '%'")),
        }
    }

    /// Open `label`, or close it with a bond from the opening atom to the
    /// current one.
    fn ring_closure(&mut self, label: u16) -> Result<()> {
        let Some(current) = self.prev else {
            return Err(self.error(format!("ring label {label} before any atom")));
        };
        let Some((opener, open_bond, _)) = self.ring_open.remove(&label) else {
            self.ring_open
                .insert(label, (current, self.pending_bond.take(), self.pos));
            return Ok(());
        };
        if opener == current {
            return Err(self.error(format!("ring label {label} bonds an atom to itself")));
        }
        if self.mol.bond_between(opener, current).is_some() {
            return Err(self.error(format!("ring label {label} duplicates an existing bond")));
        }
        let order = self
            .pending_bond
            .take()
            .or(open_bond)
            .unwrap_or_else(|| self.implied_order(opener, current));
        self.mol.push_bond(opener, current, order)?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Hydrogens
    // -----------------------------------------------------------------------

    /// Organic-subset atoms get enough hydrogens to reach their lowest
    /// allowed valence at or above the bonds they already have. Aromatic
    /// atoms use only the lowest valence, give one of it to the pi system,
    /// and count each bond once.
    fn fill_implicit_hydrogens(&mut self) {
        for i in 0..self.mol.atom_count() {
            if self.bracketed[i] {
                continue;
            }
            let atom = &self.mol.atoms[i];
            let Some(element) = element_by_symbol(&atom.symbol) else {
                continue;
            };
            let mut valences = element.organic_valences.iter().map(|&v| usize::from(v));
            let target = if atom.is_aromatic {
                let used = self.mol.degree(i);
                valences
                    .next()
                    .map(|v| v.saturating_sub(1))
                    .filter(|&v| v >= used)
                    .map(|v| (v, used))
            } else {
                let used = self.mol.valence_used(i);
                valences.find(|&v| v >= used).map(|v| (v, used))
            };
            if let Some((target, used)) = target {
                self.mol.atoms[i].implicit_hydrogens = u8::try_from(target - used).unwrap_or(0);
            }
        }
    }
}

fn is_organic_start(ch: u8) -> bool {
    matches!(
        ch,
        b'B' | b'C' | b'N' | b'O' | b'P' | b'S' | b'F' | b'I' | b'b' | b'c' | b'n' | b'o' | b'p' | b's'
    )
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn chain_smiles() -> impl Strategy<Value = String> {
        let atoms = prop_oneof![Just("C"), Just("N"), Just("O"), Just("S"), Just("Cl")];
        proptest::collection::vec(atoms, 1..=20).prop_map(|parts| parts.concat())
    }

    proptest! {
        #[test]
        fn never_panics(s in "\\PC{0,60}") {
            let _ = parse_smiles(&s);
        }

        #[test]
        fn never_panics_on_smiles_alphabet(s in "[CNOScnos0-9()=#\\[\\]+@H%.-]{0,40}") {
            let _ = parse_smiles(&s);
        }

        #[test]
        fn chains_have_n_minus_one_bonds(smi in chain_smiles()) {
            let mol = parse_smiles(&smi).unwrap();
            prop_assert!(mol.atom_count() > 0);
            prop_assert_eq!(mol.bond_count(), mol.atom_count() - 1);
            prop_assert!(mol.bonds.iter().all(|b| !b.in_ring));
        }

        #[test]
        fn ring_of_n(n in 3usize..12) {
            let smi = format!("C1{}1", "C".repeat(n - 1));
            let mol = parse_smiles(&smi).unwrap();
            prop_assert_eq!(mol.bond_count(), n);
            prop_assert!(mol.bonds.iter().all(|b| b.in_ring));
            prop_assert!(mol.atoms.iter().all(|a| a.implicit_hydrogens == 2));
        }
    }
}
