//! Element table with the valence and radius data the SMILES parser and
//! embedder need.

/// A chemical element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    pub atomic_number: u8,
    pub symbol: &'static str,
    pub name: &'static str,
    /// Allowed valences for SMILES organic-subset atoms, lowest first.
    /// Empty for elements that need brackets.
    pub organic_valences: &'static [u8],
    /// Single-bond covalent radius in Angstroms, for the elements the
    /// embedder has data for.
    pub covalent_radius: Option<f64>,
}

/// Bond length used when either element has no covalent radius.
pub const DEFAULT_BOND_LENGTH: f64 = 1.5;

const fn el(
    atomic_number: u8,
    symbol: &'static str,
    name: &'static str,
    organic_valences: &'static [u8],
    covalent_radius: Option<f64>,
) -> Element {
    Element {
        atomic_number,
        symbol,
        name,
        organic_valences,
        covalent_radius,
    }
}

/// H through Xe.
static ELEMENTS: [Element; 54] = [
    el(1, "H", "Hydrogen", &[], Some(0.31)),
    el(2, "He", "Helium", &[], None),
    el(3, "Li", "Lithium", &[], None),
    el(4, "Be", "Beryllium", &[], None),
    el(5, "B", "Boron", &[3], None),
    el(6, "C", "Carbon", &[4], Some(0.76)),
    el(7, "N", "Nitrogen", &[3, 5], Some(0.71)),
    el(8, "O", "Oxygen", &[2], Some(0.66)),
    el(9, "F", "Fluorine", &[1], Some(0.57)),
    el(10, "Ne", "Neon", &[], None),
    el(11, "Na", "Sodium", &[], None),
    el(12, "Mg", "Magnesium", &[], None),
    el(13, "Al", "Aluminum", &[], None),
    el(14, "Si", "Silicon", &[], None),
    el(15, "P", "Phosphorus", &[3, 5], Some(1.07)),
    el(16, "S", "Sulfur", &[2, 4, 6], Some(1.05)),
    el(17, "Cl", "Chlorine", &[1], Some(0.99)),
    el(18, "Ar", "Argon", &[], None),
    el(19, "K", "Potassium", &[], None),
    el(20, "Ca", "Calcium", &[], None),
    el(21, "Sc", "Scandium", &[], None),
    el(22, "Ti", "Titanium", &[], None),
    el(23, "V", "Vanadium", &[], None),
    el(24, "Cr", "Chromium", &[], None),
    el(25, "Mn", "Manganese", &[], None),
    el(26, "Fe", "Iron", &[], None),
    el(27, "Co", "Cobalt", &[], None),
    el(28, "Ni", "Nickel", &[], None),
    el(29, "Cu", "Copper", &[], None),
    el(30, "Zn", "Zinc", &[], None),
    el(31, "Ga", "Gallium", &[], None),
    el(32, "Ge", "Germanium", &[], None),
    el(33, "As", "Arsenic", &[], None),
    el(34, "Se", "Selenium", &[], None),
    el(35, "Br", "Bromine", &[1], Some(1.20)),
    el(36, "Kr", "Krypton", &[], None),
    el(37, "Rb", "Rubidium", &[], None),
    el(38, "Sr", "Strontium", &[], None),
    el(39, "Y", "Yttrium", &[], None),
    el(40, "Zr", "Zirconium", &[], None),
    el(41, "Nb", "Niobium", &[], None),
    el(42, "Mo", "Molybdenum", &[], None),
    el(43, "Tc", "Technetium", &[], None),
    el(44, "Ru", "Ruthenium", &[], None),
    el(45, "Rh", "Rhodium", &[], None),
    el(46, "Pd", "Palladium", &[], None),
    el(47, "Ag", "Silver", &[], None),
    el(48, "Cd", "Cadmium", &[], None),
    el(49, "In", "Indium", &[], None),
    el(50, "Sn", "Tin", &[], None),
    el(51, "Sb", "Antimony", &[], None),
    el(52, "Te", "Tellurium", &[], None),
    el(53, "I", "Iodine", &[1], Some(1.39)),
    el(54, "Xe", "Xenon", &[], None),
];

/// Look up an element by its case-sensitive symbol ("C", "Cl", "Fe").
pub fn element_by_symbol(symbol: &str) -> Option<&'static Element> {
    ELEMENTS.iter().find(|e| e.symbol == symbol)
}

/// Look up an element by atomic number.
pub fn element_by_number(n: u8) -> Option<&'static Element> {
    ELEMENTS.get(usize::from(n).checked_sub(1)?)
}

/// Ideal bond length between two elements: the sum of their covalent radii
/// scaled by bond order (0.87 for double, 0.78 for triple).
///
/// Pairs with a missing radius get [`DEFAULT_BOND_LENGTH`] regardless of order.
pub fn bond_length(a: &str, b: &str, order: u8) -> f64 {
    let radius = |s| element_by_symbol(s).and_then(|e| e.covalent_radius);
    let (Some(ra), Some(rb)) = (radius(a), radius(b)) else {
        return DEFAULT_BOND_LENGTH;
    };
    let scale = match order {
        2 => 0.87,
        3 => 0.78,
        _ => 1.0,
    };
    (ra + rb) * scale
}
