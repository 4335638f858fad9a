//! Column-exact PDB line builders for tests.

/// Build an ATOM/HETATM line. `name` is the 4-column atom name field
/// (e.g. `" CA "`).
#[allow(clippy::too_many_arguments)]
pub(crate) fn atom_line(
    record: &str,
    serial: u32,
    name: &str,
    res_name: &str,
    chain: char,
    res_seq: i32,
    xyz: [f64; 3],
    element: &str,
) -> String {
    format!(
        "{record:<6}{serial:>5} {name:<4} {res_name:>3} {chain}{res_seq:>4}    {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {element:>2}",
        xyz[0], xyz[1], xyz[2], 1.0, 10.0
    )
}

pub(crate) fn header_line(classification: &str, date: &str, id: &str) -> String {
    format!("HEADER    {classification:<40}{date:<9}   {id}")
}
