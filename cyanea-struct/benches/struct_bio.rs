use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cyanea_struct::{
    parse_pdb, pdb_to_cif, pdb_to_fasta, pdb_to_mol2, CifConfig, Mol2Config, PdbFastaConfig,
};

/// Synthetic PDB text with `n_residues` residues in chain A, four backbone
/// atoms each, laid out along a rough alpha helix.
fn synthetic_pdb(n_residues: usize) -> String {
    let mut lines = vec![format!("HEADER    {:<40}{:<9}   BNCH", "BENCHMARK", "01-JAN-24")];

    let residues = ["ALA", "GLY", "VAL", "LEU", "ILE"];
    let backbone = [
        (" N  ", "N", 0.0_f64, 0.0_f64),
        (" CA ", "C", 1.458, 0.0),
        (" C  ", "C", 2.009, 1.420),
        (" O  ", "O", 1.246, 2.390),
    ];
    let mut serial = 1;
    for i in 0..n_residues {
        let angle = (i as f64) * 100.0_f64.to_radians();
        let rise = i as f64 * 1.5;
        for (name, element, dx, dy) in &backbone {
            lines.push(format!(
                "ATOM  {:>5} {} {} A{:>4}    {:>8.3}{:>8.3}{:>8.3}  1.00 10.00          {:>2}",
                serial,
                name,
                residues[i % residues.len()],
                i + 1,
                2.3 * angle.cos() + dx,
                2.3 * angle.sin() + dy,
                rise,
                element
            ));
            serial += 1;
        }
    }
    lines.push("TER".to_string());
    lines.push("END".to_string());
    lines.join("\n")
}

fn bench_pdb_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("pdb_parse");
    // ~10k atoms = 2500 residues x 4 atoms
    let pdb_10k = synthetic_pdb(2500);
    group.bench_function("10k_atoms", |b| b.iter(|| parse_pdb(black_box(&pdb_10k))));
    group.finish();
}

fn bench_conversions(c: &mut Criterion) {
    let mut group = c.benchmark_group("pdb_convert");
    let pdb = synthetic_pdb(500);

    group.bench_function("cif_2k_atoms", |b| {
        b.iter(|| pdb_to_cif(black_box(&pdb), &CifConfig::default()))
    });
    group.bench_function("fasta_2k_atoms", |b| {
        b.iter(|| pdb_to_fasta(black_box(&pdb), &PdbFastaConfig::default()))
    });
    // Bond guessing is quadratic in chain size.
    group.bench_function("mol2_2k_atoms", |b| {
        b.iter(|| pdb_to_mol2(black_box(&pdb), &Mol2Config::default()))
    });

    group.finish();
}

criterion_group!(benches, bench_pdb_parse, bench_conversions);
criterion_main!(benches);
