use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cyanea_chem::{embed_3d, parse_smiles, sdf_to_pdb, smiles_to_sdf, SdfToPdbConfig, SmilesToSdfConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Drug-like SMILES covering rings, branches, charges and aromatic atoms.
const SMILES_SET: &[&str] = &[
    "CCO",
    "CC(=O)O",
    "c1ccccc1",
    "CC(=O)Oc1ccccc1C(=O)O",
    "CC12CCC3C(C1CCC2O)CCC4=CC(=O)CCC34C",
    "CN1C=NC2=C1C(=O)N(C(=O)N2C)C",
    "CC(C)CC1=CC=C(C=C1)C(C)C(=O)O",
    "CC(=O)NC1=CC=C(C=C1)O",
    "C(C(=O)O)N",
    "c1ccc2ccccc2c1",
    "C1CCCCC1",
    "c1ccncc1",
    "c1cc[nH]c1",
    "C[N+](C)(C)C.[Cl-]",
    "OC[C@H]1OC(O)[C@H](O)[C@@H](O)[C@@H]1O",
];

fn bench_smiles_parse(c: &mut Criterion) {
    let smiles_1k: Vec<&str> = SMILES_SET.iter().copied().cycle().take(1000).collect();
    c.bench_function("smiles_parse_1k", |b| {
        b.iter(|| {
            for &smi in black_box(&smiles_1k) {
                let _ = parse_smiles(smi);
            }
        })
    });
}

fn bench_embed(c: &mut Criterion) {
    let molecules: Vec<_> = SMILES_SET.iter().filter_map(|s| parse_smiles(s).ok()).collect();
    c.bench_function("embed_3d_set", |b| {
        let mut rng = StdRng::seed_from_u64(42);
        b.iter(|| {
            for mol in &molecules {
                let mut mol = mol.clone();
                embed_3d(black_box(&mut mol), &mut rng);
            }
        })
    });
}

fn bench_conversions(c: &mut Criterion) {
    let input = SMILES_SET.iter().copied().cycle().take(200).collect::<Vec<_>>().join("\n");
    let mut group = c.benchmark_group("chem_convert");
    group.bench_function("smiles_to_sdf_200", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| smiles_to_sdf(black_box(&input), &SmilesToSdfConfig::default(), &mut rng))
    });

    let mut rng = StdRng::seed_from_u64(7);
    let sdf = smiles_to_sdf(&input, &SmilesToSdfConfig::default(), &mut rng).unwrap_or_default();
    group.bench_function("sdf_to_pdb_200", |b| {
        b.iter(|| sdf_to_pdb(black_box(&sdf), &SdfToPdbConfig::default()))
    });
    group.finish();
}

criterion_group!(benches, bench_smiles_parse, bench_embed, bench_conversions);
criterion_main!(benches);
