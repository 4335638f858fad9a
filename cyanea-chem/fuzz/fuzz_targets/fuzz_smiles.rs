#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    if let Ok(mut mol) = cyanea_chem::parse_smiles(data) {
        let mut rng = <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(0);
        cyanea_chem::embed_3d(&mut mol, &mut rng);
    }
    if let Ok(sdf) = cyanea_chem::parse_sdf(data) {
        let _ = cyanea_chem::format_sdf(&sdf.molecules);
        let _ = cyanea_chem::sdf_to_pdb(data, &Default::default());
    }
});
