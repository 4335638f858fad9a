#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let pdb = cyanea_struct::parse_pdb(data);
    if !pdb.structure.atoms.is_empty() {
        let _ = cyanea_struct::pdb_to_cif(data, &Default::default());
        let _ = cyanea_struct::pdb_to_mol2(data, &Default::default());
        let _ = cyanea_struct::pdb_to_fasta(data, &Default::default());
    }
});
