use std::sync::LazyLock;

use biochem::{
    Massive, MoleculeCollection, MoleculeKind, ParticleCollection, PopulationCollection,
    Protein, ReferenceDatabase, reference,
};
use divan::{AllocProfiler, Bencher, black_box};

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

const REFERENCE_KDL: &str = reference::DEFAULT_KDL;
const SEQUENCES: [&str; 5] = [
    "MK",
    "AGPRHS",
    "MSTNPKPQRKTKRNTNRRPQDVKFPGG",
    "WYVWYVWYVWYV",
    "ARNDCQEGHILKMFPSTWYV",
];

static DB: LazyLock<ReferenceDatabase> = LazyLock::new(ReferenceDatabase::default);

static PROTEINS: LazyLock<Vec<Protein>> = LazyLock::new(|| {
    SEQUENCES
        .into_iter()
        .map(|sequence| Protein::new(&DB, "ProtA", sequence).unwrap())
        .collect()
});

fn main() {
    LazyLock::force(&DB);
    LazyLock::force(&PROTEINS);
    divan::main();
}

mod reference_data {
    use super::*;

    #[divan::bench]
    fn build_reference_database() -> ReferenceDatabase {
        ReferenceDatabase::new("reference_database.kdl", REFERENCE_KDL).unwrap()
    }

    #[divan::bench]
    fn build_proteins() {
        for sequence in SEQUENCES {
            black_box(Protein::new(&DB, "ProtA", sequence).unwrap());
        }
    }

    #[divan::bench]
    fn calculate_masses() {
        for protein in PROTEINS.iter() {
            black_box(protein.mass());
        }
    }
}

mod collections {
    use super::*;

    #[divan::bench]
    fn population_take_and_return(bencher: Bencher) {
        let mut ribosomes = PopulationCollection::new(MoleculeKind::Ribo);
        ribosomes.populate("free ribosomes", 1000).unwrap();
        bencher.bench_local(|| {
            let taken = ribosomes.take("free ribosomes", 10).unwrap();
            ribosomes.populate("bound ribosomes", taken).unwrap();
            let returned = ribosomes.take("bound ribosomes", 0).unwrap();
            ribosomes.populate("free ribosomes", returned).unwrap();
        });
    }

    #[divan::bench]
    fn particle_take_matching(bencher: Bencher) {
        let mut proteins = ParticleCollection::new(&DB, MoleculeKind::Protein);
        for protein in PROTEINS.iter() {
            proteins.add(protein.clone(), 200).unwrap();
        }
        bencher.bench_local(|| {
            let taken = proteins
                .take_matching("ProtA", 50, |p| p.len() > 10)
                .unwrap();
            for molecule in taken {
                proteins.add(molecule, 1).unwrap();
            }
        });
    }

    #[divan::bench]
    fn particle_count_matching(bencher: Bencher) {
        let mut proteins = ParticleCollection::new(&DB, MoleculeKind::Protein);
        for protein in PROTEINS.iter() {
            proteins.add(protein.clone(), 200).unwrap();
        }
        bencher.bench_local(|| proteins.count_matching("ProtA", |p| p.len() == 2));
    }
}
