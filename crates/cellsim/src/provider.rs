use biochem::{MoleculeKind, ReferenceDatabase};
use indexmap::IndexMap;
use itertools::Itertools;
use rand::{Rng, rngs::StdRng, seq::IndexedRandom};

use crate::{FixedSequences, GeneLibraryConfig, RandomGenes, SequenceProvider};

const GENE_NAME_LENGTH: usize = 3;

impl Default for GeneLibraryConfig {
    fn default() -> Self {
        Self {
            genes: 10,
            codons: 50..=500,
            copies: 1..=10,
        }
    }
}

impl<'r> RandomGenes<'r> {
    #[must_use]
    pub const fn new(db: &'r ReferenceDatabase, config: GeneLibraryConfig) -> Self {
        Self { db, config }
    }

    #[must_use]
    pub const fn config(&self) -> &GeneLibraryConfig {
        &self.config
    }

    fn gene_name(rng: &mut StdRng) -> String {
        (0..GENE_NAME_LENGTH)
            .map(|_| char::from(rng.random_range(b'A'..=b'Z')))
            .collect()
    }

    fn gene_sequence(&self, codons: &[&str], rng: &mut StdRng) -> String {
        let length = rng.random_range(self.config.codons.clone());
        (0..length)
            .filter_map(|_| codons.choose(rng))
            .copied()
            .collect()
    }
}

impl SequenceProvider for RandomGenes<'_> {
    // NOTE: Genes that happen to be given the same name are merged, with the last sequence generated replacing the
    // others. Copy numbers are only drawn once every gene has its final sequence.
    fn get_states(&self, kind: MoleculeKind, rng: &mut StdRng) -> Vec<(String, String)> {
        if kind != MoleculeKind::Mrna {
            return Vec::new();
        }

        let codons = self.db.genetic_code().codons().collect_vec();
        let mut genes = IndexMap::new();
        for _ in 0..self.config.genes {
            let name = Self::gene_name(rng);
            let sequence = self.gene_sequence(&codons, rng);
            genes.insert(name, sequence);
        }

        let mut states = Vec::new();
        for (name, sequence) in genes {
            let copies = rng.random_range(self.config.copies.clone());
            states.extend(itertools::repeat_n((name, sequence), copies));
        }
        states
    }
}

impl FixedSequences {
    pub fn new<N: Into<String>, S: Into<String>>(
        kind: MoleculeKind,
        sequences: impl IntoIterator<Item = (N, S)>,
    ) -> Self {
        let sequences = sequences
            .into_iter()
            .map(|(name, sequence)| (name.into(), sequence.into()))
            .collect();
        Self { kind, sequences }
    }
}

impl SequenceProvider for FixedSequences {
    fn get_states(&self, kind: MoleculeKind, _rng: &mut StdRng) -> Vec<(String, String)> {
        if kind == self.kind {
            self.sequences.clone()
        } else {
            Vec::new()
        }
    }
}
