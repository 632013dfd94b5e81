use biochem::{Decoded, MoleculeCollection, Mrna, Protein, ReferenceDatabase};
use itertools::Itertools;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Poisson};
use tracing::{debug, trace};

use crate::{
    BOUND_RIBOSOMES, Error, FREE_RIBOSOMES, MRNAS, PROTEINS, Process, RIBOSOMES, Registry, Result,
    Translation, TranslationConfig,
};

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            initiation_threshold: 1.0,
        }
    }
}

impl<'r> Translation<'r> {
    #[must_use]
    pub const fn new(db: &'r ReferenceDatabase, config: TranslationConfig) -> Self {
        Self { db, config }
    }

    #[must_use]
    pub const fn config(&self) -> TranslationConfig {
        self.config
    }

    fn initiate(
        &self,
        mrna: &mut Mrna<'r>,
        registry: &mut Registry<'r>,
        rng: &mut StdRng,
    ) -> Result<()> {
        if mrna.slots().first().is_none_or(Option::is_some) {
            return Ok(());
        }

        let ribosomes = registry.population_mut(RIBOSOMES)?;
        let free = ribosomes.count(FREE_RIBOSOMES);
        if free == 0 {
            return Ok(());
        }

        #[allow(clippy::cast_precision_loss)]
        let rate = free as f64;
        let poisson = Poisson::new(rate).map_err(|e| Error::initiation_rate(rate, &e))?;
        let draw: f64 = poisson.sample(rng);
        if draw <= self.config.initiation_threshold {
            return Ok(());
        }

        ribosomes.take(FREE_RIBOSOMES, 1)?;
        ribosomes.populate(BOUND_RIBOSOMES, 1)?;

        let nascent = Protein::empty(self.db, mrna.name());
        mrna.slots_mut()[0] = Some(nascent);
        debug!(mrna = mrna.name(), draw, free = free - 1, "ribosome bound");

        Ok(())
    }

    // NOTE: Only the ribosomes that were bound before elongation starts are moved, so none can advance more than one
    // codon per tick. A ribosome stalls whenever the slot ahead of it is still occupied.
    fn elongate(&self, mrna: &mut Mrna<'r>, registry: &mut Registry<'r>) -> Result<()> {
        let occupied = mrna.slots().iter().positions(Option::is_some).collect_vec();
        let last_slot = mrna.slots().len().saturating_sub(1);

        for slot in occupied {
            let decoded = match mrna.codon(slot) {
                Some(codon) => self.db.genetic_code().translate(codon)?,
                None => continue,
            };

            let residue = match decoded {
                Decoded::AminoAcid(residue) if slot < last_slot => residue,
                _ => {
                    if let Some(protein) = mrna.slots_mut()[slot].take() {
                        terminate(protein, registry)?;
                    }
                    break;
                }
            };

            let slots = mrna.slots_mut();
            if slots[slot + 1].is_some() {
                trace!(mrna = mrna.name(), slot, "ribosome stalled");
                continue;
            }
            if let Some(protein) = &mut slots[slot] {
                protein.polymer_mut().push(residue)?;
            }
            slots.swap(slot, slot + 1);
            trace!(mrna = mrna.name(), slot = slot + 1, %residue, "ribosome advanced");
        }

        Ok(())
    }
}

fn terminate<'r>(protein: Protein<'r>, registry: &mut Registry<'r>) -> Result<()> {
    debug!(
        protein = protein.name(),
        length = protein.len(),
        "protein released"
    );
    registry.particles_mut(PROTEINS)?.add(protein, 1)?;

    let ribosomes = registry.population_mut(RIBOSOMES)?;
    ribosomes.take(BOUND_RIBOSOMES, 1)?;
    ribosomes.populate(FREE_RIBOSOMES, 1)?;

    Ok(())
}

impl<'r> Process<'r> for Translation<'r> {
    fn name(&self) -> &str {
        "translation"
    }

    // NOTE: Each group of mRNAs is drained from the registry while it's being worked on, which frees the registry up
    // for the ribosome and protein bookkeeping. Putting them back one by one preserves their order.
    fn update(&mut self, registry: &mut Registry<'r>, rng: &mut StdRng) -> Result<()> {
        let names = registry
            .particles(MRNAS)?
            .names()
            .map(str::to_owned)
            .collect_vec();

        for name in names {
            let mrnas = registry.particles_mut(MRNAS)?.take(&name, 0)?;
            for mut molecule in mrnas {
                if let Some(mrna) = molecule.as_mrna_mut() {
                    self.initiate(mrna, registry, rng)?;
                    self.elongate(mrna, registry)?;
                }
                registry.particles_mut(MRNAS)?.add(molecule, 1)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use biochem::{Molecule, MoleculeKind, ParticleCollection, PopulationCollection};
    use rand::SeedableRng;

    use super::*;

    static DB: LazyLock<ReferenceDatabase> = LazyLock::new(ReferenceDatabase::default);

    const ALWAYS_BIND: TranslationConfig = TranslationConfig {
        initiation_threshold: -1.0,
    };

    fn registry(free_ribosomes: usize, mrnas: &[(&str, &str)]) -> Registry<'static> {
        let mut ribosomes = PopulationCollection::new(MoleculeKind::Ribo);
        ribosomes.populate(FREE_RIBOSOMES, free_ribosomes).unwrap();
        ribosomes.populate(BOUND_RIBOSOMES, 0).unwrap();

        let mut mrna_coll = ParticleCollection::new(&DB, MoleculeKind::Mrna);
        for &(name, sequence) in mrnas {
            mrna_coll.add(Mrna::new(&DB, name, sequence).unwrap(), 1).unwrap();
        }

        let mut registry = Registry::new();
        registry.insert(RIBOSOMES, ribosomes);
        registry.insert(MRNAS, mrna_coll);
        registry.insert(PROTEINS, ParticleCollection::new(&DB, MoleculeKind::Protein));
        registry
    }

    fn run(
        translation: &mut Translation<'static>,
        registry: &mut Registry<'static>,
        rng: &mut StdRng,
        ticks: usize,
    ) {
        for _ in 0..ticks {
            translation.update(registry, rng).unwrap();
        }
    }

    fn ribosome_counts(registry: &Registry) -> (usize, usize) {
        let ribosomes = registry.population(RIBOSOMES).unwrap();
        (
            ribosomes.count(FREE_RIBOSOMES),
            ribosomes.count(BOUND_RIBOSOMES),
        )
    }

    fn slots<'a>(registry: &'a Registry, name: &str) -> Vec<Option<&'a str>> {
        let mrna = registry
            .particles(MRNAS)
            .unwrap()
            .get_molecules(name)
            .find_map(Molecule::as_mrna)
            .unwrap();
        mrna.slots()
            .iter()
            .map(|slot| slot.as_ref().map(Protein::sequence))
            .collect()
    }

    fn protein_sequences(registry: &Registry) -> Vec<String> {
        registry
            .particles(PROTEINS)
            .unwrap()
            .all_molecules()
            .filter_map(Molecule::as_protein)
            .map(|p| p.sequence().to_owned())
            .collect()
    }

    #[test]
    fn default_config() {
        let translation = Translation::new(&DB, TranslationConfig::default());
        assert_eq!(translation.config().initiation_threshold, 1.0);
        assert_eq!(translation.name(), "translation");
    }

    #[test]
    fn translation_round_trip() {
        let mut translation = Translation::new(&DB, ALWAYS_BIND);
        let mut registry = registry(1, &[("CLB5", "AUGAAAUAA")]);
        let mut rng = StdRng::seed_from_u64(42);

        run(&mut translation, &mut registry, &mut rng, 1);
        assert_eq!(slots(&registry, "CLB5"), [None, Some("M"), None]);
        assert_eq!(ribosome_counts(&registry), (0, 1));

        run(&mut translation, &mut registry, &mut rng, 1);
        assert_eq!(slots(&registry, "CLB5"), [None, None, Some("MK")]);
        assert!(protein_sequences(&registry).is_empty());

        run(&mut translation, &mut registry, &mut rng, 1);
        assert_eq!(slots(&registry, "CLB5"), [None, None, None]);
        assert_eq!(protein_sequences(&registry), ["MK"]);
        assert_eq!(registry.particles(PROTEINS).unwrap().count("CLB5"), 1);
        assert_eq!(ribosome_counts(&registry), (1, 0));
    }

    #[test]
    fn terminate_at_sequence_end() {
        let mut translation = Translation::new(&DB, ALWAYS_BIND);
        let mut registry = registry(1, &[("IYI", "AUAUAUAUAAUG")]);
        let mut rng = StdRng::seed_from_u64(42);

        // The codon in the final slot is never translated
        run(&mut translation, &mut registry, &mut rng, 4);
        assert_eq!(protein_sequences(&registry), ["IYI"]);
        assert_eq!(ribosome_counts(&registry), (1, 0));
    }

    #[test]
    fn single_codon_mrnas() {
        let mut translation = Translation::new(&DB, ALWAYS_BIND);
        let mut registry = registry(1, &[("tiny", "AUG"), ("none", "AU")]);
        let mut rng = StdRng::seed_from_u64(42);

        run(&mut translation, &mut registry, &mut rng, 1);
        assert_eq!(protein_sequences(&registry), [""]);
        assert_eq!(ribosome_counts(&registry), (1, 0));
        assert!(slots(&registry, "none").is_empty());
    }

    #[test]
    fn stalled_ribosomes() {
        let mut translation = Translation::new(&DB, ALWAYS_BIND);
        let mut registry = registry(10, &[("CLB5", "AUGAAAAAAAAAUAA")]);
        let mut rng = StdRng::seed_from_u64(42);

        run(&mut translation, &mut registry, &mut rng, 2);
        assert_eq!(
            slots(&registry, "CLB5"),
            [Some(""), None, Some("MK"), None, None]
        );

        run(&mut translation, &mut registry, &mut rng, 1);
        assert_eq!(
            slots(&registry, "CLB5"),
            [None, Some("M"), None, Some("MKK"), None]
        );

        run(&mut translation, &mut registry, &mut rng, 1);
        assert_eq!(
            slots(&registry, "CLB5"),
            [Some(""), None, Some("MK"), None, Some("MKKK")]
        );

        run(&mut translation, &mut registry, &mut rng, 1);
        assert_eq!(
            slots(&registry, "CLB5"),
            [None, Some("M"), None, Some("MKK"), None]
        );
        assert_eq!(protein_sequences(&registry), ["MKKK"]);
        assert_eq!(ribosome_counts(&registry), (8, 2));
    }

    #[test]
    fn early_stop_codons() {
        let mut translation = Translation::new(&DB, ALWAYS_BIND);
        let mut registry = registry(1, &[("CLB5", "AUGUAGAAAAAA")]);
        let mut rng = StdRng::seed_from_u64(42);

        run(&mut translation, &mut registry, &mut rng, 2);
        assert_eq!(protein_sequences(&registry), ["M"]);
        assert_eq!(ribosome_counts(&registry), (1, 0));
    }

    #[test]
    fn never_bind() {
        let config = TranslationConfig {
            initiation_threshold: f64::INFINITY,
        };
        let mut translation = Translation::new(&DB, config);
        let mut registry = registry(10, &[("CLB5", "AUGAAAUAA"), ("CLB6", "AUGAAAUAA")]);
        let mut rng = StdRng::seed_from_u64(42);

        run(&mut translation, &mut registry, &mut rng, 100);
        assert_eq!(ribosome_counts(&registry), (10, 0));
        assert!(protein_sequences(&registry).is_empty());
    }

    #[test]
    fn no_free_ribosomes() {
        let mut translation = Translation::new(&DB, ALWAYS_BIND);
        let mut registry = registry(0, &[("CLB5", "AUGAAAUAA")]);
        let mut rng = StdRng::seed_from_u64(42);

        run(&mut translation, &mut registry, &mut rng, 10);
        assert_eq!(slots(&registry, "CLB5"), [None, None, None]);
        assert_eq!(ribosome_counts(&registry), (0, 0));
    }

    #[test]
    fn ribosome_conservation() {
        let mut translation = Translation::new(&DB, TranslationConfig::default());
        let genes = [
            ("CLB5", "AUGAAAUAA"),
            ("CLB5", "AUGAAAUAA"),
            ("SIC1", "AUGGCUGCUCGUUGGAAAUAA"),
            ("CDC2", "AUAUAUAUAAUGCCCUUUGGA"),
        ];
        let mut registry = registry(3, &genes);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            translation.update(&mut registry, &mut rng).unwrap();

            let (free, bound) = ribosome_counts(&registry);
            assert_eq!(free + bound, 3);
            let docked: usize = registry
                .particles(MRNAS)
                .unwrap()
                .all_molecules()
                .filter_map(Molecule::as_mrna)
                .map(Mrna::bound_ribosomes)
                .sum();
            assert_eq!(docked, bound);
        }

        // Translation only moves mRNAs around, it never destroys them
        let mrnas = registry.particles(MRNAS).unwrap();
        assert_eq!(mrnas.count_all(), 4);
        assert_eq!(mrnas.count("CLB5"), 2);
    }

    #[test]
    fn missing_collections() {
        let mut translation = Translation::new(&DB, TranslationConfig::default());
        let mut rng = StdRng::seed_from_u64(42);

        let mut empty = Registry::new();
        let err = translation.update(&mut empty, &mut rng).unwrap_err();
        assert!(matches!(err, Error::MissingCollection { .. }));

        let mut mismatched = registry(1, &[("CLB5", "AUGAAAUAA")]);
        mismatched.insert(RIBOSOMES, ParticleCollection::new(&DB, MoleculeKind::Ribo));
        let err = translation.update(&mut mismatched, &mut rng).unwrap_err();
        assert!(matches!(err, Error::WrongCollection { .. }));
    }
}
