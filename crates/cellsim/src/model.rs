use biochem::{
    MoleculeCollection, MoleculeKind, Mrna, ParticleCollection, PopulationCollection,
    ReferenceDatabase,
};
use indexmap::IndexMap;
use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info};

use crate::{
    BOUND_RIBOSOMES, FREE_RIBOSOMES, MRNAS, Model, ModelConfig, PROTEINS, Process, RIBOSOMES,
    Registry, Result, SequenceProvider, SimulationResult, Translation, TranslationConfig,
};

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            free_ribosomes: 10,
            seed: None,
            translation: TranslationConfig::default(),
        }
    }
}

impl<'r> Model<'r> {
    /// Builds a model with a pool of free ribosomes, the mRNAs handed out by `provider`, and no proteins yet
    pub fn new(
        db: &'r ReferenceDatabase,
        config: ModelConfig,
        provider: &impl SequenceProvider,
    ) -> Result<Self> {
        let mut rng = config
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

        let mut ribosomes = PopulationCollection::new(MoleculeKind::Ribo);
        ribosomes.populate(FREE_RIBOSOMES, config.free_ribosomes)?;
        ribosomes.populate(BOUND_RIBOSOMES, 0)?;

        let mut mrnas = ParticleCollection::new(db, MoleculeKind::Mrna);
        for (name, sequence) in provider.get_states(MoleculeKind::Mrna, &mut rng) {
            mrnas.add(Mrna::new(db, name, sequence)?, 1)?;
        }

        let proteins = ParticleCollection::new(db, MoleculeKind::Protein);

        info!(
            free_ribosomes = config.free_ribosomes,
            mrnas = mrnas.count_all(),
            genes = mrnas.names().count(),
            "model initialised"
        );

        let mut registry = Registry::new();
        registry.insert(RIBOSOMES, ribosomes);
        registry.insert(MRNAS, mrnas);
        registry.insert(PROTEINS, proteins);

        let results = registry
            .names()
            .map(|name| (name.to_owned(), SimulationResult::new()))
            .collect();

        let mut model = Self {
            registry,
            processes: Vec::new(),
            rng,
            timestep: 0,
            results,
        };
        model.add_process(Translation::new(db, config.translation));

        Ok(model)
    }

    /// Schedules `process` to run every tick, after every process added before it
    pub fn add_process(&mut self, process: impl Process<'r> + 'r) {
        self.processes.push(Box::new(process));
    }

    /// Runs every process once, then records the total count of every collection
    pub fn step(&mut self) -> Result<()> {
        for process in &mut self.processes {
            debug!(process = process.name(), timestep = self.timestep, "updating");
            process.update(&mut self.registry, &mut self.rng)?;
        }

        for (name, collection) in self.registry.iter() {
            self.results
                .entry(name.to_owned())
                .or_default()
                .add_timepoint(self.timestep, collection.count_all());
        }

        self.timestep += 1;
        Ok(())
    }

    pub fn simulate(&mut self, steps: usize) -> Result<()> {
        info!(steps, from = self.timestep, "starting simulation");
        for _ in 0..steps {
            self.step()?;
        }
        info!(timestep = self.timestep, "simulation finished");
        Ok(())
    }

    #[must_use]
    pub const fn timestep(&self) -> usize {
        self.timestep
    }

    #[must_use]
    pub const fn registry(&self) -> &Registry<'r> {
        &self.registry
    }

    pub const fn registry_mut(&mut self) -> &mut Registry<'r> {
        &mut self.registry
    }

    #[must_use]
    pub const fn results(&self) -> &IndexMap<String, SimulationResult> {
        &self.results
    }

    #[must_use]
    pub fn result(&self, name: &str) -> Option<&SimulationResult> {
        self.results.get(name)
    }
}
