//! Processes that act on named collections of molecules, and the model that steps them through time

mod model;
mod provider;
mod registry;
mod result;
mod translation;

use std::ops::RangeInclusive;

use biochem::{
    BiochemError, MoleculeKind, ParticleCollection, PopulationCollection, ReferenceDatabase,
};
use derive_more::{Display, From, IsVariant};
use indexmap::IndexMap;
use miette::Diagnostic;
use rand::rngs::StdRng;
use thiserror::Error;

// Collection Names ====================================================================================================

pub const RIBOSOMES: &str = "ribosomes";
pub const MRNAS: &str = "mRNAs";
pub const PROTEINS: &str = "proteins";

pub const FREE_RIBOSOMES: &str = "free ribosomes";
pub const BOUND_RIBOSOMES: &str = "bound ribosomes";

// Registry ============================================================================================================

/// The collections of a model, keyed by name and kept in the order they were registered
#[derive(Clone, Debug, Default)]
pub struct Registry<'r> {
    collections: IndexMap<String, Collection<'r>>,
}

#[derive(Clone, Eq, PartialEq, Debug, From, IsVariant)]
pub enum Collection<'r> {
    Population(PopulationCollection),
    Particle(ParticleCollection<'r>),
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Display)]
pub enum CollectionVariant {
    #[display("a population collection")]
    Population,
    #[display("a particle collection")]
    Particle,
}

// Processes ===========================================================================================================

/// Something that happens to a model once per tick
///
/// Processes run one after another, in the order they were added to the model, and only ever touch the model through
/// its [`Registry`]. Any randomness must be drawn from the `rng` they're handed.
pub trait Process<'r> {
    fn name(&self) -> &str;

    fn update(&mut self, registry: &mut Registry<'r>, rng: &mut StdRng) -> Result<()>;
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TranslationConfig {
    /// A free ribosome only binds an mRNA if a Poisson draw (with a mean of the number of free ribosomes) is strictly
    /// greater than this value
    pub initiation_threshold: f64,
}

/// Ribosomes binding mRNAs, walking them one codon per tick, and releasing finished proteins
#[derive(Clone, Debug)]
pub struct Translation<'r> {
    db: &'r ReferenceDatabase,
    config: TranslationConfig,
}

// Sequence Providers ==================================================================================================

/// A source of named sequences used to fill a model's collections when it's first built
pub trait SequenceProvider {
    /// Every `(name, sequence)` pair for molecules of `kind`. A name appearing more than once means more than one copy
    /// of that molecule.
    fn get_states(&self, kind: MoleculeKind, rng: &mut StdRng) -> Vec<(String, String)>;
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct GeneLibraryConfig {
    pub genes: usize,
    pub codons: RangeInclusive<usize>,
    pub copies: RangeInclusive<usize>,
}

/// Randomly generated mRNAs, built from the codons of a genetic code
#[derive(Clone, Debug)]
pub struct RandomGenes<'r> {
    db: &'r ReferenceDatabase,
    config: GeneLibraryConfig,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FixedSequences {
    kind: MoleculeKind,
    sequences: Vec<(String, String)>,
}

// Model ===============================================================================================================

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ModelConfig {
    pub free_ribosomes: usize,
    /// Without a seed, the model's random number generator is seeded from the operating system
    pub seed: Option<u64>,
    pub translation: TranslationConfig,
}

pub struct Model<'r> {
    registry: Registry<'r>,
    processes: Vec<Box<dyn Process<'r> + 'r>>,
    rng: StdRng,
    timestep: usize,
    results: IndexMap<String, SimulationResult>,
}

/// The value of `count_all()` for a single collection, recorded after every tick
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct SimulationResult {
    time: Vec<usize>,
    trace: Vec<usize>,
}

// Errors ==============================================================================================================

#[derive(Clone, PartialEq, Debug, Error, Diagnostic)]
pub enum Error {
    #[diagnostic(transparent)]
    #[error(transparent)]
    BiochemError(#[from] Box<BiochemError>),

    #[diagnostic(help("the registered collections are: {registered}"))]
    #[error("no collection named {name:?} has been registered")]
    MissingCollection { name: String, registered: String },

    #[error("the collection {name:?} is {found}, but {expected} was expected")]
    WrongCollection {
        name: String,
        expected: CollectionVariant,
        found: CollectionVariant,
    },

    #[diagnostic(help(
        "the initiation rate is the number of free ribosomes, which should always be positive and finite"
    ))]
    #[error("failed to build a Poisson distribution with a mean of {rate}: {reason}")]
    InitiationRate { rate: f64, reason: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn missing_collection<'n>(
        name: &str,
        registered: impl IntoIterator<Item = &'n str>,
    ) -> Self {
        let name = name.to_owned();
        let registered = itertools::join(registered, ", ");

        Self::MissingCollection { name, registered }
    }

    pub(crate) fn wrong_collection(
        name: &str,
        expected: CollectionVariant,
        found: CollectionVariant,
    ) -> Self {
        let name = name.to_owned();

        Self::WrongCollection {
            name,
            expected,
            found,
        }
    }

    pub(crate) fn initiation_rate(rate: f64, reason: &impl ToString) -> Self {
        let reason = reason.to_string();

        Self::InitiationRate { rate, reason }
    }
}
