use biochem::{MoleculeCollection, MoleculeKind, ParticleCollection, PopulationCollection};
use itertools::Either;

use crate::{Collection, CollectionVariant, Error, Registry, Result};

impl<'r> Registry<'r> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `collection` under `name`, returning any collection it replaced. A replaced collection keeps its
    /// original position.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        collection: impl Into<Collection<'r>>,
    ) -> Option<Collection<'r>> {
        self.collections.insert(name.into(), collection.into())
    }

    pub fn get(&self, name: &str) -> Result<&Collection<'r>> {
        self.collections
            .get(name)
            .ok_or_else(|| Error::missing_collection(name, self.names()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Collection<'r>> {
        // NOTE: Looking up the index first keeps the mutable borrow out of the error path, which needs to list every
        // registered name
        match self.collections.get_index_of(name) {
            Some(index) => Ok(&mut self.collections[index]),
            None => Err(Error::missing_collection(name, self.names())),
        }
    }

    pub fn population(&self, name: &str) -> Result<&PopulationCollection> {
        match self.get(name)? {
            Collection::Population(collection) => Ok(collection),
            Collection::Particle(_) => Err(Error::wrong_collection(
                name,
                CollectionVariant::Population,
                CollectionVariant::Particle,
            )),
        }
    }

    pub fn population_mut(&mut self, name: &str) -> Result<&mut PopulationCollection> {
        match self.get_mut(name)? {
            Collection::Population(collection) => Ok(collection),
            Collection::Particle(_) => Err(Error::wrong_collection(
                name,
                CollectionVariant::Population,
                CollectionVariant::Particle,
            )),
        }
    }

    pub fn particles(&self, name: &str) -> Result<&ParticleCollection<'r>> {
        match self.get(name)? {
            Collection::Particle(collection) => Ok(collection),
            Collection::Population(_) => Err(Error::wrong_collection(
                name,
                CollectionVariant::Particle,
                CollectionVariant::Population,
            )),
        }
    }

    pub fn particles_mut(&mut self, name: &str) -> Result<&mut ParticleCollection<'r>> {
        match self.get_mut(name)? {
            Collection::Particle(collection) => Ok(collection),
            Collection::Population(_) => Err(Error::wrong_collection(
                name,
                CollectionVariant::Particle,
                CollectionVariant::Population,
            )),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Collection<'r>)> {
        self.collections
            .iter()
            .map(|(name, collection)| (name.as_str(), collection))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

impl Collection<'_> {
    #[must_use]
    pub const fn variant(&self) -> CollectionVariant {
        match self {
            Self::Population(_) => CollectionVariant::Population,
            Self::Particle(_) => CollectionVariant::Particle,
        }
    }

    #[must_use]
    pub fn kind(&self) -> MoleculeKind {
        match self {
            Self::Population(c) => c.kind(),
            Self::Particle(c) => c.kind(),
        }
    }

    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        match self {
            Self::Population(c) => c.count(name),
            Self::Particle(c) => c.count(name),
        }
    }

    #[must_use]
    pub fn count_all(&self) -> usize {
        match self {
            Self::Population(c) => c.count_all(),
            Self::Particle(c) => c.count_all(),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        match self {
            Self::Population(c) => Either::Left(c.names()),
            Self::Particle(c) => Either::Right(c.names()),
        }
    }
}
