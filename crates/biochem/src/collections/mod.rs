//! Bookkeeping for molecules: how many there are, and (optionally) which ones

mod particle;
mod population;

use crate::{Molecule, MoleculeKind, Result, errors::BiochemError};

pub use particle::ParticleCollection;
pub use population::PopulationCollection;

/// The contract shared by every collection of molecules
///
/// A collection only ever holds molecules of a single [`MoleculeKind`], and a count can never be driven below zero:
/// any `take` asking for more units than are present fails without changing the collection. Passing a `count` of `0`
/// to `take` removes every unit under that name instead.
pub trait MoleculeCollection<'r> {
    /// What's handed back by [`take`](MoleculeCollection::take)
    type Taken;

    fn kind(&self) -> MoleculeKind;

    fn add(&mut self, molecule: impl Into<Molecule<'r>>, count: usize) -> Result<()>;

    /// Adds `count` freshly constructed molecules named `name` (polymers start out empty)
    fn populate(&mut self, name: &str, count: usize) -> Result<()>;

    fn take(&mut self, name: &str, count: usize) -> Result<Self::Taken>;

    fn count(&self, name: &str) -> usize;

    fn count_all(&self) -> usize;

    /// Every name this collection has seen, in the order they were first added
    fn names(&self) -> impl Iterator<Item = &str>;

    fn check_kind(&self, molecule: &Molecule<'r>) -> Result<()> {
        let expected = self.kind();
        let found = molecule.kind();
        if expected == found {
            Ok(())
        } else {
            Err(BiochemError::kind_mismatch(expected, found).into())
        }
    }
}
