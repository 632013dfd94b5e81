use std::{iter, mem};

use indexmap::IndexMap;
use itertools::{Either, Itertools};

use crate::{Molecule, MoleculeKind, ReferenceDatabase, Result, errors::BiochemError};

use super::MoleculeCollection;

/// Distinguishable molecules, keyed by name
///
/// Every unit is kept as its own instance, so molecules sharing a name can still differ in their other attributes
/// (proteins of different lengths, or mRNAs with ribosomes bound at different positions).
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ParticleCollection<'r> {
    db: &'r ReferenceDatabase,
    kind: MoleculeKind,
    molecules: IndexMap<String, Vec<Molecule<'r>>>,
}

impl<'r> ParticleCollection<'r> {
    #[must_use]
    pub fn new(db: &'r ReferenceDatabase, kind: MoleculeKind) -> Self {
        let molecules = IndexMap::new();
        Self {
            db,
            kind,
            molecules,
        }
    }

    /// Removes and returns `count` of the molecules named `name` that satisfy `matcher`, or every matching molecule if
    /// `count` is `0`. Molecules are scanned from the most recently added, and the ones left behind keep their order.
    pub fn take_matching(
        &mut self,
        name: &str,
        count: usize,
        matcher: impl Fn(&Molecule<'r>) -> bool,
    ) -> Result<Vec<Molecule<'r>>> {
        let Some(molecules) = self.molecules.get_mut(name) else {
            return if count == 0 {
                Ok(Vec::new())
            } else {
                Err(BiochemError::insufficient_units(name, count, 0).into())
            };
        };

        let limit = if count == 0 { usize::MAX } else { count };
        let mut selected = vec![false; molecules.len()];
        let mut found = 0;
        for (i, molecule) in molecules.iter().enumerate().rev() {
            if found == limit {
                break;
            }
            if matcher(molecule) {
                selected[i] = true;
                found += 1;
            }
        }

        if found < count {
            return Err(BiochemError::insufficient_units(name, count, found).into());
        }

        let (mut taken, kept): (Vec<_>, Vec<_>) = mem::take(molecules)
            .into_iter()
            .zip(selected)
            .partition_map(|(molecule, selected)| {
                if selected {
                    Either::Left(molecule)
                } else {
                    Either::Right(molecule)
                }
            });
        *molecules = kept;
        taken.reverse();

        Ok(taken)
    }

    #[must_use]
    pub fn count_matching(&self, name: &str, matcher: impl Fn(&Molecule<'r>) -> bool) -> usize {
        self.get_molecules(name).filter(|m| matcher(m)).count()
    }

    pub fn get_molecules<'s>(
        &'s self,
        name: &str,
    ) -> impl Iterator<Item = &'s Molecule<'r>> + use<'s, 'r> {
        self.molecules.get(name).into_iter().flatten()
    }

    pub fn all_molecules(&self) -> impl Iterator<Item = &Molecule<'r>> {
        self.molecules.values().flatten()
    }

    // NOTE: Mutating molecules in place can't change their kind or name, since neither has a setter
    pub fn get_molecules_mut<'s>(
        &'s mut self,
        name: &str,
    ) -> impl Iterator<Item = &'s mut Molecule<'r>> + use<'s, 'r> {
        self.molecules.get_mut(name).into_iter().flatten()
    }
}

impl<'r> MoleculeCollection<'r> for ParticleCollection<'r> {
    type Taken = Vec<Molecule<'r>>;

    fn kind(&self) -> MoleculeKind {
        self.kind
    }

    // NOTE: `iter::repeat_n()` clones the molecule for all but the last unit, so no two units share any state
    fn add(&mut self, molecule: impl Into<Molecule<'r>>, count: usize) -> Result<()> {
        let molecule = molecule.into();
        self.check_kind(&molecule)?;
        self.molecules
            .entry(molecule.name().to_owned())
            .or_default()
            .extend(iter::repeat_n(molecule, count));
        Ok(())
    }

    fn populate(&mut self, name: &str, count: usize) -> Result<()> {
        self.add(Molecule::empty(self.db, self.kind, name), count)
    }

    fn take(&mut self, name: &str, count: usize) -> Result<Vec<Molecule<'r>>> {
        self.take_matching(name, count, |_| true)
    }

    fn count(&self, name: &str) -> usize {
        self.molecules.get(name).map_or(0, Vec::len)
    }

    fn count_all(&self) -> usize {
        self.molecules.values().map(Vec::len).sum()
    }

    fn names(&self) -> impl Iterator<Item = &str> {
        self.molecules.keys().map(String::as_str)
    }
}
