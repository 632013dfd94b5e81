use indexmap::IndexMap;

use crate::{Molecule, MoleculeKind, Result, errors::BiochemError};

use super::MoleculeCollection;

/// Counts of indistinguishable molecules, keyed by name
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct PopulationCollection {
    kind: MoleculeKind,
    counts: IndexMap<String, usize>,
}

impl PopulationCollection {
    #[must_use]
    pub fn new(kind: MoleculeKind) -> Self {
        let counts = IndexMap::new();
        Self { kind, counts }
    }
}

impl<'r> MoleculeCollection<'r> for PopulationCollection {
    type Taken = usize;

    fn kind(&self) -> MoleculeKind {
        self.kind
    }

    fn add(&mut self, molecule: impl Into<Molecule<'r>>, count: usize) -> Result<()> {
        let molecule = molecule.into();
        self.check_kind(&molecule)?;
        *self.counts.entry(molecule.name().to_owned()).or_default() += count;
        Ok(())
    }

    // NOTE: There's no need to build a molecule here, since nothing but its name would be kept
    fn populate(&mut self, name: &str, count: usize) -> Result<()> {
        *self.counts.entry(name.to_owned()).or_default() += count;
        Ok(())
    }

    fn take(&mut self, name: &str, count: usize) -> Result<usize> {
        let Some(available) = self.counts.get_mut(name) else {
            return if count == 0 {
                Ok(0)
            } else {
                Err(BiochemError::insufficient_units(name, count, 0).into())
            };
        };

        let taken = match count {
            0 => *available,
            n if n <= *available => n,
            n => return Err(BiochemError::insufficient_units(name, n, *available).into()),
        };
        *available -= taken;
        Ok(taken)
    }

    fn count(&self, name: &str) -> usize {
        self.counts.get(name).copied().unwrap_or_default()
    }

    fn count_all(&self) -> usize {
        self.counts.values().sum()
    }

    fn names(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }
}
