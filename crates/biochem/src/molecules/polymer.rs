use crate::{Mass, Massive, MonomerTable, Polymer, PolymerKind, Result, errors::BiochemError};

impl<'r> Polymer<'r> {
    pub fn new(monomers: &'r MonomerTable, sequence: impl AsRef<str>) -> Result<Self> {
        let mut polymer = Self::empty(monomers);
        polymer.extend(sequence)?;
        Ok(polymer)
    }

    #[must_use]
    pub const fn empty(monomers: &'r MonomerTable) -> Self {
        let sequence = String::new();
        Self { monomers, sequence }
    }

    pub fn push(&mut self, monomer: char) -> Result<()> {
        if !self.monomers.contains(monomer) {
            let position = self.len();
            return Err(BiochemError::invalid_monomer(monomer, position, self.monomers).into());
        }
        self.sequence.push(monomer);
        Ok(())
    }

    // NOTE: Validates the whole of `monomers` before appending anything, so a failed `extend` leaves the sequence
    // exactly as it was
    pub fn extend(&mut self, monomers: impl AsRef<str>) -> Result<()> {
        let monomers = monomers.as_ref();
        if let Some((offset, monomer)) = monomers
            .chars()
            .enumerate()
            .find(|&(_, m)| !self.monomers.contains(m))
        {
            let position = self.len() + offset;
            return Err(BiochemError::invalid_monomer(monomer, position, self.monomers).into());
        }
        self.sequence.push_str(monomers);
        Ok(())
    }

    #[must_use]
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    #[must_use]
    pub const fn monomers(&self) -> &'r MonomerTable {
        self.monomers
    }

    #[must_use]
    pub const fn kind(&self) -> PolymerKind {
        self.monomers.kind()
    }

    // NOTE: Every monomer symbol is a single ASCII letter, so the byte length is also the number of monomers
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

impl Massive for Polymer<'_> {
    fn mass(&self) -> Mass {
        // SAFETY: Every symbol was checked against `self.monomers` before being added to the sequence
        self.sequence
            .chars()
            .filter_map(|m| self.monomers.mass(m))
            .sum()
    }
}
