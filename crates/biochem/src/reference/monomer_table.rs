use indexmap::IndexMap;

use crate::{Mass, Massive, Monomer, MonomerTable, PolymerKind};

impl MonomerTable {
    pub(crate) const fn new(kind: PolymerKind, monomers: IndexMap<char, Monomer>) -> Self {
        Self { kind, monomers }
    }

    #[must_use]
    pub const fn kind(&self) -> PolymerKind {
        self.kind
    }

    #[must_use]
    pub fn contains(&self, symbol: char) -> bool {
        self.monomers.contains_key(&symbol)
    }

    #[must_use]
    pub fn get(&self, symbol: char) -> Option<&Monomer> {
        self.monomers.get(&symbol)
    }

    #[must_use]
    pub fn mass(&self, symbol: char) -> Option<Mass> {
        self.get(symbol).map(Massive::mass)
    }

    /// Every valid monomer symbol, in the order they were defined
    pub fn alphabet(&self) -> impl Iterator<Item = char> + '_ {
        self.monomers.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &Monomer)> {
        self.monomers.iter().map(|(&symbol, monomer)| (symbol, monomer))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.monomers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.monomers.is_empty()
    }
}

impl Monomer {
    pub(crate) const fn new(name: String, mass: Mass) -> Self {
        Self { name, mass }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Massive for Monomer {
    fn mass(&self) -> Mass {
        self.mass
    }
}
