use crate::{Molecule, MoleculeKind, Mrna, Polymer, Protein, ReferenceDatabase, Ribo};

impl<'r> Molecule<'r> {
    /// A freshly constructed molecule of `kind`, with an empty sequence if it's a polymer
    #[must_use]
    pub fn empty(db: &'r ReferenceDatabase, kind: MoleculeKind, name: impl Into<String>) -> Self {
        match kind {
            MoleculeKind::Ribo => Ribo::new(name).into(),
            MoleculeKind::Protein => Protein::empty(db, name).into(),
            MoleculeKind::Mrna => Mrna::empty(db, name).into(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> MoleculeKind {
        match self {
            Self::Ribo(_) => MoleculeKind::Ribo,
            Self::Protein(_) => MoleculeKind::Protein,
            Self::Mrna(_) => MoleculeKind::Mrna,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Ribo(r) => r.name(),
            Self::Protein(p) => p.name(),
            Self::Mrna(m) => m.name(),
        }
    }

    #[must_use]
    pub const fn as_polymer(&self) -> Option<&Polymer<'r>> {
        match self {
            Self::Ribo(_) => None,
            Self::Protein(p) => Some(p.polymer()),
            Self::Mrna(m) => Some(m.polymer()),
        }
    }

    // NOTE: There is deliberately no `Mrna::polymer_mut()`, since growing an mRNA in place would leave its ribosome
    // slots out of sync with its sequence
    pub const fn as_polymer_mut(&mut self) -> Option<&mut Polymer<'r>> {
        match self {
            Self::Protein(p) => Some(p.polymer_mut()),
            Self::Ribo(_) | Self::Mrna(_) => None,
        }
    }

    /// The number of monomers in this molecule, or zero for non-polymers
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_polymer().map_or(0, Polymer::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub const fn as_protein(&self) -> Option<&Protein<'r>> {
        if let Self::Protein(p) = self {
            Some(p)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_mrna(&self) -> Option<&Mrna<'r>> {
        if let Self::Mrna(m) = self {
            Some(m)
        } else {
            None
        }
    }

    pub const fn as_mrna_mut(&mut self) -> Option<&mut Mrna<'r>> {
        if let Self::Mrna(m) = self {
            Some(m)
        } else {
            None
        }
    }
}
