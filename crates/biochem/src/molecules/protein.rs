use crate::{Mass, Massive, Polymer, Protein, ReferenceDatabase, Result};

impl<'r> Protein<'r> {
    pub fn new(
        db: &'r ReferenceDatabase,
        name: impl Into<String>,
        sequence: impl AsRef<str>,
    ) -> Result<Self> {
        let name = name.into();
        let polymer = Polymer::new(db.residues(), sequence)?;
        Ok(Self { name, polymer })
    }

    #[must_use]
    pub fn empty(db: &'r ReferenceDatabase, name: impl Into<String>) -> Self {
        let name = name.into();
        let polymer = Polymer::empty(db.residues());
        Self { name, polymer }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn polymer(&self) -> &Polymer<'r> {
        &self.polymer
    }

    pub const fn polymer_mut(&mut self) -> &mut Polymer<'r> {
        &mut self.polymer
    }

    #[must_use]
    pub fn sequence(&self) -> &str {
        self.polymer.sequence()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.polymer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.polymer.is_empty()
    }
}

impl Massive for Protein<'_> {
    fn mass(&self) -> Mass {
        self.polymer.mass()
    }
}
