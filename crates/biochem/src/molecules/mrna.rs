use crate::{Mass, Massive, Mrna, Polymer, Protein, ReferenceDatabase, Result};

const CODON_LENGTH: usize = 3;

impl<'r> Mrna<'r> {
    pub fn new(
        db: &'r ReferenceDatabase,
        name: impl Into<String>,
        sequence: impl AsRef<str>,
    ) -> Result<Self> {
        let name = name.into();
        let polymer = Polymer::new(db.nucleotides(), sequence)?;
        let slots = vec![None; polymer.len() / CODON_LENGTH];
        Ok(Self {
            name,
            polymer,
            slots,
        })
    }

    #[must_use]
    pub fn empty(db: &'r ReferenceDatabase, name: impl Into<String>) -> Self {
        let name = name.into();
        let polymer = Polymer::empty(db.nucleotides());
        let slots = Vec::new();
        Self {
            name,
            polymer,
            slots,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn polymer(&self) -> &Polymer<'r> {
        &self.polymer
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

    /// The codon read by a ribosome sitting in `slot`, or `None` if there is no such slot. Trailing nucleotides that
    /// don't make up a complete codon never get a slot.
    #[must_use]
    pub fn codon(&self, slot: usize) -> Option<&str> {
        let start = slot * CODON_LENGTH;
        (slot < self.slots.len()).then(|| &self.sequence()[start..start + CODON_LENGTH])
    }

    /// One entry per codon, holding the nascent protein of the ribosome docked there (if any)
    #[must_use]
    pub fn slots(&self) -> &[Option<Protein<'r>>] {
        &self.slots
    }

    // NOTE: A slice rather than the `Vec` itself, so that the number of slots always matches the sequence
    pub fn slots_mut(&mut self) -> &mut [Option<Protein<'r>>] {
        &mut self.slots
    }

    #[must_use]
    pub fn bound_ribosomes(&self) -> usize {
        self.slots.iter().flatten().count()
    }
}

impl PartialEq for Mrna<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.polymer == other.polymer
    }
}

impl Eq for Mrna<'_> {}

impl Massive for Mrna<'_> {
    fn mass(&self) -> Mass {
        self.polymer.mass()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use rust_decimal_macros::dec;

    use super::*;

    static DB: LazyLock<ReferenceDatabase> = LazyLock::new(ReferenceDatabase::default);

    #[test]
    fn valid_mrnas() {
        let mrna1 = Mrna::empty(&DB, "mRNA1");
        assert!(mrna1.is_empty());
        assert!(mrna1.slots().is_empty());

        let mrna2 = Mrna::new(&DB, "mRNA2", "ACU").unwrap();
        assert_eq!(mrna2.sequence(), "ACU");
        assert_eq!(mrna2.slots().len(), 1);
    }

    #[test]
    fn invalid_mrnas() {
        assert!(Mrna::new(&DB, "mRNA3", "TTT").is_err());
        assert!(Mrna::new(&DB, "mRNA4", "augc").is_err());
    }

    #[test]
    fn codons_and_slots() {
        let mrna = Mrna::new(&DB, "CLB5", "AUGAAAUAAGC").unwrap();
        assert_eq!(mrna.slots().len(), 3);
        assert_eq!(mrna.codon(0), Some("AUG"));
        assert_eq!(mrna.codon(1), Some("AAA"));
        assert_eq!(mrna.codon(2), Some("UAA"));
        // The trailing "GC" doesn't form a codon
        assert_eq!(mrna.codon(3), None);

        let short = Mrna::new(&DB, "short", "AU").unwrap();
        assert!(short.slots().is_empty());
        assert_eq!(short.codon(0), None);
    }

    #[test]
    fn binding_state_ignored_by_equality() {
        let mut bound = Mrna::new(&DB, "CLB5", "AUGAAAUAA").unwrap();
        let unbound = bound.clone();
        bound.slots_mut()[1] = Some(Protein::empty(&DB, "CLB5"));

        assert_eq!(bound.bound_ribosomes(), 1);
        assert_eq!(unbound.bound_ribosomes(), 0);
        assert_eq!(bound, unbound);
        assert_ne!(bound, Mrna::new(&DB, "CLB6", "AUGAAAUAA").unwrap());
        assert_ne!(bound, Mrna::new(&DB, "CLB5", "AUGAAAUAG").unwrap());
    }

    #[test]
    fn mrna_mass() {
        let mrna = Mrna::new(&DB, "CLB5", "AUGAAAUAA").unwrap();
        assert_eq!(mrna.mass(), Mass::from(dec!(12.5)));
    }
}
