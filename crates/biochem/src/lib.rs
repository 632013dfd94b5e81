//! Molecules, monomer tables and the collections that account for them

pub mod collections;
pub mod errors;
mod molecules;
pub mod reference;

// External Crate Imports
use derive_more::{Add, Display, From, Into, IsVariant, Sum};
use indexmap::IndexMap;
use rust_decimal::Decimal;

// FIXME: Work on what's publicly exported / part of the API! Maybe create a prelude?
pub use collections::{MoleculeCollection, ParticleCollection, PopulationCollection};
pub use errors::{BiochemError, Result};
pub use reference::ReferenceDatabase;

// NOTE: For the types in this module, 'r lifetimes indicate references to the ReferenceDatabase (or one of the
// MonomerTables it owns)

// Molecules ===========================================================================================================

#[derive(Clone, Eq, PartialEq, Debug, From, IsVariant)]
pub enum Molecule<'r> {
    Ribo(Ribo),
    Protein(Protein<'r>),
    Mrna(Mrna<'r>),
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display)]
pub enum MoleculeKind {
    Ribo,
    Protein,
    #[display("mRNA")]
    Mrna,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Ribo {
    name: String,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Protein<'r> {
    name: String,
    polymer: Polymer<'r>,
}

// NOTE: `PartialEq` is implemented by hand, since two mRNAs with the same name and sequence are the same molecule, no
// matter where ribosomes happen to be sitting on them
#[derive(Clone, Debug)]
pub struct Mrna<'r> {
    name: String,
    polymer: Polymer<'r>,
    slots: Vec<Option<Protein<'r>>>,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Polymer<'r> {
    monomers: &'r MonomerTable,
    sequence: String,
}

// ---------------------------------------------------------------------------------------------------------------------

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display)]
pub enum PolymerKind {
    #[display("amino acid")]
    Protein,
    #[display("nucleotide")]
    NucleicAcid,
}

// Reference Data ======================================================================================================

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct MonomerTable {
    kind: PolymerKind,
    monomers: IndexMap<char, Monomer>,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Monomer {
    name: String,
    mass: Mass,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct GeneticCode {
    codons: IndexMap<String, Decoded>,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Display, IsVariant)]
pub enum Decoded {
    AminoAcid(char),
    #[display("*")]
    Stop,
}

#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Display, From, Into, Add, Sum,
)]
pub struct Mass(Decimal);

// =====================================================================================================================

pub trait Massive {
    fn mass(&self) -> Mass;
}

macro_rules! massive_ref_impls {
    ($($ref_type:ty),+ $(,)?) => {
        $(
            impl<T: Massive> Massive for $ref_type {
                fn mass(&self) -> Mass {
                    (**self).mass()
                }
            }
        )+
    };
}

massive_ref_impls!(&T, &mut T, Box<T>);

static_assertions::assert_impl_all!(ReferenceDatabase: Send, Sync);
