use miette::Diagnostic;
use thiserror::Error;

use crate::{MoleculeKind, MonomerTable, PolymerKind};

pub type Result<T, E = Box<BiochemError>> = std::result::Result<T, E>;

// NOTE: Errors from the reference database live in `reference`, since they carry spans into the KDL source and are
// reported through `miette::Report` instead
#[derive(Debug, Diagnostic, Clone, Eq, PartialEq, Error)]
pub enum BiochemError {
    #[diagnostic(help("valid {kind} monomers are: {alphabet}"))]
    #[error("the symbol {monomer:?} at position {position} is not a valid {kind} monomer")]
    InvalidMonomer {
        monomer: char,
        position: usize,
        kind: PolymerKind,
        alphabet: String,
    },

    #[error("a {found} molecule cannot be added to a collection of {expected} molecules")]
    KindMismatch {
        expected: MoleculeKind,
        found: MoleculeKind,
    },

    #[diagnostic(help("partial takes are not supported, so check the count first"))]
    #[error("cannot take {requested} units of {name:?}, only {available} are available")]
    InsufficientUnits {
        name: String,
        requested: usize,
        available: usize,
    },

    #[diagnostic(help("the genetic code must define every three-nucleotide codon"))]
    #[error("the codon {codon:?} could not be found in the genetic code")]
    UnknownCodon { codon: String },
}

impl BiochemError {
    pub(crate) fn invalid_monomer(monomer: char, position: usize, table: &MonomerTable) -> Self {
        let kind = table.kind();
        let alphabet = table.alphabet().collect();

        Self::InvalidMonomer {
            monomer,
            position,
            kind,
            alphabet,
        }
    }

    pub(crate) const fn kind_mismatch(expected: MoleculeKind, found: MoleculeKind) -> Self {
        Self::KindMismatch { expected, found }
    }

    pub(crate) fn insufficient_units(name: &str, requested: usize, available: usize) -> Self {
        let name = name.to_owned();

        Self::InsufficientUnits {
            name,
            requested,
            available,
        }
    }

    pub(crate) fn unknown_codon(codon: &str) -> Self {
        let codon = codon.to_owned();

        Self::UnknownCodon { codon }
    }
}
