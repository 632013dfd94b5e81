pub mod genetic_code;
mod monomer_table;

// Standard Library Imports
use std::{iter, str::FromStr};

// External Crate Imports
use ahash::{HashMap, HashMapExt};
use indexmap::{IndexMap, map::Entry};
use itertools::Itertools;
use knuffel::{
    Decode,
    span::{Span, Spanned},
};
use miette::{Diagnostic, LabeledSpan, NamedSource, Result};
use rust_decimal::Decimal;
use thiserror::Error;

// Local Crate Imports
use crate::{Decoded, GeneticCode, Mass, Monomer, MonomerTable, PolymerKind};
use genetic_code::STOP;

pub const DEFAULT_KDL: &str = include_str!("../../data/reference_database.kdl");

// Public API ==========================================================================================================

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ReferenceDatabase {
    residues: MonomerTable,
    nucleotides: MonomerTable,
    genetic_code: GeneticCode,
}

impl ReferenceDatabase {
    pub fn new(file_name: impl AsRef<str>, kdl_text: impl AsRef<str>) -> Result<Self> {
        let parsed_db: ReferenceDatabaseKdl =
            knuffel::parse(file_name.as_ref(), kdl_text.as_ref())?;
        parsed_db
            .validate(())
            .map_err(|e| e.finalize(file_name, kdl_text).into())
    }

    /// The amino acids that make up proteins
    #[must_use]
    pub const fn residues(&self) -> &MonomerTable {
        &self.residues
    }

    /// The nucleotides that make up mRNAs
    #[must_use]
    pub const fn nucleotides(&self) -> &MonomerTable {
        &self.nucleotides
    }

    #[must_use]
    pub const fn genetic_code(&self) -> &GeneticCode {
        &self.genetic_code
    }

    #[must_use]
    pub const fn monomers(&self, kind: PolymerKind) -> &MonomerTable {
        match kind {
            PolymerKind::Protein => &self.residues,
            PolymerKind::NucleicAcid => &self.nucleotides,
        }
    }
}

impl Default for ReferenceDatabase {
    fn default() -> Self {
        // SAFETY: The bundled database is checked by the `build_default_database` test below
        Self::new("reference_database.kdl", DEFAULT_KDL).unwrap()
    }
}

// KDL File Schema =====================================================================================================

#[derive(Debug, Decode)]
#[knuffel(span_type=Span)]
struct ReferenceDatabaseKdl {
    #[knuffel(child, unwrap(children))]
    residues: Vec<MonomerKdl>,
    #[knuffel(child, unwrap(children))]
    nucleotides: Vec<MonomerKdl>,
    #[knuffel(child, unwrap(children))]
    codons: Vec<CodonKdl>,
}

// ---------------------------------------------------------------------------------------------------------------------

#[derive(Debug, Decode)]
#[knuffel(span_type=Span)]
struct MonomerKdl {
    #[knuffel(span)]
    span: Span,
    #[knuffel(node_name)]
    symbol: String,
    #[knuffel(argument)]
    name: String,
    #[knuffel(property)]
    mass: MassKdl,
}

#[derive(Debug, Decode)]
#[knuffel(span_type=Span)]
struct CodonKdl {
    #[knuffel(span)]
    span: Span,
    #[knuffel(node_name)]
    codon: String,
    #[knuffel(argument)]
    amino_acid: AminoAcidKdl,
}

// NOTE: Masses are strings in the KDL so that they reach `Decimal` without a lossy trip through `f64`
type MassKdl = Spanned<String, Span>;
type AminoAcidKdl = Spanned<String, Span>;

// Contextual Validation Trait  ========================================================================================

type RefResult<T> = Result<T, ReferenceErrorKind>;

trait ValidateInto<'c, T> {
    type Context: 'c;

    fn validate(self, ctx: Self::Context) -> RefResult<T>;
}

// Reference Database Validation =======================================================================================

impl ValidateInto<'_, ReferenceDatabase> for ReferenceDatabaseKdl {
    type Context = ();

    fn validate(self, _ctx: Self::Context) -> RefResult<ReferenceDatabase> {
        let residues = self.residues.validate(PolymerKind::Protein)?;
        let nucleotides = self.nucleotides.validate(PolymerKind::NucleicAcid)?;
        let genetic_code = self.codons.validate((&residues, &nucleotides))?;
        Ok(ReferenceDatabase {
            residues,
            nucleotides,
            genetic_code,
        })
    }
}

// Validate Monomer Tables =============================================================================================

impl ValidateInto<'_, MonomerTable> for Vec<MonomerKdl> {
    type Context = PolymerKind;

    fn validate(self, ctx: Self::Context) -> RefResult<MonomerTable> {
        let mut seen_monomers: IndexMap<char, (Span, Monomer)> = IndexMap::new();

        for monomer_kdl in self {
            let span = monomer_kdl.span;
            let (symbol, monomer) = monomer_kdl.validate(())?;

            match seen_monomers.entry(symbol) {
                Entry::Occupied(e) => {
                    let (first_defined_at, _) = e.get();
                    return Err(ReferenceErrorKind::DuplicateMonomer(
                        *first_defined_at,
                        span,
                        ctx,
                        symbol,
                    ));
                }
                Entry::Vacant(e) => e.insert((span, monomer)),
            };
        }

        let monomers = seen_monomers
            .into_iter()
            .map(|(symbol, (_, monomer))| (symbol, monomer))
            .collect();
        Ok(MonomerTable::new(ctx, monomers))
    }
}

// ---------------------------------------------------------------------------------------------------------------------

type MonomerEntry = (char, Monomer);

impl ValidateInto<'_, MonomerEntry> for MonomerKdl {
    type Context = ();

    fn validate(self, _ctx: Self::Context) -> RefResult<MonomerEntry> {
        let symbol = match self.symbol.chars().collect_vec()[..] {
            [s] if s.is_ascii_uppercase() => s,
            _ => return Err(ReferenceErrorKind::InvalidSymbol(self.span, self.symbol)),
        };
        Ok((symbol, Monomer::new(self.name, self.mass.validate(())?)))
    }
}

impl ValidateInto<'_, Mass> for MassKdl {
    type Context = ();

    fn validate(self, _ctx: Self::Context) -> RefResult<Mass> {
        match Decimal::from_str(&self) {
            Ok(mass) if !mass.is_sign_negative() => Ok(Mass::from(mass)),
            _ => Err(ReferenceErrorKind::InvalidMass(
                *self.span(),
                (*self).clone(),
            )),
        }
    }
}

// Validate Genetic Code ===============================================================================================

impl<'t> ValidateInto<'t, GeneticCode> for Vec<CodonKdl> {
    type Context = (&'t MonomerTable, &'t MonomerTable);

    fn validate(self, ctx: Self::Context) -> RefResult<GeneticCode> {
        let mut seen_codons: HashMap<String, Span> = HashMap::new();
        let mut codons = IndexMap::new();

        for codon_kdl in self {
            let span = codon_kdl.span;
            let (codon, decoded) = codon_kdl.validate(ctx)?;

            if let Some(&first_defined_at) = seen_codons.get(&codon) {
                return Err(ReferenceErrorKind::DuplicateCodon(
                    first_defined_at,
                    span,
                    codon,
                ));
            }
            seen_codons.insert(codon.clone(), span);
            codons.insert(codon, decoded);
        }

        let (_, nucleotides) = ctx;
        let alphabet = nucleotides.alphabet().collect_vec();
        let missing_codons: Vec<String> = iter::repeat_n(alphabet.iter().copied(), 3)
            .multi_cartesian_product()
            .map(String::from_iter)
            .filter(|codon| !codons.contains_key(codon))
            .collect();

        if missing_codons.is_empty() {
            Ok(GeneticCode::new(codons))
        } else {
            Err(ReferenceErrorKind::IncompleteCode(missing_codons))
        }
    }
}

// ---------------------------------------------------------------------------------------------------------------------

type CodonEntry = (String, Decoded);

impl<'t> ValidateInto<'t, CodonEntry> for CodonKdl {
    type Context = (&'t MonomerTable, &'t MonomerTable);

    fn validate(self, ctx: Self::Context) -> RefResult<CodonEntry> {
        let (residues, nucleotides) = ctx;

        let is_codon = self.codon.chars().count() == 3
            && self.codon.chars().all(|n| nucleotides.contains(n));
        if !is_codon {
            return Err(ReferenceErrorKind::MalformedCodon(self.span, self.codon));
        }

        let decoded = match self.amino_acid.chars().collect_vec()[..] {
            [STOP] => Decoded::Stop,
            [aa] if residues.contains(aa) => Decoded::AminoAcid(aa),
            _ => {
                return Err(ReferenceErrorKind::UndefinedResidue(
                    *self.amino_acid.span(),
                    (*self.amino_acid).clone(),
                ));
            }
        };

        Ok((self.codon, decoded))
    }
}

// Validation Error Types and Trait Implementations  ===================================================================

#[derive(Debug, Error)]
#[error("failed to validate reference database file")]
struct ReferenceError {
    kdl: NamedSource<String>,
    #[source]
    kind: ReferenceErrorKind,
}

// NOTE: This is manually implemented because the list of labels is dynamic and needs to be extracted from `self.kind`
impl Diagnostic for ReferenceError {
    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.kdl)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        Some(Box::new(self.kind.labels().into_iter().map(|(s, l)| {
            LabeledSpan::new_with_span(Some(l.to_owned()), *s)
        })))
    }

    fn diagnostic_source(&self) -> Option<&dyn Diagnostic> {
        Some(&self.kind)
    }
}

#[derive(Clone, Debug, Diagnostic, Error)]
enum ReferenceErrorKind {
    #[error("the {2} symbol {3:?} has already been defined")]
    #[diagnostic(help("double-check for typos, or remove the duplicate monomer"))]
    DuplicateMonomer(Span, Span, PolymerKind, char),

    #[error("expected a single uppercase ASCII letter, got {1:?}")]
    InvalidSymbol(Span, String),

    #[error("expected a non-negative decimal mass, got {1:?}")]
    InvalidMass(Span, String),

    #[error("the codon {2:?} has already been defined")]
    #[diagnostic(help("double-check for typos, or remove the duplicate codon"))]
    DuplicateCodon(Span, Span, String),

    #[error("expected three nucleotides, got {1:?}")]
    #[diagnostic(help("codons can only contain symbols from the nucleotides section"))]
    MalformedCodon(Span, String),

    #[error("the amino acid {1:?} is undefined")]
    #[diagnostic(help(
        "double-check for typos, add {1:?} to the residues section, or use \"*\" to mark a stop codon"
    ))]
    UndefinedResidue(Span, String),

    #[error(
        "the genetic code is missing {} codon{}: {}",
        .0.len(),
        if .0.len() > 1 {"s"} else {""},
        .0.join(", ")
    )]
    #[diagnostic(help("every combination of three nucleotides must be translated"))]
    IncompleteCode(Vec<String>),
}

impl ReferenceErrorKind {
    fn labels(&self) -> Vec<(&Span, &'static str)> {
        match self {
            Self::DuplicateMonomer(s1, s2, ..) | Self::DuplicateCodon(s1, s2, _) => {
                vec![(s1, "first defined here"), (s2, "then again here")]
            }
            Self::InvalidSymbol(s, _) => vec![(s, "invalid symbol")],
            Self::InvalidMass(s, _) => vec![(s, "invalid mass")],
            Self::MalformedCodon(s, _) => vec![(s, "malformed codon")],
            Self::UndefinedResidue(s, _) => vec![(s, "undefined amino acid")],
            Self::IncompleteCode(_) => Vec::new(),
        }
    }

    fn finalize(self, file_name: impl AsRef<str>, kdl: impl AsRef<str>) -> ReferenceError {
        let kdl = NamedSource::new(file_name, kdl.as_ref().to_owned());
        ReferenceError { kdl, kind: self }
    }
}

// Module Tests ========================================================================================================
