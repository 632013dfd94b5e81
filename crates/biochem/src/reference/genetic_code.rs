use indexmap::IndexMap;

use crate::{Decoded, GeneticCode, Result, errors::BiochemError};

/// The amino acid symbol used by the reference database to mark stop codons
pub const STOP: char = '*';

impl GeneticCode {
    pub(crate) const fn new(codons: IndexMap<String, Decoded>) -> Self {
        Self { codons }
    }

    pub fn translate(&self, codon: &str) -> Result<Decoded> {
        self.codons
            .get(codon)
            .copied()
            .ok_or_else(|| BiochemError::unknown_codon(codon).into())
    }

    /// Every codon in the code, in the order they were defined
    pub fn codons(&self) -> impl Iterator<Item = &str> {
        self.codons.keys().map(String::as_str)
    }

    pub fn stop_codons(&self) -> impl Iterator<Item = &str> {
        self.codons
            .iter()
            .filter(|(_, decoded)| decoded.is_stop())
            .map(|(codon, _)| codon.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.codons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use insta::assert_snapshot;
    use itertools::Itertools;

    use crate::ReferenceDatabase;

    use super::*;

    static DB: LazyLock<ReferenceDatabase> = LazyLock::new(ReferenceDatabase::default);

    #[test]
    fn total_code() {
        let code = DB.genetic_code();
        assert_eq!(code.len(), 64);
        assert!(
            code.codons()
                .all(|codon| codon.len() == 3 && codon.chars().all(|n| "AUGC".contains(n)))
        );
    }

    #[test]
    fn translate_codons() {
        let code = DB.genetic_code();
        assert_eq!(code.translate("AUG").unwrap(), Decoded::AminoAcid('M'));
        assert_eq!(code.translate("AAA").unwrap(), Decoded::AminoAcid('K'));
        assert_eq!(code.translate("UGG").unwrap(), Decoded::AminoAcid('W'));
        assert_eq!(code.translate("UAA").unwrap(), Decoded::Stop);

        let protein: String = ["AUA", "UAU", "AUA"]
            .into_iter()
            .map(|codon| code.translate(codon).unwrap().to_string())
            .collect();
        assert_eq!(protein, "IYI");
    }

    #[test]
    fn stop_codons() {
        let stops = DB.genetic_code().stop_codons().sorted().collect_vec();
        assert_eq!(stops, ["UAA", "UAG", "UGA"]);
        assert_eq!(Decoded::Stop.to_string(), STOP.to_string());
    }

    #[test]
    fn unknown_codons() {
        let code = DB.genetic_code();
        assert_snapshot!(
            code.translate("TTT").unwrap_err(),
            @r#"the codon "TTT" could not be found in the genetic code"#
        );
        assert!(code.translate("AU").is_err());
        assert!(code.translate("AUGA").is_err());
    }
}
