//! Classification policy and the full input-to-classification pipeline.

use tracing::{debug, info};

use crate::error::{ClassifierError, Result};
use crate::matcher::search_tree;
use crate::normalize::normalize;
use crate::taxonomy::TaxonomyLoader;
use crate::types::{Classification, ClassificationNode, MatchMode, MatchSet, NormalizedPhone};
use crate::validate::PhoneValidator;

/// Classify a phone number against a taxonomy tree.
///
/// Runs an exact suffix pass first. Only when it finds nothing, a fallback
/// substring pass runs into the same accumulator. An empty result after the
/// fallback pass means no classification exists.
pub fn classify(tree: &[ClassificationNode], phone: &NormalizedPhone) -> Classification {
    let target = phone.digits();
    let mut matches = MatchSet::new();

    search_tree(tree, target, MatchMode::Exact, &mut matches);
    if !matches.is_empty() {
        debug!(phone = %phone, count = matches.len(), "exact suffix matches found");
        return Classification {
            mode: MatchMode::Exact,
            matches,
        };
    }

    info!(phone = %phone, "no exact suffix matches found, doing fallback search");
    search_tree(tree, target, MatchMode::Fallback, &mut matches);
    debug!(phone = %phone, count = matches.len(), "fallback search finished");

    Classification {
        mode: MatchMode::Fallback,
        matches,
    }
}

/// Normalizes, validates and classifies raw phone input against a loaded taxonomy.
pub struct Classifier<L, V> {
    loader: L,
    validator: V,
}

impl<L: TaxonomyLoader, V: PhoneValidator> Classifier<L, V> {
    /// Create a classifier from a taxonomy loader and a phone validator
    pub fn new(loader: L, validator: V) -> Self {
        Self { loader, validator }
    }

    /// Normalize `raw` and check it against the validator
    pub fn parse_phone(&self, raw: &str) -> Result<NormalizedPhone> {
        let phone = normalize(raw).ok_or_else(|| ClassifierError::InvalidPhone(raw.to_string()))?;
        if !self.validator.is_valid(&phone) {
            return Err(ClassifierError::UnrecognizedNumber(phone.to_string()));
        }
        Ok(phone)
    }

    /// Classify an already normalized number
    pub fn classify_phone(&self, phone: &NormalizedPhone) -> Result<Classification> {
        let tree = self.loader.load()?;
        Ok(classify(&tree, phone))
    }

    /// Run the full pipeline on raw input
    pub fn classify_input(&self, raw: &str) -> Result<(NormalizedPhone, Classification)> {
        let phone = self.parse_phone(raw)?;
        let classification = self.classify_phone(&phone)?;
        Ok((phone, classification))
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::{MemoryTaxonomyLoader, NilTaxonomyLoader};
    use crate::validate::{AcceptAllValidator, NumberingPlanValidator};

    fn tree() -> Vec<ClassificationNode> {
        vec![
            ClassificationNode::new("01", "Crops").with_children(vec![
                ClassificationNode::new("01.1", "Annual crops"),
            ]),
            ClassificationNode::new("99", "Extraterritorial").with_children(vec![
                ClassificationNode::new("99.11", "Embassies"),
            ]),
        ]
    }

    fn phone(raw: &str) -> NormalizedPhone {
        raw.parse().unwrap()
    }

    #[test]
    fn test_exact_pass_wins() {
        let result = classify(&tree(), &phone("+79991112301"));
        assert_eq!(result.mode, MatchMode::Exact);
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches.get("01"), Some("Crops"));
    }

    #[test]
    fn test_fallback_when_no_exact_match() {
        let result = classify(&tree(), &phone("+79991112300"));
        assert_eq!(result.mode, MatchMode::Fallback);
        assert_eq!(result.matches.get("99.11"), Some("Embassies"));
        assert_eq!(result.matches.get("99"), Some("Extraterritorial"));
        assert!(!result.matches.contains("01"));
    }

    #[test]
    fn test_nothing_found() {
        let result = classify(&tree(), &phone("+74555555555"));
        assert_eq!(result.mode, MatchMode::Fallback);
        assert!(result.is_empty());
    }

    #[test]
    fn test_empty_tree() {
        let result = classify(&[], &phone("+79991112301"));
        assert!(result.is_empty());
    }

    #[test]
    fn test_independent_runs_do_not_share_state() {
        let t = tree();
        let first = classify(&t, &phone("+79991112301"));
        let second = classify(&t, &phone("+74555555555"));
        assert!(!first.is_empty());
        assert!(second.is_empty());
    }

    #[test]
    fn test_classifier_pipeline() {
        let classifier =
            Classifier::new(MemoryTaxonomyLoader::new(tree()), NumberingPlanValidator);
        let (phone, result) = classifier.classify_input("8 (999) 111-23-01").unwrap();
        assert_eq!(phone.as_str(), "+79991112301");
        assert_eq!(result.matches.get("01"), Some("Crops"));
    }

    #[test]
    fn test_classifier_rejects_invalid_input() {
        let classifier = Classifier::new(MemoryTaxonomyLoader::new(tree()), AcceptAllValidator);
        let err = classifier.classify_input("12345").unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidPhone(_)));
    }

    #[test]
    fn test_classifier_rejects_unrecognized_number() {
        let classifier =
            Classifier::new(MemoryTaxonomyLoader::new(tree()), NumberingPlanValidator);
        let err = classifier.classify_input("+7 300 000 00 00").unwrap_err();
        assert!(matches!(err, ClassifierError::UnrecognizedNumber(_)));
    }

    #[test]
    fn test_classifier_propagates_loader_error() {
        let classifier = Classifier::new(NilTaxonomyLoader, AcceptAllValidator);
        let err = classifier.classify_input("+79991112301").unwrap_err();
        assert!(err.taxonomy_kind().is_some());
    }
}
