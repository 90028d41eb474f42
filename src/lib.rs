//! OKVED Match - classify phone numbers against the OKVED activity-code taxonomy
//!
//! This library provides:
//! - Normalization of free-form Russian phone numbers to `+7XXXXXXXXXX`
//! - Exact suffix matching of taxonomy codes against the number's digits
//! - Substring fallback matching (Knuth-Morris-Pratt) when no suffix matches
//! - Taxonomy loading from memory, a local file, or a cached download
//!
//! # Example
//!
//! ```rust
//! use okved_match::{classify, normalize, ClassificationNode, MatchMode};
//!
//! let tree = vec![
//!     ClassificationNode::new("62", "Computer programming").with_children(vec![
//!         ClassificationNode::new("62.01", "Software development"),
//!     ]),
//! ];
//!
//! let phone = normalize("8 (912) 345-62-01").unwrap();
//! assert_eq!(phone.as_str(), "+79123456201");
//!
//! let result = classify(&tree, &phone);
//! assert_eq!(result.mode, MatchMode::Exact);
//! assert_eq!(result.matches.get("62.01"), Some("Software development"));
//! ```
//!
//! # Matching rules
//!
//! | Mode | Code (dots removed) must be | Runs |
//! |------|-----------------------------|------|
//! | Exact | a suffix of the 11 phone digits | always, first |
//! | Fallback | a substring of the 11 phone digits | only if Exact found nothing |
//!
//! Matches are reported under the original dotted code.

pub mod classify;
pub mod error;
pub mod kmp;
pub mod matcher;
pub mod normalize;
pub mod taxonomy;
pub mod types;
pub mod validate;

// Re-export commonly used items
pub use classify::{classify, Classifier};
pub use error::{ClassifierError, Result, TaxonomyErrorKind};
pub use matcher::{search_tree, CodeMatcher, Matcher, SubstringMatcher, SuffixMatcher};
pub use normalize::normalize;
pub use taxonomy::{
    AutoTaxonomyLoader, ExpiryPolicy, FileTaxonomyLoader, MemoryTaxonomyLoader,
    NilTaxonomyLoader, Taxonomy, TaxonomyLoader,
};
pub use types::{Classification, ClassificationNode, MatchMode, MatchSet, NormalizedPhone};
pub use validate::{AcceptAllValidator, NumberingPlanValidator, PhoneValidator};
