mod substring;
mod suffix;
mod tree;

pub use substring::SubstringMatcher;
pub use suffix::SuffixMatcher;
pub use tree::search_tree;

use crate::types::MatchMode;

/// Trait for code matchers
pub trait CodeMatcher {
    /// Check if the bare (separator-free) code matches the target digits
    fn matches(&self, code: &str, target: &str) -> bool;
}

/// Enum wrapper for all matcher types
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    Suffix(SuffixMatcher),
    Substring(SubstringMatcher),
}

impl Matcher {
    /// Matcher implementing the given mode
    pub fn for_mode(mode: MatchMode) -> Self {
        match mode {
            MatchMode::Exact => Matcher::Suffix(SuffixMatcher),
            MatchMode::Fallback => Matcher::Substring(SubstringMatcher),
        }
    }
}

impl CodeMatcher for Matcher {
    fn matches(&self, code: &str, target: &str) -> bool {
        match self {
            Matcher::Suffix(m) => m.matches(code, target),
            Matcher::Substring(m) => m.matches(code, target),
        }
    }
}
