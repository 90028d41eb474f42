use super::CodeMatcher;
use crate::kmp;

/// Fallback matcher: the code may appear anywhere in the target.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl CodeMatcher for SubstringMatcher {
    fn matches(&self, code: &str, target: &str) -> bool {
        !code.is_empty() && kmp::find_str(code, target).is_some()
    }
}
