use super::CodeMatcher;

/// Exact matcher: the code must equal the trailing digits of the target.
///
/// The target includes the leading country digit, so short top-level codes
/// only match when the number happens to end with them.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuffixMatcher;

impl CodeMatcher for SuffixMatcher {
    fn matches(&self, code: &str, target: &str) -> bool {
        !code.is_empty() && target.ends_with(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_match() {
        let m = SuffixMatcher;
        assert!(m.matches("01", "79991112301"));
        assert!(m.matches("2301", "79991112301"));
        assert!(!m.matches("01", "79991112300"));
    }

    #[test]
    fn test_prefix_and_inner_do_not_match() {
        let m = SuffixMatcher;
        assert!(!m.matches("7999", "79991112301"));
        assert!(!m.matches("9911", "79991112301"));
    }

    #[test]
    fn test_code_longer_than_target() {
        let m = SuffixMatcher;
        assert!(!m.matches("179991112301", "79991112301"));
        assert!(m.matches("79991112301", "79991112301"));
    }

    #[test]
    fn test_empty_code_never_matches() {
        assert!(!SuffixMatcher.matches("", "79991112301"));
    }
}
