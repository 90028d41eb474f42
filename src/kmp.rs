//! Knuth-Morris-Pratt substring search.
//!
//! Linear-time search of a pattern in a text: O(pattern + text) time and
//! O(pattern) extra space for the failure table.

/// Failure table of `pattern`: entry `i` is the length of the longest proper
/// prefix of `pattern[..=i]` that is also a suffix of it.
pub fn prefix_function<T: PartialEq>(pattern: &[T]) -> Vec<usize> {
    let mut table = vec![0; pattern.len()];
    for i in 1..pattern.len() {
        let mut k = table[i - 1];
        while k > 0 && pattern[k] != pattern[i] {
            k = table[k - 1];
        }
        if pattern[k] == pattern[i] {
            k += 1;
        }
        table[i] = k;
    }
    table
}

/// A pattern with its failure table built once, for repeated searches.
#[derive(Debug, Clone)]
pub struct KmpPattern<'a, T> {
    pattern: &'a [T],
    failure: Vec<usize>,
}

impl<'a, T: PartialEq> KmpPattern<'a, T> {
    pub fn new(pattern: &'a [T]) -> Self {
        Self {
            pattern,
            failure: prefix_function(pattern),
        }
    }

    /// Index of the first occurrence of the pattern in `text`.
    ///
    /// An empty pattern matches at index 0.
    pub fn find_in(&self, text: &[T]) -> Option<usize> {
        let m = self.pattern.len();
        if m == 0 {
            return Some(0);
        }
        if m > text.len() {
            return None;
        }

        let mut k = 0;
        for (i, item) in text.iter().enumerate() {
            while k > 0 && self.pattern[k] != *item {
                k = self.failure[k - 1];
            }
            if self.pattern[k] == *item {
                k += 1;
            }
            if k == m {
                return Some(i + 1 - m);
            }
        }
        None
    }
}

/// Index of the first occurrence of `pattern` in `text`.
pub fn find<T: PartialEq>(pattern: &[T], text: &[T]) -> Option<usize> {
    KmpPattern::new(pattern).find_in(text)
}

/// Byte index of the first occurrence of `pattern` in `text`.
///
/// The index always falls on a char boundary of `text`.
pub fn find_str(pattern: &str, text: &str) -> Option<usize> {
    find(pattern.as_bytes(), text.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_function() {
        assert_eq!(prefix_function(b"abcabd"), vec![0, 0, 0, 1, 2, 0]);
        assert_eq!(prefix_function(b"aaaa"), vec![0, 1, 2, 3]);
        assert_eq!(prefix_function(b"aabaaab"), vec![0, 1, 0, 1, 2, 2, 3]);
        assert!(prefix_function::<u8>(b"").is_empty());
    }

    #[test]
    fn test_find_basic() {
        assert_eq!(find_str("9911", "79991112301"), Some(2));
        assert_eq!(find_str("01", "79991112301"), Some(9));
        assert_eq!(find_str("7", "79991112301"), Some(0));
        assert_eq!(find_str("55", "79991112301"), None);
    }

    #[test]
    fn test_find_first_occurrence() {
        assert_eq!(find_str("11", "1111"), Some(0));
        assert_eq!(find_str("abab", "xxababab"), Some(2));
    }

    #[test]
    fn test_find_needs_fallback_through_table() {
        // Partial match "aab" must fall back instead of restarting
        assert_eq!(find_str("aabaaab", "aabaabaaab"), Some(3));
    }

    #[test]
    fn test_empty_pattern() {
        assert_eq!(find_str("", "abc"), Some(0));
        assert_eq!(find_str("", ""), Some(0));
    }

    #[test]
    fn test_pattern_longer_than_text() {
        assert_eq!(find_str("abcd", "abc"), None);
        assert_eq!(find_str("a", ""), None);
    }

    #[test]
    fn test_generic_slices() {
        assert_eq!(find(&[3, 4], &[1, 2, 3, 4, 5]), Some(2));
        assert_eq!(find(&['x'], &['a', 'b']), None);
    }

    #[test]
    fn test_unicode_text() {
        let text = "код 62.01";
        let idx = find_str("62", text).unwrap();
        assert_eq!(&text[idx..idx + 2], "62");
    }

    #[test]
    fn test_agrees_with_naive_search() {
        let texts = ["", "a", "ab", "abaab", "aaaaab", "abcabcabd", "79991112301"];
        let patterns = ["a", "b", "ab", "aab", "abd", "cab", "111", "2301", "9"];
        for text in texts {
            for pattern in patterns {
                let expected = text.find(pattern);
                let found = find_str(pattern, text);
                assert_eq!(found, expected, "pattern {:?} in {:?}", pattern, text);
                if let Some(i) = found {
                    assert_eq!(&text[i..i + pattern.len()], pattern);
                }
            }
        }
    }

    #[test]
    fn test_reusable_pattern() {
        let pattern = KmpPattern::new(b"01".as_slice());
        assert_eq!(pattern.find_in(b"79991112301"), Some(9));
        assert_eq!(pattern.find_in(b"70100000000"), Some(1));
        assert_eq!(pattern.find_in(b"79999999999"), None);
    }
}
