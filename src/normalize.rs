//! Phone number normalization.
//!
//! Turns free-form user input such as `8 (912) 345-67-89 доб. 12` into the
//! canonical `+79123456789` form, or rejects it.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::NormalizedPhone;

/// Trailing extension annotations: a marker, an optional `:`/`.`, then a digit
/// and whatever follows it.
static EXTENSION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\s*доб[:.]?\s*\d.*$",
        r"(?i)\s*ext[:.]?\s*\d.*$",
        r"(?i)\s*[хx][:.]?\s*\d.*$",
        r"\s*#[:.]?\s*\d.*$",
        r"\s*\*[:.]?\s*\d.*$",
        r"(?i)\s*доп[:.]?\s*\d.*$",
    ]
    .iter()
    .map(|pattern| {
        Regex::new(pattern).expect("EXTENSION_PATTERNS: hardcoded regex is invalid")
    })
    .collect()
});

/// Number of digits in a full Russian number including the country code
const FULL_LENGTH: usize = 11;

/// Number of digits in a number written without any country prefix
const LOCAL_LENGTH: usize = 10;

/// Normalize a phone number written in any common format.
///
/// Returns `None` for anything that cannot be turned into 11 digits starting
/// with `7`. Normalizing an already normalized number returns it unchanged.
pub fn normalize(raw: &str) -> Option<NormalizedPhone> {
    let cleaned = strip_extension(raw.trim_end_matches(&['\r', '\n'][..]));
    let substituted = substitute_confusables(&cleaned);
    let digits: String = substituted.chars().filter(char::is_ascii_digit).collect();
    normalize_country_code(digits).map(|digits| NormalizedPhone::from_digits(&digits))
}

/// Remove a trailing extension such as `доб. 123`, `ext 5` or `#12`.
pub fn strip_extension(raw: &str) -> String {
    EXTENSION_PATTERNS
        .iter()
        .fold(raw.to_string(), |text, pattern| {
            pattern.replace_all(&text, "").into_owned()
        })
}

/// Replace letters commonly typed in place of digits.
pub fn substitute_confusables(raw: &str) -> String {
    raw.chars()
        .map(|c| confusable_digit(c).unwrap_or(c))
        .collect()
}

fn confusable_digit(c: char) -> Option<char> {
    match c {
        'O' | 'o' | 'О' | 'о' => Some('0'),
        'З' | 'з' => Some('3'),
        'Ч' | 'ч' => Some('4'),
        'b' | 'ь' => Some('6'),
        'B' | 'В' | 'в' => Some('8'),
        _ => None,
    }
}

/// Bring a bare digit string to the `7XXXXXXXXXX` form.
fn normalize_country_code(mut digits: String) -> Option<String> {
    // "007" is the international form of "+7"; any other "00" prefix is foreign
    if let Some(rest) = digits.strip_prefix("007") {
        digits = format!("7{}", rest);
    } else if digits.starts_with("00") {
        return None;
    }

    if digits.starts_with('8') {
        if digits.len() != FULL_LENGTH {
            return None;
        }
        digits.replace_range(..1, "7");
    } else if digits.starts_with('7') {
        if digits.len() != FULL_LENGTH {
            return None;
        }
    } else if digits.len() == LOCAL_LENGTH {
        digits.insert(0, '7');
    } else {
        return None;
    }

    if digits.len() == FULL_LENGTH && digits.starts_with('7') {
        Some(digits)
    } else {
        None
    }
}
