//! Text normalization for product names.
//!
//! Turns a free-form display name into lowercase vocabulary tokens. Each
//! stripping rule is its own function so it can be tested in isolation;
//! [`normalize`] applies them once, left to right:
//!
//! 1. [`strip_parenthetical_codes`]: `"(PS231)"` → removed
//! 2. [`strip_size_tokens`]: `"14MM"`, `"8x"`, `"2.5"` → removed
//! 3. [`strip_non_letters`]: anything that is not an ASCII letter or whitespace
//! 4. [`tokenize`]: split on whitespace, lowercase, drop tokens of length ≤ 2
//!
//! ```rust
//! use lustre_search::normalize::normalize;
//!
//! assert_eq!(
//!     normalize("14K White Gold Diamond Ring (PS231)"),
//!     vec!["white", "gold", "diamond", "ring"]
//! );
//! ```

use std::sync::LazyLock;

use regex::Regex;

/// Tokens at or below this length are discarded.
pub const MIN_TOKEN_LEN: usize = 2;

static PARENTHETICAL_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([\w-]+\)").expect("valid parenthetical regex"));

static SIZE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\d+(?:\.\d+)?(?:mm|x)?").expect("valid size regex"));

static NON_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z\s]").expect("valid letter regex"));

/// Remove parenthetical alphanumeric/hyphen codes such as `(PS231)`.
pub fn strip_parenthetical_codes(text: &str) -> String {
    PARENTHETICAL_CODE.replace_all(text, "").into_owned()
}

/// Remove numeric size tokens, optionally decimal and optionally followed by
/// `mm` or `x` (any case).
pub fn strip_size_tokens(text: &str) -> String {
    SIZE_TOKEN.replace_all(text, "").into_owned()
}

/// Remove every character that is not an ASCII letter or whitespace.
pub fn strip_non_letters(text: &str) -> String {
    NON_LETTER.replace_all(text, "").into_owned()
}

/// Split on whitespace runs, lowercase, and keep tokens longer than
/// [`MIN_TOKEN_LEN`].
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(str::to_lowercase)
        .filter(|token| token.len() > MIN_TOKEN_LEN)
        .collect()
}

/// Normalize a display string into vocabulary tokens.
///
/// Returns an empty vector when nothing survives; that is not an error.
pub fn normalize(text: &str) -> Vec<String> {
    let text = strip_parenthetical_codes(text);
    let text = strip_size_tokens(&text);
    let text = strip_non_letters(&text);
    tokenize(&text)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ------------------------------------------------------------------------
    // Individual stripping rules
    // ------------------------------------------------------------------------

    #[test]
    fn test_strip_parenthetical_codes() {
        assert_eq!(strip_parenthetical_codes("Ring (PS231)"), "Ring ");
        assert_eq!(strip_parenthetical_codes("Stud (AB-12) Pair"), "Stud  Pair");
        // Spaces inside parentheses are not a code
        assert_eq!(strip_parenthetical_codes("Ring (two tone)"), "Ring (two tone)");
    }

    #[test]
    fn test_strip_size_tokens() {
        assert_eq!(strip_size_tokens("14MM Pearl"), " Pearl");
        assert_eq!(strip_size_tokens("8x Halo"), " Halo");
        assert_eq!(strip_size_tokens("2.5 Carat"), " Carat");
        assert_eq!(strip_size_tokens("6mm Round"), " Round");
        assert_eq!(strip_size_tokens("14K Gold"), "K Gold");
    }

    #[test]
    fn test_strip_non_letters() {
        assert_eq!(strip_non_letters("Rose-Gold, 1/2 ct!"), "RoseGold  ct");
        assert_eq!(strip_non_letters("Émeraude"), "meraude");
    }

    #[test]
    fn test_tokenize_drops_short_tokens() {
        assert_eq!(tokenize("  IN a Halo  SETTING "), vec!["halo", "setting"]);
    }

    // ------------------------------------------------------------------------
    // Full pipeline
    // ------------------------------------------------------------------------

    #[test]
    fn test_normalize_product_name() {
        assert_eq!(
            normalize("14K White Gold Diamond Ring (PS231)"),
            vec!["white", "gold", "diamond", "ring"]
        );
        assert_eq!(normalize("Dial Face Pendant"), vec!["dial", "face", "pendant"]);
    }

    #[test]
    fn test_normalize_sizes_and_units() {
        assert_eq!(
            normalize("7X5MM Oval Sapphire 2.5ct Studs"),
            vec!["oval", "sapphire", "studs"]
        );
    }

    #[test]
    fn test_normalize_empty_result() {
        assert!(normalize("").is_empty());
        assert!(normalize("(PS231) 14MM 2.5").is_empty());
        assert!(normalize("a an of").is_empty());
    }

    proptest! {
        #[test]
        fn prop_normalize_idempotent_on_normalized_input(
            words in prop::collection::vec("[a-z]{1,10}", 0..8)
        ) {
            let input = words.join(" ");
            let expected: Vec<String> =
                words.into_iter().filter(|w| w.len() > MIN_TOKEN_LEN).collect();
            prop_assert_eq!(normalize(&input), expected.clone());
            prop_assert_eq!(normalize(&expected.join(" ")), expected);
        }

        #[test]
        fn prop_normalize_yields_lowercase_letters(text in ".{0,60}") {
            for token in normalize(&text) {
                prop_assert!(token.len() > MIN_TOKEN_LEN);
                prop_assert!(token.chars().all(|c| c.is_ascii_lowercase()));
            }
        }
    }
}
