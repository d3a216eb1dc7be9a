//! Token-mode extraction: uppercase words become lowercase tokens.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Bracketed attribute span (never nested).
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ATTRIBUTE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\[\]]*\]").expect("valid regex"));

/// Maximal run of uppercase letters and name punctuation.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z'`\-_]+\b").expect("valid regex"));

/// Remove every bracketed attribute span, one level deep.
///
/// # Examples
/// ```
/// use markup_cooker::extract::strip_attributes;
///
/// assert_eq!(strip_attributes("A [X] B [Y] C"), "A  B  C");
/// ```
#[must_use]
pub fn strip_attributes(text: &str) -> Cow<'_, str> {
    ATTRIBUTE_PATTERN.replace_all(text, "")
}

/// Lowercase a token, turn underscores into spaces and trim.
#[must_use]
pub fn normalize_token(token: &str) -> String {
    token.to_lowercase().replace('_', " ").trim().to_string()
}

/// Extract normalized tokens in order of appearance, duplicates kept.
pub(crate) fn extract_tokens(text: &str, comment_span: &Regex) -> Vec<String> {
    let text = text.replace('.', "");
    let text = strip_attributes(&text);
    let text = comment_span.replace_all(&text, "");

    TOKEN_PATTERN
        .find_iter(&text)
        .map(|m| normalize_token(m.as_str()))
        .filter(|token| !token.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[allow(clippy::expect_used)]
    static HASH_COMMENT: LazyLock<Regex> =
        LazyLock::new(|| Regex::new("#[^\n]*").expect("valid regex"));

    fn tokens(text: &str) -> Vec<String> {
        extract_tokens(text, &HASH_COMMENT)
    }

    #[test]
    fn test_strip_attributes_one_level() {
        assert_eq!(strip_attributes("A [X] B [Y] C"), "A  B  C");
        assert_eq!(strip_attributes("A [] B"), "A  B");
        // Only the innermost span of nested brackets matches
        assert_eq!(strip_attributes("A [X [Y] Z] B"), "A [X  Z] B");
    }

    #[test]
    fn test_tokens_in_order_with_duplicates() {
        assert_eq!(
            tokens("FOO BAR\nFOO [IGNORED] BAZ"),
            vec!["foo", "bar", "foo", "baz"]
        );
    }

    #[test]
    fn test_token_punctuation() {
        assert_eq!(
            tokens("COTE_D'IVOIRE GUINEA-BISSAU"),
            vec!["cote d'ivoire", "guinea-bissau"]
        );
    }

    #[test]
    fn test_periods_are_stripped() {
        assert_eq!(tokens("U.S.A. ST. LUCIA"), vec!["usa", "st", "lucia"]);
    }

    #[test]
    fn test_comments_are_removed() {
        assert_eq!(tokens("FOO # BAR\nBAZ"), vec!["foo", "baz"]);
    }

    #[test]
    fn test_lowercase_words_are_ignored() {
        assert_eq!(tokens("FOO and BAR Mixed"), vec!["foo", "bar"]);
    }

    #[test]
    fn test_underscore_only_token_is_dropped() {
        assert_eq!(tokens("A _ B"), vec!["a", "b"]);
    }

    #[test]
    fn test_extraction_is_idempotent_on_normalized_tokens() {
        let first = tokens("NETHERLANDS [>20100101]\nBELGIUM # kingdom\nLUXEMBOURG");
        let rebuilt = first.join(" ").to_uppercase();
        assert_eq!(tokens(&rebuilt), first);
    }

    #[test]
    fn test_normalize_token() {
        assert_eq!(normalize_token("NEW_ZEALAND"), "new zealand");
        assert_eq!(normalize_token("_X_"), "x");
    }
}
