//! Line-mode extraction: the leaf's physical lines, trimmed.

/// Split text on newlines, trim each line and drop the blank ones.
///
/// Comments and bracketed attributes are kept verbatim.
pub(crate) fn extract_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lines_are_trimmed_and_blanks_dropped() {
        let text = "\n   NETHERLANDS [15810726 - ]  \n\n\t\n  UNITED PROVINCES\r\n";
        assert_eq!(
            extract_lines(text),
            vec!["NETHERLANDS [15810726 - ]", "UNITED PROVINCES"]
        );
    }

    #[test]
    fn test_comments_and_attributes_are_kept() {
        assert_eq!(
            extract_lines("FOO [>20100101] # old name\n[DESCR x]"),
            vec!["FOO [>20100101] # old name", "[DESCR x]"]
        );
    }

    #[test]
    fn test_blank_text_has_no_lines() {
        assert!(extract_lines("").is_empty());
        assert!(extract_lines(" \n \n").is_empty());
    }
}
