//! Raw-text filters applied before the markup is parsed.

/// Replace whitespace inside tag delimiters with underscores.
///
/// Multi-word tag names (`<Country Code>`) then survive parsing as single
/// names (`country_code`). Only spans that look like tags are touched: a
/// `<` followed by a letter or `/`, up to the next `>`, with no other `<`
/// in between. Literal comparison markers in text (`[<20100101]`) are left
/// alone.
///
/// # Examples
/// ```
/// use markup_cooker::markup::fold_tag_whitespace;
///
/// assert_eq!(
///     fold_tag_whitespace("<Country Code>NL NL</Country Code>"),
///     "<Country_Code>NL NL</Country_Code>"
/// );
/// ```
#[must_use]
pub fn fold_tag_whitespace(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        let candidate = &rest[lt..];

        match tag_span_len(candidate) {
            Some(len) => {
                out.extend(
                    candidate[..len]
                        .chars()
                        .map(|c| if c.is_whitespace() { '_' } else { c }),
                );
                rest = &candidate[len..];
            }
            None => {
                out.push('<');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Length in bytes of the tag span starting at `text`, including `>`.
fn tag_span_len(text: &str) -> Option<usize> {
    let opens_tag = text[1..]
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '/');
    if !opens_tag {
        return None;
    }

    let end = text.find('>')?;
    if text[1..end].contains('<') {
        return None;
    }
    Some(end + 1)
}

/// Drop every physical line starting with the comment marker.
///
/// Only lines whose very first character is the marker are removed; inline
/// end-of-line comments are handled later, on leaf text.
///
/// # Examples
/// ```
/// use markup_cooker::markup::strip_comment_lines;
///
/// assert_eq!(strip_comment_lines("# header\n<a>1</a>\n #kept", '#'), "<a>1</a>\n #kept");
/// ```
#[must_use]
pub fn strip_comment_lines(raw: &str, marker: char) -> String {
    raw.split('\n')
        .filter(|line| !line.starts_with(marker))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Apply both filters in order: fold tag whitespace, then strip comment lines.
#[must_use]
pub fn preprocess(raw: &str, marker: char) -> String {
    strip_comment_lines(&fold_tag_whitespace(raw), marker)
}
