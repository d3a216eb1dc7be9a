//! Name normalization for record-mode lines.

/// Characters dropped from names before normalization.
const QUOTE_CHARS: [char; 3] = ['\'', '´', '`'];

/// Contents of every `{...}` group, in order.
///
/// Groups are matched left to right without overlapping; empty groups are
/// skipped and a group may itself contain `{`.
///
/// # Examples
/// ```
/// use markup_cooker::extract::alias_groups;
///
/// assert_eq!(alias_groups("{FOO} or {BAR}"), vec!["FOO", "BAR"]);
/// assert_eq!(alias_groups("{} {A{B}"), vec!["A{B"]);
/// ```
#[must_use]
pub fn alias_groups(name: &str) -> Vec<&str> {
    let mut groups = Vec::new();
    let mut rest = name;

    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            break;
        };
        if close > 0 {
            groups.push(&after[..close]);
            rest = &after[close + 1..];
        } else {
            rest = after;
        }
    }
    groups
}

/// Normalize the name part of a line.
///
/// If the name contains `{...}` groups, it is replaced by the group contents
/// joined with `|`. Then quote and accent characters are removed, every
/// character other than an ASCII letter, space or `|` becomes `_`, runs of
/// `_` collapse to one, and the result is lowercased.
///
/// # Examples
/// ```
/// use markup_cooker::extract::normalize_name;
///
/// assert_eq!(normalize_name("{FOO|BAR}"), "foo|bar");
/// assert_eq!(normalize_name("ST. KITTS-NEVIS"), "st_ kitts_nevis");
/// assert_eq!(normalize_name("COTE D'IVOIRE"), "cote divoire");
/// ```
#[must_use]
pub fn normalize_name(name: &str) -> String {
    let aliases;
    let name = if name.contains('{') {
        aliases = alias_groups(name).join("|");
        aliases.as_str()
    } else {
        name
    };

    let mut out = String::with_capacity(name.len());
    for c in name.chars().filter(|c| !QUOTE_CHARS.contains(c)) {
        let mapped = if c.is_ascii_alphabetic() || c == ' ' || c == '|' {
            c
        } else {
            '_'
        };
        if mapped == '_' && out.ends_with('_') {
            continue;
        }
        out.push(mapped);
    }
    out.to_ascii_lowercase()
}
