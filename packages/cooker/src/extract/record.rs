//! Record-mode extraction: one [`LineRecord`] per physical line.
//!
//! A line looks like
//!
//! ```text
//! {CZECHIA|CZECH REPUBLIC} [19930101 - 20161201] # successor state
//! ```
//!
//! Comments are first rewritten into `[DESCR ...]` attributes, so a single
//! bracket-span grammar yields the description and the validity interval.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use super::name::normalize_name;
use crate::config::DESCRIPTION_ATTRIBUTE;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::types::LineRecord;

/// Description attribute: `[DESCR <body>]`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DESCRIPTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\[{DESCRIPTION_ATTRIBUTE} ([^\]]+)\]")).expect("valid regex")
});

/// Two-date interval: `[<qualifier>YYYYMMDD - YYYYMMDD]`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[[A-Za-z_ ]*(?P<start>[0-9]{8}) - (?P<end>[0-9]{8})\]").expect("valid regex")
});

/// Single-bound interval: `[<qualifier><YYYYMMDD]` or `[<qualifier>>YYYYMMDD]`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BOUND_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[[A-Za-z_ ]*[<>](?P<start>[0-9]{8})\]").expect("valid regex")
});

/// Validity interval of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval<'a> {
    /// Explicit start and end dates.
    Range { start: &'a str, end: &'a str },
    /// Only a start bound; the end is the configured fallback date.
    Bound { start: &'a str },
}

/// Rewrite end-of-line comments into description attributes.
///
/// On each line, the comment starting at the last marker (unless that marker
/// is the line's first character) becomes `[DESCR <body>]`. This must happen
/// before any bracket-span scanning.
///
/// # Examples
/// ```
/// use markup_cooker::extract::rewrite_comments;
///
/// assert_eq!(
///     rewrite_comments("FOO # old\n# header", '#'),
///     "FOO [DESCR  old]\n# header"
/// );
/// ```
#[must_use]
pub fn rewrite_comments(text: &str, marker: char) -> String {
    text.split('\n')
        .map(|line| rewrite_line_comment(line, marker))
        .collect::<Vec<_>>()
        .join("\n")
}

fn rewrite_line_comment(line: &str, marker: char) -> Cow<'_, str> {
    match line.rfind(marker) {
        Some(pos) if pos > 0 => Cow::Owned(format!(
            "{}[{DESCRIPTION_ATTRIBUTE} {}]",
            &line[..pos],
            &line[pos + marker.len_utf8()..]
        )),
        _ => Cow::Borrowed(line),
    }
}

/// Body of the first description attribute, trimmed.
#[must_use]
pub fn find_description(line: &str) -> &str {
    DESCRIPTION_PATTERN
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map_or("", |m| m.as_str().trim())
}

/// Find the validity interval of a line.
///
/// The two-date form wins over the single-bound form.
#[must_use]
pub fn find_interval(line: &str) -> Option<Interval<'_>> {
    if let Some(caps) = RANGE_PATTERN.captures(line) {
        if let (Some(start), Some(end)) = (caps.name("start"), caps.name("end")) {
            return Some(Interval::Range {
                start: start.as_str(),
                end: end.as_str(),
            });
        }
    }

    BOUND_PATTERN
        .captures(line)
        .and_then(|caps| caps.name("start"))
        .map(|start| Interval::Bound {
            start: start.as_str(),
        })
}

/// Parse one line (after comment rewriting) into a record.
///
/// Returns `None` when both name and description are empty. A non-blank
/// line without a validity interval is reported to the sink and still
/// produces a record with empty dates.
///
/// # Arguments
/// * `line` - A single physical line
/// * `fallback_end_date` - End date for single-bound intervals
/// * `sink` - Receiver for lines without an interval
pub fn parse_line(
    line: &str,
    fallback_end_date: &str,
    sink: &mut dyn DiagnosticSink,
) -> Option<LineRecord> {
    let raw_name = line.split('[').next().unwrap_or_default().trim();
    let name = normalize_name(raw_name);
    let description = find_description(line);

    let (start_yr, end_yr) = match find_interval(line) {
        Some(Interval::Range { start, end }) => (start, end),
        Some(Interval::Bound { start }) => (start, fallback_end_date),
        None => {
            if !line.trim().is_empty() {
                sink.report(Diagnostic::UnparsedInterval {
                    line: line.to_string(),
                });
            }
            ("", "")
        }
    };

    if name.is_empty() && description.is_empty() {
        return None;
    }

    Some(LineRecord::new(name, description, start_yr, end_yr))
}

/// Extract one record per retained line of a leaf's text.
pub(crate) fn extract_records(
    text: &str,
    marker: char,
    fallback_end_date: &str,
    sink: &mut dyn DiagnosticSink,
) -> Vec<LineRecord> {
    let text = rewrite_comments(text, marker);
    text.split('\n')
        .filter_map(|line| parse_line(line, fallback_end_date, sink))
        .collect()
}
