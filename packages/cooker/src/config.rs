//! Configuration constants, validation functions and the extraction config.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{CookerError, Result};

/// Default marker that introduces a comment.
///
/// Whole lines starting with it are dropped before parsing; inside leaf text
/// it introduces an end-of-line description.
pub const DEFAULT_COMMENT_MARKER: char = '#';

/// End date used when a validity interval only names a start bound.
pub const DEFAULT_FALLBACK_END_DATE: &str = "20161201";

/// Attribute kind that end-of-line comments are rewritten into.
pub const DESCRIPTION_ATTRIBUTE: &str = "DESCR";

/// Tags under a record root that carry documentation rather than data.
pub const RESERVED_TAGS: [&str; 2] = ["doc", "comment"];

/// Destination value that redirects output to standard output.
pub const STDOUT_DESTINATION: &str = ".stdout";

/// Date pattern: YYYYMMDD.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{8}$").expect("valid regex"));

/// Root tag pattern: one token without whitespace or tag delimiters.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ROOT_TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s<>/]+$").expect("valid regex"));

/// Validate an 8-digit date (YYYYMMDD).
///
/// # Arguments
/// * `date_str` - Date string to validate
///
/// # Returns
/// * `Ok(())` if it is eight digits forming a real calendar date
/// * `Err(CookerError::InvalidDate)` otherwise
///
/// # Examples
/// ```
/// use markup_cooker::config::validate_date;
///
/// assert!(validate_date("20161201").is_ok());
/// assert!(validate_date("2016-12-01").is_err());
/// assert!(validate_date("20161301").is_err()); // Invalid month
/// ```
pub fn validate_date(date_str: &str) -> Result<()> {
    if !DATE_PATTERN.is_match(date_str) {
        return Err(CookerError::InvalidDate(date_str.to_string()));
    }

    let invalid = || CookerError::InvalidDate(date_str.to_string());
    let year: i32 = date_str[0..4].parse().map_err(|_| invalid())?;
    let month: u32 = date_str[4..6].parse().map_err(|_| invalid())?;
    let day: u32 = date_str[6..8].parse().map_err(|_| invalid())?;

    chrono::NaiveDate::from_ymd_opt(year, month, day)
        .map(|_| ())
        .ok_or_else(invalid)
}

/// Validate a comment marker.
///
/// The marker must not collide with the characters the extraction grammar
/// already gives a meaning to (letters, digits, whitespace, brackets and
/// tag delimiters).
pub fn validate_comment_marker(marker: char) -> Result<()> {
    let reserved = marker.is_alphanumeric()
        || marker.is_whitespace()
        || matches!(marker, '[' | ']' | '<' | '>' | '{' | '}' | '_');
    if reserved {
        Err(CookerError::InvalidCommentMarker(marker))
    } else {
        Ok(())
    }
}

/// Validate a record-root tag name.
///
/// # Examples
/// ```
/// use markup_cooker::config::validate_root_tag;
///
/// assert!(validate_root_tag("country").is_ok());
/// assert!(validate_root_tag("").is_err());
/// assert!(validate_root_tag("<country>").is_err());
/// ```
pub fn validate_root_tag(tag: &str) -> Result<()> {
    if ROOT_TAG_PATTERN.is_match(tag) {
        Ok(())
    } else {
        Err(CookerError::InvalidRootTag(tag.to_string()))
    }
}

/// What the line extractor produces for a leaf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ExtractMode {
    /// Uppercase tokens, normalized to lowercase strings.
    Token,
    /// One structured record (name, description, validity) per line.
    #[default]
    Record,
    /// Each non-blank physical line, stripped of surrounding whitespace.
    Line,
}

impl ExtractMode {
    /// Get the string value used on the command line.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::Record => "record",
            Self::Line => "line",
        }
    }
}

/// Extraction settings, chosen once per run and threaded through the
/// line extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Output shape of leaf values.
    pub mode: ExtractMode,

    /// Character introducing comments.
    pub comment_marker: char,

    /// End date substituted for single-bound validity intervals (YYYYMMDD).
    pub fallback_end_date: String,
}

impl ExtractConfig {
    /// Create a config with the default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: ExtractMode::default(),
            comment_marker: DEFAULT_COMMENT_MARKER,
            fallback_end_date: DEFAULT_FALLBACK_END_DATE.to_string(),
        }
    }

    /// Set the extraction mode.
    #[must_use]
    pub fn with_mode(mut self, mode: ExtractMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the comment marker.
    #[must_use]
    pub fn with_comment_marker(mut self, marker: char) -> Self {
        self.comment_marker = marker;
        self
    }

    /// Set the fallback end date.
    #[must_use]
    pub fn with_fallback_end_date(mut self, date: impl Into<String>) -> Self {
        self.fallback_end_date = date.into();
        self
    }

    /// Check the comment marker and fallback end date.
    pub fn validate(&self) -> Result<()> {
        validate_comment_marker(self.comment_marker)?;
        validate_date(&self.fallback_end_date)
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Check whether a field tag is reserved (excluded from record output).
#[must_use]
pub fn is_reserved_tag(tag: &str) -> bool {
    RESERVED_TAGS.contains(&tag)
}
