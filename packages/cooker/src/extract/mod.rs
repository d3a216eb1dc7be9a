//! Line-level extraction of leaf text.
//!
//! A leaf's flattened text is turned into a list of tokens, a list of
//! [`LineRecord`](crate::types::LineRecord)s or its trimmed lines, depending
//! on the configured [`ExtractMode`]. The mode is fixed when the
//! [`Extractor`] is built.

mod line;
mod name;
mod record;
mod token;

pub use name::{alias_groups, normalize_name};
pub use record::{
    find_description, find_interval, parse_line, rewrite_comments, Interval,
};
pub use token::{normalize_token, strip_attributes};

use regex::Regex;

use crate::config::{ExtractConfig, ExtractMode};
use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use crate::types::LeafValue;

/// Extracts leaf values according to an [`ExtractConfig`].
///
/// Building an extractor validates the config and compiles the regexes that
/// depend on the comment marker, so a single instance should be reused for a
/// whole document.
#[derive(Debug, Clone)]
pub struct Extractor {
    config: ExtractConfig,
    /// Comment marker through end of line.
    comment_span: Regex,
}

impl Extractor {
    /// Create an extractor for the given config.
    ///
    /// # Errors
    /// Returns an error if the comment marker or fallback end date is invalid.
    pub fn new(config: ExtractConfig) -> Result<Self> {
        config.validate()?;
        let pattern = format!("{}[^\n]*", regex::escape(&config.comment_marker.to_string()));
        #[allow(clippy::expect_used)] // Escaped literal followed by a fixed class is always valid
        let comment_span = Regex::new(&pattern).expect("valid regex");
        Ok(Self {
            config,
            comment_span,
        })
    }

    /// Extract a leaf value from a node's flattened text.
    ///
    /// # Arguments
    /// * `text` - Flattened text of the leaf node
    /// * `sink` - Receiver for lines without a validity interval (record mode)
    pub fn extract(&self, text: &str, sink: &mut dyn DiagnosticSink) -> LeafValue {
        match self.config.mode {
            ExtractMode::Token => LeafValue::Tokens(self.extract_tokens(text)),
            ExtractMode::Record => LeafValue::Records(record::extract_records(
                text,
                self.config.comment_marker,
                &self.config.fallback_end_date,
                sink,
            )),
            ExtractMode::Line => LeafValue::Lines(line::extract_lines(text)),
        }
    }

    /// Extract normalized tokens (token mode), regardless of the configured mode.
    #[must_use]
    pub fn extract_tokens(&self, text: &str) -> Vec<String> {
        token::extract_tokens(text, &self.comment_span)
    }
}
