//! Non-fatal findings reported while cooking.
//!
//! The transformation never fails on a parsed tree. Data-quality problems
//! (lines without a recognizable validity interval, duplicate codes,
//! repeated field tags) are resolved by fixed rules and reported to a
//! [`DiagnosticSink`] so callers can audit the source data.

use std::fmt;

/// A data-quality finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A non-blank line matched neither validity interval form.
    UnparsedInterval {
        /// The line after comment rewriting.
        line: String,
    },

    /// A later record reused an earlier record's code and replaced it.
    DuplicateCode {
        /// The repeated code.
        code: String,
    },

    /// A record lists the same field tag more than once; only the first
    /// occurrence is cooked.
    DuplicateField {
        /// Code of the record.
        code: String,
        /// The repeated tag.
        tag: String,
    },

    /// A record root without element children has no code and is skipped.
    EmptyRecord {
        /// Position of the record root among matching roots (0-based).
        index: usize,
    },
}

impl Diagnostic {
    /// Short machine-friendly kind name.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnparsedInterval { .. } => "unparsed_interval",
            Self::DuplicateCode { .. } => "duplicate_code",
            Self::DuplicateField { .. } => "duplicate_field",
            Self::EmptyRecord { .. } => "empty_record",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnparsedInterval { line } => {
                write!(f, "No validity interval in line: {}", line.trim())
            }
            Self::DuplicateCode { code } => {
                write!(f, "Duplicate record code '{code}', keeping the later record")
            }
            Self::DuplicateField { code, tag } => {
                write!(f, "Record '{code}' repeats field <{tag}>, keeping the first")
            }
            Self::EmptyRecord { index } => {
                write!(f, "Record root #{index} has no fields, skipping")
            }
        }
    }
}

/// Receiver of diagnostics.
pub trait DiagnosticSink {
    /// Handle one diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);
}

impl<F: FnMut(Diagnostic)> DiagnosticSink for F {
    fn report(&mut self, diagnostic: Diagnostic) {
        self(diagnostic);
    }
}

/// Sink that stores every diagnostic in order.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the collected diagnostics.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of diagnostics of the given kind.
    #[must_use]
    pub fn count_kind(&self, kind: &str) -> usize {
        self.diagnostics.iter().filter(|d| d.kind() == kind).count()
    }

    /// Whether nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl DiagnosticSink for DiagnosticCollector {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

/// Sink that logs every diagnostic as a warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(kind = diagnostic.kind(), "{diagnostic}");
    }
}

/// Sink that forwards to two sinks.
#[derive(Debug)]
pub struct Tee<A, B>(pub A, pub B);

impl<A: DiagnosticSink, B: DiagnosticSink> DiagnosticSink for Tee<A, B> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.0.report(diagnostic.clone());
        self.1.report(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_keeps_order() {
        let mut collector = DiagnosticCollector::new();
        collector.report(Diagnostic::DuplicateCode {
            code: "NL".to_string(),
        });
        collector.report(Diagnostic::UnparsedInterval {
            line: "FOO".to_string(),
        });

        assert_eq!(collector.diagnostics().len(), 2);
        assert_eq!(collector.diagnostics()[0].kind(), "duplicate_code");
        assert_eq!(collector.count_kind("unparsed_interval"), 1);
    }

    #[test]
    fn test_closure_is_a_sink() {
        let mut lines = Vec::new();
        {
            let mut sink = |d: Diagnostic| lines.push(d.to_string());
            sink.report(Diagnostic::EmptyRecord { index: 3 });
        }
        assert_eq!(lines, vec!["Record root #3 has no fields, skipping"]);
    }

    #[test]
    fn test_tee_reports_to_both() {
        let mut tee = Tee(DiagnosticCollector::new(), DiagnosticCollector::new());
        tee.report(Diagnostic::DuplicateField {
            code: "NL".to_string(),
            tag: "name".to_string(),
        });

        assert_eq!(tee.0.diagnostics(), tee.1.diagnostics());
        assert!(!tee.0.is_empty());
    }

    #[test]
    fn test_display() {
        let d = Diagnostic::UnparsedInterval {
            line: "  FOO [BAR]  ".to_string(),
        };
        assert_eq!(d.to_string(), "No validity interval in line: FOO [BAR]");

        let d = Diagnostic::DuplicateField {
            code: "NL".to_string(),
            tag: "names".to_string(),
        };
        assert_eq!(d.to_string(), "Record 'NL' repeats field <names>, keeping the first");
    }
}
