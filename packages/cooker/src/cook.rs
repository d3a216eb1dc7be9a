//! Cooking pipeline: raw source text to keyed records.
//!
//! ```text
//! raw text -> preprocess -> tree provider -> assemble -> classify/extract
//! ```
//!
//! Only the edges are fallible: reading the source, validating options and
//! (for the strict provider) parsing XML.

use std::path::Path;

use roxmltree::Document;

use crate::assemble::assemble;
use crate::config::{validate_root_tag, ExtractConfig};
use crate::diagnostics::DiagnosticSink;
use crate::error::{CookerError, Result};
use crate::extract::Extractor;
use crate::markup::{preprocess, wrap_document, MarkupTree, TreeProvider, XmlNode};
use crate::output::OutputFormat;
use crate::types::RecordMap;

/// Options for one cooking run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookOptions {
    /// Line extraction settings.
    pub extract: ExtractConfig,

    /// Parser for the preprocessed text.
    pub provider: TreeProvider,

    /// Serialization format of the result.
    pub format: OutputFormat,

    /// Indent JSON output.
    pub pretty: bool,
}

impl CookOptions {
    /// Create options with the default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the extraction settings.
    #[must_use]
    pub fn with_extract(mut self, extract: ExtractConfig) -> Self {
        self.extract = extract;
        self
    }

    /// Set the tree provider.
    #[must_use]
    pub fn with_provider(mut self, provider: TreeProvider) -> Self {
        self.provider = provider;
        self
    }

    /// Set the output format.
    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable or disable pretty output.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// Cook raw source text into records.
///
/// # Arguments
/// * `raw` - Source text as read from disk
/// * `root_tag` - Tag name of record roots
/// * `options` - Extraction and parser settings
/// * `sink` - Receiver for diagnostics
///
/// # Returns
/// Records keyed by code
///
/// # Errors
/// Returns an error for an invalid root tag or extraction config, or when the
/// strict XML provider cannot parse the text.
///
/// # Examples
/// ```
/// use markup_cooker::cook::{cook_str, CookOptions};
/// use markup_cooker::diagnostics::DiagnosticCollector;
///
/// let raw = "<country><code>NL</code><names>NETHERLANDS [>18150316]</names></country>";
/// let mut sink = DiagnosticCollector::new();
/// let records = cook_str(raw, "country", &CookOptions::new(), &mut sink).unwrap();
///
/// let names = records["NL"]["names"].records().unwrap();
/// assert_eq!(names[0].name, "netherlands");
/// assert_eq!(names[0].end_yr, "20161201");
/// ```
pub fn cook_str(
    raw: &str,
    root_tag: &str,
    options: &CookOptions,
    sink: &mut dyn DiagnosticSink,
) -> Result<RecordMap> {
    validate_root_tag(root_tag)?;
    let extractor = Extractor::new(options.extract.clone())?;
    let text = preprocess(raw, options.extract.comment_marker);
    tracing::debug!(
        mode = options.extract.mode.as_str(),
        provider = ?options.provider,
        "Cooking source"
    );

    let records = match options.provider {
        TreeProvider::Lenient => {
            let tree = MarkupTree::parse(&text);
            tracing::debug!(nodes = tree.len(), "Parsed markup tree");
            assemble(tree.root(), &root_tag.to_ascii_lowercase(), &extractor, sink)
        }
        TreeProvider::Xml => {
            let wrapped = wrap_document(&text);
            let doc = Document::parse(&wrapped)?;
            assemble(XmlNode::new(doc.root_element()), root_tag, &extractor, sink)
        }
    };

    tracing::debug!(records = records.len(), "Cooked records");
    Ok(records)
}

/// Read a source file.
///
/// # Errors
/// Returns [`CookerError::SourceNotFound`] for a missing file, or an IO error.
pub fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            CookerError::SourceNotFound {
                path: path.to_path_buf(),
                source,
            }
        } else {
            CookerError::Io(source)
        }
    })
}

/// Read and cook a source file.
///
/// # Errors
/// Returns an error if the file cannot be read or [`cook_str`] fails.
pub fn cook_file(
    path: &Path,
    root_tag: &str,
    options: &CookOptions,
    sink: &mut dyn DiagnosticSink,
) -> Result<RecordMap> {
    let raw = read_source(path)?;
    tracing::debug!(path = %path.display(), bytes = raw.len(), "Read source");
    cook_str(&raw, root_tag, options, sink)
}
