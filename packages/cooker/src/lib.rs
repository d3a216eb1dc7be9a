//! Markup Cooker - Convert tagged pseudo-markup reference data into JSON records.
//!
//! Source files hold hierarchical tags with free-text bodies, inline
//! `[...]` attributes and `#` comments. Each record root becomes one entry
//! keyed by its code; leaves become token lists, structured line records
//! with a name, description and validity interval, or trimmed raw lines.
//!
//! # Example
//!
//! ```
//! use markup_cooker::{cook_str, CookOptions, DiagnosticCollector};
//!
//! let raw = "\
//! <country>
//! <code>CZ</code>
//! <names>
//! {CZECHIA|CZECH REPUBLIC} [19930101 - 20161201] # successor state
//! </names>
//! </country>";
//!
//! let mut sink = DiagnosticCollector::new();
//! let records = cook_str(raw, "country", &CookOptions::new(), &mut sink).unwrap();
//!
//! let names = records["CZ"]["names"].records().unwrap();
//! assert_eq!(names[0].name, "czechia|czech republic");
//! assert_eq!(names[0].description, "successor state");
//! assert_eq!(names[0].start_yr, "19930101");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Configuration constants, validation and extraction settings
//! - [`types`]: Output data types (records, field values, line records)
//! - [`error`]: Error types and Result alias
//! - [`diagnostics`]: Non-fatal findings and sinks
//! - [`markup`]: Preprocessing and tree providers
//! - [`extract`]: Line-level token and record extraction
//! - [`classify`]: Leaf/branch classification of field subtrees
//! - [`assemble`]: Record assembly by code
//! - [`cook`]: The pipeline from raw text to records
//! - [`output`]: JSON and YAML output
//! - [`cli`]: Command-line interface

pub mod assemble;
pub mod classify;
pub mod cli;
pub mod config;
pub mod cook;
pub mod diagnostics;
pub mod error;
pub mod extract;
pub mod markup;
pub mod output;
pub mod types;

// Re-export main functions
pub use cook::{cook_file, cook_str, CookOptions};

// Re-export commonly used items
pub use config::{ExtractConfig, ExtractMode};
pub use diagnostics::{Diagnostic, DiagnosticCollector, DiagnosticSink};
pub use error::{CookerError, Result};
pub use markup::TreeProvider;
pub use output::OutputFormat;
pub use types::{FieldMap, FieldValue, LeafValue, LineRecord, RecordMap};
