//! Record assembly: one keyed field mapping per record root.

use crate::classify::build_field;
use crate::config::is_reserved_tag;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::extract::Extractor;
use crate::markup::{element_children, find_children, MarkupNode};
use crate::types::{FieldMap, RecordMap};

/// Assemble all records under a document root.
///
/// Record roots are the direct children of `document` tagged
/// `record_root_tag`; roots nested deeper are not assembled separately.
/// When two records share a code, the later one replaces the earlier one
/// and a [`Diagnostic::DuplicateCode`] is reported.
///
/// # Arguments
/// * `document` - Document root node
/// * `record_root_tag` - Tag name of record roots
/// * `extractor` - Line extractor for leaf fields
/// * `sink` - Receiver for diagnostics
///
/// # Returns
/// Mapping from record code to the record's fields
pub fn assemble<N: MarkupNode>(
    document: N,
    record_root_tag: &str,
    extractor: &Extractor,
    sink: &mut dyn DiagnosticSink,
) -> RecordMap {
    let mut records = RecordMap::new();

    for (index, root) in find_children(document, record_root_tag)
        .into_iter()
        .enumerate()
    {
        let Some((code, fields)) = assemble_record(root, index, extractor, sink) else {
            continue;
        };

        tracing::debug!(code = %code.trim(), fields = fields.len(), "Assembled record");

        if records.insert(code.clone(), fields).is_some() {
            sink.report(Diagnostic::DuplicateCode { code });
        }
    }

    records
}

/// Assemble a single record root into `(code, fields)`.
///
/// The code is the untrimmed text of the first element child, whatever its
/// tag. Every child whose tag is not reserved (`doc`, `comment`) becomes a
/// field; a repeated tag keeps the first occurrence and is reported as a
/// [`Diagnostic::DuplicateField`]. Returns `None` (and reports
/// [`Diagnostic::EmptyRecord`]) for a root without element children.
pub fn assemble_record<N: MarkupNode>(
    root: N,
    index: usize,
    extractor: &Extractor,
    sink: &mut dyn DiagnosticSink,
) -> Option<(String, FieldMap)> {
    let candidates = element_children(root);
    let Some(first) = candidates.first() else {
        sink.report(Diagnostic::EmptyRecord { index });
        return None;
    };
    let code = first.text();

    let mut fields = FieldMap::new();
    for candidate in &candidates {
        let Some(tag) = candidate.tag_name() else {
            continue;
        };
        if is_reserved_tag(tag) {
            continue;
        }
        if fields.contains_key(tag) {
            sink.report(Diagnostic::DuplicateField {
                code: code.clone(),
                tag: tag.to_string(),
            });
            continue;
        }
        let value = build_field(*candidate, extractor, sink);
        fields.insert(tag.to_string(), value);
    }

    Some((code, fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ExtractConfig, ExtractMode};
    use crate::diagnostics::DiagnosticCollector;
    use crate::markup::MarkupTree;
    use crate::types::{FieldValue, LeafValue, LineRecord};
    use pretty_assertions::assert_eq;

    fn token_extractor() -> Extractor {
        Extractor::new(ExtractConfig::new().with_mode(ExtractMode::Token)).unwrap()
    }

    fn cook(markup: &str, extractor: &Extractor) -> (RecordMap, DiagnosticCollector) {
        let tree = MarkupTree::parse(markup);
        let mut sink = DiagnosticCollector::new();
        let records = assemble(tree.root(), "country", extractor, &mut sink);
        (records, sink)
    }

    #[test]
    fn test_code_is_first_child_text() {
        let markup = "<country><code>NL</code><names>NETHERLANDS</names></country>";
        let (records, sink) = cook(markup, &token_extractor());

        assert_eq!(records.len(), 1);
        let fields = &records["NL"];
        assert_eq!(fields["code"].tokens().unwrap(), ["nl"]);
        assert_eq!(fields["names"].tokens().unwrap(), ["netherlands"]);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_code_is_not_trimmed() {
        let markup = "<country><iso>\nNL\n</iso></country>";
        let (records, _) = cook(markup, &token_extractor());
        assert!(records.contains_key("\nNL\n"));
    }

    #[test]
    fn test_reserved_tags_are_excluded() {
        let markup = "<country><code>NL</code><doc>NOTES</doc><comment>X</comment><names>NL</names></country>";
        let (records, _) = cook(markup, &token_extractor());

        let keys: Vec<_> = records["NL"].keys().cloned().collect();
        assert_eq!(keys, vec!["code", "names"]);
    }

    #[test]
    fn test_reserved_first_child_still_provides_code() {
        let markup = "<country><doc>DOCUMENTED</doc><names>NL</names></country>";
        let (records, _) = cook(markup, &token_extractor());

        let fields = &records["DOCUMENTED"];
        assert!(!fields.contains_key("doc"));
        assert!(fields.contains_key("names"));
    }

    #[test]
    fn test_duplicate_code_last_write_wins() {
        let markup = "<country><code>NL</code><names>OLD</names></country>\n\
                      <country><code>NL</code><names>NEW</names><extra>X</extra></country>";
        let (records, sink) = cook(markup, &token_extractor());

        let tokens = |values: &[&str]| {
            FieldValue::Leaf(LeafValue::Tokens(
                values.iter().map(|v| (*v).to_string()).collect(),
            ))
        };
        let mut expected = FieldMap::new();
        expected.insert("code".to_string(), tokens(&["nl"]));
        expected.insert("names".to_string(), tokens(&["new"]));
        expected.insert("extra".to_string(), tokens(&["x"]));

        assert_eq!(records.len(), 1);
        assert_eq!(records["NL"], expected);
        assert_eq!(
            records["NL"].keys().collect::<Vec<_>>(),
            vec!["code", "names", "extra"]
        );
        assert_eq!(
            sink.diagnostics(),
            &[Diagnostic::DuplicateCode {
                code: "NL".to_string()
            }]
        );
    }

    #[test]
    fn test_replaced_record_keeps_first_position() {
        let markup = "<country><code>ZZ</code><names>OLD</names></country>\n\
                      <country><code>AA</code><names>A</names></country>\n\
                      <country><code>ZZ</code><names>NEW</names></country>";
        let (records, _) = cook(markup, &token_extractor());

        assert_eq!(records.keys().collect::<Vec<_>>(), vec!["ZZ", "AA"]);
        assert_eq!(records["ZZ"]["names"].tokens().unwrap(), ["new"]);
    }

    #[test]
    fn test_duplicate_field_keeps_first() {
        let markup = "<country><code>NL</code><names>FIRST</names><names>SECOND</names></country>";
        let (records, sink) = cook(markup, &token_extractor());

        assert_eq!(records["NL"]["names"].tokens().unwrap(), ["first"]);
        assert_eq!(sink.count_kind("duplicate_field"), 1);
    }

    #[test]
    fn test_only_direct_children_of_document_are_roots() {
        let markup = "<country><code>NL</code><neighbours><country><code>BE</code></country></neighbours></country>";
        let (records, _) = cook(markup, &token_extractor());

        assert_eq!(records.len(), 1);
        assert!(records.contains_key("NL"));
        // The nested record is an ordinary field subtree of NL
        assert!(records["NL"]["neighbours"].as_leaf().is_some());
    }

    #[test]
    fn test_empty_record_is_skipped() {
        let markup = "<country></country><country>text only</country><country><code>BE</code></country>";
        let (records, sink) = cook(markup, &token_extractor());

        assert_eq!(records.len(), 1);
        assert!(records.contains_key("BE"));
        assert_eq!(
            sink.diagnostics(),
            &[
                Diagnostic::EmptyRecord { index: 0 },
                Diagnostic::EmptyRecord { index: 1 }
            ]
        );
    }

    #[test]
    fn test_other_top_level_tags_are_ignored() {
        let markup = "<header><code>H</code></header><country><code>NL</code></country>";
        let (records, _) = cook(markup, &token_extractor());
        assert_eq!(records.keys().collect::<Vec<_>>(), vec!["NL"]);
    }

    #[test]
    fn test_record_mode_fields() {
        let markup = "<country>\n<code>NL</code>\n<names>\n{NETHERLANDS|HOLLAND} [15810726 - 20161201] # kingdom\n</names>\n</country>";
        let extractor = Extractor::new(ExtractConfig::default()).unwrap();
        let (records, sink) = cook(markup, &extractor);

        assert_eq!(
            records["NL"]["names"],
            FieldValue::Leaf(LeafValue::Records(vec![LineRecord::new(
                "netherlands|holland",
                "kingdom",
                "15810726",
                "20161201"
            )]))
        );
        // The code leaf "NL" has no interval
        assert_eq!(sink.count_kind("unparsed_interval"), 1);
    }
}
