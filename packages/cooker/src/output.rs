//! Serialization of cooked records to JSON or YAML.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::STDOUT_DESTINATION;
use crate::error::Result;
use crate::types::RecordMap;

/// Serialization format of the cooked records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// A single JSON object keyed by record code.
    #[default]
    Json,
    /// The same structure as a YAML document.
    Yaml,
}

impl OutputFormat {
    /// Conventional file extension.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

/// Render records as a string.
///
/// JSON is compact unless `pretty` is set; YAML is always block style and
/// starts with a document marker. The output ends with a newline.
///
/// # Arguments
/// * `records` - Cooked records
/// * `format` - Target format
/// * `pretty` - Indent JSON output
pub fn render(records: &RecordMap, format: OutputFormat, pretty: bool) -> Result<String> {
    let content = match format {
        OutputFormat::Json if pretty => format!("{}\n", serde_json::to_string_pretty(records)?),
        OutputFormat::Json => format!("{}\n", serde_json::to_string(records)?),
        OutputFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(records)?;
            // Add document start marker and clean up trailing whitespace
            let lines: Vec<&str> = yaml.lines().map(str::trim_end).collect();
            format!("---\n{}\n", lines.join("\n"))
        }
    };
    Ok(content)
}

/// Whether a destination means standard output.
#[must_use]
pub fn is_stdout_destination(destination: &Path) -> bool {
    destination == Path::new(STDOUT_DESTINATION)
}

/// Write records to a file, or to standard output for `.stdout`.
///
/// Files are written atomically: the content goes to a hidden temp file next
/// to the destination, is synced to disk, then renamed over the destination.
///
/// # Returns
/// The written path, or `None` when the records went to standard output
pub fn write_output(
    records: &RecordMap,
    destination: &Path,
    format: OutputFormat,
    pretty: bool,
) -> Result<Option<PathBuf>> {
    let content = render(records, format, pretty)?;

    if is_stdout_destination(destination) {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(content.as_bytes())?;
        stdout.flush()?;
        return Ok(None);
    }

    let file_name = destination
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| format!("records.{}", format.extension()));
    let dir = destination
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let temp_file = dir.join(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if destination.exists() {
        fs::remove_file(destination)?;
    }

    fs::rename(&temp_file, destination)?;

    tracing::debug!(path = %destination.display(), records = records.len(), "Wrote output");
    Ok(Some(destination.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldMap, FieldValue, LeafValue, LineRecord};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn sample_records() -> RecordMap {
        let mut names = FieldMap::new();
        names.insert(
            "names".to_string(),
            FieldValue::Leaf(LeafValue::Records(vec![LineRecord::new(
                "netherlands",
                "kingdom",
                "15810726",
                "20161201",
            )])),
        );
        names.insert(
            "code".to_string(),
            FieldValue::Leaf(LeafValue::Tokens(vec!["nl".to_string()])),
        );

        let mut records = RecordMap::new();
        records.insert("NL".to_string(), names);
        records
    }

    #[test]
    fn test_render_compact_json_keeps_insertion_order() {
        let json = render(&sample_records(), OutputFormat::Json, false).unwrap();
        assert_eq!(
            json,
            "{\"NL\":{\"names\":[{\"name\":\"netherlands\",\"description\":\"kingdom\",\"startYr\":\"15810726\",\"endYr\":\"20161201\"}],\"code\":[\"nl\"]}}\n"
        );
    }

    #[test]
    fn test_render_pretty_json_parses_back() {
        let json = render(&sample_records(), OutputFormat::Json, true).unwrap();
        assert!(json.contains("\n  \"NL\": {"));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["NL"]["names"][0]["startYr"], "15810726");
        assert_eq!(value["NL"]["code"][0], "nl");
    }

    #[test]
    fn test_render_yaml() {
        let yaml = render(&sample_records(), OutputFormat::Yaml, false).unwrap();

        assert!(yaml.starts_with("---\n"));
        assert!(yaml.contains("NL:"));
        assert!(yaml.contains("startYr: '15810726'"));
        assert!(yaml.find("names:").unwrap() < yaml.find("code:").unwrap());
        assert!(yaml.ends_with('\n'));
        assert!(!yaml.lines().any(|line| line.ends_with(' ')));
    }

    #[test]
    fn test_stdout_destination() {
        assert!(is_stdout_destination(Path::new(".stdout")));
        assert!(!is_stdout_destination(Path::new("out/.stdout")));
        assert!(!is_stdout_destination(Path::new("stdout")));
    }

    #[test]
    fn test_write_output_to_file() {
        let temp_dir = tempdir().unwrap();
        let destination = temp_dir.path().join("countries.json");

        let written = write_output(&sample_records(), &destination, OutputFormat::Json, false)
            .unwrap();
        assert_eq!(written, Some(destination.clone()));

        let content = fs::read_to_string(&destination).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["NL"]["names"][0]["name"], "netherlands");

        // No temp file left behind
        let leftovers: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn test_write_output_overwrites() {
        let temp_dir = tempdir().unwrap();
        let destination = temp_dir.path().join("countries.json");
        fs::write(&destination, "stale").unwrap();

        write_output(&RecordMap::new(), &destination, OutputFormat::Json, false).unwrap();
        assert_eq!(fs::read_to_string(&destination).unwrap(), "{}\n");
    }

    #[test]
    fn test_write_output_missing_directory_fails() {
        let temp_dir = tempdir().unwrap();
        let destination = temp_dir.path().join("missing").join("out.json");
        assert!(write_output(&RecordMap::new(), &destination, OutputFormat::Json, false).is_err());
    }
}
