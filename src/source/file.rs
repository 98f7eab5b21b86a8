//! File-based snapshot source.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::SnapshotSource;
use crate::data::{decode_text, Format};

/// Reads a status export from a file.
///
/// Files ending in `.json` are decoded as JSON, anything else as YAML.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The encoding implied by the file extension.
    pub fn format(&self) -> Format {
        match self.path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

impl SnapshotSource for FileSource {
    fn load(&mut self) -> Result<serde_json::Value> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Read error: {}", self.path.display()))?;
        let document = decode_text(&content, self.format())
            .with_context(|| format!("Parse error: {}", self.path.display()))?;
        Ok(document)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/status.yaml");
        assert_eq!(source.path(), Path::new("/tmp/status.yaml"));
        assert_eq!(source.description(), "file: /tmp/status.yaml");
        assert_eq!(source.format(), Format::Yaml);
        assert_eq!(FileSource::new("status.JSON").format(), Format::Json);
    }

    #[test]
    fn test_file_source_reads_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "model:\n  name: default\napplications: {{}}").unwrap();

        let mut source = FileSource::new(file.path());
        let document = source.load().unwrap();
        assert_eq!(document["model"]["name"], "default");
    }

    #[test]
    fn test_file_source_reads_json() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(file, r#"{{"model": {{"name": "default"}}}}"#).unwrap();

        let mut source = FileSource::new(file.path());
        let document = source.load().unwrap();
        assert_eq!(document["model"]["name"], "default");
    }

    #[test]
    fn test_file_source_missing_file() {
        let mut source = FileSource::new("/nonexistent/path/status.yaml");
        let err = source.load().unwrap_err();
        assert!(err.to_string().contains("Read error"));
    }

    #[test]
    fn test_file_source_invalid_json() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(file, "not valid json").unwrap();

        let mut source = FileSource::new(file.path());
        let err = source.load().unwrap_err();
        assert!(err.to_string().contains("Parse error"));
    }
}
