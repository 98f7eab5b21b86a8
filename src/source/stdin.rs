//! Standard-input snapshot source.

use std::io::{self, Read};

use anyhow::{Context, Result};

use super::SnapshotSource;
use crate::data::{decode_text, Format};

/// Reads a YAML (or JSON, which YAML accepts) export from standard input.
#[derive(Debug, Default)]
pub struct StdinSource;

impl StdinSource {
    pub fn new() -> Self {
        Self
    }
}

impl SnapshotSource for StdinSource {
    fn load(&mut self) -> Result<serde_json::Value> {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Read error: stdin")?;
        Ok(decode_text(&content, Format::Yaml).context("Parse error: stdin")?)
    }

    fn description(&self) -> &str {
        "stdin"
    }
}
