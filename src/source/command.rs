//! Command-based snapshot source.
//!
//! Runs `juju status` (or any command producing an export on stdout) and
//! decodes its output.

use std::process::Command;

use anyhow::{bail, Context, Result};

use super::SnapshotSource;
use crate::data::{decode_text, Format};

/// Runs a command and decodes its standard output.
#[derive(Debug)]
pub struct CommandSource {
    program: String,
    args: Vec<String>,
    format: Format,
    description: String,
}

impl CommandSource {
    pub fn new(program: impl Into<String>, args: Vec<String>, format: Format) -> Self {
        let program = program.into();
        let description = format!("command: {} {}", program, args.join(" "))
            .trim_end()
            .to_string();
        Self {
            program,
            args,
            format,
            description,
        }
    }

    /// `juju status --format yaml`, optionally for a named model.
    pub fn juju(model: Option<&str>) -> Self {
        let mut args = vec![
            "status".to_string(),
            "--format".to_string(),
            "yaml".to_string(),
        ];
        if let Some(model) = model {
            args.push("-m".to_string());
            args.push(model.to_string());
        }
        Self::new("juju", args, Format::Yaml)
    }
}

impl SnapshotSource for CommandSource {
    fn load(&mut self) -> Result<serde_json::Value> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .with_context(|| format!("failed to run {}", self.program))?;

        if !output.status.success() {
            bail!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let stdout = String::from_utf8(output.stdout)
            .with_context(|| format!("{} produced non-UTF-8 output", self.program))?;
        Ok(decode_text(&stdout, self.format)
            .with_context(|| format!("Parse error: output of {}", self.program))?)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
