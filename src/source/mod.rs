//! Snapshot acquisition.
//!
//! A [`SnapshotSource`] fetches one status export and decodes it into a
//! nested mapping. Building the entity graph from that mapping is the job
//! of [`crate::data::Snapshot`].

mod command;
mod file;
mod stdin;

pub use command::CommandSource;
pub use file::FileSource;
pub use stdin::StdinSource;

use std::fmt::Debug;

use anyhow::Result;

/// Trait for acquiring a decoded status export.
///
/// # Example
///
/// ```no_run
/// use jujulens::{FileSource, SnapshotSource};
///
/// let mut source = FileSource::new("status.yaml");
/// let document = source.load()?;
/// println!("{}: {}", source.description(), document["model"]["name"]);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub trait SnapshotSource: Debug {
    /// Fetch and decode the export.
    fn load(&mut self) -> Result<serde_json::Value>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;
}
