//! Whole-snapshot construction.
//!
//! A snapshot is built in one pass from a decoded status export. Any
//! failure aborts the build and nothing is retained.

use jujulens_types::StatusDocument;
use serde::Deserialize;
use tracing::info;

use super::model::Model;
use super::timestamp::TimestampAuthority;
use crate::error::{EntityKind, SnapshotError};

/// Text encoding of a status export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

/// Decode export text into a nested mapping.
pub fn decode_text(text: &str, format: Format) -> Result<serde_json::Value, SnapshotError> {
    match format {
        Format::Yaml => {
            serde_yaml::from_str(text).map_err(|e| SnapshotError::Decode(e.to_string()))
        }
        Format::Json => {
            serde_json::from_str(text).map_err(|e| SnapshotError::Decode(e.to_string()))
        }
    }
}

/// A fully built snapshot: the entity graph plus its canonical timestamp.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub model: Model,
    authority: TimestampAuthority,
}

impl Snapshot {
    /// Build a snapshot from a decoded status export.
    pub fn build(document: &serde_json::Value) -> Result<Self, SnapshotError> {
        let document = StatusDocument::deserialize(document)
            .map_err(|e| SnapshotError::schema(EntityKind::Snapshot, "status", e))?;
        Self::from_document(&document)
    }

    /// Build a snapshot from an already-typed top level.
    pub fn from_document(document: &StatusDocument) -> Result<Self, SnapshotError> {
        let seed = document
            .controller
            .as_ref()
            .and_then(|controller| controller.timestamp.as_deref());
        let mut authority =
            TimestampAuthority::from_seed(seed).map_err(|source| SnapshotError::TemporalParse {
                kind: EntityKind::Controller,
                name: "controller".to_string(),
                value: seed.unwrap_or_default().to_string(),
                source,
            })?;

        let model = Model::build(
            &document.model,
            &document.applications,
            &document.machines,
            &mut authority,
        )?;

        info!(
            model = %model.name,
            seeded = authority.is_seeded(),
            timestamp = %authority.canonical(),
            "snapshot built"
        );

        Ok(Self { model, authority })
    }

    /// Decode export text and build a snapshot from it.
    pub fn parse(text: &str, format: Format) -> Result<Self, SnapshotError> {
        Self::build(&decode_text(text, format)?)
    }

    pub fn timestamp(&self) -> &TimestampAuthority {
        &self.authority
    }
}
