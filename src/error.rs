//! Error types for snapshot construction.

use std::fmt;

use jujulens_types::VersionError;
use thiserror::Error;

/// The kind of entity an error was raised against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Snapshot,
    Controller,
    Model,
    Application,
    Unit,
    Subordinate,
    Machine,
    Container,
    NetworkInterface,
}

impl EntityKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Snapshot => "snapshot",
            EntityKind::Controller => "controller",
            EntityKind::Model => "model",
            EntityKind::Application => "application",
            EntityKind::Unit => "unit",
            EntityKind::Subordinate => "subordinate",
            EntityKind::Machine => "machine",
            EntityKind::Container => "container",
            EntityKind::NetworkInterface => "network interface",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors that abort building a snapshot.
///
/// Every variant is fatal: no partially built snapshot is returned.
/// Name lookups that miss are not errors; they return `None`.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The decoder could not produce a mapping at all.
    #[error("failed to decode snapshot: {0}")]
    Decode(String),

    /// A required key is missing or has the wrong shape.
    #[error("{kind} {name:?}: {reason}")]
    Schema {
        kind: EntityKind,
        name: String,
        reason: String,
    },

    /// A timestamp matched neither accepted encoding.
    #[error("{kind} {name:?}: unrecognised timestamp {value:?}")]
    TemporalParse {
        kind: EntityKind,
        name: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A platform version could not be parsed.
    #[error("{kind} {name:?}: invalid version {value:?}")]
    VersionParse {
        kind: EntityKind,
        name: String,
        value: String,
        #[source]
        source: VersionError,
    },
}

impl SnapshotError {
    pub(crate) fn schema(kind: EntityKind, name: &str, reason: impl fmt::Display) -> Self {
        SnapshotError::Schema {
            kind,
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    /// The kind of entity the error was raised against, if any.
    pub fn kind(&self) -> Option<EntityKind> {
        match self {
            SnapshotError::Decode(_) => None,
            SnapshotError::Schema { kind, .. }
            | SnapshotError::TemporalParse { kind, .. }
            | SnapshotError::VersionParse { kind, .. } => Some(*kind),
        }
    }
}
