//! Entity graph construction, timestamp reconciliation and classification.
//!
//! ## Submodules
//!
//! - [`timestamp`]: The snapshot's canonical timestamp ([`TimestampAuthority`])
//! - [`classify`]: Rule tables mapping status values to a severity [`Tier`]
//! - [`model`], [`application`], [`unit`], [`machine`], [`interface`]: the entities
//! - [`snapshot`]: Whole-snapshot construction ([`Snapshot`])
//! - [`rows`]: Projection of entities into display rows
//! - [`export`]: JSON report of every projected table
//!
//! ## Data Flow
//!
//! ```text
//! decoded export (serde_json::Value)
//!        │
//!        ▼
//! Snapshot::build()  ──▶ TimestampAuthority::merge() for every `since`
//!        │
//!        ▼
//! Section::rows()    ──▶ classify() per status-bearing cell
//! ```

pub mod application;
pub mod classify;
pub mod export;
pub mod interface;
pub mod machine;
pub mod model;
pub mod rows;
pub mod snapshot;
pub mod timestamp;
pub mod unit;

pub use application::Application;
pub use classify::{classify, Observation, StatusKind, Tier, Verdict};
pub use export::{Report, SectionReport, TierSummary};
pub use interface::NetworkInterface;
pub use machine::{BasicMachine, Hardware, MachineRole};
pub use model::{MeterStatus, Model};
pub use rows::{Baseline, Cell, Row, Section, Segment};
pub use snapshot::{decode_text, Format, Snapshot};
pub use timestamp::TimestampAuthority;
pub use unit::{BasicUnit, UnitRole};

use chrono::{DateTime, Utc};
use jujulens_types::Payload;
use serde::de::DeserializeOwned;

use crate::error::{EntityKind, SnapshotError};

/// Decode one entity record, attributing failures to the entity.
pub(crate) fn decode<T: DeserializeOwned>(
    kind: EntityKind,
    name: &str,
    payload: &Payload,
) -> Result<T, SnapshotError> {
    T::deserialize(payload).map_err(|e| SnapshotError::schema(kind, name, e))
}

/// Parse a `since` timestamp and merge it into the authority.
pub(crate) fn merge_since(
    authority: &mut TimestampAuthority,
    kind: EntityKind,
    name: &str,
    since: &str,
) -> Result<DateTime<Utc>, SnapshotError> {
    authority
        .merge_text(since)
        .map_err(|source| SnapshotError::TemporalParse {
            kind,
            name: name.to_string(),
            value: since.to_string(),
            source,
        })
}
