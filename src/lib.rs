//! # jujulens
//!
//! Severity-colored tabular summaries of a Juju status export.
//!
//! One status export (the YAML or JSON printed by `juju status`) is built
//! into an entity graph, every `since` timestamp is reconciled into one
//! canonical snapshot time, and each entity is projected into a row of
//! display cells tagged with a severity [`Tier`].
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌──────────────────────┐   ┌──────────────────────┐
//! │   source   │──▶│         data         │──▶│          ui          │
//! │ file/stdin │   │ Snapshot → Section   │   │ plain table | viewer │
//! │  command   │   │  rows (Cell + Tier)  │   │   palette / theme    │
//! └────────────┘   └──────────────────────┘   └──────────────────────┘
//! ```
//!
//! - **[`source`]**: acquisition and decoding ([`SnapshotSource`])
//! - **[`data`]**: entity graph, timestamp reconciliation, classification
//!   and row projection
//! - **[`ui`]**: plain table output and the ratatui viewer
//! - **[`app`]**, **[`events`]**: viewer state and key handling
//! - **[`config`]**: layered settings resolving to a [`Baseline`]
//!
//! ## Usage
//!
//! ```
//! use jujulens::{Baseline, Format, Section, Snapshot};
//!
//! let status = r#"
//! model:
//!   name: default
//!   type: iaas
//!   controller: ctl
//!   cloud: aws
//!   version: 2.5.1
//!   sla: unsupported
//!   model-status: {current: available, since: "01 Jan 2020 10:00:00Z"}
//! "#;
//!
//! let snapshot = Snapshot::parse(status, Format::Yaml)?;
//! let rows = Section::Model.rows(&snapshot, &Baseline::default(), false);
//! assert_eq!(rows[0][0].text, "default");
//! # Ok::<(), jujulens::SnapshotError>(())
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod source;
pub mod ui;

pub use app::App;
pub use crate::config::{ColorMode, Overrides, Settings};
pub use data::{Baseline, Cell, Format, Report, Row, Section, Snapshot, Tier};
pub use error::{EntityKind, SnapshotError};
pub use source::{CommandSource, FileSource, SnapshotSource, StdinSource};
