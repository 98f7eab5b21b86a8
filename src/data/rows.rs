//! Projection of entities into display rows.
//!
//! Every entity kind has a fixed, ordered column schema and a pure function
//! producing one [`Row`] per entity. With `decorate` on, status-bearing
//! cells carry the tier the classifier picked; turning the tier into
//! colour is left to whoever renders the row.

use jujulens_types::PlatformVersion;
use serde::Serialize;

use super::application::Application;
use super::classify::{classify, Observation, StatusKind, Tier, Verdict};
use super::interface::NetworkInterface;
use super::machine::BasicMachine;
use super::model::Model;
use super::snapshot::Snapshot;
use super::timestamp::TimestampAuthority;
use super::unit::{BasicUnit, UnitRole};

/// Separator for notes.
pub const NOTE_SEPARATOR: &str = ", ";
/// Separator for other multi-valued cells (addresses, ports).
pub const LIST_SEPARATOR: &str = ",";

const GUESSED_TIMESTAMP: &str = "Guessing at timestamp";

/// Reference points that some classifications compare against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Baseline {
    /// Oldest supported platform version.
    pub version_floor: PlatformVersion,
    /// Newest known platform version.
    pub latest_version: PlatformVersion,
    /// The charm origin considered trustworthy.
    pub canonical_origin: String,
}

impl Default for Baseline {
    fn default() -> Self {
        Self {
            version_floor: PlatformVersion::new(2, 0, 0),
            latest_version: PlatformVersion::new(2, 5, 1),
            canonical_origin: "jujucharms".to_string(),
        }
    }
}

/// A run of text inside a cell that carries its own tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
}

/// One display cell: the raw text plus the tier to decorate it with.
///
/// A cell whose parts are decorated differently keeps `tier` empty and
/// lists its parts in `segments`; `text` is always the full raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<Segment>,
}

impl Cell {
    /// An undecorated cell.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    fn classified(text: impl Into<String>, verdict: Verdict, decorate: bool) -> Self {
        Self {
            text: text.into(),
            tier: if decorate { verdict } else { None },
            ..Self::default()
        }
    }

    /// Append a note decorated on its own, leaving the existing text's tier alone.
    fn append_note(self, note: &str, verdict: Verdict, decorate: bool) -> Self {
        if self.text.is_empty() {
            return Self::classified(note, verdict, decorate);
        }
        let tier = if decorate { verdict } else { None };
        let text = format!("{}{}{}", self.text, NOTE_SEPARATOR, note);
        if tier == self.tier {
            return Self { text, ..self };
        }
        Self {
            segments: vec![
                Segment {
                    text: format!("{}{}", self.text, NOTE_SEPARATOR),
                    tier: self.tier,
                },
                Segment {
                    text: note.to_string(),
                    tier,
                },
            ],
            text,
            tier: None,
        }
    }

    /// The text as runs of equal decoration, in display order.
    pub fn runs(&self) -> Vec<(&str, Option<Tier>)> {
        if self.segments.is_empty() {
            vec![(self.text.as_str(), self.tier)]
        } else {
            self.segments
                .iter()
                .map(|segment| (segment.text.as_str(), segment.tier))
                .collect()
        }
    }

    /// Every tier decorating some part of the cell.
    pub fn tiers(&self) -> impl Iterator<Item = Tier> + '_ {
        self.tier
            .into_iter()
            .chain(self.segments.iter().filter_map(|segment| segment.tier))
    }

    /// Display width of the raw text.
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }
}

pub type Row = Vec<Cell>;

pub const MODEL_COLUMNS: &[&str] = &[
    "Model",
    "Controller",
    "Cloud/Region",
    "Version",
    "SLA",
    "Timestamp",
    "Model-Status",
    "Meter-Status",
    "Message",
    "Notes",
];

pub const APPLICATION_COLUMNS: &[&str] = &[
    "App", "Version", "Status", "Scale", "Charm", "Store", "Rev", "OS", "Series", "Notes",
];

pub const UNIT_COLUMNS: &[&str] = &[
    "Unit",
    "Workload",
    "Agent",
    "Machine",
    "Public address",
    "Ports",
    "Message",
    "Notes",
];

pub const MACHINE_COLUMNS: &[&str] = &[
    "Machine", "State", "Status", "DNS", "Inst id", "Series", "AZ", "Cores", "Mem", "Disk",
    "Message", "Notes",
];

pub const INTERFACE_COLUMNS: &[&str] = &[
    "Machine",
    "Interface",
    "IP",
    "MAC",
    "Gateway",
    "Space",
    "Up",
    "Notes",
];

pub fn model_row(
    model: &Model,
    timestamp: &TimestampAuthority,
    baseline: &Baseline,
    decorate: bool,
) -> Row {
    let version = classify(
        StatusKind::PlatformVersion,
        Observation::Version {
            installed: &model.version,
            floor: &baseline.version_floor,
            latest: &baseline.latest_version,
        },
    );
    let status = classify(StatusKind::ModelAvailability, Observation::Text(&model.status));
    let (meter_color, meter_message) = match &model.meter {
        Some(meter) => (meter.color.as_str(), meter.message.as_str()),
        None => ("", ""),
    };
    let meter = classify(StatusKind::MeterStatus, Observation::Text(meter_color));

    let mut notes = Cell::plain(model.notes.join(NOTE_SEPARATOR));
    if !timestamp.is_seeded() {
        notes = notes.append_note(GUESSED_TIMESTAMP, Some(Tier::Informational), decorate);
    }

    vec![
        Cell::plain(&model.name),
        Cell::plain(&model.controller),
        Cell::plain(model.cloud_region()),
        Cell::classified(&model.version_text, version, decorate),
        Cell::plain(&model.sla),
        Cell::plain(timestamp.clock_label()),
        Cell::classified(&model.status, status, decorate),
        Cell::classified(meter_color, meter, decorate),
        Cell::plain(meter_message),
        notes,
    ]
}

pub fn application_row(
    app: &Application,
    model: &Model,
    baseline: &Baseline,
    decorate: bool,
) -> Row {
    let scale = model.scale(app);
    let revision = classify(
        StatusKind::CharmRevision,
        Observation::Revision {
            installed: app.charm_rev,
            latest: app.latest_rev,
        },
    );
    let origin = classify(
        StatusKind::CharmOrigin,
        Observation::Origin {
            origin: &app.charm_origin,
            canonical: &baseline.canonical_origin,
        },
    );

    vec![
        Cell::plain(&app.name),
        Cell::plain(&app.version),
        Cell::classified(
            &app.status,
            classify(StatusKind::Workload, Observation::Text(&app.status)),
            decorate,
        ),
        Cell::classified(
            scale.to_string(),
            classify(StatusKind::Scale, Observation::Count(scale)),
            decorate,
        ),
        Cell::plain(&app.charm),
        Cell::classified(&app.charm_origin, origin, decorate),
        Cell::classified(app.charm_rev.to_string(), revision, decorate),
        Cell::plain(&app.os),
        Cell::plain(&app.series),
        Cell::plain(app.notes.join(NOTE_SEPARATOR)),
    ]
}

pub fn unit_row(unit: &BasicUnit, decorate: bool) -> Row {
    let indent = match unit.role {
        UnitRole::Principal => "",
        UnitRole::Subordinate => "  ",
    };
    let leader = if unit.leader { "*" } else { "" };

    vec![
        Cell::plain(format!("{}{}{}", indent, unit.name, leader)),
        Cell::classified(
            &unit.workload_status,
            classify(StatusKind::Workload, Observation::Text(&unit.workload_status)),
            decorate,
        ),
        Cell::classified(
            &unit.agent_status,
            classify(StatusKind::Agent, Observation::Text(&unit.agent_status)),
            decorate,
        ),
        Cell::plain(unit.machine.clone().unwrap_or_default()),
        Cell::plain(&unit.public_address),
        Cell::plain(unit.open_ports.join(LIST_SEPARATOR)),
        Cell::plain(&unit.workload_message),
        Cell::plain(unit.notes.join(NOTE_SEPARATOR)),
    ]
}

pub fn machine_row(machine: &BasicMachine, decorate: bool) -> Row {
    let agent = classify(StatusKind::MachineAgent, Observation::Text(&machine.agent_status));
    let provisioning = classify(
        StatusKind::MachineProvisioning,
        Observation::Text(&machine.provisioning_status),
    );

    let (az, cores, mem, disk, message) = if machine.is_container() {
        let message = classify(
            StatusKind::ContainerMessage,
            Observation::Text(&machine.provisioning_message),
        );
        (
            Cell::default(),
            Cell::default(),
            Cell::default(),
            Cell::default(),
            Cell::classified(&machine.provisioning_message, message, decorate),
        )
    } else {
        let hw = &machine.hardware;
        (
            Cell::plain(hw.availability_zone.clone().unwrap_or_default()),
            Cell::plain(hw.cores.clone().unwrap_or_default()),
            Cell::plain(hw.mem.clone().unwrap_or_default()),
            Cell::plain(hw.root_disk.clone().unwrap_or_default()),
            Cell::plain(&machine.provisioning_message),
        )
    };

    vec![
        Cell::plain(&machine.name),
        Cell::classified(&machine.agent_status, agent, decorate),
        Cell::classified(&machine.provisioning_status, provisioning, decorate),
        Cell::plain(&machine.dns_name),
        Cell::plain(&machine.instance_id),
        Cell::plain(&machine.series),
        az,
        cores,
        mem,
        disk,
        message,
        Cell::plain(machine.notes.join(NOTE_SEPARATOR)),
    ]
}

pub fn interface_row(iface: &NetworkInterface, decorate: bool) -> Row {
    vec![
        Cell::plain(&iface.host),
        Cell::plain(&iface.name),
        Cell::plain(iface.ip_addresses.join(LIST_SEPARATOR)),
        Cell::plain(&iface.mac_address),
        Cell::plain(iface.gateway.clone().unwrap_or_default()),
        Cell::plain(iface.space.clone().unwrap_or_default()),
        Cell::classified(
            iface.is_up.to_string(),
            classify(StatusKind::LinkState, Observation::Flag(iface.is_up)),
            decorate,
        ),
        Cell::plain(iface.notes.join(NOTE_SEPARATOR)),
    ]
}

/// A table of one entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Model,
    Applications,
    Units,
    Machines,
    Interfaces,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Model,
        Section::Applications,
        Section::Units,
        Section::Machines,
        Section::Interfaces,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Model => "Model",
            Section::Applications => "Applications",
            Section::Units => "Units",
            Section::Machines => "Machines",
            Section::Interfaces => "Interfaces",
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Section::Model => MODEL_COLUMNS,
            Section::Applications => APPLICATION_COLUMNS,
            Section::Units => UNIT_COLUMNS,
            Section::Machines => MACHINE_COLUMNS,
            Section::Interfaces => INTERFACE_COLUMNS,
        }
    }

    /// Cycle to the next section.
    pub fn next(self) -> Self {
        match self {
            Section::Model => Section::Applications,
            Section::Applications => Section::Units,
            Section::Units => Section::Machines,
            Section::Machines => Section::Interfaces,
            Section::Interfaces => Section::Model,
        }
    }

    /// Cycle to the previous section.
    pub fn prev(self) -> Self {
        match self {
            Section::Model => Section::Interfaces,
            Section::Applications => Section::Model,
            Section::Units => Section::Applications,
            Section::Machines => Section::Units,
            Section::Interfaces => Section::Machines,
        }
    }

    /// Project every entity of this section's kind.
    pub fn rows(&self, snapshot: &Snapshot, baseline: &Baseline, decorate: bool) -> Vec<Row> {
        let model = &snapshot.model;
        match self {
            Section::Model => vec![model_row(model, snapshot.timestamp(), baseline, decorate)],
            Section::Applications => model
                .applications
                .values()
                .map(|app| application_row(app, model, baseline, decorate))
                .collect(),
            Section::Units => model
                .units()
                .into_iter()
                .map(|unit| unit_row(unit, decorate))
                .collect(),
            Section::Machines => model
                .all_machines()
                .into_iter()
                .map(|machine| machine_row(machine, decorate))
                .collect(),
            Section::Interfaces => model
                .interfaces()
                .into_iter()
                .map(|iface| interface_row(iface, decorate))
                .collect(),
        }
    }
}
