//! Status classification.
//!
//! Each [`StatusKind`] owns one rule table. An [`Observation`] is first
//! reduced to a lookup key (the raw text, or a comparison outcome for
//! numeric context), and the key is looked up in the kind's table. Keys
//! with no entry fall back to the table's default. Supporting a new kind
//! means adding a table entry to [`RULES`].

use std::cmp::Ordering;

use jujulens_types::PlatformVersion;
use serde::Serialize;

/// Severity tier of a classified value.
///
/// Ordered by severity, so the worst of several tiers is their `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Tier {
    Nominal,
    Informational,
    Degraded,
    Critical,
}

impl Tier {
    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            Tier::Nominal => "OK",
            Tier::Informational => "INFO",
            Tier::Degraded => "WARN",
            Tier::Critical => "CRIT",
        }
    }
}

/// Result of classification. `None` leaves the value undecorated.
pub type Verdict = Option<Tier>;

/// The kinds of status value that carry a severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// Workload or application status.
    Workload,
    /// Unit agent run state.
    Agent,
    /// Model availability.
    ModelAvailability,
    /// Model meter colour.
    MeterStatus,
    /// Installed charm revision against the latest known one.
    CharmRevision,
    /// Where a charm was obtained from.
    CharmOrigin,
    /// Model platform version against the supported band.
    PlatformVersion,
    /// Number of units of an application.
    Scale,
    /// Network interface link state.
    LinkState,
    /// Machine agent state.
    MachineAgent,
    /// Machine provisioning status.
    MachineProvisioning,
    /// Container provisioning message.
    ContainerMessage,
}

/// A value to classify, with whatever context its kind compares against.
#[derive(Debug, Clone, Copy)]
pub enum Observation<'a> {
    Text(&'a str),
    Revision {
        installed: u32,
        latest: Option<u32>,
    },
    Version {
        installed: &'a PlatformVersion,
        floor: &'a PlatformVersion,
        latest: &'a PlatformVersion,
    },
    Origin {
        origin: &'a str,
        canonical: &'a str,
    },
    Count(usize),
    Flag(bool),
}

impl<'a> Observation<'a> {
    /// Reduce the observation to the key its rule table is indexed by.
    fn key(&self) -> &'a str {
        match *self {
            Observation::Text(text) => text,
            Observation::Revision { latest: None, .. } => "unknown",
            Observation::Revision {
                installed,
                latest: Some(latest),
            } => match installed.cmp(&latest) {
                Ordering::Less => "behind",
                Ordering::Equal => "current",
                Ordering::Greater => "ahead",
            },
            Observation::Version {
                installed,
                floor,
                latest,
            } => {
                if installed < floor || installed > latest {
                    "out-of-band"
                } else if installed < latest {
                    "behind"
                } else {
                    "current"
                }
            }
            Observation::Origin { origin, canonical } => {
                if origin == canonical {
                    "canonical"
                } else {
                    "other"
                }
            }
            Observation::Count(0) => "empty",
            Observation::Count(_) => "populated",
            Observation::Flag(true) => "true",
            Observation::Flag(false) => "false",
        }
    }
}

/// One kind's rules: exact key matches, then a fallback.
#[derive(Debug)]
pub struct RuleTable {
    pub kind: StatusKind,
    pub rules: &'static [(&'static str, Verdict)],
    pub fallback: Verdict,
}

use Tier::{Critical, Degraded, Informational, Nominal};

/// The registry of rule tables, one per [`StatusKind`].
pub static RULES: &[RuleTable] = &[
    RuleTable {
        kind: StatusKind::Workload,
        rules: &[
            ("active", Some(Nominal)),
            ("error", Some(Critical)),
            ("blocked", Some(Critical)),
            ("waiting", None),
            ("maintenance", Some(Degraded)),
        ],
        fallback: Some(Informational),
    },
    RuleTable {
        kind: StatusKind::Agent,
        rules: &[
            ("idle", Some(Nominal)),
            ("executing", Some(Nominal)),
            ("error", Some(Critical)),
        ],
        fallback: Some(Degraded),
    },
    RuleTable {
        kind: StatusKind::ModelAvailability,
        rules: &[("available", Some(Nominal))],
        fallback: Some(Critical),
    },
    RuleTable {
        kind: StatusKind::MeterStatus,
        rules: &[
            ("", None),
            ("green", Some(Nominal)),
            ("red", Some(Critical)),
            ("amber", Some(Degraded)),
        ],
        fallback: Some(Informational),
    },
    RuleTable {
        kind: StatusKind::CharmRevision,
        rules: &[
            ("unknown", Some(Nominal)),
            ("behind", Some(Degraded)),
            ("current", Some(Nominal)),
            ("ahead", Some(Critical)),
        ],
        fallback: Some(Informational),
    },
    RuleTable {
        kind: StatusKind::CharmOrigin,
        rules: &[("canonical", Some(Nominal))],
        fallback: Some(Degraded),
    },
    RuleTable {
        kind: StatusKind::PlatformVersion,
        rules: &[
            ("out-of-band", Some(Critical)),
            ("behind", Some(Degraded)),
            ("current", Some(Nominal)),
        ],
        fallback: Some(Informational),
    },
    RuleTable {
        kind: StatusKind::Scale,
        rules: &[("empty", Some(Critical))],
        fallback: None,
    },
    RuleTable {
        kind: StatusKind::LinkState,
        rules: &[("true", Some(Nominal)), ("false", Some(Critical))],
        fallback: Some(Informational),
    },
    RuleTable {
        kind: StatusKind::MachineAgent,
        rules: &[
            ("started", Some(Nominal)),
            ("error", Some(Critical)),
            ("down", Some(Critical)),
        ],
        fallback: Some(Degraded),
    },
    RuleTable {
        kind: StatusKind::MachineProvisioning,
        rules: &[
            ("running", Some(Nominal)),
            ("error", Some(Critical)),
            ("provisioning error", Some(Critical)),
        ],
        fallback: Some(Degraded),
    },
    RuleTable {
        kind: StatusKind::ContainerMessage,
        rules: &[("Container started", Some(Nominal))],
        fallback: Some(Informational),
    },
];

/// Classify an observation of the given kind. Never fails.
pub fn classify(kind: StatusKind, observation: Observation<'_>) -> Verdict {
    let Some(table) = RULES.iter().find(|table| table.kind == kind) else {
        return Some(Tier::Informational);
    };
    let key = observation.key();
    table
        .rules
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map_or(table.fallback, |(_, verdict)| *verdict)
}

/// Shorthand for classifying raw text.
pub fn classify_text(kind: StatusKind, text: &str) -> Verdict {
    classify(kind, Observation::Text(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workload_rules() {
        assert_eq!(classify_text(StatusKind::Workload, "active"), Some(Nominal));
        assert_eq!(classify_text(StatusKind::Workload, "blocked"), Some(Critical));
        assert_eq!(classify_text(StatusKind::Workload, "error"), Some(Critical));
        assert_eq!(classify_text(StatusKind::Workload, "maintenance"), Some(Degraded));
        assert_eq!(classify_text(StatusKind::Workload, "xyz"), Some(Informational));
    }

    #[test]
    fn test_tier_symbols_follow_severity() {
        let symbols: Vec<&str> = [Nominal, Informational, Degraded, Critical]
            .iter()
            .map(Tier::symbol)
            .collect();
        assert_eq!(symbols, vec!["OK", "INFO", "WARN", "CRIT"]);
        assert_eq!([Informational, Critical, Nominal].into_iter().max(), Some(Critical));
    }

    #[test]
    fn test_waiting_is_undecorated() {
        assert_eq!(classify_text(StatusKind::Workload, "waiting"), None);
    }

    #[test]
    fn test_agent_rules() {
        assert_eq!(classify_text(StatusKind::Agent, "idle"), Some(Nominal));
        assert_eq!(classify_text(StatusKind::Agent, "executing"), Some(Nominal));
        assert_eq!(classify_text(StatusKind::Agent, "error"), Some(Critical));
        assert_eq!(classify_text(StatusKind::Agent, "allocating"), Some(Degraded));
    }

    #[test]
    fn test_model_availability() {
        assert_eq!(classify_text(StatusKind::ModelAvailability, "available"), Some(Nominal));
        assert_eq!(classify_text(StatusKind::ModelAvailability, "busy"), Some(Critical));
    }

    #[test]
    fn test_meter_status() {
        assert_eq!(classify_text(StatusKind::MeterStatus, ""), None);
        assert_eq!(classify_text(StatusKind::MeterStatus, "green"), Some(Nominal));
        assert_eq!(classify_text(StatusKind::MeterStatus, "red"), Some(Critical));
        assert_eq!(classify_text(StatusKind::MeterStatus, "amber"), Some(Degraded));
        assert_eq!(classify_text(StatusKind::MeterStatus, "purple"), Some(Informational));
    }

    #[test]
    fn test_charm_revision() {
        let rev = |installed, latest| {
            classify(StatusKind::CharmRevision, Observation::Revision { installed, latest })
        };
        assert_eq!(rev(5, Some(7)), Some(Degraded));
        assert_eq!(rev(7, Some(7)), Some(Nominal));
        assert_eq!(rev(8, Some(7)), Some(Critical));
        assert_eq!(rev(8, None), Some(Nominal));
    }

    #[test]
    fn test_charm_origin() {
        let origin = |origin| {
            classify(
                StatusKind::CharmOrigin,
                Observation::Origin { origin, canonical: "jujucharms" },
            )
        };
        assert_eq!(origin("jujucharms"), Some(Nominal));
        assert_eq!(origin("local"), Some(Degraded));
    }

    #[test]
    fn test_platform_version_band() {
        let floor = PlatformVersion::new(2, 0, 0);
        let latest = PlatformVersion::new(2, 5, 1);
        let check = |s: &str| {
            let installed: PlatformVersion = s.parse().unwrap();
            classify(
                StatusKind::PlatformVersion,
                Observation::Version {
                    installed: &installed,
                    floor: &floor,
                    latest: &latest,
                },
            )
        };
        assert_eq!(check("1.25.6"), Some(Critical));
        assert_eq!(check("2.0.0"), Some(Degraded));
        assert_eq!(check("2.3.0"), Some(Degraded));
        assert_eq!(check("2.5.1"), Some(Nominal));
        assert_eq!(check("2.6.0"), Some(Critical));
    }

    #[test]
    fn test_scale_and_link_state() {
        assert_eq!(classify(StatusKind::Scale, Observation::Count(0)), Some(Critical));
        assert_eq!(classify(StatusKind::Scale, Observation::Count(3)), None);
        assert_eq!(classify(StatusKind::LinkState, Observation::Flag(true)), Some(Nominal));
        assert_eq!(classify(StatusKind::LinkState, Observation::Flag(false)), Some(Critical));
    }

    #[test]
    fn test_machine_rules() {
        assert_eq!(classify_text(StatusKind::MachineAgent, "started"), Some(Nominal));
        assert_eq!(classify_text(StatusKind::MachineAgent, "down"), Some(Critical));
        assert_eq!(classify_text(StatusKind::MachineAgent, "pending"), Some(Degraded));
        assert_eq!(
            classify_text(StatusKind::MachineProvisioning, "provisioning error"),
            Some(Critical)
        );
        assert_eq!(
            classify_text(StatusKind::ContainerMessage, "Container started"),
            Some(Nominal)
        );
        assert_eq!(
            classify_text(StatusKind::ContainerMessage, "Creating container"),
            Some(Informational)
        );
    }

    #[test]
    fn test_every_kind_has_one_table() {
        let kinds = [
            StatusKind::Workload,
            StatusKind::Agent,
            StatusKind::ModelAvailability,
            StatusKind::MeterStatus,
            StatusKind::CharmRevision,
            StatusKind::CharmOrigin,
            StatusKind::PlatformVersion,
            StatusKind::Scale,
            StatusKind::LinkState,
            StatusKind::MachineAgent,
            StatusKind::MachineProvisioning,
            StatusKind::ContainerMessage,
        ];
        for kind in kinds {
            assert_eq!(RULES.iter().filter(|t| t.kind == kind).count(), 1, "{:?}", kind);
        }
    }

    #[test]
    fn test_tier_ordering() {
        assert!(Critical > Degraded);
        assert!(Degraded > Informational);
        assert!(Informational > Nominal);
    }
}
