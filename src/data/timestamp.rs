//! The snapshot's single canonical point in time.
//!
//! A status export stamps most entities with a `since` time but carries no
//! overall "taken at" instant, except for an optional clock-only controller
//! timestamp. [`TimestampAuthority`] reconciles the two: every `since` seen
//! during construction is merged in, and the result is the best-known
//! instant for the whole snapshot.

use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};

/// `since` encoding with a UTC designator: `15 Mar 2024 09:00:00Z`.
const UTC_FORMAT: &str = "%d %b %Y %H:%M:%SZ";
/// `since` encoding with an explicit offset: `15 Mar 2024 10:00:00+01:00`.
const OFFSET_FORMAT: &str = "%d %b %Y %H:%M:%S%:z";
/// Controller seed encoding: `09:00:00Z`.
const SEED_FORMAT: &str = "%H:%M:%SZ";

/// Parse a `since` timestamp in either accepted encoding, normalised to UTC.
pub fn parse_instant(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let text = text.trim();
    if text.ends_with('Z') {
        NaiveDateTime::parse_from_str(text, UTC_FORMAT).map(|naive| naive.and_utc())
    } else {
        DateTime::parse_from_str(text, OFFSET_FORMAT).map(|dt| dt.with_timezone(&Utc))
    }
}

/// Parse a clock-only controller timestamp.
pub fn parse_clock(text: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(text.trim(), SEED_FORMAT)
}

/// Holder of the canonical timestamp for one snapshot.
///
/// The canonical value never decreases. When seeded with a clock time, the
/// seed's time of day is kept and observed timestamps only donate their
/// calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampAuthority {
    canonical: DateTime<Utc>,
    incomplete_seed: bool,
}

impl Default for TimestampAuthority {
    fn default() -> Self {
        Self::new()
    }
}

impl TimestampAuthority {
    /// An authority with no seed; the canonical value is the latest instant
    /// merged.
    pub fn new() -> Self {
        Self {
            canonical: DateTime::<Utc>::MIN_UTC,
            incomplete_seed: false,
        }
    }

    /// An authority seeded with a clock time but no date.
    pub fn seeded(clock: NaiveTime) -> Self {
        let canonical = DateTime::<Utc>::MIN_UTC
            .date_naive()
            .and_time(clock)
            .and_utc();
        Self {
            canonical,
            incomplete_seed: true,
        }
    }

    /// Build the authority from an optional controller timestamp.
    pub fn from_seed(seed: Option<&str>) -> Result<Self, chrono::ParseError> {
        match seed {
            Some(text) => Ok(Self::seeded(parse_clock(text)?)),
            None => Ok(Self::new()),
        }
    }

    /// Merge an observed instant.
    pub fn merge(&mut self, observed: DateTime<Utc>) {
        let candidate = if self.incomplete_seed {
            observed
                .date_naive()
                .and_time(self.canonical.time())
                .and_utc()
        } else {
            observed
        };

        if candidate > self.canonical {
            self.canonical = candidate;
        }
    }

    /// Parse a `since` timestamp and merge it, returning the parsed instant.
    pub fn merge_text(&mut self, text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        let observed = parse_instant(text)?;
        self.merge(observed);
        Ok(observed)
    }

    pub fn canonical(&self) -> DateTime<Utc> {
        self.canonical
    }

    /// True when a controller clock seeded the authority.
    pub fn is_seeded(&self) -> bool {
        self.incomplete_seed
    }

    /// The canonical time of day, formatted the way the controller reports it.
    pub fn clock_label(&self) -> String {
        self.canonical.format(SEED_FORMAT).to_string()
    }
}
