//! Decides whether scraped times need shifting into the canonical zone.
//!
//! The page renders times in the browser's zone, which on a CI runner is
//! usually UTC. Whether we have to convert is a question about offsets *now*,
//! not about zone names: a host in Europe/Tallinn shares Helsinki's offset all
//! year, a host in UTC+3 only shares it during summer time.

use chrono::{DateTime, FixedOffset, Local, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_TARGET_ZONE: Tz = chrono_tz::Europe::Helsinki;

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ZoneError {
    #[error("unknown time zone {0:?} (expected an IANA name like Europe/Helsinki or an offset like +02:00)")]
    Unknown(String),
}

/// Zone the page renders its times in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceZone {
    /// Whatever zone this process runs in.
    #[default]
    Local,
    Named(Tz),
    Fixed(FixedOffset),
}

impl SourceZone {
    /// UTC offset of this zone at `instant`.
    pub fn offset_at(&self, instant: &DateTime<Utc>) -> Option<FixedOffset> {
        match self {
            SourceZone::Local => offset_of(&Local, instant),
            SourceZone::Named(tz) => offset_of(tz, instant),
            SourceZone::Fixed(offset) => offset_of(offset, instant),
        }
    }
}

fn offset_of<Z: TimeZone>(zone: &Z, instant: &DateTime<Utc>) -> Option<FixedOffset> {
    zone.timestamp_opt(instant.timestamp(), instant.timestamp_subsec_nanos())
        .single()
        .map(|dt| dt.offset().fix())
}

impl FromStr for SourceZone {
    type Err = ZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("local") {
            return Ok(SourceZone::Local);
        }
        if let Ok(tz) = s.parse::<Tz>() {
            return Ok(SourceZone::Named(tz));
        }
        s.parse::<FixedOffset>()
            .map(SourceZone::Fixed)
            .map_err(|_| ZoneError::Unknown(s.to_string()))
    }
}

impl fmt::Display for SourceZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceZone::Local => f.write_str("local"),
            SourceZone::Named(tz) => f.write_str(tz.name()),
            SourceZone::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

pub fn parse_target_zone(name: &str) -> Result<Tz, ZoneError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| ZoneError::Unknown(name.trim().to_string()))
}

/// Compares source and target offsets at the clock's current instant.
/// Nothing is cached: DST state may differ between two calls.
#[derive(Debug, Clone)]
pub struct ZoneResolver<C = SystemClock> {
    clock: C,
    source: SourceZone,
    target: Tz,
}

impl ZoneResolver<SystemClock> {
    pub fn new(source: SourceZone, target: Tz) -> Self {
        Self::with_clock(SystemClock, source, target)
    }
}

impl<C: Clock> ZoneResolver<C> {
    pub fn with_clock(clock: C, source: SourceZone, target: Tz) -> Self {
        Self { clock, source, target }
    }

    pub fn source(&self) -> SourceZone {
        self.source
    }

    pub fn target(&self) -> Tz {
        self.target
    }

    pub fn needs_conversion(&self) -> bool {
        let now = self.clock.now();
        // Offset unknown: leave times alone rather than shift them by a guess.
        let Some(source_offset) = self.source.offset_at(&now) else {
            debug!("Could not resolve offset of source zone {}, skipping conversion", self.source);
            return false;
        };
        let target_offset = self.target.offset_from_utc_datetime(&now.naive_utc()).fix();
        debug!(
            "Zone check at {}: source {} = {}, target {} = {}",
            now, self.source, source_offset, self.target.name(), target_offset
        );
        source_offset != target_offset
    }
}
