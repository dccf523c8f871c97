//! Leagues Scrape - Match Core
//!
//! Turns snapshots of a competition page into match lists:
//! cards → candidates (per tab) → dedupe → canonical-zone times.
//!
//! Knows nothing about browsers or HTML; a `PageSource` supplies snapshots.

pub mod convert;
pub mod dedupe;
pub mod extract;
pub mod pipeline;
pub mod record;
pub mod snapshot;
pub mod teams;
pub mod zone;

pub use convert::{convert, try_convert, ConvertError, MONTHS};
pub use dedupe::dedupe;
pub use extract::{extract, extract_card, Extraction, Skip};
pub use pipeline::{Pipeline, PhaseStats, RunOutcome};
pub use record::{BestOf, CandidateRecord, IdentityKey, MatchLists, MatchRecord, Phase, Score};
pub use snapshot::{CardNode, PageSnapshot, PageSource};
pub use teams::TeamAliases;
pub use zone::{Clock, FixedClock, SourceZone, SystemClock, ZoneError, ZoneResolver, DEFAULT_TARGET_ZONE};
