use anyhow::Result;
use chrono_tz::Tz;
use serde::Serialize;
use tracing::{info, warn};

use crate::convert::convert;
use crate::dedupe::dedupe;
use crate::extract::extract;
use crate::record::{CandidateRecord, MatchLists, MatchRecord, Phase};
use crate::snapshot::{PageSnapshot, PageSource};
use crate::teams::TeamAliases;
use crate::zone::{Clock, SourceZone, SystemClock, ZoneResolver};

/// Per-phase counters, for the run log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseStats {
    pub phase: Phase,
    pub cards_seen: usize,
    pub kept: usize,
    pub skipped: usize,
    pub duplicates: usize,
}

impl PhaseStats {
    fn empty(phase: Phase) -> Self {
        Self { phase, cards_seen: 0, kept: 0, skipped: 0, duplicates: 0 }
    }
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub lists: MatchLists,
    pub upcoming: PhaseStats,
    /// `None` when the completed tab could not be opened.
    pub completed: Option<PhaseStats>,
    /// Whether times were shifted into the target zone.
    pub converted: bool,
}

impl RunOutcome {
    pub fn results_tab_found(&self) -> bool {
        self.completed.is_some()
    }
}

pub struct Pipeline<C = SystemClock> {
    teams: TeamAliases,
    zones: ZoneResolver<C>,
}

impl Pipeline<SystemClock> {
    pub fn new(teams: TeamAliases, source: SourceZone, target: Tz) -> Self {
        Self::with_resolver(teams, ZoneResolver::new(source, target))
    }
}

impl<C: Clock> Pipeline<C> {
    pub fn with_resolver(teams: TeamAliases, zones: ZoneResolver<C>) -> Self {
        Self { teams, zones }
    }

    /// Upcoming tab first, then results. Never fails: a phase whose page
    /// could not be read comes back empty.
    pub fn run<S: PageSource>(&self, page: &mut S) -> RunOutcome {
        let upcoming_page = page.show_upcoming().and_then(|()| page.snapshot());
        let (upcoming, upcoming_stats) = self.collect(upcoming_page, Phase::Upcoming);

        let (results, completed_stats) = match page.show_completed() {
            Ok(true) => {
                let (results, stats) = self.collect(page.snapshot(), Phase::Completed);
                (results, Some(stats))
            }
            Ok(false) => {
                warn!("[!] 'Results' control not found; only upcoming matches will be returned");
                (Vec::new(), None)
            }
            Err(e) => {
                warn!("Opening the results tab failed: {:#}", e);
                (Vec::new(), None)
            }
        };

        let converted = self.zones.needs_conversion();
        if converted {
            info!(
                "Converting times from {} to {}",
                self.zones.source(),
                self.zones.target().name()
            );
        }

        RunOutcome {
            lists: MatchLists {
                results: self.finish(results, converted),
                upcoming: self.finish(upcoming, converted),
            },
            upcoming: upcoming_stats,
            completed: completed_stats,
            converted,
        }
    }

    /// Extract + dedupe for one phase.
    pub fn collect_snapshot(&self, snapshot: &PageSnapshot, phase: Phase) -> (Vec<CandidateRecord>, PhaseStats) {
        let extraction = extract(snapshot, phase, &self.teams);
        let cards_seen = extraction.cards_seen();
        let skipped = extraction.skipped.len();
        let before = extraction.records.len();
        let records = dedupe(extraction.records);

        let stats = PhaseStats {
            phase,
            cards_seen,
            kept: records.len(),
            skipped,
            duplicates: before - records.len(),
        };
        info!(
            "Scraped {} {} match(es) from {} card(s) ({} skipped, {} duplicate)",
            stats.kept, phase, stats.cards_seen, stats.skipped, stats.duplicates
        );
        (records, stats)
    }

    fn collect(&self, snapshot: Result<PageSnapshot>, phase: Phase) -> (Vec<CandidateRecord>, PhaseStats) {
        match snapshot {
            Ok(snapshot) => self.collect_snapshot(&snapshot, phase),
            Err(e) => {
                warn!("Could not capture {} matches: {:#}", phase, e);
                (Vec::new(), PhaseStats::empty(phase))
            }
        }
    }

    fn finish(&self, records: Vec<CandidateRecord>, convert_times: bool) -> Vec<MatchRecord> {
        records
            .into_iter()
            .map(|candidate| {
                let mut record = candidate.into_record();
                if convert_times {
                    let (date, time) = convert(
                        &record.date,
                        &record.time,
                        &self.zones.source(),
                        &self.zones.target(),
                    );
                    record.date = date;
                    record.time = time;
                }
                record
            })
            .collect()
    }
}
