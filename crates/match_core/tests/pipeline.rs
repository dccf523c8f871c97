use anyhow::{anyhow, Result};
use chrono::{TimeZone, Utc};
use match_core::{
    CardNode, FixedClock, PageSnapshot, PageSource, Pipeline, SourceZone, TeamAliases, ZoneResolver,
    DEFAULT_TARGET_ZONE,
};

/// Scripted page: fixed snapshots per tab, optional failures.
struct FakePage {
    upcoming: Result<PageSnapshot>,
    completed: Option<PageSnapshot>,
    on_completed: bool,
    calls: Vec<&'static str>,
}

impl FakePage {
    fn new(upcoming: PageSnapshot, completed: Option<PageSnapshot>) -> Self {
        Self { upcoming: Ok(upcoming), completed, on_completed: false, calls: Vec::new() }
    }
}

impl PageSource for FakePage {
    fn show_upcoming(&mut self) -> Result<()> {
        self.calls.push("show_upcoming");
        self.on_completed = false;
        Ok(())
    }

    fn show_completed(&mut self) -> Result<bool> {
        self.calls.push("show_completed");
        self.on_completed = self.completed.is_some();
        Ok(self.on_completed)
    }

    fn snapshot(&mut self) -> Result<PageSnapshot> {
        self.calls.push("snapshot");
        if self.on_completed {
            return self.completed.clone().ok_or_else(|| anyhow!("no results tab"));
        }
        match &self.upcoming {
            Ok(s) => Ok(s.clone()),
            Err(e) => Err(anyhow!("{e}")),
        }
    }
}

fn card(time: &str, t1: &str, t2: &str, header: &str, score: Option<&str>, footer: Option<&str>) -> CardNode {
    CardNode {
        time: Some(time.to_string()),
        participants: vec![t1.to_string(), "VS".to_string(), t2.to_string()],
        header: Some(header.to_string()),
        score_slots: score.into_iter().map(str::to_string).collect(),
        footer_notes: footer.into_iter().map(str::to_string).collect(),
    }
}

fn upcoming_tab() -> PageSnapshot {
    PageSnapshot::new(vec![
        card("18\n00", "Kova Esports", "Hiq", "12 MARCH 2025", None, Some("Best of 3")),
        card("18\n00", "Kova Esports", "Hiq", "12 MARCH 2025", None, Some("Best of 3")),
        card("23\n30", "Sjk", "Ence Academy", "31 DECEMBER 2025", None, None),
        // Results tab leftovers are sometimes still in the DOM.
        card("17\n00", "Old1", "Old2", "1 MARCH 2025", Some("2 - 0"), None),
    ])
}

fn results_tab() -> PageSnapshot {
    PageSnapshot::new(vec![
        card("19\n00", "Team A", "Team B", "5 MARCH 2025", Some("2 - 1"), Some("Best of 3")),
        card("20\n30", "Team C", "Team D", "TBA", Some("1 - 0"), None),
        card("21\n00", "Team E", "Team F", "5 MARCH 2025", None, None),
    ])
}

/// Winter instant: Helsinki is UTC+2.
fn winter_clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap())
}

fn pipeline(source: SourceZone) -> Pipeline<FixedClock> {
    let zones = ZoneResolver::with_clock(winter_clock(), source, DEFAULT_TARGET_ZONE);
    Pipeline::with_resolver(TeamAliases::new(), zones)
}

#[test]
fn test_same_offset_output_is_raw_extraction() {
    let mut page = FakePage::new(upcoming_tab(), Some(results_tab()));
    let outcome = pipeline(SourceZone::Named(chrono_tz::Europe::Helsinki)).run(&mut page);

    assert!(!outcome.converted);
    let json = serde_json::to_value(&outcome.lists).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "results": [
                {"Date": "5 MARCH 2025", "Time": "19:00", "Match": "Team A vs Team B", "Score": "2 – 1", "BestOf": "Best of 3"},
            ],
            "upcoming": [
                {"Date": "12 MARCH 2025", "Time": "18:00", "Match": "Kova Esports vs Hiq", "BestOf": "Best of 3"},
                {"Date": "31 DECEMBER 2025", "Time": "23:30", "Match": "Sjk vs Ence Academy"},
            ],
        })
    );
    assert_eq!(page.calls, ["show_upcoming", "snapshot", "show_completed", "snapshot"]);
}

#[test]
fn test_utc_host_times_are_moved_to_helsinki() {
    let mut page = FakePage::new(upcoming_tab(), Some(results_tab()));
    let outcome = pipeline(SourceZone::Named(chrono_tz::UTC)).run(&mut page);

    assert!(outcome.converted);
    let up = &outcome.lists.upcoming;
    assert_eq!((up[0].date.as_str(), up[0].time.as_str()), ("12 MARCH 2025", "20:00"));
    assert_eq!((up[1].date.as_str(), up[1].time.as_str()), ("1 JANUARY 2026", "01:30"));
    let res = &outcome.lists.results;
    assert_eq!((res[0].date.as_str(), res[0].time.as_str()), ("5 MARCH 2025", "21:00"));
}

#[test]
fn test_duplicates_collapse_before_conversion() {
    let mut page = FakePage::new(upcoming_tab(), None);
    let outcome = pipeline(SourceZone::Named(chrono_tz::UTC)).run(&mut page);

    assert_eq!(outcome.upcoming.cards_seen, 4);
    assert_eq!(outcome.upcoming.duplicates, 1);
    assert_eq!(outcome.upcoming.skipped, 1);
    let kova: Vec<_> = outcome
        .lists
        .upcoming
        .iter()
        .filter(|r| r.team1 == "Kova Esports")
        .collect();
    assert_eq!(kova.len(), 1);
}

#[test]
fn test_missing_results_tab_gives_upcoming_only() {
    let mut page = FakePage::new(upcoming_tab(), None);
    let outcome = pipeline(SourceZone::Named(chrono_tz::UTC)).run(&mut page);

    assert!(!outcome.results_tab_found());
    assert!(outcome.lists.results.is_empty());
    assert_eq!(outcome.lists.upcoming.len(), 2);
    // Upcoming still lands in the canonical zone.
    assert_eq!(outcome.lists.upcoming[0].time, "20:00");
    assert_eq!(page.calls, ["show_upcoming", "snapshot", "show_completed"]);
}

#[test]
fn test_failed_upcoming_capture_still_reads_results() {
    let mut page = FakePage::new(PageSnapshot::default(), Some(results_tab()));
    page.upcoming = Err(anyhow!("page never rendered"));
    let outcome = pipeline(SourceZone::Named(chrono_tz::Europe::Helsinki)).run(&mut page);

    assert!(outcome.lists.upcoming.is_empty());
    assert_eq!(outcome.upcoming.cards_seen, 0);
    assert_eq!(outcome.lists.results.len(), 1);
    assert_eq!(outcome.completed.unwrap().skipped, 2);
}

#[test]
fn test_aliases_apply_to_both_tabs() {
    let teams = TeamAliases::from_map([("HIQ", "HIQ Esports"), ("TEAM A", "Alpha")]);
    let zones = ZoneResolver::with_clock(
        winter_clock(),
        SourceZone::Named(chrono_tz::Europe::Helsinki),
        DEFAULT_TARGET_ZONE,
    );
    let mut page = FakePage::new(upcoming_tab(), Some(results_tab()));
    let outcome = Pipeline::with_resolver(teams, zones).run(&mut page);

    assert_eq!(outcome.lists.upcoming[0].match_label(), "Kova Esports vs HIQ Esports");
    assert_eq!(outcome.lists.results[0].match_label(), "Alpha vs Team B");
}
