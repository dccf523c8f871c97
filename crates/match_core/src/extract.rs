//! Card extractor: snapshot cards → candidate records for one phase.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

use crate::record::{BestOf, CandidateRecord, Phase, Score};
use crate::snapshot::{CardNode, PageSnapshot};
use crate::teams::TeamAliases;

/// Label the site puts between the two team names.
pub const VERSUS_TOKEN: &str = "VS";

static SCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\s*-\s*(\d+)\s*$").expect("score regex"));
static BEST_OF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Best\s+of\s+(\d+)").expect("best-of regex"));

/// Why a card produced no record. None of these abort a run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Skip {
    #[error("card has no time element")]
    NoTime,
    #[error("card lists {0} team(s), need 2")]
    TooFewTeams(usize),
    #[error("no dated header above card")]
    NoDateHeader,
    #[error("card belongs to the {0} tab")]
    WrongPhase(Phase),
    #[error("score {0:?} does not fit in a u32")]
    ScoreOverflow(String),
}

/// Extraction outcome for one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub records: Vec<CandidateRecord>,
    pub skipped: Vec<Skip>,
}

impl Extraction {
    pub fn cards_seen(&self) -> usize {
        self.records.len() + self.skipped.len()
    }
}

/// `"19\n00"` → `"19:00"`. Line breaks become one separator, which becomes a colon.
pub fn normalize_time_text(raw: &str) -> String {
    raw.replace('\n', " ").trim().replace(' ', ":")
}

/// First two participant labels that are real team names.
pub fn team_names(participants: &[String]) -> Vec<&str> {
    participants
        .iter()
        .map(|p| p.trim())
        .filter(|p| p.chars().count() > 1 && p.to_uppercase() != VERSUS_TOKEN)
        .take(2)
        .collect()
}

/// First slot that is a whole `<digits> - <digits>` score, as scraped.
pub fn find_score_text<S: AsRef<str>>(slots: &[S]) -> Option<&str> {
    slots
        .iter()
        .map(|slot| slot.as_ref().trim())
        .find(|slot| SCORE_RE.is_match(slot))
}

fn parse_score(text: &str) -> Option<Score> {
    let caps = SCORE_RE.captures(text)?;
    Some(Score {
        home: caps[1].parse().ok()?,
        away: caps[2].parse().ok()?,
    })
}

/// Score from the first score-shaped slot. `None` if there is none or it overflows.
pub fn find_score<S: AsRef<str>>(slots: &[S]) -> Option<Score> {
    find_score_text(slots).and_then(parse_score)
}

pub fn find_best_of<S: AsRef<str>>(notes: &[S]) -> Option<BestOf> {
    notes.iter().find_map(|note| {
        let caps = BEST_OF_RE.captures(note.as_ref().trim())?;
        let n: u32 = caps[1].parse().ok()?;
        (n > 0).then_some(BestOf(n))
    })
}

fn has_digit(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
}

pub fn extract_card(card: &CardNode, phase: Phase, teams: &TeamAliases) -> Result<CandidateRecord, Skip> {
    let time = card.time.as_deref().ok_or(Skip::NoTime)?;
    let time = normalize_time_text(time);

    let names = team_names(&card.participants);
    let [team1, team2] = names.as_slice() else {
        return Err(Skip::TooFewTeams(names.len()));
    };

    let date = card.header.as_deref().map(str::trim).unwrap_or("");
    if date.is_empty() || !has_digit(date) {
        return Err(Skip::NoDateHeader);
    }

    // Phase is decided by the score token alone, even when its digits overflow.
    let score_text = find_score_text(&card.score_slots);
    match (phase, score_text.is_some()) {
        (Phase::Completed, false) => return Err(Skip::WrongPhase(Phase::Upcoming)),
        (Phase::Upcoming, true) => return Err(Skip::WrongPhase(Phase::Completed)),
        _ => {}
    }
    let score = match score_text {
        Some(text) => Some(parse_score(text).ok_or_else(|| Skip::ScoreOverflow(text.to_string()))?),
        None => None,
    };

    Ok(CandidateRecord {
        date: date.to_string(),
        time,
        team1: teams.normalize(team1),
        team2: teams.normalize(team2),
        score,
        best_of: find_best_of(&card.footer_notes),
    })
}

/// Runs every card of `snapshot` through [`extract_card`], keeping document order.
pub fn extract(snapshot: &PageSnapshot, phase: Phase, teams: &TeamAliases) -> Extraction {
    let mut out = Extraction::default();
    for (idx, card) in snapshot.cards.iter().enumerate() {
        match extract_card(card, phase, teams) {
            Ok(record) => out.records.push(record),
            Err(skip) => {
                debug!("{} card #{} skipped: {}", phase, idx, skip);
                out.skipped.push(skip);
            }
        }
    }
    out
}
