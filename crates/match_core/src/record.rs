use serde::{Serialize, Serializer};
use std::fmt;

/// Which tab of the competition page a snapshot was captured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Upcoming,
    Completed,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Upcoming => "upcoming",
            Phase::Completed => "completed",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final series score, home first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} – {}", self.home, self.away)
    }
}

/// Series format, e.g. `Best of 3`. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BestOf(pub u32);

impl fmt::Display for BestOf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Best of {}", self.0)
    }
}

/// Record as it comes off a card: raw header/time text, teams already normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRecord {
    pub date: String,
    pub time: String,
    pub team1: String,
    pub team2: String,
    pub score: Option<Score>,
    pub best_of: Option<BestOf>,
}

/// Dedup identity. Built from the raw, unconverted date/time text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    pub date: String,
    pub time: String,
    pub team1: String,
    pub team2: String,
}

impl CandidateRecord {
    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey {
            date: self.date.clone(),
            time: self.time.clone(),
            team1: self.team1.clone(),
            team2: self.team2.clone(),
        }
    }

    pub fn into_record(self) -> MatchRecord {
        MatchRecord {
            date: self.date,
            time: self.time,
            team1: self.team1,
            team2: self.team2,
            score: self.score,
            best_of: self.best_of,
        }
    }
}

/// Output unit. `date`/`time` are in the canonical zone once the pipeline has
/// converted them; when the text could not be parsed they stay as scraped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub date: String,
    pub time: String,
    pub team1: String,
    pub team2: String,
    pub score: Option<Score>,
    pub best_of: Option<BestOf>,
}

impl MatchRecord {
    /// `"team1 vs team2"`, the form the web app splits on.
    pub fn match_label(&self) -> String {
        format!("{} vs {}", self.team1, self.team2)
    }
}

// The web app reads capitalised keys, so the wire shape differs from the struct.
#[derive(Serialize)]
struct MatchRow<'a> {
    #[serde(rename = "Date")]
    date: &'a str,
    #[serde(rename = "Time")]
    time: &'a str,
    #[serde(rename = "Match")]
    match_label: String,
    #[serde(rename = "Score", skip_serializing_if = "Option::is_none")]
    score: Option<String>,
    #[serde(rename = "BestOf", skip_serializing_if = "Option::is_none")]
    best_of: Option<String>,
}

impl Serialize for MatchRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        MatchRow {
            date: &self.date,
            time: &self.time,
            match_label: self.match_label(),
            score: self.score.map(|s| s.to_string()),
            best_of: self.best_of.map(|b| b.to_string()),
        }
        .serialize(serializer)
    }
}

/// Result of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchLists {
    pub results: Vec<MatchRecord>,
    pub upcoming: Vec<MatchRecord>,
}

impl MatchLists {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty() && self.upcoming.is_empty()
    }
}
