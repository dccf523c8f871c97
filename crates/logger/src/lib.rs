/// Leagues Scrape - Logger
/// JSONL event stream, one file per UTC day

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct EventLogger {
    log_dir: PathBuf,
}

impl EventLogger {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        let dir = log_dir.into();
        fs::create_dir_all(&dir).ok();
        Self { log_dir: dir }
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn current_file(&self) -> PathBuf {
        let date = Utc::now().format("%Y-%m-%d").to_string();
        self.log_dir.join(format!("{date}.jsonl"))
    }

    pub fn log<T: Serialize>(&self, event: &T) -> Result<()> {
        let path  = self.current_file();
        let line  = serde_json::to_string(event)?;
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open event log {}", path.display()))?;
        writeln!(f, "{line}")?;
        Ok(())
    }
}

pub fn now_iso() -> String {
    Utc::now().to_rfc3339()
}

// ── Event typy ────────────────────────────────────────────────────────────────

#[derive(Serialize, Debug, Clone)]
pub struct ScrapePhaseEvent {
    pub ts:         String,
    pub event:      &'static str,   // "SCRAPE_PHASE"
    pub phase:      String,         // "upcoming" | "completed"
    pub cards_seen: usize,
    pub kept:       usize,
    pub skipped:    usize,
    pub duplicates: usize,
}

impl ScrapePhaseEvent {
    pub fn new(phase: impl Into<String>, cards_seen: usize, kept: usize, skipped: usize, duplicates: usize) -> Self {
        Self {
            ts: now_iso(),
            event: "SCRAPE_PHASE",
            phase: phase.into(),
            cards_seen,
            kept,
            skipped,
            duplicates,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct ScrapeRunEvent {
    pub ts:                String,
    pub event:             &'static str,   // "SCRAPE_RUN"
    pub url:               String,
    pub results:           usize,
    pub upcoming:          usize,
    pub results_tab_found: bool,
    pub converted:         bool,           // times shifted into target zone
    pub source_zone:       String,
    pub target_zone:       String,
    pub output:            Option<String>, // None = write failed
}
