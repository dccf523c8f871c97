use anyhow::{Context, Result};
use match_core::{MatchLists, MatchRecord};
use std::fs;
use std::path::Path;

/// Writes `{ "results": [...], "upcoming": [...] }` for the web app.
pub fn write_matches(path: &Path, lists: &MatchLists) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(lists)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

pub fn results_table(results: &[MatchRecord]) -> String {
    let mut out = format!("{:<20} | {:<7} | {:<20} | SCORE\n", "DATE", "TIME", "MATCH");
    out.push_str(&"-".repeat(65));
    out.push('\n');
    for m in results {
        let score = m.score.map(|s| s.to_string()).unwrap_or_default();
        out.push_str(&format!("{:<20} | {:<7} | {:<20} | {}\n", m.date, m.time, m.match_label(), score));
    }
    out.push_str(&format!("\nFetched {} result(s).", results.len()));
    out
}

pub fn upcoming_table(upcoming: &[MatchRecord]) -> String {
    let mut out = format!("{:<20} | {:<7} | MATCH\n", "DATE", "TIME");
    out.push_str(&"-".repeat(60));
    out.push('\n');
    for m in upcoming {
        out.push_str(&format!("{:<20} | {:<7} | {}\n", m.date, m.time, m.match_label()));
    }
    out.push_str(&format!("\nFetched {} upcoming match(es).", upcoming.len()));
    out
}

pub fn print_summary(lists: &MatchLists) {
    if !lists.results.is_empty() {
        println!("\n{}", results_table(&lists.results));
    }
    if !lists.upcoming.is_empty() {
        println!("\n{}", upcoming_table(&lists.upcoming));
    }
    if lists.is_empty() {
        println!("\n[!] No matches found. The site layout may have changed or you are being blocked.");
    }
}
