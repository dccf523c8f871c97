/// Leagues Scrape - Match Scraper
///
/// Co dělá:
///   1. Otevře leagues.gg soutěž v Chrome, stáhne "Matches" (nadcházející)
///   2. Přepne na "Results" a stáhne odehrané zápasy se skóre
///   3. Časy převede do cílové zóny (Europe/Helsinki), pokud běžíme jinde (CI = UTC)
///   4. Zapíše matches.json pro web appku a vypíše tabulky
///
/// Spuštění:
///   cargo run --bin scrape-matches

mod config;
mod output;

use anyhow::{Context, Result};
use config::ScrapeConfig;
use dotenv::dotenv;
use leagues_browser::LeaguesBrowser;
use logger::{now_iso, EventLogger, ScrapePhaseEvent, ScrapeRunEvent};
use match_core::{PhaseStats, Pipeline, RunOutcome};
use std::env;
use std::fs::File;
use tokio::task;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

fn phase_event(stats: &PhaseStats) -> ScrapePhaseEvent {
    ScrapePhaseEvent::new(stats.phase.as_str(), stats.cards_seen, stats.kept, stats.skipped, stats.duplicates)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let config = ScrapeConfig::from_env()?;
    let teams = config.team_aliases()?;

    info!("=== Leagues Scrape ===");
    info!("URL: {}", config.url);
    info!("Zones: source {} -> target {}", config.source_zone, config.target_zone.name());
    info!("Team aliases: {}", teams.len());

    // Single instance lock, two runs would race on the output file
    let lock_file_path = env::temp_dir().join("leagues_scrape.lock");
    let lock_file = File::create(&lock_file_path)
        .with_context(|| format!("Failed to create lock file at {:?}", lock_file_path))?;
    let mut lock = fd_lock::RwLock::new(lock_file);
    let _write_guard = match lock.try_write() {
        Ok(guard) => guard,
        Err(_) => {
            warn!("Another scrape is already running! Exiting.");
            return Ok(());
        }
    };

    let pipeline = Pipeline::new(teams, config.source_zone, config.target_zone);
    let browser_config = config.browser();

    // headless_chrome blokuje, drzime ho mimo async runtime
    let outcome: RunOutcome = task::spawn_blocking(move || -> Result<RunOutcome> {
        let mut browser = LeaguesBrowser::launch(browser_config)?;
        Ok(pipeline.run(&mut browser))
    })
    .await??;

    let events = EventLogger::new(&config.log_dir);
    for stats in std::iter::once(&outcome.upcoming).chain(outcome.completed.as_ref()) {
        if let Err(e) = events.log(&phase_event(stats)) {
            warn!("Event log write failed: {:#}", e);
        }
    }

    let written = match output::write_matches(&config.output_path, &outcome.lists) {
        Ok(()) => {
            println!("\nWrote {}", config.output_path.display());
            Some(config.output_path.display().to_string())
        }
        Err(e) => {
            warn!("{:#}", e);
            None
        }
    };

    let run = ScrapeRunEvent {
        ts: now_iso(),
        event: "SCRAPE_RUN",
        url: config.url.clone(),
        results: outcome.lists.results.len(),
        upcoming: outcome.lists.upcoming.len(),
        results_tab_found: outcome.results_tab_found(),
        converted: outcome.converted,
        source_zone: config.source_zone.to_string(),
        target_zone: config.target_zone.name().to_string(),
        output: written.clone(),
    };
    if let Err(e) = events.log(&run) {
        warn!("Event log write failed: {:#}", e);
    }

    output::print_summary(&outcome.lists);

    if written.is_none() {
        anyhow::bail!("matches were scraped but {} could not be written", config.output_path.display());
    }
    Ok(())
}
