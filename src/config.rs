use anyhow::{Context, Result};
use chrono_tz::Tz;
use leagues_browser::BrowserConfig;
use match_core::zone::parse_target_zone;
use match_core::{SourceZone, TeamAliases, DEFAULT_TARGET_ZONE};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_URL: &str = "https://leagues.gg/competitions/cmp_01KCHFGYKEKYBG9J3451Q24PPX";

/// Everything the scraper reads from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub url: String,
    pub target_zone: Tz,
    pub source_zone: SourceZone,
    pub aliases_path: Option<PathBuf>,
    pub output_path: PathBuf,
    pub log_dir: PathBuf,
    pub headless: bool,
    pub sandbox: bool,
}

fn truthy(v: &str) -> bool {
    matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

impl ScrapeConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let target_zone = match non_empty("TARGET_TZ") {
            Some(name) => parse_target_zone(&name).context("TARGET_TZ")?,
            None => DEFAULT_TARGET_ZONE,
        };
        let source_zone = match non_empty("SOURCE_TZ") {
            Some(name) => name.parse::<SourceZone>().context("SOURCE_TZ")?,
            None => SourceZone::Local,
        };

        // Na CI neni displej ani sandbox
        let on_ci = non_empty("CI").is_some() || non_empty("GITHUB_ACTIONS").is_some();
        let headless = on_ci || non_empty("SCRAPE_HEADLESS").is_some_and(|v| truthy(&v));

        Ok(Self {
            url: non_empty("LEAGUES_URL").unwrap_or_else(|| DEFAULT_URL.to_string()),
            target_zone,
            source_zone,
            aliases_path: non_empty("TEAM_ALIASES_PATH").map(PathBuf::from),
            output_path: non_empty("MATCHES_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("matches.json")),
            log_dir: non_empty("SCRAPE_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("logs")),
            headless,
            sandbox: !on_ci,
        })
    }

    pub fn team_aliases(&self) -> Result<TeamAliases> {
        match &self.aliases_path {
            Some(path) => TeamAliases::load(path),
            None => Ok(TeamAliases::new()),
        }
    }

    pub fn browser(&self) -> BrowserConfig {
        BrowserConfig {
            headless: self.headless,
            sandbox: self.sandbox,
            ..BrowserConfig::new(self.url.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ScrapeConfig> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ScrapeConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.url, DEFAULT_URL);
        assert_eq!(cfg.target_zone, chrono_tz::Europe::Helsinki);
        assert_eq!(cfg.source_zone, SourceZone::Local);
        assert_eq!(cfg.output_path, PathBuf::from("matches.json"));
        assert_eq!(cfg.log_dir, PathBuf::from("logs"));
        assert!(cfg.aliases_path.is_none());
        assert!(!cfg.headless);
        assert!(cfg.sandbox);
    }

    #[test]
    fn test_ci_forces_headless_without_sandbox() {
        let cfg = load(&[("GITHUB_ACTIONS", "true")]).unwrap();
        assert!(cfg.headless);
        assert!(!cfg.sandbox);
        let browser = cfg.browser();
        assert!(browser.headless && !browser.sandbox);
        assert_eq!(browser.url, DEFAULT_URL);
    }

    #[test]
    fn test_zones_from_env() {
        let cfg = load(&[("TARGET_TZ", "Europe/Stockholm"), ("SOURCE_TZ", "-04:00")]).unwrap();
        assert_eq!(cfg.target_zone, chrono_tz::Europe::Stockholm);
        assert_eq!(cfg.source_zone, SourceZone::Fixed(FixedOffset::west_opt(4 * 3600).unwrap()));
    }

    #[test]
    fn test_bad_zone_is_an_error() {
        assert!(load(&[("TARGET_TZ", "Finland")]).is_err());
        assert!(load(&[("SOURCE_TZ", "Nowhere/Town")]).is_err());
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let cfg = load(&[("LEAGUES_URL", "  "), ("SCRAPE_HEADLESS", "0")]).unwrap();
        assert_eq!(cfg.url, DEFAULT_URL);
        assert!(!cfg.headless);
    }

    #[test]
    fn test_aliases_loaded_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aliases.json");
        std::fs::write(&path, r#"{"KOVA": "KOVA Esports"}"#).unwrap();

        let cfg = load(&[("TEAM_ALIASES_PATH", path.to_str().unwrap())]).unwrap();
        assert_eq!(cfg.team_aliases().unwrap().normalize("kova"), "KOVA Esports");

        let missing = load(&[("TEAM_ALIASES_PATH", "/definitely/not/here.json")]).unwrap();
        assert!(missing.team_aliases().is_err());
    }
}
