//! leagues.gg competition page driver (headless Chrome).
//!
//! Match cards are rendered client-side, so plain HTTP gives an empty shell.
//! Flow: open page → wait for day headers → accept consent → scroll (lazy
//! load) → snapshot "Matches" → click "Results" → scroll → snapshot.

pub mod html;

use anyhow::{Context, Result};
use headless_chrome::{Browser, LaunchOptions, Tab};
use match_core::{PageSnapshot, PageSource};
use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub use html::parse_snapshot;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const CONSENT_BUTTON: &str = "button.fc-cta-consent, button[aria-label='Consent']";
const RESULTS_BUTTON: &str = "//button[contains(., 'Results')]";
const MATCHES_BUTTON: &str = "//button[contains(., 'Matches')]";

#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub url: String,
    pub headless: bool,
    /// Off on CI runners, which can't provide one.
    pub sandbox: bool,
    pub user_agent: String,
    /// How long to wait for the first day header.
    pub load_timeout: Duration,
    pub consent_timeout: Duration,
    /// Pause after clicks so client-side rendering can catch up.
    pub settle: Duration,
}

impl BrowserConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headless: true,
            sandbox: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            load_timeout: Duration::from_secs(15),
            consent_timeout: Duration::from_secs(5),
            settle: Duration::from_secs(2),
        }
    }
}

/// One Chrome session on the competition page. Chrome exits when this is dropped.
pub struct LeaguesBrowser {
    config: BrowserConfig,
    tab: Arc<Tab>,
    loaded: bool,
    // Drop order: tab first, then the browser process.
    _browser: Browser,
}

impl LeaguesBrowser {
    pub fn launch(config: BrowserConfig) -> Result<Self> {
        let options = LaunchOptions::default_builder()
            .headless(config.headless)
            .sandbox(config.sandbox)
            .window_size(Some((1400, 1000)))
            .args(vec![OsStr::new("--disable-blink-features=AutomationControlled")])
            .build()
            .context("Failed to build Chrome launch options")?;

        let browser = Browser::new(options).context("Failed to launch Chrome")?;
        let tab = browser.new_tab().context("Failed to create browser tab")?;
        tab.set_user_agent(&config.user_agent, Some("en-US,en;q=0.9"), None)
            .context("Failed to set user agent")?;

        Ok(Self { config, tab, loaded: false, _browser: browser })
    }

    fn pause(&self, d: Duration) {
        std::thread::sleep(d);
    }

    fn scroll_to(&self, y: u32) -> Result<()> {
        self.tab
            .evaluate(&format!("window.scrollTo(0, {y});"), false)
            .with_context(|| format!("Chrome scrollTo({y}) failed"))?;
        Ok(())
    }

    /// Scroll down and back so lazily rendered cards exist in the DOM.
    fn nudge(&self, depth: u32) -> Result<()> {
        self.scroll_to(depth)?;
        self.pause(Duration::from_secs(1));
        self.scroll_to(0)?;
        self.pause(Duration::from_millis(500));
        Ok(())
    }

    fn load(&mut self) -> Result<()> {
        info!("Loading page: {}", self.config.url);
        self.tab
            .navigate_to(&self.config.url)
            .context("Chrome navigate failed")?;
        self.tab
            .wait_for_element_with_custom_timeout("h4", self.config.load_timeout)
            .context("No match day headers rendered; page layout changed or we are blocked")?;
        self.pause(self.config.settle);

        // Consent dialog has to go before anything else is clickable.
        match self
            .tab
            .wait_for_element_with_custom_timeout(CONSENT_BUTTON, self.config.consent_timeout)
        {
            Ok(button) => {
                button.click().context("Consent click failed")?;
                info!("Clicked consent.");
                self.pause(Duration::from_secs(1));
            }
            Err(_) => debug!("No consent dialog"),
        }

        self.loaded = true;
        Ok(())
    }

    fn click_first(&self, xpath: &str) -> Result<bool> {
        let buttons = self.tab.find_elements_by_xpath(xpath).unwrap_or_default();
        let Some(button) = buttons.first() else {
            return Ok(false);
        };
        button.click().with_context(|| format!("Click on {xpath} failed"))?;
        self.pause(self.config.settle);
        Ok(true)
    }
}

impl PageSource for LeaguesBrowser {
    fn show_upcoming(&mut self) -> Result<()> {
        if self.loaded {
            // Back from results; the default tab needs an explicit click.
            if !self.click_first(MATCHES_BUTTON)? {
                warn!("'Matches' button not found, staying on current tab");
            }
        } else {
            self.load()?;
        }
        info!("Scraping upcoming matches…");
        self.nudge(600)
    }

    fn show_completed(&mut self) -> Result<bool> {
        if !self.loaded {
            self.load()?;
        }
        if !self.click_first(RESULTS_BUTTON)? {
            return Ok(false);
        }
        info!("Scraping results…");
        self.nudge(800)?;
        Ok(true)
    }

    fn snapshot(&mut self) -> Result<PageSnapshot> {
        let html = self
            .tab
            .get_content()
            .context("Failed to read HTML from browser tab")?;
        let snapshot = parse_snapshot(&html);
        debug!("Snapshot: {} bytes of HTML, {} card(s)", html.len(), snapshot.len());
        Ok(snapshot)
    }
}
