//! Browser-driven film listing lookup.
//!
//! One headless Chromium session is launched at startup and reused for every
//! lookup. Navigation state is per-session, so the page handle lives behind a
//! mutex and each lookup holds it across both page loads (listing, then
//! detail). Nothing is cached between lookups.

pub mod browser;
pub mod detail;
pub mod error;
pub mod listing;

use std::path::PathBuf;
use std::time::Duration;

use chromiumoxide::{Browser, Page};
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;
use url::Url;

pub use crate::detail::{MovieOptions, Resolution};
pub use crate::error::ScoutError;

const ANCHOR_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A hyperlink lifted off the current page: visible text plus raw href.
#[derive(Debug, Clone, Deserialize)]
pub struct Anchor {
    pub text: String,
    pub href: String,
}

impl Anchor {
    /// Resolve the href against the page it was found on. Already-absolute
    /// hrefs pass through untouched.
    pub fn resolve(&self, base: &Url) -> String {
        if self.href.starts_with("http") {
            return self.href.clone();
        }
        base.join(&self.href)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| self.href.clone())
    }
}

/// Settings needed to stand up the browser session.
#[derive(Debug, Clone)]
pub struct ScoutConfig {
    /// Listing root, e.g. `https://netupserver.com/film/`.
    pub base_url: Url,
    /// Explicit browser binary. When unset a system install is looked up,
    /// then a one-time download is performed.
    pub executable: Option<PathBuf>,
    /// Where a downloaded browser lands.
    pub data_dir: PathBuf,
    /// Deadline for a navigated page to expose its first anchors.
    pub nav_timeout: Duration,
}

/// The long-lived browser session plus everything needed to run lookups
/// against the listing site.
pub struct FilmScout {
    page: Mutex<Page>,
    base_url: Url,
    nav_timeout: Duration,
    _browser: Browser,
    _handler: JoinHandle<()>,
}

impl FilmScout {
    /// Provision and launch the browser and open the single reusable tab.
    /// Failure here is fatal to the caller; there is no degraded mode.
    pub async fn launch(config: ScoutConfig) -> Result<Self, ScoutError> {
        let (browser, handler) = browser::launch(&config).await?;
        let page = browser.new_page("about:blank").await?;

        let mut base_url = config.base_url;
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        Ok(Self {
            page: Mutex::new(page),
            base_url,
            nav_timeout: config.nav_timeout,
            _browser: browser,
            _handler: handler,
        })
    }

    /// Run the full lookup: resolve `title` on the year's listing page, then
    /// scrape the matched detail page. Both navigations happen under one
    /// page lock, so concurrent lookups serialize instead of clobbering each
    /// other's navigation state.
    pub async fn find_movie(&self, year: &str, title: &str) -> Result<MovieOptions, ScoutError> {
        let page = self.page.lock().await;

        let listing_url = self.base_url.join(&format!("{year}/"))?;
        self.goto_and_settle(&page, listing_url.as_str()).await?;
        let anchors = browser::collect_anchors(&page).await?;
        let detail_url = listing::resolve(&anchors, &listing_url, title)
            .ok_or(ScoutError::TitleNotFound)?;

        let detail_base = Url::parse(&detail_url)?;
        self.goto_and_settle(&page, detail_url.as_str()).await?;
        let anchors = browser::collect_anchors(&page).await?;

        Ok(detail::classify_anchors(&anchors, &detail_base))
    }

    async fn goto_and_settle(&self, page: &Page, url: &str) -> Result<(), ScoutError> {
        debug!("navigating to {url}");
        page.goto(url).await?;
        page.wait_for_navigation().await?;
        self.wait_for_anchors(page).await
    }

    /// Bounded readiness wait: poll until the document exposes at least one
    /// anchor, or fail with a timeout once the deadline passes.
    async fn wait_for_anchors(&self, page: &Page) -> Result<(), ScoutError> {
        let deadline = tokio::time::Instant::now() + self.nav_timeout;
        loop {
            let count: u64 = page
                .evaluate("document.querySelectorAll('a[href]').length")
                .await?
                .into_value()?;
            if count > 0 {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(ScoutError::PageTimeout(self.nav_timeout));
            }
            tokio::time::sleep(ANCHOR_POLL_INTERVAL).await;
        }
    }
}
