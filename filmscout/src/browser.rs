//! Chromium provisioning and session launch.
//!
//! Provisioning order: explicit executable from settings, then a system
//! install, then a one-time download into the data directory.

use std::path::{Path, PathBuf};

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::fetcher::{BrowserFetcher, BrowserFetcherOptions};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::ScoutError;
use crate::{Anchor, ScoutConfig};

/// Desktop user agent; the target site rejects obvious automation.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const SYSTEM_BROWSERS: &[&str] = &[
    "chromium",
    "chromium-browser",
    "google-chrome",
    "google-chrome-stable",
];

pub(crate) async fn launch(config: &ScoutConfig) -> Result<(Browser, JoinHandle<()>), ScoutError> {
    let executable = provision(config).await?;

    let browser_config = BrowserConfig::builder()
        .chrome_executable(executable)
        .no_sandbox()
        .arg("--disable-setuid-sandbox")
        .arg("--disable-dev-shm-usage")
        .arg("--disable-gpu")
        .arg("--blink-settings=imagesEnabled=false")
        .arg("--disable-blink-features=AutomationControlled")
        .arg("--log-level=3")
        .arg(format!("--user-agent={USER_AGENT}"))
        .build()
        .map_err(ScoutError::Launch)?;

    let (browser, mut handler) = Browser::launch(browser_config).await?;

    // The CDP event stream must be drained for the session to make progress.
    let handle = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                warn!("browser handler error: {e:?}");
            }
        }
        debug!("browser handler stream ended");
    });

    Ok((browser, handle))
}

async fn provision(config: &ScoutConfig) -> Result<PathBuf, ScoutError> {
    if let Some(path) = &config.executable {
        info!("using configured browser at {}", path.display());
        return Ok(path.clone());
    }
    if let Some(path) = find_system_browser() {
        info!("using system browser at {}", path.display());
        return Ok(path);
    }
    download_browser(&config.data_dir).await
}

fn find_system_browser() -> Option<PathBuf> {
    SYSTEM_BROWSERS
        .iter()
        .find_map(|name| which::which(name).ok())
}

/// One-time Chromium download into the data directory. Runs before the
/// session is constructed, never at request time.
async fn download_browser(data_dir: &Path) -> Result<PathBuf, ScoutError> {
    let download_dir = data_dir.join("chromium");
    tokio::fs::create_dir_all(&download_dir).await.map_err(|e| {
        ScoutError::Launch(format!("cannot create {}: {e}", download_dir.display()))
    })?;

    info!(
        "no system browser found, downloading into {}",
        download_dir.display()
    );
    let fetcher = BrowserFetcher::new(
        BrowserFetcherOptions::builder()
            .with_path(&download_dir)
            .build()
            .map_err(|e| ScoutError::Launch(e.to_string()))?,
    );
    let info = fetcher
        .fetch()
        .await
        .map_err(|e| ScoutError::Launch(e.to_string()))?;

    Ok(info.executable_path)
}

/// Lift every `a[href]` off the current document as (text, href) pairs.
pub(crate) async fn collect_anchors(page: &Page) -> Result<Vec<Anchor>, ScoutError> {
    let anchors: Vec<Anchor> = page
        .evaluate(
            r#"Array.from(document.querySelectorAll('a[href]'))
                .map(a => ({ text: a.textContent || '', href: a.getAttribute('href') || '' }))"#,
        )
        .await?
        .into_value()?;
    Ok(anchors)
}
