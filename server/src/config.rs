use std::path::PathBuf;
use std::time::Duration;

use filmscout::ScoutConfig;
use serde::Serialize;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://netupserver.com/film/";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_NAV_TIMEOUT_SECS: u64 = 10;

/// Environment-driven settings, resolved once at startup.
#[derive(Clone, Serialize)]
pub struct Settings {
    pub port: u16,
    #[serde(rename = "baseUrl")]
    pub base_url: String,
    #[serde(skip)]
    pub browser_path: Option<PathBuf>,
    #[serde(skip)]
    pub data_dir: PathBuf,
    #[serde(rename = "navTimeoutSecs")]
    pub nav_timeout_secs: u64,
}

impl Settings {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let base_url =
            std::env::var("FILMGRAB_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let browser_path = std::env::var("FILMGRAB_CHROME_PATH").ok().map(PathBuf::from);

        let data_dir = std::env::var("FILMGRAB_DATA_DIR")
            .map(PathBuf::from)
            .or_else(|_| std::env::var("HOME").map(|h| PathBuf::from(h).join(".cache/filmgrab")))
            .unwrap_or_else(|_| std::env::temp_dir().join("filmgrab"));

        let nav_timeout_secs = std::env::var("FILMGRAB_NAV_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_NAV_TIMEOUT_SECS);

        Self {
            port,
            base_url,
            browser_path,
            data_dir,
            nav_timeout_secs,
        }
    }

    pub fn scout_config(&self) -> anyhow::Result<ScoutConfig> {
        Ok(ScoutConfig {
            base_url: Url::parse(&self.base_url)?,
            executable: self.browser_path.clone(),
            data_dir: self.data_dir.clone(),
            nav_timeout: Duration::from_secs(self.nav_timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_base_url_parses() {
        let url = Url::parse(DEFAULT_BASE_URL).unwrap();
        assert_eq!(
            url.join("2010/").unwrap().as_str(),
            "https://netupserver.com/film/2010/",
        );
    }
}
