use std::time::Duration;

use thiserror::Error;

/// Everything a lookup can fail with. Handlers map these onto wire errors;
/// the underlying messages are logged, never surfaced to callers.
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("browser could not be provisioned: {0}")]
    Launch(String),

    #[error("title not found in listing")]
    TitleNotFound,

    #[error("page did not expose any links within {0:?}")]
    PageTimeout(Duration),

    #[error("browser session failed: {0}")]
    Upstream(#[from] chromiumoxide::error::CdpError),

    #[error("unexpected page content: {0}")]
    ParseMismatch(#[from] serde_json::Error),

    #[error("invalid upstream url: {0}")]
    BadUrl(#[from] url::ParseError),
}
