//! Process-level configuration, read once at start-up.

use eyre::Context;
use std::fmt;
use std::time::Duration;

/// Root of the YouTube Data API v3.
pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Channel extracted when `CHANNEL_HANDLE` isn't set.
pub const DEFAULT_CHANNEL_HANDLE: &str = "MrBeast";

/// Upper bound on how long a single API request may take.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Largest page (and id batch) the YouTube Data API accepts.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Settings for one extraction run.
///
/// Built from environment variables by [`Config::from_env`]. Nothing in this crate reads the
/// environment after that; the resulting value is handed to
/// [`YouTubeClient::new`](crate::YouTubeClient::new) and the pipeline explicitly.
#[derive(Clone)]
pub struct Config {
    /// `API_KEY`. Empty when unset; the API will then reject every request.
    pub api_key: String,
    /// `YOUTUBE_API_BASE_URL`, without a trailing slash.
    pub api_base_url: String,
    /// `CHANNEL_HANDLE`.
    pub channel_handle: String,
    /// `REQUEST_TIMEOUT_SECS`.
    pub request_timeout: Duration,
    /// `PAGE_SIZE`, the `maxResults` used when listing playlist items.
    pub page_size: u32,
    /// `BATCH_SIZE`, how many video ids go into one `videos.list` request.
    pub batch_size: usize,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// Call [`dotenvy::dotenv`] first if a `.env` file should be taken into account.
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> eyre::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            tracing::warn!("API_KEY is not set; YouTube API requests will most likely be rejected");
        }

        let api_base_url = lookup("YOUTUBE_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let channel_handle =
            lookup("CHANNEL_HANDLE").unwrap_or_else(|| DEFAULT_CHANNEL_HANDLE.to_string());

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(secs) => Duration::from_secs(
                secs.parse()
                    .with_context(|| format!("parse REQUEST_TIMEOUT_SECS value {secs:?}"))?,
            ),
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        let page_size = match lookup("PAGE_SIZE") {
            Some(n) => n
                .parse()
                .with_context(|| format!("parse PAGE_SIZE value {n:?}"))?,
            None => MAX_PAGE_SIZE,
        };

        let batch_size = match lookup("BATCH_SIZE") {
            Some(n) => n
                .parse()
                .with_context(|| format!("parse BATCH_SIZE value {n:?}"))?,
            None => MAX_PAGE_SIZE as usize,
        };

        Ok(Self {
            api_key,
            api_base_url,
            channel_handle,
            request_timeout,
            page_size,
            batch_size,
        })
    }
}

// Hand-written so the API key never ends up in logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &if self.api_key.is_empty() { "" } else { "<redacted>" })
            .field("api_base_url", &self.api_base_url)
            .field("channel_handle", &self.channel_handle)
            .field("request_timeout", &self.request_timeout)
            .field("page_size", &self.page_size)
            .field("batch_size", &self.batch_size)
            .finish()
    }
}
