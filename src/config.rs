//! Scraper configuration.

/// Default site root.
pub const DEFAULT_BASE_URL: &str = "https://www.imdb.com";

/// Browser user agent; the site serves reduced pages to unknown clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36";

/// Episode walks stop once more than this many episodes in a row had no soundtracks.
pub const DEFAULT_MAX_EMPTY_EPISODES: u32 = 4;

/// Settings shared by the HTTP client and the scraping pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScraperConfig {
    /// Site root, without trailing slash.
    pub base_url: String,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Look up a portrait for every linked artist.
    pub fetch_images: bool,
    /// Keep entries that have no title.
    pub keep_untitled: bool,
    /// Consecutive empty episodes tolerated before the walk stops.
    pub max_empty_episodes: u32,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fetch_images: true,
            keep_untitled: false,
            max_empty_episodes: DEFAULT_MAX_EMPTY_EPISODES,
        }
    }
}

impl ScraperConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Point at another site root, e.g. a local mirror in tests.
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the user agent.
    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Enable or disable portrait lookups.
    pub fn with_images(mut self, fetch_images: bool) -> Self {
        self.fetch_images = fetch_images;
        self
    }

    /// Keep or drop untitled entries.
    pub fn with_untitled(mut self, keep_untitled: bool) -> Self {
        self.keep_untitled = keep_untitled;
        self
    }

    /// Set the empty-episode limit.
    pub fn with_max_empty_episodes(mut self, limit: u32) -> Self {
        self.max_empty_episodes = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScraperConfig::default();
        assert_eq!(config.base_url, "https://www.imdb.com");
        assert!(config.fetch_images);
        assert!(!config.keep_untitled);
        assert_eq!(config.max_empty_episodes, 4);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let config = ScraperConfig::new().with_base_url("http://localhost:8080/");
        assert_eq!(config.base_url, "http://localhost:8080");
    }
}
