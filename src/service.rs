//! High-level soundtrack scraping.
//!
//! [`SoundtrackService`] ties the pieces together: it fetches a title's
//! soundtrack page, falls back to walking the episodes of a series when
//! the title itself lists nothing, and finally looks up portraits for
//! linked artists.

use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::api::{HttpFetcher, ImdbApi, PageFetcher};
use crate::api::imdb::normalize_title_id;
use crate::config::ScraperConfig;
use crate::error::Result;
use crate::extract::ExtractOptions;
use crate::models::Soundtrack;

/// Counts episodes without soundtracks during an episode walk.
///
/// The walk is over once more than `limit` episodes in a row came back
/// empty. An episode with soundtracks resets the count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeTally {
    consecutive_empty: u32,
    limit: u32,
}

impl EpisodeTally {
    /// Start a tally tolerating `limit` empty episodes in a row.
    pub fn new(limit: u32) -> Self {
        Self {
            consecutive_empty: 0,
            limit,
        }
    }

    /// Record one episode's outcome.
    pub fn record(&mut self, found_soundtracks: bool) {
        if found_soundtracks {
            self.consecutive_empty = 0;
        } else {
            self.consecutive_empty += 1;
        }
    }

    /// Whether the walk should stop.
    pub fn exhausted(&self) -> bool {
        self.consecutive_empty > self.limit
    }

    /// Empty episodes seen since the last hit.
    pub fn consecutive_empty(&self) -> u32 {
        self.consecutive_empty
    }
}

/// Main soundtrack scraping interface.
///
/// # Example
///
/// ```rust,no_run
/// use soundtracks::{ScraperConfig, SoundtrackService};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let service = SoundtrackService::new(ScraperConfig::default())?;
///     for soundtrack in service.soundtracks("tt7286456").await? {
///         println!("{} - {}", soundtrack.name, soundtrack.artists_string(", "));
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct SoundtrackService<F = HttpFetcher> {
    api: ImdbApi<F>,
    fetch_images: bool,
    max_empty_episodes: u32,
    /// Portrait lookups by artist id, misses included.
    image_cache: RwLock<HashMap<String, Option<String>>>,
}

impl SoundtrackService<HttpFetcher> {
    /// Create a service fetching pages over HTTP.
    pub fn new(config: ScraperConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::with_fetcher(fetcher, config))
    }
}

impl<F: PageFetcher> SoundtrackService<F> {
    /// Create a service on top of any page fetcher.
    pub fn with_fetcher(fetcher: F, config: ScraperConfig) -> Self {
        let mut api = ImdbApi::new(fetcher, config.base_url);
        api.set_options(ExtractOptions {
            keep_untitled: config.keep_untitled,
        });

        Self {
            api,
            fetch_images: config.fetch_images,
            max_empty_episodes: config.max_empty_episodes,
            image_cache: RwLock::new(HashMap::new()),
        }
    }

    /// Enable or disable portrait lookups.
    pub fn set_fetch_images(&mut self, fetch_images: bool) {
        self.fetch_images = fetch_images;
    }

    /// Whether portrait lookups are enabled.
    pub fn fetch_images(&self) -> bool {
        self.fetch_images
    }

    /// Set how many empty episodes in a row an episode walk tolerates.
    pub fn set_max_empty_episodes(&mut self, limit: u32) {
        self.max_empty_episodes = limit;
    }

    /// Low-level page client.
    pub fn api(&self) -> &ImdbApi<F> {
        &self.api
    }

    /// All credited soundtracks of a title.
    ///
    /// Reads the title's own soundtrack page; when that lists nothing,
    /// the title is treated as a series and its episodes are walked.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTitleId` for malformed ids and the fetch error if
    /// the title's soundtrack page cannot be loaded.
    pub async fn soundtracks(&self, title_id: &str) -> Result<Vec<Soundtrack>> {
        let title_id = normalize_title_id(title_id)?;

        let mut soundtracks = self.api.get_soundtracks(&title_id).await?;
        if soundtracks.is_empty() {
            info!("{} has no soundtrack listing, walking episodes", title_id);
            soundtracks = self.episode_soundtracks(&title_id).await?;
        }

        if self.fetch_images {
            self.enrich_images(&mut soundtracks).await;
        }

        info!("{}: {} soundtracks", title_id, soundtracks.len());
        Ok(soundtracks)
    }

    /// Soundtracks of every episode of a series, season by season.
    ///
    /// Episodes that fail to load count as empty. A season page that
    /// fails to load ends the walk; its error is returned only when
    /// nothing was collected before it.
    pub async fn episode_soundtracks(&self, title_id: &str) -> Result<Vec<Soundtrack>> {
        let mut soundtracks = Vec::new();
        let mut tally = EpisodeTally::new(self.max_empty_episodes);
        let mut season = 1;

        while !tally.exhausted() {
            let episodes = match self.api.get_season_episodes(title_id, season).await {
                Ok(episodes) => episodes,
                Err(e) if soundtracks.is_empty() => return Err(e),
                Err(e) => {
                    warn!("Stopping at season {} of {}: {}", season, title_id, e);
                    break;
                }
            };
            debug!("{} season {}: {} episodes", title_id, season, episodes.len());

            if episodes.is_empty() {
                tally.record(false);
            }

            for episode_id in episodes {
                let found = match episode_id {
                    Some(episode_id) => self.episode(&episode_id).await,
                    None => Vec::new(),
                };
                tally.record(!found.is_empty());
                soundtracks.extend(found);

                if tally.exhausted() {
                    break;
                }
            }
            season += 1;
        }

        debug!(
            "Episode walk of {} ended after season {} with {} empty episodes in a row",
            title_id,
            season - 1,
            tally.consecutive_empty()
        );
        Ok(soundtracks)
    }

    /// Soundtracks of one episode; fetch failures count as none.
    async fn episode(&self, episode_id: &str) -> Vec<Soundtrack> {
        match self.api.get_soundtracks(episode_id).await {
            Ok(found) => found,
            Err(e) => {
                warn!("Could not load episode {}: {}", episode_id, e);
                Vec::new()
            }
        }
    }

    /// Fill in portrait URLs for every linked artist.
    pub async fn enrich_images(&self, soundtracks: &mut [Soundtrack]) {
        for artist in soundtracks.iter_mut().flat_map(|s| s.artists.iter_mut()) {
            if let Some(artist_id) = artist.imdb_id.as_deref() {
                artist.image = self.artist_image(artist_id).await;
            }
        }
    }

    /// Portrait URL for an artist id, fetched at most once per service.
    pub async fn artist_image(&self, artist_id: &str) -> Option<String> {
        let cached = {
            let cache = self.image_cache.read().await;
            cache.get(artist_id).cloned()
        };
        if let Some(image) = cached {
            return image;
        }

        let image = self.api.get_artist_image(artist_id).await;
        let mut cache = self.image_cache.write().await;
        cache.insert(artist_id.to_string(), image.clone());
        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SoundtrackError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Serves canned pages and records every URL asked for.
    #[derive(Default)]
    struct FakeFetcher {
        pages: HashMap<String, String>,
        requests: Mutex<Vec<String>>,
    }

    impl FakeFetcher {
        fn page(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(url.to_string(), html.to_string());
            self
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageFetcher for FakeFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.requests.lock().unwrap().push(url.to_string());
            self.pages.get(url).cloned().ok_or(SoundtrackError::HttpStatus {
                status: 404,
                url: url.to_string(),
            })
        }
    }

    const BASE: &str = "http://imdb.test";

    fn soundtrack_page(title: &str, line: &str) -> String {
        format!(
            r#"<ul class="ipc-metadata-list"><li><span class="ipc-metadata-list-item__label">{}</span><div class="ipc-html-content-inner-div">{}</div></li></ul>"#,
            title, line
        )
    }

    fn season_page(episode_ids: &[&str]) -> String {
        episode_ids
            .iter()
            .map(|id| format!(r#"<div class="episode-item-wrapper"><a href="/title/{}/">ep</a></div>"#, id))
            .collect()
    }

    fn config() -> ScraperConfig {
        ScraperConfig::new().with_base_url(BASE).with_images(false)
    }

    #[test]
    fn test_tally_stops_after_limit() {
        let mut tally = EpisodeTally::new(4);
        for _ in 0..4 {
            tally.record(false);
            assert!(!tally.exhausted());
        }
        tally.record(false);
        assert!(tally.exhausted());
    }

    #[test]
    fn test_tally_resets_on_hit() {
        let mut tally = EpisodeTally::new(1);
        tally.record(false);
        tally.record(true);
        tally.record(false);
        assert!(!tally.exhausted());
        assert_eq!(tally.consecutive_empty(), 1);
    }

    #[tokio::test]
    async fn test_movie_page() {
        let fetcher = FakeFetcher::default().page(
            &format!("{}/title/tt0000001/soundtrack", BASE),
            &soundtrack_page("Main Theme", "Music by <a href='/name/nm0000001/'>John Doe</a>"),
        );
        let service = SoundtrackService::with_fetcher(fetcher, config());

        let soundtracks = service.soundtracks("0000001").await.unwrap();
        assert_eq!(soundtracks.len(), 1);
        assert_eq!(soundtracks[0].artists[0].imdb_id.as_deref(), Some("nm0000001"));
        assert_eq!(service.api().fetcher().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_movie_page_error_propagates() {
        let service = SoundtrackService::with_fetcher(FakeFetcher::default(), config());
        let err = service.soundtracks("tt0000001").await.unwrap_err();
        assert!(matches!(err, SoundtrackError::HttpStatus { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_episode_walk_stops_after_five_empty_episodes() {
        let episodes = ["tt1000001", "tt1000002", "tt1000003", "tt1000004", "tt1000005", "tt1000006"];
        let mut fetcher = FakeFetcher::default()
            .page(&format!("{}/title/tt0000001/soundtrack", BASE), "<html></html>")
            .page(&format!("{}/title/tt0000001/episodes?season=1", BASE), &season_page(&episodes));
        for id in episodes {
            fetcher = fetcher.page(&format!("{}/title/{}/soundtrack", BASE, id), "<html></html>");
        }
        let service = SoundtrackService::with_fetcher(fetcher, config());

        let soundtracks = service.soundtracks("tt0000001").await.unwrap();
        assert!(soundtracks.is_empty());

        let requests = service.api().fetcher().requests();
        // title page, season 1, then five episodes and nothing more
        assert_eq!(requests.len(), 7);
        assert_eq!(requests.last().unwrap(), &format!("{}/title/tt1000005/soundtrack", BASE));
    }

    #[tokio::test]
    async fn test_episode_walk_collects_across_seasons() {
        let fetcher = FakeFetcher::default()
            .page(&format!("{}/title/tt0000001/soundtrack", BASE), "<html></html>")
            .page(&format!("{}/title/tt0000001/episodes?season=1", BASE), &season_page(&["tt1000001"]))
            .page(&format!("{}/title/tt0000001/episodes?season=2", BASE), &season_page(&["tt2000001"]))
            .page(
                &format!("{}/title/tt1000001/soundtrack", BASE),
                &soundtrack_page("Opening", "Performed by Jane Roe"),
            )
            .page(
                &format!("{}/title/tt2000001/soundtrack", BASE),
                &soundtrack_page("Closing", "Written by A, and B"),
            );
        let mut service = SoundtrackService::with_fetcher(fetcher, config());
        service.set_max_empty_episodes(0);

        // Season 3 is missing: the walk ends there and keeps what it has.
        let soundtracks = service.soundtracks("tt0000001").await.unwrap();
        let names: Vec<_> = soundtracks.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Opening", "Closing"]);
        assert_eq!(soundtracks[1].artists.len(), 2);
    }

    #[tokio::test]
    async fn test_episode_walk_first_season_error_propagates() {
        let fetcher = FakeFetcher::default()
            .page(&format!("{}/title/tt0000001/soundtrack", BASE), "<html></html>");
        let service = SoundtrackService::with_fetcher(fetcher, config());
        assert!(service.soundtracks("tt0000001").await.is_err());
    }

    #[tokio::test]
    async fn test_failed_episode_counts_as_empty() {
        let fetcher = FakeFetcher::default()
            .page(&format!("{}/title/tt0000001/soundtrack", BASE), "<html></html>")
            .page(
                &format!("{}/title/tt0000001/episodes?season=1", BASE),
                &season_page(&["tt1000001", "tt1000002"]),
            );
        let mut service = SoundtrackService::with_fetcher(fetcher, config());
        service.set_max_empty_episodes(1);

        let soundtracks = service.soundtracks("tt0000001").await.unwrap();
        assert!(soundtracks.is_empty());
        assert_eq!(service.api().fetcher().requests().len(), 4);
    }

    #[tokio::test]
    async fn test_images_are_looked_up_once() {
        let line = "Written and Performed by <a href=\"/name/nm0000001/\">John Doe</a>";
        let fetcher = FakeFetcher::default()
            .page(
                &format!("{}/title/tt0000001/soundtrack", BASE),
                &soundtrack_page("Main Theme", line),
            )
            .page(
                &format!("{}/name/nm0000001/", BASE),
                r#"<img id="name-poster" src="http://img.test/john.jpg">"#,
            );
        let service = SoundtrackService::with_fetcher(fetcher, config().with_images(true));

        let soundtracks = service.soundtracks("tt0000001").await.unwrap();
        let artists = &soundtracks[0].artists;
        assert_eq!(artists.len(), 2);
        assert!(artists
            .iter()
            .all(|a| a.image.as_deref() == Some("http://img.test/john.jpg")));

        let portrait_requests = service
            .api()
            .fetcher()
            .requests()
            .iter()
            .filter(|url| url.contains("/name/"))
            .count();
        assert_eq!(portrait_requests, 1);
    }

    #[tokio::test]
    async fn test_missing_portrait_is_not_an_error() {
        let fetcher = FakeFetcher::default().page(
            &format!("{}/title/tt0000001/soundtrack", BASE),
            &soundtrack_page("Main Theme", "Music by <a href='/name/nm0000001/'>John Doe</a>"),
        );
        let service = SoundtrackService::with_fetcher(fetcher, config().with_images(true));

        let soundtracks = service.soundtracks("tt0000001").await.unwrap();
        assert_eq!(soundtracks[0].artists[0].image, None);
    }
}
