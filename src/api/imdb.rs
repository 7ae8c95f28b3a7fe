//! IMDb page client.
//!
//! Knows the site's URL layout and which page yields what: soundtrack
//! listings, season episode lists and artist portraits. Parsing of the
//! soundtrack listing itself is delegated to [`crate::extract`].

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

use super::fetcher::PageFetcher;
use crate::document::{Document, QueryNode};
use crate::error::{Result, SoundtrackError};
use crate::extract::{self, ExtractOptions};
use crate::models::Soundtrack;

lazy_static! {
    static ref TITLE_ID_RE: Regex = Regex::new(r"tt[0-9]{7,}").expect("Regex error");
}

/// One episode card on a season page.
const EPISODE_SELECTOR: &str = ".episode-item-wrapper";

/// Portrait image on an artist's profile page.
const PORTRAIT_SELECTOR: &str = "#name-poster";

/// Normalize a title id, adding the `tt` prefix when missing.
///
/// # Errors
///
/// Returns `InvalidTitleId` for empty ids or ids with anything but
/// ASCII letters and digits.
pub fn normalize_title_id(raw: &str) -> Result<String> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(SoundtrackError::InvalidTitleId(raw.to_string()));
    }
    if raw.contains("tt") {
        Ok(raw.to_string())
    } else {
        Ok(format!("tt{}", raw))
    }
}

/// Find the title id inside an episode link such as `/title/tt1234567/?ref_=x`.
pub fn title_id_from_href(href: &str) -> Option<String> {
    TITLE_ID_RE.find(href).map(|m| m.as_str().to_string())
}

/// Client for the IMDb pages the scraper reads.
#[derive(Debug, Clone)]
pub struct ImdbApi<F> {
    fetcher: F,
    base_url: String,
    options: ExtractOptions,
}

impl<F: PageFetcher> ImdbApi<F> {
    /// Create a client reading pages below `base_url`.
    pub fn new<S: Into<String>>(fetcher: F, base_url: S) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
            options: ExtractOptions::default(),
        }
    }

    /// Set the extraction options used for soundtrack pages.
    pub fn set_options(&mut self, options: ExtractOptions) {
        self.options = options;
    }

    /// The underlying fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// URL of a title's soundtrack page.
    pub fn soundtrack_url(&self, title_id: &str) -> String {
        format!("{}/title/{}/soundtrack", self.base_url, title_id)
    }

    /// URL of one season's episode list.
    pub fn season_url(&self, title_id: &str, season: u32) -> String {
        format!("{}/title/{}/episodes?season={}", self.base_url, title_id, season)
    }

    /// URL of an artist's profile page.
    pub fn artist_url(&self, artist_id: &str) -> String {
        format!("{}/name/{}/", self.base_url, artist_id)
    }

    /// Fetch a title's soundtrack page and extract its credits.
    pub async fn get_soundtracks(&self, title_id: &str) -> Result<Vec<Soundtrack>> {
        let html = self.fetcher.fetch(&self.soundtrack_url(title_id)).await?;
        let soundtracks = parse_soundtracks(&html, self.options);
        debug!("{}: {} soundtracks", title_id, soundtracks.len());
        Ok(soundtracks)
    }

    /// Fetch one season page and list its episodes.
    ///
    /// Each item is the episode's title id, or `None` when the card has
    /// no usable link.
    pub async fn get_season_episodes(&self, title_id: &str, season: u32) -> Result<Vec<Option<String>>> {
        let html = self.fetcher.fetch(&self.season_url(title_id, season)).await?;
        Ok(parse_episode_ids(&html))
    }

    /// Look up an artist's portrait URL.
    ///
    /// Failures are logged and reported as no image.
    pub async fn get_artist_image(&self, artist_id: &str) -> Option<String> {
        match self.fetcher.fetch(&self.artist_url(artist_id)).await {
            Ok(html) => parse_portrait(&html),
            Err(e) => {
                warn!("Could not fetch portrait for {}: {}", artist_id, e);
                None
            }
        }
    }
}

fn parse_soundtracks(html: &str, options: ExtractOptions) -> Vec<Soundtrack> {
    let doc = Document::parse(html);
    let soundtracks = extract::extract_soundtracks_with(&doc.root(), options);
    soundtracks
}

fn parse_episode_ids(html: &str) -> Vec<Option<String>> {
    let doc = Document::parse(html);
    let ids = doc
        .root()
        .find(EPISODE_SELECTOR)
        .iter()
        .map(|episode| {
            episode
                .first("a")
                .and_then(|link| link.attribute("href"))
                .and_then(|href| title_id_from_href(&href))
        })
        .collect();
    ids
}

fn parse_portrait(html: &str) -> Option<String> {
    let doc = Document::parse(html);
    let src = doc
        .root()
        .first(PORTRAIT_SELECTOR)
        .and_then(|img| img.attribute("src"))
        .filter(|src| !src.is_empty());
    src
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_title_id() {
        assert_eq!(normalize_title_id("tt5626004").unwrap(), "tt5626004");
        assert_eq!(normalize_title_id("5626004").unwrap(), "tt5626004");
        assert_eq!(normalize_title_id(" tt5626004 ").unwrap(), "tt5626004");
        assert!(matches!(
            normalize_title_id(""),
            Err(SoundtrackError::InvalidTitleId(_))
        ));
        assert!(matches!(
            normalize_title_id("tt123/../x"),
            Err(SoundtrackError::InvalidTitleId(_))
        ));
    }

    #[test]
    fn test_title_id_from_href() {
        assert_eq!(
            title_id_from_href("/title/tt10164206/?ref_=ttep_ep1"),
            Some("tt10164206".to_string())
        );
        assert_eq!(title_id_from_href("/title/tt123/"), None);
    }

    #[test]
    fn test_parse_episode_ids() {
        let html = r#"
            <div class="episode-item-wrapper"><a href="/title/tt0000001/?ref_=ttep_ep1">Pilot</a></div>
            <div class="episode-item-wrapper"><span>No link</span></div>
            <div class="episode-item-wrapper"><a href="/title/tt0000003/">Third</a><a href="/title/tt9999999/">x</a></div>
        "#;
        assert_eq!(
            parse_episode_ids(html),
            vec![
                Some("tt0000001".to_string()),
                None,
                Some("tt0000003".to_string())
            ]
        );
    }

    #[test]
    fn test_parse_portrait() {
        let html = r#"<img id="name-poster" src="https://m.media-amazon.com/images/a.jpg">"#;
        assert_eq!(
            parse_portrait(html),
            Some("https://m.media-amazon.com/images/a.jpg".to_string())
        );
        assert_eq!(parse_portrait("<img id=\"other\" src=\"x.jpg\">"), None);
    }
}
