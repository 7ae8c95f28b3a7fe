//! Soundtrack entry model.
//!
//! A [`Soundtrack`] owns its artist set and is the only place artists
//! are inserted, so name cleanup, orchestra filtering and
//! deduplication all happen in [`Soundtrack::add_artist`].

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::artist::Artist;

lazy_static! {
    static ref HIS_ORCHESTRA_RE: Regex =
        Regex::new(r"(?i)and his orchestra").expect("Regex error");
}

/// Ensemble credit with no lead name.
const CHORUS: &str = "chorus";

/// One song credited on a title's soundtrack page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Soundtrack {
    /// Song title.
    pub name: String,

    /// Credited artists, in order of first appearance.
    #[serde(rename = "Artists", default)]
    pub artists: Vec<Artist>,
}

impl Soundtrack {
    /// Create an entry with no artists yet.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            artists: Vec::new(),
        }
    }

    /// Insert an artist after canonicalizing its name.
    ///
    /// Returns `true` when the artist was added. Orchestra credits,
    /// a bare "chorus", empty names and exact duplicates are dropped.
    pub fn add_artist(&mut self, mut artist: Artist) -> bool {
        artist.name = canonical_name(&artist.name);
        if artist.name.is_empty() || artist.name == CHORUS || is_orchestra(&artist.name) {
            return false;
        }
        if self.artists.contains(&artist) {
            return false;
        }
        self.artists.push(artist);
        true
    }

    /// Whether any artist survived extraction.
    pub fn has_artists(&self) -> bool {
        !self.artists.is_empty()
    }

    /// Comma-joined artist names, e.g. for logging.
    pub fn artists_string(&self, separator: &str) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// Drop the "and his orchestra" suffix bandleaders are often credited with.
fn canonical_name(name: &str) -> String {
    HIS_ORCHESTRA_RE.replace_all(name, "").trim().to_string()
}

fn is_orchestra(name: &str) -> bool {
    name.to_lowercase().contains("orchestra")
}
