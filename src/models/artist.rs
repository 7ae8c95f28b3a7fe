//! Artist credit models.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{empty_as_none, none_as_empty};

/// Canonical role an artist plays on a soundtrack entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Sang or played the song.
    #[serde(rename = "performer")]
    Performer,
    /// Wrote the song or its lyrics.
    #[serde(rename = "writer")]
    Writer,
    /// Produced the recording.
    #[serde(rename = "producer")]
    Producer,
    /// Arranged the music.
    #[serde(rename = "music arranger")]
    MusicArranger,
    /// Composed the music.
    #[serde(rename = "composer")]
    Composer,
}

impl Role {
    /// Label used in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Performer => "performer",
            Role::Writer => "writer",
            Role::Producer => "producer",
            Role::MusicArranger => "music arranger",
            Role::Composer => "composer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One credited artist.
///
/// Two artists are the same credit when name, role and IMDb id all
/// match. The portrait URL is enrichment and does not take part in
/// deduplication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    /// Display name as credited.
    pub name: String,

    /// Role on this entry.
    pub role: Role,

    /// IMDb name id (`nm…`), only for linked credits.
    #[serde(
        rename = "imdbID",
        serialize_with = "none_as_empty",
        deserialize_with = "empty_as_none",
        default
    )]
    pub imdb_id: Option<String>,

    /// Portrait URL from the artist's profile page.
    #[serde(
        rename = "image",
        serialize_with = "none_as_empty",
        deserialize_with = "empty_as_none",
        default
    )]
    pub image: Option<String>,
}

impl Artist {
    /// Create an artist credited in plain text.
    pub fn new<S: Into<String>>(name: S, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
            imdb_id: None,
            image: None,
        }
    }

    /// Create an artist resolved from a linked profile.
    pub fn linked<S1: Into<String>, S2: Into<String>>(name: S1, role: Role, imdb_id: S2) -> Self {
        Self {
            imdb_id: Some(imdb_id.into()),
            ..Self::new(name, role)
        }
    }

    /// Whether this credit came from a profile link.
    pub fn is_linked(&self) -> bool {
        self.imdb_id.is_some()
    }
}

impl PartialEq for Artist {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.role == other.role && self.imdb_id == other.imdb_id
    }
}

impl Eq for Artist {}
