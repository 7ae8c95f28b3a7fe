//! # Soundtracks
//!
//! A Rust library for extracting soundtrack credits from IMDb.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use soundtracks::{ScraperConfig, SoundtrackService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = SoundtrackService::new(ScraperConfig::default())?;
//!
//!     // Movie: reads /title/tt7286456/soundtrack
//!     for soundtrack in service.soundtracks("tt7286456").await? {
//!         println!("{}: {}", soundtrack.name, soundtrack.artists_string(", "));
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Extraction only
//!
//! The credit parser works on already-fetched HTML and does no I/O:
//!
//! ```rust
//! use soundtracks::{extract_soundtracks, Document, Role};
//!
//! let html = r#"<ul class="ipc-metadata-list"><li>
//!     <span class="ipc-metadata-list-item__label">Main Theme</span>
//!     <div class="ipc-html-content-inner-div">Music by <a href="/name/nm0000001/">John Doe</a></div>
//! </li></ul>"#;
//!
//! let doc = Document::parse(html);
//! let soundtracks = extract_soundtracks(&doc.root());
//! assert_eq!(soundtracks[0].artists[0].role, Role::Composer);
//! ```
//!
//! ## Modules
//!
//! - [`extract`] - Credit line classification, splitting and resolution
//! - [`document`] - Queryable node interface over parsed HTML
//! - [`api`] - Page fetching and IMDb URL layout
//! - [`models`] - Soundtrack and artist records

pub mod api;
pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod models;
mod service;

// Main interface (recommended)
pub use service::{EpisodeTally, SoundtrackService};

pub use api::{HttpFetcher, ImdbApi, PageFetcher};
pub use config::ScraperConfig;
pub use document::{Document, QueryNode};
pub use error::SoundtrackError;
pub use extract::{extract_soundtracks, ExtractOptions};
pub use models::{Artist, Role, Soundtrack};
