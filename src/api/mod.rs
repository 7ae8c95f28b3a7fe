//! Network side of the scraper.
//!
//! This module provides:
//! - [`PageFetcher`]: the page-fetching seam, with [`HttpFetcher`] over `reqwest`
//! - [`ImdbApi`]: URL layout and per-page parsing for the IMDb pages in use

pub mod fetcher;
pub mod imdb;

pub use fetcher::{HttpFetcher, PageFetcher};
pub use imdb::ImdbApi;
