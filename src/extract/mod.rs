//! Soundtrack credit extraction.
//!
//! Turns a parsed soundtrack page into [`Soundtrack`] records. Each
//! entry is processed on its own:
//!
//! 1. read the song title;
//! 2. classify every credit line by role ([`roles::classify`]);
//! 3. split the "… by …" clause into tokens ([`artists::split_credit_line`]);
//! 4. resolve tokens into artists ([`artists::resolve_token`]);
//! 5. merge them into the entry ([`Soundtrack::add_artist`]).
//!
//! Extraction never fails. Markup that does not fit is skipped, so the
//! worst case is an empty result.

pub mod artists;
pub mod roles;
pub mod text;

use tracing::debug;

use crate::document::QueryNode;
use crate::models::Soundtrack;

/// Container of the soundtrack entries; only the first one is read.
pub const SOUNDTRACK_LIST_SELECTOR: &str = ".ipc-metadata-list";
/// One soundtrack entry inside the list.
pub const ENTRY_SELECTOR: &str = "li";
/// Song title inside an entry.
pub const TITLE_SELECTOR: &str = ".ipc-metadata-list-item__label";
/// One credit line inside an entry.
pub const CREDIT_LINE_SELECTOR: &str = ".ipc-html-content-inner-div";

/// Knobs for extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Resolve credits of entries that have no title.
    pub keep_untitled: bool,
}

/// Extract every credited soundtrack from a page.
///
/// Entries without any resolved artist are left out.
pub fn extract_soundtracks<N: QueryNode>(page: &N) -> Vec<Soundtrack> {
    extract_soundtracks_with(page, ExtractOptions::default())
}

/// [`extract_soundtracks`] with explicit options.
pub fn extract_soundtracks_with<N: QueryNode>(page: &N, options: ExtractOptions) -> Vec<Soundtrack> {
    let Some(list) = page.first(SOUNDTRACK_LIST_SELECTOR) else {
        debug!("No soundtrack list on page");
        return Vec::new();
    };

    let soundtracks: Vec<Soundtrack> = list
        .find(ENTRY_SELECTOR)
        .iter()
        .map(|entry| extract_entry(entry, options))
        .filter(Soundtrack::has_artists)
        .collect();

    debug!("Extracted {} soundtracks", soundtracks.len());
    soundtracks
}

/// Build the soundtrack for one entry node.
///
/// The result may have no artists; callers decide whether to keep it.
pub fn extract_entry<N: QueryNode>(entry: &N, options: ExtractOptions) -> Soundtrack {
    let title: String = entry.find(TITLE_SELECTOR).iter().map(|n| n.text()).collect();
    let mut soundtrack = Soundtrack::new(title.trim());
    if soundtrack.name.is_empty() && !options.keep_untitled {
        return soundtrack;
    }

    for line in entry.find(CREDIT_LINE_SELECTOR) {
        add_credit_line(&mut soundtrack, &line);
    }
    soundtrack
}

/// Resolve one credit line into the soundtrack's artist set.
fn add_credit_line<N: QueryNode>(soundtrack: &mut Soundtrack, line: &N) {
    let roles = roles::classify(&line.text());
    if roles.is_empty() {
        return;
    }

    let markup = line.inner_html();
    let Some(tokens) = artists::split_credit_line(&markup) else {
        debug!("Credit line without a 'by' clause: {:?}", markup);
        return;
    };

    for role in roles {
        for token in &tokens {
            for artist in artists::resolve_token(token, role) {
                soundtrack.add_artist(artist);
            }
        }
    }
}
