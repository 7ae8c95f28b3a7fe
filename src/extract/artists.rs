//! Splitting credit lines into artists and resolving each one.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::text::{clean_text, normalize_conjunctions, strip_qualifier};
use crate::document::{Document, QueryNode};
use crate::models::{Artist, Role};

lazy_static! {
    /// `<lead-in> by <artist list>`, split at the first standalone "by".
    static ref CREDIT_LINE_RE: Regex = Regex::new(r"(?s)^(.*?)\sby\s(.*)$").expect("Regex error");
    static ref NAME_ID_RE: Regex = Regex::new(r"/name/([^/]+)/").expect("Regex error");
}

const UNCREDITED: &str = "(uncredited)";

/// Split-parts of an ampersand list that are never names.
const AMPERSAND_NOISE: &[&str] = &["feat.", "/"];

/// Stage-name qualifiers such as "(as Johnny" left over after splitting.
const STAGE_NAME_MARKER: &str = "(as";

/// Ensembles credited without a lead name.
const CHORUS: &str = "chorus";

/// Split the markup of one credit line into cleaned artist tokens.
///
/// Returns `None` when the line has no `… by …` shape at all. Tokens may
/// still contain anchor markup; see [`resolve_token`].
pub fn split_credit_line(markup: &str) -> Option<Vec<String>> {
    let caps = CREDIT_LINE_RE.captures(markup)?;
    let list = normalize_conjunctions(&caps[2]);

    let tokens = list
        .split(',')
        .map(clean_text)
        .filter(|token| !token.is_empty() && !token.contains(UNCREDITED))
        .collect();
    Some(tokens)
}

/// Resolve one token into zero or more artists with the given role.
///
/// * no links: a single plain-text name, unless it joins several names
///   with `&` and cannot be split reliably;
/// * links next to an escaped ampersand: the plain-text names beside
///   the links, followed by every linked artist;
/// * links otherwise: one artist per link.
pub fn resolve_token(token: &str, role: Role) -> Vec<Artist> {
    let fragment = Document::fragment(token);
    let artists = resolve_fragment(&fragment.root(), token.contains("&amp;"), role);
    artists
}

fn resolve_fragment<N: QueryNode>(root: &N, escaped_ampersand: bool, role: Role) -> Vec<Artist> {
    let links = root.find("a");
    let text = root.text();

    if links.is_empty() {
        if text.contains('&') {
            // e.g. "Paddy Nash & The Happy Enchiladas": person or band?
            debug!("Skipping ambiguous ampersand credit {:?}", text.trim());
            return Vec::new();
        }
        return plain_artist(&text, role).into_iter().collect();
    }

    let mut artists = Vec::new();
    if escaped_ampersand {
        let link_texts: Vec<String> = links.iter().map(|link| link.text()).collect();
        artists.extend(ampersand_artists(&text, &link_texts, role));
    }
    artists.extend(links.iter().filter_map(|link| linked_artist(link, role)));
    artists
}

/// Recover plain-text names sitting beside links in an `&` list.
///
/// `"<a>John Smith</a> & Jane Doe"` yields `Jane Doe`; the linked names
/// are removed from the text first. Links whose own text contains `&`
/// are left in place and split like plain text.
pub fn ampersand_artists(text: &str, link_texts: &[String], role: Role) -> Vec<Artist> {
    let mut remainder = text.to_string();
    for link_text in link_texts.iter().filter(|t| !t.contains('&')) {
        remainder = remainder.replacen(link_text.as_str(), "", 1).trim().to_string();
    }

    remainder
        .split('&')
        .map(str::trim)
        .filter(|part| !part.is_empty() && !AMPERSAND_NOISE.contains(part))
        .filter(|part| !part.contains(STAGE_NAME_MARKER))
        .filter_map(|part| plain_artist(part, role))
        .collect()
}

/// Build an unlinked artist from free text.
fn plain_artist(text: &str, role: Role) -> Option<Artist> {
    let name = strip_qualifier(text);
    if name.is_empty() || name == CHORUS {
        return None;
    }
    Some(Artist::new(name, role))
}

/// Build an artist from a profile link.
///
/// A link without an href keeps its name and no id; a link whose href
/// has no `/name/<id>/` segment is dropped.
fn linked_artist<N: QueryNode>(link: &N, role: Role) -> Option<Artist> {
    let name = link.text().trim().to_string();
    match link.attribute("href") {
        None => Some(Artist::new(name, role)),
        Some(href) => match artist_id_from_href(&href) {
            Some(id) => Some(Artist::linked(name, role, id)),
            None => {
                debug!("No artist id in link {:?} for {:?}", href, name);
                None
            }
        },
    }
}

/// Extract the `nm…` id from a profile href such as `/name/nm0000001/?ref_=x`.
pub fn artist_id_from_href(href: &str) -> Option<String> {
    NAME_ID_RE
        .captures(href)
        .map(|caps| caps[1].to_string())
        .filter(|id| !id.is_empty())
}
