//! Text cleanup for credit tokens.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `[link: …]` placeholders left in scraped credit text.
    static ref LINK_MARKER_RE: Regex = Regex::new(r"\[link: .*\]").expect("Regex error");
    /// Line breaks and "Label: " separators.
    static ref BREAK_RE: Regex = Regex::new(r"<br\s*/?>|:\s").expect("Regex error");
    static ref ASIDE_RE: Regex = Regex::new(r"\(.*?\)").expect("Regex error");
    /// `Name (qualifier)`, keeping only the name.
    static ref QUALIFIER_RE: Regex = Regex::new(r"(.*) \(.*\)").expect("Regex error");
}

/// Clean one raw credit token.
///
/// Removes link markers, line breaks, `": "` separators and every
/// parenthetical aside, then trims. An empty result means the token
/// carries nothing worth resolving.
pub fn clean_text(text: &str) -> String {
    let text = text.trim();
    let text = LINK_MARKER_RE.replace_all(text, "");
    let text = BREAK_RE.replace_all(&text, "");
    let text = ASIDE_RE.replace_all(&text, "");
    text.trim().to_string()
}

/// Strip a trailing `(qualifier)` from a plain-text artist name.
pub fn strip_qualifier(name: &str) -> String {
    QUALIFIER_RE.replace_all(name, "${1}").trim().to_string()
}

/// Rewrite `", and "` as `", "` so an artist list splits cleanly on commas.
///
/// Runs to a fixed point, so `", and and "` collapses fully. Ampersands
/// are left alone; they are handled per token.
pub fn normalize_conjunctions(list: &str) -> String {
    let mut list = list.to_string();
    while list.contains(", and ") {
        list = list.replace(", and ", ", ");
    }
    list
}
