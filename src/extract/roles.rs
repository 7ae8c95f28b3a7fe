//! Credit line role classification.
//!
//! Each rule pairs a set of phrases with the role they signal. Rules are
//! evaluated independently and in table order, so one line can carry
//! several roles ("Written and performed by …").

use crate::models::Role;

/// Lines containing this phrase are licensing notes, not credits.
const LICENSING_PHRASE: &str = "by arrangement";

/// Ordered (phrases, role) table.
const ROLE_RULES: &[(&[&str], Role)] = &[
    (&["performed"], Role::Performer),
    (&["written", "lyrics"], Role::Writer),
    (&["produced by"], Role::Producer),
    (&["arranged by"], Role::MusicArranger),
    (&["music by", "composed by"], Role::Composer),
];

/// A bare "by …" line credits the composer.
const FALLBACK_PREFIX: &str = "by";
const FALLBACK_ROLE: Role = Role::Composer;

/// Map the text of a credit line to the roles it names.
///
/// An empty result means the line is not a credit line.
pub fn classify(line: &str) -> Vec<Role> {
    let line = line.trim().to_lowercase();
    if line.contains(LICENSING_PHRASE) {
        return Vec::new();
    }

    let mut roles: Vec<Role> = ROLE_RULES
        .iter()
        .filter(|(phrases, _)| phrases.iter().any(|p| line.contains(*p)))
        .map(|(_, role)| *role)
        .collect();

    if roles.is_empty() && line.starts_with(FALLBACK_PREFIX) {
        roles.push(FALLBACK_ROLE);
    }
    roles
}
