//! Query decomposition.
//!
//! Free-form text rarely names just one thing. "Send me on my way at Red River
//! Gorge" names a route *and* where it is. This module guesses which part of
//! the text is the subject and which part is a location hint, producing an
//! ordered list of candidate pairs:
//!
//! ```text
//! "Send me on my way at Red River Gorge"
//!   0: ("Send me on my way at Red River Gorge", "")      whole text, no location
//!   1: ("Send me",           "my way at Red River Gorge") split at " on "
//!   2: ("Send me on my way", "Red River Gorge")           split at " at "
//!
//! "Moonstone, Arizona"
//!   0: ("Moonstone, Arizona", "")
//!   1: ("Moonstone", "Arizona")                           split at first comma
//! ```
//!
//! ## Design notes
//!
//! - This is a *heuristic* split. Wrong guesses are cheap because every pair is
//!   searched and the best result across pairs wins.
//! - Connector words are only recognized between whitespace, so "Onsight" or
//!   "Ofu" never split.
//! - Purely textual: no corpus access, deterministic, no side effects.

use crate::normalize::match_filter;

/// A piece of query text together with its match projection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchText {
    text: String,
    for_match: String,
}

impl MatchText {
    pub fn new(text: &str) -> Self {
        MatchText { text: text.to_string(), for_match: match_filter(text) }
    }

    /// The text as supplied.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Letters-only projection of [`text`](Self::text).
    pub fn for_match(&self) -> &str {
        &self.for_match
    }

    /// True when the projection has nothing to match on.
    pub fn is_blank(&self) -> bool {
        self.for_match.is_empty()
    }
}

/// One (subject, location) guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPair {
    pub subject: MatchText,
    pub location: MatchText,
}

impl QueryPair {
    pub fn new(subject: &str, location: &str) -> Self {
        QueryPair { subject: MatchText::new(subject), location: MatchText::new(location) }
    }

    /// True when the pair restricts matches to a location.
    pub fn has_location(&self) -> bool {
        !self.location.is_blank()
    }
}

/// Split `query` into candidate (subject, location) pairs, least precise first.
///
/// With a `forced_location` the text is never split: exactly one pair
/// `(query, forced_location)` is returned.
pub fn decompose(query: &str, forced_location: Option<&str>) -> Vec<QueryPair> {
    if let Some(location) = forced_location {
        return vec![QueryPair::new(query, location)];
    }

    let mut pairs = vec![QueryPair::new(query, "")];

    if let Some((subject, location)) = query.split_once(',') {
        pairs.push(QueryPair::new(subject.trim(), location.trim()));
        return pairs;
    }

    for (start, end) in connector_splits(query) {
        pairs.push(QueryPair::new(query[..start].trim(), query[end..].trim()));
    }

    pairs
}

/// Byte spans `[start, end)` of every whitespace-delimited connector word
/// ("of", "on", "at", "in"), including the surrounding whitespace, scanned left
/// to right. Spans may share whitespace: "a of in b" yields two.
fn connector_splits(query: &str) -> Vec<(usize, usize)> {
    let word = regex!(r"^(?i:of|on|at|in)\s");

    let mut splits = Vec::new();
    for (idx, c) in query.char_indices() {
        if !c.is_whitespace() {
            continue;
        }
        let after = idx + c.len_utf8();
        if let Some(m) = word.find(&query[after..]) {
            splits.push((idx, after + m.end()));
        }
    }
    splits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(pairs: &[QueryPair]) -> Vec<(&str, &str)> {
        pairs.iter().map(|p| (p.subject.text(), p.location.text())).collect()
    }

    #[test]
    fn splits_at_each_connector_in_order() {
        let pairs = decompose("Send me on my way at Red River Gorge", None);
        assert_eq!(
            texts(&pairs),
            vec![
                ("Send me on my way at Red River Gorge", ""),
                ("Send me", "my way at Red River Gorge"),
                ("Send me on my way", "Red River Gorge"),
            ]
        );
    }

    #[test]
    fn comma_wins_over_connectors() {
        let pairs = decompose("Moonstone in the sun, Arizona", None);
        assert_eq!(texts(&pairs), vec![("Moonstone in the sun, Arizona", ""), ("Moonstone in the sun", "Arizona")]);
    }

    #[test]
    fn connectors_are_case_insensitive_and_whole_words() {
        let pairs = decompose("Onsight Crack AT Index", None);
        assert_eq!(texts(&pairs), vec![("Onsight Crack AT Index", ""), ("Onsight Crack", "Index")]);

        let pairs = decompose("Infinite Bliss", None);
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn adjacent_connectors_each_split() {
        let pairs = decompose("a of in b", None);
        assert_eq!(texts(&pairs), vec![("a of in b", ""), ("a", "in b"), ("a of", "b")]);
    }

    #[test]
    fn forced_location_is_the_only_pair() {
        let pairs = decompose("Moonstone at Joshua Tree", Some("Arizona"));
        assert_eq!(texts(&pairs), vec![("Moonstone at Joshua Tree", "Arizona")]);
        assert!(pairs[0].has_location());
    }

    #[test]
    fn empty_query_yields_the_trivial_pair() {
        let pairs = decompose("", None);
        assert_eq!(texts(&pairs), vec![("", "")]);
        assert!(pairs[0].subject.is_blank());
        assert!(!pairs[0].has_location());
    }

    #[test]
    fn pairs_carry_match_projections() {
        let pairs = decompose("Tom's Thumb, Arizona", None);
        assert_eq!(pairs[1].subject.for_match(), "TomsThumb");
        assert_eq!(pairs[1].location.for_match(), "Arizona");
    }
}
