//! Recursive corpus scan.
//!
//! Walks every root area depth-first and records each area or route whose
//! match projection contains the subject's projection (case-insensitive).
//!
//! While walking, the scanner remembers how it reached each match: the chain
//! of areas from the root down to the match's direct parent. Those
//! back-references live in a per-search side map owned by the [`Scanner`],
//! never on the shared corpus, so concurrent searches over one corpus do not
//! interfere.
//!
//! ```text
//! Kentucky ─┬─ Red River Gorge ─┬─ Muir Valley ── route "Send Me On My Way"
//!           │                   └─ ...
//!           └─ ...
//!
//! ancestors["send-me-on-my-way"] = [Kentucky, Red River Gorge, Muir Valley]
//! ```

use super::decompose::MatchText;
use crate::model::{Area, EntityRef};
use crate::normalize::contains_ci;
use std::collections::HashMap;

/// Structural filters applied to raw scan matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct KindFilter {
    pub only_areas: bool,
    pub only_routes: bool,
}

impl KindFilter {
    pub fn accepts(&self, entity: &EntityRef<'_>) -> bool {
        !(self.only_routes && !entity.is_route()) && !(self.only_areas && !entity.is_area())
    }
}

/// Scan state for one search call.
#[derive(Debug, Default)]
pub(crate) struct Scanner<'a> {
    /// Entity id -> areas from the root to the direct parent.
    ancestors: HashMap<&'a str, Vec<&'a Area>>,
    /// Nodes visited across all scans of this call.
    visited: usize,
}

impl<'a> Scanner<'a> {
    pub fn new() -> Self {
        Scanner::default()
    }

    /// Every entity under `roots` whose projection contains `subject`'s.
    ///
    /// A blank subject matches nothing.
    pub fn scan(&mut self, roots: &'a [Area], subject: &MatchText) -> Vec<EntityRef<'a>> {
        let mut matches = Vec::new();
        if subject.is_blank() {
            return matches;
        }

        let needle = subject.for_match().to_lowercase();
        let mut chain: Vec<&'a Area> = Vec::new();
        for root in roots {
            self.walk(root, &needle, &mut chain, &mut matches);
        }
        matches
    }

    fn walk(&mut self, area: &'a Area, needle: &str, chain: &mut Vec<&'a Area>, out: &mut Vec<EntityRef<'a>>) {
        self.visited += 1;
        if projection_contains(area.info.name_for_match(), needle) {
            self.remember(area.info.id(), chain);
            out.push(EntityRef::Area(area));
        }

        chain.push(area);
        for sub in &area.sub_areas {
            self.walk(sub, needle, chain, out);
        }
        for route in &area.routes {
            self.visited += 1;
            if projection_contains(route.info.name_for_match(), needle) {
                self.remember(route.info.id(), chain);
                out.push(EntityRef::Route(route));
            }
        }
        chain.pop();
    }

    /// Record the chain for `id` unless an earlier scan of this call already did.
    fn remember(&mut self, id: &'a str, chain: &[&'a Area]) {
        self.ancestors.entry(id).or_insert_with(|| chain.to_vec());
    }

    /// Ancestors of `entity` discovered during this call, root-most first.
    pub fn ancestors_of(&self, entity: &EntityRef<'a>) -> &[&'a Area] {
        self.ancestors.get(entity.id()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The root-most ancestor of `entity` whose projection contains `location`'s.
    pub fn locate(&self, entity: &EntityRef<'a>, location: &MatchText) -> Option<&'a Area> {
        self.ancestors_of(entity).iter().copied().find(|a| contains_ci(a.info.name_for_match(), location.for_match()))
    }

    pub fn visited(&self) -> usize {
        self.visited
    }
}

fn projection_contains(name_for_match: &str, lowered_needle: &str) -> bool {
    name_for_match.to_lowercase().contains(lowered_needle)
}
