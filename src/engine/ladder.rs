//! Best-match selection.
//!
//! A scan usually returns many entities whose names merely *contain* the
//! query. The priority ladder picks one, stopping at the first non-empty tier:
//!
//! ```text
//! (1) ExactName           name == query                (case-insensitive)
//! (2) ExactProjection     name_for_match == projection (case-insensitive)
//! (3) NameContains        name ⊇ query
//! (4) ProjectionContains  name_for_match ⊇ projection
//! (5) Fallback            everything
//!        │
//!        └─▶ highest popularity in the tier wins
//! ```
//!
//! Literal names rank above projections because stripping punctuation can
//! collapse two different names onto one projection.

use super::decompose::MatchText;
use crate::model::EntityRef;
use crate::normalize::{contains_ci, eq_ci};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchTier {
    ExactName,
    ExactProjection,
    NameContains,
    ProjectionContains,
    Fallback,
}

impl MatchTier {
    const LADDER: [MatchTier; 5] = [
        MatchTier::ExactName,
        MatchTier::ExactProjection,
        MatchTier::NameContains,
        MatchTier::ProjectionContains,
        MatchTier::Fallback,
    ];

    fn admits(self, entity: &EntityRef<'_>, query: &MatchText) -> bool {
        match self {
            MatchTier::ExactName => eq_ci(entity.name(), query.text()),
            MatchTier::ExactProjection => eq_ci(entity.name_for_match(), query.for_match()),
            MatchTier::NameContains => contains_ci(entity.name(), query.text()),
            MatchTier::ProjectionContains => contains_ci(entity.name_for_match(), query.for_match()),
            MatchTier::Fallback => true,
        }
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchTier::ExactName => "exact name",
            MatchTier::ExactProjection => "exact projection",
            MatchTier::NameContains => "name contains",
            MatchTier::ProjectionContains => "projection contains",
            MatchTier::Fallback => "fallback",
        };
        f.write_str(label)
    }
}

/// Outcome of [`determine_best_match`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestMatch {
    /// Index of the winner in the candidate slice.
    pub index: usize,
    pub tier: MatchTier,
    /// Number of candidates in the winning tier.
    pub tier_size: usize,
    /// How far (in percent) the winner's popularity exceeds the runner-up's.
    /// `None` with a single candidate or a zero-popularity runner-up.
    pub margin: Option<f64>,
}

/// Pick the best of `candidates` for `query`; `None` when there are none.
///
/// Ties on popularity keep candidate order.
pub fn determine_best_match(candidates: &[EntityRef<'_>], query: &MatchText) -> Option<BestMatch> {
    if candidates.is_empty() {
        return None;
    }

    let (tier, mut tiered) = MatchTier::LADDER.iter().find_map(|&tier| {
        let admitted: Vec<usize> = (0..candidates.len()).filter(|&i| tier.admits(&candidates[i], query)).collect();
        (!admitted.is_empty()).then_some((tier, admitted))
    })?;

    tiered.sort_by(|&a, &b| candidates[b].popularity().cmp(&candidates[a].popularity()));

    let margin = match tiered.as_slice() {
        [first, second, ..] => popularity_margin(candidates[*first].popularity(), candidates[*second].popularity()),
        _ => None,
    };

    let winner = &candidates[tiered[0]];
    tracing::debug!(
        query = query.text(),
        winner = winner.name(),
        id = winner.id(),
        %tier,
        tier_size = tiered.len(),
        margin = ?margin,
        "best match"
    );

    Some(BestMatch { index: tiered[0], tier, tier_size: tiered.len(), margin })
}

/// `(first - second) / second * 100`, rounded to two decimals.
fn popularity_margin(first: u64, second: u64) -> Option<f64> {
    if second == 0 {
        return None;
    }
    let pct = (first as f64 - second as f64) / second as f64 * 100.0;
    Some((pct * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Area, EntityInfo};

    fn area(name: &str, popularity: u64) -> Area {
        Area::new(EntityInfo::new(name, name, popularity, Vec::new()))
    }

    fn pick<'a>(areas: &'a [Area], query: &str) -> Option<(&'a str, MatchTier)> {
        let refs: Vec<EntityRef<'a>> = areas.iter().map(EntityRef::Area).collect();
        determine_best_match(&refs, &MatchText::new(query)).map(|b| (refs[b.index].name(), b.tier))
    }

    #[test]
    fn exact_name_beats_popularity_from_lower_tiers() {
        let areas = [area("Northeast Ridges and Valleys", 1000), area("East Ridge", 10)];
        assert_eq!(pick(&areas, "East Ridge"), Some(("East Ridge", MatchTier::ExactName)));
        assert_eq!(pick(&areas, "east ridge"), Some(("East Ridge", MatchTier::ExactName)));
    }

    #[test]
    fn each_tier_is_reachable() {
        let areas = [area("Tom's Thumb", 1), area("Big Tom's Thumb Wall", 100)];
        assert_eq!(pick(&areas, "Toms Thumb"), Some(("Tom's Thumb", MatchTier::ExactProjection)));
        assert_eq!(pick(&areas, "Thumb Wall"), Some(("Big Tom's Thumb Wall", MatchTier::NameContains)));
        assert_eq!(pick(&areas, "thumbwall!"), Some(("Big Tom's Thumb Wall", MatchTier::ProjectionContains)));
        assert_eq!(pick(&areas, "zzz"), Some(("Big Tom's Thumb Wall", MatchTier::Fallback)));
    }

    #[test]
    fn popularity_breaks_ties_within_a_tier() {
        let areas = [area("Red River Gorge", 50), area("Red River Gorge", 100)];
        let refs: Vec<EntityRef<'_>> = areas.iter().map(EntityRef::Area).collect();
        let best = determine_best_match(&refs, &MatchText::new("Red River Gorge")).unwrap();
        assert_eq!(best.index, 1);
        assert_eq!(best.tier_size, 2);
        assert_eq!(best.margin, Some(100.0));
    }

    #[test]
    fn equal_popularity_keeps_candidate_order() {
        let areas = [area("Gorge A", 7), area("Gorge B", 7)];
        assert_eq!(pick(&areas, "Gorge"), Some(("Gorge A", MatchTier::NameContains)));
    }

    #[test]
    fn empty_candidates_yield_none() {
        assert_eq!(determine_best_match(&[], &MatchText::new("anything")), None);
    }

    #[test]
    fn margin_rounding_and_zero_runner_up() {
        assert_eq!(popularity_margin(4, 3), Some(33.33));
        assert_eq!(popularity_margin(3, 3), Some(0.0));
        assert_eq!(popularity_margin(5, 0), None);
    }
}
