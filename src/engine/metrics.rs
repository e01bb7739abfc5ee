//! Search run metrics.
//!
//! A small set of structs used to observe what a search did: which candidate
//! pairs were tried, how many matches each produced and kept, and how long
//! each took.
//!
//! - `Resolver::search` for normal operation.
//! - `Resolver::run_with_metrics` for debugging why a query resolved the way it
//!   did (the CLI report is built from these).

use super::ladder::MatchTier;
use crate::model::{Area, EntityRef};
use std::time::Duration;

#[derive(Debug, Default, Clone)]
pub struct SearchMetrics {
    /// Total elapsed time for the search.
    pub total: Duration,
    /// One entry per decomposed pair, in decomposition order.
    pub pairs: Vec<PairMetrics>,
    /// Whether the final unconstrained scan ran.
    pub fallback: bool,
    /// Nodes visited across every scan of this search.
    pub visited: usize,
}

/// What happened to one (subject, location) pair.
#[derive(Debug, Default, Clone)]
pub struct PairMetrics {
    pub subject: String,
    pub location: String,
    /// Entities whose projection contained the subject.
    pub matched: usize,
    /// Entities left after structural and location filters.
    pub kept: usize,
    /// Name of the pair's winner, if any.
    pub winner: Option<String>,
    pub tier: Option<MatchTier>,
    pub duration: Duration,
}

/// The winning pair of a search.
#[derive(Debug, Clone)]
pub struct PairOutcome<'a> {
    /// Index into the decomposed pairs; `None` for the fallback scan.
    pub pair_index: Option<usize>,
    pub best: EntityRef<'a>,
    pub tier: MatchTier,
    /// Ancestor that satisfied the pair's location, when it had one.
    pub location: Option<&'a Area>,
    /// Every candidate that survived the pair's filters.
    pub candidates: Vec<EntityRef<'a>>,
}

/// Resolver output bundled with timing information.
#[derive(Debug, Clone)]
pub struct RunResult<'a> {
    pub outcome: Option<PairOutcome<'a>>,
    /// Winner's ancestors as discovered by the scan, root-most first.
    pub ancestors: Vec<&'a Area>,
    pub metrics: SearchMetrics,
}
