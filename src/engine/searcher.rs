//! Search orchestration.
//!
//! This module is the operational core of the engine. For one query it:
//!
//! - decomposes the text into (subject, location) pairs (`decompose.rs`);
//! - scans the corpus once per pair (`scan.rs`), applying the structural
//!   filters and, when the pair names a location, keeping only matches with a
//!   matching ancestor;
//! - picks one winner per pair and then one winner across pairs
//!   (`ladder.rs`), the latter judged against the original, undecomposed text.
//!
//! ## Pass structure
//!
//! ```text
//! (0) decompose            -> pairs, least precise first
//! (1) per pair             -> scan -> kind filter -> location filter -> ladder
//! (2) across pairs         -> ladder over the per-pair winners
//! (3) nothing found?       -> forced location: empty result
//!                             otherwise: one unconstrained scan of the full text
//! ```
//!
//! Every back-reference discovered while scanning belongs to the call's
//! `Scanner` and is dropped with it. The corpus is only ever read.

use super::decompose::{MatchText, QueryPair, decompose};
use super::ladder::determine_best_match;
use super::metrics::{PairMetrics, PairOutcome, RunResult, SearchMetrics};
use super::scan::{KindFilter, Scanner};
use crate::SearchOptions;
use crate::corpus::{Corpus, CorpusIndex};
use crate::model::EntityRef;
use std::time::Instant;

/// Searches one corpus.
///
/// Usage: create with `Resolver::new(&corpus)` (which indexes the corpus once)
/// and call [`search`](Self::search) as often as needed. A `Resolver` holds no
/// per-query state, so it can be shared between threads.
#[derive(Debug, Clone)]
pub struct Resolver<'a> {
    index: CorpusIndex<'a>,
}

impl<'a> Resolver<'a> {
    pub fn new(corpus: &'a Corpus) -> Self {
        Self::with_index(CorpusIndex::new(corpus))
    }

    /// Create a `Resolver` around an index the caller already built.
    pub fn with_index(index: CorpusIndex<'a>) -> Self {
        Resolver { index }
    }

    pub fn index(&self) -> &CorpusIndex<'a> {
        &self.index
    }

    /// Resolve `text` to its best match and return timing details.
    pub fn run_with_metrics(&self, text: &str, options: &SearchOptions) -> RunResult<'a> {
        let total_start = Instant::now();
        let mut metrics = SearchMetrics::default();
        let mut scanner = Scanner::new();

        let kinds = KindFilter { only_areas: options.only_areas, only_routes: options.only_routes };
        let forced = options.forced_location();
        let pairs = decompose(text, forced);
        tracing::debug!(query = text, forced_location = ?forced, pairs = pairs.len(), "decomposed query");

        let mut outcomes: Vec<PairOutcome<'a>> = Vec::new();
        for (idx, pair) in pairs.iter().enumerate() {
            let pair_start = Instant::now();
            let (outcome, mut pair_metrics) = self.resolve_pair(&mut scanner, pair, kinds);
            pair_metrics.duration = pair_start.elapsed();
            metrics.pairs.push(pair_metrics);

            if let Some(mut outcome) = outcome {
                outcome.pair_index = Some(idx);
                outcomes.push(outcome);
            }
        }

        let outcome = if !outcomes.is_empty() {
            let winners: Vec<EntityRef<'a>> = outcomes.iter().map(|o| o.best).collect();
            determine_best_match(&winners, &MatchText::new(text)).map(|best| outcomes.swap_remove(best.index))
        } else if forced.is_some() {
            tracing::debug!(query = text, "no match within forced location");
            None
        } else {
            metrics.fallback = true;
            self.fallback(&mut scanner, text, kinds)
        };

        let ancestors = outcome.as_ref().map(|o| scanner.ancestors_of(&o.best).to_vec()).unwrap_or_default();
        metrics.visited = scanner.visited();
        metrics.total = total_start.elapsed();

        RunResult { outcome, ancestors, metrics }
    }

    /// Scan, filter and rank a single pair.
    fn resolve_pair(
        &self,
        scanner: &mut Scanner<'a>,
        pair: &QueryPair,
        kinds: KindFilter,
    ) -> (Option<PairOutcome<'a>>, PairMetrics) {
        let mut metrics = PairMetrics {
            subject: pair.subject.text().to_string(),
            location: pair.location.text().to_string(),
            ..PairMetrics::default()
        };

        let mut matches = scanner.scan(self.index.corpus().roots(), &pair.subject);
        metrics.matched = matches.len();
        matches.retain(|m| kinds.accepts(m));

        let mut locations = Vec::with_capacity(matches.len());
        if pair.has_location() {
            matches.retain(|m| match scanner.locate(m, &pair.location) {
                Some(area) => {
                    locations.push(Some(area));
                    true
                }
                None => false,
            });
        } else {
            locations.resize(matches.len(), None);
        }
        metrics.kept = matches.len();

        tracing::debug!(
            subject = pair.subject.text(),
            location = pair.location.text(),
            matched = metrics.matched,
            kept = metrics.kept,
            "scanned pair"
        );

        let Some(best) = determine_best_match(&matches, &pair.subject) else {
            return (None, metrics);
        };

        metrics.winner = Some(matches[best.index].name().to_string());
        metrics.tier = Some(best.tier);

        let outcome = PairOutcome {
            pair_index: None,
            best: matches[best.index],
            tier: best.tier,
            location: locations[best.index],
            candidates: matches,
        };
        (Some(outcome), metrics)
    }

    /// Last resort: the full text against the whole corpus, structural filters only.
    fn fallback(&self, scanner: &mut Scanner<'a>, text: &str, kinds: KindFilter) -> Option<PairOutcome<'a>> {
        let query = MatchText::new(text);
        let mut matches = scanner.scan(self.index.corpus().roots(), &query);
        matches.retain(|m| kinds.accepts(m));
        tracing::debug!(query = text, kept = matches.len(), "fallback scan");

        let best = determine_best_match(&matches, &query)?;
        Some(PairOutcome {
            pair_index: None,
            best: matches[best.index],
            tier: best.tier,
            location: None,
            candidates: matches,
        })
    }
}
