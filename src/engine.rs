//! Search engine.
//!
//! This module is the entry point for resolving free text against a corpus.
//! It is split into focused submodules under `src/engine/`.
//!
//! ## How the parts work together
//!
//! ```text
//! corpus ──┐
//!          │  CorpusIndex::new                  (corpus.rs)
//!          └───────────────┬──────────────
//!                          │
//! text ── decompose ───────┼─ (subject, location) pairs
//!         (decompose.rs)   │
//!                          v
//!                Resolver::run_with_metrics (searcher.rs)
//!                  - scan per pair, per-call back-references (scan.rs)
//!                  - kind + location filters
//!                  - best per pair, then best across pairs (ladder.rs)
//!                          │
//!                          v
//!                     RunResult (metrics.rs)
//!                          │
//!                          v
//!              describe_location (location.rs)
//! ```
//!
//! ## Responsibilities by module
//!
//! - `decompose.rs`: splits raw text into candidate (subject, location) pairs.
//! - `scan.rs`: walks the corpus and records matches with their ancestors.
//! - `ladder.rs`: the priority ladder and popularity tie-break.
//! - `searcher.rs`: runs pairs, applies filters, chooses the overall winner.
//! - `location.rs`: turns an ancestor chain into "located in X, Y".
//! - `metrics.rs`: timing/debug data for a run.
//!
//! ## Debugging
//!
//! Run with `RUST_LOG=cragfinder=debug` to trace pairs, tiers and popularity
//! margins.

#[path = "engine/decompose.rs"]
mod decompose;
#[path = "engine/ladder.rs"]
mod ladder;
#[path = "engine/location.rs"]
mod location;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/scan.rs"]
mod scan;
#[path = "engine/searcher.rs"]
mod searcher;
#[cfg(test)]
#[path = "engine/tests.rs"]
mod tests;

pub use decompose::{MatchText, QueryPair, decompose};
pub use ladder::{BestMatch, MatchTier, determine_best_match};
pub use location::{CONTINENT_COUNTRY_NAME, INTERNATIONAL_AREA_NAME, describe_chain, describe_location};
pub use metrics::{PairMetrics, PairOutcome, RunResult, SearchMetrics};
pub use searcher::Resolver;
