use crate::corpus::Corpus;
use crate::engine::{self, MatchTier, Resolver, SearchMetrics};
use crate::grade::{Grade, GradeMatchOptions, GradeSystem};
use crate::model::{Area, EntityRef, Route};
use crate::normalize::match_filter;
use std::time::Duration;

/// Filters that constrain a search.
///
/// The default is unconstrained: areas and routes, location guessed from the
/// text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Only areas may be returned.
    pub only_areas: bool,
    /// Only routes may be returned.
    pub only_routes: bool,
    /// Treat the whole text as the subject and require an ancestor matching
    /// this location. No fallback search happens when nothing matches.
    pub specific_location: Option<String>,
}

impl SearchOptions {
    pub fn routes() -> Self {
        SearchOptions { only_routes: true, ..SearchOptions::default() }
    }

    pub fn areas() -> Self {
        SearchOptions { only_areas: true, ..SearchOptions::default() }
    }

    pub fn in_location(mut self, location: impl Into<String>) -> Self {
        self.specific_location = Some(location.into());
        self
    }

    /// The forced location, if it has any letters to match on.
    pub(crate) fn forced_location(&self) -> Option<&str> {
        self.specific_location.as_deref().filter(|l| !match_filter(l).is_empty())
    }
}

/// Result from [`search`], [`search_with`] and [`Resolver::search`].
#[derive(Debug, Clone)]
pub struct SearchResult<'a> {
    /// The single best entity, if any.
    pub filtered_result: Option<EntityRef<'a>>,
    /// Every candidate considered in the winning pair.
    pub all_results: Vec<EntityRef<'a>>,
    /// The ancestor that satisfied the location, when one was used.
    pub related_location: Option<&'a Area>,
    /// Ancestors of the best entity as found by the scan, root-most first.
    pub ancestors: Vec<&'a Area>,
    /// Total elapsed time spent searching.
    pub time_taken: Duration,
}

impl<'a> SearchResult<'a> {
    pub fn is_empty(&self) -> bool {
        self.filtered_result.is_none()
    }

    /// "located in X, Y" for the best entity, or an empty string.
    pub fn location_description(&self) -> String {
        match self.filtered_result {
            Some(entity) => engine::describe_chain(entity, &self.ancestors),
            None => String::new(),
        }
    }
}

/// Result from [`search_verbose_with`] and [`Resolver::search_verbose`].
#[derive(Debug, Clone)]
pub struct SearchResultVerbose<'a> {
    pub text: String,
    pub result: SearchResult<'a>,
    /// Index of the winning decomposed pair; `None` when the fallback scan won
    /// or nothing matched.
    pub winning_pair: Option<usize>,
    /// Ladder tier of the winner within its pair.
    pub tier: Option<MatchTier>,
    pub metrics: SearchMetrics,
}

impl<'a> Resolver<'a> {
    /// Resolve `text` to the single best entity.
    pub fn search(&self, text: &str, options: &SearchOptions) -> SearchResult<'a> {
        self.search_verbose(text, options).result
    }

    /// Like [`search`](Self::search), also returning per-pair metrics.
    pub fn search_verbose(&self, text: &str, options: &SearchOptions) -> SearchResultVerbose<'a> {
        let run = self.run_with_metrics(text, options);

        let (result, winning_pair, tier) = match run.outcome {
            Some(outcome) => (
                SearchResult {
                    filtered_result: Some(outcome.best),
                    all_results: outcome.candidates,
                    related_location: outcome.location,
                    ancestors: run.ancestors,
                    time_taken: run.metrics.total,
                },
                outcome.pair_index,
                Some(outcome.tier),
            ),
            None => (
                SearchResult {
                    filtered_result: None,
                    all_results: Vec::new(),
                    related_location: None,
                    ancestors: Vec::new(),
                    time_taken: run.metrics.total,
                },
                None,
                None,
            ),
        };

        SearchResultVerbose { text: text.to_string(), result, winning_pair, tier, metrics: run.metrics }
    }
}

/// Search `corpus` for `text` without filters.
pub fn search<'a>(corpus: &'a Corpus, text: &str) -> SearchResult<'a> {
    search_with(corpus, text, &SearchOptions::default())
}

/// Search `corpus` for `text` with `options`.
///
/// This indexes the corpus for a single call; keep a [`Resolver`] around to
/// search the same corpus repeatedly.
///
/// # Example
/// ```
/// use cragfinder::{Corpus, SearchOptions, search_with};
///
/// let corpus = Corpus::from_json_str(
///     r#"[{"id": "ky", "name": "Kentucky", "sub_areas": [
///         {"id": "rrg", "name": "Red River Gorge", "popularity": 500, "parent_ids": ["ky"]}
///     ]}]"#,
/// )
/// .unwrap();
///
/// let result = search_with(&corpus, "red river gorge", &SearchOptions::default());
/// assert_eq!(result.filtered_result.map(|e| e.id()), Some("rrg"));
/// assert_eq!(result.location_description(), "located in Kentucky");
/// ```
pub fn search_with<'a>(corpus: &'a Corpus, text: &str, options: &SearchOptions) -> SearchResult<'a> {
    Resolver::new(corpus).search(text, options)
}

/// Search `corpus` for `text` and return extra debug details.
pub fn search_verbose_with<'a>(corpus: &'a Corpus, text: &str, options: &SearchOptions) -> SearchResultVerbose<'a> {
    Resolver::new(corpus).search_verbose(text, options)
}

/// Return true when `route`'s grade in `system` covers the grade written in
/// `requested` (e.g. "5.11b" against a route graded "5.11a/b").
///
/// A route without a grade in `system` never matches.
pub fn is_grade_equal(system: GradeSystem, requested: &str, route: &Route, options: GradeMatchOptions) -> bool {
    let Some(compared) = route.grade(system) else {
        tracing::trace!(route = route.info.id(), %system, "route has no grade in system");
        return false;
    };
    Grade::new(system, requested).matches(compared, options)
}

/// Every route under `area` whose grade covers `requested`.
pub fn routes_with_grade<'a>(
    area: &'a Area,
    system: GradeSystem,
    requested: &str,
    options: GradeMatchOptions,
) -> Vec<&'a Route> {
    let subject = Grade::new(system, requested);
    area.descendant_routes()
        .into_iter()
        .filter(|route| route.grade(system).is_some_and(|compared| subject.matches(compared, options)))
        .collect()
}
