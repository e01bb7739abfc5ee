#[macro_use]
mod macros;
mod api;
mod corpus;
mod engine;
mod error;
mod grade;
mod model;
mod normalize;

pub use api::{
    SearchOptions, SearchResult, SearchResultVerbose, is_grade_equal, routes_with_grade, search, search_verbose_with,
    search_with,
};
pub use corpus::{Corpus, CorpusIndex};
pub use engine::{
    BestMatch, CONTINENT_COUNTRY_NAME, INTERNATIONAL_AREA_NAME, MatchText, MatchTier, PairMetrics, PairOutcome, QueryPair,
    Resolver, RunResult, SearchMetrics, decompose, describe_chain, describe_location, determine_best_match,
};
pub use error::{CorpusError, GradeError};
pub use grade::{Grade, GradeMatchOptions, GradeRange, GradeSystem, RangeSpan, detect_grades, rectify};
pub use model::{Area, AreaStatistics, EntityInfo, EntityKind, EntityRef, Height, HeightUnit, Route, RouteTypes};
pub use normalize::{decode_html, match_filter};
