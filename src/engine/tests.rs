use super::*;
use crate::corpus::{Corpus, CorpusIndex};
use crate::{SearchOptions, search_verbose_with, search_with};

const CORPUS: &str = r#"[
    {"id": "ky", "name": "Kentucky", "popularity": 900, "sub_areas": [
        {"id": "rrg-ky", "name": "Red River Gorge", "popularity": 500, "parent_ids": ["ky"], "sub_areas": [
            {"id": "muir", "name": "Muir Valley", "popularity": 300, "parent_ids": ["ky", "rrg-ky"], "sub_areas": [
                {"id": "bbw", "name": "Bruise Brothers Wall", "popularity": 40, "parent_ids": ["ky", "rrg-ky", "muir"],
                 "routes": [
                    {"id": "smomw", "name": "Send Me On My Way", "popularity": 120,
                     "parent_ids": ["ky", "rrg-ky", "muir", "bbw"],
                     "grades": [{"system": "YDS", "value": "5.10a"}]},
                    {"id": "moon-ky", "name": "Moonstone", "popularity": 200,
                     "parent_ids": ["ky", "rrg-ky", "muir", "bbw"]}
                 ]}
            ]}
        ]},
        {"id": "east-ridge", "name": "East Ridge", "popularity": 10, "parent_ids": ["ky"]},
        {"id": "ne-ridges", "name": "Northeast Ridges and Valleys", "popularity": 1000, "parent_ids": ["ky"]}
    ]},
    {"id": "sos", "name": "Some Other State", "popularity": 20, "sub_areas": [
        {"id": "rrg-sos", "name": "Red River Gorge", "popularity": 10, "parent_ids": ["sos"]}
    ]},
    {"id": "az", "name": "Arizona", "popularity": 800, "sub_areas": [
        {"id": "moon-az", "name": "Moonstone Boulders", "popularity": 50, "parent_ids": ["az"], "routes": [
            {"id": "moon-az-route", "name": "Moonstone", "popularity": 60, "parent_ids": ["az", "moon-az"],
             "grades": [{"system": "Hueco", "value": "v6-8"}]}
        ]}
    ]},
    {"id": "ut", "name": "Utah", "popularity": 5, "sub_areas": [
        {"id": "cits", "name": "Crack in the Sky", "popularity": 1, "parent_ids": ["ut"]},
        {"id": "sky-wall", "name": "The Sky Wall", "popularity": 50, "parent_ids": ["ut"], "routes": [
            {"id": "crack", "name": "Crack", "popularity": 1000, "parent_ids": ["ut", "sky-wall"]}
        ]}
    ]},
    {"id": "intl", "name": "International", "sub_areas": [
        {"id": "asia", "name": "Asia", "parent_ids": ["intl"], "sub_areas": [
            {"id": "china", "name": "China", "parent_ids": ["intl", "asia"], "sub_areas": [
                {"id": "yangshuo", "name": "Yangshuo", "parent_ids": ["intl", "asia", "china"], "sub_areas": [
                    {"id": "moon-hill", "name": "Moon Hill", "popularity": 70,
                     "parent_ids": ["intl", "asia", "china", "yangshuo"]}
                ]}
            ]}
        ]}
    ]}
]"#;

fn corpus() -> Corpus {
    Corpus::from_json_str(CORPUS).unwrap()
}

#[test]
fn resolves_queries_to_the_expected_entity() {
    let cases: Vec<(&str, SearchOptions, Option<&str>)> = vec![
        // exact names beat more popular partial matches
        ("East Ridge", SearchOptions::default(), Some("east-ridge")),
        ("east ridge", SearchOptions::default(), Some("east-ridge")),
        ("ridges", SearchOptions::default(), Some("ne-ridges")),
        // same name, popularity decides
        ("Red River Gorge", SearchOptions::default(), Some("rrg-ky")),
        ("red-river gorge!", SearchOptions::default(), Some("rrg-ky")),
        // a location hint overrides popularity
        ("Moonstone", SearchOptions::default(), Some("moon-ky")),
        ("Moonstone, Arizona", SearchOptions::default(), Some("moon-az-route")),
        ("Moonstone in Arizona", SearchOptions::default(), Some("moon-az-route")),
        ("Red River Gorge, Some Other State", SearchOptions::default(), Some("rrg-sos")),
        ("Send me on my way at Red River Gorge", SearchOptions::default(), Some("smomw")),
        // structural filters
        ("Moonstone", SearchOptions::areas(), Some("moon-az")),
        ("Moonstone, Arizona", SearchOptions::routes(), Some("moon-az-route")),
        ("Red River Gorge", SearchOptions::routes(), None),
        // forced locations
        ("Moonstone", SearchOptions::default().in_location("Kentucky"), Some("moon-ky")),
        ("Moonstone", SearchOptions::default().in_location("arizona"), Some("moon-az-route")),
        ("Send Me On My Way", SearchOptions::default().in_location("Arizona"), None),
        ("Send Me On My Way", SearchOptions::default().in_location("  "), Some("smomw")),
        // nothing to match on
        ("", SearchOptions::default(), None),
        ("5.10", SearchOptions::default(), None),
        ("Half Dome", SearchOptions::default(), None),
    ];

    let corpus = corpus();
    let resolver = Resolver::new(&corpus);

    for (query, options, expected) in cases {
        let result = resolver.search(query, &options);
        let got = result.filtered_result.map(|e| e.id());
        assert_eq!(
            got, expected,
            "query '{}' with {:?} resolved to {:?} (all: {:?})",
            query, options, got, result.all_results
        );
    }
}

#[test]
fn split_queries_report_pairs_and_location() {
    let corpus = corpus();
    let verbose = search_verbose_with(&corpus, "Send me on my way at Red River Gorge", &SearchOptions::default());

    let pairs: Vec<(&str, &str)> =
        verbose.metrics.pairs.iter().map(|p| (p.subject.as_str(), p.location.as_str())).collect();
    assert_eq!(
        pairs,
        vec![
            ("Send me on my way at Red River Gorge", ""),
            ("Send me", "my way at Red River Gorge"),
            ("Send me on my way", "Red River Gorge"),
        ]
    );

    // "Send me" matches the route but its location guess names no ancestor
    assert_eq!((verbose.metrics.pairs[1].matched, verbose.metrics.pairs[1].kept), (1, 0));
    assert_eq!(verbose.winning_pair, Some(2));
    assert!(!verbose.metrics.fallback);

    let result = verbose.result;
    assert_eq!(result.related_location.map(|a| a.info.id()), Some("rrg-ky"));
    let chain: Vec<&str> = result.ancestors.iter().map(|a| a.info.id()).collect();
    assert_eq!(chain, vec!["ky", "rrg-ky", "muir", "bbw"]);
    assert_eq!(result.location_description(), "located in Muir Valley, Kentucky");
}

#[test]
fn unlocated_winner_has_no_related_location() {
    let corpus = corpus();
    let result = search_with(&corpus, "Moonstone", &SearchOptions::default());
    assert!(result.related_location.is_none());
    assert_eq!(result.all_results.len(), 3);

    let located = search_with(&corpus, "Moonstone, Arizona", &SearchOptions::default());
    let ids: Vec<&str> = located.all_results.iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec!["moon-az", "moon-az-route"]);
    assert_eq!(located.related_location.map(|a| a.info.id()), Some("az"));
    assert_eq!(located.location_description(), "located in Arizona");
}

#[test]
fn pair_winners_are_ranked_against_the_full_text() {
    let corpus = corpus();
    let verbose = search_verbose_with(&corpus, "Crack in the Sky", &SearchOptions::default());

    // both the whole text and ("Crack", "the Sky") produce a winner
    let winners: Vec<Option<&str>> = verbose.metrics.pairs.iter().map(|p| p.winner.as_deref()).collect();
    assert_eq!(winners, vec![Some("Crack in the Sky"), Some("Crack")]);

    assert_eq!(verbose.winning_pair, Some(0));
    assert_eq!(verbose.tier, Some(MatchTier::ExactName));
    let best = verbose.result.filtered_result.unwrap();
    assert_eq!(best.id(), "cits");
    assert!(best.is_area());
    assert!(verbose.result.related_location.is_none());
}

#[test]
fn fallback_runs_only_without_a_forced_location() {
    let corpus = corpus();

    let missing = search_verbose_with(&corpus, "Half Dome", &SearchOptions::default());
    assert!(missing.result.is_empty());
    assert!(missing.metrics.fallback);
    assert_eq!(missing.winning_pair, None);

    let forced = search_verbose_with(&corpus, "Half Dome", &SearchOptions::default().in_location("Kentucky"));
    assert!(forced.result.is_empty());
    assert!(!forced.metrics.fallback);
    assert_eq!(forced.metrics.pairs.len(), 1);
}

#[test]
fn empty_corpus_finds_nothing() {
    let corpus = Corpus::default();
    let result = search_with(&corpus, "Red River Gorge", &SearchOptions::default());
    assert!(result.is_empty());
    assert!(result.all_results.is_empty());
    assert!(result.ancestors.is_empty());
    assert_eq!(result.location_description(), "");
}

#[test]
fn scan_and_index_describe_locations_alike() {
    let corpus = corpus();
    let resolver = Resolver::new(&corpus);

    for query in ["Send Me On My Way", "Muir Valley", "Moon Hill", "Moonstone, Arizona", "Kentucky"] {
        let result = resolver.search(query, &SearchOptions::default());
        let best = result.filtered_result.unwrap();
        assert_eq!(
            result.location_description(),
            describe_location(resolver.index(), best),
            "scan and index disagree for '{}'",
            query
        );
    }

    let moon_hill = resolver.index().get("moon-hill").unwrap();
    assert_eq!(describe_location(resolver.index(), moon_hill), "located in Yangshuo, China");
}

#[test]
fn searches_leave_the_corpus_untouched() {
    let corpus = corpus();
    let before = corpus.clone();
    let resolver = Resolver::with_index(CorpusIndex::new(&corpus));

    let first = resolver.search("Moonstone, Arizona", &SearchOptions::default());
    let second = resolver.search("Moonstone, Arizona", &SearchOptions::default());
    assert!(first.filtered_result.unwrap().same_as(&second.filtered_result.unwrap()));
    assert_eq!(first.ancestors.len(), second.ancestors.len());
    assert_eq!(corpus, before);
}
