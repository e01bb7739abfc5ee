//! The corpus forest and its id index.
//!
//! A [`Corpus`] is built once by an external crawler and handed to this crate
//! whole; nothing here mutates it. Searches borrow it through a
//! [`CorpusIndex`], which is compiled once per corpus and maps every entity id
//! to its node:
//!
//! ```text
//! Corpus (Vec<Area>) ──CorpusIndex::new──▶ id -> EntityRef<'a>
//!                                            │
//!        parent_ids ["ky", "rrg"] ───────────┴─▶ [&Area(ky), &Area(rrg)]
//! ```
//!
//! ## Invariants
//!
//! - Ids are expected to be unique. When they are not, the first entity in
//!   depth-first order keeps the id and later ones are only reachable through
//!   the tree itself.
//! - A dangling parent id is skipped when resolving ancestors; it never fails
//!   a lookup.

use crate::error::CorpusError;
use crate::model::{Area, EntityRef, Route};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// The full, pre-built forest of root areas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    roots: Vec<Area>,
}

impl Corpus {
    pub fn new(roots: Vec<Area>) -> Self {
        Corpus { roots }
    }

    pub fn roots(&self) -> &[Area] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Parse a JSON array of root areas.
    pub fn from_json_str(json: &str) -> Result<Self, CorpusError> {
        let roots: Vec<Area> = serde_json::from_str(json)?;
        Ok(Corpus::new(roots))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CorpusError> {
        let roots: Vec<Area> = serde_json::from_reader(reader)?;
        Ok(Corpus::new(roots))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let file = std::fs::File::open(path.as_ref())?;
        let corpus = Self::from_reader(std::io::BufReader::new(file))?;
        tracing::debug!(path = %path.as_ref().display(), roots = corpus.roots.len(), "loaded corpus");
        Ok(corpus)
    }

    pub fn to_json_string(&self) -> Result<String, CorpusError> {
        Ok(serde_json::to_string(&self.roots)?)
    }
}

/// Id lookup over a borrowed [`Corpus`].
#[derive(Debug, Clone)]
pub struct CorpusIndex<'a> {
    corpus: &'a Corpus,
    by_id: HashMap<&'a str, EntityRef<'a>>,
}

impl<'a> CorpusIndex<'a> {
    pub fn new(corpus: &'a Corpus) -> Self {
        let mut by_id = HashMap::new();
        for root in corpus.roots() {
            index_area(root, &mut by_id);
        }
        tracing::debug!(entities = by_id.len(), "indexed corpus");
        CorpusIndex { corpus, by_id }
    }

    pub fn corpus(&self) -> &'a Corpus {
        self.corpus
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<EntityRef<'a>> {
        self.by_id.get(id).copied()
    }

    pub fn area(&self, id: &str) -> Option<&'a Area> {
        self.get(id).and_then(|e| e.as_area())
    }

    pub fn route(&self, id: &str) -> Option<&'a Route> {
        self.get(id).and_then(|e| e.as_route())
    }

    /// Resolve `entity`'s `parent_ids`, root-most first.
    pub fn ancestors(&self, entity: EntityRef<'_>) -> Vec<&'a Area> {
        entity
            .parent_ids()
            .iter()
            .filter_map(|id| {
                let area = self.area(id);
                if area.is_none() {
                    tracing::warn!(entity = entity.id(), parent = %id, "dangling parent id");
                }
                area
            })
            .collect()
    }

    /// The curated popular routes of `area` (at most three).
    pub fn popular_routes(&self, area: &Area) -> Vec<&'a Route> {
        area.popular_route_ids.iter().filter_map(|id| self.route(id)).take(3).collect()
    }
}

fn index_area<'a>(area: &'a Area, by_id: &mut HashMap<&'a str, EntityRef<'a>>) {
    insert_unique(by_id, EntityRef::Area(area));
    for route in &area.routes {
        insert_unique(by_id, EntityRef::Route(route));
    }
    for sub in &area.sub_areas {
        index_area(sub, by_id);
    }
}

fn insert_unique<'a>(by_id: &mut HashMap<&'a str, EntityRef<'a>>, entity: EntityRef<'a>) {
    if let Some(existing) = by_id.get(entity.id()) {
        tracing::warn!(id = entity.id(), kept = existing.name(), dropped = entity.name(), "duplicate entity id");
        return;
    }
    by_id.insert(entity.id(), entity);
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: &str = r#"[
        {
            "id": "ky", "name": "Kentucky", "popularity": 900,
            "sub_areas": [
                {
                    "id": "rrg", "name": "Red River Gorge", "popularity": 500, "parent_ids": ["ky"],
                    "routes": [
                        {"id": "r1", "name": "Send Me On My Way", "parent_ids": ["ky", "rrg"],
                         "grades": [{"system": "YDS", "value": "5.10a"}]},
                        {"id": "r2", "name": "Orphan", "parent_ids": ["ky", "nowhere", "rrg"]}
                    ],
                    "popular_route_ids": ["r1", "missing"]
                }
            ]
        }
    ]"#;

    #[test]
    fn loads_and_indexes_every_entity() {
        let corpus = Corpus::from_json_str(JSON).unwrap();
        let index = CorpusIndex::new(&corpus);

        assert_eq!(index.len(), 4);
        assert_eq!(index.area("rrg").map(|a| a.info.name()), Some("Red River Gorge"));
        assert!(index.route("rrg").is_none());
        assert!(index.get("r1").unwrap().is_route());
    }

    #[test]
    fn resolves_ancestors_and_skips_dangling_ids() {
        let corpus = Corpus::from_json_str(JSON).unwrap();
        let index = CorpusIndex::new(&corpus);

        let orphan = index.get("r2").unwrap();
        let names: Vec<&str> = index.ancestors(orphan).iter().map(|a| a.info.name()).collect();
        assert_eq!(names, vec!["Kentucky", "Red River Gorge"]);
    }

    #[test]
    fn popular_routes_resolve_known_ids() {
        let corpus = Corpus::from_json_str(JSON).unwrap();
        let index = CorpusIndex::new(&corpus);
        let rrg = index.area("rrg").unwrap();

        let popular: Vec<&str> = index.popular_routes(rrg).iter().map(|r| r.info.id()).collect();
        assert_eq!(popular, vec!["r1"]);
    }

    #[test]
    fn duplicate_ids_keep_the_first() {
        let json = r#"[{"id": "a", "name": "First"}, {"id": "a", "name": "Second"}]"#;
        let corpus = Corpus::from_json_str(json).unwrap();
        let index = CorpusIndex::new(&corpus);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("a").unwrap().name(), "First");
    }

    #[test]
    fn empty_corpus_is_valid_and_round_trips() {
        let corpus = Corpus::from_json_str("[]").unwrap();
        assert!(corpus.is_empty());
        assert!(CorpusIndex::new(&corpus).is_empty());
        assert_eq!(corpus.to_json_string().unwrap(), "[]");
        assert!(Corpus::from_json_str("{").is_err());
    }
}
