use crate::grade::{Grade, GradeSystem};
use crate::normalize::{decode_html, match_filter};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Fields shared by every corpus entity.
///
/// `name` is HTML-decoded on construction and `name_for_match` is always the
/// match projection of `name`; both are private so the pair cannot drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "EntityRecord", into = "EntityRecord")]
pub struct EntityInfo {
    id: String,
    name: String,
    name_for_match: String,
    popularity: u64,
    parent_ids: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct EntityRecord {
    id: String,
    name: String,
    #[serde(default)]
    popularity: u64,
    #[serde(default)]
    parent_ids: Vec<String>,
}

impl From<EntityRecord> for EntityInfo {
    fn from(record: EntityRecord) -> Self {
        EntityInfo::new(record.id, &record.name, record.popularity, record.parent_ids)
    }
}

impl From<EntityInfo> for EntityRecord {
    fn from(info: EntityInfo) -> Self {
        EntityRecord { id: info.id, name: info.name, popularity: info.popularity, parent_ids: info.parent_ids }
    }
}

impl EntityInfo {
    /// `parent_ids` runs from the corpus root down to the immediate parent.
    pub fn new(id: impl Into<String>, name: &str, popularity: u64, parent_ids: Vec<String>) -> Self {
        let name = decode_html(name.trim());
        let name_for_match = match_filter(&name);
        EntityInfo { id: id.into(), name, name_for_match, popularity, parent_ids }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = decode_html(name.trim());
        self.name_for_match = match_filter(&self.name);
    }

    /// Letters-only projection of the name, used for loose matching.
    pub fn name_for_match(&self) -> &str {
        &self.name_for_match
    }

    pub fn popularity(&self) -> u64 {
        self.popularity
    }

    pub fn parent_ids(&self) -> &[String] {
        &self.parent_ids
    }
}

bitflags::bitflags! {
    /// Climbing disciplines a route can be tagged with.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct RouteTypes: u16 {
        const TRAD     = 1 << 0;
        const SPORT    = 1 << 1;
        const TOP_ROPE = 1 << 2;
        const BOULDER  = 1 << 3;
        const AID      = 1 << 4;
        const ICE      = 1 << 5;
        const MIXED    = 1 << 6;
        const ALPINE   = 1 << 7;
        const SNOW     = 1 << 8;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeightUnit {
    Feet,
    Meters,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Height {
    pub value: f64,
    pub unit: HeightUnit,
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self.unit {
            HeightUnit::Feet => "ft",
            HeightUnit::Meters => "m",
        };
        write!(f, "{} {}", self.value, unit)
    }
}

/// Route counts by discipline for an area subtree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaStatistics {
    pub routes: u32,
    pub trad: u32,
    pub sport: u32,
    pub top_rope: u32,
    pub boulder: u32,
    pub aid: u32,
    pub ice: u32,
    pub mixed: u32,
    pub alpine: u32,
    pub snow: u32,
}

impl AreaStatistics {
    fn record(&mut self, types: RouteTypes) {
        self.routes += 1;
        for (flag, count) in [
            (RouteTypes::TRAD, &mut self.trad),
            (RouteTypes::SPORT, &mut self.sport),
            (RouteTypes::TOP_ROPE, &mut self.top_rope),
            (RouteTypes::BOULDER, &mut self.boulder),
            (RouteTypes::AID, &mut self.aid),
            (RouteTypes::ICE, &mut self.ice),
            (RouteTypes::MIXED, &mut self.mixed),
            (RouteTypes::ALPINE, &mut self.alpine),
            (RouteTypes::SNOW, &mut self.snow),
        ] {
            if types.contains(flag) {
                *count += 1;
            }
        }
    }

    fn merge(&mut self, other: &AreaStatistics) {
        self.routes += other.routes;
        self.trad += other.trad;
        self.sport += other.sport;
        self.top_rope += other.top_rope;
        self.boulder += other.boulder;
        self.aid += other.aid;
        self.ice += other.ice;
        self.mixed += other.mixed;
        self.alpine += other.alpine;
        self.snow += other.snow;
    }
}

/// "12 routes (8 sport, 4 trad)"; disciplines with no routes are omitted.
impl fmt::Display for AreaStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<(u32, &str)> = [
            (self.trad, "trad"),
            (self.sport, "sport"),
            (self.top_rope, "toprope"),
            (self.boulder, "boulder"),
            (self.aid, "aid"),
            (self.ice, "ice"),
            (self.mixed, "mixed"),
            (self.alpine, "alpine"),
            (self.snow, "snow"),
        ]
        .into_iter()
        .filter(|(n, _)| *n > 0)
        .collect();
        parts.sort_by(|a, b| b.0.cmp(&a.0));

        let noun = if self.routes == 1 { "route" } else { "routes" };
        write!(f, "{} {}", self.routes, noun)?;
        if !parts.is_empty() {
            let detail: Vec<String> = parts.iter().map(|(n, label)| format!("{n} {label}")).collect();
            write!(f, " ({})", detail.join(", "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    #[serde(flatten)]
    pub info: EntityInfo,
    #[serde(default, deserialize_with = "one_grade_per_system")]
    grades: Vec<Grade>,
    #[serde(default = "RouteTypes::empty")]
    pub types: RouteTypes,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub additional_info: String,
    #[serde(default)]
    pub height: Option<Height>,
}

fn one_grade_per_system<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Grade>, D::Error> {
    let raw = Vec::<Grade>::deserialize(deserializer)?;
    let mut grades: Vec<Grade> = Vec::with_capacity(raw.len());
    for grade in raw {
        set_grade_in(&mut grades, grade);
    }
    Ok(grades)
}

fn set_grade_in(grades: &mut Vec<Grade>, grade: Grade) {
    match grades.iter_mut().find(|g| g.system() == grade.system()) {
        Some(slot) => *slot = grade,
        None => grades.push(grade),
    }
}

impl Route {
    pub fn new(info: EntityInfo) -> Self {
        Route {
            info,
            grades: Vec::new(),
            types: RouteTypes::empty(),
            rating: 0.0,
            additional_info: String::new(),
            height: None,
        }
    }

    pub fn grades(&self) -> &[Grade] {
        &self.grades
    }

    pub fn grade(&self, system: GradeSystem) -> Option<&Grade> {
        self.grades.iter().find(|g| g.system() == system)
    }

    /// Store `grade`, replacing any grade already held in the same system.
    pub fn set_grade(&mut self, grade: Grade) {
        set_grade_in(&mut self.grades, grade);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    #[serde(flatten)]
    pub info: EntityInfo,
    #[serde(default)]
    pub sub_areas: Vec<Area>,
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(default)]
    pub statistics: AreaStatistics,
    /// Up to three notable descendant routes.
    #[serde(default)]
    pub popular_route_ids: Vec<String>,
}

impl Area {
    pub fn new(info: EntityInfo) -> Self {
        Area {
            info,
            sub_areas: Vec::new(),
            routes: Vec::new(),
            statistics: AreaStatistics::default(),
            popular_route_ids: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.sub_areas.is_empty()
    }

    /// Every route in this subtree, depth-first, own routes first.
    pub fn descendant_routes(&self) -> Vec<&Route> {
        let mut out: Vec<&Route> = self.routes.iter().collect();
        for sub in &self.sub_areas {
            out.extend(sub.descendant_routes());
        }
        out
    }

    /// Recompute `statistics` for this area and every sub-area.
    pub fn tally_statistics(&mut self) -> AreaStatistics {
        let mut stats = AreaStatistics::default();
        for route in &self.routes {
            stats.record(route.types);
        }
        for sub in &mut self.sub_areas {
            stats.merge(&sub.tally_statistics());
        }
        self.statistics = stats;
        stats
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Area,
    Route,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Area => f.write_str("area"),
            EntityKind::Route => f.write_str("route"),
        }
    }
}

/// A borrowed corpus entity: either an [`Area`] or a [`Route`].
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Area(&'a Area),
    Route(&'a Route),
}

impl<'a> EntityRef<'a> {
    pub fn info(&self) -> &'a EntityInfo {
        match *self {
            EntityRef::Area(area) => &area.info,
            EntityRef::Route(route) => &route.info,
        }
    }

    pub fn id(&self) -> &'a str {
        self.info().id()
    }

    pub fn name(&self) -> &'a str {
        self.info().name()
    }

    pub fn name_for_match(&self) -> &'a str {
        self.info().name_for_match()
    }

    pub fn popularity(&self) -> u64 {
        self.info().popularity()
    }

    pub fn parent_ids(&self) -> &'a [String] {
        self.info().parent_ids()
    }

    pub fn kind(&self) -> EntityKind {
        match *self {
            EntityRef::Area(_) => EntityKind::Area,
            EntityRef::Route(_) => EntityKind::Route,
        }
    }

    pub fn is_area(&self) -> bool {
        matches!(self, EntityRef::Area(_))
    }

    pub fn is_route(&self) -> bool {
        matches!(self, EntityRef::Route(_))
    }

    pub fn as_area(&self) -> Option<&'a Area> {
        match *self {
            EntityRef::Area(area) => Some(area),
            EntityRef::Route(_) => None,
        }
    }

    pub fn as_route(&self) -> Option<&'a Route> {
        match *self {
            EntityRef::Route(route) => Some(route),
            EntityRef::Area(_) => None,
        }
    }

    /// Identity comparison by id.
    pub fn same_as(&self, other: &EntityRef<'_>) -> bool {
        self.id() == other.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(id: &str, types: RouteTypes) -> Route {
        let mut r = Route::new(EntityInfo::new(id, id, 0, Vec::new()));
        r.types = types;
        r
    }

    #[test]
    fn name_projection_follows_name() {
        let mut info = EntityInfo::new("1", "Tom&#39;s Thumb (East)", 3, Vec::new());
        assert_eq!(info.name(), "Tom's Thumb (East)");
        assert_eq!(info.name_for_match(), "TomsThumbEast");

        info.set_name("Moonstone Beach");
        assert_eq!(info.name_for_match(), "MoonstoneBeach");
    }

    #[test]
    fn set_grade_keeps_one_per_system() {
        let mut r = route("r", RouteTypes::SPORT);
        r.set_grade(Grade::new(GradeSystem::Yds, "5.10a"));
        r.set_grade(Grade::new(GradeSystem::French, "6a"));
        r.set_grade(Grade::new(GradeSystem::Yds, "5.10b"));

        assert_eq!(r.grades().len(), 2);
        assert_eq!(r.grade(GradeSystem::Yds).map(|g| g.value()), Some("5.10b"));
        assert_eq!(r.grade(GradeSystem::Hueco), None);
    }

    #[test]
    fn statistics_are_tallied_over_the_subtree() {
        let mut wall = Area::new(EntityInfo::new("wall", "Wall", 0, Vec::new()));
        wall.routes.push(route("a", RouteTypes::SPORT));
        wall.routes.push(route("b", RouteTypes::SPORT | RouteTypes::TOP_ROPE));
        let mut crag = Area::new(EntityInfo::new("crag", "Crag", 0, Vec::new()));
        crag.routes.push(route("c", RouteTypes::TRAD));
        crag.sub_areas.push(wall);

        let stats = crag.tally_statistics();
        assert_eq!(stats.routes, 3);
        assert_eq!(stats.sport, 2);
        assert_eq!(crag.sub_areas[0].statistics.routes, 2);
        assert_eq!(stats.to_string(), "3 routes (2 sport, 1 trad, 1 toprope)");
        assert_eq!(crag.descendant_routes().len(), 3);
    }

    #[test]
    fn deserializes_flattened_entities() {
        let json = r#"{
            "id": "r1", "name": "Send Me On My Way", "popularity": 42,
            "parent_ids": ["ky", "rrg"],
            "grades": [{"system": "YDS", "value": "10a"}, {"system": "YDS", "value": "5.10b"}],
            "types": "SPORT"
        }"#;
        let route: Route = serde_json::from_str(json).unwrap();
        assert_eq!(route.info.name_for_match(), "SendMeOnMyWay");
        assert_eq!(route.info.parent_ids(), ["ky", "rrg"]);
        assert_eq!(route.grades().len(), 1);
        assert_eq!(route.grade(GradeSystem::Yds).unwrap().value(), "5.10b");
        assert_eq!(route.types, RouteTypes::SPORT);
    }
}
