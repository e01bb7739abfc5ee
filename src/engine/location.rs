//! Location descriptions ("located in Red River Gorge, Kentucky").
//!
//! Given an entity and its ancestor chain (root-most first), pick two
//! contexts:
//!
//! ```text
//! inner: route -> second-to-last ancestor (the wall's host area, not the wall)
//!        area  -> last ancestor (the immediate parent)
//! outer: first ancestor (the root-level area, e.g. a state)
//!        ... unless that is "International", in which case the country:
//!        chain[2] (International -> continent -> country)
//!        chain[1] when the continent is itself the country ("Australia")
//! ```
//!
//! No inner context, an "International" inner context, or an international
//! chain too shallow to name a country all describe as the empty string.

use crate::corpus::CorpusIndex;
use crate::model::{Area, EntityRef};
use crate::normalize::eq_ci;

/// Name of the synthetic root that groups every non-US area.
pub const INTERNATIONAL_AREA_NAME: &str = "International";

/// The one continent-level area that is also the country.
pub const CONTINENT_COUNTRY_NAME: &str = "Australia";

/// Describe where `entity` sits, resolving its ancestors through `index`.
pub fn describe_location(index: &CorpusIndex<'_>, entity: EntityRef<'_>) -> String {
    describe_chain(entity, &index.ancestors(entity))
}

/// Describe where `entity` sits given its ancestors, root-most first.
pub fn describe_chain(entity: EntityRef<'_>, ancestors: &[&Area]) -> String {
    let inner = match entity {
        EntityRef::Route(_) => ancestors.len().checked_sub(2).and_then(|i| ancestors.get(i)),
        EntityRef::Area(_) => ancestors.last(),
    };
    let Some(inner) = inner.copied() else {
        return String::new();
    };
    if is_international(inner) {
        return String::new();
    }

    let mut outer = ancestors.first().copied();
    if let Some(root) = outer {
        if is_international(root) {
            let continent_is_country = ancestors.get(1).is_some_and(|a| eq_ci(a.info.name(), CONTINENT_COUNTRY_NAME));
            let country = if continent_is_country { ancestors.get(1) } else { ancestors.get(2) };
            match country {
                Some(country) => outer = Some(*country),
                None => return String::new(),
            }
        }
    }

    match outer {
        Some(outer) if outer.info.id() != inner.info.id() => {
            format!("located in {}, {}", inner.info.name(), outer.info.name())
        }
        _ => format!("located in {}", inner.info.name()),
    }
}

fn is_international(area: &Area) -> bool {
    eq_ci(area.info.name(), INTERNATIONAL_AREA_NAME)
}
