use crate::error::GradeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Grading notations found in the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GradeSystem {
    #[serde(rename = "YDS")]
    Yds,
    French,
    Ewbanks,
    #[serde(rename = "UIAA")]
    Uiaa,
    SouthAfrica,
    British,
    Hueco,
    Fontainebleau,
    Unlabeled,
}

impl GradeSystem {
    pub const ALL: [GradeSystem; 9] = [
        GradeSystem::Yds,
        GradeSystem::French,
        GradeSystem::Ewbanks,
        GradeSystem::Uiaa,
        GradeSystem::SouthAfrica,
        GradeSystem::British,
        GradeSystem::Hueco,
        GradeSystem::Fontainebleau,
        GradeSystem::Unlabeled,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GradeSystem::Yds => "YDS",
            GradeSystem::French => "French",
            GradeSystem::Ewbanks => "Ewbanks",
            GradeSystem::Uiaa => "UIAA",
            GradeSystem::SouthAfrica => "SouthAfrica",
            GradeSystem::British => "British",
            GradeSystem::Hueco => "Hueco",
            GradeSystem::Fontainebleau => "Fontainebleau",
            GradeSystem::Unlabeled => "Unlabeled",
        }
    }
}

impl fmt::Display for GradeSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GradeSystem {
    type Err = GradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let system = match s.trim().to_ascii_lowercase().as_str() {
            "yds" => GradeSystem::Yds,
            "french" | "fr" => GradeSystem::French,
            "ewbanks" | "ewbank" => GradeSystem::Ewbanks,
            "uiaa" => GradeSystem::Uiaa,
            "southafrica" | "south-africa" | "za" => GradeSystem::SouthAfrica,
            "british" | "uk" => GradeSystem::British,
            "hueco" | "v" => GradeSystem::Hueco,
            "fontainebleau" | "font" => GradeSystem::Fontainebleau,
            "unlabeled" | "unlabelled" => GradeSystem::Unlabeled,
            _ => return Err(GradeError::UnknownSystem(s.to_string())),
        };
        Ok(system)
    }
}
