//! Grade engine.
//!
//! Climbing difficulty is written in several incompatible notations, and the
//! source corpus often stores compound or uncertain grades ("5.11a/b", "V6-7",
//! "V4-/+") as a single string. This module canonicalizes grade text and
//! decides whether a precise grade is covered by another, possibly vaguer, one.
//!
//! ```text
//! raw text ──rectify(system)──▶ canonical value ──▶ Grade { system, value }
//!
//! subject.matches(compared, opts):
//!   (1) exact canonical value
//!   (2) allow_range: compared is a range   ──▶ enumerate sub-grades
//!   (3) allow_range: compared is "-/+"     ──▶ base, base-, base+
//!   (4) allow_base_only: subject contains the compared base ("5.10", "V6")
//! ```
//!
//! Matching is *directional*: the compared grade is the one that gets
//! expanded, so a precise subject can match a vague compared grade but not
//! necessarily the other way round.
//!
//! ## Responsibilities by module
//!
//! - `system.rs`: the `GradeSystem` enum and its text aliases.
//! - `rectify.rs`: per-system canonicalization.
//! - `range.rs`: the small tokenizer that recognizes range and plus/minus
//!   shapes and the base-only token.
//! - `detect.rs`: pulls YDS/Hueco grades out of free text.

#[path = "grade/detect.rs"]
mod detect;
#[path = "grade/range.rs"]
mod range;
#[path = "grade/rectify.rs"]
mod rectify;
#[path = "grade/system.rs"]
mod system;

pub use detect::detect_grades;
pub use range::{GradeRange, RangeSpan};
pub use rectify::rectify;
pub use system::GradeSystem;

use crate::error::GradeError;
use range::{base_token, plus_minus_candidates};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which loose comparisons [`Grade::matches`] may use beyond exact equality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GradeMatchOptions {
    /// Expand ranges ("5.11a/b", "V6-8") and plus/minus grades ("V6-/+").
    pub allow_range: bool,
    /// Accept a subject that contains the compared grade's base ("5.10", "V6").
    pub allow_base_only: bool,
}

/// A difficulty rating in one grading system.
///
/// The value is always rectified (see [`rectify`]); there is no way to build a
/// `Grade` around raw text, including through deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "GradeRecord", into = "GradeRecord")]
pub struct Grade {
    system: GradeSystem,
    value: String,
}

#[derive(Serialize, Deserialize)]
struct GradeRecord {
    system: GradeSystem,
    value: String,
}

impl From<GradeRecord> for Grade {
    fn from(record: GradeRecord) -> Self {
        Grade::new(record.system, &record.value)
    }
}

impl From<Grade> for GradeRecord {
    fn from(grade: Grade) -> Self {
        GradeRecord { system: grade.system, value: grade.value }
    }
}

impl Grade {
    /// Build a grade, rectifying `raw` for `system`.
    pub fn new(system: GradeSystem, raw: &str) -> Self {
        Grade { system, value: rectify(system, raw) }
    }

    pub fn system(&self) -> GradeSystem {
        self.system
    }

    /// Canonical value in this grade's system.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Return true when `self` (the subject) is covered by `compared`.
    ///
    /// Grades from different systems never match.
    pub fn matches(&self, compared: &Grade, options: GradeMatchOptions) -> bool {
        if self.system != compared.system {
            return false;
        }

        let subject = self.value.as_str();
        let value = compared.value.as_str();

        if subject == value {
            return true;
        }

        if options.allow_range {
            if let Some(range) = GradeRange::parse(value) {
                let candidates = range.candidates();
                tracing::trace!(subject, compared = value, ?candidates, "grade range expansion");
                if candidates.iter().any(|c| c == subject) {
                    return true;
                }
            } else if let Some(candidates) = plus_minus_candidates(value) {
                tracing::trace!(subject, compared = value, ?candidates, "grade plus/minus expansion");
                if candidates.iter().any(|c| c == subject) {
                    return true;
                }
            }
        }

        if options.allow_base_only {
            if let Some(base) = base_token(value) {
                tracing::trace!(subject, compared = value, base, "grade base-only comparison");
                if subject.contains(base) {
                    return true;
                }
            }
        }

        false
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Parse `SYSTEM:VALUE`, e.g. `yds:5.10a` or `hueco:V4`.
impl FromStr for Grade {
    type Err = GradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (system, value) = s.split_once(':').ok_or_else(|| GradeError::MissingValue(s.to_string()))?;
        if value.trim().is_empty() {
            return Err(GradeError::MissingValue(s.to_string()));
        }
        Ok(Grade::new(system.parse()?, value))
    }
}
