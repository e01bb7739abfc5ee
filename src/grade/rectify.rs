use super::GradeSystem;

/// Canonicalize `raw` for `system`.
///
/// ```text
/// Hueco: "v6/7"   -> "V6-7"     (slashes become '-', uppercase, leading 'V')
/// YDS:   "11A-B"  -> "5.11a/b"  ('-' or '\' before a-d becomes '/', lowercase, "5." prefix)
/// YDS:   "5.9-"   -> "5.9-"     (a trailing minus is not a letter range)
/// other: trimmed verbatim
/// ```
///
/// Rectification is idempotent for every system.
pub fn rectify(system: GradeSystem, raw: &str) -> String {
    let value = raw.trim();
    match system {
        GradeSystem::Hueco => rectify_hueco(value),
        GradeSystem::Yds => rectify_yds(value),
        _ => value.to_string(),
    }
}

fn rectify_hueco(value: &str) -> String {
    let mut out = value.replace(['\\', '/'], "-").to_uppercase();
    if !out.starts_with('V') {
        out.insert(0, 'V');
    }
    out
}

fn rectify_yds(value: &str) -> String {
    let re = regex!(r"[-\\]([a-dA-D])");
    let mut out = re.replace_all(value, "/$1").to_lowercase();
    if !out.contains("5.") {
        out.insert_str(0, "5.");
    }
    out
}
