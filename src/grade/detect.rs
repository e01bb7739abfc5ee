use super::{Grade, GradeSystem};

/// Extract YDS and Hueco grades embedded in free text.
///
/// Results are rectified, ordered by position in `text`, and deduplicated.
///
/// ```text
/// "Crimpy 5.11a/b next to a V4-5 boulder" -> [YDS 5.11a/b, Hueco V4-5]
/// ```
pub fn detect_grades(text: &str) -> Vec<Grade> {
    let yds = regex!(r"\b5\.\d{1,2}(?:[a-dA-D](?:[/\\-][a-dA-D])?|[+-])?");
    let hueco = regex!(r"\b[vV]\d{1,2}(?:[/\\-]\d{1,2}|-/\+|[+-])?");

    let mut found: Vec<(usize, Grade)> = yds
        .find_iter(text)
        .map(|m| (m.start(), Grade::new(GradeSystem::Yds, m.as_str())))
        .chain(hueco.find_iter(text).map(|m| (m.start(), Grade::new(GradeSystem::Hueco, m.as_str()))))
        .collect();
    found.sort_by_key(|(start, _)| *start);

    let mut grades: Vec<Grade> = Vec::with_capacity(found.len());
    for (_, grade) in found {
        if !grades.contains(&grade) {
            grades.push(grade);
        }
    }
    grades
}
