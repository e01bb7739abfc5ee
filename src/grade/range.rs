//! Range and plus/minus tokenization.
//!
//! A compared grade may cover several precise grades. Two shapes are
//! recognized, both anchored on a separator in `/`, `\` or `-`:
//!
//! ```text
//! "5.11a/b"  -> prefix "5.11", span a..=b,  suffix ""
//! "V6-8"     -> prefix "V",    span 6..=8,  suffix ""
//! "5.10-11"  -> prefix "5.",   span 10..=11, suffix ""
//! "5.9-"     -> not a range (nothing after the separator)
//! ```
//!
//! The plus/minus shape ("V4-/+") is handled separately by
//! [`plus_minus_candidates`].

/// Enumerations wider than this are not treated as ranges.
const MAX_SPAN: u32 = 32;

const SEPARATORS: [char; 3] = ['/', '\\', '-'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSpan {
    Letters(char, char),
    Digits(u32, u32),
}

/// A grade string that names a span of sub-grades.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeRange<'a> {
    prefix: &'a str,
    span: RangeSpan,
    suffix: &'a str,
}

impl<'a> GradeRange<'a> {
    /// Recognize the first range token in `value`.
    ///
    /// Letter spans (`[a-d]` sep `[a-d]`) are tried before digit spans. A span
    /// must be ascending; "V8-6" is not a range.
    pub fn parse(value: &'a str) -> Option<Self> {
        Self::parse_letters(value).or_else(|| Self::parse_digits(value))
    }

    fn parse_letters(value: &'a str) -> Option<Self> {
        let chars: Vec<(usize, char)> = value.char_indices().collect();
        for window in chars.windows(3) {
            let [(start, low), (_, sep), (end, high)] = window else { continue };
            if is_sub_letter(*low) && SEPARATORS.contains(sep) && is_sub_letter(*high) && low <= high {
                return Some(GradeRange {
                    prefix: &value[..*start],
                    span: RangeSpan::Letters(*low, *high),
                    suffix: &value[end + high.len_utf8()..],
                });
            }
        }
        None
    }

    fn parse_digits(value: &'a str) -> Option<Self> {
        let bytes = value.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if !bytes[i].is_ascii_digit() {
                i += 1;
                continue;
            }

            let low_start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            let low_end = i;

            let has_sep = i < bytes.len() && SEPARATORS.iter().any(|&c| c as u8 == bytes[i]);
            if !has_sep {
                continue;
            }

            let high_start = i + 1;
            let mut j = high_start;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            if j == high_start {
                // "5.9-", "V4-/+": separator not followed by digits.
                i = high_start;
                continue;
            }

            let low: u32 = value[low_start..low_end].parse().ok()?;
            let high: u32 = value[high_start..j].parse().ok()?;
            if low > high || high - low > MAX_SPAN {
                return None;
            }

            return Some(GradeRange {
                prefix: &value[..low_start],
                span: RangeSpan::Digits(low, high),
                suffix: &value[j..],
            });
        }
        None
    }

    pub fn span(&self) -> RangeSpan {
        self.span
    }

    /// Everything in front of the range token.
    pub fn prefix(&self) -> &'a str {
        self.prefix
    }

    /// Every precise grade the range covers, in ascending order.
    pub fn candidates(&self) -> Vec<String> {
        match self.span {
            RangeSpan::Letters(low, high) => {
                (low..=high).map(|c| format!("{}{}{}", self.prefix, c, self.suffix)).collect()
            }
            RangeSpan::Digits(low, high) => {
                (low..=high).map(|n| format!("{}{}{}", self.prefix, n, self.suffix)).collect()
            }
        }
    }
}

fn is_sub_letter(c: char) -> bool {
    matches!(c, 'a'..='d')
}

/// Expand a plus/minus grade into `[base, base-, base+]`.
///
/// `-\+` and `-/+` are the written forms; `--+` is what Hueco rectification
/// makes of `-/+`.
pub(crate) fn plus_minus_candidates(value: &str) -> Option<[String; 3]> {
    let (idx, token) = ["-/+", "-\\+", "--+"].iter().find_map(|t| value.find(t).map(|idx| (idx, *t)))?;
    let prefix = &value[..idx];
    let suffix = &value[idx + token.len()..];
    Some([format!("{prefix}{suffix}"), format!("{prefix}-{suffix}"), format!("{prefix}+{suffix}")])
}

/// The stable base of a grade ("5.10" in "5.10a/c", "V6" in "V6-8").
pub(crate) fn base_token(value: &str) -> Option<&str> {
    regex!(r"5\.\d+|[vV]\d+").find(value).map(|m| m.as_str())
}
