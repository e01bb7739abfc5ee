//! Text normalization shared by the entity model and the search engine.
//!
//! Matching in this crate happens on two projections of a string:
//!
//! - the literal text, compared case-insensitively;
//! - the *match projection*: every non-letter character removed (see
//!   [`match_filter`]). Case is left alone here and folded at comparison time.
//!
//! ```text
//! "Send Me On My Way (5.10a)" ──match_filter──▶ "SendMeOnMyWaya"
//! ```

/// Strip every character that is not a Unicode letter.
pub fn match_filter(input: &str) -> String {
    input.chars().filter(|c| c.is_alphabetic()).collect()
}

/// Case-insensitive containment: `target` must contain `input`, never the
/// other way round.
pub fn contains_ci(target: &str, input: &str) -> bool {
    target.to_lowercase().contains(&input.to_lowercase())
}

/// Case-insensitive equality.
pub fn eq_ci(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Decode the HTML entities that show up in crawled names.
///
/// Handles numeric references (`&#39;`, `&#x27;`) and the named entities in
/// `NAMED_ENTITIES`. Unknown entities are kept as-is.
pub fn decode_html(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }

    let re = regex!(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);");
    re.replace_all(input, |caps: &regex::Captures| {
        let body = &caps[1];
        let decoded = if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
            u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
        } else if let Some(dec) = body.strip_prefix('#') {
            dec.parse::<u32>().ok().and_then(char::from_u32)
        } else {
            named_entity(body)
        };

        match decoded {
            Some(c) => c.to_string(),
            None => caps[0].to_string(),
        }
    })
    .into_owned()
}

/// Named entities: HTML's Latin-1 set plus the common typographic ones.
const NAMED_ENTITIES: &[(&str, char)] = &[
    ("amp", '\u{26}'), ("lt", '\u{3c}'), ("gt", '\u{3e}'), ("quot", '\u{22}'),
    ("apos", '\u{27}'), ("nbsp", '\u{a0}'), ("iexcl", '\u{a1}'), ("cent", '\u{a2}'),
    ("pound", '\u{a3}'), ("yen", '\u{a5}'), ("sect", '\u{a7}'), ("copy", '\u{a9}'),
    ("ordf", '\u{aa}'), ("laquo", '\u{ab}'), ("reg", '\u{ae}'), ("deg", '\u{b0}'),
    ("plusmn", '\u{b1}'), ("sup2", '\u{b2}'), ("sup3", '\u{b3}'), ("acute", '\u{b4}'),
    ("micro", '\u{b5}'), ("middot", '\u{b7}'), ("ordm", '\u{ba}'), ("raquo", '\u{bb}'),
    ("frac14", '\u{bc}'), ("frac12", '\u{bd}'), ("frac34", '\u{be}'), ("iquest", '\u{bf}'),
    ("times", '\u{d7}'), ("divide", '\u{f7}'), ("ndash", '\u{2013}'), ("mdash", '\u{2014}'),
    ("lsquo", '\u{2018}'), ("rsquo", '\u{2019}'), ("sbquo", '\u{201a}'), ("ldquo", '\u{201c}'),
    ("rdquo", '\u{201d}'), ("bdquo", '\u{201e}'), ("dagger", '\u{2020}'), ("bull", '\u{2022}'),
    ("hellip", '\u{2026}'), ("prime", '\u{2032}'), ("Prime", '\u{2033}'), ("lsaquo", '\u{2039}'),
    ("rsaquo", '\u{203a}'), ("euro", '\u{20ac}'), ("trade", '\u{2122}'), ("Agrave", '\u{c0}'),
    ("Aacute", '\u{c1}'), ("Acirc", '\u{c2}'), ("Atilde", '\u{c3}'), ("Auml", '\u{c4}'),
    ("Aring", '\u{c5}'), ("AElig", '\u{c6}'), ("Ccedil", '\u{c7}'), ("Egrave", '\u{c8}'),
    ("Eacute", '\u{c9}'), ("Ecirc", '\u{ca}'), ("Euml", '\u{cb}'), ("Igrave", '\u{cc}'),
    ("Iacute", '\u{cd}'), ("Icirc", '\u{ce}'), ("Iuml", '\u{cf}'), ("ETH", '\u{d0}'),
    ("Ntilde", '\u{d1}'), ("Ograve", '\u{d2}'), ("Oacute", '\u{d3}'), ("Ocirc", '\u{d4}'),
    ("Otilde", '\u{d5}'), ("Ouml", '\u{d6}'), ("Oslash", '\u{d8}'), ("Ugrave", '\u{d9}'),
    ("Uacute", '\u{da}'), ("Ucirc", '\u{db}'), ("Uuml", '\u{dc}'), ("Yacute", '\u{dd}'),
    ("THORN", '\u{de}'), ("szlig", '\u{df}'), ("agrave", '\u{e0}'), ("aacute", '\u{e1}'),
    ("acirc", '\u{e2}'), ("atilde", '\u{e3}'), ("auml", '\u{e4}'), ("aring", '\u{e5}'),
    ("aelig", '\u{e6}'), ("ccedil", '\u{e7}'), ("egrave", '\u{e8}'), ("eacute", '\u{e9}'),
    ("ecirc", '\u{ea}'), ("euml", '\u{eb}'), ("igrave", '\u{ec}'), ("iacute", '\u{ed}'),
    ("icirc", '\u{ee}'), ("iuml", '\u{ef}'), ("eth", '\u{f0}'), ("ntilde", '\u{f1}'),
    ("ograve", '\u{f2}'), ("oacute", '\u{f3}'), ("ocirc", '\u{f4}'), ("otilde", '\u{f5}'),
    ("ouml", '\u{f6}'), ("oslash", '\u{f8}'), ("ugrave", '\u{f9}'), ("uacute", '\u{fa}'),
    ("ucirc", '\u{fb}'), ("uuml", '\u{fc}'), ("yacute", '\u{fd}'), ("thorn", '\u{fe}'),
    ("yuml", '\u{ff}'), ("OElig", '\u{152}'), ("oelig", '\u{153}'), ("Scaron", '\u{160}'),
    ("scaron", '\u{161}'), ("Yuml", '\u{178}'), ("Zcaron", '\u{17d}'), ("zcaron", '\u{17e}'),
];

fn named_entity(name: &str) -> Option<char> {
    NAMED_ENTITIES.iter().find(|(entity, _)| *entity == name).map(|(_, c)| *c)
}
