//! Text canonicalization for titles, artists, file stems and folder names.
//!
//! [`normalize`] lowercases and strips "original mix" and "feat." annotations;
//! [`split_artists`] breaks a multi-artist credit into single names.

use regex::Regex;
use std::sync::LazyLock;

/// Mix annotations removed verbatim, in this order.
///
/// Each is tried in its literal, title-cased and upper-cased form only,
/// so "(ORIGINAL mix)" and friends are left alone.
const MIX_ANNOTATIONS: [&str; 4] = ["(original mix)", "original mix", "(orig mix)", "orig mix"];

/// Feature annotations, applied in order. Each runs case-insensitively.
static FEATURE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\(ft\.?.*?\)",   // "(ft. djinn)"
        r"(?i)\(feat\.?.*?\)", // "(feat. djinn)"
        r"(?i),\s*ft\.?.*$",   // ", ft. djinn"
        r"(?i),\s*feat\.?.*$", // ", feat. djinn"
        r"(?i)\s+ft\.?.*$",    // " ft. djinn"
        r"(?i)\s+feat\.?.*$",  // " feat. djinn"
    ]
    .iter()
    .map(|p| Regex::new(p).expect("feature pattern is valid"))
    .collect()
});

/// Separators between artists in a credit: , & / ; or the word "and".
static ARTIST_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[,&/;]|\band\b").expect("separator pattern is valid"));

/// Canonical form used for every comparison.
///
/// Lowercases, removes mix annotations, removes feature annotations, trims.
/// The two removals repeat until nothing changes, since dropping a feature
/// clause can join the halves of a mix annotation. Never fails; pass `""`
/// for a missing value.
///
/// ```ignore
/// assert_eq!(normalize("Strobe (Original Mix)"), "strobe");
/// assert_eq!(normalize("Song feat. Artist"), "song");
/// ```
pub fn normalize(raw: &str) -> String {
    let mut text = raw.to_lowercase().trim().to_string();
    loop {
        let next = strip_features(&strip_mix_annotations(&text));
        if next == text {
            return text;
        }
        text = next;
    }
}

/// Remove every "original mix" variant.
fn strip_mix_annotations(s: &str) -> String {
    let mut text = s.to_string();
    for pattern in MIX_ANNOTATIONS {
        for variant in [pattern.to_string(), title_case(pattern), pattern.to_uppercase()] {
            text = text.replace(&variant, "");
        }
    }
    text.trim().to_string()
}

/// Remove "ft."/"feat." clauses and parenthesized spans.
fn strip_features(s: &str) -> String {
    let mut text = s.to_string();
    for pattern in FEATURE_PATTERNS.iter() {
        text = pattern.replace_all(&text, "").into_owned();
    }
    text.trim().to_string()
}

/// Upper-case the first letter of every run of letters, lower-case the rest.
///
/// "(original mix)" becomes "(Original Mix)".
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Split a multi-artist credit into trimmed, non-empty names.
///
/// Returns `[""]` rather than an empty list when nothing is left, so callers
/// always have at least one candidate to score against.
pub fn split_artists(s: &str) -> Vec<String> {
    let tokens: Vec<String> = ARTIST_SEPARATOR
        .split(s)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect();

    if tokens.is_empty() {
        vec![String::new()]
    } else {
        tokens
    }
}
