//! Display-name normalization for committee and candidate names.
//!
//! Source extracts are mostly upper case. Names are title-cased first and
//! then passed through a fixed, ordered table of corrections for the tokens
//! that naive title-casing damages.

use crate::error::Result;
use regex::Regex;

/// Corrections applied to PAC committee names, in order
const COMMITTEE_RULES: &[(&str, &str)] = &[
    // "Smith For Senate Pac"
    (r"\bPac\b", "PAC"),
    // "Alfapac"
    (r"(?i)pac$", "PAC"),
];

/// Corrections applied to candidate names, in order
///
/// `Iii` must run before `Ii` so "Iii" is not left as "IIi".
const CANDIDATE_RULES: &[(&str, &str)] = &[
    (r"\bIii\b", "III"),
    (r"\bIi\b", "II"),
    (r"\bMcc", "McC"),
];

/// Generational suffixes that stay at the end of a reordered name
const NAME_SUFFIXES: &[&str] = &["jr", "jr.", "sr", "sr.", "ii", "iii", "iv"];

/// Which correction table a name goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameStyle {
    Committee,
    Candidate,
}

#[derive(Debug, Clone)]
struct NameRule {
    pattern: Regex,
    replacement: &'static str,
}

fn compile_rules(table: &[(&str, &'static str)]) -> Result<Vec<NameRule>> {
    table
        .iter()
        .map(|&(pattern, replacement)| -> Result<NameRule> {
            Ok(NameRule {
                pattern: Regex::new(pattern)?,
                replacement,
            })
        })
        .collect()
}

/// Compiled name correction tables
#[derive(Debug, Clone)]
pub struct NameNormalizer {
    committee: Vec<NameRule>,
    candidate: Vec<NameRule>,
}

impl NameNormalizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            committee: compile_rules(COMMITTEE_RULES)?,
            candidate: compile_rules(CANDIDATE_RULES)?,
        })
    }

    /// Drop quote characters, title-case, trim, then apply the corrections
    /// for `style`
    ///
    /// `O"NEIL` must title-case as one word, so quotes go first.
    pub fn normalize(&self, raw: &str, style: NameStyle) -> String {
        let titled = title_case(&raw.replace('"', ""));
        let rules = match style {
            NameStyle::Committee => &self.committee,
            NameStyle::Candidate => &self.candidate,
        };

        rules
            .iter()
            .fold(titled.trim().to_string(), |name, rule| {
                rule.pattern.replace_all(&name, rule.replacement).into_owned()
            })
    }
}

/// Title-case a string the way Python's `str.title` does: a letter is
/// upper-cased when the preceding character is not a cased letter and
/// lower-cased otherwise, so "15th" becomes "15Th" and "o'neil" "O'Neil".
pub fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut previous_cased = false;

    for ch in raw.chars() {
        if previous_cased {
            out.extend(ch.to_lowercase());
        } else {
            out.extend(ch.to_uppercase());
        }
        previous_cased = ch.is_lowercase() || ch.is_uppercase();
    }

    out
}

/// Turn a "Last, First" name into "First Last"
///
/// The first comma-separated part is the surname and the second the given
/// names; any later parts ("Smith, John, Jr.") are suffixes. A generational
/// suffix at the end of the given names ("Jr.", "III") is also moved after
/// the surname. Values without a comma are only trimmed.
pub fn reorder_last_first(raw: &str) -> String {
    let mut parts = raw.split(',');
    let last = parts.next().unwrap_or_default().trim();
    let Some(first) = parts.next() else {
        return last.to_string();
    };

    let mut given: Vec<&str> = first.split_whitespace().collect();
    let has_suffix = given.len() > 1
        && given
            .last()
            .is_some_and(|word| NAME_SUFFIXES.contains(&word.to_lowercase().as_str()));
    let mut suffixes: Vec<&str> = Vec::new();
    if has_suffix {
        suffixes.extend(given.pop());
    }
    suffixes.extend(parts.flat_map(str::split_whitespace));

    let mut words = given;
    if !last.is_empty() {
        words.push(last);
    }
    words.extend(suffixes);
    words.join(" ")
}
