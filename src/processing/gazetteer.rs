//! Place-name lookup shared by query parsing and location scoring

use crate::error::{Result, JobMatcherError};
use aho_corasick::{AhoCorasick, MatchKind};
use lazy_static::lazy_static;
use std::ops::Range;

/// Known service areas. Aliases map to the canonical place name.
const GAZETTEER: &[(&str, &str)] = &[
    ("kuala lumpur", "Kuala Lumpur"),
    ("kl", "Kuala Lumpur"),
    ("petaling jaya", "Petaling Jaya"),
    ("pj", "Petaling Jaya"),
    ("shah alam", "Shah Alam"),
    ("subang jaya", "Subang Jaya"),
    ("subang", "Subang Jaya"),
    ("puchong", "Puchong"),
    ("cheras", "Cheras"),
    ("bangsar", "Bangsar"),
    ("mont kiara", "Mont Kiara"),
    ("bukit bintang", "Bukit Bintang"),
    ("klang", "Klang"),
    ("cyberjaya", "Cyberjaya"),
    ("putrajaya", "Putrajaya"),
    ("selangor", "Selangor"),
    ("penang", "Penang"),
    ("pulau pinang", "Penang"),
    ("george town", "George Town"),
    ("georgetown", "George Town"),
    ("johor bahru", "Johor Bahru"),
    ("jb", "Johor Bahru"),
    ("johor", "Johor"),
    ("ipoh", "Ipoh"),
    ("perak", "Perak"),
    ("melaka", "Melaka"),
    ("malacca", "Melaka"),
    ("seremban", "Seremban"),
    ("negeri sembilan", "Negeri Sembilan"),
    ("kuantan", "Kuantan"),
    ("pahang", "Pahang"),
    ("alor setar", "Alor Setar"),
    ("kedah", "Kedah"),
    ("kota bharu", "Kota Bharu"),
    ("kelantan", "Kelantan"),
    ("kuala terengganu", "Kuala Terengganu"),
    ("terengganu", "Terengganu"),
    ("kota kinabalu", "Kota Kinabalu"),
    ("sabah", "Sabah"),
    ("kuching", "Kuching"),
    ("sarawak", "Sarawak"),
];

lazy_static! {
    static ref DEFAULT_GAZETTEER: Gazetteer = Gazetteer::new(&[]).expect("valid gazetteer patterns");
}

/// Built-in place names plus any configured extras
#[derive(Debug, Clone)]
pub struct Gazetteer {
    matcher: AhoCorasick,
    names: Vec<String>,
}

impl Default for Gazetteer {
    fn default() -> Self {
        DEFAULT_GAZETTEER.clone()
    }
}

impl Gazetteer {
    pub fn new(extra: &[String]) -> Result<Self> {
        let mut patterns: Vec<String> = GAZETTEER.iter().map(|(p, _)| p.to_string()).collect();
        let mut names: Vec<String> = GAZETTEER.iter().map(|(_, name)| name.to_string()).collect();

        for name in extra {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                continue;
            }
            patterns.push(trimmed.to_lowercase());
            names.push(trimmed.to_string());
        }

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(&patterns)
            .map_err(|e| JobMatcherError::Matcher(format!("Failed to build gazetteer: {}", e)))?;

        Ok(Self { matcher, names })
    }

    /// Earliest place mentioned in `text` and the span it occupies
    pub fn find(&self, text: &str) -> Option<(&str, Range<usize>)> {
        first_bounded_match(&self.matcher, text).map(|(pattern, span)| (self.names[pattern].as_str(), span))
    }

    /// Canonical names of every place in `text`, in order of appearance
    pub fn places<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.matcher
            .find_iter(text)
            .filter(move |m| is_word_bounded(text, m.start(), m.end()))
            .map(move |m| self.names[m.pattern().as_usize()].as_str())
    }

    /// Canonical name of a location string such as a posting's "KL" or "Petaling Jaya, Selangor"
    pub fn canonical<'a>(&'a self, location: &'a str) -> Option<&'a str> {
        self.places(location).next()
    }
}

/// Earliest match whose span sits on word boundaries
pub(crate) fn first_bounded_match(matcher: &AhoCorasick, text: &str) -> Option<(usize, Range<usize>)> {
    matcher
        .find_iter(text)
        .find(|m| is_word_bounded(text, m.start(), m.end()))
        .map(|m| (m.pattern().as_usize(), m.range()))
}

fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.map_or(false, char::is_alphanumeric) && !after.map_or(false, char::is_alphanumeric)
}
