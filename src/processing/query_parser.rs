//! Free-text query parsing: keywords, job type, location and salary hints

use crate::error::{Result, JobMatcherError};
use crate::processing::gazetteer::{first_bounded_match, Gazetteer};
use crate::processing::job::JOB_TYPES;
use crate::processing::salary::find_salary_hint;
use crate::processing::synonyms::SynonymExpander;
use aho_corasick::{AhoCorasick, MatchKind};
use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::ops::Range;

const REMOTE_PHRASES: &[&str] = &["remote", "remotely", "work from home", "wfh"];

lazy_static! {
    static ref JOB_TYPE_MATCHER: AhoCorasick = AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .match_kind(MatchKind::LeftmostLongest)
        .build(JOB_TYPES.iter().map(|(pattern, _)| *pattern))
        .expect("valid job type patterns");
    static ref REMOTE_MATCHER: AhoCorasick = AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .match_kind(MatchKind::LeftmostLongest)
        .build(REMOTE_PHRASES)
        .expect("valid remote patterns");
    static ref STOP_WORDS: HashSet<&'static str> = [
        // Articles, pronouns, auxiliaries
        "a", "an", "the", "i", "i'm", "im", "me", "my", "we", "our", "you", "your",
        "is", "am", "are", "be", "was", "will", "would", "can", "could", "should",
        "do", "does", "have", "has", "it", "its", "this", "that", "there", "some", "any",
        // Prepositions and conjunctions
        "in", "on", "at", "to", "for", "from", "with", "without", "of", "by", "about",
        "near", "around", "within", "into", "and", "or", "but", "as", "if", "than",
        // Search filler
        "job", "jobs", "looking", "look", "seeking", "search", "searching", "find",
        "want", "wanted", "need", "needs", "like", "prefer", "preferably", "please",
        "position", "positions", "role", "roles", "vacancy", "vacancies", "opening",
        "openings", "work", "working", "hiring", "apply", "hi", "hello", "help",
        "something", "anything", "area", "least", "per", "month", "hour", "hours",
    ]
    .into_iter()
    .collect();
}

/// Structured form of a search request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQuery {
    pub raw_text: String,
    pub keywords: BTreeSet<String>,
    pub expanded_keywords: BTreeSet<String>,
    pub inferred_type: Option<String>,
    pub inferred_location: Option<String>,
    pub inferred_salary_floor: Option<f64>,
    pub remote: bool,
}

impl ParsedQuery {
    /// Query carrying no signal at all; ranking falls back to browse order
    pub fn empty(raw_text: &str) -> Self {
        Self {
            raw_text: raw_text.to_string(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
            && self.inferred_type.is_none()
            && self.inferred_location.is_none()
            && self.inferred_salary_floor.is_none()
            && !self.remote
    }
}

/// Turns search-box input or an assistant request into a `ParsedQuery`
#[derive(Debug, Clone)]
pub struct QueryParser {
    expander: SynonymExpander,
    gazetteer: Gazetteer,
    phrase_matcher: AhoCorasick,
    phrases: Vec<String>,
}

impl QueryParser {
    /// Parser with the built-in gazetteer
    pub fn new(expander: SynonymExpander) -> Result<Self> {
        Self::with_gazetteer(expander, Gazetteer::default())
    }

    /// Parser with additional place names appended to the gazetteer
    pub fn with_extra_locations(expander: SynonymExpander, extra: &[String]) -> Result<Self> {
        Self::with_gazetteer(expander, Gazetteer::new(extra)?)
    }

    pub fn with_gazetteer(expander: SynonymExpander, gazetteer: Gazetteer) -> Result<Self> {
        // Multi-word thesaurus terms are matched whole before tokenizing
        let phrases: Vec<String> = expander.phrases().map(str::to_string).collect();
        let phrase_matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(&phrases)
            .map_err(|e| JobMatcherError::Matcher(format!("Failed to build phrase matcher: {}", e)))?;

        Ok(Self {
            expander,
            gazetteer,
            phrase_matcher,
            phrases,
        })
    }

    pub fn parse(&self, raw_text: &str) -> ParsedQuery {
        if raw_text.trim().is_empty() {
            return ParsedQuery::empty(raw_text);
        }

        let mut text = normalize_unicode(&raw_text.to_lowercase());

        let inferred_salary_floor = find_salary_hint(&text).map(|hint| {
            blank_span(&mut text, hint.span.clone());
            hint.amount
        });

        let inferred_type = first_bounded_match(&JOB_TYPE_MATCHER, &text).map(|(pattern, span)| {
            blank_span(&mut text, span);
            JOB_TYPES[pattern].1.to_string()
        });

        let inferred_location = self.gazetteer.find(&text).map(|(name, span)| {
            blank_span(&mut text, span);
            name.to_string()
        });

        let mut remote = false;
        while let Some((_, span)) = first_bounded_match(&REMOTE_MATCHER, &text) {
            blank_span(&mut text, span);
            remote = true;
        }

        let mut phrases = BTreeSet::new();
        while let Some((pattern, span)) = first_bounded_match(&self.phrase_matcher, &text) {
            blank_span(&mut text, span);
            phrases.insert(self.phrases[pattern].clone());
        }

        let mut keywords = self.tokenize(&text);
        keywords.extend(phrases);
        let expanded_keywords = self.expander.expand(&keywords);

        debug!(
            "Parsed query: {} keywords, {} expanded, type={:?}, location={:?}, salary={:?}, remote={}",
            keywords.len(),
            expanded_keywords.len(),
            inferred_type,
            inferred_location,
            inferred_salary_floor,
            remote
        );

        ParsedQuery {
            raw_text: raw_text.to_string(),
            keywords,
            expanded_keywords,
            inferred_type,
            inferred_location,
            inferred_salary_floor,
            remote,
        }
    }

    /// Split on anything that is not part of a vocabulary token and drop stop words
    pub fn tokenize(&self, text: &str) -> BTreeSet<String> {
        text.split(|c: char| !is_token_char(c))
            .map(|token| token.trim_matches(|c: char| c == '&' || c == '\''))
            .filter(|token| token.chars().count() > 1)
            .filter(|token| token.chars().any(|c| c.is_alphabetic()))
            .filter(|token| !STOP_WORDS.contains(*token))
            .map(|token| token.to_string())
            .collect()
    }

    pub fn expander(&self) -> &SynonymExpander {
        &self.expander
    }

    pub fn gazetteer(&self) -> &Gazetteer {
        &self.gazetteer
    }
}

fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '&' | '+' | '#' | '\'')
}

/// Overwrite a consumed span so later passes and tokenization skip it
fn blank_span(text: &mut String, span: Range<usize>) {
    let blank = " ".repeat(span.len());
    text.replace_range(span, &blank);
}

/// Normalize typographic punctuation to ASCII
fn normalize_unicode(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            '\u{2026}' => '.',
            _ => c,
        })
        .collect()
}
