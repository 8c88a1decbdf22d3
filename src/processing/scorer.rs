//! Weighted field matching with an edit-distance fallback

use crate::config::ScoringConfig;
use crate::processing::gazetteer::Gazetteer;
use crate::processing::job::{normalize_job_type, Job, ScoredJob};
use crate::processing::query_parser::ParsedQuery;
use crate::processing::salary::salary_ceiling;
use log::debug;
use std::collections::BTreeSet;
use strsim::levenshtein;
use unicode_segmentation::UnicodeSegmentation;

/// Lower-cased views of the fields a job is matched on
struct JobFields {
    title: String,
    requirements: Vec<String>,
    description: String,
    title_words: Vec<String>,
    requirement_words: Vec<String>,
}

impl JobFields {
    fn from_job(job: &Job) -> Self {
        let title = job.title.to_lowercase();
        let requirements: Vec<String> = job.requirements.iter().map(|r| r.to_lowercase()).collect();
        let title_words = title.unicode_words().map(str::to_string).collect();
        let requirement_words = requirements
            .iter()
            .flat_map(|r| r.unicode_words().map(str::to_string))
            .collect();

        Self {
            title,
            description: job.description.to_lowercase(),
            requirements,
            title_words,
            requirement_words,
        }
    }
}

/// Scores a single posting against a parsed query
#[derive(Debug, Clone)]
pub struct Scorer {
    weights: ScoringConfig,
    max_edit_distance: usize,
    gazetteer: Gazetteer,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(ScoringConfig::default(), 2)
    }
}

impl Scorer {
    pub fn new(weights: ScoringConfig, max_edit_distance: usize) -> Self {
        Self {
            weights,
            max_edit_distance,
            gazetteer: Gazetteer::default(),
        }
    }

    /// Resolve posting locations against this gazetteer instead of the built-in one
    pub fn with_gazetteer(mut self, gazetteer: Gazetteer) -> Self {
        self.gazetteer = gazetteer;
        self
    }

    pub fn weights(&self) -> &ScoringConfig {
        &self.weights
    }

    pub fn score(&self, job: &Job, query: &ParsedQuery) -> ScoredJob {
        let fields = JobFields::from_job(job);
        let mut score = 0.0f32;
        let mut matched_terms = BTreeSet::new();

        for term in &query.expanded_keywords {
            let term_score = self.term_score(term, &fields);
            if term_score > 0.0 {
                score += term_score;
                matched_terms.insert(term.clone());
            }
        }

        score += self.bonus_score(job, query);

        debug!("Scored job {} at {:.2} ({} terms)", job.id, score, matched_terms.len());

        ScoredJob {
            job: job.clone(),
            score,
            matched_terms,
        }
    }

    /// Exact substring hits per field, or half-weight fuzzy hits when none
    fn term_score(&self, term: &str, fields: &JobFields) -> f32 {
        let w = &self.weights;
        let mut total = 0.0;

        if fields.title.contains(term) {
            total += w.title_weight;
        }
        if fields.requirements.iter().any(|r| r.contains(term)) {
            total += w.requirements_weight;
        }
        if fields.description.contains(term) {
            total += w.description_weight;
        }

        if total > 0.0 {
            return total;
        }

        let Some(threshold) = self.fuzzy_threshold(term) else {
            return 0.0;
        };

        if has_fuzzy_hit(term, &fields.title_words, threshold) {
            total += w.title_weight * w.fuzzy_factor;
        }
        if has_fuzzy_hit(term, &fields.requirement_words, threshold) {
            total += w.requirements_weight * w.fuzzy_factor;
        }

        total
    }

    /// Allowed edit distance for a term; short and multi-word terms get none
    fn fuzzy_threshold(&self, term: &str) -> Option<usize> {
        if term.contains(char::is_whitespace) {
            return None;
        }
        let threshold = match term.chars().count() {
            0..=3 => 0,
            4..=5 => 1,
            _ => self.max_edit_distance,
        };
        (threshold > 0).then_some(threshold.min(self.max_edit_distance))
    }

    fn bonus_score(&self, job: &Job, query: &ParsedQuery) -> f32 {
        let w = &self.weights;
        let mut bonus = 0.0;

        if let (Some(wanted), Some(actual)) = (&query.inferred_type, &job.job_type) {
            if normalize_job_type(wanted) == normalize_job_type(actual) {
                bonus += w.type_bonus;
            }
        }

        if let (Some(wanted), Some(actual)) = (&query.inferred_location, &job.location) {
            if self.location_matches(wanted, actual) {
                bonus += w.location_bonus;
            }
        }

        if query.remote && job.is_remote() {
            bonus += w.remote_bonus;
        }

        if let (Some(floor), Some(salary)) = (query.inferred_salary_floor, &job.salary) {
            match salary_ceiling(salary) {
                Some(ceiling) if ceiling >= floor => bonus += w.salary_bonus,
                Some(_) => {}
                None => debug!("Could not read salary '{}' on job {}", salary, job.id),
            }
        }

        bonus
    }

    /// Substring match either way, or the posting names the same place through an alias
    fn location_matches(&self, wanted: &str, actual: &str) -> bool {
        let wanted = wanted.trim();
        let actual = actual.trim();
        if wanted.is_empty() || actual.is_empty() {
            return false;
        }

        let wanted_lower = wanted.to_lowercase();
        let actual_lower = actual.to_lowercase();
        if actual_lower.contains(&wanted_lower) || wanted_lower.contains(&actual_lower) {
            return true;
        }

        self.gazetteer
            .places(actual)
            .any(|place| place.eq_ignore_ascii_case(wanted))
    }
}

fn has_fuzzy_hit(term: &str, words: &[String], threshold: usize) -> bool {
    let term_len = term.chars().count();
    words.iter().any(|word| {
        let word_len = word.chars().count();
        word_len.abs_diff(term_len) <= threshold && levenshtein(term, word) <= threshold
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::job::JobStatus;
    use chrono::{TimeZone, Utc};

    fn job(id: &str, title: &str) -> Job {
        Job {
            id: id.to_string(),
            title: title.to_string(),
            company: "Acme".to_string(),
            description: String::new(),
            requirements: Vec::new(),
            location: None,
            salary: None,
            job_type: None,
            is_remote: None,
            status: JobStatus::Open,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn query(terms: &[&str]) -> ParsedQuery {
        let keywords: BTreeSet<String> = terms.iter().map(|t| t.to_string()).collect();
        ParsedQuery {
            raw_text: terms.join(" "),
            expanded_keywords: keywords.clone(),
            keywords,
            ..ParsedQuery::default()
        }
    }

    #[test]
    fn test_field_weights_accumulate() {
        let mut j = job("1", "Barista");
        j.requirements = vec!["Barista experience".to_string()];
        j.description = "Friendly barista wanted".to_string();

        let scored = Scorer::default().score(&j, &query(&["barista"]));
        assert_eq!(scored.score, 6.0);
        assert!(scored.matched_terms.contains("barista"));
    }

    #[test]
    fn test_case_insensitive_substring() {
        let scored = Scorer::default().score(&job("1", "Head BARISTA (Weekend)"), &query(&["barista"]));
        assert_eq!(scored.score, 3.0);
    }

    #[test]
    fn test_fuzzy_title_hit_is_half_weight() {
        let scored = Scorer::default().score(&job("1", "Barrista"), &query(&["barista"]));
        assert_eq!(scored.score, 1.5);
        assert!(scored.matched_terms.contains("barista"));
    }

    #[test]
    fn test_exact_beats_fuzzy() {
        let scorer = Scorer::default();
        let q = query(&["barista"]);
        let exact = scorer.score(&job("a", "Barista"), &q);
        let fuzzy = scorer.score(&job("b", "Barrista"), &q);
        assert!(fuzzy.score > 0.0);
        assert!(exact.score >= fuzzy.score);
    }

    #[test]
    fn test_short_terms_never_fuzzy() {
        let scored = Scorer::default().score(&job("1", "Cook"), &query(&["bar"]));
        assert_eq!(scored.score, 0.0);
        assert!(scored.matched_terms.is_empty());
    }

    #[test]
    fn test_unknown_term_scores_zero() {
        let scored = Scorer::default().score(&job("1", "Cashier"), &query(&["astronaut"]));
        assert_eq!(scored.score, 0.0);
    }

    #[test]
    fn test_type_and_location_bonus() {
        let mut j = job("1", "Waiter");
        j.job_type = Some("Part Time".to_string());
        j.location = Some("Kuala Lumpur, Malaysia".to_string());

        let mut q = query(&[]);
        q.inferred_type = Some("Part-time".to_string());
        q.inferred_location = Some("Kuala Lumpur".to_string());

        assert_eq!(Scorer::default().score(&j, &q).score, 4.0);
    }

    #[test]
    fn test_location_alias_on_posting() {
        let mut j = job("1", "Cook");
        j.location = Some("KL".to_string());

        let mut q = query(&["cook"]);
        q.inferred_location = Some("Kuala Lumpur".to_string());

        assert_eq!(Scorer::default().score(&j, &q).score, 5.0);

        j.location = Some("Bangsar, KL".to_string());
        assert_eq!(Scorer::default().score(&j, &q).score, 5.0);

        j.location = Some("Klang".to_string());
        assert_eq!(Scorer::default().score(&j, &q).score, 3.0);
    }

    #[test]
    fn test_type_alias_on_posting() {
        let mut j = job("1", "Cook");
        j.job_type = Some("Intern".to_string());

        let mut q = query(&["cook"]);
        q.inferred_type = Some("Internship".to_string());

        assert_eq!(Scorer::default().score(&j, &q).score, 5.0);
    }

    #[test]
    fn test_missing_fields_earn_no_bonus() {
        let mut q = query(&[]);
        q.inferred_type = Some("Part-time".to_string());
        q.inferred_location = Some("Penang".to_string());
        q.inferred_salary_floor = Some(1500.0);
        q.remote = true;

        assert_eq!(Scorer::default().score(&job("1", "Waiter"), &q).score, 0.0);
    }

    #[test]
    fn test_salary_floor_bonus() {
        let mut q = query(&[]);
        q.inferred_salary_floor = Some(2000.0);

        let mut paid = job("1", "Waiter");
        paid.salary = Some("RM 1,800 - RM 2,500".to_string());
        let mut low = job("2", "Waiter");
        low.salary = Some("RM 1,500".to_string());
        let mut vague = job("3", "Waiter");
        vague.salary = Some("Negotiable".to_string());

        let scorer = Scorer::default();
        assert_eq!(scorer.score(&paid, &q).score, 1.0);
        assert_eq!(scorer.score(&low, &q).score, 0.0);
        assert_eq!(scorer.score(&vague, &q).score, 0.0);
    }

    #[test]
    fn test_monotonic_in_title_terms() {
        let scorer = Scorer::default();
        let j = job("1", "Barista and cashier");
        let base = scorer.score(&j, &query(&["barista"]));
        let more = scorer.score(&j, &query(&["barista", "cashier"]));
        assert!(more.score > base.score);
    }

    #[test]
    fn test_input_job_untouched() {
        let j = job("1", "Barista");
        let before = j.clone();
        let scored = Scorer::default().score(&j, &query(&["barista"]));
        assert_eq!(j, before);
        assert_eq!(scored.job, before);
    }
}
