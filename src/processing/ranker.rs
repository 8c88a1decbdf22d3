//! Ranking a job collection against a parsed query

use crate::processing::job::{Job, ScoredJob};
use crate::processing::query_parser::ParsedQuery;
use crate::processing::scorer::Scorer;
use log::{debug, info};
use std::cmp::Ordering;

#[derive(Debug, Clone, Default)]
pub struct Ranker {
    scorer: Scorer,
}

impl Ranker {
    pub fn new(scorer: Scorer) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Score, sort and optionally truncate. Zero-score jobs are kept.
    pub fn rank(&self, jobs: &[Job], query: &ParsedQuery, limit: Option<usize>) -> Vec<ScoredJob> {
        let mut ranked = self.rank_all(jobs, query);
        if let Some(limit) = limit {
            ranked.truncate(limit);
        }
        ranked
    }

    /// Like `rank`, but drops results scoring below `min_score` before truncating
    pub fn rank_with_floor(
        &self,
        jobs: &[Job],
        query: &ParsedQuery,
        limit: Option<usize>,
        min_score: f32,
    ) -> Vec<ScoredJob> {
        let mut ranked = self.rank_all(jobs, query);
        let before = ranked.len();
        ranked.retain(|scored| scored.score >= min_score);
        debug!("Score floor {:.2} kept {} of {} jobs", min_score, ranked.len(), before);

        if let Some(limit) = limit {
            ranked.truncate(limit);
        }
        ranked
    }

    fn rank_all(&self, jobs: &[Job], query: &ParsedQuery) -> Vec<ScoredJob> {
        let mut ranked: Vec<ScoredJob> = if query.is_empty() {
            info!("Empty query, listing {} jobs newest first", jobs.len());
            jobs.iter().cloned().map(ScoredJob::unranked).collect()
        } else {
            info!(
                "Ranking {} jobs against {} expanded keywords",
                jobs.len(),
                query.expanded_keywords.len()
            );
            jobs.iter().map(|job| self.scorer.score(job, query)).collect()
        };

        ranked.sort_by(compare_ranked);
        ranked
    }
}

/// Score descending, then newest first, then id for a total order
fn compare_ranked(a: &ScoredJob, b: &ScoredJob) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.job.created_at.cmp(&a.job.created_at))
        .then_with(|| a.job.id.cmp(&b.job.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::job::JobStatus;
    use crate::processing::query_parser::QueryParser;
    use crate::processing::synonyms::SynonymExpander;
    use chrono::{TimeZone, Utc};

    fn job(id: &str, title: &str, day: u32) -> Job {
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
            created_at: Utc.with_ymd_and_hms(2024, 5, day, 8, 0, 0).unwrap(),
        }
    }

    fn parser() -> QueryParser {
        QueryParser::new(SynonymExpander::new()).unwrap()
    }

    fn ids(ranked: &[ScoredJob]) -> Vec<&str> {
        ranked.iter().map(|s| s.job.id.as_str()).collect()
    }

    #[test]
    fn test_empty_query_lists_newest_first() {
        let jobs = vec![job("old", "Cook", 1), job("new", "Rider", 9), job("mid", "Barista", 5)];
        let ranked = Ranker::default().rank(&jobs, &parser().parse(""), None);

        assert_eq!(ids(&ranked), vec!["new", "mid", "old"]);
        assert!(ranked.iter().all(|s| s.score == 0.0));
    }

    #[test]
    fn test_sorted_by_score() {
        let jobs = vec![job("cook", "Cook", 9), job("barista", "Barista", 1)];
        let ranked = Ranker::default().rank(&jobs, &parser().parse("barista"), None);

        assert_eq!(ids(&ranked), vec!["barista", "cook"]);
        // Zero-score jobs are not filtered
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[1].score, 0.0);
    }

    #[test]
    fn test_ties_break_on_created_at() {
        let jobs = vec![job("older", "Barista", 2), job("newer", "Barista", 8)];
        let ranked = Ranker::default().rank(&jobs, &parser().parse("barista"), None);

        assert_eq!(ranked[0].score, ranked[1].score);
        assert_eq!(ids(&ranked), vec!["newer", "older"]);
    }

    #[test]
    fn test_limit_truncation() {
        let jobs: Vec<Job> = (1..=8).map(|d| job(&format!("j{}", d), "Barista", d)).collect();
        let ranked = Ranker::default().rank(&jobs, &parser().parse("barista"), Some(5));

        assert_eq!(ranked.len(), 5);
        assert!(ranked.iter().all(|s| s.score > 0.0));
    }

    #[test]
    fn test_floor_drops_irrelevant() {
        let jobs = vec![job("cook", "Cook", 9), job("barista", "Barista", 1)];
        let ranked = Ranker::default().rank_with_floor(&jobs, &parser().parse("barista"), None, 1.0);
        assert_eq!(ids(&ranked), vec!["barista"]);
    }

    #[test]
    fn test_type_bonus_orders_otherwise_identical_jobs() {
        let mut part = job("part", "Waiter", 1);
        part.job_type = Some("Part-time".to_string());
        let mut full = job("full", "Waiter", 9);
        full.job_type = Some("Full-time".to_string());

        let ranked = Ranker::default().rank(&[full, part], &parser().parse("part-time waiter"), None);
        assert_eq!(ids(&ranked), vec!["part", "full"]);
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let jobs = vec![
            job("a", "Barista", 3),
            job("b", "Coffee runner", 3),
            job("c", "Espresso bar lead", 4),
        ];
        let ranker = Ranker::default();
        let p = parser();
        let first = ranker.rank(&jobs, &p.parse("barista"), None);
        let second = ranker.rank(&jobs, &p.parse("barista"), None);
        assert_eq!(first, second);
    }
}
