//! Search engine facade shared by the search box and the job assistant

use crate::config::Config;
use crate::error::Result;
use crate::processing::gazetteer::Gazetteer;
use crate::processing::job::{Job, ScoredJob};
use crate::processing::query_parser::{ParsedQuery, QueryParser};
use crate::processing::ranker::Ranker;
use crate::processing::scorer::Scorer;
use crate::processing::synonyms::SynonymExpander;
use log::info;

/// Parser and ranker built once from configuration. Immutable after
/// construction, so one instance can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    parser: QueryParser,
    ranker: Ranker,
}

impl SearchEngine {
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        let expander = SynonymExpander::with_custom_synonyms(&config.search.extra_synonyms);
        let gazetteer = Gazetteer::new(&config.search.extra_locations)?;
        let parser = QueryParser::with_gazetteer(expander, gazetteer.clone())?;
        let scorer =
            Scorer::new(config.scoring.clone(), config.search.max_edit_distance).with_gazetteer(gazetteer);

        info!(
            "Search engine ready: {} thesaurus terms, {} extra locations",
            parser.expander().term_count(),
            config.search.extra_locations.len()
        );

        Ok(Self {
            parser,
            ranker: Ranker::new(scorer),
        })
    }

    pub fn parse(&self, text: &str) -> ParsedQuery {
        self.parser.parse(text)
    }

    /// Ranked results for free text; empty text lists newest jobs first
    pub fn search(&self, text: &str, jobs: &[Job], limit: Option<usize>) -> Vec<ScoredJob> {
        let query = self.parser.parse(text);
        self.ranker.rank(jobs, &query, limit)
    }

    /// Ranked results with a minimum relevance score
    pub fn search_matching(&self, text: &str, jobs: &[Job], limit: Option<usize>, min_score: f32) -> Vec<ScoredJob> {
        let query = self.parser.parse(text);
        self.ranker.rank_with_floor(jobs, &query, limit, min_score)
    }

    pub fn rank(&self, jobs: &[Job], query: &ParsedQuery, limit: Option<usize>) -> Vec<ScoredJob> {
        self.ranker.rank(jobs, query, limit)
    }

    pub fn rank_with_floor(&self, jobs: &[Job], query: &ParsedQuery, limit: Option<usize>, min_score: f32) -> Vec<ScoredJob> {
        self.ranker.rank_with_floor(jobs, query, limit, min_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::job::JobStatus;
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
            created_at: Utc.with_ymd_and_hms(2024, 2, day, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_configured_synonyms_reach_ranking() {
        let mut config = Config::default();
        config
            .search
            .extra_synonyms
            .insert("picker".to_string(), vec!["fulfilment".to_string()]);
        let engine = SearchEngine::new(&config).unwrap();

        let jobs = vec![job("a", "Fulfilment associate", 1), job("b", "Cook", 2)];
        let ranked = engine.search("picker", &jobs, None);
        assert_eq!(ranked[0].job.id, "a");
        assert!(ranked[0].matched_terms.contains("fulfilment"));
    }

    #[test]
    fn test_multi_word_synonym_reaches_ranking() {
        let engine = SearchEngine::new(&Config::default()).unwrap();
        let jobs = vec![job("a", "Call Centre Agent", 1), job("b", "Cook", 2)];

        let ranked = engine.search("customer service", &jobs, None);
        assert_eq!(ranked[0].job.id, "a");
        assert_eq!(ranked[0].score, 3.0);
        assert!(ranked[0].matched_terms.contains("call centre"));
    }

    #[test]
    fn test_query_alias_matches_posting_alias() {
        let engine = SearchEngine::new(&Config::default()).unwrap();
        let mut kl = job("a", "Cook", 1);
        kl.location = Some("KL".to_string());
        let mut jb = job("b", "Cook", 2);
        jb.location = Some("JB".to_string());

        let ranked = engine.search("cook KL", &[kl, jb], None);
        assert_eq!(ranked[0].job.id, "a");
        assert_eq!(ranked[0].score, 5.0);
        assert_eq!(ranked[1].score, 3.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = Config::default();
        config.scoring.fuzzy_factor = 2.0;
        assert!(SearchEngine::new(&config).is_err());
    }

    #[test]
    fn test_search_matching_applies_floor() {
        let engine = SearchEngine::new(&Config::default()).unwrap();
        let jobs = vec![job("a", "Barista", 1), job("b", "Cook", 2)];
        let ranked = engine.search_matching("barista", &jobs, None, 1.0);
        assert_eq!(ranked.len(), 1);
    }
}
