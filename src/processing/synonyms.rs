//! One-level synonym expansion over job-market vocabulary

use lazy_static::lazy_static;
use log::debug;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Head terms and the synonyms they expand to. Each synonym also expands
/// back to its head, never to its siblings.
const THESAURUS: &[(&str, &[&str])] = &[
    // Food and beverage
    ("barista", &["coffee", "espresso"]),
    ("waiter", &["waitress", "server", "f&b"]),
    ("cook", &["chef", "kitchen"]),
    ("dishwasher", &["steward", "kitchen helper"]),
    ("bartender", &["mixologist", "bar staff"]),
    ("cashier", &["checkout", "counter"]),
    // Logistics
    ("rider", &["delivery", "courier", "dispatch"]),
    ("driver", &["chauffeur", "lorry", "van driver"]),
    ("warehouse", &["storekeeper", "picker", "packer"]),
    // Retail and service
    ("retail", &["sales", "shop", "store"]),
    ("promoter", &["brand ambassador", "sampling"]),
    ("receptionist", &["front desk", "front office"]),
    ("housekeeping", &["cleaner", "room attendant"]),
    ("security", &["guard", "bouncer"]),
    ("customer service", &["call centre", "call center", "support"]),
    // Office and skills
    ("admin", &["administrative", "clerk", "data entry"]),
    ("accountant", &["accounting", "bookkeeping"]),
    ("tutor", &["teacher", "teaching", "tuition"]),
    ("developer", &["programmer", "software engineer", "coder"]),
    ("designer", &["graphic", "illustrator"]),
    ("marketing", &["social media", "digital marketing"]),
    ("event", &["events", "crew", "usher"]),
];

lazy_static! {
    static ref DEFAULT_THESAURUS: HashMap<String, BTreeSet<String>> = build_thesaurus(
        THESAURUS
            .iter()
            .map(|(head, synonyms)| (*head, synonyms.iter().copied())),
    );
}

fn build_thesaurus<'a, I, S>(entries: I) -> HashMap<String, BTreeSet<String>>
where
    I: IntoIterator<Item = (&'a str, S)>,
    S: IntoIterator<Item = &'a str>,
{
    let mut map: HashMap<String, BTreeSet<String>> = HashMap::new();

    for (head, synonyms) in entries {
        let head = head.trim().to_lowercase();
        for synonym in synonyms {
            let synonym = synonym.trim().to_lowercase();
            if synonym.is_empty() || synonym == head {
                continue;
            }
            map.entry(head.clone()).or_default().insert(synonym.clone());
            map.entry(synonym).or_default().insert(head.clone());
        }
    }

    map
}

/// Expands keywords through a fixed thesaurus
#[derive(Debug, Clone)]
pub struct SynonymExpander {
    thesaurus: HashMap<String, BTreeSet<String>>,
}

impl Default for SynonymExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl SynonymExpander {
    /// Expander over the built-in thesaurus
    pub fn new() -> Self {
        Self {
            thesaurus: DEFAULT_THESAURUS.clone(),
        }
    }

    /// Built-in thesaurus plus extra head -> synonyms entries
    pub fn with_custom_synonyms(extra: &BTreeMap<String, Vec<String>>) -> Self {
        let mut expander = Self::new();
        let custom = build_thesaurus(
            extra
                .iter()
                .map(|(head, synonyms)| (head.as_str(), synonyms.iter().map(String::as_str))),
        );

        for (term, synonyms) in custom {
            expander.thesaurus.entry(term).or_default().extend(synonyms);
        }

        expander
    }

    /// Union of the keywords and their direct synonyms
    pub fn expand(&self, keywords: &BTreeSet<String>) -> BTreeSet<String> {
        let mut expanded = keywords.clone();

        for keyword in keywords {
            if let Some(synonyms) = self.thesaurus.get(keyword) {
                debug!("Expanding '{}' with {} synonyms", keyword, synonyms.len());
                expanded.extend(synonyms.iter().cloned());
            }
        }

        expanded
    }

    /// Multi-word terms, sorted, for whole-phrase matching in query text
    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        let mut phrases: Vec<&str> = self
            .thesaurus
            .keys()
            .map(String::as_str)
            .filter(|term| term.contains(char::is_whitespace))
            .collect();
        phrases.sort_unstable();
        phrases.into_iter()
    }

    pub fn synonyms_of(&self, term: &str) -> Option<&BTreeSet<String>> {
        self.thesaurus.get(term)
    }

    pub fn term_count(&self) -> usize {
        self.thesaurus.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(terms: &[&str]) -> BTreeSet<String> {
        terms.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_spot_checks() {
        let expander = SynonymExpander::new();
        assert!(expander.expand(&set(&["barista"])).contains("coffee"));
        assert!(expander.expand(&set(&["waiter"])).contains("server"));
        assert!(expander.expand(&set(&["rider"])).contains("courier"));
        assert!(expander.synonyms_of("espresso").is_some_and(|s| s.contains("barista")));
        assert!(expander.synonyms_of("unicycle").is_none());
    }

    #[test]
    fn test_reverse_direction() {
        let expander = SynonymExpander::new();
        let expanded = expander.expand(&set(&["coffee"]));
        assert!(expanded.contains("barista"));
        // Siblings are two hops away
        assert!(!expanded.contains("espresso"));
    }

    #[test]
    fn test_keywords_are_kept() {
        let expander = SynonymExpander::new();
        let keywords = set(&["waiter", "unicycle"]);
        let expanded = expander.expand(&keywords);
        assert!(keywords.is_subset(&expanded));
    }

    #[test]
    fn test_one_level_only() {
        let expander = SynonymExpander::new();
        let once = expander.expand(&set(&["espresso"]));
        assert_eq!(once, set(&["espresso", "barista"]));
    }

    #[test]
    fn test_phrases_listed() {
        let expander = SynonymExpander::new();
        let phrases: Vec<&str> = expander.phrases().collect();
        assert!(phrases.contains(&"front desk"));
        assert!(phrases.contains(&"customer service"));
        assert!(!phrases.contains(&"barista"));
        assert!(phrases.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_custom_synonyms_merge() {
        let mut extra = BTreeMap::new();
        extra.insert("Barista".to_string(), vec!["Latte Art".to_string()]);
        let expander = SynonymExpander::with_custom_synonyms(&extra);

        let expanded = expander.expand(&set(&["barista"]));
        assert!(expanded.contains("coffee"));
        assert!(expanded.contains("latte art"));
        assert!(expander.expand(&set(&["latte art"])).contains("barista"));
    }
}
