//! Query parsing, scoring and ranking

pub mod job;
pub mod salary;
pub mod gazetteer;
pub mod synonyms;
pub mod query_parser;
pub mod scorer;
pub mod ranker;
pub mod filter;
pub mod engine;
