//! Rendering of search reports

pub mod report;
pub mod formatter;
