//! Input processing module
//! Loads job snapshots handed over by the job store

pub mod file_detector;
pub mod job_loader;
pub mod manager;
