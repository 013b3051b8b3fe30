//! Core services: traversal, line sources, sinks and formatting

pub mod clean;
pub mod format;
pub mod lines;
pub mod predicate;
pub mod sink;
pub mod walk;
