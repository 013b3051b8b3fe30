//! Persistence helpers

pub mod json;
