//! File-system helpers: lazy walking, line sources and auto-saving sinks
//!
//! This library provides a breadth-first traversal engine with independent
//! yield/descend predicates, single-pass line readers that release their file
//! handle deterministically, and scoped output sinks that persist an in-memory
//! accumulator exactly once when their scope ends.

pub mod cli;
pub mod io;
pub mod models;
pub mod services;

pub use models::{Node, NodeKind};
pub use services::lines::LineSource;
pub use services::predicate::Predicate;
pub use services::sink::composite::{CompositeSink, auto_save_two};
pub use services::sink::{Init, ResourceSink, SinkConfig, auto_save};
pub use services::walk::{list_children, walk};

use std::result;

/// Custom error type for the library
#[derive(Debug)]
pub enum Error {
    /// A required argument was missing or empty.
    Validation(String),
    Io(std::io::Error),
    Json(serde_json::Error),
    /// Both halves of a composite sink failed to flush.
    BothSinksFailed { first: Box<Error>, second: Box<Error> },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Validation(msg) => write!(f, "Invalid input: {msg}"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::Json(e) => write!(f, "JSON error: {e}"),
            Error::BothSinksFailed { first, second } => {
                write!(f, "Both sinks failed to flush: first: {first}; second: {second}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl Error {
    /// Kind of the underlying I/O failure, if this is one.
    #[must_use]
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            Error::Io(e) => Some(e.kind()),
            _ => None,
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

/// Which node kinds a filter lets through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    Any,
    FilesOnly,
    DirsOnly,
}

/// Options used to build yield and descend predicates
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// Extensions (without the dot) a file must have to be yielded. Empty = any.
    pub extensions: Vec<String>,
    pub kind: KindFilter,
    /// Directory names that are never descended into.
    pub skip_dirs: Vec<String>,
}

impl FilterOptions {
    /// Predicate deciding whether a node is yielded.
    #[must_use]
    pub fn yield_filter(&self) -> impl Fn(&Node) -> bool + use<> {
        let kind = self.kind;
        let extensions: Vec<String> = self
            .extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
            .collect();

        move |node: &Node| {
            let kind_ok = match kind {
                KindFilter::Any => true,
                KindFilter::FilesOnly => node.is_file(),
                KindFilter::DirsOnly => node.is_dir(),
            };
            if !kind_ok {
                return false;
            }
            // Extension filters only restrict files
            if extensions.is_empty() || node.is_dir() {
                return true;
            }
            node.extension()
                .is_some_and(|ext| extensions.iter().any(|e| *e == ext.to_ascii_lowercase()))
        }
    }

    /// Predicate deciding whether a directory is descended into.
    #[must_use]
    pub fn descend_filter(&self) -> impl Fn(&Node) -> bool + use<> {
        let skip = self.skip_dirs.clone();
        move |node: &Node| node.name().is_none_or(|name| !skip.iter().any(|s| *s == name))
    }
}
