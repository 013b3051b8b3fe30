//! Line clean-up with optional write-back
//!
//! [`CleanFile`] reads every line of a file into a buffer, mapping and
//! optionally sorting/deduplicating them. The buffer may be edited further and,
//! when saving is enabled, is written back through a [`ResourceSink`] when the
//! `CleanFile` is closed or dropped.

use super::lines::{LineSource, keep};
use super::sink::{Init, ResourceSink, SinkConfig};
use crate::{Error, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Options for [`CleanFile::open`]
#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    /// Write the cleaned lines when the scope ends.
    pub save_back: bool,
    /// Destination for the cleaned lines; defaults to the source file.
    pub save_to: Option<PathBuf>,
    pub sort: bool,
    /// Remove repeated lines, keeping the first occurrence.
    pub dedupe: bool,
    /// Remove lines that are empty after mapping.
    pub drop_blank: bool,
}

enum Buffer {
    Plain(Vec<String>),
    Saving(ResourceSink<Vec<String>>),
}

/// Cleaned lines of one file.
pub struct CleanFile {
    source: PathBuf,
    buffer: Buffer,
}

impl CleanFile {
    /// Read and clean `path`. The source handle is closed before this returns.
    pub fn open<P, M>(path: P, options: &CleanOptions, mut mapfn: M) -> Result<Self>
    where
        P: AsRef<Path>,
        M: FnMut(String) -> String,
    {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(Error::Validation(
                "The path to the file to be read was not supplied".to_string(),
            ));
        }

        let mut lines = Vec::new();
        for line in LineSource::open(path)?.with_transform(keep) {
            let line = mapfn(line?);
            if options.drop_blank && line.trim().is_empty() {
                continue;
            }
            lines.push(line);
        }

        if options.sort {
            lines.sort();
        }
        if options.dedupe {
            let mut seen = HashSet::new();
            lines.retain(|line| seen.insert(line.clone()));
        }

        log::debug!("Cleaned {} lines from {}", lines.len(), path.display());

        let buffer = if options.save_back {
            let dest = options.save_to.as_deref().unwrap_or(path);
            Buffer::Saving(ResourceSink::open(
                dest,
                SinkConfig::new(Init::value(lines), String::clone),
            )?)
        } else {
            Buffer::Plain(lines)
        };

        Ok(Self {
            source: path.to_path_buf(),
            buffer,
        })
    }

    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Where the lines will be written, if saving is enabled.
    #[must_use]
    pub fn destination(&self) -> Option<&Path> {
        match &self.buffer {
            Buffer::Plain(_) => None,
            Buffer::Saving(sink) => Some(sink.path()),
        }
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        match &self.buffer {
            Buffer::Plain(lines) => lines,
            Buffer::Saving(sink) => sink.accumulator(),
        }
    }

    pub fn lines_mut(&mut self) -> &mut Vec<String> {
        match &mut self.buffer {
            Buffer::Plain(lines) => lines,
            Buffer::Saving(sink) => sink.accumulator_mut(),
        }
    }

    /// End the scope, writing the lines back if saving is enabled.
    pub fn close(self) -> Result<()> {
        match self.buffer {
            Buffer::Plain(_) => Ok(()),
            Buffer::Saving(sink) => sink.close(),
        }
    }

    /// Take the cleaned lines without writing anything.
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        match self.buffer {
            Buffer::Plain(lines) => lines,
            Buffer::Saving(mut sink) => {
                sink.disarm();
                std::mem::take(sink.accumulator_mut())
            }
        }
    }
}
