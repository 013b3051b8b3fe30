//! Scoped output sinks that persist an accumulator exactly once.
//!
//! A [`ResourceSink`] owns an accumulator for the duration of a scope. When the
//! scope ends, through [`ResourceSink::close`] or by being dropped on an early
//! return or panic, the accumulator (or a selection of it) is formatted one
//! item per line and written to the destination, truncating it.
//!
//! The flush also happens when the code filling the accumulator failed
//! partway, so the destination reflects whatever was added before the failure.
//! Callers that need all-or-nothing output must write to a temporary path and
//! rename it themselves.

pub mod composite;

use crate::services::format::{display, ensure_newline};
use crate::{Error, Result};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt::Display;
use std::fs::File;
use std::hash::BuildHasher;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::result;

/// Container a sink can flush item by item.
///
/// Sequences and sets yield their elements in iteration order; maps yield
/// their keys. Use a selector to flush any other view.
pub trait Accumulator {
    type Item;

    fn for_each_item(&self, f: &mut dyn FnMut(&Self::Item));
}

impl<T> Accumulator for Vec<T> {
    type Item = T;

    fn for_each_item(&self, f: &mut dyn FnMut(&T)) {
        self.iter().for_each(f);
    }
}

impl<T> Accumulator for VecDeque<T> {
    type Item = T;

    fn for_each_item(&self, f: &mut dyn FnMut(&T)) {
        self.iter().for_each(f);
    }
}

impl<T> Accumulator for BTreeSet<T> {
    type Item = T;

    fn for_each_item(&self, f: &mut dyn FnMut(&T)) {
        self.iter().for_each(f);
    }
}

impl<T, S: BuildHasher> Accumulator for HashSet<T, S> {
    type Item = T;

    fn for_each_item(&self, f: &mut dyn FnMut(&T)) {
        self.iter().for_each(f);
    }
}

impl<K, V> Accumulator for BTreeMap<K, V> {
    type Item = K;

    fn for_each_item(&self, f: &mut dyn FnMut(&K)) {
        self.keys().for_each(f);
    }
}

impl<K, V, S: BuildHasher> Accumulator for HashMap<K, V, S> {
    type Item = K;

    fn for_each_item(&self, f: &mut dyn FnMut(&K)) {
        self.keys().for_each(f);
    }
}

/// How a sink obtains its accumulator.
pub enum Init<A> {
    /// Build a fresh accumulator when the sink opens.
    Factory(Box<dyn FnOnce() -> A>),
    /// Use an accumulator the caller already built.
    Value(A),
}

impl<A> Init<A> {
    pub fn factory<F>(factory: F) -> Self
    where
        F: FnOnce() -> A + 'static,
    {
        Init::Factory(Box::new(factory))
    }

    pub fn value(accumulator: A) -> Self {
        Init::Value(accumulator)
    }

    fn build(self) -> A {
        match self {
            Init::Factory(factory) => factory(),
            Init::Value(accumulator) => accumulator,
        }
    }
}

impl<A: Default + 'static> Default for Init<A> {
    fn default() -> Self {
        Init::Factory(Box::new(A::default))
    }
}

/// Turns the accumulator into output lines at flush time.
type Render<A> = Box<dyn Fn(&A) -> Result<Vec<String>>>;

/// Accumulator initializer plus formatter and optional selector.
pub struct SinkConfig<A> {
    init: Init<A>,
    render: Render<A>,
}

impl<A: Accumulator + 'static> SinkConfig<A> {
    /// Flush the accumulator's own items through `formatter`.
    pub fn new<F>(init: Init<A>, formatter: F) -> Self
    where
        F: Fn(&A::Item) -> String + 'static,
    {
        Self {
            init,
            render: Box::new(move |acc: &A| -> Result<Vec<String>> {
                let mut lines = Vec::new();
                acc.for_each_item(&mut |item: &A::Item| lines.push(formatter(item)));
                Ok(lines)
            }),
        }
    }
}

impl<A> SinkConfig<A>
where
    A: Accumulator + Default + 'static,
    A::Item: Display,
{
    /// Fresh default accumulator, items written with `Display`.
    #[must_use]
    pub fn lines() -> Self {
        Self::new(Init::default(), display::<A::Item>)
    }
}

impl<A: 'static> SinkConfig<A> {
    /// Flush `selector(accumulator)` through `formatter` instead of the
    /// accumulator's own items.
    pub fn with_selector<T, S, F>(init: Init<A>, selector: S, formatter: F) -> Self
    where
        S: Fn(&A) -> Vec<T> + 'static,
        F: Fn(&T) -> String + 'static,
    {
        Self {
            init,
            render: Box::new(move |acc: &A| -> Result<Vec<String>> {
                Ok(selector(acc).iter().map(&formatter).collect())
            }),
        }
    }

    /// Build a config from a fallible renderer producing every output line.
    pub(crate) fn from_render<R>(init: Init<A>, render: R) -> Self
    where
        R: Fn(&A) -> Result<Vec<String>> + 'static,
    {
        Self {
            init,
            render: Box::new(render),
        }
    }
}

pub(crate) fn validate_destination(path: &Path, message: &str) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(Error::Validation(message.to_string()));
    }
    Ok(())
}

/// Truncate `path` and write one line per entry.
fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    for line in lines {
        out.write_all(ensure_newline(line.clone()).as_bytes())?;
    }
    out.flush()?;
    Ok(())
}

/// Scoped guard owning an accumulator that is written out once at scope exit.
pub struct ResourceSink<A> {
    path: PathBuf,
    accumulator: A,
    render: Render<A>,
    flushed: bool,
}

impl<A> ResourceSink<A> {
    /// Validate the destination and instantiate the accumulator.
    ///
    /// Nothing is written until the sink is closed or dropped.
    pub fn open<P: AsRef<Path>>(path: P, config: SinkConfig<A>) -> Result<Self> {
        let path = path.as_ref();
        validate_destination(path, "The file argument was not supplied")?;

        log::debug!("Opened sink for {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            accumulator: config.init.build(),
            render: config.render,
            flushed: false,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn accumulator(&self) -> &A {
        &self.accumulator
    }

    pub fn accumulator_mut(&mut self) -> &mut A {
        &mut self.accumulator
    }

    /// End the scope: write the accumulator and report any failure.
    pub fn close(mut self) -> Result<()> {
        self.flush()
    }

    pub(crate) fn flush(&mut self) -> Result<()> {
        if self.flushed {
            return Ok(());
        }
        self.flushed = true;

        let lines = (self.render)(&self.accumulator)?;
        write_lines(&self.path, &lines)?;
        log::debug!("Flushed {} lines to {}", lines.len(), self.path.display());
        Ok(())
    }

    /// Drop without writing. Used when a sibling sink fails to open.
    pub(crate) fn disarm(&mut self) {
        self.flushed = true;
    }
}

impl<A> Drop for ResourceSink<A> {
    fn drop(&mut self) {
        if self.flushed {
            return;
        }
        if let Err(e) = self.flush() {
            log::error!("Failed to flush sink to {}: {e}", self.path.display());
        }
    }
}

/// Run `body` against a sink's accumulator, then flush it.
///
/// The flush runs whether or not `body` succeeds. A body error wins over a
/// flush error; the latter is logged.
pub fn auto_save<P, A, R, E, F>(path: P, config: SinkConfig<A>, body: F) -> result::Result<R, E>
where
    P: AsRef<Path>,
    F: FnOnce(&mut A) -> result::Result<R, E>,
    E: From<Error>,
{
    let mut sink = ResourceSink::open(path, config)?;
    let outcome = body(sink.accumulator_mut());
    let path = sink.path().to_path_buf();
    let flushed = sink.close();

    match outcome {
        Ok(value) => {
            flushed?;
            Ok(value)
        }
        Err(e) => {
            if let Err(flush_err) = flushed {
                log::warn!(
                    "Failed to flush {} after scope error: {flush_err}",
                    path.display()
                );
            }
            Err(e)
        }
    }
}
