//! Two resource sinks managed as one scope.
//!
//! The first sink is acquired before the second, and is also flushed before
//! the second. This is not the reverse order nested guards would give, so the
//! order is spelled out in both `close` and `Drop` instead of being left to
//! field drop order.

use super::{ResourceSink, SinkConfig, validate_destination};
use crate::{Error, Result};
use std::path::Path;
use std::result;

/// Guard over a pair of sinks flushed first-then-second.
pub struct CompositeSink<A, B> {
    first: ResourceSink<A>,
    second: ResourceSink<B>,
}

fn validate_pair(first: &Path, second: &Path) -> Result<()> {
    match (first.as_os_str().is_empty(), second.as_os_str().is_empty()) {
        (true, true) => Err(Error::Validation(
            "Both file path arguments were not supplied".to_string(),
        )),
        (true, false) => validate_destination(first, "The first file argument was not supplied"),
        (false, true) => validate_destination(second, "The second file argument was not supplied"),
        (false, false) => Ok(()),
    }
}

/// Combine the outcomes of the two flushes. Both flushes have already run.
fn combine(first: Result<()>, second: Result<()>) -> Result<()> {
    match (first, second) {
        (Ok(()), Ok(())) => Ok(()),
        (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
        (Err(first), Err(second)) => Err(Error::BothSinksFailed {
            first: Box::new(first),
            second: Box::new(second),
        }),
    }
}

impl<A, B> CompositeSink<A, B> {
    /// Validate both destinations, then open the first sink and the second.
    pub fn open<P, Q>(
        first_path: P,
        first_config: SinkConfig<A>,
        second_path: Q,
        second_config: SinkConfig<B>,
    ) -> Result<Self>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        validate_pair(first_path.as_ref(), second_path.as_ref())?;

        let mut first = ResourceSink::open(first_path, first_config)?;
        let second = match ResourceSink::open(second_path, second_config) {
            Ok(sink) => sink,
            Err(e) => {
                // The scope never started; leave the first destination alone
                first.disarm();
                return Err(e);
            }
        };

        Ok(Self { first, second })
    }

    #[must_use]
    pub fn first(&self) -> &ResourceSink<A> {
        &self.first
    }

    #[must_use]
    pub fn second(&self) -> &ResourceSink<B> {
        &self.second
    }

    /// Both accumulators, first then second.
    pub fn accumulators_mut(&mut self) -> (&mut A, &mut B) {
        (self.first.accumulator_mut(), self.second.accumulator_mut())
    }

    /// End the scope, flushing the first sink and then the second.
    ///
    /// The second flush is attempted even if the first fails. A single
    /// failure is returned as-is; two failures come back as
    /// [`Error::BothSinksFailed`].
    pub fn close(mut self) -> Result<()> {
        self.flush_in_order()
    }

    fn flush_in_order(&mut self) -> Result<()> {
        let first = self.first.flush();
        let second = self.second.flush();
        combine(first, second)
    }
}

impl<A, B> Drop for CompositeSink<A, B> {
    fn drop(&mut self) {
        if let Err(e) = self.flush_in_order() {
            log::error!("Failed to flush composite sink: {e}");
        }
    }
}

/// Run `body` against both accumulators, then flush first and second.
///
/// Error precedence follows [`super::auto_save`]: a body error wins, flush
/// errors are logged behind it.
pub fn auto_save_two<P, Q, A, B, R, E, F>(
    first_path: P,
    first_config: SinkConfig<A>,
    second_path: Q,
    second_config: SinkConfig<B>,
    body: F,
) -> result::Result<R, E>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: FnOnce(&mut A, &mut B) -> result::Result<R, E>,
    E: From<Error>,
{
    let mut sink = CompositeSink::open(first_path, first_config, second_path, second_config)?;
    let outcome = {
        let (first, second) = sink.accumulators_mut();
        body(first, second)
    };
    let flushed = sink.close();

    match outcome {
        Ok(value) => {
            flushed?;
            Ok(value)
        }
        Err(e) => {
            if let Err(flush_err) = flushed {
                log::warn!("Failed to flush composite sink after scope error: {flush_err}");
            }
            Err(e)
        }
    }
}
