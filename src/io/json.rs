//! JSON documents on disk
//!
//! Reading deserializes a whole file. Writing goes through a resource sink so
//! JSON output gets the same exactly-once, truncating flush as line output.

use crate::services::sink::{Accumulator, Init, SinkConfig};
use crate::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read and deserialize the JSON document stored at `path`.
pub fn read_json<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let file = File::open(path.as_ref())?;
    let value = serde_json::from_reader(BufReader::new(file))?;
    Ok(value)
}

impl<A: Serialize + 'static> SinkConfig<A> {
    /// Write the whole accumulator as one JSON document at scope exit.
    pub fn json(init: Init<A>) -> Self {
        SinkConfig::from_render(init, |acc: &A| -> Result<Vec<String>> {
            Ok(vec![serde_json::to_string(acc)?])
        })
    }

    /// Like [`SinkConfig::json`], pretty-printed.
    pub fn json_pretty(init: Init<A>) -> Self {
        SinkConfig::from_render(init, |acc: &A| -> Result<Vec<String>> {
            Ok(vec![serde_json::to_string_pretty(acc)?])
        })
    }
}

impl<A> SinkConfig<A>
where
    A: Accumulator + 'static,
    A::Item: Serialize,
{
    /// One JSON document per item. An item that fails to serialize fails the
    /// flush with [`Error::Json`](crate::Error::Json) before anything is written.
    pub fn json_lines(init: Init<A>) -> Self {
        SinkConfig::from_render(init, |acc: &A| -> Result<Vec<String>> {
            let mut lines = Vec::new();
            let mut failure = None;
            acc.for_each_item(&mut |item: &A::Item| {
                if failure.is_some() {
                    return;
                }
                match serde_json::to_string(item) {
                    Ok(line) => lines.push(line),
                    Err(e) => failure = Some(e),
                }
            });
            match failure {
                Some(e) => Err(e.into()),
                None => Ok(lines),
            }
        })
    }
}
