//! Single-pass line sources over text files
//!
//! A [`LineSource`] owns one open reader. Lines are produced lazily with
//! their terminator removed, passed through a transform, and optionally
//! through a selector that can drop them. The handle is closed when the
//! source is dropped, whether or not it was read to the end.

use crate::{Error, Result};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Line transform applied to every raw line before selection.
pub type LineTransform = Box<dyn Fn(&str) -> String>;

/// Strip trailing whitespace. The default transform.
#[must_use]
pub fn rstrip(line: &str) -> String {
    line.trim_end().to_string()
}

/// Strip leading and trailing whitespace.
#[must_use]
pub fn strip_both(line: &str) -> String {
    line.trim().to_string()
}

/// Keep the line as read.
#[must_use]
pub fn keep(line: &str) -> String {
    line.to_string()
}

/// Lazy sequence of transformed lines backed by one reader.
pub struct LineSource<R = BufReader<File>> {
    reader: R,
    transform: LineTransform,
    buf: String,
    exhausted: bool,
}

impl LineSource {
    /// Open `path` for reading. The file handle is acquired here.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(Error::Validation(
                "The path to the file to be read was not supplied".to_string(),
            ));
        }

        let file = File::open(path)?;
        log::debug!("Opened line source {}", path.display());
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> LineSource<R> {
    /// Wrap an already open reader.
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            transform: Box::new(rstrip),
            buf: String::new(),
            exhausted: false,
        }
    }

    /// Replace the line transform.
    #[must_use]
    pub fn with_transform<T>(mut self, transform: T) -> Self
    where
        T: Fn(&str) -> String + 'static,
    {
        self.transform = Box::new(transform);
        self
    }

    /// Run every transformed line through `selector`, dropping lines it maps to `None`.
    pub fn select<T, S>(self, selector: S) -> Select<R, S>
    where
        S: FnMut(String) -> Option<T>,
    {
        Select {
            source: self,
            selector,
        }
    }

    fn read_raw(&mut self) -> Option<Result<&str>> {
        if self.exhausted {
            return None;
        }

        self.buf.clear();
        match self.reader.read_line(&mut self.buf) {
            Ok(0) => {
                self.exhausted = true;
                None
            }
            Ok(_) => {
                if self.buf.ends_with('\n') {
                    self.buf.pop();
                    if self.buf.ends_with('\r') {
                        self.buf.pop();
                    }
                }
                Some(Ok(self.buf.as_str()))
            }
            Err(e) => {
                self.exhausted = true;
                Some(Err(Error::Io(e)))
            }
        }
    }
}

impl<R: BufRead> Iterator for LineSource<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let raw = match self.read_raw()? {
            Ok(raw) => raw.to_string(),
            Err(e) => return Some(Err(e)),
        };
        Some(Ok((self.transform)(&raw)))
    }
}

/// Iterator returned by [`LineSource::select`].
pub struct Select<R, S> {
    source: LineSource<R>,
    selector: S,
}

impl<R, S, T> Iterator for Select<R, S>
where
    R: BufRead,
    S: FnMut(String) -> Option<T>,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.source.by_ref() {
            match line {
                Ok(line) => {
                    if let Some(selected) = (self.selector)(line) {
                        return Some(Ok(selected));
                    }
                }
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }
}

/// Return the last `n` lines of a file, terminators removed.
pub fn tail<P: AsRef<Path>>(path: P, n: usize) -> Result<Vec<String>> {
    if n == 0 {
        return Ok(Vec::new());
    }

    // Grows with the file, not with `n`
    let mut last: VecDeque<String> = VecDeque::new();
    for line in LineSource::open(path)?.with_transform(keep) {
        if last.len() == n {
            last.pop_front();
        }
        last.push_back(line?);
    }

    Ok(last.into())
}

/// Write every transformed line of `path` to `out`, one per line.
///
/// Returns the number of lines written.
pub fn print_lines<P, W, T>(path: P, out: &mut W, transform: T) -> Result<usize>
where
    P: AsRef<Path>,
    W: Write,
    T: Fn(&str) -> String + 'static,
{
    let mut count = 0;
    for line in LineSource::open(path)?.with_transform(transform) {
        writeln!(out, "{}", line?)?;
        count += 1;
    }
    Ok(count)
}
