//! Lazy directory listing and breadth-first traversal
//!
//! Both iterators are pull-driven: no directory is opened until the consumer
//! asks for the next node, and at most one directory handle is held at a time.
//! I/O failures are yielded as `Err` items exactly as the OS reported them.
//!
//! There is no symlink-cycle guard. A link pointing back up the hierarchy
//! makes `walk` run forever unless the descend predicate rejects it.

use super::predicate::{ALWAYS, Predicate};
use crate::models::Node;
use crate::{Error, Result};
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

fn validate_root(root: &Path, op: &str) -> Result<()> {
    if root.as_os_str().is_empty() {
        return Err(Error::Validation(format!(
            "{op} requires a path to a directory"
        )));
    }
    Ok(())
}

/// Lazily list the immediate children of `root` accepted by `file_filter`.
///
/// Fails eagerly with [`Error::Validation`] when `root` is empty. A missing or
/// unreadable root is reported on the first call to `next`.
pub fn list_children<P, F>(root: P, file_filter: F) -> Result<ListChildren<F>>
where
    P: AsRef<Path>,
    F: Fn(&Node) -> bool,
{
    let root = root.as_ref();
    validate_root(root, "list_children")?;

    Ok(ListChildren {
        root: Some(root.to_path_buf()),
        entries: None,
        file_filter,
    })
}

/// [`list_children`] with the always-true filter.
pub fn list_children_all<P: AsRef<Path>>(root: P) -> Result<ListChildren<fn(&Node) -> bool>> {
    list_children(root, ALWAYS)
}

/// Lazily walk `root` breadth-first.
///
/// Every child for which `file_filter` holds is yielded, file or directory.
/// Every directory child for which `dir_filter` holds is queued for expansion.
/// The two decisions are independent.
pub fn walk<P, F, D>(root: P, file_filter: F, dir_filter: D) -> Result<Walk<F, D>>
where
    P: AsRef<Path>,
    F: Fn(&Node) -> bool,
    D: Fn(&Node) -> bool,
{
    let root = root.as_ref();
    validate_root(root, "walk")?;

    let mut queue = VecDeque::new();
    queue.push_back(root.to_path_buf());

    Ok(Walk {
        queue,
        current: None,
        file_filter,
        dir_filter,
    })
}

/// [`walk`] with always-true filters.
pub fn walk_all<P: AsRef<Path>>(root: P) -> Result<Walk<fn(&Node) -> bool, fn(&Node) -> bool>> {
    walk(root, ALWAYS, ALWAYS)
}

/// Iterator returned by [`list_children`].
pub struct ListChildren<F> {
    // Taken on the first pull
    root: Option<PathBuf>,
    entries: Option<fs::ReadDir>,
    file_filter: F,
}

impl<F: Fn(&Node) -> bool> Iterator for ListChildren<F> {
    type Item = Result<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.root.take() {
            log::debug!("Listing {}", root.display());
            match fs::read_dir(&root) {
                Ok(entries) => self.entries = Some(entries),
                Err(e) => return Some(Err(Error::Io(e))),
            }
        }

        let entries = self.entries.as_mut()?;
        for entry in entries {
            let node = match entry.and_then(|e| Node::from_dir_entry(&e)) {
                Ok(node) => node,
                Err(e) => return Some(Err(Error::Io(e))),
            };
            if self.file_filter.test(&node) {
                return Some(Ok(node));
            }
        }

        self.entries = None;
        None
    }
}

/// Iterator returned by [`walk`].
pub struct Walk<F, D> {
    queue: VecDeque<PathBuf>,
    // Listing of the directory currently being expanded
    current: Option<fs::ReadDir>,
    file_filter: F,
    dir_filter: D,
}

impl<F, D> Walk<F, D> {
    /// Number of directories waiting to be expanded.
    #[must_use]
    pub fn pending_dirs(&self) -> usize {
        self.queue.len()
    }
}

impl<F, D> Iterator for Walk<F, D>
where
    F: Fn(&Node) -> bool,
    D: Fn(&Node) -> bool,
{
    type Item = Result<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current.is_none() {
                let dir = self.queue.pop_front()?;
                match fs::read_dir(&dir) {
                    Ok(entries) => self.current = Some(entries),
                    Err(e) => return Some(Err(Error::Io(e))),
                }
            }

            let entries = self.current.as_mut()?;
            for entry in entries {
                let node = match entry.and_then(|e| Node::from_dir_entry(&e)) {
                    Ok(node) => node,
                    Err(e) => return Some(Err(Error::Io(e))),
                };

                if node.is_dir() && self.dir_filter.test(&node) {
                    log::trace!("Queued {}", node.path.display());
                    self.queue.push_back(node.path.clone());
                }
                if self.file_filter.test(&node) {
                    return Some(Ok(node));
                }
            }

            // Directory exhausted; release its handle before opening the next
            self.current = None;
        }
    }
}
