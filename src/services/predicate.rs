//! Node predicates used for yield and descend decisions
//!
//! Any `Fn(&Node) -> bool` is a [`Predicate`]. The traversal engine only ever
//! tests them; combining predicates is left to the caller.

use crate::models::Node;

/// Boolean test over a node, deciding yield or descent.
pub trait Predicate {
    fn test(&self, node: &Node) -> bool;
}

impl<F> Predicate for F
where
    F: Fn(&Node) -> bool + ?Sized,
{
    fn test(&self, node: &Node) -> bool {
        self(node)
    }
}

/// Type-erased predicate, for filters assembled at runtime.
pub type BoxedPredicate = Box<dyn Fn(&Node) -> bool>;

fn always(_node: &Node) -> bool {
    true
}

fn never(_node: &Node) -> bool {
    false
}

/// Accepts every node. Default for both yield and descend decisions.
pub const ALWAYS: fn(&Node) -> bool = always;

/// Rejects every node.
pub const NEVER: fn(&Node) -> bool = never;

/// Accepts files only.
#[must_use]
pub fn is_file(node: &Node) -> bool {
    node.is_file()
}

/// Accepts directories only.
#[must_use]
pub fn is_dir(node: &Node) -> bool {
    node.is_dir()
}

/// Accepts nodes whose extension matches `ext` (case-insensitive, leading dot optional).
#[must_use]
pub fn has_extension(ext: &str) -> impl Fn(&Node) -> bool + use<> {
    let wanted = ext.trim_start_matches('.').to_ascii_lowercase();
    move |node: &Node| node.extension().is_some_and(|e| e.eq_ignore_ascii_case(&wanted))
}

/// Accepts nodes whose final component equals `name`.
#[must_use]
pub fn name_is(name: &str) -> impl Fn(&Node) -> bool + use<> {
    let wanted = name.to_string();
    move |node: &Node| node.name() == Some(wanted.as_str())
}
