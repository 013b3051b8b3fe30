//! Output formatting for CLI

use crate::models::{Node, NodeKind};

/// One text line per node; directories get a trailing slash.
#[must_use]
pub fn format_node(node: &Node) -> String {
    match node.kind {
        NodeKind::Directory => format!("{}/", node.path.display()),
        NodeKind::File => node.path.display().to_string(),
    }
}

/// Format nodes as a JSON document with a summary block
pub fn format_json(root: &str, nodes: &[Node], error_count: usize) -> String {
    let files = nodes.iter().filter(|n| n.is_file()).count();
    let output = serde_json::json!({
        "root": root,
        "summary": {
            "files": files,
            "directories": nodes.len() - files,
            "errors": error_count,
        },
        "nodes": nodes,
    });

    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}
