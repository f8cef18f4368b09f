//! Cyclomatic complexity over a whole syntax tree.
//!
//! Unlike the feature extractor, this pass descends into every node of the
//! tree.

use serde::{Deserialize, Serialize};
use tree_sitter::Node;

/// Shared decision vocabulary. Each grammar maps its own node kinds onto it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionKind {
    If,
    While,
    For,
    Case,
    Catch,
}

/// Grammar node kind to decision kind.
pub type DecisionTable = [(&'static str, DecisionKind)];

/// Look up the decision kind of a grammar node kind.
pub fn classify(kind: &str, table: &DecisionTable) -> Option<DecisionKind> {
    table
        .iter()
        .find(|(node_kind, _)| *node_kind == kind)
        .map(|(_, decision)| *decision)
}

/// CC = 1 + number of decision nodes anywhere in the tree.
pub fn complexity(root: Node, table: &DecisionTable) -> u32 {
    let mut count = 1;
    let mut cursor = root.walk();

    loop {
        if classify(cursor.node().kind(), table).is_some() {
            count += 1;
        }
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return count;
            }
        }
    }
}
