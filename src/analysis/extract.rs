//! Feature extraction from the top level of a syntax tree.
//!
//! Only the immediate children of the root are inspected. A method declared
//! inside a class, or a function nested in another function, is not reported.

use tree_sitter::Node;

use super::facts::{ClassInfo, FunctionInfo};
use super::rules::RuleTable;

/// Declarations and imports found at the top level of a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    pub functions: Vec<FunctionInfo>,
    pub classes: Vec<ClassInfo>,
    pub imports: Vec<String>,
}

/// Scan the root's direct children against the grammar's rule table.
pub fn extract(root: Node, source: &[u8], rules: &RuleTable) -> Extracted {
    let mut extracted = Extracted::default();
    let mut cursor = root.walk();

    for child in root.children(&mut cursor) {
        let node_kind = child.kind();

        if let Some(kind) = rules.function_kind(node_kind) {
            extracted.functions.push(FunctionInfo {
                name: declaration_name(child, source, rules),
                kind,
                parameters: parameters(child, source, rules),
                start_line: child.start_position().row,
                end_line: child.end_position().row,
            });
        } else if let Some(kind) = rules.class_kind(node_kind) {
            extracted.classes.push(ClassInfo {
                name: declaration_name(child, source, rules),
                kind,
                start_line: child.start_position().row,
                end_line: child.end_position().row,
            });
        } else if rules.is_import(node_kind) {
            extracted.imports.push(node_text(child, source).to_string());
        }
    }

    extracted
}

fn node_text<'a>(node: Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

/// First identifier-kind child, or the node's own text when there is none.
fn declaration_name(node: Node, source: &[u8], rules: &RuleTable) -> String {
    let mut cursor = node.walk();
    let name = node
        .children(&mut cursor)
        .find(|c| rules.is_identifier(c.kind()))
        .map(|c| node_text(c, source))
        .unwrap_or_else(|| node_text(node, source));
    name.to_string()
}

fn parameters(node: Node, source: &[u8], rules: &RuleTable) -> Vec<String> {
    let rule = rules.parameters;
    let mut cursor = node.walk();
    let Some(list) = node.children(&mut cursor).find(|c| c.kind() == rule.list_kind) else {
        return Vec::new();
    };

    let mut list_cursor = list.walk();
    list.children(&mut list_cursor)
        .filter(|p| rule.param_kinds.contains(&p.kind()))
        .map(|p| node_text(p, source).to_string())
        .collect()
}
