//! Per-grammar rule tables consumed by the extractor and the complexity pass.

use super::complexity::DecisionTable;
use super::facts::DeclarationKind;

/// Maps a grammar node kind to the declaration kind it reports.
#[derive(Debug, Clone, Copy)]
pub struct DeclarationRule {
    pub node_kind: &'static str,
    pub kind: DeclarationKind,
}

impl DeclarationRule {
    pub const fn new(node_kind: &'static str, kind: DeclarationKind) -> Self {
        Self { node_kind, kind }
    }
}

/// Where a declaration's parameters live.
#[derive(Debug, Clone, Copy)]
pub struct ParamRule {
    /// Kind of the parameter-list child of the declaration.
    pub list_kind: &'static str,
    /// Children of the list that count as parameters.
    pub param_kinds: &'static [&'static str],
}

/// Everything the analysis needs to know about one grammar.
#[derive(Debug, Clone, Copy)]
pub struct RuleTable {
    pub functions: &'static [DeclarationRule],
    pub classes: &'static [DeclarationRule],
    pub imports: &'static [&'static str],
    /// Node kinds accepted by the "first identifier child" naming rule.
    pub identifiers: &'static [&'static str],
    pub parameters: ParamRule,
    pub decisions: &'static DecisionTable,
}

impl RuleTable {
    pub fn function_kind(&self, node_kind: &str) -> Option<DeclarationKind> {
        lookup(self.functions, node_kind)
    }

    pub fn class_kind(&self, node_kind: &str) -> Option<DeclarationKind> {
        lookup(self.classes, node_kind)
    }

    pub fn is_import(&self, node_kind: &str) -> bool {
        self.imports.contains(&node_kind)
    }

    pub fn is_identifier(&self, node_kind: &str) -> bool {
        self.identifiers.contains(&node_kind)
    }
}

fn lookup(rules: &[DeclarationRule], node_kind: &str) -> Option<DeclarationKind> {
    rules
        .iter()
        .find(|r| r.node_kind == node_kind)
        .map(|r| r.kind)
}
