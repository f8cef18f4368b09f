//! Java grammar configuration.

use crate::analysis::{DecisionKind, DeclarationKind, DeclarationRule, ParamRule, RuleTable};
use crate::language::Language;
use crate::parser::treesitter::{Config, TreeSitterGrammar};

/// Rule table for Java.
///
/// Decision nodes:
/// - if statements
/// - while and do-while loops
/// - for loops (classic and enhanced)
/// - switch groups and arrow rules
/// - catch clauses
pub static RULES: RuleTable = RuleTable {
    functions: &[DeclarationRule::new("method_declaration", DeclarationKind::Method)],
    classes: &[
        DeclarationRule::new("class_declaration", DeclarationKind::Class),
        DeclarationRule::new("interface_declaration", DeclarationKind::Interface),
        DeclarationRule::new("enum_declaration", DeclarationKind::Enum),
        DeclarationRule::new("record_declaration", DeclarationKind::Record),
    ],
    imports: &["import_declaration"],
    identifiers: &["identifier"],
    parameters: ParamRule {
        list_kind: "formal_parameters",
        param_kinds: &["formal_parameter", "spread_parameter"],
    },
    decisions: &[
        ("if_statement", DecisionKind::If),
        ("while_statement", DecisionKind::While),
        ("do_statement", DecisionKind::While),
        ("for_statement", DecisionKind::For),
        ("enhanced_for_statement", DecisionKind::For),
        ("switch_block_statement_group", DecisionKind::Case),
        ("switch_rule", DecisionKind::Case),
        ("catch_clause", DecisionKind::Catch),
    ],
};

/// Create the Java grammar.
pub fn new_grammar() -> TreeSitterGrammar {
    TreeSitterGrammar::new(Config {
        language: tree_sitter_java::LANGUAGE.into(),
        tag: Language::Java,
        rules: &RULES,
    })
}
