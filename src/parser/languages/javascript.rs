//! JavaScript grammar configuration.

use crate::analysis::{DecisionKind, DeclarationKind, DeclarationRule, ParamRule, RuleTable};
use crate::language::Language;
use crate::parser::treesitter::{Config, TreeSitterGrammar};

/// Decision nodes shared by JavaScript and TypeScript.
pub(crate) static DECISIONS: &[(&str, DecisionKind)] = &[
    ("if_statement", DecisionKind::If),
    ("while_statement", DecisionKind::While),
    ("do_statement", DecisionKind::While),
    ("for_statement", DecisionKind::For),
    ("for_in_statement", DecisionKind::For),
    ("switch_case", DecisionKind::Case),
    ("catch_clause", DecisionKind::Catch),
];

/// Rule table for JavaScript.
pub static RULES: RuleTable = RuleTable {
    functions: &[
        DeclarationRule::new("function_declaration", DeclarationKind::Function),
        DeclarationRule::new("generator_function_declaration", DeclarationKind::Function),
    ],
    classes: &[DeclarationRule::new("class_declaration", DeclarationKind::Class)],
    imports: &["import_statement"],
    identifiers: &["identifier"],
    parameters: ParamRule {
        list_kind: "formal_parameters",
        param_kinds: &["identifier"],
    },
    decisions: DECISIONS,
};

/// Create the JavaScript grammar.
pub fn new_grammar() -> TreeSitterGrammar {
    TreeSitterGrammar::new(Config {
        language: tree_sitter_javascript::LANGUAGE.into(),
        tag: Language::JavaScript,
        rules: &RULES,
    })
}
