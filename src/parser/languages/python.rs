//! Python grammar configuration.

use crate::analysis::{DecisionKind, DeclarationKind, DeclarationRule, ParamRule, RuleTable};
use crate::language::Language;
use crate::parser::treesitter::{Config, TreeSitterGrammar};

/// Rule table for Python.
///
/// Only bare identifiers count as parameters, so `x=1`, `*args` and typed
/// parameters are skipped. `elif` branches count as `if`, `except` as `catch`
/// and `match` arms as `case`.
pub static RULES: RuleTable = RuleTable {
    functions: &[DeclarationRule::new("function_definition", DeclarationKind::Function)],
    classes: &[DeclarationRule::new("class_definition", DeclarationKind::Class)],
    imports: &[
        "import_statement",
        "import_from_statement",
        "future_import_statement",
    ],
    identifiers: &["identifier"],
    parameters: ParamRule {
        list_kind: "parameters",
        param_kinds: &["identifier"],
    },
    decisions: &[
        ("if_statement", DecisionKind::If),
        ("elif_clause", DecisionKind::If),
        ("while_statement", DecisionKind::While),
        ("for_statement", DecisionKind::For),
        ("case_clause", DecisionKind::Case),
        ("except_clause", DecisionKind::Catch),
    ],
};

/// Create the Python grammar.
pub fn new_grammar() -> TreeSitterGrammar {
    TreeSitterGrammar::new(Config {
        language: tree_sitter_python::LANGUAGE.into(),
        tag: Language::Python,
        rules: &RULES,
    })
}
