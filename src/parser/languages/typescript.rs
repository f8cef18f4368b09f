//! TypeScript grammar configuration.
//!
//! TypeScript shares the JavaScript decision table. Class and interface names
//! are `type_identifier` nodes, so both identifier kinds are accepted.

use crate::analysis::{DeclarationKind, DeclarationRule, ParamRule, RuleTable};
use crate::language::Language;
use crate::parser::treesitter::{Config, TreeSitterGrammar};

use super::javascript::DECISIONS;

/// Rule table for TypeScript.
pub static RULES: RuleTable = RuleTable {
    functions: &[
        DeclarationRule::new("function_declaration", DeclarationKind::Function),
        DeclarationRule::new("generator_function_declaration", DeclarationKind::Function),
    ],
    classes: &[
        DeclarationRule::new("class_declaration", DeclarationKind::Class),
        DeclarationRule::new("abstract_class_declaration", DeclarationKind::Class),
        DeclarationRule::new("interface_declaration", DeclarationKind::Interface),
        DeclarationRule::new("enum_declaration", DeclarationKind::Enum),
    ],
    imports: &["import_statement"],
    identifiers: &["identifier", "type_identifier"],
    parameters: ParamRule {
        list_kind: "formal_parameters",
        param_kinds: &["required_parameter", "optional_parameter"],
    },
    decisions: DECISIONS,
};

/// Create the TypeScript grammar.
pub fn new_grammar() -> TreeSitterGrammar {
    TreeSitterGrammar::new(Config {
        language: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        tag: Language::TypeScript,
        rules: &RULES,
    })
}
