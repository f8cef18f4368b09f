//! Language-specific grammar configurations.
//!
//! Each language module provides:
//! - The rule table (declaration, import, parameter and decision node kinds)
//! - A factory creating the tree-sitter grammar
//!
//! Adding a grammar means adding one module here and one arm to
//! [`for_language`].

pub mod csharp;
pub mod java;
pub mod javascript;
pub mod python;
pub mod typescript;

use once_cell::sync::OnceCell;

use super::treesitter::TreeSitterGrammar;
use super::Grammar;
use crate::language::Language;

static CSHARP_GRAMMAR: OnceCell<TreeSitterGrammar> = OnceCell::new();
static JAVA_GRAMMAR: OnceCell<TreeSitterGrammar> = OnceCell::new();
static JAVASCRIPT_GRAMMAR: OnceCell<TreeSitterGrammar> = OnceCell::new();
static PYTHON_GRAMMAR: OnceCell<TreeSitterGrammar> = OnceCell::new();
static TYPESCRIPT_GRAMMAR: OnceCell<TreeSitterGrammar> = OnceCell::new();

/// Register all available grammars.
///
/// Idempotent. [`for_language`] initialises grammars on first use, so calling
/// this is only needed to pay the setup cost up front.
pub fn register_grammars() {
    CSHARP_GRAMMAR.get_or_init(csharp::new_grammar);
    JAVA_GRAMMAR.get_or_init(java::new_grammar);
    JAVASCRIPT_GRAMMAR.get_or_init(javascript::new_grammar);
    PYTHON_GRAMMAR.get_or_init(python::new_grammar);
    TYPESCRIPT_GRAMMAR.get_or_init(typescript::new_grammar);
}

/// Get the grammar for a language tag.
///
/// Returns None for languages without a grammar (`cobol`, `unknown`).
pub fn for_language(language: Language) -> Option<&'static dyn Grammar> {
    let grammar = match language {
        Language::CSharp => CSHARP_GRAMMAR.get_or_init(csharp::new_grammar),
        Language::Java => JAVA_GRAMMAR.get_or_init(java::new_grammar),
        Language::JavaScript => JAVASCRIPT_GRAMMAR.get_or_init(javascript::new_grammar),
        Language::Python => PYTHON_GRAMMAR.get_or_init(python::new_grammar),
        Language::TypeScript => TYPESCRIPT_GRAMMAR.get_or_init(typescript::new_grammar),
        Language::Cobol | Language::Unknown => return None,
    };
    Some(grammar as &'static dyn Grammar)
}

/// Languages that have a grammar.
pub fn supported_languages() -> Vec<Language> {
    vec![
        Language::CSharp,
        Language::Java,
        Language::JavaScript,
        Language::Python,
        Language::TypeScript,
    ]
}
