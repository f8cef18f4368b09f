//! Tree-sitter based grammar implementation.
//!
//! A single generic [`TreeSitterGrammar`] is configured per language with the
//! tree-sitter language handle and the language's rule table.

use tree_sitter::{Language as TsLanguage, Parser as TsParser};

use super::Grammar;
use crate::analysis::RuleTable;
use crate::language::Language;

/// Configuration for a tree-sitter grammar.
#[derive(Clone)]
pub struct Config {
    /// The tree-sitter language
    pub language: TsLanguage,
    /// Language tag reported on feature records
    pub tag: Language,
    /// Declaration, import, parameter and decision rules
    pub rules: &'static RuleTable,
}

/// Tree-sitter backed grammar.
pub struct TreeSitterGrammar {
    config: Config,
}

impl TreeSitterGrammar {
    /// Create a new tree-sitter grammar with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl Grammar for TreeSitterGrammar {
    fn language(&self) -> Language {
        self.config.tag
    }

    fn rules(&self) -> &RuleTable {
        self.config.rules
    }

    fn parse(&self, source: &[u8]) -> anyhow::Result<tree_sitter::Tree> {
        // tree_sitter::Parser is not Sync, so one is created per parse.
        let mut parser = TsParser::new();
        parser.set_language(&self.config.language)?;
        parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("failed to parse {} source", self.config.tag))
    }
}
