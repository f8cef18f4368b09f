//! Grammar-backed parsing of source files.
//!
//! This module provides:
//! - `Grammar` trait: the parse-to-tree capability, one implementation per language
//! - A lazily initialised registry mapping [`Language`] tags to grammars
//! - [`parse`]: the adapter that turns file content into either a syntax tree
//!   or a degraded [`FeatureRecord`]

pub mod languages;
pub mod treesitter;

use tracing::debug;

use crate::analysis::{self, count_lines, FeatureRecord, RuleTable};
use crate::language::Language;

pub use languages::{for_language, register_grammars, supported_languages};

/// Parse-to-tree capability for a single grammar.
pub trait Grammar: Send + Sync {
    /// Language tag this grammar handles.
    fn language(&self) -> Language;

    /// Rule table driving extraction and complexity for this grammar.
    fn rules(&self) -> &RuleTable;

    /// Parse source code into a tree.
    ///
    /// Returns an error only if the grammar cannot produce a tree at all.
    /// Syntax errors are recovered by tree-sitter and still yield a tree.
    fn parse(&self, source: &[u8]) -> anyhow::Result<tree_sitter::Tree>;
}

/// A successfully parsed file, kept together with its source text.
pub struct ParsedSource<'g> {
    pub grammar: &'g dyn Grammar,
    pub tree: tree_sitter::Tree,
    pub source: Vec<u8>,
    pub lines_of_code: usize,
}

impl ParsedSource<'_> {
    /// Run the feature extractor and the complexity calculator.
    pub fn into_record(self) -> FeatureRecord {
        let rules = self.grammar.rules();
        let root = self.tree.root_node();
        let extracted = analysis::extract(root, &self.source, rules);
        let complexity = analysis::complexity(root, rules.decisions);

        FeatureRecord {
            language: self.grammar.language(),
            functions: extracted.functions,
            classes: extracted.classes,
            imports: extracted.imports,
            complexity,
            lines_of_code: self.lines_of_code,
            parse_error: None,
        }
    }
}

/// Result of handing one file to the parser adapter.
pub enum ParseOutcome<'g> {
    Parsed(ParsedSource<'g>),
    /// Unsupported language or parser failure; the record is already final.
    Degraded(FeatureRecord),
}

impl ParseOutcome<'_> {
    /// Collapse the outcome into a feature record.
    pub fn into_record(self) -> FeatureRecord {
        match self {
            ParseOutcome::Parsed(parsed) => parsed.into_record(),
            ParseOutcome::Degraded(record) => record,
        }
    }
}

/// Parse `content` with the grammar registered for `language`.
///
/// Languages without a grammar degrade to an empty record without an error
/// annotation. That is an expected input, not a failure.
pub fn parse(language: Language, content: &str) -> ParseOutcome<'static> {
    match for_language(language) {
        Some(grammar) => parse_with(grammar, content),
        None => {
            debug!(language = %language, "no grammar registered, degrading");
            ParseOutcome::Degraded(FeatureRecord::degraded(language, content))
        }
    }
}

/// Parse `content` with a specific grammar.
///
/// A grammar failure degrades to an empty record carrying the error message.
pub fn parse_with<'g>(grammar: &'g dyn Grammar, content: &str) -> ParseOutcome<'g> {
    let lines_of_code = count_lines(content);
    match grammar.parse(content.as_bytes()) {
        Ok(tree) => ParseOutcome::Parsed(ParsedSource {
            grammar,
            tree,
            source: content.as_bytes().to_vec(),
            lines_of_code,
        }),
        Err(e) => {
            debug!(language = %grammar.language(), error = %e, "parse failed, degrading");
            ParseOutcome::Degraded(FeatureRecord::parse_failure(
                grammar.language(),
                content,
                e.to_string(),
            ))
        }
    }
}
