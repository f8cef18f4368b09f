//! Fact structures extracted from a parsed file.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::language::Language;

/// Kind of declaration reported by the feature extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Function,
    Method,
    Class,
    Interface,
    Enum,
    Struct,
    Record,
}

impl DeclarationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Function => "function",
            DeclarationKind::Method => "method",
            DeclarationKind::Class => "class",
            DeclarationKind::Interface => "interface",
            DeclarationKind::Enum => "enum",
            DeclarationKind::Struct => "struct",
            DeclarationKind::Record => "record",
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A function or method declared at the top level of a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DeclarationKind,
    pub parameters: Vec<String>,
    /// First line of the declaration node (0-indexed).
    pub start_line: usize,
    /// Last line of the declaration node (0-indexed, inclusive).
    pub end_line: usize,
}

/// A class-like declaration at the top level of a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DeclarationKind,
    pub start_line: usize,
    pub end_line: usize,
}

/// Normalized summary of one parsed file.
///
/// Built once per source file and never mutated afterwards. It carries no
/// reference back to the job that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub language: Language,
    pub functions: Vec<FunctionInfo>,
    pub classes: Vec<ClassInfo>,
    pub imports: Vec<String>,
    pub complexity: u32,
    pub lines_of_code: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
}

impl FeatureRecord {
    /// Degraded record: no structure, complexity 0, line count only.
    pub fn degraded(language: Language, content: &str) -> Self {
        Self {
            language,
            functions: Vec::new(),
            classes: Vec::new(),
            imports: Vec::new(),
            complexity: 0,
            lines_of_code: count_lines(content),
            parse_error: None,
        }
    }

    /// Degraded record annotated with the parser error that caused it.
    pub fn parse_failure(language: Language, content: &str, error: impl Into<String>) -> Self {
        Self {
            parse_error: Some(error.into()),
            ..Self::degraded(language, content)
        }
    }

    /// Lowercased JSON form used by the keyword heuristics.
    pub fn signal_text(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_default()
            .to_lowercase()
    }
}

/// Number of newline-delimited lines; empty content counts as one line.
pub fn count_lines(content: &str) -> usize {
    content.split('\n').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_lines() {
        assert_eq!(count_lines(""), 1);
        assert_eq!(count_lines("one"), 1);
        assert_eq!(count_lines("a\nb\nc\nd\ne"), 5);
        // A trailing newline opens one more (empty) line.
        assert_eq!(count_lines("a\nb\n"), 3);
    }

    #[test]
    fn test_degraded_record() {
        let record = FeatureRecord::degraded(Language::Unknown, "x\ny");
        assert!(record.functions.is_empty());
        assert!(record.classes.is_empty());
        assert!(record.imports.is_empty());
        assert_eq!(record.complexity, 0);
        assert_eq!(record.lines_of_code, 2);
        assert!(record.parse_error.is_none());
    }

    #[test]
    fn test_parse_failure_keeps_annotation() {
        let record = FeatureRecord::parse_failure(Language::Java, "class", "no tree");
        assert_eq!(record.parse_error.as_deref(), Some("no tree"));
        assert_eq!(record.complexity, 0);
    }

    #[test]
    fn test_signal_text_is_lowercase_json() {
        let record = FeatureRecord {
            language: Language::Python,
            functions: vec![FunctionInfo {
                name: "RunSQL".to_string(),
                kind: DeclarationKind::Function,
                parameters: vec!["query".to_string()],
                start_line: 0,
                end_line: 2,
            }],
            classes: vec![],
            imports: vec![],
            complexity: 1,
            lines_of_code: 3,
            parse_error: None,
        };

        let text = record.signal_text();
        assert!(text.contains("\"runsql\""));
        assert!(text.contains("\"language\":\"python\""));
        assert!(!text.contains("parse_error"));
    }
}
