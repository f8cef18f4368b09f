//! Language detection from file names.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Language tag attached to every submitted file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Java,
    JavaScript,
    TypeScript,
    Python,
    CSharp,
    Cobol,
    Unknown,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::CSharp => "csharp",
            Language::Cobol => "cobol",
            Language::Unknown => "unknown",
        }
    }

    /// Map a file extension (without the dot) to a language.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "java" => Language::Java,
            "js" | "jsx" | "mjs" | "cjs" => Language::JavaScript,
            "ts" | "tsx" | "mts" => Language::TypeScript,
            "py" => Language::Python,
            "cs" => Language::CSharp,
            "cob" | "cbl" | "cobol" => Language::Cobol,
            _ => Language::Unknown,
        }
    }

    /// Whether a grammar exists for this language.
    pub fn has_grammar(&self) -> bool {
        !matches!(self, Language::Cobol | Language::Unknown)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Detect the language of a file from its name.
///
/// Only the extension is consulted, case-insensitively. Names without a
/// recognised extension map to [`Language::Unknown`].
pub fn detect(filename: &str) -> Language {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(Language::from_extension)
        .unwrap_or(Language::Unknown)
}
