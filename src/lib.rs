//! Modernizer - legacy code modernization analyzer.
//!
//! Modernizer ingests source files in several languages, extracts structural
//! facts (functions, classes, imports, cyclomatic complexity) with
//! tree-sitter, and runs a chain of heuristic analyzers that turn those facts
//! into findings, flagged dependencies and modernization recommendations.
//! Each submission is tracked as an asynchronous job.
//!
//! # Architecture
//!
//! - `language`: file name → language tag
//! - `parser`: grammar registry and the parse-or-degrade adapter
//! - `analysis`: feature extraction and complexity
//! - `detect`: the `Analyzer` trait, the analyzer chain and its three analyzers
//! - `job`: job state machine, storage interface, orchestrator
//! - `config`: YAML configuration of the heuristics
//! - `report`: output formatting (pretty, JSON)
//!
//! # Adding a New Language
//!
//! Add a rule table and `new_grammar` under `src/parser/languages/`, then
//! register it in `languages/mod.rs` and map its extensions in `language.rs`.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod detect;
pub mod job;
pub mod language;
pub mod parser;
pub mod report;

pub use analysis::{ClassInfo, DeclarationKind, FeatureRecord, FunctionInfo};
pub use config::Config;
pub use detect::{Analyzer, AnalyzerChain, Dependency, Finding, Recommendation};
pub use job::{
    InMemoryStore, JobHandle, JobId, JobStatus, JobSummary, Orchestrator, ProjectMetadata,
    SourceFile, Storage,
};
pub use language::Language;
pub use parser::{parse, register_grammars, Grammar, ParseOutcome};
