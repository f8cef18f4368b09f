//! Heuristic analyzers that turn feature records into findings.

mod cloud;
mod dependencies;
mod runner;
mod scanner;
mod types;

pub use cloud::CloudReadinessAnalyzer;
pub use dependencies::DependencyMapper;
pub use runner::{Analyzer, AnalyzerChain, AnalyzerFailure, ChainOutput};
pub use scanner::CodeScanner;
pub use types::{
    AnalyzerOutput, Dependency, DependencyDraft, DependencyStatus, Finding, FindingDraft,
    FindingKind, LineSpan, MigrationComplexity, Priority, Recommendation, RecommendationDraft,
    RecommendationKind, Severity,
};
