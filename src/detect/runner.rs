//! Analyzer chain that runs every registered heuristic over a feature record.

use tracing::{debug, warn};

use crate::analysis::FeatureRecord;
use crate::config::Config;

use super::{AnalyzerOutput, CloudReadinessAnalyzer, CodeScanner, DependencyMapper};

/// A heuristic that turns a feature record into findings and recommendations.
///
/// Analyzers never see each other's output, so they can run in any order.
pub trait Analyzer: Send + Sync {
    /// Stable name used in logs and failure reports.
    fn name(&self) -> &'static str;

    fn analyze(&self, record: &FeatureRecord) -> anyhow::Result<AnalyzerOutput>;
}

/// An analyzer that failed on one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerFailure {
    pub analyzer: &'static str,
    pub message: String,
}

/// Combined output of a chain run.
#[derive(Debug, Default)]
pub struct ChainOutput {
    pub output: AnalyzerOutput,
    pub failures: Vec<AnalyzerFailure>,
}

/// Executes analyzers in registration order and concatenates their output.
pub struct AnalyzerChain {
    analyzers: Vec<Box<dyn Analyzer>>,
}

impl AnalyzerChain {
    /// An empty chain.
    pub fn new() -> Self {
        Self {
            analyzers: Vec::new(),
        }
    }

    /// The scanner, dependency mapper and cloud-readiness analyzer, configured from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new()
            .with_analyzer(CodeScanner::new(config.scanner.clone()))
            .with_analyzer(DependencyMapper::new(config.dependencies.clone()))
            .with_analyzer(CloudReadinessAnalyzer::new(config.cloud.clone()))
    }

    /// Register another analyzer.
    pub fn with_analyzer<A: Analyzer + 'static>(mut self, analyzer: A) -> Self {
        self.analyzers.push(Box::new(analyzer));
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.analyzers.iter().map(|a| a.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }

    /// Run every analyzer over `record`.
    ///
    /// A failing analyzer contributes nothing; the others still run.
    pub fn run(&self, record: &FeatureRecord) -> ChainOutput {
        let mut result = ChainOutput::default();

        for analyzer in &self.analyzers {
            match analyzer.analyze(record) {
                Ok(output) => {
                    debug!(
                        analyzer = analyzer.name(),
                        findings = output.findings.len(),
                        recommendations = output.recommendations.len(),
                        dependencies = output.dependencies.len(),
                        "analyzer finished"
                    );
                    result.output.merge(output);
                }
                Err(e) => {
                    warn!(analyzer = analyzer.name(), error = %e, "analyzer failed, dropping its output");
                    result.failures.push(AnalyzerFailure {
                        analyzer: analyzer.name(),
                        message: e.to_string(),
                    });
                }
            }
        }

        result
    }
}

impl Default for AnalyzerChain {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
