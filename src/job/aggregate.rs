//! Merges per-file results into job-level results and persists them.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::StorageError;
use super::pipeline::FileAnalysis;
use super::state::JobId;
use super::storage::Storage;

/// Totals reported once a job's results are persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateSummary {
    pub findings: usize,
    pub recommendations: usize,
    pub dependencies: usize,
    pub files_analyzed: usize,
}

/// Collects file analyses in processing order.
///
/// Persisted order is file order, then emission order within a file. Each
/// analysis is kept with the file's submission index.
pub struct ResultAggregator {
    job_id: JobId,
    files: Vec<(usize, FileAnalysis)>,
    summary: AggregateSummary,
}

impl ResultAggregator {
    pub fn new(job_id: JobId) -> Self {
        Self {
            job_id,
            files: Vec::new(),
            summary: AggregateSummary::default(),
        }
    }

    pub fn add(&mut self, index: usize, analysis: FileAnalysis) {
        self.summary.files_analyzed += 1;
        self.files.push((index, analysis));
    }

    /// Persist every dependency.
    pub async fn persist_dependencies(&mut self, storage: &dyn Storage) -> Result<(), StorageError> {
        for (_, file) in &self.files {
            for draft in &file.output.dependencies {
                storage
                    .append_dependency(self.job_id, draft.clone().attach(self.job_id))
                    .await?;
                self.summary.dependencies += 1;
            }
        }
        debug!(job_id = %self.job_id, dependencies = self.summary.dependencies, "dependencies persisted");
        Ok(())
    }

    /// Persist findings and recommendations, then mark each file processed.
    pub async fn persist_findings(&mut self, storage: &dyn Storage) -> Result<(), StorageError> {
        for (index, file) in &self.files {
            for draft in &file.output.findings {
                storage
                    .append_finding(self.job_id, draft.clone().attach(self.job_id, &file.filename))
                    .await?;
                self.summary.findings += 1;
            }
            for draft in &file.output.recommendations {
                storage
                    .append_recommendation(self.job_id, draft.clone().attach(self.job_id))
                    .await?;
                self.summary.recommendations += 1;
            }
            storage
                .mark_file_processed(self.job_id, *index, &file.filename, Utc::now())
                .await?;
        }
        debug!(
            job_id = %self.job_id,
            findings = self.summary.findings,
            recommendations = self.summary.recommendations,
            "findings persisted"
        );
        Ok(())
    }

    pub fn summary(&self) -> AggregateSummary {
        self.summary
    }
}
