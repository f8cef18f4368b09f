//! Job orchestrator: submits jobs and drives each one through its lifecycle.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::detect::{AnalyzerChain, Dependency, Finding, Recommendation};

use super::aggregate::{AggregateSummary, ResultAggregator};
use super::error::{JobError, Result, StorageError};
use super::model::{AnalysisJob, ProjectMetadata, SourceFile};
use super::pipeline::analyze_file;
use super::state::{scanning_progress, JobId, JobStatus};
use super::storage::Storage;

/// Handle to a submitted job.
///
/// Dropping the handle does not stop the job.
pub struct JobHandle {
    id: JobId,
    task: JoinHandle<()>,
}

impl JobHandle {
    pub fn id(&self) -> JobId {
        self.id
    }

    /// Wait for the job's task to finish, whatever its final status.
    pub async fn wait(self) -> Result<JobId> {
        self.task.await?;
        Ok(self.id)
    }
}

/// Read-side view of a job.
#[derive(Debug, Clone, Serialize)]
pub struct JobSummary {
    pub id: JobId,
    pub metadata: ProjectMetadata,
    pub status: JobStatus,
    pub progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub files_submitted: usize,
    pub files_analyzed: usize,
    pub findings: Vec<Finding>,
    pub recommendations: Vec<Recommendation>,
    pub dependencies: Vec<Dependency>,
}

impl From<AnalysisJob> for JobSummary {
    fn from(job: AnalysisJob) -> Self {
        Self {
            id: job.id,
            files_submitted: job.files.len(),
            files_analyzed: job.files_processed(),
            metadata: job.metadata,
            status: job.status,
            progress: job.progress,
            error_message: job.error_message,
            created_at: job.created_at,
            updated_at: job.updated_at,
            completed_at: job.completed_at,
            findings: job.findings,
            recommendations: job.recommendations,
            dependencies: job.dependencies,
        }
    }
}

/// Entry point for submitting and querying analysis jobs.
#[derive(Clone)]
pub struct Orchestrator {
    storage: Arc<dyn Storage>,
    chain: Arc<AnalyzerChain>,
}

impl Orchestrator {
    pub fn new(storage: Arc<dyn Storage>, chain: AnalyzerChain) -> Self {
        Self {
            storage,
            chain: Arc::new(chain),
        }
    }

    /// Record a job and schedule its task.
    ///
    /// Returns as soon as the job exists in storage; analysis runs on a
    /// spawned tokio task, exactly one per job.
    pub async fn submit_job(
        &self,
        metadata: ProjectMetadata,
        files: Vec<SourceFile>,
    ) -> Result<JobHandle> {
        let id = self.storage.create_job(metadata, &files).await?;
        info!(job_id = %id, files = files.len(), "job submitted");

        let storage = Arc::clone(&self.storage);
        let chain = Arc::clone(&self.chain);
        let task = tokio::spawn(run_job(storage, chain, id, files));

        Ok(JobHandle { id, task })
    }

    pub async fn get_job_summary(&self, id: JobId) -> Result<JobSummary> {
        self.storage
            .get_job(id)
            .await?
            .map(JobSummary::from)
            .ok_or(JobError::JobNotFound(id))
    }
}

/// Body of a job task. Never returns an error: a fatal failure is recorded on the job.
async fn run_job(
    storage: Arc<dyn Storage>,
    chain: Arc<AnalyzerChain>,
    id: JobId,
    files: Vec<SourceFile>,
) {
    let start = Instant::now();
    let files_submitted = files.len();

    match drive(storage.as_ref(), &chain, id, files).await {
        Ok(summary) => {
            info!(
                job_id = %id,
                files_analyzed = summary.files_analyzed,
                files_submitted,
                findings = summary.findings,
                recommendations = summary.recommendations,
                dependencies = summary.dependencies,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "job completed"
            );
        }
        Err(e) => {
            error!(job_id = %id, error = %e, "job failed");
            if let Err(e) = storage.set_job_failed(id, e.to_string()).await {
                error!(job_id = %id, error = %e, "could not record job failure");
            }
        }
    }
}

async fn drive(
    storage: &dyn Storage,
    chain: &Arc<AnalyzerChain>,
    id: JobId,
    files: Vec<SourceFile>,
) -> std::result::Result<AggregateSummary, StorageError> {
    enter(storage, id, JobStatus::Processing).await?;
    enter(storage, id, JobStatus::ScanningCode).await?;

    let total = files.len();
    let mut aggregator = ResultAggregator::new(id);
    let mut progress = scanning_progress(0, total);
    for (index, file) in files.into_iter().enumerate() {
        let filename = file.filename().to_string();
        let chain = Arc::clone(chain);

        // A panic in a grammar or analyzer is confined to this file
        match tokio::task::spawn_blocking(move || analyze_file(&file, &chain)).await {
            Ok(Ok(analysis)) => aggregator.add(index, analysis),
            Ok(Err(e)) => warn!(job_id = %id, error = %e, "skipping file"),
            Err(e) => warn!(job_id = %id, file = %filename, error = %e, "file analysis panicked, skipping"),
        }

        let next = scanning_progress(index + 1, total);
        if next > progress {
            progress = next;
            storage
                .update_job_status(id, JobStatus::ScanningCode, progress)
                .await?;
        }
    }

    enter(storage, id, JobStatus::AnalyzingDependencies).await?;
    aggregator.persist_dependencies(storage).await?;

    enter(storage, id, JobStatus::GeneratingRecommendations).await?;
    aggregator.persist_findings(storage).await?;

    enter(storage, id, JobStatus::Completed).await?;
    Ok(aggregator.summary())
}

async fn enter(
    storage: &dyn Storage,
    id: JobId,
    status: JobStatus,
) -> std::result::Result<(), StorageError> {
    let progress = status.entry_progress().unwrap_or_default();
    info!(job_id = %id, status = %status, progress, "job phase");
    storage.update_job_status(id, status, progress).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::storage::InMemoryStore;

    fn orchestrator() -> (Arc<InMemoryStore>, Orchestrator) {
        let store = Arc::new(InMemoryStore::new());
        let orchestrator = Orchestrator::new(store.clone(), AnalyzerChain::default());
        (store, orchestrator)
    }

    #[tokio::test]
    async fn test_single_java_file() {
        let (_, orchestrator) = orchestrator();
        let source = r#"public static int total(int[] items, String label) {
    int sum = 0;
    for (int item : items) {
        if (item > 0) {
            sum += item;
        }
    }
    return sum;
}
"#;
        let handle = orchestrator
            .submit_job(
                ProjectMetadata::new("java"),
                vec![SourceFile::new("Total.java", source)],
            )
            .await
            .unwrap();
        let id = handle.wait().await.unwrap();

        let summary = orchestrator.get_job_summary(id).await.unwrap();
        assert_eq!(summary.status, JobStatus::Completed);
        assert_eq!(summary.progress, 100);
        assert_eq!(summary.files_analyzed, 1);
        assert!(summary.completed_at.is_some());
        assert!(summary.error_message.is_none());
    }

    #[tokio::test]
    async fn test_empty_job_completes() {
        let (store, orchestrator) = orchestrator();
        let handle = orchestrator
            .submit_job(ProjectMetadata::new("empty"), Vec::new())
            .await
            .unwrap();
        let id = handle.wait().await.unwrap();

        let summary = orchestrator.get_job_summary(id).await.unwrap();
        assert_eq!(summary.status, JobStatus::Completed);
        assert_eq!(summary.files_submitted, 0);

        let progress: Vec<u8> = store.progress_history(id).iter().map(|(_, p)| *p).collect();
        assert_eq!(progress, vec![0, 10, 25, 50, 75, 100]);
    }

    #[tokio::test]
    async fn test_unknown_job_summary() {
        let (_, orchestrator) = orchestrator();
        let err = orchestrator.get_job_summary(JobId::new()).await.unwrap_err();
        assert!(matches!(err, JobError::JobNotFound(_)));
    }
}
