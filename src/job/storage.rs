//! Storage collaborator interface and the bundled in-memory implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::detect::{Dependency, Finding, Recommendation};

use super::error::StorageError;
use super::model::{AnalysisJob, FileStatus, ProjectMetadata, SourceFile};
use super::state::{JobId, JobStateMachine, JobStatus};

/// Where jobs and their results live.
///
/// Every operation is keyed by [`JobId`]. Implementations are responsible for
/// isolation between concurrently running jobs.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Record a new `pending` job owning `files`.
    async fn create_job(
        &self,
        metadata: ProjectMetadata,
        files: &[SourceFile],
    ) -> Result<JobId, StorageError>;

    async fn update_job_status(
        &self,
        id: JobId,
        status: JobStatus,
        progress: u8,
    ) -> Result<(), StorageError>;

    async fn append_finding(&self, id: JobId, finding: Finding) -> Result<(), StorageError>;

    async fn append_recommendation(
        &self,
        id: JobId,
        recommendation: Recommendation,
    ) -> Result<(), StorageError>;

    async fn append_dependency(&self, id: JobId, dependency: Dependency)
        -> Result<(), StorageError>;

    /// Mark the file submitted at position `index` as processed.
    ///
    /// `filename` must match the file recorded at that position.
    async fn mark_file_processed(
        &self,
        id: JobId,
        index: usize,
        filename: &str,
        at: DateTime<Utc>,
    ) -> Result<(), StorageError>;

    async fn get_job(&self, id: JobId) -> Result<Option<AnalysisJob>, StorageError>;

    /// Move the job to `failed`, keeping the progress it reached.
    async fn set_job_failed(&self, id: JobId, message: String) -> Result<(), StorageError>;
}

struct Entry {
    job: AnalysisJob,
    machine: JobStateMachine,
    history: Vec<(JobStatus, u8)>,
}

/// Process-local storage. Jobs do not survive a restart.
#[derive(Default)]
pub struct InMemoryStore {
    jobs: RwLock<HashMap<JobId, Entry>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every (status, progress) pair the job has reported, starting at `pending`.
    pub fn progress_history(&self, id: JobId) -> Vec<(JobStatus, u8)> {
        self.jobs
            .read()
            .get(&id)
            .map(|e| e.history.clone())
            .unwrap_or_default()
    }

    fn with_job<T>(
        &self,
        id: JobId,
        f: impl FnOnce(&mut Entry) -> Result<T, StorageError>,
    ) -> Result<T, StorageError> {
        let mut jobs = self.jobs.write();
        let entry = jobs.get_mut(&id).ok_or(StorageError::JobNotFound(id))?;
        let result = f(entry)?;
        entry.job.updated_at = Utc::now();
        Ok(result)
    }
}

fn ensure_open(entry: &Entry) -> Result<(), StorageError> {
    if entry.job.status.is_terminal() {
        return Err(StorageError::Rejected(format!(
            "job {} is already {}",
            entry.job.id, entry.job.status
        )));
    }
    Ok(())
}

#[async_trait]
impl Storage for InMemoryStore {
    async fn create_job(
        &self,
        metadata: ProjectMetadata,
        files: &[SourceFile],
    ) -> Result<JobId, StorageError> {
        let job = AnalysisJob::new(metadata, files);
        let id = job.id;
        let machine = JobStateMachine::new();
        let entry = Entry {
            history: vec![(machine.status(), machine.progress())],
            job,
            machine,
        };
        self.jobs.write().insert(id, entry);
        Ok(id)
    }

    async fn update_job_status(
        &self,
        id: JobId,
        status: JobStatus,
        progress: u8,
    ) -> Result<(), StorageError> {
        self.with_job(id, |entry| {
            entry.machine.advance(status, progress)?;
            entry.job.status = entry.machine.status();
            entry.job.progress = entry.machine.progress();
            if status == JobStatus::Completed {
                entry.job.completed_at = Some(Utc::now());
            }
            entry.history.push((entry.job.status, entry.job.progress));
            Ok(())
        })
    }

    async fn append_finding(&self, id: JobId, finding: Finding) -> Result<(), StorageError> {
        self.with_job(id, |entry| {
            ensure_open(entry)?;
            entry.job.findings.push(finding);
            Ok(())
        })
    }

    async fn append_recommendation(
        &self,
        id: JobId,
        recommendation: Recommendation,
    ) -> Result<(), StorageError> {
        self.with_job(id, |entry| {
            ensure_open(entry)?;
            entry.job.recommendations.push(recommendation);
            Ok(())
        })
    }

    async fn append_dependency(
        &self,
        id: JobId,
        dependency: Dependency,
    ) -> Result<(), StorageError> {
        self.with_job(id, |entry| {
            ensure_open(entry)?;
            entry.job.dependencies.push(dependency);
            Ok(())
        })
    }

    async fn mark_file_processed(
        &self,
        id: JobId,
        index: usize,
        filename: &str,
        at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        self.with_job(id, |entry| {
            ensure_open(entry)?;
            let file = entry
                .job
                .files
                .get_mut(index)
                .filter(|f| f.filename == filename && f.status == FileStatus::Uploaded)
                .ok_or_else(|| {
                    StorageError::Rejected(format!(
                        "no pending file {} at #{} in job {}",
                        filename, index, id
                    ))
                })?;
            file.status = FileStatus::Processed;
            file.processed_at = Some(at);
            Ok(())
        })
    }

    async fn get_job(&self, id: JobId) -> Result<Option<AnalysisJob>, StorageError> {
        Ok(self.jobs.read().get(&id).map(|e| e.job.clone()))
    }

    async fn set_job_failed(&self, id: JobId, message: String) -> Result<(), StorageError> {
        self.with_job(id, |entry| {
            entry.machine.fail()?;
            entry.job.status = JobStatus::Failed;
            entry.job.error_message = Some(message);
            entry.history.push((entry.job.status, entry.job.progress));
            Ok(())
        })
    }
}
