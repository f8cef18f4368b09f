use thiserror::Error;

use super::state::{JobId, JobStatus};

pub type Result<T> = std::result::Result<T, JobError>;

/// A failure confined to one source file. The job carries on without it.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("{filename}: content is not valid UTF-8: {source}")]
    Decode {
        filename: String,
        #[source]
        source: std::str::Utf8Error,
    },
}

/// Errors raised by a storage collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Job not found: {0}")]
    JobNotFound(JobId),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition { from: JobStatus, to: JobStatus },

    #[error("Progress cannot go from {from} to {to}")]
    ProgressRegression { from: u8, to: u8 },

    #[error("Write rejected: {0}")]
    Rejected(String),
}

impl StorageError {
    pub fn rejected<E: std::fmt::Display>(e: E) -> Self {
        Self::Rejected(e.to_string())
    }
}

/// Orchestration-level errors.
#[derive(Error, Debug)]
pub enum JobError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Job not found: {0}")]
    JobNotFound(JobId),

    #[error("Job task aborted: {0}")]
    Task(#[from] tokio::task::JoinError),
}
