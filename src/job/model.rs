//! Job data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::detect::{Dependency, Finding, Recommendation};
use crate::language::{self, Language};

use super::error::FileError;
use super::state::{JobId, JobStatus};

/// Project-level information supplied on submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_platform: Option<String>,
    #[serde(default)]
    pub analysis_depth: AnalysisDepth,
}

impl ProjectMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            target_platform: None,
            analysis_depth: AnalysisDepth::default(),
        }
    }
}

/// Requested analysis depth. Recorded with the job; the heuristics do not vary by it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisDepth {
    Quick,
    #[default]
    Standard,
    Comprehensive,
}

/// One submitted file. Immutable once created.
#[derive(Debug, Clone)]
pub struct SourceFile {
    filename: String,
    content: Vec<u8>,
    language: Language,
}

impl SourceFile {
    pub fn new(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        let filename = filename.into();
        let language = language::detect(&filename);
        Self {
            filename,
            content: content.into(),
            language,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// Content decoded as UTF-8.
    pub fn text(&self) -> Result<&str, FileError> {
        std::str::from_utf8(&self.content).map_err(|source| FileError::Decode {
            filename: self.filename.clone(),
            source,
        })
    }
}

/// Processing status of a file within its job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Uploaded,
    Processed,
}

/// A job's record of one of its files (content is not retained).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFile {
    pub filename: String,
    pub language: Language,
    pub size: usize,
    pub status: FileStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<Utc>>,
}

impl From<&SourceFile> for JobFile {
    fn from(file: &SourceFile) -> Self {
        Self {
            filename: file.filename().to_string(),
            language: file.language(),
            size: file.size(),
            status: FileStatus::Uploaded,
            processed_at: None,
        }
    }
}

/// One submitted project's analysis and its accumulated results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisJob {
    pub id: JobId,
    pub metadata: ProjectMetadata,
    pub status: JobStatus,
    pub progress: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
    pub files: Vec<JobFile>,
    pub findings: Vec<Finding>,
    pub recommendations: Vec<Recommendation>,
    pub dependencies: Vec<Dependency>,
}

impl AnalysisJob {
    /// A freshly submitted job in `pending` state.
    pub fn new(metadata: ProjectMetadata, files: &[SourceFile]) -> Self {
        let now = Utc::now();
        Self {
            id: JobId::new(),
            metadata,
            status: JobStatus::Pending,
            progress: 0,
            created_at: now,
            updated_at: now,
            completed_at: None,
            error_message: None,
            files: files.iter().map(JobFile::from).collect(),
            findings: Vec::new(),
            recommendations: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn files_processed(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.status == FileStatus::Processed)
            .count()
    }
}
