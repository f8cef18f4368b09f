//! Analysis jobs: lifecycle, storage and orchestration.
//!
//! Each submitted job runs as one tokio task. Files are analyzed sequentially
//! inside that task; a file that cannot be analyzed is skipped, while a
//! storage failure fails the whole job.
//!
//! ```text
//! submit_job ──▶ Storage::create_job ──▶ tokio::spawn(run_job)
//!                                            │
//!        ┌───────────────────────────────────┘
//!        ▼
//!   processing ─▶ scanning_code ─▶ analyzing_dependencies ─▶ generating_recommendations ─▶ completed
//!                  (per file:        (persist                 (persist findings,
//!                   analyze_file)     dependencies)            mark files processed)
//! ```

mod aggregate;
mod error;
mod model;
mod orchestrator;
mod pipeline;
mod state;
mod storage;

pub use aggregate::{AggregateSummary, ResultAggregator};
pub use error::{FileError, JobError, Result, StorageError};
pub use model::{AnalysisDepth, AnalysisJob, FileStatus, JobFile, ProjectMetadata, SourceFile};
pub use orchestrator::{JobHandle, JobSummary, Orchestrator};
pub use pipeline::{analyze_file, FileAnalysis};
pub use state::{scanning_progress, JobId, JobStateMachine, JobStatus};
pub use storage::{InMemoryStore, Storage};
