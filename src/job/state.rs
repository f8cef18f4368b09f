//! Job identity, lifecycle states and the transition rules between them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::StorageError;

/// Unique job identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for JobId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Lifecycle state of an analysis job.
///
/// ```text
/// pending → processing → scanning_code → analyzing_dependencies
///         → generating_recommendations → completed
///
/// any non-terminal state → failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Processing,
    ScanningCode,
    AnalyzingDependencies,
    GeneratingRecommendations,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::ScanningCode => "scanning_code",
            JobStatus::AnalyzingDependencies => "analyzing_dependencies",
            JobStatus::GeneratingRecommendations => "generating_recommendations",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    /// Progress reported on entering this state. `failed` keeps whatever was reached.
    pub fn entry_progress(&self) -> Option<u8> {
        match self {
            JobStatus::Pending => Some(0),
            JobStatus::Processing => Some(10),
            JobStatus::ScanningCode => Some(25),
            JobStatus::AnalyzingDependencies => Some(50),
            JobStatus::GeneratingRecommendations => Some(75),
            JobStatus::Completed => Some(100),
            JobStatus::Failed => None,
        }
    }

    /// Position along the happy path; `failed` has none.
    fn rank(&self) -> Option<u8> {
        match self {
            JobStatus::Pending => Some(0),
            JobStatus::Processing => Some(1),
            JobStatus::ScanningCode => Some(2),
            JobStatus::AnalyzingDependencies => Some(3),
            JobStatus::GeneratingRecommendations => Some(4),
            JobStatus::Completed => Some(5),
            JobStatus::Failed => None,
        }
    }

    /// Whether `self → next` is a legal transition.
    ///
    /// Staying in the same non-terminal state is allowed so progress can
    /// advance within a phase.
    pub fn can_transition_to(&self, next: JobStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match (self.rank(), next.rank()) {
            (_, None) => true,
            (Some(from), Some(to)) => to == from || to == from + 1,
            (None, Some(_)) => false,
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Progress bounds of the scanning phase; per-file progress is interpolated between them.
pub const SCANNING_PROGRESS_START: u8 = 25;
pub const SCANNING_PROGRESS_END: u8 = 49;

/// Progress after `done` of `total` files have been scanned.
pub fn scanning_progress(done: usize, total: usize) -> u8 {
    if total == 0 {
        return SCANNING_PROGRESS_END;
    }
    let span = (SCANNING_PROGRESS_END - SCANNING_PROGRESS_START) as usize;
    SCANNING_PROGRESS_START + (span * done.min(total) / total) as u8
}

/// Validates status and progress updates for one job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobStateMachine {
    status: JobStatus,
    progress: u8,
}

impl JobStateMachine {
    pub fn new() -> Self {
        Self {
            status: JobStatus::Pending,
            progress: 0,
        }
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Move to `next` at `progress`.
    pub fn advance(&mut self, next: JobStatus, progress: u8) -> Result<(), StorageError> {
        if next == JobStatus::Failed {
            return self.fail();
        }
        if !self.status.can_transition_to(next) {
            return Err(StorageError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        if progress < self.progress || progress > 100 {
            return Err(StorageError::ProgressRegression {
                from: self.progress,
                to: progress,
            });
        }
        if next == JobStatus::Completed && progress != 100 {
            return Err(StorageError::Rejected(format!(
                "completed job must report progress 100, got {}",
                progress
            )));
        }

        self.status = next;
        self.progress = progress;
        Ok(())
    }

    /// Move to `failed`, keeping the progress reached so far.
    pub fn fail(&mut self) -> Result<(), StorageError> {
        if self.status.is_terminal() {
            return Err(StorageError::InvalidTransition {
                from: self.status,
                to: JobStatus::Failed,
            });
        }
        self.status = JobStatus::Failed;
        Ok(())
    }
}

impl Default for JobStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HAPPY_PATH: [JobStatus; 5] = [
        JobStatus::Processing,
        JobStatus::ScanningCode,
        JobStatus::AnalyzingDependencies,
        JobStatus::GeneratingRecommendations,
        JobStatus::Completed,
    ];

    #[test]
    fn test_happy_path() {
        let mut sm = JobStateMachine::new();
        for status in HAPPY_PATH {
            let progress = status.entry_progress().unwrap();
            sm.advance(status, progress).unwrap();
        }
        assert_eq!(sm.status(), JobStatus::Completed);
        assert_eq!(sm.progress(), 100);
    }

    #[test]
    fn test_cannot_skip_states() {
        let mut sm = JobStateMachine::new();
        let err = sm.advance(JobStatus::ScanningCode, 25).unwrap_err();
        assert_eq!(
            err,
            StorageError::InvalidTransition {
                from: JobStatus::Pending,
                to: JobStatus::ScanningCode
            }
        );
    }

    #[test]
    fn test_progress_within_phase() {
        let mut sm = JobStateMachine::new();
        sm.advance(JobStatus::Processing, 10).unwrap();
        sm.advance(JobStatus::ScanningCode, 25).unwrap();
        sm.advance(JobStatus::ScanningCode, 37).unwrap();
        assert!(sm.advance(JobStatus::ScanningCode, 30).is_err());
        assert_eq!(sm.progress(), 37);
    }

    #[test]
    fn test_fail_from_any_non_terminal_state() {
        for steps in 0..HAPPY_PATH.len() - 1 {
            let mut sm = JobStateMachine::new();
            for status in &HAPPY_PATH[..steps] {
                sm.advance(*status, status.entry_progress().unwrap()).unwrap();
            }
            let reached = sm.progress();
            sm.advance(JobStatus::Failed, 0).unwrap();
            assert_eq!(sm.status(), JobStatus::Failed);
            assert_eq!(sm.progress(), reached);
        }
    }

    #[test]
    fn test_terminal_states_are_final() {
        let mut sm = JobStateMachine::new();
        sm.fail().unwrap();
        assert!(sm.fail().is_err());
        assert!(sm.advance(JobStatus::Processing, 10).is_err());
    }

    #[test]
    fn test_completed_requires_full_progress() {
        let mut sm = JobStateMachine::new();
        for status in &HAPPY_PATH[..4] {
            sm.advance(*status, status.entry_progress().unwrap()).unwrap();
        }
        assert!(sm.advance(JobStatus::Completed, 90).is_err());
    }

    #[test]
    fn test_scanning_progress() {
        assert_eq!(scanning_progress(0, 4), 25);
        assert_eq!(scanning_progress(2, 4), 37);
        assert_eq!(scanning_progress(4, 4), 49);
        assert_eq!(scanning_progress(0, 0), 49);
    }

    #[test]
    fn test_job_id_parse() {
        let id = JobId::new();
        assert_eq!(id.to_string().parse::<JobId>().unwrap(), id);
        assert!("not-a-uuid".parse::<JobId>().is_err());
    }
}
