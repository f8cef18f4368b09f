//! Core types for heuristic analysis results.

use serde::{Deserialize, Serialize};

use crate::job::JobId;

/// Severity levels for findings and dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            _ => Err(format!("unknown severity: {}", s)),
        }
    }
}

/// Category of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    Security,
    Performance,
    Maintainability,
    CloudReadiness,
}

impl FindingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingKind::Security => "security",
            FindingKind::Performance => "performance",
            FindingKind::Maintainability => "maintainability",
            FindingKind::CloudReadiness => "cloud_readiness",
        }
    }
}

impl std::fmt::Display for FindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Priority of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl From<Severity> for Priority {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Critical | Severity::High => Priority::High,
            Severity::Medium => Priority::Medium,
            Severity::Low => Priority::Low,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Category of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    FrameworkUpgrade,
    CloudMigration,
    CodeQuality,
}

impl RecommendationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationKind::FrameworkUpgrade => "framework_upgrade",
            RecommendationKind::CloudMigration => "cloud_migration",
            RecommendationKind::CodeQuality => "code_quality",
        }
    }
}

impl std::fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Health of a referenced library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyStatus {
    Current,
    Deprecated,
    Vulnerable,
    Outdated,
}

impl DependencyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyStatus::Current => "current",
            DependencyStatus::Deprecated => "deprecated",
            DependencyStatus::Vulnerable => "vulnerable",
            DependencyStatus::Outdated => "outdated",
        }
    }
}

impl std::fmt::Display for DependencyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Effort bucket for migrating off a dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MigrationComplexity {
    Simple,
    Moderate,
    Complex,
}

impl MigrationComplexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            MigrationComplexity::Simple => "simple",
            MigrationComplexity::Moderate => "moderate",
            MigrationComplexity::Complex => "complex",
        }
    }
}

impl std::fmt::Display for MigrationComplexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lines a finding points at (1-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSpan {
    Line(usize),
    Range(usize, usize),
}

impl LineSpan {
    /// Span covering a 0-indexed inclusive line range.
    pub fn from_rows(start_row: usize, end_row: usize) -> Self {
        if start_row == end_row {
            LineSpan::Line(start_row + 1)
        } else {
            LineSpan::Range(start_row + 1, end_row + 1)
        }
    }
}

impl std::fmt::Display for LineSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineSpan::Line(line) => write!(f, "{}", line),
            LineSpan::Range(start, end) => write!(f, "{}-{}", start, end),
        }
    }
}

/// A finding as emitted by an analyzer, before it is tied to a job and file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindingDraft {
    pub kind: FindingKind,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub lines: LineSpan,
    pub code_snippet: Option<String>,
    pub suggested_fix: Option<String>,
    pub confidence: u8,
}

impl FindingDraft {
    pub fn attach(self, job_id: JobId, filename: &str) -> Finding {
        Finding {
            job_id,
            kind: self.kind,
            severity: self.severity,
            title: self.title,
            description: self.description,
            location: format!("{}:{}", filename, self.lines),
            code_snippet: self.code_snippet,
            suggested_fix: self.suggested_fix,
            confidence: self.confidence.min(100),
        }
    }
}

/// A detected issue owned by a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub job_id: JobId,
    #[serde(rename = "type")]
    pub kind: FindingKind,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    /// `filename:line` or `filename:start-end`
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<String>,
    pub confidence: u8,
}

/// A recommendation as emitted by an analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationDraft {
    pub kind: RecommendationKind,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub estimated_effort: String,
    pub benefits: Vec<String>,
    pub implementation_steps: Vec<String>,
}

impl RecommendationDraft {
    pub fn attach(self, job_id: JobId) -> Recommendation {
        Recommendation {
            job_id,
            kind: self.kind,
            priority: self.priority,
            title: self.title,
            description: self.description,
            estimated_effort: self.estimated_effort,
            benefits: self.benefits,
            implementation_steps: self.implementation_steps,
        }
    }
}

/// A suggested remediation owned by a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub job_id: JobId,
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub estimated_effort: String,
    pub benefits: Vec<String>,
    pub implementation_steps: Vec<String>,
}

/// A flagged dependency as emitted by an analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyDraft {
    pub name: String,
    pub dependency_type: String,
    pub status: DependencyStatus,
    pub severity: Severity,
    pub migration_complexity: MigrationComplexity,
}

impl DependencyDraft {
    pub fn attach(self, job_id: JobId) -> Dependency {
        Dependency {
            job_id,
            name: self.name,
            dependency_type: self.dependency_type,
            status: self.status,
            severity: self.severity,
            migration_complexity: self.migration_complexity,
        }
    }
}

/// An externally referenced library flagged for a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub job_id: JobId,
    pub name: String,
    #[serde(rename = "type")]
    pub dependency_type: String,
    pub status: DependencyStatus,
    pub severity: Severity,
    pub migration_complexity: MigrationComplexity,
}

/// Everything one analyzer produced for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzerOutput {
    pub findings: Vec<FindingDraft>,
    pub recommendations: Vec<RecommendationDraft>,
    pub dependencies: Vec<DependencyDraft>,
}

impl AnalyzerOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append another output, preserving emission order.
    pub fn merge(&mut self, other: AnalyzerOutput) {
        self.findings.extend(other.findings);
        self.recommendations.extend(other.recommendations);
        self.dependencies.extend(other.dependencies);
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty() && self.recommendations.is_empty() && self.dependencies.is_empty()
    }
}
