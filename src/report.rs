//! Output formatting for job results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::Serialize;

use crate::detect::{Finding, Priority, Recommendation, Severity};
use crate::job::{JobStatus, JobSummary};

// =============================================================================
// JSON Format
// =============================================================================

/// JSON report: tool metadata plus the full job summary.
#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub version: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
    #[serde(flatten)]
    pub job: &'a JobSummary,
}

impl<'a> JsonReport<'a> {
    pub fn new(path: &str, config_path: Option<&str>, job: &'a JobSummary) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            path: path.to_string(),
            config: config_path.map(str::to_string),
            job,
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Write results in JSON format.
pub fn write_json(path: &str, config_path: Option<&str>, job: &JobSummary) -> anyhow::Result<()> {
    let json = JsonReport::new(path, config_path, job).to_json()?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in pretty (human-readable) format.
pub fn write_pretty(path: &str, config_path: Option<&str>, job: &JobSummary) {
    // Header
    println!();
    print!("  ");
    print!("{}", "modernizer".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Project:  ".dimmed());
    println!("{}", job.metadata.name);
    print!("  {}", "Scanning: ".dimmed());
    println!("{}", path);
    print!("  {}", "Config:   ".dimmed());
    println!("{}", config_path.unwrap_or("(defaults)"));
    if let Some(platform) = &job.metadata.target_platform {
        print!("  {}", "Target:   ".dimmed());
        println!("{}", platform);
    }
    println!();

    write_status_line(job);
    println!();

    if !job.findings.is_empty() {
        write_findings(&job.findings);
        println!();
    }

    if !job.dependencies.is_empty() {
        println!("  {} ({}):", "Dependencies".bold(), job.dependencies.len());
        for dep in &job.dependencies {
            write_severity_tag(dep.severity);
            println!(
                "{:<28} {} {}",
                dep.name,
                dep.status.as_str().yellow(),
                format!("({}, {} migration)", dep.dependency_type, dep.migration_complexity)
                    .dimmed()
            );
        }
        println!();
    }

    if !job.recommendations.is_empty() {
        write_recommendations(&job.recommendations);
        println!();
    }
}

fn write_status_line(job: &JobSummary) {
    match job.status {
        JobStatus::Completed => print!("  {}", "✓ COMPLETED".green()),
        JobStatus::Failed => print!("  {}", "✗ FAILED".red()),
        other => print!("  {}", other.as_str().to_uppercase().yellow()),
    }

    print!("  Progress: {}%", job.progress);
    print!(
        "  Files: {}/{}",
        job.files_analyzed.to_string().bold(),
        job.files_submitted
    );
    println!();

    if let Some(message) = &job.error_message {
        println!("  {} {}", "Error:".red(), message);
    }
}

fn write_findings(findings: &[Finding]) {
    println!("  {} ({}):", "Findings".bold(), findings.len());
    println!();

    for f in findings {
        write_severity_tag(f.severity);
        print!("{:<18}", f.kind.as_str().dimmed());
        println!("{}", f.location.blue());

        // Title on next line, indented
        println!("            {}", f.title);
        if let Some(fix) = &f.suggested_fix {
            println!("            {}", format!("fix: {}", fix).dimmed());
        }
        println!();
    }
}

fn write_recommendations(recommendations: &[Recommendation]) {
    println!(
        "  {} ({}):",
        "Recommendations".bold(),
        recommendations.len()
    );

    for r in recommendations {
        match r.priority {
            Priority::High => print!("    {} ", "HIGH".red()),
            Priority::Medium => print!("    {} ", "MED ".yellow()),
            Priority::Low => print!("    {} ", "LOW ".blue()),
        }
        println!(
            "{} {}",
            r.title,
            format!("[{}, {}]", r.kind, r.estimated_effort).dimmed()
        );
    }
}

fn write_severity_tag(severity: Severity) {
    match severity {
        Severity::Critical => print!("    {} ", "CRIT".red().bold()),
        Severity::High => print!("    {} ", "HIGH".red()),
        Severity::Medium => print!("    {} ", "MED ".yellow()),
        Severity::Low => print!("    {} ", "LOW ".blue()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::{FindingDraft, FindingKind, LineSpan};
    use crate::job::{JobId, ProjectMetadata};
    use chrono::Utc;

    fn summary() -> JobSummary {
        let id = JobId::new();
        JobSummary {
            id,
            metadata: ProjectMetadata::new("legacy-billing"),
            status: JobStatus::Completed,
            progress: 100,
            error_message: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            completed_at: Some(Utc::now()),
            files_submitted: 2,
            files_analyzed: 2,
            findings: vec![FindingDraft {
                kind: FindingKind::Security,
                severity: Severity::Medium,
                title: "Potential SQL injection vulnerability".to_string(),
                description: "d".to_string(),
                lines: LineSpan::Range(3, 9),
                code_snippet: None,
                suggested_fix: None,
                confidence: 80,
            }
            .attach(id, "Dao.java")],
            recommendations: vec![],
            dependencies: vec![],
        }
    }

    #[test]
    fn test_json_report_fields() {
        let job = summary();
        let json = JsonReport::new("./src", None, &job).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["path"], "./src");
        assert!(value.get("config").is_none());
        assert_eq!(value["status"], "completed");
        assert_eq!(value["progress"], 100);
        assert_eq!(value["files_analyzed"], 2);
        assert_eq!(value["metadata"]["name"], "legacy-billing");
        assert_eq!(value["findings"][0]["type"], "security");
        assert_eq!(value["findings"][0]["location"], "Dao.java:3-9");
        assert!(value.get("error_message").is_none());
    }

    #[test]
    fn test_pretty_does_not_panic() {
        colored::control::set_override(false);
        let mut job = summary();
        write_pretty("./src", Some("modernizer.yaml"), &job);

        job.status = JobStatus::Failed;
        job.error_message = Some("Storage error: Write rejected: disk full".to_string());
        write_pretty("./src", None, &job);
    }
}
