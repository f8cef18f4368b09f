//! Cloud-readiness analyzer.

use crate::analysis::FeatureRecord;
use crate::config::CloudConfig;

use super::runner::Analyzer;
use super::scanner::locate;
use super::types::{
    AnalyzerOutput, FindingDraft, FindingKind, Priority, RecommendationDraft, RecommendationKind,
    Severity,
};

/// Flags stateful sessions and hardcoded local addresses, and scores the file.
pub struct CloudReadinessAnalyzer {
    config: CloudConfig,
}

/// One cloud-readiness issue and the remediation attached to it.
struct Issue {
    title: &'static str,
    description: &'static str,
    remediation: &'static str,
    keyword: String,
}

impl CloudReadinessAnalyzer {
    pub fn new(config: CloudConfig) -> Self {
        Self { config }
    }

    /// Readiness score for a record: the ready score with no issues, the reduced one otherwise.
    pub fn score(&self, record: &FeatureRecord) -> u8 {
        if self.issues(&record.signal_text()).is_empty() {
            self.config.ready_score
        } else {
            self.config.reduced_score
        }
    }

    fn issues(&self, text: &str) -> Vec<Issue> {
        let hit = |keywords: &[String]| {
            keywords
                .iter()
                .find(|k| !k.is_empty() && text.contains(&k.to_lowercase()))
                .cloned()
        };

        let mut issues = Vec::new();
        if let Some(keyword) = hit(&self.config.session_keywords) {
            issues.push(Issue {
                title: "Stateful session management detected",
                description: "Server-side session state ties requests to one instance",
                remediation: "Consider external session storage for scalability",
                keyword,
            });
        }
        if let Some(keyword) = hit(&self.config.local_network_literals) {
            issues.push(Issue {
                title: "Hardcoded local configurations found",
                description: "Local network addresses will not resolve once deployed",
                remediation: "Use environment variables for configuration",
                keyword,
            });
        }
        issues
    }
}

impl Default for CloudReadinessAnalyzer {
    fn default() -> Self {
        Self::new(CloudConfig::default())
    }
}

impl Analyzer for CloudReadinessAnalyzer {
    fn name(&self) -> &'static str {
        "cloud_readiness"
    }

    fn analyze(&self, record: &FeatureRecord) -> anyhow::Result<AnalyzerOutput> {
        let issues = self.issues(&record.signal_text());
        let mut output = AnalyzerOutput::new();

        for issue in &issues {
            output.findings.push(FindingDraft {
                kind: FindingKind::CloudReadiness,
                severity: Severity::Medium,
                title: issue.title.to_string(),
                description: issue.description.to_string(),
                lines: locate(record, &issue.keyword),
                code_snippet: None,
                suggested_fix: Some(issue.remediation.to_string()),
                confidence: self.config.confidence,
            });
            output.recommendations.push(RecommendationDraft {
                kind: RecommendationKind::CloudMigration,
                priority: Priority::Medium,
                title: issue.remediation.to_string(),
                description: format!("{}. {}", issue.title, issue.remediation),
                estimated_effort: "1-2 weeks".to_string(),
                benefits: vec![
                    "Horizontal scalability".to_string(),
                    "Environment portability".to_string(),
                ],
                implementation_steps: vec![issue.remediation.to_string()],
            });
        }

        let (score, priority) = if issues.is_empty() {
            (self.config.ready_score, Priority::Low)
        } else {
            (self.config.reduced_score, Priority::Medium)
        };
        output.recommendations.push(RecommendationDraft {
            kind: RecommendationKind::CloudMigration,
            priority,
            title: "Adopt cloud-native patterns".to_string(),
            description: format!("Cloud readiness score: {}/100", score),
            estimated_effort: "4-8 weeks".to_string(),
            benefits: vec!["Elastic scaling".to_string(), "Simpler deployment".to_string()],
            implementation_steps: self.config.suggested_patterns.clone(),
        });

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{DeclarationKind, FunctionInfo};
    use crate::detect::LineSpan;
    use crate::language::Language;

    fn record(functions: Vec<FunctionInfo>, imports: &[&str]) -> FeatureRecord {
        FeatureRecord {
            language: Language::Python,
            functions,
            classes: vec![],
            imports: imports.iter().map(|s| s.to_string()).collect(),
            complexity: 1,
            lines_of_code: 10,
            parse_error: None,
        }
    }

    #[test]
    fn test_ready_file() {
        let analyzer = CloudReadinessAnalyzer::default();
        let rec = record(vec![], &["import os"]);
        let output = analyzer.analyze(&rec).unwrap();

        assert!(output.findings.is_empty());
        assert_eq!(output.recommendations.len(), 1);
        let adopt = &output.recommendations[0];
        assert_eq!(adopt.title, "Adopt cloud-native patterns");
        assert_eq!(adopt.priority, Priority::Low);
        assert!(adopt.description.contains("75"));
        assert_eq!(
            adopt.implementation_steps,
            vec!["12-Factor App", "Microservices", "Containerization"]
        );
        assert_eq!(analyzer.score(&rec), 75);
    }

    #[test]
    fn test_session_and_localhost() {
        let analyzer = CloudReadinessAnalyzer::default();
        let rec = record(
            vec![FunctionInfo {
                name: "connect".to_string(),
                kind: DeclarationKind::Function,
                parameters: vec!["host".to_string()],
                start_line: 3,
                end_line: 5,
            }],
            &["from flask import session", "import redis  # 127.0.0.1"],
        );
        let output = analyzer.analyze(&rec).unwrap();

        assert_eq!(output.findings.len(), 2);
        assert!(output
            .findings
            .iter()
            .all(|f| f.kind == FindingKind::CloudReadiness));
        assert_eq!(output.findings[0].lines, LineSpan::Line(1));

        let titles: Vec<_> = output.recommendations.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Consider external session storage for scalability",
                "Use environment variables for configuration",
                "Adopt cloud-native patterns"
            ]
        );
        assert_eq!(output.recommendations[2].priority, Priority::Medium);
        assert!(output.recommendations[2].description.contains("50"));
        assert_eq!(analyzer.score(&rec), 50);
    }
}
