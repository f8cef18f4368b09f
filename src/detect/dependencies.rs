//! Dependency mapper: classifies import strings against known-bad rules.
//!
//! Rules look at raw import text only, so the same rule fires for a Java
//! `import`, a Python `from ... import` or a C# `using` alike.

use crate::analysis::FeatureRecord;
use crate::config::{DependencyConfig, DependencyRule};

use super::runner::Analyzer;
use super::types::{
    AnalyzerOutput, DependencyDraft, Priority, RecommendationDraft, RecommendationKind,
};

pub struct DependencyMapper {
    rules: Vec<DependencyRule>,
}

impl DependencyMapper {
    pub fn new(config: DependencyConfig) -> Self {
        Self {
            rules: config.rules,
        }
    }
}

impl Default for DependencyMapper {
    fn default() -> Self {
        Self::new(DependencyConfig::default())
    }
}

impl Analyzer for DependencyMapper {
    fn name(&self) -> &'static str {
        "dependency_mapper"
    }

    fn analyze(&self, record: &FeatureRecord) -> anyhow::Result<AnalyzerOutput> {
        let mut output = AnalyzerOutput::new();
        let mut matched: Vec<&DependencyRule> = Vec::new();

        for import in &record.imports {
            for rule in self.rules.iter().filter(|r| r.matches(import)) {
                output.dependencies.push(DependencyDraft {
                    name: rule.name.clone(),
                    dependency_type: rule.dependency_type.clone(),
                    status: rule.status,
                    severity: rule.severity,
                    migration_complexity: rule.migration_complexity,
                });
                if !matched.iter().any(|m| std::ptr::eq(*m, rule)) {
                    matched.push(rule);
                }
            }
        }

        for rule in matched {
            output.recommendations.push(RecommendationDraft {
                kind: RecommendationKind::FrameworkUpgrade,
                priority: Priority::from(rule.severity),
                title: rule.recommendation.clone(),
                description: format!("{} is {}: {}", rule.name, rule.status, rule.recommendation),
                estimated_effort: rule.estimated_effort.clone(),
                benefits: vec![
                    "Security patches".to_string(),
                    "Long-term support".to_string(),
                ],
                implementation_steps: vec![
                    format!("Inventory every use of {}", rule.name),
                    rule.recommendation.clone(),
                    "Run the regression suite".to_string(),
                ],
            });
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::{DependencyStatus, Severity};
    use crate::language::Language;

    fn record(language: Language, imports: &[&str]) -> FeatureRecord {
        FeatureRecord {
            language,
            functions: vec![],
            classes: vec![],
            imports: imports.iter().map(|s| s.to_string()).collect(),
            complexity: 1,
            lines_of_code: imports.len(),
            parse_error: None,
        }
    }

    #[test]
    fn test_log4j_flagged_in_any_language() {
        let mapper = DependencyMapper::default();
        for (language, import) in [
            (Language::Java, "import org.apache.log4j.Logger;"),
            (Language::Python, "from log4j import Logger"),
            (Language::CSharp, "using Log4j.Net;"),
        ] {
            let output = mapper.analyze(&record(language, &[import])).unwrap();
            assert_eq!(output.dependencies.len(), 1, "{}", language);
            assert_eq!(output.dependencies[0].name, "Log4j");
            assert_eq!(output.dependencies[0].status, DependencyStatus::Vulnerable);
            assert_eq!(output.dependencies[0].severity, Severity::High);
        }
    }

    #[test]
    fn test_spring_requires_version_marker() {
        let mapper = DependencyMapper::default();
        let output = mapper
            .analyze(&record(
                Language::Java,
                &["import org.springframework.boot.SpringApplication;"],
            ))
            .unwrap();
        assert!(output.is_empty());

        let output = mapper
            .analyze(&record(Language::Java, &["import spring.boot.v1.5.Legacy;"]))
            .unwrap();
        assert_eq!(output.dependencies[0].status, DependencyStatus::Outdated);
        assert_eq!(output.dependencies[0].dependency_type, "framework");
    }

    #[test]
    fn test_one_recommendation_per_rule() {
        let output = DependencyMapper::default()
            .analyze(&record(
                Language::Java,
                &[
                    "import org.apache.log4j.Logger;",
                    "import org.apache.log4j.Level;",
                ],
            ))
            .unwrap();

        assert_eq!(output.dependencies.len(), 2);
        assert_eq!(output.recommendations.len(), 1);
        assert_eq!(output.recommendations[0].title, "Replace Log4j with Logback");
        assert_eq!(
            output.recommendations[0].kind,
            RecommendationKind::FrameworkUpgrade
        );
        assert_eq!(output.recommendations[0].priority, Priority::High);
    }
}
