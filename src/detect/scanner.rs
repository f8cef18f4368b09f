//! Keyword scanner for security, performance and maintainability smells.

use crate::analysis::FeatureRecord;
use crate::config::ScannerConfig;

use super::runner::Analyzer;
use super::types::{
    AnalyzerOutput, FindingDraft, FindingKind, LineSpan, Priority, RecommendationDraft,
    RecommendationKind, Severity,
};

/// Flags findings from substring signals over the serialized feature record.
pub struct CodeScanner {
    config: ScannerConfig,
}

impl CodeScanner {
    pub fn new(config: ScannerConfig) -> Self {
        Self { config }
    }

    fn finding(&self, kind: FindingKind, title: &str, description: &str, lines: LineSpan) -> FindingDraft {
        FindingDraft {
            kind,
            severity: Severity::Medium,
            title: title.to_string(),
            description: description.to_string(),
            lines,
            code_snippet: None,
            suggested_fix: None,
            confidence: self.config.confidence,
        }
    }
}

impl Default for CodeScanner {
    fn default() -> Self {
        Self::new(ScannerConfig::default())
    }
}

impl Analyzer for CodeScanner {
    fn name(&self) -> &'static str {
        "code_scanner"
    }

    fn analyze(&self, record: &FeatureRecord) -> anyhow::Result<AnalyzerOutput> {
        let text = record.signal_text();
        let mut output = AnalyzerOutput::new();

        let sql = first_match(&text, &self.config.sql_keywords);
        if let Some(keyword) = sql {
            let mut finding = self.finding(
                FindingKind::Security,
                "Potential SQL injection vulnerability",
                "Potential SQL injection vulnerability detected",
                locate(record, keyword),
            );
            finding.suggested_fix =
                Some("Use parameterized queries instead of building SQL from strings".to_string());
            output.findings.push(finding);
        }

        let loop_kw = first_match(&text, &self.config.loop_keywords);
        let persistence = first_match(&text, &self.config.persistence_keywords);
        let n_plus_one = loop_kw.is_some() && persistence.is_some();
        if let Some(keyword) = persistence.filter(|_| n_plus_one) {
            output.findings.push(self.finding(
                FindingKind::Performance,
                "Possible N+1 query problem",
                "Possible N+1 query problem: data access appears alongside iteration",
                locate(record, keyword),
            ));
        }

        let large = record.lines_of_code > self.config.large_file_lines;
        if large {
            output.findings.push(self.finding(
                FindingKind::Maintainability,
                "Large file size may affect maintainability",
                &format!(
                    "File has {} lines, above the {} line threshold",
                    record.lines_of_code, self.config.large_file_lines
                ),
                LineSpan::Range(1, record.lines_of_code),
            ));
        }

        if sql.is_some() || n_plus_one {
            output
                .recommendations
                .push(code_quality("Review database queries"));
        }
        if large {
            output
                .recommendations
                .push(code_quality("Consider refactoring large files"));
        }

        Ok(output)
    }
}

fn code_quality(title: &str) -> RecommendationDraft {
    RecommendationDraft {
        kind: RecommendationKind::CodeQuality,
        priority: Priority::High,
        title: title.to_string(),
        description: title.to_string(),
        estimated_effort: "1-2 weeks".to_string(),
        benefits: vec!["Improved security".to_string(), "Better performance".to_string()],
        implementation_steps: vec![title.to_string()],
    }
}

/// First keyword (lowercased) that occurs in `text`.
fn first_match<'k>(text: &str, keywords: &'k [String]) -> Option<&'k str> {
    keywords
        .iter()
        .map(String::as_str)
        .find(|k| !k.is_empty() && text.contains(&k.to_lowercase()))
}

/// Span of the first declaration mentioning `keyword`, else line 1.
pub(crate) fn locate(record: &FeatureRecord, keyword: &str) -> LineSpan {
    let keyword = keyword.to_lowercase();
    let mentions = |s: &str| s.to_lowercase().contains(&keyword);

    record
        .functions
        .iter()
        .find(|f| mentions(&f.name) || f.parameters.iter().any(|p| mentions(p)))
        .map(|f| LineSpan::from_rows(f.start_line, f.end_line))
        .or_else(|| {
            record
                .classes
                .iter()
                .find(|c| mentions(&c.name))
                .map(|c| LineSpan::from_rows(c.start_line, c.end_line))
        })
        .unwrap_or(LineSpan::Line(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{DeclarationKind, FunctionInfo};
    use crate::language::Language;

    fn record(functions: Vec<FunctionInfo>, imports: Vec<&str>, lines: usize) -> FeatureRecord {
        FeatureRecord {
            language: Language::Java,
            functions,
            classes: vec![],
            imports: imports.into_iter().map(String::from).collect(),
            complexity: 1,
            lines_of_code: lines,
            parse_error: None,
        }
    }

    fn function(name: &str, params: &[&str], start: usize, end: usize) -> FunctionInfo {
        FunctionInfo {
            name: name.to_string(),
            kind: DeclarationKind::Method,
            parameters: params.iter().map(|p| p.to_string()).collect(),
            start_line: start,
            end_line: end,
        }
    }

    #[test]
    fn test_clean_record_has_no_output() {
        let output = CodeScanner::default()
            .analyze(&record(vec![function("add", &["int a"], 0, 2)], vec![], 3))
            .unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_sql_finding_points_at_function() {
        let rec = record(
            vec![
                function("helper", &[], 0, 1),
                function("runQuery", &["String sql"], 4, 9),
            ],
            vec![],
            12,
        );
        let output = CodeScanner::default().analyze(&rec).unwrap();

        assert_eq!(output.findings.len(), 1);
        let finding = &output.findings[0];
        assert_eq!(finding.kind, FindingKind::Security);
        assert_eq!(finding.severity, Severity::Medium);
        assert_eq!(finding.confidence, 80);
        assert_eq!(finding.lines, LineSpan::Range(5, 10));

        assert_eq!(output.recommendations.len(), 1);
        assert_eq!(output.recommendations[0].title, "Review database queries");
        assert_eq!(output.recommendations[0].priority, Priority::High);
    }

    #[test]
    fn test_n_plus_one_needs_both_signals() {
        let only_persistence = record(vec![], vec!["import com.acme.database.Client;"], 5);
        let output = CodeScanner::default().analyze(&only_persistence).unwrap();
        assert!(output.findings.is_empty());

        // "for" appears inside "information"
        let both = record(
            vec![function("loadInformation", &[], 2, 2)],
            vec!["import com.acme.database.Client;"],
            5,
        );
        let output = CodeScanner::default().analyze(&both).unwrap();
        assert_eq!(output.findings.len(), 1);
        assert_eq!(output.findings[0].kind, FindingKind::Performance);
        assert_eq!(output.findings[0].lines, LineSpan::Line(1));
    }

    #[test]
    fn test_large_file() {
        let output = CodeScanner::default().analyze(&record(vec![], vec![], 101)).unwrap();
        assert_eq!(output.findings.len(), 1);
        assert_eq!(output.findings[0].kind, FindingKind::Maintainability);
        assert_eq!(output.findings[0].lines, LineSpan::Range(1, 101));
        assert_eq!(
            output.recommendations[0].title,
            "Consider refactoring large files"
        );

        let output = CodeScanner::default().analyze(&record(vec![], vec![], 100)).unwrap();
        assert!(output.is_empty(), "Threshold is exclusive");
    }

    #[test]
    fn test_custom_keywords() {
        let scanner = CodeScanner::new(ScannerConfig {
            sql_keywords: vec!["jdbc".to_string()],
            ..ScannerConfig::default()
        });
        let rec = record(vec![], vec!["import java.sql.Connection;"], 3);
        assert!(scanner.analyze(&rec).unwrap().findings.is_empty());

        let rec = record(vec![], vec!["import org.JDBC.Template;"], 3);
        assert_eq!(scanner.analyze(&rec).unwrap().findings.len(), 1);
    }
}
