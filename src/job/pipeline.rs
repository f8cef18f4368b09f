//! Per-file analysis: detect, parse, extract, score, run the analyzer chain.

use tracing::{debug, warn};

use crate::analysis::FeatureRecord;
use crate::detect::{AnalyzerChain, AnalyzerFailure, AnalyzerOutput};
use crate::parser;

use super::error::FileError;
use super::model::SourceFile;

/// Everything derived from one source file.
#[derive(Debug)]
pub struct FileAnalysis {
    pub filename: String,
    pub record: FeatureRecord,
    pub output: AnalyzerOutput,
    pub analyzer_failures: Vec<AnalyzerFailure>,
}

/// Analyze a single file.
///
/// Unsupported languages and parser failures still produce a [`FileAnalysis`];
/// a file whose parse carries an error annotation skips the analyzer chain.
/// Only content that cannot be decoded is an error.
pub fn analyze_file(file: &SourceFile, chain: &AnalyzerChain) -> Result<FileAnalysis, FileError> {
    let content = file.text()?;
    let record = parser::parse(file.language(), content).into_record();

    if let Some(error) = &record.parse_error {
        warn!(file = file.filename(), language = %record.language, error = %error, "parse failed, skipping analyzers");
        return Ok(FileAnalysis {
            filename: file.filename().to_string(),
            record,
            output: AnalyzerOutput::new(),
            analyzer_failures: Vec::new(),
        });
    }

    let chain_output = chain.run(&record);
    debug!(
        file = file.filename(),
        language = %record.language,
        complexity = record.complexity,
        functions = record.functions.len(),
        classes = record.classes.len(),
        imports = record.imports.len(),
        findings = chain_output.output.findings.len(),
        "file analyzed"
    );

    Ok(FileAnalysis {
        filename: file.filename().to_string(),
        record,
        output: chain_output.output,
        analyzer_failures: chain_output.failures,
    })
}
