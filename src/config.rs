//! Analyzer configuration.
//!
//! Every field is optional in YAML; omitted values fall back to the built-in
//! heuristics.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::detect::{DependencyStatus, MigrationComplexity, Severity};

/// File names searched in the working directory when no `--config` is given.
pub const CONFIG_FILE_NAMES: &[&str] = &["modernizer.yaml", ".modernizer.yaml"];

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub version: String,
    pub scanner: ScannerConfig,
    pub dependencies: DependencyConfig,
    pub cloud: CloudConfig,
    /// Glob patterns for paths to skip when collecting files (e.g. "**/generated/**")
    pub excluded_paths: Vec<String>,
    /// Files larger than this are not submitted.
    pub max_file_bytes: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1".to_string(),
            scanner: ScannerConfig::default(),
            dependencies: DependencyConfig::default(),
            cloud: CloudConfig::default(),
            excluded_paths: Vec::new(),
            max_file_bytes: 1024 * 1024,
        }
    }
}

impl Config {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Locate a configuration file in `dir`, if one exists.
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    }

    /// Check if a path should be excluded based on excluded_paths patterns.
    pub fn is_path_excluded(&self, path: &Path) -> bool {
        if self.excluded_paths.is_empty() {
            return false;
        }

        let path_str = path.to_string_lossy();

        for pattern in &self.excluded_paths {
            if let Ok(glob) = globset::Glob::new(pattern) {
                if glob.compile_matcher().is_match(&*path_str) {
                    return true;
                }
            }
        }
        false
    }

    /// Render as YAML, used by `init`.
    pub fn to_yaml(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Keyword signals for the code scanner.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Files with more lines than this get a maintainability finding.
    pub large_file_lines: usize,
    pub confidence: u8,
    pub sql_keywords: Vec<String>,
    /// An N+1 finding needs one loop keyword and one persistence keyword.
    pub loop_keywords: Vec<String>,
    pub persistence_keywords: Vec<String>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            large_file_lines: 100,
            confidence: 80,
            sql_keywords: vec!["sql".to_string()],
            loop_keywords: vec!["for".to_string()],
            persistence_keywords: vec!["database".to_string()],
        }
    }
}

/// Import rules for the dependency mapper.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DependencyConfig {
    pub rules: Vec<DependencyRule>,
}

impl Default for DependencyConfig {
    fn default() -> Self {
        Self {
            rules: vec![
                DependencyRule {
                    name: "Spring Boot 1.5".to_string(),
                    contains: vec!["spring".to_string(), "1.5".to_string()],
                    status: DependencyStatus::Outdated,
                    severity: Severity::Medium,
                    dependency_type: "framework".to_string(),
                    migration_complexity: MigrationComplexity::Moderate,
                    recommendation: "Upgrade Spring Boot to 3.x".to_string(),
                    estimated_effort: "2-4 weeks".to_string(),
                },
                DependencyRule {
                    name: "Log4j".to_string(),
                    contains: vec!["log4j".to_string()],
                    status: DependencyStatus::Vulnerable,
                    severity: Severity::High,
                    dependency_type: "library".to_string(),
                    migration_complexity: MigrationComplexity::Moderate,
                    recommendation: "Replace Log4j with Logback".to_string(),
                    estimated_effort: "1-2 weeks".to_string(),
                },
            ],
        }
    }
}

/// One known-bad import pattern.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DependencyRule {
    pub name: String,
    /// Every substring must appear in the lowercased import text.
    pub contains: Vec<String>,
    pub status: DependencyStatus,
    pub severity: Severity,
    #[serde(rename = "type")]
    pub dependency_type: String,
    pub migration_complexity: MigrationComplexity,
    /// Title of the upgrade recommendation.
    pub recommendation: String,
    #[serde(default = "default_effort")]
    pub estimated_effort: String,
}

fn default_effort() -> String {
    "2-4 weeks".to_string()
}

impl DependencyRule {
    /// Whether `import` matches this rule (case-insensitive).
    pub fn matches(&self, import: &str) -> bool {
        let lowered = import.to_lowercase();
        self.contains
            .iter()
            .all(|needle| lowered.contains(&needle.to_lowercase()))
    }
}

/// Signals for the cloud-readiness analyzer.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CloudConfig {
    pub session_keywords: Vec<String>,
    pub local_network_literals: Vec<String>,
    pub ready_score: u8,
    pub reduced_score: u8,
    pub suggested_patterns: Vec<String>,
    pub confidence: u8,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            session_keywords: vec!["session".to_string()],
            local_network_literals: vec!["localhost".to_string(), "127.0.0.1".to_string()],
            ready_score: 75,
            reduced_score: 50,
            suggested_patterns: vec![
                "12-Factor App".to_string(),
                "Microservices".to_string(),
                "Containerization".to_string(),
            ],
            confidence: 80,
        }
    }
}

/// Validate a configuration.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    if config.scanner.confidence > 100 {
        anyhow::bail!("scanner.confidence {} exceeds 100", config.scanner.confidence);
    }
    if config.cloud.confidence > 100 {
        anyhow::bail!("cloud.confidence {} exceeds 100", config.cloud.confidence);
    }
    if config.scanner.large_file_lines == 0 {
        anyhow::bail!("scanner.large_file_lines must be greater than 0");
    }
    if config.cloud.reduced_score > config.cloud.ready_score || config.cloud.ready_score > 100 {
        anyhow::bail!(
            "cloud scores must satisfy reduced_score <= ready_score <= 100 (got {} and {})",
            config.cloud.reduced_score,
            config.cloud.ready_score
        );
    }

    for rule in &config.dependencies.rules {
        if rule.contains.is_empty() || rule.contains.iter().any(|s| s.trim().is_empty()) {
            anyhow::bail!("dependency rule {:?} has an empty substring", rule.name);
        }
    }

    for pattern in &config.excluded_paths {
        globset::Glob::new(pattern)
            .map_err(|e| anyhow::anyhow!("invalid excluded_paths pattern {:?}: {}", pattern, e))?;
    }

    Ok(())
}
