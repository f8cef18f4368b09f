//! Command-line interface for modernizer.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::{self, Config};
use crate::detect::AnalyzerChain;
use crate::job::{AnalysisDepth, InMemoryStore, JobStatus, Orchestrator, ProjectMetadata, SourceFile};
use crate::parser;
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Legacy code modernization analyzer.
///
/// Parses Java, JavaScript/TypeScript, Python and C# sources, extracts
/// structural facts and reports heuristic findings and migration
/// recommendations.
#[derive(Parser)]
#[command(name = "modernizer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a file or directory
    Analyze(AnalyzeArgs),
    /// Write the default configuration file
    Init(InitArgs),
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Path to analyze (file or directory)
    pub path: PathBuf,

    /// Project name (default: the directory name)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Project description
    #[arg(long)]
    pub description: Option<String>,

    /// Platform the project is migrating to
    #[arg(long)]
    pub target_platform: Option<String>,

    /// Analysis depth
    #[arg(long, value_enum, default_value = "standard")]
    pub depth: AnalysisDepth,

    /// Path to configuration YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: OutputFormat,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "modernizer.yaml")]
    pub output: PathBuf,
}

/// Load the configuration named on the command line, or discover one.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<(Config, Option<PathBuf>)> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => Config::discover(Path::new(".")),
    };

    let config = match &path {
        Some(p) => Config::parse_file(p)
            .map_err(|e| anyhow::anyhow!("cannot parse {}: {}", p.display(), e))?,
        None => Config::default(),
    };
    config::validate(&config).map_err(|e| anyhow::anyhow!("invalid config: {}", e))?;

    Ok((config, path))
}

/// Collect files under `root`, skipping hidden and vendored directories.
pub fn collect_files(root: &Path, config: &Config) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            if e.depth() > 0 && e.file_type().is_dir() {
                // Skip hidden, vendored and build output directories
                if name.starts_with('.')
                    || name == "vendor"
                    || name == "node_modules"
                    || name == "target"
                    || name == "__pycache__"
                {
                    return false;
                }
            }
            !config.is_path_excluded(e.path())
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let size = entry.metadata()?.len();
        if size > config.max_file_bytes {
            warn!(file = %entry.path().display(), size, limit = config.max_file_bytes, "file too large, skipping");
            continue;
        }
        files.push(entry.path().to_path_buf());
    }

    Ok(files)
}

/// Read collected files into source files named relative to `root`.
fn read_sources(root: &Path, paths: &[PathBuf]) -> anyhow::Result<Vec<SourceFile>> {
    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        let content = std::fs::read(path)?;
        let name = path
            .strip_prefix(root)
            .ok()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(path.as_path());
        sources.push(SourceFile::new(name.to_string_lossy(), content));
    }
    Ok(sources)
}

fn project_name(args: &AnalyzeArgs, root: &Path) -> String {
    args.name.clone().unwrap_or_else(|| {
        root.file_stem()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "project".to_string())
    })
}

/// Run the analyze command.
pub async fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    let (config, config_path) = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let abs_path = match args.path.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    let (root, paths) = if abs_path.is_dir() {
        let files = collect_files(&abs_path, &config)?;
        (abs_path.clone(), files)
    } else {
        let parent = abs_path.parent().unwrap_or(Path::new("/")).to_path_buf();
        (parent, vec![abs_path.clone()])
    };

    if paths.is_empty() {
        eprintln!("Warning: no files to analyze");
        return Ok(EXIT_SUCCESS);
    }
    debug!(files = paths.len(), root = %root.display(), "collected files");

    parser::register_grammars();
    let sources = read_sources(&root, &paths)?;

    let metadata = ProjectMetadata {
        name: project_name(args, &abs_path),
        description: args.description.clone(),
        target_platform: args.target_platform.clone(),
        analysis_depth: args.depth,
    };

    let orchestrator = Orchestrator::new(
        Arc::new(InMemoryStore::new()),
        AnalyzerChain::from_config(&config),
    );
    let handle = orchestrator.submit_job(metadata, sources).await?;
    let id = handle.wait().await?;
    let summary = orchestrator.get_job_summary(id).await?;

    let path_str = args.path.to_string_lossy().to_string();
    let config_str = config_path.map(|p| p.to_string_lossy().to_string());
    match args.format {
        OutputFormat::Json => report::write_json(&path_str, config_str.as_deref(), &summary)?,
        OutputFormat::Pretty => report::write_pretty(&path_str, config_str.as_deref(), &summary),
    }

    if summary.status == JobStatus::Completed {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_FAILED)
    }
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    let yaml = Config::default().to_yaml()?;
    if let Err(e) = std::fs::write(&args.output, yaml) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to tune keywords and dependency rules", args.output.display());
    println!("  2. Run: modernizer analyze . --config {}", args.output.display());

    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_collect_files_skips_hidden_and_excluded() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::create_dir_all(root.join("node_modules/lib")).unwrap();
        fs::create_dir_all(root.join("generated")).unwrap();
        fs::write(root.join("src/App.java"), "class App {}").unwrap();
        fs::write(root.join("src/util.py"), "import os").unwrap();
        fs::write(root.join(".git/config"), "x").unwrap();
        fs::write(root.join("node_modules/lib/index.js"), "x").unwrap();
        fs::write(root.join("generated/Stub.java"), "x").unwrap();

        let config = Config {
            excluded_paths: vec!["**/generated/**".to_string()],
            ..Config::default()
        };
        let files = collect_files(root, &config).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();

        assert_eq!(names, vec!["src/App.java", "src/util.py"]);
    }

    #[test]
    fn test_collect_files_size_limit() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("big.py"), "x".repeat(64)).unwrap();
        fs::write(temp.path().join("small.py"), "x").unwrap();

        let config = Config {
            max_file_bytes: 16,
            ..Config::default()
        };
        let files = collect_files(temp.path(), &config).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("small.py"));
    }

    #[test]
    fn test_read_sources_uses_relative_names() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("pkg")).unwrap();
        let file = temp.path().join("pkg/mod.py");
        fs::write(&file, "import os\n").unwrap();

        let sources = read_sources(temp.path(), &[file]).unwrap();
        assert_eq!(sources[0].filename(), "pkg/mod.py");
    }

    #[test]
    fn test_init_writes_default_config() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("conf/modernizer.yaml");
        let args = InitArgs {
            output: output.clone(),
        };

        assert_eq!(run_init(&args).unwrap(), EXIT_SUCCESS);
        let config = Config::parse_file(&output).unwrap();
        assert_eq!(config.scanner.large_file_lines, 100);

        assert_eq!(run_init(&args).unwrap(), EXIT_ERROR, "Refuses to overwrite");
    }

    #[test]
    fn test_cli_parses_analyze() {
        let cli = Cli::parse_from([
            "modernizer",
            "-vv",
            "analyze",
            "./legacy",
            "--depth",
            "comprehensive",
            "--format",
            "json",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.path, PathBuf::from("./legacy"));
                assert_eq!(args.depth, AnalysisDepth::Comprehensive);
                assert!(args.format == OutputFormat::Json);
            }
            Commands::Init(_) => panic!("expected analyze"),
        }
    }
}
