//! Flatten command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::utils::{load_snapshot, parse_csv, parse_ext_csv, resolve_subdir};
use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::domain::{RunReport, REPORT_SCHEMA_VERSION};
use crate::render::{write_flat_file, write_report};
use crate::select::{build_exclude_globset, select_records};
use crate::utils::default_output_name;

#[derive(Args)]
pub struct FlattenArgs {
    /// Repository owner (user or organization)
    #[arg(long, value_name = "OWNER", allow_hyphen_values = true)]
    pub owner: Option<String>,

    /// Repository name
    #[arg(short = 'r', long, value_name = "REPO")]
    pub repo: Option<String>,

    /// Git ref (branch/tag/SHA) of the snapshot
    #[arg(long = "ref", value_name = "REF")]
    pub ref_: Option<String>,

    /// Local zipball file instead of fetching from the network
    #[arg(short = 'a', long, value_name = "FILE", conflicts_with_all = ["owner", "repo"])]
    pub archive: Option<PathBuf>,

    /// Subdirectory whose files go into the output
    #[arg(short = 's', long, value_name = "PATH")]
    pub subdir: Option<String>,

    /// Output file name (default: <subdir>_files.txt)
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to config file (repo-flatten.toml or .repo-flatten.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Include only these extensions (comma-separated, e.g., '.rs,.md')
    #[arg(short = 'i', long, value_name = "EXTS")]
    pub include_ext: Option<String>,

    /// Exclude relative paths matching these globs (comma-separated)
    #[arg(short = 'e', long, value_name = "GLOBS")]
    pub exclude_glob: Option<String>,

    /// GitHub API base URL
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Bearer credential for the archive download
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Also write a JSON run report to this path
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Omit the report timestamp for reproducible diffs
    #[arg(long)]
    pub no_timestamp: bool,
}

pub fn run(args: FlattenArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let file_config = load_config(&cwd, args.config.as_deref())?;

    let include_ext = parse_ext_csv(&args.include_ext);
    let exclude_glob = parse_csv(&args.exclude_glob).map(|v| v.into_iter().collect());

    let cli_overrides = CliOverrides {
        owner: args.owner.clone(),
        repo: args.repo.clone(),
        ref_: args.ref_.clone(),
        archive: args.archive.clone(),
        subdir: args.subdir.clone(),
        include_extensions: include_ext,
        exclude_globs: exclude_glob,
        output: args.output.clone(),
        api_url: args.api_url.clone(),
        token: args.token.clone(),
    };
    let merged = merge_cli_with_config(file_config, cli_overrides);

    let subdir = resolve_subdir(&merged)?;
    let (mut snapshot, source) = load_snapshot(&merged)?;

    let target_prefix = snapshot.target_prefix(&subdir);
    let exclude_globs = build_exclude_globset(&merged.exclude_globs)?;
    let records = select_records(
        snapshot.entries(),
        &target_prefix,
        &merged.include_extensions,
        exclude_globs.as_ref(),
    );

    let output =
        merged.output.clone().unwrap_or_else(|| PathBuf::from(default_output_name(&subdir)));
    let bytes_written = write_flat_file(&mut snapshot, &records, &output)?;

    if let Some(report_path) = args.report.as_deref() {
        let report = RunReport {
            schema_version: REPORT_SCHEMA_VERSION.to_string(),
            source,
            subdir,
            output: output.display().to_string(),
            file_count: records.len(),
            bytes_written,
            files: records.clone(),
            generated_at: if args.no_timestamp { None } else { Some(chrono::Utc::now()) },
        };
        write_report(report_path, &report)?;
    }

    println!("Wrote {} files to {}", records.len(), output.display());
    Ok(())
}
