//! List command implementation
//!
//! Runs fetch, parse, and select, then prints the would-be output
//! document without writing the flat file.

use anyhow::Result;
use clap::Args;
use serde_json::json;
use std::path::PathBuf;

use super::utils::{load_snapshot, parse_csv, parse_ext_csv, resolve_subdir};
use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::select::{build_exclude_globset, select_records};

#[derive(Args)]
pub struct ListArgs {
    /// Repository owner (user or organization)
    #[arg(long, value_name = "OWNER")]
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

    /// Subdirectory whose files would go into the output
    #[arg(short = 's', long, value_name = "PATH")]
    pub subdir: Option<String>,

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

    /// Emit the listing as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ListArgs) -> Result<()> {
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
        output: None,
        api_url: args.api_url.clone(),
        token: args.token.clone(),
    };
    let merged = merge_cli_with_config(file_config, cli_overrides);

    let subdir = resolve_subdir(&merged)?;
    let (snapshot, source) = load_snapshot(&merged)?;

    let target_prefix = snapshot.target_prefix(&subdir);
    let exclude_globs = build_exclude_globset(&merged.exclude_globs)?;
    let records = select_records(
        snapshot.entries(),
        &target_prefix,
        &merged.include_extensions,
        exclude_globs.as_ref(),
    );

    if args.json {
        let listing = json!({
            "source": source,
            "subdir": subdir,
            "file_count": records.len(),
            "files": records,
        });
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        for record in &records {
            println!("{:>10}  /{}", record.size_bytes, record.relative_path);
        }
        println!("{} files under {subdir} ({source})", records.len());
    }

    Ok(())
}
