//! CLI argument merging with config

use crate::domain::Config;
use std::collections::HashSet;
use std::path::PathBuf;

#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub ref_: Option<String>,
    pub archive: Option<PathBuf>,
    pub subdir: Option<String>,
    pub include_extensions: Option<HashSet<String>>,
    pub exclude_globs: Option<HashSet<String>>,
    pub output: Option<PathBuf>,
    pub api_url: Option<String>,
    pub token: Option<String>,
}

pub fn merge_cli_with_config(mut base_config: Config, cli: CliOverrides) -> Config {
    // Source selection: a local archive on the CLI displaces a configured
    // remote repo, and vice versa.
    if let Some(archive) = cli.archive {
        base_config.archive = Some(archive);
        base_config.owner = None;
        base_config.repo = None;
    }
    if cli.owner.is_some() || cli.repo.is_some() {
        base_config.archive = None;
    }
    if let Some(owner) = cli.owner {
        base_config.owner = Some(owner);
    }
    if let Some(repo) = cli.repo {
        base_config.repo = Some(repo);
    }
    if let Some(ref_) = cli.ref_ {
        base_config.ref_ = ref_;
    }

    if let Some(subdir) = cli.subdir {
        base_config.subdir = Some(subdir);
    }
    if let Some(include_extensions) = cli.include_extensions {
        base_config.include_extensions = include_extensions;
    }
    if let Some(exclude_globs) = cli.exclude_globs {
        base_config.exclude_globs = exclude_globs;
    }

    if let Some(output) = cli.output {
        base_config.output = Some(output);
    }
    if let Some(api_url) = cli.api_url {
        base_config.api_url = api_url;
    }
    if let Some(token) = cli.token {
        base_config.token = Some(token);
    }

    base_config
}
