//! Configuration loading and layering
//!
//! Precedence, lowest to highest: built-in defaults, a discovered or
//! explicit config file (`repo-flatten.toml` or `.repo-flatten.yml`),
//! `REPO_FLATTEN_*` environment variables, then CLI flags via
//! [`merge_cli_with_config`].

mod merge;

pub use merge::{merge_cli_with_config, CliOverrides};

use anyhow::{bail, Context, Result};
use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use figment::Figment;
use std::path::Path;
use tracing::debug;

use crate::domain::Config;

const TOML_FILE: &str = "repo-flatten.toml";
const YAML_FILE: &str = ".repo-flatten.yml";

/// Load configuration anchored at `anchor` (normally the working
/// directory). An explicit `--config` path must exist; discovered files
/// are optional.
pub fn load_config(anchor: &Path, explicit: Option<&Path>) -> Result<Config> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    if let Some(path) = explicit {
        if !path.exists() {
            bail!("Config file not found: {}", path.display());
        }
        debug!("loading config from {}", path.display());
        figment = match path.extension().and_then(|e| e.to_str()) {
            Some("yml") | Some("yaml") => figment.merge(Yaml::file(path)),
            _ => figment.merge(Toml::file(path)),
        };
    } else {
        let toml_path = anchor.join(TOML_FILE);
        if toml_path.exists() {
            debug!("discovered {}", toml_path.display());
            figment = figment.merge(Toml::file(toml_path));
        }
        let yaml_path = anchor.join(YAML_FILE);
        if yaml_path.exists() {
            debug!("discovered {}", yaml_path.display());
            figment = figment.merge(Yaml::file(yaml_path));
        }
    }

    figment
        .merge(Env::prefixed("REPO_FLATTEN_"))
        .extract()
        .context("Failed to load configuration")
}
