//! repo-flatten: Flatten a GitHub repository subdirectory into one text file
//!
//! Fetches a single zipball snapshot of a repository and concatenates the
//! files under one subdirectory into a flat document with path headers and
//! delimiters.

use anyhow::Result;

mod archive;
mod cli;
mod config;
mod domain;
mod fetch;
mod render;
mod select;
mod utils;

fn main() -> Result<()> {
    cli::run()
}
