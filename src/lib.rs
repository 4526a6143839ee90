//! repo-flatten: Flatten a GitHub repository subdirectory into one text file
//!
//! This library fetches a single zipball snapshot of a repository, reads it
//! in memory, and concatenates the files under one subdirectory into a flat
//! document with path headers and delimiters.

pub mod archive;
pub mod cli;
pub mod config;
pub mod domain;
pub mod fetch;
pub mod render;
pub mod select;
pub mod utils;
