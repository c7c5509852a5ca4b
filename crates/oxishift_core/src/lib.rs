//! Core utilities for oxishift codemods.
//!
//! This crate provides the plumbing shared by individual codemods:
//! - Parsing JS/TS files into oxc syntax trees
//! - Collecting candidate source files from a project
//! - Configuration utilities (git root finding)

mod collector;
mod config;
mod constants;
mod parser;

// Re-export public API
pub use collector::{CollectorConfig, collect_sources};
pub use config::{find_git_root, find_git_root_from};
pub use constants::JS_TS_EXTENSIONS;
pub use parser::{parse_program, source_type_for};
