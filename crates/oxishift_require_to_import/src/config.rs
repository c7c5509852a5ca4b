use clap::Parser;
use std::path::PathBuf;

use crate::types::{QuoteStyle, TransformOptions};

#[derive(Debug, Clone, Parser)]
#[command(name = "require-to-import")]
#[command(about = "Convert require() calls to static import declarations")]
pub struct Config {
    /// Root directory of the project (defaults to git root)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Substring filter on paths relative to the root
    #[arg(long)]
    pub include: Option<String>,

    /// Rewrite files in place instead of reporting what would change
    #[arg(long)]
    pub write: bool,

    /// Leave side-effect-only require statements untouched
    #[arg(long)]
    pub skip_bare: bool,

    /// Mark statements that need manual conversion with a comment
    #[arg(long)]
    pub annotate: bool,

    /// Quote style for emitted module specifiers
    #[arg(long, value_enum, default_value = "single")]
    pub quote: QuoteStyle,
}

impl Config {
    /// Transform behavior implied by the CLI flags.
    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions {
            convert_bare_requires: !self.skip_bare,
            annotate_unconvertible: self.annotate,
            quote: self.quote,
        }
    }
}
