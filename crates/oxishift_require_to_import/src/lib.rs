//! Require-to-import codemod for JavaScript/TypeScript projects.
//!
//! Rewrites CommonJS `require(...)` usage at module top level into static
//! `import` declarations. Anything that cannot be rewritten without changing
//! program semantics is left byte-for-byte unchanged, optionally marked with
//! a comment for manual follow-up. Each statement is converted in full or not
//! at all, and re-running the codemod on its own output is a no-op.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use oxishift_require_to_import::{Config, QuoteStyle, run_require_to_import};
//! use std::io::{BufWriter, Write};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = Config {
//!     root: Some(std::path::PathBuf::from("/path/to/project")),
//!     include: None,
//!     write: false,
//!     skip_bare: false,
//!     annotate: true,
//!     quote: QuoteStyle::Single,
//! };
//!
//! let result = run_require_to_import(cfg)?;
//!
//! // Use buffered output for better performance
//! let mut stdout = BufWriter::new(std::io::stdout());
//! if result.reports.is_empty() {
//!     oxishift_require_to_import::print_clean_message(&mut stdout)?;
//! } else {
//!     oxishift_require_to_import::print_run_report(&mut stdout, &result, false)?;
//! }
//! stdout.flush()?;
//! # Ok(())
//! # }
//! ```

mod config;
mod emit;
mod matcher;
mod reporter;
mod rewriter;
mod runner;
mod transform;
mod types;

// Re-export public API
pub use config::Config;
pub use emit::MANUAL_FIX_MARKER;
pub use matcher::{RequireMatch, extract_require};
pub use reporter::{print_clean_message, print_run_report};
pub use runner::run_require_to_import;
pub use transform::transform_source;
pub use types::{FileReport, QuoteStyle, RunResult, TransformOptions, TransformOutcome};
