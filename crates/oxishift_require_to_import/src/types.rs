use clap::ValueEnum;
use std::path::PathBuf;

/// Quote character used for emitted module specifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum QuoteStyle {
    #[default]
    Single,
    Double,
}

/// Behavior switches for the transform.
///
/// The two historical generations of this codemod (one converted bare require
/// statements and annotated bail-outs, the other did neither) are expressed
/// as flag combinations of this single component.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Rewrite side-effect-only `require('m');` statements to `import 'm';`.
    pub convert_bare_requires: bool,
    /// Insert a marker comment above statements left for manual conversion.
    pub annotate_unconvertible: bool,
    /// Quote character for emitted module specifiers.
    pub quote: QuoteStyle,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            convert_bare_requires: true,
            annotate_unconvertible: false,
            quote: QuoteStyle::Single,
        }
    }
}

/// Result of transforming one file's source text.
#[derive(Debug, Clone)]
pub struct TransformOutcome {
    pub code: String,
    /// Statements rewritten into import declarations.
    pub converted: usize,
    /// Require-initialized declarations left in place for manual conversion.
    pub skipped: usize,
    /// Whether `code` differs from the input text.
    pub changed: bool,
}

/// Per-file summary for reporting. Only produced for files with activity.
#[derive(Debug, Clone)]
pub struct FileReport {
    /// Path relative to the run's root directory.
    pub path: PathBuf,
    pub converted: usize,
    pub skipped: usize,
    pub changed: bool,
}

#[derive(Debug, Clone)]
pub struct RunResult {
    pub reports: Vec<FileReport>,
    pub files_scanned: usize,
    pub files_changed: usize,
    pub files_failed: usize,
    pub statements_converted: usize,
    pub statements_skipped: usize,
}
