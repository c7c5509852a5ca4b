use anyhow::{Result, anyhow};
use oxc_allocator::{Allocator, Vec as ArenaVec};
use oxc_ast::ast::{Program, Statement};
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_span::{SPAN, SourceType, Span};

use crate::types::QuoteStyle;

/// Marker prefixed to statements left for manual conversion.
pub const MANUAL_FIX_MARKER: &str = "oxishift: unable to automatically convert require to import";

/// A single text edit against the original source. `start == end` is an
/// insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Edit {
    start: u32,
    end: u32,
    text: String,
}

impl Edit {
    pub(crate) fn replace(span: Span, text: String) -> Self {
        Self { start: span.start, end: span.end, text }
    }

    pub(crate) fn insert(at: u32, text: String) -> Self {
        Self { start: at, end: at, text }
    }
}

/// Print replacement statements through the host code generator.
///
/// The statements are wrapped in a synthetic program so the generator sees a
/// well-formed tree; its trailing newline is trimmed because the edit is
/// spliced into the middle of existing text.
pub(crate) fn render_statements<'a>(
    allocator: &'a Allocator,
    body: ArenaVec<'a, Statement<'a>>,
    source_type: SourceType,
    quote: QuoteStyle,
) -> String {
    let program = Program {
        span: SPAN,
        source_type,
        source_text: "",
        comments: ArenaVec::new_in(allocator),
        hashbang: None,
        directives: ArenaVec::new_in(allocator),
        body,
        scope_id: Default::default(),
    };

    let options = CodegenOptions {
        single_quote: matches!(quote, QuoteStyle::Single),
        ..CodegenOptions::default()
    };
    let code = Codegen::new().with_options(options).build(&program).code;
    code.trim_end().to_string()
}

/// Insertion of a `// oxishift: ...` line above the statement at `span`, or
/// `None` when the previous line already carries the marker (keeps re-runs
/// from stacking comments).
pub(crate) fn annotation_edit(source: &str, span: Span) -> Option<Edit> {
    let start = span.start as usize;
    let line_start = source[..start].rfind('\n').map_or(0, |i| i + 1);

    let indent = &source[line_start..start];
    let indent = if indent.chars().all(|c| c == ' ' || c == '\t') { indent } else { "" };

    let before = &source[..line_start];
    let previous_line = before
        .strip_suffix('\n')
        .map(|b| &b[b.rfind('\n').map_or(0, |i| i + 1)..])
        .unwrap_or("");
    if previous_line.trim_start().starts_with("//") && previous_line.contains(MANUAL_FIX_MARKER) {
        return None;
    }

    Some(Edit::insert(line_start as u32, format!("{indent}// {MANUAL_FIX_MARKER}\n")))
}

/// Apply edits to `source`, copying every untouched byte verbatim.
///
/// Edits must not overlap; two rules claiming the same statement is a logic
/// error surfaced here rather than silently merged.
pub(crate) fn apply_edits(source: &str, mut edits: Vec<Edit>) -> Result<String> {
    if edits.is_empty() {
        return Ok(source.to_string());
    }

    edits.sort_by(|a, b| (a.start, a.end).cmp(&(b.start, b.end)).then_with(|| a.text.cmp(&b.text)));
    edits.dedup();

    for pair in edits.windows(2) {
        if pair[1].start < pair[0].end {
            return Err(anyhow!("overlapping edits at byte {}", pair[1].start));
        }
    }

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0usize;
    for edit in &edits {
        out.push_str(&source[cursor..edit.start as usize]);
        out.push_str(&edit.text);
        cursor = edit.end as usize;
    }
    out.push_str(&source[cursor..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_edits_empty_returns_source() {
        assert_eq!(apply_edits("abc", vec![]).unwrap(), "abc");
    }

    #[test]
    fn test_apply_edits_replaces_ranges() {
        let source = "aaa bbb ccc";
        let edits = vec![
            Edit { start: 4, end: 7, text: "XX".to_string() },
            Edit { start: 0, end: 3, text: "Y".to_string() },
        ];
        assert_eq!(apply_edits(source, edits).unwrap(), "Y XX ccc");
    }

    #[test]
    fn test_apply_edits_insertion() {
        let source = "one\ntwo\n";
        let edits = vec![Edit::insert(4, "// note\n".to_string())];
        assert_eq!(apply_edits(source, edits).unwrap(), "one\n// note\ntwo\n");
    }

    #[test]
    fn test_apply_edits_rejects_overlap() {
        let source = "abcdef";
        let edits = vec![
            Edit { start: 0, end: 4, text: "x".to_string() },
            Edit { start: 2, end: 6, text: "y".to_string() },
        ];
        assert!(apply_edits(source, edits).is_err());
    }

    #[test]
    fn test_apply_edits_dedupes_identical_insertions() {
        let source = "line\n";
        let edits = vec![
            Edit::insert(0, "// m\n".to_string()),
            Edit::insert(0, "// m\n".to_string()),
        ];
        assert_eq!(apply_edits(source, edits).unwrap(), "// m\nline\n");
    }

    #[test]
    fn test_annotation_edit_uses_statement_indent() {
        let source = "function f() {\n  const x = require(p);\n}\n";
        let start = source.find("const").unwrap() as u32;
        let edit = annotation_edit(source, Span::new(start, start + 1)).unwrap();
        assert_eq!(edit.text, format!("  // {MANUAL_FIX_MARKER}\n"));
        assert_eq!(edit.start, source.find("  const").unwrap() as u32);
    }

    #[test]
    fn test_annotation_edit_skips_already_annotated() {
        let source = format!("// {MANUAL_FIX_MARKER}\nconst x = require(p);\n");
        let start = source.find("const").unwrap() as u32;
        assert!(annotation_edit(&source, Span::new(start, start + 1)).is_none());
    }
}
