use anyhow::Result;
use log::debug;
use oxc_allocator::Allocator;
use oxc_span::SourceType;
use std::path::Path;

use oxishift_core::parse_program;

use crate::emit::{Edit, annotation_edit, apply_edits, render_statements};
use crate::rewriter::{PlannedChange, plan_program};
use crate::types::{TransformOptions, TransformOutcome};

/// Rewrite one file's source text.
///
/// Untouched statements are copied byte-for-byte: replacements are rendered
/// through the code generator and spliced in by span, so a statement is
/// either fully converted or exactly as the author wrote it. Running the
/// transform on its own output is a no-op.
pub fn transform_source(
    source: &str,
    source_type: SourceType,
    options: &TransformOptions,
    path: &Path,
) -> Result<TransformOutcome> {
    let allocator = Allocator::default();
    let program = parse_program(&allocator, source, source_type, path)?;

    let mut edits: Vec<Edit> = Vec::new();
    let mut converted = 0usize;
    let mut skipped = 0usize;

    for change in plan_program(&allocator, &program, options) {
        match change {
            PlannedChange::Replace(span, statements) => {
                converted += 1;
                let text = render_statements(&allocator, statements, source_type, options.quote);
                edits.push(Edit::replace(span, text));
            }
            PlannedChange::Flag(span) => {
                skipped += 1;
                if options.annotate_unconvertible
                    && let Some(edit) = annotation_edit(source, span)
                {
                    edits.push(edit);
                }
            }
        }
    }

    let code = apply_edits(source, edits)?;
    let changed = code != source;
    if changed {
        debug!(
            "{}: {} statement(s) converted, {} left for manual conversion",
            path.display(),
            converted,
            skipped
        );
    }

    Ok(TransformOutcome { code, converted, skipped, changed })
}
