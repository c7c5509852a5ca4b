use anyhow::{Result, anyhow};
use log::trace;
use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::{Parser, ParserReturn};
use oxc_span::SourceType;
use std::path::Path;

/// Map a file path to the oxc `SourceType` used to parse it.
///
/// Everything is parsed as a module: codemods here introduce import
/// declarations, and `require()` remains a plain call expression under module
/// semantics.
pub fn source_type_for(path: &Path) -> SourceType {
    let ext = path.extension().and_then(|e| e.to_str());

    SourceType::default()
        .with_module(true)
        .with_jsx(matches!(ext, Some("tsx") | Some("jsx")))
        .with_typescript(matches!(ext, Some("ts") | Some("tsx") | Some("mts") | Some("cts")))
}

/// Parse one file's source text into an oxc `Program`.
///
/// Any syntax error fails the file: a codemod must not splice rewrites into a
/// tree whose spans may be unreliable. The caller decides whether that aborts
/// anything beyond the one file (it should not).
pub fn parse_program<'a>(
    allocator: &'a Allocator,
    source: &'a str,
    source_type: SourceType,
    path: &Path,
) -> Result<Program<'a>> {
    trace!("Parsing {} ({} bytes)", path.display(), source.len());
    let ParserReturn { program, errors, panicked, .. } =
        Parser::new(allocator, source, source_type).parse();

    if panicked || !errors.is_empty() {
        let first = errors
            .first()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "parser panicked".to_string());
        return Err(anyhow!("Failed to parse {}: {}", path.display(), first));
    }

    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_source_type_plain_js_is_module() {
        let st = source_type_for(&PathBuf::from("a/b/app.js"));
        assert!(st.is_module());
        assert!(!st.is_typescript());
        assert!(!st.is_jsx());
    }

    #[test]
    fn test_source_type_typescript() {
        let st = source_type_for(&PathBuf::from("lib/mod.ts"));
        assert!(st.is_typescript());
        assert!(!st.is_jsx());

        let st = source_type_for(&PathBuf::from("lib/view.tsx"));
        assert!(st.is_typescript());
        assert!(st.is_jsx());
    }

    #[test]
    fn test_source_type_jsx() {
        let st = source_type_for(&PathBuf::from("view.jsx"));
        assert!(st.is_jsx());
        assert!(!st.is_typescript());
    }

    #[test]
    fn test_parse_program_ok() {
        let allocator = Allocator::default();
        let src = "const x = require('m');\n";
        let program =
            parse_program(&allocator, src, source_type_for(Path::new("x.js")), Path::new("x.js"))
                .unwrap();
        assert_eq!(program.body.len(), 1);
    }

    #[test]
    fn test_parse_program_reports_syntax_errors() {
        let allocator = Allocator::default();
        let src = "const x = ;\n";
        let result =
            parse_program(&allocator, src, source_type_for(Path::new("x.js")), Path::new("x.js"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("x.js"));
    }
}
