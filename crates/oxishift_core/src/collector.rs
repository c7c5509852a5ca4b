use anyhow::Result;
use ignore::WalkBuilder;
use log::{debug, trace};
use std::path::PathBuf;

use crate::constants::JS_TS_EXTENSIONS;

pub struct CollectorConfig {
    pub root: PathBuf,
    /// Substring filter applied to paths relative to `root`.
    pub include: Option<String>,
}

/// Collect the source files a codemod should visit under `cfg.root`.
///
/// Honors `.gitignore`, filters by JS/TS extension and skips TypeScript
/// declaration files. Test files are deliberately included: a codemod should
/// rewrite them along with the code they exercise.
pub fn collect_sources(cfg: &CollectorConfig) -> Result<Vec<PathBuf>> {
    debug!("Collecting source files under {}", cfg.root.display());
    let mut files: Vec<PathBuf> = Vec::new();
    let walker = WalkBuilder::new(&cfg.root).hidden(false).ignore(true).git_ignore(true).build();

    for res in walker {
        let dent = res?;
        let p = dent.path();
        if !p.is_file() {
            continue;
        }

        let Some(ext) = p.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        if !JS_TS_EXTENSIONS.contains(&ext) {
            continue;
        }

        // Declaration files carry no runtime code to rewrite
        let name = p.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if name.ends_with(".d.ts") || name.ends_with(".d.mts") || name.ends_with(".d.cts") {
            trace!("Skipping declaration file: {}", p.display());
            continue;
        }

        if let Some(filter) = &cfg.include {
            let Ok(rel) = p.strip_prefix(&cfg.root) else {
                continue;
            };
            if !rel.to_string_lossy().contains(filter.as_str()) {
                continue;
            }
            trace!("Matched include filter '{}': {}", filter, rel.display());
        }

        files.push(p.to_path_buf());
    }

    // Deterministic order regardless of walk order
    files.sort();
    debug!("Collected {} source files", files.len());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    #[test]
    fn test_collects_js_ts_files_only() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/a.js", "const a = 1;");
        create_test_file(root, "src/b.ts", "const b = 1;");
        create_test_file(root, "README.md", "# readme");
        create_test_file(root, "data.json", "{}");

        let files =
            collect_sources(&CollectorConfig { root: root.to_path_buf(), include: None }).unwrap();
        let names: Vec<_> =
            files.iter().map(|f| f.file_name().unwrap().to_str().unwrap()).collect();
        assert_eq!(names, vec!["a.js", "b.ts"]);
    }

    #[test]
    fn test_skips_declaration_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/types.d.ts", "declare const x: number;");
        create_test_file(root, "src/impl.ts", "export const x = 1;");

        let files =
            collect_sources(&CollectorConfig { root: root.to_path_buf(), include: None }).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("impl.ts"));
    }

    #[test]
    fn test_includes_test_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/a.test.js", "const a = 1;");
        create_test_file(root, "src/a.spec.ts", "const a = 1;");

        let files =
            collect_sources(&CollectorConfig { root: root.to_path_buf(), include: None }).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_include_filter() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "packages/app/index.js", "const a = 1;");
        create_test_file(root, "packages/lib/index.js", "const b = 1;");

        let files = collect_sources(&CollectorConfig {
            root: root.to_path_buf(),
            include: Some("packages/app".to_string()),
        })
        .unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].to_string_lossy().contains("packages/app"));
    }

    #[test]
    fn test_results_are_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "z.js", "");
        create_test_file(root, "a.js", "");
        create_test_file(root, "m/n.js", "");

        let files =
            collect_sources(&CollectorConfig { root: root.to_path_buf(), include: None }).unwrap();
        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);
    }
}
