use anyhow::{Result, anyhow};
use log::{debug, trace};
use std::{env, path::PathBuf};

/// Walk upward from the current directory to the nearest `.git` directory.
pub fn find_git_root() -> Result<PathBuf> {
    debug!("Searching for git root");
    find_git_root_from(env::current_dir()?)
}

pub fn find_git_root_from(start: PathBuf) -> Result<PathBuf> {
    let mut dir = start;
    loop {
        trace!("Checking for .git at: {:?}", dir.join(".git"));
        if dir.join(".git").exists() {
            debug!("Found git root at: {:?}", dir);
            return Ok(dir);
        }

        match dir.parent() {
            Some(parent) => dir = parent.to_path_buf(),
            None => {
                debug!("Could not find .git directory in any parent folder");
                return Err(anyhow!("Could not find .git directory in any parent folder"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_git_root_from_nested_dir() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join(".git")).unwrap();

        let subdir = root.join("src").join("components");
        fs::create_dir_all(&subdir).unwrap();

        let git_root = find_git_root_from(subdir).unwrap();
        assert_eq!(git_root.canonicalize().unwrap(), root.canonicalize().unwrap());
    }

    #[test]
    fn test_find_git_root_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let subdir = temp_dir.path().join("nested").join("deep");
        fs::create_dir_all(&subdir).unwrap();

        let result = find_git_root_from(subdir);
        assert!(result.is_err());
    }
}
