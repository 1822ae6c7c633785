// File: ./src/context.rs
//! Where studytrack keeps its files.
//!
//! [`AppContext`] answers three questions: where the config lives, where the
//! log goes and where the task file sits by default. [`StandardContext`]
//! answers them for a real run, [`TestContext`] for a throwaway temp tree.
//! Filesystem code takes a `&dyn AppContext` instead of reading global state.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const TASK_FILE_NAME: &str = "tareas.json";
pub const LOG_FILE_NAME: &str = "studytrack.log";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// The per-user directories a context hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppDir {
    Data,
    Config,
}

impl AppDir {
    /// Subdirectory name used below an explicit root.
    pub fn subdir(self) -> &'static str {
        match self {
            AppDir::Data => "data",
            AppDir::Config => "config",
        }
    }

    fn platform_path(self, proj: &ProjectDirs) -> &Path {
        match self {
            AppDir::Data => proj.data_dir(),
            AppDir::Config => proj.config_dir(),
        }
    }
}

/// Creates `path` (and parents) if needed and hands it back.
fn ensure_dir(path: PathBuf) -> Result<PathBuf> {
    std::fs::create_dir_all(&path)
        .with_context(|| format!("Failed to create directory: {:?}", path))?;
    Ok(path)
}

pub trait AppContext: std::fmt::Debug {
    /// Resolves `dir`, creating it on first use.
    fn get_dir(&self, dir: AppDir) -> Result<PathBuf>;

    fn get_data_dir(&self) -> Result<PathBuf> {
        self.get_dir(AppDir::Data)
    }

    fn get_config_dir(&self) -> Result<PathBuf> {
        self.get_dir(AppDir::Config)
    }

    /// Default location of the task file, before any config override.
    fn get_task_file_path(&self) -> Result<PathBuf> {
        Ok(self.get_data_dir()?.join(TASK_FILE_NAME))
    }

    fn get_config_file_path(&self) -> Result<PathBuf> {
        Ok(self.get_config_dir()?.join(CONFIG_FILE_NAME))
    }

    fn get_log_path(&self) -> Option<PathBuf> {
        self.get_data_dir().ok().map(|p| p.join(LOG_FILE_NAME))
    }
}

/// Context of a normal run: platform directories, or everything below
/// `--root` when one is given.
#[derive(Clone, Debug)]
pub struct StandardContext {
    override_root: Option<PathBuf>,
}

impl StandardContext {
    pub fn new(override_root: Option<PathBuf>) -> Self {
        Self { override_root }
    }
}

impl AppContext for StandardContext {
    fn get_dir(&self, dir: AppDir) -> Result<PathBuf> {
        let path = match &self.override_root {
            Some(root) => root.join(dir.subdir()),
            None => {
                let proj = ProjectDirs::from("org", "studytrack", "studytrack")
                    .ok_or_else(|| anyhow::anyhow!("No home directory"))?;
                dir.platform_path(&proj).to_path_buf()
            }
        };
        ensure_dir(path)
    }

    fn get_task_file_path(&self) -> Result<PathBuf> {
        match self.override_root {
            Some(_) => Ok(self.get_data_dir()?.join(TASK_FILE_NAME)),
            // Without a root the task file sits in the working directory.
            None => Ok(PathBuf::from(TASK_FILE_NAME)),
        }
    }
}

/// Context rooted in a fresh uuid-named temp directory, removed on drop.
#[derive(Debug)]
pub struct TestContext {
    pub root: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let root = std::env::temp_dir().join(format!("studytrack_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&root).expect("failed to create TestContext temp dir");
        Self { root }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppContext for TestContext {
    fn get_dir(&self, dir: AppDir) -> Result<PathBuf> {
        ensure_dir(self.root.join(dir.subdir()))
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_root_holds_every_file() {
        let tmp = TestContext::new();
        let ctx = StandardContext::new(Some(tmp.root.clone()));

        assert_eq!(ctx.get_data_dir().unwrap(), tmp.root.join("data"));
        assert_eq!(
            ctx.get_config_file_path().unwrap(),
            tmp.root.join("config").join(CONFIG_FILE_NAME)
        );
        assert_eq!(
            ctx.get_task_file_path().unwrap(),
            tmp.root.join("data").join(TASK_FILE_NAME)
        );
        assert_eq!(
            ctx.get_log_path(),
            Some(tmp.root.join("data").join(LOG_FILE_NAME))
        );
        assert!(tmp.root.join("config").is_dir());
    }

    #[test]
    fn test_without_root_task_file_is_relative() {
        let ctx = StandardContext::new(None);
        assert_eq!(ctx.get_task_file_path().unwrap(), PathBuf::from(TASK_FILE_NAME));
    }

    #[test]
    fn test_test_context_is_removed_on_drop() {
        let ctx = TestContext::new();
        let root = ctx.root.clone();
        ctx.get_data_dir().unwrap();
        assert!(root.join("data").is_dir());
        drop(ctx);
        assert!(!root.exists());
    }
}
