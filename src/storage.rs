// Manages the JSON task file.
//
// The file is a plain JSON array of task records. Saving overwrites it in
// full and loading replaces the in-memory store in full.
use crate::error::{TaskError, TaskResult};
use crate::model::{Task, TaskRecord};
use crate::store::TaskStore;
use fs2::FileExt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub struct LocalStorage;

impl LocalStorage {
    /// Helper to get a sidecar lock file path
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    fn open_lock(lock_path: &Path) -> io::Result<fs::File> {
        fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(lock_path)
    }

    /// Runs `f` while holding an exclusive lock on the sidecar of `file_path`.
    /// The lock is released when the lock file handle drops, on every path.
    pub fn with_lock<F, T>(file_path: &Path, f: F) -> TaskResult<T>
    where
        F: FnOnce() -> TaskResult<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let lock_err = |source| TaskError::Write {
            path: lock_path.clone(),
            source,
        };
        let file = Self::open_lock(&lock_path).map_err(lock_err)?;

        file.lock_exclusive().map_err(lock_err)?;
        let result = f();
        file.unlock().map_err(lock_err)?;
        result
    }

    /// Runs `f` under a shared lock on the sidecar of `file_path`.
    ///
    /// A sidecar that cannot be created (read-only directory, say) does not
    /// block reading: `f` then runs unlocked.
    pub fn with_read_lock<F, T>(file_path: &Path, f: F) -> TaskResult<T>
    where
        F: FnOnce() -> TaskResult<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = match Self::open_lock(&lock_path) {
            Ok(file) => file,
            Err(e) => {
                log::debug!("Reading {} unlocked: {}", file_path.display(), e);
                return f();
            }
        };
        let lock_err = |source| TaskError::Read {
            path: lock_path.clone(),
            source,
        };

        file.lock_shared().map_err(lock_err)?;
        let result = f();
        file.unlock().map_err(lock_err)?;
        result
    }

    /// Atomic write: Write to .tmp file then rename. The .tmp file is
    /// removed again if either step fails.
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> io::Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        let written = fs::write(&tmp_path, contents).and_then(|_| fs::rename(&tmp_path, path));
        if written.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        written
    }

    /// Writes every task of `store` to `path` as a pretty-printed JSON array.
    /// Returns the number of tasks written.
    pub fn save(store: &TaskStore, path: &Path) -> TaskResult<usize> {
        let records: Vec<TaskRecord> = store.tasks().iter().map(Task::to_record).collect();
        let write_err = |source| TaskError::Write {
            path: path.to_path_buf(),
            source,
        };
        let json = serde_json::to_string_pretty(&records)
            .map_err(|e| write_err(io::Error::other(e)))?;

        Self::with_lock(path, || Self::atomic_write(path, &json).map_err(write_err))?;
        log::info!("Saved {} task(s) to {}", records.len(), path.display());
        Ok(records.len())
    }

    /// Reads and decodes the task file at `path`.
    ///
    /// Either every record decodes or an error is returned; no partial list
    /// ever escapes.
    pub fn load(path: &Path) -> TaskResult<Vec<Task>> {
        if !path.exists() {
            return Err(TaskError::FileNotFound(path.to_path_buf()));
        }
        let json = Self::with_read_lock(path, || {
            fs::read_to_string(path).map_err(|source| TaskError::Read {
                path: path.to_path_buf(),
                source,
            })
        })?;
        Self::decode(&json)
    }

    /// Loads `path` and swaps the result into `store`. On error the
    /// store keeps its previous contents.
    pub fn load_into(store: &mut TaskStore, path: &Path) -> TaskResult<usize> {
        let tasks = Self::load(path)?;
        let count = tasks.len();
        store.replace(tasks);
        log::info!("Loaded {} task(s) from {}", count, path.display());
        Ok(count)
    }

    pub fn decode(json: &str) -> TaskResult<Vec<Task>> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| TaskError::MalformedData(e.to_string()))?;
        let serde_json::Value::Array(items) = value else {
            return Err(TaskError::MalformedData(
                "expected a JSON array of tasks".to_string(),
            ));
        };

        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                let record: TaskRecord =
                    serde_json::from_value(item).map_err(|e| TaskError::InvalidRecord {
                        index,
                        reason: e.to_string(),
                    })?;
                Task::from_record(record).map_err(|e| TaskError::InvalidRecord {
                    index,
                    reason: e.to_string(),
                })
            })
            .collect()
    }
}
