//! File-backed task repository storing a JSON array of records.

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use tokio::sync::RwLock;

use super::blocking::run_blocking;
use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Task repository persisted as a single JSON file.
///
/// A missing file is treated as an empty collection. Clones share the same
/// file handle and lock, so all clones are serialized against each other.
#[derive(Debug, Clone)]
pub struct JsonFileTaskRepository {
    file: Arc<StoreFile>,
    lock: Arc<RwLock<()>>,
}

impl JsonFileTaskRepository {
    /// Opens the repository backed by the file at `path`.
    ///
    /// The parent directory is created when missing. The file itself is only
    /// created by the first write.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when `path` has no file
    /// name or its directory cannot be created or opened.
    pub fn open(path: impl AsRef<Utf8Path>) -> TaskRepositoryResult<Self> {
        let file = StoreFile::open(path.as_ref())?;
        tracing::debug!(path = %file.path, "opened task store");
        Ok(Self {
            file: Arc::new(file),
            lock: Arc::new(RwLock::new(())),
        })
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.file.path
    }

    /// Runs a read-modify-write cycle under the exclusive lock.
    ///
    /// `mutate` receives the current collection and returns the value to
    /// hand back to the caller plus whether the collection must be written.
    async fn modify<T, F>(&self, mutate: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut Vec<Task>) -> TaskRepositoryResult<(T, bool)> + Send + 'static,
        T: Send + 'static,
    {
        let guard = Arc::clone(&self.lock).write_owned().await;
        let file = Arc::clone(&self.file);
        run_blocking(move || {
            let _exclusive = guard;
            let mut tasks = file.load()?;
            let (result, changed) = mutate(&mut tasks)?;
            if changed {
                file.save(&tasks)?;
            }
            Ok(result)
        })
        .await
    }

    /// Reads the collection under the shared lock.
    async fn read(&self) -> TaskRepositoryResult<Vec<Task>> {
        let guard = Arc::clone(&self.lock).read_owned().await;
        let file = Arc::clone(&self.file);
        run_blocking(move || {
            let _shared = guard;
            file.load()
        })
        .await
    }
}

#[async_trait]
impl TaskRepository for JsonFileTaskRepository {
    async fn find_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.read().await
    }

    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task = task.clone();
        self.modify(move |tasks| {
            if tasks.iter().any(|existing| existing.id() == task.id()) {
                return Err(TaskRepositoryError::DuplicateTask(task.id()));
            }
            tasks.push(task);
            Ok(((), true))
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task = task.clone();
        self.modify(move |tasks| {
            let slot = tasks
                .iter_mut()
                .find(|existing| existing.id() == task.id())
                .ok_or(TaskRepositoryError::NotFound(task.id()))?;
            *slot = task;
            Ok(((), true))
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let tasks = self.read().await?;
        Ok(tasks.into_iter().find(|task| task.id() == id))
    }

    async fn remove(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        self.modify(move |tasks| {
            let before = tasks.len();
            tasks.retain(|task| task.id() != id);
            let removed = tasks.len() != before;
            Ok((removed, removed))
        })
        .await
    }
}

/// Capability handle on the directory holding the store file.
struct StoreFile {
    dir: Dir,
    path: Utf8PathBuf,
    file_name: String,
    temp_name: String,
}

impl StoreFile {
    fn open(path: &Utf8Path) -> TaskRepositoryResult<Self> {
        let file_name = path.file_name().ok_or_else(|| {
            TaskRepositoryError::persistence(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("task store path '{path}' must name a file"),
            ))
        })?;
        let parent = match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };

        Dir::create_ambient_dir_all(parent, ambient_authority())
            .map_err(TaskRepositoryError::persistence)?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(TaskRepositoryError::persistence)?;

        Ok(Self {
            dir,
            path: path.to_owned(),
            file_name: file_name.to_owned(),
            temp_name: format!(".{file_name}.tmp"),
        })
    }

    fn load(&self) -> TaskRepositoryResult<Vec<Task>> {
        let contents = match self.dir.read_to_string(&self.file_name) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path, "task store file missing, using empty collection");
                return Ok(Vec::new());
            }
            Err(err) => return Err(TaskRepositoryError::persistence(err)),
        };
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&contents).map_err(TaskRepositoryError::persistence)
    }

    /// Writes the collection to a temporary sibling and renames it into place.
    fn save(&self, tasks: &[Task]) -> TaskRepositoryResult<()> {
        let contents =
            serde_json::to_string_pretty(tasks).map_err(TaskRepositoryError::persistence)?;

        let published = self
            .write_temp(contents.as_bytes())
            .and_then(|()| self.dir.rename(&self.temp_name, &self.dir, &self.file_name));
        self.discard_temp_on_error(published)?;
        tracing::debug!(path = %self.path, count = tasks.len(), "task store written");
        Ok(())
    }

    fn write_temp(&self, contents: &[u8]) -> io::Result<()> {
        let mut temp = self.dir.create(&self.temp_name)?;
        temp.write_all(contents)?;
        temp.sync_all()
    }

    /// Removes a partially written temporary file when publishing failed.
    fn discard_temp_on_error(&self, published: io::Result<()>) -> TaskRepositoryResult<()> {
        published.map_err(|err| {
            match self.dir.remove_file(&self.temp_name) {
                Ok(()) => {}
                Err(cleanup) if cleanup.kind() == io::ErrorKind::NotFound => {}
                Err(cleanup) => tracing::warn!(
                    path = %self.path,
                    %cleanup,
                    "failed to remove temporary task store file"
                ),
            }
            TaskRepositoryError::persistence(err)
        })
    }
}

impl fmt::Debug for StoreFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreFile")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
