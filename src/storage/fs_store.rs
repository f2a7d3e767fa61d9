//! Filesystem storage backend
//!
//! Records live in a directory tree under the configured data directory:
//!
//! ```text
//! {data_dir}/{project}/project.json
//! {data_dir}/{project}/tasks/{index}.json
//! {data_dir}/{project}/assignments/{task_index}/{worker_id}.json
//! {data_dir}/{project}/submissions/{task_index}/{worker_id}/{name}.json
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::storage::backend::{ListScope, RawRecord, RecordKey, StorageBackend, StorageError};
use crate::util::path_stem;

/// Record file name for a project's own configuration
const PROJECT_FILE: &str = "project.json";

/// Filesystem-backed record storage rooted at a data directory
#[derive(Debug, Clone)]
pub struct FsBackend {
    data_dir: PathBuf,
}

impl FsBackend {
    /// Create a backend rooted at the given data directory
    ///
    /// The directory does not need to exist yet; reads against a missing
    /// tree report not-found or empty, and writes create it on demand.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        FsBackend {
            data_dir: data_dir.into(),
        }
    }

    /// The data directory this backend is rooted at
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn project_dir(&self, project: &str) -> PathBuf {
        self.data_dir.join(project)
    }

    fn record_path(&self, key: &RecordKey) -> PathBuf {
        match key {
            RecordKey::Project { project } => self.project_dir(project).join(PROJECT_FILE),
            RecordKey::Task { project, index } => self
                .project_dir(project)
                .join("tasks")
                .join(format!("{index}.json")),
            RecordKey::Assignment {
                project,
                task_index,
                worker_id,
            } => self
                .project_dir(project)
                .join("assignments")
                .join(task_index)
                .join(format!("{worker_id}.json")),
            RecordKey::Submission {
                project,
                task_index,
                worker_id,
                name,
            } => self
                .project_dir(project)
                .join("submissions")
                .join(task_index)
                .join(worker_id)
                .join(format!("{name}.json")),
        }
    }

    fn scope_dir(&self, scope: &ListScope) -> PathBuf {
        match scope {
            ListScope::Tasks { project } => self.project_dir(project).join("tasks"),
            ListScope::Submissions {
                project,
                task_index,
                worker_id,
            } => self
                .project_dir(project)
                .join("submissions")
                .join(task_index)
                .join(worker_id),
        }
    }
}

#[async_trait]
impl StorageBackend for FsBackend {
    async fn get(&self, key: &RecordKey) -> Result<Vec<u8>, StorageError> {
        let path = self.record_path(key);
        match std::fs::read(&path) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(StorageError::backend(format!("failed to read {key}"), e)),
        }
    }

    async fn put(&self, key: &RecordKey, data: &[u8]) -> Result<(), StorageError> {
        let path = self.record_path(key);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::Write {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        }
        std::fs::write(&path, data).map_err(|e| StorageError::Write {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    async fn delete(&self, key: &RecordKey) -> Result<(), StorageError> {
        let result = match key {
            RecordKey::Project { project } => std::fs::remove_dir_all(self.project_dir(project)),
            _ => std::fs::remove_file(self.record_path(key)),
        };
        match result {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::backend(format!("failed to delete {key}"), e)),
        }
    }

    async fn exists(&self, key: &RecordKey) -> Result<bool, StorageError> {
        match key {
            // A project is taken if any data directory entry shares its stem,
            // matching how ingestion lays out project directories.
            RecordKey::Project { project } => {
                let entries = match std::fs::read_dir(&self.data_dir) {
                    Ok(entries) => entries,
                    Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
                    Err(e) => {
                        return Err(StorageError::backend("failed to read data directory", e));
                    }
                };
                for entry in entries {
                    let entry =
                        entry.map_err(|e| StorageError::backend("failed to read data directory", e))?;
                    if path_stem(&entry.file_name().to_string_lossy()) == *project {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            _ => Ok(self.record_path(key).exists()),
        }
    }

    async fn list(&self, scope: &ListScope) -> Result<Vec<RawRecord>, StorageError> {
        let dir = self.scope_dir(scope);
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::backend(format!("failed to list {scope}"), e)),
        };

        let mut records = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| StorageError::backend(format!("failed to list {scope}"), e))?;
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }
            let data = std::fs::read(&path).map_err(|e| {
                StorageError::backend(format!("failed to read {}", path.display()), e)
            })?;
            records.push(RawRecord {
                name: path_stem(&entry.file_name().to_string_lossy()),
                data,
            });
        }

        // Directory enumeration order is not guaranteed; submission recency
        // and task ordering both expect lexicographic names.
        records.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FsBackend) {
        let temp = TempDir::new().unwrap();
        let backend = FsBackend::new(temp.path());
        (temp, backend)
    }

    fn task_key(index: &str) -> RecordKey {
        RecordKey::Task {
            project: "demo".to_string(),
            index: index.to_string(),
        }
    }

    #[tokio::test]
    async fn test_put_then_get_round_trips() {
        let (_temp, backend) = setup();
        let key = task_key("0001");
        backend.put(&key, b"{\"index\":1}").await.unwrap();
        let data = backend.get(&key).await.unwrap();
        assert_eq!(data, b"{\"index\":1}");
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let (_temp, backend) = setup();
        let err = backend.get(&task_key("0001")).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_record_paths_follow_layout() {
        let (temp, backend) = setup();
        let project = RecordKey::Project {
            project: "demo".to_string(),
        };
        let submission = RecordKey::Submission {
            project: "demo".to_string(),
            task_index: "0002".to_string(),
            worker_id: "w1".to_string(),
            name: "2026-01-02_10-00-00".to_string(),
        };
        assert_eq!(
            backend.record_path(&project),
            temp.path().join("demo/project.json")
        );
        assert_eq!(
            backend.record_path(&submission),
            temp.path()
                .join("demo/submissions/0002/w1/2026-01-02_10-00-00.json")
        );
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (_temp, backend) = setup();
        let key = task_key("0001");
        backend.put(&key, b"{}").await.unwrap();
        backend.delete(&key).await.unwrap();
        backend.delete(&key).await.unwrap();
        assert!(!backend.exists(&key).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_project_removes_whole_tree() {
        let (temp, backend) = setup();
        let project = RecordKey::Project {
            project: "demo".to_string(),
        };
        backend.put(&project, b"{}").await.unwrap();
        backend.put(&task_key("0001"), b"{}").await.unwrap();

        backend.delete(&project).await.unwrap();
        assert!(!temp.path().join("demo").exists());

        // deleting again is still fine
        backend.delete(&project).await.unwrap();
    }

    #[tokio::test]
    async fn test_project_exists_matches_directory_stem() {
        let (_temp, backend) = setup();
        backend
            .put(
                &RecordKey::Project {
                    project: "My_Project".to_string(),
                },
                b"{}",
            )
            .await
            .unwrap();

        let taken = RecordKey::Project {
            project: "My_Project".to_string(),
        };
        let free = RecordKey::Project {
            project: "Other".to_string(),
        };
        assert!(backend.exists(&taken).await.unwrap());
        assert!(!backend.exists(&free).await.unwrap());
    }

    #[tokio::test]
    async fn test_project_exists_without_data_dir() {
        let temp = TempDir::new().unwrap();
        let backend = FsBackend::new(temp.path().join("never_created"));
        let key = RecordKey::Project {
            project: "demo".to_string(),
        };
        assert!(!backend.exists(&key).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_missing_directory_is_empty() {
        let (_temp, backend) = setup();
        let scope = ListScope::Tasks {
            project: "demo".to_string(),
        };
        assert!(backend.list(&scope).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_returns_lexicographic_order() {
        let (_temp, backend) = setup();
        for index in ["0002", "0000", "0001"] {
            backend
                .put(&task_key(index), format!("\"{index}\"").as_bytes())
                .await
                .unwrap();
        }

        let scope = ListScope::Tasks {
            project: "demo".to_string(),
        };
        let names: Vec<String> = backend
            .list(&scope)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["0000", "0001", "0002"]);
    }

    #[tokio::test]
    async fn test_list_ignores_non_json_entries() {
        let (temp, backend) = setup();
        backend.put(&task_key("0001"), b"{}").await.unwrap();
        std::fs::write(temp.path().join("demo/tasks/notes.txt"), b"ignore").unwrap();
        std::fs::create_dir(temp.path().join("demo/tasks/subdir")).unwrap();

        let scope = ListScope::Tasks {
            project: "demo".to_string(),
        };
        let records = backend.list(&scope).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "0001");
    }
}
