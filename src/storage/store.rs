//! Entity accessors over a storage backend
//!
//! [`LabelStore`] owns the backend chosen at process start and exposes the
//! per-entity read/write operations, the assignment resolution rule, and the
//! project name uniqueness check. Backend errors pass through unchanged
//! apart from gaining entity and key context.

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::{BackendKind, Config};
use crate::models::{Assignment, DashboardContents, Project, Task};
use crate::storage::backend::{ListScope, RecordKey, StorageBackend, StorageError};
use crate::storage::dynamo::DynamoBackend;
use crate::storage::fs_store::FsBackend;

/// Errors from entity-level storage operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },
    #[error("malformed {entity} record {key}: {source}")]
    Decode {
        entity: &'static str,
        key: String,
        source: serde_json::Error,
    },
    #[error("empty project name")]
    EmptyProjectName,
    #[error("project name already taken: {0}")]
    DuplicateName(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl StoreError {
    fn not_found(entity: &'static str, key: &RecordKey) -> Self {
        StoreError::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}

fn decode<T: DeserializeOwned>(
    entity: &'static str,
    key: impl ToString,
    data: &[u8],
) -> Result<T, StoreError> {
    serde_json::from_slice(data).map_err(|source| StoreError::Decode {
        entity,
        key: key.to_string(),
        source,
    })
}

fn encode<T: serde::Serialize>(
    entity: &'static str,
    key: impl ToString,
    value: &T,
) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(value).map_err(|source| StoreError::Decode {
        entity,
        key: key.to_string(),
        source,
    })
}

/// Entity access over one backend, constructed once per process
pub struct LabelStore {
    backend: Box<dyn StorageBackend>,
}

impl LabelStore {
    /// Wrap an already-constructed backend
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        LabelStore { backend }
    }

    /// Construct the backend selected by the configuration
    pub async fn open(config: &Config) -> Self {
        match &config.backend {
            BackendKind::Local { data_dir } => {
                LabelStore::new(Box::new(FsBackend::new(data_dir.clone())))
            }
            BackendKind::Remote { table_prefix } => {
                LabelStore::new(Box::new(DynamoBackend::from_env(table_prefix.clone()).await))
            }
        }
    }

    /// Fetch a project by name
    pub async fn get_project(&self, name: &str) -> Result<Project, StoreError> {
        let key = RecordKey::Project {
            project: name.to_string(),
        };
        let data = match self.backend.get(&key).await {
            Ok(data) => data,
            Err(StorageError::NotFound(_)) => return Err(StoreError::not_found("project", &key)),
            Err(e) => return Err(e.into()),
        };
        decode("project", &key, &data)
    }

    /// Delete a project's directly-owned storage; absent projects are fine
    ///
    /// Tasks and submissions on the remote backend are not cascade-deleted;
    /// only the project item is removed there.
    pub async fn delete_project(&self, name: &str) -> Result<(), StoreError> {
        let key = RecordKey::Project {
            project: name.to_string(),
        };
        self.backend.delete(&key).await?;
        Ok(())
    }

    /// Fetch a task by its project and zero-padded index key
    pub async fn get_task(&self, project: &str, index: &str) -> Result<Task, StoreError> {
        let key = RecordKey::Task {
            project: project.to_string(),
            index: index.to_string(),
        };
        let data = match self.backend.get(&key).await {
            Ok(data) => data,
            Err(StorageError::NotFound(_)) => return Err(StoreError::not_found("task", &key)),
            Err(e) => return Err(e.into()),
        };
        decode("task", &key, &data)
    }

    /// All tasks in a project, sorted by numeric index ascending
    ///
    /// Storage that does not exist yet lists as empty. The sort happens
    /// here so both backends agree regardless of enumeration or scan order.
    pub async fn list_tasks(&self, project: &str) -> Result<Vec<Task>, StoreError> {
        if project.is_empty() {
            return Err(StoreError::EmptyProjectName);
        }
        let scope = ListScope::Tasks {
            project: project.to_string(),
        };
        let mut tasks = Vec::new();
        for record in self.backend.list(&scope).await? {
            tasks.push(decode::<Task>(
                "task",
                format!("{project}/{}", record.name),
                &record.data,
            )?);
        }
        tasks.sort_by_key(|t| t.index);
        Ok(tasks)
    }

    /// Submission history for a triple, oldest first
    ///
    /// Entries are ordered by submit time, breaking ties by entry name, so
    /// the last element is the authoritative latest snapshot on either
    /// backend.
    pub async fn list_submissions(
        &self,
        project: &str,
        task_index: &str,
        worker_id: &str,
    ) -> Result<Vec<Assignment>, StoreError> {
        let scope = ListScope::Submissions {
            project: project.to_string(),
            task_index: task_index.to_string(),
            worker_id: worker_id.to_string(),
        };
        let mut entries = Vec::new();
        for record in self.backend.list(&scope).await? {
            let submission: Assignment = decode(
                "submission",
                format!("{project}/{task_index}/{worker_id}/{}", record.name),
                &record.data,
            )?;
            entries.push((submission, record.name));
        }
        entries.sort_by(|(a, a_name), (b, b_name)| {
            a.submit_time
                .cmp(&b.submit_time)
                .then_with(|| a_name.cmp(b_name))
        });
        Ok(entries.into_iter().map(|(submission, _)| submission).collect())
    }

    /// Current state of a worker's assignment
    ///
    /// The most recent submission wins; with no submissions recorded the
    /// original assignment is returned, and only then is absence an error.
    pub async fn get_assignment(
        &self,
        project: &str,
        task_index: &str,
        worker_id: &str,
    ) -> Result<Assignment, StoreError> {
        let mut submissions = self.list_submissions(project, task_index, worker_id).await?;
        if let Some(latest) = submissions.pop() {
            return Ok(latest);
        }

        let key = RecordKey::Assignment {
            project: project.to_string(),
            task_index: task_index.to_string(),
            worker_id: worker_id.to_string(),
        };
        let data = match self.backend.get(&key).await {
            Ok(data) => data,
            Err(StorageError::NotFound(_)) => {
                return Err(StoreError::not_found("assignment", &key));
            }
            Err(e) => return Err(e.into()),
        };
        decode("assignment", &key, &data)
    }

    /// Build a fresh assignment for a worker starting on a task
    ///
    /// Fails if the task does not exist. The assignment is returned without
    /// being persisted; call [`put_assignment`](Self::put_assignment) to
    /// store it.
    pub async fn create_assignment(
        &self,
        project: &str,
        task_index: &str,
        worker_id: &str,
    ) -> Result<Assignment, StoreError> {
        let task = self.get_task(project, task_index).await?;
        Ok(Assignment::new(task, worker_id))
    }

    /// Persist an assignment under its `(project, task, worker)` key
    pub async fn put_assignment(&self, assignment: &Assignment) -> Result<(), StoreError> {
        let key = RecordKey::Assignment {
            project: assignment.task.project_name.clone(),
            task_index: assignment.task.key_index(),
            worker_id: assignment.worker_id.clone(),
        };
        let data = encode("assignment", &key, assignment)?;
        self.backend.put(&key, &data).await?;
        Ok(())
    }

    /// The project together with all of its tasks
    pub async fn get_dashboard_contents(
        &self,
        project: &str,
    ) -> Result<DashboardContents, StoreError> {
        let project = self.get_project(project).await?;
        let tasks = self.list_tasks(&project.name).await?;
        Ok(DashboardContents { project, tasks })
    }

    /// Normalize a proposed project name and check it is not taken
    ///
    /// Spaces become underscores. A name already in use fails with
    /// [`StoreError::DuplicateName`]; if the existence check itself fails
    /// the name is treated as available, which keeps first-run setups
    /// working before any storage exists.
    pub async fn check_project_name(&self, raw_name: &str) -> Result<String, StoreError> {
        let normalized = raw_name.replace(' ', "_");
        let key = RecordKey::Project {
            project: normalized.clone(),
        };
        match self.backend.exists(&key).await {
            Ok(true) => Err(StoreError::DuplicateName(normalized)),
            Ok(false) => Ok(normalized),
            Err(e) => {
                log::debug!("existence check for {normalized} failed, treating as available: {e}");
                Ok(normalized)
            }
        }
    }
}
