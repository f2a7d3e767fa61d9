//! Storage backend trait shared by the filesystem and DynamoDB backends
//!
//! Backends are dumb record stores: they move undecoded JSON bytes keyed by
//! typed record keys. Decoding, ordering, and resolution logic live in
//! [`LabelStore`](crate::storage::store::LabelStore).

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from raw backend operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("record not found: {0}")]
    NotFound(String),
    #[error("write rejected for {key}: {message}")]
    Write { key: String, message: String },
    #[error("backend error: {message}")]
    Backend {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl StorageError {
    /// Wrap an underlying client error as a backend failure
    pub fn backend(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        StorageError::Backend {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// A backend failure with no underlying error to attach
    pub fn message(message: impl Into<String>) -> Self {
        StorageError::Backend {
            message: message.into(),
            source: None,
        }
    }
}

/// Typed key addressing one stored record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordKey {
    Project {
        project: String,
    },
    Task {
        project: String,
        index: String,
    },
    Assignment {
        project: String,
        task_index: String,
        worker_id: String,
    },
    Submission {
        project: String,
        task_index: String,
        worker_id: String,
        name: String,
    },
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Project { project } => write!(f, "project {project}"),
            RecordKey::Task { project, index } => write!(f, "task {project}/{index}"),
            RecordKey::Assignment {
                project,
                task_index,
                worker_id,
            } => write!(f, "assignment {project}/{task_index}/{worker_id}"),
            RecordKey::Submission {
                project,
                task_index,
                worker_id,
                name,
            } => write!(f, "submission {project}/{task_index}/{worker_id}/{name}"),
        }
    }
}

/// Scope for listing a family of records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListScope {
    /// All tasks belonging to one project
    Tasks { project: String },
    /// All submissions for one `(project, task, worker)` triple
    Submissions {
        project: String,
        task_index: String,
        worker_id: String,
    },
}

impl fmt::Display for ListScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListScope::Tasks { project } => write!(f, "tasks of {project}"),
            ListScope::Submissions {
                project,
                task_index,
                worker_id,
            } => write!(f, "submissions of {project}/{task_index}/{worker_id}"),
        }
    }
}

/// One listed record: its sortable entry name plus undecoded bytes
///
/// The name is the filename stem on the filesystem backend and the range-key
/// attribute on DynamoDB. Only the filesystem backend guarantees the entries
/// arrive in lexicographic name order.
#[derive(Debug, Clone)]
pub struct RawRecord {
    pub name: String,
    pub data: Vec<u8>,
}

/// Record storage for one backing medium
///
/// Implementations must not decode record payloads or apply domain rules;
/// every operation is a single round trip against the backing store.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Fetch one record's bytes
    async fn get(&self, key: &RecordKey) -> Result<Vec<u8>, StorageError>;

    /// Store one record, overwriting any previous value
    async fn put(&self, key: &RecordKey, data: &[u8]) -> Result<(), StorageError>;

    /// Remove one record; deleting an absent key is not an error
    ///
    /// For a project key this removes all of the project's directly-owned
    /// storage (the filesystem backend removes the whole project tree; the
    /// DynamoDB backend deletes only the project item).
    async fn delete(&self, key: &RecordKey) -> Result<(), StorageError>;

    /// Whether a record with this key exists
    async fn exists(&self, key: &RecordKey) -> Result<bool, StorageError>;

    /// Fetch all records in a scope; an absent directory or empty scan is an
    /// empty result, not an error
    async fn list(&self, scope: &ListScope) -> Result<Vec<RawRecord>, StorageError>;
}
