//! labelstore - dual-backend persistence for labeling projects, tasks,
//! and assignments
//!
//! Records live either in a local filesystem tree or in DynamoDB. The
//! backend is chosen once from configuration; all reads and writes go
//! through [`LabelStore`].

pub mod cli;
pub mod config;
pub mod models;
pub mod storage;
pub mod util;

pub use config::{BackendKind, Config, ConfigError};
pub use models::{Assignment, DashboardContents, Item, Project, ProjectOptions, Task};
pub use storage::{DynamoBackend, FsBackend, LabelStore, StorageBackend, StoreError};
