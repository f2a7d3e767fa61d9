//! Storage layer: backend trait, implementations, and entity accessors

pub mod backend;
pub mod dynamo;
pub mod fs_store;
pub mod store;

pub use backend::{ListScope, RawRecord, RecordKey, StorageBackend, StorageError};
pub use dynamo::DynamoBackend;
pub use fs_store::FsBackend;
pub use store::{LabelStore, StoreError};
