//! DynamoDB storage backend
//!
//! Records map onto four tables (optionally name-prefixed for shared
//! accounts):
//!
//! | Table        | Keys                | Notes                              |
//! |--------------|---------------------|------------------------------------|
//! | `Project`    | `name`              | one item per project               |
//! | `Task`       | `project`, `index`  | listed via filtered scan           |
//! | `Assignment` | `pk`                | `pk` = project + task + worker     |
//! | `Submission` | `pk`, `name`        | many items per `pk`                |
//!
//! Every item stores its serialized record as JSON in a `data` attribute
//! next to the key attributes; the backend never interprets the payload.
//! List operations are filtered full-table scans with a projection and no
//! secondary index, so their result order is not guaranteed.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;

use crate::storage::backend::{ListScope, RawRecord, RecordKey, StorageBackend, StorageError};

/// DynamoDB-backed record storage
#[derive(Debug, Clone)]
pub struct DynamoBackend {
    client: Client,
    table_prefix: String,
}

impl DynamoBackend {
    /// Create a backend with a pre-built client and table name prefix
    pub fn new(client: Client, table_prefix: impl Into<String>) -> Self {
        DynamoBackend {
            client,
            table_prefix: table_prefix.into(),
        }
    }

    /// Create a backend using the standard AWS SDK config chain
    pub async fn from_env(table_prefix: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config), table_prefix)
    }

    fn table(&self, base: &str) -> String {
        format!("{}{}", self.table_prefix, base)
    }

    fn table_for_key(&self, key: &RecordKey) -> String {
        match key {
            RecordKey::Project { .. } => self.table("Project"),
            RecordKey::Task { .. } => self.table("Task"),
            RecordKey::Assignment { .. } => self.table("Assignment"),
            RecordKey::Submission { .. } => self.table("Submission"),
        }
    }
}

/// Concatenated partition key for assignment and submission items
fn composite_key(project: &str, task_index: &str, worker_id: &str) -> String {
    format!("{project}{task_index}{worker_id}")
}

/// Key attributes identifying one item
fn key_attrs(key: &RecordKey) -> Vec<(&'static str, AttributeValue)> {
    match key {
        RecordKey::Project { project } => {
            vec![("name", AttributeValue::S(project.clone()))]
        }
        RecordKey::Task { project, index } => vec![
            ("project", AttributeValue::S(project.clone())),
            ("index", AttributeValue::S(index.clone())),
        ],
        RecordKey::Assignment {
            project,
            task_index,
            worker_id,
        } => vec![(
            "pk",
            AttributeValue::S(composite_key(project, task_index, worker_id)),
        )],
        RecordKey::Submission {
            project,
            task_index,
            worker_id,
            name,
        } => vec![
            (
                "pk",
                AttributeValue::S(composite_key(project, task_index, worker_id)),
            ),
            ("name", AttributeValue::S(name.clone())),
        ],
    }
}

fn string_attr(item: &HashMap<String, AttributeValue>, name: &str) -> Option<String> {
    item.get(name).and_then(|v| v.as_s().ok()).cloned()
}

fn map_sdk_error(
    err: impl std::error::Error + Send + Sync + 'static,
    what: impl std::fmt::Display,
) -> StorageError {
    StorageError::backend(format!("DynamoDB error for {what}: {err}"), err)
}

#[async_trait]
impl StorageBackend for DynamoBackend {
    async fn get(&self, key: &RecordKey) -> Result<Vec<u8>, StorageError> {
        let mut request = self.client.get_item().table_name(self.table_for_key(key));
        for (name, value) in key_attrs(key) {
            request = request.key(name, value);
        }

        let result = request.send().await.map_err(|e| map_sdk_error(e, key))?;
        let item = result
            .item()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;

        let data = string_attr(item, "data").ok_or_else(|| {
            StorageError::message(format!("missing data attribute for {key}"))
        })?;
        Ok(data.into_bytes())
    }

    async fn put(&self, key: &RecordKey, data: &[u8]) -> Result<(), StorageError> {
        let data = std::str::from_utf8(data).map_err(|e| StorageError::Write {
            key: key.to_string(),
            message: format!("record is not valid UTF-8: {e}"),
        })?;

        let mut request = self.client.put_item().table_name(self.table_for_key(key));
        for (name, value) in key_attrs(key) {
            request = request.item(name, value);
        }
        request = request.item("data", AttributeValue::S(data.to_string()));

        request.send().await.map_err(|e| StorageError::Write {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    async fn delete(&self, key: &RecordKey) -> Result<(), StorageError> {
        let mut request = self.client.delete_item().table_name(self.table_for_key(key));
        for (name, value) in key_attrs(key) {
            request = request.key(name, value);
        }
        request.send().await.map_err(|e| map_sdk_error(e, key))?;
        Ok(())
    }

    async fn exists(&self, key: &RecordKey) -> Result<bool, StorageError> {
        let mut request = self.client.get_item().table_name(self.table_for_key(key));
        for (name, value) in key_attrs(key) {
            request = request.key(name, value);
        }
        let result = request.send().await.map_err(|e| map_sdk_error(e, key))?;
        Ok(result.item().is_some())
    }

    async fn list(&self, scope: &ListScope) -> Result<Vec<RawRecord>, StorageError> {
        let (table, filter_attr, filter_value, name_attr) = match scope {
            ListScope::Tasks { project } => {
                (self.table("Task"), "project", project.clone(), "index")
            }
            ListScope::Submissions {
                project,
                task_index,
                worker_id,
            } => (
                self.table("Submission"),
                "pk",
                composite_key(project, task_index, worker_id),
                "name",
            ),
        };

        let mut records = Vec::new();
        let mut exclusive_start_key = None;

        loop {
            let mut scan = self
                .client
                .scan()
                .table_name(&table)
                .filter_expression("#f = :f")
                .projection_expression("#f, #n, #d")
                .expression_attribute_names("#f", filter_attr)
                .expression_attribute_names("#n", name_attr)
                .expression_attribute_names("#d", "data")
                .expression_attribute_values(":f", AttributeValue::S(filter_value.clone()));

            if let Some(start_key) = exclusive_start_key.take() {
                scan = scan.set_exclusive_start_key(Some(start_key));
            }

            let output = match scan.send().await {
                Ok(output) => output,
                Err(sdk_err) => {
                    // A table that has not been created yet lists as empty,
                    // matching the filesystem backend's missing-directory case.
                    if sdk_err
                        .as_service_error()
                        .is_some_and(|e| e.is_resource_not_found_exception())
                    {
                        return Ok(Vec::new());
                    }
                    return Err(map_sdk_error(sdk_err, scope));
                }
            };

            for item in output.items() {
                let name = string_attr(item, name_attr).ok_or_else(|| {
                    StorageError::message(format!("missing {name_attr} attribute in {scope}"))
                })?;
                let data = string_attr(item, "data").ok_or_else(|| {
                    StorageError::message(format!("missing data attribute in {scope}"))
                })?;
                records.push(RawRecord {
                    name,
                    data: data.into_bytes(),
                });
            }

            match output.last_evaluated_key() {
                Some(last_key) if !last_key.is_empty() => {
                    exclusive_start_key = Some(last_key.clone());
                }
                _ => break,
            }
        }

        Ok(records)
    }
}
