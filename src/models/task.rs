//! Task model: one unit of labeling work within a project

use serde::{Deserialize, Serialize};

use crate::models::project::ProjectOptions;
use crate::util::format_id;

/// A single item to be labeled within a task
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub url: String,
    #[serde(default)]
    pub index: u64,
    /// Optional timestamp for video frames, epoch milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

/// A unit of work within a project, addressed by a numeric index
///
/// Tasks are written by the ingestion pipeline and are immutable here;
/// the storage key is the zero-padded index string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub project_name: String,
    pub index: u64,
    #[serde(default)]
    pub project_options: ProjectOptions,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Task {
    /// Zero-padded index string used as this task's storage key
    pub fn key_index(&self) -> String {
        format_id(self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task(index: u64) -> Task {
        Task {
            project_name: "drive_0527".to_string(),
            index,
            project_options: ProjectOptions::default(),
            items: vec![
                Item {
                    url: "https://example.com/frames/0001.jpg".to_string(),
                    index: 0,
                    timestamp: None,
                },
                Item {
                    url: "https://example.com/frames/0002.jpg".to_string(),
                    index: 1,
                    timestamp: None,
                },
            ],
        }
    }

    #[test]
    fn test_key_index_is_zero_padded() {
        assert_eq!(sample_task(0).key_index(), "0000");
        assert_eq!(sample_task(7).key_index(), "0007");
        assert_eq!(sample_task(12345).key_index(), "12345");
    }

    #[test]
    fn test_task_serde_round_trip() {
        let task = sample_task(3);
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains(r#""projectName":"drive_0527""#));
        assert!(json.contains(r#""index":3"#));
        let parsed: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, task);
    }

    #[test]
    fn test_task_decodes_with_minimal_fields() {
        let parsed: Task = serde_json::from_str(r#"{"projectName":"p","index":2}"#).unwrap();
        assert_eq!(parsed.index, 2);
        assert!(parsed.items.is_empty());
        assert_eq!(parsed.project_options, ProjectOptions::default());
    }
}
