//! Assignment model: a worker's claim on a task and its submitted state
//!
//! A submission is a frozen snapshot of an assignment taken at submit time,
//! so both decode into the same record type.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::project::Project;
use crate::models::task::Task;
use crate::util::record_timestamp;

/// A single label drawn by a worker
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: u64,
    #[serde(default)]
    pub item_index: u64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,
    /// Tool-specific geometry and attribute payload
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

/// A label identity tracked across consecutive items
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: u64,
    #[serde(default)]
    pub label_ids: Vec<u64>,
}

/// A timestamped UI event recorded during labeling
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub timestamp: i64,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub item_index: u64,
}

/// A worker's ongoing or completed work on one task
///
/// Identified by `(project, task index, worker)`. Until submitted, only the
/// task snapshot, worker id, and start time are populated; the submit
/// operation fills in the remaining fields and freezes a copy as a
/// submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub task: Task,
    pub worker_id: String,
    pub start_time: i64,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub tracks: Vec<Track>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub submit_time: i64,
    #[serde(default)]
    pub num_labeled_items: u64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_agent: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub ip_info: Value,
}

impl Assignment {
    /// Create a fresh assignment for a worker starting on a task
    ///
    /// The start time is the current epoch second; label, track, and event
    /// containers start empty. Nothing is persisted here.
    pub fn new(task: Task, worker_id: impl Into<String>) -> Self {
        Assignment {
            task,
            worker_id: worker_id.into(),
            start_time: record_timestamp(),
            labels: Vec::new(),
            tracks: Vec::new(),
            events: Vec::new(),
            submit_time: 0,
            num_labeled_items: 0,
            user_agent: String::new(),
            ip_info: Value::Null,
        }
    }

    /// Whether this record carries a submission snapshot
    pub fn is_submitted(&self) -> bool {
        self.submit_time > 0
    }
}

/// Read-only composite of a project and its tasks for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardContents {
    pub project: Project,
    pub tasks: Vec<Task>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::project::ProjectOptions;

    fn sample_task() -> Task {
        Task {
            project_name: "drive_0527".to_string(),
            index: 1,
            project_options: ProjectOptions::default(),
            items: Vec::new(),
        }
    }

    #[test]
    fn test_new_assignment_starts_empty() {
        let assignment = Assignment::new(sample_task(), "worker_1");
        assert_eq!(assignment.worker_id, "worker_1");
        assert!(assignment.start_time > 0);
        assert!(assignment.labels.is_empty());
        assert!(assignment.tracks.is_empty());
        assert!(assignment.events.is_empty());
        assert!(!assignment.is_submitted());
    }

    #[test]
    fn test_assignment_serde_round_trip() {
        let mut assignment = Assignment::new(sample_task(), "worker_1");
        assignment.labels.push(Label {
            id: 1,
            item_index: 0,
            category: "car".to_string(),
            data: serde_json::json!({"box2d": {"x1": 0, "y1": 0, "x2": 10, "y2": 10}}),
        });
        assignment.submit_time = assignment.start_time + 60;
        assignment.num_labeled_items = 1;
        assignment.user_agent = "Mozilla/5.0".to_string();

        let json = serde_json::to_string(&assignment).unwrap();
        assert!(json.contains(r#""workerId":"worker_1""#));
        assert!(json.contains(r#""submitTime""#));
        assert!(json.contains(r#""numLabeledItems":1"#));

        let parsed: Assignment = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, assignment);
        assert!(parsed.is_submitted());
    }

    #[test]
    fn test_assignment_decodes_without_submission_fields() {
        let json = format!(
            r#"{{"task":{},"workerId":"w","startTime":100}}"#,
            serde_json::to_string(&sample_task()).unwrap()
        );
        let parsed: Assignment = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.start_time, 100);
        assert_eq!(parsed.submit_time, 0);
        assert!(!parsed.is_submitted());
        assert!(parsed.ip_info.is_null());
    }
}
