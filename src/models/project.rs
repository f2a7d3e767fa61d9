//! Project model and shared labeling options

use serde::{Deserialize, Serialize};

use crate::models::taxonomy::{self, Attribute, Category};

/// Labeling configuration shared by a project and its tasks
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOptions {
    /// Item kind being labeled: "image", "video", or "pointcloud"
    #[serde(default)]
    pub item_type: String,
    /// Label kind: "box2d", "segmentation", "lane", "box3d"
    #[serde(default)]
    pub label_type: String,
    /// Number of items grouped into one task
    #[serde(default)]
    pub task_size: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub page_title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub vendor_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<Category>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
}

impl ProjectOptions {
    /// Configured categories, falling back to the default table for the
    /// project's label type
    pub fn categories_or_default(&self) -> &[Category] {
        if self.categories.is_empty() {
            taxonomy::default_categories(&self.label_type)
        } else {
            &self.categories
        }
    }

    /// Configured attributes, falling back to the default table for the
    /// project's label type
    pub fn attributes_or_default(&self) -> &[Attribute] {
        if self.attributes.is_empty() {
            taxonomy::default_attributes(&self.label_type)
        } else {
            &self.attributes
        }
    }

    /// Handler route for the labeling UI serving this configuration
    pub fn handler_url(&self) -> &'static str {
        crate::util::handler_url(&self.item_type, &self.label_type)
    }
}

/// A named collection of labeling tasks with shared configuration
///
/// Projects are created by the ingestion pipeline and only read or deleted
/// through this layer; the name is already normalized (no spaces).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub options: ProjectOptions,
    /// Zero-padded indices of the tasks belonging to this project
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub task_indices: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box2d_options() -> ProjectOptions {
        ProjectOptions {
            item_type: "image".to_string(),
            label_type: "box2d".to_string(),
            task_size: 10,
            ..Default::default()
        }
    }

    #[test]
    fn test_categories_fall_back_to_defaults() {
        let options = box2d_options();
        assert_eq!(options.categories_or_default().len(), 10);
        assert_eq!(options.attributes_or_default().len(), 3);
    }

    #[test]
    fn test_explicit_categories_win() {
        let mut options = box2d_options();
        options.categories = vec![Category::leaf("pedestrian")];
        assert_eq!(options.categories_or_default().len(), 1);
        assert_eq!(options.categories_or_default()[0].name, "pedestrian");
    }

    #[test]
    fn test_unknown_label_type_gets_dummy_attributes() {
        let options = ProjectOptions {
            item_type: "pointcloud".to_string(),
            label_type: "box3d".to_string(),
            ..Default::default()
        };
        assert!(options.categories_or_default().is_empty());
        assert_eq!(options.attributes_or_default().len(), 1);
    }

    #[test]
    fn test_handler_url() {
        assert_eq!(box2d_options().handler_url(), "2d_labeling");
    }

    #[test]
    fn test_project_serde_round_trip() {
        let project = Project {
            name: "drive_0527".to_string(),
            options: box2d_options(),
            task_indices: vec!["0000".to_string(), "0001".to_string()],
        };
        let json = serde_json::to_string(&project).unwrap();
        assert!(json.contains(r#""labelType":"box2d""#));
        assert!(json.contains(r#""taskIndices""#));
        let parsed: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, project);
    }

    #[test]
    fn test_project_decodes_with_minimal_fields() {
        let parsed: Project = serde_json::from_str(r#"{"name":"p"}"#).unwrap();
        assert_eq!(parsed.name, "p");
        assert!(parsed.task_indices.is_empty());
        assert_eq!(parsed.options, ProjectOptions::default());
    }
}
