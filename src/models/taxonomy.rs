//! Label taxonomy types and the built-in default tables
//!
//! Projects normally carry their own category and attribute configuration;
//! the statics here are the fallback tables used when a project omits them.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// A label category, optionally grouping subcategories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcategories: Vec<Category>,
}

impl Category {
    /// Create a leaf category with no subcategories
    pub fn leaf(name: impl Into<String>) -> Self {
        Category {
            name: name.into(),
            subcategories: Vec::new(),
        }
    }

    /// Create a category grouping the given subcategories
    pub fn group(name: impl Into<String>, subcategories: Vec<Category>) -> Self {
        Category {
            name: name.into(),
            subcategories,
        }
    }
}

/// A label attribute: a switch or a list of selectable values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub name: String,
    /// Widget kind: "switch" or "list"
    pub tool_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tag_text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tag_prefix: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag_suffixes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub button_colors: Vec<String>,
}

impl Attribute {
    /// Create an on/off switch attribute with a tag shortcut
    pub fn switch(name: impl Into<String>, tag_text: impl Into<String>) -> Self {
        Attribute {
            name: name.into(),
            tool_type: "switch".to_string(),
            tag_text: tag_text.into(),
            tag_prefix: String::new(),
            values: Vec::new(),
            tag_suffixes: Vec::new(),
            button_colors: Vec::new(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn leaves(names: &[&str]) -> Vec<Category> {
    names.iter().map(|name| Category::leaf(*name)).collect()
}

/// Default box2d categories used when a project defines none
pub static DEFAULT_BOX2D_CATEGORIES: Lazy<Vec<Category>> = Lazy::new(|| {
    leaves(&[
        "person",
        "rider",
        "car",
        "truck",
        "bus",
        "train",
        "motor",
        "bike",
        "traffic sign",
        "traffic light",
    ])
});

/// Default segmentation category tree used when a project defines none
pub static DEFAULT_SEG2D_CATEGORIES: Lazy<Vec<Category>> = Lazy::new(|| {
    vec![
        Category::group(
            "void",
            leaves(&["unlabeled", "dynamic", "ego vehicle", "ground", "static"]),
        ),
        Category::group(
            "flat",
            leaves(&["parking", "rail track", "road", "sidewalk"]),
        ),
        Category::group(
            "construction",
            leaves(&[
                "bridge",
                "building",
                "bus stop",
                "fence",
                "garage",
                "guard rail",
                "tunnel",
                "wall",
            ]),
        ),
        Category::group(
            "object",
            leaves(&[
                "banner",
                "billboard",
                "fire hydrant",
                "lane divider",
                "mail box",
                "parking sign",
                "pole",
                "polegroup",
                "street light",
                "traffic cone",
                "traffic device",
                "traffic light",
                "traffic sign",
                "traffic sign frame",
                "trash can",
            ]),
        ),
        Category::group("nature", leaves(&["terrain", "vegetation"])),
        Category::group("sky", leaves(&["sky"])),
        Category::group("human", leaves(&["person", "rider"])),
        Category::group(
            "vehicle",
            leaves(&[
                "bicycle",
                "bus",
                "car",
                "caravan",
                "motorcycle",
                "trailer",
                "train",
                "truck",
            ]),
        ),
    ]
});

/// Default lane categories used when a project defines none
pub static DEFAULT_LANE2D_CATEGORIES: Lazy<Vec<Category>> = Lazy::new(|| {
    leaves(&[
        "road curb",
        "double white",
        "double yellow",
        "double other",
        "single white",
        "single yellow",
        "single other",
        "crosswalk",
    ])
});

/// Default box2d attributes used when a project defines none
pub static DEFAULT_BOX2D_ATTRIBUTES: Lazy<Vec<Attribute>> = Lazy::new(|| {
    vec![
        Attribute::switch("Occluded", "o"),
        Attribute::switch("Truncated", "t"),
        Attribute {
            name: "Traffic Light Color".to_string(),
            tool_type: "list".to_string(),
            tag_text: String::new(),
            tag_prefix: "t".to_string(),
            values: strings(&["", "g", "y", "r"]),
            tag_suffixes: strings(&["NA", "G", "Y", "R"]),
            button_colors: strings(&["white", "green", "yellow", "red"]),
        },
    ]
});

/// Placeholder attribute table for label types with no defaults
///
/// The labeling UI expects a non-empty attribute list, so a single blank
/// entry stands in rather than an empty table.
pub static DUMMY_ATTRIBUTES: Lazy<Vec<Attribute>> = Lazy::new(|| {
    vec![Attribute {
        name: String::new(),
        tool_type: String::new(),
        tag_text: String::new(),
        tag_prefix: String::new(),
        values: Vec::new(),
        tag_suffixes: Vec::new(),
        button_colors: Vec::new(),
    }]
});

/// Default category table for a label type, empty if none is defined
pub fn default_categories(label_type: &str) -> &'static [Category] {
    match label_type {
        "box2d" => &DEFAULT_BOX2D_CATEGORIES,
        "segmentation" => &DEFAULT_SEG2D_CATEGORIES,
        "lane" => &DEFAULT_LANE2D_CATEGORIES,
        _ => &[],
    }
}

/// Default attribute table for a label type
pub fn default_attributes(label_type: &str) -> &'static [Attribute] {
    match label_type {
        "box2d" => &DEFAULT_BOX2D_ATTRIBUTES,
        _ => &DUMMY_ATTRIBUTES,
    }
}
