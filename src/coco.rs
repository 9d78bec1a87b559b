//! COCO detection export structures
//!
//! Read-side structures for the `_annotations.coco.json` files written by
//! common labeling tools. Only the fields the catalog loader consumes are
//! modeled; unknown keys (info, licenses, ...) are ignored.

use serde::Deserialize;

/// One split's COCO export
#[derive(Debug, Clone, Deserialize)]
pub struct CocoFile {
    pub images: Vec<Image>,
    pub annotations: Vec<Annotation>,
    pub categories: Vec<Category>,
}

/// COCO category information
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub supercategory: String,
}

/// COCO image information
#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub id: u32,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
}

/// COCO annotation information
#[derive(Debug, Clone, Deserialize)]
pub struct Annotation {
    pub id: u32,
    pub image_id: u32,
    pub category_id: u32,
    pub bbox: [f64; 4], // [x, y, width, height]
    #[serde(default)]
    pub area: f64,
    #[serde(default)]
    pub iscrowd: u32,
    #[serde(default)]
    pub segmentation: Option<serde_json::Value>,
}
