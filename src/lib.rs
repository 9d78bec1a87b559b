//! VisDrone to YOLO dataset tooling
//!
//! This library converts VisDrone detection annotations to YOLO format,
//! remaps converted labels between class taxonomies, and loads COCO exports
//! into named sample catalogs.

pub mod catalog;
pub mod coco;
pub mod config;
pub mod convert;
pub mod download;
pub mod io;
pub mod remap;
pub mod types;
pub mod utils;

// Re-export commonly used types and functions
pub use catalog::{load_datasets_from_dirs, Catalog, CatalogStore, Detection, Sample};
pub use config::{Args, LoadArgs};
pub use convert::{convert_rows, convert_split};
pub use download::{download_archives, fetch_archive, VISDRONE_URLS};
pub use io::{cleanup_source, create_dataset_yaml, move_images};
pub use remap::{remap_labels, remap_lines};
pub use types::{ClassMap, ConversionStats, RemapStats, SOURCE_SPLITS, VISDRONE_CLASSES};
