use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

// VisDrone object categories after the off-by-one shift applied by the
// converter (raw category 1 becomes class 0, and so on).
pub const VISDRONE_CLASSES: &[&str] = &[
    "pedestrian",
    "people",
    "bicycle",
    "car",
    "van",
    "truck",
    "tricycle",
    "awning-tricycle",
    "bus",
    "motor",
];

// SAETA taxonomy. The built-in remap table only ever emits indices
// 0 (person), 1 (car), 2 (motorcycle) and 4 (bus), but dataset.yaml lists
// the full taxonomy.
pub const SAETA_CLASSES: &[&str] = &[
    "person",
    "car",
    "motorcycle",
    "airplane",
    "bus",
    "boat",
    "stop sign",
    "snowboard",
    "umbrella",
    "soccer ball",
    "basketball",
    "volleyball",
    "football",
    "baseball bat",
    "bed",
    "tennis racket",
    "suitcase",
    "skis",
];

/// Extracted archive folders and the split each one becomes.
pub const SOURCE_SPLITS: &[(&str, &str)] = &[
    ("VisDrone2019-DET-train", "train"),
    ("VisDrone2019-DET-val", "val"),
    ("VisDrone2019-DET-test-dev", "test"),
];

/// Split order visited by the remapper.
pub const REMAP_SPLITS: &[&str] = &["test", "train", "val"];

/// Default splits loaded into a catalog (Roboflow-style COCO exports name
/// the validation split "valid", not "val").
pub const DEFAULT_LOAD_SPLITS: &[&str] = &["train", "valid", "test"];

// VisDrone class index -> SAETA class index. Classes without an entry
// (bicycle, van, truck, tricycle, awning-tricycle) are dropped.
const VISDRONE_TO_SAETA: &[(u32, u32)] = &[(0, 0), (1, 0), (3, 1), (8, 4), (9, 2)];

/// A partial mapping between two class taxonomies.
///
/// The remapper drops any label line whose class has no entry here. `names`
/// holds the destination taxonomy's class names, indexed by destination id,
/// and may be empty for maps loaded from a bare entries file.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClassMap {
    pub entries: HashMap<u32, u32>,
    #[serde(default)]
    pub names: Vec<String>,
}

impl ClassMap {
    /// The built-in VisDrone -> SAETA mapping.
    pub fn visdrone_to_saeta() -> Self {
        Self {
            entries: VISDRONE_TO_SAETA.iter().copied().collect(),
            names: SAETA_CLASSES.iter().map(|name| name.to_string()).collect(),
        }
    }

    /// Load a mapping from a JSON file of the form
    /// `{"entries": {"0": 0, "3": 1}, "names": ["person", "car"]}`.
    pub fn from_json_file(path: &Path) -> std::io::Result<Self> {
        let file = fs::File::open(path)?;
        serde_json::from_reader(file)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    pub fn get(&self, class_id: u32) -> Option<u32> {
        self.entries.get(&class_id).copied()
    }

    /// Class names for dataset.yaml. Maps loaded without a name table fall
    /// back to generic names covering every destination index.
    pub fn yaml_names(&self) -> Vec<String> {
        if !self.names.is_empty() {
            return self.names.clone();
        }
        let count = self.entries.values().max().map_or(0, |max| *max as usize + 1);
        (0..count).map(|id| format!("class_{}", id)).collect()
    }
}

// Counters accumulated while converting one split
#[derive(Debug, Default, Clone)]
pub struct ConversionStats {
    pub images_moved: usize,
    pub files_converted: usize,
    pub boxes_written: usize,
    pub rows_ignored: usize,
}

impl ConversionStats {
    pub fn merge(&mut self, other: &ConversionStats) {
        self.images_moved += other.images_moved;
        self.files_converted += other.files_converted;
        self.boxes_written += other.boxes_written;
        self.rows_ignored += other.rows_ignored;
    }

    pub fn print_summary(&self, split: &str) {
        log::info!("=== Conversion summary ({}) ===", split);
        log::info!("Images moved: {}", self.images_moved);
        log::info!("Annotation files converted: {}", self.files_converted);
        log::info!("Boxes written: {}", self.boxes_written);
        if self.rows_ignored > 0 {
            log::info!("Ignored regions skipped: {}", self.rows_ignored);
        }
    }
}

// Counters accumulated by a remap run
#[derive(Debug, Default, Clone)]
pub struct RemapStats {
    pub files_rewritten: usize,
    pub lines_kept: usize,
    pub lines_dropped: usize,
}

impl RemapStats {
    pub fn print_summary(&self) {
        log::info!("=== Remap summary ===");
        log::info!("Label files rewritten: {}", self.files_rewritten);
        log::info!("Lines kept: {}", self.lines_kept);
        log::info!("Lines dropped (unmapped classes): {}", self.lines_dropped);
    }
}
