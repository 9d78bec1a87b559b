//! Named sample catalogs
//!
//! The loader imports one COCO export per (base directory, split)
//! combination into a named catalog held by an in-process store; reusing a
//! name replaces the previous catalog wholesale.

use chrono::{DateTime, Utc};
use log::info;
use std::collections::{BTreeSet, HashMap};
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::coco::{Annotation, CocoFile};

/// A labelled box in relative [0,1] coordinates.
#[derive(Debug, Clone)]
pub struct Detection {
    pub label: String,
    /// [x, y, width, height] relative to the image dimensions
    pub bounding_box: [f64; 4],
}

/// One imported media item and its detections.
#[derive(Debug, Clone)]
pub struct Sample {
    pub filepath: PathBuf,
    pub tags: Vec<String>,
    pub detections: Vec<Detection>,
}

/// A named, tag-addressable collection of samples.
#[derive(Debug, Clone)]
pub struct Catalog {
    name: String,
    created_at: DateTime<Utc>,
    samples: Vec<Sample>,
}

impl Catalog {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            created_at: Utc::now(),
            samples: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Sorted unique tags across all samples.
    pub fn tags(&self) -> Vec<String> {
        let set: BTreeSet<&String> = self.samples.iter().flat_map(|sample| &sample.tags).collect();
        set.into_iter().cloned().collect()
    }

    /// Import a COCO export as samples tagged with `tag`.
    ///
    /// `data_path` is the directory holding the split's images and
    /// `labels_path` its `_annotations.coco.json`. Sample file paths are
    /// recorded without checking that the images exist on disk; a missing
    /// or malformed annotation file is an error.
    pub fn add_coco_dir(
        &mut self,
        data_path: &Path,
        labels_path: &Path,
        tag: &str,
    ) -> Result<usize, Box<dyn Error>> {
        let file = File::open(labels_path)
            .map_err(|e| format!("failed to open {}: {}", labels_path.display(), e))?;
        let coco: CocoFile = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| format!("failed to parse {}: {}", labels_path.display(), e))?;

        let categories: HashMap<u32, &str> = coco
            .categories
            .iter()
            .map(|category| (category.id, category.name.as_str()))
            .collect();

        let mut annotations_by_image: HashMap<u32, Vec<&Annotation>> = HashMap::new();
        for annotation in &coco.annotations {
            annotations_by_image
                .entry(annotation.image_id)
                .or_default()
                .push(annotation);
        }

        let mut added = 0;
        for image in &coco.images {
            if image.width == 0 || image.height == 0 {
                return Err(format!(
                    "image {} in {} has zero dimensions",
                    image.file_name,
                    labels_path.display()
                )
                .into());
            }
            let width = image.width as f64;
            let height = image.height as f64;

            let mut detections = Vec::new();
            if let Some(annotations) = annotations_by_image.get(&image.id) {
                for annotation in annotations {
                    let label = categories.get(&annotation.category_id).ok_or_else(|| {
                        format!(
                            "annotation {} in {} references unknown category {}",
                            annotation.id,
                            labels_path.display(),
                            annotation.category_id
                        )
                    })?;
                    detections.push(Detection {
                        label: label.to_string(),
                        bounding_box: [
                            annotation.bbox[0] / width,
                            annotation.bbox[1] / height,
                            annotation.bbox[2] / width,
                            annotation.bbox[3] / height,
                        ],
                    });
                }
            }

            self.samples.push(Sample {
                filepath: data_path.join(&image.file_name),
                tags: vec![tag.to_string()],
                detections,
            });
            added += 1;
        }

        Ok(added)
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name:        {}", self.name)?;
        writeln!(
            f,
            "Created at:  {}",
            self.created_at.format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(f, "Num samples: {}", self.samples.len())?;
        write!(f, "Tags:        [{}]", self.tags().join(", "))
    }
}

/// In-process registry of catalogs keyed by name.
#[derive(Debug, Default)]
pub struct CatalogStore {
    catalogs: HashMap<String, Catalog>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a catalog, returning it if one existed. Callers that only
    /// want a clean slate ignore the result.
    pub fn delete(&mut self, name: &str) -> Option<Catalog> {
        self.catalogs.remove(name)
    }

    pub fn insert(&mut self, catalog: Catalog) {
        self.catalogs.insert(catalog.name().to_string(), catalog);
    }

    pub fn get(&self, name: &str) -> Option<&Catalog> {
        self.catalogs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.catalogs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }
}

/// Load every (base directory, split) COCO export into a fresh catalog
/// registered under `name`, replacing any previous catalog of that name.
/// Any missing or malformed export aborts the whole load.
pub fn load_datasets_from_dirs(
    store: &mut CatalogStore,
    name: &str,
    base_dirs: &[PathBuf],
    splits: &[String],
) -> Result<usize, Box<dyn Error>> {
    let _ = store.delete(name);
    let mut catalog = Catalog::new(name);

    let mut pending = Vec::new();
    for base_dir in base_dirs {
        for split in splits {
            let data_path = base_dir.join(split);
            let labels_path = data_path.join("_annotations.coco.json");
            pending.push((data_path, labels_path, split.as_str()));
        }
    }

    for (data_path, labels_path, tag) in pending {
        info!("Loading {} from {}...", tag, data_path.display());
        catalog.add_coco_dir(&data_path, &labels_path, tag)?;
    }

    info!("{}", catalog);
    info!("Total samples: {}", catalog.len());

    let total = catalog.len();
    store.insert(catalog);
    Ok(total)
}
