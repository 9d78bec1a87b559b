use glob::glob;
use log::info;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Move every `.jpg` from a source images directory into the split's
/// images directory, keeping base names. Existing files are overwritten.
pub fn move_images(source_images_dir: &Path, images_dir: &Path) -> std::io::Result<usize> {
    let pattern = format!("{}/*.jpg", source_images_dir.display());
    let entries: Vec<PathBuf> = glob(&pattern)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?
        .filter_map(|entry| entry.ok())
        .collect();

    let mut moved = 0;
    for image_path in entries {
        let file_name = image_path.file_name().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, "image path has no file name")
        })?;
        fs::rename(&image_path, images_dir.join(file_name))?;
        moved += 1;
    }
    Ok(moved)
}

/// Create the dataset.yaml file for YOLO training
pub fn create_dataset_yaml(root: &Path, class_names: &[String]) -> std::io::Result<()> {
    let dataset_yaml_path = root.join("dataset.yaml");
    let mut dataset_yaml = BufWriter::new(File::create(&dataset_yaml_path)?);
    let absolute_path = fs::canonicalize(root)?;
    let mut yaml_content = format!(
        "path: {}\ntrain: images/train\nval: images/val\ntest: images/test\n",
        absolute_path.to_string_lossy()
    );
    yaml_content.push_str("\nnames:\n");
    for (id, name) in class_names.iter().enumerate() {
        yaml_content.push_str(&format!("    {}: {}\n", id, name));
    }
    dataset_yaml.write_all(yaml_content.as_bytes())
}

/// Remove an extracted source folder and its archive once the split has
/// been converted.
pub fn cleanup_source(root: &Path, folder: &str) -> std::io::Result<()> {
    let source_dir = root.join(folder);
    if source_dir.exists() {
        info!("Removing {}", source_dir.display());
        fs::remove_dir_all(&source_dir)?;
    }
    let archive_path = root.join(format!("{}.zip", folder));
    if archive_path.exists() {
        fs::remove_file(&archive_path)?;
    }
    Ok(())
}
