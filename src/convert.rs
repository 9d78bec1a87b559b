use glob::glob;
use log::info;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::io::move_images;
use crate::types::ConversionStats;
use crate::utils::{create_progress_bar, read_image_dimensions};

/// Convert one VisDrone split into the YOLO layout.
///
/// `source_name` overrides the default `VisDrone2019-DET-<split>` source
/// folder under `root`. Images are moved (not copied) into `images/<split>`
/// before their dimensions are read, so reconverting a split requires an
/// intact source tree.
pub fn convert_split(
    root: &Path,
    split: &str,
    source_name: Option<&str>,
) -> io::Result<ConversionStats> {
    let default_name = format!("VisDrone2019-DET-{}", split);
    let source_dir = root.join(source_name.unwrap_or(&default_name));
    let images_dir = root.join("images").join(split);
    let labels_dir = root.join("labels").join(split);
    fs::create_dir_all(&labels_dir)?;

    let mut stats = ConversionStats::default();

    let source_images_dir = source_dir.join("images");
    if source_images_dir.exists() {
        fs::create_dir_all(&images_dir)?;
        stats.images_moved = move_images(&source_images_dir, &images_dir)?;
    }

    let pattern = format!("{}/annotations/*.txt", source_dir.display());
    let annotation_files: Vec<PathBuf> = glob(&pattern)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?
        .filter_map(|entry| entry.ok())
        .collect();

    info!(
        "Converting {} annotation files from {}",
        annotation_files.len(),
        source_dir.display()
    );
    let pb = create_progress_bar(
        annotation_files.len() as u64,
        &format!("Converting {}", split),
    );
    for annotation_path in &annotation_files {
        let file_name = annotation_path.file_name().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidData, "annotation path has no file name")
        })?;
        // Dimensions come from the already-moved image next to the label.
        let image_path = images_dir.join(Path::new(file_name).with_extension("jpg"));
        let (width, height) = read_image_dimensions(&image_path)?;

        let content = fs::read_to_string(annotation_path)?;
        let yolo_data = convert_rows(&content, width, height, &mut stats)?;
        fs::write(labels_dir.join(file_name), yolo_data)?;
        stats.files_converted += 1;
        pb.inc(1);
    }
    pb.finish();

    Ok(stats)
}

/// Convert raw VisDrone annotation rows into YOLO label lines.
///
/// Rows whose fifth field (the score/ignore flag) is exactly `"0"` are
/// skipped. Every other row must parse, short rows and blank lines
/// included, so malformed input halts the run. The class index is shifted
/// down by one and the box is normalized by the image dimensions.
pub fn convert_rows(
    content: &str,
    width: u32,
    height: u32,
    stats: &mut ConversionStats,
) -> io::Result<String> {
    if width == 0 || height == 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "image dimensions must be nonzero",
        ));
    }
    let dw = 1.0 / width as f64;
    let dh = 1.0 / height as f64;

    let mut yolo_data = String::new();
    for row in content.trim().lines() {
        let fields: Vec<&str> = row.split(',').collect();
        if field(&fields, 4)? == "0" {
            stats.rows_ignored += 1;
            continue;
        }
        let x = parse_int_field(field(&fields, 0)?)?;
        let y = parse_int_field(field(&fields, 1)?)?;
        let w = parse_int_field(field(&fields, 2)?)?;
        let h = parse_int_field(field(&fields, 3)?)?;
        let class_id = parse_int_field(field(&fields, 5)?)? - 1;

        let x_center = (x as f64 + w as f64 / 2.0) * dw;
        let y_center = (y as f64 + h as f64 / 2.0) * dh;
        let w_norm = w as f64 * dw;
        let h_norm = h as f64 * dh;
        yolo_data.push_str(&format!(
            "{} {:.6} {:.6} {:.6} {:.6}\n",
            class_id, x_center, y_center, w_norm, h_norm
        ));
        stats.boxes_written += 1;
    }

    Ok(yolo_data)
}

fn field<'a>(fields: &[&'a str], index: usize) -> io::Result<&'a str> {
    fields.get(index).copied().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "annotation row has {} fields, expected at least 6",
                fields.len()
            ),
        )
    })
}

fn parse_int_field(raw: &str) -> io::Result<i64> {
    raw.trim().parse::<i64>().map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("invalid integer field '{}': {}", raw, e),
        )
    })
}
