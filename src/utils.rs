use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::Path;

/// Create a progress bar with the given length and label
pub fn create_progress_bar(len: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{}] [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{eta}})",
                label
            ))
            .progress_chars("#>-"),
    );
    pb
}

/// Read image dimensions from the file header without decoding the image.
/// A missing or unreadable image is an error; the converter treats it as a
/// hard stop.
pub fn read_image_dimensions(path: &Path) -> io::Result<(u32, u32)> {
    let size = imagesize::size(path).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("failed to read image size of {}: {}", path.display(), e),
        )
    })?;
    if size.width == 0 || size.height == 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("image {} has zero dimensions", path.display()),
        ));
    }
    let width = u32::try_from(size.width)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let height = u32::try_from(size.height)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok((width, height))
}
