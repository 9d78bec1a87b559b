use log::{error, info};
use rayon::prelude::*;
use std::error::Error;
use std::fs::{self, File};
use std::io;
use std::path::Path;

use crate::utils::create_progress_bar;

/// The VisDrone2019-DET release archives.
pub const VISDRONE_URLS: &[&str] = &[
    "https://github.com/ultralytics/assets/releases/download/v0.0.0/VisDrone2019-DET-train.zip",
    "https://github.com/ultralytics/assets/releases/download/v0.0.0/VisDrone2019-DET-val.zip",
    "https://github.com/ultralytics/assets/releases/download/v0.0.0/VisDrone2019-DET-test-dev.zip",
];

/// Fetch archives into `dir` on a pool of `threads` workers and unpack them
/// in place. Fire-and-forget: a failed archive is logged and the rest
/// continue; the failure surfaces later when the converter misses its
/// source folder.
pub fn download_archives(urls: &[&str], dir: &Path, threads: usize) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(dir)?;
    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
    let pb = create_progress_bar(urls.len() as u64, "Downloading");
    pool.install(|| {
        urls.par_iter().for_each(|url| {
            if let Err(e) = fetch_archive(url, dir) {
                error!("Failed to fetch {}: {}", url, e);
            }
            pb.inc(1);
        });
    });
    pb.finish();
    Ok(())
}

/// Download one archive unless it is already present, then unpack it when
/// it is a zip. The body streams to a `.part` file that is renamed into
/// place only on success, so an interrupted download never masquerades as
/// a finished archive.
pub fn fetch_archive(url: &str, dir: &Path) -> Result<(), Box<dyn Error>> {
    let file_name =
        archive_file_name(url).ok_or_else(|| format!("archive url has no file name: {}", url))?;
    let archive_path = dir.join(file_name);

    if archive_path.exists() {
        info!("Found {}, skipping download", archive_path.display());
    } else {
        info!("Downloading {}...", url);
        let response = ureq::get(url).call()?;
        let part_path = dir.join(format!("{}.part", file_name));
        let mut reader = response.into_reader();
        let mut out = File::create(&part_path)?;
        io::copy(&mut reader, &mut out)?;
        fs::rename(&part_path, &archive_path)?;
    }

    if file_name.ends_with(".zip") {
        info!("Unpacking {}...", archive_path.display());
        let mut archive = zip::ZipArchive::new(File::open(&archive_path)?)?;
        archive.extract(dir)?;
    }

    Ok(())
}

/// The trailing path segment of an archive url.
pub fn archive_file_name(url: &str) -> Option<&str> {
    url.rsplit('/').next().filter(|name| !name.is_empty())
}
