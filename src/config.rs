use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

/// Command-line arguments for the VisDrone to YOLO conversion pipeline.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// Dataset root directory; archives are downloaded and converted here
    #[arg(short = 'd', long = "dir")]
    pub dir: PathBuf,

    /// Number of parallel download workers
    #[arg(long = "threads", default_value_t = 4, value_parser = validate_threads)]
    pub threads: usize,

    /// Skip downloading the archives (the source folders must already exist)
    #[arg(long = "skip-download")]
    pub skip_download: bool,

    /// Keep the extracted source folders and archives after conversion
    #[arg(long = "keep-sources")]
    pub keep_sources: bool,

    /// Remap the converted labels to the SAETA taxonomy
    #[arg(long = "saeta")]
    pub saeta: bool,

    /// JSON file with a custom class remap table (implies remapping)
    #[arg(long = "class-map")]
    pub class_map: Option<PathBuf>,
}

impl Args {
    /// Whether a remap stage was requested, either via the built-in SAETA
    /// table or a custom one.
    pub fn remap_requested(&self) -> bool {
        self.saeta || self.class_map.is_some()
    }
}

/// Command-line arguments for loading COCO exports into a catalog.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct LoadArgs {
    /// Name of the catalog to create (an existing one is replaced)
    #[arg(short = 'n', long = "name")]
    pub name: String,

    /// Base directories containing one COCO export per split
    #[arg(required = true)]
    pub base_dirs: Vec<PathBuf>,

    /// Split names loaded from every base directory
    #[arg(
        long = "splits",
        use_value_delimiter = true,
        default_values_t = default_load_splits()
    )]
    pub splits: Vec<String>,
}

fn default_load_splits() -> Vec<String> {
    crate::types::DEFAULT_LOAD_SPLITS
        .iter()
        .map(|split| split.to_string())
        .collect()
}

// Validate that the worker count stays within a sane range
fn validate_threads(s: &str) -> Result<usize, String> {
    match usize::from_str(s) {
        Ok(val) if (1..=32).contains(&val) => Ok(val),
        _ => Err("THREADS must be between 1 and 32".to_string()),
    }
}
