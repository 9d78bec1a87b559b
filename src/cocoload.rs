use clap::Parser;
use log::{error, info};

use visdrone2yolo::{load_datasets_from_dirs, CatalogStore, LoadArgs};

fn main() {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = LoadArgs::parse();

    info!("Loading COCO exports into catalog '{}'...", args.name);

    let mut store = CatalogStore::new();
    match load_datasets_from_dirs(&mut store, &args.name, &args.base_dirs, &args.splits) {
        Ok(total) => info!("Loaded {} samples into catalog '{}'", total, args.name),
        Err(e) => {
            error!("Failed to load datasets: {}", e);
            std::process::exit(1);
        }
    }
}
