use clap::Parser;
use log::{error, info};
use std::error::Error;

use visdrone2yolo::{
    cleanup_source, convert_split, create_dataset_yaml, download_archives, remap_labels, Args,
    ClassMap, ConversionStats, SOURCE_SPLITS, VISDRONE_CLASSES, VISDRONE_URLS,
};

fn main() {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.skip_download && !args.dir.exists() {
        error!("The specified dir does not exist: {}", args.dir.display());
        std::process::exit(1);
    }

    info!("Starting the VisDrone conversion pipeline...");

    if let Err(e) = run(&args) {
        error!("Conversion failed: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    if args.skip_download {
        info!("Skipping download, using existing source folders");
    } else {
        download_archives(VISDRONE_URLS, &args.dir, args.threads)?;
    }

    let mut totals = ConversionStats::default();
    for &(folder, split) in SOURCE_SPLITS {
        let stats = convert_split(&args.dir, split, Some(folder))?;
        stats.print_summary(split);
        totals.merge(&stats);
        if !args.keep_sources {
            cleanup_source(&args.dir, folder)?;
        }
    }
    info!(
        "Converted {} annotation files across {} splits",
        totals.files_converted,
        SOURCE_SPLITS.len()
    );

    let class_map = if args.remap_requested() {
        Some(match &args.class_map {
            Some(path) => ClassMap::from_json_file(path)?,
            None => ClassMap::visdrone_to_saeta(),
        })
    } else {
        None
    };

    let yaml_names: Vec<String> = match &class_map {
        Some(map) => map.yaml_names(),
        None => VISDRONE_CLASSES.iter().map(|name| name.to_string()).collect(),
    };
    create_dataset_yaml(&args.dir, &yaml_names)?;

    if let Some(map) = &class_map {
        let stats = remap_labels(&args.dir, map)?;
        stats.print_summary();
    }

    info!("Conversion pipeline completed successfully.");
    Ok(())
}
