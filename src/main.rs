#![deny(clippy::all)]

use anyhow::{Context, Result};
use beamy::Scene;
use clap::{App, Arg};
use log::info;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let matches = App::new("beamy")
        .about("A minimal offline ray tracer")
        .arg(
            Arg::with_name("scene")
                .index(1)
                .required(true)
                .takes_value(true)
                .help("input scene as a json file"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .default_value("out.png")
                .help("Output rendered image to file"),
        )
        .arg(
            Arg::with_name("noprogress")
                .long("no-progress")
                .help("Hide progress bar"),
        )
        .arg(
            Arg::with_name("threads")
                .short("j")
                .long("threads")
                .takes_value(true)
                .help("Number of render threads (defaults to one per core)"),
        )
        .get_matches();

    if let Some(threads) = matches.value_of("threads") {
        let threads: usize = threads
            .parse()
            .with_context(|| format!("invalid thread count {:?}", threads))?;
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure render threads")?;
    }

    let scene_path = Path::new(matches.value_of("scene").unwrap_or_default());
    let output_filename = matches.value_of("output").unwrap_or("out.png");
    let use_progress = !matches.is_present("noprogress");

    let scene = Scene::load(scene_path)
        .with_context(|| format!("failed to load scene {}", scene_path.display()))?
        .build_raytracing_scene()
        .context("invalid scene")?;

    let progress = use_progress.then(|| scene.build_progress_bar());
    let (image, duration) = scene.raytrace_to_image(progress);
    image
        .save(output_filename)
        .with_context(|| format!("unable to write image to {}", output_filename))?;
    info!("Output written to {} in {:.3?}", output_filename, duration);

    Ok(())
}
