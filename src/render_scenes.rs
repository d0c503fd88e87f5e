#![deny(clippy::all)]

use anyhow::{Context, Result};
use beamy::Scene;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const SCENE_DIR: &str = "scenes";
const OUTPUT_DIR: &str = "renders";
const ITERATIONS: u32 = 3;

fn scene_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("unable to read {}", dir.display()))? {
        let path = entry?.path();
        if path.extension().map_or(false, |extension| extension == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    Ok(paths)
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    fs::create_dir_all(OUTPUT_DIR)
        .with_context(|| format!("unable to create {}", OUTPUT_DIR))?;

    for scene_path in scene_paths(Path::new(SCENE_DIR))? {
        let scene = Scene::load(&scene_path)
            .with_context(|| format!("failed to load scene {}", scene_path.display()))?
            .build_raytracing_scene()
            .with_context(|| format!("invalid scene {}", scene_path.display()))?;

        let mut output_filename = PathBuf::from(OUTPUT_DIR);
        output_filename.push(scene_path.file_stem().unwrap_or_default());
        output_filename.set_extension("png");

        info!("Raytracing {}...", scene_path.display());
        let mut duration_sum = Duration::new(0, 0);
        for i in 1..=ITERATIONS {
            let (image, duration) = scene.raytrace_to_image(None);
            duration_sum += duration;
            info!("Iteration {}: rendered in {:.3?}", i, duration);

            if i == ITERATIONS {
                info!("Avg time: {:.3?}", duration_sum / ITERATIONS);
                image
                    .save(&output_filename)
                    .with_context(|| format!("unable to write {}", output_filename.display()))?;
                info!("Wrote rendered image to {}", output_filename.display());
            }
        }
    }

    Ok(())
}
