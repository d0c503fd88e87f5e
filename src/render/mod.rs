mod raytracing_scene;
mod scene;
mod tiles;

use crate::core::{Transform, Transformed};
use serde::Deserialize;

pub use raytracing_scene::{RaytracingCamera, RaytracingScene};
pub use scene::{Scene, SceneError};
pub use tiles::{buffer_offset, generate_tiles, RenderTile, DEFAULT_TILE_SIZE};

const BIAS: f64 = 1e-8;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Camera {
    /// Vertical field of view in degrees.
    pub fov: f64,
    #[serde(flatten)]
    pub transform: Transform,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov: 60.0,
            transform: Transform::default(),
        }
    }
}

impl Transformed for Camera {
    fn get_transform(&self) -> &Transform {
        &self.transform
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    #[serde(rename = "tileSize")]
    pub tile_size: u32,
    pub shadows: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            tile_size: DEFAULT_TILE_SIZE,
            shadows: false,
        }
    }
}
