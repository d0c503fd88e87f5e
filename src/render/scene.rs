use super::raytracing_scene::RaytracingScene;
use super::{Camera, RenderOptions};
use crate::core::{Transformed, EPSILON};
use crate::lights::AmbientLight;
use crate::primitives::{Object3D, Primitive};
use log::{info, warn};
use nalgebra::Vector3;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Instant;
use thiserror::Error;

/// Errors raised while loading a scene or preparing it for rendering.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Image must be at least 1x1 pixels, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Tile size must be positive")]
    InvalidTileSize,

    #[error("Camera field of view must be between 0 and 180 degrees, got {0}")]
    InvalidFov(f64),

    #[error("Sphere at index {index} has invalid radius {radius}")]
    DegenerateSphere { index: usize, radius: f64 },

    #[error("Plane at index {index} has a zero-length normal")]
    DegeneratePlane { index: usize },

    #[error("Object at index {index} has a non-positive scale")]
    InvalidScale { index: usize },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Scene {
    #[serde(flatten)]
    pub render_options: RenderOptions,
    camera: Camera,
    ambient: AmbientLight,
    objects: Vec<Object3D>,
}

fn check_scale(index: usize, object: &dyn Transformed) -> Result<(), SceneError> {
    let scale = object.get_transform().get_scale();
    if scale.iter().all(|&s| s > 0.0) {
        Ok(())
    } else {
        Err(SceneError::InvalidScale { index })
    }
}

impl Scene {
    pub fn new(render_options: RenderOptions, camera: Camera) -> Self {
        Self {
            render_options,
            camera,
            ..Scene::default()
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SceneError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let now = Instant::now();
        let scene = Self::from_reader(BufReader::new(File::open(path)?))?;
        info!(
            "Loaded {} objects from {} in {:?}",
            scene.objects.len(),
            path.display(),
            now.elapsed()
        );

        Ok(scene)
    }

    pub fn set_ambient(&mut self, color: Vector3<f64>) {
        self.ambient = AmbientLight::new(color);
    }

    pub fn add_object(&mut self, object: Object3D) {
        self.objects.push(object);
    }

    /// Validates the scene and splits its objects into occluders and lights.
    pub fn build_raytracing_scene(self) -> Result<RaytracingScene, SceneError> {
        let RenderOptions {
            width,
            height,
            tile_size,
            ..
        } = self.render_options;
        if width == 0 || height == 0 {
            return Err(SceneError::InvalidDimensions { width, height });
        }
        if tile_size == 0 {
            return Err(SceneError::InvalidTileSize);
        }
        if !(self.camera.fov > 0.0 && self.camera.fov < 180.0) {
            return Err(SceneError::InvalidFov(self.camera.fov));
        }

        let mut objects = Vec::new();
        let mut lights = Vec::new();
        for (index, object) in self.objects.into_iter().enumerate() {
            match object {
                Object3D::Sphere(sphere) => {
                    check_scale(index, &*sphere)?;
                    let radius = sphere.get_radius();
                    if !(radius.is_finite() && radius > 0.0) {
                        return Err(SceneError::DegenerateSphere { index, radius });
                    }
                    objects.push(Primitive::Sphere(*sphere));
                }
                Object3D::Plane(plane) => {
                    check_scale(index, &*plane)?;
                    if plane.get_normal().norm() < EPSILON {
                        return Err(SceneError::DegeneratePlane { index });
                    }
                    objects.push(Primitive::Plane(*plane));
                }
                Object3D::Light(light) => {
                    check_scale(index, &*light)?;
                    lights.push(*light);
                }
                Object3D::Unsupported(object_type) => {
                    warn!(
                        "Skipping object at index {} with unsupported type {:?}",
                        index, object_type
                    );
                }
            }
        }

        info!(
            "Built scene with {} primitives and {} lights",
            objects.len(),
            lights.len()
        );

        Ok(RaytracingScene::new(
            self.render_options,
            self.camera.into(),
            self.ambient,
            objects,
            lights,
        ))
    }
}
