use crate::core::{Transform, Transformed};
use nalgebra::Vector3;
use serde::Deserialize;

/// Emitter that illuminates surfaces but never occludes them.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PointLight {
    #[serde(flatten)]
    transform: Transform,
    color: Vector3<f64>,
    intensity: f64,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            transform: Transform::default(),
            color: Vector3::from([1.0; 3]),
            intensity: 1.0,
        }
    }
}

impl PointLight {
    pub fn new(color: Vector3<f64>, intensity: f64, transform: Transform) -> Self {
        Self {
            transform,
            color,
            intensity,
        }
    }

    pub fn get_intensity(&self) -> f64 {
        self.intensity
    }

    /// Unclamped radiance arriving from `distance` away (inverse-square falloff).
    pub fn get_color(&self, distance: f64) -> Vector3<f64> {
        self.intensity * self.color / distance.powi(2)
    }
}

impl Transformed for PointLight {
    fn get_transform(&self) -> &Transform {
        &self.transform
    }
}
