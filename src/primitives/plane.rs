use crate::core::{Transform, Transformed, EPSILON};
use crate::ray_intersection::{Intersectable, Ray};
use nalgebra::{Unit, Vector3};
use serde::Deserialize;

/// Infinite plane through the transform position.
///
/// `normal` is given in world space and points away from the visible side: a
/// ray only hits the plane while travelling along it, and the shading normal
/// is its negation.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Plane {
    normal: Vector3<f64>,
    #[serde(flatten)]
    transform: Transform,
    pub color: Vector3<f64>,
}

impl Default for Plane {
    fn default() -> Self {
        Self {
            normal: Vector3::from([0.0, 1.0, 0.0]),
            transform: Transform::default(),
            color: Vector3::from([1.0; 3]),
        }
    }
}

impl Plane {
    pub fn new(normal: Vector3<f64>, transform: Transform, color: Vector3<f64>) -> Self {
        Self {
            normal,
            transform,
            color,
        }
    }

    pub fn get_normal(&self) -> Vector3<f64> {
        self.normal
    }
}

impl Transformed for Plane {
    fn get_transform(&self) -> &Transform {
        &self.transform
    }
}

impl Intersectable for Plane {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let denom = self.normal.dot(&ray.direction);
        if denom <= EPSILON {
            return None;
        }

        let distance = (self.get_position() - ray.origin).dot(&self.normal) / denom;
        if distance >= 0.0 {
            return Some(distance);
        }

        None
    }

    fn surface_normal(&self, _ray: &Ray, _distance: f64) -> Unit<Vector3<f64>> {
        -Unit::new_normalize(self.normal)
    }
}
