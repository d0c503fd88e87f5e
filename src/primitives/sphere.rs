use crate::core::{Transform, Transformed};
use crate::ray_intersection::{Intersectable, Ray};
use crate::utils::quadratic;
use nalgebra::{Unit, Vector3};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Sphere {
    radius: f64,
    #[serde(flatten)]
    transform: Transform,
    pub color: Vector3<f64>,
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            radius: 1.0,
            transform: Transform::default(),
            color: Vector3::from([1.0; 3]),
        }
    }
}

impl Sphere {
    pub fn new(radius: f64, transform: Transform, color: Vector3<f64>) -> Self {
        Self {
            radius,
            transform,
            color,
        }
    }

    pub fn get_radius(&self) -> f64 {
        self.radius
    }
}

impl Transformed for Sphere {
    fn get_transform(&self) -> &Transform {
        &self.transform
    }
}

impl Intersectable for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let hypot = ray.origin - self.get_position();
        let a = ray.direction.magnitude_squared();
        let b = 2.0 * hypot.dot(&ray.direction);
        let c = hypot.magnitude_squared() - self.radius * self.radius;

        let (t0, t1) = quadratic(a, b, c)?;

        // A ray starting inside the sphere sees the far wall
        if t0 >= 0.0 {
            Some(t0)
        } else if t1 >= 0.0 {
            Some(t1)
        } else {
            None
        }
    }

    fn surface_normal(&self, ray: &Ray, distance: f64) -> Unit<Vector3<f64>> {
        Unit::new_normalize(ray.at(distance) - self.get_position())
    }
}
