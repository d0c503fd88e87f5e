mod plane;
mod sphere;

use crate::core::{Transform, Transformed};
use crate::lights::PointLight;
use crate::ray_intersection::{Intersectable, Ray};
use nalgebra::{Unit, Vector3};
use serde::de::{self, Deserializer};
use serde::Deserialize;

pub use plane::*;
pub use sphere::*;

/// An entry of the scene's object list, as described in the scene file.
#[derive(Debug)]
pub enum Object3D {
    Sphere(Box<Sphere>),
    Plane(Box<Plane>),
    Light(Box<PointLight>),
    /// Object with a `type` this renderer does not know; skipped when the scene is built.
    Unsupported(String),
}

fn default_object_type() -> String {
    "sphere".to_string()
}

#[derive(Deserialize)]
struct ObjectDescription {
    #[serde(rename = "type", default = "default_object_type")]
    object_type: String,
    #[serde(flatten)]
    properties: serde_json::Value,
}

impl<'de> Deserialize<'de> for Object3D {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ObjectDescription {
            object_type,
            properties,
        } = ObjectDescription::deserialize(deserializer)?;

        let object = match object_type.as_str() {
            "sphere" => serde_json::from_value(properties).map(Object3D::Sphere),
            "plane" => serde_json::from_value(properties).map(Object3D::Plane),
            "light" => serde_json::from_value(properties).map(Object3D::Light),
            _ => return Ok(Object3D::Unsupported(object_type)),
        };

        object.map_err(de::Error::custom)
    }
}

/// Occluding surface of a built scene.
#[derive(Clone, Debug)]
pub enum Primitive {
    Sphere(Sphere),
    Plane(Plane),
}

impl Primitive {
    pub fn get_color(&self) -> Vector3<f64> {
        match self {
            Primitive::Sphere(sphere) => sphere.color,
            Primitive::Plane(plane) => plane.color,
        }
    }
}

impl Transformed for Primitive {
    fn get_transform(&self) -> &Transform {
        match self {
            Primitive::Sphere(sphere) => sphere.get_transform(),
            Primitive::Plane(plane) => plane.get_transform(),
        }
    }
}

impl Intersectable for Primitive {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        match self {
            Primitive::Sphere(sphere) => sphere.intersect(ray),
            Primitive::Plane(plane) => plane.intersect(ray),
        }
    }

    fn surface_normal(&self, ray: &Ray, distance: f64) -> Unit<Vector3<f64>> {
        match self {
            Primitive::Sphere(sphere) => sphere.surface_normal(ray, distance),
            Primitive::Plane(plane) => plane.surface_normal(ray, distance),
        }
    }
}
