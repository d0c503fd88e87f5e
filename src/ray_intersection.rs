use crate::primitives::Primitive;
use nalgebra::{Point3, Unit, Vector3};

pub trait Intersectable {
    /// Distance along the ray to the visible surface, if any.
    fn intersect(&self, ray: &Ray) -> Option<f64>;

    fn surface_normal(&self, ray: &Ray, distance: f64) -> Unit<Vector3<f64>>;
}

#[derive(Debug)]
pub struct Ray {
    pub origin: Point3<f64>,
    pub direction: Vector3<f64>,
}

impl Ray {
    pub fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, distance: f64) -> Point3<f64> {
        self.origin + self.direction * distance
    }
}

#[derive(Debug)]
pub struct SurfaceHit {
    pub hit_point: Point3<f64>,
    pub normal: Unit<Vector3<f64>>,
}

#[derive(Debug)]
pub struct Intersection<'a> {
    pub object: &'a Primitive,
    pub distance: f64,
}

impl<'a> Intersection<'a> {
    pub fn new(object: &'a Primitive, distance: f64) -> Self {
        Self { object, distance }
    }

    pub fn surface(&self, ray: &Ray) -> SurfaceHit {
        SurfaceHit {
            hit_point: ray.at(self.distance),
            normal: self.object.surface_normal(ray, self.distance),
        }
    }
}
