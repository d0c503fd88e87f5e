mod transform;

use nalgebra::Point3;

pub use transform::*;

/// Tolerance for grazing angles and coincident points.
pub const EPSILON: f64 = 1e-10;

pub trait Transformed {
    fn get_transform(&self) -> &Transform;

    fn get_position(&self) -> Point3<f64> {
        self.get_transform().get_position()
    }
}
