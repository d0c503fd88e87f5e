use nalgebra::{Affine3, Matrix4, Point3, Translation3, Unit, UnitQuaternion, Vector3};
use serde::Deserialize;
use std::default::Default;

/// Builds an orientation from Euler angles in degrees, applied as X then Y then Z.
pub fn euler_rotation(degrees: &Vector3<f64>) -> UnitQuaternion<f64> {
    let x = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), degrees.x.to_radians());
    let y = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), degrees.y.to_radians());
    let z = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), degrees.z.to_radians());

    x * y * z
}

fn compose(
    position: &Point3<f64>,
    rotation: &UnitQuaternion<f64>,
    scale: &Vector3<f64>,
) -> Affine3<f64> {
    Affine3::from_matrix_unchecked(
        Translation3::from(position.coords).to_homogeneous()
            * rotation.to_homogeneous()
            * Matrix4::new_nonuniform_scaling(scale),
    )
}

/// Placement of an object in world space. The matrix is `T * R * S`.
#[derive(Copy, Clone, Debug, Deserialize)]
#[serde(from = "TransformDescription")]
pub struct Transform {
    position: Point3<f64>,
    rotation: UnitQuaternion<f64>,
    scale: Vector3<f64>,
    matrix: Affine3<f64>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(
            Point3::origin(),
            UnitQuaternion::identity(),
            Vector3::repeat(1.0),
        )
    }
}

impl Transform {
    pub fn new(position: Point3<f64>, rotation: UnitQuaternion<f64>, scale: Vector3<f64>) -> Self {
        Self {
            position,
            rotation,
            scale,
            matrix: compose(&position, &rotation, &scale),
        }
    }

    pub fn get_position(&self) -> Point3<f64> {
        self.position
    }

    pub fn get_rotation(&self) -> UnitQuaternion<f64> {
        self.rotation
    }

    pub fn get_scale(&self) -> Vector3<f64> {
        self.scale
    }

    pub fn matrix(&self) -> Affine3<f64> {
        self.matrix
    }

    /// Translation and rotation only, for frames that must not be scaled.
    pub fn rigid_matrix(&self) -> Affine3<f64> {
        compose(&self.position, &self.rotation, &Vector3::repeat(1.0))
    }

    fn update_matrix(&mut self) -> &mut Self {
        self.matrix = compose(&self.position, &self.rotation, &self.scale);
        self
    }

    pub fn translate(&mut self, translation: Vector3<f64>) -> &mut Self {
        self.position += translation;
        self.update_matrix()
    }

    /// Rotates about the object's own origin. `angle` is in degrees.
    pub fn rotate(&mut self, axis: Unit<Vector3<f64>>, angle: f64) -> &mut Self {
        self.rotation = UnitQuaternion::from_axis_angle(&axis, angle.to_radians()) * self.rotation;
        self.update_matrix()
    }

    pub fn scale(&mut self, scale: Vector3<f64>) -> &mut Self {
        self.scale.component_mul_assign(&scale);
        self.update_matrix()
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct TransformDescription {
    position: Point3<f64>,
    rotation: Vector3<f64>,
    scale: Vector3<f64>,
}

impl Default for TransformDescription {
    fn default() -> Self {
        Self {
            position: Point3::origin(),
            rotation: Vector3::zeros(),
            scale: Vector3::repeat(1.0),
        }
    }
}

impl From<TransformDescription> for Transform {
    fn from(description: TransformDescription) -> Self {
        Transform::new(
            description.position,
            euler_rotation(&description.rotation),
            description.scale,
        )
    }
}
