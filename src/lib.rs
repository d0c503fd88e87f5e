#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::too_many_lines,
    clippy::wildcard_imports
)]

mod core;
mod lights;
mod primitives;
mod ray_intersection;
mod render;
mod utils;

pub use crate::core::{euler_rotation, Transform, Transformed};
pub use crate::lights::{AmbientLight, PointLight};
pub use crate::primitives::{Object3D, Plane, Primitive, Sphere};
pub use crate::ray_intersection::{Intersectable, Intersection, Ray, SurfaceHit};
pub use crate::render::{
    buffer_offset, generate_tiles, Camera, RaytracingCamera, RaytracingScene, RenderOptions,
    RenderTile, Scene, SceneError,
};
pub use crate::utils::to_rgb_u8;
