mod ambient;
mod point;

pub use ambient::AmbientLight;
pub use point::PointLight;
