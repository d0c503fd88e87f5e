use nalgebra::Vector3;
use num_traits::Float;

/// Quantizes a linear color to 8-bit RGB, clamping each channel to `[0, 1]` first.
pub fn to_rgb_u8(rgb: Vector3<f64>) -> [u8; 3] {
    let quantize = |c: f64| (c.clamp(0.0, 1.0) * 255.0) as u8;
    [quantize(rgb.x), quantize(rgb.y), quantize(rgb.z)]
}

pub fn remap_value<F: Float>(num: F, domain: (F, F), range: (F, F)) -> F {
    assert!(domain.0 < domain.1, "domain values must be of the form (min, max) - range values can be swapped for this behavior");

    (num - domain.0) * (range.1 - range.0) / (domain.1 - domain.0) + range.0
}

pub fn quadratic(a: f64, b: f64, c: f64) -> Option<(f64, f64)> {
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        None
    } else if discriminant == 0.0 {
        Some((-0.5 * b / a, -0.5 * b / a))
    } else {
        let q = -0.5 * (b + b.signum() * discriminant.sqrt());
        let r0 = q / a;
        let r1 = c / q;
        Some((r0.min(r1), r0.max(r1)))
    }
}
