//! Joint angle geometry over normalized pose coordinates.
//!
//! All functions are pure and total: degenerate inputs (coincident points)
//! yield 0.0 rather than NaN.

use formcheck_models::Point3D;

const EPSILON: f64 = 1e-9;

/// Angle in degrees at `vertex` between the rays to `a` and `b`.
///
/// Uses cos(θ) = (v1 · v2) / (|v1| × |v2|) with the cosine clamped to
/// [-1, 1]. Returns 0.0 when either ray has zero length.
pub fn angle_at(a: Point3D, vertex: Point3D, b: Point3D) -> f64 {
    let v1 = (a.x - vertex.x, a.y - vertex.y, a.z - vertex.z);
    let v2 = (b.x - vertex.x, b.y - vertex.y, b.z - vertex.z);

    let dot = v1.0 * v2.0 + v1.1 * v2.1 + v1.2 * v2.2;
    let mag1 = (v1.0 * v1.0 + v1.1 * v1.1 + v1.2 * v1.2).sqrt();
    let mag2 = (v2.0 * v2.0 + v2.1 * v2.1 + v2.2 * v2.2).sqrt();

    if mag1 < EPSILON || mag2 < EPSILON {
        return 0.0;
    }

    let cos_angle = (dot / (mag1 * mag2)).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}

/// Deviation in degrees of the `upper`→`lower` line from vertical.
///
/// Only the image plane is considered. Always in [0, 90]: 0 for a vertical
/// line, 90 for a horizontal one, regardless of direction.
pub fn angle_from_vertical(upper: Point3D, lower: Point3D) -> f64 {
    let dx = (lower.x - upper.x).abs();
    let dy = (lower.y - upper.y).abs();

    if dx < EPSILON && dy < EPSILON {
        return 0.0;
    }

    90.0 - dy.atan2(dx).to_degrees()
}

/// Height of a point with the image y-axis flipped (1.0 = top of frame).
pub fn height(point: Point3D) -> f64 {
    1.0 - point.y
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
