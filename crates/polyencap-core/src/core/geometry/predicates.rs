//! Geometric predicates on `f64` points.
//!
//! Orientation, in-sphere and in-circle signs come from the adaptive exact predicates
//! of the `robust` crate, so degenerate and nearly degenerate configurations are
//! classified consistently inside the triangulation. Measures (circumradius, solid
//! angle, distances) are plain floating point.

use nalgebra::{Point3, Vector3};
use robust::{Coord, Coord3D};
use std::f64::consts::PI;

#[inline]
fn coord3d(p: &Point3<f64>) -> Coord3D<f64> {
    Coord3D {
        x: p.x,
        y: p.y,
        z: p.z,
    }
}

/// Signed volume (times six) of the tetrahedron `a, b, c, d`.
///
/// Positive when `d` lies on the side of the plane `a, b, c` that the normal
/// `(b - a) × (c - a)` points to. The sign is exact.
#[inline]
pub fn orient3d(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>, d: &Point3<f64>) -> f64 {
    -robust::orient3d(coord3d(a), coord3d(b), coord3d(c), coord3d(d))
}

#[inline]
fn det3(r0: &Vector3<f64>, r1: &Vector3<f64>, r2: &Vector3<f64>) -> f64 {
    r0.dot(&r1.cross(r2))
}

/// In-sphere test for a positively oriented tetrahedron (`orient3d(a, b, c, d) > 0`).
///
/// Returns a positive value when `e` lies strictly inside the circumsphere of
/// `a, b, c, d`, a negative value when it lies outside and zero when the five points
/// are co-spherical.
pub fn insphere(
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
    d: &Point3<f64>,
    e: &Point3<f64>,
) -> f64 {
    // `robust` expects the opposite orientation convention.
    -robust::insphere(coord3d(a), coord3d(b), coord3d(c), coord3d(d), coord3d(e))
}

/// Strict in-circle test for a point `p` lying in the plane of triangle `a, b, c`.
///
/// The test is evaluated in the coordinate plane best aligned with the triangle.
/// Degenerate triangles contain nothing.
pub fn in_circumcircle(
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
    p: &Point3<f64>,
) -> bool {
    let normal = (b - a).cross(&(c - a));
    let (u, v) = match normal.iamax() {
        0 => (1, 2),
        1 => (2, 0),
        _ => (0, 1),
    };
    let project = |q: &Point3<f64>| Coord { x: q[u], y: q[v] };

    let orientation = robust::orient2d(project(a), project(b), project(c));
    if orientation == 0.0 {
        return false;
    }
    let det = robust::incircle(project(a), project(b), project(c), project(p));
    orientation.signum() * det > 0.0
}

/// Circumradius of the tetrahedron `a, b, c, d`; infinite for flat tetrahedra.
pub fn circumradius(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>, d: &Point3<f64>) -> f64 {
    let u = b - a;
    let v = c - a;
    let w = d - a;
    let denominator = 2.0 * u.dot(&v.cross(&w));
    if denominator == 0.0 {
        return f64::INFINITY;
    }
    let offset = (v.cross(&w) * u.norm_squared()
        + w.cross(&u) * v.norm_squared()
        + u.cross(&v) * w.norm_squared())
        / denominator;
    offset.norm()
}

/// Signed solid angle subtended by triangle `a, b, c` at `p` (Van Oosterom & Strackee).
///
/// Positive when `p` lies behind the triangle, i.e. on the side opposite to the normal
/// `(b - a) × (c - a)`.
pub fn solid_angle(p: &Point3<f64>, a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> f64 {
    let ra = a - p;
    let rb = b - p;
    let rc = c - p;
    let la = ra.norm();
    let lb = rb.norm();
    let lc = rc.norm();
    let numerator = det3(&ra, &rb, &rc);
    let denominator = la * lb * lc + ra.dot(&rb) * lc + ra.dot(&rc) * lb + rb.dot(&rc) * la;
    2.0 * numerator.atan2(denominator)
}

/// Generalized winding number of a closed oriented triangle set around `p`.
pub fn winding_number<'a>(
    p: &Point3<f64>,
    triangles: impl IntoIterator<Item = [&'a Point3<f64>; 3]>,
) -> f64 {
    triangles
        .into_iter()
        .map(|[a, b, c]| solid_angle(p, a, b, c))
        .sum::<f64>()
        / (4.0 * PI)
}

/// Squared distance from `p` to the closest point of triangle `a, b, c`.
pub fn point_triangle_distance_squared(
    p: &Point3<f64>,
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
) -> f64 {
    let ab = b - a;
    let ac = c - a;
    let ap = p - a;
    let d1 = ab.dot(&ap);
    let d2 = ac.dot(&ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return ap.norm_squared();
    }

    let bp = p - b;
    let d3 = ab.dot(&bp);
    let d4 = ac.dot(&bp);
    if d3 >= 0.0 && d4 <= d3 {
        return bp.norm_squared();
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let t = d1 / (d1 - d3);
        return (p - (a + ab * t)).norm_squared();
    }

    let cp = p - c;
    let d5 = ab.dot(&cp);
    let d6 = ac.dot(&cp);
    if d6 >= 0.0 && d5 <= d6 {
        return cp.norm_squared();
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let t = d2 / (d2 - d6);
        return (p - (a + ac * t)).norm_squared();
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let t = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return (p - (b + (c - b) * t)).norm_squared();
    }

    let denominator = va + vb + vc;
    if denominator == 0.0 {
        // Collinear triangle: fall back to the closest edge.
        return [(a, b), (b, c), (c, a)]
            .iter()
            .map(|(s, e)| point_segment_distance_squared(p, s, e))
            .fold(f64::INFINITY, f64::min);
    }
    let v = vb / denominator;
    let w = vc / denominator;
    (p - (a + ab * v + ac * w)).norm_squared()
}

fn point_segment_distance_squared(p: &Point3<f64>, a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    let ab = b - a;
    let length_squared = ab.norm_squared();
    if length_squared == 0.0 {
        return (p - a).norm_squared();
    }
    let t = ((p - a).dot(&ab) / length_squared).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm_squared()
}
