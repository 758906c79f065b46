use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;

/// Spacing between consecutive protein beads, in nanometres.
pub const PROTEIN_SPIRAL_SPACING: f64 = 0.381;
/// Spacing between consecutive RNA beads, in nanometres.
pub const RNA_SPIRAL_SPACING: f64 = 0.50;

/// Lays `count` beads out on a flattened spiral and centres them on the origin.
///
/// Bead `i` sits at angle `2π·√(i/N)`, radius `spacing·√i`, and a height that
/// rises linearly from `-N·spacing/2` to `N·spacing/2`.
pub fn spiral_coordinates(count: usize, spacing: f64) -> Vec<Point3<f64>> {
    if count == 0 {
        return Vec::new();
    }
    let n = count as f64;
    let z_start = -n * spacing / 2.0;
    let z_step = if count > 1 { n * spacing / (n - 1.0) } else { 0.0 };

    let points: Vec<Point3<f64>> = (0..count)
        .map(|i| {
            let fi = i as f64;
            let theta = (fi / n).sqrt() * 2.0 * PI;
            let r = spacing * fi.sqrt();
            Point3::new(r * theta.cos(), r * theta.sin(), z_start + z_step * fi)
        })
        .collect();

    recenter(points)
}

/// Translates points so that their arithmetic mean is the origin.
pub fn recenter(points: Vec<Point3<f64>>) -> Vec<Point3<f64>> {
    if points.is_empty() {
        return points;
    }
    let sum: Vector3<f64> = points.iter().map(|p| p.coords).sum();
    let mean = sum / points.len() as f64;
    points.into_iter().map(|p| p - mean).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn mean(points: &[Point3<f64>]) -> Vector3<f64> {
        points.iter().map(|p| p.coords).sum::<Vector3<f64>>() / points.len() as f64
    }

    #[test]
    fn spiral_is_centred_for_various_sizes() {
        for &count in &[1usize, 2, 3, 10, 57, 400] {
            for &spacing in &[0.381, 0.5, 2.0] {
                let points = spiral_coordinates(count, spacing);
                assert_eq!(points.len(), count);
                assert!(
                    mean(&points).norm() < TOLERANCE,
                    "mean not zero for N={count}, spacing={spacing}"
                );
            }
        }
    }

    #[test]
    fn spiral_height_spans_chain_length() {
        let count = 10;
        let spacing = 0.381;
        let points = spiral_coordinates(count, spacing);
        let z_span = points.last().unwrap().z - points.first().unwrap().z;
        assert!((z_span - count as f64 * spacing).abs() < TOLERANCE);
    }

    #[test]
    fn spiral_is_deterministic() {
        assert_eq!(spiral_coordinates(25, 0.5), spiral_coordinates(25, 0.5));
    }

    #[test]
    fn single_bead_sits_at_the_origin() {
        let points = spiral_coordinates(1, 0.381);
        assert!(points[0].coords.norm() < TOLERANCE);
    }

    #[test]
    fn empty_chain_yields_no_points() {
        assert!(spiral_coordinates(0, 0.381).is_empty());
    }
}
