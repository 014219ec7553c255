// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Douglas-Peucker simplification of closed boundaries

use crate::config::DetectionConfig;
use crate::types::{polygon_area, PixelPoint};

/// Simplify a closed contour with tolerance proportional to its perimeter
/// (`epsilon = epsilon_factor * perimeter`).
///
/// Returns `None` when the simplified vertex count falls outside the
/// configured bounds or the polygon degenerates to zero area. Rejection
/// enforces room-like complexity: line fragments and noise dots simplify
/// to too few vertices, jagged noise to too many, and neither consumes a
/// scoring pass.
pub fn simplify_contour(
    points: &[PixelPoint],
    perimeter: f64,
    config: &DetectionConfig,
) -> Option<Vec<PixelPoint>> {
    if points.len() < 3 {
        return None;
    }

    let epsilon = config.epsilon_factor * perimeter;

    // Close the ring explicitly so the wrap-around edge participates in
    // the split, then drop the duplicated endpoint again.
    let mut ring = points.to_vec();
    ring.push(points[0]);
    let mut simplified = douglas_peucker(&ring, epsilon);
    simplified.pop();

    dedup_consecutive(&mut simplified);

    if simplified.len() < config.min_vertices || simplified.len() > config.max_vertices {
        return None;
    }
    if polygon_area(&simplified) <= 0.0 {
        return None;
    }

    Some(simplified)
}

/// Douglas-Peucker polyline simplification.
///
/// Keeps both endpoints; recursively splits at the point of maximum
/// perpendicular deviation while that deviation exceeds epsilon.
fn douglas_peucker(points: &[PixelPoint], epsilon: f64) -> Vec<PixelPoint> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let first = points[0];
    let last = points[points.len() - 1];

    let mut max_dist = 0.0;
    let mut max_idx = 0;

    for (i, point) in points.iter().enumerate().skip(1).take(points.len() - 2) {
        let dist = perpendicular_distance(point, &first, &last);
        if dist > max_dist {
            max_dist = dist;
            max_idx = i;
        }
    }

    if max_dist > epsilon {
        let left = douglas_peucker(&points[..=max_idx], epsilon);
        let right = douglas_peucker(&points[max_idx..], epsilon);

        // Combine, excluding the duplicated split point
        let mut result = left;
        result.extend_from_slice(&right[1..]);
        result
    } else {
        vec![first, last]
    }
}

/// Perpendicular distance from a point to the line through start and end.
///
/// Falls back to point distance when the segment is degenerate, which
/// also handles the closed-ring case where start equals end.
fn perpendicular_distance(point: &PixelPoint, start: &PixelPoint, end: &PixelPoint) -> f64 {
    let p = point.to_nalgebra();
    let a = start.to_nalgebra();
    let b = end.to_nalgebra();

    let ab = b - a;
    let length_sq = ab.norm_squared();
    if length_sq < 1e-10 {
        return (p - a).norm();
    }

    (p - a).perp(&ab).abs() / length_sq.sqrt()
}

/// Remove consecutive duplicate vertices, including the wrap-around pair.
fn dedup_consecutive(points: &mut Vec<PixelPoint>) {
    points.dedup();
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
}
