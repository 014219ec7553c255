// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heuristic confidence scoring for room candidates
//!
//! Four independent shape signals, each normalized to [0, 1], combined
//! with fixed weights and clamped. The score ranks candidates for review;
//! it is never an authoritative room/non-room classification.

use crate::types::{polygon_area, BoundingBox, PixelPoint};

// Signal weights, fixed for the build.
const WEIGHT_RECTANGULARITY: f64 = 0.30;
const WEIGHT_VERTEX: f64 = 0.25;
const WEIGHT_SIZE: f64 = 0.25;
const WEIGHT_ASPECT: f64 = 0.20;

// Fraction-of-image band rewarded with full size credit.
const SIZE_BAND_LOW: f64 = 0.01;
const SIZE_BAND_HIGH: f64 = 0.25;

// Full aspect credit up to this elongation, decaying to zero at the
// second bound.
const ASPECT_FULL: f64 = 3.0;
const ASPECT_ZERO: f64 = 10.0;

/// Score a candidate polygon against its bounding box and the total image
/// area. A degenerate bounding box scores zero.
pub fn score(polygon: &[PixelPoint], bounding_box: &BoundingBox, image_area: f64) -> f32 {
    let bbox_area = bounding_box.area() as f64;
    if bbox_area <= 0.0 || image_area <= 0.0 {
        return 0.0;
    }

    let area = polygon_area(polygon);
    let rectangularity = (area / bbox_area).clamp(0.0, 1.0);
    let vertex = vertex_score(polygon.len());
    let size = size_score(area / image_area);
    let aspect = aspect_score(bounding_box.aspect_ratio());

    let combined = WEIGHT_RECTANGULARITY * rectangularity
        + WEIGHT_VERTEX * vertex
        + WEIGHT_SIZE * size
        + WEIGHT_ASPECT * aspect;

    combined.clamp(0.0, 1.0) as f32
}

/// Full credit at the ideal four corners, -0.1 per vertex out to eight,
/// -0.05 per vertex past that. Monotonic away from the ideal.
fn vertex_score(vertex_count: usize) -> f64 {
    let n = vertex_count as f64;
    let penalty = if n <= 8.0 {
        0.1 * (n - 4.0).abs()
    } else {
        0.4 + 0.05 * (n - 8.0)
    };
    (1.0 - penalty).max(0.0)
}

/// Full credit for candidates covering 1%-25% of the image, linear ramp
/// below the band, linear decay above it.
fn size_score(fraction: f64) -> f64 {
    if fraction < SIZE_BAND_LOW {
        (fraction / SIZE_BAND_LOW).max(0.0)
    } else if fraction <= SIZE_BAND_HIGH {
        1.0
    } else {
        (1.0 - (fraction - SIZE_BAND_HIGH) / (1.0 - SIZE_BAND_HIGH)).max(0.0)
    }
}

/// Full credit for boxes up to 3:1, decaying linearly to zero at 10:1.
fn aspect_score(ratio: f64) -> f64 {
    if ratio <= ASPECT_FULL {
        1.0
    } else {
        (1.0 - (ratio - ASPECT_FULL) / (ASPECT_ZERO - ASPECT_FULL)).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(side: i32) -> Vec<PixelPoint> {
        vec![
            PixelPoint::new(0, 0),
            PixelPoint::new(side, 0),
            PixelPoint::new(side, side),
            PixelPoint::new(0, side),
        ]
    }

    #[test]
    fn test_ideal_square_scores_one() {
        // A four-corner square filling its box, occupying 1% of the image.
        let polygon = square(100);
        let bbox = BoundingBox::from_points(&polygon).unwrap();
        let s = score(&polygon, &bbox, 1_000_000.0);
        assert_relative_eq!(s, 1.0f32, epsilon = 1e-6);
    }

    #[test]
    fn test_degenerate_bbox_scores_zero() {
        let polygon = vec![
            PixelPoint::new(0, 0),
            PixelPoint::new(10, 0),
            PixelPoint::new(20, 0),
        ];
        let bbox = BoundingBox::from_points(&polygon).unwrap();
        assert_eq!(score(&polygon, &bbox, 10_000.0), 0.0);
    }

    #[test]
    fn test_score_stays_in_unit_interval() {
        let polygon = square(400);
        let bbox = BoundingBox::from_points(&polygon).unwrap();
        for image_area in [1_000.0, 200_000.0, 10_000_000.0] {
            let s = score(&polygon, &bbox, image_area);
            assert!((0.0..=1.0).contains(&s));
        }
    }

    #[test]
    fn test_vertex_score_falls_off_from_four() {
        assert_relative_eq!(vertex_score(4), 1.0);
        assert_relative_eq!(vertex_score(3), 0.9);
        assert_relative_eq!(vertex_score(6), 0.8);
        assert_relative_eq!(vertex_score(8), 0.6);
        assert_relative_eq!(vertex_score(10), 0.5);
        // Monotonic away from the ideal, floored at zero.
        assert!(vertex_score(12) < vertex_score(10));
        assert_eq!(vertex_score(40), 0.0);
    }

    #[test]
    fn test_size_score_band() {
        assert_relative_eq!(size_score(0.005), 0.5);
        assert_relative_eq!(size_score(0.01), 1.0);
        assert_relative_eq!(size_score(0.2), 1.0);
        assert!(size_score(0.5) < 1.0);
        assert_relative_eq!(size_score(1.0), 0.0);
    }

    #[test]
    fn test_aspect_score_decay() {
        assert_relative_eq!(aspect_score(1.0), 1.0);
        assert_relative_eq!(aspect_score(3.0), 1.0);
        assert!(aspect_score(5.0) < 1.0);
        assert_relative_eq!(aspect_score(10.0), 0.0);
    }
}
