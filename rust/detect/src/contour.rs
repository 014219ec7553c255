// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Contour tracing and candidate filtering

use crate::config::DetectionConfig;
use crate::types::{polygon_area, polygon_perimeter, BoundingBox, PixelPoint};
use image::GrayImage;
use imageproc::contours::find_contours;

/// A traced region boundary that survived filtering.
#[derive(Debug, Clone)]
pub struct TracedContour {
    /// Boundary points in trace order, implicitly closed.
    pub points: Vec<PixelPoint>,
    /// Shoelace area of the raw boundary.
    pub area: f64,
    /// Arc length of the closed raw boundary.
    pub perimeter: f64,
}

/// Trace connected foreground regions and keep room candidates.
///
/// Suzuki-Abe border following supplies the nesting hierarchy. Only
/// parentless (outer) contours are promoted; holes and nested regions
/// never become candidates. The area bound is inclusive on the lower end,
/// and boxes more elongated than `aspect_ratio_limit` are dropped as line
/// artifacts. Every rejection here is silent.
pub fn extract_contours(mask: &GrayImage, config: &DetectionConfig) -> Vec<TracedContour> {
    find_contours::<i32>(mask)
        .into_iter()
        .filter(|contour| contour.parent.is_none())
        .filter_map(|contour| {
            let points: Vec<PixelPoint> = contour
                .points
                .iter()
                .map(|p| PixelPoint::new(p.x, p.y))
                .collect();
            if !keep_contour(&points, config) {
                return None;
            }
            let area = polygon_area(&points);
            let perimeter = polygon_perimeter(&points);
            Some(TracedContour {
                points,
                area,
                perimeter,
            })
        })
        .collect()
}

/// Area and aspect filters applied to a raw traced boundary.
fn keep_contour(points: &[PixelPoint], config: &DetectionConfig) -> bool {
    let area = polygon_area(points);
    if area < config.min_area || area > config.max_area {
        return false;
    }
    match BoundingBox::from_points(points) {
        Some(bbox) => bbox.aspect_ratio() <= config.aspect_ratio_limit,
        None => false,
    }
}
