// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for room boundary detection

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// An integer pixel coordinate on the image grid.
///
/// Serializes as a two-element `[x, y]` array to match the annotation
/// format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_nalgebra(&self) -> Point2<f64> {
        Point2::new(self.x as f64, self.y as f64)
    }

    pub fn distance_to(&self, other: &PixelPoint) -> f64 {
        let dx = (other.x - self.x) as f64;
        let dy = (other.y - self.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(i32, i32)> for PixelPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<PixelPoint> for (i32, i32) {
    fn from(p: PixelPoint) -> Self {
        (p.x, p.y)
    }
}

/// One polygon edge connecting two consecutive vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub start: PixelPoint,
    pub end: PixelPoint,
}

impl Line {
    pub fn new(start: PixelPoint, end: PixelPoint) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

/// Axis-aligned bounding box in corner-pair form.
///
/// This is the single canonical representation used internally and at the
/// serialization boundary; origin+size forms are converted by whoever
/// needs them, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

impl BoundingBox {
    /// Bounding box of a vertex set, `None` for an empty set.
    pub fn from_points(points: &[PixelPoint]) -> Option<Self> {
        let first = points.first()?;
        let mut bbox = BoundingBox {
            x_min: first.x,
            y_min: first.y,
            x_max: first.x,
            y_max: first.y,
        };
        for p in &points[1..] {
            bbox.x_min = bbox.x_min.min(p.x);
            bbox.y_min = bbox.y_min.min(p.y);
            bbox.x_max = bbox.x_max.max(p.x);
            bbox.y_max = bbox.y_max.max(p.y);
        }
        Some(bbox)
    }

    pub fn width(&self) -> i32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> i32 {
        self.y_max - self.y_min
    }

    pub fn area(&self) -> i64 {
        self.width() as i64 * self.height() as i64
    }

    /// Elongation of the box: longer side over shorter side, with the
    /// shorter side clamped to at least one pixel.
    pub fn aspect_ratio(&self) -> f64 {
        let w = self.width() as f64;
        let h = self.height() as f64;
        w.max(h) / w.min(h).max(1.0)
    }
}

/// Shoelace area of an implicitly closed integer polygon.
pub fn polygon_area(points: &[PixelPoint]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x as f64 * points[j].y as f64;
        area -= points[j].x as f64 * points[i].y as f64;
    }

    (area / 2.0).abs()
}

/// Sum of edge lengths of an implicitly closed polygon, wrapping the last
/// vertex back to the first.
pub fn polygon_perimeter(points: &[PixelPoint]) -> f64 {
    let n = points.len();
    if n < 2 {
        return 0.0;
    }

    let mut perimeter = 0.0;
    for i in 0..n {
        perimeter += points[i].distance_to(&points[(i + 1) % n]);
    }
    perimeter
}

/// A detected room: simplified boundary polygon plus derived metrics.
///
/// Assembled in one detection call and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// 1-based rank when rooms are ordered by descending area.
    pub id: u32,
    /// Implicitly closed boundary polygon.
    pub polygon: Vec<PixelPoint>,
    /// Edge list: edge `i` connects vertex `i` to vertex `(i + 1) % n`.
    pub lines: Vec<Line>,
    pub area: f64,
    pub perimeter: f64,
    pub bounding_box: BoundingBox,
    /// Heuristic [0, 1] ranking signal; advisory, not ground truth.
    pub confidence: f32,
    /// Classification hint, `"unknown"` until labeled.
    pub room_type: String,
}
