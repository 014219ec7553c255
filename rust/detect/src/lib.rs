// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room boundary detection from raster floor plan images
//!
//! This crate turns a decoded floor plan raster into an ordered list of
//! room records. The pipeline:
//!
//! 1. Preprocessing (polarity rule, blur, Otsu threshold, morphology)
//! 2. Contour tracing with hierarchy, plus area/aspect/outer-only filters
//! 3. Douglas-Peucker polygon simplification with vertex-count gates
//! 4. Multi-signal heuristic confidence scoring
//! 5. Room assembly (perimeter, bounding box, edge list, ordering, ids)
//!
//! Strategies live behind the [`RoomDetector`] trait: the heuristic
//! pipeline above, and a learned-model adapter that maps external box
//! predictions into the same room shape.
//!
//! # Usage
//!
//! ```rust,ignore
//! use roomscan_detect::{ConfigProfile, HeuristicDetector, RoomDetector};
//!
//! let detector = HeuristicDetector::new(ConfigProfile::Annotation.config())?;
//! let rooms = detector.detect(&image)?;
//! for room in &rooms {
//!     println!("room {}: area={:.0}", room.id, room.area);
//! }
//! ```

pub mod assemble;
pub mod config;
pub mod confidence;
pub mod contour;
pub mod detector;
pub mod error;
pub mod image_ops;
pub mod overlay;
pub mod preprocess;
pub mod simplify;
pub mod types;

// Re-export commonly used types and functions
pub use assemble::{finalize, polygon_lines, RoomCandidate};
pub use config::{ConfigError, ConfigProfile, DetectionConfig};
pub use confidence::score;
pub use contour::{extract_contours, TracedContour};
pub use detector::{
    BoxPredictor, HeuristicDetector, ModelDetector, PredictedBox, RoomDetector, UNKNOWN_ROOM_TYPE,
};
pub use error::DetectError;
pub use overlay::render_overlay;
pub use preprocess::preprocess;
pub use simplify::simplify_contour;
pub use types::{polygon_area, polygon_perimeter, BoundingBox, Line, PixelPoint, Room};

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};

    fn blank_canvas(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb([255, 255, 255]))
    }

    /// Rectangle outline with the given stroke thickness, drawn inward
    /// from the (x0, y0)-(x1, y1) corners.
    fn draw_rect_outline(img: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, thickness: u32) {
        let black = Rgb([0, 0, 0]);
        for t in 0..thickness {
            for x in x0..=x1 {
                img.put_pixel(x, y0 + t, black);
                img.put_pixel(x, y1 - t, black);
            }
            for y in y0..=y1 {
                img.put_pixel(x0 + t, y, black);
                img.put_pixel(x1 - t, y, black);
            }
        }
    }

    fn draw_filled_circle(img: &mut RgbImage, cx: i32, cy: i32, radius: i32) {
        let black = Rgb([0, 0, 0]);
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    let x = cx + dx;
                    let y = cy + dy;
                    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
                        img.put_pixel(x as u32, y as u32, black);
                    }
                }
            }
        }
    }

    /// 500x500 white page with one black-outlined rectangle.
    fn single_room_blueprint() -> DynamicImage {
        let mut img = blank_canvas(500, 500);
        draw_rect_outline(&mut img, 100, 100, 400, 400, 3);
        DynamicImage::ImageRgb8(img)
    }

    /// 800x600 page with three well-separated rectangles.
    fn three_room_blueprint() -> DynamicImage {
        let mut img = blank_canvas(800, 600);
        draw_rect_outline(&mut img, 50, 50, 300, 250, 3);
        draw_rect_outline(&mut img, 350, 50, 750, 250, 3);
        draw_rect_outline(&mut img, 50, 300, 750, 550, 3);
        DynamicImage::ImageRgb8(img)
    }

    fn default_detector() -> HeuristicDetector {
        HeuristicDetector::new(DetectionConfig::default()).unwrap()
    }

    #[test]
    fn test_blank_image_yields_empty_room_list() {
        let image = DynamicImage::ImageRgb8(blank_canvas(300, 300));
        let rooms = default_detector().detect(&image).unwrap();
        assert!(rooms.is_empty());
    }

    #[test]
    fn test_zero_size_image_is_an_error() {
        let image = DynamicImage::new_rgb8(0, 0);
        assert!(matches!(
            default_detector().detect(&image),
            Err(DetectError::EmptyImage)
        ));
    }

    #[test]
    fn test_single_rectangle_detected() {
        let rooms = default_detector()
            .detect(&single_room_blueprint())
            .unwrap();

        assert_eq!(rooms.len(), 1);
        let room = &rooms[0];
        assert_eq!(room.id, 1);
        assert_eq!(room.room_type, "unknown");
        assert!(room.confidence > 0.5);

        let bbox = room.bounding_box;
        assert!((bbox.x_min - 100).abs() <= 6, "x_min={}", bbox.x_min);
        assert!((bbox.y_min - 100).abs() <= 6, "y_min={}", bbox.y_min);
        assert!((bbox.x_max - 400).abs() <= 6, "x_max={}", bbox.x_max);
        assert!((bbox.y_max - 400).abs() <= 6, "y_max={}", bbox.y_max);
    }

    #[test]
    fn test_three_rooms_sorted_by_descending_area() {
        let rooms = default_detector().detect(&three_room_blueprint()).unwrap();

        assert_eq!(rooms.len(), 3);
        let ids: Vec<u32> = rooms.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        for pair in rooms.windows(2) {
            assert!(pair[0].area >= pair[1].area);
        }
        // The bottom rectangle is the largest.
        assert!(rooms[0].bounding_box.y_min > 250);
    }

    #[test]
    fn test_room_invariants_hold() {
        let config = DetectionConfig::default();
        let rooms = default_detector().detect(&three_room_blueprint()).unwrap();
        assert!(!rooms.is_empty());

        for room in &rooms {
            assert!(room.area > 0.0);
            assert!(room.perimeter > 0.0);
            assert!((0.0..=1.0).contains(&room.confidence));
            assert!(room.polygon.len() >= config.min_vertices);
            assert!(room.polygon.len() <= config.max_vertices);

            // Edge-list round-trip law.
            assert_eq!(room.lines.len(), room.polygon.len());
            let n = room.lines.len();
            for i in 0..n {
                assert_eq!(room.lines[i].end, room.lines[(i + 1) % n].start);
            }
            let edge_sum: f64 = room.lines.iter().map(|l| l.length()).sum();
            assert!((edge_sum - room.perimeter).abs() < 1e-6);
        }
    }

    #[test]
    fn test_small_artifact_filtered_by_min_area() {
        let mut img = blank_canvas(500, 500);
        draw_rect_outline(&mut img, 100, 100, 400, 400, 3);
        draw_filled_circle(&mut img, 450, 60, 5);
        let image = DynamicImage::ImageRgb8(img);

        let detector = HeuristicDetector::new(DetectionConfig {
            min_area: 2000.0,
            ..DetectionConfig::default()
        })
        .unwrap();
        let rooms = detector.detect(&image).unwrap();

        assert_eq!(rooms.len(), 1);
        let bbox = rooms[0].bounding_box;
        assert!((bbox.x_min - 100).abs() <= 6);
        assert!((bbox.y_max - 400).abs() <= 6);
    }

    #[test]
    fn test_grayscale_input_matches_color_input() {
        let color = single_room_blueprint();
        let gray = DynamicImage::ImageLuma8(color.to_luma8());

        let detector = default_detector();
        let from_color = detector.detect(&color).unwrap();
        let from_gray = detector.detect(&gray).unwrap();

        assert_eq!(from_color.len(), from_gray.len());
        assert_eq!(from_color[0].bounding_box, from_gray[0].bounding_box);
    }
}
