// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cosmetic room overlay rendering

use crate::types::Room;
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

/// Fixed per-index palette cycled across rooms.
const PALETTE: [Rgb<u8>; 6] = [
    Rgb([0, 200, 0]),
    Rgb([0, 100, 255]),
    Rgb([255, 0, 0]),
    Rgb([255, 160, 0]),
    Rgb([180, 0, 255]),
    Rgb([0, 200, 200]),
];

/// Draw each room's polygon edges and bounding box over the source image.
///
/// Purely cosmetic: consumed by the CLI `--visualize` flag and the
/// annotation generator's visualization output, never by the detection
/// contract.
pub fn render_overlay(image: &DynamicImage, rooms: &[Room]) -> RgbImage {
    let mut canvas = image.to_rgb8();

    for (idx, room) in rooms.iter().enumerate() {
        let color = PALETTE[idx % PALETTE.len()];

        for line in &room.lines {
            draw_line_segment_mut(
                &mut canvas,
                (line.start.x as f32, line.start.y as f32),
                (line.end.x as f32, line.end.y as f32),
                color,
            );
        }

        let bbox = &room.bounding_box;
        if bbox.width() > 0 && bbox.height() > 0 {
            draw_hollow_rect_mut(
                &mut canvas,
                Rect::at(bbox.x_min, bbox.y_min)
                    .of_size(bbox.width() as u32, bbox.height() as u32),
                color,
            );
        }
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::{finalize, RoomCandidate};
    use crate::types::PixelPoint;

    #[test]
    fn test_overlay_marks_room_edges() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(100, 100, Rgb([255, 255, 255])));
        let rooms = finalize(vec![RoomCandidate {
            polygon: vec![
                PixelPoint::new(20, 20),
                PixelPoint::new(80, 20),
                PixelPoint::new(80, 80),
                PixelPoint::new(20, 80),
            ],
            area: 3600.0,
            confidence: 0.9,
            room_type: "unknown".into(),
        }]);

        let overlay = render_overlay(&image, &rooms);

        assert_eq!(overlay.dimensions(), (100, 100));
        // A point on the top edge takes the first palette color; the
        // interior stays untouched.
        assert_eq!(*overlay.get_pixel(50, 20), PALETTE[0]);
        assert_eq!(*overlay.get_pixel(50, 50), Rgb([255, 255, 255]));
    }
}
