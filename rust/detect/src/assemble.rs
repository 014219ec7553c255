// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room record assembly: derived metrics, ordering, and ids

use crate::types::{polygon_perimeter, BoundingBox, Line, PixelPoint, Room};

/// A scored polygon awaiting final assembly.
#[derive(Debug, Clone)]
pub struct RoomCandidate {
    pub polygon: Vec<PixelPoint>,
    pub area: f64,
    pub confidence: f32,
    pub room_type: String,
}

/// Ordered edge list for an implicitly closed polygon.
///
/// Edge `i` connects vertex `i` to vertex `(i + 1) % n`, so the edge
/// count equals the vertex count and the chain closes on itself.
pub fn polygon_lines(polygon: &[PixelPoint]) -> Vec<Line> {
    let n = polygon.len();
    (0..n)
        .map(|i| Line::new(polygon[i], polygon[(i + 1) % n]))
        .collect()
}

/// Assemble the final room list from surviving candidates.
///
/// Rooms are sorted by descending area with a stable sort, so ties keep
/// their discovery order, and `id` is the 1-based rank in that order.
pub fn finalize(mut candidates: Vec<RoomCandidate>) -> Vec<Room> {
    candidates.sort_by(|a, b| {
        b.area
            .partial_cmp(&a.area)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut rooms = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let Some(bounding_box) = BoundingBox::from_points(&candidate.polygon) else {
            continue;
        };
        rooms.push(Room {
            id: rooms.len() as u32 + 1,
            lines: polygon_lines(&candidate.polygon),
            area: candidate.area,
            perimeter: polygon_perimeter(&candidate.polygon),
            bounding_box,
            confidence: candidate.confidence,
            room_type: candidate.room_type,
            polygon: candidate.polygon,
        });
    }
    rooms
}
