// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Narrow SVG space-annotation extraction
//!
//! Floor-plan annotation SVGs mark each room as a `<g class="Space ...">`
//! group holding a `<polygon points="...">` child. This module scans for
//! exactly those attributes; it is deliberately not a general XML parser.

use crate::labels::LabeledBox;
use memchr::{memchr, memmem};

/// One extracted space annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceAnnotation {
    /// Canonical room category.
    pub category: &'static str,
    /// Class id matching the label-format table.
    pub class_id: u32,
    /// Polygon vertices in SVG coordinates.
    pub polygon: Vec<(f64, f64)>,
    /// Pixel bounding box derived from the polygon.
    pub bbox: LabeledBox,
}

/// Map a verbose space class to its canonical category and class id.
///
/// Unrecognized classes fall through to `Other`.
pub fn map_space_class(raw: &str) -> (&'static str, u32) {
    match raw {
        "Bedroom" | "DressingRoom" => ("Bedroom", 0),
        "LivingRoom" => ("LivingRoom", 1),
        "Kitchen" => ("Kitchen", 2),
        "Bath" | "Bath Shower" => ("Bathroom", 3),
        "Dining" => ("Dining", 4),
        "Entry" | "Entry Lobby" | "DraughtLobby" => ("Entry", 5),
        "Closet" | "Closet WalkIn" | "Storage" => ("Closet", 6),
        "Utility" | "Utility Laundry" | "TechnicalRoom" => ("Utility", 7),
        "Outdoor" | "Outdoor Balcony" | "Outdoor Terrace" | "Outdoor Garden" => ("Outdoor", 8),
        _ => ("Other", 9),
    }
}

/// Extract all space annotations from an SVG document.
///
/// Malformed groups (no polygon, fewer than three vertices, degenerate
/// bounding box) are skipped, never fatal.
pub fn parse_spaces(svg: &str) -> Vec<SpaceAnnotation> {
    let bytes = svg.as_bytes();
    let finder = memmem::Finder::new(b"class=\"Space");
    let mut spaces = Vec::new();

    for start in finder.find_iter(bytes) {
        let value_start = start + "class=\"".len();
        let Some(rel_end) = memchr(b'"', &bytes[value_start..]) else {
            continue;
        };
        let class_attr = &svg[value_start..value_start + rel_end];
        let Some(raw_type) = space_class(class_attr) else {
            continue;
        };

        // The group body runs to the closing tag; the first polygon in it
        // is the space boundary.
        let body_start = value_start + rel_end;
        let body_end = memmem::find(&bytes[body_start..], b"</g>")
            .map(|i| body_start + i)
            .unwrap_or(svg.len());
        let body = &svg[body_start..body_end];

        let Some(points_at) = memmem::find(body.as_bytes(), b"points=\"") else {
            continue;
        };
        let points_start = points_at + "points=\"".len();
        let Some(points_len) = memchr(b'"', &body.as_bytes()[points_start..]) else {
            continue;
        };
        let polygon = parse_points(&body[points_start..points_start + points_len]);
        if polygon.len() < 3 {
            continue;
        }

        let (category, class_id) = map_space_class(&raw_type);
        let bbox = polygon_bbox(&polygon, class_id);
        if bbox.x_max <= bbox.x_min || bbox.y_max <= bbox.y_min {
            continue;
        }

        spaces.push(SpaceAnnotation {
            category,
            class_id,
            polygon,
            bbox,
        });
    }

    spaces
}

/// Extract the room type from a class attribute such as
/// `"Space Bedroom"` or `"Space Outdoor Balcony v1-1"`.
///
/// Wall classes and bare `"Space"` yield `None`; trailing model-version
/// tokens are stripped.
fn space_class(class_attr: &str) -> Option<String> {
    if class_attr.contains("Wall") {
        return None;
    }
    let rest = class_attr.strip_prefix("Space")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let mut words: Vec<&str> = rest.split_whitespace().collect();
    while let Some(last) = words.last() {
        let mut chars = last.chars();
        if chars.next() == Some('v') && chars.next().is_some_and(|c| c.is_ascii_digit()) {
            words.pop();
        } else {
            break;
        }
    }

    if words.is_empty() {
        return None;
    }
    Some(words.join(" "))
}

/// Parse `"x,y x,y ..."` polygon points, skipping malformed pairs.
fn parse_points(points_str: &str) -> Vec<(f64, f64)> {
    points_str
        .split_whitespace()
        .filter_map(|pair| {
            let (x, y) = pair.split_once(',')?;
            Some((x.parse().ok()?, y.parse().ok()?))
        })
        .collect()
}

fn polygon_bbox(polygon: &[(f64, f64)], class_id: u32) -> LabeledBox {
    let mut bbox = LabeledBox {
        class_id,
        x_min: f64::MAX,
        y_min: f64::MAX,
        x_max: f64::MIN,
        y_max: f64::MIN,
    };
    for &(x, y) in polygon {
        bbox.x_min = bbox.x_min.min(x);
        bbox.y_min = bbox.y_min.min(y);
        bbox.x_max = bbox.x_max.max(x);
        bbox.y_max = bbox.y_max.max(y);
    }
    bbox
}
