// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bounding-box label conversion to normalized center format

use crate::error::DatasetError;
use std::fs;
use std::path::Path;

/// One labeled box in pixel coordinates, corner-pair form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabeledBox {
    pub class_id: u32,
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

/// Render one `<class_id> <cx> <cy> <w> <h>` label line.
///
/// All four coordinates are normalized to [0, 1] against the image
/// dimensions and clamped, six decimal places each.
pub fn to_center_format(label: &LabeledBox, img_width: u32, img_height: u32) -> String {
    let w = img_width as f64;
    let h = img_height as f64;

    let x_center = ((label.x_min + label.x_max) / 2.0 / w).clamp(0.0, 1.0);
    let y_center = ((label.y_min + label.y_max) / 2.0 / h).clamp(0.0, 1.0);
    let box_width = ((label.x_max - label.x_min) / w).clamp(0.0, 1.0);
    let box_height = ((label.y_max - label.y_min) / h).clamp(0.0, 1.0);

    format!(
        "{} {:.6} {:.6} {:.6} {:.6}",
        label.class_id, x_center, y_center, box_width, box_height
    )
}

/// Write one image's label file, one line per box.
pub fn write_label_file(
    path: &Path,
    boxes: &[LabeledBox],
    img_width: u32,
    img_height: u32,
) -> Result<(), DatasetError> {
    let lines: Vec<String> = boxes
        .iter()
        .map(|b| to_center_format(b, img_width, img_height))
        .collect();
    fs::write(path, lines.join("\n")).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_format_normalization() {
        let label = LabeledBox {
            class_id: 2,
            x_min: 100.0,
            y_min: 100.0,
            x_max: 300.0,
            y_max: 200.0,
        };
        let line = to_center_format(&label, 1000, 500);
        assert_eq!(line, "2 0.200000 0.300000 0.200000 0.200000");
    }

    #[test]
    fn test_out_of_bounds_boxes_clamp() {
        let label = LabeledBox {
            class_id: 0,
            x_min: -50.0,
            y_min: 0.0,
            x_max: 1500.0,
            y_max: 400.0,
        };
        let line = to_center_format(&label, 1000, 400);
        for field in line.split_whitespace().skip(1) {
            let value: f64 = field.parse().unwrap();
            assert!((0.0..=1.0).contains(&value), "field {} out of range", field);
        }
    }

    #[test]
    fn test_write_label_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.txt");
        let boxes = vec![
            LabeledBox {
                class_id: 1,
                x_min: 0.0,
                y_min: 0.0,
                x_max: 100.0,
                y_max: 100.0,
            },
            LabeledBox {
                class_id: 3,
                x_min: 100.0,
                y_min: 100.0,
                x_max: 200.0,
                y_max: 200.0,
            },
        ];

        write_label_file(&path, &boxes, 200, 200).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("1 "));
        assert!(lines[1].starts_with("3 "));
    }
}
