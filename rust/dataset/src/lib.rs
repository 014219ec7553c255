// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Training-annotation pipeline for room detection datasets
//!
//! Glue around the detection core for building labeled datasets:
//!
//! - Batch annotation generation over an image directory (per-image JSON,
//!   overlay visualizations, aggregate dataset file and statistics)
//! - SVG space-annotation extraction (SVG groups -> bounding boxes)
//! - Bounding-box -> normalized center-format label conversion

pub mod annotations;
pub mod error;
pub mod labels;
pub mod svg;

pub use annotations::{
    AnnotationGenerator, AnnotationMetadata, BatchReport, BatchStats, ImageAnnotation, ImageShape,
    ItemFailure, ROOM_CATEGORIES,
};
pub use error::DatasetError;
pub use labels::{to_center_format, write_label_file, LabeledBox};
pub use svg::{map_space_class, parse_spaces, SpaceAnnotation};
