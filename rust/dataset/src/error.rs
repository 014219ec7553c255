// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the dataset pipeline

use roomscan_detect::DetectError;
use std::path::PathBuf;
use thiserror::Error;

/// Dataset pipeline failures.
///
/// In batch runs these are recovered per item: one failing image is
/// recorded and the rest of the run continues.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("i/o error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image decode failed for {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write image {path}: {source}")]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Detect(#[from] DetectError),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
