// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the detection core

use crate::config::ConfigError;
use thiserror::Error;

/// Fatal detection failures.
///
/// Candidate rejection during filtering is not an error: an image with
/// zero qualifying candidates yields an empty room list.
#[derive(Debug, Error)]
pub enum DetectError {
    /// Zero-size input image; reported to the caller, never degraded.
    #[error("empty image: width and height must both be non-zero")]
    EmptyImage,

    /// The supplied bytes do not decode to an image.
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),

    /// The detection configuration failed its own invariants.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An external model predictor failed to produce predictions.
    #[error("prediction failed: {0}")]
    Prediction(String),
}
