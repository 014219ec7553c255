// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Detection configuration and named threshold profiles

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation failure.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("min_area ({min}) must not exceed max_area ({max})")]
    AreaBounds { min: f64, max: f64 },

    #[error("min_vertices ({min}) must not exceed max_vertices ({max})")]
    VertexBounds { min: usize, max: usize },

    #[error("{field} must be positive")]
    NonPositive { field: &'static str },

    #[error("unknown profile '{0}', expected 'annotation' or 'serving'")]
    UnknownProfile(String),
}

/// Tunable thresholds for the detection pipeline.
///
/// Validated once when a detector is constructed; immutable afterwards and
/// shareable read-only across concurrent detection calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Minimum raw contour area in square pixels, inclusive.
    pub min_area: f64,
    /// Maximum raw contour area in square pixels.
    pub max_area: f64,
    /// Simplification tolerance as a fraction of the contour perimeter.
    pub epsilon_factor: f64,
    /// Minimum simplified vertex count.
    pub min_vertices: usize,
    /// Maximum simplified vertex count.
    pub max_vertices: usize,
    /// Bounding-box elongation above which a contour is discarded as a
    /// line artifact.
    pub aspect_ratio_limit: f64,
    /// Expected wall stroke thickness in pixels; sizes the blur sigma and
    /// the morphology structuring element.
    pub line_thickness: u32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_area: 1000.0,
            max_area: 1_000_000.0,
            epsilon_factor: 0.01,
            min_vertices: 4,
            max_vertices: 32,
            aspect_ratio_limit: 10.0,
            line_thickness: 3,
        }
    }
}

impl DetectionConfig {
    /// Check the configuration invariants.
    ///
    /// Invalid combinations fail here, at construction time, never deep
    /// inside a detection call.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_area <= 0.0 {
            return Err(ConfigError::NonPositive { field: "min_area" });
        }
        if self.max_area <= 0.0 {
            return Err(ConfigError::NonPositive { field: "max_area" });
        }
        if self.epsilon_factor <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "epsilon_factor",
            });
        }
        if self.aspect_ratio_limit <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "aspect_ratio_limit",
            });
        }
        if self.min_vertices == 0 {
            return Err(ConfigError::NonPositive {
                field: "min_vertices",
            });
        }
        if self.max_vertices == 0 {
            return Err(ConfigError::NonPositive {
                field: "max_vertices",
            });
        }
        if self.line_thickness == 0 {
            return Err(ConfigError::NonPositive {
                field: "line_thickness",
            });
        }
        if self.min_area > self.max_area {
            return Err(ConfigError::AreaBounds {
                min: self.min_area,
                max: self.max_area,
            });
        }
        if self.min_vertices > self.max_vertices {
            return Err(ConfigError::VertexBounds {
                min: self.min_vertices,
                max: self.max_vertices,
            });
        }
        Ok(())
    }
}

/// Named threshold profiles.
///
/// One pipeline, two documented tunings: the annotation profile favors
/// recall for semi-automated labeling, the serving profile trades recall
/// for cleaner polygons on live requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigProfile {
    Annotation,
    Serving,
}

impl ConfigProfile {
    pub fn config(self) -> DetectionConfig {
        match self {
            ConfigProfile::Annotation => DetectionConfig::default(),
            ConfigProfile::Serving => DetectionConfig {
                min_area: 2000.0,
                epsilon_factor: 0.02,
                ..DetectionConfig::default()
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ConfigProfile::Annotation => "annotation",
            ConfigProfile::Serving => "serving",
        }
    }
}

impl std::str::FromStr for ConfigProfile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "annotation" => Ok(ConfigProfile::Annotation),
            "serving" => Ok(ConfigProfile::Serving),
            other => Err(ConfigError::UnknownProfile(other.to_string())),
        }
    }
}
