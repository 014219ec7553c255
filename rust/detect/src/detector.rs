// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Detection strategies behind one capability contract

use crate::assemble::{finalize, RoomCandidate};
use crate::config::{ConfigError, DetectionConfig};
use crate::confidence::score;
use crate::contour::extract_contours;
use crate::error::DetectError;
use crate::preprocess::preprocess;
use crate::simplify::simplify_contour;
use crate::types::{polygon_area, BoundingBox, PixelPoint, Room};
use image::DynamicImage;

/// Room type assigned before any manual or model classification.
pub const UNKNOWN_ROOM_TYPE: &str = "unknown";

/// The capability contract every detection strategy provides.
///
/// Downstream consumers depend only on this trait, never on which
/// strategy produced the rooms.
pub trait RoomDetector {
    fn detect(&self, image: &DynamicImage) -> Result<Vec<Room>, DetectError>;
}

/// Geometry-heuristic strategy: preprocessing, contour extraction,
/// simplification, confidence scoring, room assembly.
///
/// Each call is a stateless, synchronous single pass over one immutable
/// image. The validated configuration is the only retained state and is
/// shared read-only, so concurrent calls need no coordination.
#[derive(Debug, Clone)]
pub struct HeuristicDetector {
    config: DetectionConfig,
}

impl HeuristicDetector {
    /// Build a detector, failing fast on an invalid configuration.
    pub fn new(config: DetectionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }
}

impl RoomDetector for HeuristicDetector {
    fn detect(&self, image: &DynamicImage) -> Result<Vec<Room>, DetectError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(DetectError::EmptyImage);
        }
        let image_area = image.width() as f64 * image.height() as f64;

        let mask = preprocess(image, &self.config);
        let contours = extract_contours(&mask, &self.config);

        let mut candidates = Vec::with_capacity(contours.len());
        for contour in contours {
            let Some(polygon) = simplify_contour(&contour.points, contour.perimeter, &self.config)
            else {
                continue;
            };
            let area = polygon_area(&polygon);
            if area <= 0.0 {
                continue;
            }
            let Some(bounding_box) = BoundingBox::from_points(&polygon) else {
                continue;
            };
            if bounding_box.area() == 0 {
                continue;
            }
            let confidence = score(&polygon, &bounding_box, image_area);
            candidates.push(RoomCandidate {
                polygon,
                area,
                confidence,
                room_type: UNKNOWN_ROOM_TYPE.to_string(),
            });
        }

        Ok(finalize(candidates))
    }
}

/// A pixel-space box prediction from an external model runtime.
#[derive(Debug, Clone)]
pub struct PredictedBox {
    pub bounding_box: BoundingBox,
    pub class_name: String,
    pub confidence: f32,
}

/// Narrow contract for the external model collaborator.
///
/// Model runtimes live outside this crate; the detector only needs
/// pixel-space boxes with a class name and a confidence.
pub trait BoxPredictor {
    fn predict(&self, image: &DynamicImage) -> Result<Vec<PredictedBox>, DetectError>;
}

/// Learned-model strategy.
///
/// Converts box predictions into the same room shape the heuristic
/// pipeline emits: a rectangular polygon from the box, the model's class
/// as the type hint, and the model confidence in place of the heuristic
/// score. Ordering and ids follow the same assembler rule.
#[derive(Debug, Clone)]
pub struct ModelDetector<P> {
    predictor: P,
    min_confidence: f32,
}

impl<P: BoxPredictor> ModelDetector<P> {
    pub fn new(predictor: P, min_confidence: f32) -> Self {
        Self {
            predictor,
            min_confidence,
        }
    }
}

impl<P: BoxPredictor> RoomDetector for ModelDetector<P> {
    fn detect(&self, image: &DynamicImage) -> Result<Vec<Room>, DetectError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(DetectError::EmptyImage);
        }

        let mut candidates = Vec::new();
        for prediction in self.predictor.predict(image)? {
            if prediction.confidence < self.min_confidence {
                continue;
            }
            let bbox = prediction.bounding_box;
            if bbox.area() == 0 {
                continue;
            }
            candidates.push(RoomCandidate {
                polygon: vec![
                    PixelPoint::new(bbox.x_min, bbox.y_min),
                    PixelPoint::new(bbox.x_max, bbox.y_min),
                    PixelPoint::new(bbox.x_max, bbox.y_max),
                    PixelPoint::new(bbox.x_min, bbox.y_max),
                ],
                area: bbox.area() as f64,
                confidence: prediction.confidence,
                room_type: prediction.class_name,
            });
        }

        Ok(finalize(candidates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPredictor {
        boxes: Vec<PredictedBox>,
    }

    impl BoxPredictor for FixedPredictor {
        fn predict(&self, _image: &DynamicImage) -> Result<Vec<PredictedBox>, DetectError> {
            Ok(self.boxes.clone())
        }
    }

    fn boxed(x_min: i32, y_min: i32, x_max: i32, y_max: i32, class: &str, conf: f32) -> PredictedBox {
        PredictedBox {
            bounding_box: BoundingBox {
                x_min,
                y_min,
                x_max,
                y_max,
            },
            class_name: class.to_string(),
            confidence: conf,
        }
    }

    #[test]
    fn test_invalid_config_fails_at_construction() {
        let config = DetectionConfig {
            min_area: 10.0,
            max_area: 1.0,
            ..DetectionConfig::default()
        };
        assert!(HeuristicDetector::new(config).is_err());
    }

    #[test]
    fn test_model_detector_maps_predictions_to_rooms() {
        let predictor = FixedPredictor {
            boxes: vec![
                boxed(10, 10, 60, 40, "Kitchen", 0.9),
                boxed(100, 10, 300, 210, "LivingRoom", 0.8),
                boxed(0, 0, 5, 5, "Closet", 0.1),
            ],
        };
        let detector = ModelDetector::new(predictor, 0.25);

        let image = DynamicImage::new_rgb8(400, 300);
        let rooms = detector.detect(&image).unwrap();

        // The low-confidence closet is filtered; the larger room ranks
        // first.
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].id, 1);
        assert_eq!(rooms[0].room_type, "LivingRoom");
        assert_eq!(rooms[1].room_type, "Kitchen");
        assert_eq!(rooms[0].polygon.len(), 4);
        assert_eq!(rooms[0].lines.len(), 4);
        assert!(rooms[0].area > rooms[1].area);
    }

    #[test]
    fn test_model_detector_rejects_empty_image() {
        let detector = ModelDetector::new(FixedPredictor { boxes: vec![] }, 0.25);
        let image = DynamicImage::new_rgb8(0, 0);
        assert!(matches!(
            detector.detect(&image),
            Err(DetectError::EmptyImage)
        ));
    }

    #[test]
    fn test_degenerate_prediction_is_dropped() {
        let predictor = FixedPredictor {
            boxes: vec![boxed(50, 50, 50, 120, "Utility", 0.9)],
        };
        let detector = ModelDetector::new(predictor, 0.25);
        let image = DynamicImage::new_rgb8(200, 200);
        assert!(detector.detect(&image).unwrap().is_empty());
    }
}
