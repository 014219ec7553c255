// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Batch annotation generation over a directory of floor plan images
//!
//! Each image is an independent unit of work: detection and output
//! writing run in parallel, per-item failures are explicit values rather
//! than exceptions, and statistics are merged after the parallel section.

use crate::error::DatasetError;
use rayon::prelude::*;
use roomscan_detect::{render_overlay, DetectionConfig, HeuristicDetector, Room, RoomDetector};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Room category table written into the aggregate dataset file.
pub const ROOM_CATEGORIES: [&str; 11] = [
    "bedroom",
    "bathroom",
    "kitchen",
    "living_room",
    "dining_room",
    "hallway",
    "closet",
    "garage",
    "utility",
    "office",
    "unknown",
];

/// Source image dimensions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ImageShape {
    pub width: u32,
    pub height: u32,
}

/// How an annotation was produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationMetadata {
    pub annotated_by: String,
    /// False until a human pass confirms the annotation.
    pub verified: bool,
    pub detector_config: DetectionConfig,
}

/// Per-image annotation record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAnnotation {
    pub image_id: String,
    /// Path relative to the dataset root.
    pub image_path: String,
    pub image_shape: ImageShape,
    pub room_count: usize,
    pub rooms: Vec<Room>,
    pub metadata: AnnotationMetadata,
}

/// One failed batch item; recorded, never aborting the run.
#[derive(Debug, Clone, Serialize)]
pub struct ItemFailure {
    pub path: String,
    pub error: String,
}

/// Aggregate statistics, merged from per-item results.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchStats {
    pub total_images: usize,
    pub total_rooms: usize,
    pub failed_images: usize,
    /// Room count per image -> number of images with that count.
    pub room_counts: FxHashMap<usize, usize>,
}

impl BatchStats {
    pub fn avg_rooms_per_plan(&self) -> f64 {
        self.total_rooms as f64 / self.total_images.max(1) as f64
    }
}

/// Outcome of one directory run.
#[derive(Debug)]
pub struct BatchReport {
    pub annotations: Vec<ImageAnnotation>,
    pub failures: Vec<ItemFailure>,
    pub stats: BatchStats,
}

/// Generates training annotations from floor plan images.
pub struct AnnotationGenerator {
    output_dir: PathBuf,
    detector: HeuristicDetector,
}

impl AnnotationGenerator {
    /// Create the output layout (`individual/`, `visualizations/`) and
    /// the detector shared by every image in the run.
    pub fn new(
        output_dir: impl Into<PathBuf>,
        config: DetectionConfig,
    ) -> Result<Self, DatasetError> {
        let output_dir = output_dir.into();
        for sub in ["individual", "visualizations"] {
            let dir = output_dir.join(sub);
            fs::create_dir_all(&dir).map_err(|source| DatasetError::Io {
                path: dir.clone(),
                source,
            })?;
        }

        let detector =
            HeuristicDetector::new(config).map_err(roomscan_detect::DetectError::from)?;

        Ok(Self {
            output_dir,
            detector,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Detect rooms in one image and write its annotation JSON and
    /// overlay visualization.
    pub fn process_image(
        &self,
        image_path: &Path,
        relative_path: &str,
    ) -> Result<ImageAnnotation, DatasetError> {
        let image = image::open(image_path).map_err(|source| DatasetError::Decode {
            path: image_path.to_path_buf(),
            source,
        })?;

        let rooms = self.detector.detect(&image)?;

        let image_id = image_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unknown".into());

        let annotation = ImageAnnotation {
            image_id: image_id.clone(),
            image_path: relative_path.to_string(),
            image_shape: ImageShape {
                width: image.width(),
                height: image.height(),
            },
            room_count: rooms.len(),
            rooms,
            metadata: AnnotationMetadata {
                annotated_by: "heuristic_detector".into(),
                verified: false,
                detector_config: self.detector.config().clone(),
            },
        };

        let json_path = self
            .output_dir
            .join("individual")
            .join(format!("{image_id}.json"));
        write_json(&json_path, &annotation)?;

        let overlay = render_overlay(&image, &annotation.rooms);
        let vis_path = self
            .output_dir
            .join("visualizations")
            .join(format!("{image_id}.png"));
        overlay.save(&vis_path).map_err(|source| DatasetError::ImageWrite {
            path: vis_path.clone(),
            source,
        })?;

        tracing::debug!(
            image = %image_path.display(),
            rooms = annotation.room_count,
            "annotated image"
        );

        Ok(annotation)
    }

    /// Process every PNG/JPEG under `input_dir`.
    ///
    /// Images run in parallel; a failing image is recorded and does not
    /// abort the rest of the run.
    pub fn process_directory(
        &self,
        input_dir: &Path,
        limit: Option<usize>,
    ) -> Result<BatchReport, DatasetError> {
        let mut files = collect_image_files(input_dir)?;
        files.sort();
        if let Some(limit) = limit {
            files.truncate(limit);
        }

        tracing::info!(
            found = files.len(),
            dir = %input_dir.display(),
            "processing images"
        );

        let results: Vec<Result<ImageAnnotation, ItemFailure>> = files
            .par_iter()
            .map(|path| {
                let relative = path
                    .strip_prefix(input_dir)
                    .unwrap_or(path)
                    .to_string_lossy()
                    .into_owned();
                self.process_image(path, &relative).map_err(|e| ItemFailure {
                    path: path.to_string_lossy().into_owned(),
                    error: e.to_string(),
                })
            })
            .collect();

        let mut report = BatchReport {
            annotations: Vec::new(),
            failures: Vec::new(),
            stats: BatchStats::default(),
        };

        for result in results {
            match result {
                Ok(annotation) => {
                    report.stats.total_images += 1;
                    report.stats.total_rooms += annotation.room_count;
                    *report
                        .stats
                        .room_counts
                        .entry(annotation.room_count)
                        .or_insert(0) += 1;
                    report.annotations.push(annotation);
                }
                Err(failure) => {
                    tracing::warn!(path = %failure.path, error = %failure.error, "image failed");
                    report.stats.failed_images += 1;
                    report.failures.push(failure);
                }
            }
        }

        Ok(report)
    }

    /// Write the aggregate `dataset_annotations.json` and return its
    /// path.
    pub fn write_dataset_file(&self, report: &BatchReport) -> Result<PathBuf, DatasetError> {
        let categories: Vec<Category> = ROOM_CATEGORIES
            .iter()
            .enumerate()
            .map(|(idx, name)| Category {
                id: idx + 1,
                name,
                supercategory: "room",
            })
            .collect();

        let avg = (report.stats.avg_rooms_per_plan() * 100.0).round() / 100.0;
        let dataset = DatasetFile {
            version: "1.0",
            dataset_info: DatasetInfo {
                name: "Single Family Floor Plans",
                annotation_method: "semi-automated",
                detector: "heuristic",
            },
            categories,
            annotations: &report.annotations,
            statistics: Statistics {
                total_images: report.stats.total_images,
                total_rooms: report.stats.total_rooms,
                failed_images: report.stats.failed_images,
                avg_rooms_per_plan: avg,
                room_count_distribution: &report.stats.room_counts,
            },
        };

        let path = self.output_dir.join("dataset_annotations.json");
        write_json(&path, &dataset)?;
        Ok(path)
    }
}

#[derive(Debug, Serialize)]
struct DatasetFile<'a> {
    version: &'static str,
    dataset_info: DatasetInfo,
    categories: Vec<Category>,
    annotations: &'a [ImageAnnotation],
    statistics: Statistics<'a>,
}

#[derive(Debug, Serialize)]
struct DatasetInfo {
    name: &'static str,
    annotation_method: &'static str,
    detector: &'static str,
}

#[derive(Debug, Serialize)]
struct Category {
    id: usize,
    name: &'static str,
    supercategory: &'static str,
}

#[derive(Debug, Serialize)]
struct Statistics<'a> {
    total_images: usize,
    total_rooms: usize,
    failed_images: usize,
    avg_rooms_per_plan: f64,
    room_count_distribution: &'a FxHashMap<usize, usize>,
}

/// Recursively collect PNG/JPEG files under a directory.
fn collect_image_files(dir: &Path) -> Result<Vec<PathBuf>, DatasetError> {
    let mut files = Vec::new();
    collect_into(dir, &mut files)?;
    Ok(files)
}

fn collect_into(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), DatasetError> {
    let entries = fs::read_dir(dir).map_err(|source| DatasetError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| DatasetError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            collect_into(&path, files)?;
        } else if is_image_file(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            ext == "png" || ext == "jpg" || ext == "jpeg"
        })
        .unwrap_or(false)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), DatasetError> {
    let data = serde_json::to_vec_pretty(value)?;
    fs::write(path, data).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    /// White page with a black rectangle outline, saved as a PNG.
    fn save_blueprint(path: &Path) {
        let mut img = RgbImage::from_pixel(200, 200, Rgb([255, 255, 255]));
        let black = Rgb([0, 0, 0]);
        for t in 0..3u32 {
            for x in 20..=180 {
                img.put_pixel(x, 20 + t, black);
                img.put_pixel(x, 180 - t, black);
            }
            for y in 20..=180 {
                img.put_pixel(20 + t, y, black);
                img.put_pixel(180 - t, y, black);
            }
        }
        img.save(path).unwrap();
    }

    fn test_config() -> DetectionConfig {
        DetectionConfig {
            min_area: 500.0,
            ..DetectionConfig::default()
        }
    }

    #[test]
    fn test_process_image_writes_annotation_and_overlay() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let image_path = input.path().join("plan_001.png");
        save_blueprint(&image_path);

        let generator = AnnotationGenerator::new(output.path(), test_config()).unwrap();
        let annotation = generator.process_image(&image_path, "plan_001.png").unwrap();

        assert_eq!(annotation.image_id, "plan_001");
        assert_eq!(annotation.image_shape.width, 200);
        assert!(annotation.room_count >= 1);
        assert!(!annotation.metadata.verified);
        assert!(output.path().join("individual/plan_001.json").is_file());
        assert!(output.path().join("visualizations/plan_001.png").is_file());
    }

    #[test]
    fn test_batch_isolates_per_item_failures() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        save_blueprint(&input.path().join("good.png"));
        fs::write(input.path().join("bad.png"), b"not an image").unwrap();

        let generator = AnnotationGenerator::new(output.path(), test_config()).unwrap();
        let report = generator.process_directory(input.path(), None).unwrap();

        assert_eq!(report.stats.total_images, 1);
        assert_eq!(report.stats.failed_images, 1);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].path.ends_with("bad.png"));
        assert_eq!(report.annotations.len(), 1);
    }

    #[test]
    fn test_limit_caps_processed_images() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        save_blueprint(&input.path().join("a.png"));
        save_blueprint(&input.path().join("b.png"));
        save_blueprint(&input.path().join("c.png"));

        let generator = AnnotationGenerator::new(output.path(), test_config()).unwrap();
        let report = generator.process_directory(input.path(), Some(2)).unwrap();

        assert_eq!(report.stats.total_images, 2);
    }

    #[test]
    fn test_dataset_file_contains_categories_and_stats() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        save_blueprint(&input.path().join("plan.png"));

        let generator = AnnotationGenerator::new(output.path(), test_config()).unwrap();
        let report = generator.process_directory(input.path(), None).unwrap();
        let path = generator.write_dataset_file(&report).unwrap();

        let data = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&data).unwrap();
        assert_eq!(value["version"], "1.0");
        assert_eq!(value["categories"].as_array().unwrap().len(), 11);
        assert_eq!(value["statistics"]["total_images"], 1);
        assert_eq!(value["statistics"]["failed_images"], 0);
        assert!(value["statistics"]["avg_rooms_per_plan"].as_f64().unwrap() >= 0.0);
    }

    #[test]
    fn test_stats_merge_room_counts() {
        let mut stats = BatchStats::default();
        for count in [2, 3, 2] {
            stats.total_images += 1;
            stats.total_rooms += count;
            *stats.room_counts.entry(count).or_insert(0) += 1;
        }

        assert_eq!(stats.room_counts[&2], 2);
        assert_eq!(stats.room_counts[&3], 1);
        assert!((stats.avg_rooms_per_plan() - 7.0 / 3.0).abs() < 1e-9);
    }
}
