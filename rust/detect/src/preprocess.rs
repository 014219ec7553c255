// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raster to binary-mask preprocessing

use crate::config::DetectionConfig;
use crate::image_ops::{
    gaussian_blur, invert, mean_intensity, morphological_close, morphological_open, otsu_level,
    threshold,
};
use image::{DynamicImage, GrayImage};

/// Mid-range intensity separating background-dominant from
/// foreground-dominant images.
const POLARITY_MIDPOINT: f64 = 127.5;

/// Closing passes used to bridge gaps in wall strokes.
const CLOSE_ITERATIONS: u32 = 2;

/// Convert a raster image into a binary mask with wall strokes as the
/// white foreground.
///
/// Steps, in order: collapse to single-channel luma; fixed polarity rule;
/// Gaussian blur; global Otsu threshold; morphological close then open.
///
/// The polarity rule is not a guess: a mean intensity above the mid-range
/// means the image is background-dominant (light paper, dark strokes) and
/// it gets inverted so strokes land in the bright population. A flat,
/// single-level image binarizes to an all-background mask.
///
/// The output has the same dimensions as the input and is deterministic
/// for a fixed image and configuration.
pub fn preprocess(image: &DynamicImage, config: &DetectionConfig) -> GrayImage {
    let gray = image.to_luma8();

    let gray = if mean_intensity(&gray) > POLARITY_MIDPOINT {
        invert(&gray)
    } else {
        gray
    };

    let sigma = config.line_thickness as f32 / 3.0;
    let blurred = gaussian_blur(&gray, sigma);

    let binary = match otsu_level(&blurred) {
        Some(level) => threshold(&blurred, level),
        // Single intensity level: nothing to separate, no foreground.
        None => return GrayImage::new(blurred.width(), blurred.height()),
    };

    let radius = (config.line_thickness / 2).max(1) as u8;
    let closed = morphological_close(&binary, radius, CLOSE_ITERATIONS);
    morphological_open(&closed, radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb, RgbImage};

    fn gray_canvas(width: u32, height: u32, value: u8) -> GrayImage {
        GrayImage::from_pixel(width, height, Luma([value]))
    }

    #[test]
    fn test_mask_matches_input_dimensions() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 48, Rgb([255, 255, 255])));
        let mask = preprocess(&img, &DetectionConfig::default());
        assert_eq!(mask.width(), 64);
        assert_eq!(mask.height(), 48);
    }

    #[test]
    fn test_blank_page_yields_empty_mask() {
        let img = DynamicImage::ImageLuma8(gray_canvas(50, 50, 255));
        let mask = preprocess(&img, &DetectionConfig::default());
        assert!(mask.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn test_dark_strokes_on_light_paper_become_foreground() {
        // Background-dominant: white page, black block. The polarity rule
        // inverts it so the block is the bright population.
        let mut img = gray_canvas(50, 50, 255);
        for y in 20..30 {
            for x in 20..30 {
                img.put_pixel(x, y, Luma([0]));
            }
        }

        let mask = preprocess(&DynamicImage::ImageLuma8(img), &DetectionConfig::default());
        assert_eq!(mask.get_pixel(25, 25).0[0], 255);
        assert_eq!(mask.get_pixel(5, 5).0[0], 0);
    }

    #[test]
    fn test_light_strokes_on_dark_paper_are_not_inverted() {
        // Foreground-dominant: mean stays below the midpoint, so the
        // bright block is already the stroke population.
        let mut img = gray_canvas(50, 50, 0);
        for y in 20..30 {
            for x in 20..30 {
                img.put_pixel(x, y, Luma([255]));
            }
        }

        let mask = preprocess(&DynamicImage::ImageLuma8(img), &DetectionConfig::default());
        assert_eq!(mask.get_pixel(25, 25).0[0], 255);
        assert_eq!(mask.get_pixel(5, 5).0[0], 0);
    }

    #[test]
    fn test_deterministic_for_fixed_input() {
        let mut img = gray_canvas(40, 40, 255);
        for x in 10..30 {
            img.put_pixel(x, 20, Luma([0]));
        }
        let img = DynamicImage::ImageLuma8(img);
        let config = DetectionConfig::default();

        let first = preprocess(&img, &config);
        let second = preprocess(&img, &config);
        assert_eq!(first.as_raw(), second.as_raw());
    }
}
