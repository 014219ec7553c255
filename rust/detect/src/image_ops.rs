// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Grayscale image operations used by the preprocessing pipeline

use image::{GrayImage, Luma};
use imageproc::distance_transform::Norm;

/// Apply Gaussian blur for noise reduction
pub fn gaussian_blur(image: &GrayImage, sigma: f32) -> GrayImage {
    imageproc::filter::gaussian_blur_f32(image, sigma)
}

/// Mean intensity over all pixels. Returns 0.0 for an empty image.
pub fn mean_intensity(image: &GrayImage) -> f64 {
    let count = (image.width() as u64) * (image.height() as u64);
    if count == 0 {
        return 0.0;
    }
    let sum: u64 = image.pixels().map(|p| p.0[0] as u64).sum();
    sum as f64 / count as f64
}

/// Invert a grayscale image
pub fn invert(image: &GrayImage) -> GrayImage {
    let mut result = image.clone();
    for pixel in result.pixels_mut() {
        pixel.0[0] = 255 - pixel.0[0];
    }
    result
}

/// Pixels strictly above the threshold become white, the rest black.
pub fn threshold(image: &GrayImage, threshold_value: u8) -> GrayImage {
    let mut result = GrayImage::new(image.width(), image.height());

    for (x, y, pixel) in image.enumerate_pixels() {
        let value = if pixel.0[0] > threshold_value { 255 } else { 0 };
        result.put_pixel(x, y, Luma([value]));
    }

    result
}

/// Morphological dilation with a square structuring element - expands
/// white regions
pub fn dilate(image: &GrayImage, radius: u8) -> GrayImage {
    imageproc::morphology::dilate(image, Norm::LInf, radius)
}

/// Morphological erosion with a square structuring element - shrinks
/// white regions
pub fn erode(image: &GrayImage, radius: u8) -> GrayImage {
    imageproc::morphology::erode(image, Norm::LInf, radius)
}

/// Morphological closing (dilate then erode) - bridges small gaps.
///
/// All dilation passes run before the erosion passes, so `iterations`
/// behaves like a widened structuring element rather than repeated
/// independent closings.
pub fn morphological_close(image: &GrayImage, radius: u8, iterations: u32) -> GrayImage {
    let mut result = image.clone();
    for _ in 0..iterations {
        result = dilate(&result, radius);
    }
    for _ in 0..iterations {
        result = erode(&result, radius);
    }
    result
}

/// Morphological opening (erode then dilate) - removes isolated speckles
pub fn morphological_open(image: &GrayImage, radius: u8) -> GrayImage {
    let eroded = erode(image, radius);
    dilate(&eroded, radius)
}

/// Calculate Otsu's optimal threshold level.
///
/// Returns `None` when the image holds a single intensity level and there
/// is no between-class variance to maximize.
pub fn otsu_level(image: &GrayImage) -> Option<u8> {
    // Build histogram
    let mut histogram = [0u32; 256];
    for pixel in image.pixels() {
        histogram[pixel.0[0] as usize] += 1;
    }

    let total_pixels = (image.width() as u64 * image.height() as u64) as f64;
    if total_pixels == 0.0 {
        return None;
    }

    let mut sum_total = 0.0;
    for (i, &count) in histogram.iter().enumerate() {
        sum_total += i as f64 * count as f64;
    }

    let mut sum_background = 0.0;
    let mut weight_background = 0.0;
    let mut max_variance = 0.0;
    let mut best_threshold = None;

    for (t, &count) in histogram.iter().enumerate() {
        weight_background += count as f64;
        if weight_background == 0.0 {
            continue;
        }

        let weight_foreground = total_pixels - weight_background;
        if weight_foreground == 0.0 {
            break;
        }

        sum_background += t as f64 * count as f64;

        let mean_background = sum_background / weight_background;
        let mean_foreground = (sum_total - sum_background) / weight_foreground;

        let variance =
            weight_background * weight_foreground * (mean_background - mean_foreground).powi(2);

        if variance > max_variance {
            max_variance = variance;
            best_threshold = Some(t as u8);
        }
    }

    best_threshold
}
