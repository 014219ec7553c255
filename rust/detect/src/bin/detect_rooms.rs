// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: detect room boundaries in a floor plan image
//!
//! Usage:
//!   detect-rooms <image_path> [options]

use image::ImageReader;
use roomscan_detect::{ConfigProfile, HeuristicDetector, RoomDetector};
use std::env;
use std::fs;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let image_path = &args[1];

    // Parse options
    let mut output_path = String::from("output.json");
    let mut visualize_path: Option<String> = None;
    let mut profile = ConfigProfile::Annotation;
    let mut min_area: Option<f64> = None;
    let mut max_area: Option<f64> = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--output" => {
                i += 1;
                output_path = args[i].clone();
            }
            "--visualize" => {
                i += 1;
                visualize_path = Some(args[i].clone());
            }
            "--profile" => {
                i += 1;
                profile = args[i].parse().unwrap_or_else(|e| {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                });
            }
            "--min-area" => {
                i += 1;
                min_area = Some(args[i].parse().expect("Invalid min-area value"));
            }
            "--max-area" => {
                i += 1;
                max_area = Some(args[i].parse().expect("Invalid max-area value"));
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    println!("Loading image: {}", image_path);
    let image = ImageReader::open(image_path)
        .unwrap_or_else(|e| {
            eprintln!("Error: Cannot open image '{}': {}", image_path, e);
            std::process::exit(1);
        })
        .decode()
        .unwrap_or_else(|e| {
            eprintln!("Error: Cannot decode image '{}': {}", image_path, e);
            std::process::exit(1);
        });
    println!("Image size: {}x{}", image.width(), image.height());

    let mut config = profile.config();
    if let Some(min_area) = min_area {
        config.min_area = min_area;
    }
    if let Some(max_area) = max_area {
        config.max_area = max_area;
    }

    let detector = HeuristicDetector::new(config).unwrap_or_else(|e| {
        eprintln!("Error: invalid configuration: {}", e);
        std::process::exit(1);
    });

    println!("Detecting rooms ({} profile)...", profile.name());
    let rooms = detector.detect(&image).unwrap_or_else(|e| {
        eprintln!("Error: detection failed: {}", e);
        std::process::exit(1);
    });

    println!("Detected {} rooms", rooms.len());
    for room in &rooms {
        println!(
            "  room {}: {} vertices, area={:.2}, perimeter={:.2}, confidence={:.2}",
            room.id,
            room.polygon.len(),
            room.area,
            room.perimeter,
            room.confidence
        );
    }

    let json = serde_json::to_string_pretty(&rooms).unwrap_or_else(|e| {
        eprintln!("Error: could not serialize rooms: {}", e);
        std::process::exit(1);
    });
    fs::write(&output_path, json).unwrap_or_else(|e| {
        eprintln!("Error: could not write '{}': {}", output_path, e);
        std::process::exit(1);
    });
    println!("Room list written to {}", output_path);

    if let Some(vis_path) = visualize_path {
        let overlay = roomscan_detect::render_overlay(&image, &rooms);
        overlay.save(&vis_path).unwrap_or_else(|e| {
            eprintln!("Error: could not save visualization '{}': {}", vis_path, e);
            std::process::exit(1);
        });
        println!("Visualization saved to {}", vis_path);
    }
}

fn print_usage() {
    println!(
        r#"Room Boundary Detector
======================

Detects room boundaries in a floor plan image and writes them as JSON.

USAGE:
  detect-rooms <image_path> [OPTIONS]

ARGUMENTS:
  <image_path>            Path to floor plan image (PNG, JPEG)

OPTIONS:
  --output <path>         Output JSON path (default: output.json)
  --visualize <path>      Save an overlay PNG with the detected rooms
  --profile <name>        Threshold profile: annotation | serving
                          (default: annotation)
  --min-area <pixels>     Override minimum room area
  --max-area <pixels>     Override maximum room area
  -h, --help              Show this help message

EXAMPLES:
  detect-rooms floorplan.png
  detect-rooms floorplan.png --output rooms.json --visualize overlay.png
  detect-rooms floorplan.png --profile serving --min-area 2500
"#
    );
}
