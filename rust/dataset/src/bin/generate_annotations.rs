// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: generate training annotations from floor plan images
//!
//! Usage:
//!   generate-annotations --input-dir <path> --output-dir <path> [options]

use roomscan_dataset::{AnnotationGenerator, BatchReport};
use roomscan_detect::ConfigProfile;
use std::env;
use std::path::{Path, PathBuf};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let mut input_dir: Option<PathBuf> = None;
    let mut output_dir: Option<PathBuf> = None;
    let mut limit: Option<usize> = None;
    let mut profile = ConfigProfile::Annotation;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--input-dir" => {
                i += 1;
                input_dir = Some(PathBuf::from(&args[i]));
            }
            "--output-dir" => {
                i += 1;
                output_dir = Some(PathBuf::from(&args[i]));
            }
            "--limit" => {
                i += 1;
                limit = Some(args[i].parse().expect("Invalid limit value"));
            }
            "--profile" => {
                i += 1;
                profile = args[i].parse().unwrap_or_else(|e| {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                });
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let Some(input_dir) = input_dir else {
        eprintln!("Error: --input-dir is required");
        std::process::exit(1);
    };
    let Some(output_dir) = output_dir else {
        eprintln!("Error: --output-dir is required");
        std::process::exit(1);
    };
    if !input_dir.is_dir() {
        eprintln!(
            "Error: input directory does not exist: {}",
            input_dir.display()
        );
        std::process::exit(1);
    }

    let generator =
        AnnotationGenerator::new(&output_dir, profile.config()).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    let report = generator
        .process_directory(&input_dir, limit)
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    let dataset_path = generator.write_dataset_file(&report).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    print_summary(&report, generator.output_dir(), &dataset_path);
}

fn print_summary(report: &BatchReport, output_dir: &Path, dataset_path: &Path) {
    println!();
    println!("{}", "=".repeat(60));
    println!("ANNOTATION GENERATION SUMMARY");
    println!("{}", "=".repeat(60));
    println!("Total images processed: {}", report.stats.total_images);
    println!("Total rooms detected: {}", report.stats.total_rooms);
    println!("Failed images: {}", report.stats.failed_images);

    if report.stats.total_images > 0 {
        println!(
            "Average rooms per plan: {:.2}",
            report.stats.avg_rooms_per_plan()
        );
    }

    for failure in &report.failures {
        println!("  FAILED {}: {}", failure.path, failure.error);
    }

    println!();
    println!("Room count distribution:");
    let mut counts: Vec<(&usize, &usize)> = report.stats.room_counts.iter().collect();
    counts.sort();
    for (rooms, images) in counts {
        println!("  {} rooms: {} images", rooms, images);
    }

    println!();
    println!("Output directory: {}", output_dir.display());
    println!(
        "  - Individual annotations: {}",
        output_dir.join("individual").display()
    );
    println!(
        "  - Visualizations: {}",
        output_dir.join("visualizations").display()
    );
    println!("  - Dataset file: {}", dataset_path.display());
    println!("{}", "=".repeat(60));
}

fn print_usage() {
    println!(
        r#"Annotation Generator
====================

Processes floor plan images with the room detector and generates
training annotations.

USAGE:
  generate-annotations --input-dir <path> --output-dir <path> [OPTIONS]

OPTIONS:
  --input-dir <path>      Directory containing floor plan images
  --output-dir <path>     Directory for generated annotations
  --limit <n>             Process at most n images (default: all)
  --profile <name>        Threshold profile: annotation | serving
                          (default: annotation)
  -h, --help              Show this help message

EXAMPLES:
  generate-annotations --input-dir plans/ --output-dir annotations/
  generate-annotations --input-dir plans/ --output-dir annotations/ --limit 5
"#
    );
}
