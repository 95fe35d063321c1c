// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Site image optimisation: downscale and re-encode to WebP

use image::imageops::FilterType;
use image::GenericImageView;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::AssetJob;
use crate::{FolioError, Result};

/// Outcome of converting one image
#[derive(Debug, Clone, Serialize)]
pub struct OptimizeReport {
    pub source: PathBuf,
    pub output: PathBuf,
    pub original_size: u64,
    pub new_size: u64,
    pub width: u32,
    pub height: u32,
}

impl OptimizeReport {
    /// Size reduction in percent (negative if the WebP is larger)
    pub fn reduction_percent(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        (self.original_size as f64 - self.new_size as f64) / self.original_size as f64 * 100.0
    }
}

/// Target dimensions: scaled to `max_width` keeping aspect ratio, never enlarged
pub fn target_size(width: u32, height: u32, max_width: Option<u32>) -> (u32, u32) {
    match max_width {
        Some(max) if width > max && max > 0 => {
            let ratio = max as f64 / width as f64;
            let scaled_height = ((height as f64 * ratio) as u32).max(1);
            (max, scaled_height)
        }
        _ => (width, height),
    }
}

/// Convert `<dir>/<job.file>` to a lossy WebP beside it, at the job's quality
/// or `default_quality`
pub fn optimize_image(dir: &Path, job: &AssetJob, default_quality: f32) -> Result<OptimizeReport> {
    let source = dir.join(&job.file);
    if !source.is_file() {
        return Err(FolioError::AssetNotFound(job.file.clone()));
    }

    let img = image::open(&source)?;
    let (width, height) = img.dimensions();
    let (target_width, target_height) = target_size(width, height, job.max_width);

    let img = if (target_width, target_height) != (width, height) {
        debug!("Resizing {:?} from {}x{} to {}x{}", source, width, height, target_width, target_height);
        img.resize_exact(target_width, target_height, FilterType::Lanczos3)
    } else {
        img
    };

    let output = source.with_extension("webp");
    let quality = job.quality_or(default_quality);
    let rgba = img.to_rgba8();
    let encoded = webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height()).encode(quality);
    std::fs::write(&output, &*encoded)?;

    let report = OptimizeReport {
        original_size: std::fs::metadata(&source)?.len(),
        new_size: std::fs::metadata(&output)?.len(),
        width: target_width,
        height: target_height,
        source,
        output,
    };

    info!(
        "Optimized {:?} -> {:?} at quality {} ({:.1}% reduction)",
        report.source,
        report.output,
        quality,
        report.reduction_percent()
    );

    Ok(report)
}

/// Run every job; one failure does not stop the rest
pub fn optimize_all(
    dir: &Path,
    jobs: &[AssetJob],
    default_quality: f32,
) -> Vec<(AssetJob, Result<OptimizeReport>)> {
    jobs.iter()
        .map(|job| (job.clone(), optimize_image(dir, job, default_quality)))
        .collect()
}
