// pixform/src/processors/resizer.rs
use crate::core::ImageFormat;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};

pub struct Resizer {
    filter: FilterType,
}

impl Resizer {
    pub fn new() -> Self {
        Self {
            filter: FilterType::Lanczos3,
        }
    }

    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    /// Resolve output dimensions from source dimensions and optional
    /// targets. Rules, in priority order:
    ///
    /// 1. no targets: source dimensions unchanged
    /// 2. aspect ratio off: each target as given, source for the rest
    /// 3. width only: height follows the source ratio
    /// 4. height only: width follows the source ratio
    /// 5. both: bounding-box fit by the smaller of the two axis ratios
    ///
    /// Rounding is f64 `round()` (half away from zero), applied per
    /// axis, floored at 1. Inputs are assumed positive.
    pub fn resolve(
        source_width: u32,
        source_height: u32,
        target_width: Option<u32>,
        target_height: Option<u32>,
        maintain_aspect_ratio: bool,
    ) -> (u32, u32) {
        match (target_width, target_height) {
            (None, None) => (source_width, source_height),
            _ if !maintain_aspect_ratio => (
                target_width.unwrap_or(source_width),
                target_height.unwrap_or(source_height),
            ),
            (Some(width), None) => {
                let aspect = source_width as f64 / source_height as f64;
                let height = (width as f64 / aspect).round() as u32;
                (width, height.max(1))
            }
            (None, Some(height)) => {
                let aspect = source_width as f64 / source_height as f64;
                let width = (height as f64 * aspect).round() as u32;
                (width.max(1), height)
            }
            (Some(width), Some(height)) => {
                let ratio_w = width as f64 / source_width as f64;
                let ratio_h = height as f64 / source_height as f64;
                let ratio = ratio_w.min(ratio_h);

                let out_w = (source_width as f64 * ratio).round() as u32;
                let out_h = (source_height as f64 * ratio).round() as u32;
                (out_w.max(1), out_h.max(1))
            }
        }
    }

    /// Draw the decoded image onto a width x height surface. Targets
    /// without alpha get an opaque white canvas underneath so
    /// transparent source pixels come out white.
    pub fn rasterize(
        &self,
        image: &DynamicImage,
        width: u32,
        height: u32,
        format: ImageFormat,
    ) -> DynamicImage {
        let resized = if width == image.width() && height == image.height() {
            image.clone()
        } else {
            log::debug!(
                "resizing {}x{} -> {}x{}",
                image.width(),
                image.height(),
                width,
                height
            );
            image.resize_exact(width, height, self.filter)
        };

        if format.is_opaque() {
            let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
            imageops::overlay(&mut canvas, &resized.to_rgba8(), 0, 0);
            DynamicImage::ImageRgba8(canvas)
        } else {
            resized
        }
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new()
    }
}
