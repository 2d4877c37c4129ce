// pixform/src/processors/decoder.rs
use crate::core::{ConvertError, Result};
use image::DynamicImage;

#[derive(Clone)]
pub struct Decoder {
    max_dimensions: Option<(u32, u32)>,
}

impl Decoder {
    pub fn new() -> Self {
        Self {
            max_dimensions: Some((100_000, 100_000)),
        }
    }

    pub fn with_max_dimensions(mut self, width: u32, height: u32) -> Self {
        self.max_dimensions = Some((width, height));
        self
    }

    /// Decode raw bytes into a pixel surface. The container format is
    /// sniffed from the bytes, not from any filename.
    pub fn decode(&self, data: &[u8]) -> Result<DynamicImage> {
        let image = image::load_from_memory(data)
            .map_err(|e| ConvertError::Decode(format!("failed to decode image: {}", e)))?;

        if let Some((max_w, max_h)) = self.max_dimensions {
            let (width, height) = (image.width(), image.height());
            if width > max_w || height > max_h {
                return Err(ConvertError::Decode(format!(
                    "image dimensions {}x{} exceed maximum {}x{}",
                    width, height, max_w, max_h
                )));
            }
        }

        log::debug!(
            "decoded image: {}x{} pixels, color: {:?}",
            image.width(),
            image.height(),
            image.color()
        );

        Ok(image)
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}
