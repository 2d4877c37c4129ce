// pixform/src/processors/encoder.rs
use crate::core::{ConvertError, ImageFormat, Result};
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use std::io::Cursor;

pub struct Encoder {
    format: ImageFormat,
    quality: f32,
}

impl Encoder {
    pub fn new(format: ImageFormat, quality: f32) -> Self {
        Self { format, quality }
    }

    /// Encode a pixel surface to bytes in the target format. Quality
    /// reaches the jpeg codec as a 1-100 percentage; png is encoded
    /// with no quality parameter; the remaining formats go through the
    /// default codecs, which may ignore quality entirely.
    pub fn encode(&self, image: &DynamicImage) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());

        match self.format {
            ImageFormat::Jpg | ImageFormat::Jpeg => {
                // The jpeg codec takes no alpha channel; rasterization
                // already flattened transparency onto white.
                let encoder = JpegEncoder::new_with_quality(&mut buffer, self.quality_percent());
                let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
                rgb.write_with_encoder(encoder)
                    .map_err(|e| ConvertError::Encode(format!("jpeg encoding failed: {}", e)))?;
            }
            ImageFormat::Png => {
                image
                    .write_to(&mut buffer, image::ImageFormat::Png)
                    .map_err(|e| ConvertError::Encode(format!("png encoding failed: {}", e)))?;
            }
            other => {
                image
                    .write_to(&mut buffer, other.to_image_format())
                    .map_err(|e| {
                        ConvertError::Encode(format!("{} encoding failed: {}", other, e))
                    })?;
            }
        }

        let bytes = buffer.into_inner();
        if bytes.is_empty() {
            return Err(ConvertError::Encode(
                "encoder produced no output".to_string(),
            ));
        }

        Ok(bytes)
    }

    fn quality_percent(&self) -> u8 {
        // Clamp only at the codec boundary; the option itself is
        // pass-through and unvalidated.
        (self.quality.clamp(0.01, 1.0) * 100.0).round() as u8
    }
}
