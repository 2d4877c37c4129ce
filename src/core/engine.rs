// pixform/src/core/engine.rs
use super::{ConversionOptions, ConversionResult, Result};
use crate::processors::{Decoder, Encoder, Resizer};
use crate::utils::derive_output_filename;

/// The conversion pipeline: decode, resolve dimensions, rasterize,
/// encode. Holds no UI or queue state; the queue delegates here.
pub struct Converter {
    options: ConversionOptions,
    decoder: Decoder,
    resizer: Resizer,
    encoder: Encoder,
}

impl Converter {
    pub fn new(options: ConversionOptions) -> Self {
        let encoder = Encoder::new(options.format, options.quality);

        Self {
            decoder: Decoder::new(),
            resizer: Resizer::new(),
            encoder,
            options,
        }
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Convert one image. Fails with `ConvertError::Decode` when the
    /// source bytes are not a readable image and `ConvertError::Encode`
    /// when the target codec produces no output.
    pub fn convert(&self, source: &[u8], filename: &str) -> Result<ConversionResult> {
        let image = self.decoder.decode(source)?;

        let (width, height) = Resizer::resolve(
            image.width(),
            image.height(),
            self.options.width,
            self.options.height,
            self.options.maintain_aspect_ratio,
        );

        let surface = self.resizer.rasterize(&image, width, height, self.options.format);
        let bytes = self.encoder.encode(&surface)?;
        let out_name = derive_output_filename(filename, self.options.format);

        log::debug!(
            "converted {} -> {} ({} -> {} bytes, {}x{})",
            filename,
            out_name,
            source.len(),
            bytes.len(),
            width,
            height
        );

        Ok(ConversionResult {
            converted_size: bytes.len() as u64,
            original_size: source.len() as u64,
            filename: out_name,
            width,
            height,
            bytes,
        })
    }

    /// Convert a sequence of `(bytes, filename)` inputs strictly in
    /// order, one at a time. `on_progress(completed, total)` fires after
    /// each item; the first failure propagates. The queue layer provides
    /// the partial-failure variant.
    pub fn convert_batch<F>(
        &self,
        inputs: &[(Vec<u8>, String)],
        mut on_progress: F,
    ) -> Result<Vec<ConversionResult>>
    where
        F: FnMut(usize, usize),
    {
        let total = inputs.len();
        let mut results = Vec::with_capacity(total);

        for (index, (bytes, filename)) in inputs.iter().enumerate() {
            results.push(self.convert(bytes, filename)?);
            on_progress(index + 1, total);
        }

        Ok(results)
    }
}
