// pixform/src/core/mod.rs
mod engine;

pub use engine::Converter;

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Output encodings the converter can produce. `Jpg` and `Jpeg` are
/// synonyms: same codec, same media type, different file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpg,
    Jpeg,
    Webp,
    Gif,
    Bmp,
    Ico,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Webp => "webp",
            ImageFormat::Gif => "gif",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Ico => "ico",
        }
    }

    pub fn media_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpg | ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Webp => "image/webp",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::Ico => "image/x-icon",
        }
    }

    /// Formats without an alpha channel; sources get composited onto
    /// white before encoding so transparency does not render as black.
    pub fn is_opaque(self) -> bool {
        matches!(self, ImageFormat::Jpg | ImageFormat::Jpeg)
    }

    pub fn to_image_format(self) -> image::ImageFormat {
        match self {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpg | ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Webp => image::ImageFormat::WebP,
            ImageFormat::Gif => image::ImageFormat::Gif,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
            ImageFormat::Ico => image::ImageFormat::Ico,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" => Ok(ImageFormat::Jpg),
            "jpeg" => Ok(ImageFormat::Jpeg),
            "webp" => Ok(ImageFormat::Webp),
            "gif" => Ok(ImageFormat::Gif),
            "bmp" => Ok(ImageFormat::Bmp),
            "ico" => Ok(ImageFormat::Ico),
            other => Err(ConvertError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Media types accepted as conversion input.
pub const SUPPORTED_INPUT_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/webp",
    "image/gif",
    "image/bmp",
];

/// Output formats offered as primary choices. `jpeg` and `ico` parse
/// via `FromStr` but are not part of the advertised set.
pub fn supported_output_formats() -> &'static [ImageFormat] {
    &[
        ImageFormat::Png,
        ImageFormat::Jpg,
        ImageFormat::Webp,
        ImageFormat::Gif,
        ImageFormat::Bmp,
    ]
}

#[derive(Debug, Clone)]
pub struct ConversionOptions {
    pub format: ImageFormat,
    /// 0.0–1.0; passed through to codecs that accept one. Not validated
    /// here — out-of-range values are the encoder surface's business.
    pub quality: f32,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub maintain_aspect_ratio: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            format: ImageFormat::Png,
            quality: 0.9,
            width: None,
            height: None,
            maintain_aspect_ratio: true,
        }
    }
}

/// One finished conversion. Immutable once produced.
#[derive(Debug, Clone)]
pub struct ConversionResult {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub original_size: u64,
    pub converted_size: u64,
    pub width: u32,
    pub height: u32,
}

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("decode error: {0}")]
    Decode(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error("archive error: {0}")]
    Archive(String),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
