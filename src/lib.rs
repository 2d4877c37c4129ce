mod cli;
mod core;
mod processors;
mod queue;
mod utils;

pub use cli::{Cli, Commands, OutputFormat};
pub use core::{
    supported_output_formats, ConversionOptions, ConversionResult, Converter, ConvertError,
    ImageFormat, Result, SUPPORTED_INPUT_TYPES,
};
pub use processors::{
    package_results, Decoder, Delivery, Encoder, Resizer, DEFAULT_ARCHIVE_NAME,
};
pub use queue::{ConversionQueue, ItemId, ItemStatus, PreviewHandle, PreviewStore, QueueItem};
pub use utils::{
    collect_image_files, derive_output_filename, format_file_size, is_supported_file,
};

pub mod prelude {
    pub use crate::{
        ConversionOptions, ConversionQueue, ConversionResult, Converter, Decoder, Delivery,
        Encoder, ImageFormat, Resizer,
    };
}

// Re-export commonly used types
pub use image::DynamicImage;
