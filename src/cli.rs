// pixform/src/cli.rs
use crate::core::ImageFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pixform",
    about = "Convert images between formats, resize, and bundle results",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert one or more images (directories are scanned for
    /// supported files)
    Convert {
        /// Input files or directories
        inputs: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Png)]
        format: OutputFormat,

        /// Encoding quality, 0.1-1.0 (ignored by lossless formats)
        #[arg(short, long, default_value_t = 0.9)]
        quality: f32,

        /// Target width in pixels
        #[arg(short = 'W', long)]
        width: Option<u32>,

        /// Target height in pixels
        #[arg(short = 'H', long)]
        height: Option<u32>,

        /// Resize each axis independently instead of fitting inside
        /// the width/height bounds
        #[arg(long)]
        stretch: bool,

        /// Directory for converted files (defaults to the current
        /// directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Bundle the converted files into a single zip archive
        #[arg(long)]
        zip: bool,
    },

    /// List supported input media types and output formats
    Formats,
}

/// The formats offered on the command line. `jpeg` and `ico` exist in
/// the core enum but are not primary choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Png,
    Jpg,
    Webp,
    Gif,
    Bmp,
}

impl From<OutputFormat> for ImageFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Jpg => ImageFormat::Jpg,
            OutputFormat::Webp => ImageFormat::Webp,
            OutputFormat::Gif => ImageFormat::Gif,
            OutputFormat::Bmp => ImageFormat::Bmp,
        }
    }
}
