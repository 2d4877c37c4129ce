// pixform/src/processors/archive.rs
use crate::core::{ConversionResult, ConvertError, Result};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const DEFAULT_ARCHIVE_NAME: &str = "converted-images.zip";

/// What gets handed to the host's "save bytes as file" primitive:
/// either one converted file as-is, or a zip archive bundling several.
#[derive(Debug, Clone)]
pub enum Delivery {
    Single { filename: String, bytes: Vec<u8> },
    Archive { filename: String, bytes: Vec<u8> },
}

impl Delivery {
    pub fn filename(&self) -> &str {
        match self {
            Delivery::Single { filename, .. } | Delivery::Archive { filename, .. } => filename,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            Delivery::Single { bytes, .. } | Delivery::Archive { bytes, .. } => bytes,
        }
    }
}

/// Package completed results for delivery. Exactly one result passes
/// through untouched; two or more become a single zip archive with one
/// entry per result, written in order. Duplicate filenames are written
/// as-is, without deduplication.
pub fn package_results(results: &[&ConversionResult]) -> Result<Delivery> {
    match results {
        [] => Err(ConvertError::Archive("no results to deliver".to_string())),
        [single] => Ok(Delivery::Single {
            filename: single.filename.clone(),
            bytes: single.bytes.clone(),
        }),
        many => {
            let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
            let options =
                SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

            for result in many {
                writer
                    .start_file(result.filename.as_str(), options)
                    .map_err(|e| ConvertError::Archive(e.to_string()))?;
                writer.write_all(&result.bytes)?;
            }

            let cursor = writer
                .finish()
                .map_err(|e| ConvertError::Archive(e.to_string()))?;

            log::debug!(
                "packaged {} results into {} ({} bytes)",
                many.len(),
                DEFAULT_ARCHIVE_NAME,
                cursor.get_ref().len()
            );

            Ok(Delivery::Archive {
                filename: DEFAULT_ARCHIVE_NAME.to_string(),
                bytes: cursor.into_inner(),
            })
        }
    }
}
