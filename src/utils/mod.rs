// pixform/src/utils/mod.rs
use crate::core::ImageFormat;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Derive an output filename: strip the final `.` and everything after
/// it, then append the target format's extension. A name with no
/// extension keeps its full stem.
pub fn derive_output_filename(source: &str, format: ImageFormat) -> String {
    let base = match source.rfind('.') {
        Some(index) => &source[..index],
        None => source,
    };

    format!("{}.{}", base, format.extension())
}

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let base = 1024_f64;
    let bytes_f64 = bytes as f64;
    let exponent = (bytes_f64.log10() / base.log10()).floor() as i32;
    let size = bytes_f64 / base.powi(exponent);

    format!("{:.2} {}", size, UNITS[exponent as usize])
}

const INPUT_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "bmp", "webp"];

pub fn is_supported_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| INPUT_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Collect supported image files under a directory, sorted for stable
/// queue order.
pub fn collect_image_files(dir: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| is_supported_file(entry.path()))
        .map(|entry| entry.into_path())
        .collect();

    paths.sort();
    paths
}
