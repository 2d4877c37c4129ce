// pixform/src/processors/mod.rs
mod archive;
mod decoder;
mod encoder;
mod resizer;

pub use archive::{package_results, Delivery, DEFAULT_ARCHIVE_NAME};
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use resizer::Resizer;

pub mod prelude {
    pub use super::{package_results, Decoder, Delivery, Encoder, Resizer};
}
