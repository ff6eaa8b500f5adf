//! # zentga
//!
//! Normalizes any TGA (Truevision Targa) image to an uncompressed 24-bit RGB
//! TGA, flattening alpha onto an opaque background. The output is the subset
//! strict decoders (embedded and `no_std` readers in particular) accept.
//!
//! ## Pipeline
//!
//! 1. [`decode`] parses the file into RGBA8 pixels, top-left origin.
//! 2. [`flatten`] composites them over a background color (white by default).
//! 3. [`encode_rgb24`] writes an uncompressed 24-bit TGA with a top-left origin.
//!
//! [`convert`] runs all three on bytes; [`convert_file`] does the same on paths
//! (`std` feature).
//!
//! ## Supported input
//!
//! - Color-mapped (types 1/9): 8- or 16-bit indices, 15/16/24/32-bit palette entries
//! - Truecolor (types 2/10): 15, 16 (5-5-5-1), 24, and 32 bits per pixel
//! - Grayscale (types 3/11): 8-bit luma, 16-bit luma + alpha
//! - Raw or RLE, any origin corner
//!
//! ## Non-Goals
//!
//! - Preserving the TGA 2.0 extension area or footer (ignored on read)
//! - Writing RLE or any output format other than 24-bit truecolor
//! - Color management beyond direct alpha compositing
//!
//! ## Usage
//!
//! ```no_run
//! use zentga::{ConvertOptions, TgaInfo, Unstoppable};
//!
//! let data: &[u8] = &[]; // your TGA bytes
//!
//! // Probe without decoding
//! let info = TgaInfo::from_bytes(data)?;
//! println!("{}x{} {:?}", info.width, info.height, info.format);
//!
//! // Decode → flatten → encode
//! let decoded = zentga::decode(data, Unstoppable)?;
//! let flat = zentga::flatten(decoded.image(), zentga::WHITE);
//! let tga = zentga::encode_rgb24(flat.as_ref(), Unstoppable)?;
//!
//! // Or in one step
//! let same = zentga::convert(data, &ConvertOptions::default(), Unstoppable)?;
//! assert_eq!(tga, same);
//! # Ok::<(), zentga::TgaError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod convert;
mod decode;
mod error;
mod flatten;
mod info;
mod limits;
mod pixel;
mod tga;

use alloc::vec::Vec;

// Re-exports
pub use convert::{ConvertOptions, convert};
#[cfg(feature = "std")]
pub use convert::convert_file;
pub use decode::{DecodeOutput, DecodeRequest};
pub use enough::{Stop, Unstoppable};
pub use error::{FormatError, TgaError};
pub use flatten::{WHITE, flatten};
pub use imgref::{ImgRef, ImgVec};
pub use info::TgaInfo;
pub use limits::Limits;
pub use pixel::PixelFormat;
pub use rgb::{RGB8, RGBA8};
pub use tga::header::{ColorKind, ColorMapSpec, ImageType, Origin, TgaHeader};

/// Decode TGA bytes to RGBA8, top-left origin.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<DecodeOutput, TgaError> {
    DecodeRequest::new(data).decode(stop)
}

/// Encode RGB8 pixels as an uncompressed 24-bit, top-left-origin TGA.
///
/// Fails with [`FormatError::DimensionOverflow`] if either dimension exceeds 65535.
pub fn encode_rgb24(image: ImgRef<'_, RGB8>, stop: impl Stop) -> Result<Vec<u8>, TgaError> {
    tga::encode(image, &stop)
}
