//! TGA (Truevision Targa) decoder and 24-bit encoder (internal).
//!
//! Decodes color-mapped, grayscale, and 15/16/24/32-bit truecolor images,
//! raw or RLE, from any origin corner. Encodes only uncompressed 24-bit
//! truecolor with a top-left origin. The extension area and footer are
//! ignored on decode and never written.

mod colormap;
mod decode;
mod encode;
pub(crate) mod header;
mod rle;
mod unpack;

use crate::decode::DecodeOutput;
use crate::error::TgaError;
use crate::info::TgaInfo;
use crate::limits::Limits;
use alloc::vec::Vec;
use enough::Stop;
use imgref::{ImgRef, ImgVec};
use rgb::RGB8;

/// Probe header for TgaInfo without decoding pixels.
pub(crate) fn probe_header(data: &[u8]) -> Result<TgaInfo, TgaError> {
    let (header, format) = decode::parse_header(data)?;
    TgaInfo::from_header(&header, format)
}

/// Decode TGA data to RGBA8, top-left origin.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodeOutput, TgaError> {
    let decoded = decode::decode_tga(data, limits, stop)?;
    let info = TgaInfo::from_header(&decoded.header, decoded.format)?;
    let image = ImgVec::new(
        decoded.pixels,
        usize::from(decoded.header.width),
        usize::from(decoded.header.height),
    );
    Ok(DecodeOutput::new(image, info))
}

/// Encode RGB8 pixels as uncompressed 24-bit TGA.
pub(crate) fn encode(image: ImgRef<'_, RGB8>, stop: &dyn Stop) -> Result<Vec<u8>, TgaError> {
    encode::encode_rgb24(image, stop)
}
