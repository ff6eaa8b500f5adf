use crate::error::TgaError;
use crate::pixel::PixelFormat;
use crate::tga::header::{Origin, TgaHeader};

/// Image metadata read from the header, without decoding pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TgaInfo {
    pub width: u32,
    pub height: u32,
    /// Raw image-type byte (1-3 raw, 9-11 RLE).
    pub image_type: u8,
    pub format: PixelFormat,
    /// Pixel depth as declared in the header (15 for 15-bit truecolor).
    pub pixel_depth: u8,
    /// Pixel data is run-length encoded.
    pub compressed: bool,
    /// Corner of the first stored pixel.
    pub origin: Origin,
    pub has_color_map: bool,
}

impl TgaInfo {
    /// Parse and validate the header of a TGA file.
    pub fn from_bytes(data: &[u8]) -> Result<Self, TgaError> {
        crate::tga::probe_header(data)
    }

    pub(crate) fn from_header(header: &TgaHeader, format: PixelFormat) -> Result<Self, TgaError> {
        Ok(Self {
            width: u32::from(header.width),
            height: u32::from(header.height),
            image_type: header.image_type,
            format,
            pixel_depth: header.pixel_depth,
            compressed: header.kind()?.rle,
            origin: header.origin(),
            has_color_map: header.has_color_map()?,
        })
    }
}
