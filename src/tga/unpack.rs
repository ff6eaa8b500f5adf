//! Per-format stored-pixel → RGBA8 conversion.
//!
//! Each [`PixelFormat`](crate::PixelFormat) maps to one `Unpack` type, picked
//! once per image so the pixel loops are monomorphized.

use rgb::RGBA8;

use super::colormap::ColorMap;
use crate::error::FormatError;
use crate::pixel::unpack_bgr555;

pub(crate) trait Unpack {
    /// Stored bytes per pixel.
    const BYTES: usize;

    /// Convert one stored pixel. `src.len() == Self::BYTES`.
    fn unpack(&self, src: &[u8]) -> Result<RGBA8, FormatError>;
}

pub(crate) struct Gray8;

impl Unpack for Gray8 {
    const BYTES: usize = 1;

    #[inline]
    fn unpack(&self, src: &[u8]) -> Result<RGBA8, FormatError> {
        Ok(RGBA8::new(src[0], src[0], src[0], 255))
    }
}

/// Luma byte followed by alpha byte.
pub(crate) struct GrayAlpha8;

impl Unpack for GrayAlpha8 {
    const BYTES: usize = 2;

    #[inline]
    fn unpack(&self, src: &[u8]) -> Result<RGBA8, FormatError> {
        Ok(RGBA8::new(src[0], src[0], src[0], src[1]))
    }
}

pub(crate) struct Bgr555 {
    pub alpha: bool,
}

impl Unpack for Bgr555 {
    const BYTES: usize = 2;

    #[inline]
    fn unpack(&self, src: &[u8]) -> Result<RGBA8, FormatError> {
        let v = u16::from_le_bytes([src[0], src[1]]);
        let (r, g, b) = unpack_bgr555(v);
        let a = if !self.alpha || v & 0x8000 != 0 { 255 } else { 0 };
        Ok(RGBA8::new(r, g, b, a))
    }
}

pub(crate) struct Bgr24;

impl Unpack for Bgr24 {
    const BYTES: usize = 3;

    #[inline]
    fn unpack(&self, src: &[u8]) -> Result<RGBA8, FormatError> {
        Ok(RGBA8::new(src[2], src[1], src[0], 255))
    }
}

pub(crate) struct Bgra32;

impl Unpack for Bgra32 {
    const BYTES: usize = 4;

    #[inline]
    fn unpack(&self, src: &[u8]) -> Result<RGBA8, FormatError> {
        Ok(RGBA8::new(src[2], src[1], src[0], src[3]))
    }
}

pub(crate) struct Indexed8<'a>(pub &'a ColorMap);

impl Unpack for Indexed8<'_> {
    const BYTES: usize = 1;

    #[inline]
    fn unpack(&self, src: &[u8]) -> Result<RGBA8, FormatError> {
        self.0.get(u16::from(src[0]))
    }
}

pub(crate) struct Indexed16<'a>(pub &'a ColorMap);

impl Unpack for Indexed16<'_> {
    const BYTES: usize = 2;

    #[inline]
    fn unpack(&self, src: &[u8]) -> Result<RGBA8, FormatError> {
        self.0.get(u16::from_le_bytes([src[0], src[1]]))
    }
}
