use alloc::vec::Vec;
use enough::Stop;
use imgref::{ImgRef, ImgVec};
use rgb::RGBA8;

use crate::error::TgaError;
use crate::info::TgaInfo;
use crate::limits::Limits;

/// Decoded image: RGBA8 pixels, row-major, top-left origin.
#[derive(Clone, Debug)]
pub struct DecodeOutput {
    image: ImgVec<RGBA8>,
    pub width: u32,
    pub height: u32,
    /// Header metadata of the source file.
    pub info: TgaInfo,
}

impl DecodeOutput {
    pub(crate) fn new(image: ImgVec<RGBA8>, info: TgaInfo) -> Self {
        Self {
            width: image.width() as u32,
            height: image.height() as u32,
            image,
            info,
        }
    }

    /// Access the pixel data.
    pub fn pixels(&self) -> &[RGBA8] {
        self.image.buf()
    }

    /// Borrow as an [`imgref::ImgRef`].
    pub fn image(&self) -> ImgRef<'_, RGBA8> {
        self.image.as_ref()
    }

    /// Take ownership of the pixel buffer.
    pub fn into_image(self) -> ImgVec<RGBA8> {
        self.image
    }

    /// Take ownership of the raw pixel vector.
    pub fn into_pixels(self) -> Vec<RGBA8> {
        self.image.into_buf()
    }
}

/// Builder for decoding TGA data.
///
/// ```no_run
/// use zentga::{DecodeRequest, Limits, Unstoppable};
///
/// let data: &[u8] = &[]; // your TGA bytes
/// let limits = Limits { max_pixels: Some(1 << 24), ..Default::default() };
/// let decoded = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// println!("{}x{} {:?}", decoded.width, decoded.height, decoded.info.format);
/// # Ok::<(), zentga::TgaError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Reject images whose dimensions or buffer size exceed `limits`.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<DecodeOutput, TgaError> {
        crate::tga::decode(self.data, self.limits, &stop)
    }
}
