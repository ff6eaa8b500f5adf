//! The fixed 18-byte TGA header.

use alloc::vec::Vec;

use crate::error::FormatError;
use crate::pixel::PixelFormat;

/// Color map specification (header bytes 3..8).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColorMapSpec {
    /// Index of the first stored entry.
    pub first_entry: u16,
    /// Number of stored entries.
    pub length: u16,
    /// Bits per entry: 15, 16, 24 or 32.
    pub entry_size: u8,
}

impl ColorMapSpec {
    /// Stored size in bytes.
    pub fn byte_len(&self) -> usize {
        usize::from(self.length) * usize::from(self.entry_size).div_ceil(8)
    }
}

/// Which kind of pixel data an image type carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorKind {
    ColorMapped,
    TrueColor,
    Grayscale,
}

/// Decoded image-type byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageType {
    pub kind: ColorKind,
    pub rle: bool,
}

impl ImageType {
    pub fn from_u8(v: u8) -> Result<Self, FormatError> {
        let kind = match v & !0x08 {
            1 => ColorKind::ColorMapped,
            2 => ColorKind::TrueColor,
            3 => ColorKind::Grayscale,
            _ => return Err(FormatError::UnsupportedImageType(v)),
        };
        Ok(Self {
            kind,
            rle: v & 0x08 != 0,
        })
    }
}

/// Corner where the first stored pixel belongs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    BottomLeft,
    BottomRight,
    TopLeft,
    TopRight,
}

impl Origin {
    pub fn is_bottom(self) -> bool {
        matches!(self, Self::BottomLeft | Self::BottomRight)
    }

    pub fn is_right(self) -> bool {
        matches!(self, Self::BottomRight | Self::TopRight)
    }
}

/// The 18-byte TGA file header, fields as stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TgaHeader {
    pub id_length: u8,
    pub color_map_type: u8,
    pub image_type: u8,
    pub color_map: ColorMapSpec,
    pub x_origin: u16,
    pub y_origin: u16,
    pub width: u16,
    pub height: u16,
    pub pixel_depth: u8,
    /// Bits 0-3: alpha bit count. Bit 4: right-to-left. Bit 5: top-to-bottom.
    pub descriptor: u8,
}

impl TgaHeader {
    pub const SIZE: usize = 18;

    /// Read the header fields. Only the length is checked here.
    pub fn parse(data: &[u8]) -> Result<Self, FormatError> {
        let h: &[u8; Self::SIZE] = data
            .get(..Self::SIZE)
            .and_then(|s| s.try_into().ok())
            .ok_or(FormatError::TruncatedHeader { len: data.len() })?;
        let le = |i: usize| u16::from_le_bytes([h[i], h[i + 1]]);
        Ok(Self {
            id_length: h[0],
            color_map_type: h[1],
            image_type: h[2],
            color_map: ColorMapSpec {
                first_entry: le(3),
                length: le(5),
                entry_size: h[7],
            },
            x_origin: le(8),
            y_origin: le(10),
            width: le(12),
            height: le(14),
            pixel_depth: h[16],
            descriptor: h[17],
        })
    }

    /// Append the 18 header bytes to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.push(self.id_length);
        out.push(self.color_map_type);
        out.push(self.image_type);
        out.extend_from_slice(&self.color_map.first_entry.to_le_bytes());
        out.extend_from_slice(&self.color_map.length.to_le_bytes());
        out.push(self.color_map.entry_size);
        out.extend_from_slice(&self.x_origin.to_le_bytes());
        out.extend_from_slice(&self.y_origin.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.push(self.pixel_depth);
        out.push(self.descriptor);
    }

    pub fn alpha_bits(&self) -> u8 {
        self.descriptor & 0x0f
    }

    pub fn origin(&self) -> Origin {
        match (self.descriptor & 0x20 != 0, self.descriptor & 0x10 != 0) {
            (false, false) => Origin::BottomLeft,
            (false, true) => Origin::BottomRight,
            (true, false) => Origin::TopLeft,
            (true, true) => Origin::TopRight,
        }
    }

    pub fn kind(&self) -> Result<ImageType, FormatError> {
        ImageType::from_u8(self.image_type)
    }

    /// Offset of the color map (just past the image ID field).
    pub fn color_map_offset(&self) -> usize {
        Self::SIZE + usize::from(self.id_length)
    }

    /// Whether a color map is stored, validating the color-map type byte.
    pub fn has_color_map(&self) -> Result<bool, FormatError> {
        match self.color_map_type {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(FormatError::UnsupportedColorMapType(other)),
        }
    }

    /// Offset of the first pixel byte.
    pub fn pixel_data_offset(&self) -> Result<usize, FormatError> {
        let cmap = if self.has_color_map()? {
            self.color_map.byte_len()
        } else {
            0
        };
        Ok(self.color_map_offset() + cmap)
    }

    /// Validate the header and resolve the pixel format.
    pub fn pixel_format(&self) -> Result<PixelFormat, FormatError> {
        let kind = self.kind()?;
        if self.width == 0 || self.height == 0 {
            return Err(FormatError::InvalidDimensions {
                width: usize::from(self.width),
                height: usize::from(self.height),
            });
        }
        let has_map = self.has_color_map()?;
        // Maps on truecolor and grayscale images are skipped unread.
        if has_map
            && kind.kind == ColorKind::ColorMapped
            && !matches!(self.color_map.entry_size, 15 | 16 | 24 | 32)
        {
            return Err(FormatError::UnsupportedColorMapDepth(
                self.color_map.entry_size,
            ));
        }
        let unsupported = FormatError::UnsupportedPixelDepth {
            image_type: self.image_type,
            depth: self.pixel_depth,
        };
        match (kind.kind, self.pixel_depth) {
            (ColorKind::ColorMapped, 8 | 16) => {
                if !has_map {
                    return Err(FormatError::MissingColorMap);
                }
                Ok(PixelFormat::Indexed {
                    index_bits: self.pixel_depth,
                    alpha: self.color_map.entry_size == 32,
                })
            }
            (ColorKind::Grayscale, 8) => Ok(PixelFormat::Grayscale { alpha: false }),
            (ColorKind::Grayscale, 16) => Ok(PixelFormat::Grayscale { alpha: true }),
            (ColorKind::TrueColor, 15) => Ok(PixelFormat::TrueColor16 { alpha: false }),
            (ColorKind::TrueColor, 16) => Ok(PixelFormat::TrueColor16 {
                alpha: self.alpha_bits() > 0,
            }),
            (ColorKind::TrueColor, 24) => Ok(PixelFormat::TrueColor24),
            (ColorKind::TrueColor, 32) => Ok(PixelFormat::TrueColor32),
            _ => Err(unsupported),
        }
    }
}
