/// Source pixel encoding, resolved once per image from the header.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Color-mapped: 8- or 16-bit indices into a color map.
    /// `alpha` is set when the color map entries are 32-bit.
    Indexed { index_bits: u8, alpha: bool },
    /// 8-bit luma, or 16-bit luma + alpha.
    Grayscale { alpha: bool },
    /// 5-5-5-1 packed BGR(A), little endian. Covers both 15- and 16-bit
    /// headers, which store two bytes per pixel either way; the declared
    /// depth is in [`TgaInfo::pixel_depth`](crate::TgaInfo::pixel_depth).
    /// `alpha` is set when the descriptor declares an attribute bit.
    TrueColor16 { alpha: bool },
    /// B, G, R bytes.
    TrueColor24,
    /// B, G, R, A bytes.
    TrueColor32,
}

impl PixelFormat {
    /// Bits per stored pixel: 16 for 15-bit truecolor.
    pub fn bits_per_pixel(&self) -> u8 {
        match self {
            Self::Indexed { index_bits, .. } => *index_bits,
            Self::Grayscale { alpha: false } => 8,
            Self::Grayscale { alpha: true } => 16,
            Self::TrueColor16 { .. } => 16,
            Self::TrueColor24 => 24,
            Self::TrueColor32 => 32,
        }
    }

    /// Bytes per stored pixel.
    pub fn bytes_per_pixel(&self) -> usize {
        usize::from(self.bits_per_pixel()).div_ceil(8)
    }

    /// Whether decoded pixels can carry alpha below 255.
    pub fn has_alpha(&self) -> bool {
        match self {
            Self::Indexed { alpha, .. }
            | Self::Grayscale { alpha }
            | Self::TrueColor16 { alpha } => *alpha,
            Self::TrueColor24 => false,
            Self::TrueColor32 => true,
        }
    }
}

/// Expand a 5-bit channel to 8 bits by replicating the high bits.
#[inline]
pub(crate) fn expand5(c: u16) -> u8 {
    let c = (c & 0x1f) as u8;
    (c << 3) | (c >> 2)
}

/// Unpack a little-endian 5-5-5 BGR word into `(r, g, b)`.
#[inline]
pub(crate) fn unpack_bgr555(v: u16) -> (u8, u8, u8) {
    (expand5(v >> 10), expand5(v >> 5), expand5(v))
}
