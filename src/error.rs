use alloc::string::String;
use enough::StopReason;

/// Errors from TGA decoding, flattening, and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TgaError {
    /// Input missing or unreadable, or output unwritable.
    #[cfg(feature = "std")]
    #[error("{}: {source}", .path.display())]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed TGA: {0}")]
    Format(#[from] FormatError),

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for TgaError {
    fn from(r: StopReason) -> Self {
        TgaError::Cancelled(r)
    }
}

/// Structural problems in TGA data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FormatError {
    #[error("truncated header: need 18 bytes, got {len}")]
    TruncatedHeader { len: usize },

    #[error("truncated image ID field: declared {declared} bytes, {available} available")]
    TruncatedImageId { declared: usize, available: usize },

    #[error("truncated color map: need {needed} bytes, {available} available")]
    TruncatedColorMap { needed: usize, available: usize },

    #[error("truncated pixel data at offset {offset}: decoded {decoded} of {expected} pixels")]
    TruncatedPixelData {
        offset: usize,
        decoded: usize,
        expected: usize,
    },

    #[error("unsupported image type {0}")]
    UnsupportedImageType(u8),

    #[error("unsupported pixel depth {depth} for image type {image_type}")]
    UnsupportedPixelDepth { image_type: u8, depth: u8 },

    #[error("unsupported color map type {0}")]
    UnsupportedColorMapType(u8),

    #[error("unsupported color map entry size {0}")]
    UnsupportedColorMapDepth(u8),

    #[error("color-mapped image has no color map")]
    MissingColorMap,

    #[error("color map index {index} outside entries {first_entry}..{first_entry}+{length}")]
    ColorMapIndexOutOfRange {
        index: u16,
        first_entry: u16,
        length: u16,
    },

    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("dimensions {width}x{height} exceed the 16-bit TGA header fields")]
    DimensionOverflow { width: usize, height: usize },
}
