//! The decode → flatten → encode pipeline.

use alloc::vec::Vec;
use enough::Stop;
use rgb::RGB8;

use crate::error::TgaError;
use crate::flatten::{WHITE, flatten};
use crate::limits::Limits;

/// Settings for [`convert`] and [`convert_file`].
#[derive(Clone, Debug)]
pub struct ConvertOptions {
    /// Color that transparent pixels are composited over.
    pub background: RGB8,
    pub limits: Limits,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            background: WHITE,
            limits: Limits::default(),
        }
    }
}

impl ConvertOptions {
    pub fn with_background(mut self, background: RGB8) -> Self {
        self.background = background;
        self
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }
}

/// Normalize any supported TGA to uncompressed 24-bit RGB TGA bytes.
pub fn convert(data: &[u8], options: &ConvertOptions, stop: impl Stop) -> Result<Vec<u8>, TgaError> {
    convert_inner(data, options, &stop).map(|(_, out)| out)
}

fn convert_inner(
    data: &[u8],
    options: &ConvertOptions,
    stop: &dyn Stop,
) -> Result<(crate::TgaInfo, Vec<u8>), TgaError> {
    let decoded = crate::tga::decode(data, Some(&options.limits), stop)?;
    let info = decoded.info;
    let flat = flatten(decoded.image(), options.background);
    drop(decoded);
    let out = crate::tga::encode(flat.as_ref(), stop)?;
    Ok((info, out))
}

/// Convert the TGA at `input` and write the result to `output`.
///
/// A missing input fails before anything is read. The output file is only
/// created once encoding has succeeded, and is removed again if writing it
/// fails. Returns the header info of the source image.
#[cfg(feature = "std")]
pub fn convert_file(
    input: &std::path::Path,
    output: &std::path::Path,
    options: &ConvertOptions,
) -> Result<crate::TgaInfo, TgaError> {
    use std::io::{Error, ErrorKind};

    let io_err = |path: &std::path::Path| {
        let path = path.to_path_buf();
        move |source: Error| TgaError::Io { path, source }
    };

    if !input.is_file() {
        return Err(io_err(input)(Error::new(
            ErrorKind::NotFound,
            "input file not found",
        )));
    }
    let data = std::fs::read(input).map_err(io_err(input))?;

    let (info, encoded) = convert_inner(&data, options, &enough::Unstoppable)?;
    log::info!(
        "original format: {:?}{}, size: {}x{}",
        info.format,
        if info.compressed { " (RLE)" } else { "" },
        info.width,
        info.height
    );

    write_output(output, &encoded).map_err(io_err(output))?;
    log::info!("saved 24-bit RGB TGA to {}", output.display());
    Ok(info)
}

#[cfg(feature = "std")]
fn write_output(path: &std::path::Path, bytes: &[u8]) -> std::io::Result<()> {
    use std::io::Write;

    let mut file = std::fs::File::create(path)?;
    if let Err(e) = file.write_all(bytes).and_then(|()| file.sync_all()) {
        drop(file);
        if let Err(rm) = std::fs::remove_file(path) {
            log::warn!("could not remove partial output {}: {rm}", path.display());
        }
        return Err(e);
    }
    Ok(())
}
