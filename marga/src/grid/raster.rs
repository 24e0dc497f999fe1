//! Binary grayscale raster header.
//!
//! Layout:
//! - Line 1: magic token (`P5` is the only supported variant)
//! - Line 2: comment line, ignored whatever its content
//! - Line 3: `width height`
//! - Line 4: `max_val`
//! - Payload: `width * height` bytes, one sample per pixel, row-major, top row first
//!
//! [`RasterHeader::parse`] only splits the file; whether the declared format
//! is supported is decided by the decoder.

use std::io::Write;
use std::str::FromStr;

use super::error::DecodeError;

/// Magic token of single-channel 8-bit binary rasters
pub const BINARY_GRAY_MAGIC: &str = "P5";

/// Number of header lines before the payload
const HEADER_LINES: usize = 4;

/// Parsed header of a raster file
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterHeader {
    /// Magic token from line 1
    pub magic: String,
    /// Raster width in pixels
    pub width: usize,
    /// Raster height in pixels
    pub height: usize,
    /// Maximum sample value
    pub max_val: u32,
}

impl RasterHeader {
    /// Split raw file bytes into the header and the sample payload.
    pub fn parse(bytes: &[u8]) -> Result<(RasterHeader, &[u8]), DecodeError> {
        let mut lines: Vec<&[u8]> = Vec::with_capacity(HEADER_LINES);
        let mut rest = bytes;

        while lines.len() < HEADER_LINES {
            let Some(end) = rest.iter().position(|&b| b == b'\n') else {
                return Err(DecodeError::Format(format!(
                    "truncated header: expected {} lines, found {}",
                    HEADER_LINES,
                    lines.len()
                )));
            };
            lines.push(&rest[..end]);
            rest = &rest[end + 1..];
        }

        let magic = header_text(lines[0])?.to_string();

        let dims = header_text(lines[2])?;
        let mut parts = dims.split_whitespace();
        let (width, height): (usize, usize) = match (parts.next(), parts.next(), parts.next()) {
            (Some(w), Some(h), None) => (parse_number(w, "width")?, parse_number(h, "height")?),
            _ => {
                return Err(DecodeError::Format(format!(
                    "expected 'width height', found '{}'",
                    dims
                )));
            }
        };

        let max_val: u32 = parse_number(header_text(lines[3])?, "max_val")?;

        if width == 0 || height == 0 {
            return Err(DecodeError::Format(format!(
                "raster dimensions must be positive, found {}x{}",
                width, height
            )));
        }
        if width.checked_mul(height).is_none() {
            return Err(DecodeError::Format(format!(
                "raster dimensions {}x{} are too large",
                width, height
            )));
        }

        let header = RasterHeader {
            magic,
            width,
            height,
            max_val,
        };
        Ok((header, rest))
    }

    /// Number of samples the payload must contain
    #[inline]
    ///
    /// Saturates for dimensions that [`parse`](Self::parse) would reject.
    pub fn sample_count(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Write the header lines (with a comment line) to a writer.
    pub fn write<W: Write>(&self, writer: &mut W, comment: &str) -> std::io::Result<()> {
        writeln!(writer, "{}", self.magic)?;
        writeln!(writer, "# {}", comment)?;
        writeln!(writer, "{} {}", self.width, self.height)?;
        writeln!(writer, "{}", self.max_val)
    }
}

fn header_text(line: &[u8]) -> Result<&str, DecodeError> {
    std::str::from_utf8(line)
        .map(str::trim)
        .map_err(|_| DecodeError::Format("header line is not valid text".to_string()))
}

fn parse_number<T: FromStr>(text: &str, field: &str) -> Result<T, DecodeError> {
    text.trim().parse::<T>().map_err(|_| {
        DecodeError::Format(format!("invalid {} in header: '{}'", field, text.trim()))
    })
}
