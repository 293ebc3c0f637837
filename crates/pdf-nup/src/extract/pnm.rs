//! Reader for a stream of concatenated raw PBM (`P4`) or PPM (`P6`) images

use std::io::{self, BufRead, BufReader, Read};

use super::histogram::SlotHistograms;
use crate::types::{NupError, RasterMode, Result};

/// Header of one image in the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RasterHeader {
    pub width: usize,
    pub height: usize,
    /// Bytes per pixel for color images; unused for bilevel ones
    pub bytes_per_pixel: usize,
}

pub(crate) struct RasterReader<R> {
    inner: BufReader<R>,
    row: Vec<u8>,
}

impl<R: Read> RasterReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner: BufReader::new(inner),
            row: Vec::new(),
        }
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        let byte = self.inner.fill_buf()?.first().copied();
        if byte.is_some() {
            self.inner.consume(1);
        }
        Ok(byte)
    }

    /// Skip a `#` comment through the end of its line.
    ///
    /// Returns the byte that ended it, `None` at end of stream.
    fn skip_comment(&mut self) -> Result<Option<u8>> {
        loop {
            match self.next_byte()? {
                Some(b'\n') => return Ok(Some(b'\n')),
                Some(_) => {}
                None => return Ok(None),
            }
        }
    }

    /// Read a non-negative decimal number.
    ///
    /// Anything before the first digit is skipped, comments included. The
    /// byte following the number is consumed. `None` means the stream ended
    /// before a digit was found.
    fn read_number(&mut self) -> Result<Option<usize>> {
        let first = loop {
            let mut c = self.next_byte()?;
            if c == Some(b'#') {
                c = self.skip_comment()?;
            }
            match c {
                None => return Ok(None),
                Some(d) if d.is_ascii_digit() => break d,
                Some(_) => {}
            }
        };

        let mut value = usize::from(first - b'0');
        loop {
            let mut c = self.next_byte()?;
            if c == Some(b'#') {
                c = self.skip_comment()?;
            }
            match c {
                Some(d) if d.is_ascii_digit() => {
                    value = value
                        .checked_mul(10)
                        .and_then(|v| v.checked_add(usize::from(d - b'0')))
                        .ok_or_else(|| NupError::Format("number too large".to_string()))?;
                }
                _ => return Ok(Some(value)),
            }
        }
    }

    /// Read the next image header, or `None` at a clean end of stream.
    pub fn next_header(&mut self, mode: RasterMode) -> Result<Option<RasterHeader>> {
        let expected = match mode {
            RasterMode::Bilevel => b'4',
            RasterMode::Color => b'6',
        };

        match self.next_byte()? {
            None => return Ok(None),
            Some(b'P') => {}
            Some(other) => {
                return Err(NupError::Format(format!(
                    "expected image magic, found byte 0x{:02x}",
                    other
                )));
            }
        }
        if self.next_byte()? != Some(expected) {
            return Err(NupError::Format(format!(
                "expected P{} image",
                char::from(expected)
            )));
        }

        let width = self
            .read_number()?
            .ok_or_else(|| NupError::Format("missing image width".to_string()))?;
        let height = self
            .read_number()?
            .ok_or_else(|| NupError::Format("missing image height".to_string()))?;

        let bytes_per_pixel = match mode {
            RasterMode::Bilevel => 0,
            RasterMode::Color => {
                let maxval = self
                    .read_number()?
                    .ok_or_else(|| NupError::Format("missing maximum sample value".to_string()))?;
                if !(1..65536).contains(&maxval) {
                    return Err(NupError::Format(format!(
                        "invalid maximum sample value {}",
                        maxval
                    )));
                }
                if maxval >= 256 { 6 } else { 3 }
            }
        };

        Ok(Some(RasterHeader {
            width,
            height,
            bytes_per_pixel,
        }))
    }

    fn read_row(&mut self, len: usize) -> Result<()> {
        if self.row.len() != len {
            self.row.clear();
            self.row
                .try_reserve_exact(len)
                .map_err(|_| NupError::OutOfMemory)?;
            self.row.resize(len, 0);
        }
        self.inner.read_exact(&mut self.row).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                NupError::UnexpectedEof
            } else {
                NupError::Io(e)
            }
        })
    }

    /// Read the pixels of a bilevel image into `slot`'s histograms.
    pub fn read_bilevel(
        &mut self,
        header: &RasterHeader,
        slot: usize,
        histograms: &mut SlotHistograms,
    ) -> Result<()> {
        // A zero-width row still occupies one byte.
        let bytes_per_row = 1 + header.width.saturating_sub(1) / 8;

        // Stream rows run top to bottom; y counts up from the bottom.
        for y in (0..header.height).rev() {
            self.read_row(bytes_per_row)?;
            for (i, &byte) in self.row.iter().enumerate() {
                if byte == 0 {
                    continue;
                }
                for bit in 0..8 {
                    if byte & (0x80 >> bit) != 0 {
                        histograms.record(slot, 8 * i + bit, y);
                    }
                }
            }
        }
        Ok(())
    }

    /// Read the pixels of a color image into `slot`'s histograms.
    ///
    /// The first pixel is the background sample; every pixel that differs
    /// from it is ink.
    pub fn read_color(
        &mut self,
        header: &RasterHeader,
        slot: usize,
        histograms: &mut SlotHistograms,
    ) -> Result<()> {
        let bpp = header.bytes_per_pixel;
        let row_len = header
            .width
            .checked_mul(bpp)
            .ok_or(NupError::OutOfMemory)?;
        let mut background: Option<[u8; 6]> = None;

        for y in (0..header.height).rev() {
            self.read_row(row_len)?;
            for (x, pixel) in self.row.chunks_exact(bpp).enumerate() {
                let Some(bg) = background else {
                    let mut sample = [0u8; 6];
                    sample[..bpp].copy_from_slice(pixel);
                    background = Some(sample);
                    continue;
                };
                if pixel != &bg[..bpp] {
                    histograms.record(slot, x, y);
                }
            }
        }
        Ok(())
    }
}
