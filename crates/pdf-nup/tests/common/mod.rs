//! Raster stream builders shared by the integration tests

#![allow(dead_code)]

/// Inked rectangle in raster coordinates, `y` counted up from the bottom.
/// Upper bounds are exclusive.
#[derive(Debug, Clone, Copy)]
pub struct Ink {
    pub x0: usize,
    pub x1: usize,
    pub y0: usize,
    pub y1: usize,
}

pub fn ink(x0: usize, x1: usize, y0: usize, y1: usize) -> Ink {
    Ink { x0, x1, y0, y1 }
}

fn inked(rects: &[Ink], x: usize, y: usize) -> bool {
    rects
        .iter()
        .any(|r| (r.x0..r.x1).contains(&x) && (r.y0..r.y1).contains(&y))
}

/// One raw PBM image with the given rectangles set.
pub fn pbm(width: usize, height: usize, rects: &[Ink]) -> Vec<u8> {
    let mut out = format!("P4\n# test page\n{} {}\n", width, height).into_bytes();
    let bytes_per_row = width.div_ceil(8);
    for row in 0..height {
        let y = height - 1 - row;
        let mut line = vec![0u8; bytes_per_row];
        for x in 0..width {
            if inked(rects, x, y) {
                line[x / 8] |= 0x80 >> (x % 8);
            }
        }
        out.extend_from_slice(&line);
    }
    out
}

/// One raw PPM image (maxval 255) on a white background, rectangles in red.
pub fn ppm(width: usize, height: usize, rects: &[Ink]) -> Vec<u8> {
    let mut out = format!("P6 {} {} 255\n", width, height).into_bytes();
    for row in 0..height {
        let y = height - 1 - row;
        for x in 0..width {
            if inked(rects, x, y) {
                out.extend_from_slice(&[255, 0, 0]);
            } else {
                out.extend_from_slice(&[255, 255, 255]);
            }
        }
    }
    out
}

/// One raw 16-bit PPM image (maxval 65535) on a white background. Ink
/// differs from the background only in the low byte of the green sample.
pub fn ppm16(width: usize, height: usize, rects: &[Ink]) -> Vec<u8> {
    let mut out = format!("P6 {} {} 65535\n", width, height).into_bytes();
    for row in 0..height {
        let y = height - 1 - row;
        for x in 0..width {
            if inked(rects, x, y) {
                out.extend_from_slice(&[0xff, 0xff, 0xff, 0xfe, 0xff, 0xff]);
            } else {
                out.extend_from_slice(&[0xff; 6]);
            }
        }
    }
    out
}

/// Concatenate images into one stream.
pub fn stream(pages: &[Vec<u8>]) -> Vec<u8> {
    pages.concat()
}

/// Full working-raster page with the given rectangles set.
pub fn page(rects: &[Ink]) -> Vec<u8> {
    pbm(1008, 1008, rects)
}
