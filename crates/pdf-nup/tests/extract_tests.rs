mod common;

use common::{ink, page, pbm, ppm, ppm16, stream};
use pdf_nup::*;

fn config(slots: usize) -> ExtractConfig {
    ExtractConfig {
        slots,
        percentile: PercentileWindow::default(),
        mode: RasterMode::Bilevel,
    }
}

#[test]
fn test_tight_box_without_trim() {
    let data = page(&[ink(100, 500, 50, 700)]);
    let boxes = extract_boxes(&data[..], &config(1)).unwrap();
    assert_eq!(boxes, vec![BoundingBox::new(100, 500, 50, 700)]);
}

#[test]
fn test_blank_page_is_empty() {
    let data = stream(&[page(&[]), page(&[ink(10, 20, 10, 20)])]);
    let boxes = extract_boxes(&data[..], &config(2)).unwrap();
    assert_eq!(boxes[0], BoundingBox::EMPTY);
    assert!(boxes[0].is_empty());
    assert_eq!(boxes[1], BoundingBox::new(10, 20, 10, 20));
}

#[test]
fn test_empty_stream_gives_empty_boxes() {
    let boxes = extract_boxes(&b""[..], &config(3)).unwrap();
    assert_eq!(boxes, vec![BoundingBox::EMPTY; 3]);
}

#[test]
fn test_pages_accumulate_by_slot() {
    // pages 1 and 3 share slot 0, page 2 goes to slot 1
    let data = stream(&[
        page(&[ink(100, 200, 100, 200)]),
        page(&[ink(400, 450, 400, 450)]),
        page(&[ink(300, 350, 50, 150)]),
    ]);
    let boxes = extract_boxes(&data[..], &config(2)).unwrap();
    assert_eq!(boxes[0], BoundingBox::new(100, 350, 50, 200));
    assert_eq!(boxes[1], BoundingBox::new(400, 450, 400, 450));
}

#[test]
fn test_trim_is_non_expanding() {
    let data = page(&[
        ink(200, 600, 200, 700),
        // stray marks near the edges
        ink(5, 7, 400, 402),
        ink(990, 995, 20, 22),
    ]);
    let mut previous = extract_boxes(&data[..], &config(1)).unwrap()[0];
    assert_eq!(previous, BoundingBox::new(5, 995, 20, 700));

    for percent in ["0.5", "1", "5", "20"] {
        let fudge: FudgeSpec = percent.parse().unwrap();
        let extract = ExtractConfig {
            percentile: PercentileWindow::default().with_fudge(&fudge),
            ..config(1)
        };
        let trimmed = extract_boxes(&data[..], &extract).unwrap()[0];
        assert!(trimmed.x0 >= previous.x0, "{}: {:?}", percent, trimmed);
        assert!(trimmed.x1 <= previous.x1, "{}: {:?}", percent, trimmed);
        assert!(trimmed.y0 >= previous.y0, "{}: {:?}", percent, trimmed);
        assert!(trimmed.y1 <= previous.y1, "{}: {:?}", percent, trimmed);
        previous = trimmed;
    }
}

#[test]
fn test_trim_discards_stray_marks() {
    let data = page(&[
        ink(200, 600, 200, 700),
        ink(5, 7, 400, 402),
        ink(990, 995, 400, 402),
    ]);
    let fudge: FudgeSpec = "0.1".parse().unwrap();
    let extract = ExtractConfig {
        percentile: PercentileWindow::default().with_fudge(&fudge),
        ..config(1)
    };
    let trimmed = extract_boxes(&data[..], &extract).unwrap()[0];
    assert_eq!(trimmed, BoundingBox::new(200, 600, 200, 700));
}

#[test]
fn test_single_edge_trim() {
    let data = page(&[ink(200, 600, 200, 700), ink(990, 995, 400, 405)]);
    let fudge: FudgeSpec = "r0.1".parse().unwrap();
    let extract = ExtractConfig {
        percentile: PercentileWindow::default().with_fudge(&fudge),
        ..config(1)
    };
    let trimmed = extract_boxes(&data[..], &extract).unwrap()[0];
    assert_eq!(trimmed, BoundingBox::new(200, 600, 200, 700));
}

#[test]
fn test_top_anchored_content_is_shifted() {
    let data = stream(&[
        page(&[ink(100, 500, 860, 1000)]),
        page(&[ink(50, 60, 900, 950)]),
    ]);
    let boxes = extract_boxes(&data[..], &config(2)).unwrap();
    assert_eq!(boxes[0], BoundingBox::new(100, 500, 860 - 216, 1000 - 216));
    assert_eq!(boxes[1], BoundingBox::new(50, 60, 900 - 216, 950 - 216));
}

#[test]
fn test_no_shift_when_ink_reaches_low_rows() {
    // the second slot has ink below row 166, so nothing moves
    let data = stream(&[
        page(&[ink(100, 500, 860, 1000)]),
        page(&[ink(50, 60, 100, 950)]),
    ]);
    let boxes = extract_boxes(&data[..], &config(2)).unwrap();
    assert_eq!(boxes[0], BoundingBox::new(100, 500, 860, 1000));
    assert_eq!(boxes[1], BoundingBox::new(50, 60, 100, 950));
}

#[test]
fn test_shift_leaves_empty_slots_alone() {
    let data = stream(&[page(&[ink(100, 500, 860, 1000)]), page(&[])]);
    let boxes = extract_boxes(&data[..], &config(2)).unwrap();
    assert_eq!(boxes[0].y0, 644);
    assert_eq!(boxes[1], BoundingBox::EMPTY);
}

#[test]
fn test_pixels_outside_working_raster_dropped() {
    let data = pbm(1100, 20, &[ink(1050, 1060, 0, 20)]);
    let boxes = extract_boxes(&data[..], &config(1)).unwrap();
    assert_eq!(boxes[0], BoundingBox::EMPTY);
}

#[test]
fn test_odd_width_rows_are_padded() {
    let data = stream(&[pbm(13, 4, &[ink(12, 13, 0, 1)]), pbm(13, 4, &[ink(0, 1, 3, 4)])]);
    let boxes = extract_boxes(&data[..], &config(1)).unwrap();
    assert_eq!(boxes[0], BoundingBox::new(0, 13, 0, 4));
}

#[test]
fn test_color_mode() {
    let data = stream(&[ppm(40, 30, &[ink(10, 20, 5, 15)])]);
    let extract = ExtractConfig {
        mode: RasterMode::Color,
        ..config(1)
    };
    let boxes = extract_boxes(&data[..], &extract).unwrap();
    assert_eq!(boxes[0], BoundingBox::new(10, 20, 5, 15));
}

#[test]
fn test_color_mode_sixteen_bit_samples() {
    let data = stream(&[ppm16(40, 30, &[ink(10, 20, 5, 15)]), ppm16(40, 30, &[])]);
    let extract = ExtractConfig {
        mode: RasterMode::Color,
        ..config(1)
    };
    let boxes = extract_boxes(&data[..], &extract).unwrap();
    assert_eq!(boxes[0], BoundingBox::new(10, 20, 5, 15));
}

#[test]
fn test_truncated_stream() {
    let mut data = page(&[ink(0, 10, 0, 10)]);
    data.truncate(data.len() - 100);
    assert!(matches!(
        extract_boxes(&data[..], &config(1)),
        Err(NupError::UnexpectedEof)
    ));
}

#[test]
fn test_malformed_header() {
    assert!(matches!(
        extract_boxes(&b"GIF89a"[..], &config(1)),
        Err(NupError::Format(_))
    ));

    // a color image where bilevel is expected
    let data = ppm(2, 2, &[]);
    assert!(matches!(
        extract_boxes(&data[..], &config(1)),
        Err(NupError::Format(_))
    ));
}

#[test]
fn test_error_messages() {
    assert_eq!(
        NupError::UnexpectedEof.to_string(),
        "Unexpected end of file from renderer"
    );
    assert_eq!(NupError::OutOfMemory.to_string(), "Out of memory");
}
