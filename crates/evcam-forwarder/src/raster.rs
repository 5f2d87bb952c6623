//! Polarity rasterization.
//!
//! A differential visualization rather than a grayscale render: white
//! background with saturated red/blue marks is cheap to build and easy to
//! read at full frame rate.

use evcam_sensor::{RawEvent, SENSOR_COLS, SENSOR_ROWS};
use image::{Rgb, RgbImage};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const RED: Rgb<u8> = Rgb([255, 0, 0]);
const BLUE: Rgb<u8> = Rgb([0, 0, 255]);

/// Rasterize one event generation into a full-frame RGB8 image.
///
/// The output row is flipped (`height - 1 - row`) to convert from the
/// sensor's coordinate convention to image convention. Positive polarity
/// paints red, negative blue; neutral events leave the background white.
pub fn rasterize_polarity(events: &[RawEvent]) -> RgbImage {
    let mut img = RgbImage::from_pixel(SENSOR_COLS, SENSOR_ROWS, WHITE);

    for ev in events {
        let (row, col) = (u32::from(ev.row), u32::from(ev.col));
        // Readout glitches can carry out-of-range coordinates; skip them.
        if row >= SENSOR_ROWS || col >= SENSOR_COLS {
            continue;
        }
        let out_row = SENSOR_ROWS - 1 - row;
        match ev.polarity {
            1 => img.put_pixel(col, out_row, RED),
            -1 => img.put_pixel(col, out_row, BLUE),
            _ => {}
        }
    }
    img
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(row: u16, col: u16, polarity: i8) -> RawEvent {
        RawEvent {
            row,
            col,
            polarity,
            ..RawEvent::default()
        }
    }

    #[test]
    fn empty_generation_is_all_white() {
        let img = rasterize_polarity(&[]);
        assert_eq!(img.dimensions(), (SENSOR_COLS, SENSOR_ROWS));
        assert!(img.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn polarity_paints_flipped_rows() {
        let img = rasterize_polarity(&[event(0, 5, 1), event(10, 6, -1), event(20, 7, 0)]);

        assert_eq!(*img.get_pixel(5, SENSOR_ROWS - 1), RED);
        assert_eq!(*img.get_pixel(6, SENSOR_ROWS - 1 - 10), BLUE);
        // Neutral polarity leaves the background untouched.
        assert_eq!(*img.get_pixel(7, SENSOR_ROWS - 1 - 20), WHITE);
    }

    #[test]
    fn out_of_range_events_are_skipped() {
        let img = rasterize_polarity(&[event(u16::MAX, 0, 1), event(0, u16::MAX, -1)]);
        assert!(img.pixels().all(|p| *p == WHITE));
    }
}
