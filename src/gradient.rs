//! Blended mood gradient rendering.
//!
//! Colors are spread as evenly spaced stops across the width and every
//! column is a piecewise-linear blend of its two neighbouring stops. The
//! image is a flat horizontal band: all rows are identical.

use crate::color::Rgb;
use crate::error::{JournalError, Result};
use crate::history::{filter_by_window, MoodEntry, TimeWindow};
use chrono::NaiveDate;
use image::{ImageBuffer, ImageFormat, Rgb as Pixel};
use std::io::Cursor;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 50;

/// Row-major RGB pixel buffer, `height * width * 3` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl GradientImage {
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        let offset = ((y as usize * self.width as usize) + x as usize) * 3;
        Rgb::new(
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
        )
    }

    /// Encode as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let img: ImageBuffer<Pixel<u8>, &[u8]> =
            ImageBuffer::from_raw(self.width, self.height, self.pixels()).ok_or(
                JournalError::InvalidDimensions {
                    width: self.width,
                    height: self.height,
                },
            )?;

        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
        Ok(buf)
    }
}

/// Color of column `i` for `colors` spread across `width` columns.
///
/// `pos = i / width * (N - 1)` never reaches `N - 1` because `i < width`,
/// so the last column only approaches the final stop.
fn blend_column(colors: &[Rgb], i: u32, width: u32) -> Rgb {
    let last = colors.len() - 1;
    let pos = (i as f64 / width as f64) * last as f64;
    let left = (pos.floor() as usize).min(last);
    let right = (left + 1).min(last);
    let ratio = pos - left as f64;

    let (a, b) = (colors[left], colors[right]);
    let mix = |x: u8, y: u8| (1.0 - ratio) * x as f64 + ratio * y as f64;
    Rgb::from_f64_channels(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
}

/// Render `colors` as a `width` x `height` gradient.
pub fn render_gradient(colors: &[Rgb], width: u32, height: u32) -> Result<GradientImage> {
    if colors.is_empty() {
        return Err(JournalError::EmptyRenderInput);
    }
    if width == 0 || height == 0 {
        return Err(JournalError::InvalidDimensions { width, height });
    }

    let row: Vec<u8> = if colors.len() == 1 {
        colors[0].channels().repeat(width as usize)
    } else {
        (0..width)
            .flat_map(|i| blend_column(colors, i, width).channels())
            .collect()
    };

    Ok(GradientImage {
        width,
        height,
        pixels: row.repeat(height as usize),
    })
}

/// Filter `history` to `window` and render what is left.
///
/// Returns `None` when the window holds no entries so the caller can show
/// an empty state instead.
pub fn render_history(
    history: &[MoodEntry],
    window: TimeWindow,
    now: NaiveDate,
    width: u32,
    height: u32,
) -> Result<Option<GradientImage>> {
    let colors: Vec<Rgb> = filter_by_window(history, window, now)
        .iter()
        .map(|entry| entry.color)
        .collect();
    if colors.is_empty() {
        return Ok(None);
    }
    render_gradient(&colors, width, height).map(Some)
}

/// Download file name for a gradient of `window`.
pub fn export_file_name(window: TimeWindow) -> String {
    match window {
        TimeWindow::All => "pixal_gradient.png".to_string(),
        other => format!("pixal_gradient_{}.png", other.label().to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const GREEN: Rgb = Rgb::new(0, 255, 0);

    #[test]
    fn single_color_fills_every_pixel() {
        let c = Rgb::new(0xa3, 0xf0, 0x7c);
        let img = render_gradient(&[c], 37, 5).unwrap();
        assert_eq!(img.pixels().len(), 37 * 5 * 3);
        for y in 0..5 {
            for x in 0..37 {
                assert_eq!(img.pixel(x, y), c);
            }
        }
    }

    #[test]
    fn two_stop_endpoints() {
        let img = render_gradient(&[RED, GREEN], DEFAULT_WIDTH, DEFAULT_HEIGHT).unwrap();
        assert_eq!(img.pixel(0, 0), RED);
        assert_eq!(img.pixel(799, 0), Rgb::new(0, 254, 0));
    }

    #[test]
    fn two_stop_blend_is_monotonic_and_smooth() {
        let img = render_gradient(&[RED, GREEN], DEFAULT_WIDTH, 1).unwrap();
        for x in 1..DEFAULT_WIDTH {
            let prev = img.pixel(x - 1, 0);
            let cur = img.pixel(x, 0);
            assert!(cur.r <= prev.r, "red rose at column {x}");
            assert!(cur.g >= prev.g, "green fell at column {x}");
            assert!(prev.r - cur.r <= 1);
            assert!(cur.g - prev.g <= 1);
            assert_eq!(cur.b, 0);
        }
    }

    #[test]
    fn rows_are_identical() {
        let colors = [RED, Rgb::new(0, 0, 255), GREEN, Rgb::new(10, 20, 30)];
        let img = render_gradient(&colors, 120, 9).unwrap();
        let row_len = 120 * 3;
        let first = &img.pixels()[..row_len];
        for row in img.pixels().chunks(row_len) {
            assert_eq!(row, first);
        }
    }

    #[test]
    fn interior_stops_are_hit_exactly() {
        // With 3 stops over 100 columns, column 50 sits exactly on the middle stop.
        let mid = Rgb::new(0, 0, 255);
        let img = render_gradient(&[RED, mid, GREEN], 100, 1).unwrap();
        assert_eq!(img.pixel(50, 0), mid);
        assert_eq!(img.pixel(25, 0), Rgb::new(127, 0, 127));
    }

    #[test]
    fn more_stops_than_columns() {
        let colors: Vec<Rgb> = (0..=255u8).map(|v| Rgb::new(v, v, v)).collect();
        let img = render_gradient(&colors, 4, 2).unwrap();
        assert_eq!(img.pixel(0, 0), Rgb::new(0, 0, 0));
        assert_eq!(img.pixel(2, 1), Rgb::new(127, 127, 127));
    }

    #[test]
    fn empty_input_and_zero_size_are_rejected() {
        assert!(matches!(
            render_gradient(&[], 800, 50),
            Err(JournalError::EmptyRenderInput)
        ));
        assert!(matches!(
            render_gradient(&[RED], 0, 50),
            Err(JournalError::InvalidDimensions {
                width: 0,
                height: 50
            })
        ));
    }

    #[test]
    fn png_encoding_preserves_pixels() {
        let img = render_gradient(&[RED, GREEN], 64, 4).unwrap();
        let png = img.to_png().unwrap();
        assert_eq!(&png[1..4], b"PNG");

        let decoded = image::load_from_memory_with_format(&png, ImageFormat::Png)
            .unwrap()
            .to_rgb8();
        assert_eq!(decoded.dimensions(), (64, 4));
        assert_eq!(decoded.as_raw().as_slice(), img.pixels());
    }

    #[test]
    fn history_rendering_respects_window() {
        let day = |d: &str| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap();
        let entry = |date: &str, color: Rgb| MoodEntry {
            date: day(date),
            color,
            text: "mood".into(),
        };
        let history = vec![entry("2024-01-01", RED), entry("2024-01-02", GREEN)];

        let now = day("2024-01-02");
        let all = render_history(&history, TimeWindow::All, now, 800, 50)
            .unwrap()
            .unwrap();
        assert_eq!(all.pixel(0, 0), RED);
        assert_eq!(all.pixel(799, 49), Rgb::new(0, 254, 0));

        let later = day("2024-06-01");
        let week = render_history(&history, TimeWindow::Week, later, 800, 50).unwrap();
        assert!(week.is_none());
    }

    #[test]
    fn export_names() {
        assert_eq!(export_file_name(TimeWindow::All), "pixal_gradient.png");
        assert_eq!(export_file_name(TimeWindow::Week), "pixal_gradient_week.png");
        assert_eq!(export_file_name(TimeWindow::Year), "pixal_gradient_year.png");
    }
}
