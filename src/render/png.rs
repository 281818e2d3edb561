use image::{ImageFormat, Rgba, RgbaImage};
use std::io::BufWriter;
use std::path::Path;

use super::color::ColorMapper;
use crate::error::{Result, SpectrogramError};
use crate::spectral::matrix::SpectrogramMatrix;

/// Space reserved left of the plot for the frequency ticks.
pub const LEFT_MARGIN: u32 = 60;
/// Space reserved below the plot for the time ticks.
pub const BOTTOM_MARGIN: u32 = 40;
/// Ticks per axis, including both ends.
const TICKS: u32 = 11;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const AXIS: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Lay the matrix out as pixels: time runs left to right, frequency bottom to top.
///
/// Cell `[x][y]` lands on pixel `(x + LEFT_MARGIN, bins - y)`.
pub fn render_image(matrix: &SpectrogramMatrix, mapper: &ColorMapper) -> RgbaImage {
    let frames = matrix.num_frames() as u32;
    let bins = matrix.num_bins() as u32;
    let mut img = RgbaImage::from_pixel(frames + LEFT_MARGIN, bins + BOTTOM_MARGIN, BACKGROUND);

    for (x, row) in matrix.rows().iter().enumerate() {
        for (y, &value) in row.iter().enumerate() {
            img.put_pixel(x as u32 + LEFT_MARGIN, bins - y as u32, Rgba(mapper.rgba(value)));
        }
    }

    draw_axis_ticks(&mut img, frames, bins);
    img
}

fn draw_axis_ticks(img: &mut RgbaImage, frames: u32, bins: u32) {
    let (width, height) = img.dimensions();
    let mut put = |x: u32, y: u32| {
        if x < width && y < height {
            img.put_pixel(x, y, AXIS);
        }
    };

    // Frequency ticks: horizontal strokes across the left margin.
    for i in 0..TICKS {
        let y = bins - i * bins / (TICKS - 1);
        for dx in 0..50 {
            put(dx + 5, y);
        }
    }

    // Time ticks: vertical strokes hanging below the plot.
    for i in 0..TICKS {
        let x = i * frames / (TICKS - 1) + LEFT_MARGIN;
        for dy in 0..10 {
            put(x, bins + dy);
        }
    }
}

pub fn write_png(img: &RgbaImage, path: &Path) -> Result<()> {
    super::ensure_parent_dir(path)?;
    let file = std::fs::File::create(path).map_err(|e| SpectrogramError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    img.write_to(&mut writer, ImageFormat::Png).map_err(|e| {
        let source = match e {
            image::ImageError::IoError(io) => io,
            other => std::io::Error::other(other),
        };
        SpectrogramError::io(path, source)
    })?;
    Ok(())
}
