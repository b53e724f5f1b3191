use std::path::Path;

use image::{ImageBuffer, ImageFormat, Luma};
use ndarray::Array2;
use tracing::debug;

use crate::consts::MAX_U16_COUNT;
use crate::error::Result;
use crate::frame::{FrameImage, FrameKind, PixelUnit};

/// Load a grayscale image file as raw counts.
///
/// Any format the `image` crate decodes is accepted; pixels are widened to
/// 16 bits and kept as counts, not normalized.
pub fn load_frame(
    path: &Path,
    kind: FrameKind,
    unit: PixelUnit,
    exposure_time_s: Option<f64>,
) -> Result<FrameImage> {
    let img = image::open(path)?;
    let gray = img.to_luma16();
    let (w, h) = gray.dimensions();

    let data = Array2::from_shape_fn((h as usize, w as usize), |(row, col)| {
        gray.get_pixel(col as u32, row as u32).0[0] as f32
    });
    debug!(path = %path.display(), width = w, height = h, kind = %kind, "Frame loaded");

    let mut frame = FrameImage::new(data, kind, unit).with_source(path);
    if let Some(exposure) = exposure_time_s {
        frame = frame.with_exposure(exposure);
    }
    Ok(frame)
}

/// Save a frame as 16-bit grayscale, clamping counts to 0..=65535.
///
/// PNG for a `.png` extension, TIFF otherwise.
pub fn save_frame(frame: &FrameImage, path: &Path) -> Result<()> {
    let w = frame.width() as u32;
    let h = frame.height() as u32;

    let img = ImageBuffer::<Luma<u16>, Vec<u16>>::from_fn(w, h, |col, row| {
        let val = frame.data()[[row as usize, col as usize]].clamp(0.0, MAX_U16_COUNT);
        Luma([val.round() as u16])
    });

    let format = match path.extension().and_then(|e| e.to_str()) {
        Some("png") => ImageFormat::Png,
        _ => ImageFormat::Tiff,
    };
    img.save_with_format(path, format)?;
    Ok(())
}
