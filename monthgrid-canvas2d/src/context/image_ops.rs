//! Pixel readback and PNG encoding.

use super::Canvas2dContext;
use crate::error::Canvas2dResult;

/// Metres per inch, for the PNG `pHYs` chunk.
const METRES_PER_INCH: f32 = 0.0254;

impl Canvas2dContext {
    /// Straight-alpha RGBA pixels of a region. Pixels outside the surface
    /// read as transparent black.
    pub fn get_image_data(&self, x: i32, y: i32, width: u32, height: u32) -> Vec<u8> {
        let mut data = vec![0u8; width as usize * height as usize * 4];
        let pixels = self.pixmap.pixels();

        for (row, dst_row) in data.chunks_exact_mut(width as usize * 4).enumerate() {
            let src_y = y + row as i32;
            if src_y < 0 || src_y >= self.height as i32 {
                continue;
            }
            for (col, dst) in dst_row.chunks_exact_mut(4).enumerate() {
                let src_x = x + col as i32;
                if src_x < 0 || src_x >= self.width as i32 {
                    continue;
                }
                let color = pixels[src_y as usize * self.width as usize + src_x as usize].demultiply();
                dst.copy_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
            }
        }
        data
    }

    /// Encode the whole surface as an 8-bit RGBA PNG.
    ///
    /// `ppi` is written as the pixel density and defaults to 72.
    pub fn to_png(&self, ppi: Option<f32>) -> Canvas2dResult<Vec<u8>> {
        let pixels_per_metre = (ppi.unwrap_or(72.0).max(0.0) / METRES_PER_INCH).round() as u32;

        let mut buf = Vec::new();
        let mut encoder = png::Encoder::new(&mut buf, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: pixels_per_metre,
            yppu: pixels_per_metre,
            unit: png::Unit::Meter,
        }));
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.get_image_data(0, 0, self.width, self.height))?;
        writer.finish()?;
        Ok(buf)
    }
}
