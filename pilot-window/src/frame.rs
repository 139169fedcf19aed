//! Conversion of frames to window pixels.
use anyhow::{bail, Result};
use ndarray::ArrayViewD;

#[inline]
fn channel(v: f32) -> u32 {
    // NaN maps to 0
    v.max(0.0).min(255.0) as u32
}

/// Converts a frame to `0RGB` pixels in row-major order.
///
/// The frame is `[height, width]` (grayscale) or `[height, width, 3]` (RGB) with
/// values in `[0, 255]`; out of range values are clamped. The pixels are written
/// to `buf`, which is resized as needed, and `(width, height)` is returned.
pub fn to_pixels(frame: ArrayViewD<'_, f32>, buf: &mut Vec<u32>) -> Result<(usize, usize)> {
    let shape = frame.shape();
    let (h, w) = match shape {
        [h, w] | [h, w, 3] => (*h, *w),
        _ => bail!("frame must be [h, w] or [h, w, 3], got {:?}", shape),
    };
    let rgb = shape.len() == 3;

    buf.clear();
    buf.reserve(h * w);
    for y in 0..h {
        for x in 0..w {
            let (r, g, b) = if rgb {
                (
                    channel(frame[&[y, x, 0][..]]),
                    channel(frame[&[y, x, 1][..]]),
                    channel(frame[&[y, x, 2][..]]),
                )
            } else {
                let v = channel(frame[&[y, x][..]]);
                (v, v, v)
            };
            buf.push((r << 16) | (g << 8) | b);
        }
    }

    Ok((w, h))
}
