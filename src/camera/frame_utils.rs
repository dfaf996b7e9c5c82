//! Frame transformation and drawing utilities.

use crate::geometry::{Rect, Vec2};

use super::types::{Color, Frame};

/// Copy the `rect` region out of `frame`.
///
/// The result always has `rect.size` dimensions. Parts of `rect` that fall
/// outside the source are left black; a rectangle with no overlap gives an
/// all-black frame.
pub fn crop_clamped(frame: &Frame, rect: Rect) -> Frame {
    let size = rect.size.max(Vec2::ZERO);
    let mut out = Frame::blank(size.x as u32, size.y as u32, frame.format);

    let Some(visible) = rect.clamp_to(frame.size()) else {
        return out;
    };

    let bpp = frame.bytes_per_pixel();
    let src_stride = frame.width as usize * bpp;
    let dst_stride = out.width as usize * bpp;
    let row_bytes = visible.size.x as usize * bpp;
    // Where the visible part lands inside the output
    let dst_origin = visible.top_left - rect.top_left;

    for row in 0..visible.size.y as usize {
        let sy = visible.top_left.y as usize + row;
        let dy = dst_origin.y as usize + row;
        let src_start = sy * src_stride + visible.top_left.x as usize * bpp;
        let dst_start = dy * dst_stride + dst_origin.x as usize * bpp;
        out.data[dst_start..dst_start + row_bytes]
            .copy_from_slice(&frame.data[src_start..src_start + row_bytes]);
    }

    out
}

/// Resample `frame` to `width` x `height` with an area (box coverage) filter.
///
/// Each output pixel is the coverage-weighted average of the source pixels
/// its footprint overlaps. Shrinking averages whole blocks; enlarging by an
/// integer factor replicates each source pixel.
pub fn resize_area(frame: &Frame, width: u32, height: u32) -> Frame {
    let mut out = Frame::blank(width, height, frame.format);
    if width == 0 || height == 0 || frame.width == 0 || frame.height == 0 {
        return out;
    }
    if width == frame.width && height == frame.height {
        out.data.copy_from_slice(&frame.data);
        return out;
    }

    let x_spans = coverage_spans(frame.width, width);
    let y_spans = coverage_spans(frame.height, height);
    let bpp = frame.bytes_per_pixel();
    let src_stride = frame.width as usize * bpp;

    let mut acc = [0f64; 3];
    for (oy, ys) in y_spans.iter().enumerate() {
        for (ox, xs) in x_spans.iter().enumerate() {
            acc.iter_mut().for_each(|a| *a = 0.0);
            let mut total = 0.0;

            for &(sy, wy) in ys {
                for &(sx, wx) in xs {
                    let w = wx * wy;
                    let i = sy * src_stride + sx * bpp;
                    for c in 0..3 {
                        acc[c] += frame.data[i + c] as f64 * w;
                    }
                    total += w;
                }
            }

            let o = (oy * width as usize + ox) * bpp;
            for c in 0..3 {
                let v = if total > 0.0 { acc[c] / total } else { 0.0 };
                out.data[o + c] = v.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    out
}

/// For every output index, the source indices it covers and their weights.
fn coverage_spans(src_len: u32, dst_len: u32) -> Vec<Vec<(usize, f64)>> {
    let scale = src_len as f64 / dst_len as f64;
    (0..dst_len)
        .map(|d| {
            let start = d as f64 * scale;
            let end = start + scale;
            let first = start.floor() as u32;
            let last = (end.ceil() as u32).min(src_len);
            (first..last)
                .filter_map(|s| {
                    let lo = start.max(s as f64);
                    let hi = end.min(s as f64 + 1.0);
                    let w = hi - lo;
                    (w > 1e-9).then_some((s as usize, w))
                })
                .collect()
        })
        .collect()
}

/// Draw a 1 px horizontal line across the whole frame at row `y`.
pub fn draw_hline(frame: &mut Frame, y: i32, color: Color) {
    for x in 0..frame.width as i32 {
        frame.put_pixel(x, y, color);
    }
}

/// Draw a 1 px vertical line down the whole frame at column `x`.
pub fn draw_vline(frame: &mut Frame, x: i32, color: Color) {
    for y in 0..frame.height as i32 {
        frame.put_pixel(x, y, color);
    }
}

/// Draw a rectangle outline through corners `top_left` and `bottom_right`
/// (both inclusive), `thickness` pixels wide and centered on the outline.
pub fn draw_rect(
    frame: &mut Frame,
    top_left: Vec2,
    bottom_right: Vec2,
    thickness: i32,
    color: Color,
) {
    let half = thickness / 2;
    let outer_tl = top_left - Vec2::new(half, half);
    let outer_br = bottom_right + Vec2::new(half, half);
    let inner_tl = top_left + Vec2::new(half, half);
    let inner_br = bottom_right - Vec2::new(half, half);

    for y in outer_tl.y.max(0)..=outer_br.y.min(frame.height as i32 - 1) {
        for x in outer_tl.x.max(0)..=outer_br.x.min(frame.width as i32 - 1) {
            let inside_inner =
                x > inner_tl.x && x < inner_br.x && y > inner_tl.y && y < inner_br.y;
            if !inside_inner {
                frame.put_pixel(x, y, color);
            }
        }
    }
}

/// Place frames side by side, left to right.
///
/// The output height is the tallest input; shorter frames are padded with
/// black at the bottom. All frames are converted to the first frame's
/// channel order. Returns `None` for an empty slice.
pub fn hconcat(frames: &[Frame]) -> Option<Frame> {
    let first = frames.first()?;
    let width: u32 = frames.iter().map(|f| f.width).sum();
    let height = frames.iter().map(|f| f.height).max().unwrap_or(0);
    let mut out = Frame::blank(width, height, first.format);

    let bpp = out.bytes_per_pixel();
    let dst_stride = width as usize * bpp;
    let mut x_origin = 0usize;

    for frame in frames {
        let row_bytes = frame.width as usize * bpp;
        for y in 0..frame.height as usize {
            let dst_start = y * dst_stride + x_origin * bpp;
            let src_start = y * row_bytes;
            if frame.format == first.format {
                out.data[dst_start..dst_start + row_bytes]
                    .copy_from_slice(&frame.data[src_start..src_start + row_bytes]);
            } else {
                for (i, px) in frame.data[src_start..src_start + row_bytes]
                    .chunks_exact(3)
                    .enumerate()
                {
                    let d = dst_start + i * 3;
                    out.data[d] = px[2];
                    out.data[d + 1] = px[1];
                    out.data[d + 2] = px[0];
                }
            }
        }
        x_origin += frame.width as usize;
    }

    Some(out)
}
