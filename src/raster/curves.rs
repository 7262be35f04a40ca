//! Incremental line and ellipse scan conversion

use crate::clip::clip_segment;
use crate::math2d::{Rect, Vertex};
use crate::surface::{Color, PixelBuffer};

/// Draw a line between two device-space vertices with Bresenham's
/// algorithm. The segment is clipped to the buffer first, so scan
/// conversion never steps through off-screen spans.
pub fn draw_line(buf: &mut PixelBuffer, v0: Vertex, v1: Vertex, color: Color) {
    let bounds = Rect::new(
        0.0,
        0.0,
        (buf.width() - 1) as f32,
        (buf.height() - 1) as f32,
    );
    let Some((c0, c1)) = clip_segment(v0, v1, &bounds) else {
        return;
    };

    bresenham(
        buf, c0.x as i32, c0.y as i32, c1.x as i32, c1.y as i32, color,
    );
}

/// Standard error-accumulation Bresenham over all slope/sign octants.
/// Endpoints are ordered before stepping so the same pixel set comes out
/// regardless of which end the caller passed first (ties in the error
/// term would otherwise break toward the starting point).
fn bresenham(
    buf: &mut PixelBuffer,
    mut x0: i32,
    mut y0: i32,
    mut x1: i32,
    mut y1: i32,
    color: Color,
) {
    if (x0, y0) > (x1, y1) {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let dx = (x1 - x0).abs();
    let dy = -((y1 - y0).abs());
    let sx = if x0 < x1 { 1i32 } else { -1i32 };
    let sy = if y0 < y1 { 1i32 } else { -1i32 };
    let mut err = dx + dy;
    let mut x = x0;
    let mut y = y0;

    loop {
        buf.put_pixel(x, y, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Draw an axis-aligned ellipse outline with the midpoint algorithm.
///
/// Region 1 walks while the tangent slope magnitude stays below 1
/// (`dx < dy`), region 2 takes over down to the y axis; four mirrored
/// quadrant points are plotted per step. Non-positive radii are a no-op.
pub fn draw_ellipse(buf: &mut PixelBuffer, center: Vertex, rx: i32, ry: i32, color: Color) {
    if rx <= 0 || ry <= 0 {
        return;
    }

    let xc = center.x as i32;
    let yc = center.y as i32;
    let rx2 = i64::from(rx) * i64::from(rx);
    let ry2 = i64::from(ry) * i64::from(ry);

    let mut x: i64 = 0;
    let mut y: i64 = i64::from(ry);
    let mut dx = 2 * ry2 * x;
    let mut dy = 2 * rx2 * y;

    // Region 1
    let mut d1 = ry2 as f64 - (rx2 * i64::from(ry)) as f64 + 0.25 * rx2 as f64;
    while dx < dy {
        plot_quadrants(buf, xc, yc, x as i32, y as i32, color);

        if d1 < 0.0 {
            x += 1;
            dx += 2 * ry2;
            d1 += (dx + ry2) as f64;
        } else {
            x += 1;
            y -= 1;
            dx += 2 * ry2;
            dy -= 2 * rx2;
            d1 += (dx - dy + ry2) as f64;
        }
    }

    // Region 2
    let mut d2 = ry2 as f64 * (x as f64 + 0.5) * (x as f64 + 0.5)
        + (rx2 * (y - 1) * (y - 1)) as f64
        - (rx2 * ry2) as f64;
    while y >= 0 {
        plot_quadrants(buf, xc, yc, x as i32, y as i32, color);

        if d2 > 0.0 {
            y -= 1;
            dy -= 2 * rx2;
            d2 += (rx2 - dy) as f64;
        } else {
            y -= 1;
            x += 1;
            dx += 2 * ry2;
            dy -= 2 * rx2;
            d2 += (dx - dy + rx2) as f64;
        }
    }
}

#[inline]
fn plot_quadrants(buf: &mut PixelBuffer, xc: i32, yc: i32, x: i32, y: i32, color: Color) {
    buf.put_pixel(xc + x, yc + y, color);
    buf.put_pixel(xc - x, yc + y, color);
    buf.put_pixel(xc + x, yc - y, color);
    buf.put_pixel(xc - x, yc - y, color);
}
