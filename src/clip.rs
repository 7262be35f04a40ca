//! Cohen-Sutherland line clipping
//!
//! Clips a segment against an axis-aligned rectangle before Bresenham scan
//! conversion, so line drawing never walks spans that lie off-screen.

use crate::math2d::{Rect, Vertex};

const INSIDE: u8 = 0;
const LEFT: u8 = 1; // x < x_min
const RIGHT: u8 = 2; // x > x_max
const BOTTOM: u8 = 4; // y < y_min
const TOP: u8 = 8; // y > y_max

// The loop converges in at most 4 clips for finite input; the cap only
// exists to bail out on NaN coordinates.
const MAX_ITERATIONS: u32 = 16;

/// 4-bit region code for a point relative to the clip rectangle
#[inline]
fn outcode(v: &Vertex, rect: &Rect) -> u8 {
    let mut code = INSIDE;

    if v.x < rect.x_min {
        code |= LEFT;
    } else if v.x > rect.x_max {
        code |= RIGHT;
    }

    if v.y < rect.y_min {
        code |= BOTTOM;
    } else if v.y > rect.y_max {
        code |= TOP;
    }

    code
}

/// Clip the segment `v1..v2` to `rect`.
///
/// Returns the (possibly truncated) segment, or `None` when no part of it
/// lies inside the rectangle. Each iteration clips exactly one endpoint
/// against exactly one boundary, testing TOP, BOTTOM, RIGHT, LEFT in that
/// order when an outcode has several bits set.
///
/// A clipped endpoint keeps the u/v of the endpoint it replaced rather
/// than interpolating along the clip parameter; see DESIGN.md.
pub fn clip_segment(mut v1: Vertex, mut v2: Vertex, rect: &Rect) -> Option<(Vertex, Vertex)> {
    let mut code1 = outcode(&v1, rect);
    let mut code2 = outcode(&v2, rect);

    for _ in 0..MAX_ITERATIONS {
        // Trivially accept: both endpoints inside
        if code1 | code2 == 0 {
            return Some((v1, v2));
        }

        // Trivially reject: both endpoints share an outside half-plane
        if code1 & code2 != 0 {
            return None;
        }

        // Clip the endpoint that is outside
        let code_out = if code1 != 0 { code1 } else { code2 };

        let (x, y) = if code_out & TOP != 0 {
            let t = (rect.y_max - v1.y) / (v2.y - v1.y);
            (v1.x + t * (v2.x - v1.x), rect.y_max)
        } else if code_out & BOTTOM != 0 {
            let t = (rect.y_min - v1.y) / (v2.y - v1.y);
            (v1.x + t * (v2.x - v1.x), rect.y_min)
        } else if code_out & RIGHT != 0 {
            let t = (rect.x_max - v1.x) / (v2.x - v1.x);
            (rect.x_max, v1.y + t * (v2.y - v1.y))
        } else {
            let t = (rect.x_min - v1.x) / (v2.x - v1.x);
            (rect.x_min, v1.y + t * (v2.y - v1.y))
        };

        if code_out == code1 {
            v1 = Vertex::with_uv(x, y, v1.u, v1.v);
            code1 = outcode(&v1, rect);
        } else {
            v2 = Vertex::with_uv(x, y, v2.u, v2.v);
            code2 = outcode(&v2, rect);
        }
    }

    // Only reachable with non-finite coordinates
    None
}
