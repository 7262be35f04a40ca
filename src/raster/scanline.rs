//! Scanline polygon fill
//!
//! Even-odd rule: for each scanline, x-intersections with the polygon's
//! edges are collected, sorted, and filled pairwise. Horizontal edges are
//! skipped and an odd trailing intersection is dropped.

use crate::math2d::Vertex;
use crate::surface::{Color, PixelBuffer};
use crate::texture::Texture;
use crate::util::lerp_color;

/// How a polygon's interior is painted. Exactly one style per draw call.
pub enum FillStyle<'a> {
    Solid(Color),
    /// Interpolated top-to-bottom across the polygon's bounding box
    VerticalGradient(Color, Color),
    Textured(&'a Texture),
}

/// Fill a closed polygon (implicit edge from last vertex to first).
/// Fewer than three vertices is a silent no-op.
pub fn fill_polygon(buf: &mut PixelBuffer, vertices: &[Vertex], style: FillStyle) {
    if vertices.len() < 3 {
        return;
    }
    match style {
        FillStyle::Solid(color) => fill_solid(buf, vertices, color),
        FillStyle::VerticalGradient(top, bottom) => fill_gradient(buf, vertices, top, bottom),
        FillStyle::Textured(texture) => fill_textured(buf, vertices, texture),
    }
}

/// Vertical extent of the polygon clamped to the buffer, as inclusive
/// scanline indices. None when the polygon lies entirely off-buffer.
fn scan_bounds(buf: &PixelBuffer, vertices: &[Vertex]) -> Option<(i32, i32)> {
    let mut min_y = f32::MAX;
    let mut max_y = f32::MIN;
    for v in vertices {
        min_y = min_y.min(v.y);
        max_y = max_y.max(v.y);
    }

    let y_min = (min_y as i32).max(0);
    let y_max = (max_y as i32).min(buf.height() as i32 - 1);
    if y_min > y_max {
        return None;
    }
    Some((y_min, y_max))
}

/// Collect x-intersections of scanline `y` with every non-horizontal edge.
/// Each edge is ordered bottom-up and contributes when `p1.y <= y < p2.y`,
/// which counts shared vertices exactly once for the even-odd rule.
fn edge_crossings(vertices: &[Vertex], y: i32, out: &mut Vec<f32>) {
    out.clear();
    let yf = y as f32;
    let n = vertices.len();

    for i in 0..n {
        let v1 = vertices[i];
        let v2 = vertices[(i + 1) % n];
        if v1.y as i32 == v2.y as i32 {
            continue; // horizontal edge
        }

        let (p1, p2) = if v1.y < v2.y { (v1, v2) } else { (v2, v1) };
        if p1.y <= yf && yf < p2.y {
            out.push(p1.x + (yf - p1.y) * (p2.x - p1.x) / (p2.y - p1.y));
        }
    }

    out.sort_unstable_by(f32::total_cmp);
}

fn fill_solid(buf: &mut PixelBuffer, vertices: &[Vertex], color: Color) {
    let Some((y_min, y_max)) = scan_bounds(buf, vertices) else {
        return;
    };

    let mut crossings = Vec::with_capacity(vertices.len());
    for y in y_min..=y_max {
        edge_crossings(vertices, y, &mut crossings);
        for pair in crossings.chunks_exact(2) {
            buf.hline(pair[0] as i32, pair[1] as i32, y, color);
        }
    }
}

fn fill_gradient(buf: &mut PixelBuffer, vertices: &[Vertex], top: Color, bottom: Color) {
    let Some((y_min, y_max)) = scan_bounds(buf, vertices) else {
        return;
    };

    // Degenerate one-scanline polygon: treat the box height as 1
    let poly_height = (y_max - y_min).max(1) as f32;

    let mut crossings = Vec::with_capacity(vertices.len());
    for y in y_min..=y_max {
        let factor = (y - y_min) as f32 / poly_height;
        let color = lerp_color(top, bottom, factor);

        edge_crossings(vertices, y, &mut crossings);
        for pair in crossings.chunks_exact(2) {
            buf.hline(pair[0] as i32, pair[1] as i32, y, color);
        }
    }
}

fn fill_textured(buf: &mut PixelBuffer, vertices: &[Vertex], texture: &Texture) {
    let Some((y_min, y_max)) = scan_bounds(buf, vertices) else {
        return;
    };

    let width = buf.width() as i32;
    let n = vertices.len();
    // (x, u, v) per edge crossing
    let mut crossings: Vec<(f32, f32, f32)> = Vec::with_capacity(n);

    for y in y_min..=y_max {
        crossings.clear();
        let yf = y as f32;

        for i in 0..n {
            let v1 = vertices[i];
            let v2 = vertices[(i + 1) % n];
            if v1.y as i32 == v2.y as i32 {
                continue;
            }

            let (p1, p2) = if v1.y < v2.y { (v1, v2) } else { (v2, v1) };
            if p1.y <= yf && yf < p2.y {
                let factor = (yf - p1.y) / (p2.y - p1.y);
                crossings.push((
                    p1.x + factor * (p2.x - p1.x),
                    p1.u + factor * (p2.u - p1.u),
                    p1.v + factor * (p2.v - p1.v),
                ));
            }
        }

        crossings.sort_unstable_by(|a, b| a.0.total_cmp(&b.0));

        for pair in crossings.chunks_exact(2) {
            let (xa, ua, va) = pair[0];
            let (xb, ub, vb) = pair[1];

            let x_start = xa as i32;
            let x_end = xb as i32;
            let seg_w = x_end - x_start;
            if seg_w <= 0 {
                continue;
            }

            // Interpolate u/v linearly across the span, clamped to the
            // buffer so the increments stay aligned with the unclamped span
            let inv_w = 1.0 / seg_w as f32;
            let du = (ub - ua) * inv_w;
            let dv = (vb - va) * inv_w;

            let clamped_start = x_start.max(0);
            let clamped_end = x_end.min(width - 1);
            let offset = (clamped_start - x_start) as f32;
            let mut curr_u = ua + offset * du;
            let mut curr_v = va + offset * dv;

            for x in clamped_start..=clamped_end {
                buf.put_pixel(x, y, texture.sample(curr_u, curr_v));
                curr_u += du;
                curr_v += dv;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{BLACK, WHITE};

    fn quad(x0: f32, y0: f32, x1: f32, y1: f32) -> Vec<Vertex> {
        vec![
            Vertex::new(x0, y0),
            Vertex::new(x1, y0),
            Vertex::new(x1, y1),
            Vertex::new(x0, y1),
        ]
    }

    #[test]
    fn test_degenerate_polygon_is_noop() {
        let mut buf = PixelBuffer::with_size(8, 8);
        fill_polygon(
            &mut buf,
            &[Vertex::new(1.0, 1.0), Vertex::new(5.0, 5.0)],
            FillStyle::Solid(WHITE),
        );
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(buf.get_pixel(x, y), BLACK);
            }
        }
    }

    #[test]
    fn test_convex_polygon_single_span_per_scanline() {
        // Triangle; every interior scanline yields exactly one span whose
        // ends sit on the polygon boundary within a pixel
        let mut buf = PixelBuffer::with_size(40, 40);
        let tri = vec![
            Vertex::new(20.0, 5.0),
            Vertex::new(35.0, 30.0),
            Vertex::new(5.0, 30.0),
        ];
        fill_polygon(&mut buf, &tri, FillStyle::Solid(WHITE));

        for y in 6..30 {
            let mut runs = 0;
            let mut prev = BLACK;
            for x in 0..40 {
                let px = buf.get_pixel(x, y);
                if px == WHITE && prev == BLACK {
                    runs += 1;
                }
                prev = px;
            }
            assert_eq!(runs, 1, "scanline {} should hold one span", y);
        }
    }

    #[test]
    fn test_fill_clamps_to_buffer() {
        let mut buf = PixelBuffer::with_size(10, 10);
        fill_polygon(
            &mut buf,
            &quad(-20.0, -20.0, 30.0, 30.0),
            FillStyle::Solid((9, 9, 9)),
        );
        assert_eq!(buf.get_pixel(0, 0), (9, 9, 9));
        assert_eq!(buf.get_pixel(9, 9), (9, 9, 9));
    }

    #[test]
    fn test_gradient_interpolates_top_to_bottom() {
        let mut buf = PixelBuffer::with_size(10, 21);
        fill_polygon(
            &mut buf,
            &quad(0.0, 0.0, 10.0, 21.0),
            FillStyle::VerticalGradient((0, 0, 0), (200, 0, 0)),
        );
        let (top_r, _, _) = buf.get_pixel(5, 0);
        let (mid_r, _, _) = buf.get_pixel(5, 10);
        let (bot_r, _, _) = buf.get_pixel(5, 20);
        assert_eq!(top_r, 0);
        assert!(bot_r == 200);
        assert!(mid_r > 80 && mid_r < 120);
    }

    #[test]
    fn test_gradient_zero_height_bbox_guarded() {
        // All vertices land on one scanline; must not divide by zero
        let mut buf = PixelBuffer::with_size(10, 10);
        let flat = vec![
            Vertex::new(1.0, 4.2),
            Vertex::new(8.0, 4.4),
            Vertex::new(4.0, 4.6),
        ];
        fill_polygon(
            &mut buf,
            &flat,
            FillStyle::VerticalGradient(WHITE, (0, 0, 255)),
        );
    }

    #[test]
    fn test_textured_fill_samples_texture() {
        let mut tex = Texture::new(2, 2);
        tex.set_pixel(0, 0, (255, 0, 0));
        tex.set_pixel(1, 0, (255, 0, 0));
        tex.set_pixel(0, 1, (255, 0, 0));
        tex.set_pixel(1, 1, (255, 0, 0));

        let mut buf = PixelBuffer::with_size(16, 16);
        let poly = vec![
            Vertex::with_uv(2.0, 2.0, 0.0, 0.0),
            Vertex::with_uv(14.0, 2.0, 1.0, 0.0),
            Vertex::with_uv(14.0, 14.0, 1.0, 1.0),
            Vertex::with_uv(2.0, 14.0, 0.0, 1.0),
        ];
        fill_polygon(&mut buf, &poly, FillStyle::Textured(&tex));
        assert_eq!(buf.get_pixel(8, 8), (255, 0, 0));
        assert_eq!(buf.get_pixel(0, 0), BLACK);
    }
}
