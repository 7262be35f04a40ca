//! Stack-based flood fill
//!
//! Iterative with an explicit stack (never recursive, so large regions
//! cannot overflow) and a visited set so every pixel is examined once.

use std::collections::HashSet;

use crate::math2d::Vertex;
use crate::surface::{Color, PixelBuffer};

/// Neighbor expansion rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Four,
    Eight,
}

/// Which pixels the fill spreads through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloodMode {
    /// Read the seed pixel's color and flood every matching pixel
    ReplaceTarget,
    /// Flood any pixel that is neither the fill color nor this boundary
    /// color, stopping at the boundary
    Boundary(Color),
}

const NEIGHBORS_4: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const NEIGHBORS_8: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Flood fill outward from `seed`. A seed outside the buffer is a no-op;
/// coordinates walked out of the buffer are silently discarded.
pub fn flood_fill(
    buf: &mut PixelBuffer,
    seed: Vertex,
    fill: Color,
    mode: FloodMode,
    connectivity: Connectivity,
) {
    let sx = seed.x as i32;
    let sy = seed.y as i32;
    if !buf.in_bounds(sx, sy) {
        return;
    }

    let target = match mode {
        FloodMode::ReplaceTarget => {
            let target = buf.get_pixel(sx, sy);
            if target == fill {
                // Already filled; a second pass changes nothing
                return;
            }
            Some(target)
        },
        FloodMode::Boundary(_) => None,
    };

    let neighbors: &[(i32, i32)] = match connectivity {
        Connectivity::Four => &NEIGHBORS_4,
        Connectivity::Eight => &NEIGHBORS_8,
    };

    let mut visited: HashSet<(i32, i32)> = HashSet::new();
    let mut stack = vec![(sx, sy)];

    while let Some((cx, cy)) = stack.pop() {
        if !visited.insert((cx, cy)) {
            continue;
        }
        if !buf.in_bounds(cx, cy) {
            continue;
        }

        let current = buf.get_pixel(cx, cy);
        let spreads = match (mode, target) {
            (FloodMode::ReplaceTarget, Some(t)) => current == t,
            (FloodMode::Boundary(boundary), _) => current != boundary && current != fill,
            _ => false,
        };
        if !spreads {
            continue;
        }

        buf.put_pixel(cx, cy, fill);

        for (dx, dy) in neighbors {
            stack.push((cx + dx, cy + dy));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{BLACK, WHITE};

    const RED: Color = (255, 0, 0);

    /// 12x12 buffer with a white one-pixel border around a 10x10 black
    /// interior
    fn bordered() -> PixelBuffer {
        let mut buf = PixelBuffer::with_size(12, 12);
        for i in 0..12 {
            buf.put_pixel(i, 0, WHITE);
            buf.put_pixel(i, 11, WHITE);
            buf.put_pixel(0, i, WHITE);
            buf.put_pixel(11, i, WHITE);
        }
        buf
    }

    #[test]
    fn test_boundary_fill_stays_inside_border() {
        let mut buf = bordered();
        flood_fill(
            &mut buf,
            Vertex::new(6.0, 6.0),
            RED,
            FloodMode::Boundary(WHITE),
            Connectivity::Four,
        );

        let mut red_count = 0;
        for y in 0..12 {
            for x in 0..12 {
                let px = buf.get_pixel(x, y);
                let on_border = x == 0 || x == 11 || y == 0 || y == 11;
                if on_border {
                    assert_eq!(px, WHITE);
                } else {
                    assert_eq!(px, RED);
                    red_count += 1;
                }
            }
        }
        assert_eq!(red_count, 100);
    }

    #[test]
    fn test_replace_target_is_idempotent() {
        let mut buf = bordered();
        flood_fill(
            &mut buf,
            Vertex::new(5.0, 5.0),
            RED,
            FloodMode::ReplaceTarget,
            Connectivity::Four,
        );
        let first: Vec<u8> = buf.as_bytes().to_vec();

        flood_fill(
            &mut buf,
            Vertex::new(5.0, 5.0),
            RED,
            FloodMode::ReplaceTarget,
            Connectivity::Four,
        );
        assert_eq!(buf.as_bytes(), &first[..]);
    }

    #[test]
    fn test_four_connected_stops_at_diagonal_gap() {
        // Two black regions meet only at a diagonal: 4-connected must not
        // leak across, 8-connected does
        let mut make = || {
            let mut buf = PixelBuffer::with_size(4, 4);
            buf.put_pixel(0, 1, WHITE);
            buf.put_pixel(1, 0, WHITE);
            buf
        };

        let mut four = make();
        flood_fill(
            &mut four,
            Vertex::new(0.0, 0.0),
            RED,
            FloodMode::Boundary(WHITE),
            Connectivity::Four,
        );
        assert_eq!(four.get_pixel(0, 0), RED);
        assert_eq!(four.get_pixel(1, 1), BLACK);

        let mut eight = make();
        flood_fill(
            &mut eight,
            Vertex::new(0.0, 0.0),
            RED,
            FloodMode::Boundary(WHITE),
            Connectivity::Eight,
        );
        assert_eq!(eight.get_pixel(1, 1), RED);
    }

    #[test]
    fn test_out_of_bounds_seed_is_noop() {
        let mut buf = PixelBuffer::with_size(4, 4);
        flood_fill(
            &mut buf,
            Vertex::new(-1.0, 2.0),
            RED,
            FloodMode::ReplaceTarget,
            Connectivity::Four,
        );
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(buf.get_pixel(x, y), BLACK);
            }
        }
    }
}
