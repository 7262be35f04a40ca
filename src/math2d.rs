//! 2D Math Primitives
//!
//! Vectors, vertices with texture coordinates, rectangles, and 3x3
//! homogeneous transforms for the window-to-viewport pipeline.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// 2D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Returns the zero vector when the length is zero
    #[inline]
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self {
                x: self.x / len,
                y: self.y / len,
            }
        } else {
            Self::zero()
        }
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Approximate equality check for floating point comparison
    #[inline]
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }
}

impl Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Neg for Vec2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl Mul<Vec2> for f32 {
    type Output = Vec2;
    #[inline]
    fn mul(self, v: Vec2) -> Vec2 {
        v * self
    }
}

// ============================================================================
// Vertex
// ============================================================================

/// A 2D position with normalized texture coordinates.
///
/// Immutable value type: transforms produce new vertices, `u`/`v` always
/// pass through untouched. The coordinate space (world or device) is
/// whatever the caller put the vertex in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub u: f32,
    #[serde(default)]
    pub v: f32,
}

impl Vertex {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            u: 0.0,
            v: 0.0,
        }
    }

    #[inline]
    pub const fn with_uv(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self { x, y, u, v }
    }

    #[inline]
    pub const fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

// ============================================================================
// Rect
// ============================================================================

/// Axis-aligned rectangle used for the world window, the viewport, and
/// clip bounds. Callers keep `x_max > x_min` and `y_max > y_min`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl Rect {
    #[inline]
    pub const fn new(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }
}

// ============================================================================
// Mat3
// ============================================================================

/// Row-major 3x3 matrix over homogeneous 2D coordinates.
///
/// Every constructor here leaves the bottom row `[0, 0, 1]`; `multiply`
/// and `transform` accept any matrix and do not enforce it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    pub m: [[f32; 3]; 3],
}

impl Mat3 {
    #[inline]
    pub const fn identity() -> Self {
        Self {
            m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    pub fn translation(dx: f32, dy: f32) -> Self {
        let mut out = Self::identity();
        out.m[0][2] = dx;
        out.m[1][2] = dy;
        out
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        let mut out = Self::identity();
        out.m[0][0] = sx;
        out.m[1][1] = sy;
        out
    }

    /// Rotation by `degrees`, counter-clockwise positive
    pub fn rotation(degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let mut out = Self::identity();
        out.m[0][0] = cos;
        out.m[0][1] = -sin;
        out.m[1][0] = sin;
        out.m[1][1] = cos;
        out
    }

    /// Left-multiply `matrices` in sequence starting from identity:
    /// `combine([A, B, C]) == C * B * A`, so matrices are applied to a
    /// point in slice order (A first). Pinned by test.
    pub fn combine(matrices: &[Mat3]) -> Self {
        let mut result = Self::identity();
        for m in matrices {
            result = *m * result;
        }
        result
    }

    /// Map a vertex's `(x, y, 1)` through this matrix; `u`/`v` unchanged
    #[inline]
    pub fn transform(&self, v: Vertex) -> Vertex {
        let x = self.m[0][0] * v.x + self.m[0][1] * v.y + self.m[0][2];
        let y = self.m[1][0] * v.x + self.m[1][1] * v.y + self.m[1][2];
        Vertex::with_uv(x, y, v.u, v.v)
    }

    /// Transform a batch into a fresh vertex list; the input is untouched
    pub fn transform_all(&self, vertices: &[Vertex]) -> Vec<Vertex> {
        vertices.iter().map(|&v| self.transform(v)).collect()
    }
}

impl Mul for Mat3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut out = [[0.0f32; 3]; 3];
        for (row, out_row) in out.iter_mut().enumerate() {
            for (col, cell) in out_row.iter_mut().enumerate() {
                *cell = self.m[row][0] * rhs.m[0][col]
                    + self.m[row][1] * rhs.m[1][col]
                    + self.m[row][2] * rhs.m[2][col];
            }
        }
        Self { m: out }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_normalize_zero_vector() {
        assert_eq!(Vec2::zero().normalize(), Vec2::zero());
    }

    #[test]
    fn test_normalize_unit_length() {
        let v = Vec2::new(3.0, 4.0).normalize();
        assert!((v.length() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_identity_leaves_vertex_unchanged() {
        let v = Vertex::with_uv(4.0, -2.5, 0.3, 0.7);
        assert_eq!(Mat3::identity().transform(v), v);
    }

    #[test]
    fn test_translation() {
        let t = Mat3::translation(10.0, -5.0);
        let v = t.transform(Vertex::new(1.0, 2.0));
        assert!((v.x - 11.0).abs() < EPS);
        assert!((v.y + 3.0).abs() < EPS);
    }

    #[test]
    fn test_rotation_ccw_quarter_turn() {
        let r = Mat3::rotation(90.0);
        let v = r.transform(Vertex::new(1.0, 0.0));
        assert!(v.x.abs() < EPS);
        assert!((v.y - 1.0).abs() < EPS);
    }

    #[test]
    fn test_combine_applies_in_slice_order() {
        // combine([T, S]) applied to v must equal S applied to (T applied to v)
        let t = Mat3::translation(3.0, 1.0);
        let s = Mat3::scale(2.0, 2.0);
        let v = Vertex::new(5.0, -2.0);

        let combined = Mat3::combine(&[t, s]).transform(v);
        let stepwise = s.transform(t.transform(v));

        assert!((combined.x - stepwise.x).abs() < EPS);
        assert!((combined.y - stepwise.y).abs() < EPS);
        assert!((combined.x - 16.0).abs() < EPS);
        assert!((combined.y + 2.0).abs() < EPS);
    }

    #[test]
    fn test_transform_passes_uv_through() {
        let m = Mat3::combine(&[Mat3::rotation(33.0), Mat3::translation(7.0, 8.0)]);
        let v = m.transform(Vertex::with_uv(1.0, 1.0, 0.25, 0.75));
        assert_eq!(v.u, 0.25);
        assert_eq!(v.v, 0.75);
    }

    #[test]
    fn test_transform_all_does_not_mutate_input() {
        let input = vec![Vertex::new(1.0, 2.0), Vertex::new(3.0, 4.0)];
        let snapshot = input.clone();
        let out = Mat3::translation(1.0, 1.0).transform_all(&input);
        assert_eq!(input, snapshot);
        assert_eq!(out.len(), 2);
        assert!((out[0].x - 2.0).abs() < EPS);
    }

    #[test]
    fn test_rect_dimensions() {
        let r = Rect::new(10.0, 20.0, 110.0, 70.0);
        assert_eq!(r.width(), 100.0);
        assert_eq!(r.height(), 50.0);
        assert!(r.center().approx_eq(&Vec2::new(60.0, 45.0), EPS));
    }
}
