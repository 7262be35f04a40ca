//! Scan-conversion primitives
//!
//! Polygon fills, incremental line and ellipse drawing, and flood fill.
//! Everything here consumes device-space vertices and writes pixels into a
//! `PixelBuffer`; the camera has already mapped world coordinates by the
//! time these routines run.

mod curves;
mod flood;
mod scanline;

pub use curves::{draw_ellipse, draw_line};
pub use flood::{flood_fill, Connectivity, FloodMode};
pub use scanline::{fill_polygon, FillStyle};
