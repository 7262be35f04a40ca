//! Window-to-viewport camera
//!
//! Maintains a world-space window rectangle and a device-space viewport
//! rectangle plus a zoom factor, and maps world vertices into device
//! pixel coordinates through a cached composed transform. Game logic
//! mutates the camera once per frame; drawing reads it many times.

use crate::math2d::{Mat3, Rect, Vertex};

/// Substituted when a mutation would collapse a window or viewport
/// dimension to zero, keeping the scale factors finite
const MIN_WINDOW_SIZE: f32 = 1.0;

const MIN_ZOOM: f32 = 0.001;

pub struct Camera {
    window: Rect,
    viewport: Rect,
    zoom: f32,
    /// Total world width for the optional right-edge follow clamp.
    /// `None` leaves the right edge unclamped.
    world_extent: Option<f32>,
    /// Window-to-viewport matrix, rebuilt on every mutation
    transform: Mat3,
}

impl Camera {
    pub fn new(world_width: f32, world_height: f32, screen_width: f32, screen_height: f32) -> Self {
        let mut camera = Self {
            window: Rect::new(0.0, 0.0, world_width, world_height),
            viewport: Rect::new(0.0, 0.0, screen_width, screen_height),
            zoom: 1.0,
            world_extent: None,
            transform: Mat3::identity(),
        };
        camera.rebuild_transform();
        camera
    }

    /// Clamp `follow` against the world's right edge as well as its left.
    /// The observed reference behavior clamps only the left edge, so this
    /// stays opt-in.
    pub fn with_world_extent(mut self, extent: f32) -> Self {
        self.world_extent = Some(extent);
        self
    }

    #[inline]
    pub fn window(&self) -> Rect {
        self.window
    }

    #[inline]
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    #[inline]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn set_window(&mut self, window: Rect) {
        self.window = window;
        self.rebuild_transform();
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
        self.rebuild_transform();
    }

    /// Change zoom, recentring the window around its current center
    pub fn set_zoom(&mut self, level: f32) {
        self.zoom = level.max(MIN_ZOOM);
        let center = self.window.center();
        let half_w = (self.viewport.width() / self.zoom) / 2.0;
        let half_h = (self.viewport.height() / self.zoom) / 2.0;
        self.window = Rect::new(
            center.x - half_w,
            center.y - half_h,
            center.x + half_w,
            center.y + half_h,
        );
        self.rebuild_transform();
    }

    /// Recenter the window's x-bounds on `target_x`, sized by the viewport
    /// width over zoom. The left edge clamps at world origin; the right
    /// edge clamps only when a world extent was configured. The vertical
    /// window tracks the viewport height, this is a side-scroller.
    pub fn follow(&mut self, target_x: f32) {
        let view_w = self.viewport.width() / self.zoom;
        let mut x_min = target_x - view_w / 2.0;
        let mut x_max = target_x + view_w / 2.0;

        if let Some(extent) = self.world_extent {
            if x_max > extent {
                x_min = extent - view_w;
                x_max = extent;
            }
        }
        if x_min < 0.0 {
            x_min = 0.0;
            x_max = view_w;
        }

        self.window = Rect::new(x_min, 0.0, x_max, self.viewport.height() / self.zoom);
        self.rebuild_transform();
    }

    /// Map a world-space vertex to integer device coordinates; u/v pass
    /// through unchanged. Pure with respect to camera state.
    pub fn world_to_device(&self, v: Vertex) -> Vertex {
        let mapped = self.transform.transform(v);
        Vertex::with_uv(mapped.x.round(), mapped.y.round(), v.u, v.v)
    }

    fn rebuild_transform(&mut self) {
        if self.window.width() < MIN_WINDOW_SIZE {
            self.window.x_max = self.window.x_min + MIN_WINDOW_SIZE;
        }
        if self.window.height() < MIN_WINDOW_SIZE {
            self.window.y_max = self.window.y_min + MIN_WINDOW_SIZE;
        }
        if self.viewport.width() < MIN_WINDOW_SIZE {
            self.viewport.x_max = self.viewport.x_min + MIN_WINDOW_SIZE;
        }
        if self.viewport.height() < MIN_WINDOW_SIZE {
            self.viewport.y_max = self.viewport.y_min + MIN_WINDOW_SIZE;
        }

        let sx = self.viewport.width() / self.window.width();
        let sy = self.viewport.height() / self.window.height();

        self.transform = Mat3::combine(&[
            Mat3::translation(-self.window.x_min, -self.window.y_min),
            Mat3::scale(sx, sy),
            Mat3::translation(self.viewport.x_min, self.viewport.y_min),
        ]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_mapping_at_zoom_one() {
        let camera = Camera::new(640.0, 480.0, 640.0, 480.0);
        let v = camera.world_to_device(Vertex::with_uv(123.0, 77.0, 0.5, 0.5));
        assert_eq!(v.x, 123.0);
        assert_eq!(v.y, 77.0);
        assert_eq!(v.u, 0.5);
        assert_eq!(v.v, 0.5);
    }

    #[test]
    fn test_halved_viewport_scales_by_half() {
        let camera = Camera::new(800.0, 600.0, 400.0, 300.0);
        let v = camera.world_to_device(Vertex::new(400.0, 300.0));
        assert_eq!(v.x, 200.0);
        assert_eq!(v.y, 150.0);
    }

    #[test]
    fn test_follow_clamps_left_edge() {
        let mut camera = Camera::new(4000.0, 600.0, 800.0, 600.0);
        camera.follow(50.0);
        assert_eq!(camera.window().x_min, 0.0);
        assert_eq!(camera.window().x_max, 800.0);
    }

    #[test]
    fn test_follow_centers_when_unclamped() {
        let mut camera = Camera::new(4000.0, 600.0, 800.0, 600.0);
        camera.follow(1000.0);
        assert_eq!(camera.window().x_min, 600.0);
        assert_eq!(camera.window().x_max, 1400.0);
    }

    #[test]
    fn test_follow_right_clamp_is_opt_in() {
        let mut unclamped = Camera::new(1000.0, 600.0, 800.0, 600.0);
        unclamped.follow(950.0);
        assert_eq!(unclamped.window().x_max, 1350.0);

        let mut clamped = Camera::new(1000.0, 600.0, 800.0, 600.0).with_world_extent(1000.0);
        clamped.follow(950.0);
        assert_eq!(clamped.window().x_min, 200.0);
        assert_eq!(clamped.window().x_max, 1000.0);
    }

    #[test]
    fn test_set_zoom_preserves_window_center() {
        let mut camera = Camera::new(800.0, 600.0, 800.0, 600.0);
        camera.follow(1000.0);
        let before = camera.window().center();
        camera.set_zoom(2.0);
        let after = camera.window().center();
        assert!(before.approx_eq(&after, 1e-3));
        assert_eq!(camera.window().width(), 400.0);
    }

    #[test]
    fn test_zoomed_follow_window_size() {
        let mut camera = Camera::new(4000.0, 600.0, 800.0, 600.0);
        camera.set_zoom(2.0);
        camera.follow(2000.0);
        assert_eq!(camera.window().width(), 400.0);
        // a world point at the window center maps to the viewport center
        let v = camera.world_to_device(Vertex::new(2000.0, 150.0));
        assert_eq!(v.x, 400.0);
        assert_eq!(v.y, 300.0);
    }

    #[test]
    fn test_zero_area_window_stays_finite() {
        let mut camera = Camera::new(800.0, 600.0, 800.0, 600.0);
        camera.set_window(Rect::new(10.0, 10.0, 10.0, 10.0));
        let v = camera.world_to_device(Vertex::new(10.5, 10.5));
        assert!(v.x.is_finite());
        assert!(v.y.is_finite());
    }

    #[test]
    fn test_mutation_invalidates_cached_transform() {
        let mut camera = Camera::new(800.0, 600.0, 800.0, 600.0);
        let before = camera.world_to_device(Vertex::new(400.0, 300.0));
        camera.set_window(Rect::new(400.0, 0.0, 1200.0, 600.0));
        let after = camera.world_to_device(Vertex::new(400.0, 300.0));
        assert_eq!(before.x, 400.0);
        assert_eq!(after.x, 0.0);
    }
}
