//! Texture storage and sampling
//!
//! Textures are read-only 2D pixel grids sampled by normalized `(u, v)`
//! coordinates during textured polygon fills. A content-keyed cache of
//! cropped-and-scaled textures backs the parallax background fast path.

use std::collections::HashMap;

use crate::surface::Color;

/// A texture stored as RGBA pixels
#[derive(Clone)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<u8>, // RGBA format, 4 bytes per pixel
}

impl Texture {
    /// Create a new empty (black) texture
    pub fn new(width: u32, height: u32) -> Self {
        debug_assert!(width > 0 && height > 0, "zero-size texture");
        Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        }
    }

    /// Create texture from raw RGBA data
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, String> {
        if data.len() == (width * height * 4) as usize {
            Ok(Self {
                width,
                height,
                pixels: data,
            })
        } else {
            Err(format!(
                "rgba data length {} does not match {}x{}",
                data.len(),
                width,
                height
            ))
        }
    }

    /// Decode an image file (png/jpeg/bmp) into a texture
    pub fn load(path: &str) -> Result<Self, String> {
        let img = image::open(path).map_err(|e| e.to_string())?.to_rgba8();
        let (width, height) = img.dimensions();
        Self::from_rgba(width, height, img.into_raw())
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Set a pixel in the texture (builder use; sampling never mutates)
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, (r, g, b): Color) {
        if x < self.width && y < self.height {
            let idx = ((y * self.width + x) * 4) as usize;
            self.pixels[idx] = r;
            self.pixels[idx + 1] = g;
            self.pixels[idx + 2] = b;
            self.pixels[idx + 3] = 255;
        }
    }

    /// Sample with UV coordinates, wrapping by modulo on both axes.
    /// `u`/`v` outside [0, 1) repeat the texture; alpha is discarded.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> Color {
        let u = u.rem_euclid(1.0);
        let v = v.rem_euclid(1.0);

        let x = (u * self.width as f32) as u32 % self.width;
        let y = (v * self.height as f32) as u32 % self.height;

        let idx = ((y * self.width + x) * 4) as usize;
        (self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2])
    }

    /// Read a texel directly, clamped to the texture edge
    #[inline]
    pub fn texel(&self, x: u32, y: u32) -> Color {
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        let idx = ((y * self.width + x) * 4) as usize;
        (self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2])
    }

    /// Nearest-neighbor crop + scale into a new texture.
    /// The crop rectangle is in texel coordinates of `self`.
    pub fn scaled_region(
        &self,
        src_x: u32,
        src_y: u32,
        src_w: u32,
        src_h: u32,
        dst_w: u32,
        dst_h: u32,
    ) -> Texture {
        let mut out = Texture::new(dst_w.max(1), dst_h.max(1));
        let sw = src_w.max(1);
        let sh = src_h.max(1);
        for dy in 0..out.height {
            let sy = src_y + dy * sh / out.height;
            for dx in 0..out.width {
                let sx = src_x + dx * sw / out.width;
                out.set_pixel(dx, dy, self.texel(sx, sy));
            }
        }
        out
    }

    /// Generate a checkerboard pattern. Doubles as the visible fallback
    /// the demo asset loader substitutes for a missing file.
    pub fn checkerboard(size: u32, tile_size: u32, c1: Color, c2: Color) -> Self {
        let mut tex = Self::new(size, size);
        for y in 0..size {
            for x in 0..size {
                let checker = ((x / tile_size) + (y / tile_size)) % 2 == 0;
                tex.set_pixel(x, y, if checker { c1 } else { c2 });
            }
        }
        tex
    }
}

// ============================================================================
// TextureCache — cropped/scaled results keyed by content
// ============================================================================

/// Cache key: source asset id, texel crop rectangle, target size
type CacheKey = (usize, (u32, u32, u32, u32), (u32, u32));

/// Memoizes `scaled_region` results so repeated background tiles are
/// cropped and scaled once. Entries are immutable after insertion and are
/// never invalidated within a level's lifetime; a memory-for-CPU tradeoff.
#[derive(Default)]
pub struct TextureCache {
    entries: HashMap<CacheKey, Texture>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fetch the scaled crop for `(asset_id, crop, size)`, computing and
    /// inserting it on first use. `asset_id` identifies the source texture;
    /// the caller keeps ids stable for a level's lifetime.
    pub fn scaled(
        &mut self,
        asset_id: usize,
        source: &Texture,
        crop: (u32, u32, u32, u32),
        dst_w: u32,
        dst_h: u32,
    ) -> &Texture {
        let key = (asset_id, crop, (dst_w, dst_h));
        self.entries.entry(key).or_insert_with(|| {
            let (sx, sy, sw, sh) = crop;
            source.scaled_region(sx, sy, sw, sh, dst_w, dst_h)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_wraps_by_modulo() {
        let mut tex = Texture::new(4, 4);
        tex.set_pixel(1, 0, (200, 0, 0));
        assert_eq!(tex.sample(0.25, 0.0), (200, 0, 0));
        // u = 1.25 wraps to the same texel
        assert_eq!(tex.sample(1.25, 0.0), (200, 0, 0));
        assert_eq!(tex.sample(-0.75, 0.0), (200, 0, 0));
    }

    #[test]
    fn test_from_rgba_rejects_bad_length() {
        assert!(Texture::from_rgba(2, 2, vec![0; 15]).is_err());
        assert!(Texture::from_rgba(2, 2, vec![0; 16]).is_ok());
    }

    #[test]
    fn test_checkerboard_alternates() {
        let tex = Texture::checkerboard(4, 2, (255, 0, 255), (0, 0, 0));
        assert_eq!(tex.sample(0.0, 0.0), (255, 0, 255));
        assert_eq!(tex.sample(0.6, 0.0), (0, 0, 0));
        assert_eq!(tex.sample(0.6, 0.6), (255, 0, 255));
    }

    #[test]
    fn test_scaled_region_dimensions() {
        let tex = Texture::checkerboard(8, 4, (255, 255, 255), (0, 0, 0));
        let scaled = tex.scaled_region(0, 0, 4, 4, 16, 8);
        assert_eq!(scaled.width(), 16);
        assert_eq!(scaled.height(), 8);
        // top-left tile of the crop is c1
        assert_eq!(scaled.sample(0.1, 0.1), (255, 255, 255));
    }

    #[test]
    fn test_cache_computes_once_per_key() {
        let tex = Texture::checkerboard(8, 2, (1, 2, 3), (4, 5, 6));
        let mut cache = TextureCache::new();
        cache.scaled(0, &tex, (0, 0, 4, 4), 10, 10);
        cache.scaled(0, &tex, (0, 0, 4, 4), 10, 10);
        assert_eq!(cache.len(), 1);
        cache.scaled(0, &tex, (0, 0, 4, 4), 20, 20);
        assert_eq!(cache.len(), 2);
    }
}
