// Allow unused code for designed-but-not-yet-used APIs
#![allow(dead_code)]

mod camera;
mod clip;
mod display;
mod math2d;
mod raster;
mod scene;
mod surface;
mod texture;
mod util;

use std::collections::HashMap;

use sdl2::keyboard::Keycode;

use camera::Camera;
use display::{Display, InputEvent, RenderTarget, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use math2d::{Mat3, Vertex};
use raster::{
    draw_ellipse, draw_line, fill_polygon, flood_fill, Connectivity, FillStyle, FloodMode,
};
use scene::{Scene, Shape, ShapeStyle};
use surface::{Color, PixelBuffer};
use texture::{Texture, TextureCache};
use util::{FpsCounter, Rng};

const SCENE_PATH: &str = "scene.json";
const PLAYER_SPEED: f32 = 260.0;

const RAIL_COLOR: Color = (110, 110, 120);
const MOON_OUTLINE: Color = (230, 230, 210);
const MOON_FILL: Color = (205, 205, 185);

/// Parse command line arguments and return (width, height, vsync)
fn parse_args() -> (u32, u32, bool) {
    let args: Vec<String> = std::env::args().collect();
    let mut width = DEFAULT_WIDTH;
    let mut height = DEFAULT_HEIGHT;
    let mut vsync = true;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--no-vsync" => vsync = false,
            "--width" | "-w" => {
                if i + 1 < args.len() {
                    if let Ok(w) = args[i + 1].parse::<u32>() {
                        width = w;
                    }
                    i += 1;
                }
            },
            "--height" | "-h" => {
                if i + 1 < args.len() {
                    if let Ok(h) = args[i + 1].parse::<u32>() {
                        height = h;
                    }
                    i += 1;
                }
            },
            "--help" => {
                println!("Usage: trackside [OPTIONS]");
                println!();
                println!("Options:");
                println!("  --width W, -w W    Window width (default: {})", DEFAULT_WIDTH);
                println!("  --height H, -h H   Window height (default: {})", DEFAULT_HEIGHT);
                println!("  --no-vsync         Disable VSync for uncapped framerate");
                println!("  --help             Show this help message");
                std::process::exit(0);
            },
            _ => {},
        }
        i += 1;
    }

    (width, height, vsync)
}

/// Built-in level used when no scene.json is present
fn demo_scene(height: f32) -> Scene {
    let mut scene = Scene::new("demo-line", 4000.0, height);

    // Far mountain ridge, slow parallax
    let mut ridge = vec![Vertex::new(-200.0, height - 160.0)];
    for i in 0..14 {
        let x = -200.0 + i as f32 * 360.0;
        ridge.push(Vertex::new(x + 180.0, height - 320.0 - (i % 3) as f32 * 60.0));
        ridge.push(Vertex::new(x + 360.0, height - 160.0));
    }
    ridge.push(Vertex::new(4800.0, height));
    ridge.push(Vertex::new(-200.0, height));
    scene.add_shape(
        Shape::new(
            "mountains",
            ridge,
            ShapeStyle::VerticalGradient {
                top: (60, 70, 90),
                bottom: (30, 35, 50),
            },
        )
        .with_parallax(0.3),
    );

    // Ballast bed under the rails, textured and camera-mapped
    let ground_top = height - 120.0;
    scene.add_shape(Shape::new(
        "ballast",
        vec![
            Vertex::with_uv(0.0, ground_top, 0.0, 0.0),
            Vertex::with_uv(4000.0, ground_top, 20.0, 0.0),
            Vertex::with_uv(4000.0, height, 20.0, 1.0),
            Vertex::with_uv(0.0, height, 0.0, 1.0),
        ],
        ShapeStyle::Textured {
            texture: "ballast".into(),
        },
    ));

    scene
}

/// Resolve every texture name a scene mentions, substituting a visible
/// checkerboard for files that fail to load (the loader's job, not the
/// rasterizer's)
fn load_textures(scene: &Scene) -> HashMap<String, Texture> {
    let mut textures = HashMap::new();
    for shape in &scene.shapes {
        if let ShapeStyle::Textured { texture } = &shape.style {
            if textures.contains_key(texture) {
                continue;
            }
            let tex = match Texture::load(&format!("assets/{}.png", texture)) {
                Ok(tex) => tex,
                Err(err) => {
                    println!("texture '{}' failed to load ({}), using fallback", texture, err);
                    Texture::checkerboard(32, 8, (120, 100, 90), (70, 60, 55))
                },
            };
            textures.insert(texture.clone(), tex);
        }
    }
    textures
}

// ============================================================================
// Player entity
// ============================================================================

/// The player's rail handcar. The platform is built once; the wheels are
/// rebuilt every frame so the spokes can turn with travel distance.
struct Handcar {
    x: f32,
    y: f32,
    platform: Vec<Vertex>, // static geometry, local coordinates
}

impl Handcar {
    fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            platform: vec![
                Vertex::new(-60.0, -38.0),
                Vertex::new(60.0, -38.0),
                Vertex::new(68.0, -16.0),
                Vertex::new(-68.0, -16.0),
            ],
        }
    }

    fn render(&self, buf: &mut PixelBuffer, camera: &Camera, travel: f32) {
        let master = Mat3::translation(self.x, self.y);

        // Static part: transform the cached platform quad
        let world = master.transform_all(&self.platform);
        let device: Vec<Vertex> = world.iter().map(|&v| camera.world_to_device(v)).collect();
        fill_polygon(buf, &device, FillStyle::Solid((140, 60, 40)));

        // Procedural part: wheel spokes rebuilt from the travel distance
        let wheel_angle = -travel * 1.8;
        for wheel_x in [-38.0f32, 38.0] {
            let hub = camera.world_to_device(master.transform(Vertex::new(wheel_x, 0.0)));
            let radius = (16.0 * camera.zoom()).round() as i32;
            draw_ellipse(buf, hub, radius, radius, (30, 30, 34));

            for step in 0..3 {
                let spoke = Mat3::combine(&[
                    Mat3::rotation(wheel_angle + step as f32 * 60.0),
                    Mat3::translation(self.x + wheel_x, self.y),
                ]);
                let local = [
                    Vertex::new(-15.0, -1.5),
                    Vertex::new(15.0, -1.5),
                    Vertex::new(15.0, 1.5),
                    Vertex::new(-15.0, 1.5),
                ];
                let device: Vec<Vertex> = spoke
                    .transform_all(&local)
                    .iter()
                    .map(|&v| camera.world_to_device(v))
                    .collect();
                fill_polygon(buf, &device, FillStyle::Solid((70, 70, 76)));
            }
        }
    }
}

// ============================================================================
// Frame rendering
// ============================================================================

fn render_sky(buf: &mut PixelBuffer, cam_x: f32) {
    let w = buf.width() as f32;
    let h = buf.height() as f32;
    fill_polygon(
        buf,
        &[
            Vertex::new(0.0, 0.0),
            Vertex::new(w, 0.0),
            Vertex::new(w, h),
            Vertex::new(0.0, h),
        ],
        FillStyle::VerticalGradient((8, 10, 30), (45, 40, 70)),
    );

    // Deterministic starfield, barely scrolling
    let mut rng = Rng::new(9001);
    for _ in 0..90 {
        let x = rng.range_f32(0.0, w * 1.2) - cam_x * 0.02;
        let y = rng.range_f32(0.0, h * 0.6);
        let shade = 140 + (rng.next_f32() * 100.0) as u8;
        buf.put_pixel(x as i32, y as i32, (shade, shade, shade));
    }

    // Moon: midpoint ellipse outline, then a bounded flood fill from its
    // center seed
    let moon = Vertex::new(w * 0.75 - cam_x * 0.02, h * 0.18);
    draw_ellipse(buf, moon, 34, 34, MOON_OUTLINE);
    flood_fill(
        buf,
        moon,
        MOON_FILL,
        FloodMode::Boundary(MOON_OUTLINE),
        Connectivity::Four,
    );
}

/// Draw one scene shape. Parallax layers bypass the camera matrix and
/// scroll by a fraction of the window offset; textured parallax layers
/// additionally go through the cropped/scaled texture cache and a blit
/// instead of per-pixel sampling.
fn render_shape(
    buf: &mut PixelBuffer,
    camera: &Camera,
    shape: &Shape,
    asset_id: usize,
    textures: &HashMap<String, Texture>,
    cache: &mut TextureCache,
) {
    let cam_x = camera.window().x_min;

    if (shape.parallax - 1.0).abs() < f32::EPSILON {
        // Foreground: full window-to-viewport mapping
        let device: Vec<Vertex> = shape
            .vertices
            .iter()
            .map(|&v| camera.world_to_device(v))
            .collect();
        match &shape.style {
            ShapeStyle::Solid { color } => fill_polygon(buf, &device, FillStyle::Solid(*color)),
            ShapeStyle::VerticalGradient { top, bottom } => {
                fill_polygon(buf, &device, FillStyle::VerticalGradient(*top, *bottom));
            },
            ShapeStyle::Textured { texture } => {
                if let Some(tex) = textures.get(texture) {
                    fill_polygon(buf, &device, FillStyle::Textured(tex));
                }
            },
        }
        return;
    }

    // Background layer: offset by a fraction of the camera scroll
    let offset_x = -cam_x * shape.parallax;
    let shifted: Vec<Vertex> = shape
        .vertices
        .iter()
        .map(|&v| Vertex::with_uv(v.x + offset_x, v.y, v.u, v.v))
        .collect();

    // Reject layers fully outside the viewport
    let (mut x_min, mut x_max) = (f32::MAX, f32::MIN);
    let (mut y_min, mut y_max) = (f32::MAX, f32::MIN);
    for v in &shifted {
        x_min = x_min.min(v.x);
        x_max = x_max.max(v.x);
        y_min = y_min.min(v.y);
        y_max = y_max.max(v.y);
    }
    if x_max < 0.0 || x_min > buf.width() as f32 {
        return;
    }

    match &shape.style {
        ShapeStyle::Solid { color } => fill_polygon(buf, &shifted, FillStyle::Solid(*color)),
        ShapeStyle::VerticalGradient { top, bottom } => {
            fill_polygon(buf, &shifted, FillStyle::VerticalGradient(*top, *bottom));
        },
        ShapeStyle::Textured { texture } => {
            let Some(tex) = textures.get(texture) else {
                return;
            };
            // Cached fast path: crop the uv bounding box once, scale it to
            // the layer's pixel size, and blit on every later frame
            let (w, h) = ((x_max - x_min) as u32, (y_max - y_min) as u32);
            if w == 0 || h == 0 {
                return;
            }
            let (mut u_min, mut u_max) = (f32::MAX, f32::MIN);
            let (mut v_min, mut v_max) = (f32::MAX, f32::MIN);
            for v in &shifted {
                u_min = u_min.min(v.u);
                u_max = u_max.max(v.u);
                v_min = v_min.min(v.v);
                v_max = v_max.max(v.v);
            }
            let crop = (
                (u_min * tex.width() as f32) as u32,
                (v_min * tex.height() as f32) as u32,
                ((u_max - u_min) * tex.width() as f32) as u32,
                ((v_max - v_min) * tex.height() as f32) as u32,
            );
            let scaled = cache.scaled(asset_id, tex, crop, w, h);
            buf.blit_texture(scaled, x_min as i32, y_min as i32);
        },
    }
}

/// Rails and sleepers, drawn with the clipped line path
fn render_track(buf: &mut PixelBuffer, camera: &Camera, world_width: f32, ground_top: f32) {
    let rail_y = [ground_top + 12.0, ground_top + 26.0];
    for y in rail_y {
        let a = camera.world_to_device(Vertex::new(0.0, y));
        let b = camera.world_to_device(Vertex::new(world_width, y));
        draw_line(buf, a, b, RAIL_COLOR);
    }

    let mut x = 0.0;
    while x < world_width {
        let a = camera.world_to_device(Vertex::new(x, rail_y[0] - 4.0));
        let b = camera.world_to_device(Vertex::new(x + 8.0, rail_y[1] + 4.0));
        draw_line(buf, a, b, (80, 62, 48));
        x += 46.0;
    }
}

/// Screen-space HUD: one heart per 20 health, dimmed when lost
fn draw_hearts(buf: &mut PixelBuffer, health: i32, max_health: i32) {
    let total = (max_health / 20).max(1);
    let current = (health + 19) / 20;

    for i in 0..total {
        let color: Color = if i < current { (255, 0, 0) } else { (50, 50, 50) };
        let cx = 30.0 + i as f32 * 40.0;
        let cy = 30.0;
        let size = 15.0;

        let heart = [
            Vertex::new(cx, cy + size),
            Vertex::new(cx - size, cy - size / 2.0),
            Vertex::new(cx - size / 2.0, cy - size),
            Vertex::new(cx, cy - size / 2.0),
            Vertex::new(cx + size / 2.0, cy - size),
            Vertex::new(cx + size, cy - size / 2.0),
        ];
        fill_polygon(buf, &heart, FillStyle::Solid(color));
    }
}

fn main() -> Result<(), String> {
    let (width, height, vsync) = parse_args();

    let (mut display, texture_creator) = Display::with_options("trackside", width, height, vsync)?;
    let mut target = RenderTarget::with_size(&texture_creator, width, height)?;
    let mut buffer = PixelBuffer::with_size(width, height);

    let scene = Scene::load(SCENE_PATH).unwrap_or_else(|_| demo_scene(height as f32));
    let textures = load_textures(&scene);
    let mut cache = TextureCache::new();

    let mut camera = Camera::new(scene.world_width, scene.world_height, width as f32, height as f32);
    let mut player = Handcar::new(300.0, height as f32 - 124.0);
    let mut zoom = 1.0f32;

    let mut fps_counter = FpsCounter::new(60);
    let mut show_fps = false;
    let mut moving_left = false;
    let mut moving_right = false;
    let mut travel = 0.0f32;

    println!("=== trackside ===");
    println!("Scene: {} ({} shapes)", scene.name, scene.shapes.len());
    println!("Left/Right move, Up/Down zoom, S save scene, F fps, Esc quit");

    'running: loop {
        let (dt, avg_fps) = fps_counter.tick();

        for event in display.poll_events() {
            match event {
                InputEvent::Quit | InputEvent::KeyDown(Keycode::Escape) => break 'running,
                InputEvent::KeyDown(Keycode::Left) => moving_left = true,
                InputEvent::KeyUp(Keycode::Left) => moving_left = false,
                InputEvent::KeyDown(Keycode::Right) => moving_right = true,
                InputEvent::KeyUp(Keycode::Right) => moving_right = false,
                InputEvent::KeyDown(Keycode::Up) => {
                    zoom = (zoom * 1.25).min(4.0);
                    camera.set_zoom(zoom);
                },
                InputEvent::KeyDown(Keycode::Down) => {
                    zoom = (zoom / 1.25).max(0.25);
                    camera.set_zoom(zoom);
                },
                InputEvent::KeyDown(Keycode::F) => show_fps = !show_fps,
                InputEvent::KeyDown(Keycode::S) => match scene.save(SCENE_PATH) {
                    Ok(()) => println!("scene saved to {}", SCENE_PATH),
                    Err(err) => println!("scene save failed: {}", err),
                },
                _ => {},
            }
        }

        // Advance the player and let the camera chase it
        let mut dx = 0.0;
        if moving_left {
            dx -= PLAYER_SPEED * dt;
        }
        if moving_right {
            dx += PLAYER_SPEED * dt;
        }
        player.x = (player.x + dx).clamp(0.0, scene.world_width);
        travel += dx;
        camera.follow(player.x);

        // Draw back to front
        let cam_x = camera.window().x_min;
        render_sky(&mut buffer, cam_x);
        for (asset_id, shape) in scene.shapes.iter().enumerate() {
            render_shape(&mut buffer, &camera, shape, asset_id, &textures, &mut cache);
        }
        render_track(
            &mut buffer,
            &camera,
            scene.world_width,
            scene.world_height - 120.0,
        );
        player.render(&mut buffer, &camera, travel);
        draw_hearts(&mut buffer, 80, 100);

        if show_fps {
            println!("fps: {:.1}", avg_fps);
        }

        display.present(&mut target, &buffer)?;
    }

    Ok(())
}
