//! Serializable level description
//!
//! A scene is the hand-off format between level data and the renderer:
//! named shapes, each an ordered vertex list with a fill style and a
//! parallax factor. Background layers use parallax < 1 so they scroll
//! slower than the camera window.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::math2d::Vertex;

/// Fill style by value, resolved against loaded textures at draw time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeStyle {
    Solid {
        color: (u8, u8, u8),
    },
    VerticalGradient {
        top: (u8, u8, u8),
        bottom: (u8, u8, u8),
    },
    /// Name of a texture asset known to the frontend's loader
    Textured {
        texture: String,
    },
}

fn default_parallax() -> f32 {
    1.0
}

/// A named drawable shape in world coordinates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub style: ShapeStyle,
    #[serde(default = "default_parallax")]
    pub parallax: f32,
}

impl Shape {
    pub fn new(name: impl Into<String>, vertices: Vec<Vertex>, style: ShapeStyle) -> Self {
        Self {
            name: name.into(),
            vertices,
            style,
            parallax: 1.0,
        }
    }

    pub fn with_parallax(mut self, parallax: f32) -> Self {
        self.parallax = parallax;
        self
    }
}

/// All shapes for one level, draw-ordered back to front
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    pub world_width: f32,
    pub world_height: f32,
    pub shapes: Vec<Shape>,
}

impl Scene {
    pub fn new(name: impl Into<String>, world_width: f32, world_height: f32) -> Self {
        Self {
            name: name.into(),
            world_width,
            world_height,
            shapes: Vec::new(),
        }
    }

    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Save scene to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Load scene from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let json = fs::read_to_string(path).map_err(|e| e.to_string())?;
        serde_json::from_str(&json).map_err(|e| e.to_string())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new("untitled", 800.0, 600.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_json_round_trip() {
        let mut scene = Scene::new("level-1", 4000.0, 600.0);
        scene.add_shape(
            Shape::new(
                "mountains",
                vec![
                    Vertex::new(0.0, 400.0),
                    Vertex::new(200.0, 250.0),
                    Vertex::new(400.0, 400.0),
                ],
                ShapeStyle::VerticalGradient {
                    top: (60, 70, 90),
                    bottom: (30, 35, 50),
                },
            )
            .with_parallax(0.3),
        );

        let json = serde_json::to_string(&scene).unwrap();
        let back: Scene = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, "level-1");
        assert_eq!(back.shapes.len(), 1);
        assert_eq!(back.shapes[0].parallax, 0.3);
        assert_eq!(back.shapes[0].vertices[1].x, 200.0);
    }

    #[test]
    fn test_parallax_defaults_to_one() {
        let json = r#"{
            "name": "ground",
            "vertices": [{"x": 0.0, "y": 0.0}],
            "style": {"kind": "solid", "color": [10, 20, 30]}
        }"#;
        let shape: Shape = serde_json::from_str(json).unwrap();
        assert_eq!(shape.parallax, 1.0);
        assert_eq!(shape.vertices[0].u, 0.0);
    }
}
