//! Drawing surface abstraction
//!
//! The simulation never talks to a graphics API directly. It issues draw calls
//! against a [`Surface`], which is either the browser canvas or a
//! [`CommandList`] recorder used for tests and headless runs.

pub mod commands;
pub mod shapes;
#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use commands::{CommandList, DrawCommand};
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn gray(v: u8) -> Self {
        Self::rgb(v, v, v)
    }

    /// Same colour with a new alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// CSS `rgba()` string for canvas fill styles
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {:.3})",
            self.r,
            self.g,
            self.b,
            self.a as f32 / 255.0
        )
    }
}

/// Palette
pub mod palette {
    use super::Color;

    pub const BACKGROUND: Color = Color::gray(240);
    pub const OPTION_IDLE: Color = Color::gray(200);
    pub const OPTION_HOVER: Color = Color::rgb(180, 200, 255);
    pub const OPTION_CORRECT: Color = Color::rgb(100, 255, 100);
    pub const OPTION_WRONG: Color = Color::rgb(255, 100, 100);
    pub const TEXT: Color = Color::gray(30);
    pub const HUD_TEXT: Color = Color::gray(50);
    pub const PROMPT: Color = Color::rgb(50, 150, 255);
    pub const TRAIL: Color = Color::rgb(255, 255, 0);
    pub const RESULT_OVERLAY: Color = Color::rgba(20, 20, 50, 5);
    pub const TIER_SUCCESS: Color = Color::rgb(255, 200, 0);
    pub const TIER_GOOD: Color = Color::rgb(0, 200, 255);
    pub const TIER_TRY_AGAIN: Color = Color::rgb(255, 100, 100);
}

/// Axis-aligned rectangle in viewport units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Same rectangle moved by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            size: self.size,
        }
    }

    /// Half-open containment: left/top edges are inside, right/bottom are not
    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.min.x && p.x < max.x && p.y >= self.min.y && p.y < max.y
    }
}

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// How a piece of text is drawn. Text is always vertically centred on its anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub color: Color,
    pub align: TextAlign,
    /// Wrap width; `None` draws on a single line
    pub max_width: Option<f32>,
}

impl TextStyle {
    pub fn new(size: f32, color: Color) -> Self {
        Self {
            size,
            color,
            align: TextAlign::Left,
            max_width: None,
        }
    }

    pub fn centered(mut self) -> Self {
        self.align = TextAlign::Center;
        self
    }

    pub fn wrapped(mut self, width: f32) -> Self {
        self.max_width = Some(width);
        self
    }
}

/// A 2D target the quiz draws into, one frame at a time
pub trait Surface {
    /// Fill the whole frame with an opaque colour
    fn clear(&mut self, color: Color);
    /// Fill a rectangle, optionally with rounded corners
    fn fill_rect(&mut self, rect: Rect, corner_radius: f32, color: Color);
    /// Fill a closed convex polygon
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
    /// Fill a circle given its diameter
    fn fill_ellipse(&mut self, center: Vec2, diameter: f32, color: Color);
    fn draw_text(&mut self, text: &str, pos: Vec2, style: TextStyle);
}
