//! Recorded draw calls
//!
//! `CommandList` implements [`Surface`] by storing every call. Tests inspect
//! it to check what a frame would have drawn; the native build uses it for a
//! headless smoke run.

use glam::Vec2;

use super::{Color, Rect, Surface, TextStyle};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Rect {
        rect: Rect,
        corner_radius: f32,
        color: Color,
    },
    Polygon {
        points: Vec<Vec2>,
        color: Color,
    },
    Ellipse {
        center: Vec2,
        diameter: f32,
        color: Color,
    },
    Text {
        text: String,
        pos: Vec2,
        style: TextStyle,
    },
}

/// A [`Surface`] that records instead of drawing
#[derive(Debug, Clone, Default)]
pub struct CommandList {
    pub commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// All ellipses drawn, in order
    pub fn ellipses(&self) -> impl Iterator<Item = (Vec2, f32, Color)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Ellipse {
                center,
                diameter,
                color,
            } => Some((*center, *diameter, *color)),
            _ => None,
        })
    }

    /// All rectangles drawn, in order
    pub fn rects(&self) -> impl Iterator<Item = (Rect, Color)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Rect { rect, color, .. } => Some((*rect, *color)),
            _ => None,
        })
    }

    /// All text strings drawn, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }
}

impl Surface for CommandList {
    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, corner_radius: f32, color: Color) {
        self.commands.push(DrawCommand::Rect {
            rect,
            corner_radius,
            color,
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
        });
    }

    fn fill_ellipse(&mut self, center: Vec2, diameter: f32, color: Color) {
        self.commands.push(DrawCommand::Ellipse {
            center,
            diameter,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, style: TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            style,
        });
    }
}
