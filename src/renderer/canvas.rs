//! HTML canvas 2D backend

use glam::Vec2;
use std::f64::consts::TAU;
use web_sys::CanvasRenderingContext2d;

use super::{Color, Rect, Surface, TextAlign, TextStyle};

/// Draws onto a browser `CanvasRenderingContext2d`
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    /// Canvas pixels per logical viewport unit
    scale: f64,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d, scale: f64) -> Self {
        Self { ctx, scale }
    }

    /// Reset the transform at the start of a frame
    pub fn begin_frame(&self) {
        let _ = self
            .ctx
            .set_transform(self.scale, 0.0, 0.0, self.scale, 0.0, 0.0);
    }

    fn set_fill(&self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
    }

    fn rounded_rect_path(&self, rect: Rect, radius: f64) {
        let (x, y) = (rect.min.x as f64, rect.min.y as f64);
        let (w, h) = (rect.size.x as f64, rect.size.y as f64);
        let r = radius.min(w / 2.0).min(h / 2.0);

        self.ctx.begin_path();
        self.ctx.move_to(x + r, y);
        let _ = self.ctx.arc_to(x + w, y, x + w, y + h, r);
        let _ = self.ctx.arc_to(x + w, y + h, x, y + h, r);
        let _ = self.ctx.arc_to(x, y + h, x, y, r);
        let _ = self.ctx.arc_to(x, y, x + w, y, r);
        self.ctx.close_path();
    }

    /// Greedy line breaking on whitespace, falling back to characters for
    /// scripts without spaces
    fn wrap_lines(&self, text: &str, max_width: f64) -> Vec<String> {
        let width_of = |s: &str| {
            self.ctx
                .measure_text(s)
                .map(|m| m.width())
                .unwrap_or(0.0)
        };

        let mut lines = Vec::new();
        let mut current = String::new();
        let tokens: Vec<String> = if text.contains(' ') {
            text.split(' ').map(|w| format!("{w} ")).collect()
        } else {
            text.chars().map(String::from).collect()
        };

        for token in tokens {
            let candidate = format!("{current}{token}");
            if !current.is_empty() && width_of(candidate.trim_end()) > max_width {
                lines.push(current.trim_end().to_string());
                current = token;
            } else {
                current = candidate;
            }
        }
        if !current.is_empty() {
            lines.push(current.trim_end().to_string());
        }
        lines
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, color: Color) {
        self.set_fill(color);
        self.ctx.fill_rect(
            0.0,
            0.0,
            crate::consts::VIEWPORT_WIDTH as f64,
            crate::consts::VIEWPORT_HEIGHT as f64,
        );
    }

    fn fill_rect(&mut self, rect: Rect, corner_radius: f32, color: Color) {
        self.set_fill(color);
        if corner_radius > 0.0 {
            self.rounded_rect_path(rect, corner_radius as f64);
            self.ctx.fill();
        } else {
            self.ctx.fill_rect(
                rect.min.x as f64,
                rect.min.y as f64,
                rect.size.x as f64,
                rect.size.y as f64,
            );
        }
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.set_fill(color);
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn fill_ellipse(&mut self, center: Vec2, diameter: f32, color: Color) {
        self.set_fill(color);
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            (diameter / 2.0).max(0.0) as f64,
            0.0,
            TAU,
        );
        self.ctx.fill();
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, style: TextStyle) {
        self.set_fill(style.color);
        self.ctx.set_font(&format!("{}px sans-serif", style.size));
        self.ctx.set_text_baseline("middle");
        self.ctx.set_text_align(match style.align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        });

        match style.max_width {
            Some(width) => {
                let line_height = style.size as f64 * 1.25;
                for (i, line) in self.wrap_lines(text, width as f64).iter().enumerate() {
                    let _ = self.ctx.fill_text(
                        line,
                        pos.x as f64,
                        pos.y as f64 + i as f64 * line_height,
                    );
                }
            }
            None => {
                let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
            }
        }
    }
}
