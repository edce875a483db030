//! Cursor trail
//!
//! Keeps the last few pointer positions and draws each as a small spinning
//! star, older points fainter and smaller.

use glam::Vec2;
use std::collections::VecDeque;

use crate::consts::{TRAIL_LENGTH, TRAIL_SPIN};
use crate::remap;
use crate::renderer::{Surface, palette, shapes};

/// One remembered pointer position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub pos: Vec2,
}

/// Alpha given to the newest point's rank
const MAX_ALPHA: f32 = 200.0;
const MIN_SIZE: f32 = 5.0;
const MAX_SIZE: f32 = 15.0;

/// Fixed-capacity FIFO of recent pointer positions (oldest first)
#[derive(Debug, Clone)]
pub struct CursorTrail {
    points: VecDeque<TrailPoint>,
    capacity: usize,
}

impl Default for CursorTrail {
    fn default() -> Self {
        Self::new(TRAIL_LENGTH)
    }
}

impl CursorTrail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Remember a pointer position, evicting the oldest past capacity
    pub fn record_position(&mut self, pos: Vec2) {
        self.points.push_back(TrailPoint { pos });
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points from oldest to newest
    pub fn points(&self) -> impl Iterator<Item = &TrailPoint> {
        self.points.iter()
    }

    /// Alpha and size for the point at `rank` (0 = oldest)
    pub fn style_for_rank(&self, rank: usize) -> (u8, f32) {
        let len = self.points.len() as f32;
        let rank = rank as f32;
        let alpha = remap(rank, 0.0, len, 0.0, MAX_ALPHA);
        let size = remap(rank, 0.0, len, MIN_SIZE, MAX_SIZE);
        (alpha.round().clamp(0.0, 255.0) as u8, size)
    }

    /// Draw every point as a crossed-bar star spun by `frame_count`
    pub fn render(&self, surface: &mut dyn Surface, frame_count: u64) {
        let theta = frame_count as f32 * TRAIL_SPIN;
        for (rank, point) in self.points.iter().enumerate() {
            let (alpha, size) = self.style_for_rank(rank);
            let color = palette::TRAIL.with_alpha(alpha);
            for bar in shapes::star_cross(point.pos, size, theta) {
                surface.fill_polygon(&bar, color);
            }
        }
    }
}
