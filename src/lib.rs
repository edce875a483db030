//! Spark Quiz - a single-screen multiple-choice quiz with particle feedback
//!
//! Core modules:
//! - `sim`: Particle engine, cursor trail, option layout and quiz state machine
//! - `renderer`: Draw surface abstraction (command recorder, HTML canvas backend)
//! - `bank`: Question bank loading from CSV
//! - `settings`: Player-facing configuration
//! - `app`: Frame driver shell tying input, simulation and drawing together

pub mod app;
pub mod bank;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::QuizApp;
pub use bank::{BankError, QuestionBank, QuestionRecord};
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Layout and animation constants
pub mod consts {
    /// Logical viewport dimensions
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Option buttons span the viewport minus this margin on each side
    pub const OPTION_MARGIN_X: f32 = 100.0;
    /// Vertical centre of the first option button
    pub const OPTION_FIRST_Y: f32 = 200.0;
    /// Distance between option button centres
    pub const OPTION_SPACING: f32 = 80.0;
    /// Half the height of an option button
    pub const OPTION_HALF_HEIGHT: f32 = 25.0;
    pub const OPTION_CORNER_RADIUS: f32 = 10.0;

    /// Particle life starts here and doubles as its alpha
    pub const PARTICLE_LIFE: i32 = 255;
    /// Life lost per advance
    pub const PARTICLE_LIFE_DECAY: i32 = 4;
    /// Size multiplier per advance
    pub const PARTICLE_SHRINK: f32 = 0.98;
    /// Particles per feedback emission
    pub const DEFAULT_EMISSION: usize = 20;

    /// Number of pointer positions kept by the cursor trail
    pub const TRAIL_LENGTH: usize = 15;
    /// Trail star rotation per frame (radians)
    pub const TRAIL_SPIN: f32 = 0.05;
}

/// Centre of the viewport, where the result burst is emitted
#[inline]
pub fn viewport_center() -> Vec2 {
    Vec2::new(consts::VIEWPORT_WIDTH / 2.0, consts::VIEWPORT_HEIGHT / 2.0)
}

/// Linearly re-map `value` from `[from_lo, from_hi]` onto `[to_lo, to_hi]`
#[inline]
pub fn remap(value: f32, from_lo: f32, from_hi: f32, to_lo: f32, to_hi: f32) -> f32 {
    if from_hi == from_lo {
        return to_lo;
    }
    to_lo + (value - from_lo) / (from_hi - from_lo) * (to_hi - to_lo)
}
