//! Frame driver shell
//!
//! `QuizApp` owns every piece of mutable state and is the only thing the
//! platform layer talks to. The platform forwards pointer events and calls
//! [`QuizApp::frame`] once per display refresh; all mutation happens inside
//! those calls on one thread.

use glam::Vec2;

use crate::bank::QuestionBank;
use crate::renderer::{Surface, palette};
use crate::settings::Settings;
use crate::sim::{CursorTrail, FrameContext, ParticleEngine, Quiz, QuizEvent, QuizPhase};

/// `MouseEvent.button` value of the primary (usually left) button
pub const PRIMARY_BUTTON: i16 = 0;

/// The whole application state
#[derive(Debug, Clone)]
pub struct QuizApp {
    quiz: Quiz,
    particles: ParticleEngine,
    trail: CursorTrail,
    settings: Settings,
    pointer: Vec2,
    frame_count: u64,
}

impl QuizApp {
    pub fn new(bank: QuestionBank, settings: Settings) -> Self {
        let seed = settings.effective_seed();
        log::info!("Particle seed: {seed}");

        let mut particles = ParticleEngine::new(seed);
        particles.set_enabled(settings.particles);

        Self {
            quiz: Quiz::new(bank),
            particles,
            trail: CursorTrail::default(),
            settings,
            pointer: Vec2::ZERO,
            frame_count: 0,
        }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn particles(&self) -> &ParticleEngine {
        &self.particles
    }

    pub fn trail(&self) -> &CursorTrail {
        &self.trail
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> QuizPhase {
        self.quiz.phase()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Track the pointer in viewport coordinates
    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.pointer = pos;
    }

    /// Mouse press; only the primary button answers or advances
    pub fn mouse_pressed(&mut self, button: i16, pos: Vec2) -> QuizEvent {
        if button != PRIMARY_BUTTON {
            return QuizEvent::Ignored;
        }
        self.pointer_pressed(pos)
    }

    /// Pointer press in viewport coordinates
    pub fn pointer_pressed(&mut self, pos: Vec2) -> QuizEvent {
        self.pointer = pos;
        self.quiz.handle_pointer_press(pos, &mut self.particles)
    }

    /// Advance frame-based state: the frame counter and the cursor trail
    pub fn update(&mut self) {
        self.frame_count = self.frame_count.wrapping_add(1);
        if self.settings.cursor_trail {
            self.trail.record_position(self.pointer);
        }
    }

    /// Draw one frame. Also runs the particle engine, so call exactly once per frame.
    pub fn render(&mut self, surface: &mut dyn Surface) {
        surface.clear(palette::BACKGROUND);

        if self.settings.cursor_trail {
            self.trail.render(surface, self.frame_count);
        }

        let ctx = FrameContext {
            pointer: self.pointer,
            frame_count: self.frame_count,
            reduced_motion: self.settings.reduced_motion,
        };
        self.quiz.render(surface, &mut self.particles, &ctx);
    }

    /// `update` then `render`
    pub fn frame(&mut self, surface: &mut dyn Surface) {
        self.update();
        self.render(surface);
    }
}
