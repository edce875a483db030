//! Simulation module
//!
//! Everything with state that changes frame to frame lives here:
//! - Particle engine (cosmetic feedback)
//! - Cursor trail
//! - Option layout and hit-testing
//! - Quiz state machine
//!
//! Nothing here touches a graphics API; drawing goes through `renderer::Surface`.

pub mod layout;
pub mod particles;
pub mod quiz;
pub mod trail;

pub use layout::{hit_test, option_rect};
pub use particles::{Kinematics, Particle, ParticleEngine, ParticleKind, Span, initial_kinematics};
pub use quiz::{FrameContext, Quiz, QuizEvent, QuizPhase, QuizSession, Tier};
pub use trail::{CursorTrail, TrailPoint};
