//! Quiz state machine
//!
//! Two phases. `Quiz` walks the bank one question at a time: a press on an
//! option checks it, the next press anywhere moves on. After the last
//! question the machine enters `Result`, which it never leaves.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::layout::{hit_test, option_center_y, option_rect};
use super::particles::{ParticleEngine, ParticleKind};
use crate::bank::{OptionKey, QuestionBank, QuestionRecord};
use crate::consts::*;
use crate::renderer::{Color, Rect, Surface, TextStyle, palette};
use crate::viewport_center;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizPhase {
    /// Answering questions
    Quiz,
    /// Final score screen
    Result,
}

/// Performance bucket chosen from the final score ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    /// ratio >= 0.8
    Success,
    /// ratio >= 0.5
    Good,
    /// Everything else, including an empty bank
    TryAgain,
}

impl Tier {
    pub fn from_ratio(ratio: f32) -> Self {
        if ratio >= 0.8 {
            Tier::Success
        } else if ratio >= 0.5 {
            Tier::Good
        } else {
            Tier::TryAgain
        }
    }

    pub fn burst_kind(&self) -> ParticleKind {
        match self {
            Tier::Success => ParticleKind::Success,
            Tier::Good => ParticleKind::Good,
            Tier::TryAgain => ParticleKind::TryAgain,
        }
    }

    /// Particles in the one-shot result burst
    pub fn burst_count(&self) -> usize {
        match self {
            Tier::Success => 100,
            Tier::Good => 50,
            Tier::TryAgain => 30,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Tier::Success => "🎉 Excellent! Outstanding result! 🎉",
            Tier::Good => "👍 Well done! Keep it up! 👍",
            Tier::TryAgain => "💪 Keep going! You'll get there! 💪",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Tier::Success => palette::TIER_SUCCESS,
            Tier::Good => palette::TIER_GOOD,
            Tier::TryAgain => palette::TIER_TRY_AGAIN,
        }
    }
}

/// What a single input did to the quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizEvent {
    /// Nothing changed
    Ignored,
    /// An option was picked and checked
    Answered { key: OptionKey, correct: bool },
    /// Moved on to the question at `index`
    Advanced { index: usize },
    /// Last question done; the result screen is up
    Finished { score: usize, total: usize, tier: Tier },
}

/// Mutable progress through the bank
///
/// Invariants: `current_index <= question_count`, `checked` is only ever
/// true in the `Quiz` phase, and `score <= current_index + checked as usize`.
/// A checked correct answer scores before the index moves on, so the strict
/// `score <= current_index` holds whenever `checked` is false, in particular
/// after every `advance_question`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSession {
    pub current_index: usize,
    pub score: usize,
    pub selected: Option<OptionKey>,
    pub checked: bool,
    pub phase: QuizPhase,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self {
            current_index: 0,
            score: 0,
            selected: None,
            checked: false,
            phase: QuizPhase::Quiz,
        }
    }
}

/// Per-frame inputs the quiz needs for drawing
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameContext {
    /// Current pointer position, for hover highlighting
    pub pointer: Vec2,
    pub frame_count: u64,
    /// Suppress the option wobble
    pub reduced_motion: bool,
}

/// The question bank plus the session walking through it
#[derive(Debug, Clone)]
pub struct Quiz {
    bank: QuestionBank,
    session: QuizSession,
}

impl Quiz {
    /// Start at the first question. An empty bank goes straight to the
    /// result screen with a zero ratio.
    pub fn new(bank: QuestionBank) -> Self {
        let mut session = QuizSession::default();
        if bank.is_empty() {
            log::warn!("No questions loaded, showing result screen");
            session.phase = QuizPhase::Result;
        }
        Self { bank, session }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn phase(&self) -> QuizPhase {
        self.session.phase
    }

    pub fn question_count(&self) -> usize {
        self.bank.len()
    }

    /// The question on screen, if still in the quiz phase
    pub fn current_question(&self) -> Option<&QuestionRecord> {
        match self.session.phase {
            QuizPhase::Quiz => self.bank.get(self.session.current_index),
            QuizPhase::Result => None,
        }
    }

    /// Final score ratio in `[0, 1]`; zero for an empty bank
    pub fn score_ratio(&self) -> f32 {
        if self.bank.is_empty() {
            return 0.0;
        }
        self.session.score as f32 / self.bank.len() as f32
    }

    pub fn tier(&self) -> Tier {
        Tier::from_ratio(self.score_ratio())
    }

    /// Route a pointer press according to the current phase
    pub fn handle_pointer_press(&mut self, pos: Vec2, particles: &mut ParticleEngine) -> QuizEvent {
        match (self.session.phase, self.session.checked) {
            (QuizPhase::Quiz, false) => match hit_test(pos) {
                Some(key) => {
                    self.session.selected = Some(key);
                    self.check_answer(key, pos, particles)
                }
                None => QuizEvent::Ignored,
            },
            (QuizPhase::Quiz, true) => self.advance_question(particles),
            // Restarting from the result screen is not supported
            (QuizPhase::Result, _) => QuizEvent::Ignored,
        }
    }

    /// Mark the current question checked against `key`, scoring and
    /// emitting feedback at `origin`. Does not move to the next question.
    pub fn check_answer(
        &mut self,
        key: OptionKey,
        origin: Vec2,
        particles: &mut ParticleEngine,
    ) -> QuizEvent {
        if self.session.checked {
            return QuizEvent::Ignored;
        }
        let Some(question) = self.current_question() else {
            return QuizEvent::Ignored;
        };
        let correct = question.is_correct(key);

        self.session.checked = true;
        self.session.selected = Some(key);
        if correct {
            self.session.score += 1;
            particles.emit(ParticleKind::Praise, origin, DEFAULT_EMISSION);
        } else {
            particles.emit(ParticleKind::Encourage, origin, DEFAULT_EMISSION);
        }

        log::debug!(
            "Question {} answered {key} ({})",
            self.session.current_index + 1,
            if correct { "correct" } else { "wrong" }
        );
        QuizEvent::Answered { key, correct }
    }

    /// Move to the next question, or to the result screen after the last one
    pub fn advance_question(&mut self, particles: &mut ParticleEngine) -> QuizEvent {
        if self.session.phase == QuizPhase::Result {
            return QuizEvent::Ignored;
        }

        self.session.current_index += 1;
        self.session.selected = None;
        self.session.checked = false;

        if self.session.current_index < self.bank.len() {
            return QuizEvent::Advanced {
                index: self.session.current_index,
            };
        }

        self.session.phase = QuizPhase::Result;
        let tier = self.tier();
        particles.emit(tier.burst_kind(), viewport_center(), tier.burst_count());

        log::info!(
            "Quiz finished: {} / {} ({:?})",
            self.session.score,
            self.bank.len(),
            tier
        );
        QuizEvent::Finished {
            score: self.session.score,
            total: self.bank.len(),
            tier,
        }
    }

    /// Draw the current phase and run the particle engine for this frame
    pub fn render(&self, surface: &mut dyn Surface, particles: &mut ParticleEngine, ctx: &FrameContext) {
        match self.session.phase {
            QuizPhase::Quiz => self.render_quiz(surface, ctx),
            QuizPhase::Result => self.render_result(surface),
        }
        particles.run(surface);
    }

    fn render_quiz(&self, surface: &mut dyn Surface, ctx: &FrameContext) {
        let Some(question) = self.current_question() else {
            return;
        };
        let s = &self.session;
        let frame = ctx.frame_count as f32;

        // Progress
        let hud = TextStyle::new(18.0, palette::HUD_TEXT);
        surface.draw_text(
            &format!("Score: {} / {}", s.score, s.current_index),
            Vec2::new(600.0, 50.0),
            hud,
        );
        surface.draw_text(
            &format!("Question {} / {}", s.current_index + 1, self.bank.len()),
            Vec2::new(100.0, 50.0),
            hud,
        );

        surface.draw_text(
            &question.prompt,
            Vec2::new(OPTION_MARGIN_X, 120.0),
            TextStyle::new(24.0, palette::TEXT).wrapped(VIEWPORT_WIDTH - 2.0 * OPTION_MARGIN_X),
        );

        for key in OptionKey::ALL {
            let rect = option_rect(key);
            let hovered = rect.contains(ctx.pointer);

            let (color, wobble) = if !s.checked {
                if hovered {
                    (palette::OPTION_HOVER, (frame * 0.1).sin() * 3.0)
                } else {
                    (palette::OPTION_IDLE, 0.0)
                }
            } else if question.is_correct(key) {
                (palette::OPTION_CORRECT, (frame * 0.2).sin() * 5.0)
            } else if s.selected == Some(key) {
                (palette::OPTION_WRONG, 0.0)
            } else {
                (palette::OPTION_IDLE, 0.0)
            };
            let offset = if ctx.reduced_motion {
                Vec2::ZERO
            } else {
                Vec2::splat(wobble)
            };

            surface.fill_rect(rect.translated(offset), OPTION_CORNER_RADIUS, color);
            surface.draw_text(
                &format!("{key}. {}", question.option(key)),
                Vec2::new(OPTION_MARGIN_X + 20.0, option_center_y(key)) + offset,
                TextStyle::new(18.0, palette::TEXT),
            );
        }

        if s.checked {
            surface.draw_text(
                "Click anywhere to continue...",
                Vec2::new(VIEWPORT_WIDTH / 2.0 - 100.0, VIEWPORT_HEIGHT - 50.0),
                TextStyle::new(24.0, palette::PROMPT),
            );
        }
    }

    fn render_result(&self, surface: &mut dyn Surface) {
        let tier = self.tier();
        let center = viewport_center();

        // Translucent wash, leaves a fading trail behind the burst
        surface.fill_rect(
            Rect::new(0.0, 0.0, VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            0.0,
            palette::RESULT_OVERLAY,
        );

        surface.draw_text(
            tier.message(),
            center - Vec2::new(0.0, 50.0),
            TextStyle::new(40.0, tier.color()).centered(),
        );
        surface.draw_text(
            &format!("Final score: {} / {}", self.session.score, self.bank.len()),
            center + Vec2::new(0.0, 30.0),
            TextStyle::new(50.0, tier.color()).centered(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::CommandList;

    fn bank(correct: &[OptionKey]) -> QuestionBank {
        QuestionBank::new(
            correct
                .iter()
                .enumerate()
                .map(|(i, key)| QuestionRecord::new(&format!("Q{i}"), "a", "b", "c", *key))
                .collect(),
        )
    }

    fn press(key: OptionKey) -> Vec2 {
        Vec2::new(400.0, option_center_y(key))
    }

    /// Answer the current question with `key`, then advance
    fn answer(quiz: &mut Quiz, engine: &mut ParticleEngine, key: OptionKey) -> QuizEvent {
        quiz.handle_pointer_press(press(key), engine);
        quiz.handle_pointer_press(Vec2::ZERO, engine)
    }

    #[test]
    fn test_initial_state() {
        let quiz = Quiz::new(bank(&[OptionKey::A]));
        assert_eq!(quiz.session(), &QuizSession::default());
        assert_eq!(quiz.phase(), QuizPhase::Quiz);
        assert_eq!(quiz.current_question().unwrap().prompt, "Q0");
    }

    #[test]
    fn test_correct_answer_scores_and_praises() {
        let mut quiz = Quiz::new(bank(&[OptionKey::B, OptionKey::A]));
        let mut engine = ParticleEngine::new(1);

        let event = quiz.handle_pointer_press(press(OptionKey::B), &mut engine);
        assert_eq!(
            event,
            QuizEvent::Answered {
                key: OptionKey::B,
                correct: true
            }
        );
        assert_eq!(quiz.session().score, 1);
        assert!(quiz.session().checked);
        assert_eq!(quiz.session().current_index, 0);
        assert_eq!(engine.len(), DEFAULT_EMISSION);
        assert!(engine.particles().iter().all(|p| p.kind == ParticleKind::Praise));
        assert!(engine.particles().iter().all(|p| p.pos == press(OptionKey::B)));
    }

    #[test]
    fn test_wrong_answer_encourages() {
        let mut quiz = Quiz::new(bank(&[OptionKey::B]));
        let mut engine = ParticleEngine::new(1);

        quiz.handle_pointer_press(press(OptionKey::C), &mut engine);
        assert_eq!(quiz.session().score, 0);
        assert_eq!(quiz.session().selected, Some(OptionKey::C));
        assert!(engine.particles().iter().all(|p| p.kind == ParticleKind::Encourage));
    }

    #[test]
    fn test_press_outside_options_ignored() {
        let mut quiz = Quiz::new(bank(&[OptionKey::A]));
        let mut engine = ParticleEngine::new(1);

        let event = quiz.handle_pointer_press(Vec2::new(400.0, 240.0), &mut engine);
        assert_eq!(event, QuizEvent::Ignored);
        assert!(!quiz.session().checked);
        assert!(engine.is_empty());
    }

    #[test]
    fn test_press_after_check_advances() {
        let mut quiz = Quiz::new(bank(&[OptionKey::A, OptionKey::B]));
        let mut engine = ParticleEngine::new(1);

        let event = answer(&mut quiz, &mut engine, OptionKey::A);
        assert_eq!(event, QuizEvent::Advanced { index: 1 });
        assert!(!quiz.session().checked);
        assert_eq!(quiz.session().selected, None);
        assert_eq!(quiz.current_question().unwrap().prompt, "Q1");
    }

    #[test]
    fn test_score_leads_index_only_while_checked() {
        let mut quiz = Quiz::new(bank(&[OptionKey::A, OptionKey::B]));
        let mut engine = ParticleEngine::new(1);

        quiz.handle_pointer_press(press(OptionKey::A), &mut engine);
        let s = quiz.session();
        assert_eq!((s.score, s.current_index, s.checked), (1, 0, true));
        assert!(s.score <= s.current_index + s.checked as usize);

        quiz.handle_pointer_press(Vec2::ZERO, &mut engine);
        let s = quiz.session();
        assert!(!s.checked);
        assert!(s.score <= s.current_index);
    }

    #[test]
    fn test_check_answer_only_once_per_question() {
        let mut quiz = Quiz::new(bank(&[OptionKey::A]));
        let mut engine = ParticleEngine::new(1);

        quiz.check_answer(OptionKey::A, Vec2::ZERO, &mut engine);
        let again = quiz.check_answer(OptionKey::A, Vec2::ZERO, &mut engine);
        assert_eq!(again, QuizEvent::Ignored);
        assert_eq!(quiz.session().score, 1);
    }

    #[test]
    fn test_scenario_good_tier() {
        use OptionKey::*;
        let mut quiz = Quiz::new(bank(&[A, B, C, A, B]));
        let mut engine = ParticleEngine::new(1);

        // correct, correct, wrong, correct, wrong
        let picks = [A, B, A, A, C];
        let mut last = QuizEvent::Ignored;
        for key in picks {
            last = answer(&mut quiz, &mut engine, key);
        }

        assert_eq!(quiz.session().score, 3);
        assert_eq!(quiz.phase(), QuizPhase::Result);
        assert!((quiz.score_ratio() - 0.6).abs() < 1e-6);
        assert_eq!(
            last,
            QuizEvent::Finished {
                score: 3,
                total: 5,
                tier: Tier::Good
            }
        );

        let burst = engine
            .particles()
            .iter()
            .filter(|p| p.kind == ParticleKind::Good)
            .count();
        assert_eq!(burst, 50);
        assert!(
            engine
                .particles()
                .iter()
                .filter(|p| p.kind == ParticleKind::Good)
                .all(|p| p.pos == viewport_center())
        );
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(Tier::from_ratio(1.0), Tier::Success);
        assert_eq!(Tier::from_ratio(0.8), Tier::Success);
        assert_eq!(Tier::from_ratio(0.79), Tier::Good);
        assert_eq!(Tier::from_ratio(0.5), Tier::Good);
        assert_eq!(Tier::from_ratio(0.49), Tier::TryAgain);
        assert_eq!(Tier::from_ratio(0.0), Tier::TryAgain);
        assert_eq!(Tier::Success.burst_count(), 100);
        assert_eq!(Tier::TryAgain.burst_count(), 30);
    }

    #[test]
    fn test_result_press_is_noop() {
        let mut quiz = Quiz::new(bank(&[OptionKey::A]));
        let mut engine = ParticleEngine::new(1);
        answer(&mut quiz, &mut engine, OptionKey::A);
        assert_eq!(quiz.phase(), QuizPhase::Result);

        let before = quiz.session().clone();
        let event = quiz.handle_pointer_press(press(OptionKey::A), &mut engine);
        assert_eq!(event, QuizEvent::Ignored);
        assert_eq!(quiz.session(), &before);
        assert_eq!(quiz.advance_question(&mut engine), QuizEvent::Ignored);
        assert_eq!(quiz.session().current_index, 1);
    }

    #[test]
    fn test_empty_bank_starts_at_result() {
        let mut quiz = Quiz::new(QuestionBank::default());
        let mut engine = ParticleEngine::new(1);

        assert_eq!(quiz.phase(), QuizPhase::Result);
        assert_eq!(quiz.score_ratio(), 0.0);
        assert_eq!(quiz.tier(), Tier::TryAgain);
        assert_eq!(quiz.handle_pointer_press(press(OptionKey::A), &mut engine), QuizEvent::Ignored);
        assert_eq!(quiz.session().current_index, 0);

        let mut frame = CommandList::new();
        quiz.render(&mut frame, &mut engine, &FrameContext::default());
        assert!(frame.has_text(Tier::TryAgain.message()));
        assert!(frame.has_text("0 / 0"));
    }

    #[test]
    fn test_render_quiz_styles() {
        let mut quiz = Quiz::new(bank(&[OptionKey::A, OptionKey::B]));
        let mut engine = ParticleEngine::new(1);
        let ctx = FrameContext {
            pointer: press(OptionKey::B),
            frame_count: 0,
            reduced_motion: true,
        };

        let mut frame = CommandList::new();
        quiz.render(&mut frame, &mut engine, &ctx);
        let colors: Vec<Color> = frame.rects().map(|(_, c)| c).collect();
        assert_eq!(
            colors,
            vec![palette::OPTION_IDLE, palette::OPTION_HOVER, palette::OPTION_IDLE]
        );
        assert!(frame.has_text("Question 1 / 2"));
        assert!(frame.has_text("Score: 0 / 0"));
        assert!(!frame.has_text("continue"));

        // Pick C on a question whose answer is A
        quiz.handle_pointer_press(press(OptionKey::C), &mut engine);
        let mut frame = CommandList::new();
        quiz.render(&mut frame, &mut engine, &ctx);
        let colors: Vec<Color> = frame.rects().map(|(_, c)| c).collect();
        assert_eq!(
            colors,
            vec![palette::OPTION_CORRECT, palette::OPTION_IDLE, palette::OPTION_WRONG]
        );
        assert!(frame.has_text("continue"));
        assert_eq!(frame.ellipses().count(), DEFAULT_EMISSION);
    }

    #[test]
    fn test_hover_wobble_moves_button() {
        let quiz = Quiz::new(bank(&[OptionKey::A]));
        let mut engine = ParticleEngine::new(1);
        let ctx = FrameContext {
            pointer: press(OptionKey::A),
            frame_count: 10,
            reduced_motion: false,
        };

        let mut frame = CommandList::new();
        quiz.render(&mut frame, &mut engine, &ctx);
        let (rect, _) = frame.rects().next().unwrap();
        let expected = (10.0f32 * 0.1).sin() * 3.0;
        assert!((rect.min.x - (OPTION_MARGIN_X + expected)).abs() < 1e-4);
    }

    #[test]
    fn test_result_screen_draws_overlay_and_score() {
        let mut quiz = Quiz::new(bank(&[OptionKey::A]));
        let mut engine = ParticleEngine::new(1);
        answer(&mut quiz, &mut engine, OptionKey::A);

        let mut frame = CommandList::new();
        quiz.render(&mut frame, &mut engine, &FrameContext::default());
        let (overlay, color) = frame.rects().next().unwrap();
        assert_eq!(overlay.size, Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT));
        assert_eq!(color, palette::RESULT_OVERLAY);
        assert!(frame.has_text(Tier::Success.message()));
        assert!(frame.has_text("Final score: 1 / 1"));
        // Praise from the answer plus the success burst, all still alive
        assert_eq!(frame.ellipses().count(), DEFAULT_EMISSION + 100);
    }
}
