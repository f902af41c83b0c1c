//! Session controller - the game state machine
//!
//! Owns every piece of mutable game state. Phases move
//! `Loading -> Playing -> Flying -> Feedback -> (Playing | Finished)`.
//! Input operations never fail: anything arriving in the wrong phase is
//! logged and dropped so stray events cannot disturb the frame loop.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::effects::{EffectsSystem, Particle, Starfield};
use super::outcome::{CrewMember, Feedback, OutcomeEvaluator, SessionScore};
use super::question::{Question, QuestionBank};
use super::rocket::RocketState;
use super::selection::{AnswerSlot, SelectionController, Viewport, layout_slots};
use super::state::{GamePhase, ScheduledTask, SessionEvent, Snapshot};
use crate::consts::ROCKET_SIZE;
use crate::error::{DataLoadError, SettingsError};
use crate::markup;
use crate::report::SessionReport;
use crate::settings::Settings;
use crate::source::QuestionSource;

/// A single play session
#[derive(Debug, Clone)]
pub struct SessionController {
    pub(super) settings: Settings,
    pub(super) viewport: Viewport,
    pub(super) rng: Pcg32,
    pub(super) phase: GamePhase,
    pub(super) bank: Option<QuestionBank>,
    /// Index into the bank of the question on screen
    pub(super) current: Option<usize>,
    pub(super) slots: Vec<AnswerSlot>,
    pub(super) selection: SelectionController,
    pub(super) rocket: RocketState,
    pub(super) evaluator: OutcomeEvaluator,
    pub(super) effects: EffectsSystem,
    pub(super) stars: Starfield,
    pub(super) feedback: Option<Feedback>,
    /// Feedback auto-advance
    pub(super) auto_advance: ScheduledTask,
    pub(super) load_error: Option<DataLoadError>,
    pub(super) report: Option<SessionReport>,
    pub(super) events: Vec<SessionEvent>,
}

impl SessionController {
    /// Start a session in Loading. Fails on settings that could stall or
    /// break the frame loop.
    pub fn new(settings: Settings, viewport: Viewport) -> Result<Self, SettingsError> {
        settings.validate()?;
        let mut rng = Pcg32::seed_from_u64(settings.seed.unwrap_or_default());
        let stars = Starfield::new(settings.star_count, viewport, &mut rng);
        let rocket = RocketState::new(
            viewport.launch_pad(),
            settings.rocket_speed,
            settings.arrival_tolerance,
        );
        Ok(Self {
            viewport,
            rng,
            phase: GamePhase::Loading,
            bank: None,
            current: None,
            slots: Vec::new(),
            selection: SelectionController::default(),
            rocket,
            evaluator: OutcomeEvaluator::new(settings.reward),
            effects: EffectsSystem::new(settings.particle_spread, settings.particle_decay),
            stars,
            feedback: None,
            auto_advance: ScheduledTask::default(),
            load_error: None,
            report: None,
            events: Vec::new(),
            settings,
        })
    }

    // === Loading ===

    /// Fetch from `source` and start the session
    pub fn load_from(&mut self, source: &mut impl QuestionSource) -> Result<usize, DataLoadError> {
        match source.fetch() {
            Ok(raw) => self.load_questions(&raw),
            Err(e) => {
                self.fail_load(e.clone());
                Err(e)
            }
        }
    }

    /// Validate the question document and present the first question.
    /// Returns the number of playable questions.
    pub fn load_questions(&mut self, raw: &str) -> Result<usize, DataLoadError> {
        if let Some(error) = &self.load_error {
            log::debug!("Ignoring question data after a failed load");
            return Err(error.clone());
        }
        if self.phase != GamePhase::Loading {
            log::debug!("Ignoring question data in {:?}", self.phase);
            return Err(DataLoadError::AlreadyLoaded);
        }

        let bank = match QuestionBank::load(
            raw,
            self.settings.draw_policy,
            self.settings.question_cap,
            &mut self.rng,
        ) {
            Ok(bank) => bank,
            Err(e) => {
                self.fail_load(e.clone());
                return Err(e);
            }
        };

        let size = bank.size();
        self.bank = Some(bank);
        self.present_next();
        Ok(size)
    }

    /// The provider failed: park in Loading with the error on display
    pub fn fail_load(&mut self, error: DataLoadError) {
        if self.phase != GamePhase::Loading {
            return;
        }
        log::error!("Failed to load questions: {}", error);
        self.events.push(SessionEvent::LoadFailed(error.to_string()));
        self.load_error = Some(error);
    }

    // === Input surface ===

    /// Move the aim one slot left (`-1`) or right (`+1`)
    pub fn move_selection(&mut self, direction: i32) {
        if self.phase != GamePhase::Playing {
            log::debug!("move_selection ignored in {:?}", self.phase);
            return;
        }
        self.selection.shift(direction);
        self.aim_rocket();
    }

    /// Fire the rocket at the selected slot
    pub fn launch(&mut self) {
        if self.phase != GamePhase::Playing {
            log::debug!("launch ignored in {:?}", self.phase);
            return;
        }
        let slot = self.selection.selected();
        let Some(target) = self.selection.target(&self.slots).map(AnswerSlot::target) else {
            log::warn!("launch ignored: no answer slot {}", slot);
            return;
        };
        if self.rocket.launch(target) {
            self.phase = GamePhase::Flying;
            self.events.push(SessionEvent::Launched { slot });
        }
    }

    /// Leave the feedback screen (manual "continue")
    pub fn advance_after_feedback(&mut self) {
        if self.phase != GamePhase::Feedback {
            log::debug!("advance_after_feedback ignored in {:?}", self.phase);
            return;
        }
        self.auto_advance.cancel();
        self.leave_feedback();
    }

    // === Transitions ===

    /// Draw and show the next question, or finish when the bank says so
    pub(super) fn present_next(&mut self) {
        let Some(bank) = self.bank.as_mut() else {
            return;
        };
        let Some(index) = bank.draw(&mut self.rng) else {
            self.finish();
            return;
        };
        let number = bank.drawn();
        let Some(question) = bank.get(index) else {
            return;
        };

        self.slots = layout_slots(question, self.viewport).to_vec();
        self.current = Some(index);
        self.selection.reset();
        self.rocket.reset();
        self.effects.clear();
        self.feedback = None;
        self.evaluator.arm();
        self.aim_rocket();

        self.phase = GamePhase::Playing;
        log::info!("Question {} (bank #{})", number, index);
        self.events
            .push(SessionEvent::QuestionPresented { index, number });
    }

    /// Flying -> Feedback; runs exactly once per flight
    pub(super) fn on_arrival(&mut self, now_ms: f64) {
        if self.phase != GamePhase::Flying {
            return;
        }
        let selected = self.selection.selected();
        let Some(question) = self
            .current
            .and_then(|i| self.bank.as_ref().and_then(|b| b.get(i)))
        else {
            return;
        };
        let Some(verdict) = self.evaluator.evaluate(selected, question) else {
            return;
        };
        let explanation = question.explanation.clone();

        // Burst from the nose of the rocket
        let origin = self.rocket.pos - Vec2::new(0.0, ROCKET_SIZE / 2.0);
        self.effects
            .spawn_burst(origin, verdict, self.settings.burst_size, &mut self.rng);

        self.feedback = Some(Feedback {
            verdict,
            explanation,
            crew: CrewMember::pick(&mut self.rng),
        });
        self.phase = GamePhase::Feedback;
        self.auto_advance
            .schedule(now_ms + self.settings.feedback_delay_ms);
        self.events.push(SessionEvent::Arrived {
            verdict,
            score: self.evaluator.score(),
        });
    }

    /// Feedback -> Playing | Finished
    pub(super) fn leave_feedback(&mut self) {
        let has_more = self.bank.as_ref().is_some_and(QuestionBank::has_more);
        if has_more {
            self.present_next();
        } else {
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.auto_advance.cancel();
        self.feedback = None;
        let report = SessionReport::new(&self.evaluator.score(), self.settings.pass_threshold);
        log::info!(
            "Session finished: {}/{} = {}% ({})",
            report.final_score,
            report.total_possible,
            report.percent,
            if report.passed { "passed" } else { "failed" }
        );
        self.report = Some(report);
        self.phase = GamePhase::Finished;
        self.events.push(SessionEvent::Finished(report));
    }

    /// Idle heading follows the selected slot
    pub(super) fn aim_rocket(&mut self) {
        if let Some(slot) = self.selection.target(&self.slots) {
            self.rocket.aim_at(slot.target());
        }
    }

    // === Render / reporting surface ===

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn score(&self) -> SessionScore {
        self.evaluator.score()
    }

    pub fn selected(&self) -> usize {
        self.selection.selected()
    }

    pub fn slots(&self) -> &[AnswerSlot] {
        &self.slots
    }

    pub fn rocket(&self) -> &RocketState {
        &self.rocket
    }

    pub fn particles(&self) -> &[Particle] {
        self.effects.particles()
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn current_question(&self) -> Option<&Question> {
        let bank = self.bank.as_ref()?;
        bank.get(self.current?)
    }

    pub fn bank(&self) -> Option<&QuestionBank> {
        self.bank.as_ref()
    }

    pub fn load_error(&self) -> Option<&DataLoadError> {
        self.load_error.as_ref()
    }

    /// Final result, once Finished
    pub fn report(&self) -> Option<SessionReport> {
        self.report
    }

    pub fn is_auto_advance_pending(&self) -> bool {
        self.auto_advance.is_pending()
    }

    /// Take the events queued since the last call
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Everything the renderer needs for this frame
    pub fn snapshot(&self) -> Snapshot<'_> {
        let prompt = self.current_question().map(|q| q.prompt.as_str());
        Snapshot {
            phase: self.phase,
            viewport: self.viewport,
            rocket: &self.rocket,
            slots: &self.slots,
            selected: self.selection.selected(),
            particles: self.effects.particles(),
            stars: self.stars.stars(),
            score: self.evaluator.score(),
            prompt,
            prompt_segments: prompt.map(markup::segments).unwrap_or_default(),
            explanation_segments: self
                .feedback
                .as_ref()
                .map(|f| markup::segments(&f.explanation))
                .unwrap_or_default(),
            feedback: self.feedback.as_ref(),
            load_error: self.load_error.as_ref().map(ToString::to_string),
            report: self.report,
        }
    }
}
