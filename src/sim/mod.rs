//! Game loop and state machine
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - One tick per frame, clock passed in by the host
//! - Seeded RNG only
//! - No rendering, DOM or network dependencies

pub mod effects;
pub mod outcome;
pub mod question;
pub mod rocket;
pub mod selection;
pub mod session;
pub mod state;
pub mod tick;

pub use effects::{EffectsSystem, Particle, Star, Starfield};
pub use outcome::{CrewMember, Feedback, OutcomeEvaluator, SessionScore, Verdict};
pub use question::{Question, QuestionBank};
pub use rocket::RocketState;
pub use selection::{AnswerSlot, Rect, SelectionController, Viewport, layout_slots};
pub use session::SessionController;
pub use state::{GamePhase, ScheduledTask, SessionEvent, Snapshot};
pub use tick::TickInput;
