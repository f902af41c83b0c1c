//! Rocket Quiz entry point
//!
//! The browser build is driven from JavaScript through `rocket_quiz::web`.
//! Natively this runs a headless session with an autopilot, which is handy
//! for checking a question file end to end.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Rocket Quiz (native) starting...");

    let mut args = std::env::args().skip(1);
    let Some(questions_path) = args.next() else {
        eprintln!("usage: rocket-quiz <questions.json> [settings.json]");
        std::process::exit(2);
    };

    let mut settings = match args.next() {
        Some(path) => match rocket_quiz::Settings::load(std::path::Path::new(&path)) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => rocket_quiz::Settings::default(),
    };
    if settings.seed.is_none() {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.as_millis() as u64);
        settings.seed = Some(seed);
    }
    log::info!("Session seed: {:?}", settings.seed);

    let passed = autopilot::run(settings, &questions_path);
    std::process::exit(if passed { 0 } else { 1 });
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is rocket_quiz::web::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use rocket_quiz::consts::SLOT_COUNT;
    use rocket_quiz::sim::{GamePhase, SessionController, SessionEvent, TickInput, Viewport};
    use rocket_quiz::source::FileSource;
    use rocket_quiz::{LogReporter, ProgressReporter, Settings};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up on endless (random, uncapped) sessions
    const MAX_FRAMES: u64 = 60 * 60 * 60;
    /// How long the pilot "reads" the explanation before continuing
    const READ_MS: f64 = 1200.0;

    /// Play one session with random answers. Returns whether it passed.
    pub fn run(settings: Settings, questions_path: &str) -> bool {
        let mut pilot_rng = Pcg32::seed_from_u64(settings.seed.unwrap_or_default().wrapping_add(1));
        let mut session = match SessionController::new(settings, Viewport::new(1280.0, 720.0)) {
            Ok(session) => session,
            Err(e) => {
                log::error!("{}", e);
                return false;
            }
        };
        let mut reporter = LogReporter::default();

        if session.load_from(&mut FileSource::new(questions_path)).is_err() {
            return false;
        }

        let mut now = 0.0;
        let mut aim: Option<usize> = None;
        let mut feedback_since: Option<f64> = None;

        for _ in 0..MAX_FRAMES {
            now += FRAME_MS;
            let mut input = TickInput::default();

            match session.phase() {
                GamePhase::Playing => {
                    let wanted = *aim.get_or_insert_with(|| pilot_rng.random_range(0..SLOT_COUNT));
                    let selected = session.selected();
                    if wanted == selected {
                        input.launch = true;
                        aim = None;
                    } else {
                        input.steer = Some(if wanted > selected { 1 } else { -1 });
                    }
                }
                GamePhase::Feedback => {
                    let since = *feedback_since.get_or_insert(now);
                    input.advance = now - since >= READ_MS;
                }
                _ => {}
            }
            if session.phase() != GamePhase::Feedback {
                feedback_since = None;
            }

            session.tick(&input, now);

            for event in session.drain_events() {
                match event {
                    SessionEvent::Arrived { verdict, score } => {
                        if let Some(q) = session.current_question() {
                            log::info!("{:?} -> {:?}: {}", q.prompt, verdict, q.explanation);
                        }
                        reporter.record_progress(&score);
                    }
                    SessionEvent::Finished(report) => reporter.finish(&report),
                    _ => {}
                }
            }

            if session.phase() == GamePhase::Finished {
                return reporter.last.is_some_and(|r| r.passed);
            }
        }

        log::warn!("Session still running after {} frames, stopping", MAX_FRAMES);
        false
    }
}
