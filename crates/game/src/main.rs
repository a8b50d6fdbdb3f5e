mod app;

use app::{builtin_levels, GameSession, START_ENTRANCE, START_LEVEL};
use engine::{run_app, App, InputAction, InputSnapshot, IntentCollector, LoopConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEMO_FRAME_BUDGET: u64 = 1200;
const DEMO_PHASE_FRAMES: u64 = 90;

/// Canned keyboard input for the headless demo: hold one arrow at a time,
/// cycling through the four directions.
struct DemoWalk {
    frame: u64,
}

impl DemoWalk {
    fn held_action(&self) -> InputAction {
        match (self.frame / DEMO_PHASE_FRAMES) % 4 {
            0 => InputAction::MoveDown,
            1 => InputAction::MoveRight,
            2 => InputAction::MoveUp,
            _ => InputAction::MoveLeft,
        }
    }
}

struct TilemazeApp {
    session: GameSession,
    collector: IntentCollector,
    walk: DemoWalk,
    last_view: String,
}

impl App for TilemazeApp {
    fn poll_input(&mut self) -> InputSnapshot {
        let held = self.walk.held_action();
        for action in [
            InputAction::MoveUp,
            InputAction::MoveDown,
            InputAction::MoveLeft,
            InputAction::MoveRight,
        ] {
            self.collector.set_action(action, action == held);
        }
        self.walk.frame = self.walk.frame.saturating_add(1);
        self.collector.snapshot_for_tick()
    }

    fn tick(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) {
        self.session.tick(fixed_dt_seconds, input);
    }

    fn render(&mut self) {
        let view = self.session.render_text();
        if view != self.last_view {
            print!("{view}");
            self.last_view = view;
        }
    }

    fn should_exit(&self) -> bool {
        self.session.goal_reached()
    }
}

fn main() {
    init_tracing();
    info!("=== Tilemaze Startup ===");

    let registry = match builtin_levels() {
        Ok(registry) => registry,
        Err(err) => {
            error!(error = %err, "level_data_invalid");
            std::process::exit(1);
        }
    };
    info!(
        levels = ?registry.level_names().collect::<Vec<_>>(),
        "levels_loaded"
    );
    let session = match GameSession::new(registry, START_LEVEL, START_ENTRANCE) {
        Ok(session) => session,
        Err(err) => {
            error!(error = %err, "session_setup_failed");
            std::process::exit(1);
        }
    };

    let config = LoopConfig {
        max_frames: Some(DEMO_FRAME_BUDGET),
        ..LoopConfig::default()
    };
    let mut game = TilemazeApp {
        session,
        collector: IntentCollector::default(),
        walk: DemoWalk { frame: 0 },
        last_view: String::new(),
    };
    if let Err(err) = run_app(config, &mut game) {
        error!(error = %err, "startup_failed");
        std::process::exit(1);
    }
    info!(
        goal_reached = game.session.goal_reached(),
        hint = %game.session.hint(),
        "demo_finished"
    );
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
