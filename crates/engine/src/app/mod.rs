mod input;
mod loop_runner;
mod metrics;
mod sim;
mod timer;

pub use input::{InputAction, InputSnapshot, IntentCollector};
pub use loop_runner::{plan_sim_steps, run_app, AppError, FrameScheduler, LoopConfig, StepPlan};
pub use metrics::LoopMetricsSnapshot;
pub use sim::{circle_tile_cover, App, TileCoord, Vec2};
pub use timer::Timer;
