pub mod app;

pub use app::{
    circle_tile_cover, plan_sim_steps, run_app, App, AppError, FrameScheduler, InputAction, InputSnapshot,
    IntentCollector, LoopConfig, LoopMetricsSnapshot, StepPlan, TileCoord, Timer, Vec2,
};
