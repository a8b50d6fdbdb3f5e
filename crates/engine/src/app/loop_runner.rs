use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{info, warn};

use super::metrics::MetricsAccumulator;
use super::sim::App;

#[derive(Debug, Clone)]
pub struct LoopConfig {
    /// Fixed logic rate in updates per second.
    pub update_rate_tps: u32,
    /// Cap on logic steps run within a single frame; excess backlog is
    /// dropped, not deferred.
    pub max_updates_per_frame: u32,
    /// Ceiling applied to the wall-time delta of a single frame before it
    /// enters the backlog (guards against debugger stalls and suspends).
    pub max_frame_delta: Duration,
    pub metrics_log_interval: Duration,
    pub max_render_fps: Option<u32>,
    /// Frame budget for headless runs; `None` runs until the app exits.
    pub max_frames: Option<u64>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            update_rate_tps: 20,
            max_updates_per_frame: 10,
            max_frame_delta: Duration::from_millis(250),
            metrics_log_interval: Duration::from_secs(1),
            max_render_fps: Some(60),
            max_frames: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("update rate must be at least 1 update per second")]
    ZeroUpdateRate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepPlan {
    pub ticks_to_run: u32,
    pub remaining_accumulator: Duration,
    pub dropped_ticks: u32,
}

impl StepPlan {
    fn idle(remaining_accumulator: Duration) -> Self {
        Self {
            ticks_to_run: 0,
            remaining_accumulator,
            dropped_ticks: 0,
        }
    }
}

/// Converts an accumulated backlog into a number of fixed logic steps.
///
/// Whole steps beyond `max_ticks_per_frame` are counted and discarded; the
/// sub-step fractional remainder is always retained, which is what keeps the
/// timestep fixed rather than variable.
pub fn plan_sim_steps(
    mut accumulator: Duration,
    fixed_dt: Duration,
    max_ticks_per_frame: u32,
) -> StepPlan {
    let mut ticks_to_run = 0u32;
    let mut dropped_ticks = 0u32;

    while accumulator >= fixed_dt && ticks_to_run < max_ticks_per_frame {
        accumulator = accumulator.saturating_sub(fixed_dt);
        ticks_to_run = ticks_to_run.saturating_add(1);
    }
    while accumulator >= fixed_dt {
        accumulator = accumulator.saturating_sub(fixed_dt);
        dropped_ticks = dropped_ticks.saturating_add(1);
    }

    StepPlan {
        ticks_to_run,
        remaining_accumulator: accumulator,
        dropped_ticks,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    Running,
    Paused,
}

/// Fixed-timestep frame scheduler with asynchronous pause.
///
/// `request_pause` is observed at the top of the next `frame` call: that
/// frame still runs its planned steps (it is the last one before pausing)
/// and the previous-timestamp slot is cleared, so wall time spent paused
/// never enters the backlog on resume.
#[derive(Debug)]
pub struct FrameScheduler {
    fixed_dt: Duration,
    max_ticks_per_frame: u32,
    max_frame_delta: Duration,
    accumulator: Duration,
    previous_frame: Option<Instant>,
    pause_queued: bool,
    state: LoopState,
}

impl FrameScheduler {
    pub fn new(fixed_dt: Duration, max_ticks_per_frame: u32, max_frame_delta: Duration) -> Self {
        Self {
            fixed_dt,
            max_ticks_per_frame: max_ticks_per_frame.max(1),
            max_frame_delta,
            accumulator: Duration::ZERO,
            previous_frame: None,
            pause_queued: false,
            state: LoopState::Running,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.state == LoopState::Paused
    }

    pub fn request_pause(&mut self) {
        if self.state == LoopState::Running {
            self.pause_queued = true;
        }
    }

    pub fn resume(&mut self) {
        self.state = LoopState::Running;
        self.pause_queued = false;
    }

    pub fn frame(&mut self, now: Instant) -> StepPlan {
        if self.is_paused() {
            return StepPlan::idle(self.accumulator);
        }

        let pausing = std::mem::take(&mut self.pause_queued);
        if let Some(previous) = self.previous_frame {
            let frame_dt = now
                .saturating_duration_since(previous)
                .min(self.max_frame_delta);
            self.accumulator = self.accumulator.saturating_add(frame_dt);
        }
        self.previous_frame = if pausing { None } else { Some(now) };
        if pausing {
            self.state = LoopState::Paused;
        }

        let plan = plan_sim_steps(self.accumulator, self.fixed_dt, self.max_ticks_per_frame);
        self.accumulator = plan.remaining_accumulator;
        plan
    }
}

/// Drives an [`App`] with fixed logic steps and a paced render pass.
///
/// Every frame: poll input, apply a queued pause toggle, run the planned
/// logic steps synchronously, then render exactly once (also when zero steps
/// ran). While paused only input is polled.
pub fn run_app(config: LoopConfig, app: &mut dyn App) -> Result<(), AppError> {
    if config.update_rate_tps == 0 {
        return Err(AppError::ZeroUpdateRate);
    }

    let fixed_dt = Duration::from_secs_f64(1.0 / config.update_rate_tps as f64);
    let fixed_dt_seconds = fixed_dt.as_secs_f32();
    let max_updates_per_frame = config.max_updates_per_frame.max(1);
    let max_frame_delta =
        normalize_non_zero_duration(config.max_frame_delta, Duration::from_millis(250));
    let metrics_log_interval =
        normalize_non_zero_duration(config.metrics_log_interval, Duration::from_secs(1));
    let render_frame_target = target_frame_duration(normalize_render_fps_cap(config.max_render_fps));

    info!(
        update_rate_tps = config.update_rate_tps,
        max_updates_per_frame,
        max_frame_delta_ms = max_frame_delta.as_millis() as u64,
        metrics_log_interval_ms = metrics_log_interval.as_millis() as u64,
        "loop_config"
    );

    let mut scheduler = FrameScheduler::new(fixed_dt, max_updates_per_frame, max_frame_delta);
    let mut metrics = MetricsAccumulator::new(metrics_log_interval);
    let mut last_frame_instant: Option<Instant> = None;
    let mut last_present_instant = Instant::now();
    let mut frames: u64 = 0;

    loop {
        if app.should_exit() {
            info!(reason = "app_exit", "shutdown_requested");
            break;
        }
        if let Some(max_frames) = config.max_frames {
            if frames >= max_frames {
                info!(frames, "frame_budget_reached");
                break;
            }
        }

        let input = app.poll_input();
        if input.quit_requested() {
            info!(reason = "quit_intent", "shutdown_requested");
            break;
        }
        if input.pause_toggled() {
            if scheduler.is_paused() {
                scheduler.resume();
                info!("loop_resumed");
            } else {
                scheduler.request_pause();
                info!("loop_pause_queued");
            }
        }

        if scheduler.is_paused() {
            // No frames are scheduled while paused; idle until the next poll.
            thread::sleep(fixed_dt);
            continue;
        }

        let now = Instant::now();
        let raw_frame_dt = last_frame_instant
            .map(|previous| now.saturating_duration_since(previous))
            .unwrap_or(Duration::ZERO);
        last_frame_instant = Some(now);

        let plan = scheduler.frame(now);
        for _ in 0..plan.ticks_to_run {
            app.tick(fixed_dt_seconds, &input);
            metrics.record_tick();
        }
        if plan.dropped_ticks > 0 {
            warn!(
                dropped_ticks = plan.dropped_ticks,
                max_updates_per_frame, "update_backlog_clamped"
            );
            metrics.record_dropped_ticks(plan.dropped_ticks);
        }

        // Single cap-sleep point for render pacing; the render pass itself
        // runs every frame regardless of how many logic steps did.
        let elapsed_since_last_present =
            Instant::now().saturating_duration_since(last_present_instant);
        let cap_sleep = compute_cap_sleep(elapsed_since_last_present, render_frame_target);
        if cap_sleep > Duration::ZERO {
            thread::sleep(cap_sleep);
        }
        app.render();
        last_present_instant = Instant::now();

        metrics.record_frame(raw_frame_dt);
        frames = frames.saturating_add(1);

        if let Some(snapshot) = metrics.maybe_snapshot(Instant::now()) {
            info!(
                fps = snapshot.fps,
                tps = snapshot.tps,
                frame_time_ms = snapshot.frame_time_ms,
                dropped_ticks = snapshot.dropped_ticks,
                "loop_metrics"
            );
        }
    }

    info!("shutdown");
    Ok(())
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}

fn normalize_render_fps_cap(cap: Option<u32>) -> Option<u32> {
    cap.filter(|value| *value > 0)
}

fn target_frame_duration(max_render_fps: Option<u32>) -> Option<Duration> {
    max_render_fps.map(|fps| Duration::from_secs_f64(1.0 / fps as f64))
}

fn compute_cap_sleep(elapsed: Duration, target: Option<Duration>) -> Duration {
    match target {
        Some(frame_target) if elapsed < frame_target => frame_target - elapsed,
        _ => Duration::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXED_DT_20_TPS: Duration = Duration::from_millis(50);

    fn scheduler() -> FrameScheduler {
        FrameScheduler::new(FIXED_DT_20_TPS, 10, Duration::from_secs(1))
    }

    #[test]
    fn plan_sim_steps_consumes_whole_steps_and_keeps_remainder() {
        let plan = plan_sim_steps(Duration::from_millis(225), FIXED_DT_20_TPS, 10);

        assert_eq!(plan.ticks_to_run, 4);
        assert_eq!(plan.remaining_accumulator, Duration::from_millis(25));
        assert_eq!(plan.dropped_ticks, 0);
    }

    #[test]
    fn plan_sim_steps_reports_dropped_count_when_clamped() {
        // 14 whole steps pending against a cap of 10.
        let plan = plan_sim_steps(Duration::from_millis(700), FIXED_DT_20_TPS, 10);

        assert_eq!(plan.ticks_to_run, 10);
        assert_eq!(plan.dropped_ticks, 4);
        assert_eq!(plan.remaining_accumulator, Duration::ZERO);
    }

    #[test]
    fn plan_sim_steps_keeps_fraction_alongside_dropped_steps() {
        let plan = plan_sim_steps(Duration::from_millis(730), FIXED_DT_20_TPS, 10);

        assert_eq!(plan.ticks_to_run, 10);
        assert_eq!(plan.dropped_ticks, 4);
        assert_eq!(plan.remaining_accumulator, Duration::from_millis(30));
    }

    #[test]
    fn plan_sim_steps_runs_zero_ticks_under_one_period() {
        let plan = plan_sim_steps(Duration::from_millis(49), FIXED_DT_20_TPS, 10);

        assert_eq!(plan.ticks_to_run, 0);
        assert_eq!(plan.remaining_accumulator, Duration::from_millis(49));
    }

    #[test]
    fn first_frame_has_no_previous_timestamp_and_runs_nothing() {
        let mut scheduler = scheduler();
        let plan = scheduler.frame(Instant::now());

        assert_eq!(plan.ticks_to_run, 0);
        assert_eq!(plan.remaining_accumulator, Duration::ZERO);
    }

    #[test]
    fn elapsed_wall_time_accumulates_into_ticks() {
        let mut scheduler = scheduler();
        let base = Instant::now();

        let _ = scheduler.frame(base);
        let plan = scheduler.frame(base + Duration::from_millis(225));

        assert_eq!(plan.ticks_to_run, 4);
        assert_eq!(plan.remaining_accumulator, Duration::from_millis(25));
    }

    #[test]
    fn remainder_carries_into_the_next_frame() {
        let mut scheduler = scheduler();
        let base = Instant::now();

        let _ = scheduler.frame(base);
        let _ = scheduler.frame(base + Duration::from_millis(225));
        let plan = scheduler.frame(base + Duration::from_millis(255));

        // 25 ms carried + 30 ms elapsed = 55 ms: one step, 5 ms kept.
        assert_eq!(plan.ticks_to_run, 1);
        assert_eq!(plan.remaining_accumulator, Duration::from_millis(5));
    }

    #[test]
    fn frame_delta_is_clamped_before_entering_backlog() {
        let mut scheduler = FrameScheduler::new(FIXED_DT_20_TPS, 100, Duration::from_millis(250));
        let base = Instant::now();

        let _ = scheduler.frame(base);
        let plan = scheduler.frame(base + Duration::from_secs(30));

        assert_eq!(plan.ticks_to_run, 5);
    }

    #[test]
    fn queued_pause_runs_one_last_frame_then_pauses() {
        let mut scheduler = scheduler();
        let base = Instant::now();

        let _ = scheduler.frame(base);
        scheduler.request_pause();
        assert!(!scheduler.is_paused());

        let last_plan = scheduler.frame(base + Duration::from_millis(100));
        assert_eq!(last_plan.ticks_to_run, 2);
        assert!(scheduler.is_paused());

        let paused_plan = scheduler.frame(base + Duration::from_millis(500));
        assert_eq!(paused_plan.ticks_to_run, 0);
    }

    #[test]
    fn resume_does_not_replay_time_spent_paused() {
        let mut scheduler = scheduler();
        let base = Instant::now();

        let _ = scheduler.frame(base);
        scheduler.request_pause();
        let _ = scheduler.frame(base + Duration::from_millis(50));
        assert!(scheduler.is_paused());

        scheduler.resume();
        // The previous-timestamp slot was cleared on pause, so a frame long
        // after resume contributes nothing to the backlog.
        let plan = scheduler.frame(base + Duration::from_secs(10));
        assert_eq!(plan.ticks_to_run, 0);

        let next = scheduler.frame(base + Duration::from_secs(10) + Duration::from_millis(100));
        assert_eq!(next.ticks_to_run, 2);
    }

    #[test]
    fn render_runs_once_per_frame_while_backlog_clamps() {
        struct CountingApp {
            ticks: u32,
            renders: u32,
        }
        impl App for CountingApp {
            fn poll_input(&mut self) -> crate::InputSnapshot {
                crate::InputSnapshot::empty()
            }
            fn tick(&mut self, _fixed_dt_seconds: f32, _input: &crate::InputSnapshot) {
                self.ticks += 1;
            }
            fn render(&mut self) {
                self.renders += 1;
                thread::sleep(Duration::from_millis(60));
            }
            fn should_exit(&self) -> bool {
                false
            }
        }

        // Each 60 ms render backs up at least three 20 ms periods, so every
        // frame after the first clamps to the two-tick cap; the render pass
        // must still run on each of them.
        let config = LoopConfig {
            update_rate_tps: 50,
            max_updates_per_frame: 2,
            max_render_fps: None,
            max_frames: Some(6),
            ..LoopConfig::default()
        };
        let mut app = CountingApp {
            ticks: 0,
            renders: 0,
        };
        run_app(config, &mut app).expect("loop runs to its frame budget");

        assert_eq!(app.renders, 6);
        // First frame has no previous timestamp; the other five clamp to 2.
        assert_eq!(app.ticks, 10);
    }

    #[test]
    fn compute_cap_sleep_zero_when_over_budget() {
        let sleep = compute_cap_sleep(Duration::from_millis(20), target_frame_duration(Some(60)));
        assert_eq!(sleep, Duration::ZERO);
    }

    #[test]
    fn compute_cap_sleep_positive_when_under_budget() {
        let sleep = compute_cap_sleep(Duration::from_millis(5), target_frame_duration(Some(60)));
        assert!(sleep > Duration::ZERO);
    }

    #[test]
    fn normalize_render_fps_cap_disables_zero() {
        assert_eq!(normalize_render_fps_cap(Some(0)), None);
        assert_eq!(normalize_render_fps_cap(Some(60)), Some(60));
    }

    #[test]
    fn zero_update_rate_is_rejected() {
        struct Inert;
        impl App for Inert {
            fn poll_input(&mut self) -> crate::InputSnapshot {
                crate::InputSnapshot::empty()
            }
            fn tick(&mut self, _fixed_dt_seconds: f32, _input: &crate::InputSnapshot) {}
            fn render(&mut self) {}
            fn should_exit(&self) -> bool {
                true
            }
        }

        let config = LoopConfig {
            update_rate_tps: 0,
            ..LoopConfig::default()
        };
        assert!(matches!(
            run_app(config, &mut Inert),
            Err(AppError::ZeroUpdateRate)
        ));
    }
}
