/// Elapsed/target-duration counter with no clock of its own.
///
/// The loop advances timers by the fixed logic period; completion is polled,
/// never signalled.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Timer {
    elapsed: f32,
    period: f32,
}

impl Timer {
    pub fn new(period: f32) -> Self {
        Self {
            elapsed: 0.0,
            period,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn complete(&self) -> bool {
        self.elapsed >= self.period
    }

    /// Zeroes the elapsed time; a new period replaces the old one when given.
    pub fn reset(&mut self, new_period: Option<f32>) {
        if let Some(period) = new_period {
            self.period = period;
        }
        self.elapsed = 0.0;
    }

    /// Elapsed time as a multiple of the period. A zero period reports 1.0
    /// (such a timer is always complete).
    pub fn normalized(&self) -> f32 {
        if self.period <= 0.0 {
            return 1.0;
        }
        self.elapsed / self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_once_elapsed_reaches_period() {
        let mut timer = Timer::new(0.5);
        timer.advance(0.3);
        assert!(!timer.complete());
        timer.advance(0.2);
        assert!(timer.complete());
    }

    #[test]
    fn advance_accumulates_past_completion() {
        let mut timer = Timer::new(0.1);
        timer.advance(0.3);
        assert!(timer.complete());
        assert!((timer.normalized() - 3.0).abs() < 0.0001);
    }

    #[test]
    fn reset_keeps_period_unless_replaced() {
        let mut timer = Timer::new(0.5);
        timer.advance(0.5);
        timer.reset(None);
        assert!(!timer.complete());
        timer.advance(0.5);
        assert!(timer.complete());

        timer.reset(Some(1.0));
        timer.advance(0.5);
        assert!(!timer.complete());
    }

    #[test]
    fn zero_period_timer_is_complete_and_normalized_saturates() {
        let mut timer = Timer::new(0.0);
        assert!(timer.complete());
        assert_eq!(timer.normalized(), 1.0);
        timer.advance(0.5);
        assert_eq!(timer.normalized(), 1.0);
    }

    #[test]
    fn normalized_reports_progress_fraction() {
        let mut timer = Timer::new(2.0);
        timer.advance(0.5);
        assert!((timer.normalized() - 0.25).abs() < 0.0001);
    }
}
