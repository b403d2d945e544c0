use std::time::Duration;

/// Shortest period the timer will fire at, even if the spawn interval has
/// been driven down to zero.
const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerState {
    Armed,
    Cancelled,
}

/// Repeating timer driven by elapsed time instead of wall-clock callbacks.
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    pending: Duration,
    state: TimerState,
}

impl SpawnTimer {
    pub fn new() -> Self {
        SpawnTimer { pending: Duration::ZERO, state: TimerState::Armed }
    }

    /// Feeds `elapsed` into the timer and returns how many times it fired.
    /// `period` is taken fresh on every call.
    pub fn advance(&mut self, elapsed: Duration, period: Duration) -> u32 {
        if self.is_cancelled() {
            return 0;
        }

        let period = period.max(MIN_PERIOD);
        self.pending += elapsed;

        let mut fired = 0;
        while self.pending >= period {
            self.pending -= period;
            fired += 1;
        }
        fired
    }

    pub fn cancel(&mut self) {
        self.state = TimerState::Cancelled;
        self.pending = Duration::ZERO;
    }

    pub fn is_cancelled(&self) -> bool {
        self.state == TimerState::Cancelled
    }
}

impl Default for SpawnTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_fires_once_per_period() {
        let mut timer = SpawnTimer::new();
        assert_eq!(timer.advance(ms(50), ms(75)), 0);
        assert_eq!(timer.advance(ms(50), ms(75)), 1);
        assert_eq!(timer.advance(ms(50), ms(75)), 1);
        assert_eq!(timer.advance(ms(10), ms(75)), 0);
    }

    #[test]
    fn test_catches_up_on_long_steps() {
        let mut timer = SpawnTimer::new();
        assert_eq!(timer.advance(ms(300), ms(75)), 4);
        assert_eq!(timer.advance(ms(74), ms(75)), 0);
    }

    #[test]
    fn test_period_is_reread() {
        let mut timer = SpawnTimer::new();
        assert_eq!(timer.advance(ms(70), ms(75)), 0);
        assert_eq!(timer.advance(ms(0), ms(70)), 1);
    }

    #[test]
    fn test_zero_period_is_bounded() {
        let mut timer = SpawnTimer::new();
        assert_eq!(timer.advance(ms(16), Duration::ZERO), 16);
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut timer = SpawnTimer::new();
        timer.advance(ms(60), ms(75));
        timer.cancel();
        assert!(timer.is_cancelled());
        assert_eq!(timer.advance(ms(1000), ms(75)), 0);
    }
}
