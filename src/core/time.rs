//=========================================================================
// Game Time
//=========================================================================
//
// Timestamp handed to the screen manager once per tick.
//
// The manager keeps no clock of its own. The host (or the engine's logic
// thread) owns time and passes a non-decreasing `GameTime` into every
// update/draw pair.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== GameTime ============================================================

/// Snapshot of host time for a single tick.
///
/// - `total`: time since the host started ticking
/// - `elapsed`: time since the previous tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct GameTime {
    pub total: Duration,
    pub elapsed: Duration,
}

impl GameTime {
    /// Time before the first tick.
    pub const ZERO: GameTime = GameTime {
        total: Duration::ZERO,
        elapsed: Duration::ZERO,
    };

    /// Creates a timestamp from explicit total and elapsed durations.
    pub const fn new(total: Duration, elapsed: Duration) -> Self {
        Self { total, elapsed }
    }

    /// Creates a timestamp at `total` with no elapsed delta.
    pub const fn at(total: Duration) -> Self {
        Self {
            total,
            elapsed: Duration::ZERO,
        }
    }

    /// Returns the timestamp one `step` later.
    pub fn advance(self, step: Duration) -> Self {
        Self {
            total: self.total + step,
            elapsed: step,
        }
    }

    /// Time passed since `earlier`, saturating at zero.
    pub fn since(&self, earlier: Duration) -> Duration {
        self.total.saturating_sub(earlier)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_default() {
        assert_eq!(GameTime::ZERO, GameTime::default());
    }

    #[test]
    fn advance_accumulates_total_and_sets_elapsed() {
        let step = Duration::from_millis(16);
        let time = GameTime::ZERO.advance(step).advance(step);

        assert_eq!(time.total, Duration::from_millis(32));
        assert_eq!(time.elapsed, step);
    }

    #[test]
    fn since_saturates_for_future_start() {
        let time = GameTime::at(Duration::from_millis(10));
        assert_eq!(time.since(Duration::from_millis(4)), Duration::from_millis(6));
        assert_eq!(time.since(Duration::from_millis(50)), Duration::ZERO);
    }
}
