//! Rotary encoder conditioning.
//!
//! Two layered filters run over a monotonically-updating tick counter:
//!
//! 1. *Direction consistency* - a raw tick delta yields a candidate
//!    direction, which is only accepted once the same direction has
//!    been seen for N consecutive deltas. Contact bounce at the
//!    mechanical edge of a detent produces single spurious flips; those
//!    never reach stage two.
//! 2. *Precision accumulation* - accepted notches count toward a
//!    threshold; reaching it emits exactly one rotation event and
//!    resets the counter. A direction change or an idle timeout since
//!    the last notch clears any partial credit first, so a stale half
//!    detent can never fire minutes later.
//!
//! One `update` call evaluates at most one raw delta, matching the
//! poll-per-tick cadence of the main loop.

use crate::config;

/// Accepted rotation direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

/// Tuning parameters for the two filter stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncoderTuning {
    /// Consecutive same-direction deltas needed to accept a direction.
    pub direction_consistency: u8,
    /// Accepted notches needed to emit one rotation event.
    pub notch_threshold: u8,
    /// Idle time after which partial notch credit resets (ms).
    pub reset_timeout_ms: u64,
}

impl Default for EncoderTuning {
    fn default() -> Self {
        Self {
            direction_consistency: config::ENCODER_DIRECTION_CONSISTENCY,
            notch_threshold: config::ENCODER_NOTCH_THRESHOLD,
            reset_timeout_ms: config::ENCODER_RESET_TIMEOUT_MS,
        }
    }
}

/// Direction-consistency and precision-accumulation filter state.
pub struct EncoderFilter {
    tuning: EncoderTuning,
    last_count: i64,
    last_direction: Option<RotationDirection>,
    consistent_run: u8,
    accumulated_direction: Option<RotationDirection>,
    notches: u8,
    last_notch_ms: u64,
}

impl EncoderFilter {
    pub fn new(tuning: EncoderTuning) -> Self {
        Self {
            tuning,
            last_count: 0,
            last_direction: None,
            consistent_run: 0,
            accumulated_direction: None,
            notches: 0,
            last_notch_ms: 0,
        }
    }

    /// Feed the current tick counter value. Returns a rotation event
    /// when the notch threshold is reached.
    pub fn update(&mut self, count: i64, now_ms: u64) -> Option<RotationDirection> {
        if count == self.last_count {
            // No movement: expire stale partial credit.
            if self.notches > 0 && now_ms - self.last_notch_ms >= self.tuning.reset_timeout_ms {
                self.notches = 0;
            }
            return None;
        }

        let direction = if count > self.last_count {
            RotationDirection::Clockwise
        } else {
            RotationDirection::CounterClockwise
        };
        self.last_count = count;

        // Stage 1: require a consistent direction run before accepting.
        if self.last_direction == Some(direction) {
            self.consistent_run = self.consistent_run.saturating_add(1);
        } else {
            self.consistent_run = 1;
            self.last_direction = Some(direction);
        }
        if self.consistent_run < self.tuning.direction_consistency {
            return None;
        }

        // Stage 2: accumulate notches toward one rotation event.
        if self.accumulated_direction != Some(direction)
            || now_ms - self.last_notch_ms >= self.tuning.reset_timeout_ms
        {
            self.notches = 0;
            self.accumulated_direction = Some(direction);
        }

        self.notches += 1;
        self.last_notch_ms = now_ms;

        if self.notches >= self.tuning.notch_threshold {
            self.notches = 0;
            return Some(direction);
        }
        None
    }
}
