//! Capacitive touch conditioning: two-stage calibration plus debounced
//! threshold detection.
//!
//! Calibration walks `Idle → SamplingUntouched → SamplingTouched →
//! Idle`. Each stage gives the user a settle interval to comply with
//! the instruction (hands off, then touch and hold), then blocks the
//! poll loop while averaging a burst of raw samples. The threshold is
//! the midpoint between the two baselines, computed the same way
//! whichever baseline is numerically larger - some pads read higher
//! when touched, others lower.
//!
//! A device that has never completed calibration auto-enters the
//! untouched stage at startup; ordinary touch events stay suppressed
//! until a profile exists.

use embedded_hal::delay::DelayNs;
use log::{debug, info};

use crate::config;
use crate::storage::{self, KvStore};

/// Debounced touch state transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchEvent {
    Pressed,
    Released,
}

/// Current step of the calibration sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalibrationPhase {
    Idle,
    SamplingUntouched,
    SamplingTouched,
}

/// Persisted calibration baselines and derived threshold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CalibrationProfile {
    pub untouched: u32,
    pub touched: u32,
    pub threshold: u32,
}

impl CalibrationProfile {
    /// Both baselines captured?
    pub fn is_complete(&self) -> bool {
        self.untouched > 0 && self.touched > 0
    }

    /// Midpoint between the baselines, regardless of orientation:
    /// (100, 200) and (200, 100) both yield 150.
    pub fn midpoint(untouched: u32, touched: u32) -> u32 {
        if touched > untouched {
            untouched + (touched - untouched) / 2
        } else {
            touched + (untouched - touched) / 2
        }
    }
}

/// Raw analog touch reading collaborator.
pub trait TouchProbe {
    fn read(&mut self) -> u32;
}

/// Touch sensor conditioner.
///
/// Owns the probe and a delay provider; persistence is passed into the
/// calls that need it so the backing store stays caller-owned.
pub struct TouchSensor<P: TouchProbe, D: DelayNs> {
    probe: P,
    delay: D,
    profile: CalibrationProfile,
    calibrated: bool,
    phase: CalibrationPhase,
    stage_started_ms: u64,
    debounce_ms: u64,
    touched: bool,
    last_reading: bool,
    last_flip_ms: u64,
}

impl<P: TouchProbe, D: DelayNs> TouchSensor<P, D> {
    pub fn new(probe: P, delay: D) -> Self {
        Self {
            probe,
            delay,
            profile: CalibrationProfile::default(),
            calibrated: false,
            phase: CalibrationPhase::Idle,
            stage_started_ms: 0,
            debounce_ms: config::TOUCH_DEBOUNCE_MS,
            touched: false,
            last_reading: false,
            last_flip_ms: 0,
        }
    }

    /// Load the stored profile and auto-start calibration when it is
    /// missing or incomplete.
    pub fn begin(&mut self, store: &mut impl KvStore, now_ms: u64) {
        self.profile = storage::load_touch_profile(store);
        self.calibrated = self.profile.is_complete();
        if self.calibrated {
            info!(
                "touch profile loaded: untouched={} touched={} threshold={}",
                self.profile.untouched, self.profile.touched, self.profile.threshold
            );
        } else {
            self.profile.threshold = 0;
            self.start_calibration(now_ms);
        }
    }

    /// Begin the two-stage calibration sequence.
    pub fn start_calibration(&mut self, now_ms: u64) {
        info!("--- starting touch calibration ---");
        info!(">>> do NOT touch the sensor <<<");
        self.phase = CalibrationPhase::SamplingUntouched;
        self.stage_started_ms = now_ms;
        self.calibrated = false;
    }

    pub fn phase(&self) -> CalibrationPhase {
        self.phase
    }

    pub fn is_calibrated(&self) -> bool {
        self.calibrated
    }

    pub fn profile(&self) -> &CalibrationProfile {
        &self.profile
    }

    /// One raw reading, for diagnostics.
    pub fn raw_value(&mut self) -> u32 {
        self.probe.read()
    }

    /// Direct access to the owned probe.
    pub fn probe_mut(&mut self) -> &mut P {
        &mut self.probe
    }

    /// Poll the sensor. Drives the calibration sequence when one is in
    /// progress (in which case ordinary events are suppressed), else
    /// performs debounced threshold detection.
    pub fn update(&mut self, now_ms: u64, store: &mut impl KvStore) -> Option<TouchEvent> {
        match self.phase {
            CalibrationPhase::Idle => {}
            stage => {
                if now_ms - self.stage_started_ms >= config::CALIBRATION_SETTLE_MS {
                    let average = self.sample_average();
                    self.finish_stage(stage, average, now_ms, store);
                }
                return None;
            }
        }

        if !self.calibrated {
            return None;
        }

        let reading = self.probe.read() > self.profile.threshold;
        if reading != self.last_reading {
            self.last_flip_ms = now_ms;
        }

        let mut event = None;
        if now_ms - self.last_flip_ms > self.debounce_ms && reading != self.touched {
            self.touched = reading;
            event = Some(if reading {
                TouchEvent::Pressed
            } else {
                TouchEvent::Released
            });
        }
        self.last_reading = reading;
        event
    }

    /// Blocking burst average. Intentionally stalls the poll loop for
    /// the sampling window; calibration is rare and user-initiated.
    fn sample_average(&mut self) -> u32 {
        let mut sum: u64 = 0;
        for _ in 0..config::CALIBRATION_SAMPLES {
            sum += self.probe.read() as u64;
            self.delay.delay_ms(config::CALIBRATION_SAMPLE_SPACING_MS);
        }
        (sum / config::CALIBRATION_SAMPLES as u64) as u32
    }

    fn finish_stage(
        &mut self,
        stage: CalibrationPhase,
        average: u32,
        now_ms: u64,
        store: &mut impl KvStore,
    ) {
        match stage {
            CalibrationPhase::SamplingUntouched => {
                debug!("untouched baseline: {average}");
                self.profile.untouched = average;
                self.phase = CalibrationPhase::SamplingTouched;
                self.stage_started_ms = now_ms;
                info!("--- now calibrating the touched state ---");
                info!(">>> touch and HOLD the sensor <<<");
            }
            CalibrationPhase::SamplingTouched => {
                debug!("touched baseline: {average}");
                self.profile.touched = average;
                self.profile.threshold =
                    CalibrationProfile::midpoint(self.profile.untouched, average);
                self.calibrated = true;
                self.phase = CalibrationPhase::Idle;
                storage::save_touch_profile(store, &self.profile);
                info!(
                    "calibration complete: untouched={} touched={} threshold={}",
                    self.profile.untouched, self.profile.touched, self.profile.threshold
                );
            }
            CalibrationPhase::Idle => {}
        }
    }
}
