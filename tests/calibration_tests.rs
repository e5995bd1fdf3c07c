//! Touch calibration integration tests: the two-stage sequence,
//! profile persistence, and recovery from corrupt stored data.

mod common;

use callknob::input::{CalibrationPhase, TouchEvent, TouchProbe, TouchSensor};
use callknob::storage::{self, keys, KvStore, MemoryStore};

use common::RecordingDelay;

/// Probe whose reading can be switched between update calls.
struct AdjustableProbe(u32);

impl TouchProbe for AdjustableProbe {
    fn read(&mut self) -> u32 {
        self.0
    }
}

fn run_calibration(
    sensor: &mut TouchSensor<AdjustableProbe, RecordingDelay>,
    store: &mut MemoryStore,
    untouched: u32,
    touched: u32,
) {
    sensor.probe_mut().0 = untouched;
    assert_eq!(sensor.update(5_000, store), None);
    assert_eq!(sensor.phase(), CalibrationPhase::SamplingTouched);
    sensor.probe_mut().0 = touched;
    assert_eq!(sensor.update(10_000, store), None);
    assert_eq!(sensor.phase(), CalibrationPhase::Idle);
}

#[test]
fn fresh_device_calibrates_and_persists() {
    let mut store = MemoryStore::new();
    let mut sensor = TouchSensor::new(AdjustableProbe(0), RecordingDelay);

    // Nothing stored: begin() auto-enters the untouched stage.
    sensor.begin(&mut store, 0);
    assert_eq!(sensor.phase(), CalibrationPhase::SamplingUntouched);
    assert!(!sensor.is_calibrated());

    run_calibration(&mut sensor, &mut store, 100, 200);
    assert!(sensor.is_calibrated());
    assert_eq!(sensor.profile().threshold, 150);

    // A fresh sensor on the same store needs no calibration.
    let mut rebooted = TouchSensor::new(AdjustableProbe(0), RecordingDelay);
    rebooted.begin(&mut store, 0);
    assert!(rebooted.is_calibrated());
    assert_eq!(rebooted.phase(), CalibrationPhase::Idle);
    assert_eq!(rebooted.profile().threshold, 150);
}

#[test]
fn inverted_sensor_orientation_calibrates_symmetrically() {
    let mut store = MemoryStore::new();
    let mut sensor = TouchSensor::new(AdjustableProbe(0), RecordingDelay);
    sensor.start_calibration(0);
    // This pad reads LOWER when touched.
    run_calibration(&mut sensor, &mut store, 200, 100);
    assert_eq!(sensor.profile().threshold, 150);
}

#[test]
fn partial_profile_counts_as_uncalibrated() {
    let mut store = MemoryStore::new();
    // Only one baseline present - e.g. power loss mid-calibration.
    store.put_u32(keys::TOUCH_NAMESPACE, keys::TOUCH_UNTOUCHED, 123);

    let mut sensor = TouchSensor::new(AdjustableProbe(0), RecordingDelay);
    sensor.begin(&mut store, 0);
    assert!(!sensor.is_calibrated());
    assert_eq!(sensor.phase(), CalibrationPhase::SamplingUntouched);
}

#[test]
fn events_suppressed_until_calibration_completes() {
    let mut store = MemoryStore::new();
    let mut sensor = TouchSensor::new(AdjustableProbe(9_999), RecordingDelay);
    sensor.begin(&mut store, 0);

    // Mid-calibration, even wild readings emit nothing.
    assert_eq!(sensor.update(100, &mut store), None);
    assert_eq!(sensor.update(2_000, &mut store), None);
}

#[test]
fn calibrated_sensor_classifies_against_threshold() {
    let mut store = MemoryStore::new();
    let mut sensor = TouchSensor::new(AdjustableProbe(0), RecordingDelay);
    sensor.start_calibration(0);
    run_calibration(&mut sensor, &mut store, 1_000, 3_000);
    assert_eq!(sensor.profile().threshold, 2_000);

    sensor.probe_mut().0 = 2_500;
    assert_eq!(sensor.update(11_000, &mut store), None); // debouncing
    assert_eq!(
        sensor.update(11_100, &mut store),
        Some(TouchEvent::Pressed)
    );

    sensor.probe_mut().0 = 1_200;
    assert_eq!(sensor.update(11_200, &mut store), None);
    assert_eq!(
        sensor.update(11_300, &mut store),
        Some(TouchEvent::Released)
    );
}

#[test]
fn restarted_calibration_overwrites_stored_profile() {
    let mut store = MemoryStore::new();
    let mut sensor = TouchSensor::new(AdjustableProbe(0), RecordingDelay);
    sensor.start_calibration(0);
    run_calibration(&mut sensor, &mut store, 100, 200);

    // Console-triggered recalibration with different baselines.
    sensor.start_calibration(20_000);
    assert!(!sensor.is_calibrated());
    sensor.probe_mut().0 = 400;
    sensor.update(25_000, &mut store);
    sensor.probe_mut().0 = 800;
    sensor.update(30_000, &mut store);

    assert_eq!(sensor.profile().threshold, 600);
    assert_eq!(storage::load_touch_profile(&mut store).threshold, 600);
}
