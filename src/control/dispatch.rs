//! Report dispatch sequences.
//!
//! Everything that leaves the device goes through here: telephony
//! status updates, parameterized keyboard chords, consumer-control
//! pulses and the momentary drop pulse. Sends are fire-and-forget;
//! an undelivered report is dropped and the next state change (or the
//! next connection's status resend) re-synchronizes the host.

use embedded_hal::delay::DelayNs;
use log::debug;

use crate::config;
use crate::hid::{Chord, ConsumerReport, KeyboardReport, TelephonyReport};
use crate::transport::Transport;

pub struct Dispatcher<T: Transport, D: DelayNs> {
    transport: T,
    delay: D,
}

impl<T: Transport, D: DelayNs> Dispatcher<T, D> {
    pub fn new(transport: T, delay: D) -> Self {
        Self { transport, delay }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Send the combined mute/drop status report.
    pub fn send_status(&mut self, muted: bool, dropped: bool) -> bool {
        let report = TelephonyReport::new(muted, dropped);
        debug!("status report: {:#04x}", report.to_byte());
        self.transport.send_telephony(report)
    }

    /// Momentary "hook-flash": drop goes high, holds briefly, then
    /// clears, signalling a hang-up without persisting a dropped state.
    pub fn pulse_drop(&mut self, muted: bool) -> bool {
        let delivered = self.send_status(muted, true);
        self.delay.delay_ms(config::DROP_PULSE_MS);
        self.send_status(muted, false) && delivered
    }

    /// Send one keyboard chord with its hold timing. Every chord ends
    /// with an all-zero report; skipping it would leave phantom keys
    /// held on the host.
    pub fn send_chord(&mut self, chord: Chord) -> bool {
        let timing = chord.timing;
        let mut delivered = true;

        if timing.lead_hold_ms > 0 {
            delivered &= self
                .transport
                .send_keyboard(KeyboardReport::chord(chord.modifier, 0));
            self.delay.delay_ms(timing.lead_hold_ms);
        }

        delivered &= self
            .transport
            .send_keyboard(KeyboardReport::chord(chord.modifier, chord.key));
        self.delay.delay_ms(timing.key_hold_ms);

        if timing.tail_hold_ms > 0 {
            delivered &= self
                .transport
                .send_keyboard(KeyboardReport::chord(chord.modifier, 0));
            self.delay.delay_ms(timing.tail_hold_ms);
        }

        delivered &= self.transport.send_keyboard(KeyboardReport::empty());
        if timing.settle_ms > 0 {
            self.delay.delay_ms(timing.settle_ms);
        }
        delivered
    }

    /// Pulse a consumer-control action: set the bit, hold briefly,
    /// clear to zero. Consumer controls are edge-triggered host-side.
    pub fn pulse_consumer(&mut self, action: ConsumerReport) -> bool {
        let delivered = self.transport.send_consumer(action);
        self.delay.delay_ms(config::CONSUMER_PULSE_MS);
        self.transport.send_consumer(ConsumerReport::release()) && delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn dispatcher(clients: usize) -> Dispatcher<MockTransport, NoDelay> {
        Dispatcher::new(MockTransport::new(clients), NoDelay)
    }

    #[test]
    fn tap_chord_sends_press_then_release() {
        let mut d = dispatcher(1);
        assert!(d.send_chord(Chord::CTRL_SHIFT_F1));
        let sent = &d.transport().keyboard;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], [0x03, 0x00, 0x3A, 0x00, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(sent[1], [0u8; 8]);
    }

    #[test]
    fn phased_chord_brackets_key_with_modifier_only_reports() {
        let mut d = dispatcher(1);
        assert!(d.send_chord(Chord::CTRL_ALT_H));
        let sent = &d.transport().keyboard;
        assert_eq!(sent.len(), 4);
        assert_eq!(sent[0], [0x05, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(sent[1], [0x05, 0x00, 0x0B, 0x00, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(sent[2], [0x05, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(sent[3], [0u8; 8]);
    }

    #[test]
    fn every_chord_variant_ends_with_release() {
        for chord in [
            Chord::LEFT_ARROW,
            Chord::RIGHT_ARROW,
            Chord::CTRL_E,
            Chord::CTRL_ALT_H,
            Chord::CTRL_ALT_H_SEQUENTIAL,
            Chord::CTRL_ALT_H_FAST,
            Chord::CTRL_ALT_H_RIGHT,
        ] {
            let mut d = dispatcher(1);
            d.send_chord(chord);
            assert_eq!(*d.transport().keyboard.last().unwrap(), [0u8; 8]);
        }
    }

    #[test]
    fn consumer_pulse_sets_then_clears() {
        let mut d = dispatcher(1);
        assert!(d.pulse_consumer(ConsumerReport::volume_up()));
        assert_eq!(d.transport().consumer.as_slice(), &[0x01, 0x00]);
    }

    #[test]
    fn drop_pulse_raises_and_clears_drop_bit() {
        let mut d = dispatcher(1);
        assert!(d.pulse_drop(true));
        assert_eq!(d.transport().telephony.as_slice(), &[0x03, 0x01]);
    }

    #[test]
    fn sends_report_failure_with_no_clients() {
        let mut d = dispatcher(0);
        assert!(!d.send_status(true, false));
        assert!(!d.send_chord(Chord::CTRL_ALT_H));
        assert!(!d.pulse_consumer(ConsumerReport::mute()));
        assert_eq!(d.transport().total_sends(), 0);
    }
}
