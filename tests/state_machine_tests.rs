//! Device state machine integration tests: mute/drop gating, mode
//! toggles, host authority, and report dispatch through the transport.

mod common;

use callknob::hid::HostStatus;
use callknob::input::{ButtonEvent, RotationDirection, TouchEvent};
use callknob::transport::HostFeedbackChannel;

use common::{controller, controller_in_call};

#[test]
fn toggle_mode_touch_press_flips_mute_once() {
    let mut c = controller_in_call(1);
    assert!(!c.state().muted);

    c.on_touch(TouchEvent::Pressed);
    assert!(c.state().muted);

    // Release leaves mute untouched in toggle mode.
    c.on_touch(TouchEvent::Released);
    assert!(c.state().muted);

    // Exactly one status report went out for the pair.
    assert_eq!(c.transport_mut().telephony.as_slice(), &[0x01]);
}

#[test]
fn push_to_talk_inverts_press_release_semantics() {
    let mut c = controller_in_call(1);
    c.on_encoder_button(ButtonEvent::DoubleClicked);
    assert!(c.state().push_to_talk);

    // Already unmuted: press is a no-op, no report.
    c.on_touch(TouchEvent::Pressed);
    assert!(!c.state().muted);
    assert!(c.transport_mut().telephony.is_empty());

    // Release always mutes.
    c.on_touch(TouchEvent::Released);
    assert!(c.state().muted);
    assert_eq!(c.transport_mut().telephony.as_slice(), &[0x01]);

    // Next press unmutes again.
    c.on_touch(TouchEvent::Pressed);
    assert!(!c.state().muted);
    assert_eq!(c.transport_mut().telephony.as_slice(), &[0x01, 0x00]);
}

#[test]
fn mute_and_drop_are_gated_on_call_active() {
    let mut c = controller(1);
    assert!(!c.state().call_active);

    c.on_touch(TouchEvent::Pressed);
    c.on_touch(TouchEvent::Released);
    c.on_left_button(ButtonEvent::LongPressed);
    c.on_left_button(ButtonEvent::Clicked);
    c.on_right_button(ButtonEvent::Clicked);

    assert!(!c.state().muted);
    assert_eq!(c.transport_mut().total_sends(), 0);
}

#[test]
fn touch_pressed_flag_tracks_contact_even_without_call() {
    let mut c = controller(1);
    c.on_touch(TouchEvent::Pressed);
    assert!(c.state().touch_pressed);
    c.on_touch(TouchEvent::Released);
    assert!(!c.state().touch_pressed);
}

#[test]
fn host_feedback_overwrites_local_state() {
    let mut c = controller_in_call(1);

    // Local toggle drifts away from the host's view.
    c.on_touch(TouchEvent::Pressed);
    assert!(c.state().muted);

    // Host pushes its authoritative state: call active, muted.
    c.apply_host_status(HostStatus {
        muted: true,
        off_hook: true,
    });
    assert!(c.state().muted);
    assert!(c.state().call_active);

    // And can end the call / unmute wholesale.
    c.apply_host_status(HostStatus {
        muted: false,
        off_hook: false,
    });
    assert!(!c.state().muted);
    assert!(!c.state().call_active);
}

#[test]
fn feedback_queue_applies_in_order_before_local_events() {
    let feedback = HostFeedbackChannel::new();
    feedback
        .try_send(HostStatus {
            muted: false,
            off_hook: true,
        })
        .unwrap();
    feedback
        .try_send(HostStatus {
            muted: true,
            off_hook: true,
        })
        .unwrap();

    let mut c = controller(1);
    c.drain_feedback(&feedback);

    // Last write wins; queue is drained empty.
    assert!(c.state().muted);
    assert!(c.state().call_active);
    assert!(feedback.try_receive().is_err());

    // A touch press now toggles from the host-supplied state.
    c.on_touch(TouchEvent::Pressed);
    assert!(!c.state().muted);
}

#[test]
fn long_press_sends_momentary_drop_pulse() {
    let mut c = controller_in_call(1);
    c.on_left_button(ButtonEvent::LongPressed);

    // Drop raised then cleared; mute bit carried along both times.
    assert_eq!(c.transport_mut().telephony.as_slice(), &[0x02, 0x00]);
    // The device does not believe the call is permanently dropped.
    assert!(!c.state().dropped);
}

#[test]
fn left_click_sends_ctrl_shift_f1_chord() {
    let mut c = controller_in_call(1);
    c.on_left_button(ButtonEvent::Clicked);
    let sent = &c.transport_mut().keyboard;
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0][0], 0x03); // Ctrl+Shift
    assert_eq!(sent[0][2], 0x3A); // F1
    assert_eq!(sent[1], [0u8; 8]); // release
}

#[test]
fn right_click_sends_phased_ctrl_alt_h_chord() {
    let mut c = controller_in_call(1);
    c.on_right_button(ButtonEvent::Clicked);
    let sent = &c.transport_mut().keyboard;
    assert_eq!(sent.len(), 4);
    assert!(sent.iter().all(|r| r[0] == 0x05 || *r == [0u8; 8]));
    assert_eq!(sent[1][2], 0x0B); // H held in the middle phase
}

#[test]
fn rotation_in_volume_mode_uses_inverted_consumer_mapping() {
    let mut c = controller(1);
    assert!(c.state().volume_mode);

    c.on_rotation(RotationDirection::Clockwise);
    c.on_rotation(RotationDirection::CounterClockwise);

    // Clockwise → volume DOWN, counter-clockwise → volume UP, each as
    // a set-then-clear pulse.
    assert_eq!(
        c.transport_mut().consumer.as_slice(),
        &[0x02, 0x00, 0x01, 0x00]
    );
}

#[test]
fn rotation_in_arrow_mode_uses_inverted_arrow_mapping() {
    let mut c = controller(1);
    c.on_encoder_button(ButtonEvent::Clicked); // leave volume mode
    assert!(!c.state().volume_mode);

    c.on_rotation(RotationDirection::Clockwise);
    c.on_rotation(RotationDirection::CounterClockwise);

    let sent = &c.transport_mut().keyboard;
    assert_eq!(sent.len(), 4);
    assert_eq!(sent[0][2], 0x50); // clockwise → LEFT arrow
    assert_eq!(sent[2][2], 0x4F); // counter-clockwise → RIGHT arrow
}

#[test]
fn rotation_is_never_gated_on_call_state() {
    let mut c = controller_in_call(1);
    c.on_rotation(RotationDirection::Clockwise);
    assert_eq!(c.transport_mut().consumer.len(), 2);

    let mut idle = controller(1);
    idle.on_rotation(RotationDirection::Clockwise);
    assert_eq!(idle.transport_mut().consumer.len(), 2);
}

#[test]
fn encoder_mode_toggle_only_outside_calls() {
    let mut c = controller_in_call(1);
    c.on_encoder_button(ButtonEvent::Clicked);
    assert!(c.state().volume_mode); // unchanged during a call

    let mut idle = controller(1);
    idle.on_encoder_button(ButtonEvent::Clicked);
    assert!(!idle.state().volume_mode);
    idle.on_encoder_button(ButtonEvent::Clicked);
    assert!(idle.state().volume_mode);
}

#[test]
fn push_to_talk_toggle_works_during_calls() {
    let mut c = controller_in_call(1);
    c.on_encoder_button(ButtonEvent::DoubleClicked);
    assert!(c.state().push_to_talk);
    c.on_encoder_button(ButtonEvent::DoubleClicked);
    assert!(!c.state().push_to_talk);
}

#[test]
fn encoder_long_press_requests_pairing() {
    let mut c = controller(1);
    c.on_encoder_button(ButtonEvent::LongPressed);
    assert_eq!(c.transport_mut().advertising_requests, 1);
}

#[test]
fn no_client_sends_fail_without_side_effects() {
    let mut c = controller_in_call(0);

    c.on_touch(TouchEvent::Pressed); // state changes, send fails
    c.on_rotation(RotationDirection::Clockwise);
    c.on_left_button(ButtonEvent::Clicked);

    assert_eq!(c.transport_mut().total_sends(), 0);
    // Local state still tracked; the next connection resyncs the host.
    assert!(c.state().muted);
}

#[test]
fn status_resend_reflects_current_state() {
    let mut c = controller_in_call(1);
    c.on_touch(TouchEvent::Pressed); // now muted
    c.transport_mut().telephony.clear();

    // Policy: a newly joined client gets the current status pushed.
    c.resend_status();
    assert_eq!(c.transport_mut().telephony.as_slice(), &[0x01]);
}

#[test]
fn mode_flash_falls_back_to_call_status_after_ptt_toggle() {
    let mut c = controller_in_call(1);
    c.on_touch(TouchEvent::Pressed); // muted, red
    c.on_encoder_button(ButtonEvent::DoubleClicked);

    // After the transient flash the indicator must show call+mute
    // again, not the toggle pattern.
    let last = c.indicator_mut().last_status().unwrap();
    assert_eq!(last, (true, true));
}
