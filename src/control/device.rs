//! Device state machine.
//!
//! One authoritative [`DeviceState`] instance, mutated from two
//! sources: conditioned local input events, and host feedback pushed
//! through the transport's output report. The host wins - its status
//! writes overwrite `call_active` and `muted` wholesale, and the poll
//! loop drains the feedback queue before handling local events so a
//! stale local view is never acted on.
//!
//! Gating rules: mute and drop actions require an active call and are
//! silently dropped otherwise (logged, never queued). Encoder rotation
//! is never gated - volume and navigation work in and out of calls.

use embedded_hal::delay::DelayNs;
use log::{debug, info};

use crate::hid::{Chord, ConsumerReport, HostStatus};
use crate::indicator::{ModeFlash, StatusIndicator};
use crate::input::{ButtonEvent, RotationDirection, TouchEvent};
use crate::transport::{HostFeedbackChannel, Transport};

use super::dispatch::Dispatcher;

/// Authoritative device state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceState {
    pub call_active: bool,
    pub muted: bool,
    pub dropped: bool,
    /// Touch press/release acts as push-to-talk instead of toggle.
    pub push_to_talk: bool,
    /// Encoder rotation controls volume (true) or arrow keys (false).
    pub volume_mode: bool,
    pub touch_pressed: bool,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self {
            call_active: false,
            muted: false,
            dropped: false,
            push_to_talk: false,
            volume_mode: true,
            touch_pressed: false,
        }
    }
}

pub struct DeviceController<T: Transport, D: DelayNs, I: StatusIndicator> {
    state: DeviceState,
    dispatch: Dispatcher<T, D>,
    indicator: I,
}

impl<T: Transport, D: DelayNs, I: StatusIndicator> DeviceController<T, D, I> {
    pub fn new(transport: T, delay: D, indicator: I) -> Self {
        Self {
            state: DeviceState::default(),
            dispatch: Dispatcher::new(transport, delay),
            indicator,
        }
    }

    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    pub fn indicator_mut(&mut self) -> &mut I {
        &mut self.indicator
    }

    pub fn transport_mut(&mut self) -> &mut T {
        self.dispatch.transport_mut()
    }

    /// Apply every queued host status write. Call at the top of each
    /// poll tick, before local events are handled.
    pub fn drain_feedback(&mut self, feedback: &HostFeedbackChannel) {
        while let Ok(status) = feedback.try_receive() {
            self.apply_host_status(status);
        }
    }

    /// Overwrite call/mute state with the host's view. The host is
    /// authoritative once connected; local divergence is corrected
    /// here, not negotiated.
    pub fn apply_host_status(&mut self, status: HostStatus) {
        self.state.call_active = status.off_hook;
        self.state.muted = status.muted;
        self.refresh_indicator();
        debug!(
            "host state: call {} mute {}",
            self.state.call_active, self.state.muted
        );
    }

    /// Left button: conferencing shortcut on click, hang-up pulse on
    /// long press. Both require an active call.
    pub fn on_left_button(&mut self, event: ButtonEvent) {
        if !self.state.call_active {
            debug!("left button ignored - no active call");
            return;
        }
        match event {
            ButtonEvent::Clicked => {
                info!("left button clicked: Ctrl+Shift+F1");
                self.dispatch.send_chord(Chord::CTRL_SHIFT_F1);
            }
            ButtonEvent::LongPressed => {
                info!("left button long pressed: drop call");
                self.state.dropped = true;
                self.dispatch.pulse_drop(self.state.muted);
                self.state.dropped = false;
            }
            _ => {}
        }
    }

    /// Right button: conferencing mute chord on click, in-call only.
    pub fn on_right_button(&mut self, event: ButtonEvent) {
        if event == ButtonEvent::Clicked {
            if !self.state.call_active {
                debug!("right button ignored - no active call");
                return;
            }
            info!("right button clicked: Ctrl+Alt+H");
            self.dispatch.send_chord(Chord::CTRL_ALT_H);
        }
    }

    /// Encoder click button: mode toggles and pairing.
    pub fn on_encoder_button(&mut self, event: ButtonEvent) {
        match event {
            ButtonEvent::Clicked => {
                // Rotation mode only switches outside a call.
                if self.state.call_active {
                    debug!("encoder click ignored - call is active");
                    return;
                }
                self.state.volume_mode = !self.state.volume_mode;
                info!(
                    "encoder mode: {}",
                    if self.state.volume_mode {
                        "volume control"
                    } else {
                        "arrow keys"
                    }
                );
                self.indicator.mode_flash(if self.state.volume_mode {
                    ModeFlash::VolumeMode
                } else {
                    ModeFlash::NavigationMode
                });
            }
            ButtonEvent::DoubleClicked => {
                self.state.push_to_talk = !self.state.push_to_talk;
                info!(
                    "touch mode: {}",
                    if self.state.push_to_talk {
                        "push-to-talk"
                    } else {
                        "toggle mute"
                    }
                );
                self.indicator.mode_flash(if self.state.push_to_talk {
                    ModeFlash::PushToTalk
                } else {
                    ModeFlash::ToggleMute
                });
                // The flash is transient; fall back to the call status.
                self.refresh_indicator();
            }
            ButtonEvent::LongPressed => {
                info!("encoder long pressed: pairing mode");
                self.dispatch.transport_mut().start_advertising();
                self.indicator.mode_flash(ModeFlash::Pairing);
            }
            _ => {}
        }
    }

    /// Touch pad: mute control, in-call only. In toggle mode a press
    /// flips the mute state; in push-to-talk the pad is live while held
    /// (press unmutes, release mutes).
    pub fn on_touch(&mut self, event: TouchEvent) {
        match event {
            TouchEvent::Pressed => {
                self.state.touch_pressed = true;
                if !self.state.call_active {
                    debug!("touch ignored - no active call");
                    return;
                }
                if self.state.push_to_talk {
                    if self.state.muted {
                        self.state.muted = false;
                        debug!("push-to-talk: unmuted while touched");
                        self.publish_mute_state();
                    }
                } else {
                    self.state.muted = !self.state.muted;
                    debug!("toggle: mute is now {}", self.state.muted);
                    self.publish_mute_state();
                }
            }
            TouchEvent::Released => {
                self.state.touch_pressed = false;
                if !self.state.call_active {
                    debug!("touch release ignored - no active call");
                    return;
                }
                if self.state.push_to_talk {
                    self.state.muted = true;
                    debug!("push-to-talk: muted on release");
                    self.publish_mute_state();
                }
            }
        }
    }

    /// Encoder rotation. Never gated on call state. Both mappings are
    /// intentionally inverted relative to compass direction - hosts
    /// depend on them; do not "fix".
    pub fn on_rotation(&mut self, direction: RotationDirection) {
        if self.state.volume_mode {
            match direction {
                RotationDirection::Clockwise => {
                    debug!("rotation cw (volume mode): volume down");
                    self.dispatch.pulse_consumer(ConsumerReport::volume_down());
                }
                RotationDirection::CounterClockwise => {
                    debug!("rotation ccw (volume mode): volume up");
                    self.dispatch.pulse_consumer(ConsumerReport::volume_up());
                }
            }
        } else {
            match direction {
                RotationDirection::Clockwise => {
                    debug!("rotation cw (arrow mode): left arrow");
                    self.dispatch.send_chord(Chord::LEFT_ARROW);
                }
                RotationDirection::CounterClockwise => {
                    debug!("rotation ccw (arrow mode): right arrow");
                    self.dispatch.send_chord(Chord::RIGHT_ARROW);
                }
            }
        }
    }

    /// Resend the current status so a newly joined client starts in
    /// sync instead of waiting for the next state change.
    pub fn resend_status(&mut self) {
        self.dispatch
            .send_status(self.state.muted, self.state.dropped);
    }

    fn publish_mute_state(&mut self) {
        self.refresh_indicator();
        if self.dispatch.transport().connected_clients() > 0 {
            self.dispatch
                .send_status(self.state.muted, self.state.dropped);
        }
    }

    fn refresh_indicator(&mut self) {
        self.indicator
            .call_status(self.state.call_active, self.state.muted);
    }
}
