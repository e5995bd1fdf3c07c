//! Button debounce and click classification.
//!
//! Input is a raw active-low pin level sampled every poll tick. The
//! classifier emits exactly one event per physical action:
//!
//! - a short press-release → `Clicked`, delivered once the double-click
//!   window expires without a second press
//! - two short press-releases inside the window → one `DoubleClicked`
//!   (the `Clicked` that would otherwise fire is suppressed)
//! - holding past the long-press threshold → one `LongPressed`
//! - `Released` fires once per physical release regardless of how the
//!   press was classified
//!
//! All events are edge-triggered; a level never re-fires an event.

use heapless::Vec;

use crate::config;

/// Classified button events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonEvent {
    Pressed,
    Released,
    Clicked,
    DoubleClicked,
    LongPressed,
}

/// Timing parameters for one button instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ButtonTiming {
    pub debounce_ms: u64,
    pub long_press_ms: u64,
    pub double_click_ms: u64,
}

impl Default for ButtonTiming {
    fn default() -> Self {
        Self {
            debounce_ms: config::DEBOUNCE_MS,
            long_press_ms: config::LONG_PRESS_MS,
            double_click_ms: config::DOUBLE_CLICK_MS,
        }
    }
}

impl ButtonTiming {
    /// The encoder's click button uses a longer double-click window.
    pub fn encoder_button() -> Self {
        Self {
            double_click_ms: config::ENCODER_DOUBLE_CLICK_MS,
            ..Self::default()
        }
    }
}

/// Debouncing click/double-click/long-press classifier for one button.
pub struct ButtonClassifier {
    timing: ButtonTiming,
    /// Last raw (bouncy) reading.
    raw: bool,
    /// Debounced level.
    stable: bool,
    /// When the raw reading last changed.
    last_flip_ms: u64,
    /// When the current stable press began.
    press_started_ms: u64,
    /// Long press already emitted for the current hold.
    long_fired: bool,
    /// Release time of a click still waiting out the double-click window.
    pending_click_ms: Option<u64>,
    /// The press in progress is the second of a double click.
    double_armed: bool,
}

impl ButtonClassifier {
    pub fn new(timing: ButtonTiming) -> Self {
        Self {
            timing,
            raw: false,
            stable: false,
            last_flip_ms: 0,
            press_started_ms: 0,
            long_fired: false,
            pending_click_ms: None,
            double_armed: false,
        }
    }

    /// Feed one raw sample. `pressed` is the already-inverted pin level
    /// (true = held down). Returns the events that became final on this
    /// tick, in firing order.
    pub fn update(&mut self, pressed: bool, now_ms: u64) -> Vec<ButtonEvent, 4> {
        let mut events = Vec::new();

        if pressed != self.raw {
            self.raw = pressed;
            self.last_flip_ms = now_ms;
        }

        if self.raw != self.stable && now_ms - self.last_flip_ms >= self.timing.debounce_ms {
            self.stable = self.raw;
            if self.stable {
                self.on_press_edge(now_ms, &mut events);
            } else {
                self.on_release_edge(now_ms, &mut events);
            }
        }

        // Long press fires while the button is still held.
        if self.stable
            && !self.long_fired
            && now_ms - self.press_started_ms >= self.timing.long_press_ms
        {
            self.long_fired = true;
            self.double_armed = false;
            self.pending_click_ms = None;
            let _ = events.push(ButtonEvent::LongPressed);
        }

        // A lone click becomes final once the double-click window closes.
        if !self.stable {
            if let Some(released_ms) = self.pending_click_ms {
                if now_ms - released_ms > self.timing.double_click_ms {
                    self.pending_click_ms = None;
                    let _ = events.push(ButtonEvent::Clicked);
                }
            }
        }

        events
    }

    fn on_press_edge(&mut self, now_ms: u64, events: &mut Vec<ButtonEvent, 4>) {
        if let Some(released_ms) = self.pending_click_ms {
            if now_ms - released_ms <= self.timing.double_click_ms {
                self.double_armed = true;
                self.pending_click_ms = None;
            }
        }
        self.press_started_ms = now_ms;
        self.long_fired = false;
        let _ = events.push(ButtonEvent::Pressed);
    }

    fn on_release_edge(&mut self, now_ms: u64, events: &mut Vec<ButtonEvent, 4>) {
        let _ = events.push(ButtonEvent::Released);
        if self.long_fired {
            // The hold was already classified; the release is just a release.
        } else if self.double_armed {
            self.double_armed = false;
            let _ = events.push(ButtonEvent::DoubleClicked);
        } else {
            self.pending_click_ms = Some(now_ms);
        }
    }
}
