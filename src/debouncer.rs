//! Time-based debouncing of the ignition push-button.
//!
//! The button is wired active low: a raw level of `false` means pressed and
//! `true` means released. A level change is only committed once the line has
//! been given the full debounce window to settle, and the only event reported
//! is a confirmed release.

/// Where the debouncer is in a press/release cycle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceState {
    /// Settled, button up
    IdleReleased,
    /// Saw a press, waiting out the window before committing to it
    DebounceFalling,
    /// Settled, button down
    IdlePressed,
    /// Saw a release, waiting out the window before committing to it
    DebounceRising,
}

impl DebounceState {
    /// The settled state matching a raw line level
    pub fn settled(raw_level: bool) -> Self {
        if is_pressed(raw_level) {
            DebounceState::IdlePressed
        } else {
            DebounceState::IdleReleased
        }
    }
}

#[inline]
fn is_pressed(raw_level: bool) -> bool {
    !raw_level
}

/// Turns a bouncing button line into clean release events.
#[derive(Clone, Copy, Debug)]
pub struct ReleaseDebouncer {
    state: DebounceState,
    /// Milliseconds spent in the current `Debounce*` state, zero otherwise
    elapsed_ms: u32,
    window_ms: u32,
}

impl ReleaseDebouncer {
    /// Seeds the machine from the button level at boot so a button held down
    /// during power-up does not produce an event.
    pub fn new(window_ms: u32, raw_level: bool) -> Self {
        Self {
            state: DebounceState::settled(raw_level),
            elapsed_ms: 0,
            window_ms,
        }
    }

    pub fn state(&self) -> DebounceState {
        self.state
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    /// Drops whatever cycle was in progress and reseeds from the current level.
    /// Never emits an event.
    pub fn resync(&mut self, raw_level: bool) {
        self.enter(DebounceState::settled(raw_level));
    }

    /// Advances the machine by one sample taken `dt_ms` after the previous one.
    /// Returns `true` exactly when a release has been confirmed.
    pub fn advance(&mut self, raw_level: bool, dt_ms: u32) -> bool {
        let pressed = is_pressed(raw_level);

        match self.state {
            DebounceState::IdleReleased => {
                if pressed {
                    self.enter(DebounceState::DebounceFalling);
                }
                false
            }
            DebounceState::DebounceFalling => {
                if self.window_elapsed(dt_ms) {
                    if pressed {
                        debug!("button press confirmed");
                        self.enter(DebounceState::IdlePressed);
                    } else {
                        self.enter(DebounceState::IdleReleased);
                    }
                }
                false
            }
            DebounceState::IdlePressed => {
                if !pressed {
                    self.enter(DebounceState::DebounceRising);
                }
                false
            }
            DebounceState::DebounceRising => {
                if !self.window_elapsed(dt_ms) {
                    return false;
                }

                if pressed {
                    self.enter(DebounceState::IdlePressed);
                    false
                } else {
                    debug!("button release confirmed");
                    self.enter(DebounceState::IdleReleased);
                    true
                }
            }
        }
    }

    fn enter(&mut self, state: DebounceState) {
        self.state = state;
        self.elapsed_ms = 0;
    }

    fn window_elapsed(&mut self, dt_ms: u32) -> bool {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
        self.elapsed_ms >= self.window_ms
    }
}
