//! Tuning constants for the controller and their validation.

use core::fmt;

/// Time the button must hold a level before the debouncer commits to it.
pub const DEFAULT_DEBOUNCE_WINDOW_MS: u32 = 40;
/// Selector readings at or below this select [`HeadlightMode::Off`](crate::headlight::HeadlightMode::Off).
pub const DEFAULT_OFF_THRESHOLD: f32 = 0.33;
/// Selector readings at or above this select [`HeadlightMode::On`](crate::headlight::HeadlightMode::On).
pub const DEFAULT_ON_THRESHOLD: f32 = 0.66;
/// Ambient readings at or below this count as dark.
pub const DEFAULT_DUSK_THRESHOLD: f32 = 0.65;
pub const DEFAULT_ON_DWELL_MS: u32 = 1000;
pub const DEFAULT_OFF_DWELL_MS: u32 = 2000;
pub const DEFAULT_TICK_PERIOD_MS: u32 = 10;

/// Controller configuration. Start from [`Config::default`] and adjust with
/// the `with_*` methods, then [`Config::validate`] before use.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub debounce_window_ms: u32,
    pub off_threshold: f32,
    pub on_threshold: f32,
    pub dusk_threshold: f32,
    /// How long it must stay dark before Auto switches the lamps on
    pub on_dwell_ms: u32,
    /// How long it must stay bright before Auto switches the lamps off
    pub off_dwell_ms: u32,
    pub tick_period_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debounce_window_ms: DEFAULT_DEBOUNCE_WINDOW_MS,
            off_threshold: DEFAULT_OFF_THRESHOLD,
            on_threshold: DEFAULT_ON_THRESHOLD,
            dusk_threshold: DEFAULT_DUSK_THRESHOLD,
            on_dwell_ms: DEFAULT_ON_DWELL_MS,
            off_dwell_ms: DEFAULT_OFF_DWELL_MS,
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
        }
    }
}

impl Config {
    pub fn with_debounce_window_ms(mut self, ms: u32) -> Self {
        self.debounce_window_ms = ms;
        self
    }

    /// Sets both selector thresholds at once since they are only valid as a pair
    pub fn with_mode_thresholds(mut self, off: f32, on: f32) -> Self {
        self.off_threshold = off;
        self.on_threshold = on;
        self
    }

    pub fn with_dusk_threshold(mut self, dusk: f32) -> Self {
        self.dusk_threshold = dusk;
        self
    }

    pub fn with_dwell_ms(mut self, on_dwell_ms: u32, off_dwell_ms: u32) -> Self {
        self.on_dwell_ms = on_dwell_ms;
        self.off_dwell_ms = off_dwell_ms;
        self
    }

    pub fn with_tick_period_ms(mut self, ms: u32) -> Self {
        self.tick_period_ms = ms;
        self
    }

    /// Checks the invariants the controller relies on. A failure here is a
    /// programming error; the firmware asserts on it at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for threshold in [self.off_threshold, self.on_threshold, self.dusk_threshold] {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ConfigError::ThresholdOutOfRange);
            }
        }

        if self.off_threshold >= self.on_threshold {
            return Err(ConfigError::ThresholdsOverlap);
        }

        if self.debounce_window_ms == 0 {
            return Err(ConfigError::ZeroDebounceWindow);
        }

        if self.on_dwell_ms == 0 || self.off_dwell_ms == 0 {
            return Err(ConfigError::ZeroDwell);
        }

        if self.tick_period_ms == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }

        Ok(())
    }
}

/// Ways a [`Config`] can be malformed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The off threshold is not strictly below the on threshold
    ThresholdsOverlap,
    /// A threshold is outside `[0, 1]` or NaN
    ThresholdOutOfRange,
    ZeroDebounceWindow,
    ZeroDwell,
    ZeroTickPeriod,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ThresholdsOverlap => {
                write!(f, "mode off threshold must be below the on threshold")
            }
            ConfigError::ThresholdOutOfRange => write!(f, "threshold outside [0, 1]"),
            ConfigError::ZeroDebounceWindow => write!(f, "debounce window must be non-zero"),
            ConfigError::ZeroDwell => write!(f, "auto dwell durations must be non-zero"),
            ConfigError::ZeroTickPeriod => write!(f, "tick period must be non-zero"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn overlapping_thresholds_are_rejected() {
        let config = Config::default().with_mode_thresholds(0.66, 0.33);
        assert_eq!(config.validate(), Err(ConfigError::ThresholdsOverlap));

        let config = Config::default().with_mode_thresholds(0.5, 0.5);
        assert_eq!(config.validate(), Err(ConfigError::ThresholdsOverlap));
    }

    #[test]
    fn out_of_range_thresholds_are_rejected() {
        let config = Config::default().with_dusk_threshold(1.5);
        assert_eq!(config.validate(), Err(ConfigError::ThresholdOutOfRange));

        let config = Config::default().with_mode_thresholds(f32::NAN, 0.66);
        assert_eq!(config.validate(), Err(ConfigError::ThresholdOutOfRange));
    }

    #[test]
    fn zero_durations_are_rejected() {
        let config = Config::default().with_debounce_window_ms(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroDebounceWindow));

        let config = Config::default().with_dwell_ms(1000, 0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroDwell));

        let config = Config::default().with_tick_period_ms(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickPeriod));
    }
}
