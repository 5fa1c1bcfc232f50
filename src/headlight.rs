//! Low-beam headlight decision: selector mode, automatic dusk switching and
//! ignition gating.

use crate::config::Config;

/// Position of the three-way headlight selector
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HeadlightMode {
    #[default]
    Off,
    Auto,
    On,
}

/// Classifies a selector reading in `[0, 1]`. Both thresholds are inclusive
/// toward their own band.
pub fn resolve_mode(reading: f32, config: &Config) -> HeadlightMode {
    if reading <= config.off_threshold {
        HeadlightMode::Off
    } else if reading >= config.on_threshold {
        HeadlightMode::On
    } else {
        HeadlightMode::Auto
    }
}

/// Dwell-time hysteresis for the Auto mode.
///
/// The lamps only follow the ambient light once the new condition has held
/// for the full dwell: `on_dwell_ms` of darkness to switch on, `off_dwell_ms`
/// of daylight to switch off. Any reading that agrees with the current lamp
/// state clears the accumulator, so a transient (a bridge, a tunnel mouth)
/// never carries over into the next attempt.
#[derive(Clone, Copy, Debug)]
pub struct AutoLightTimer {
    elapsed_ms: u32,
    dusk_threshold: f32,
    on_dwell_ms: u32,
    off_dwell_ms: u32,
}

impl AutoLightTimer {
    pub fn new(config: &Config) -> Self {
        Self {
            elapsed_ms: 0,
            dusk_threshold: config.dusk_threshold,
            on_dwell_ms: config.on_dwell_ms,
            off_dwell_ms: config.off_dwell_ms,
        }
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
    }

    pub fn is_dark(&self, ambient: f32) -> bool {
        ambient <= self.dusk_threshold
    }

    /// Accounts for `dt_ms` at the given ambient level and returns whether the
    /// lamps should now be on.
    pub fn update(&mut self, ambient: f32, dt_ms: u32, lamps_on: bool) -> bool {
        let dwell_ms = match (self.is_dark(ambient), lamps_on) {
            (true, false) => self.on_dwell_ms,
            (false, true) => self.off_dwell_ms,
            // ambient agrees with the lamps, nothing pending
            (true, true) | (false, false) => {
                self.elapsed_ms = 0;
                return lamps_on;
            }
        };

        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
        if self.elapsed_ms < dwell_ms {
            return lamps_on;
        }

        self.elapsed_ms = 0;
        !lamps_on
    }
}

/// Combines mode, ignition and the Auto timer into the lamp pair.
#[derive(Clone, Copy, Debug)]
pub struct Headlights {
    auto: AutoLightTimer,
    /// The Auto decision as of the last Auto tick, kept across mode and
    /// ignition changes so Auto resumes instead of starting over
    auto_lamps_on: bool,
    lamps_on: bool,
}

impl Headlights {
    pub fn new(config: &Config) -> Self {
        Self {
            auto: AutoLightTimer::new(config),
            auto_lamps_on: false,
            lamps_on: false,
        }
    }

    pub fn lamps_on(&self) -> bool {
        self.lamps_on
    }

    pub fn auto_timer(&self) -> &AutoLightTimer {
        &self.auto
    }

    /// Computes the (left, right) lamp outputs for this tick. The two are
    /// always driven together.
    pub fn compute_lamps(
        &mut self,
        ignition_on: bool,
        mode: HeadlightMode,
        ambient: f32,
        dt_ms: u32,
    ) -> (bool, bool) {
        let lamps_on = if !ignition_on {
            // frozen until the ignition comes back
            false
        } else {
            match mode {
                HeadlightMode::Off => false,
                HeadlightMode::On => {
                    self.auto.reset();
                    true
                }
                HeadlightMode::Auto => {
                    self.auto_lamps_on = self.auto.update(ambient, dt_ms, self.auto_lamps_on);
                    self.auto_lamps_on
                }
            }
        };

        if lamps_on != self.lamps_on {
            info!("low beams {}", if lamps_on { "on" } else { "off" });
            self.lamps_on = lamps_on;
        }

        (lamps_on, lamps_on)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DARK: f32 = 0.5;
    const BRIGHT: f32 = 0.9;

    fn timer() -> AutoLightTimer {
        AutoLightTimer::new(&Config::default())
    }

    #[test]
    fn mode_boundaries() {
        let config = Config::default();
        assert_eq!(resolve_mode(0.0, &config), HeadlightMode::Off);
        assert_eq!(resolve_mode(0.33, &config), HeadlightMode::Off);
        assert_eq!(resolve_mode(0.3301, &config), HeadlightMode::Auto);
        assert_eq!(resolve_mode(0.5, &config), HeadlightMode::Auto);
        assert_eq!(resolve_mode(0.6599, &config), HeadlightMode::Auto);
        assert_eq!(resolve_mode(0.66, &config), HeadlightMode::On);
        assert_eq!(resolve_mode(1.0, &config), HeadlightMode::On);
    }

    #[test]
    fn custom_mode_thresholds() {
        let config = Config::default().with_mode_thresholds(0.1, 0.2);
        assert_eq!(resolve_mode(0.1, &config), HeadlightMode::Off);
        assert_eq!(resolve_mode(0.15, &config), HeadlightMode::Auto);
        assert_eq!(resolve_mode(0.2, &config), HeadlightMode::On);
    }

    #[test]
    fn dusk_threshold_is_inclusive() {
        let timer = timer();
        assert!(timer.is_dark(0.65));
        assert!(!timer.is_dark(0.6501));
    }

    #[test]
    fn lamps_turn_on_after_on_dwell() {
        let mut timer = timer();

        assert!(!timer.update(DARK, 999, false));
        assert_eq!(timer.elapsed_ms(), 999);
        assert!(timer.update(DARK, 1, false));
        assert_eq!(timer.elapsed_ms(), 0);
    }

    #[test]
    fn lamps_turn_on_after_on_dwell_in_small_steps() {
        let mut timer = timer();
        let mut lamps = false;

        for _ in 0..999 {
            lamps = timer.update(DARK, 1, lamps);
        }
        assert!(!lamps);

        lamps = timer.update(DARK, 1, lamps);
        assert!(lamps);
    }

    #[test]
    fn reversal_restarts_the_dwell() {
        let mut timer = timer();
        let mut lamps = false;

        lamps = timer.update(DARK, 500, lamps);
        lamps = timer.update(BRIGHT, 10, lamps);
        assert!(!lamps);
        assert_eq!(timer.elapsed_ms(), 0);

        lamps = timer.update(DARK, 999, lamps);
        assert!(!lamps);
        lamps = timer.update(DARK, 1, lamps);
        assert!(lamps);
    }

    #[test]
    fn lamps_turn_off_after_off_dwell() {
        let mut timer = timer();

        assert!(timer.update(BRIGHT, 1999, true));
        assert!(!timer.update(BRIGHT, 1, true));
    }

    #[test]
    fn steady_state_does_not_accumulate() {
        let mut timer = timer();

        for _ in 0..1000 {
            assert!(timer.update(DARK, 10, true));
            assert_eq!(timer.elapsed_ms(), 0);
        }
        for _ in 0..1000 {
            assert!(!timer.update(BRIGHT, 10, false));
            assert_eq!(timer.elapsed_ms(), 0);
        }
    }

    #[test]
    fn ignition_off_forces_lamps_off() {
        let mut headlights = Headlights::new(&Config::default());
        assert_eq!(
            headlights.compute_lamps(false, HeadlightMode::On, DARK, 10),
            (false, false)
        );
        assert_eq!(
            headlights.compute_lamps(false, HeadlightMode::Auto, DARK, 5000),
            (false, false)
        );
    }

    #[test]
    fn ignition_off_freezes_auto_accumulator() {
        let mut headlights = Headlights::new(&Config::default());

        headlights.compute_lamps(true, HeadlightMode::Auto, DARK, 600);
        assert_eq!(headlights.auto_timer().elapsed_ms(), 600);

        headlights.compute_lamps(false, HeadlightMode::Auto, DARK, 10_000);
        assert_eq!(headlights.auto_timer().elapsed_ms(), 600);

        // resumes from 600 rather than starting over
        assert_eq!(
            headlights.compute_lamps(true, HeadlightMode::Auto, DARK, 400),
            (true, true)
        );
    }

    #[test]
    fn off_mode_freezes_auto_accumulator() {
        let mut headlights = Headlights::new(&Config::default());

        headlights.compute_lamps(true, HeadlightMode::Auto, DARK, 300);
        assert_eq!(
            headlights.compute_lamps(true, HeadlightMode::Off, DARK, 5000),
            (false, false)
        );
        assert_eq!(headlights.auto_timer().elapsed_ms(), 300);
    }

    #[test]
    fn on_mode_resets_auto_accumulator() {
        let mut headlights = Headlights::new(&Config::default());

        headlights.compute_lamps(true, HeadlightMode::Auto, DARK, 300);
        assert_eq!(
            headlights.compute_lamps(true, HeadlightMode::On, BRIGHT, 10),
            (true, true)
        );
        assert_eq!(headlights.auto_timer().elapsed_ms(), 0);
    }

    #[test]
    fn auto_decision_survives_ignition_cycle() {
        let mut headlights = Headlights::new(&Config::default());

        assert_eq!(
            headlights.compute_lamps(true, HeadlightMode::Auto, DARK, 1000),
            (true, true)
        );
        assert!(headlights.lamps_on());

        headlights.compute_lamps(false, HeadlightMode::Auto, DARK, 10);
        assert!(!headlights.lamps_on());

        assert_eq!(
            headlights.compute_lamps(true, HeadlightMode::Auto, DARK, 10),
            (true, true)
        );
    }
}
