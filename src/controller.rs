//! The per-tick controller that owns all state and the board interface it
//! is driven through.

use crate::config::{Config, ConfigError};
use crate::debouncer::{DebounceState, ReleaseDebouncer};
use crate::headlight::{HeadlightMode, Headlights, resolve_mode};
use crate::ignition::update_ignition;

/// One sample of every input, taken at the start of a tick
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Inputs {
    /// Raw ignition button level, `false` while pressed
    pub button_raw: bool,
    /// Driver seat occupied
    pub occupied: bool,
    /// Headlight selector position in `[0, 1]`
    pub mode_selector: f32,
    /// Ambient light level in `[0, 1]`, lower is darker
    pub ambient_light: f32,
}

/// Output levels latched at the end of a tick
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Outputs {
    pub lamp_left: bool,
    pub lamp_right: bool,
    pub ignition_indicator: bool,
}

/// Hardware the controller reads from and writes to
pub trait ControllerIo {
    fn read_inputs(&mut self) -> Inputs;
    fn write_outputs(&mut self, outputs: &Outputs);
}

/// All controller state, advanced one tick at a time.
#[derive(Clone, Copy, Debug)]
pub struct Controller {
    config: Config,
    debouncer: ReleaseDebouncer,
    ignition_on: bool,
    headlights: Headlights,
    mode: HeadlightMode,
}

impl Controller {
    /// Validates `config` and seeds the button debouncer from its level at
    /// power-up. Ignition starts off and all timers start at zero.
    pub fn new(config: Config, initial_button_level: bool) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            config,
            debouncer: ReleaseDebouncer::new(config.debounce_window_ms, initial_button_level),
            ignition_on: false,
            headlights: Headlights::new(&config),
            mode: HeadlightMode::default(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn ignition_on(&self) -> bool {
        self.ignition_on
    }

    pub fn debounce_state(&self) -> DebounceState {
        self.debouncer.state()
    }

    /// Mode resolved on the most recent tick
    pub fn mode(&self) -> HeadlightMode {
        self.mode
    }

    pub fn headlights(&self) -> &Headlights {
        &self.headlights
    }

    /// Runs debounce, ignition and headlights once, in that order.
    pub fn tick(&mut self, inputs: &Inputs, dt_ms: u32) -> Outputs {
        let released = self.debouncer.advance(inputs.button_raw, dt_ms);
        if released {
            info!("ignition button released, occupied: {}", inputs.occupied);
        }

        let ignition_on = update_ignition(inputs.occupied, released, self.ignition_on);
        if ignition_on != self.ignition_on {
            info!("ignition {}", if ignition_on { "on" } else { "off" });
            self.ignition_on = ignition_on;
        }

        let mode = resolve_mode(inputs.mode_selector, &self.config);
        if mode != self.mode {
            info!("headlight mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }

        let (lamp_left, lamp_right) =
            self.headlights
                .compute_lamps(self.ignition_on, mode, inputs.ambient_light, dt_ms);

        Outputs {
            lamp_left,
            lamp_right,
            ignition_indicator: self.ignition_on,
        }
    }
}

/// Samples `io`, advances the controller by `dt_ms` and drives the outputs.
pub fn run_tick<IO: ControllerIo>(io: &mut IO, controller: &mut Controller, dt_ms: u32) -> Outputs {
    let inputs = io.read_inputs();
    let outputs = controller.tick(&inputs, dt_ms);
    io.write_outputs(&outputs);
    outputs
}
