#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Blocking, Channel as AdcChannel, Config as AdcConfig};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_time::{Duration, Ticker};
use headlight_controller::{run_tick, Config, Controller, ControllerIo, Inputs, Outputs};
use {defmt_rtt as _, panic_probe as _};

/// Full scale of the RP2040's 12-bit ADC
const ADC_FULL_SCALE: f32 = 4095.0;

/// The headlight controller's view of the board: two digital inputs, two
/// analog inputs and three digital outputs.
struct Board<'d> {
    ignition_btn: Input<'d>,
    occupancy: Input<'d>,
    adc: Adc<'d, Blocking>,
    mode_selector: AdcChannel<'d>,
    ambient_light: AdcChannel<'d>,
    lamp_left: Output<'d>,
    lamp_right: Output<'d>,
    ignition_led: Output<'d>,
    /// Last good readings, reused when a conversion fails
    last_selector: f32,
    last_ambient: f32,
}

impl Board<'_> {
    /// Reads an analog channel scaled to `[0, 1]`, falling back to `last` if
    /// the conversion fails
    fn read_analog(
        adc: &mut Adc<'_, Blocking>,
        channel: &mut AdcChannel<'_>,
        last: &mut f32,
    ) -> f32 {
        match adc.blocking_read(channel) {
            Ok(raw) => {
                *last = (raw as f32 / ADC_FULL_SCALE).clamp(0.0, 1.0);
            }
            Err(e) => warn!("ADC conversion failed: {:?}", e),
        }
        *last
    }
}

impl ControllerIo for Board<'_> {
    fn read_inputs(&mut self) -> Inputs {
        Inputs {
            button_raw: self.ignition_btn.is_high(),
            occupied: self.occupancy.is_high(),
            mode_selector: Self::read_analog(
                &mut self.adc,
                &mut self.mode_selector,
                &mut self.last_selector,
            ),
            ambient_light: Self::read_analog(
                &mut self.adc,
                &mut self.ambient_light,
                &mut self.last_ambient,
            ),
        }
    }

    fn write_outputs(&mut self, outputs: &Outputs) {
        self.lamp_left.set_level(Level::from(outputs.lamp_left));
        self.lamp_right.set_level(Level::from(outputs.lamp_right));
        self.ignition_led
            .set_level(Level::from(outputs.ignition_indicator));
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Headlight controller starting");
    info!("Configuring...");

    let p = embassy_rp::init(Default::default());

    let config = Config::default();
    info!("{}", config);

    // Ignition button is active low
    let mut ignition_btn = Input::new(p.PIN_16, Pull::Up);
    ignition_btn.set_schmitt(true);

    let board = Board {
        ignition_btn,
        occupancy: Input::new(p.PIN_17, Pull::Down),
        adc: Adc::new_blocking(p.ADC, AdcConfig::default()),
        mode_selector: AdcChannel::new_pin(p.PIN_26, Pull::None),
        ambient_light: AdcChannel::new_pin(p.PIN_27, Pull::None),
        lamp_left: Output::new(p.PIN_18, Level::Low),
        lamp_right: Output::new(p.PIN_19, Level::Low),
        ignition_led: Output::new(p.PIN_25, Level::Low),
        last_selector: 0.0,
        last_ambient: 1.0,
    };

    // A bad configuration is a build mistake, refuse to run with it
    let controller = unwrap!(Controller::new(config, board.ignition_btn.is_high()));

    info!("Configuration complete");

    info!("Spawning control loop task");
    unwrap!(spawner.spawn(control_loop(board, controller)));
}

/// Runs the controller once per tick period, forever. The tick period is
/// also the `dt` handed to the controller, so timing is counted in ticks and
/// never read from the clock.
#[embassy_executor::task]
async fn control_loop(mut board: Board<'static>, mut controller: Controller) -> ! {
    let dt_ms = controller.config().tick_period_ms;
    let mut ticker = Ticker::every(Duration::from_millis(dt_ms as u64));
    let mut last = Outputs::default();

    info!("Starting control loop, tick {} ms", dt_ms);
    loop {
        let outputs = run_tick(&mut board, &mut controller, dt_ms);
        if outputs != last {
            debug!("outputs {}", outputs);
            last = outputs;
        }

        ticker.next().await;
    }
}
