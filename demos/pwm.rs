//! PWM example: fade an LED on GPIO 18
//!
//! Channel 0 in mark/space mode, clocked from the oscillator divided by 16
//! (1.2 MHz) with a range of 1024 ticks.
//! Run as root: `cargo run --example pwm --features devmem`

use std::{thread, time::Duration};

use bcm_periph::prelude::*;

const RANGE: u32 = 1024;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut mem = DevMem::open()?;
    let periph = PeripheralsBuilder::new()
        .std_delay()
        .poll_limit(1_000_000)
        .open(&mut mem);
    let pwm = periph.pwm();

    periph.gpio().set_function(18, Function::Pwm0)?;

    periph.clocks().stop(ClockId::Pwm)?;
    periph.clocks().wait_idle(ClockId::Pwm)?;
    pwm.configure_clock(ClockConfig::new(ClockSource::Oscillator, 16)?)?;

    pwm.configure(
        0,
        PwmConfig {
            ms_mode: true,
            ..Default::default()
        },
    )?;
    pwm.set_range(0, RANGE)?;
    pwm.set_data(0, 0)?;
    pwm.start(0)?;

    for step in (0..=RANGE).step_by(16).chain((0..=RANGE).rev().step_by(16)) {
        pwm.set_data(0, step)?;
        thread::sleep(Duration::from_millis(20));
    }

    pwm.stop(0)?;
    periph.clocks().stop(ClockId::Pwm)?;
    periph.gpio().set_function(18, Function::DigitalIn)?;
    periph.shutdown(&mut mem);
    Ok(())
}
