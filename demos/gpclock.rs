//! General purpose clock example: square wave on GPIO 4
//!
//! Runs GPCLK0 from the 19.2 MHz oscillator divided by 192 (100 kHz) for
//! ten seconds. Run as root: `cargo run --example gpclock --features devmem`

use std::{thread, time::Duration};

use bcm_periph::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut mem = DevMem::open()?;
    let periph = PeripheralsBuilder::new()
        .std_delay()
        .poll_limit(1_000_000)
        .open(&mut mem);
    let clocks = periph.clocks();

    // stop the generator before touching source or divisor
    clocks.stop(ClockId::Gp0)?;
    clocks.wait_idle(ClockId::Gp0)?;

    periph.gpio().set_function(4, Function::GpClk0)?;
    clocks.configure(ClockId::Gp0, ClockConfig::new(ClockSource::Oscillator, 192)?)?;
    clocks.start(ClockId::Gp0)?;
    println!("GPCLK0 running: busy = {}", clocks.is_busy(ClockId::Gp0)?);

    thread::sleep(Duration::from_secs(10));

    clocks.stop(ClockId::Gp0)?;
    clocks.wait_idle(ClockId::Gp0)?;
    periph.gpio().set_function(4, Function::DigitalIn)?;
    periph.shutdown(&mut mem);
    Ok(())
}
