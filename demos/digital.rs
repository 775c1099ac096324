//! Digital I/O example: blink an output while reading an input
//!
//! Wiring: an LED on GPIO 17, a push button between GPIO 18 and ground.
//! Run as root: `cargo run --example digital --features devmem`

use std::{thread, time::Duration};

use bcm_periph::prelude::*;

const LED: u8 = 17;
const BUTTON: u8 = 18;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut mem = DevMem::open()?;
    let periph = PeripheralsBuilder::new().std_delay().open(&mut mem);
    let gpio = periph.gpio();

    print!("header pins:");
    periph.pins().for_each_accessible(|pin| print!(" {pin}"));
    println!();

    for pin in [LED, BUTTON] {
        if !gpio.gpio_accessible(pin)? {
            return Err(format!("GPIO {pin} is not on the header").into());
        }
    }

    gpio.set_function(LED, Function::DigitalOut)?;
    gpio.set_function(BUTTON, Function::DigitalIn)?;
    gpio.set_pull(BUTTON, Pull::Up)?;

    for i in 0..10 {
        gpio.set_level(LED, i % 2 == 0)?;
        // the button pulls the line low
        let pressed = !gpio.level(BUTTON)?;
        println!("led {}, button {}", i % 2 == 0, if pressed { "down" } else { "up" });
        thread::sleep(Duration::from_millis(500));
    }

    gpio.set_level(LED, false)?;
    gpio.set_pull(BUTTON, Pull::Off)?;
    periph.shutdown(&mut mem);
    Ok(())
}
