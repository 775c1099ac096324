//! SPI loopback example
//!
//! Wiring: connect MOSI (GPIO 10) to MISO (GPIO 9). Every byte sent should
//! come back unchanged.
//! Run as root: `cargo run --example spi_loopback --features devmem`

use bcm_periph::prelude::*;

const SPI_PINS: [(u8, Function); 5] = [
    (7, Function::Spi0Ce1),
    (8, Function::Spi0Ce0),
    (9, Function::Spi0Miso),
    (10, Function::Spi0Mosi),
    (11, Function::Spi0Sclk),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut mem = DevMem::open()?;
    let periph = PeripheralsBuilder::new()
        .std_delay()
        .poll_limit(100_000)
        .open(&mut mem);

    for (pin, function) in SPI_PINS {
        periph.gpio().set_function(pin, function)?;
    }

    let spi = periph.spi();
    spi.configure(&SpiConfig {
        clock_divider: 256,
        chip_select0: Some(CsLevel::Low),
        ..Default::default()
    })?;

    let single = spi.transfer_value(0xA5)?;
    println!("sent 0xa5, received {single:#04x}");

    let sent = *b"loopback";
    let received = spi.transfer_values::<16>(&sent)?;
    println!("sent {sent:02x?}, received {:02x?}", received.as_slice());
    if received.as_slice() != sent {
        eprintln!("mismatch: is MOSI wired to MISO?");
    }

    for (pin, _) in SPI_PINS {
        periph.gpio().set_function(pin, Function::DigitalIn)?;
    }
    periph.shutdown(&mut mem);
    Ok(())
}
