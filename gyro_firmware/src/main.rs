// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # L3GD20 Gyroscope Demo Firmware
//!
//! Streams raw angular-velocity samples from an L3GD20 on SPI1 to the debug UART (USART3,
//! ST-LINK virtual COM port) of an STM32F767ZI devboard.
//!
//! LEDs:
//! - green: heartbeat, toggled after every sample
//! - blue: the last status read reported an overrun
//! - red: the last driver call failed
//!
//! Flash the board:
//!
//! ```bash
//! cd gyro_firmware && cargo run --release
//! ```

#![no_main]
#![no_std]
#![allow(dead_code)]

use core::fmt::Write;

use cortex_m::delay::Delay;
use cortex_m_rt::entry;
use panic_halt as _;

use hal::{
    pac,
    prelude::*,
    serial::{Config, Serial},
    spi::{Mode, Phase, Polarity, Spi},
};
use stm32f7xx_hal as hal;

use l3gd20::config::{Bandwidth, DataRate, FullScale};
use l3gd20::{ControlConfiguration, L3gd20};

mod hw;
use hw::{BoardPins, ChipSelect, Led, SpiBus, Usart};

const BAUD_RATE: u32 = 115_200;

/// The L3GD20 accepts up to 10 MHz.
const SPI_CLOCK_KHZ: u32 = 1_000;

const SAMPLE_PERIOD_MS: u32 = 100;

/// Poll interval while waiting for ZYXDA.
const READY_POLL_MS: u32 = 1;

/// L3GD20 samples on rising SPC edges with SPC idle high.
const GYRO_SPI_MODE: Mode = Mode {
    polarity: Polarity::IdleHigh,
    phase: Phase::CaptureOnSecondTransition,
};

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();
    let mut apb2 = rcc.apb2;

    let mut delay = Delay::new(cp.SYST, clocks.sysclk().raw());

    // GPIO
    let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOC, dp.GPIOD);

    // LED
    let mut led_heartbeat = Led::active_high(pins.leds.green);
    let mut led_overrun = Led::active_high(pins.leds.blue);
    let mut led_fault = Led::active_high(pins.leds.red);

    // USART3 (DBG)
    let usart_cfg = Config {
        baud_rate: BAUD_RATE.bps(),
        ..Default::default()
    };
    let serial = Serial::new(
        dp.USART3,
        (pins.usart3.tx, pins.usart3.rx),
        &clocks,
        usart_cfg,
    );
    let mut usart = Usart::new(serial);

    // SPI1
    let spi1_raw = Spi::new(dp.SPI1, (pins.spi1.sck, pins.spi1.miso, pins.spi1.mosi));
    let spi1_enabled =
        spi1_raw.enable::<u8>(GYRO_SPI_MODE, SPI_CLOCK_KHZ.kHz(), &clocks, &mut apb2);
    let mut spi_bus = SpiBus::new(spi1_enabled);

    // Gyroscope
    let mut gyro = L3gd20::new(ChipSelect::active_low(pins.spi1.gyro_cs)).unwrap();

    let config = ControlConfiguration::default()
        .with_data_rate(DataRate::Hz95)
        .with_bandwidth(Bandwidth::Medium)
        .with_full_scale(FullScale::Dps500)
        .with_block_data_update(true);

    usart.println("L3GD20 demo");

    if let Err(e) = gyro.configure(&mut spi_bus, &config) {
        led_fault.on();
        let _ = writeln!(usart, "configure failed: {}\r", e);
    }

    match gyro.read_configuration(&mut spi_bus) {
        Ok(readback) => {
            usart.print_configuration(&readback);
            if readback != config {
                led_fault.on();
                usart.println("control registers do not match the written configuration");
            }
        }
        Err(e) => {
            led_fault.on();
            let _ = writeln!(usart, "readback failed: {}\r", e);
        }
    }

    // The first conversion after a configuration change may still use the old settings.
    if let Err(e) = gyro.discard_sample(&mut spi_bus) {
        led_fault.on();
        let _ = writeln!(usart, "discard failed: {}\r", e);
    }

    loop {
        let status = match gyro.read_status(&mut spi_bus) {
            Ok(status) => status,
            Err(e) => {
                led_fault.on();
                let _ = writeln!(usart, "status read failed: {}\r", e);
                delay.delay_ms(SAMPLE_PERIOD_MS);
                continue;
            }
        };

        if !status.zyx_available() {
            delay.delay_ms(READY_POLL_MS);
            continue;
        }

        led_overrun.set(status.any_overrun());
        if status.any_overrun() {
            usart.print_status(status);
        }

        match gyro.read_angular_velocity(&mut spi_bus) {
            Ok(sample) => {
                led_fault.off();
                usart.print_sample(&sample);
            }
            Err(e) => {
                led_fault.on();
                let _ = writeln!(usart, "sample failed: {}\r", e);
            }
        }

        led_heartbeat.toggle();
        delay.delay_ms(SAMPLE_PERIOD_MS);
    }
}
