// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USART abstraction layer.
//!
//! Debug terminal output for the gyroscope demo: raw strings, hex register dumps, signed decimal
//! counts, and whole samples/status bytes.
//!
//! Note: When using `writeln!`, be sure to include `\r` (CR) in the format string to ensure correct
//! line endings on the terminal.
//!
//! To access the terminal on the host machine, connect to the ST-LINK USB port and use
//! ```
//! $ screen /dev/tty.usbmodem* <baud_rate>
//! ```
//!
//! To close the debug terminal, press `Ctrl+A` then `Ctrl+\` then `y`.

use core::fmt;
use nb::block;

use l3gd20::{AngularVelocity, ControlConfiguration, Register, Status};
use stm32f7xx_hal::{
    prelude::*,
    serial::{Instance, Pins, Serial, Tx},
};

pub struct Usart<U: Instance> {
    tx: Tx<U>,
}

impl<U: Instance> Usart<U> {
    pub fn new<PINS: Pins<U>>(serial: Serial<U, PINS>) -> Self {
        let (tx, _rx) = serial.split();
        Self { tx }
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    pub fn write_str(&mut self, s: &str) {
        for &b in s.as_bytes() {
            self.write_byte(b);
        }
    }

    /// Write string and CRLF terminator.
    #[inline]
    pub fn println(&mut self, s: &str) {
        self.write_str(s);
        self.write_str("\r\n");
    }

    /// Block until the hardware TX FIFO/drain is flushed.
    #[inline]
    pub fn flush(&mut self) {
        let _ = block!(self.tx.flush());
    }

    pub fn print_hex_u8(&mut self, n: u8) {
        const HEX: &[u8; 16] = b"0123456789ABCDEF";
        self.write_str("0x");
        self.write_byte(HEX[((n >> 4) & 0xF) as usize]);
        self.write_byte(HEX[(n & 0xF) as usize]);
    }

    pub fn print_u16(&mut self, n: u16) {
        let mut buf = itoa::Buffer::new();
        self.write_str(buf.format(n));
    }

    pub fn print_i16(&mut self, n: i16) {
        let mut buf = itoa::Buffer::new();
        self.write_str(buf.format(n));
    }

    /// `x=<counts> y=<counts> z=<counts>` followed by CRLF.
    pub fn print_sample(&mut self, sample: &AngularVelocity) {
        self.write_str("x=");
        self.print_i16(sample.x);
        self.write_str(" y=");
        self.print_i16(sample.y);
        self.write_str(" z=");
        self.print_i16(sample.z);
        self.write_str("\r\n");
    }

    pub fn print_status(&mut self, status: Status) {
        self.write_str("STATUS_REG=");
        self.print_hex_u8(status.raw());
        if status.any_overrun() {
            self.write_str(" (overrun)");
        }
        self.write_str("\r\n");
    }

    /// One `NAME=0xVV` line per control register, then the decoded rate and range.
    pub fn print_configuration(&mut self, config: &ControlConfiguration) {
        for (reg, value) in Register::CONTROL.into_iter().zip(config.to_registers()) {
            self.write_str(reg.name());
            self.write_byte(b'=');
            self.print_hex_u8(value);
            self.write_str("\r\n");
        }
        self.write_str("odr=");
        self.print_u16(config.data_rate.hz());
        self.write_str("Hz range=");
        self.print_u16(config.full_scale.dps());
        self.write_str("dps\r\n");
    }
}

// Implement `core::fmt::Write` so we can use `write!` / `writeln!` on `Usart`.
impl<U: Instance> fmt::Write for Usart<U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Usart::write_str(self, s);
        Ok(())
    }
}
