// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! L3GD20 driver.
//!
//! This module handles SPI framing and register access for the L3GD20 and assembles angular
//! velocity samples from the output registers.
//!
//! SPI framing (mode 3, CPOL = 1 / CPHA = 1), one register per chip-select frame:
//! - byte 0: `RW` (bit 7, 1 = read) | `MS` (bit 6, left clear) | 6-bit address
//! - byte 1: data written by the host, or the register contents clocked in on a read

use embedded_hal::digital::OutputPin;

use crate::bus::{Selected, SpiTransport};
use crate::config::{ControlConfiguration, DataRate, FullScale, PowerMode, CTRL4_BLE};
use crate::error::Error;
use crate::register::Register;
use crate::sample::{assemble, AngularVelocity, Axis};
use crate::status::Status;

/// Full acquisitions attempted by [`L3gd20::read_angular_velocity`] before reporting a torn sample.
const ACQUISITION_ATTEMPTS: usize = 2;

/// L3GD20 driver bound to a chip-select line.
///
/// The SPI bus is passed in as `&mut` to each method so that the gyroscope can share its bus with
/// other devices. The driver keeps no copy of the device configuration.
pub struct L3gd20<CS> {
    cs: CS,
}

impl<CS: OutputPin> L3gd20<CS> {
    /// Construct a driver from an active-low chip-select pin, driving it to the inactive (high)
    /// level.
    pub fn new(mut cs: CS) -> Result<Self, CS::Error> {
        cs.set_high()?;
        Ok(Self { cs })
    }

    /// Release the chip-select pin.
    pub fn free(self) -> CS {
        self.cs
    }

    /// Read one register.
    pub fn read_register<SPI: SpiTransport>(
        &mut self,
        spi: &mut SPI,
        reg: Register,
    ) -> Result<u8, Error<SPI::Error, CS::Error>> {
        self.transfer_frame(spi, reg.read_command(), 0x00)
    }

    /// Write one control register.
    ///
    /// Output and status registers are read-only on the device. Writing them returns
    /// [`Error::ProtocolViolation`] without touching the bus. A CTRL_REG4 value with BLE set would
    /// swap the output byte order under sample assembly and is rejected the same way with
    /// [`Error::UnsupportedConfiguration`].
    ///
    /// The device applies the new value asynchronously; discard the next sample if it must reflect
    /// the new configuration.
    pub fn write_register<SPI: SpiTransport>(
        &mut self,
        spi: &mut SPI,
        reg: Register,
        value: u8,
    ) -> Result<(), Error<SPI::Error, CS::Error>> {
        if !reg.is_writable() {
            return Err(Error::ProtocolViolation(reg));
        }
        if reg == Register::CtrlReg4 && value & CTRL4_BLE != 0 {
            return Err(Error::UnsupportedConfiguration(reg));
        }
        self.transfer_frame(spi, reg.write_command(), value)?;
        Ok(())
    }

    /// Read-modify-write the bits of a control register selected by `mask`.
    pub fn modify_register<SPI: SpiTransport>(
        &mut self,
        spi: &mut SPI,
        reg: Register,
        mask: u8,
        bits: u8,
    ) -> Result<(), Error<SPI::Error, CS::Error>> {
        if !reg.is_writable() {
            return Err(Error::ProtocolViolation(reg));
        }
        let current = self.read_register(spi, reg)?;
        self.write_register(spi, reg, (current & !mask) | (bits & mask))
    }

    /// Read and decode STATUS_REG.
    ///
    /// Overrun bits are reported as-is; they mean the device dropped an unread conversion, not
    /// that this read failed.
    pub fn read_status<SPI: SpiTransport>(
        &mut self,
        spi: &mut SPI,
    ) -> Result<Status, Error<SPI::Error, CS::Error>> {
        Ok(Status::from_raw(self.read_register(spi, Register::StatusReg)?))
    }

    /// Read one coherent angular-velocity sample.
    ///
    /// STATUS_REG is read before and after the six output registers. If it changed, the device
    /// produced a conversion mid-sequence and the axes may come from different instants; the
    /// sample is dropped and the sequence repeated once. A second mismatch is reported as
    /// [`Error::TornSample`]. Bus errors are returned immediately.
    ///
    /// Readiness gating via [`Status::zyx_available`] is left to the caller.
    pub fn read_angular_velocity<SPI: SpiTransport>(
        &mut self,
        spi: &mut SPI,
    ) -> Result<AngularVelocity, Error<SPI::Error, CS::Error>> {
        for _ in 0..ACQUISITION_ATTEMPTS {
            if let Some(sample) = self.try_acquire(spi)? {
                return Ok(sample);
            }
        }
        Err(Error::TornSample)
    }

    /// Read and drop one sample, e.g. right after a configuration change.
    pub fn discard_sample<SPI: SpiTransport>(
        &mut self,
        spi: &mut SPI,
    ) -> Result<(), Error<SPI::Error, CS::Error>> {
        self.read_angular_velocity(spi).map(|_| ())
    }

    /// Write CTRL_REG1..CTRL_REG5 in order.
    ///
    /// A configuration with [`Endianness::Big`](crate::config::Endianness::Big) is rejected with
    /// [`Error::UnsupportedConfiguration`] before anything is written.
    pub fn configure<SPI: SpiTransport>(
        &mut self,
        spi: &mut SPI,
        config: &ControlConfiguration,
    ) -> Result<(), Error<SPI::Error, CS::Error>> {
        let regs = config.to_registers();
        if regs[3] & CTRL4_BLE != 0 {
            return Err(Error::UnsupportedConfiguration(Register::CtrlReg4));
        }
        for (reg, value) in Register::CONTROL.into_iter().zip(regs) {
            self.write_register(spi, reg, value)?;
        }
        Ok(())
    }

    /// Read CTRL_REG1..CTRL_REG5 back from the device.
    pub fn read_configuration<SPI: SpiTransport>(
        &mut self,
        spi: &mut SPI,
    ) -> Result<ControlConfiguration, Error<SPI::Error, CS::Error>> {
        let mut regs = [0u8; 5];
        for (value, reg) in regs.iter_mut().zip(Register::CONTROL) {
            *value = self.read_register(spi, reg)?;
        }
        Ok(ControlConfiguration::from_registers(regs))
    }

    /// Change the output data rate, leaving the rest of CTRL_REG1 untouched.
    pub fn set_data_rate<SPI: SpiTransport>(
        &mut self,
        spi: &mut SPI,
        data_rate: DataRate,
    ) -> Result<(), Error<SPI::Error, CS::Error>> {
        self.modify_register(spi, Register::CtrlReg1, 0b1100_0000, (data_rate as u8) << 6)
    }

    /// Change the full-scale range, leaving the rest of CTRL_REG4 untouched.
    pub fn set_full_scale<SPI: SpiTransport>(
        &mut self,
        spi: &mut SPI,
        full_scale: FullScale,
    ) -> Result<(), Error<SPI::Error, CS::Error>> {
        self.modify_register(spi, Register::CtrlReg4, 0b0011_0000, (full_scale as u8) << 4)
    }

    /// Switch power mode.
    ///
    /// Sleep clears every axis enable, so waking to `Normal` re-enables all three axes.
    pub fn set_power_mode<SPI: SpiTransport>(
        &mut self,
        spi: &mut SPI,
        mode: PowerMode,
    ) -> Result<(), Error<SPI::Error, CS::Error>> {
        let (mask, bits) = match mode {
            PowerMode::PowerDown => (0b0000_1000, 0b0000_0000),
            PowerMode::Sleep => (0b0000_1111, 0b0000_1000),
            PowerMode::Normal => {
                let current = self.read_register(spi, Register::CtrlReg1)?;
                if current & 0b111 == 0 {
                    (0b0000_1111, 0b0000_1111)
                } else {
                    (0b0000_1000, 0b0000_1000)
                }
            }
        };
        self.modify_register(spi, Register::CtrlReg1, mask, bits)
    }

    /// One status-bracketed pass over the output registers. `None` means the sample was torn.
    fn try_acquire<SPI: SpiTransport>(
        &mut self,
        spi: &mut SPI,
    ) -> Result<Option<AngularVelocity>, Error<SPI::Error, CS::Error>> {
        let before = self.read_status(spi)?;

        let mut axes = [0i16; 3];
        for (value, axis) in axes.iter_mut().zip(Axis::ALL) {
            // LSB first, then MSB
            let lsb = self.read_register(spi, axis.lsb())?;
            let msb = self.read_register(spi, axis.msb())?;
            *value = assemble(lsb, msb);
        }

        let after = self.read_status(spi)?;
        if before != after {
            return Ok(None);
        }

        Ok(Some(AngularVelocity::from(axes)))
    }

    /// One chip-select frame: command byte, then data byte. Returns the byte clocked in with the
    /// data byte.
    fn transfer_frame<SPI: SpiTransport>(
        &mut self,
        spi: &mut SPI,
        command: u8,
        data: u8,
    ) -> Result<u8, Error<SPI::Error, CS::Error>> {
        let cs = Selected::new(&mut self.cs).map_err(Error::ChipSelect)?;
        spi.transfer_byte(command).map_err(Error::Bus)?;
        let value = spi.transfer_byte(data).map_err(Error::Bus)?;
        cs.release().map_err(Error::ChipSelect)?;
        Ok(value)
    }
}
