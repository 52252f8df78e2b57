// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # L3GD20 Gyroscope Driver
//!
//! Register access and sample acquisition for the ST L3GD20 three-axis MEMS gyroscope over a
//! 4-wire SPI bus.
//!
//! The driver only guarantees correct acquisition of raw register state. Bus bring-up, interrupt
//! routing and conversion from raw counts to degrees/second belong to the caller.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`register`] | Register map and SPI command-byte framing |
//! | [`sample`] | Angular-velocity sample and LSB/MSB assembly |
//! | [`status`] | `STATUS_REG` decoding |
//! | [`config`] | Typed CTRL_REG1..CTRL_REG5 configuration |
//! | [`bus`] | Transport trait, chip-select scoping, `embedded-hal` adapter |
//! | [`device`] | The [`L3gd20`] driver itself |
//!
//! ## Usage
//!
//! ```ignore
//! let mut gyro = L3gd20::new(cs)?;
//! gyro.configure(&mut spi, &ControlConfiguration::default())?;
//! gyro.discard_sample(&mut spi)?;
//!
//! let status = gyro.read_status(&mut spi)?;
//! if status.zyx_available() {
//!     let AngularVelocity { x, y, z } = gyro.read_angular_velocity(&mut spi)?;
//! }
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bus;
pub mod config;
pub mod device;
pub mod error;
pub mod register;
pub mod sample;
pub mod status;

#[cfg(test)]
mod mock;

pub use bus::{HalSpi, SpiTransport};
pub use config::ControlConfiguration;
pub use device::L3gd20;
pub use error::Error;
pub use register::Register;
pub use sample::{assemble, AngularVelocity, Axis};
pub use status::Status;
