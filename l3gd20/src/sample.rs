// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Angular-velocity samples.
//!
//! The L3GD20 exposes each 16-bit axis reading through a pair of 8-bit output registers. With
//! CTRL_REG4.BLE cleared (the reset value) the lower address holds the LSB.

use crate::register::Register;

/// Measurement axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Acquisition order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Output register holding the least significant byte.
    #[inline]
    pub const fn lsb(self) -> Register {
        match self {
            Axis::X => Register::OutXL,
            Axis::Y => Register::OutYL,
            Axis::Z => Register::OutZL,
        }
    }

    /// Output register holding the most significant byte.
    #[inline]
    pub const fn msb(self) -> Register {
        match self {
            Axis::X => Register::OutXH,
            Axis::Y => Register::OutYH,
            Axis::Z => Register::OutZH,
        }
    }
}

/// Combine an output register pair into a two's-complement reading.
#[inline]
pub const fn assemble(lsb: u8, msb: u8) -> i16 {
    (((msb as u16) << 8) | lsb as u16) as i16
}

/// Raw angular velocity on the three axes, in device counts.
///
/// Scale depends on the configured full-scale range.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AngularVelocity {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl AngularVelocity {
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    /// Reading for a single axis.
    #[inline]
    pub const fn axis(&self, axis: Axis) -> i16 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Readings in X, Y, Z order.
    #[inline]
    pub const fn to_array(self) -> [i16; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[i16; 3]> for AngularVelocity {
    fn from([x, y, z]: [i16; 3]) -> Self {
        Self { x, y, z }
    }
}
