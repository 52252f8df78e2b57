// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! STATUS_REG decoding.

use crate::sample::Axis;

/// STATUS_REG contents.
///
/// Reflects instantaneous device state. Read it fresh for every acquisition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    raw: u8,
}

impl Status {
    #[inline]
    pub const fn from_raw(raw: u8) -> Self {
        Self { raw }
    }

    #[inline]
    pub const fn raw(&self) -> u8 {
        self.raw
    }

    /// X, Y, Z data overrun (ZYXOR).
    ///
    /// A new set of data overwrote the previous one before it was read.
    #[inline]
    pub const fn zyx_overrun(&self) -> bool {
        (self.raw & (1 << 7)) != 0
    }

    /// Z axis data overrun (ZOR).
    #[inline]
    pub const fn z_overrun(&self) -> bool {
        (self.raw & (1 << 6)) != 0
    }

    /// Y axis data overrun (YOR).
    #[inline]
    pub const fn y_overrun(&self) -> bool {
        (self.raw & (1 << 5)) != 0
    }

    /// X axis data overrun (XOR).
    #[inline]
    pub const fn x_overrun(&self) -> bool {
        (self.raw & (1 << 4)) != 0
    }

    /// New X, Y, Z data available (ZYXDA).
    #[inline]
    pub const fn zyx_available(&self) -> bool {
        (self.raw & (1 << 3)) != 0
    }

    /// New Z axis data available (ZDA).
    #[inline]
    pub const fn z_available(&self) -> bool {
        (self.raw & (1 << 2)) != 0
    }

    /// New Y axis data available (YDA).
    #[inline]
    pub const fn y_available(&self) -> bool {
        (self.raw & (1 << 1)) != 0
    }

    /// New X axis data available (XDA).
    #[inline]
    pub const fn x_available(&self) -> bool {
        (self.raw & 1) != 0
    }

    /// New data available on `axis`.
    pub const fn available(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.x_available(),
            Axis::Y => self.y_available(),
            Axis::Z => self.z_available(),
        }
    }

    /// Overrun reported on `axis`.
    pub const fn overrun(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.x_overrun(),
            Axis::Y => self.y_overrun(),
            Axis::Z => self.z_overrun(),
        }
    }

    /// Any overrun bit set.
    #[inline]
    pub const fn any_overrun(&self) -> bool {
        (self.raw & 0xF0) != 0
    }

    /// Every axis in `axes` has new data.
    pub fn ready(&self, axes: &[Axis]) -> bool {
        axes.iter().all(|&axis| self.available(axis))
    }
}
