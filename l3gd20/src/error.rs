// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Driver error types.

use core::convert::Infallible;
use core::fmt;

use crate::register::Register;

/// Errors returned by [`L3gd20`](crate::L3gd20) operations.
///
/// `E` is the error type of the underlying [`SpiTransport`](crate::SpiTransport) and `P` the error
/// type of the chip-select pin.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E, P = Infallible> {
    /// A bus transaction did not complete.
    Bus(E),
    /// The chip-select pin could not be driven. A failed assertion means no bytes were clocked.
    ChipSelect(P),
    /// Write attempted on a read-only register. No bus activity took place.
    ProtocolViolation(Register),
    /// Value rejected because the driver cannot operate the device with it. No bus activity took
    /// place.
    UnsupportedConfiguration(Register),
    /// Device state changed during the output register sequence on two consecutive attempts.
    TornSample,
}

impl<E, P> Error<E, P> {
    /// Whether repeating the whole acquisition may succeed.
    pub fn is_transient(&self) -> bool {
        !matches!(
            self,
            Error::ProtocolViolation(_) | Error::UnsupportedConfiguration(_)
        )
    }
}

impl<E: fmt::Debug, P: fmt::Debug> fmt::Display for Error<E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Bus(e) => write!(f, "SPI bus error: {:?}", e),
            Error::ChipSelect(e) => write!(f, "chip-select pin error: {:?}", e),
            Error::ProtocolViolation(reg) => {
                write!(f, "register {} (0x{:02X}) is read-only", reg.name(), reg.addr())
            }
            Error::UnsupportedConfiguration(reg) => write!(
                f,
                "value for register {} (0x{:02X}) is not supported",
                reg.name(),
                reg.addr()
            ),
            Error::TornSample => write!(f, "sample torn across device updates"),
        }
    }
}
