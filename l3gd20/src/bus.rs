// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Bus access for the driver.
//!
//! - [`SpiTransport`] is the byte-wide full-duplex transfer the driver is built on. Board code
//!   implements it for its own SPI wrapper, or wraps an `embedded-hal` bus in [`HalSpi`].
//! - [`Selected`] asserts an active-low chip-select for as long as it lives.
//!
//! The bus is single-owner: callers serialize access by holding `&mut` to it for the duration of
//! each driver call.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

/// Blocking, full-duplex transfer of one 8-bit word.
pub trait SpiTransport {
    type Error;

    /// Clock out `byte` and return the byte clocked in at the same time.
    fn transfer_byte(&mut self, byte: u8) -> Result<u8, Self::Error>;
}

impl<T: SpiTransport + ?Sized> SpiTransport for &mut T {
    type Error = T::Error;

    #[inline]
    fn transfer_byte(&mut self, byte: u8) -> Result<u8, Self::Error> {
        T::transfer_byte(self, byte)
    }
}

/// Adapter from an `embedded-hal` 1.0 [`SpiBus`] to [`SpiTransport`].
pub struct HalSpi<SPI> {
    spi: SPI,
}

impl<SPI: SpiBus<u8>> HalSpi<SPI> {
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    pub fn free(self) -> SPI {
        self.spi
    }
}

impl<SPI: SpiBus<u8>> SpiTransport for HalSpi<SPI> {
    type Error = SPI::Error;

    fn transfer_byte(&mut self, byte: u8) -> Result<u8, Self::Error> {
        let mut tmp = [byte];
        self.spi.transfer_in_place(&mut tmp)?;
        // The byte must be fully clocked before chip-select can be released.
        self.spi.flush()?;
        Ok(tmp[0])
    }
}

/// Scoped chip-select assertion.
///
/// The line is driven low on construction. [`Selected::release`] drives it high again and reports
/// a pin failure. A guard dropped without `release` (an early return on a bus error) still drives
/// the line high, best effort, since the caller is already getting an error.
pub struct Selected<'a, CS: OutputPin> {
    cs: &'a mut CS,
    active: bool,
}

impl<'a, CS: OutputPin> Selected<'a, CS> {
    /// Assert the chip select.
    ///
    /// On failure the line is driven back to its inactive level and no guard is returned, so no
    /// bytes are clocked against an unselected device.
    pub fn new(cs: &'a mut CS) -> Result<Self, CS::Error> {
        if let Err(e) = cs.set_low() {
            cs.set_high().ok();
            return Err(e);
        }
        Ok(Self { cs, active: true })
    }

    /// Deassert the chip select.
    pub fn release(mut self) -> Result<(), CS::Error> {
        self.active = false;
        self.cs.set_high()
    }
}

impl<CS: OutputPin> Drop for Selected<'_, CS> {
    #[inline]
    fn drop(&mut self) {
        if self.active {
            self.cs.set_high().ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockDevice, MockPinError};

    #[test]
    fn test_selected_releases_on_drop() {
        let device = MockDevice::new();
        let mut cs = device.chip_select();

        {
            let _guard = Selected::new(&mut cs).unwrap();
            assert!(device.is_selected());
        }
        assert!(!device.is_selected());
        assert_eq!(device.select_count(), 1);
    }

    #[test]
    fn test_selected_release() {
        let device = MockDevice::new();
        let mut cs = device.chip_select();

        let guard = Selected::new(&mut cs).unwrap();
        assert!(guard.release().is_ok());
        assert!(!device.is_selected());
    }

    #[test]
    fn test_selected_reports_select_failure() {
        let device = MockDevice::new();
        device.fail_select();
        let mut cs = device.chip_select();

        assert_eq!(Selected::new(&mut cs).err(), Some(MockPinError));
        assert!(!device.is_selected());
    }

    #[test]
    fn test_selected_reports_release_failure() {
        let device = MockDevice::new();
        let mut cs = device.chip_select();

        let guard = Selected::new(&mut cs).unwrap();
        device.fail_deselect();
        assert_eq!(guard.release(), Err(MockPinError));
    }

    #[test]
    fn test_selected_releases_on_early_return() {
        fn fails<CS: OutputPin>(cs: &mut CS) -> Result<(), ()> {
            let _guard = Selected::new(cs).map_err(|_| ())?;
            Err(())
        }

        let device = MockDevice::new();
        let mut cs = device.chip_select();
        assert!(fails(&mut cs).is_err());
        assert!(!device.is_selected());
    }

    /// Inverting loopback that counts flushes.
    struct Inverter {
        flushes: usize,
    }

    impl embedded_hal::spi::ErrorType for Inverter {
        type Error = core::convert::Infallible;
    }

    impl SpiBus<u8> for Inverter {
        fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
            words.fill(0xFF);
            Ok(())
        }

        fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
            for (r, w) in read.iter_mut().zip(write) {
                *r = !*w;
            }
            Ok(())
        }

        fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
            for w in words.iter_mut() {
                *w = !*w;
            }
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_hal_spi_transfers_and_flushes() {
        let mut spi = HalSpi::new(Inverter { flushes: 0 });
        assert_eq!(spi.transfer_byte(0x0F), Ok(0xF0));
        assert_eq!(spi.transfer_byte(0xA5), Ok(0x5A));
        assert_eq!(spi.free().flushes, 2);
    }

    #[test]
    fn test_transport_through_mut_ref() {
        fn read_one<T: SpiTransport>(mut spi: T, cmd: u8) -> Result<u8, T::Error> {
            spi.transfer_byte(cmd)?;
            spi.transfer_byte(0x00)
        }

        let device = MockDevice::new();
        device.set_register(crate::Register::OutYL, 0x5A);
        let mut cs = device.chip_select();
        let mut spi = device.spi();

        let _guard = Selected::new(&mut cs).unwrap();
        let value = read_one(&mut spi, crate::Register::OutYL.read_command()).unwrap();
        assert_eq!(value, 0x5A);
    }
}
