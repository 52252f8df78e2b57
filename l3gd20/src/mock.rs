// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Simulated L3GD20 for tests.
//!
//! [`MockDevice`] holds the register file. [`MockSpi`] and [`MockCs`] are handles onto it that
//! implement the driver's bus seam, so the device sees chip-select edges and SPI bytes in the order
//! the driver issues them. Each completed register access is logged as a [`Transaction`].

use core::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::digital::{self, ErrorKind, ErrorType, OutputPin};

use crate::bus::SpiTransport;
use crate::register::Register;

/// Completed register access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transaction {
    Read(Register),
    Write(Register, u8),
}

/// Injected transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockBusError;

/// Injected chip-select pin failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockPinError;

impl digital::Error for MockPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

#[derive(Debug)]
struct State {
    regs: [u8; 64],
    selected: bool,
    /// Command byte of the current frame, `None` while waiting for it.
    command: Option<u8>,
    transactions: Vec<Transaction>,
    /// Values returned by successive STATUS_REG reads before falling back to the register file.
    status_script: VecDeque<u8>,
    fail_at: Option<usize>,
    /// Pin failures stay in effect once set.
    fail_select: bool,
    fail_deselect: bool,
    bytes: usize,
    selects: usize,
    unselected_bytes: usize,
}

/// Register-level model of the device.
#[derive(Debug, Clone)]
pub struct MockDevice {
    state: Rc<RefCell<State>>,
}

impl MockDevice {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(State {
                regs: [0; 64],
                selected: false,
                command: None,
                transactions: Vec::new(),
                status_script: VecDeque::new(),
                fail_at: None,
                fail_select: false,
                fail_deselect: false,
                bytes: 0,
                selects: 0,
                unselected_bytes: 0,
            })),
        }
    }

    pub fn spi(&self) -> MockSpi {
        MockSpi {
            state: Rc::clone(&self.state),
        }
    }

    pub fn chip_select(&self) -> MockCs {
        MockCs {
            state: Rc::clone(&self.state),
        }
    }

    pub fn set_register(&self, reg: Register, value: u8) {
        self.state.borrow_mut().regs[reg.addr() as usize] = value;
    }

    pub fn register(&self, reg: Register) -> u8 {
        self.state.borrow().regs[reg.addr() as usize]
    }

    /// Load the six output registers from a little-endian sample.
    pub fn set_sample(&self, x: i16, y: i16, z: i16) {
        let mut state = self.state.borrow_mut();
        for (i, value) in [x, y, z].into_iter().enumerate() {
            let [lsb, msb] = value.to_le_bytes();
            state.regs[Register::OutXL.addr() as usize + 2 * i] = lsb;
            state.regs[Register::OutXL.addr() as usize + 2 * i + 1] = msb;
        }
    }

    /// Queue values for the next STATUS_REG reads.
    pub fn script_status(&self, values: &[u8]) {
        self.state.borrow_mut().status_script.extend(values.iter().copied());
    }

    /// Fail the `index`-th transferred byte (0-based, counted from now).
    pub fn fail_byte(&self, index: usize) {
        let mut state = self.state.borrow_mut();
        state.fail_at = Some(state.bytes + index);
    }

    /// Make every later chip-select assertion fail, leaving the line inactive.
    pub fn fail_select(&self) {
        self.state.borrow_mut().fail_select = true;
    }

    /// Make every later chip-select release fail, leaving the line stuck active.
    pub fn fail_deselect(&self) {
        self.state.borrow_mut().fail_deselect = true;
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.state.borrow().transactions.clone()
    }

    pub fn clear_transactions(&self) {
        self.state.borrow_mut().transactions.clear();
    }

    /// Number of logged reads of `reg`.
    pub fn reads_of(&self, reg: Register) -> usize {
        self.state
            .borrow()
            .transactions
            .iter()
            .filter(|t| **t == Transaction::Read(reg))
            .count()
    }

    pub fn byte_count(&self) -> usize {
        self.state.borrow().bytes
    }

    pub fn is_selected(&self) -> bool {
        self.state.borrow().selected
    }

    /// Number of chip-select assertions.
    pub fn select_count(&self) -> usize {
        self.state.borrow().selects
    }

    /// Bytes clocked while chip-select was inactive.
    pub fn unselected_bytes(&self) -> usize {
        self.state.borrow().unselected_bytes
    }
}

/// SPI handle onto a [`MockDevice`].
#[derive(Debug)]
pub struct MockSpi {
    state: Rc<RefCell<State>>,
}

impl SpiTransport for MockSpi {
    type Error = MockBusError;

    fn transfer_byte(&mut self, byte: u8) -> Result<u8, MockBusError> {
        let mut state = self.state.borrow_mut();
        let index = state.bytes;
        state.bytes += 1;

        if state.fail_at == Some(index) {
            state.fail_at = None;
            return Err(MockBusError);
        }

        if !state.selected {
            state.unselected_bytes += 1;
            return Ok(0xFF);
        }

        let Some(cmd) = state.command else {
            state.command = Some(byte);
            return Ok(0x00);
        };

        let addr = cmd & 0x3F;
        let reg = Register::from_addr(addr).expect("access to unmapped register");

        if cmd & 0x80 != 0 {
            let value = match reg {
                Register::StatusReg => state
                    .status_script
                    .pop_front()
                    .unwrap_or(state.regs[addr as usize]),
                _ => state.regs[addr as usize],
            };
            state.transactions.push(Transaction::Read(reg));
            Ok(value)
        } else {
            state.regs[addr as usize] = byte;
            state.transactions.push(Transaction::Write(reg, byte));
            Ok(0x00)
        }
    }
}

/// Chip-select handle onto a [`MockDevice`].
#[derive(Debug)]
pub struct MockCs {
    state: Rc<RefCell<State>>,
}

impl ErrorType for MockCs {
    type Error = MockPinError;
}

impl OutputPin for MockCs {
    fn set_low(&mut self) -> Result<(), MockPinError> {
        let mut state = self.state.borrow_mut();
        if state.fail_select {
            return Err(MockPinError);
        }
        state.selected = true;
        state.command = None;
        state.selects += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), MockPinError> {
        let mut state = self.state.borrow_mut();
        if state.fail_deselect {
            return Err(MockPinError);
        }
        state.selected = false;
        state.command = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_read_frame() {
        let device = MockDevice::new();
        device.set_register(Register::CtrlReg4, 0x30);
        let mut spi = device.spi();
        let mut cs = device.chip_select();

        cs.set_low().unwrap();
        assert_eq!(spi.transfer_byte(0xA3).unwrap(), 0x00);
        assert_eq!(spi.transfer_byte(0x00).unwrap(), 0x30);
        cs.set_high().unwrap();

        assert_eq!(
            device.transactions(),
            vec![Transaction::Read(Register::CtrlReg4)]
        );
    }

    #[test]
    fn test_mock_write_frame() {
        let device = MockDevice::new();
        let mut spi = device.spi();
        let mut cs = device.chip_select();

        cs.set_low().unwrap();
        spi.transfer_byte(0x20).unwrap();
        spi.transfer_byte(0x0F).unwrap();
        cs.set_high().unwrap();

        assert_eq!(device.register(Register::CtrlReg1), 0x0F);
        assert_eq!(
            device.transactions(),
            vec![Transaction::Write(Register::CtrlReg1, 0x0F)]
        );
    }

    #[test]
    fn test_mock_status_script() {
        let device = MockDevice::new();
        device.set_register(Register::StatusReg, 0x0F);
        device.script_status(&[0x00, 0xFF]);
        let mut spi = device.spi();
        let mut cs = device.chip_select();

        let mut read_status = || {
            cs.set_low().unwrap();
            spi.transfer_byte(Register::StatusReg.read_command()).unwrap();
            let value = spi.transfer_byte(0x00).unwrap();
            cs.set_high().unwrap();
            value
        };

        assert_eq!(read_status(), 0x00);
        assert_eq!(read_status(), 0xFF);
        assert_eq!(read_status(), 0x0F);
    }

    #[test]
    fn test_mock_fault_injection() {
        let device = MockDevice::new();
        let mut spi = device.spi();
        device.fail_byte(1);

        assert!(spi.transfer_byte(0x00).is_ok());
        assert_eq!(spi.transfer_byte(0x00), Err(MockBusError));
        assert!(spi.transfer_byte(0x00).is_ok());
        assert_eq!(device.unselected_bytes(), 2);
    }

    #[test]
    fn test_mock_pin_failures() {
        let device = MockDevice::new();
        let mut cs = device.chip_select();

        device.fail_select();
        assert_eq!(cs.set_low(), Err(MockPinError));
        assert!(!device.is_selected());
        assert_eq!(device.select_count(), 0);

        let device = MockDevice::new();
        let mut cs = device.chip_select();
        cs.set_low().unwrap();
        device.fail_deselect();
        assert_eq!(cs.set_high(), Err(MockPinError));
        assert!(device.is_selected());
    }

    #[test]
    fn test_mock_set_sample() {
        let device = MockDevice::new();
        device.set_sample(0x1234, 0, -50);
        assert_eq!(device.register(Register::OutXL), 0x34);
        assert_eq!(device.register(Register::OutXH), 0x12);
        assert_eq!(device.register(Register::OutZL), 0xCE);
        assert_eq!(device.register(Register::OutZH), 0xFF);
    }
}
