// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! L3GD20 register map.
//!
//! Addresses follow the register description of the L3GD20 datasheet. Only the output, control
//! and status registers are exposed.

/// RW bit of the SPI command byte (1 = read).
const READ_BIT: u8 = 1 << 7;

/// Register addresses are 6 bits wide; bit 6 (MS, auto-increment) is always left clear.
const ADDR_MASK: u8 = 0x3F;

/// One physical register on the device.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    CtrlReg1 = 0x20,
    CtrlReg2 = 0x21,
    CtrlReg3 = 0x22,
    CtrlReg4 = 0x23,
    CtrlReg5 = 0x24,
    StatusReg = 0x27,
    OutXL = 0x28,
    OutXH = 0x29,
    OutYL = 0x2A,
    OutYH = 0x2B,
    OutZL = 0x2C,
    OutZH = 0x2D,
}

impl Register {
    /// Control registers in CTRL_REG1..CTRL_REG5 order.
    pub const CONTROL: [Register; 5] = [
        Register::CtrlReg1,
        Register::CtrlReg2,
        Register::CtrlReg3,
        Register::CtrlReg4,
        Register::CtrlReg5,
    ];

    /// Output registers, LSB then MSB for X, Y and Z.
    pub const OUTPUT: [Register; 6] = [
        Register::OutXL,
        Register::OutXH,
        Register::OutYL,
        Register::OutYH,
        Register::OutZL,
        Register::OutZH,
    ];

    /// 8-bit register address.
    #[inline]
    pub const fn addr(self) -> u8 {
        self as u8
    }

    /// Look up a register by its address.
    pub fn from_addr(addr: u8) -> Option<Self> {
        Self::CONTROL
            .iter()
            .chain(Self::OUTPUT.iter())
            .chain(core::iter::once(&Register::StatusReg))
            .copied()
            .find(|reg| reg.addr() == addr)
    }

    /// Whether the device accepts writes to this register.
    ///
    /// Only the control registers are read/write; output and status registers are read-only.
    #[inline]
    pub const fn is_writable(self) -> bool {
        matches!(
            self,
            Register::CtrlReg1
                | Register::CtrlReg2
                | Register::CtrlReg3
                | Register::CtrlReg4
                | Register::CtrlReg5
        )
    }

    /// SPI command byte for a single-byte read.
    #[inline]
    pub const fn read_command(self) -> u8 {
        READ_BIT | (self.addr() & ADDR_MASK)
    }

    /// SPI command byte for a single-byte write.
    #[inline]
    pub const fn write_command(self) -> u8 {
        self.addr() & ADDR_MASK
    }

    /// Datasheet name of the register.
    pub const fn name(self) -> &'static str {
        match self {
            Register::CtrlReg1 => "CTRL_REG1",
            Register::CtrlReg2 => "CTRL_REG2",
            Register::CtrlReg3 => "CTRL_REG3",
            Register::CtrlReg4 => "CTRL_REG4",
            Register::CtrlReg5 => "CTRL_REG5",
            Register::StatusReg => "STATUS_REG",
            Register::OutXL => "OUT_X_L",
            Register::OutXH => "OUT_X_H",
            Register::OutYL => "OUT_Y_L",
            Register::OutYH => "OUT_Y_H",
            Register::OutZL => "OUT_Z_L",
            Register::OutZH => "OUT_Z_H",
        }
    }
}

impl From<Register> for u8 {
    fn from(reg: Register) -> u8 {
        reg.addr()
    }
}
