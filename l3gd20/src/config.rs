// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! CTRL_REG1..CTRL_REG5 configuration.
//!
//! [`ControlConfiguration`] is a plain value owned by the caller. The driver writes it to the
//! device and can read it back, but never keeps a copy: the device is the source of truth.

/// Output data rate (CTRL_REG1 DR bits).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataRate {
    #[default]
    Hz95 = 0b00,
    Hz190 = 0b01,
    Hz380 = 0b10,
    Hz760 = 0b11,
}

impl DataRate {
    /// Nominal output data rate in Hz.
    pub const fn hz(self) -> u16 {
        match self {
            DataRate::Hz95 => 95,
            DataRate::Hz190 => 190,
            DataRate::Hz380 => 380,
            DataRate::Hz760 => 760,
        }
    }

    const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => DataRate::Hz95,
            0b01 => DataRate::Hz190,
            0b10 => DataRate::Hz380,
            _ => DataRate::Hz760,
        }
    }
}

/// Low-pass cut-off selector (CTRL_REG1 BW bits).
///
/// The resulting cut-off frequency depends on the data rate, see the datasheet table for ODR/BW.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bandwidth {
    #[default]
    Low = 0b00,
    Medium = 0b01,
    High = 0b10,
    Maximum = 0b11,
}

impl Bandwidth {
    const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Bandwidth::Low,
            0b01 => Bandwidth::Medium,
            0b10 => Bandwidth::High,
            _ => Bandwidth::Maximum,
        }
    }
}

/// Operating mode, derived from CTRL_REG1 PD and the axis enables.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    /// PD = 0.
    PowerDown,
    /// PD = 1 with every axis disabled.
    Sleep,
    /// PD = 1 with at least one axis enabled.
    #[default]
    Normal,
}

/// Per-axis measurement enables (CTRL_REG1 Zen/Xen/Yen).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisEnable {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl AxisEnable {
    pub const ALL: AxisEnable = AxisEnable {
        x: true,
        y: true,
        z: true,
    };

    pub const NONE: AxisEnable = AxisEnable {
        x: false,
        y: false,
        z: false,
    };

    const fn bits(self) -> u8 {
        ((self.z as u8) << 2) | ((self.x as u8) << 1) | (self.y as u8)
    }

    const fn from_bits(bits: u8) -> Self {
        Self {
            x: (bits & (1 << 1)) != 0,
            y: (bits & 1) != 0,
            z: (bits & (1 << 2)) != 0,
        }
    }

    #[inline]
    pub const fn any(self) -> bool {
        self.x || self.y || self.z
    }
}

impl Default for AxisEnable {
    fn default() -> Self {
        Self::ALL
    }
}

/// High-pass filter mode (CTRL_REG2 HPM bits).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HighPassMode {
    /// Normal mode, reset by reading the REFERENCE register.
    #[default]
    NormalReset = 0b00,
    /// Reference signal for filtering.
    Reference = 0b01,
    Normal = 0b10,
    /// Autoreset on interrupt event.
    AutoReset = 0b11,
}

impl HighPassMode {
    const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => HighPassMode::NormalReset,
            0b01 => HighPassMode::Reference,
            0b10 => HighPassMode::Normal,
            _ => HighPassMode::AutoReset,
        }
    }
}

/// Full-scale range (CTRL_REG4 FS bits).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FullScale {
    #[default]
    Dps250 = 0b00,
    Dps500 = 0b01,
    Dps2000 = 0b10,
}

impl FullScale {
    /// Range limit in degrees per second.
    pub const fn dps(self) -> u16 {
        match self {
            FullScale::Dps250 => 250,
            FullScale::Dps500 => 500,
            FullScale::Dps2000 => 2000,
        }
    }

    const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => FullScale::Dps250,
            0b01 => FullScale::Dps500,
            // 0b11 also selects 2000 dps
            _ => FullScale::Dps2000,
        }
    }
}

/// CTRL_REG4 BLE bit.
pub(crate) const CTRL4_BLE: u8 = 1 << 6;

/// Output byte order (CTRL_REG4 BLE).
///
/// Sample assembly reads LSB from the lower address, which only holds for `Little`. The driver
/// refuses to write `Big` to the device, so `Big` only appears when decoding a register dump.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Endianness {
    #[default]
    Little,
    Big,
}

/// Self-test mode (CTRL_REG4 ST bits).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelfTest {
    #[default]
    Off = 0b00,
    /// Self-test 0 (+).
    Positive = 0b01,
    /// Self-test 1 (-).
    Negative = 0b11,
}

impl SelfTest {
    const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b01 => SelfTest::Positive,
            0b11 => SelfTest::Negative,
            _ => SelfTest::Off,
        }
    }
}

/// SPI interface mode (CTRL_REG4 SIM).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiWires {
    #[default]
    FourWire,
    ThreeWire,
}

/// Values of the five control registers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlConfiguration {
    // CTRL_REG1
    pub data_rate: DataRate,
    pub bandwidth: Bandwidth,
    pub power_mode: PowerMode,
    pub axes: AxisEnable,

    // CTRL_REG2
    pub high_pass_mode: HighPassMode,
    /// HPCF cut-off selector, lower 4 bits only.
    pub high_pass_cutoff: u8,

    /// CTRL_REG3, passed through unchanged (interrupt and DRDY pin routing).
    pub interrupt_routing: u8,

    // CTRL_REG4
    pub block_data_update: bool,
    pub endianness: Endianness,
    pub full_scale: FullScale,
    pub self_test: SelfTest,
    pub spi_wires: SpiWires,

    // CTRL_REG5
    pub reboot: bool,
    pub fifo_enable: bool,
    pub high_pass_enable: bool,
    /// INT1_Sel, lower 2 bits only.
    pub int1_select: u8,
    /// Out_Sel, lower 2 bits only.
    pub out_select: u8,
}

impl Default for ControlConfiguration {
    /// Normal mode, all axes enabled, 95 Hz, 250 dps, everything else at reset values.
    fn default() -> Self {
        Self {
            data_rate: DataRate::Hz95,
            bandwidth: Bandwidth::Low,
            power_mode: PowerMode::Normal,
            axes: AxisEnable::ALL,
            high_pass_mode: HighPassMode::NormalReset,
            high_pass_cutoff: 0,
            interrupt_routing: 0,
            block_data_update: false,
            endianness: Endianness::Little,
            full_scale: FullScale::Dps250,
            self_test: SelfTest::Off,
            spi_wires: SpiWires::FourWire,
            reboot: false,
            fifo_enable: false,
            high_pass_enable: false,
            int1_select: 0,
            out_select: 0,
        }
    }
}

impl ControlConfiguration {
    /// Device power-on values of CTRL_REG1..CTRL_REG5.
    pub fn reset() -> Self {
        Self::from_registers([0x07, 0x00, 0x00, 0x00, 0x00])
    }

    pub fn with_data_rate(mut self, data_rate: DataRate) -> Self {
        self.data_rate = data_rate;
        self
    }

    pub fn with_bandwidth(mut self, bandwidth: Bandwidth) -> Self {
        self.bandwidth = bandwidth;
        self
    }

    pub fn with_power_mode(mut self, power_mode: PowerMode) -> Self {
        self.power_mode = power_mode;
        self
    }

    pub fn with_axes(mut self, axes: AxisEnable) -> Self {
        self.axes = axes;
        self
    }

    pub fn with_high_pass(mut self, mode: HighPassMode, cutoff: u8) -> Self {
        self.high_pass_mode = mode;
        self.high_pass_cutoff = cutoff & 0x0F;
        self.high_pass_enable = true;
        self
    }

    pub fn with_block_data_update(mut self, enabled: bool) -> Self {
        self.block_data_update = enabled;
        self
    }

    pub fn with_full_scale(mut self, full_scale: FullScale) -> Self {
        self.full_scale = full_scale;
        self
    }

    pub fn with_self_test(mut self, self_test: SelfTest) -> Self {
        self.self_test = self_test;
        self
    }

    pub fn with_fifo(mut self, enabled: bool) -> Self {
        self.fifo_enable = enabled;
        self
    }

    /// CTRL_REG1 value.
    pub fn ctrl1(&self) -> u8 {
        let (pd, axes) = match self.power_mode {
            PowerMode::PowerDown => (0, self.axes.bits()),
            PowerMode::Sleep => (1, 0),
            PowerMode::Normal => (1, self.axes.bits()),
        };
        ((self.data_rate as u8) << 6) | ((self.bandwidth as u8) << 4) | (pd << 3) | axes
    }

    /// CTRL_REG2 value. Bits 7:6 must be written as zero.
    pub fn ctrl2(&self) -> u8 {
        ((self.high_pass_mode as u8) << 4) | (self.high_pass_cutoff & 0x0F)
    }

    /// CTRL_REG3 value.
    pub fn ctrl3(&self) -> u8 {
        self.interrupt_routing
    }

    /// CTRL_REG4 value. Bit 3 must be written as zero.
    pub fn ctrl4(&self) -> u8 {
        ((self.block_data_update as u8) << 7)
            | (((self.endianness == Endianness::Big) as u8) << 6)
            | ((self.full_scale as u8) << 4)
            | ((self.self_test as u8) << 1)
            | ((self.spi_wires == SpiWires::ThreeWire) as u8)
    }

    /// CTRL_REG5 value. Bit 5 must be written as zero.
    pub fn ctrl5(&self) -> u8 {
        ((self.reboot as u8) << 7)
            | ((self.fifo_enable as u8) << 6)
            | ((self.high_pass_enable as u8) << 4)
            | ((self.int1_select & 0b11) << 2)
            | (self.out_select & 0b11)
    }

    /// Register values in CTRL_REG1..CTRL_REG5 order.
    pub fn to_registers(&self) -> [u8; 5] {
        [
            self.ctrl1(),
            self.ctrl2(),
            self.ctrl3(),
            self.ctrl4(),
            self.ctrl5(),
        ]
    }

    /// Decode raw CTRL_REG1..CTRL_REG5 values.
    ///
    /// Reserved bits are ignored.
    pub fn from_registers(regs: [u8; 5]) -> Self {
        let [ctrl1, ctrl2, ctrl3, ctrl4, ctrl5] = regs;

        let axes = AxisEnable::from_bits(ctrl1 & 0b111);
        let power_mode = if ctrl1 & (1 << 3) == 0 {
            PowerMode::PowerDown
        } else if axes.any() {
            PowerMode::Normal
        } else {
            PowerMode::Sleep
        };

        Self {
            data_rate: DataRate::from_bits(ctrl1 >> 6),
            bandwidth: Bandwidth::from_bits(ctrl1 >> 4),
            power_mode,
            axes,

            high_pass_mode: HighPassMode::from_bits(ctrl2 >> 4),
            high_pass_cutoff: ctrl2 & 0x0F,

            interrupt_routing: ctrl3,

            block_data_update: ctrl4 & (1 << 7) != 0,
            endianness: if ctrl4 & CTRL4_BLE != 0 {
                Endianness::Big
            } else {
                Endianness::Little
            },
            full_scale: FullScale::from_bits(ctrl4 >> 4),
            self_test: SelfTest::from_bits(ctrl4 >> 1),
            spi_wires: if ctrl4 & 1 != 0 {
                SpiWires::ThreeWire
            } else {
                SpiWires::FourWire
            },

            reboot: ctrl5 & (1 << 7) != 0,
            fifo_enable: ctrl5 & (1 << 6) != 0,
            high_pass_enable: ctrl5 & (1 << 4) != 0,
            int1_select: (ctrl5 >> 2) & 0b11,
            out_select: ctrl5 & 0b11,
        }
    }
}
