use core::fmt;

use embedded_hal::delay::DelayNs;

use crate::error::Error;
use crate::registers::{
    Field, CLK_EN, CLK_EN_RX_DSM, CLK_EN_TX_DSM, DUMP_SET, SOFT_CTRL, SOFT_RESET_ASSERT,
    SOFT_RESET_RELEASE, SOFT_RX_EN, SOFT_TX_EN, VERSION,
};
use crate::settings::{CalibrationConfig, CHIP_VERSION, RECOMMENDED_DEFAULTS};
use crate::transport::Transport;

/// One LMS6002D.
///
/// The driver owns the chip's transport, so every read-modify-write below runs
/// without any other access to the same chip in between. Share a chip between
/// contexts through [`SharedLms6002d`](crate::shared::SharedLms6002d).
pub struct Lms6002d<T, D> {
    pub transport: T,
    pub delay: D,
    config: CalibrationConfig,
}

impl<T, D> Lms6002d<T, D>
where
    T: Transport,
    D: DelayNs,
{
    pub fn new(transport: T, delay: D) -> Self {
        Self::with_config(transport, delay, CalibrationConfig::default())
    }

    pub fn with_config(transport: T, delay: D, config: CalibrationConfig) -> Self {
        Lms6002d {
            transport,
            delay,
            config,
        }
    }

    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: CalibrationConfig) {
        self.config = config;
    }

    pub fn release(self) -> (T, D) {
        (self.transport, self.delay)
    }

    pub fn soft_reset(&mut self) -> Result<(), Error<T::Error>> {
        self.write_reg(SOFT_CTRL, SOFT_RESET_ASSERT)?;
        self.write_reg(SOFT_CTRL, SOFT_RESET_RELEASE)
    }

    pub fn init(&mut self) -> Result<(), Error<T::Error>> {
        self.soft_reset()?;

        let version = self.read_version()?;
        if version >> 4 != CHIP_VERSION {
            error!("unexpected LMS6002D version 0x{:02x}", version);
            return Err(Error::UnknownChip(version));
        }

        for (address, value) in RECOMMENDED_DEFAULTS {
            self.write_reg(address, value)?;
        }

        debug!("LMS6002D 0x{:02x} initialized", version);
        Ok(())
    }

    pub fn read_version(&mut self) -> Result<u8, Error<T::Error>> {
        self.read_reg(VERSION)
    }

    pub fn tx_enable(&mut self) -> Result<(), Error<T::Error>> {
        self.set_bits(SOFT_CTRL, SOFT_TX_EN)?;
        self.set_bits(CLK_EN, CLK_EN_TX_DSM)
    }

    pub fn tx_disable(&mut self) -> Result<(), Error<T::Error>> {
        self.clear_bits(SOFT_CTRL, SOFT_TX_EN)?;
        self.clear_bits(CLK_EN, CLK_EN_TX_DSM)
    }

    pub fn rx_enable(&mut self) -> Result<(), Error<T::Error>> {
        self.set_bits(SOFT_CTRL, SOFT_RX_EN)?;
        self.set_bits(CLK_EN, CLK_EN_RX_DSM)
    }

    pub fn rx_disable(&mut self) -> Result<(), Error<T::Error>> {
        self.clear_bits(SOFT_CTRL, SOFT_RX_EN)?;
        self.clear_bits(CLK_EN, CLK_EN_RX_DSM)
    }

    /// Reads every documented register.
    pub fn read_all_registers(&mut self) -> Result<[(u8, u8); DUMP_SET.len()], Error<T::Error>> {
        let mut mapped = [(0u8, 0u8); DUMP_SET.len()];
        for (slot, &address) in mapped.iter_mut().zip(DUMP_SET.iter()) {
            *slot = (address, self.read_reg(address)?);
        }
        Ok(mapped)
    }

    /// Reads and logs every documented register.
    pub fn dump(&mut self) -> Result<RegisterDump, Error<T::Error>> {
        let dump = RegisterDump {
            entries: self.read_all_registers()?,
        };
        for (address, value) in dump.entries() {
            info!("LMS6002D 0x{:02x} = 0x{:02x}", address, value);
        }
        Ok(dump)
    }

    pub fn read_reg(&mut self, address: u8) -> Result<u8, Error<T::Error>> {
        Ok(self.transport.read(address)?)
    }

    pub fn write_reg(&mut self, address: u8, value: u8) -> Result<(), Error<T::Error>> {
        Ok(self.transport.write(address, value)?)
    }

    pub fn set_bits(&mut self, address: u8, mask: u8) -> Result<(), Error<T::Error>> {
        let value = self.read_reg(address)?;
        self.write_reg(address, value | mask)
    }

    pub fn clear_bits(&mut self, address: u8, mask: u8) -> Result<(), Error<T::Error>> {
        let value = self.read_reg(address)?;
        self.write_reg(address, value & !mask)
    }

    /// Replaces the bits under `mask` with `bits` and returns the whole
    /// register as it was before the write.
    ///
    /// `bits` must already be shifted into position; anything outside `mask`
    /// is ignored.
    pub fn write_bits(&mut self, address: u8, mask: u8, bits: u8) -> Result<u8, Error<T::Error>> {
        let old = self.read_reg(address)?;
        self.write_reg(address, (old & !mask) | (bits & mask))?;
        Ok(old)
    }

    pub fn read_shift(&mut self, address: u8, mask: u8, shift: u8) -> Result<u8, Error<T::Error>> {
        Ok((self.read_reg(address)? & mask) >> shift)
    }

    /// Writes `value` into `field` and returns the field's previous value.
    pub fn write_field(&mut self, field: Field, value: u8) -> Result<u8, Error<T::Error>> {
        let old = self.write_bits(field.address, field.mask, field.bits(value))?;
        Ok(field.extract(old))
    }

    pub fn read_field(&mut self, field: Field) -> Result<u8, Error<T::Error>> {
        self.read_shift(field.address, field.mask, field.shift)
    }
}

/// Snapshot of the documented registers, printable as a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterDump {
    entries: [(u8, u8); DUMP_SET.len()],
}

impl RegisterDump {
    pub fn entries(&self) -> &[(u8, u8)] {
        &self.entries
    }

    pub fn get(&self, address: u8) -> Option<u8> {
        self.entries
            .iter()
            .find(|(a, _)| *a == address)
            .map(|&(_, value)| value)
    }
}

impl fmt::Display for RegisterDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.entries.chunks(8) {
            for (i, (address, value)) in row.iter().enumerate() {
                if i > 0 {
                    f.write_str("  ")?;
                }
                write!(f, "{:02x}:{:02x}", address, value)?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
