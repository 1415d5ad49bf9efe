//! In-memory register file.
//!
//! A [`Transport`] that stores the 128 LMS6002D registers in RAM. Nothing
//! reacts to writes: status registers read back whatever was last written.
//! Useful for host-side tests and for dry runs of register sequences.

use core::convert::Infallible;

use crate::transport::Transport;

pub const REGISTER_COUNT: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFile {
    registers: [u8; REGISTER_COUNT],
    reads: usize,
    writes: usize,
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFile {
    pub const fn new() -> Self {
        RegisterFile {
            registers: [0; REGISTER_COUNT],
            reads: 0,
            writes: 0,
        }
    }

    /// Starts from a given register image.
    pub const fn with_registers(registers: [u8; REGISTER_COUNT]) -> Self {
        RegisterFile {
            registers,
            reads: 0,
            writes: 0,
        }
    }

    /// Register value without counting it as a bus read.
    pub fn peek(&self, address: u8) -> u8 {
        self.registers[index(address)]
    }

    /// Sets a register without counting it as a bus write.
    pub fn poke(&mut self, address: u8, value: u8) {
        self.registers[index(address)] = value;
    }

    pub fn registers(&self) -> &[u8; REGISTER_COUNT] {
        &self.registers
    }

    pub fn reads(&self) -> usize {
        self.reads
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

#[inline]
fn index(address: u8) -> usize {
    (address & 0x7F) as usize
}

impl Transport for RegisterFile {
    type Error = Infallible;

    fn read(&mut self, address: u8) -> Result<u8, Self::Error> {
        self.reads += 1;
        Ok(self.peek(address))
    }

    fn write(&mut self, address: u8, value: u8) -> Result<(), Self::Error> {
        self.writes += 1;
        self.poke(address, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_wraps_to_seven_bits() {
        let mut file = RegisterFile::new();

        file.write(0x85, 0x32).unwrap();

        assert_eq!(file.peek(0x05), 0x32);
        assert_eq!(file.read(0x05).unwrap(), 0x32);
        assert_eq!(file.reads(), 1);
        assert_eq!(file.writes(), 1);
    }
}
