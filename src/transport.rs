use embedded_hal::spi::{Operation, SpiDevice};

const READ_MASK: u8 = 0x7F;
const WRITE_MASK: u8 = 0x80;

/// Byte-wide register access to one chip.
///
/// These two calls are the only place the driver touches the bus.
pub trait Transport {
    type Error;

    fn read(&mut self, address: u8) -> Result<u8, Self::Error>;

    fn write(&mut self, address: u8, value: u8) -> Result<(), Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn read(&mut self, address: u8) -> Result<u8, Self::Error> {
        T::read(self, address)
    }

    fn write(&mut self, address: u8, value: u8) -> Result<(), Self::Error> {
        T::write(self, address, value)
    }
}

/// SPI control interface of the LMS6002D.
///
/// The first byte carries the direction in bit 7 and the register address in
/// bits 6:0; the second byte is the data. Chip select, and arbitration when
/// several chips share a bus, belong to the `SpiDevice` implementation.
pub struct SpiTransport<SPI> {
    spi: SPI,
}

impl<SPI> SpiTransport<SPI> {
    pub fn new(spi: SPI) -> Self {
        SpiTransport { spi }
    }

    pub fn release(self) -> SPI {
        self.spi
    }

    pub fn spi(&mut self) -> &mut SPI {
        &mut self.spi
    }
}

#[inline]
fn read_command(address: u8) -> u8 {
    address & READ_MASK
}

#[inline]
fn write_command(address: u8) -> u8 {
    address | WRITE_MASK
}

impl<SPI: SpiDevice> Transport for SpiTransport<SPI> {
    type Error = SPI::Error;

    fn read(&mut self, address: u8) -> Result<u8, Self::Error> {
        let mut buffer = [0u8; 1];
        self.spi.transaction(&mut [
            Operation::Write(&[read_command(address)]),
            Operation::TransferInPlace(&mut buffer),
        ])?;
        Ok(buffer[0])
    }

    fn write(&mut self, address: u8, value: u8) -> Result<(), Self::Error> {
        self.spi.transaction(&mut [
            Operation::Write(&[write_command(address)]),
            Operation::Write(&[value]),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use embedded_hal_mock::eh1::spi::{Mock as SpiDevice, Transaction as SpiTransaction};

    #[test]
    fn test_write_sets_direction_bit() {
        let spi_expectations = [
            SpiTransaction::transaction_start(),
            SpiTransaction::write(0xC1),
            SpiTransaction::write(0x15),
            SpiTransaction::transaction_end(),
        ];
        let mut transport = SpiTransport::new(SpiDevice::new(&spi_expectations));

        transport.write(0x41, 0x15).unwrap();

        transport.spi().done();
    }

    #[test]
    fn test_read_clears_direction_bit() {
        let spi_expectations = [
            SpiTransaction::transaction_start(),
            SpiTransaction::write(0x04),
            SpiTransaction::transfer_in_place(vec![0x00], vec![0x22]),
            SpiTransaction::transaction_end(),
        ];
        let mut transport = SpiTransport::new(SpiDevice::new(&spi_expectations));

        // bit 7 of the address is not part of the register space
        assert_eq!(transport.read(0x84).unwrap(), 0x22);

        transport.spi().done();
    }
}
