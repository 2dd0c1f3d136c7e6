use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::{Interface, SensorDevice};

/// Fastest clock rate the sensor supports on its serial interface. The bus handed to
/// `SpiInterface::new` must already be configured for this rate (or slower) and for
/// clock mode 0 (CPOL = 0, CPHA = 0).
pub const SPI_MAX_FREQ_HZ: u32 = 200_000;

/// Address bit that marks a transfer as a register read. Writes keep it cleared, the
/// transfer direction is encoded in the address byte rather than a separate line.
const SPI_READ: u8 = 0x80;

/// Failures of the serial transport, keeping bus errors apart from chip select pin
/// errors since the two come from unrelated peripherals.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpiError<SpiE, PinE> {
    /// The bus transfer itself failed.
    Bus(SpiE),
    /// A chip select pin could not be driven.
    Pin(PinE),
}

/// Talks to the sensor over a shared spi bus, selecting between the two sub-devices with
/// one chip select pin each.
///
pub struct SpiInterface<SPI, CS> {
    spi: SPI,
    gyro_cs: CS,
    xm_cs: CS,
}

impl<SPI, CS, SpiE, PinE> SpiInterface<SPI, CS>
where
    SPI: SpiBus<u8, Error = SpiE>,
    CS: OutputPin<Error = PinE>,
{
    /// Create a new interface on the given bus with the two chip select pins. Both pins
    /// must start out deasserted (high).
    ///
    pub fn new(spi: SPI, gyro_cs: CS, xm_cs: CS) -> Self {
        SpiInterface {
            spi,
            gyro_cs,
            xm_cs,
        }
    }

    /// Releases the spi bus and the two chip select pins.
    pub fn destroy(self) -> (SPI, CS, CS) {
        (self.spi, self.gyro_cs, self.xm_cs)
    }

    /// Runs `xfer` with the sub-device's chip select asserted, deasserting it again on
    /// every path before surfacing the transfer result.
    fn selected<R>(
        &mut self,
        device: SensorDevice,
        xfer: impl FnOnce(&mut SPI) -> Result<R, SpiE>,
    ) -> Result<R, SpiError<SpiE, PinE>> {
        let cs = match device {
            SensorDevice::Gyroscope => &mut self.gyro_cs,
            SensorDevice::AccelMagTemp => &mut self.xm_cs,
        };
        cs.set_low().map_err(SpiError::Pin)?;
        let result = xfer(&mut self.spi);
        cs.set_high().map_err(SpiError::Pin)?;
        result.map_err(SpiError::Bus)
    }
}

impl<SPI, CS, SpiE, PinE> Interface for SpiInterface<SPI, CS>
where
    SPI: SpiBus<u8, Error = SpiE>,
    CS: OutputPin<Error = PinE>,
{
    type Error = SpiError<SpiE, PinE>;

    fn read_register(&mut self, device: SensorDevice, address: u8) -> Result<u8, Self::Error> {
        let mut buf = [0u8];
        self.selected(device, |spi| {
            spi.write(&[address | SPI_READ])?;
            spi.read(&mut buf)?;
            spi.flush()
        })?;
        Ok(buf[0])
    }

    fn read_bytes(
        &mut self,
        device: SensorDevice,
        address: u8,
        buffer: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.selected(device, |spi| {
            spi.write(&[address | SPI_READ])?;
            spi.read(buffer)?;
            spi.flush()
        })
    }

    fn write_register(&mut self, device: SensorDevice, address: u8, value: u8)
        -> Result<(), Self::Error> {
        self.selected(device, |spi| {
            spi.write(&[address & !SPI_READ, value])?;
            spi.flush()
        })
    }
}
