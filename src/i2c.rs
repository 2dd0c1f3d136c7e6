use embedded_hal::i2c::I2c;

use crate::{Interface, SensorDevice, LSM9DS0_GYRO_I2C_ADDR, LSM9DS0_XM_I2C_ADDR};

/// Talks to the sensor over an i2c bus shared by both sub-devices, each one at its own
/// 7 bit address.
///
pub struct I2cInterface<I2C> {
    i2c: I2C,
    gyro_addr: u8,
    xm_addr: u8,
}

impl<I2C, E> I2cInterface<I2C>
where
    I2C: I2c<Error = E>,
{
    /// Create a new interface on the given bus, with both sub-devices at their default
    /// addresses.
    ///
    pub fn new(i2c: I2C) -> Self {
        Self::with_addresses(i2c, LSM9DS0_GYRO_I2C_ADDR, LSM9DS0_XM_I2C_ADDR)
    }

    /// Create a new interface for a board that rewires the address select pins and moves
    /// one or both sub-devices off their default addresses.
    ///
    pub fn with_addresses(i2c: I2C, gyro_addr: u8, xm_addr: u8) -> Self {
        I2cInterface {
            i2c,
            gyro_addr,
            xm_addr,
        }
    }

    /// Releases the i2c bus.
    pub fn destroy(self) -> I2C {
        self.i2c
    }

    fn address_of(&self, device: SensorDevice) -> u8 {
        match device {
            SensorDevice::Gyroscope => self.gyro_addr,
            SensorDevice::AccelMagTemp => self.xm_addr,
        }
    }
}

impl<I2C, E> Interface for I2cInterface<I2C>
where
    I2C: I2c<Error = E>,
{
    type Error = E;

    fn read_register(&mut self, device: SensorDevice, address: u8) -> Result<u8, E> {
        let mut buf = [0u8];
        self.i2c
            .write_read(self.address_of(device), &[address], &mut buf)?;
        Ok(buf[0])
    }

    fn read_bytes(&mut self, device: SensorDevice, address: u8, buffer: &mut [u8]) -> Result<(), E> {
        self.i2c
            .write_read(self.address_of(device), &[address], buffer)
    }

    fn write_register(&mut self, device: SensorDevice, address: u8, value: u8) -> Result<(), E> {
        self.i2c.write(self.address_of(device), &[address, value])
    }
}
