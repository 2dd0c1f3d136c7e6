
/// The two independently addressed dies inside the sensor package.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorDevice {
    /// The gyroscope.
    Gyroscope,
    /// The accelerometer, magnetometer and temperature sensor, which share the second die.
    AccelMagTemp,
}

/// Register level transport to the two sub-devices. `I2cInterface` and `SpiInterface`
/// implement this; the sensor itself is written against the trait so either bus can be
/// plugged in at construction time.
///
pub trait Interface {
    type Error;

    /// Reads a single register of the given sub-device.
    fn read_register(&mut self, device: SensorDevice, address: u8) -> Result<u8, Self::Error>;

    /// Reads `buffer.len()` consecutive register bytes of the given sub-device, starting
    /// at `address`, in one bus transaction.
    fn read_bytes(
        &mut self,
        device: SensorDevice,
        address: u8,
        buffer: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Writes a single register of the given sub-device.
    fn write_register(&mut self, device: SensorDevice, address: u8, value: u8)
        -> Result<(), Self::Error>;
}
