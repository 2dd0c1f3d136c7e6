use embedded_hal::delay::DelayNs;

use crate::registers::*;
use crate::utils::*;
use crate::{
    AccelRange, Error, GyroScale, Interface, MagGain, SensorDevice, ACCEL_RANGE_MASK, G_TO_MS2,
    GYRO_SCALE_MASK, LSM9DS0_G_ID, LSM9DS0_XM_ID, MAG_GAIN_MASK,
};

pub struct Lsm9ds0<I: Interface>
{
    /// Transport that we actually use to communicate with the two sensor sub-devices.
    interface: I,

    accel_range: AccelRange,
    mag_gain: MagGain,
    gyro_scale: GyroScale,
}

impl<I: Interface> Lsm9ds0<I>
{
    /// Create a new LSM9DS0 instance on the given transport. This resets both
    /// sub-devices, verifies their identity registers, enables continuous sampling on
    /// all four sensors and selects the smallest full scale range for each of them.
    ///
    /// The 10 ms pause after the reset writes is a hard requirement of the part, which
    /// is why a delay source has to be provided.
    ///
    pub fn new(interface: I, delay: &mut impl DelayNs) -> Result<Self, Error<I::Error>> {
        let mut sensor = Lsm9ds0 {
            interface,
            accel_range: AccelRange::default(),
            mag_gain: MagGain::default(),
            gyro_scale: GyroScale::default(),
        };
        sensor.init(delay)?;
        Ok(sensor)
    }

    /// Releases the transport.
    pub fn destroy(self) -> I {
        self.interface
    }

    /// Direct access to the underlying transport.
    pub fn interface(&mut self) -> &mut I {
        &mut self.interface
    }

    fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), Error<I::Error>> {
        // Soft reset & reboot accel/gyro.
        self.write_reg(SensorDevice::Gyroscope, CTRL_REG3_G, 0x05)?;
        // Soft reset & reboot magnetometer.
        self.write_reg(SensorDevice::AccelMagTemp, CTRL_REG2_XM, 0x0C)?;
        delay.delay_ms(10);

        // Check both identity registers before trusting anything else the bus returns.
        let xm_id = self.read_reg(SensorDevice::AccelMagTemp, WHO_AM_I_XM)?;
        if xm_id != LSM9DS0_XM_ID {
            log::error!(
                "Unexpected accel/mag identity {:#04x}, expected {:#04x}",
                xm_id, LSM9DS0_XM_ID
            );
            return Err(Error::DeviceNotFound);
        }
        let g_id = self.read_reg(SensorDevice::Gyroscope, WHO_AM_I_G)?;
        if g_id != LSM9DS0_G_ID {
            log::error!(
                "Unexpected gyro identity {:#04x}, expected {:#04x}",
                g_id, LSM9DS0_G_ID
            );
            return Err(Error::DeviceNotFound);
        }

        // Enable the accelerometer continuous.
        self.write_reg(SensorDevice::AccelMagTemp, CTRL_REG1_XM, 0x67)?;
        self.write_reg(SensorDevice::AccelMagTemp, CTRL_REG5_XM, 0b1111_0000)?;
        // Enable mag continuous.
        self.write_reg(SensorDevice::AccelMagTemp, CTRL_REG7_XM, 0x00)?;
        // Enable gyro continuous.
        self.write_reg(SensorDevice::Gyroscope, CTRL_REG1_G, 0x0F)?;
        // Enable the temperature sensor (output rate same as the mag sensor).
        let reg = self.read_reg(SensorDevice::AccelMagTemp, CTRL_REG5_XM)?;
        self.write_reg(SensorDevice::AccelMagTemp, CTRL_REG5_XM, reg | (1 << 7))?;

        // Set default ranges for the various sensors.
        self.set_accel_range(AccelRange::G2)?;
        self.set_mag_gain(MagGain::Gauss2)?;
        self.set_gyro_scale(GyroScale::D245)?;

        log::info!("LSM9DS0 initialized");
        Ok(())
    }

    /// Configure the accelerometer full scale range. The sensitivity used by
    /// `get_accel` is updated in the same step, a failed register write leaves both the
    /// register and the cached sensitivity untouched.
    ///
    pub fn set_accel_range(&mut self, range: AccelRange) -> Result<(), Error<I::Error>> {
        let reg = self.read_reg(SensorDevice::AccelMagTemp, CTRL_REG2_XM)?;
        let val = (reg & !ACCEL_RANGE_MASK) | range.as_register();
        self.write_reg(SensorDevice::AccelMagTemp, CTRL_REG2_XM, val)?;
        self.accel_range = range;
        Ok(())
    }

    /// Gets the accelerometer full scale range currently configured in the sensor.
    ///
    pub fn get_accel_range(&mut self) -> Result<AccelRange, Error<I::Error>> {
        let reg = self.read_reg(SensorDevice::AccelMagTemp, CTRL_REG2_XM)?;
        let range = AccelRange::from_register(reg).ok_or(Error::InvalidArgument)?;
        self.accel_range = range;
        Ok(range)
    }

    /// Configure the magnetometer gain. The sensitivity used by `get_mag` is updated in
    /// the same step, a failed register write leaves both the register and the cached
    /// sensitivity untouched.
    ///
    pub fn set_mag_gain(&mut self, gain: MagGain) -> Result<(), Error<I::Error>> {
        let reg = self.read_reg(SensorDevice::AccelMagTemp, CTRL_REG6_XM)?;
        let val = (reg & !MAG_GAIN_MASK) | gain.as_register();
        self.write_reg(SensorDevice::AccelMagTemp, CTRL_REG6_XM, val)?;
        self.mag_gain = gain;
        Ok(())
    }

    /// Gets the magnetometer gain currently configured in the sensor.
    ///
    pub fn get_mag_gain(&mut self) -> Result<MagGain, Error<I::Error>> {
        let reg = self.read_reg(SensorDevice::AccelMagTemp, CTRL_REG6_XM)?;
        let gain = MagGain::from_register(reg).ok_or(Error::InvalidArgument)?;
        self.mag_gain = gain;
        Ok(gain)
    }

    /// Configure the gyroscope full scale. The sensitivity used by `get_gyro_dps` is
    /// updated in the same step, a failed register write leaves both the register and
    /// the cached sensitivity untouched.
    ///
    pub fn set_gyro_scale(&mut self, scale: GyroScale) -> Result<(), Error<I::Error>> {
        let reg = self.read_reg(SensorDevice::Gyroscope, CTRL_REG4_G)?;
        let val = (reg & !GYRO_SCALE_MASK) | scale.as_register();
        self.write_reg(SensorDevice::Gyroscope, CTRL_REG4_G, val)?;
        self.gyro_scale = scale;
        Ok(())
    }

    /// Gets the gyroscope full scale currently configured in the sensor.
    ///
    pub fn get_gyro_scale(&mut self) -> Result<GyroScale, Error<I::Error>> {
        let reg = self.read_reg(SensorDevice::Gyroscope, CTRL_REG4_G)?;
        let scale = GyroScale::from_register(reg).ok_or(Error::InvalidArgument)?;
        self.gyro_scale = scale;
        Ok(scale)
    }

    /// Read the raw accelerometer sensor values and return them as a 3-tuple of X, Y, Z
    /// axis values that are 16 bit unsigned integers. If you want the acceleration in
    /// nice units you probably want `get_accel` instead.
    ///
    pub fn read_accel_raw(&mut self) -> Result<(u16, u16, u16), Error<I::Error>> {
        self.read_axes(SensorDevice::AccelMagTemp, OUT_X_L_A)
    }

    /// Read the raw magnetometer sensor values and return them as a 3-tuple of X, Y, Z
    /// axis values that are 16 bit unsigned integers. If you want the field strength in
    /// nice units you probably want `get_mag` instead.
    ///
    pub fn read_mag_raw(&mut self) -> Result<(u16, u16, u16), Error<I::Error>> {
        self.read_axes(SensorDevice::AccelMagTemp, OUT_X_L_M)
    }

    /// Read the raw gyroscope sensor values and return them as a 3-tuple of X, Y, Z
    /// axis values that are 16 bit unsigned integers. If you want the rotation rate in
    /// nice units you probably want `get_gyro_dps` instead.
    ///
    pub fn read_gyro_raw(&mut self) -> Result<(u16, u16, u16), Error<I::Error>> {
        self.read_axes(SensorDevice::Gyroscope, OUT_X_L_G)
    }

    /// Read the raw temperature sensor value and return it as a 16 bit unsigned
    /// integer. If you want the temperature in nice units you probably want `get_temp`
    /// instead.
    ///
    pub fn read_temp_raw(&mut self) -> Result<u16, Error<I::Error>> {
        let mut data = [0u8; 2];
        self.read_burst(SensorDevice::AccelMagTemp, TEMP_OUT_L_XM, &mut data)?;
        Ok(reg_to_u16(data[0], data[1]))
    }

    /// Get the current accelerometer sensor values (in m/s^2).
    ///
    pub fn get_accel(&mut self) -> Result<(f32, f32, f32), Error<I::Error>> {
        let (x, y, z) = self.read_accel_raw()?;
        let scale = self.accel_range.as_scale_factor();
        let convert = |axis: u16| axis as f32 * scale / 1000.0 * G_TO_MS2;
        Ok((convert(x), convert(y), convert(z)))
    }

    /// Get the current magnetometer sensor values (in gauss).
    ///
    pub fn get_mag(&mut self) -> Result<(f32, f32, f32), Error<I::Error>> {
        let (x, y, z) = self.read_mag_raw()?;
        let scale = self.mag_gain.as_scale_factor();
        let convert = |axis: u16| axis as f32 * scale / 1000.0;
        Ok((convert(x), convert(y), convert(z)))
    }

    /// Get the current gyroscope sensor values, in degrees per second as the method
    /// name says.
    ///
    pub fn get_gyro_dps(&mut self) -> Result<(f32, f32, f32), Error<I::Error>> {
        let (x, y, z) = self.read_gyro_raw()?;
        let scale = self.gyro_scale.as_scale_factor();
        let convert = |axis: u16| axis as f32 * scale;
        Ok((convert(x), convert(y), convert(z)))
    }

    /// Get the temperature of the on chip temperature sensor, result is returned in
    /// degrees celsius. The 21.0 starting point is a guess, the offset of this sensor
    /// is not documented.
    ///
    pub fn get_temp(&mut self) -> Result<f32, Error<I::Error>> {
        let raw = self.read_temp_raw()?;
        Ok(21.0 + raw as f32 / 8.0)
    }

    fn read_axes(
        &mut self,
        device: SensorDevice,
        register: u8,
    ) -> Result<(u16, u16, u16), Error<I::Error>> {
        let mut data = [0u8; 6];
        self.read_burst(device, register, &mut data)?;
        Ok((
            reg_to_u16(data[0], data[1]),
            reg_to_u16(data[2], data[3]),
            reg_to_u16(data[4], data[5]),
        ))
    }

    fn read_reg(&mut self, device: SensorDevice, register: u8) -> Result<u8, Error<I::Error>> {
        self.interface
            .read_register(device, register)
            .map_err(Error::Transport)
    }

    fn write_reg(
        &mut self,
        device: SensorDevice,
        register: u8,
        value: u8,
    ) -> Result<(), Error<I::Error>> {
        self.interface
            .write_register(device, register, value)
            .map_err(Error::Transport)
    }

    /// Burst read of consecutive output registers, with the auto-increment bit set on
    /// the start address so all bytes come from a single bus transaction.
    fn read_burst(
        &mut self,
        device: SensorDevice,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<(), Error<I::Error>> {
        self.interface
            .read_bytes(device, register | AUTO_INCREMENT, buffer)
            .map_err(Error::Transport)
    }
}
