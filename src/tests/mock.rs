use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::i2c::{self, I2c, Operation};
use embedded_hal::spi::{self, SpiBus};

use crate::registers::{WHO_AM_I_G, WHO_AM_I_XM};
use crate::{Interface, Lsm9ds0, SensorDevice, LSM9DS0_G_ID, LSM9DS0_XM_ID};

/// Delay source that returns immediately, register writes against the mocks take no
/// real time.
pub struct NoopDelay;

impl DelayNs for NoopDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Error type shared by all the bus mocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockBusError;

impl i2c::Error for MockBusError {
    fn kind(&self) -> i2c::ErrorKind {
        i2c::ErrorKind::Other
    }
}

impl spi::Error for MockBusError {
    fn kind(&self) -> spi::ErrorKind {
        spi::ErrorKind::Other
    }
}

impl digital::Error for MockBusError {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

/// In-memory stand-in for the two sub-devices: one register file per device, a log of
/// every register write and burst read, and optional error injection.
pub struct MockInterface {
    pub gyro_regs: [u8; 0x80],
    pub xm_regs: [u8; 0x80],
    /// Every register write, in order.
    pub writes: Vec<(SensorDevice, u8, u8)>,
    /// Every burst read as (device, start address as passed in, byte count).
    pub bursts: Vec<(SensorDevice, u8, usize)>,
    /// While set, every transport call fails.
    pub fail: bool,
}

impl MockInterface {
    pub fn new() -> Self {
        MockInterface {
            gyro_regs: [0u8; 0x80],
            xm_regs: [0u8; 0x80],
            writes: Vec::new(),
            bursts: Vec::new(),
            fail: false,
        }
    }

    /// A mock whose identity registers are preloaded so that construction succeeds.
    pub fn with_ids() -> Self {
        let mut mock = Self::new();
        mock.gyro_regs[WHO_AM_I_G as usize] = LSM9DS0_G_ID;
        mock.xm_regs[WHO_AM_I_XM as usize] = LSM9DS0_XM_ID;
        mock
    }

    /// Stores consecutive register values starting at `base`, e.g. sensor output bytes.
    pub fn load(&mut self, device: SensorDevice, base: u8, bytes: &[u8]) {
        let regs = self.regs(device);
        for (i, byte) in bytes.iter().enumerate() {
            regs[base as usize + i] = *byte;
        }
    }

    fn regs(&mut self, device: SensorDevice) -> &mut [u8; 0x80] {
        match device {
            SensorDevice::Gyroscope => &mut self.gyro_regs,
            SensorDevice::AccelMagTemp => &mut self.xm_regs,
        }
    }
}

impl Interface for MockInterface {
    type Error = MockBusError;

    fn read_register(&mut self, device: SensorDevice, address: u8) -> Result<u8, MockBusError> {
        if self.fail {
            return Err(MockBusError);
        }
        Ok(self.regs(device)[(address & 0x7F) as usize])
    }

    fn read_bytes(
        &mut self,
        device: SensorDevice,
        address: u8,
        buffer: &mut [u8],
    ) -> Result<(), MockBusError> {
        if self.fail {
            return Err(MockBusError);
        }
        self.bursts.push((device, address, buffer.len()));
        let base = (address & 0x7F) as usize;
        let regs = self.regs(device);
        buffer.copy_from_slice(&regs[base..base + buffer.len()]);
        Ok(())
    }

    fn write_register(
        &mut self,
        device: SensorDevice,
        address: u8,
        value: u8,
    ) -> Result<(), MockBusError> {
        if self.fail {
            return Err(MockBusError);
        }
        self.regs(device)[(address & 0x7F) as usize] = value;
        self.writes.push((device, address, value));
        Ok(())
    }
}

/// Builds a sensor over a mock whose identity registers are preloaded, so that
/// construction succeeds.
pub fn ready_sensor() -> Lsm9ds0<MockInterface> {
    Lsm9ds0::new(MockInterface::with_ids(), &mut NoopDelay)
        .expect("construction over a well formed mock should succeed")
}

/// One logged i2c bus operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I2cOp {
    Write(Vec<u8>),
    Read(usize),
}

/// One logged i2c transaction: the device address plus its operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct I2cTransaction {
    pub addr: u8,
    pub ops: Vec<I2cOp>,
}

/// Mock i2c bus recording every transaction and serving reads from a pre-programmed
/// byte queue.
pub struct MockI2cBus {
    pub transactions: Vec<I2cTransaction>,
    pub read_data: Vec<u8>,
    pub fail: bool,
}

impl MockI2cBus {
    pub fn new() -> Self {
        MockI2cBus {
            transactions: Vec::new(),
            read_data: Vec::new(),
            fail: false,
        }
    }

    pub fn with_read_data(data: &[u8]) -> Self {
        let mut bus = Self::new();
        bus.read_data = data.to_vec();
        bus
    }
}

impl i2c::ErrorType for MockI2cBus {
    type Error = MockBusError;
}

impl I2c for MockI2cBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), MockBusError> {
        if self.fail {
            return Err(MockBusError);
        }
        let mut ops = Vec::new();
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => ops.push(I2cOp::Write(bytes.to_vec())),
                Operation::Read(buffer) => {
                    for byte in buffer.iter_mut() {
                        *byte = if self.read_data.is_empty() {
                            0
                        } else {
                            self.read_data.remove(0)
                        };
                    }
                    ops.push(I2cOp::Read(buffer.len()));
                }
            }
        }
        self.transactions.push(I2cTransaction { addr: address, ops });
        Ok(())
    }
}

/// One logged spi bus operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpiOp {
    Write(Vec<u8>),
    Read(usize),
    Flush,
}

/// Mock spi bus recording every operation and serving reads from a pre-programmed byte
/// queue. Write failures can be injected to simulate a bus falling over mid
/// transaction.
pub struct MockSpiBus {
    pub ops: Vec<SpiOp>,
    pub read_data: Vec<u8>,
    pub fail_writes: bool,
}

impl MockSpiBus {
    pub fn new() -> Self {
        MockSpiBus {
            ops: Vec::new(),
            read_data: Vec::new(),
            fail_writes: false,
        }
    }

    pub fn with_read_data(data: &[u8]) -> Self {
        let mut bus = Self::new();
        bus.read_data = data.to_vec();
        bus
    }
}

impl spi::ErrorType for MockSpiBus {
    type Error = MockBusError;
}

impl SpiBus<u8> for MockSpiBus {
    fn read(&mut self, words: &mut [u8]) -> Result<(), MockBusError> {
        for word in words.iter_mut() {
            *word = if self.read_data.is_empty() {
                0
            } else {
                self.read_data.remove(0)
            };
        }
        self.ops.push(SpiOp::Read(words.len()));
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), MockBusError> {
        if self.fail_writes {
            return Err(MockBusError);
        }
        self.ops.push(SpiOp::Write(words.to_vec()));
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), MockBusError> {
        self.write(write)?;
        self.read(read)
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), MockBusError> {
        let tx = words.to_vec();
        self.write(&tx)?;
        self.read(words)
    }

    fn flush(&mut self) -> Result<(), MockBusError> {
        self.ops.push(SpiOp::Flush);
        Ok(())
    }
}

/// Mock chip select pin sharing its transition history with the test, `true` meaning
/// asserted (driven low).
#[derive(Clone)]
pub struct MockCsPin {
    events: Rc<RefCell<Vec<bool>>>,
}

impl MockCsPin {
    pub fn new() -> Self {
        MockCsPin {
            events: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn history(&self) -> Vec<bool> {
        self.events.borrow().clone()
    }
}

impl digital::ErrorType for MockCsPin {
    type Error = MockBusError;
}

impl OutputPin for MockCsPin {
    fn set_low(&mut self) -> Result<(), MockBusError> {
        self.events.borrow_mut().push(true);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), MockBusError> {
        self.events.borrow_mut().push(false);
        Ok(())
    }
}
