
/// Bit mask of the accelerometer full scale range field in the `CTRL_REG2_XM` register.
pub const ACCEL_RANGE_MASK: u8 = 0b0011_1000;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccelRange
{
    G2 = 0b000,
    G4 = 0b001,
    G6 = 0b010,
    G8 = 0b011,
    G16 = 0b100,
}

impl AccelRange {

    /// Converts the given full scale range setting into the bits one would need to write into the
    /// `CTRL_REG2_XM` register to configure the sensor to use that scale range.
    ///
    pub fn as_register(&self) -> u8 {
        ((*self) as u8) << 3
    }

    /// Gets the full scale range currently configured in the `CTRL_REG2_XM` register based on its
    /// contents. The field is three bits wide but only five codes are defined, the remaining
    /// three decode to `None`.
    ///
    pub fn from_register(value: u8) -> Option<Self> {
        match (value & ACCEL_RANGE_MASK) >> 3 {
            0b000 => Some(Self::G2),
            0b001 => Some(Self::G4),
            0b010 => Some(Self::G6),
            0b011 => Some(Self::G8),
            0b100 => Some(Self::G16),
            _ => None,
        }
    }

    /// Gets the sensitivity scale factor for the given scale range.
    /// (Note scale factor is in mg/LSB).
    ///
    pub fn as_scale_factor(&self) -> f32 {
        match self {
            Self::G2 => 0.061,
            Self::G4 => 0.122,
            Self::G6 => 0.183,
            Self::G8 => 0.244,
            Self::G16 => 0.732,     // datasheet suggests 0.488?
        }
    }
}

impl Default for AccelRange {
    fn default() -> Self {
        AccelRange::G2
    }
}
