use core::{error, fmt};

/// All the ways talking to the sensor can fail.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<CommE>
{
    /// The underlying bus transaction failed. Surfaced unmodified and never retried
    /// here, retry policy belongs to the caller.
    Transport(CommE),

    /// An identity register did not hold the expected value, meaning the expected part
    /// is not present or not wired correctly. Fatal, retrying will not help.
    DeviceNotFound,

    /// A register field held a code outside the enumerated set for that setting.
    InvalidArgument,
}

impl<CommE: fmt::Debug> error::Error for Error<CommE> {}

impl<CommE: fmt::Debug> fmt::Display for Error<CommE> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "Bus transport error: {:?}", err),
            Self::DeviceNotFound => write!(f, "Could not find LSM9DS0, check wiring"),
            Self::InvalidArgument => write!(f, "Value outside the supported set"),
        }
    }
}
