

// Gyroscope sub-device registers.

pub const WHO_AM_I_G: u8 = 0x0F;
pub const CTRL_REG1_G: u8 = 0x20; //[7:6] ODR, [5:4] bandwidth, [3] power down, [2:0] axis enables
pub const CTRL_REG3_G: u8 = 0x22;
pub const CTRL_REG4_G: u8 = 0x23; //[5:4] full scale selection

pub const OUT_X_L_G: u8 = 0x28;
pub const OUT_X_H_G: u8 = 0x29;
pub const OUT_Y_L_G: u8 = 0x2A;
pub const OUT_Y_H_G: u8 = 0x2B;
pub const OUT_Z_L_G: u8 = 0x2C;
pub const OUT_Z_H_G: u8 = 0x2D;

// Accelerometer/magnetometer/temperature sub-device registers.

pub const TEMP_OUT_L_XM: u8 = 0x05;
pub const TEMP_OUT_H_XM: u8 = 0x06;

pub const STATUS_REG_M: u8 = 0x07;

pub const OUT_X_L_M: u8 = 0x08;
pub const OUT_X_H_M: u8 = 0x09;
pub const OUT_Y_L_M: u8 = 0x0A;
pub const OUT_Y_H_M: u8 = 0x0B;
pub const OUT_Z_L_M: u8 = 0x0C;
pub const OUT_Z_H_M: u8 = 0x0D;

pub const WHO_AM_I_XM: u8 = 0x0F;

pub const INT_CTRL_REG_M: u8 = 0x12;
pub const INT_SRC_REG_M: u8 = 0x13;

pub const CTRL_REG1_XM: u8 = 0x20; //[7:4] accel ODR, [3] block update, [2:0] axis enables
pub const CTRL_REG2_XM: u8 = 0x21; //[5:3] accel full scale selection
pub const CTRL_REG5_XM: u8 = 0x24; //[7] temp enable, [6:5] mag resolution, [4:2] mag ODR
pub const CTRL_REG6_XM: u8 = 0x25; //[6:5] mag gain selection
pub const CTRL_REG7_XM: u8 = 0x26; //[1:0] mag sensor mode

pub const OUT_X_L_A: u8 = 0x28;
pub const OUT_X_H_A: u8 = 0x29;
pub const OUT_Y_L_A: u8 = 0x2A;
pub const OUT_Y_H_A: u8 = 0x2B;
pub const OUT_Z_L_A: u8 = 0x2C;
pub const OUT_Z_H_A: u8 = 0x2D;

/// Set on the register address of a burst read so the sub-device auto-increments through
/// consecutive output registers within a single bus transaction.
pub const AUTO_INCREMENT: u8 = 0x80;
