//! QMC5883L 3-axis magnetometer (I2C)
//!
//! Cheap HMC5883L successor found on most GY-271 breakout boards.
//! Measures the local magnetic field in sensor counts; the heading is
//! the angle of the horizontal field component, so the board must sit
//! roughly level.
//!
//! # Calibration
//!
//! Every board carries a hard-iron offset from nearby ferrous parts.
//! The driver tracks per-axis field extremes and uses their midpoint as
//! the offset estimate; until the wearer has swept enough of a full
//! rotation, samples are flagged `Calibrating` and the heading is
//! computed from the uncorrected field.

use embedded_hal::i2c::I2c;
use libm::atan2f;

use azimuth_core::heading::{CalibrationStatus, HeadingSample, FULL_CIRCLE};
use azimuth_core::traits::{HeadingSensor, SensorError};

/// Default I2C address (the chip has no address pins)
pub const I2C_ADDR: u8 = 0x0D;

/// QMC5883L register addresses
pub mod reg {
    /// X axis LSB, start of the 6-byte data block
    pub const DATA_X_LSB: u8 = 0x00;
    /// Status flags (DRDY, OVL, DOR)
    pub const STATUS: u8 = 0x06;
    /// Mode, output data rate, range, oversampling
    pub const CONTROL1: u8 = 0x09;
    /// Soft reset and rollover control
    pub const CONTROL2: u8 = 0x0A;
    /// SET/RESET period, datasheet-recommended value 0x01
    pub const SET_RESET_PERIOD: u8 = 0x0B;
    /// Chip identification, reads 0xFF
    pub const CHIP_ID: u8 = 0x0D;
}

/// STATUS register bits
mod status {
    /// Data ready
    pub const DRDY: u8 = 1 << 0;
    /// Measurement overflow
    pub const OVL: u8 = 1 << 1;
}

/// CONTROL1: continuous mode, 50 Hz ODR, +/-2 gauss, 512x oversampling
const CONTROL1_CONTINUOUS_50HZ: u8 = 0b0000_0101;

/// CONTROL2: soft reset bit
const CONTROL2_SOFT_RST: u8 = 1 << 7;

/// Fixed CHIP_ID register value
const CHIP_ID_VALUE: u8 = 0xFF;

/// SET/RESET period recommended by the datasheet
const SET_RESET_RECOMMENDED: u8 = 0x01;

/// Earth-field plausibility window in sensor counts
///
/// At +/-2 gauss the sensitivity is 12000 counts per gauss, and Earth's
/// field is roughly 0.25-0.65 gauss. Magnitudes outside this window mean
/// magnetic interference or a saturated axis, not a usable heading.
const FIELD_MIN_COUNTS: i64 = 1_500;
const FIELD_MAX_COUNTS: i64 = 12_000;

/// Minimum per-axis swing before hard-iron offsets are trusted
///
/// A level rotation sweeps each horizontal axis across roughly twice
/// the horizontal field component, several thousand counts at +/-2
/// gauss.
const CALIBRATION_SPAN_COUNTS: i32 = 3_000;

/// Errors from probing or configuring the chip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Qmc5883lError<E> {
    /// Bus communication failure
    Bus(E),
    /// CHIP_ID readback did not match
    WrongChipId(u8),
}

/// One raw field measurement
#[derive(Debug, Clone, Copy)]
struct FieldReading {
    x: i16,
    y: i16,
    z: i16,
    overflow: bool,
}

/// Per-axis extreme tracker for hard-iron offset estimation
///
/// Offset is the midpoint of the extremes seen so far; span is how much
/// of the field circle the wearer has swept.
#[derive(Debug, Clone, Copy)]
struct AxisRange {
    min: i16,
    max: i16,
    seen: bool,
}

impl AxisRange {
    const fn new() -> Self {
        Self {
            min: 0,
            max: 0,
            seen: false,
        }
    }

    fn update(&mut self, value: i16) {
        if self.seen {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        } else {
            self.min = value;
            self.max = value;
            self.seen = true;
        }
    }

    fn offset(&self) -> i32 {
        (self.min as i32 + self.max as i32) / 2
    }

    fn span(&self) -> i32 {
        self.max as i32 - self.min as i32
    }
}

/// QMC5883L driver over a blocking I2C bus
pub struct Qmc5883l<I2C> {
    i2c: I2C,
    addr: u8,
    x_range: AxisRange,
    y_range: AxisRange,
}

impl<I2C: I2c> Qmc5883l<I2C> {
    /// Create a driver on the default address without touching the bus
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            addr: I2C_ADDR,
            x_range: AxisRange::new(),
            y_range: AxisRange::new(),
        }
    }

    /// Probe the chip and configure continuous measurement
    pub fn init(&mut self) -> Result<(), Qmc5883lError<I2C::Error>> {
        let mut id = [0u8; 1];
        self.i2c
            .write_read(self.addr, &[reg::CHIP_ID], &mut id)
            .map_err(Qmc5883lError::Bus)?;
        if id[0] != CHIP_ID_VALUE {
            return Err(Qmc5883lError::WrongChipId(id[0]));
        }

        self.i2c
            .write(self.addr, &[reg::CONTROL2, CONTROL2_SOFT_RST])
            .map_err(Qmc5883lError::Bus)?;
        self.i2c
            .write(self.addr, &[reg::SET_RESET_PERIOD, SET_RESET_RECOMMENDED])
            .map_err(Qmc5883lError::Bus)?;
        self.i2c
            .write(self.addr, &[reg::CONTROL1, CONTROL1_CONTINUOUS_50HZ])
            .map_err(Qmc5883lError::Bus)?;

        Ok(())
    }

    /// Discard accumulated extremes; samples return to `Calibrating`
    pub fn restart_calibration(&mut self) {
        self.x_range = AxisRange::new();
        self.y_range = AxisRange::new();
    }

    /// Read the status register and, when fresh data is ready, the
    /// 6-byte field block
    fn read_field(&mut self) -> Result<Option<FieldReading>, I2C::Error> {
        let mut st = [0u8; 1];
        self.i2c.write_read(self.addr, &[reg::STATUS], &mut st)?;
        if st[0] & status::DRDY == 0 {
            return Ok(None);
        }

        let mut data = [0u8; 6];
        self.i2c
            .write_read(self.addr, &[reg::DATA_X_LSB], &mut data)?;

        Ok(Some(FieldReading {
            x: i16::from_le_bytes([data[0], data[1]]),
            y: i16::from_le_bytes([data[2], data[3]]),
            z: i16::from_le_bytes([data[4], data[5]]),
            overflow: st[0] & status::OVL != 0,
        }))
    }
}

/// Check the total field magnitude against the plausibility window
fn field_plausible(x: i16, y: i16, z: i16) -> bool {
    let (x, y, z) = (x as i64, y as i64, z as i64);
    let mag_sq = x * x + y * y + z * z;
    mag_sq >= FIELD_MIN_COUNTS * FIELD_MIN_COUNTS && mag_sq <= FIELD_MAX_COUNTS * FIELD_MAX_COUNTS
}

/// Convert a horizontal field vector to a raw heading angle
///
/// Assumes the sensor sits level with its X axis pointing forward.
/// Negative angles are wrapped into `[0, FULL_CIRCLE)`.
fn field_to_raw_angle(x: i32, y: i32) -> u32 {
    let radians = atan2f(y as f32, x as f32);
    let mut turns = radians / core::f32::consts::TAU;
    if turns < 0.0 {
        turns += 1.0;
    }
    (turns * FULL_CIRCLE as f32) as u32 % FULL_CIRCLE
}

impl<I2C: I2c> HeadingSensor for Qmc5883l<I2C> {
    fn read_heading(&mut self) -> Result<HeadingSample, SensorError> {
        let reading = self
            .read_field()
            .map_err(|_| SensorError::Bus)?
            .ok_or(SensorError::NotReady)?;

        if reading.overflow || !field_plausible(reading.x, reading.y, reading.z) {
            // Interference and saturation do not poison the offset
            // estimate; they surface as a display state instead
            return Ok(HeadingSample::new(CalibrationStatus::DataInvalid, 0));
        }

        self.x_range.update(reading.x);
        self.y_range.update(reading.y);

        let calibrated = self.x_range.span() >= CALIBRATION_SPAN_COUNTS
            && self.y_range.span() >= CALIBRATION_SPAN_COUNTS;

        // The midpoint offset is meaningless before a full sweep, so the
        // uncorrected field backs the approximate calibrating headings
        let (x, y) = if calibrated {
            (
                reading.x as i32 - self.x_range.offset(),
                reading.y as i32 - self.y_range.offset(),
            )
        } else {
            (reading.x as i32, reading.y as i32)
        };

        let status = if calibrated {
            CalibrationStatus::Calibrated
        } else {
            CalibrationStatus::Calibrating
        };

        Ok(HeadingSample::new(status, field_to_raw_angle(x, y)))
    }
}
