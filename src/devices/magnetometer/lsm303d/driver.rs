//! LSM303D Driver Implementation
//!
//! Blocking driver for the LSM303D magnetometer over any [`I2cInterface`].
//! The device does not auto-increment its register pointer in the mode used
//! here, so every register read is two bus transactions (pointer write, one
//! byte read) and multi-register reads are loops of single reads.
//!
//! The same driver speaks the MMC3416 register protocol when
//! `DriverConfig::family` selects it. Operations only that family supports
//! (SET/RESET pulses, soft reset, continuous frequency, output resolution)
//! fail with `Error::Unsupported` on an LSM303D without touching the bus.

use super::dump::RegisterDump;
use super::registers::{self, REGISTER_COUNT};
use crate::config::DriverConfig;
use crate::core::delay::delay;
use crate::devices::magnetometer::family::{ContinuousFrequency, DeviceFamily};
use crate::devices::magnetometer::heading::compute_heading;
use crate::devices::magnetometer::mmc3416::{self, ControlState, OutputResolution};
use crate::devices::magnetometer::register::{Register, WritableRegister};
use crate::devices::magnetometer::sample::{convert_raw, PhysicalSample, RawSample};
use crate::devices::traits::{CompassSensor, MagCalibration};
use crate::error::{Error, Operation, Result};
use crate::platform::traits::{I2cInterface, TimerInterface};
use crate::platform::PlatformError;
use std::fmt;

/// Driver life cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceState {
    /// Transport bound, device not probed yet
    Uninitialized,
    /// Identification register answered
    Identified,
    /// Control registers written, samples can be read
    Configured,
}

/// Identification register response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductId(u8);

impl ProductId {
    pub fn value(self) -> u8 {
        self.0
    }

    /// True for the LSM303D WHO_AM_I answer
    pub fn is_lsm303d(self) -> bool {
        self.0 == registers::WHO_AM_I_VALUE
    }

    /// True for the MMC3416 product id
    pub fn is_mmc3416(self) -> bool {
        self.0 == mmc3416::PRODUCT_ID_VALUE
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X} ", self.0)?;
        if self.is_lsm303d() {
            f.write_str("STMicroelectronics LSM303D")
        } else if self.is_mmc3416() {
            f.write_str("MEMSIC MMC3416xPJ")
        } else {
            f.write_str("Product ID unknown")
        }
    }
}

/// Result of an information query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorInfo {
    pub family: DeviceFamily,
    pub product_id: ProductId,
    /// Decoded control registers, for families that have them
    pub control: Option<ControlState>,
}

/// LSM303D Driver
///
/// The same driver also speaks the MMC3416 protocol when
/// `DriverConfig::family` is `DeviceFamily::Mmc3416`; identification, sample
/// registers and the supported control operations then follow that family.
///
/// Owns the bus transport and the timer for the life of the process.
///
/// # Type Parameters
///
/// * `I2C` - Bus transport implementing [`I2cInterface`]
/// * `T` - Sleep and clock source implementing [`TimerInterface`]
pub struct Lsm303d<I2C, T>
where
    I2C: I2cInterface,
    T: TimerInterface,
{
    /// I2C bus handle
    i2c: I2C,

    /// Delay source for settling times and polling
    timer: T,

    /// Driver configuration
    config: DriverConfig,

    /// Hard iron offset
    calibration: MagCalibration,

    /// Life cycle state
    state: DeviceState,
}

impl<I2C, T> Lsm303d<I2C, T>
where
    I2C: I2cInterface,
    T: TimerInterface,
{
    /// Bind to the configured address and probe the device
    ///
    /// Reads the identification register once. A missing acknowledge or a
    /// zero answer means no device is present at the address; nothing is
    /// written to the device in either case.
    ///
    /// # Errors
    ///
    /// * `Error::DeviceNotFound` - NACK or zero identification byte
    /// * `Error::Io` - any other bus failure during the probe
    pub fn open(i2c: I2C, timer: T, config: DriverConfig) -> Result<Self> {
        let mut driver = Self {
            i2c,
            timer,
            config,
            calibration: MagCalibration::default(),
            state: DeviceState::Uninitialized,
        };

        let id = match driver.identify() {
            Ok(id) => id,
            Err(e) if e.is_nack() => {
                crate::log_error!("no acknowledge from {}", driver.config.address);
                return Err(Error::DeviceNotFound {
                    address: driver.config.address,
                });
            }
            Err(e) => return Err(e),
        };

        if id.value() == 0 {
            crate::log_error!(
                "identification register of {} reads zero",
                driver.config.address
            );
            return Err(Error::DeviceNotFound {
                address: driver.config.address,
            });
        }

        let family = driver.config.family;
        if id.value() != family.expected_product_id() {
            crate::log_warn!(
                "{} product id mismatch: expected {:#04X}, got {:#04X}",
                family,
                family.expected_product_id(),
                id.value()
            );
        }

        driver.state = DeviceState::Identified;
        crate::log_info!(
            "{} detected at {} (id: {:#04X})",
            family,
            driver.config.address,
            id.value()
        );
        Ok(driver)
    }

    /// Read the identification register
    pub fn identify(&mut self) -> Result<ProductId> {
        let reg = self.config.family.id_register();
        self.read_address(reg).map(ProductId)
    }

    /// Configure the sensor for continuous magnetic measurement
    ///
    /// LSM303D: CTRL5, CTRL6 and CTRL7 are written in that order (high
    /// resolution at 6.25 Hz, ±4 gauss, continuous conversion).
    /// MMC3416: a SET pulse conditions the sensing element.
    ///
    /// The calibration offset is cleared afterwards. On a write failure the
    /// state stays `Identified`.
    pub fn initialize(&mut self) -> Result<()> {
        if self.state == DeviceState::Uninitialized {
            return Err(Error::NotInitialized);
        }

        match self.config.family {
            DeviceFamily::Lsm303d => {
                self.write_register(
                    registers::ReadWrite::Ctrl5,
                    registers::CTRL5_MAG_HIGH_RES_6_25HZ,
                )?;
                self.write_register(registers::ReadWrite::Ctrl6, registers::CTRL6_MFS_4_GAUSS)?;
                self.write_register(registers::ReadWrite::Ctrl7, registers::CTRL7_MAG_CONTINUOUS)?;
            }
            DeviceFamily::Mmc3416 => self.set()?,
        }

        self.calibration = MagCalibration::default();
        self.state = DeviceState::Configured;
        crate::log_info!("{} initialized", self.config.family);
        Ok(())
    }

    // =========================================================================
    // Register Access
    // =========================================================================

    /// Read one register (pointer write, then a one byte read)
    pub fn read_register<R: Register>(&mut self, reg: R) -> Result<u8> {
        self.read_address(reg.address())
    }

    /// Write one register as a single two byte transaction
    pub fn write_register<R: WritableRegister>(&mut self, reg: R, value: u8) -> Result<()> {
        self.write_address(reg.address(), value)
    }

    /// Read registers `0x00..=0x3F`, one address at a time
    ///
    /// Only families whose map the dump can label support this.
    pub fn dump_registers(&mut self) -> Result<RegisterDump> {
        self.require(self.config.family.capabilities().register_dump, "register dump")?;
        let mut bytes = [0u8; REGISTER_COUNT];
        for (addr, slot) in bytes.iter_mut().enumerate() {
            *slot = self.read_address(addr as u8)?;
        }
        Ok(RegisterDump::new(bytes))
    }

    fn read_address(&mut self, reg: u8) -> Result<u8> {
        let addr = self.config.address.value();
        self.i2c
            .write(addr, &[reg])
            .map_err(io_error(reg, Operation::Write))?;
        let mut buf = [0u8; 1];
        self.i2c
            .read(addr, &mut buf)
            .map_err(io_error(reg, Operation::Read))?;

        crate::log_debug!("read data byte [{:#04X}] from [{:#04X}]", buf[0], reg);
        Ok(buf[0])
    }

    fn write_address(&mut self, reg: u8, value: u8) -> Result<()> {
        let addr = self.config.address.value();
        crate::log_debug!("write data byte [{:#04X}] to [{:#04X}]", value, reg);
        self.i2c
            .write(addr, &[reg, value])
            .map_err(io_error(reg, Operation::Write))
    }

    // =========================================================================
    // Information and Control
    // =========================================================================

    /// Product id plus decoded control state where the family has one
    pub fn info(&mut self) -> Result<SensorInfo> {
        let product_id = self.identify()?;
        let control = match self.config.family {
            DeviceFamily::Lsm303d => None,
            DeviceFamily::Mmc3416 => {
                let ctl0 = self.read_register(mmc3416::ReadWrite::Ctl0)?;
                let ctl1 = self.read_register(mmc3416::ReadWrite::Ctl1)?;
                Some(ControlState::decode(ctl0, ctl1))
            }
        };
        Ok(SensorInfo {
            family: self.config.family,
            product_id,
            control,
        })
    }

    fn require(&self, supported: bool, operation: &'static str) -> Result<()> {
        if supported {
            Ok(())
        } else {
            crate::log_warn!("{} not supported by {}", operation, self.config.family);
            Err(Error::Unsupported {
                operation,
                family: self.config.family,
            })
        }
    }

    /// SET pulse: charge the capacitor, then magnetize in the set direction
    pub fn set(&mut self) -> Result<()> {
        self.require(self.config.family.capabilities().set_reset, "set")?;
        self.pulse(mmc3416::CTL0_SET)
    }

    /// RESET pulse: charge the capacitor, then magnetize in reverse
    pub fn reset(&mut self) -> Result<()> {
        self.require(self.config.family.capabilities().set_reset, "reset")?;
        self.pulse(mmc3416::CTL0_RESET)
    }

    fn pulse(&mut self, command: u8) -> Result<()> {
        self.write_register(mmc3416::ReadWrite::Ctl0, mmc3416::CTL0_REFILL_CAP)?;
        self.delay_ms(mmc3416::CAP_CHARGE_MS)?;
        self.write_register(mmc3416::ReadWrite::Ctl0, command)?;
        crate::log_debug!("pulse [{:#04X}] complete", command);
        Ok(())
    }

    /// Software reset; clears all configuration on the device
    pub fn soft_reset(&mut self) -> Result<()> {
        self.require(self.config.family.capabilities().soft_reset, "soft reset")?;
        self.write_register(mmc3416::ReadWrite::Ctl1, mmc3416::CTL1_SW_RESET)?;
        crate::log_debug!("sensor soft reset complete");
        Ok(())
    }

    /// Enable continuous measurement at `frequency`
    ///
    /// Skips the write when the device already runs at that frequency.
    /// The register is read back and compared after the write.
    pub fn set_continuous_frequency(&mut self, frequency: ContinuousFrequency) -> Result<()> {
        self.require(
            self.config.family.capabilities().frequency_control,
            "continuous frequency",
        )?;

        let current = self.read_register(mmc3416::ReadWrite::Ctl0)?;
        if ContinuousFrequency::from_ctl0(current) == frequency {
            crate::log_debug!("frequency already {}, no change", frequency);
            return Ok(());
        }

        let value = mmc3416::continuous_ctl0(current, frequency);
        self.write_register(mmc3416::ReadWrite::Ctl0, value)?;

        let actual = self.read_register(mmc3416::ReadWrite::Ctl0)?;
        if ContinuousFrequency::from_ctl0(actual) != frequency {
            crate::log_error!("frequency update failed, CTL0 reads {:#04X}", actual);
            return Err(Error::Verify {
                register: mmc3416::ReadWrite::Ctl0.address(),
                expected: value,
                actual,
            });
        }
        crate::log_info!("continuous read frequency set to {}", frequency);
        Ok(())
    }

    /// Select the output resolution (CTL1 bits 0-1), keeping the other bits
    pub fn set_output_resolution(&mut self, resolution: OutputResolution) -> Result<()> {
        self.require(
            self.config.family.capabilities().resolution_control,
            "output resolution",
        )?;

        let current = self.read_register(mmc3416::ReadWrite::Ctl1)?;
        let value = (current & !mmc3416::CTL1_BW_MASK) | resolution.bits();
        self.write_register(mmc3416::ReadWrite::Ctl1, value)?;
        crate::log_info!("output resolution set to {}", resolution);
        Ok(())
    }

    // =========================================================================
    // Sample Pipeline
    // =========================================================================

    /// Trigger (if needed), wait for data ready and read the six data bytes
    ///
    /// # Errors
    ///
    /// * `Error::NotInitialized` - `initialize()` has not completed
    /// * `Error::Timeout` - data ready not seen within `max_poll_attempts`
    pub fn read_raw_sample(&mut self) -> Result<RawSample> {
        if self.state != DeviceState::Configured {
            return Err(Error::NotInitialized);
        }

        if self.config.family.capabilities().measurement_trigger {
            self.trigger_measurement()?;
        }

        let layout = self.config.family.sample_layout();

        self.wait_ready(layout.status, layout.ready_mask)?;

        let mut bytes = [0u8; 6];
        for (offset, slot) in bytes.iter_mut().enumerate() {
            *slot = self.read_address(layout.data_start + offset as u8)?;
        }
        Ok(RawSample::from_bytes(bytes))
    }

    /// Start a single-shot MMC3416 measurement
    ///
    /// In continuous mode the device converts on its own; writing CTL0 there
    /// would clear the mode and frequency bits, so nothing is written.
    fn trigger_measurement(&mut self) -> Result<()> {
        let ctl0 = self.read_register(mmc3416::ReadWrite::Ctl0)?;
        if ctl0 & mmc3416::CTL0_CONT_MODE != 0 {
            crate::log_trace!("continuous mode active, no trigger");
            return Ok(());
        }
        self.write_register(mmc3416::ReadWrite::Ctl0, mmc3416::CTL0_TM_M)
    }

    fn wait_ready(&mut self, status: u8, mask: u8) -> Result<()> {
        let attempts = self.config.max_poll_attempts;
        for attempt in 1..=attempts {
            let value = self.read_address(status)?;
            if value & mask != 0 {
                crate::log_trace!("data ready after {} poll(s)", attempt);
                return Ok(());
            }
            self.delay_ms(i64::from(self.config.poll_interval_ms))?;
        }

        crate::log_error!(
            "no data ready in register {:#04X} after {} polls",
            status,
            attempts
        );
        Err(Error::Timeout {
            register: status,
            attempts,
        })
    }

    /// One calibrated sample in milli-Gauss
    pub fn read_sample(&mut self) -> Result<PhysicalSample> {
        let raw = self.read_raw_sample()?;
        let sample = convert_raw(raw, &self.calibration);
        crate::log_debug!(
            "raw ({}, {}, {}) -> ({:.2}, {:.2}, {:.2}) mG",
            raw.x,
            raw.y,
            raw.z,
            sample.x,
            sample.y,
            sample.z
        );
        Ok(sample)
    }

    /// Heading of `sample` with the configured declination
    pub fn heading(&self, sample: &PhysicalSample) -> f32 {
        compute_heading(sample, self.config.declination)
    }

    /// Block for at least `milliseconds`
    pub fn delay_ms(&mut self, milliseconds: i64) -> Result<()> {
        delay(&mut self.timer, milliseconds)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn state(&self) -> DeviceState {
        self.state
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Underlying transport
    pub fn bus(&self) -> &I2C {
        &self.i2c
    }

    pub fn bus_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }
}

/// Wrap a transport failure with the register and direction it hit
fn io_error(register: u8, operation: Operation) -> impl FnOnce(PlatformError) -> Error {
    move |source| {
        crate::log_error!("I2C {} failure for register {:#04X}", operation, register);
        Error::Io {
            register,
            operation,
            source,
        }
    }
}

impl<I2C, T> CompassSensor for Lsm303d<I2C, T>
where
    I2C: I2cInterface,
    T: TimerInterface,
{
    fn read_field(&mut self) -> Result<PhysicalSample> {
        self.read_sample()
    }

    fn read_heading(&mut self) -> Result<f32> {
        let sample = self.read_sample()?;
        Ok(self.heading(&sample))
    }

    fn set_calibration(&mut self, calibration: MagCalibration) {
        self.calibration = calibration;
    }

    fn calibration(&self) -> &MagCalibration {
        &self.calibration
    }
}
