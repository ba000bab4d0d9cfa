use crate::bus::{Bus, I2c};
use crate::config::Configuration;
use crate::error::MprlsError;
use crate::status::Status;
use crate::transfer::TransferFunction;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::i2c::SevenBitAddress;
use embedded_hal_async::delay::DelayNs;

/// Type alias for an MPRLS sensor communicating over I2C
type MprlsI2c<T, E> = Mprls<I2c<T>, E>;

/// Type alias used to simplify return types throughout the driver
pub type MprlsResult<T, BusError> = Result<T, MprlsError<BusError>>;

/// The only I2C address the MPR series ships with.
pub const DEFAULT_I2C_ADDRESS: SevenBitAddress = 0x18;

/// Raw value historically returned by the Adafruit driver on timeout or
/// sensor fault. See [`RawReading::counts`].
pub const RAW_READ_SENTINEL: u32 = 0xFFFF_FFFF;

/// Command frame that starts a single conversion.
const CMD_START_CONVERSION: [u8; 3] = [0xAA, 0x00, 0x00];

/// How long to wait for a conversion before giving up, in milliseconds.
const READ_TIMEOUT_MS: u32 = 20;

/// Hold time of the reset pulse, per the power-up timing of the part.
const RESET_PULSE_MS: u32 = 10;

/// Settle time after reset/pin setup before the first transaction.
const STARTUP_SETTLE_MS: u32 = 10;

const PROBE_ATTEMPTS: u32 = 5;

/// Main MPRLS driver struct
///
/// Generic over the transport (`B`) and the optional end-of-conversion pin
/// (`E`). Constructors without an EOC pin use [`NoPin`] for `E` and fall
/// back to polling the status byte while a conversion runs.
pub struct Mprls<B, E> {
    bus: B,
    transfer: TransferFunction,
    ready: ReadyStrategy<E>,
    last_status: Option<Status>,
}

/// How conversion completion is detected. Fixed at construction time.
pub(crate) enum ReadyStrategy<E> {
    /// Sample the end-of-conversion line; high means the data frame is valid.
    EocPin(E),
    /// Poll the status byte until the busy bit clears.
    StatusPoll,
}

/// Stand-in pin type for sensors whose EOC or reset line is not wired.
///
/// Reads permanently low and swallows writes.
pub struct NoPin;

impl embedded_hal::digital::ErrorType for NoPin {
    type Error = core::convert::Infallible;
}

impl InputPin for NoPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Outcome of a raw conversion, before the transfer function is applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RawReading {
    /// A valid 24-bit ADC count.
    Counts(u32),
    /// The sensor did not signal conversion-complete within the timeout.
    Timeout,
    /// The status byte of the data frame reported math saturation or an
    /// integrity failure; the data bytes are untrustworthy.
    Fault(Status),
}

impl RawReading {
    /// Collapses this reading to the legacy sentinel contract: the counts on
    /// success, [`RAW_READ_SENTINEL`] on timeout or fault.
    pub fn counts(&self) -> u32 {
        match self {
            RawReading::Counts(counts) => *counts,
            _ => RAW_READ_SENTINEL,
        }
    }
}

/// Outcome of a pressure read, with failure causes kept apart.
///
/// [`Mprls::read_pressure`] collapses all non-`Pressure` variants to NaN;
/// use [`Mprls::read_pressure_checked`] when the cause matters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Reading {
    /// Pressure in the configured output unit (hPa by default).
    Pressure(f32),
    /// The conversion did not complete within the timeout.
    Timeout,
    /// The sensor reported a fault in the data frame's status byte.
    Fault(Status),
    /// The configured transfer curve has equal endpoints, so no pressure can
    /// be derived.
    DegenerateCurve,
}

impl<T> MprlsI2c<T, NoPin>
where
    T: embedded_hal_async::i2c::I2c,
    I2c<T>: Bus,
{
    /// Constructs a new MPRLS driver instance that communicates over I2C,
    /// with neither the reset nor the end-of-conversion line wired.
    ///
    /// Conversion completion is detected by polling the status byte.
    ///
    /// This function will:
    /// - Wait out the sensor's start-up settle time
    /// - Probe the sensor and verify it reports powered, idle and fault-free
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use embedded_hal_async::delay::DelayNs;
    /// # use embedded_hal_async::i2c::I2c;
    /// # use mprls_rs::MprlsResult;
    ///  use mprls_rs::{Configuration, Mprls, DEFAULT_I2C_ADDRESS};
    /// # async fn demo<I: I2c, D: DelayNs>(i2c: I, mut delay: D) -> MprlsResult<(), I::Error> {
    ///
    ///  let sensor = Mprls::new_i2c(
    ///     i2c,
    ///     DEFAULT_I2C_ADDRESS,
    ///     Configuration::default(),
    ///     &mut delay
    ///  ).await?;
    /// # Ok(())
    /// # }
    pub async fn new_i2c<D: DelayNs>(
        i2c: T,
        address: SevenBitAddress,
        config: Configuration,
        delay: &mut D,
    ) -> MprlsResult<Self, <I2c<T> as Bus>::Error> {
        Self::new(
            I2c::new(i2c, address),
            config,
            ReadyStrategy::StatusPoll,
            None::<&mut NoPin>,
            delay,
        )
        .await
    }

    /// Constructs a new MPRLS driver instance that communicates over I2C and
    /// hardware-resets the sensor through `reset` before probing it.
    ///
    /// The pin is only driven during construction and is handed back to the
    /// caller; conversion completion is detected by polling the status byte.
    pub async fn new_i2c_with_reset<R: OutputPin, D: DelayNs>(
        i2c: T,
        address: SevenBitAddress,
        config: Configuration,
        reset: &mut R,
        delay: &mut D,
    ) -> MprlsResult<Self, <I2c<T> as Bus>::Error> {
        Self::new(
            I2c::new(i2c, address),
            config,
            ReadyStrategy::StatusPoll,
            Some(reset),
            delay,
        )
        .await
    }
}

impl<T, E> MprlsI2c<T, E>
where
    T: embedded_hal_async::i2c::I2c,
    I2c<T>: Bus,
    E: InputPin,
{
    /// Constructs a new MPRLS driver instance that communicates over I2C and
    /// owns the sensor's end-of-conversion pin.
    ///
    /// While a conversion runs the EOC line is sampled instead of the status
    /// byte; the line going high marks the data frame as valid.
    pub async fn new_i2c_with_eoc<D: DelayNs>(
        i2c: T,
        address: SevenBitAddress,
        config: Configuration,
        eoc: E,
        delay: &mut D,
    ) -> MprlsResult<Self, <I2c<T> as Bus>::Error> {
        Self::new(
            I2c::new(i2c, address),
            config,
            ReadyStrategy::EocPin(eoc),
            None::<&mut NoPin>,
            delay,
        )
        .await
    }

    /// Constructs a new MPRLS driver instance with both optional lines wired:
    /// `reset` is pulsed before the probe, `eoc` is used for
    /// conversion-complete detection afterwards.
    pub async fn new_i2c_with_eoc_and_reset<R: OutputPin, D: DelayNs>(
        i2c: T,
        address: SevenBitAddress,
        config: Configuration,
        eoc: E,
        reset: &mut R,
        delay: &mut D,
    ) -> MprlsResult<Self, <I2c<T> as Bus>::Error> {
        Self::new(
            I2c::new(i2c, address),
            config,
            ReadyStrategy::EocPin(eoc),
            Some(reset),
            delay,
        )
        .await
    }
}

impl<B, E> Mprls<B, E>
where
    B: Bus,
    E: InputPin,
{
    /// Creates a new instance of the driver struct with the given
    /// configuration and readiness strategy.
    pub(crate) async fn new<R: OutputPin, D: DelayNs>(
        bus: B,
        config: Configuration,
        ready: ReadyStrategy<E>,
        reset: Option<&mut R>,
        delay: &mut D,
    ) -> MprlsResult<Self, B::Error> {
        let mut device = Mprls {
            bus,
            transfer: TransferFunction::from_config(&config),
            ready,
            last_status: None,
        };

        if let Some(pin) = reset {
            Self::pulse_reset(pin, delay).await?;
        }

        // Datasheet power-up timing: give the part time to settle before the
        // first transaction.
        delay.delay_ms(STARTUP_SETTLE_MS).await;

        device.probe_ready(delay, PROBE_ATTEMPTS).await?;

        Ok(device)
    }

    /// Drives the reset line high, then low for the documented hold time,
    /// then releases it high again.
    async fn pulse_reset<R: OutputPin, D: DelayNs>(
        pin: &mut R,
        delay: &mut D,
    ) -> MprlsResult<(), B::Error> {
        pin.set_high().map_err(|_| MprlsError::Pin)?;
        pin.set_low().map_err(|_| MprlsError::Pin)?;
        delay.delay_ms(RESET_PULSE_MS).await;
        pin.set_high().map_err(|_| MprlsError::Pin)?;

        Ok(())
    }

    /// Probes if the device is ready by reading the status byte up to
    /// `attempts` times with a 1 ms delay.
    ///
    /// Ready means the masked status is exactly the powered bit. Returns
    /// [`MprlsError::NotReady`] if the sensor answered but never reached
    /// that state, [`MprlsError::NotConnected`] if it never answered at all.
    async fn probe_ready<D: DelayNs>(
        &mut self,
        delay: &mut D,
        attempts: u32,
    ) -> MprlsResult<(), B::Error> {
        let mut answered = None;
        for _ in 0..attempts {
            if let Ok(status) = self.fetch_status().await {
                if status.is_ready() {
                    return Ok(());
                }
                answered = Some(status);
            }

            delay.delay_ms(1).await;
        }

        match answered {
            Some(status) => Err(MprlsError::NotReady(status)),
            None => Err(MprlsError::NotConnected),
        }
    }

    /// Reads the status byte and records it in [`Mprls::last_status`].
    async fn fetch_status(&mut self) -> MprlsResult<Status, B::Error> {
        let mut buf = [0u8; 1];
        self.bus.read(&mut buf).await?;

        let status = Status::from_bits(buf[0]);
        self.last_status = Some(status);

        Ok(status)
    }

    /// Reads the sensor's status byte.
    pub async fn read_status(&mut self) -> MprlsResult<Status, B::Error> {
        self.fetch_status().await
    }

    /// The most recently observed status byte, if any.
    ///
    /// Updated by every status read (including the waiting loop of a
    /// status-polled conversion) and by the status byte of every data frame.
    /// Useful to diagnose a NaN result after the fact.
    pub fn last_status(&self) -> Option<Status> {
        self.last_status
    }

    /// Checks whether the current conversion has finished, using the
    /// strategy fixed at construction.
    async fn conversion_complete(&mut self) -> MprlsResult<bool, B::Error> {
        if let ReadyStrategy::EocPin(pin) = &mut self.ready {
            return pin.is_high().map_err(|_| MprlsError::Pin);
        }

        let status = self.fetch_status().await?;

        Ok(!status.busy())
    }

    /// Waits for conversion-complete, polling once per millisecond for at
    /// most [`READ_TIMEOUT_MS`] milliseconds plus one final check.
    ///
    /// Returns `Ok(false)` on timeout.
    async fn wait_conversion_complete<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> MprlsResult<bool, B::Error> {
        for _ in 0..READ_TIMEOUT_MS {
            if self.conversion_complete().await? {
                return Ok(true);
            }

            delay.delay_ms(1).await;
        }

        self.conversion_complete().await
    }

    /// Starts a single conversion and reads back the raw 24-bit count.
    ///
    /// This performs the full command/wait/read protocol; no retry is
    /// attempted on timeout or fault, re-invoke to try again. Bus errors are
    /// returned as `Err`, everything the sensor itself can report is a
    /// [`RawReading`] variant.
    pub async fn read_raw<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> MprlsResult<RawReading, B::Error> {
        self.bus.write(&CMD_START_CONVERSION).await?;

        if !self.wait_conversion_complete(delay).await? {
            return Ok(RawReading::Timeout);
        }

        let mut frame = [0u8; 4];
        self.bus.read(&mut frame).await?;

        let status = Status::from_bits(frame[0]);
        self.last_status = Some(status);

        if status.math_saturated() || status.integrity_failed() {
            return Ok(RawReading::Fault(status));
        }

        Ok(RawReading::Counts(
            u32::from(frame[1]) << 16 | u32::from(frame[2]) << 8 | u32::from(frame[3]),
        ))
    }

    /// Reads the pressure, with failure causes kept apart.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use embedded_hal::digital::InputPin;
    /// # use embedded_hal_async::delay::DelayNs;
    /// # use mprls_rs::{Mprls, MprlsResult, Reading};
    /// # use mprls_rs::bus::Bus;
    /// # async fn demo<B: Bus, E: InputPin, D: DelayNs>(
    /// #     mut sensor: Mprls<B, E>, mut delay: D,
    /// # ) -> MprlsResult<(), B::Error> {
    /// match sensor.read_pressure_checked(&mut delay).await? {
    ///     Reading::Pressure(hpa) => { /* use the value */ }
    ///     Reading::Timeout => { /* conversion never finished */ }
    ///     Reading::Fault(status) => { /* inspect status bits */ }
    ///     Reading::DegenerateCurve => { /* fix the configuration */ }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn read_pressure_checked<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> MprlsResult<Reading, B::Error> {
        let reading = match self.read_raw(delay).await? {
            RawReading::Counts(raw) => match self.transfer.pressure_from_counts(raw) {
                Some(pressure) => Reading::Pressure(pressure),
                None => Reading::DegenerateCurve,
            },
            RawReading::Timeout => Reading::Timeout,
            RawReading::Fault(status) => Reading::Fault(status),
        };

        Ok(reading)
    }

    /// Reads the pressure in the configured output unit (hPa by default).
    ///
    /// Timeouts, sensor-reported faults and a degenerate transfer curve all
    /// collapse to NaN, mirroring the classic Adafruit contract; only bus
    /// errors are returned as `Err`. Check [`Mprls::last_status`] or use
    /// [`Mprls::read_pressure_checked`] to tell the causes apart.
    pub async fn read_pressure<D: DelayNs>(&mut self, delay: &mut D) -> MprlsResult<f32, B::Error> {
        let pressure = match self.read_pressure_checked(delay).await? {
            Reading::Pressure(pressure) => pressure,
            _ => f32::NAN,
        };

        Ok(pressure)
    }
}
