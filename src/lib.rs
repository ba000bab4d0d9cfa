#![cfg_attr(not(test), no_std)]
//! Async `no_std` driver for the Honeywell MPR series ported absolute
//! pressure sensors (MPRLS), such as the MPRLS0025PA00001A found on the
//! Adafruit MPRLS breakout.
//!
//! The sensor speaks a minimal command/response protocol over I2C: a 3-byte
//! command starts a single conversion, and a 4-byte response carries a status
//! byte followed by a big-endian 24-bit ADC count. This driver handles the
//! transaction framing, conversion-complete detection (either via the
//! optional end-of-conversion pin or by polling the status byte), timeout
//! handling, and the linear transfer-function math that maps raw counts onto
//! a pressure value in the unit of your choice (hPa by default).
//!
//! # Examples
//!
//! ```rust,no_run
//! # use embedded_hal_async::delay::DelayNs;
//! # use embedded_hal_async::i2c::I2c;
//! use mprls_rs::{Configuration, Mprls, DEFAULT_I2C_ADDRESS};
//! # async fn demo<I: I2c, D: DelayNs>(i2c: I, mut delay: D) -> mprls_rs::MprlsResult<(), I::Error> {
//!
//! let mut sensor = Mprls::new_i2c(
//!     i2c,
//!     DEFAULT_I2C_ADDRESS,
//!     Configuration::default(),
//!     &mut delay,
//! ).await?;
//!
//! let hpa = sensor.read_pressure(&mut delay).await?;
//! if hpa.is_nan() {
//!     // Timed out, sensor fault or degenerate curve; inspect
//!     // `sensor.last_status()` or use `read_pressure_checked` to tell
//!     // them apart.
//! }
//! # Ok(())
//! # }
//! ```

pub mod bus;
pub mod config;
pub mod error;
mod mprls;
mod status;
mod transfer;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{Configuration, Preset, PSI_TO_HPA};
pub use error::MprlsError;
pub use mprls::{
    Mprls, MprlsResult, NoPin, RawReading, Reading, DEFAULT_I2C_ADDRESS, RAW_READ_SENTINEL,
};
pub use status::Status;
