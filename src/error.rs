//! Errors that can occur when using the MPRLS sensor.
//!
//! This module provides an error type that encapsulates all possible errors that can occur during communication with the sensor.
//! It is generic over the underlying bus error type.

use crate::status::Status;

/// This represents all possible errors that can occur when using the MPRLS sensor.
#[derive(Debug)]
pub enum MprlsError<BusError> {
    /// An error has occurred in the I2C driver
    Bus(BusError),

    /// Unable to communicate with the sensor
    ///
    /// Could possibly indicate an error with pin configuration and/or wiring.
    NotConnected,

    /// The sensor answered during initialization, but its status byte did not
    /// read back as powered and idle.
    ///
    /// The offending status byte is included so the busy/integrity/saturation
    /// bits can be inspected.
    NotReady(Status),

    /// Driving the reset pin or sampling the end-of-conversion pin failed.
    ///
    /// Most GPIO implementations are infallible, so this is rarely seen in
    /// practice.
    Pin,
}
