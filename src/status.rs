/// The MPRLS status byte.
///
/// The sensor prepends this byte to every data frame, and returns it alone
/// for single-byte reads. Only four bits carry meaning; the remainder always
/// read as zero on a healthy part.
///
/// Returned by [`crate::Mprls::read_status`] and cached in
/// [`crate::Mprls::last_status`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Status(u8);

impl Status {
    /// Device is powered.
    pub const POWERED: u8 = 1 << 6;
    /// A conversion is in progress.
    pub const BUSY: u8 = 1 << 5;
    /// Integrity test failed.
    pub const INTEGRITY_FAILED: u8 = 1 << 2;
    /// Internal math saturation.
    pub const MATH_SATURATED: u8 = 1 << 0;

    /// All bits the sensor can legitimately set.
    pub const MASK: u8 = 0b0110_0101;

    pub fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// The raw status byte, verbatim as read from the sensor.
    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn powered(&self) -> bool {
        self.0 & Self::POWERED != 0
    }

    /// Is a conversion currently in progress?
    ///
    /// While this is set, data reads return stale counts.
    pub fn busy(&self) -> bool {
        self.0 & Self::BUSY != 0
    }

    /// Did the memory integrity / error flag test fail?
    pub fn integrity_failed(&self) -> bool {
        self.0 & Self::INTEGRITY_FAILED != 0
    }

    /// Has an internal math operation saturated?
    pub fn math_saturated(&self) -> bool {
        self.0 & Self::MATH_SATURATED != 0
    }

    /// Powered, idle and fault-free: the masked byte is exactly the powered
    /// bit. This is the readiness criterion used during initialization.
    pub fn is_ready(&self) -> bool {
        self.0 & Self::MASK == Self::POWERED
    }
}
