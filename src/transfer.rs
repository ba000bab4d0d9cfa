use crate::config::Configuration;

/// Full scale of the sensor ADC, 2^24 counts.
pub(crate) const FULL_SCALE_COUNTS: u32 = 1 << 24;

/// The linear transfer function of the sensor, with the curve endpoints
/// precomputed as raw counts.
///
/// The sensor outputs `output_min..output_max` counts over the
/// `psi_min..psi_max` range; pressure is obtained by linear interpolation
/// between the endpoints, extrapolated without clamping when a reading falls
/// outside the curve.
pub(crate) struct TransferFunction {
    output_min: u32,
    output_max: u32,
    psi_min: f32,
    psi_max: f32,
    scale: f32,
}

impl TransferFunction {
    pub fn from_config(config: &Configuration) -> Self {
        Self {
            output_min: counts_at_percent(config.output_min_percent),
            output_max: counts_at_percent(config.output_max_percent),
            psi_min: config.psi_min,
            psi_max: config.psi_max,
            scale: config.scale_factor,
        }
    }

    /// Maps a raw 24-bit reading onto a scaled pressure value.
    ///
    /// Returns `None` when the curve is degenerate (equal endpoints).
    pub fn pressure_from_counts(&self, raw: u32) -> Option<f32> {
        if self.output_min == self.output_max {
            return None;
        }

        let span = self.output_max as f32 - self.output_min as f32;
        let psi =
            (raw as f32 - self.output_min as f32) * (self.psi_max - self.psi_min) / span
                + self.psi_min;

        Some(psi * self.scale)
    }
}

/// Rounds `percent` of the 24-bit full scale to the nearest whole count.
fn counts_at_percent(percent: f32) -> u32 {
    (FULL_SCALE_COUNTS as f32 * (percent / 100.0) + 0.5) as u32
}
