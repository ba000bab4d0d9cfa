/// Conversion factor from PSI to hectopascal.
pub const PSI_TO_HPA: f32 = 68.947_57;

/// Static sensor configuration: measurement range, transfer-function curve
/// and output unit.
///
/// The defaults describe the MPRLS0025PA00001A (0..25 PSI, 10..90 % curve)
/// with the result converted to hectopascal.
#[derive(Clone, Debug)]
pub struct Configuration {
    pub(crate) psi_min: f32,
    pub(crate) psi_max: f32,
    pub(crate) output_min_percent: f32,
    pub(crate) output_max_percent: f32,
    pub(crate) scale_factor: f32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            psi_min: 0.0,
            psi_max: 25.0,
            output_min_percent: 10.0,
            output_max_percent: 90.0,
            scale_factor: PSI_TO_HPA,
        }
    }
}

impl Configuration {
    /// Sets the pressure range (in PSI) the calibration curve maps onto.
    ///
    /// This is the range printed on the part, e.g. 0..25 for the
    /// MPRLS0025PA variants.
    pub fn psi_range(mut self, psi_min: f32, psi_max: f32) -> Self {
        self.psi_min = psi_min;
        self.psi_max = psi_max;

        self
    }

    /// Sets the transfer-function curve endpoints, in percent of the 24-bit
    /// full scale.
    ///
    /// Equal endpoints make the curve degenerate; reads then yield
    /// [`Reading::DegenerateCurve`](crate::Reading::DegenerateCurve) (NaN
    /// through the plain read path) instead of dividing by zero.
    pub fn transfer_curve(mut self, output_min_percent: f32, output_max_percent: f32) -> Self {
        self.output_min_percent = output_min_percent;
        self.output_max_percent = output_max_percent;

        self
    }

    /// Sets the factor applied to the PSI result to produce the output unit.
    ///
    /// Use `1.0` to read PSI directly, or [`PSI_TO_HPA`] (the default) for
    /// hectopascal.
    pub fn scale_factor(mut self, scale_factor: f32) -> Self {
        self.scale_factor = scale_factor;

        self
    }

    pub fn from_preset(p: Preset) -> Self {
        match p {
            Preset::CurveA => Configuration::default().transfer_curve(10.0, 90.0),
            Preset::CurveB => Configuration::default().transfer_curve(2.5, 22.5),
            Preset::CurveC => Configuration::default().transfer_curve(20.0, 80.0),
        }
    }
}

/// The transfer-function options of the Honeywell MPR series, as encoded in
/// the part number (datasheet section "Transfer function limits").
pub enum Preset {
    /// Type A: 10 % to 90 % of the 24-bit counts.
    CurveA,
    /// Type B: 2.5 % to 22.5 % of the 24-bit counts.
    CurveB,
    /// Type C: 20 % to 80 % of the 24-bit counts.
    CurveC,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_mprls0025pa() {
        let config = Configuration::default();
        assert_eq!(0.0, config.psi_min);
        assert_eq!(25.0, config.psi_max);
        assert_eq!(10.0, config.output_min_percent);
        assert_eq!(90.0, config.output_max_percent);
        assert_eq!(PSI_TO_HPA, config.scale_factor);
    }

    #[test]
    fn presets_select_curve_endpoints() {
        let config = Configuration::from_preset(Preset::CurveB);
        assert_eq!(2.5, config.output_min_percent);
        assert_eq!(22.5, config.output_max_percent);

        let config = Configuration::from_preset(Preset::CurveC);
        assert_eq!(20.0, config.output_min_percent);
        assert_eq!(80.0, config.output_max_percent);
    }
}
