/// Recommended register defaults written by `init`, as `(address, value)`.
pub const RECOMMENDED_DEFAULTS: [(u8, u8); 8] = [
    (0x09, 0x00), // RXOUTSW off, all clocks off
    (0x17, 0xE0), // TX PLL charge pump
    (0x27, 0xE3), // RX PLL charge pump
    (0x64, 0x32), // RX VGA2 common mode voltage
    (0x70, 0x01), // RX FE decode
    (0x79, 0x37), // LNA bias
    (0x59, 0x09), // ADC/DAC reference
    (0x47, 0x40), // TX VGA2 bias
];

/// Expected upper nibble of the version register.
pub const CHIP_VERSION: u8 = 0x2;

/// Timing and policy knobs of the calibration procedures.
///
/// The poll limits and settle delays are the only bound on how long a
/// procedure blocks.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationConfig {
    /// Number of DC_CLBR_DONE polls before a DC calibration gives up.
    pub dc_poll_limit: u8,
    /// Wait before each DC_CLBR_DONE poll, in microseconds.
    pub dc_settle_us: u32,
    /// Wait after each VCOCAP step while tuning a PLL, in microseconds.
    pub vcocap_settle_us: u32,
    /// Width of the LPF calibration reset pulse, in microseconds.
    pub lpfcal_reset_us: u32,
    /// TX PLL frequency used as the LPF tuning clock source.
    pub pll_calibration_hz: u64,
    /// RX VGA2 gain applied while the RX paths are calibrated.
    pub rx_vga2_calibration_gain: i8,
    /// TX VGA1 gain applied when the current gain is above `tx_vga1_gain_limit`.
    pub safe_tx_vga1_gain: i8,
    pub tx_vga1_gain_limit: i8,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        CalibrationConfig {
            dc_poll_limit: 10,
            dc_settle_us: 7,
            vcocap_settle_us: 50,
            lpfcal_reset_us: 1,
            pll_calibration_hz: 320_000_000,
            rx_vga2_calibration_gain: 30,
            safe_tx_vga1_gain: -10,
            tx_vga1_gain_limit: -7,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults_stay_inside_register_space() {
        assert!(RECOMMENDED_DEFAULTS.iter().all(|&(address, _)| address < 0x80));
    }

    #[test]
    fn test_default_gains_are_in_domain() {
        let config = CalibrationConfig::default();

        assert!((0..=60).contains(&config.rx_vga2_calibration_gain));
        assert!((-35..=-4).contains(&config.safe_tx_vga1_gain));
        assert!(config.safe_tx_vga1_gain <= config.tx_vga1_gain_limit);
    }
}
