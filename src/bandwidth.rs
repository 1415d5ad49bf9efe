//! LPF bandwidth codes.
//!
//! The BWC_LPF field selects one of sixteen vendor-characterized cutoff
//! frequencies. The mapping is a lookup table, not a formula.

/// Cutoff in kHz, indexed by BWC_LPF code.
pub const LPF_WIDTHS_KHZ: [u32; 16] = [
    14000, // 0
    10000, // 1
    7000,  // 2
    6000,  // 3
    5000,  // 4
    4375,  // 5
    3500,  // 6
    3000,  // 7
    2750,  // 8
    2500,  // 9
    1920,  // 10
    1500,  // 11
    1375,  // 12
    1250,  // 13
    875,   // 14
    750,   // 15
];

/// Code used when a width or code is not in the table (14 MHz).
pub const LPF_FALLBACK_CODE: u8 = 0;

/// Converts a width in kHz into a BWC_LPF code.
///
/// Widths that are not in the table select 14 MHz.
pub fn lpf_width_to_code(width_khz: u32) -> u8 {
    match LPF_WIDTHS_KHZ.iter().position(|&w| w == width_khz) {
        Some(code) => code as u8,
        None => {
            warn!("unsupported LPF width {} kHz, using 14000 kHz", width_khz);
            LPF_FALLBACK_CODE
        }
    }
}

/// Converts a BWC_LPF code into a width in kHz.
///
/// Codes above 15 decode as 14 MHz.
pub fn lpf_code_to_width(code: u8) -> u32 {
    match LPF_WIDTHS_KHZ.get(code as usize) {
        Some(&width) => width,
        None => {
            warn!("unknown LPF width code {}, using 14000 kHz", code);
            LPF_WIDTHS_KHZ[LPF_FALLBACK_CODE as usize]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_round_trips() {
        for width in LPF_WIDTHS_KHZ {
            assert_eq!(lpf_code_to_width(lpf_width_to_code(width)), width);
        }
    }

    #[test]
    fn test_known_codes() {
        let table_test: [(u32, u8); 4] = [(750, 15), (1920, 10), (4375, 5), (14000, 0)];

        table_test.into_iter().for_each(|(width, code)| {
            assert_eq!(lpf_width_to_code(width), code);
            assert_eq!(lpf_code_to_width(code), width);
        });
    }

    #[test]
    fn test_unknown_width_falls_back_to_14mhz() {
        assert_eq!(lpf_width_to_code(1000), lpf_width_to_code(14000));
        assert_eq!(lpf_width_to_code(0), 0);
    }

    #[test]
    fn test_unknown_code_decodes_as_14mhz() {
        assert_eq!(lpf_code_to_width(99), 14000);
        assert_eq!(lpf_code_to_width(16), 14000);
    }

    #[test]
    fn test_table_is_strictly_decreasing() {
        assert!(LPF_WIDTHS_KHZ.windows(2).all(|w| w[0] > w[1]));
    }
}
