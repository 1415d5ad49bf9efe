//! Fractional-N synthesizer programming.
//!
//! The LO is `(NINT + NFRAC / 2^23) * ref / vco_x`, where `vco_x` is the
//! output divider implied by the FREQSEL band. Both synthesizers share the
//! same register layout at different bases.

use embedded_hal::delay::DelayNs;

use crate::error::Error;
use crate::lms6002d::Lms6002d;
use crate::registers::{pll, PllBlock};
use crate::transport::Transport;

pub const PLL_FREQ_MIN_HZ: u64 = 232_500_000;
pub const PLL_FREQ_MAX_HZ: u64 = 3_720_000_000;

const NFRAC_BITS: u32 = 23;
const NINT_MAX: u64 = 0x1FF;
const VCOCAP_STEPS: u8 = 64;

/// One FREQSEL band: LO frequencies up to and including `max_hz`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreqBand {
    pub max_hz: u64,
    pub freqsel: u8,
}

/// FREQSEL[5:3] picks the VCO, FREQSEL[2:0] the output divider.
pub const FREQ_BANDS: [FreqBand; 16] = [
    FreqBand { max_hz: 285_625_000, freqsel: 0x27 },
    FreqBand { max_hz: 336_875_000, freqsel: 0x2F },
    FreqBand { max_hz: 405_000_000, freqsel: 0x37 },
    FreqBand { max_hz: 465_000_000, freqsel: 0x3F },
    FreqBand { max_hz: 571_250_000, freqsel: 0x26 },
    FreqBand { max_hz: 673_750_000, freqsel: 0x2E },
    FreqBand { max_hz: 810_000_000, freqsel: 0x36 },
    FreqBand { max_hz: 930_000_000, freqsel: 0x3E },
    FreqBand { max_hz: 1_142_500_000, freqsel: 0x25 },
    FreqBand { max_hz: 1_347_500_000, freqsel: 0x2D },
    FreqBand { max_hz: 1_620_000_000, freqsel: 0x35 },
    FreqBand { max_hz: 1_860_000_000, freqsel: 0x3D },
    FreqBand { max_hz: 2_285_000_000, freqsel: 0x24 },
    FreqBand { max_hz: 2_695_000_000, freqsel: 0x2C },
    FreqBand { max_hz: 3_240_000_000, freqsel: 0x34 },
    FreqBand { max_hz: PLL_FREQ_MAX_HZ, freqsel: 0x3C },
];

/// Divider settings for one LO frequency, before the VCOCAP search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PllSettings {
    pub ref_clock_hz: u32,
    pub target_hz: u64,
    pub freqsel: u8,
    pub nint: u16,
    pub nfrac: u32,
    pub achieved_hz: f64,
}

impl PllSettings {
    /// Picks the band and dividers for `target_hz`.
    ///
    /// Targets outside the synthesizer range are clamped. Returns `None` when
    /// the reference clock leaves no valid 9-bit NINT.
    pub fn compute(ref_clock_hz: u32, target_hz: u64) -> Option<Self> {
        if ref_clock_hz == 0 {
            return None;
        }

        let target_hz = clamp_frequency(target_hz);
        let freqsel = band_for(target_hz).freqsel;
        let vco_x = vco_divider(freqsel);
        let ref_clock = ref_clock_hz as u64;

        let vco_hz = vco_x * target_hz;
        let nint = vco_hz / ref_clock;
        if nint == 0 || nint > NINT_MAX {
            return None;
        }
        let nfrac = ((1u64 << NFRAC_BITS) * (vco_hz - nint * ref_clock)) / ref_clock;

        let achieved_hz = (nint as f64 + nfrac as f64 / (1u64 << NFRAC_BITS) as f64)
            * (ref_clock as f64 / vco_x as f64);

        Some(PllSettings {
            ref_clock_hz,
            target_hz,
            freqsel,
            nint: nint as u16,
            nfrac: nfrac as u32,
            achieved_hz,
        })
    }

    /// Frequency resolution of these settings in Hz.
    pub fn step_hz(&self) -> f64 {
        self.ref_clock_hz as f64 / vco_divider(self.freqsel) as f64 / (1u64 << NFRAC_BITS) as f64
    }

    /// Register images for base+0 .. base+3.
    pub fn divider_registers(&self) -> [u8; 4] {
        [
            ((self.nint >> 1) & 0xFF) as u8,
            (((self.nint & 0x01) << 7) as u8) | ((self.nfrac >> 16) & 0x7F) as u8,
            ((self.nfrac >> 8) & 0xFF) as u8,
            (self.nfrac & 0xFF) as u8,
        ]
    }
}

/// Outcome of a completed tune.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PllTuning {
    pub block: PllBlock,
    pub freqsel: u8,
    pub nint: u16,
    pub nfrac: u32,
    pub vcocap: u8,
    /// The LO frequency the synthesizer is actually running at.
    pub achieved_hz: f64,
}

fn clamp_frequency(target_hz: u64) -> u64 {
    let clamped = target_hz.clamp(PLL_FREQ_MIN_HZ, PLL_FREQ_MAX_HZ);
    if clamped != target_hz {
        warn!("LO frequency {} Hz out of range, using {} Hz", target_hz, clamped);
    }
    clamped
}

fn band_for(target_hz: u64) -> &'static FreqBand {
    FREQ_BANDS
        .iter()
        .find(|band| target_hz <= band.max_hz)
        .unwrap_or(&FREQ_BANDS[FREQ_BANDS.len() - 1])
}

#[inline]
fn vco_divider(freqsel: u8) -> u64 {
    1 << ((freqsel & 0x07) - 3)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Vtune {
    High,
    Normal,
    Low,
}

impl<T, D> Lms6002d<T, D>
where
    T: Transport,
    D: DelayNs,
{
    pub fn tx_pll_tune(&mut self, ref_clock_hz: u32, freq_hz: u64) -> Result<PllTuning, Error<T::Error>> {
        self.pll_tune(PllBlock::Tx, ref_clock_hz, freq_hz)
    }

    pub fn rx_pll_tune(&mut self, ref_clock_hz: u32, freq_hz: u64) -> Result<PllTuning, Error<T::Error>> {
        self.pll_tune(PllBlock::Rx, ref_clock_hz, freq_hz)
    }

    /// Programs one synthesizer and centres its VCO capacitor.
    ///
    /// The returned frequency is what the dividers produce, which is rarely
    /// exactly `freq_hz`.
    pub fn pll_tune(
        &mut self,
        block: PllBlock,
        ref_clock_hz: u32,
        freq_hz: u64,
    ) -> Result<PllTuning, Error<T::Error>> {
        let settings =
            PllSettings::compute(ref_clock_hz, freq_hz).ok_or(Error::ReferenceClock(ref_clock_hz))?;
        let base = block.base();

        debug!(
            "{} PLL: FREQSEL=0x{:02x} NINT={} NFRAC={} f={}",
            block_name(block),
            settings.freqsel,
            settings.nint,
            settings.nfrac,
            settings.achieved_hz
        );

        let dividers = settings.divider_registers();
        self.write_reg(base + pll::NINT_HI, dividers[0])?;
        self.write_reg(base + pll::NINT_LO_NFRAC_HI, dividers[1])?;
        self.write_reg(base + pll::NFRAC_MID, dividers[2])?;
        self.write_reg(base + pll::NFRAC_LO, dividers[3])?;
        self.write_bits(
            base + pll::FREQSEL,
            pll::FREQSEL_MASK,
            settings.freqsel << pll::FREQSEL_SHIFT,
        )?;
        self.write_reg(base + pll::VCO_REG, pll::VCO_REG_DEFAULT)?;
        self.write_reg(base + pll::VCOCAP, pll::VCOCAP_DEFAULT)?;

        let vcocap = self.search_vcocap(block)?;

        Ok(PllTuning {
            block,
            freqsel: settings.freqsel,
            nint: settings.nint,
            nfrac: settings.nfrac,
            vcocap,
            achieved_hz: settings.achieved_hz,
        })
    }

    /// Sweeps VCOCAP and settles in the middle of the window where neither
    /// tuning-voltage comparator trips.
    fn search_vcocap(&mut self, block: PllBlock) -> Result<u8, Error<T::Error>> {
        let base = block.base();
        let settle_us = self.config().vcocap_settle_us;

        let mut state = Vtune::High;
        let mut start = None;
        let mut stop = None;

        for cap in 0..VCOCAP_STEPS {
            self.write_bits(base + pll::VCOCAP, pll::VCOCAP_MASK, cap)?;
            self.delay.delay_us(settle_us);

            let comparators = self.read_reg(base + pll::VTUNE)? >> 6;
            trace!("{} PLL VCOCAP={} VTUNE={}", block_name(block), cap, comparators);
            match comparators {
                0x02 => {}
                0x01 => {
                    if state == Vtune::Normal {
                        stop = Some(cap - 1);
                        state = Vtune::Low;
                    }
                }
                0x00 => {
                    if state == Vtune::High {
                        start = Some(cap);
                        state = Vtune::Normal;
                    }
                }
                _ => {
                    error!("{} PLL: invalid VTUNE reading at VCOCAP={}", block_name(block), cap);
                    return Err(Error::VcoCapNotFound);
                }
            }
        }
        if state == Vtune::Normal {
            stop = Some(VCOCAP_STEPS - 1);
        }

        match (start, stop) {
            (Some(start), Some(stop)) => {
                let cap = (start + stop) / 2;
                self.write_bits(base + pll::VCOCAP, pll::VCOCAP_MASK, cap)?;
                debug!("{} PLL: VCOCAP window {}..={}, using {}", block_name(block), start, stop, cap);
                Ok(cap)
            }
            _ => {
                error!("{} PLL: no VCOCAP value keeps VTUNE in range", block_name(block));
                Err(Error::VcoCapNotFound)
            }
        }
    }
}

fn block_name(block: PllBlock) -> &'static str {
    match block {
        PllBlock::Tx => "TX",
        PllBlock::Rx => "RX",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::sim::RegisterFile;

    use embedded_hal_mock::eh1::delay::NoopDelay;

    #[test]
    fn test_compute_900mhz() {
        let settings = PllSettings::compute(26_000_000, 900_000_000).unwrap();

        assert_eq!(settings.freqsel, 0x3E);
        assert_eq!(settings.nint, 276);
        assert_eq!(settings.nfrac, 0x76_2762);
        assert_eq!(settings.divider_registers(), [0x8A, 0x76, 0x27, 0x62]);
        assert!((settings.achieved_hz - 900e6).abs() < settings.step_hz() + 1e-6);
        assert!(settings.achieved_hz <= 900e6);
    }

    #[test]
    fn test_compute_odd_nint_sets_top_bit() {
        // 2 * 1885 MHz / 26 MHz = 145 exactly
        let settings = PllSettings::compute(26_000_000, 1_885_000_000).unwrap();

        assert_eq!(settings.freqsel, 0x24);
        assert_eq!(settings.nint, 145);
        assert_eq!(settings.divider_registers()[0], 72);
        assert_eq!(settings.divider_registers()[1], 0x80);
        assert_eq!(settings.nfrac, 0);
    }

    #[test]
    fn test_band_edges() {
        let table_test: [(u64, u8); 5] = [
            (232_500_000, 0x27),
            (285_625_000, 0x27),
            (285_625_001, 0x2F),
            (930_000_000, 0x3E),
            (3_720_000_000, 0x3C),
        ];

        table_test.into_iter().for_each(|(freq, freqsel)| {
            assert_eq!(PllSettings::compute(30_720_000, freq).unwrap().freqsel, freqsel);
        });
    }

    #[test]
    fn test_out_of_range_frequency_is_clamped() {
        let low = PllSettings::compute(26_000_000, 100_000_000).unwrap();
        assert_eq!(low.target_hz, PLL_FREQ_MIN_HZ);
        assert_eq!(low.freqsel, 0x27);

        let high = PllSettings::compute(26_000_000, 6_000_000_000).unwrap();
        assert_eq!(high.target_hz, PLL_FREQ_MAX_HZ);
        assert_eq!(high.freqsel, 0x3C);
    }

    #[test]
    fn test_bad_reference_clock() {
        assert!(PllSettings::compute(0, 900_000_000).is_none());
        // NINT would need more than nine bits
        assert!(PllSettings::compute(1_000_000, 900_000_000).is_none());
    }

    #[test]
    fn test_achieved_within_one_step_across_bands() {
        for band in FREQ_BANDS {
            let target = band.max_hz - 1_234_567;
            let settings = PllSettings::compute(26_000_000, target).unwrap();
            assert!((settings.achieved_hz - target as f64).abs() < settings.step_hz() + 1e-6);
        }
    }

    #[test]
    fn test_tune_fails_without_vcocap_window() {
        // both comparators set is not a valid reading
        let mut file = RegisterFile::new();
        file.poke(0x1A, 0xC0);
        let mut lms = Lms6002d::new(file, NoopDelay::new());

        assert_eq!(lms.tx_pll_tune(26_000_000, 900_000_000), Err(Error::VcoCapNotFound));
    }

    #[test]
    fn test_tune_with_high_comparator_only() {
        let mut file = RegisterFile::new();
        file.poke(0x2A, 0x80);
        let mut lms = Lms6002d::new(file, NoopDelay::new());

        assert_eq!(lms.rx_pll_tune(26_000_000, 900_000_000), Err(Error::VcoCapNotFound));
    }

    #[test]
    fn test_tune_always_normal_uses_full_range() {
        let mut lms = Lms6002d::new(RegisterFile::new(), NoopDelay::new());

        let tuning = lms.rx_pll_tune(26_000_000, 900_000_000).unwrap();

        assert_eq!(tuning.vcocap, 31);
        assert_eq!(lms.transport.peek(0x29), 0x80 | 31);
        assert_eq!(lms.transport.peek(0x25) >> 2, 0x3E);
        assert_eq!(lms.transport.peek(0x20), 0x8A);
        assert_eq!(lms.transport.peek(0x28), 0x40);
    }

    #[test]
    fn test_tune_bad_reference_touches_nothing() {
        let mut lms = Lms6002d::new(RegisterFile::new(), NoopDelay::new());

        assert_eq!(lms.tx_pll_tune(0, 900_000_000), Err(Error::ReferenceClock(0)));
        assert_eq!(lms.transport.writes(), 0);
    }
}
