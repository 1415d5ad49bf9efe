//! LMS6002D register map.
//!
//! Only the registers and fields this driver touches are named here.

// Top level configuration
pub const DC_REGVAL: u8 = 0x00; // LPF tuning module DC calibration result.
pub const RCCAL_STATUS: u8 = 0x01; // RCCAL_LPFCAL, DC_LOCK, DC_CLBR_DONE of the LPF tuning module.
pub const VERSION: u8 = 0x04; // Chip version and revision.
pub const SOFT_CTRL: u8 = 0x05; // Soft reset, soft TX/RX enables.
pub const LPFCAL_CTRL: u8 = 0x06; // LPF calibration clock selection, power down and reset.
pub const LPFCAL_BWC: u8 = 0x07; // LPF calibration enable and bandwidth code.
pub const CLK_EN: u8 = 0x09; // Clock enables for DSM and calibration modules.

// TX LPF
pub const TX_LPF_BW: u8 = 0x34; // BWC_LPF, LPF enable.
pub const TX_LPF_DACCAL: u8 = 0x35; // DCO_DACCAL.
pub const TX_LPF_RCCAL: u8 = 0x36; // RCCAL_LPF.

// TX RF
pub const TX_VGA1_GAIN: u8 = 0x41; // VGA1GAIN.
pub const TX_VGA1_DC_I: u8 = 0x42; // VGA1DC_I.
pub const TX_VGA1_DC_Q: u8 = 0x43; // VGA1DC_Q.
pub const TX_PA_SEL: u8 = 0x44; // PA_EN.
pub const TX_VGA2_GAIN: u8 = 0x45; // VGA2GAIN, ENVD.

// RX LPF
pub const RX_LPF_BW: u8 = 0x54; // BWC_LPF, LPF enable.
pub const RX_LPF_DACCAL: u8 = 0x55; // DCO_DACCAL.
pub const RX_LPF_RCCAL: u8 = 0x56; // RCCAL_LPF.

// RX VGA2
pub const RX_VGA2_GAIN: u8 = 0x65; // VGA2GAIN.

// RX front end
pub const RXFE_DECODE: u8 = 0x70; // Decode control, LNA power-down override.
pub const RXFE_LNA_SEL: u8 = 0x75; // LNASEL_RXFE, G_LNA_RXFE.
pub const RXFE_LNA_PD: u8 = 0x7D; // LNA power-down test bits.

/// Power-on reset sequence written to [`SOFT_CTRL`].
pub const SOFT_RESET_ASSERT: u8 = 0x12;
pub const SOFT_RESET_RELEASE: u8 = 0x32;

pub const SOFT_TX_EN: u8 = 1 << 3;
pub const SOFT_RX_EN: u8 = 1 << 2;

pub const CLK_EN_TX_DSM: u8 = 1 << 0;
pub const CLK_EN_TX_LPF_DCCAL: u8 = 1 << 1;
pub const CLK_EN_RX_DSM: u8 = 1 << 2;
pub const CLK_EN_RX_LPF_DCCAL: u8 = 1 << 3;
pub const CLK_EN_RX_VGA2_DCCAL: u8 = 1 << 4;
pub const CLK_EN_LPFCAL: u8 = 1 << 5;

pub const LPFCAL_CLKSEL: u8 = 1 << 3;
pub const LPFCAL_PD_CLK: u8 = 1 << 2;
pub const LPFCAL_RST: u8 = 1 << 0;
pub const LPFCAL_EN: u8 = 1 << 7;

pub const LNA_PD_TEST: u8 = 1 << 0;
pub const LNA_PD_DECODE: u8 = 1 << 1;

/// A bit field inside one register: `(value & mask) >> shift`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field {
    pub address: u8,
    pub mask: u8,
    pub shift: u8,
}

impl Field {
    pub const fn new(address: u8, mask: u8, shift: u8) -> Self {
        Field {
            address,
            mask,
            shift,
        }
    }

    /// Moves `value` into position, dropping bits that do not fit.
    #[inline]
    pub const fn bits(self, value: u8) -> u8 {
        (value << self.shift) & self.mask
    }

    /// Extracts the field from a full register value.
    #[inline]
    pub const fn extract(self, register: u8) -> u8 {
        (register & self.mask) >> self.shift
    }
}

pub const RCCAL_LPFCAL: Field = Field::new(RCCAL_STATUS, 0x07 << 5, 5);
pub const BWC_LPFCAL: Field = Field::new(LPFCAL_BWC, 0x0F, 0);

pub const TX_LPF_BWC: Field = Field::new(TX_LPF_BW, 0x0F << 2, 2);
pub const RX_LPF_BWC: Field = Field::new(RX_LPF_BW, 0x0F << 2, 2);
pub const TX_LPF_DCO_DACCAL: Field = Field::new(TX_LPF_DACCAL, 0x3F, 0);
pub const RX_LPF_DCO_DACCAL: Field = Field::new(RX_LPF_DACCAL, 0x3F, 0);
pub const TX_LPF_RCCAL_LPF: Field = Field::new(TX_LPF_RCCAL, 0x07 << 4, 4);
pub const RX_LPF_RCCAL_LPF: Field = Field::new(RX_LPF_RCCAL, 0x07 << 4, 4);

pub const TX_VGA1GAIN: Field = Field::new(TX_VGA1_GAIN, 0x1F, 0);
pub const TX_VGA1DC_I: Field = Field::new(TX_VGA1_DC_I, 0xFF, 0);
pub const TX_VGA1DC_Q: Field = Field::new(TX_VGA1_DC_Q, 0xFF, 0);
pub const TX_PA_EN: Field = Field::new(TX_PA_SEL, 0x07 << 3, 3);
pub const TX_VGA2GAIN: Field = Field::new(TX_VGA2_GAIN, 0x1F << 3, 3);
pub const RX_VGA2GAIN: Field = Field::new(RX_VGA2_GAIN, 0x1F, 0);

pub const LNASEL_RXFE: Field = Field::new(RXFE_LNA_SEL, 0x03 << 4, 4);
/// SELOUT of the RX PLL output buffer, follows the LNA selection.
pub const RX_PLL_SELOUT: Field = Field::new(PllBlock::Rx.base() + pll::FREQSEL, 0x03, 0);

/// Register group selector for the two synthesizers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PllBlock {
    Tx = 0x10,
    Rx = 0x20,
}

impl PllBlock {
    #[inline]
    pub const fn base(self) -> u8 {
        self as u8
    }
}

/// Offsets inside a PLL register group.
pub mod pll {
    pub const NINT_HI: u8 = 0x00; // NINT[8:1].
    pub const NINT_LO_NFRAC_HI: u8 = 0x01; // NINT[0], NFRAC[22:16].
    pub const NFRAC_MID: u8 = 0x02; // NFRAC[15:8].
    pub const NFRAC_LO: u8 = 0x03; // NFRAC[7:0].
    pub const FREQSEL: u8 = 0x05; // FREQSEL[5:0] in bits 7:2, SELOUT in bits 1:0.
    pub const VCO_REG: u8 = 0x08; // VOVCOREG[3:1], OFFDOWN.
    pub const VCOCAP: u8 = 0x09; // VOVCOREG[0], VCOCAP[5:0].
    pub const VTUNE: u8 = 0x0A; // VTUNE_H, VTUNE_L comparators in bits 7:6.

    pub const FREQSEL_MASK: u8 = 0x3F << 2;
    pub const FREQSEL_SHIFT: u8 = 2;
    pub const VCOCAP_MASK: u8 = 0x3F;

    pub const VCO_REG_DEFAULT: u8 = 0x40;
    pub const VCOCAP_DEFAULT: u8 = 0x94;

    /// Writable registers of the group that a tune overwrites.
    pub const SNAPSHOT_LEN: usize = 10;
}

/// DC offset calibration blocks and their register base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DcCalModule {
    LpfTuning = 0x00,
    TxLpf = 0x30,
    RxLpf = 0x50,
    RxVga2 = 0x60,
}

impl DcCalModule {
    #[inline]
    pub const fn base(self) -> u8 {
        self as u8
    }
}

/// Offsets and fields inside a DC calibration block.
pub mod dccal {
    pub const REGVAL: u8 = 0x00; // DC_REGVAL[5:0].
    pub const STATUS: u8 = 0x01; // DC_LOCK[2:0] in bits 4:2, DC_CLBR_DONE in bit 1.
    pub const CNTVAL: u8 = 0x02; // DC_CNTVAL[5:0].
    pub const CTRL: u8 = 0x03; // DC_START_CLBR, DC_LOAD, DC_SRESET, DC_ADDR[2:0].

    pub const REGVAL_MASK: u8 = 0x3F;
    pub const LOCK_MASK: u8 = 0x07 << 2;
    pub const LOCK_SHIFT: u8 = 2;
    pub const CLBR_DONE: u8 = 1 << 1;
    pub const CNTVAL_MASK: u8 = 0x3F;
    pub const START_CLBR: u8 = 1 << 5;
    pub const LOAD: u8 = 1 << 4;
    pub const ADDR_MASK: u8 = 0x07;

    /// DC_LOCK is three bits wide; 0 and 7 are the ambiguous end points.
    pub const LOCK_MAX: u8 = 7;
}

/// Registers read back by the diagnostic dump.
pub const DUMP_SET: [u8; 107] = [
    // Top level configuration
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0E, 0x0F,
    // TX PLL
    0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1A, 0x1B, 0x1C, 0x1D, 0x1E, 0x1F,
    // RX PLL
    0x20, 0x21, 0x22, 0x23, 0x24, 0x25, 0x26, 0x27, 0x28, 0x29, 0x2A, 0x2B, 0x2C, 0x2D, 0x2E, 0x2F,
    // TX LPF
    0x30, 0x31, 0x32, 0x33, 0x34, 0x35, 0x36,
    // TX RF
    0x40, 0x41, 0x42, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48, 0x49, 0x4A, 0x4B, 0x4C, 0x4D, 0x4E, 0x4F,
    // RX LPF, ADC and DAC
    0x50, 0x51, 0x52, 0x53, 0x54, 0x55, 0x56, 0x57, 0x58, 0x59, 0x5A, 0x5B, 0x5C, 0x5D, 0x5E, 0x5F,
    // RX VGA2
    0x60, 0x61, 0x62, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68,
    // RX front end
    0x70, 0x71, 0x72, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x7A, 0x7B, 0x7C,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_bits_and_extract() {
        assert_eq!(TX_LPF_BWC.bits(0x0F), 0x3C);
        assert_eq!(TX_LPF_BWC.bits(0x1F), 0x3C);
        assert_eq!(TX_LPF_BWC.extract(0xFF), 0x0F);
        assert_eq!(TX_VGA2GAIN.bits(25), 25 << 3);
        assert_eq!(RX_PLL_SELOUT.address, 0x25);
    }

    #[test]
    fn test_dump_set_is_sorted_and_unique() {
        assert!(DUMP_SET.windows(2).all(|w| w[0] < w[1]));
        assert!(DUMP_SET.iter().all(|&address| address < 0x80));
    }
}
