//! Gain, DC offset, filter and front-end selection accessors.
//!
//! Every setter returns the value that was programmed before the call.
//! Inputs outside a stage's range are clamped to the nearest end of the
//! range and logged; they are never rejected.

use embedded_hal::delay::DelayNs;

use crate::bandwidth::{lpf_code_to_width, lpf_width_to_code};
use crate::error::Error;
use crate::lms6002d::Lms6002d;
use crate::registers::{
    LNASEL_RXFE, LNA_PD_DECODE, LNA_PD_TEST, RXFE_DECODE, RXFE_LNA_PD, RX_LPF_BWC,
    RX_PLL_SELOUT, RX_VGA2GAIN, TX_LPF_BWC, TX_PA_EN, TX_VGA1DC_I, TX_VGA1DC_Q, TX_VGA1GAIN,
    TX_VGA2GAIN,
};
use crate::transport::Transport;

pub const TX_VGA1_GAIN_MIN: i8 = -35;
pub const TX_VGA1_GAIN_MAX: i8 = -4;
pub const TX_VGA2_GAIN_MIN: i8 = 0;
pub const TX_VGA2_GAIN_MAX: i8 = 25;
pub const RX_VGA2_GAIN_MIN: i8 = 0;
pub const RX_VGA2_GAIN_MAX: i8 = 60;
/// Highest RX VGA2 code the getter reports; 20 * 3 dB = 60 dB.
pub const RX_VGA2_CODE_MAX: u8 = 20;
pub const RX_VGA2_DB_PER_CODE: i8 = 3;
pub const TX_PA_MAX: u8 = 2;
pub const RX_LNA_MAX: u8 = 3;

fn clamp_gain(stage: &str, gain: i8, min: i8, max: i8) -> i8 {
    let clamped = gain.clamp(min, max);
    if clamped != gain {
        warn!("{} gain {} dB out of range, using {} dB", stage, gain, clamped);
    }
    clamped
}

fn clamp_select(stage: &str, value: u8, max: u8) -> u8 {
    if value > max {
        warn!("{} selection {} out of range, using {}", stage, value, max);
        max
    } else {
        value
    }
}

impl<T, D> Lms6002d<T, D>
where
    T: Transport,
    D: DelayNs,
{
    /// Sets TX VGA1 gain in dB, range -35..=-4.
    pub fn set_tx_vga1gain(&mut self, gain: i8) -> Result<i8, Error<T::Error>> {
        let gain = clamp_gain("TX VGA1", gain, TX_VGA1_GAIN_MIN, TX_VGA1_GAIN_MAX);
        let old = self.write_field(TX_VGA1GAIN, (gain - TX_VGA1_GAIN_MIN) as u8)?;
        Ok(old as i8 + TX_VGA1_GAIN_MIN)
    }

    pub fn get_tx_vga1gain(&mut self) -> Result<i8, Error<T::Error>> {
        Ok(self.read_field(TX_VGA1GAIN)? as i8 + TX_VGA1_GAIN_MIN)
    }

    /// Sets TX VGA2 gain in dB, range 0..=25.
    pub fn set_tx_vga2gain(&mut self, gain: i8) -> Result<i8, Error<T::Error>> {
        let gain = clamp_gain("TX VGA2", gain, TX_VGA2_GAIN_MIN, TX_VGA2_GAIN_MAX);
        let old = self.write_field(TX_VGA2GAIN, gain as u8)?;
        Ok(old as i8)
    }

    /// TX VGA2 gain in dB; codes above 25 read as 25.
    pub fn get_tx_vga2gain(&mut self) -> Result<i8, Error<T::Error>> {
        let gain = self.read_field(TX_VGA2GAIN)? as i8;
        Ok(gain.min(TX_VGA2_GAIN_MAX))
    }

    /// Sets RX VGA2 gain in dB, range 0..=60, in 3 dB steps (rounded down).
    pub fn set_rx_vga2gain(&mut self, gain: i8) -> Result<i8, Error<T::Error>> {
        let gain = clamp_gain("RX VGA2", gain, RX_VGA2_GAIN_MIN, RX_VGA2_GAIN_MAX);
        let old = self.write_field(RX_VGA2GAIN, (gain / RX_VGA2_DB_PER_CODE) as u8)?;
        Ok(old as i8 * RX_VGA2_DB_PER_CODE)
    }

    /// RX VGA2 gain in dB. Codes above 20 read as 60 dB even though the field
    /// is five bits wide.
    pub fn get_rx_vga2gain(&mut self) -> Result<i8, Error<T::Error>> {
        let code = self.read_field(RX_VGA2GAIN)?.min(RX_VGA2_CODE_MAX);
        Ok(code as i8 * RX_VGA2_DB_PER_CODE)
    }

    /// Raw TX VGA1 DC offset trim, I channel.
    pub fn set_tx_vga1dc_i_int(&mut self, offset: u8) -> Result<u8, Error<T::Error>> {
        self.write_field(TX_VGA1DC_I, offset)
    }

    pub fn get_tx_vga1dc_i_int(&mut self) -> Result<u8, Error<T::Error>> {
        self.read_field(TX_VGA1DC_I)
    }

    /// Raw TX VGA1 DC offset trim, Q channel.
    pub fn set_tx_vga1dc_q_int(&mut self, offset: u8) -> Result<u8, Error<T::Error>> {
        self.write_field(TX_VGA1DC_Q, offset)
    }

    pub fn get_tx_vga1dc_q_int(&mut self) -> Result<u8, Error<T::Error>> {
        self.read_field(TX_VGA1DC_Q)
    }

    /// Sets the TX LPF cutoff in kHz and returns the previous cutoff.
    pub fn set_tx_lpf(&mut self, width_khz: u32) -> Result<u32, Error<T::Error>> {
        let old = self.write_field(TX_LPF_BWC, lpf_width_to_code(width_khz))?;
        Ok(lpf_code_to_width(old))
    }

    pub fn get_tx_lpf(&mut self) -> Result<u32, Error<T::Error>> {
        Ok(lpf_code_to_width(self.read_field(TX_LPF_BWC)?))
    }

    /// Sets the RX LPF cutoff in kHz and returns the previous cutoff.
    pub fn set_rx_lpf(&mut self, width_khz: u32) -> Result<u32, Error<T::Error>> {
        let old = self.write_field(RX_LPF_BWC, lpf_width_to_code(width_khz))?;
        Ok(lpf_code_to_width(old))
    }

    pub fn get_rx_lpf(&mut self) -> Result<u32, Error<T::Error>> {
        Ok(lpf_code_to_width(self.read_field(RX_LPF_BWC)?))
    }

    /// Selects the TX PA, 0 turns all PAs off.
    pub fn set_tx_pa(&mut self, pa: u8) -> Result<u8, Error<T::Error>> {
        let pa = clamp_select("TX PA", pa, TX_PA_MAX);
        self.write_field(TX_PA_EN, pa)
    }

    pub fn get_tx_pa(&mut self) -> Result<u8, Error<T::Error>> {
        self.read_field(TX_PA_EN)
    }

    /// Selects the RX LNA, 0 turns all LNAs off.
    ///
    /// The RX PLL output buffer (SELOUT) has to follow the LNA choice, so both
    /// fields are written. Returns the previous LNASEL_RXFE value.
    pub fn set_rx_lna(&mut self, lna: u8) -> Result<u8, Error<T::Error>> {
        let lna = clamp_select("RX LNA", lna, RX_LNA_MAX);
        let old = self.write_field(LNASEL_RXFE, lna)?;
        self.write_field(RX_PLL_SELOUT, lna)?;
        Ok(old)
    }

    /// Active LNA as seen by LNASEL_RXFE.
    ///
    /// SELOUT is not consulted: if the two fields disagree there is no single
    /// answer.
    pub fn get_rx_lna(&mut self) -> Result<u8, Error<T::Error>> {
        self.read_field(LNASEL_RXFE)
    }

    /// Powers the LNAs up or down through the front-end test registers.
    pub fn set_rx_lna_power(&mut self, enable: bool) -> Result<(), Error<T::Error>> {
        if enable {
            self.clear_bits(RXFE_LNA_PD, LNA_PD_TEST)?;
            self.clear_bits(RXFE_DECODE, LNA_PD_DECODE)
        } else {
            self.set_bits(RXFE_LNA_PD, LNA_PD_TEST)?;
            self.set_bits(RXFE_DECODE, LNA_PD_DECODE)
        }
    }
}
