//! DC offset and LPF bandwidth calibration.
//!
//! Every DC calibration block on the chip works the same way: pick a channel
//! with DC_ADDR, load a trial count into DC_CNTVAL, pulse DC_START_CLBR and
//! poll DC_CLBR_DONE until the comparator settles. DC_LOCK then tells whether
//! the search ended inside the range or ran into one of its ends, which is
//! indistinguishable from a failure and is retried from a different start.
//!
//! [`Calibrator::auto_calibration`] runs the blocks in the order the analog
//! paths depend on each other. The caller must keep the transmitter silent and
//! the receiver input disconnected for the whole run.

use embedded_hal::delay::DelayNs;

use crate::bandwidth::{lpf_code_to_width, lpf_width_to_code};
use crate::error::Error;
use crate::lms6002d::Lms6002d;
use crate::registers::{
    dccal, pll, DcCalModule, PllBlock, BWC_LPFCAL, CLK_EN, CLK_EN_LPFCAL, CLK_EN_RX_LPF_DCCAL,
    CLK_EN_RX_VGA2_DCCAL, CLK_EN_TX_LPF_DCCAL, LPFCAL_BWC,
    LPFCAL_CLKSEL, LPFCAL_CTRL, LPFCAL_EN, LPFCAL_PD_CLK, LPFCAL_RST, RCCAL_LPFCAL, RXFE_DECODE,
    RXFE_LNA_PD, RX_LPF_BWC, RX_LPF_DCO_DACCAL, RX_LPF_RCCAL_LPF, RX_VGA2GAIN, SOFT_CTRL, TX_LPF_BWC,
    TX_LPF_DCO_DACCAL, TX_LPF_RCCAL_LPF,
};
use crate::transport::Transport;

/// Mid-scale DC_CNTVAL the search starts from.
pub const DC_TRIAL_START: u8 = 31;
/// DC_CNTVAL used for the second attempt after an ambiguous lock.
pub const DC_TRIAL_RETRY: u8 = 0;

pub const LPF_DC_CHANNELS: usize = 2;
pub const RX_VGA2_DC_CHANNELS: usize = 5;

/// LNA the receiver is parked on while calibrating.
const QUIET_LNA: u8 = 1;

/// Where a single DC calibration is in its search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationState {
    Idle,
    Searching,
    Converged,
    Failed,
}

/// Result of one DC calibration channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DcCalibration {
    /// DC_LOCK settled inside the range and DC_REGVAL holds the offset.
    Converged { regval: u8, lock: u8 },
    /// DC_LOCK hit an end of the range, or DC_CLBR_DONE never cleared
    /// (`lock` is `None`).
    Failed { lock: Option<u8> },
}

impl DcCalibration {
    pub fn is_converged(&self) -> bool {
        matches!(self, DcCalibration::Converged { .. })
    }

    pub fn regval(&self) -> Option<u8> {
        match *self {
            DcCalibration::Converged { regval, .. } => Some(regval),
            DcCalibration::Failed { .. } => None,
        }
    }

    fn state(&self) -> CalibrationState {
        match self {
            DcCalibration::Converged { .. } => CalibrationState::Converged,
            DcCalibration::Failed { .. } => CalibrationState::Failed,
        }
    }
}

/// Steps of [`Calibrator::auto_calibration`], in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationStage {
    LpfTuningDc,
    LpfBandwidth,
    TxLpfDc,
    RxLpfDc,
    RxVga2Dc,
}

/// Settings `auto_calibration` changes and puts back at the end of a
/// successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SavedState {
    pub tx_pll: [u8; pll::SNAPSHOT_LEN],
    pub rx_pll: [u8; pll::SNAPSHOT_LEN],
    /// Raw VGA2GAIN code, not capped like the dB getter.
    pub rx_vga2_code: u8,
    /// Set only when the TX VGA1 gain had to be lowered.
    pub tx_vga1_gain: Option<i8>,
    pub rx_lna: u8,
    pub rxfe_decode: u8,
    pub lna_power_down: u8,
}

impl SavedState {
    fn capture<T, D>(lms: &mut Lms6002d<T, D>) -> Result<Self, Error<T::Error>>
    where
        T: Transport,
        D: DelayNs,
    {
        Ok(SavedState {
            tx_pll: read_pll_group(lms, PllBlock::Tx)?,
            rx_pll: read_pll_group(lms, PllBlock::Rx)?,
            rx_vga2_code: lms.read_field(RX_VGA2GAIN)?,
            tx_vga1_gain: None,
            rx_lna: lms.get_rx_lna()?,
            rxfe_decode: lms.read_reg(RXFE_DECODE)?,
            lna_power_down: lms.read_reg(RXFE_LNA_PD)?,
        })
    }

    /// Writes the saved PLL groups, gains and LNA selection back.
    ///
    /// `auto_calibration` does this itself on success; after a failed run the
    /// caller decides whether to.
    pub fn restore<T, D>(&self, lms: &mut Lms6002d<T, D>) -> Result<(), Error<T::Error>>
    where
        T: Transport,
        D: DelayNs,
    {
        write_pll_group(lms, PllBlock::Tx, &self.tx_pll)?;
        write_pll_group(lms, PllBlock::Rx, &self.rx_pll)?;
        lms.write_field(RX_VGA2GAIN, self.rx_vga2_code)?;
        if let Some(gain) = self.tx_vga1_gain {
            lms.set_tx_vga1gain(gain)?;
        }
        lms.set_rx_lna(self.rx_lna)?;
        lms.write_reg(RXFE_DECODE, self.rxfe_decode)?;
        lms.write_reg(RXFE_LNA_PD, self.lna_power_down)?;
        Ok(())
    }
}

fn read_pll_group<T, D>(
    lms: &mut Lms6002d<T, D>,
    block: PllBlock,
) -> Result<[u8; pll::SNAPSHOT_LEN], Error<T::Error>>
where
    T: Transport,
    D: DelayNs,
{
    let mut group = [0u8; pll::SNAPSHOT_LEN];
    for (offset, value) in group.iter_mut().enumerate() {
        *value = lms.read_reg(block.base() + offset as u8)?;
    }
    Ok(group)
}

fn write_pll_group<T, D>(
    lms: &mut Lms6002d<T, D>,
    block: PllBlock,
    group: &[u8; pll::SNAPSHOT_LEN],
) -> Result<(), Error<T::Error>>
where
    T: Transport,
    D: DelayNs,
{
    for (offset, &value) in group.iter().enumerate() {
        lms.write_reg(block.base() + offset as u8, value)?;
    }
    Ok(())
}

/// Outcome of [`Calibrator::auto_calibration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationReport {
    /// DC offset found for the LPF tuning module.
    pub dccal: Option<u8>,
    /// RC calibration code found by the LPF bandwidth tuning.
    pub rccal: Option<u8>,
    /// First stage that did not converge. Later stages did not run and the
    /// registers touched so far are left as they are.
    pub failed: Option<CalibrationStage>,
    pub saved: SavedState,
}

impl CalibrationReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_none()
    }
}

/// Runs calibration procedures against one chip.
///
/// Holds the driver mutably for its whole lifetime, so nothing else can touch
/// the chip between the steps of a procedure.
pub struct Calibrator<'a, T, D> {
    lms: &'a mut Lms6002d<T, D>,
    state: CalibrationState,
}

impl<T, D> Lms6002d<T, D>
where
    T: Transport,
    D: DelayNs,
{
    pub fn calibrator(&mut self) -> Calibrator<'_, T, D> {
        Calibrator::new(self)
    }
}

impl<'a, T, D> Calibrator<'a, T, D>
where
    T: Transport,
    D: DelayNs,
{
    pub fn new(lms: &'a mut Lms6002d<T, D>) -> Self {
        Calibrator {
            lms,
            state: CalibrationState::Idle,
        }
    }

    /// State the last DC calibration ended in.
    pub fn state(&self) -> CalibrationState {
        self.state
    }

    /// One DC calibration attempt of channel `addr` starting from `trial`.
    pub fn general_dc_calibration_loop(
        &mut self,
        module: DcCalModule,
        addr: u8,
        trial: u8,
    ) -> Result<DcCalibration, Error<T::Error>> {
        let base = module.base();
        let poll_limit = self.lms.config().dc_poll_limit;
        let settle_us = self.lms.config().dc_settle_us;

        self.state = CalibrationState::Idle;

        self.lms
            .write_bits(base + dccal::CTRL, dccal::ADDR_MASK, addr)?;
        self.lms
            .write_bits(base + dccal::CNTVAL, dccal::CNTVAL_MASK, trial)?;
        self.lms.set_bits(base + dccal::CTRL, dccal::LOAD)?;
        self.lms.clear_bits(base + dccal::CTRL, dccal::LOAD)?;
        self.lms.set_bits(base + dccal::CTRL, dccal::START_CLBR)?;
        self.lms.clear_bits(base + dccal::CTRL, dccal::START_CLBR)?;

        self.state = CalibrationState::Searching;

        let mut result = DcCalibration::Failed { lock: None };
        for _ in 0..poll_limit {
            self.lms.delay.delay_us(settle_us);

            let status = self.lms.read_reg(base + dccal::STATUS)?;
            if status & dccal::CLBR_DONE != 0 {
                continue;
            }

            // an end-of-range lock is final for this attempt, the caller retries
            let lock = (status & dccal::LOCK_MASK) >> dccal::LOCK_SHIFT;
            result = if lock == 0 || lock == dccal::LOCK_MAX {
                DcCalibration::Failed { lock: Some(lock) }
            } else {
                let regval = self
                    .lms
                    .read_shift(base + dccal::REGVAL, dccal::REGVAL_MASK, 0)?;
                DcCalibration::Converged { regval, lock }
            };
            break;
        }

        trace!("DC calibration 0x{:02x}/{} from {}: {:?}", base, addr, trial, result);
        self.state = result.state();
        Ok(result)
    }

    /// DC calibration of one channel, retried once from a different start if
    /// the first search does not settle.
    pub fn general_dc_calibration(
        &mut self,
        module: DcCalModule,
        addr: u8,
    ) -> Result<DcCalibration, Error<T::Error>> {
        let first = self.general_dc_calibration_loop(module, addr, DC_TRIAL_START)?;
        if first.is_converged() {
            return Ok(first);
        }

        debug!("DC calibration 0x{:02x}/{} did not settle, retrying", module.base(), addr);
        let second = self.general_dc_calibration_loop(module, addr, DC_TRIAL_RETRY)?;
        if !second.is_converged() {
            error!("DC calibration 0x{:02x}/{} failed", module.base(), addr);
        }
        Ok(second)
    }

    /// Calibrates the DC reference of the LPF tuning module and copies the
    /// result into both LPF DAC calibration fields.
    pub fn lpf_tuning_dc_calibration(&mut self) -> Result<DcCalibration, Error<T::Error>> {
        let clocks = self.lms.read_reg(CLK_EN)?;
        self.lms.write_reg(CLK_EN, clocks | CLK_EN_LPFCAL)?;

        let result = self.general_dc_calibration(DcCalModule::LpfTuning, 0)?;
        if let Some(dccal) = result.regval() {
            debug!("LPF tuning DCCAL = {}", dccal);
            self.lms.write_field(RX_LPF_DCO_DACCAL, dccal)?;
            self.lms.write_field(TX_LPF_DCO_DACCAL, dccal)?;
        }

        self.lms.write_reg(CLK_EN, clocks)?;
        Ok(result)
    }

    /// Calibrates the I and Q channels of the TX or RX LPF.
    pub fn txrx_lpf_dc_calibration(
        &mut self,
        is_tx: bool,
    ) -> Result<[DcCalibration; LPF_DC_CHANNELS], Error<T::Error>> {
        let (module, clock) = if is_tx {
            (DcCalModule::TxLpf, CLK_EN_TX_LPF_DCCAL)
        } else {
            (DcCalModule::RxLpf, CLK_EN_RX_LPF_DCCAL)
        };
        self.calibrate_channels(module, clock)
    }

    /// Calibrates the DC reference and the four I/Q channels of RX VGA2.
    pub fn rxvga2_dc_calibration(
        &mut self,
    ) -> Result<[DcCalibration; RX_VGA2_DC_CHANNELS], Error<T::Error>> {
        self.calibrate_channels(DcCalModule::RxVga2, CLK_EN_RX_VGA2_DCCAL)
    }

    fn calibrate_channels<const N: usize>(
        &mut self,
        module: DcCalModule,
        clock: u8,
    ) -> Result<[DcCalibration; N], Error<T::Error>> {
        let clocks = self.lms.read_reg(CLK_EN)?;
        self.lms.write_reg(CLK_EN, clocks | clock)?;

        let mut results = [DcCalibration::Failed { lock: None }; N];
        for (addr, result) in results.iter_mut().enumerate() {
            *result = self.general_dc_calibration(module, addr as u8)?;
        }

        self.lms.write_reg(CLK_EN, clocks)?;

        self.state = if all_converged(&results) {
            CalibrationState::Converged
        } else {
            CalibrationState::Failed
        };
        Ok(results)
    }

    /// Runs the RC calibration of the LPFs using the TX PLL as clock source
    /// and programs `bandwidth_code` into both LPFs.
    ///
    /// Codes outside the width table select 14 MHz. Leaves the TX PLL at the
    /// calibration frequency. Returns RCCAL.
    pub fn lpf_bandwidth_tuning(
        &mut self,
        ref_clock_hz: u32,
        bandwidth_code: u8,
    ) -> Result<u8, Error<T::Error>> {
        let bandwidth_code = lpf_width_to_code(lpf_code_to_width(bandwidth_code));

        let soft_ctrl = self.lms.read_reg(SOFT_CTRL)?;
        let clocks = self.lms.read_reg(CLK_EN)?;

        self.lms.tx_enable()?;
        let calibration_hz = self.lms.config().pll_calibration_hz;
        if let Err(err) = self.lms.tx_pll_tune(ref_clock_hz, calibration_hz) {
            if !matches!(err, Error::Bus(_)) {
                self.lms.write_reg(SOFT_CTRL, soft_ctrl)?;
                self.lms.write_reg(CLK_EN, clocks)?;
            }
            return Err(err);
        }
        self.lms.set_bits(CLK_EN, CLK_EN_LPFCAL)?;

        self.lms.clear_bits(LPFCAL_CTRL, LPFCAL_CLKSEL | LPFCAL_PD_CLK)?;
        self.lms.write_field(BWC_LPFCAL, bandwidth_code)?;
        self.lms.set_bits(LPFCAL_BWC, LPFCAL_EN)?;

        let reset_us = self.lms.config().lpfcal_reset_us;
        self.lms.set_bits(LPFCAL_CTRL, LPFCAL_RST)?;
        self.lms.delay.delay_us(reset_us);
        self.lms.clear_bits(LPFCAL_CTRL, LPFCAL_RST)?;

        let rccal = self.lms.read_field(RCCAL_LPFCAL)?;
        debug!("LPF bandwidth code {}: RCCAL = {}", bandwidth_code, rccal);
        self.lms.write_field(RX_LPF_RCCAL_LPF, rccal)?;
        self.lms.write_field(TX_LPF_RCCAL_LPF, rccal)?;
        self.lms.write_field(TX_LPF_BWC, bandwidth_code)?;
        self.lms.write_field(RX_LPF_BWC, bandwidth_code)?;

        self.lms.clear_bits(LPFCAL_BWC, LPFCAL_EN)?;
        self.lms.set_bits(LPFCAL_CTRL, LPFCAL_PD_CLK)?;

        self.lms.write_reg(SOFT_CTRL, soft_ctrl)?;
        self.lms.write_reg(CLK_EN, clocks)?;
        Ok(rccal)
    }

    /// Full calibration sequence.
    ///
    /// Stops at the first stage that does not converge and reports it; a bus
    /// error is returned as `Err` immediately. Only a complete run puts the
    /// PLLs, gains and LNA back the way they were.
    ///
    /// The TX and RX enables are left alone: enable both paths before the
    /// call, as the LPF bandwidth stage runs off the TX PLL. The receiver is
    /// parked on LNA 1 with the LNAs powered down. Keeping the transmitter
    /// silent and the antenna disconnected is up to the caller.
    pub fn auto_calibration(
        &mut self,
        ref_clock_hz: u32,
        bandwidth_code: u8,
    ) -> Result<CalibrationReport, Error<T::Error>> {
        let mut saved = SavedState::capture(self.lms)?;

        self.lms.set_rx_lna(QUIET_LNA)?;
        self.lms.set_rx_lna_power(false)?;

        let config = *self.lms.config();
        self.lms.set_rx_vga2gain(config.rx_vga2_calibration_gain)?;
        let tx_vga1_gain = self.lms.get_tx_vga1gain()?;
        if tx_vga1_gain > config.tx_vga1_gain_limit {
            self.lms.set_tx_vga1gain(config.safe_tx_vga1_gain)?;
            saved.tx_vga1_gain = Some(tx_vga1_gain);
        }

        let mut report = CalibrationReport {
            dccal: None,
            rccal: None,
            failed: None,
            saved,
        };

        info!("LMS6002D auto calibration, bandwidth code {}", bandwidth_code);

        let dc = self.lpf_tuning_dc_calibration()?;
        report.dccal = dc.regval();
        if !dc.is_converged() {
            return Ok(fail(report, CalibrationStage::LpfTuningDc));
        }

        match self.lpf_bandwidth_tuning(ref_clock_hz, bandwidth_code) {
            Ok(rccal) => report.rccal = Some(rccal),
            Err(Error::Bus(err)) => return Err(Error::Bus(err)),
            Err(_) => return Ok(fail(report, CalibrationStage::LpfBandwidth)),
        }

        if !all_converged(&self.txrx_lpf_dc_calibration(true)?) {
            return Ok(fail(report, CalibrationStage::TxLpfDc));
        }
        if !all_converged(&self.txrx_lpf_dc_calibration(false)?) {
            return Ok(fail(report, CalibrationStage::RxLpfDc));
        }
        if !all_converged(&self.rxvga2_dc_calibration()?) {
            return Ok(fail(report, CalibrationStage::RxVga2Dc));
        }

        report.saved.restore(self.lms)?;
        info!("LMS6002D auto calibration done");
        Ok(report)
    }
}

fn all_converged(results: &[DcCalibration]) -> bool {
    results.iter().all(DcCalibration::is_converged)
}

fn fail(mut report: CalibrationReport, stage: CalibrationStage) -> CalibrationReport {
    error!("LMS6002D auto calibration failed at {:?}", stage);
    report.failed = Some(stage);
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::sim::RegisterFile;

    use embedded_hal_mock::eh1::delay::{CheckedDelay, NoopDelay, Transaction as DelayTransaction};

    #[test]
    fn test_loop_converges_on_mid_scale_lock() {
        let mut file = RegisterFile::new();
        file.poke(0x51, 3 << 2);
        file.poke(0x50, 0xE5);
        let mut lms = Lms6002d::new(file, NoopDelay::new());
        let mut calibrator = lms.calibrator();

        let result = calibrator
            .general_dc_calibration_loop(DcCalModule::RxLpf, 1, DC_TRIAL_START)
            .unwrap();

        assert_eq!(result, DcCalibration::Converged { regval: 0x25, lock: 3 });
        assert_eq!(calibrator.state(), CalibrationState::Converged);
        assert_eq!(lms.transport.peek(0x52), 31);
        assert_eq!(lms.transport.peek(0x53), 0x01);
    }

    #[test]
    fn test_loop_polls_until_done_clears() {
        let mut file = RegisterFile::new();
        file.poke(0x31, (2 << 2) | dccal::CLBR_DONE);
        let delay_expectations = [
            DelayTransaction::blocking_delay_us(7),
            DelayTransaction::blocking_delay_us(7),
            DelayTransaction::blocking_delay_us(7),
        ];
        let mut lms = Lms6002d::new(file, CheckedDelay::new(&delay_expectations));
        lms.set_config(crate::settings::CalibrationConfig {
            dc_poll_limit: 3,
            ..Default::default()
        });

        let result = lms
            .calibrator()
            .general_dc_calibration_loop(DcCalModule::TxLpf, 0, DC_TRIAL_START)
            .unwrap();

        assert_eq!(result, DcCalibration::Failed { lock: None });
        lms.delay.done();
    }

    #[test]
    fn test_ambiguous_lock_is_retried_then_fails() {
        let mut file = RegisterFile::new();
        file.poke(0x61, dccal::LOCK_MASK);
        let mut lms = Lms6002d::new(file, NoopDelay::new());
        let mut calibrator = lms.calibrator();

        let result = calibrator.general_dc_calibration(DcCalModule::RxVga2, 4).unwrap();

        assert_eq!(result, DcCalibration::Failed { lock: Some(7) });
        assert_eq!(calibrator.state(), CalibrationState::Failed);
        // the retry starts from the other end
        assert_eq!(lms.transport.peek(0x62), DC_TRIAL_RETRY);
    }

    #[test]
    fn test_lpf_tuning_copies_dccal_and_restores_clocks() {
        let mut file = RegisterFile::new();
        file.poke(0x01, 0xE0 | (4 << 2));
        file.poke(0x00, 0x17);
        file.poke(0x09, 0x81);
        file.poke(0x35, 0xC0);
        let mut lms = Lms6002d::new(file, NoopDelay::new());

        let result = lms.calibrator().lpf_tuning_dc_calibration().unwrap();

        assert_eq!(result.regval(), Some(0x17));
        assert_eq!(lms.transport.peek(0x55), 0x17);
        assert_eq!(lms.transport.peek(0x35), 0xD7);
        assert_eq!(lms.transport.peek(0x09), 0x81);
    }

    #[test]
    fn test_bandwidth_tuning_writes_rccal_and_codes() {
        let mut file = RegisterFile::new();
        file.poke(0x01, 5 << 5);
        file.poke(0x05, 0x32);
        file.poke(0x06, 0x0D);
        file.poke(0x34, 0x02);
        file.poke(0x54, 0x02);
        let mut lms = Lms6002d::new(file, NoopDelay::new());

        let rccal = lms.calibrator().lpf_bandwidth_tuning(26_000_000, 9).unwrap();

        assert_eq!(rccal, 5);
        assert_eq!(lms.transport.peek(0x36), 5 << 4);
        assert_eq!(lms.transport.peek(0x56), 5 << 4);
        assert_eq!(lms.transport.peek(0x34), (9 << 2) | 0x02);
        assert_eq!(lms.transport.peek(0x54), (9 << 2) | 0x02);
        assert_eq!(lms.transport.peek(0x07), 9);
        assert_eq!(lms.transport.peek(0x06), 0x04);
        assert_eq!(lms.transport.peek(0x05), 0x32);
        assert_eq!(lms.transport.peek(0x09), 0x00);
        // TX PLL stays at 320 MHz
        assert_eq!(lms.transport.peek(0x15) >> 2, 0x2F);
    }

    #[test]
    fn test_bandwidth_tuning_unknown_code_selects_14mhz() {
        let mut file = RegisterFile::new();
        file.poke(0x05, 0x32);
        file.poke(0x06, 0x0D);
        file.poke(0x07, 0x0B);
        file.poke(0x34, 0x02);
        file.poke(0x54, 0x02);
        let mut lms = Lms6002d::new(file, NoopDelay::new());

        lms.calibrator().lpf_bandwidth_tuning(26_000_000, 17).unwrap();

        assert_eq!(lms.transport.peek(0x34), 0x02);
        assert_eq!(lms.transport.peek(0x54), 0x02);
        assert_eq!(lms.transport.peek(0x07) & 0x0F, 0);
        assert_eq!(lms.get_tx_lpf().unwrap(), 14000);
    }

    #[test]
    fn test_bandwidth_tuning_bad_reference_restores_enables() {
        let mut file = RegisterFile::new();
        file.poke(0x05, 0x32);
        let mut lms = Lms6002d::new(file, NoopDelay::new());

        assert_eq!(
            lms.calibrator().lpf_bandwidth_tuning(0, 3),
            Err(Error::ReferenceClock(0))
        );
        assert_eq!(lms.transport.peek(0x05), 0x32);
        assert_eq!(lms.transport.peek(0x09), 0x00);
    }
}
