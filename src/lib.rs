//! Control and calibration driver for the Lime Microsystems LMS6002D transceiver.

#![cfg_attr(not(test), no_std)]

// This must go first so the logging macros are visible to the other modules.
#[macro_use]
mod fmt;

pub mod bandwidth;
pub mod calibration;
pub mod error;
pub mod gain;
pub mod lms6002d;
pub mod pll;
pub mod registers;
pub mod settings;
pub mod shared;
pub mod sim;
pub mod transport;


pub use calibration::{
    CalibrationReport, CalibrationStage, CalibrationState, Calibrator, DcCalibration, SavedState,
};
pub use error::Error;
pub use gain::{
    RX_LNA_MAX, RX_VGA2_GAIN_MAX, RX_VGA2_GAIN_MIN, TX_PA_MAX, TX_VGA1_GAIN_MAX, TX_VGA1_GAIN_MIN,
    TX_VGA2_GAIN_MAX, TX_VGA2_GAIN_MIN,
};
pub use lms6002d::{Lms6002d, RegisterDump};
pub use pll::{PllSettings, PllTuning};
pub use registers::{DcCalModule, PllBlock};
pub use settings::CalibrationConfig;
pub use shared::SharedLms6002d;
pub use transport::{SpiTransport, Transport};
