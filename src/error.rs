/// Errors returned by the driver.
///
/// `E` is the error type of the underlying [`Transport`](crate::transport::Transport).
/// Out-of-domain gain, bandwidth and frequency inputs are never reported here:
/// they are clamped and logged instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The control bus failed. Never retried by this crate.
    Bus(E),
    /// The version register did not identify an LMS6002D.
    UnknownChip(u8),
    /// No valid 9-bit integer divider exists for this reference clock.
    ReferenceClock(u32),
    /// The VCO capacitor sweep did not find a usable window.
    VcoCapNotFound,
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Error::Bus(err)
    }
}
