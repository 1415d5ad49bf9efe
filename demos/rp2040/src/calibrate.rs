#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::{gpio, peripherals::SPI0, spi::{self, Spi}};
use embassy_time::{Delay, Duration, Timer};
use gpio::{Level, Output};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use embassy_embedded_hal::shared_bus::blocking::spi::SpiDevice;

use lms6002d_rs::{Lms6002d, SpiTransport};
use embassy_sync::blocking_mutex::{raw::NoopRawMutex, Mutex};

const REF_CLOCK: u32 = 26_000_000;
// 1.92 MHz, see lms6002d_rs::bandwidth::LPF_WIDTHS_KHZ
const BANDWIDTH_CODE: u8 = 10;

type Spi0Bus = Mutex<NoopRawMutex, RefCell<Spi<'static, SPI0, spi::Blocking>>>;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    let delay = Delay;

    let miso = p.PIN_16;
    let mosi = p.PIN_19;
    let clk = p.PIN_18;
    let cs_pin = p.PIN_17;

    let lms_cs = Output::new(cs_pin, Level::High);

    // SPI mode 0, MSB first
    let mut config = spi::Config::default();
    config.frequency = 1_000_000;
    config.phase = spi::Phase::CaptureOnFirstTransition;
    config.polarity = spi::Polarity::IdleLow;

    let spi = Spi::new_blocking(p.SPI0, clk, mosi, miso, config);

    let spi_ref = RefCell::new(spi);

    static SPI_BUS: StaticCell<Spi0Bus> = StaticCell::new();
    let spi_bus = SPI_BUS.init(Mutex::new(spi_ref));

    let spi_device = SpiDevice::new(spi_bus, lms_cs);

    let mut lms = Lms6002d::new(SpiTransport::new(spi_device), delay);

    unwrap!(lms.init());
    info!("LMS6002D version 0x{:02x}", unwrap!(lms.read_version()));

    unwrap!(lms.tx_enable());
    unwrap!(lms.rx_enable());

    let report = unwrap!(lms.calibrator().auto_calibration(REF_CLOCK, BANDWIDTH_CODE));
    if report.is_success() {
        info!("calibrated: DCCAL={} RCCAL={}", report.dccal, report.rccal);
    } else {
        warn!("calibration stopped at {}", report.failed);
        unwrap!(report.saved.restore(&mut lms));
    }

    let tx = unwrap!(lms.tx_pll_tune(REF_CLOCK, 925_000_000));
    let rx = unwrap!(lms.rx_pll_tune(REF_CLOCK, 880_000_000));
    info!("TX LO {} Hz, RX LO {} Hz", tx.achieved_hz, rx.achieved_hz);

    unwrap!(lms.dump());

    loop {
        Timer::after(Duration::from_millis(1000)).await;
    }
}
