//! Arcade Panel Firmware: Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  HardwareAdapter              LogEventSink   SerialPort      │
//! │  (Display + Relay + Delay)    (EventSink)    (UART0 lines)   │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ───────────────────     │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │        CommandInterpreter (pure logic)             │      │
//! │  │  readiness · joystick slots · screens              │      │
//! │  └────────────────────────────────────────────────────┘      │
//! │                                                              │
//! │  StatusIndicator thread (APP core) ◀── StatusCell (atomic)   │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use anyhow::{Context, Result, anyhow};
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyIOPin, AnyInputPin, AnyOutputPin, Output, PinDriver};
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::prelude::*;
use esp_idf_hal::uart::{UartDriver, config::Config as UartConfig};
use log::{info, warn};
use ssd1306::{I2CDisplayInterface, Ssd1306, prelude::*};

use arcadepanel::adapters::hardware::HardwareAdapter;
use arcadepanel::adapters::log_sink::LogEventSink;
use arcadepanel::adapters::serial::{SerialPort, UartTransport};
use arcadepanel::adapters::time::{ThreadDelay, Uptime};
use arcadepanel::app::CommandInterpreter;
use arcadepanel::app::interpreter::BOOT_BANNER;
use arcadepanel::config::PanelConfig;
use arcadepanel::display::{GraphicsSurface, NoAssets};
use arcadepanel::drivers::power::PanelPower;
use arcadepanel::drivers::relay::{RELAY_COUNT, RelayBank};
use arcadepanel::drivers::status_led::{LedStatus, StatusCell, StatusIndicator};
use arcadepanel::error::{DisplayError, Error, SerialError};
use arcadepanel::pins::{BOARD, OLED_I2C_ADDR, UART_BAUD};

type OutputDriver = PinDriver<'static, AnyOutputPin, Output>;

/// Claim a GPIO from the board pin map as a push-pull output.
fn output_pin(gpio: i32) -> Result<OutputDriver> {
    // SAFETY: pin numbers come from `pins::BOARD`, whose assignments are
    // checked for duplicates, and none of them is taken from `Peripherals`.
    let pin = unsafe { AnyOutputPin::new(gpio) };
    PinDriver::output(pin).with_context(|| format!("GPIO{gpio} as output"))
}

fn send(serial: &mut SerialPort<UartTransport>, reply: &str) {
    if let Err(e) = serial.write_line(reply) {
        warn!("reply {:?} not sent: {}", reply, Error::from(e));
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;
    let uptime = Uptime::new();

    info!("╔══════════════════════════════════════╗");
    info!("║  Arcade Panel v{}                  ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");
    info!("Board: {}", BOARD.name);

    let config = PanelConfig::load().context("panel config")?;
    info!("Config: {:?}", config);

    let peripherals = Peripherals::take()?;

    // ── 2. Host serial ────────────────────────────────────────
    // SAFETY: UART pins come from the board map and are not used elsewhere.
    let (tx, rx) = unsafe { (AnyOutputPin::new(BOARD.uart_tx), AnyInputPin::new(BOARD.uart_rx)) };
    let uart = UartDriver::new(
        peripherals.uart0,
        tx,
        rx,
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &UartConfig::default().baudrate(Hertz(UART_BAUD)),
    )
    .context("UART0 init")?;
    let mut serial = SerialPort::new(UartTransport(uart));
    send(&mut serial, BOOT_BANNER);

    // ── 3. Status indicator ───────────────────────────────────
    let status = StatusCell::new(LedStatus::Off);
    let _indicator = if BOARD.relays.contains(&BOARD.status_led) {
        warn!(
            "Status LED GPIO{} is also a relay output, indicator disabled",
            BOARD.status_led
        );
        None
    } else {
        let led = StatusIndicator::new(output_pin(BOARD.status_led)?, status.clone());
        Some(led.spawn(ThreadDelay).context("status LED thread")?)
    };

    // ── 4. Panel power + OLED ─────────────────────────────────
    let mut power = PanelPower::new(
        BOARD.vext.map(output_pin).transpose()?,
        BOARD.oled_reset.map(output_pin).transpose()?,
    );
    power.power_on(config.power_settle_ms, &mut FreeRtos)?;
    power.reset_oled(&mut FreeRtos)?;

    // SAFETY: I2C pins come from the board map and are not used elsewhere.
    let (sda, scl) = unsafe { (AnyIOPin::new(BOARD.i2c_sda), AnyIOPin::new(BOARD.i2c_scl)) };
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        sda,
        scl,
        &I2cConfig::new().baudrate(500.kHz().into()),
    )
    .context("I2C0 init")?;
    let interface = I2CDisplayInterface::new_custom_address(i2c, OLED_I2C_ADDR);
    let mut oled = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    oled.init()
        .map_err(|_| Error::from(DisplayError::InitFailed))
        .context("SSD1306 init")?;
    info!("OLED up at 0x{:02X}", OLED_I2C_ADDR);

    // ── 5. Relays ─────────────────────────────────────────────
    let relay_pins: Vec<OutputDriver> = BOARD
        .relays
        .iter()
        .map(|&gpio| output_pin(gpio))
        .collect::<Result<_>>()?;
    let relay_pins: [OutputDriver; RELAY_COUNT] = relay_pins
        .try_into()
        .map_err(|_| anyhow!("board map must list {} relays", RELAY_COUNT))?;
    let relays = RelayBank::new(relay_pins, &config);

    // ── 6. Boot sequence ──────────────────────────────────────
    let mut hw = HardwareAdapter::new(GraphicsSurface::new(oled, NoAssets), relays, FreeRtos);
    let mut sink = LogEventSink::new();
    let mut interpreter = CommandInterpreter::new(config.clone(), status);
    interpreter.boot(&mut hw, &mut sink);
    info!("Boot complete after {} ms. Waiting for host.", uptime.millis());

    // ── 7. Command loop ───────────────────────────────────────
    loop {
        match serial.poll_line() {
            Ok(Some(line)) => {
                let reply = interpreter.handle_line(&line, &mut hw, &mut sink);
                send(&mut serial, &reply);
            }
            Ok(None) => FreeRtos::delay_ms(config.serial_poll_ms),
            Err(SerialError::LineTooLong) => {
                let reply = interpreter.overflow(&mut sink);
                send(&mut serial, &reply);
            }
            Err(e) => {
                warn!("{}", Error::from(e));
                FreeRtos::delay_ms(config.serial_poll_ms);
            }
        }
    }
}
