//! Ninho Firmware — Main Entry Point
//!
//! Single-threaded polling loop over hexagonal ports.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter   SerialLink<Uart>   UserIdStore   Esp32Time  │
//! │  (IoPort)          (LineSink)         (Identity)    (Clock)    │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              Dispatcher (pure logic)                   │    │
//! │  │  protocol · MissionEngine · telemetry timer            │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Result, anyhow};
use log::{info, warn};

use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{Gpio0, PinDriver, Pull};
use esp_idf_hal::ledc::config::TimerConfig;
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::uart::{UartDriver, config::Config as UartConfig};
use esp_idf_hal::units::Hertz;

use ninho::adapters::hardware::HardwareAdapter;
use ninho::adapters::nvs::NvsAdapter;
use ninho::adapters::serial::UartTransport;
use ninho::adapters::time::Esp32TimeAdapter;
use ninho::adapters::user_id_store::UserIdStore;
use ninho::app::dispatcher::Dispatcher;
use ninho::app::ports::{ClockPort, ConfigPort, IdentityPort};
use ninho::config::{LOOP_PERIOD_MS, SystemConfig};
use ninho::drivers::button::Button;
use ninho::drivers::led::Led;
use ninho::drivers::potentiometer::{OneshotAdc, Potentiometer};
use ninho::pins;
use ninho::protocol::transport::SerialLink;
use ninho::version::{FIRMWARE_BUILD, FIRMWARE_DATE, FIRMWARE_VERSION};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!(
        "Ninho firmware v{} (build {}, {})",
        FIRMWARE_VERSION, FIRMWARE_BUILD, FIRMWARE_DATE
    );

    // ── 2. Load config and identity from NVS ──────────────────
    let nvs = NvsAdapter::new().map_err(|e| anyhow!("NVS init failed: {}", e))?;
    let config = match nvs.load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("NVS config load failed ({}), using defaults", e);
            SystemConfig::default()
        }
    };
    let identity = UserIdStore::load(nvs);
    if !identity.has_user_id() {
        info!("No user id yet; waiting for SET_ID");
    }

    // ── 3. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;

    let resolution = match pins::PWM_RESOLUTION_BITS {
        8 => Resolution::Bits8,
        10 => Resolution::Bits10,
        12 => Resolution::Bits12,
        bits => return Err(anyhow!("unsupported LEDC resolution: {} bits", bits)),
    };
    let led_timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &TimerConfig::new()
            .frequency(Hertz(pins::LED_PWM_FREQ_HZ))
            .resolution(resolution),
    )?;
    let led_pwm = LedcDriver::new(peripherals.ledc.channel0, &led_timer, peripherals.pins.gpio2)?;
    let led = Led::new(led_pwm).map_err(|e| anyhow!("LED init failed: {}", e))?;

    let mut button_pin = PinDriver::input(peripherals.pins.gpio4)?;
    button_pin.set_pull(Pull::Down)?;

    let adc = OneshotAdc::new(pins::POT_ADC1_CHANNEL)
        .map_err(|rc| anyhow!("ADC init failed (rc={})", rc))?;

    let mut hw = HardwareAdapter::new(Button::new(button_pin), led, Potentiometer::new(adc));
    info!(
        "Pins: LED=GPIO{} button=GPIO{} pot=GPIO{}",
        pins::LED_GPIO,
        pins::BUTTON_GPIO,
        pins::POT_GPIO
    );

    let uart = UartDriver::new(
        peripherals.uart0,
        peripherals.pins.gpio1,
        peripherals.pins.gpio3,
        Option::<Gpio0>::None,
        Option::<Gpio0>::None,
        &UartConfig::default().baudrate(Hertz(config.uart_baud)),
    )?;
    let mut link = SerialLink::new(UartTransport::new(uart));
    info!("UART0 ready at {} baud", config.uart_baud);

    // ── 4. Main loop ──────────────────────────────────────────
    let clock = Esp32TimeAdapter::new();
    let mut dispatcher = Dispatcher::new(identity, config.error_policy);
    info!("Entering main loop (error policy {:?})", config.error_policy);

    loop {
        let line = link.poll_line();
        dispatcher.poll(clock.now_ms(), line.as_deref(), &mut hw, &mut link);
        FreeRtos::delay_ms(LOOP_PERIOD_MS);
    }
}
