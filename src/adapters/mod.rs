//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter         | Implements          | Connects to               |
//! |-----------------|---------------------|---------------------------|
//! | `hardware`      | IoPort              | Button, LED PWM, pot ADC  |
//! | `nvs`           | ConfigPort          | NVS / in-memory store     |
//! |                 | StoragePort         |                           |
//! | `user_id_store` | IdentityPort        | any StoragePort           |
//! | `time`          | ClockPort           | ESP32 system timer        |
//! | `serial`        | Transport           | UART0 (ESP-IDF only)      |

pub mod hardware;
pub mod nvs;
#[cfg(target_os = "espidf")]
pub mod serial;
pub mod time;
pub mod user_id_store;
pub(crate) mod utils;
