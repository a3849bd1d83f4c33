//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements                   | Connects to               |
//! |-------------|------------------------------|---------------------------|
//! | `hardware`  | DisplaySurface, RelayPort,   | SSD1306 OLED, relay GPIOs |
//! |             | DelayPort                    |                           |
//! | `log_sink`  | EventSink                    | Serial log output         |
//! | `serial`    | (line framing)               | UART0 host link           |
//! | `time`      | `DelayNs`                    | FreeRTOS / std sleep      |

pub mod hardware;
pub mod log_sink;
pub mod serial;
pub mod time;
