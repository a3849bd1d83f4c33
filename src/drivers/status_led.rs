//! Single-GPIO status indicator.
//!
//! A background thread loops over a short timed pattern selected by the
//! shared [`StatusCell`]. The command loop only ever stores a new
//! [`LedStatus`]; the indicator picks it up at the start of its next cycle.
//!
//! | Status  | Pattern                     |
//! |---------|-----------------------------|
//! | Off     | low 100 ms                  |
//! | Ready   | high 100 ms                 |
//! | Waiting | high 200 ms, low 1000 ms    |
//! | Config  | high 25 ms, low 100 ms      |

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::thread::JoinHandle;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::{info, warn};

use super::task_pin::{Core, spawn_on_core};
use crate::error::Error;

/// What the indicator is currently signalling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LedStatus {
    Off = 0,
    Ready = 1,
    Waiting = 2,
    Config = 3,
}

/// One level held for a fixed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternStep {
    pub high: bool,
    pub hold_ms: u32,
}

const fn step(high: bool, hold_ms: u32) -> PatternStep {
    PatternStep { high, hold_ms }
}

const OFF: [PatternStep; 1] = [step(false, 100)];
const READY: [PatternStep; 1] = [step(true, 100)];
const WAITING: [PatternStep; 2] = [step(true, 200), step(false, 1000)];
const CONFIG: [PatternStep; 2] = [step(true, 25), step(false, 100)];

impl LedStatus {
    /// The steps of one pattern cycle.
    pub const fn pattern(self) -> &'static [PatternStep] {
        match self {
            Self::Off => &OFF,
            Self::Ready => &READY,
            Self::Waiting => &WAITING,
            Self::Config => &CONFIG,
        }
    }

    /// Total duration of one cycle.
    pub fn cycle_ms(self) -> u32 {
        self.pattern().iter().map(|s| s.hold_ms).sum()
    }

    const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Ready,
            2 => Self::Waiting,
            3 => Self::Config,
            _ => Self::Off,
        }
    }
}

// ── Shared status cell ────────────────────────────────────────

/// Lock-free status shared between the command loop (writer) and the
/// indicator thread (reader). Cloning shares the same cell.
#[derive(Debug, Clone)]
pub struct StatusCell(Arc<AtomicU8>);

impl StatusCell {
    pub fn new(initial: LedStatus) -> Self {
        Self(Arc::new(AtomicU8::new(initial as u8)))
    }

    pub fn set(&self, status: LedStatus) {
        self.0.store(status as u8, Ordering::Release);
    }

    pub fn get(&self) -> LedStatus {
        LedStatus::from_u8(self.0.load(Ordering::Acquire))
    }
}

impl Default for StatusCell {
    fn default() -> Self {
        Self::new(LedStatus::Off)
    }
}

// ── Indicator ─────────────────────────────────────────────────

pub struct StatusIndicator<P> {
    pin: P,
    status: StatusCell,
}

impl<P: OutputPin> StatusIndicator<P> {
    pub fn new(pin: P, status: StatusCell) -> Self {
        Self { pin, status }
    }

    fn drive(&mut self, high: bool) {
        let res = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if res.is_err() {
            warn!("{}", Error::Gpio("status LED write failed"));
        }
    }

    /// Run one full pattern cycle for the current status and return the
    /// status that was shown.
    pub fn run_cycle(&mut self, delay: &mut impl DelayNs) -> LedStatus {
        let status = self.status.get();
        for step in status.pattern() {
            self.drive(step.high);
            delay.delay_ms(step.hold_ms);
        }
        status
    }

    /// Move the indicator onto its own thread on the application core.
    pub fn spawn<D>(mut self, mut delay: D) -> io::Result<IndicatorHandle>
    where
        P: Send + 'static,
        D: DelayNs + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let thread = spawn_on_core(Core::App, 1, 4, "status-led\0", move || {
            while !stop_flag.load(Ordering::Acquire) {
                self.run_cycle(&mut delay);
            }
            self.drive(false);
            info!("status LED stopped");
        })?;
        Ok(IndicatorHandle {
            stop,
            thread: Some(thread),
        })
    }
}

/// Owner-side handle to a running indicator.
pub struct IndicatorHandle {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl IndicatorHandle {
    /// Ask the indicator to stop at the next cycle boundary and wait for it.
    /// The pin is left low.
    pub fn stop(mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("status LED thread panicked");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }
}
