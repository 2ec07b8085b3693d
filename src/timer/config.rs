use fugit::{HertzU32, MillisDurationU32};

use crate::error::{Error, Result};

/// Counter tick rate used by [`TimerConfig::from_period`]
const TICK_HZ: u32 = 1_000;

/// Prescaler and auto-reload pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    prescaler: u16,
    auto_reload: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::HSI_ONE_SECOND
    }
}

impl TimerConfig {
    /// 1 kHz tick from the 16 MHz HSI with ARR = 1000, so an update every
    /// 1001 ticks (1.001 s). [`TimerConfig::from_period`] gives ARR = 999 for
    /// an exact second.
    pub const HSI_ONE_SECOND: TimerConfig = TimerConfig {
        prescaler: 15_999,
        auto_reload: 1_000,
    };

    /// The counter runs at `clock / (prescaler + 1)` and wraps after
    /// `auto_reload + 1` ticks.
    pub const fn new(prescaler: u32, auto_reload: u32) -> Result<Self> {
        if prescaler > u16::MAX as u32 {
            return Err(Error::PrescalerOutOfRange(prescaler));
        }
        Ok(TimerConfig {
            prescaler: prescaler as u16,
            auto_reload,
        })
    }

    /// Millisecond tick with an update event every `period`.
    pub fn from_period(period: MillisDurationU32, clock: HertzU32) -> Result<Self> {
        let prescaler = (clock.raw() / TICK_HZ).saturating_sub(1);
        let auto_reload = period.ticks().saturating_sub(1);
        TimerConfig::new(prescaler, auto_reload)
    }

    pub const fn prescaler(&self) -> u16 {
        self.prescaler
    }

    pub const fn auto_reload(&self) -> u32 {
        self.auto_reload
    }
}
