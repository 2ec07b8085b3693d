use bitfield::bitfield;
use fugit::{HertzU32, MicrosDurationU32};

use crate::error::{Error, Result};
use crate::pac::SYSTICK;
use crate::pac::systick::RegisterBlock;

/// Largest value RVR holds
pub const MAX_RELOAD: u32 = 0x00FF_FFFF;

bitfield! {
    /// Control and status register
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct Csr(u32);
    impl Debug;
    /// Counter enabled
    pub enable, set_enable: 0;
    /// Exception request on count to zero
    pub tickint, set_tickint: 1;
    /// Processor clock when set, HCLK/8 otherwise
    pub clksource, set_clksource: 2;
    /// Counted to zero since last read. Reading CSR clears it.
    pub countflag, _: 16;
}

bitfield! {
    /// Calibration value register
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct Calibration(u32);
    impl Debug;
    /// Reload value for a 10 ms period, zero when unknown
    pub u32, tenms, _: 23, 0;
    /// TENMS is not exact
    pub skew, _: 30;
    /// No reference clock provided
    pub noref, _: 31;
}

/// Extension trait for SysTick
pub trait SysTickExt {
    fn constrain(self) -> SysTick<'static>;
}

impl SysTickExt for SYSTICK {
    fn constrain(self) -> SysTick<'static> {
        SysTick::new(self.registers())
    }
}

/// Counter clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSource {
    /// HCLK / 8
    External = 0,
    /// HCLK
    Processor = 1,
}

impl ClockSource {
    /// Counter frequency for a given HCLK.
    pub fn frequency(self, hclk: HertzU32) -> HertzU32 {
        match self {
            ClockSource::External => hclk / 8,
            ClockSource::Processor => hclk,
        }
    }
}

/// Whether reaching zero raises the SysTick exception
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickInterrupt {
    Disabled,
    Enabled,
}

/// Validated 24-bit reload value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reload(u32);

impl Reload {
    /// One second with the processor clock running from HSI
    pub const HSI_ONE_SECOND: Reload = Reload(16_000_000 - 1);

    /// A reload of zero never fires, so the range starts at one.
    pub const fn new(value: u32) -> Result<Self> {
        if value == 0 || value > MAX_RELOAD {
            return Err(Error::ReloadOutOfRange(value));
        }
        Ok(Reload(value))
    }

    /// Reload value giving `period` with the counter running at `clock`.
    pub fn from_period(period: MicrosDurationU32, clock: HertzU32) -> Result<Self> {
        let ticks = clock.raw() as u64 * period.ticks() as u64 / 1_000_000;
        let reload = u32::try_from(ticks.saturating_sub(1)).unwrap_or(u32::MAX);
        Reload::new(reload)
    }

    pub const fn value(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Reload {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        Reload::new(value)
    }
}

/// Constrained SysTick timer
pub struct SysTick<'a> {
    rb: &'a RegisterBlock,
}

impl<'a> SysTick<'a> {
    pub(crate) fn new(rb: &'a RegisterBlock) -> Self {
        SysTick { rb }
    }

    /// Load `reload`, select the clock and the exception, and start counting.
    pub fn init(&self, reload: Reload, source: ClockSource, interrupt: TickInterrupt) {
        trace!("systick: reload {} {:?} {:?}", reload.value(), source, interrupt);
        self.set_timer(reload);

        critical_section::with(|_| {
            let mut csr = Csr(self.rb.csr.read());
            csr.set_clksource(source == ClockSource::Processor);
            csr.set_tickint(interrupt == TickInterrupt::Enabled);
            csr.set_enable(true);
            self.rb.csr.write(csr.0);
        });
    }

    /// Load a new reload value and restart the count from the top.
    pub fn set_timer(&self, reload: Reload) {
        self.rb.rvr.write(reload.value());
        // Any write clears CVR and COUNTFLAG.
        self.rb.cvr.write(0);
    }

    /// Stop counting. Reload and clock selection are kept.
    pub fn stop(&self) {
        critical_section::with(|_| {
            let mut csr = Csr(self.rb.csr.read());
            csr.set_enable(false);
            csr.set_tickint(false);
            self.rb.csr.write(csr.0);
        });
    }

    pub fn csr(&self) -> Csr {
        Csr(self.rb.csr.read())
    }

    pub fn is_running(&self) -> bool {
        self.csr().enable()
    }

    /// True once per wrap to zero; the read clears the flag.
    pub fn has_wrapped(&self) -> bool {
        self.csr().countflag()
    }

    pub fn current(&self) -> u32 {
        self.rb.cvr.read() & MAX_RELOAD
    }

    pub fn reload(&self) -> u32 {
        self.rb.rvr.read() & MAX_RELOAD
    }

    pub fn calibration(&self) -> Calibration {
        Calibration(self.rb.calib.read())
    }
}
