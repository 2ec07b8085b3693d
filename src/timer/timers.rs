use super::TimerConfig;
use crate::error::{Error, Result};
use crate::nvic::Nvic;
use crate::pac::tim::RegisterBlock;
use crate::pac::{Interrupt, TIM2, TIM3, TIM4, TIM5};
use crate::rcc::{PeripheralClock, Rcc};

const CR1_CEN: u32 = 0;
const CR1_URS: u32 = 2;
const DIER_UIE: u32 = 0;
const SR_UIF: u32 = 0;
const EGR_UG: u32 = 0;

pub trait TimerExt {
    /// Enables and resets the timer clock and wraps the register block.
    fn constrain(self, rcc: &Rcc) -> Timer<'static>
    where
        Self: Sized;
}

/// General-purpose timer instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerId {
    Tim2,
    Tim3,
    Tim4,
    Tim5,
}

impl TimerId {
    pub const fn clock(self) -> PeripheralClock {
        match self {
            TimerId::Tim2 => PeripheralClock::Tim2,
            TimerId::Tim3 => PeripheralClock::Tim3,
            TimerId::Tim4 => PeripheralClock::Tim4,
            TimerId::Tim5 => PeripheralClock::Tim5,
        }
    }

    pub const fn interrupt(self) -> Interrupt {
        match self {
            TimerId::Tim2 => Interrupt::TIM2,
            TimerId::Tim3 => Interrupt::TIM3,
            TimerId::Tim4 => Interrupt::TIM4,
            TimerId::Tim5 => Interrupt::TIM5,
        }
    }

    /// TIM2 and TIM5 have 32-bit counters, TIM3 and TIM4 16-bit ones.
    pub const fn max_auto_reload(self) -> u32 {
        match self {
            TimerId::Tim2 | TimerId::Tim5 => u32::MAX,
            TimerId::Tim3 | TimerId::Tim4 => u16::MAX as u32,
        }
    }
}

/// Where a timer is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Clock gated off
    Disabled,
    /// Clocked, counter stopped
    Configured,
    /// Counter enabled
    Running,
}

/// Wrapper for timer peripheral.
pub struct Timer<'a> {
    id: TimerId,
    rb: &'a RegisterBlock,
    config: TimerConfig,
}

impl core::fmt::Debug for Timer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Timer")
            .field("id", &self.id)
            .field("config", &self.config)
            .finish()
    }
}

macro_rules! general_purpose_timer {
    ($($TIM:ident => $id:ident,)+) => {
        $(
            impl TimerExt for $TIM {
                fn constrain(self, rcc: &Rcc) -> Timer<'static> {
                    Timer::new(TimerId::$id, self.registers(), rcc)
                }
            }
        )+
    };
}

general_purpose_timer!(
    TIM2 => Tim2,
    TIM3 => Tim3,
    TIM4 => Tim4,
    TIM5 => Tim5,
);

impl<'a> Timer<'a> {
    pub(crate) fn new(id: TimerId, rb: &'a RegisterBlock, rcc: &Rcc) -> Self {
        rcc.enable(id.clock());
        rcc.reset(id.clock());
        Timer {
            id,
            rb,
            config: TimerConfig::default(),
        }
    }

    pub fn id(&self) -> TimerId {
        self.id
    }

    pub fn config(&self) -> TimerConfig {
        self.config
    }

    /// Replace the period used by [`Timer::start`] and [`Timer::set`].
    pub fn with_config(mut self, config: TimerConfig) -> Result<Self> {
        if config.auto_reload() > self.id.max_auto_reload() {
            return Err(Error::AutoReloadOutOfRange(config.auto_reload()));
        }
        self.config = config;
        Ok(self)
    }

    /// Clock the timer, unmask its interrupt, load the period and start
    /// counting with the update interrupt enabled.
    pub fn start(&self, rcc: &Rcc, nvic: &Nvic) {
        trace!("timer {:?}: start {:?}", self.id, self.config);
        nvic.enable(self.id.interrupt());

        self.set(rcc);

        critical_section::with(|_| {
            self.rb.dier.set_bit(DIER_UIE);
            self.rb.cr1.set_bit(CR1_CEN);
        });
    }

    /// Load prescaler and auto-reload, switching the clock back on if a
    /// [`Timer::stop`] gated it. Interrupt and counter enable are untouched.
    ///
    /// A stopped counter gets an update event so the first period already
    /// runs at the new prescaler. A running counter picks the prescaler up
    /// at its next overflow.
    pub fn set(&self, rcc: &Rcc) {
        rcc.enable(self.id.clock());
        self.rb.psc.write(self.config.prescaler() as u32);
        self.rb.arr.write(self.config.auto_reload());

        if !self.rb.cr1.bit_is_set(CR1_CEN) {
            // URS keeps UG from raising UIF, only overflows report updates.
            critical_section::with(|_| self.rb.cr1.set_bit(CR1_URS));
            self.rb.egr.write(1 << EGR_UG);
            self.clear_update();
        }
    }

    /// Stop the counter, then gate the clock and mask the interrupt.
    pub fn stop(&self, rcc: &Rcc, nvic: &Nvic) {
        trace!("timer {:?}: stop", self.id);
        // Counter must be off before the clock goes.
        critical_section::with(|_| {
            self.rb.cr1.clear_bit(CR1_CEN);
            self.rb.dier.clear_bit(DIER_UIE);
        });

        rcc.disable(self.id.clock());
        nvic.disable(self.id.interrupt());
    }

    pub fn state(&self, rcc: &Rcc) -> TimerState {
        if !rcc.is_enabled(self.id.clock()) {
            TimerState::Disabled
        } else if self.rb.cr1.bit_is_set(CR1_CEN) {
            TimerState::Running
        } else {
            TimerState::Configured
        }
    }

    pub fn counter(&self) -> u32 {
        self.rb.cnt.read() & self.id.max_auto_reload()
    }

    /// Update event seen since the flag was last cleared.
    pub fn is_update_pending(&self) -> bool {
        self.rb.sr.bit_is_set(SR_UIF)
    }

    /// SR flags are cleared by writing 0 and kept by writing 1.
    pub fn clear_update(&self) {
        self.rb.sr.write(!(1 << SR_UIF));
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::pac::mock;
    use crate::rcc::Config;

    #[test]
    fn test_constrain_enables_clock() {
        let rcc_rb = mock::zeroed::<crate::pac::rcc::RegisterBlock>();
        let rb = mock::zeroed::<RegisterBlock>();
        let rcc = Rcc::new(&rcc_rb, Config::default());

        rcc_rb.apb1rstr.write(1 << 2);
        let timer = Timer::new(TimerId::Tim4, &rb, &rcc);

        assert_eq!(rcc_rb.apb1enr.read(), 1 << 2);
        assert_eq!(rcc_rb.apb1rstr.read(), 0);
        assert_eq!(timer.state(&rcc), TimerState::Configured);
    }

    #[test]
    fn test_start_tim3() {
        let rcc_rb = mock::zeroed::<crate::pac::rcc::RegisterBlock>();
        let nvic_rb = mock::zeroed::<crate::pac::nvic::RegisterBlock>();
        let rb = mock::zeroed::<RegisterBlock>();
        let rcc = Rcc::new(&rcc_rb, Config::default());
        let nvic = Nvic::new(&nvic_rb);

        let timer = Timer::new(TimerId::Tim3, &rb, &rcc);
        timer.start(&rcc, &nvic);

        assert_eq!(rcc_rb.apb1enr.read(), 1 << 1);
        assert_eq!(nvic_rb.iser[0].read(), 1 << 29);
        assert_eq!(rb.cr1.read() & 1, 1);
        assert_eq!(rb.dier.read() & 1, 1);
        assert_eq!(rb.psc.read(), 15_999);
        assert_eq!(rb.arr.read(), 1_000);
        assert_eq!(timer.state(&rcc), TimerState::Running);
    }

    #[test]
    fn test_start_latches_prescaler() {
        let rcc_rb = mock::zeroed::<crate::pac::rcc::RegisterBlock>();
        let nvic_rb = mock::zeroed::<crate::pac::nvic::RegisterBlock>();
        let rb = mock::zeroed::<RegisterBlock>();
        let rcc = Rcc::new(&rcc_rb, Config::default());
        let nvic = Nvic::new(&nvic_rb);

        // Stale flag from an earlier run.
        rb.sr.write(1 << SR_UIF);
        Timer::new(TimerId::Tim2, &rb, &rcc).start(&rcc, &nvic);

        assert_eq!(rb.egr.read(), 1 << EGR_UG);
        assert_eq!(rb.cr1.read(), (1 << CR1_URS) | (1 << CR1_CEN));
        assert_eq!(rb.sr.read() & (1 << SR_UIF), 0);
    }

    #[test]
    fn test_start_tim5_second_nvic_word() {
        let rcc_rb = mock::zeroed::<crate::pac::rcc::RegisterBlock>();
        let nvic_rb = mock::zeroed::<crate::pac::nvic::RegisterBlock>();
        let rb = mock::zeroed::<RegisterBlock>();
        let rcc = Rcc::new(&rcc_rb, Config::default());
        let nvic = Nvic::new(&nvic_rb);

        Timer::new(TimerId::Tim5, &rb, &rcc).start(&rcc, &nvic);

        assert_eq!(rcc_rb.apb1enr.read(), 1 << 3);
        assert_eq!(nvic_rb.iser[0].read(), 0);
        assert_eq!(nvic_rb.iser[1].read(), 1 << 18);
    }

    #[test]
    fn test_start_then_stop() {
        for id in [TimerId::Tim2, TimerId::Tim3, TimerId::Tim4, TimerId::Tim5] {
            let rcc_rb = mock::zeroed::<crate::pac::rcc::RegisterBlock>();
            let nvic_rb = mock::zeroed::<crate::pac::nvic::RegisterBlock>();
            let rb = mock::zeroed::<RegisterBlock>();
            let rcc = Rcc::new(&rcc_rb, Config::default());
            let nvic = Nvic::new(&nvic_rb);

            let timer = Timer::new(id, &rb, &rcc);
            timer.start(&rcc, &nvic);
            timer.stop(&rcc, &nvic);
            mock::settle_nvic(&nvic_rb);

            assert_eq!(rb.cr1.read() & 1, 0);
            assert_eq!(rb.dier.read() & 1, 0);
            assert!(!rcc.is_enabled(id.clock()));
            assert!(!nvic.is_enabled(id.interrupt()));
            assert_eq!(timer.state(&rcc), TimerState::Disabled);
        }
    }

    #[test]
    fn test_set_keeps_running_state() {
        let rcc_rb = mock::zeroed::<crate::pac::rcc::RegisterBlock>();
        let nvic_rb = mock::zeroed::<crate::pac::nvic::RegisterBlock>();
        let rb = mock::zeroed::<RegisterBlock>();
        let rcc = Rcc::new(&rcc_rb, Config::default());
        let nvic = Nvic::new(&nvic_rb);

        let timer = Timer::new(TimerId::Tim2, &rb, &rcc);
        timer.start(&rcc, &nvic);
        rb.egr.write(0);

        let timer = timer
            .with_config(TimerConfig::new(7_999, 249).unwrap())
            .unwrap();
        timer.set(&rcc);

        assert_eq!(rb.psc.read(), 7_999);
        assert_eq!(rb.arr.read(), 249);
        // Running counter: no forced update.
        assert_eq!(rb.egr.read(), 0);
        assert_eq!(rb.cr1.read() & 1, 1);
        assert_eq!(rb.dier.read(), 1);
        assert_eq!(rcc_rb.apb1enr.read(), 1);
    }

    #[test]
    fn test_set_before_start() {
        let rcc_rb = mock::zeroed::<crate::pac::rcc::RegisterBlock>();
        let rb = mock::zeroed::<RegisterBlock>();
        let rcc = Rcc::new(&rcc_rb, Config::default());

        let timer = Timer::new(TimerId::Tim4, &rb, &rcc);
        timer.set(&rcc);

        assert_eq!(rb.psc.read(), 15_999);
        assert_eq!(rb.arr.read(), 1_000);
        assert_eq!(rb.egr.read(), 1 << EGR_UG);
        assert_eq!(rb.cr1.read() & 1, 0);
        assert_eq!(timer.state(&rcc), TimerState::Configured);
    }

    #[test]
    fn test_set_after_stop_restores_clock() {
        let rcc_rb = mock::zeroed::<crate::pac::rcc::RegisterBlock>();
        let nvic_rb = mock::zeroed::<crate::pac::nvic::RegisterBlock>();
        let rb = mock::zeroed::<RegisterBlock>();
        let rcc = Rcc::new(&rcc_rb, Config::default());
        let nvic = Nvic::new(&nvic_rb);

        let timer = Timer::new(TimerId::Tim3, &rb, &rcc);
        timer.start(&rcc, &nvic);
        timer.stop(&rcc, &nvic);
        assert_eq!(timer.state(&rcc), TimerState::Disabled);

        timer.set(&rcc);
        assert_eq!(rcc_rb.apb1enr.read(), 1 << 1);
        assert_eq!(timer.state(&rcc), TimerState::Configured);
    }

    #[test]
    fn test_counter_width() {
        let rcc_rb = mock::zeroed::<crate::pac::rcc::RegisterBlock>();
        let rb = mock::zeroed::<RegisterBlock>();
        let rcc = Rcc::new(&rcc_rb, Config::default());
        let wide = TimerConfig::new(0, 0x0001_0000).unwrap();

        assert!(Timer::new(TimerId::Tim2, &rb, &rcc).with_config(wide).is_ok());
        assert!(Timer::new(TimerId::Tim5, &rb, &rcc).with_config(wide).is_ok());
        assert_eq!(
            Timer::new(TimerId::Tim3, &rb, &rcc).with_config(wide).err(),
            Some(Error::AutoReloadOutOfRange(0x0001_0000))
        );

        rb.cnt.write(0x0012_3456);
        assert_eq!(Timer::new(TimerId::Tim4, &rb, &rcc).counter(), 0x3456);
        assert_eq!(Timer::new(TimerId::Tim2, &rb, &rcc).counter(), 0x0012_3456);
    }

    #[test]
    fn test_update_flag() {
        let rcc_rb = mock::zeroed::<crate::pac::rcc::RegisterBlock>();
        let rb = mock::zeroed::<RegisterBlock>();
        let rcc = Rcc::new(&rcc_rb, Config::default());
        let timer = Timer::new(TimerId::Tim3, &rb, &rcc);

        assert!(!timer.is_update_pending());
        rb.sr.write(0x0000_0001);
        assert!(timer.is_update_pending());

        timer.clear_update();
        assert_eq!(rb.sr.read(), 0xFFFF_FFFE);
    }
}
