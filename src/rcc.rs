pub mod config;
mod reset_enable;

pub use self::config::{AhbPrescaler, ApbPrescaler, Config};
pub use self::reset_enable::ResetEnable;

use crate::pac::RCC;
use crate::pac::rcc::RegisterBlock;
use crate::pac::reg::RW;

use fugit::{HertzU32, KilohertzU32};

/// HSI frequency
pub const HSI_FREQ: HertzU32 = HertzU32::MHz(16);
/// LSI frequency
pub const LSI_FREQ: KilohertzU32 = KilohertzU32::kHz(32);

const CFGR_HPRE: u32 = 4;
const CFGR_PPRE1: u32 = 10;
const CFGR_PPRE2: u32 = 13;
const CSR_LSION: u32 = 0;
const CSR_LSIRDY: u32 = 1;

/// Extension trait for RCC
pub trait RccExt {
    /// Constrain the peripheral and configure clocks.
    fn constrain(self, config: Config) -> Rcc<'static>;
}

impl RccExt for RCC {
    fn constrain(self, config: Config) -> Rcc<'static> {
        Rcc::new(self.registers(), config)
    }
}

/// Bus a peripheral clock gate sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bus {
    Ahb1,
    Apb1,
    Apb2,
}

/// Every clock gate the drivers in this crate switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeripheralClock {
    GpioA,
    GpioB,
    GpioC,
    GpioD,
    GpioE,
    GpioF,
    GpioG,
    GpioH,
    Tim2,
    Tim3,
    Tim4,
    Tim5,
    Syscfg,
}

impl PeripheralClock {
    pub const fn bus(self) -> Bus {
        match self {
            PeripheralClock::GpioA
            | PeripheralClock::GpioB
            | PeripheralClock::GpioC
            | PeripheralClock::GpioD
            | PeripheralClock::GpioE
            | PeripheralClock::GpioF
            | PeripheralClock::GpioG
            | PeripheralClock::GpioH => Bus::Ahb1,
            PeripheralClock::Tim2
            | PeripheralClock::Tim3
            | PeripheralClock::Tim4
            | PeripheralClock::Tim5 => Bus::Apb1,
            PeripheralClock::Syscfg => Bus::Apb2,
        }
    }

    /// Bit position in the bus ENR/RSTR registers
    pub const fn bit(self) -> u32 {
        match self {
            PeripheralClock::GpioA => 0,
            PeripheralClock::GpioB => 1,
            PeripheralClock::GpioC => 2,
            PeripheralClock::GpioD => 3,
            PeripheralClock::GpioE => 4,
            PeripheralClock::GpioF => 5,
            PeripheralClock::GpioG => 6,
            PeripheralClock::GpioH => 7,
            PeripheralClock::Tim2 => 0,
            PeripheralClock::Tim3 => 1,
            PeripheralClock::Tim4 => 2,
            PeripheralClock::Tim5 => 3,
            PeripheralClock::Syscfg => 14,
        }
    }
}

/// Frozen bus frequencies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clocks {
    pub sysclk: HertzU32,
    pub hclk: HertzU32,
    pub pclk1: HertzU32,
    pub pclk2: HertzU32,
    /// Kernel clock of TIM2..TIM5
    pub timclk1: HertzU32,
}

impl Clocks {
    fn new(config: &Config) -> Self {
        let sysclk = HSI_FREQ;
        let hclk = sysclk / config.ahb_prescaler.divisor();
        let pclk1 = hclk / config.apb1_prescaler.divisor();
        let pclk2 = hclk / config.apb2_prescaler.divisor();

        // APB1 timers run at twice PCLK1 whenever the bus is divided.
        let timclk1 = match config.apb1_prescaler {
            ApbPrescaler::Div1 => pclk1,
            _ => HertzU32::from_raw(pclk1.raw() * 2),
        };

        Clocks {
            sysclk,
            hclk,
            pclk1,
            pclk2,
            timclk1,
        }
    }
}

/// Constrained RCC peripheral
pub struct Rcc<'a> {
    rb: &'a RegisterBlock,
    clocks: Clocks,
}

impl core::fmt::Debug for Rcc<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Rcc").field("clocks", &self.clocks).finish()
    }
}

impl<'a> Rcc<'a> {
    pub(crate) fn new(rb: &'a RegisterBlock, config: Config) -> Self {
        // HSI is the reset clock source.
        // It is enabled and ready by default.
        critical_section::with(|_| {
            rb.cfgr.modify(|r| {
                let r = r & !((0xF << CFGR_HPRE) | (0x7 << CFGR_PPRE1) | (0x7 << CFGR_PPRE2));
                r | ((config.ahb_prescaler as u32) << CFGR_HPRE)
                    | ((config.apb1_prescaler as u32) << CFGR_PPRE1)
                    | ((config.apb2_prescaler as u32) << CFGR_PPRE2)
            });
        });

        if config.lsi_enabled {
            // Enable LSI and wait for it to be ready.
            critical_section::with(|_| rb.csr.set_bit(CSR_LSION));
            while !rb.csr.bit_is_set(CSR_LSIRDY) {}
        }

        let clocks = Clocks::new(&config);
        trace!("rcc: hclk {} Hz, pclk1 {} Hz", clocks.hclk.raw(), clocks.pclk1.raw());

        Rcc { rb, clocks }
    }

    /// Get bus frequencies.
    pub fn clocks(&self) -> Clocks {
        self.clocks
    }

    /// Get system clock frequency.
    pub fn sysclk(&self) -> HertzU32 {
        self.clocks.sysclk
    }

    fn enr(&self, bus: Bus) -> &RW<u32> {
        match bus {
            Bus::Ahb1 => &self.rb.ahb1enr,
            Bus::Apb1 => &self.rb.apb1enr,
            Bus::Apb2 => &self.rb.apb2enr,
        }
    }

    fn rstr(&self, bus: Bus) -> &RW<u32> {
        match bus {
            Bus::Ahb1 => &self.rb.ahb1rstr,
            Bus::Apb1 => &self.rb.apb1rstr,
            Bus::Apb2 => &self.rb.apb2rstr,
        }
    }

    /// Switch the peripheral's bus clock on.
    pub fn enable(&self, clock: PeripheralClock) {
        trace!("rcc: enable {:?}", clock);
        let enr = self.enr(clock.bus());
        critical_section::with(|_| enr.set_bit(clock.bit()));
    }

    /// Gate the peripheral's bus clock off.
    pub fn disable(&self, clock: PeripheralClock) {
        trace!("rcc: disable {:?}", clock);
        let enr = self.enr(clock.bus());
        critical_section::with(|_| enr.clear_bit(clock.bit()));
    }

    /// Pulse the peripheral's reset line.
    pub fn reset(&self, clock: PeripheralClock) {
        let rstr = self.rstr(clock.bus());
        critical_section::with(|_| {
            rstr.set_bit(clock.bit());
            rstr.clear_bit(clock.bit());
        });
    }

    pub fn is_enabled(&self, clock: PeripheralClock) -> bool {
        self.enr(clock.bus()).bit_is_set(clock.bit())
    }
}
