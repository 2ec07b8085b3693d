//! Register map for the STM32F446.
//!
//! Each peripheral instance is a zero-sized singleton that dereferences to the
//! register block at its fixed address. Singletons are neither `Copy` nor
//! `Clone`; [`Peripherals::take`] hands them out once.
#![allow(non_camel_case_types)]

use core::cell::Cell;
use core::marker::PhantomData;

use critical_section::Mutex;
use paste::paste;

pub mod exti;
pub mod gpio;
pub mod nvic;
pub mod rcc;
pub mod reg;
pub mod syscfg;
pub mod systick;
pub mod tim;

#[cfg(test)]
pub(crate) mod mock;

pub const APB1_BASE: usize = 0x4000_0000;
pub const APB2_BASE: usize = 0x4001_0000;
pub const AHB1_BASE: usize = 0x4002_0000;
pub const AHB2_BASE: usize = 0x5000_0000;
pub const AHB3_BASE: usize = 0x6000_0000;
pub const CORE_BASE: usize = 0xE000_0000;

pub const SYSTICK_BASE: usize = CORE_BASE + 0xE010;
pub const NVIC_BASE: usize = CORE_BASE + 0xE100;

pub const RCC_BASE: usize = AHB1_BASE + 0x3800;
pub const EXTI_BASE: usize = APB2_BASE + 0x3C00;
pub const SYSCFG_BASE: usize = APB2_BASE + 0x3800;

pub const GPIOA_BASE: usize = AHB1_BASE;
pub const GPIOB_BASE: usize = AHB1_BASE + 0x0400;
pub const GPIOC_BASE: usize = AHB1_BASE + 0x0800;
pub const GPIOD_BASE: usize = AHB1_BASE + 0x0C00;
pub const GPIOE_BASE: usize = AHB1_BASE + 0x1000;
pub const GPIOF_BASE: usize = AHB1_BASE + 0x1400;
pub const GPIOG_BASE: usize = AHB1_BASE + 0x1800;
pub const GPIOH_BASE: usize = AHB1_BASE + 0x1C00;

pub const TIM2_BASE: usize = APB1_BASE;
pub const TIM3_BASE: usize = APB1_BASE + 0x0400;
pub const TIM4_BASE: usize = APB1_BASE + 0x0800;
pub const TIM5_BASE: usize = APB1_BASE + 0x0C00;

macro_rules! peripheral {
    ($($NAME:ident: $block:ident,)+) => {
    paste! {
        $(
            #[doc = concat!("`", stringify!($NAME), "` peripheral")]
            pub struct $NAME {
                _marker: PhantomData<*const ()>,
            }

            #[allow(unsafe_code)]
            unsafe impl Send for $NAME {}

            impl $NAME {
                /// Address of the register block
                pub const PTR: *const $block::RegisterBlock = [<$NAME _BASE>] as *const _;

                /// Returns a pointer to the register block
                #[inline(always)]
                pub const fn ptr() -> *const $block::RegisterBlock {
                    Self::PTR
                }

                /// Creates another instance of the singleton.
                ///
                /// # Safety
                ///
                /// Two live handles to one peripheral can race on its registers.
                #[allow(unsafe_code)]
                #[inline(always)]
                pub unsafe fn steal() -> Self {
                    Self { _marker: PhantomData }
                }

                /// Consumes the singleton, yielding its register block.
                #[allow(unsafe_code)]
                #[inline(always)]
                pub(crate) fn registers(self) -> &'static $block::RegisterBlock {
                    unsafe { &*Self::PTR }
                }
            }

            impl core::ops::Deref for $NAME {
                type Target = $block::RegisterBlock;

                #[allow(unsafe_code)]
                #[inline(always)]
                fn deref(&self) -> &Self::Target {
                    unsafe { &*Self::PTR }
                }
            }

            impl core::fmt::Debug for $NAME {
                fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                    f.debug_struct(stringify!($NAME)).finish()
                }
            }
        )+

        /// All peripherals
        #[allow(non_snake_case)]
        #[derive(Debug)]
        pub struct Peripherals {
            $(
                pub $NAME: $NAME,
            )+
        }

        impl Peripherals {
            /// Returns all the peripherals once.
            pub fn take() -> Option<Self> {
                critical_section::with(|cs| {
                    let taken = TAKEN.borrow(cs);
                    if taken.get() {
                        return None;
                    }
                    taken.set(true);

                    #[allow(unsafe_code)]
                    let peripherals = unsafe { Self::steal() };
                    Some(peripherals)
                })
            }

            /// Unchecked version of [`Peripherals::take`].
            ///
            /// # Safety
            ///
            /// Each returned singleton must not alias one that is still in use.
            #[allow(unsafe_code)]
            pub unsafe fn steal() -> Self {
                Self {
                    $(
                        $NAME: unsafe { $NAME::steal() },
                    )+
                }
            }
        }
    }
    };
}

static TAKEN: Mutex<Cell<bool>> = Mutex::new(Cell::new(false));

peripheral!(
    GPIOA: gpio,
    GPIOB: gpio,
    GPIOC: gpio,
    GPIOD: gpio,
    GPIOE: gpio,
    GPIOF: gpio,
    GPIOG: gpio,
    GPIOH: gpio,
    TIM2: tim,
    TIM3: tim,
    TIM4: tim,
    TIM5: tim,
    RCC: rcc,
    EXTI: exti,
    SYSCFG: syscfg,
    SYSTICK: systick,
    NVIC: nvic,
);

/// Interrupt numbers used by the drivers in this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Interrupt {
    PVD = 1,
    TAMP_STAMP = 2,
    RTC_WKUP = 3,
    EXTI0 = 6,
    EXTI1 = 7,
    EXTI2 = 8,
    EXTI3 = 9,
    EXTI4 = 10,
    EXTI9_5 = 23,
    TIM2 = 28,
    TIM3 = 29,
    TIM4 = 30,
    EXTI15_10 = 40,
    RTC_ALARM = 41,
    OTG_FS_WKUP = 42,
    TIM5 = 50,
    OTG_HS_WKUP = 76,
}

#[allow(unsafe_code)]
unsafe impl cortex_m::interrupt::InterruptNumber for Interrupt {
    #[inline(always)]
    fn number(self) -> u16 {
        self as u16
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_base_addresses() {
        assert_eq!(GPIOA::PTR as usize, 0x4002_0000);
        assert_eq!(GPIOH::PTR as usize, 0x4002_1C00);
        assert_eq!(TIM5::PTR as usize, 0x4000_0C00);
        assert_eq!(RCC::PTR as usize, 0x4002_3800);
        assert_eq!(EXTI::PTR as usize, 0x4001_3C00);
        assert_eq!(SYSCFG::PTR as usize, 0x4001_3800);
        assert_eq!(SYSTICK::PTR as usize, 0xE000_E010);
        assert_eq!(NVIC::PTR as usize, 0xE000_E100);
    }

    #[test]
    fn test_take_once() {
        assert!(Peripherals::take().is_some());
        assert!(Peripherals::take().is_none());
    }
}
