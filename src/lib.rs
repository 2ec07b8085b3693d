#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// Drivers are obtained by constraining a `pac` singleton:
// 1. RCC first, everything else needs it for clock gating
// 2. GPIO, timers and SYSCFG enable their clock while constraining
// 3. SysTick, NVIC and EXTI are always clocked

/// Forwards to `debug_rprintln!` when the `rtt_debug` feature is on.
macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "rtt_debug")]
        rtt_target::debug_rprintln!($($arg)*);
    };
}

pub mod error;
pub mod exti;
pub mod gpio;
pub mod nvic;
pub mod pac;
pub mod rcc;
pub mod syscfg;
pub mod systick;
pub mod timer;

pub use error::{Error, Result};
