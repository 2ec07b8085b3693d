use super::{PeripheralClock, Rcc};
use crate::pac::{
    GPIOA, GPIOB, GPIOC, GPIOD, GPIOE, GPIOF, GPIOG, GPIOH, SYSCFG, TIM2, TIM3, TIM4, TIM5,
};

/// Peripheral enable/disable/reset
pub trait ResetEnable {
    /// Clock gate of this peripheral
    const CLOCK: PeripheralClock;

    fn enable(rcc: &Rcc) {
        rcc.enable(Self::CLOCK);
    }

    fn disable(rcc: &Rcc) {
        rcc.disable(Self::CLOCK);
    }

    fn reset(rcc: &Rcc) {
        rcc.reset(Self::CLOCK);
    }

    fn is_enabled(rcc: &Rcc) -> bool {
        rcc.is_enabled(Self::CLOCK)
    }
}

macro_rules! reset_enable {
    ($($PER:ident => $CLOCK:ident,)+) => {
        $(
            impl ResetEnable for $PER {
                const CLOCK: PeripheralClock = PeripheralClock::$CLOCK;
            }
        )+
    };
}

reset_enable!(
    GPIOA => GpioA,
    GPIOB => GpioB,
    GPIOC => GpioC,
    GPIOD => GpioD,
    GPIOE => GpioE,
    GPIOF => GpioF,
    GPIOG => GpioG,
    GPIOH => GpioH,
    TIM2 => Tim2,
    TIM3 => Tim3,
    TIM4 => Tim4,
    TIM5 => Tim5,
    SYSCFG => Syscfg,
);
