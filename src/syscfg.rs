use crate::error::Result;
use crate::gpio::{Pin, Port};
use crate::pac::SYSCFG;
use crate::pac::syscfg::RegisterBlock;
use crate::rcc::{PeripheralClock, Rcc};

/// Extension trait for SYSCFG
pub trait SyscfgExt {
    /// Enables the APB2 clock and wraps the register block.
    fn constrain(self, rcc: &Rcc) -> Syscfg<'static>;
}

impl SyscfgExt for SYSCFG {
    fn constrain(self, rcc: &Rcc) -> Syscfg<'static> {
        Syscfg::new(self.registers(), rcc)
    }
}

/// Constrained SYSCFG peripheral
pub struct Syscfg<'a> {
    rb: &'a RegisterBlock,
}

impl<'a> Syscfg<'a> {
    pub(crate) fn new(rb: &'a RegisterBlock, rcc: &Rcc) -> Self {
        rcc.enable(PeripheralClock::Syscfg);
        Syscfg { rb }
    }

    /// Connect EXTI line `pin` to `port`. Each line has one source at a time.
    pub fn select_exti_source(&self, pin: Pin, port: Port) {
        let index = pin.index();
        let reg = &self.rb.exticr[(index / 4) as usize];
        critical_section::with(|_| reg.write_field((index % 4) * 4, 4, port.index()));
    }

    /// Port currently routed to EXTI line `pin`. Codes above port H are
    /// reserved and reported as `InvalidFieldValue`.
    pub fn exti_source(&self, pin: Pin) -> Result<Port> {
        let index = pin.index();
        Port::try_from(self.rb.exticr[(index / 4) as usize].read_field((index % 4) * 4, 4))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::exti::{Exti, ExtiLine};
    use crate::gpio::{Gpio, SignalEdge};
    use crate::pac::mock;
    use crate::rcc::Config;

    #[test]
    fn test_constrain_enables_clock() {
        let rcc_rb = mock::zeroed::<crate::pac::rcc::RegisterBlock>();
        let rcc = Rcc::new(&rcc_rb, Config::default());
        let rb = mock::zeroed::<RegisterBlock>();

        let _syscfg = Syscfg::new(&rb, &rcc);
        assert_eq!(rcc_rb.apb2enr.read(), 1 << 14);
    }

    #[test]
    fn test_select_source() {
        let rcc_rb = mock::zeroed::<crate::pac::rcc::RegisterBlock>();
        let rcc = Rcc::new(&rcc_rb, Config::default());
        let rb = mock::zeroed::<RegisterBlock>();
        let syscfg = Syscfg::new(&rb, &rcc);

        rb.exticr[1].write(0x0000_FFFF);
        syscfg.select_exti_source(Pin::P5, Port::C);
        syscfg.select_exti_source(Pin::P13, Port::H);
        syscfg.select_exti_source(Pin::P0, Port::B);

        assert_eq!(rb.exticr[0].read(), 0x0000_0001);
        assert_eq!(rb.exticr[1].read(), 0x0000_FF2F);
        assert_eq!(rb.exticr[3].read(), 0x0000_0070);
        assert_eq!(syscfg.exti_source(Pin::P5), Ok(Port::C));
        assert_eq!(syscfg.exti_source(Pin::P13), Ok(Port::H));
        assert_eq!(syscfg.exti_source(Pin::P0), Ok(Port::B));
        assert_eq!(syscfg.exti_source(Pin::P12), Ok(Port::A));

        // Codes 8..15 name no port.
        assert_eq!(
            syscfg.exti_source(Pin::P6),
            Err(crate::Error::InvalidFieldValue(0xF))
        );
    }

    #[test]
    fn test_pin_as_interrupt_source() {
        let rcc_rb = mock::zeroed::<crate::pac::rcc::RegisterBlock>();
        let rcc = Rcc::new(&rcc_rb, Config::default());
        let gpio_rb = mock::zeroed::<crate::pac::gpio::RegisterBlock>();
        let syscfg_rb = mock::zeroed::<RegisterBlock>();
        let exti_rb = mock::zeroed::<crate::pac::exti::RegisterBlock>();

        let gpio = Gpio::new(Port::C, &gpio_rb, &rcc);
        let syscfg = Syscfg::new(&syscfg_rb, &rcc);
        let exti = Exti::new(&exti_rb);

        let mut button = gpio.pin(Pin::P13);
        button.make_interrupt_source(&syscfg);
        button.trigger_on_edge(SignalEdge::Falling, &exti);

        assert_eq!(syscfg_rb.exticr[3].read(), 0x0000_0020);
        assert_eq!(exti_rb.imr.read(), 1 << 13);
        assert_eq!(exti_rb.ftsr.read(), 1 << 13);
        assert!(!exti.is_pending(ExtiLine::from(Pin::P13)));
    }
}
