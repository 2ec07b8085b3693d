use crate::error::{Error, Result};
use crate::gpio::{Pin, SignalEdge};
use crate::pac::exti::RegisterBlock;
use crate::pac::{EXTI, Interrupt};

/// Highest EXTI line on this part
const MAX_LINE: u8 = 22;

/// Extension trait for EXTI. The controller sits on the always-clocked
/// side of APB2 and needs no clock gate.
pub trait ExtiExt {
    fn constrain(self) -> Exti<'static>;
}

impl ExtiExt for EXTI {
    fn constrain(self) -> Exti<'static> {
        Exti::new(self.registers())
    }
}

/// EXTI line number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtiLine(u8);

impl ExtiLine {
    pub const PVD: ExtiLine = ExtiLine(16);
    pub const RTC_ALARM: ExtiLine = ExtiLine(17);
    pub const OTG_FS_WAKEUP: ExtiLine = ExtiLine(18);
    pub const OTG_HS_WAKEUP: ExtiLine = ExtiLine(20);
    pub const RTC_TAMPER: ExtiLine = ExtiLine(21);
    pub const RTC_WAKEUP: ExtiLine = ExtiLine(22);

    pub const fn new(line: u8) -> Result<Self> {
        if line > MAX_LINE {
            return Err(Error::InvalidLine(line));
        }
        Ok(ExtiLine(line))
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    #[inline(always)]
    const fn mask(self) -> u32 {
        1 << self.0
    }

    /// NVIC line raised by this EXTI line, `None` for the reserved line 19.
    pub const fn interrupt(self) -> Option<Interrupt> {
        Some(match self.0 {
            0 => Interrupt::EXTI0,
            1 => Interrupt::EXTI1,
            2 => Interrupt::EXTI2,
            3 => Interrupt::EXTI3,
            4 => Interrupt::EXTI4,
            5..=9 => Interrupt::EXTI9_5,
            10..=15 => Interrupt::EXTI15_10,
            16 => Interrupt::PVD,
            17 => Interrupt::RTC_ALARM,
            18 => Interrupt::OTG_FS_WKUP,
            20 => Interrupt::OTG_HS_WKUP,
            21 => Interrupt::TAMP_STAMP,
            22 => Interrupt::RTC_WKUP,
            _ => return None,
        })
    }
}

impl From<Pin> for ExtiLine {
    fn from(pin: Pin) -> Self {
        ExtiLine(pin as u8)
    }
}

impl TryFrom<u8> for ExtiLine {
    type Error = Error;

    fn try_from(line: u8) -> Result<Self> {
        ExtiLine::new(line)
    }
}

/// Constrained EXTI peripheral
pub struct Exti<'a> {
    rb: &'a RegisterBlock,
}

impl<'a> Exti<'a> {
    pub(crate) fn new(rb: &'a RegisterBlock) -> Self {
        Exti { rb }
    }

    /// Select the trigger edges of `line` and unmask its interrupt.
    pub fn listen(&self, line: ExtiLine, edge: SignalEdge) {
        trace!("exti: listen line {} on {:?}", line.number(), edge);
        let mask = line.mask();
        let (rising, falling) = match edge {
            SignalEdge::Rising => (true, false),
            SignalEdge::Falling => (false, true),
            SignalEdge::Both => (true, true),
        };

        critical_section::with(|_| {
            self.rb
                .rtsr
                .modify(|r| if rising { r | mask } else { r & !mask });
            self.rb
                .ftsr
                .modify(|r| if falling { r | mask } else { r & !mask });
            self.rb.imr.modify(|r| r | mask);
        });
    }

    /// Mask `line` and disarm both edges.
    pub fn unlisten(&self, line: ExtiLine) {
        let mask = line.mask();
        critical_section::with(|_| {
            self.rb.imr.modify(|r| r & !mask);
            self.rb.rtsr.modify(|r| r & !mask);
            self.rb.ftsr.modify(|r| r & !mask);
        });
    }

    pub fn is_pending(&self, line: ExtiLine) -> bool {
        self.rb.pr.read() & line.mask() != 0
    }

    /// PR is write-1-to-clear; other lines see a zero and keep their flag.
    pub fn clear_pending(&self, line: ExtiLine) {
        self.rb.pr.write(line.mask());
    }

    /// Raise `line` from software.
    pub fn trigger(&self, line: ExtiLine) {
        let mask = line.mask();
        critical_section::with(|_| self.rb.swier.modify(|r| r | mask));
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::pac::mock;

    #[test]
    fn test_line_range() {
        assert_eq!(ExtiLine::new(22).map(ExtiLine::number), Ok(22));
        assert_eq!(ExtiLine::new(23), Err(Error::InvalidLine(23)));
        assert_eq!(ExtiLine::try_from(40u8), Err(Error::InvalidLine(40)));
        assert_eq!(ExtiLine::from(Pin::P13).number(), 13);
    }

    #[test]
    fn test_line_interrupts() {
        assert_eq!(ExtiLine::from(Pin::P0).interrupt(), Some(Interrupt::EXTI0));
        assert_eq!(ExtiLine::from(Pin::P4).interrupt(), Some(Interrupt::EXTI4));
        assert_eq!(ExtiLine::from(Pin::P5).interrupt(), Some(Interrupt::EXTI9_5));
        assert_eq!(ExtiLine::from(Pin::P9).interrupt(), Some(Interrupt::EXTI9_5));
        assert_eq!(ExtiLine::from(Pin::P10).interrupt(), Some(Interrupt::EXTI15_10));
        assert_eq!(ExtiLine::PVD.interrupt(), Some(Interrupt::PVD));
        assert_eq!(ExtiLine::new(19).unwrap().interrupt(), None);
    }

    #[test]
    fn test_listen_edges() {
        let rb = mock::zeroed::<RegisterBlock>();
        let exti = Exti::new(&rb);

        exti.listen(ExtiLine::from(Pin::P3), SignalEdge::Rising);
        exti.listen(ExtiLine::from(Pin::P8), SignalEdge::Both);
        assert_eq!(rb.imr.read(), (1 << 3) | (1 << 8));
        assert_eq!(rb.rtsr.read(), (1 << 3) | (1 << 8));
        assert_eq!(rb.ftsr.read(), 1 << 8);

        // Switching edge drops the old one.
        exti.listen(ExtiLine::from(Pin::P3), SignalEdge::Falling);
        assert_eq!(rb.rtsr.read(), 1 << 8);
        assert_eq!(rb.ftsr.read(), (1 << 3) | (1 << 8));

        exti.unlisten(ExtiLine::from(Pin::P8));
        assert_eq!(rb.imr.read(), 1 << 3);
        assert_eq!(rb.rtsr.read(), 0);
        assert_eq!(rb.ftsr.read(), 1 << 3);
    }

    #[test]
    fn test_pending() {
        let rb = mock::zeroed::<RegisterBlock>();
        let exti = Exti::new(&rb);

        rb.pr.write(1 << 13);
        assert!(exti.is_pending(ExtiLine::from(Pin::P13)));
        assert!(!exti.is_pending(ExtiLine::from(Pin::P12)));

        exti.clear_pending(ExtiLine::from(Pin::P12));
        // Only the written bit is stored, never a read-modify-write of PR.
        assert_eq!(rb.pr.read(), 1 << 12);
    }

    #[test]
    fn test_software_trigger() {
        let rb = mock::zeroed::<RegisterBlock>();
        let exti = Exti::new(&rb);

        exti.trigger(ExtiLine::RTC_WAKEUP);
        exti.trigger(ExtiLine::from(Pin::P1));
        assert_eq!(rb.swier.read(), (1 << 22) | (1 << 1));
    }
}
