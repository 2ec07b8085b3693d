use cortex_m::interrupt::InterruptNumber;

use crate::error::{Error, Result};
use crate::pac::NVIC;
use crate::pac::nvic::RegisterBlock;

/// Implemented priority bits, the upper nibble of each IPR byte
pub const PRIO_BITS: u8 = 4;

/// Extension trait for NVIC
pub trait NvicExt {
    fn constrain(self) -> Nvic<'static>;
}

impl NvicExt for NVIC {
    fn constrain(self) -> Nvic<'static> {
        Nvic::new(self.registers())
    }
}

/// Register index and bit of an interrupt in the 32-bit-per-word arrays.
#[inline(always)]
fn position<I: InterruptNumber>(irq: I) -> (usize, u32) {
    let n = irq.number() as usize;
    (n / 32, 1 << (n % 32))
}

/// Constrained NVIC. Every enable/pend operation is a single store to a
/// set or clear register, so none of them needs a critical section.
pub struct Nvic<'a> {
    rb: &'a RegisterBlock,
}

impl<'a> Nvic<'a> {
    pub(crate) fn new(rb: &'a RegisterBlock) -> Self {
        Nvic { rb }
    }

    pub fn enable<I: InterruptNumber>(&self, irq: I) {
        let (index, mask) = position(irq);
        trace!("nvic: enable {}", irq.number());
        self.rb.iser[index].write(mask);
    }

    pub fn disable<I: InterruptNumber>(&self, irq: I) {
        let (index, mask) = position(irq);
        trace!("nvic: disable {}", irq.number());
        self.rb.icer[index].write(mask);
    }

    pub fn is_enabled<I: InterruptNumber>(&self, irq: I) -> bool {
        let (index, mask) = position(irq);
        self.rb.iser[index].read() & mask != 0
    }

    pub fn pend<I: InterruptNumber>(&self, irq: I) {
        let (index, mask) = position(irq);
        self.rb.ispr[index].write(mask);
    }

    pub fn unpend<I: InterruptNumber>(&self, irq: I) {
        let (index, mask) = position(irq);
        self.rb.icpr[index].write(mask);
    }

    pub fn is_pending<I: InterruptNumber>(&self, irq: I) -> bool {
        let (index, mask) = position(irq);
        self.rb.ispr[index].read() & mask != 0
    }

    pub fn is_active<I: InterruptNumber>(&self, irq: I) -> bool {
        let (index, mask) = position(irq);
        self.rb.iabr[index].read() & mask != 0
    }

    /// Set the priority level, 0 (highest) to 15.
    pub fn set_priority<I: InterruptNumber>(&self, irq: I, level: u8) -> Result<()> {
        if level >= 1 << PRIO_BITS {
            return Err(Error::InvalidPriority(level));
        }
        self.rb.ipr[irq.number() as usize].write(level << (8 - PRIO_BITS));
        Ok(())
    }

    pub fn priority<I: InterruptNumber>(&self, irq: I) -> u8 {
        self.rb.ipr[irq.number() as usize].read() >> (8 - PRIO_BITS)
    }

    /// Pend an interrupt through the software trigger register.
    pub fn trigger<I: InterruptNumber>(&self, irq: I) {
        self.rb.stir.write(irq.number() as u32);
    }
}
