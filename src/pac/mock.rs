//! RAM-backed register blocks and small models of the hardware side effects
//! the drivers rely on.

extern crate std;

use std::boxed::Box;

/// Register blocks that are valid when all-zero.
pub(crate) trait Zeroable {}

impl Zeroable for super::gpio::RegisterBlock {}
impl Zeroable for super::rcc::RegisterBlock {}
impl Zeroable for super::systick::RegisterBlock {}
impl Zeroable for super::nvic::RegisterBlock {}
impl Zeroable for super::exti::RegisterBlock {}
impl Zeroable for super::syscfg::RegisterBlock {}
impl Zeroable for super::tim::RegisterBlock {}

/// Allocate a register block with every register reading zero.
#[allow(unsafe_code)]
pub(crate) fn zeroed<T: Zeroable>() -> Box<T> {
    // Every block is a plain sequence of integer cells.
    Box::new(unsafe { core::mem::zeroed() })
}

/// Apply the last BSRR store to ODR and reflect ODR on IDR, the way an output
/// port with nothing attached behaves.
pub(crate) fn settle_gpio(rb: &super::gpio::RegisterBlock) {
    let bsrr = rb.bsrr.peek();
    let set = bsrr & 0xFFFF;
    let reset = bsrr >> 16;
    // Set wins when both halves name the same pin.
    rb.odr.modify(|odr| (odr & !reset) | set);
    rb.bsrr.write(0);
    rb.idr.poke(rb.odr.read());
}

/// Apply clear-enable and clear-pending stores to the matching set registers.
pub(crate) fn settle_nvic(rb: &super::nvic::RegisterBlock) {
    for i in 0..8 {
        let cleared = rb.icer[i].read();
        rb.iser[i].modify(|r| r & !cleared);
        rb.icer[i].write(0);

        let unpended = rb.icpr[i].read();
        rb.ispr[i].modify(|r| r & !unpended);
        rb.icpr[i].write(0);
    }
}
