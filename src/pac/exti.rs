//! External interrupt/event controller

use super::reg::RW;

#[repr(C)]
pub struct RegisterBlock {
    /// Interrupt mask
    pub imr: RW<u32>,
    /// Event mask
    pub emr: RW<u32>,
    /// Rising trigger selection
    pub rtsr: RW<u32>,
    /// Falling trigger selection
    pub ftsr: RW<u32>,
    /// Software interrupt event
    pub swier: RW<u32>,
    /// Pending, write 1 to clear
    pub pr: RW<u32>,
}

const _: () = {
    use core::mem::offset_of;
    assert!(offset_of!(RegisterBlock, imr) == 0x00);
    assert!(offset_of!(RegisterBlock, emr) == 0x04);
    assert!(offset_of!(RegisterBlock, rtsr) == 0x08);
    assert!(offset_of!(RegisterBlock, ftsr) == 0x0C);
    assert!(offset_of!(RegisterBlock, swier) == 0x10);
    assert!(offset_of!(RegisterBlock, pr) == 0x14);
};
