//! General-purpose I/O port

use super::reg::{RO, RW, WO};

#[repr(C)]
pub struct RegisterBlock {
    /// Port mode, 2 bits per pin
    pub moder: RW<u32>,
    /// Output type, 1 bit per pin
    pub otyper: RW<u32>,
    /// Output speed, 2 bits per pin
    pub ospeedr: RW<u32>,
    /// Pull-up/pull-down, 2 bits per pin
    pub pupdr: RW<u32>,
    /// Input data
    pub idr: RO<u32>,
    /// Output data
    pub odr: RW<u32>,
    /// Bit set (low half) / bit reset (high half)
    pub bsrr: WO<u32>,
    /// Configuration lock
    pub lckr: RW<u32>,
    /// Alternate function, pins 0..7
    pub afrl: RW<u32>,
    /// Alternate function, pins 8..15
    pub afrh: RW<u32>,
}

const _: () = {
    use core::mem::offset_of;
    assert!(offset_of!(RegisterBlock, moder) == 0x00);
    assert!(offset_of!(RegisterBlock, otyper) == 0x04);
    assert!(offset_of!(RegisterBlock, ospeedr) == 0x08);
    assert!(offset_of!(RegisterBlock, pupdr) == 0x0C);
    assert!(offset_of!(RegisterBlock, idr) == 0x10);
    assert!(offset_of!(RegisterBlock, odr) == 0x14);
    assert!(offset_of!(RegisterBlock, bsrr) == 0x18);
    assert!(offset_of!(RegisterBlock, lckr) == 0x1C);
    assert!(offset_of!(RegisterBlock, afrl) == 0x20);
    assert!(offset_of!(RegisterBlock, afrh) == 0x24);
    assert!(core::mem::size_of::<RegisterBlock>() == 0x28);
};
