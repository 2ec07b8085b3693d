//! Nested vectored interrupt controller

use super::reg::{RO, RW, WO};

#[repr(C)]
pub struct RegisterBlock {
    /// Interrupt set-enable
    pub iser: [RW<u32>; 8],
    _reserved0: [u32; 24],
    /// Interrupt clear-enable
    pub icer: [RW<u32>; 8],
    _reserved1: [u32; 24],
    /// Interrupt set-pending
    pub ispr: [RW<u32>; 8],
    _reserved2: [u32; 24],
    /// Interrupt clear-pending
    pub icpr: [RW<u32>; 8],
    _reserved3: [u32; 24],
    /// Interrupt active bit
    pub iabr: [RO<u32>; 8],
    _reserved4: [u32; 56],
    /// Interrupt priority, one byte per interrupt
    pub ipr: [RW<u8>; 240],
    _reserved5: [u32; 644],
    /// Software trigger interrupt
    pub stir: WO<u32>,
}

const _: () = {
    use core::mem::offset_of;
    assert!(offset_of!(RegisterBlock, iser) == 0x000);
    assert!(offset_of!(RegisterBlock, icer) == 0x080);
    assert!(offset_of!(RegisterBlock, ispr) == 0x100);
    assert!(offset_of!(RegisterBlock, icpr) == 0x180);
    assert!(offset_of!(RegisterBlock, iabr) == 0x200);
    assert!(offset_of!(RegisterBlock, ipr) == 0x300);
    assert!(offset_of!(RegisterBlock, stir) == 0xE00);
};
