//! System configuration controller

use super::reg::RW;

#[repr(C)]
pub struct RegisterBlock {
    /// Memory remap
    pub memrmp: RW<u32>,
    /// Peripheral mode configuration
    pub pmc: RW<u32>,
    /// External interrupt configuration 1..4, 4 bits per EXTI line
    pub exticr: [RW<u32>; 4],
    _reserved0: [u32; 2],
    /// Compensation cell control
    pub cmpcr: RW<u32>,
    _reserved1: [u32; 2],
    /// Configuration
    pub cfgr: RW<u32>,
}

const _: () = {
    use core::mem::offset_of;
    assert!(offset_of!(RegisterBlock, memrmp) == 0x00);
    assert!(offset_of!(RegisterBlock, pmc) == 0x04);
    assert!(offset_of!(RegisterBlock, exticr) == 0x08);
    assert!(offset_of!(RegisterBlock, cmpcr) == 0x20);
    assert!(offset_of!(RegisterBlock, cfgr) == 0x2C);
};
