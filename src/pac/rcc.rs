//! Reset and clock control

use super::reg::RW;

#[repr(C)]
pub struct RegisterBlock {
    /// Clock control
    pub cr: RW<u32>,
    /// PLL configuration
    pub pllcfgr: RW<u32>,
    /// Clock configuration
    pub cfgr: RW<u32>,
    /// Clock interrupt
    pub cir: RW<u32>,
    pub ahb1rstr: RW<u32>,
    pub ahb2rstr: RW<u32>,
    pub ahb3rstr: RW<u32>,
    _reserved0: u32,
    pub apb1rstr: RW<u32>,
    pub apb2rstr: RW<u32>,
    _reserved1: [u32; 2],
    pub ahb1enr: RW<u32>,
    pub ahb2enr: RW<u32>,
    pub ahb3enr: RW<u32>,
    _reserved2: u32,
    pub apb1enr: RW<u32>,
    pub apb2enr: RW<u32>,
    _reserved3: [u32; 2],
    pub ahb1lpenr: RW<u32>,
    pub ahb2lpenr: RW<u32>,
    pub ahb3lpenr: RW<u32>,
    _reserved4: u32,
    pub apb1lpenr: RW<u32>,
    pub apb2lpenr: RW<u32>,
    _reserved5: [u32; 2],
    /// Backup domain control
    pub bdcr: RW<u32>,
    /// Clock control and status
    pub csr: RW<u32>,
    _reserved6: [u32; 2],
    /// Spread spectrum clock generation
    pub sscgr: RW<u32>,
    pub plli2scfgr: RW<u32>,
    pub pllsaicfgr: RW<u32>,
    /// Dedicated clocks configuration
    pub dckcfgr: RW<u32>,
    /// Clocks gated enable
    pub ckgatenr: RW<u32>,
    pub dckcfgr2: RW<u32>,
}

const _: () = {
    use core::mem::offset_of;
    assert!(offset_of!(RegisterBlock, cfgr) == 0x08);
    assert!(offset_of!(RegisterBlock, ahb1rstr) == 0x10);
    assert!(offset_of!(RegisterBlock, apb1rstr) == 0x20);
    assert!(offset_of!(RegisterBlock, apb2rstr) == 0x24);
    assert!(offset_of!(RegisterBlock, ahb1enr) == 0x30);
    assert!(offset_of!(RegisterBlock, apb1enr) == 0x40);
    assert!(offset_of!(RegisterBlock, apb2enr) == 0x44);
    assert!(offset_of!(RegisterBlock, ahb1lpenr) == 0x50);
    assert!(offset_of!(RegisterBlock, bdcr) == 0x70);
    assert!(offset_of!(RegisterBlock, csr) == 0x74);
    assert!(offset_of!(RegisterBlock, sscgr) == 0x80);
    assert!(offset_of!(RegisterBlock, dckcfgr2) == 0x94);
};
