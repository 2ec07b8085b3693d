//! SysTick timer

use super::reg::{RO, RW};

#[repr(C)]
pub struct RegisterBlock {
    /// Control and status
    pub csr: RW<u32>,
    /// Reload value
    pub rvr: RW<u32>,
    /// Current value
    pub cvr: RW<u32>,
    /// Calibration value
    pub calib: RO<u32>,
}

const _: () = {
    use core::mem::offset_of;
    assert!(offset_of!(RegisterBlock, csr) == 0x0);
    assert!(offset_of!(RegisterBlock, rvr) == 0x4);
    assert!(offset_of!(RegisterBlock, cvr) == 0x8);
    assert!(offset_of!(RegisterBlock, calib) == 0xC);
};
