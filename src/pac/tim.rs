//! General-purpose timers TIM2..TIM5

use super::reg::RW;

#[repr(C)]
pub struct RegisterBlock {
    /// Control 1
    pub cr1: RW<u32>,
    /// Control 2
    pub cr2: RW<u32>,
    /// Slave mode control
    pub smcr: RW<u32>,
    /// DMA/interrupt enable
    pub dier: RW<u32>,
    /// Status
    pub sr: RW<u32>,
    /// Event generation
    pub egr: RW<u32>,
    /// Capture/compare mode 1
    pub ccmr1: RW<u32>,
    /// Capture/compare mode 2
    pub ccmr2: RW<u32>,
    /// Capture/compare enable
    pub ccer: RW<u32>,
    /// Counter
    pub cnt: RW<u32>,
    /// Prescaler
    pub psc: RW<u32>,
    /// Auto-reload
    pub arr: RW<u32>,
    _reserved0: u32,
    /// Capture/compare 1..4
    pub ccr: [RW<u32>; 4],
    _reserved1: u32,
    /// DMA control
    pub dcr: RW<u32>,
    /// DMA address for full transfer
    pub dmar: RW<u32>,
    /// Option (TIM2 and TIM5 only)
    pub or: RW<u32>,
}

const _: () = {
    use core::mem::offset_of;
    assert!(offset_of!(RegisterBlock, cr1) == 0x00);
    assert!(offset_of!(RegisterBlock, dier) == 0x0C);
    assert!(offset_of!(RegisterBlock, sr) == 0x10);
    assert!(offset_of!(RegisterBlock, egr) == 0x14);
    assert!(offset_of!(RegisterBlock, ccer) == 0x20);
    assert!(offset_of!(RegisterBlock, cnt) == 0x24);
    assert!(offset_of!(RegisterBlock, psc) == 0x28);
    assert!(offset_of!(RegisterBlock, arr) == 0x2C);
    assert!(offset_of!(RegisterBlock, ccr) == 0x34);
    assert!(offset_of!(RegisterBlock, dcr) == 0x48);
    assert!(offset_of!(RegisterBlock, or) == 0x50);
};
