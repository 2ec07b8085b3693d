//! Volatile register cells.

use vcell::VolatileCell;

/// Read-write register
#[repr(transparent)]
pub struct RW<T: Copy>(VolatileCell<T>);

/// Read-only register
#[repr(transparent)]
pub struct RO<T: Copy>(VolatileCell<T>);

/// Write-only register
#[repr(transparent)]
pub struct WO<T: Copy>(VolatileCell<T>);

impl<T: Copy> RW<T> {
    #[inline(always)]
    pub fn read(&self) -> T {
        self.0.get()
    }

    #[inline(always)]
    pub fn write(&self, value: T) {
        self.0.set(value)
    }

    /// Read-modify-write. Not atomic with respect to interrupts.
    #[inline(always)]
    pub fn modify<F>(&self, f: F)
    where
        F: FnOnce(T) -> T,
    {
        self.0.set(f(self.0.get()))
    }
}

impl RW<u32> {
    /// Replace the `width`-bit field at `offset`, leaving all other bits untouched.
    #[inline(always)]
    pub fn write_field(&self, offset: u32, width: u32, value: u32) {
        debug_assert!(width > 0 && offset + width <= 32);
        let mask = (u32::MAX >> (32 - width)) << offset;
        self.modify(|r| (r & !mask) | ((value << offset) & mask));
    }

    /// Extract the `width`-bit field at `offset`.
    #[inline(always)]
    pub fn read_field(&self, offset: u32, width: u32) -> u32 {
        debug_assert!(width > 0 && offset + width <= 32);
        (self.read() >> offset) & (u32::MAX >> (32 - width))
    }

    #[inline(always)]
    pub fn set_bit(&self, bit: u32) {
        self.modify(|r| r | (1 << bit));
    }

    #[inline(always)]
    pub fn clear_bit(&self, bit: u32) {
        self.modify(|r| r & !(1 << bit));
    }

    #[inline(always)]
    pub fn bit_is_set(&self, bit: u32) -> bool {
        self.read() & (1 << bit) != 0
    }
}

impl<T: Copy> RO<T> {
    #[inline(always)]
    pub fn read(&self) -> T {
        self.0.get()
    }

    /// Stand-in for the hardware driving the register.
    #[cfg(test)]
    pub(crate) fn poke(&self, value: T) {
        self.0.set(value)
    }
}

impl RO<u32> {
    #[inline(always)]
    pub fn bit_is_set(&self, bit: u32) -> bool {
        self.read() & (1 << bit) != 0
    }
}

impl<T: Copy> WO<T> {
    #[inline(always)]
    pub fn write(&self, value: T) {
        self.0.set(value)
    }

    /// Last value stored, only meaningful for RAM-backed blocks.
    #[cfg(test)]
    pub(crate) fn peek(&self) -> T {
        self.0.get()
    }
}
