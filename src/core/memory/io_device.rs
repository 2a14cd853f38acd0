// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut

//! Hardware Device Traits
//!
//! Page handlers on the EE register bus talk to subsystems only through these
//! traits. The dispatcher decides *which* device owns an address; the device
//! decides what the register means.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │            HwReadDispatcher                 │
//! ├─────────────────────────────────────────────┤
//! │  page 0/1 ─► Counters   (HwDevice)          │
//! │  page 2   ─► Ipu        (HwDevice + FIFO)   │
//! │  page 3   ─► Gif / Vif0 / Vif1              │
//! │  page 5   ─► Vif1       (FifoDevice)        │
//! │  page 7   ─► Ipu        (FifoDevice)        │
//! │  page F   ─► Pgif       (HwDevice + FIFO)   │
//! └─────────────────────────────────────────────┘
//!                      │
//!                      ▼
//!               HwRegisters (raw)
//! ```
//!
//! # Example
//!
//! ```
//! use ps2rx::core::memory::{HwDevice, HwRegisters};
//!
//! struct Latch {
//!     value: u32,
//! }
//!
//! impl HwDevice for Latch {
//!     fn address_range(&self) -> (u32, u32) {
//!         (0x1000_8000, 0x1000_800F)
//!     }
//!
//!     fn read32(&mut self, address: u32, raw: &HwRegisters) -> u32 {
//!         if address == 0x1000_8000 {
//!             self.value
//!         } else {
//!             raw.read32(address)
//!         }
//!     }
//! }
//!
//! let mut latch = Latch { value: 7 };
//! let raw = HwRegisters::new();
//! assert!(latch.contains(0x1000_8004));
//! assert_eq!(latch.read32(0x1000_8000, &raw), 7);
//! ```

use super::registers::HwRegisters;

/// Trait for memory-mapped hardware devices on the EE register bus
///
/// Devices receive the full physical address (not an offset) because most EE
/// registers are documented by absolute address. Registers the device does
/// not model are read from the raw backing store passed in by the caller.
///
/// Reads take `&mut self`: some registers have read side effects (FIFO pops,
/// counter latching).
pub trait HwDevice {
    /// Get the address range this device responds to
    ///
    /// Returns a tuple of (start_address, end_address) inclusive.
    fn address_range(&self) -> (u32, u32);

    /// Check if this device contains the given address
    ///
    /// # Arguments
    ///
    /// * `address` - Physical address to check
    ///
    /// # Returns
    ///
    /// `true` if the address is within this device's range
    fn contains(&self, address: u32) -> bool {
        let (start, end) = self.address_range();
        let paddr = address & 0x1FFF_FFFF;
        paddr >= start && paddr <= end
    }

    /// Read a 32-bit register
    ///
    /// # Arguments
    ///
    /// * `address` - Physical address (4-byte aligned)
    /// * `raw` - Raw backing store for registers the device does not model
    fn read32(&mut self, address: u32, raw: &HwRegisters) -> u32;

    /// Read a 64-bit register
    ///
    /// Default implementation zero-extends the 32-bit read, which is what the
    /// hardware does for every device except the IPU.
    fn read64(&mut self, address: u32, raw: &HwRegisters) -> u64 {
        self.read32(address, raw) as u64
    }

    /// Restore power-on state
    fn reset(&mut self) {}

    /// Device name for logging
    fn name(&self) -> &'static str {
        "Unknown Device"
    }
}

/// A device that owns a quadword FIFO the EE can read from
pub trait FifoDevice: HwDevice {
    /// Pop one 128-bit quadword from the readable FIFO
    ///
    /// Returns zero when the FIFO is empty or not readable in its current
    /// direction. Never fails.
    fn read_fifo(&mut self) -> u128;

    /// Number of quadwords currently queued
    fn fifo_len(&self) -> usize;
}
