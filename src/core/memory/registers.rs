// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Raw register backing storage
//!
//! Every register in the hardware window has a persistent little-endian
//! backing cell. Subsystems without a dedicated model, and every address a
//! page handler does not claim, read straight from here.

use super::map::{HW_SIZE, IOP_HW_SIZE};

/// Backing store for a 64KB register window
///
/// Addresses are reduced to the low 16 bits, so the same storage serves
/// any mirror of the window.
pub struct RegisterFile {
    bytes: Vec<u8>,
}

impl RegisterFile {
    /// Create a zeroed register file of `size` bytes
    ///
    /// `size` must be a power of two.
    pub fn new(size: u32) -> Self {
        debug_assert!(size.is_power_of_two());
        Self {
            bytes: vec![0u8; size as usize],
        }
    }

    #[inline(always)]
    fn offset(&self, address: u32) -> usize {
        (address as usize) & (self.bytes.len() - 1)
    }

    /// Read a 32-bit value (little-endian)
    #[inline]
    pub fn read32(&self, address: u32) -> u32 {
        let offset = self.offset(address & !0x3);
        u32::from_le_bytes([
            self.bytes[offset],
            self.bytes[offset + 1],
            self.bytes[offset + 2],
            self.bytes[offset + 3],
        ])
    }

    /// Read a 64-bit value (little-endian)
    #[inline]
    pub fn read64(&self, address: u32) -> u64 {
        let lo = self.read32(address & !0x7) as u64;
        let hi = self.read32((address & !0x7) + 4) as u64;
        lo | (hi << 32)
    }

    /// Write a 32-bit value (little-endian)
    #[inline]
    pub fn write32(&mut self, address: u32, value: u32) {
        let offset = self.offset(address & !0x3);
        self.bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    /// Write a 64-bit value (little-endian)
    pub fn write64(&mut self, address: u32, value: u64) {
        self.write32(address & !0x7, value as u32);
        self.write32((address & !0x7) + 4, (value >> 32) as u32);
    }

    /// Clear every register to zero
    pub fn reset(&mut self) {
        self.bytes.fill(0);
    }
}

/// EE hardware register storage (`0x1000_0000..0x1001_0000`)
pub struct HwRegisters(RegisterFile);

impl HwRegisters {
    pub fn new() -> Self {
        Self(RegisterFile::new(HW_SIZE))
    }
}

impl Default for HwRegisters {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for HwRegisters {
    type Target = RegisterFile;

    fn deref(&self) -> &RegisterFile {
        &self.0
    }
}

impl std::ops::DerefMut for HwRegisters {
    fn deref_mut(&mut self) -> &mut RegisterFile {
        &mut self.0
    }
}

/// IOP hardware register storage (`0x1F80_0000..0x1F81_0000`)
///
/// The EE bus only consults a couple of these (e.g. `HW_ICFG`), but the
/// full window is kept so the IOP side can share it.
pub struct IopRegisters(RegisterFile);

impl IopRegisters {
    pub fn new() -> Self {
        Self(RegisterFile::new(IOP_HW_SIZE))
    }
}

impl Default for IopRegisters {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for IopRegisters {
    type Target = RegisterFile;

    fn deref(&self) -> &RegisterFile {
        &self.0
    }
}

impl std::ops::DerefMut for IopRegisters {
    fn deref_mut(&mut self) -> &mut RegisterFile {
        &mut self.0
    }
}
