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

//! SPU2 (Sound Processing Unit 2) register state
//!
//! Two SPU2 cores, each with 24 voices, share one 0x800-byte register window
//! on the IOP bus at `0x1F90_0000`. This module holds the register-visible
//! state only; mixing, ADPCM decoding and reverb are not modelled.
//!
//! Register accesses go through the [`regtable::RegTable`]: the table names
//! the slot, and [`Spu2::reg`] / [`Spu2::set_reg`] resolve the slot to the
//! field it stores.
//!
//! # Example
//!
//! ```
//! use ps2rx::core::spu2::{regtable, Spu2};
//!
//! let table = regtable::init();
//! let mut spu2 = Spu2::new();
//!
//! // Core 0, voice 1 pitch lives at offset 0x014
//! spu2.write16(table, 0x014, 0x1000);
//! assert_eq!(spu2.cores[0].voices[1].pitch, 0x1000);
//! assert_eq!(spu2.read16(table, 0x014), 0x1000);
//! ```

pub mod regs;
pub mod regtable;

#[cfg(test)]
mod tests;

use regs::{Core, RegSlot, Spdif};
use regtable::{RegTable, TABLE_LEN, WINDOW_SIZE};

/// SPU2 register-visible state
pub struct Spu2 {
    pub cores: [Core; 2],
    pub spdif: Spdif,
    /// Generic storage for ports without a dedicated field, one per half-word
    raw: Vec<u16>,
}

impl Spu2 {
    pub fn new() -> Self {
        Self {
            cores: [Core::default(), Core::default()],
            spdif: Spdif::default(),
            raw: vec![0; TABLE_LEN],
        }
    }

    /// Read the port a slot names
    pub fn reg(&self, slot: RegSlot) -> u16 {
        match slot {
            RegSlot::Voice { core, voice, reg } => {
                self.cores[core as usize].voices[voice as usize].reg(reg)
            }
            RegSlot::Core { core, reg } => self.cores[core as usize].reg(reg),
            RegSlot::Spdif(reg) => self.spdif.reg(reg),
            RegSlot::Raw(offset) => self.raw[(offset as usize & (WINDOW_SIZE - 1)) >> 1],
        }
    }

    /// Write the port a slot names
    pub fn set_reg(&mut self, slot: RegSlot, value: u16) {
        match slot {
            RegSlot::Voice { core, voice, reg } => {
                self.cores[core as usize].voices[voice as usize].set_reg(reg, value)
            }
            RegSlot::Core { core, reg } => self.cores[core as usize].set_reg(reg, value),
            RegSlot::Spdif(reg) => self.spdif.set_reg(reg, value),
            RegSlot::Raw(offset) => {
                self.raw[(offset as usize & (WINDOW_SIZE - 1)) >> 1] = value;
            }
        }
    }

    /// Read a 16-bit register by window offset
    #[inline]
    pub fn read16(&self, table: &RegTable, offset: u32) -> u16 {
        debug_assert!(offset & 1 == 0, "unaligned SPU2 read at 0x{:03X}", offset);
        self.reg(table.slot(offset))
    }

    /// Write a 16-bit register by window offset
    #[inline]
    pub fn write16(&mut self, table: &RegTable, offset: u32, value: u16) {
        debug_assert!(offset & 1 == 0, "unaligned SPU2 write at 0x{:03X}", offset);
        self.set_reg(table.slot(offset), value);
    }

    /// Clear all register state in place
    pub fn reset(&mut self) {
        for core in &mut self.cores {
            *core = Core::default();
        }
        self.spdif = Spdif::default();
        self.raw.fill(0);
    }
}

impl Default for Spu2 {
    fn default() -> Self {
        Self::new()
    }
}
