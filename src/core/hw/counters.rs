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

//! EE counters (register-read boundary)
//!
//! Four 16-bit counters live in two 4KB pages, two per page at a 0x800
//! stride. Each exposes COUNT, MODE and TARGET; counters 0 and 1 also have
//! a HOLD register latched on SBUS interrupts.
//!
//! ```text
//! 0x1000_0000  T0_COUNT   0x1000_0800  T1_COUNT
//! 0x1000_0010  T0_MODE    0x1000_0810  T1_MODE
//! 0x1000_0020  T0_TARGET  0x1000_0820  T1_TARGET
//! 0x1000_0030  T0_HOLD    0x1000_0830  T1_HOLD
//! 0x1000_1000  T2_COUNT   0x1000_1800  T3_COUNT   (no HOLD)
//! ```
//!
//! Counting itself is owned by the scheduler and is not modelled here.

use crate::core::memory::{HwDevice, HwRegisters};

/// One counter channel
#[derive(Debug, Clone, Copy, Default)]
pub struct Counter {
    pub count: u32,
    pub mode: u32,
    pub target: u32,
    pub hold: u32,
}

/// The four EE counters
#[derive(Debug, Default)]
pub struct Counters {
    pub channels: [Counter; 4],
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter index for an address on counter page 0 or 1
    #[inline(always)]
    pub fn index_of(address: u32) -> usize {
        let page = (address >> 12) & 0x1;
        ((page << 1) | ((address >> 11) & 1)) as usize
    }
}

impl HwDevice for Counters {
    fn address_range(&self) -> (u32, u32) {
        (0x1000_0000, 0x1000_1FFF)
    }

    fn read32(&mut self, address: u32, raw: &HwRegisters) -> u32 {
        let index = Self::index_of(address);
        let counter = &self.channels[index];

        match address & 0x7FF {
            0x00 => counter.count & 0xFFFF,
            0x10 => counter.mode,
            0x20 => counter.target & 0xFFFF,
            0x30 if index < 2 => counter.hold & 0xFFFF,
            _ => raw.read32(address),
        }
    }

    fn reset(&mut self) {
        self.channels = [Counter::default(); 4];
    }

    fn name(&self) -> &'static str {
        "Counters"
    }
}
