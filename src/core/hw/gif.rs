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

//! GIF registers (low half of the DMAC page)
//!
//! Only GIF_STAT is synthesised (its FQC field mirrors the GIF FIFO). Every
//! other GIF register reads its raw backing value.

use crate::core::memory::map::GIF_STAT;
use crate::core::memory::{HwDevice, HwRegisters};

/// GIF FIFO depth in quadwords
pub const GIF_FIFO_DEPTH: usize = 16;

const FQC_SHIFT: u32 = 24;
const FQC_MASK: u32 = 0x1F << FQC_SHIFT;

/// GIF register state
///
/// The GIF FIFO is write-only from the EE bus, so only its occupancy is
/// tracked here.
#[derive(Debug, Default)]
pub struct Gif {
    /// Quadwords waiting in the GIF FIFO
    pub fifo_count: usize,
}

impl Gif {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HwDevice for Gif {
    fn address_range(&self) -> (u32, u32) {
        (0x1000_3000, 0x1000_37FF)
    }

    fn read32(&mut self, address: u32, raw: &HwRegisters) -> u32 {
        if address & 0x1FFF_FFFF == GIF_STAT {
            let fqc = (self.fifo_count.min(GIF_FIFO_DEPTH) as u32) << FQC_SHIFT;
            return (raw.read32(address) & !FQC_MASK) | fqc;
        }
        raw.read32(address)
    }

    fn reset(&mut self) {
        self.fifo_count = 0;
    }

    fn name(&self) -> &'static str {
        "GIF"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_fqc_overrides_raw_field() {
        let mut gif = Gif::new();
        let mut raw = HwRegisters::new();
        raw.write32(GIF_STAT, 0x1F00_0C00);
        gif.fifo_count = 5;

        assert_eq!(gif.read32(GIF_STAT, &raw), 0x0500_0C00);
    }

    #[test]
    fn test_other_registers_are_raw() {
        let mut gif = Gif::new();
        let mut raw = HwRegisters::new();
        raw.write32(0x1000_3010, 0x4);

        assert_eq!(gif.read32(0x1000_3010, &raw), 0x4);
    }
}
