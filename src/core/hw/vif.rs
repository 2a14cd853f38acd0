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

//! VIF0/VIF1 register windows and FIFOs
//!
//! Both VIFs expose a 0x400-byte register window on the DMAC page
//! (VIF0 at `0x1000_3800`, VIF1 at `0x1000_3C00`), one register per
//! 16-byte slot. VIF1 can also run its FIFO "backwards" (VU/GS to EE) when
//! `STAT.FDR` is set; that is the only time the EE can drain it.

use std::collections::VecDeque;

use bitflags::bitflags;

use crate::core::memory::map::{VIF0_START, VIF1_START};
use crate::core::memory::{FifoDevice, HwDevice, HwRegisters};

bitflags! {
    /// VIFn_STAT register bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct VifStat: u32 {
        /// VIF packet status (2 bits)
        const VPS = 0b11;
        /// E-bit wait
        const VEW = 1 << 2;
        /// GIF wait (VIF1 only)
        const VGW = 1 << 3;
        /// MARK detected
        const MRK = 1 << 6;
        /// Double buffer flag (VIF1 only)
        const DBF = 1 << 7;
        /// Stopped by STOP
        const VSS = 1 << 8;
        /// Stopped by ForceBreak
        const VFS = 1 << 9;
        /// Stopped by interrupt
        const VIS = 1 << 10;
        /// Interrupt bit detected
        const INT = 1 << 11;
        /// DMAtag mismatch error
        const ER0 = 1 << 12;
        /// Invalid command error
        const ER1 = 1 << 13;
        /// FIFO direction: set means VU -> EE (VIF1 only)
        const FDR = 1 << 23;
        /// FIFO quadword count (read-only, computed)
        const FQC = 0x1F << 24;
    }
}

const SLOT_STAT: usize = 0x00;
const SLOT_FBRST: usize = 0x01;

/// One VIF unit
#[derive(Debug)]
pub struct Vif {
    index: usize,
    pub stat: VifStat,
    /// Register slots, one per 16 bytes of the window
    slots: [u32; 0x40],
    fifo: VecDeque<u128>,
}

impl Vif {
    /// Create VIF0 (`index == 0`) or VIF1 (`index == 1`)
    pub fn new(index: usize) -> Self {
        debug_assert!(index < 2);
        Self {
            index,
            stat: VifStat::empty(),
            slots: [0; 0x40],
            fifo: VecDeque::new(),
        }
    }

    /// FIFO depth in quadwords
    pub fn fifo_depth(&self) -> usize {
        if self.index == 0 {
            8
        } else {
            16
        }
    }

    fn base(&self) -> u32 {
        if self.index == 0 {
            VIF0_START
        } else {
            VIF1_START
        }
    }

    #[inline(always)]
    fn slot_of(&self, address: u32) -> usize {
        (((address & 0x1FFF_FFFF).wrapping_sub(self.base())) >> 4) as usize & 0x3F
    }

    /// Set the value backing a register slot (e.g. VIFn_ROW0)
    ///
    /// Addresses outside this unit's window are ignored.
    pub fn set_register(&mut self, address: u32, value: u32) {
        if !self.contains(address) {
            log::warn!("{} register write outside window at 0x{:08X}", self.name(), address);
            return;
        }
        let slot = self.slot_of(address);
        if slot == SLOT_STAT {
            self.stat = VifStat::from_bits_truncate(value) - VifStat::FQC;
        } else {
            self.slots[slot] = value;
        }
    }

    /// Queue a quadword on the FIFO
    ///
    /// # Returns
    ///
    /// `false` if the FIFO is full
    pub fn push_fifo(&mut self, qword: u128) -> bool {
        if self.fifo.len() >= self.fifo_depth() {
            return false;
        }
        self.fifo.push_back(qword);
        true
    }

    fn stat_value(&self) -> u32 {
        let fqc = (self.fifo.len() as u32) << 24;
        (self.stat - VifStat::FQC).bits() | (fqc & VifStat::FQC.bits())
    }
}

impl HwDevice for Vif {
    fn address_range(&self) -> (u32, u32) {
        (self.base(), self.base() + 0x3FF)
    }

    fn read32(&mut self, address: u32, _raw: &HwRegisters) -> u32 {
        match self.slot_of(address) {
            SLOT_STAT => self.stat_value(),
            // FBRST is write-only
            SLOT_FBRST => 0,
            slot => self.slots[slot],
        }
    }

    fn reset(&mut self) {
        let index = self.index;
        *self = Self::new(index);
    }

    fn name(&self) -> &'static str {
        if self.index == 0 {
            "VIF0"
        } else {
            "VIF1"
        }
    }
}

impl FifoDevice for Vif {
    fn read_fifo(&mut self) -> u128 {
        if self.index == 0 || !self.stat.contains(VifStat::FDR) {
            log::debug!("{} FIFO read with EE -> VU direction, ignored", self.name());
            return 0;
        }

        if self
            .stat
            .intersects(VifStat::INT | VifStat::VSS | VifStat::VIS | VifStat::VFS)
        {
            log::debug!("{} FIFO read while stalled", self.name());
        }

        match self.fifo.pop_front() {
            Some(qword) => qword,
            None => {
                log::debug!("{} FIFO read while empty", self.name());
                0
            }
        }
    }

    fn fifo_len(&self) -> usize {
        self.fifo.len()
    }
}
