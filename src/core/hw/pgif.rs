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

//! PGIF: PS1 GPU interface bridge on the SBUS
//!
//! In PS1 compatibility mode the EE emulates the PS1 GPU and talks to the IOP
//! through a window at `0x1000_F300..0x1000_F400`. Reads of the two FIFO
//! ports drain words that the IOP side queued; everything else is a plain
//! register.

use std::collections::VecDeque;

use crate::core::memory::map::{SBUS_PS1_END, SBUS_PS1_START};
use crate::core::memory::{HwDevice, HwRegisters};

pub const PGPU_STAT: u32 = 0x1000_F300;
pub const PGIF_CTRL: u32 = 0x1000_F380;
pub const PGPU_CMD_FIFO: u32 = 0x1000_F3C0;
pub const PGPU_DAT_FIFO: u32 = 0x1000_F3E0;

const REGISTER_COUNT: usize = ((SBUS_PS1_END - SBUS_PS1_START) / 4) as usize;

/// PS1 GPU bridge state
#[derive(Debug)]
pub struct Pgif {
    registers: Vec<u32>,
    cmd_fifo: VecDeque<u32>,
    data_fifo: VecDeque<u32>,
}

impl Pgif {
    pub fn new() -> Self {
        Self {
            registers: vec![0; REGISTER_COUNT],
            cmd_fifo: VecDeque::new(),
            data_fifo: VecDeque::new(),
        }
    }

    #[inline(always)]
    fn index_of(address: u32) -> usize {
        ((address & 0x1FFF_FFFF).wrapping_sub(SBUS_PS1_START) >> 2) as usize
    }

    /// Set a plain bridge register
    ///
    /// Addresses outside the bridge window are ignored.
    pub fn set_register(&mut self, address: u32, value: u32) {
        match self.registers.get_mut(Self::index_of(address)) {
            Some(reg) => *reg = value,
            None => log::warn!("PGIF register write outside window at 0x{:08X}", address),
        }
    }

    /// Queue a word on the GP0 command port
    pub fn push_command(&mut self, word: u32) {
        self.cmd_fifo.push_back(word);
    }

    /// Queue a word on the data (DMA) port
    pub fn push_data(&mut self, word: u32) {
        self.data_fifo.push_back(word);
    }

    /// Words waiting on the data port
    pub fn data_len(&self) -> usize {
        self.data_fifo.len()
    }

    /// Read four words at once (128-bit access)
    ///
    /// FIFO ports pop four words; plain registers return the four
    /// consecutive registers starting at `address`.
    pub fn read_qword(&mut self, address: u32) -> u128 {
        let paddr = address & 0x1FFF_FFFF;
        let mut words = [0u32; 4];
        match paddr {
            PGPU_DAT_FIFO => {
                for word in &mut words {
                    *word = Self::pop(&mut self.data_fifo, "data");
                }
            }
            PGPU_CMD_FIFO => {
                for word in &mut words {
                    *word = Self::pop(&mut self.cmd_fifo, "command");
                }
            }
            _ => {
                let base = Self::index_of(paddr);
                for (i, word) in words.iter_mut().enumerate() {
                    *word = self.registers.get(base + i).copied().unwrap_or(0);
                }
            }
        }

        words
            .iter()
            .enumerate()
            .fold(0u128, |acc, (i, &w)| acc | ((w as u128) << (32 * i)))
    }

    fn pop(fifo: &mut VecDeque<u32>, port: &str) -> u32 {
        fifo.pop_front().unwrap_or_else(|| {
            log::debug!("PGIF {} port read while empty", port);
            0
        })
    }
}

impl Default for Pgif {
    fn default() -> Self {
        Self::new()
    }
}

impl HwDevice for Pgif {
    fn address_range(&self) -> (u32, u32) {
        (SBUS_PS1_START, SBUS_PS1_END - 1)
    }

    fn read32(&mut self, address: u32, _raw: &HwRegisters) -> u32 {
        match address & 0x1FFF_FFFF {
            PGPU_DAT_FIFO => Self::pop(&mut self.data_fifo, "data"),
            PGPU_CMD_FIFO => Self::pop(&mut self.cmd_fifo, "command"),
            // Bits 8-12 report the data port fill level
            PGIF_CTRL => {
                let fill = (self.data_fifo.len().min(0x1F) as u32) << 8;
                (self.registers[Self::index_of(PGIF_CTRL)] & !0x1F00) | fill
            }
            paddr => self.registers.get(Self::index_of(paddr)).copied().unwrap_or(0),
        }
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    fn name(&self) -> &'static str {
        "PGIF"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_port_pops() {
        let mut pgif = Pgif::new();
        let raw = HwRegisters::new();
        pgif.push_data(0x11);
        pgif.push_data(0x22);

        assert_eq!(pgif.read32(PGPU_DAT_FIFO, &raw), 0x11);
        assert_eq!(pgif.read32(PGPU_DAT_FIFO, &raw), 0x22);
        assert_eq!(pgif.read32(PGPU_DAT_FIFO, &raw), 0);
    }

    #[test]
    fn test_qword_read_packs_little_endian() {
        let mut pgif = Pgif::new();
        for word in [1, 2, 3, 4] {
            pgif.push_data(word);
        }

        assert_eq!(
            pgif.read_qword(PGPU_DAT_FIFO),
            0x0000_0004_0000_0003_0000_0002_0000_0001
        );
        assert_eq!(pgif.data_len(), 0);
    }

    #[test]
    fn test_ctrl_reports_fill() {
        let mut pgif = Pgif::new();
        let raw = HwRegisters::new();
        pgif.set_register(PGIF_CTRL, 0x1);
        pgif.push_data(7);
        pgif.push_data(8);

        assert_eq!(pgif.read32(PGIF_CTRL, &raw), 0x201);
    }

    #[test]
    fn test_set_register_outside_window_is_ignored() {
        let mut pgif = Pgif::new();
        let raw = HwRegisters::new();
        pgif.set_register(SBUS_PS1_START - 4, 0x11);
        pgif.set_register(SBUS_PS1_END, 0x22);
        pgif.set_register(SBUS_PS1_END - 4, 0x33);

        assert_eq!(pgif.read32(SBUS_PS1_START, &raw), 0);
        assert_eq!(pgif.read32(SBUS_PS1_END - 4, &raw), 0x33);
    }
}
