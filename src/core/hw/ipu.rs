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

//! IPU (Image Processing Unit) register and FIFO boundary
//!
//! The IPU is the only device with genuine 64-bit registers: `IPU_CMD` and
//! `IPU_TOP` carry a BUSY flag in bit 63 above 32 bits of data. It also owns
//! two 8-quadword FIFOs: the input FIFO (written by the EE/DMA, write-only from
//! the bus) and the output FIFO (readable at `0x1000_7000`).

use std::collections::VecDeque;

use crate::core::memory::map::{IPU_BP, IPU_CMD, IPU_CTRL, IPU_TOP};
use crate::core::memory::{FifoDevice, HwDevice, HwRegisters};

/// Depth of each IPU FIFO in quadwords
pub const IPU_FIFO_DEPTH: usize = 8;

const BUSY: u64 = 1 << 63;

/// IPU register state and FIFOs
#[derive(Debug, Default)]
pub struct Ipu {
    pub cmd_data: u32,
    pub cmd_busy: bool,
    /// IPU_CTRL without the IFC/OFC occupancy fields
    pub ctrl: u32,
    /// Bitstream pointer (bits 0-6)
    pub bp: u32,
    /// Bitstream FIFO fill (FP, bits 16-17 of IPU_BP)
    pub fp: u32,
    pub top_data: u32,
    pub top_busy: bool,
    in_fifo: VecDeque<u128>,
    out_fifo: VecDeque<u128>,
}

impl Ipu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a decoded quadword for the EE to read
    ///
    /// # Returns
    ///
    /// `false` if the output FIFO is already full (the quadword is dropped)
    pub fn push_output(&mut self, qword: u128) -> bool {
        if self.out_fifo.len() >= IPU_FIFO_DEPTH {
            return false;
        }
        self.out_fifo.push_back(qword);
        true
    }

    /// Queue a quadword on the input side (DMA to IPU)
    pub fn push_input(&mut self, qword: u128) -> bool {
        if self.in_fifo.len() >= IPU_FIFO_DEPTH {
            return false;
        }
        self.in_fifo.push_back(qword);
        true
    }

    /// Input FIFO occupancy (IFC)
    pub fn input_len(&self) -> usize {
        self.in_fifo.len()
    }

    fn ctrl_value(&self) -> u32 {
        let ifc = self.in_fifo.len() as u32 & 0xF;
        let ofc = self.out_fifo.len() as u32 & 0xF;
        (self.ctrl & !0xFF) | ifc | (ofc << 4)
    }

    fn bp_value(&self) -> u32 {
        let ifc = self.in_fifo.len() as u32 & 0xF;
        (self.bp & 0x7F) | (ifc << 8) | ((self.fp & 0x3) << 16)
    }
}

impl HwDevice for Ipu {
    fn address_range(&self) -> (u32, u32) {
        (0x1000_2000, 0x1000_2FFF)
    }

    fn read32(&mut self, address: u32, raw: &HwRegisters) -> u32 {
        match address & 0x1FFF_FFFF {
            IPU_CMD => self.cmd_data,
            IPU_CTRL => self.ctrl_value(),
            IPU_BP => self.bp_value(),
            IPU_TOP => self.top_data,
            _ => raw.read32(address),
        }
    }

    fn read64(&mut self, address: u32, raw: &HwRegisters) -> u64 {
        match address & 0x1FFF_FFFF {
            IPU_CMD => self.cmd_data as u64 | if self.cmd_busy { BUSY } else { 0 },
            IPU_TOP => self.top_data as u64 | if self.top_busy { BUSY } else { 0 },
            _ => self.read32(address, raw) as u64,
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn name(&self) -> &'static str {
        "IPU"
    }
}

impl FifoDevice for Ipu {
    fn read_fifo(&mut self) -> u128 {
        match self.out_fifo.pop_front() {
            Some(qword) => qword,
            None => {
                log::debug!("IPUout FIFO read while empty");
                0
            }
        }
    }

    fn fifo_len(&self) -> usize {
        self.out_fifo.len()
    }
}
