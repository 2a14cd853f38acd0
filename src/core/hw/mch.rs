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

//! Memory controller (RDRAM) handshake
//!
//! The BIOS probes memory by writing a request into `MCH_RICM` and reading the
//! answer back from `MCH_DRD`.
//!
//! ```text
//! MCH_RICM: x:4 | SA:12 | x:5 | SDEV:1 | SOP:4 | SBC:1 | SDEV:5
//!                 ^ request code (bits 16-27)   ^ SOP (bits 6-9)
//! ```
//!
//! Only requests with `SOP == 0` produce data. INIT enumerates devices one
//! at a time until the configured device limit is reached.

use crate::core::memory::map::{MCH_DRD, MCH_RICM};
use crate::core::memory::HwRegisters;

/// Request codes understood by `MCH_DRD`
pub mod request {
    pub const INIT: u32 = 0x21;
    pub const CNFGA: u32 = 0x23;
    pub const CNFGB: u32 = 0x24;
    pub const DEVID: u32 = 0x40;
}

/// Default number of RDRAM devices on a retail console
pub const DEFAULT_RDRAM_DEVICES: u32 = 2;

/// Handshake answer to INIT while devices remain
const INIT_ACK: u32 = 0x1F;
/// PVER=3 | MVER=16 | DBL=1 | REFBIT=5
const CNFGA_VALUE: u32 = 0x0D0D;
/// SVER=0 | CORG=4 (5x9x6) | SPT=1 | DEVTYP=0 | BYTE=0
const CNFGB_VALUE: u32 = 0x0090;

const BUSY: u32 = 0x8000_0000;

#[inline(always)]
fn request_code(ricm: u32) -> u32 {
    (ricm >> 16) & 0xFFF
}

#[inline(always)]
fn serial_op(ricm: u32) -> u32 {
    (ricm >> 6) & 0xF
}

/// Memory controller handshake state
#[derive(Debug, Clone)]
pub struct MemoryController {
    /// Devices enumerated so far by INIT
    sdevid: u32,
    /// Number of RDRAM devices that answer INIT
    devices: u32,
}

impl MemoryController {
    /// Create a controller with `devices` RDRAM devices attached
    pub fn new(devices: u32) -> Self {
        Self { sdevid: 0, devices }
    }

    /// Devices enumerated so far
    pub fn enumerated(&self) -> u32 {
        self.sdevid
    }

    /// Store a request into `MCH_RICM`
    ///
    /// An INIT with `SOP == 1` while the SIO repeater bit (`MCH_DRD` bit 7) is
    /// clear restarts enumeration. The busy bit never sticks.
    pub fn write_ricm(&mut self, raw: &mut HwRegisters, value: u32) {
        let repeater = (raw.read32(MCH_DRD) >> 7) & 1;
        if request_code(value) == request::INIT && serial_op(value) == 1 && repeater == 0 {
            self.sdevid = 0;
        }
        raw.write32(MCH_RICM, value & !BUSY);
    }

    /// Answer a read of `MCH_DRD` for the request currently in `MCH_RICM`
    pub fn read_drd(&mut self, raw: &HwRegisters) -> u32 {
        let ricm = raw.read32(MCH_RICM);
        if serial_op(ricm) != 0 {
            return 0;
        }

        match request_code(ricm) {
            request::INIT => {
                self.sdevid = (self.sdevid + 1).min(self.devices);
                if self.sdevid < self.devices {
                    INIT_ACK
                } else {
                    0
                }
            }
            request::CNFGA => CNFGA_VALUE,
            request::CNFGB => CNFGB_VALUE,
            request::DEVID => ricm & 0x1F,
            code => {
                log::debug!("MCH_DRD read for unknown request 0x{:03X}", code);
                0
            }
        }
    }

    /// Restart enumeration
    pub fn reset(&mut self) {
        self.sdevid = 0;
    }
}

impl Default for MemoryController {
    fn default() -> Self {
        Self::new(DEFAULT_RDRAM_DEVICES)
    }
}
