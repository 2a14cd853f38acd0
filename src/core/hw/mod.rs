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

//! Hardware state aggregate
//!
//! Every piece of live hardware state the register bus can observe is owned
//! by one [`Hardware`] value and passed by `&mut` into the dispatcher. There
//! are no global singletons: two `Hardware` values are two independent
//! consoles.
//!
//! The subsystem types here model each device at its register-read boundary
//! only (what a load returns, which FIFO it drains). Their internal behaviour
//! (counting, decoding, transfers) belongs to the subsystems themselves.

pub mod counters;
pub mod cycles;
pub mod gif;
pub mod ipu;
pub mod mch;
pub mod pgif;
pub mod vif;

pub use counters::Counters;
pub use cycles::CycleState;
pub use gif::Gif;
pub use ipu::Ipu;
pub use mch::MemoryController;
pub use pgif::Pgif;
pub use vif::{Vif, VifStat};

use crate::core::config::GameFixes;
use crate::core::memory::map::HW_ICFG;
use crate::core::memory::{HwDevice, HwRegisters, IopRegisters};
use crate::core::spu2::Spu2;

/// `HW_ICFG` bit set while the IOP runs in PS1 compatibility mode
pub const ICFG_PS1_MODE: u32 = 1 << 3;

/// All hardware state reachable from the EE register bus
pub struct Hardware {
    /// Raw EE register backing store
    pub regs: HwRegisters,
    /// Raw IOP register backing store
    pub iop: IopRegisters,
    pub cycles: CycleState,
    pub counters: Counters,
    pub ipu: Ipu,
    pub gif: Gif,
    pub vif0: Vif,
    pub vif1: Vif,
    pub pgif: Pgif,
    pub mch: MemoryController,
    pub spu2: Spu2,
    /// Game-specific behaviour overrides
    pub fixes: GameFixes,
}

impl Hardware {
    /// Create power-on hardware state
    ///
    /// # Arguments
    ///
    /// * `rdram_devices` - Device limit for the memory-controller handshake
    /// * `fixes` - Active game fixes
    pub fn new(rdram_devices: u32, fixes: GameFixes) -> Self {
        Self {
            regs: HwRegisters::new(),
            iop: IopRegisters::new(),
            cycles: CycleState::new(),
            counters: Counters::new(),
            ipu: Ipu::new(),
            gif: Gif::new(),
            vif0: Vif::new(0),
            vif1: Vif::new(1),
            pgif: Pgif::new(),
            mch: MemoryController::new(rdram_devices),
            spu2: Spu2::new(),
            fixes,
        }
    }

    /// Whether the IOP is in PS1 compatibility mode (`HW_ICFG` bit 3)
    pub fn ps1_mode(&self) -> bool {
        self.iop.read32(HW_ICFG) & ICFG_PS1_MODE != 0
    }

    /// Re-seed every device to power-on state
    ///
    /// Structures are reset in place, never reallocated, so handles into
    /// them (such as SPU2 register slots) stay meaningful.
    pub fn reset(&mut self) {
        self.regs.reset();
        self.iop.reset();
        self.cycles = CycleState::new();
        self.mch.reset();
        self.spu2.reset();

        let devices: [&mut dyn HwDevice; 6] = [
            &mut self.counters,
            &mut self.ipu,
            &mut self.gif,
            &mut self.vif0,
            &mut self.vif1,
            &mut self.pgif,
        ];
        for device in devices {
            log::trace!("Resetting {}", device.name());
            device.reset();
        }
    }
}

impl Default for Hardware {
    fn default() -> Self {
        Self::new(mch::DEFAULT_RDRAM_DEVICES, GameFixes::default())
    }
}
