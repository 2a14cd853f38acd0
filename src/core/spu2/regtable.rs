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

//! SPU2 register table
//!
//! Maps every half-word offset of the 0x800-byte SPU2 register window to the
//! [`RegSlot`] that stores it, so a register access is one array index.
//!
//! # Layout
//!
//! Each core occupies 0x400 bytes (core 1 repeats core 0's layout at +0x400):
//!
//! ```text
//! 0x000  voice params     24 x {VOLL VOLR PITCH ADSR1 ADSR2 ENVX VOLXL VOLXR}
//! 0x180  PMON NON VMIXL VMIXEL VMIXR VMIXER   (low half, then high half)
//! 0x198  MMIX ATTR
//! 0x19C  IRQA             (high half, then low half)
//! 0x1A0  -- key on/off strobes, no storage --
//! 0x1A8  TSA              (high, low)
//! 0x1B0  ADMAS
//! 0x1C0  voice addresses  24 x {SSA LSAX NAX} (high, low)
//! 0x2E0  ESA              (high, low)
//! 0x2E4  reverb addresses 22 x (high, low)
//! 0x33C  EEA              (high, low)
//! 0x340  ENDX             (low, high)
//! 0x344  STATX
//! ```
//!
//! The shared tail holds the volume blocks of both cores at `0x760`/`0x788`
//! and the S/PDIF block at `0x7C0`. Offsets without a dedicated field fall
//! back to [`RegSlot::Raw`].
//!
//! # Example
//!
//! ```
//! use ps2rx::core::spu2::regtable::{self, RegTable};
//! use ps2rx::core::spu2::regs::{CoreReg, Half, RegSlot};
//!
//! let table: &'static RegTable = regtable::init();
//! assert_eq!(
//!     table.slot(0x19C),
//!     RegSlot::Core { core: 0, reg: CoreReg::Irqa(Half::High) }
//! );
//! assert_eq!(table.slot(0x1A0), RegSlot::Raw(0x1A0));
//! ```

use std::sync::OnceLock;

use super::regs::{
    CoreReg, Half, RegSlot, ReverbAddr, ReverbVol, Side, SpdifReg, VoiceReg, CORE_COUNT,
    VOICE_COUNT,
};

/// Size of the SPU2 register window in bytes
pub const WINDOW_SIZE: usize = 0x800;

/// Number of table entries (one per half-word)
pub const TABLE_LEN: usize = WINDOW_SIZE / 2;

/// Byte stride between core 0 and core 1 register blocks
pub const CORE_STRIDE: usize = 0x400;

/// Dense offset → slot table for the SPU2 register window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegTable {
    slots: Vec<RegSlot>,
}

static REG_TABLE: OnceLock<RegTable> = OnceLock::new();

/// Build the process-wide table, or return it if already built
///
/// Called once during startup. Later calls hand back the same instance;
/// the table is never rebuilt.
pub fn init() -> &'static RegTable {
    let mut built = false;
    let table = REG_TABLE.get_or_init(|| {
        built = true;
        RegTable::build()
    });
    if built {
        log::debug!("SPU2 register table built ({} entries)", table.len());
    } else {
        log::trace!("SPU2 register table already built, reusing");
    }
    table
}

/// The process-wide table, if [`init`] has run
pub fn get() -> Option<&'static RegTable> {
    REG_TABLE.get()
}

/// Sequential builder for the literal binding sequence
///
/// Entries are pushed in offset order; `None` marks a port with no dedicated
/// field.
struct Builder {
    entries: Vec<Option<RegSlot>>,
}

impl Builder {
    fn new() -> Self {
        Self {
            entries: Vec::with_capacity(TABLE_LEN),
        }
    }

    /// Byte offset of the next entry
    fn offset(&self) -> usize {
        self.entries.len() * 2
    }

    fn push(&mut self, slot: RegSlot) {
        self.entries.push(Some(slot));
    }

    fn unbound(&mut self, count: usize) {
        self.entries.extend(std::iter::repeat_n(None, count));
    }

    /// Leave every port up to (not including) `offset` unbound
    fn unbound_until(&mut self, offset: usize) {
        debug_assert!(self.offset() <= offset, "SPU2 table overran 0x{:03X}", offset);
        let count = (offset - self.offset()) / 2;
        self.unbound(count);
    }

    fn core(&mut self, core: u8, reg: CoreReg) {
        self.push(RegSlot::Core { core, reg });
    }

    fn voice(&mut self, core: u8, voice: u8, reg: VoiceReg) {
        self.push(RegSlot::Voice { core, voice, reg });
    }

    /// 32-bit core field exposed low half first
    fn core_lo_hi(&mut self, core: u8, reg: fn(Half) -> CoreReg) {
        self.core(core, reg(Half::Low));
        self.core(core, reg(Half::High));
    }

    /// 32-bit core field exposed high half first
    fn core_hi_lo(&mut self, core: u8, reg: fn(Half) -> CoreReg) {
        self.core(core, reg(Half::High));
        self.core(core, reg(Half::Low));
    }

    fn voice_params(&mut self, core: u8) {
        for voice in 0..VOICE_COUNT as u8 {
            for reg in [
                VoiceReg::VolL,
                VoiceReg::VolR,
                VoiceReg::Pitch,
                VoiceReg::Adsr1,
                VoiceReg::Adsr2,
                VoiceReg::EnvX,
                VoiceReg::VolXL,
                VoiceReg::VolXR,
            ] {
                self.voice(core, voice, reg);
            }
        }
    }

    fn voice_addresses(&mut self, core: u8) {
        for voice in 0..VOICE_COUNT as u8 {
            let regs: [fn(Half) -> VoiceReg; 3] = [VoiceReg::Ssa, VoiceReg::Lsax, VoiceReg::Nax];
            for reg in regs {
                self.voice(core, voice, reg(Half::High));
                self.voice(core, voice, reg(Half::Low));
            }
        }
    }

    /// Everything from 0x000 to 0x346 of one core
    fn core_block(&mut self, core: u8) {
        let base = core as usize * CORE_STRIDE;

        self.voice_params(core);
        debug_assert_eq!(self.offset(), base + 0x180);

        self.core_lo_hi(core, CoreReg::Pmon);
        self.core_lo_hi(core, CoreReg::Non);
        self.core_lo_hi(core, CoreReg::VmixL);
        self.core_lo_hi(core, CoreReg::VmixEL);
        self.core_lo_hi(core, CoreReg::VmixR);
        self.core_lo_hi(core, CoreReg::VmixER);
        self.core(core, CoreReg::Mmix);
        self.core(core, CoreReg::Attr);
        self.core_hi_lo(core, CoreReg::Irqa);

        // KON/KOFF are write strobes with no backing field
        self.unbound(4);
        self.core_hi_lo(core, CoreReg::Tsa);
        self.unbound_until(base + 0x1B0);
        self.core(core, CoreReg::Admas);
        self.unbound_until(base + 0x1C0);

        self.voice_addresses(core);
        debug_assert_eq!(self.offset(), base + 0x2E0);

        self.core_hi_lo(core, CoreReg::Esa);
        for addr in ReverbAddr::ALL {
            self.core(core, CoreReg::Reverb(addr, Half::High));
            self.core(core, CoreReg::Reverb(addr, Half::Low));
        }
        self.core_hi_lo(core, CoreReg::Eea);
        self.core_lo_hi(core, CoreReg::Endx);
        self.core(core, CoreReg::Statx);
        debug_assert_eq!(self.offset(), base + 0x346);
    }

    /// Volume block of one core in the shared 0x760 area
    fn volume_block(&mut self, core: u8) {
        for side in [Side::Left, Side::Right] {
            self.core(core, CoreReg::Mvol(side));
        }
        let regs: [fn(Side) -> CoreReg; 3] = [CoreReg::Evol, CoreReg::Avol, CoreReg::Bvol];
        for reg in regs {
            self.core(core, reg(Side::Left));
            self.core(core, reg(Side::Right));
        }
        for side in [Side::Left, Side::Right] {
            self.core(core, CoreReg::MvolX(side));
        }
        for vol in ReverbVol::ALL {
            self.core(core, CoreReg::ReverbVol(vol));
        }
    }

    fn spdif_block(&mut self) {
        for reg in [
            SpdifReg::Out,
            SpdifReg::IrqInfo,
            SpdifReg::Unknown1,
            SpdifReg::Mode,
            SpdifReg::Media,
            SpdifReg::Unknown2,
            SpdifReg::Protect,
        ] {
            self.push(RegSlot::Spdif(reg));
        }
    }

    /// The complete literal sequence, with unbound gaps
    fn literal(mut self) -> Vec<Option<RegSlot>> {
        self.core_block(0);
        self.unbound_until(CORE_STRIDE);

        self.core_block(1);
        self.unbound_until(0x760);

        for core in 0..CORE_COUNT as u8 {
            self.volume_block(core);
        }
        debug_assert_eq!(self.offset(), 0x7B0);

        self.unbound_until(0x7C0);
        self.spdif_block();
        self.unbound_until(WINDOW_SIZE);

        debug_assert_eq!(self.entries.len(), TABLE_LEN);
        self.entries
    }
}

impl RegTable {
    /// Build a fresh table
    ///
    /// Materialises the literal binding sequence, then binds every port that
    /// is still unbound to its generic per-offset storage cell. The result
    /// has exactly [`TABLE_LEN`] entries and no unbound ones.
    ///
    /// Prefer [`init`], which builds once and shares the result.
    pub fn build() -> Self {
        let slots = Builder::new()
            .literal()
            .into_iter()
            .enumerate()
            .map(|(index, slot)| slot.unwrap_or(RegSlot::Raw((index * 2) as u16)))
            .collect();

        Self { slots }
    }

    /// Slot for a byte offset within the window
    ///
    /// The offset is masked to the window and rounded down to a half-word.
    #[inline(always)]
    pub fn slot(&self, offset: u32) -> RegSlot {
        self.slots[((offset as usize) & (WINDOW_SIZE - 1)) >> 1]
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All entries in offset order
    pub fn slots(&self) -> &[RegSlot] {
        &self.slots
    }

    /// `(byte offset, slot)` pairs in offset order
    pub fn iter(&self) -> impl Iterator<Item = (u32, RegSlot)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, &slot)| ((index * 2) as u32, slot))
    }
}
