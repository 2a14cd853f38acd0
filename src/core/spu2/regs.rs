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

//! SPU2 register-backed state and register slot names
//!
//! Many SPU2 registers are 32-bit quantities exposed as two 16-bit ports.
//! Instead of aliasing into the middle of a field, each port is named by a
//! [`RegSlot`] carrying a [`Half`], and read or written through
//! [`low_half`]/[`high_half`] and their setters.

use serde::Serialize;

/// Voices per core
pub const VOICE_COUNT: usize = 24;

/// Number of SPU2 cores
pub const CORE_COUNT: usize = 2;

/// Low 16 bits of a 32-bit field
#[inline(always)]
pub fn low_half(field: u32) -> u16 {
    field as u16
}

/// High 16 bits of a 32-bit field
#[inline(always)]
pub fn high_half(field: u32) -> u16 {
    (field >> 16) as u16
}

/// Replace the low 16 bits of a 32-bit field
#[inline(always)]
pub fn set_low_half(field: &mut u32, value: u16) {
    *field = (*field & 0xFFFF_0000) | value as u32;
}

/// Replace the high 16 bits of a 32-bit field
#[inline(always)]
pub fn set_high_half(field: &mut u32, value: u16) {
    *field = (*field & 0x0000_FFFF) | ((value as u32) << 16);
}

#[inline(always)]
fn get_half(field: u32, half: Half) -> u16 {
    match half {
        Half::Low => low_half(field),
        Half::High => high_half(field),
    }
}

#[inline(always)]
fn set_half(field: &mut u32, half: Half, value: u16) {
    match half {
        Half::Low => set_low_half(field, value),
        Half::High => set_high_half(field, value),
    }
}

// Signed 32-bit fields expose only their low half-word.
#[inline(always)]
fn low_of_signed(field: i32) -> u16 {
    field as u16
}

#[inline(always)]
fn set_low_of_signed(field: &mut i32, value: u16) {
    let mut bits = *field as u32;
    set_low_half(&mut bits, value);
    *field = bits as i32;
}

/// Which 16-bit half of a 32-bit field a port maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Half {
    Low,
    High,
}

/// Stereo side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    Left,
    Right,
}

/// Per-voice register ports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VoiceReg {
    /// Volume left (VOLL)
    VolL,
    /// Volume right (VOLR)
    VolR,
    Pitch,
    Adsr1,
    Adsr2,
    /// Current envelope level (ENVX)
    EnvX,
    /// Current volume left (VOLXL)
    VolXL,
    /// Current volume right (VOLXR)
    VolXR,
    /// Start address (SSA)
    Ssa(Half),
    /// Loop start address (LSAX)
    Lsax(Half),
    /// Next address (NAX)
    Nax(Half),
}

/// Reverb work-area address registers, in register order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReverbAddr {
    Apf1Size,
    Apf2Size,
    SameLDst,
    SameRDst,
    Comb1LSrc,
    Comb1RSrc,
    Comb2LSrc,
    Comb2RSrc,
    SameLSrc,
    SameRSrc,
    DiffLDst,
    DiffRDst,
    Comb3LSrc,
    Comb3RSrc,
    Comb4LSrc,
    Comb4RSrc,
    DiffLSrc,
    DiffRSrc,
    Apf1LDst,
    Apf1RDst,
    Apf2LDst,
    Apf2RDst,
}

impl ReverbAddr {
    pub const ALL: [ReverbAddr; 22] = [
        ReverbAddr::Apf1Size,
        ReverbAddr::Apf2Size,
        ReverbAddr::SameLDst,
        ReverbAddr::SameRDst,
        ReverbAddr::Comb1LSrc,
        ReverbAddr::Comb1RSrc,
        ReverbAddr::Comb2LSrc,
        ReverbAddr::Comb2RSrc,
        ReverbAddr::SameLSrc,
        ReverbAddr::SameRSrc,
        ReverbAddr::DiffLDst,
        ReverbAddr::DiffRDst,
        ReverbAddr::Comb3LSrc,
        ReverbAddr::Comb3RSrc,
        ReverbAddr::Comb4LSrc,
        ReverbAddr::Comb4RSrc,
        ReverbAddr::DiffLSrc,
        ReverbAddr::DiffRSrc,
        ReverbAddr::Apf1LDst,
        ReverbAddr::Apf1RDst,
        ReverbAddr::Apf2LDst,
        ReverbAddr::Apf2RDst,
    ];
}

/// Reverb volume/coefficient registers, in register order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReverbVol {
    Iir,
    Comb1,
    Comb2,
    Comb3,
    Comb4,
    Wall,
    Apf1,
    Apf2,
    InCoefL,
    InCoefR,
}

impl ReverbVol {
    pub const ALL: [ReverbVol; 10] = [
        ReverbVol::Iir,
        ReverbVol::Comb1,
        ReverbVol::Comb2,
        ReverbVol::Comb3,
        ReverbVol::Comb4,
        ReverbVol::Wall,
        ReverbVol::Apf1,
        ReverbVol::Apf2,
        ReverbVol::InCoefL,
        ReverbVol::InCoefR,
    ];
}

/// Per-core register ports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CoreReg {
    /// Pitch modulation enable
    Pmon(Half),
    /// Noise enable
    Non(Half),
    VmixL(Half),
    VmixEL(Half),
    VmixR(Half),
    VmixER(Half),
    Mmix,
    Attr,
    /// IRQ address
    Irqa(Half),
    /// Transfer start address
    Tsa(Half),
    /// Auto-DMA status/control (ADMAS)
    Admas,
    /// Effects work area start
    Esa(Half),
    /// Effects work area end
    Eea(Half),
    /// Voice end flags
    Endx(Half),
    Statx,
    Reverb(ReverbAddr, Half),
    ReverbVol(ReverbVol),
    /// Master volume register
    Mvol(Side),
    /// Current master volume
    MvolX(Side),
    /// Effect return volume
    Evol(Side),
    /// External input volume
    Avol(Side),
    /// Sound data input volume
    Bvol(Side),
}

/// S/PDIF interface registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SpdifReg {
    Out,
    IrqInfo,
    Unknown1,
    Mode,
    Media,
    Unknown2,
    Protect,
}

/// Where one 16-bit register port of the SPU2 window is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RegSlot {
    Voice { core: u8, voice: u8, reg: VoiceReg },
    Core { core: u8, reg: CoreReg },
    Spdif(SpdifReg),
    /// Generic per-offset storage for ports without a dedicated field
    Raw(u16),
}

impl RegSlot {
    /// Whether this slot is the generic fallback storage
    pub fn is_raw(&self) -> bool {
        matches!(self, RegSlot::Raw(_))
    }
}

/// Volume with an envelope: register value plus current level
#[derive(Debug, Clone, Copy, Default)]
pub struct VolumeSlide {
    pub reg_vol: u16,
    pub value: i32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VolumeSlideLR {
    pub left: VolumeSlide,
    pub right: VolumeSlide,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VolumeLR {
    pub left: i32,
    pub right: i32,
}

impl VolumeLR {
    fn side(&self, side: Side) -> i32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut i32 {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

impl VolumeSlideLR {
    fn side(&self, side: Side) -> &VolumeSlide {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut VolumeSlide {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Adsr {
    pub reg_adsr1: u16,
    pub reg_adsr2: u16,
    /// Envelope level
    pub value: i32,
}

/// One voice's register-visible state
#[derive(Debug, Clone, Copy, Default)]
pub struct Voice {
    pub volume: VolumeSlideLR,
    pub pitch: u16,
    pub adsr: Adsr,
    pub start_a: u32,
    pub loop_start_a: u32,
    pub next_a: u32,
}

impl Voice {
    pub fn reg(&self, reg: VoiceReg) -> u16 {
        match reg {
            VoiceReg::VolL => self.volume.left.reg_vol,
            VoiceReg::VolR => self.volume.right.reg_vol,
            VoiceReg::Pitch => self.pitch,
            VoiceReg::Adsr1 => self.adsr.reg_adsr1,
            VoiceReg::Adsr2 => self.adsr.reg_adsr2,
            VoiceReg::EnvX => low_of_signed(self.adsr.value),
            VoiceReg::VolXL => low_of_signed(self.volume.left.value),
            VoiceReg::VolXR => low_of_signed(self.volume.right.value),
            VoiceReg::Ssa(half) => get_half(self.start_a, half),
            VoiceReg::Lsax(half) => get_half(self.loop_start_a, half),
            VoiceReg::Nax(half) => get_half(self.next_a, half),
        }
    }

    pub fn set_reg(&mut self, reg: VoiceReg, value: u16) {
        match reg {
            VoiceReg::VolL => self.volume.left.reg_vol = value,
            VoiceReg::VolR => self.volume.right.reg_vol = value,
            VoiceReg::Pitch => self.pitch = value,
            VoiceReg::Adsr1 => self.adsr.reg_adsr1 = value,
            VoiceReg::Adsr2 => self.adsr.reg_adsr2 = value,
            VoiceReg::EnvX => set_low_of_signed(&mut self.adsr.value, value),
            VoiceReg::VolXL => set_low_of_signed(&mut self.volume.left.value, value),
            VoiceReg::VolXR => set_low_of_signed(&mut self.volume.right.value, value),
            VoiceReg::Ssa(half) => set_half(&mut self.start_a, half, value),
            VoiceReg::Lsax(half) => set_half(&mut self.loop_start_a, half, value),
            VoiceReg::Nax(half) => set_half(&mut self.next_a, half, value),
        }
    }
}

/// Voice bitmask registers and mixer flags
#[derive(Debug, Clone, Copy, Default)]
pub struct CoreRegs {
    pub pmon: u32,
    pub non: u32,
    pub vmixl: u32,
    pub vmixel: u32,
    pub vmixr: u32,
    pub vmixer: u32,
    pub mmix: u16,
    pub attr: u16,
    pub endx: u32,
    pub statx: u16,
}

/// Reverb register block
#[derive(Debug, Clone, Copy, Default)]
pub struct Reverb {
    /// Work-area addresses, indexed by [`ReverbAddr`]
    pub addresses: [u32; 22],
    /// Volumes and coefficients, indexed by [`ReverbVol`]
    pub volumes: [i16; 10],
}

/// One SPU2 core
#[derive(Debug, Clone, Default)]
pub struct Core {
    pub voices: [Voice; VOICE_COUNT],
    pub regs: CoreRegs,
    pub irqa: u32,
    pub tsa: u32,
    pub auto_dma_ctrl: u16,
    pub effects_start_a: u32,
    pub effects_end_a: u32,
    pub revb: Reverb,
    pub master_vol: VolumeSlideLR,
    pub fx_vol: VolumeLR,
    pub ext_vol: VolumeLR,
    pub inp_vol: VolumeLR,
}

impl Core {
    pub fn reg(&self, reg: CoreReg) -> u16 {
        match reg {
            CoreReg::Pmon(half) => get_half(self.regs.pmon, half),
            CoreReg::Non(half) => get_half(self.regs.non, half),
            CoreReg::VmixL(half) => get_half(self.regs.vmixl, half),
            CoreReg::VmixEL(half) => get_half(self.regs.vmixel, half),
            CoreReg::VmixR(half) => get_half(self.regs.vmixr, half),
            CoreReg::VmixER(half) => get_half(self.regs.vmixer, half),
            CoreReg::Mmix => self.regs.mmix,
            CoreReg::Attr => self.regs.attr,
            CoreReg::Irqa(half) => get_half(self.irqa, half),
            CoreReg::Tsa(half) => get_half(self.tsa, half),
            CoreReg::Admas => self.auto_dma_ctrl,
            CoreReg::Esa(half) => get_half(self.effects_start_a, half),
            CoreReg::Eea(half) => get_half(self.effects_end_a, half),
            CoreReg::Endx(half) => get_half(self.regs.endx, half),
            CoreReg::Statx => self.regs.statx,
            CoreReg::Reverb(addr, half) => get_half(self.revb.addresses[addr as usize], half),
            CoreReg::ReverbVol(vol) => self.revb.volumes[vol as usize] as u16,
            CoreReg::Mvol(side) => self.master_vol.side(side).reg_vol,
            CoreReg::MvolX(side) => low_of_signed(self.master_vol.side(side).value),
            CoreReg::Evol(side) => low_of_signed(self.fx_vol.side(side)),
            CoreReg::Avol(side) => low_of_signed(self.ext_vol.side(side)),
            CoreReg::Bvol(side) => low_of_signed(self.inp_vol.side(side)),
        }
    }

    pub fn set_reg(&mut self, reg: CoreReg, value: u16) {
        match reg {
            CoreReg::Pmon(half) => set_half(&mut self.regs.pmon, half, value),
            CoreReg::Non(half) => set_half(&mut self.regs.non, half, value),
            CoreReg::VmixL(half) => set_half(&mut self.regs.vmixl, half, value),
            CoreReg::VmixEL(half) => set_half(&mut self.regs.vmixel, half, value),
            CoreReg::VmixR(half) => set_half(&mut self.regs.vmixr, half, value),
            CoreReg::VmixER(half) => set_half(&mut self.regs.vmixer, half, value),
            CoreReg::Mmix => self.regs.mmix = value,
            CoreReg::Attr => self.regs.attr = value,
            CoreReg::Irqa(half) => set_half(&mut self.irqa, half, value),
            CoreReg::Tsa(half) => set_half(&mut self.tsa, half, value),
            CoreReg::Admas => self.auto_dma_ctrl = value,
            CoreReg::Esa(half) => set_half(&mut self.effects_start_a, half, value),
            CoreReg::Eea(half) => set_half(&mut self.effects_end_a, half, value),
            CoreReg::Endx(half) => set_half(&mut self.regs.endx, half, value),
            CoreReg::Statx => self.regs.statx = value,
            CoreReg::Reverb(addr, half) => {
                set_half(&mut self.revb.addresses[addr as usize], half, value)
            }
            CoreReg::ReverbVol(vol) => self.revb.volumes[vol as usize] = value as i16,
            CoreReg::Mvol(side) => self.master_vol.side_mut(side).reg_vol = value,
            CoreReg::MvolX(side) => {
                set_low_of_signed(&mut self.master_vol.side_mut(side).value, value)
            }
            CoreReg::Evol(side) => set_low_of_signed(self.fx_vol.side_mut(side), value),
            CoreReg::Avol(side) => set_low_of_signed(self.ext_vol.side_mut(side), value),
            CoreReg::Bvol(side) => set_low_of_signed(self.inp_vol.side_mut(side), value),
        }
    }
}

/// S/PDIF interface block
#[derive(Debug, Clone, Copy, Default)]
pub struct Spdif {
    pub out: u16,
    pub info: u16,
    pub unknown1: u16,
    pub mode: u16,
    pub media: u16,
    pub unknown2: u16,
    pub protection: u16,
}

impl Spdif {
    fn field_mut(&mut self, reg: SpdifReg) -> &mut u16 {
        match reg {
            SpdifReg::Out => &mut self.out,
            SpdifReg::IrqInfo => &mut self.info,
            SpdifReg::Unknown1 => &mut self.unknown1,
            SpdifReg::Mode => &mut self.mode,
            SpdifReg::Media => &mut self.media,
            SpdifReg::Unknown2 => &mut self.unknown2,
            SpdifReg::Protect => &mut self.protection,
        }
    }

    pub fn reg(&self, reg: SpdifReg) -> u16 {
        match reg {
            SpdifReg::Out => self.out,
            SpdifReg::IrqInfo => self.info,
            SpdifReg::Unknown1 => self.unknown1,
            SpdifReg::Mode => self.mode,
            SpdifReg::Media => self.media,
            SpdifReg::Unknown2 => self.unknown2,
            SpdifReg::Protect => self.protection,
        }
    }

    pub fn set_reg(&mut self, reg: SpdifReg, value: u16) {
        *self.field_mut(reg) = value;
    }
}
