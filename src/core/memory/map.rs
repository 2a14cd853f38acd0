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

//! EE hardware register map
//!
//! The EE hardware window spans `0x1000_0000..0x1001_0000` and is split into
//! sixteen 4KB pages. The page index of an address is `(address >> 12) & 0xF`.
//!
//! | Page | Contents                                 |
//! |------|------------------------------------------|
//! | 0x0  | Counters 0 and 1                         |
//! | 0x1  | Counters 2 and 3                         |
//! | 0x2  | IPU registers                            |
//! | 0x3  | GIF registers, VIF0 and VIF1 registers   |
//! | 0x4  | VIF0 FIFO (write-only)                   |
//! | 0x5  | VIF1 FIFO                                |
//! | 0x6  | GIF FIFO (write-only)                    |
//! | 0x7  | IPU out FIFO / IPU in FIFO (write-only)  |
//! | 0x8-0xE | DMA channel and DMAC registers        |
//! | 0xF  | INTC, SIO, SBUS, memory controller, PGIF |

/// Base of the EE hardware register window
pub const HW_BASE: u32 = 0x1000_0000;

/// Size of the EE hardware register window
pub const HW_SIZE: u32 = 0x1_0000;

/// Size of one dispatch page
pub const PAGE_SIZE: u32 = 0x1000;

/// Number of dispatch pages in the hardware window
pub const PAGE_COUNT: usize = 16;

/// Page index for an address
#[inline(always)]
pub const fn page_of(address: u32) -> usize {
    ((address >> 12) & 0xF) as usize
}

/// Check whether a physical address falls inside the hardware window
#[inline(always)]
pub const fn in_hw_window(address: u32) -> bool {
    let paddr = address & 0x1FFF_FFFF;
    paddr >= HW_BASE && paddr < HW_BASE + HW_SIZE
}

// Counters
pub const RCNT0_COUNT: u32 = 0x1000_0000;
pub const RCNT0_MODE: u32 = 0x1000_0010;
pub const RCNT0_TARGET: u32 = 0x1000_0020;
pub const RCNT0_HOLD: u32 = 0x1000_0030;
pub const RCNT1_COUNT: u32 = 0x1000_0800;
pub const RCNT2_COUNT: u32 = 0x1000_1000;
pub const RCNT3_COUNT: u32 = 0x1000_1800;

// IPU
pub const IPU_CMD: u32 = 0x1000_2000;
pub const IPU_CTRL: u32 = 0x1000_2010;
pub const IPU_BP: u32 = 0x1000_2020;
pub const IPU_TOP: u32 = 0x1000_2030;

// GIF
pub const GIF_CTRL: u32 = 0x1000_3000;
pub const GIF_MODE: u32 = 0x1000_3010;
pub const GIF_STAT: u32 = 0x1000_3020;
pub const GIF_TAG0: u32 = 0x1000_3040;
pub const GIF_CNT: u32 = 0x1000_3080;
pub const GIF_P3CNT: u32 = 0x1000_3090;
pub const GIF_P3TAG: u32 = 0x1000_30A0;

/// First address of the VIF0 register window inside the DMAC page
pub const VIF0_START: u32 = 0x1000_3800;

/// First address of the VIF1 register window inside the DMAC page
pub const VIF1_START: u32 = 0x1000_3C00;

pub const VIF0_STAT: u32 = VIF0_START;
pub const VIF1_STAT: u32 = VIF1_START;

// FIFOs
pub const VIF0_FIFO: u32 = 0x1000_4000;
pub const VIF1_FIFO: u32 = 0x1000_5000;
pub const GIF_FIFO: u32 = 0x1000_6000;
pub const IPU_OUT_FIFO: u32 = 0x1000_7000;
pub const IPU_IN_FIFO: u32 = 0x1000_7010;

// DMA channels
pub const D0_CHCR: u32 = 0x1000_8000;
pub const D1_CHCR: u32 = 0x1000_9000;
pub const D1_MADR: u32 = 0x1000_9010;
pub const D1_QWC: u32 = 0x1000_9020;
pub const D2_CHCR: u32 = 0x1000_A000;
pub const D3_CHCR: u32 = 0x1000_B000;
pub const D4_CHCR: u32 = 0x1000_B400;
pub const D5_CHCR: u32 = 0x1000_C000;
pub const D6_CHCR: u32 = 0x1000_C400;
pub const D7_CHCR: u32 = 0x1000_C800;
pub const D8_CHCR: u32 = 0x1000_D000;
pub const D9_CHCR: u32 = 0x1000_D400;
pub const DMAC_CTRL: u32 = 0x1000_E000;
pub const DMAC_STAT: u32 = 0x1000_E010;
pub const DMAC_PCR: u32 = 0x1000_E020;

// Control / status page
pub const INTC_STAT: u32 = 0x1000_F000;
pub const INTC_MASK: u32 = 0x1000_F010;
pub const SIO_LCR: u32 = 0x1000_F100;
pub const SIO_ISR: u32 = 0x1000_F130;
pub const SBUS_F200: u32 = 0x1000_F200;
pub const SBUS_F210: u32 = 0x1000_F210;
pub const SBUS_F220: u32 = 0x1000_F220;
pub const SBUS_F230: u32 = 0x1000_F230;
pub const SBUS_F240: u32 = 0x1000_F240;
pub const SBUS_F260: u32 = 0x1000_F260;
pub const SBUS_PS1_START: u32 = 0x1000_F300;
pub const SBUS_PS1_END: u32 = 0x1000_F400;
pub const MCH_F410: u32 = 0x1000_F410;
pub const MCH_RICM: u32 = 0x1000_F430;
pub const MCH_DRD: u32 = 0x1000_F440;
pub const DMAC_ENABLER: u32 = 0x1000_F520;
pub const DMAC_ENABLEW: u32 = 0x1000_F590;

// IOP side registers consulted by EE reads
pub const IOP_HW_BASE: u32 = 0x1F80_0000;
pub const IOP_HW_SIZE: u32 = 0x1_0000;
pub const HW_ICFG: u32 = 0x1F80_1450;

/// SPU2 register window on the IOP bus
pub const SPU2_BASE: u32 = 0x1F90_0000;
pub const SPU2_SIZE: u32 = 0x800;

/// Human readable name for a known hardware register
///
/// Used by trace sinks; unnamed addresses return `None`.
pub fn register_name(address: u32) -> Option<&'static str> {
    let name = match address & 0x1FFF_FFFF {
        RCNT0_COUNT => "RCNT0_COUNT",
        RCNT0_MODE => "RCNT0_MODE",
        RCNT0_TARGET => "RCNT0_TARGET",
        RCNT0_HOLD => "RCNT0_HOLD",
        RCNT1_COUNT => "RCNT1_COUNT",
        RCNT2_COUNT => "RCNT2_COUNT",
        RCNT3_COUNT => "RCNT3_COUNT",
        IPU_CMD => "IPU_CMD",
        IPU_CTRL => "IPU_CTRL",
        IPU_BP => "IPU_BP",
        IPU_TOP => "IPU_TOP",
        GIF_CTRL => "GIF_CTRL",
        GIF_MODE => "GIF_MODE",
        GIF_STAT => "GIF_STAT",
        GIF_CNT => "GIF_CNT",
        GIF_P3CNT => "GIF_P3CNT",
        GIF_P3TAG => "GIF_P3TAG",
        VIF0_STAT => "VIF0_STAT",
        VIF1_STAT => "VIF1_STAT",
        VIF0_FIFO => "VIF0_FIFO",
        VIF1_FIFO => "VIF1_FIFO",
        GIF_FIFO => "GIF_FIFO",
        IPU_OUT_FIFO => "IPUout_FIFO",
        IPU_IN_FIFO => "IPUin_FIFO",
        D0_CHCR => "D0_CHCR",
        D1_CHCR => "D1_CHCR",
        D1_MADR => "D1_MADR",
        D1_QWC => "D1_QWC",
        D2_CHCR => "D2_CHCR",
        D3_CHCR => "D3_CHCR",
        D4_CHCR => "D4_CHCR",
        D5_CHCR => "D5_CHCR",
        D6_CHCR => "D6_CHCR",
        D7_CHCR => "D7_CHCR",
        D8_CHCR => "D8_CHCR",
        D9_CHCR => "D9_CHCR",
        DMAC_CTRL => "DMAC_CTRL",
        DMAC_STAT => "DMAC_STAT",
        DMAC_PCR => "DMAC_PCR",
        INTC_STAT => "INTC_STAT",
        INTC_MASK => "INTC_MASK",
        SIO_LCR => "SIO_LCR",
        SIO_ISR => "SIO_ISR",
        SBUS_F200 => "SBUS_MSCOM",
        SBUS_F210 => "SBUS_SMCOM",
        SBUS_F220 => "SBUS_MSFLG",
        SBUS_F230 => "SBUS_SMFLG",
        SBUS_F240 => "SBUS_F240",
        SBUS_F260 => "SBUS_F260",
        MCH_RICM => "MCH_RICM",
        MCH_DRD => "MCH_DRD",
        DMAC_ENABLER => "DMAC_ENABLER",
        DMAC_ENABLEW => "DMAC_ENABLEW",
        _ => return None,
    };
    Some(name)
}
