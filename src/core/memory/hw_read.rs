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

//! EE hardware register read dispatcher
//!
//! Routes CPU loads in the `0x1000_0000..0x1001_0000` window to the device
//! that owns the address and returns what the load yields.
//!
//! # Width Cascade
//!
//! The 32-bit reader is the core. Narrower reads take a lane of the
//! containing word. Wider reads are native only where hardware has a wider
//! register (IPU 64-bit registers, 128-bit FIFOs); everywhere else they fall
//! back one step narrower:
//!
//! ```text
//! read8 / read16 ─► read32 ◄── read64 ◄── read128
//!                     │          │           │
//!                     │          └─ IPU      ├─ VIF1 FIFO (page 5)
//!                     │                      ├─ IPU out FIFO (page 7)
//!                     └─ FIFO pages 4..7 ───►└─ PGIF quadwords (page F)
//! ```
//!
//! Each width is specialised per page with a const generic and collected
//! into a 16-entry function table, so a read costs one indexed call.
//!
//! # Side Effects
//!
//! Reads are not idempotent. FIFO reads pop, `MCH_DRD` advances the
//! memory-controller handshake and the `INTC_STAT` catch-up may move the
//! cycle counter forward.
//!
//! # Example
//!
//! ```
//! use ps2rx::core::hw::Hardware;
//! use ps2rx::core::memory::HwReadDispatcher;
//! use ps2rx::core::spu2::regtable;
//!
//! let mut hw = Hardware::default();
//! let mut bus = HwReadDispatcher::new(regtable::init());
//!
//! hw.regs.write32(0x1000_8000, 0x1234_5678);
//! assert_eq!(bus.read32(&mut hw, 0x1000_8000), 0x1234_5678);
//! assert_eq!(bus.read8(&mut hw, 0x1000_8002), 0x34);
//! assert_eq!(bus.read16(&mut hw, 0x1000_8002), 0x1234);
//! ```

use super::io_device::{FifoDevice, HwDevice};
use super::map::*;
use super::registers::HwRegisters;
use super::trace::{HwAccess, HwValue, TraceSink};
use crate::core::error::Result;
use crate::core::hw::Hardware;
use crate::core::spu2::regtable::RegTable;

/// SBUS_F240 always reads back with these bits set
const SBUS_F240_FORCED: u32 = 0xF000_0102;

type Read32Fn = fn(&mut Hardware, u32) -> u32;
type Read64Fn = fn(&mut Hardware, u32) -> u64;
type Read128Fn = fn(&mut Hardware, u32) -> u128;

/// Expand a per-page generic function into a 16-entry table
macro_rules! page_table {
    ($func:ident $(, $extra:tt)*) => {
        [
            $func::<0x0 $(, $extra)*>,
            $func::<0x1 $(, $extra)*>,
            $func::<0x2 $(, $extra)*>,
            $func::<0x3 $(, $extra)*>,
            $func::<0x4 $(, $extra)*>,
            $func::<0x5 $(, $extra)*>,
            $func::<0x6 $(, $extra)*>,
            $func::<0x7 $(, $extra)*>,
            $func::<0x8 $(, $extra)*>,
            $func::<0x9 $(, $extra)*>,
            $func::<0xA $(, $extra)*>,
            $func::<0xB $(, $extra)*>,
            $func::<0xC $(, $extra)*>,
            $func::<0xD $(, $extra)*>,
            $func::<0xE $(, $extra)*>,
            $func::<0xF $(, $extra)*>,
        ]
    };
}

const READ32: [Read32Fn; PAGE_COUNT] = page_table!(read32_page, false);
const READ64: [Read64Fn; PAGE_COUNT] = page_table!(read64_page);
const READ128: [Read128Fn; PAGE_COUNT] = page_table!(read128_page);

/// Hand a word read to the device that owns the address
#[inline(always)]
fn device_read32<D: HwDevice>(device: &mut D, addr: u32, raw: &HwRegisters) -> u32 {
    debug_assert!(
        device.contains(addr),
        "{} routed a read outside its window at 0x{:08X}",
        device.name(),
        addr
    );
    device.read32(addr, raw)
}

/// Pop one quadword from a readable FIFO
#[inline(always)]
fn device_pop<D: FifoDevice>(device: &mut D) -> u128 {
    let qword = device.read_fifo();
    log::trace!(
        "{} FIFO pop, {} quadwords left",
        device.name(),
        device.fifo_len()
    );
    qword
}

/// Width-32 core reader for one page
fn read32_page<const PAGE: usize, const INTC_HACK: bool>(hw: &mut Hardware, addr: u32) -> u32 {
    debug_assert!(addr & 0x3 == 0, "unaligned 32-bit read at 0x{:08X}", addr);

    match PAGE {
        0x0 | 0x1 => return device_read32(&mut hw.counters, addr, &hw.regs),
        0x2 => return device_read32(&mut hw.ipu, addr, &hw.regs),
        0x3 => {
            return if addr >= VIF1_START {
                device_read32(&mut hw.vif1, addr, &hw.regs)
            } else if addr >= VIF0_START {
                device_read32(&mut hw.vif0, addr, &hw.regs)
            } else {
                device_read32(&mut hw.gif, addr, &hw.regs)
            };
        }
        0x4..=0x7 => {
            // Narrow FIFO reads fetch the whole quadword and keep one lane
            let qword = read128_page::<PAGE>(hw, addr & !0xF);
            return (qword >> (((addr >> 2) & 0x3) * 32)) as u32;
        }
        0xF => {
            if let Some(value) = read32_control::<INTC_HACK>(hw, addr) {
                return value;
            }
        }
        _ => {}
    }

    read32_backing(hw, addr)
}

/// Control page (INTC, SIO, SBUS, MCH, PGIF)
///
/// `None` means the address has no special handling and reads from the
/// backing store.
#[inline(always)]
fn read32_control<const INTC_HACK: bool>(hw: &mut Hardware, addr: u32) -> Option<u32> {
    if addr == INTC_STAT {
        // The catch-up breaks PS1-mode titles
        if INTC_HACK && !hw.ps1_mode() {
            hw.cycles.intc_catch_up();
        }
        return Some(hw.regs.read32(INTC_STAT));
    }

    let paddr = addr & 0x1FFF_FFFF;
    if (SBUS_PS1_START..SBUS_PS1_END).contains(&paddr) {
        return Some(device_read32(&mut hw.pgif, paddr, &hw.regs));
    }

    match addr {
        SIO_ISR | MCH_F410 | MCH_RICM => Some(0),
        SBUS_F240 => Some(hw.regs.read32(SBUS_F240) | SBUS_F240_FORCED),
        SBUS_F260 => Some(hw.regs.read32(SBUS_F260)),
        MCH_DRD => Some(hw.mch.read_drd(&hw.regs)),
        _ => None,
    }
}

/// Backing-store read with the VIF FIFO fill gamefix applied
#[inline(always)]
fn read32_backing(hw: &Hardware, addr: u32) -> u32 {
    let value = hw.regs.read32(addr);

    // Pretend the remaining VIF1 transfer already drained so titles that
    // poll D1_MADR near the end of a stalled transfer move on.
    if addr == D1_MADR && hw.fixes.vif_fifo_hack {
        let qwc = hw.regs.read32(D1_QWC) & 0xFFFF;
        return value.wrapping_add(qwc * 16);
    }
    value
}

fn read64_page<const PAGE: usize>(hw: &mut Hardware, addr: u32) -> u64 {
    debug_assert!(addr & 0x7 == 0, "unaligned 64-bit read at 0x{:08X}", addr);

    match PAGE {
        0x2 => {
            debug_assert!(hw.ipu.contains(addr));
            hw.ipu.read64(addr, &hw.regs)
        }
        0x4..=0x7 => {
            let qword = read128_page::<PAGE>(hw, addr & !0xF);
            (qword >> (((addr >> 3) & 0x1) * 64)) as u64
        }
        _ => read32_page::<PAGE, false>(hw, addr) as u64,
    }
}

fn read128_page<const PAGE: usize>(hw: &mut Hardware, addr: u32) -> u128 {
    debug_assert!(addr & 0xF == 0, "unaligned 128-bit read at 0x{:08X}", addr);

    match PAGE {
        0x5 => device_pop(&mut hw.vif1),
        0x7 => {
            if addr & 0x10 != 0 {
                log::debug!("Read from write-only IPU in FIFO at 0x{:08X}", addr);
                0
            } else {
                device_pop(&mut hw.ipu)
            }
        }
        0x4 | 0x6 => {
            log::debug!(
                "Read from write-only {} FIFO at 0x{:08X}",
                if PAGE == 0x4 { "VIF0" } else { "GIF" },
                addr
            );
            0
        }
        0xF => {
            let paddr = addr & 0x1FFF_FFFF;
            if (SBUS_PS1_START..SBUS_PS1_END).contains(&paddr) {
                hw.pgif.read_qword(paddr)
            } else {
                log::debug!("128-bit read from control register 0x{:08X}", addr);
                0
            }
        }
        _ => {
            let value = read64_page::<PAGE>(hw, addr) as u128;
            (value << 64) | value
        }
    }
}

/// EE hardware register read dispatcher
///
/// Holds only the shared SPU2 register table and an optional trace sink;
/// all device state lives in the [`Hardware`] passed to each read.
///
/// Addresses may use any segment mirror (`0x1000_xxxx`, `0xB000_xxxx`, ...);
/// they are reduced to the physical address before dispatch.
pub struct HwReadDispatcher {
    spu2_table: &'static RegTable,
    sink: Option<Box<dyn TraceSink>>,
}

impl HwReadDispatcher {
    /// Create a dispatcher with no trace sink
    ///
    /// # Arguments
    ///
    /// * `spu2_table` - The process-wide SPU2 register table
    pub fn new(spu2_table: &'static RegTable) -> Self {
        Self {
            spu2_table,
            sink: None,
        }
    }

    /// Builder-style variant of [`set_sink`](Self::set_sink)
    pub fn with_sink(mut self, sink: Box<dyn TraceSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Install or remove the trace sink
    pub fn set_sink(&mut self, sink: Option<Box<dyn TraceSink>>) {
        self.sink = sink;
    }

    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    /// Flush the trace sink, if any
    pub fn flush_trace(&mut self) -> Result<()> {
        match self.sink.as_mut() {
            Some(sink) => sink.flush(),
            None => Ok(()),
        }
    }

    pub fn spu2_table(&self) -> &'static RegTable {
        self.spu2_table
    }

    #[inline(always)]
    fn trace(&mut self, address: u32, value: HwValue) {
        if let Some(sink) = self.sink.as_mut() {
            if let Err(e) = sink.record(&HwAccess::read(address, value)) {
                log::debug!("Dropped hardware trace record: {}", e);
            }
        }
    }

    #[inline(always)]
    fn word(hw: &mut Hardware, paddr: u32) -> u32 {
        READ32[page_of(paddr)](hw, paddr & !0x3)
    }

    /// Read a byte
    ///
    /// Reads the containing word and returns byte lane `address & 3`.
    pub fn read8(&mut self, hw: &mut Hardware, address: u32) -> u8 {
        let paddr = address & 0x1FFF_FFFF;
        let word = Self::word(hw, paddr);
        let value = (word >> ((paddr & 0x3) * 8)) as u8;
        self.trace(paddr, HwValue::U8(value));
        value
    }

    /// Read a half-word
    ///
    /// Reads the containing word and returns half-word lane
    /// `(address >> 1) & 1`.
    pub fn read16(&mut self, hw: &mut Hardware, address: u32) -> u16 {
        debug_assert!(address & 0x1 == 0, "unaligned 16-bit read at 0x{:08X}", address);
        let paddr = address & 0x1FFF_FFFF;
        let word = Self::word(hw, paddr);
        let value = (word >> (((paddr >> 1) & 0x1) * 16)) as u16;
        self.trace(paddr, HwValue::U16(value));
        value
    }

    /// Read a word
    pub fn read32(&mut self, hw: &mut Hardware, address: u32) -> u32 {
        let paddr = address & 0x1FFF_FFFF;
        let value = READ32[page_of(paddr)](hw, paddr);
        self.trace(paddr, HwValue::U32(value));
        value
    }

    /// Read a doubleword
    pub fn read64(&mut self, hw: &mut Hardware, address: u32) -> u64 {
        let paddr = address & 0x1FFF_FFFF;
        let value = READ64[page_of(paddr)](hw, paddr);
        self.trace(paddr, HwValue::U64(value));
        value
    }

    /// Read a quadword
    ///
    /// FIFO pages pop at most one quadword per call. Non-FIFO registers
    /// return their 64-bit value duplicated into both halves.
    pub fn read128(&mut self, hw: &mut Hardware, address: u32) -> u128 {
        let paddr = address & 0x1FFF_FFFF;
        let value = READ128[page_of(paddr)](hw, paddr);
        self.trace(paddr, HwValue::U128(value));
        value
    }

    /// Control-page word read with the `INTC_STAT` catch-up enabled
    ///
    /// Installed in place of [`read32`](Self::read32) for page 0xF when the
    /// speedhack is on. A tight loop polling `INTC_STAT` lets the clock jump
    /// to the next scheduled event instead of spinning through every cycle.
    pub fn read32_intc_hack(&mut self, hw: &mut Hardware, address: u32) -> u32 {
        let paddr = address & 0x1FFF_FFFF;
        debug_assert_eq!(page_of(paddr), 0xF, "INTC hack reader used off page 0xF");
        let value = read32_page::<0xF, true>(hw, paddr);
        self.trace(paddr, HwValue::U32(value));
        value
    }

    /// Control-page half-word read with the `INTC_STAT` catch-up enabled
    pub fn read16_intc_hack(&mut self, hw: &mut Hardware, address: u32) -> u16 {
        debug_assert!(address & 0x1 == 0, "unaligned 16-bit read at 0x{:08X}", address);
        let paddr = address & 0x1FFF_FFFF;
        debug_assert_eq!(page_of(paddr), 0xF, "INTC hack reader used off page 0xF");
        let word = read32_page::<0xF, true>(hw, paddr & !0x3);
        let value = (word >> (((paddr >> 1) & 0x1) * 16)) as u16;
        self.trace(paddr, HwValue::U16(value));
        value
    }

    /// Read a 16-bit SPU2 register on the IOP bus
    ///
    /// # Arguments
    ///
    /// * `address` - IOP address in `0x1F90_0000..0x1F90_0800`
    pub fn read_spu2_16(&mut self, hw: &mut Hardware, address: u32) -> u16 {
        let paddr = address & 0x1FFF_FFFF;
        debug_assert!(
            (SPU2_BASE..SPU2_BASE + SPU2_SIZE).contains(&paddr),
            "SPU2 read outside window at 0x{:08X}",
            address
        );
        let value = hw.spu2.read16(self.spu2_table, paddr.wrapping_sub(SPU2_BASE));
        self.trace(paddr, HwValue::U16(value));
        value
    }
}
