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

//! System integration module
//!
//! Ties the hardware state, the register read dispatcher and the
//! configuration together, and selects which reader serves each page.

use std::fmt;
use std::str::FromStr;

use super::config::HwConfig;
use super::error::{EmulatorError, Result};
use super::hw::Hardware;
use super::memory::map::{in_hw_window, page_of, SPU2_BASE, SPU2_SIZE};
use super::memory::{FileTraceSink, HwReadDispatcher, HwValue, LogTraceSink, TraceSink};
use super::spu2::regtable::{self, RegTable};

#[cfg(test)]
mod tests;

/// Access width of a register read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    W8,
    W16,
    W32,
    W64,
    W128,
}

impl Width {
    /// Width from a bit count (8, 16, 32, 64 or 128)
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            8 => Ok(Width::W8),
            16 => Ok(Width::W16),
            32 => Ok(Width::W32),
            64 => Ok(Width::W64),
            128 => Ok(Width::W128),
            other => Err(EmulatorError::InvalidWidth(other)),
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            Width::W8 => 8,
            Width::W16 => 16,
            Width::W32 => 32,
            Width::W64 => 64,
            Width::W128 => 128,
        }
    }

    pub fn bytes(self) -> u32 {
        self.bits() / 8
    }
}

/// One requested register read: `ADDR[:WIDTH]`
///
/// The address is hexadecimal (with or without `0x`); the width defaults
/// to 32 bits.
///
/// # Example
///
/// ```
/// use ps2rx::core::system::{ReadRequest, Width};
///
/// let req: ReadRequest = "0x1000F000:16".parse().unwrap();
/// assert_eq!(req.address, 0x1000_F000);
/// assert_eq!(req.width, Width::W16);
///
/// let req: ReadRequest = "10003020".parse().unwrap();
/// assert_eq!(req.width, Width::W32);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadRequest {
    pub address: u32,
    pub width: Width,
}

impl FromStr for ReadRequest {
    type Err = EmulatorError;

    fn from_str(s: &str) -> Result<Self> {
        let (addr, width) = match s.split_once(':') {
            Some((addr, width)) => (addr, Some(width)),
            None => (s, None),
        };

        let digits = addr
            .trim()
            .trim_start_matches("0x")
            .trim_start_matches("0X");
        let address = u32::from_str_radix(digits, 16)
            .map_err(|_| EmulatorError::InvalidAddress(addr.to_string()))?;

        let width = match width {
            Some(w) => {
                let bits = w
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| EmulatorError::InvalidAddress(s.to_string()))?;
                Width::from_bits(bits)?
            }
            None => Width::W32,
        };

        Ok(Self { address, width })
    }
}

impl fmt::Display for ReadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}:{}", self.address, self.width.bits())
    }
}

/// PlayStation 2 register bus system
///
/// Owns the hardware state and the dispatcher. When the `INTC_STAT`
/// speedhack is enabled, control-page word and half-word reads go through
/// the catch-up readers.
///
/// # Example
/// ```
/// use ps2rx::core::system::System;
/// use ps2rx::core::memory::map::INTC_STAT;
///
/// let mut system = System::new();
/// system.hardware_mut().regs.write32(INTC_STAT, 0x2);
/// assert_eq!(system.read32(INTC_STAT), 0x2);
/// ```
pub struct System {
    hw: Hardware,
    bus: HwReadDispatcher,
    config: HwConfig,
}

impl System {
    /// Create a system with default configuration and no tracing
    pub fn new() -> Self {
        let config = HwConfig::default();
        let table = regtable::init();
        Self {
            hw: Hardware::new(config.memory.rdram_devices, config.gamefixes),
            bus: HwReadDispatcher::new(table),
            config,
        }
    }

    /// Create a system from a configuration
    ///
    /// Builds the SPU2 register table if this is the first system in the
    /// process, and installs the trace sink the configuration asks for.
    ///
    /// # Returns
    ///
    /// - `Ok(System)` on success
    /// - `Err(EmulatorError::Io)` if the trace file cannot be created
    pub fn with_config(config: HwConfig) -> Result<Self> {
        let table = regtable::init();
        let mut bus = HwReadDispatcher::new(table);

        if config.trace.enabled {
            let sink: Box<dyn TraceSink> = match &config.trace.path {
                Some(path) => {
                    log::info!("Hardware read tracing to {}", path.display());
                    Box::new(FileTraceSink::new(path)?)
                }
                None => {
                    log::info!("Hardware read tracing to log (target ps2rx::hwtrace)");
                    Box::new(LogTraceSink)
                }
            };
            bus.set_sink(Some(sink));
        }

        log::debug!(
            "System config: intc_stat hack={} vif_fifo_hack={} rdram_devices={}",
            config.speedhacks.intc_stat,
            config.gamefixes.vif_fifo_hack,
            config.memory.rdram_devices
        );

        Ok(Self {
            hw: Hardware::new(config.memory.rdram_devices, config.gamefixes),
            bus,
            config,
        })
    }

    pub fn config(&self) -> &HwConfig {
        &self.config
    }

    pub fn hardware(&self) -> &Hardware {
        &self.hw
    }

    pub fn hardware_mut(&mut self) -> &mut Hardware {
        &mut self.hw
    }

    pub fn spu2_table(&self) -> &'static RegTable {
        self.bus.spu2_table()
    }

    /// Replace the trace sink
    pub fn set_trace_sink(&mut self, sink: Option<Box<dyn TraceSink>>) {
        self.bus.set_sink(sink);
    }

    pub fn flush_trace(&mut self) -> Result<()> {
        self.bus.flush_trace()
    }

    /// Reset all hardware to power-on state
    ///
    /// The SPU2 register table is shared for the process lifetime and is not
    /// rebuilt.
    pub fn reset(&mut self) {
        self.hw.reset();
        log::info!("Hardware reset");
    }

    #[inline(always)]
    fn intc_hack_for(&self, address: u32) -> bool {
        self.config.speedhacks.intc_stat && page_of(address) == 0xF
    }

    pub fn read8(&mut self, address: u32) -> u8 {
        self.bus.read8(&mut self.hw, address)
    }

    pub fn read16(&mut self, address: u32) -> u16 {
        if self.intc_hack_for(address) {
            self.bus.read16_intc_hack(&mut self.hw, address)
        } else {
            self.bus.read16(&mut self.hw, address)
        }
    }

    pub fn read32(&mut self, address: u32) -> u32 {
        if self.intc_hack_for(address) {
            self.bus.read32_intc_hack(&mut self.hw, address)
        } else {
            self.bus.read32(&mut self.hw, address)
        }
    }

    pub fn read64(&mut self, address: u32) -> u64 {
        self.bus.read64(&mut self.hw, address)
    }

    pub fn read128(&mut self, address: u32) -> u128 {
        self.bus.read128(&mut self.hw, address)
    }

    /// Read a 16-bit SPU2 register by IOP address
    pub fn read_spu2(&mut self, address: u32) -> u16 {
        self.bus.read_spu2_16(&mut self.hw, address)
    }

    /// Checked read of any width
    ///
    /// Validates the address before dispatch, so it is safe to use with
    /// untrusted input. EE window addresses accept every width; the SPU2
    /// window only accepts 16-bit reads.
    ///
    /// # Returns
    ///
    /// - `Ok(HwValue)` with the value read
    /// - `Err(EmulatorError::InvalidAddress)` if the address is misaligned
    /// - `Err(EmulatorError::InvalidWidth)` for a non-16-bit SPU2 read
    /// - `Err(EmulatorError::OutsideHardwareWindow)` for any other address
    pub fn read(&mut self, address: u32, width: Width) -> Result<HwValue> {
        if address % width.bytes() != 0 {
            return Err(EmulatorError::InvalidAddress(format!(
                "0x{:08X} is not aligned for a {}-bit read",
                address,
                width.bits()
            )));
        }

        let paddr = address & 0x1FFF_FFFF;
        if (SPU2_BASE..SPU2_BASE + SPU2_SIZE).contains(&paddr) {
            return match width {
                Width::W16 => Ok(HwValue::U16(self.read_spu2(address))),
                other => Err(EmulatorError::InvalidWidth(other.bits())),
            };
        }

        if !in_hw_window(address) {
            return Err(EmulatorError::OutsideHardwareWindow { address });
        }

        Ok(match width {
            Width::W8 => HwValue::U8(self.read8(address)),
            Width::W16 => HwValue::U16(self.read16(address)),
            Width::W32 => HwValue::U32(self.read32(address)),
            Width::W64 => HwValue::U64(self.read64(address)),
            Width::W128 => HwValue::U128(self.read128(address)),
        })
    }
}

impl Default for System {
    fn default() -> Self {
        Self::new()
    }
}
