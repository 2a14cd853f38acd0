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

//! EE hardware register bus
//!
//! The EE sees its hardware registers through a 64KB window at
//! `0x1000_0000`. Loads from the window are routed page by page to the
//! owning device by [`HwReadDispatcher`].
//!
//! # Memory Map
//!
//! | Physical Address Range  | Region               | Access      |
//! |-------------------------|----------------------|-------------|
//! | 0x10000000-0x10001FFF   | Counters             | R/W         |
//! | 0x10002000-0x10002FFF   | IPU registers        | R/W         |
//! | 0x10003000-0x10003FFF   | GIF, VIF0, VIF1 regs | R/W         |
//! | 0x10004000-0x10007FFF   | FIFOs                | 128-bit     |
//! | 0x10008000-0x1000EFFF   | DMAC                 | R/W         |
//! | 0x1000F000-0x1000FFFF   | INTC, SIO, SBUS, MCH | R/W         |
//!
//! # Address Translation
//!
//! The dispatcher accepts any segment mirror of the window and masks the
//! address with `0x1FFF_FFFF` before dispatch.

pub mod hw_read;
pub mod io_device;
pub mod map;
pub mod registers;
pub mod trace;

#[cfg(test)]
mod tests;

pub use hw_read::HwReadDispatcher;
pub use io_device::{FifoDevice, HwDevice};
pub use registers::{HwRegisters, IopRegisters};
pub use trace::{FileTraceSink, HwAccess, HwValue, LogTraceSink, MemoryTraceSink, TraceSink};
