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

//! PlayStation 2 hardware register bus library
//!
//! This library models what the Emotion Engine sees when it loads from its
//! hardware register window (`0x1000_0000..0x1001_0000`), plus the SPU2
//! register table on the IOP bus.
//!
//! # Example
//!
//! ```
//! use ps2rx::core::system::System;
//! use ps2rx::core::memory::map::DMAC_CTRL;
//!
//! let mut system = System::new();
//! system.hardware_mut().regs.write32(DMAC_CTRL, 0x1234_5678);
//!
//! assert_eq!(system.read8(DMAC_CTRL + 2), 0x34);
//! assert_eq!(system.read16(DMAC_CTRL + 2), 0x1234);
//! ```

pub mod core;
