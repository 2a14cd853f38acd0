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

//! Core emulation components
//!
//! This module contains the EE hardware register bus:
//! - Hardware state (counters, IPU, GIF, VIF, PGIF, memory controller)
//! - Register read dispatcher and trace sinks
//! - SPU2 register state and register table
//! - Configuration
//! - System integration

pub mod config;
pub mod error;
pub mod hw;
pub mod memory;
pub mod spu2;
pub mod system;

// Re-export commonly used types
pub use config::{GameFixes, HwConfig};
pub use error::{EmulatorError, Result};
pub use hw::Hardware;
pub use memory::HwReadDispatcher;
pub use spu2::Spu2;
pub use system::System;
