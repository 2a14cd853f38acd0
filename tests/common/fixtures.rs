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

//! Test fixtures for common test scenarios

use ps2rx::core::config::HwConfig;
use ps2rx::core::hw::Hardware;
use ps2rx::core::memory::{HwReadDispatcher, MemoryTraceSink};
use ps2rx::core::spu2::regtable;
use ps2rx::core::system::System;

/// Power-on hardware with a dispatcher
#[allow(dead_code)]
pub fn create_hw_with_bus() -> (Hardware, HwReadDispatcher) {
    (Hardware::default(), HwReadDispatcher::new(regtable::init()))
}

/// Dispatcher that records every access into the returned sink
#[allow(dead_code)]
pub fn create_traced_bus() -> (Hardware, HwReadDispatcher, MemoryTraceSink) {
    let sink = MemoryTraceSink::new();
    let bus = HwReadDispatcher::new(regtable::init()).with_sink(Box::new(sink.clone()));
    (Hardware::default(), bus, sink)
}

/// System built from TOML configuration text
#[allow(dead_code)]
pub fn create_system_from_toml(text: &str) -> System {
    let config = HwConfig::from_toml_str(text).expect("valid test config");
    System::with_config(config).expect("system construction")
}
