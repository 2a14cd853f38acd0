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

/// Emulator error types
///
/// Register reads never fail; these errors only surface at the edges
/// (configuration, trace output, command line parsing).
use thiserror::Error;

/// Result type for emulator operations
pub type Result<T> = std::result::Result<T, EmulatorError>;

/// Main error type for the emulator
#[derive(Error, Debug)]
pub enum EmulatorError {
    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Invalid environment override {name}={value}")]
    InvalidEnvOverride { name: String, value: String },

    #[error("Invalid hardware address: {0}")]
    InvalidAddress(String),

    #[error("Unsupported access width: {0} bits (expected 8, 16, 32, 64 or 128)")]
    InvalidWidth(u32),

    #[error("Address 0x{address:08X} is outside the hardware register window")]
    OutsideHardwareWindow { address: u32 },

    #[error("Trace sink error: {0}")]
    Trace(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
