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

//! Hardware bus configuration
//!
//! Loaded from a TOML file; every key is optional and missing keys take the
//! defaults below.
//!
//! ```toml
//! [speedhacks]
//! intc_stat = true
//!
//! [gamefixes]
//! vif_fifo_hack = false
//!
//! [memory]
//! rdram_devices = 2
//!
//! [trace]
//! enabled = false
//! path = "hwtrace.log"
//! ```
//!
//! # Environment Overrides
//!
//! | Variable              | Overrides                 |
//! |-----------------------|---------------------------|
//! | `PS2RX_INTC_HACK`     | `speedhacks.intc_stat`    |
//! | `PS2RX_VIF_FIFO_HACK` | `gamefixes.vif_fifo_hack` |
//! | `PS2RX_TRACE`         | `trace.enabled`           |
//!
//! Accepted values are `1/0`, `true/false`, `yes/no` and `on/off`.
//!
//! # Example
//!
//! ```
//! use ps2rx::core::config::HwConfig;
//!
//! let config = HwConfig::from_toml_str("[gamefixes]\nvif_fifo_hack = true\n").unwrap();
//! assert!(config.gamefixes.vif_fifo_hack);
//! assert!(config.speedhacks.intc_stat);
//! assert_eq!(config.memory.rdram_devices, 2);
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::{EmulatorError, Result};
use crate::core::hw::mch::DEFAULT_RDRAM_DEVICES;

pub const ENV_INTC_HACK: &str = "PS2RX_INTC_HACK";
pub const ENV_VIF_FIFO_HACK: &str = "PS2RX_VIF_FIFO_HACK";
pub const ENV_TRACE: &str = "PS2RX_TRACE";

/// Complete bus configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HwConfig {
    pub speedhacks: SpeedHacks,
    pub gamefixes: GameFixes,
    pub memory: MemoryConfig,
    pub trace: TraceConfig,
}

/// Speed hacks that trade accuracy for fewer emulated cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedHacks {
    /// Install the INTC_STAT catch-up readers on the control page
    pub intc_stat: bool,
}

impl Default for SpeedHacks {
    fn default() -> Self {
        Self { intc_stat: true }
    }
}

/// Per-title behaviour fixes consulted on the read path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameFixes {
    /// Report D1_MADR as if the pending VIF1 transfer already drained
    pub vif_fifo_hack: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// RDRAM devices the memory controller reports during INIT
    pub rdram_devices: u32,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            rdram_devices: DEFAULT_RDRAM_DEVICES,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    pub enabled: bool,
    /// Trace file; accesses go to the log when unset
    pub path: Option<PathBuf>,
}

impl HwConfig {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// - `Ok(HwConfig)` on success
    /// - `Err(EmulatorError::ConfigNotFound)` if the file does not exist
    /// - `Err(EmulatorError::ConfigParse)` if the file is not valid TOML
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => EmulatorError::ConfigNotFound(path.display().to_string()),
            _ => EmulatorError::Io(e),
        })?;

        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded hardware config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validated()
    }

    /// Serialize to TOML text
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable source
    ///
    /// # Arguments
    ///
    /// * `lookup` - Returns the value of a variable, or `None` if unset
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_INTC_HACK) {
            self.speedhacks.intc_stat = parse_flag(ENV_INTC_HACK, &v)?;
        }
        if let Some(v) = lookup(ENV_VIF_FIFO_HACK) {
            self.gamefixes.vif_fifo_hack = parse_flag(ENV_VIF_FIFO_HACK, &v)?;
        }
        if let Some(v) = lookup(ENV_TRACE) {
            self.trace.enabled = parse_flag(ENV_TRACE, &v)?;
        }
        Ok(())
    }

    fn validated(mut self) -> Result<Self> {
        if self.memory.rdram_devices == 0 {
            log::warn!(
                "memory.rdram_devices = 0 is not a valid console; using {}",
                DEFAULT_RDRAM_DEVICES
            );
            self.memory.rdram_devices = DEFAULT_RDRAM_DEVICES;
        }
        Ok(self)
    }
}

fn parse_flag(name: &str, raw: &str) -> Result<bool> {
    let v = raw.trim();
    if v == "1" || ["true", "yes", "on"].iter().any(|t| v.eq_ignore_ascii_case(t)) {
        Ok(true)
    } else if v == "0" || ["false", "no", "off"].iter().any(|f| v.eq_ignore_ascii_case(f)) {
        Ok(false)
    } else {
        Err(EmulatorError::InvalidEnvOverride {
            name: name.to_string(),
            value: raw.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = HwConfig::default();
        assert!(config.speedhacks.intc_stat);
        assert!(!config.gamefixes.vif_fifo_hack);
        assert_eq!(config.memory.rdram_devices, 2);
        assert!(!config.trace.enabled);
        assert_eq!(config.trace.path, None);
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(HwConfig::from_toml_str("").unwrap(), HwConfig::default());
    }

    #[test]
    fn test_full_document() {
        let text = r#"
            [speedhacks]
            intc_stat = false

            [gamefixes]
            vif_fifo_hack = true

            [memory]
            rdram_devices = 4

            [trace]
            enabled = true
            path = "out/hw.log"
        "#;
        let config = HwConfig::from_toml_str(text).unwrap();

        assert!(!config.speedhacks.intc_stat);
        assert!(config.gamefixes.vif_fifo_hack);
        assert_eq!(config.memory.rdram_devices, 4);
        assert!(config.trace.enabled);
        assert_eq!(config.trace.path, Some(PathBuf::from("out/hw.log")));
    }

    #[test]
    fn test_zero_devices_falls_back() {
        let config = HwConfig::from_toml_str("[memory]\nrdram_devices = 0\n").unwrap();
        assert_eq!(config.memory.rdram_devices, DEFAULT_RDRAM_DEVICES);
    }

    #[test]
    fn test_parse_error() {
        let result = HwConfig::from_toml_str("[speedhacks]\nintc_stat = \"maybe\"\n");
        assert!(matches!(result, Err(EmulatorError::ConfigParse(_))));
    }

    #[test]
    fn test_load_and_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ps2rx.toml");

        let mut config = HwConfig::default();
        config.gamefixes.vif_fifo_hack = true;
        config.trace.path = Some(PathBuf::from("trace.log"));
        config.save(&path).unwrap();

        assert_eq!(HwConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = HwConfig::load(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(EmulatorError::ConfigNotFound(_))));
    }

    #[test]
    fn test_overrides() {
        let env = vars(&[
            (ENV_INTC_HACK, "off"),
            (ENV_VIF_FIFO_HACK, "1"),
            (ENV_TRACE, " Yes "),
        ]);
        let mut config = HwConfig::default();
        config
            .apply_overrides_from(|name| env.get(name).cloned())
            .unwrap();

        assert!(!config.speedhacks.intc_stat);
        assert!(config.gamefixes.vif_fifo_hack);
        assert!(config.trace.enabled);
    }

    #[test]
    fn test_unset_overrides_keep_values() {
        let mut config = HwConfig::default();
        config.apply_overrides_from(|_| None).unwrap();
        assert_eq!(config, HwConfig::default());
    }

    #[test]
    fn test_invalid_override() {
        let env = vars(&[(ENV_TRACE, "sometimes")]);
        let mut config = HwConfig::default();
        let result = config.apply_overrides_from(|name| env.get(name).cloned());

        match result {
            Err(EmulatorError::InvalidEnvOverride { name, value }) => {
                assert_eq!(name, ENV_TRACE);
                assert_eq!(value, "sometimes");
            }
            other => panic!("expected InvalidEnvOverride, got {:?}", other),
        }
    }
}
