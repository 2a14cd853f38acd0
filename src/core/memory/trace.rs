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

//! Hardware register access tracing
//!
//! Every public read entry point of the register bus reports the completed
//! access to an optional [`TraceSink`]. Sinks are diagnostics only: a failing
//! sink never changes the value a read returns.
//!
//! # Example
//!
//! ```
//! use ps2rx::core::memory::trace::{HwAccess, HwValue, MemoryTraceSink, TraceSink};
//!
//! let mut sink = MemoryTraceSink::new();
//! let records = sink.clone();
//!
//! sink.record(&HwAccess::read(0x1000_F000, HwValue::U32(0x4))).unwrap();
//!
//! assert_eq!(records.len(), 1);
//! assert_eq!(records.records()[0].to_string(), "R32 0x1000F000 INTC_STAT = 0x00000004");
//! ```

use std::cell::RefCell;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::rc::Rc;

use super::map::register_name;
use crate::core::error::Result;

/// Value moved by one register access, tagged with its width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwValue {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
}

impl HwValue {
    /// Access width in bits
    pub fn bits(&self) -> u32 {
        match self {
            HwValue::U8(_) => 8,
            HwValue::U16(_) => 16,
            HwValue::U32(_) => 32,
            HwValue::U64(_) => 64,
            HwValue::U128(_) => 128,
        }
    }

    /// Zero-extended value
    pub fn as_u128(&self) -> u128 {
        match *self {
            HwValue::U8(v) => v as u128,
            HwValue::U16(v) => v as u128,
            HwValue::U32(v) => v as u128,
            HwValue::U64(v) => v as u128,
            HwValue::U128(v) => v,
        }
    }
}

impl fmt::Display for HwValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = (self.bits() / 4) as usize;
        write!(f, "0x{:0width$X}", self.as_u128(), width = digits)
    }
}

/// One completed register access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HwAccess {
    pub address: u32,
    pub value: HwValue,
    pub is_read: bool,
}

impl HwAccess {
    /// A completed read
    pub fn read(address: u32, value: HwValue) -> Self {
        Self {
            address,
            value,
            is_read: true,
        }
    }
}

impl fmt::Display for HwAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = if self.is_read { 'R' } else { 'W' };
        write!(f, "{}{} 0x{:08X}", dir, self.value.bits(), self.address)?;
        if let Some(name) = register_name(self.address) {
            write!(f, " {}", name)?;
        }
        write!(f, " = {}", self.value)
    }
}

/// Receiver for completed register accesses
pub trait TraceSink {
    /// Record one access
    ///
    /// Errors are reported to the caller, which logs and discards them.
    fn record(&mut self, access: &HwAccess) -> Result<()>;

    /// Flush buffered output
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Sink that forwards accesses to the `log` facade at trace level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTraceSink;

impl TraceSink for LogTraceSink {
    fn record(&mut self, access: &HwAccess) -> Result<()> {
        log::trace!(target: "ps2rx::hwtrace", "{}", access);
        Ok(())
    }
}

/// Line-oriented trace file writer
///
/// Each access becomes one line in the same format as [`HwAccess`]'s
/// `Display` output. The file is truncated when the sink is created.
///
/// # Example
/// ```no_run
/// use ps2rx::core::memory::trace::{FileTraceSink, HwAccess, HwValue, TraceSink};
///
/// let mut sink = FileTraceSink::new("hwtrace.log").unwrap();
/// sink.record(&HwAccess::read(0x1000_2010, HwValue::U32(0))).unwrap();
/// sink.flush().unwrap();
/// ```
pub struct FileTraceSink {
    /// Enable/disable tracing
    enabled: bool,
    output: BufWriter<File>,
}

impl FileTraceSink {
    /// Create a trace file sink
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the output trace file
    ///
    /// # Returns
    ///
    /// - `Ok(FileTraceSink)` if the file was created
    /// - `Err(EmulatorError::Io)` if file creation fails
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let output = BufWriter::new(File::create(path)?);
        Ok(Self {
            enabled: true,
            output,
        })
    }

    /// Enable or disable tracing
    ///
    /// When disabled, `record()` returns immediately without writing.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl TraceSink for FileTraceSink {
    fn record(&mut self, access: &HwAccess) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        writeln!(self.output, "{}", access)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.output.flush()?;
        Ok(())
    }
}

impl Drop for FileTraceSink {
    fn drop(&mut self) {
        if let Err(e) = self.output.flush() {
            log::warn!("Failed to flush hardware trace file: {}", e);
        }
    }
}

/// In-memory sink with a shared buffer
///
/// Clones share the same buffer, so a caller can hand one clone to the
/// dispatcher and keep another to inspect what was recorded.
#[derive(Debug, Default, Clone)]
pub struct MemoryTraceSink {
    records: Rc<RefCell<Vec<HwAccess>>>,
}

impl MemoryTraceSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every access recorded so far
    pub fn records(&self) -> Vec<HwAccess> {
        self.records.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.records.borrow_mut().clear();
    }
}

impl TraceSink for MemoryTraceSink {
    fn record(&mut self, access: &HwAccess) -> Result<()> {
        self.records.borrow_mut().push(*access);
        Ok(())
    }
}
