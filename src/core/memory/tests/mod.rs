// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut

//! Hardware Register Bus Tests
//!
//! Organized into logical categories:
//!
//! - `dispatch`: page routing and backing-store fallthrough
//! - `cascade`: width cascade consistency (property tests)
//! - `fifo`: FIFO pages, drain order and write-only FIFOs
//! - `control`: control page (INTC catch-up, SBUS, MCH handshake, PGIF)
//! - `trace`: trace sink reporting
//! - `helpers`: Common test utilities

use super::map::*;
use super::*;
use crate::core::config::GameFixes;
use crate::core::hw::Hardware;

mod dispatch;
mod helpers;
mod trace;

use helpers::*;
