// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut

//! System Tests
//!
//! - `basic`: construction, configuration wiring and reset
//! - `requests`: `ADDR[:WIDTH]` parsing and checked reads

use super::*;
use crate::core::memory::map::*;

mod basic;
