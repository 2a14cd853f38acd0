// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut

//! SPU2 Tests
//!
//! - `regtable`: table layout, coverage and one-time construction
//! - `state`: register reads/writes resolved through the table

use super::regs::*;
use super::regtable::*;
use super::*;
