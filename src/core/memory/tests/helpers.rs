// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut

//! Helper functions for register bus tests

use super::*;
use crate::core::spu2::regtable;

/// Power-on hardware and a dispatcher without a trace sink
pub fn create_test_bus() -> (Hardware, HwReadDispatcher) {
    (Hardware::default(), HwReadDispatcher::new(regtable::init()))
}

/// Hardware with the VIF FIFO gamefix enabled
#[allow(dead_code)]
pub fn create_bus_with_vif_fifo_hack() -> (Hardware, HwReadDispatcher) {
    let fixes = GameFixes {
        vif_fifo_hack: true,
    };
    (
        Hardware::new(crate::core::hw::mch::DEFAULT_RDRAM_DEVICES, fixes),
        HwReadDispatcher::new(regtable::init()),
    )
}

/// Put the IOP into PS1 compatibility mode
#[allow(dead_code)]
pub fn enter_ps1_mode(hw: &mut Hardware) {
    let icfg = hw.iop.read32(HW_ICFG);
    hw.iop
        .write32(HW_ICFG, icfg | crate::core::hw::ICFG_PS1_MODE);
}

/// Split a quadword into its four little-endian words
#[allow(dead_code)]
pub fn words_of(qword: u128) -> [u32; 4] {
    [
        qword as u32,
        (qword >> 32) as u32,
        (qword >> 64) as u32,
        (qword >> 96) as u32,
    ]
}
