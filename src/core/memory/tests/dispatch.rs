// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut

//! Page routing tests
//!
//! Each page of the window goes to the device that owns it; unclaimed
//! addresses read the backing store.

use super::*;
use crate::core::hw::VifStat;

#[test]
fn test_byte_and_halfword_lanes() {
    let (mut hw, mut bus) = create_test_bus();
    hw.regs.write32(DMAC_CTRL, 0x1234_5678);

    assert_eq!(bus.read32(&mut hw, DMAC_CTRL), 0x1234_5678);

    assert_eq!(bus.read8(&mut hw, DMAC_CTRL), 0x78);
    assert_eq!(bus.read8(&mut hw, DMAC_CTRL + 1), 0x56);
    assert_eq!(bus.read8(&mut hw, DMAC_CTRL + 2), 0x34);
    assert_eq!(bus.read8(&mut hw, DMAC_CTRL + 3), 0x12);

    assert_eq!(bus.read16(&mut hw, DMAC_CTRL), 0x5678);
    assert_eq!(bus.read16(&mut hw, DMAC_CTRL + 2), 0x1234);
}

#[test]
fn test_segment_mirrors_reach_same_register() {
    let (mut hw, mut bus) = create_test_bus();
    hw.regs.write32(DMAC_STAT, 0xCAFE_F00D);

    assert_eq!(bus.read32(&mut hw, 0x1000_E010), 0xCAFE_F00D);
    assert_eq!(bus.read32(&mut hw, 0xB000_E010), 0xCAFE_F00D);
    assert_eq!(bus.read32(&mut hw, 0x9000_E010), 0xCAFE_F00D);
}

#[test]
fn test_counter_pages() {
    let (mut hw, mut bus) = create_test_bus();
    hw.counters.channels[0].count = 0x0001_2345;
    hw.counters.channels[1].mode = 0x0000_0083;
    hw.counters.channels[2].target = 0xFFFF_0010;
    hw.counters.channels[3].count = 0x42;

    assert_eq!(bus.read32(&mut hw, RCNT0_COUNT), 0x2345);
    assert_eq!(bus.read32(&mut hw, RCNT1_COUNT + 0x10), 0x83);
    assert_eq!(bus.read32(&mut hw, RCNT2_COUNT + 0x20), 0x0010);
    assert_eq!(bus.read32(&mut hw, RCNT3_COUNT), 0x42);
}

#[test]
fn test_counter_hold_only_on_first_two() {
    let (mut hw, mut bus) = create_test_bus();
    hw.counters.channels[0].hold = 0x1111;
    hw.counters.channels[2].hold = 0x2222;
    hw.regs.write32(RCNT2_COUNT + 0x30, 0xDEAD);

    assert_eq!(bus.read32(&mut hw, RCNT0_HOLD), 0x1111);
    assert_eq!(bus.read32(&mut hw, RCNT2_COUNT + 0x30), 0xDEAD);
}

#[test]
fn test_ipu_registers() {
    let (mut hw, mut bus) = create_test_bus();
    hw.ipu.cmd_data = 0x0000_ABCD;
    hw.ipu.cmd_busy = true;
    hw.ipu.push_input(1);
    hw.ipu.push_input(2);
    hw.ipu.push_output(3);

    assert_eq!(bus.read32(&mut hw, IPU_CMD), 0xABCD);
    assert_eq!(bus.read64(&mut hw, IPU_CMD), 0x8000_0000_0000_ABCD);

    // IFC in bits 0-3, OFC in bits 4-7
    assert_eq!(bus.read32(&mut hw, IPU_CTRL) & 0xFF, 0x12);
    assert_eq!((bus.read32(&mut hw, IPU_BP) >> 8) & 0xF, 2);
}

#[test]
fn test_dmac_page_vif_windows() {
    let (mut hw, mut bus) = create_test_bus();
    hw.regs.write32(GIF_MODE, 0x5);
    hw.vif0.set_register(VIF0_START + 0x100, 0xAAAA_0000);
    hw.vif1.set_register(VIF1_START + 0x100, 0xBBBB_0000);

    assert_eq!(bus.read32(&mut hw, GIF_MODE), 0x5);
    assert_eq!(bus.read32(&mut hw, VIF0_START + 0x100), 0xAAAA_0000);
    assert_eq!(bus.read32(&mut hw, VIF1_START + 0x100), 0xBBBB_0000);

    // Last GIF-side word before the VIF0 window
    hw.regs.write32(VIF0_START - 4, 0x77);
    assert_eq!(bus.read32(&mut hw, VIF0_START - 4), 0x77);
}

#[test]
fn test_vif_stat_reports_fifo_count() {
    let (mut hw, mut bus) = create_test_bus();
    hw.vif1.stat = VifStat::FDR;
    hw.vif1.push_fifo(1);
    hw.vif1.push_fifo(2);
    hw.vif1.push_fifo(3);

    let stat = bus.read32(&mut hw, VIF1_STAT);
    assert_eq!((stat >> 24) & 0x1F, 3);
    assert_ne!(stat & VifStat::FDR.bits(), 0);
}

#[test]
fn test_gif_stat_reports_fifo_count() {
    let (mut hw, mut bus) = create_test_bus();
    hw.regs.write32(GIF_STAT, 0x1F00_0001);
    hw.gif.fifo_count = 5;

    assert_eq!(bus.read32(&mut hw, GIF_STAT), 0x0500_0001);
}

#[test]
fn test_dmac_pages_read_backing_store() {
    let (mut hw, mut bus) = create_test_bus();
    for (i, addr) in [D0_CHCR, D2_CHCR, D5_CHCR, D9_CHCR, DMAC_PCR]
        .into_iter()
        .enumerate()
    {
        hw.regs.write32(addr, 0x100 + i as u32);
        assert_eq!(bus.read32(&mut hw, addr), 0x100 + i as u32);
    }
}

#[test]
fn test_d1_madr_without_gamefix() {
    let (mut hw, mut bus) = create_test_bus();
    hw.regs.write32(D1_MADR, 0x0010_0000);
    hw.regs.write32(D1_QWC, 4);

    assert_eq!(bus.read32(&mut hw, D1_MADR), 0x0010_0000);
}

#[test]
fn test_d1_madr_with_vif_fifo_hack() {
    let (mut hw, mut bus) = create_bus_with_vif_fifo_hack();
    hw.regs.write32(D1_MADR, 0x0010_0000);
    hw.regs.write32(D1_QWC, 4);

    assert_eq!(bus.read32(&mut hw, D1_MADR), 0x0010_0040);

    // Only the 16-bit QWC field counts
    hw.regs.write32(D1_QWC, 0xFFFF_0002);
    assert_eq!(bus.read32(&mut hw, D1_MADR), 0x0010_0020);

    // Other channels are untouched
    hw.regs.write32(D1_CHCR, 0x100);
    assert_eq!(bus.read32(&mut hw, D1_CHCR), 0x100);
}

#[test]
fn test_read64_zero_extends_outside_ipu() {
    let (mut hw, mut bus) = create_test_bus();
    hw.regs.write32(DMAC_CTRL, 0xFFFF_FFFF);
    hw.regs.write32(DMAC_CTRL + 4, 0x1234_5678);

    assert_eq!(bus.read64(&mut hw, DMAC_CTRL), 0x0000_0000_FFFF_FFFF);
}

#[test]
fn test_read128_duplicates_non_fifo_registers() {
    let (mut hw, mut bus) = create_test_bus();
    hw.regs.write32(DMAC_CTRL, 0x1357_9BDF);

    let value = bus.read128(&mut hw, DMAC_CTRL);
    assert_eq!(words_of(value), [0x1357_9BDF, 0, 0x1357_9BDF, 0]);

    hw.ipu.top_data = 0x55;
    hw.ipu.top_busy = true;
    let top = bus.read128(&mut hw, IPU_TOP);
    assert_eq!(top as u64, 0x8000_0000_0000_0055);
    assert_eq!((top >> 64) as u64, 0x8000_0000_0000_0055);
}

#[test]
fn test_devices_own_every_routed_word() {
    let (mut hw, mut bus) = create_test_bus();
    let hw_ref = &hw;

    let owners: [(&dyn HwDevice, u32, u32); 6] = [
        (&hw_ref.counters, 0x1000_0000, 0x1000_2000),
        (&hw_ref.ipu, 0x1000_2000, 0x1000_3000),
        (&hw_ref.gif, 0x1000_3000, VIF0_START),
        (&hw_ref.vif0, VIF0_START, VIF1_START),
        (&hw_ref.vif1, VIF1_START, 0x1000_4000),
        (&hw_ref.pgif, SBUS_PS1_START, SBUS_PS1_END),
    ];
    for (device, start, end) in owners {
        assert!(device.contains(start), "{} 0x{:08X}", device.name(), start);
        assert!(device.contains(end - 4), "{} 0x{:08X}", device.name(), end - 4);
        assert!(!device.contains(end), "{} 0x{:08X}", device.name(), end);
    }

    // Every word on the device pages routes without leaving its owner
    for addr in (0x1000_0000..0x1000_4000).step_by(4) {
        bus.read32(&mut hw, addr);
    }
    for addr in (SBUS_PS1_START..SBUS_PS1_END).step_by(4) {
        bus.read32(&mut hw, addr);
    }
}
