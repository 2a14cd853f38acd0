// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut

//! Basic system tests

use super::*;
use crate::core::hw::CycleState;
use crate::core::memory::MemoryTraceSink;

fn spinning(system: &mut System) {
    system.hardware_mut().cycles = CycleState {
        cycle: 100,
        next_event_cycle: 400,
        last_event_cycle: 10,
    };
}

#[test]
fn test_default_system_uses_intc_hack() {
    let mut system = System::new();
    assert!(system.config().speedhacks.intc_stat);

    spinning(&mut system);
    system.read32(INTC_STAT);
    assert_eq!(system.hardware().cycles.cycle, 400);
}

#[test]
fn test_intc_hack_disabled_by_config() {
    let mut config = HwConfig::default();
    config.speedhacks.intc_stat = false;
    let mut system = System::with_config(config).unwrap();

    spinning(&mut system);
    system.read32(INTC_STAT);
    system.read16(INTC_STAT);
    assert_eq!(system.hardware().cycles.cycle, 100);
}

#[test]
fn test_halfword_read_uses_intc_hack() {
    let mut system = System::new();
    spinning(&mut system);

    system.read16(INTC_STAT);
    assert_eq!(system.hardware().cycles.cycle, 400);
}

#[test]
fn test_byte_and_wide_reads_skip_intc_hack() {
    let mut system = System::new();
    spinning(&mut system);

    system.read8(INTC_STAT);
    system.read64(INTC_STAT);
    assert_eq!(system.hardware().cycles.cycle, 100);
}

#[test]
fn test_config_reaches_hardware() {
    let mut config = HwConfig::default();
    config.gamefixes.vif_fifo_hack = true;
    config.memory.rdram_devices = 3;
    let mut system = System::with_config(config).unwrap();

    assert!(system.hardware().fixes.vif_fifo_hack);

    system.hardware_mut().regs.write32(D1_MADR, 0x100);
    system.hardware_mut().regs.write32(D1_QWC, 1);
    assert_eq!(system.read32(D1_MADR), 0x110);

    system.hardware_mut().regs.write32(MCH_RICM, 0x21 << 16);
    let acks: Vec<u32> = (0..3).map(|_| system.read32(MCH_DRD)).collect();
    assert_eq!(acks, vec![0x1F, 0x1F, 0]);
}

#[test]
fn test_trace_file_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.log");

    let mut config = HwConfig::default();
    config.trace.enabled = true;
    config.trace.path = Some(path.clone());
    let mut system = System::with_config(config).unwrap();

    system.read32(GIF_STAT);
    system.flush_trace().unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("GIF_STAT"));
}

#[test]
fn test_trace_file_in_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();

    let mut config = HwConfig::default();
    config.trace.enabled = true;
    config.trace.path = Some(dir.path().join("missing").join("trace.log"));

    assert!(matches!(
        System::with_config(config),
        Err(EmulatorError::Io(_))
    ));
}

#[test]
fn test_reset_keeps_table() {
    let mut system = System::new();
    let table = system.spu2_table();

    system.hardware_mut().regs.write32(DMAC_CTRL, 0xFFFF);
    system.hardware_mut().spu2.write16(table, 0x19C, 0x1234);
    system.hardware_mut().ipu.push_output(5);

    system.reset();

    assert!(std::ptr::eq(system.spu2_table(), table));
    assert_eq!(system.read32(DMAC_CTRL), 0);
    assert_eq!(system.read_spu2(SPU2_BASE + 0x19C), 0);
    assert_eq!(system.read128(IPU_OUT_FIFO), 0);

    // The table still resolves writes after reset
    system.hardware_mut().spu2.write16(table, 0x19C, 0x0002);
    assert_eq!(system.hardware().spu2.cores[0].irqa, 0x0002_0000);
}

#[test]
fn test_systems_share_one_table() {
    let first = System::new();
    let second = System::new();
    assert!(std::ptr::eq(first.spu2_table(), second.spu2_table()));
}

#[test]
fn test_spu2_reads_are_traced() {
    let mut system = System::new();
    let sink = MemoryTraceSink::new();
    system.set_trace_sink(Some(Box::new(sink.clone())));

    let table = system.spu2_table();
    system.hardware_mut().spu2.write16(table, 0x7C0, 0x0100);

    assert_eq!(system.read_spu2(SPU2_BASE + 0x7C0), 0x0100);
    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].address, SPU2_BASE + 0x7C0);
    assert_eq!(records[0].value, HwValue::U16(0x0100));
}
