use phosphor_core::core::{BusMaster, BusMasterComponent};
use phosphor_core::cpu::m6502::{M6502, StatusFlag};

mod common;
use common::TestBus;

/// Ticks enough cycles for one instruction to fully retire, generous enough
/// to cover every 65C02 addressing mode and RMW opcode in this file.
fn run_one(cpu: &mut M6502, bus: &mut TestBus) {
    for _ in 0..8 {
        cpu.tick_with_bus(bus, BusMaster::Cpu(0));
    }
}

#[test]
fn bra_always_branches_like_a_relative_jump() {
    let mut cpu = M6502::new();
    let mut bus = TestBus::new();
    // BRA +4
    bus.load(0, &[0x80, 0x04]);
    run_one(&mut cpu, &mut bus);
    assert_eq!(cpu.pc, 0x0002 + 4);
}

#[test]
fn stz_zeroes_memory_regardless_of_accumulator() {
    let mut cpu = M6502::new();
    let mut bus = TestBus::new();
    cpu.a = 0xFF;
    bus.memory[0x0010] = 0xAB;
    // STZ $10
    bus.load(0, &[0x64, 0x10]);
    run_one(&mut cpu, &mut bus);
    assert_eq!(bus.memory[0x0010], 0x00);
    assert_eq!(cpu.a, 0xFF);
}

#[test]
fn phx_plx_round_trip_x_through_the_stack() {
    let mut cpu = M6502::new();
    let mut bus = TestBus::new();
    cpu.x = 0x37;
    // PHX ; LDX #$00 ; PLX
    bus.load(0, &[0xDA, 0xA2, 0x00, 0xFA]);
    run_one(&mut cpu, &mut bus);
    assert_eq!(cpu.x, 0x00);
    run_one(&mut cpu, &mut bus);
    run_one(&mut cpu, &mut bus);
    assert_eq!(cpu.x, 0x37);
}

#[test]
fn phy_ply_round_trip_y_through_the_stack() {
    let mut cpu = M6502::new();
    let mut bus = TestBus::new();
    cpu.y = 0x99;
    // PHY ; LDY #$00 ; PLY
    bus.load(0, &[0x5A, 0xA0, 0x00, 0x7A]);
    run_one(&mut cpu, &mut bus);
    assert_eq!(cpu.y, 0x00);
    run_one(&mut cpu, &mut bus);
    run_one(&mut cpu, &mut bus);
    assert_eq!(cpu.y, 0x99);
}

#[test]
fn ina_dea_increment_and_decrement_the_accumulator_in_place() {
    let mut cpu = M6502::new();
    let mut bus = TestBus::new();
    cpu.a = 0x7F;
    // INA
    bus.load(0, &[0x1A]);
    run_one(&mut cpu, &mut bus);
    assert_eq!(cpu.a, 0x80);
    assert_ne!(cpu.p & (StatusFlag::N as u8), 0);

    cpu.pc = 0;
    // DEA
    bus.load(0, &[0x3A]);
    run_one(&mut cpu, &mut bus);
    assert_eq!(cpu.a, 0x7F);
}

#[test]
fn bit_immediate_only_sets_zero_not_n_or_v() {
    let mut cpu = M6502::new();
    let mut bus = TestBus::new();
    cpu.a = 0x0F;
    // BIT #$F0 (no overlap -> Z set; N/V untouched by the immediate form)
    bus.load(0, &[0x89, 0xF0]);
    run_one(&mut cpu, &mut bus);
    assert_ne!(cpu.p & (StatusFlag::Z as u8), 0);
}

#[test]
fn trb_clears_accumulator_bits_from_memory_and_reports_overlap_in_z() {
    let mut cpu = M6502::new();
    let mut bus = TestBus::new();
    cpu.a = 0x0F;
    bus.memory[0x20] = 0xFF;
    // TRB $20
    bus.load(0, &[0x14, 0x20]);
    run_one(&mut cpu, &mut bus);
    assert_eq!(bus.memory[0x20], 0xF0);
    assert_eq!(cpu.p & (StatusFlag::Z as u8), 0); // overlap existed -> Z clear
}

#[test]
fn tsb_sets_accumulator_bits_into_memory() {
    let mut cpu = M6502::new();
    let mut bus = TestBus::new();
    cpu.a = 0x0F;
    bus.memory[0x20] = 0xF0;
    // TSB $20
    bus.load(0, &[0x04, 0x20]);
    run_one(&mut cpu, &mut bus);
    assert_eq!(bus.memory[0x20], 0xFF);
}

#[test]
fn jmp_indirect_does_not_wrap_within_the_page_on_65c02() {
    let mut cpu = M6502::new();
    let mut bus = TestBus::new();
    // Classic 6502 bug: JMP ($30FF) would read the high byte from $3000
    // instead of $3100. The 65C02 fixes this.
    bus.memory[0x30FF] = 0x00;
    bus.memory[0x3100] = 0xBB; // would be picked up by the buggy wraparound
    bus.memory[0x3101] = 0x80; // correct high byte
    // JMP ($30FF)
    bus.load(0, &[0x6C, 0xFF, 0x30]);
    run_one(&mut cpu, &mut bus);
    assert_eq!(cpu.pc, 0x8000);
}
