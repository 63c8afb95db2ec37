//! End-to-end bus and machine scenarios exercising the system as a whole
//! rather than one device at a time.

mod common;
use common::{expected_rom_byte, patterned_rom};

use phosphor_core::core::{Bus, BusMaster};
use tk2000::bus::SystemBus;
use tk2000::machine::Tk2000Machine;

#[test]
fn unmapped_address_reads_as_open_bus() {
    let mut bus = SystemBus::new(patterned_rom());
    // 0xC060 falls in a gap between the wired softswitch ranges.
    assert_eq!(bus.read(BusMaster::Cpu(0), 0xC060), 0xFF);
}

#[test]
fn ram_round_trips_across_the_whole_ram_window() {
    let mut bus = SystemBus::new(patterned_rom());
    for addr in [0x0000u16, 0x0800, 0x4000, 0xBFFF] {
        bus.write(BusMaster::Cpu(0), addr, 0xA5);
        assert_eq!(bus.read(BusMaster::Cpu(0), addr), 0xA5);
    }
}

#[test]
fn rom_window_ignores_writes_under_bank_rom_is_false() {
    let mut bus = SystemBus::new(patterned_rom());
    // Default bank after construction + wire() is BANK_ROM.
    let before = bus.read(BusMaster::Cpu(0), 0xD000);
    bus.write(BusMaster::Cpu(0), 0xD000, 0xDE);
    assert_eq!(bus.read(BusMaster::Cpu(0), 0xD000), before);
    assert_eq!(before, expected_rom_byte(0x1000));
}

#[test]
fn bank_switch_scenario_ram_write_survives_switch_back_to_rom() {
    let mut bus = SystemBus::new(patterned_rom());

    // Scenario 4: read 0xC05B (select RAM), write 0xDE to 0xD000, read
    // 0xC05A (select ROM), read 0xD000 -> expect the ROM byte, not 0xDE.
    bus.read(BusMaster::Cpu(0), 0xC05B);
    bus.write(BusMaster::Cpu(0), 0xD000, 0xDE);
    assert_eq!(bus.read(BusMaster::Cpu(0), 0xD000), 0xDE);

    bus.read(BusMaster::Cpu(0), 0xC05A);
    assert_eq!(bus.read(BusMaster::Cpu(0), 0xD000), expected_rom_byte(0x1000));
}

#[test]
fn keyboard_matrix_scenario_via_the_bus() {
    use tk2000::keyboard::Key;

    let mut bus = SystemBus::new(patterned_rom());
    // 'Q' is row 2, column 5 per the matrix table.
    bus.keyboard.key_down(Key::Letter('Q'));
    bus.write(BusMaster::Cpu(0), 0xC000, 1 << 2);
    assert_eq!(bus.read(BusMaster::Cpu(0), 0xC000), 1 << 5);
    // Any other row selector misses.
    bus.write(BusMaster::Cpu(0), 0xC000, 1 << 3);
    assert_eq!(bus.read(BusMaster::Cpu(0), 0xC000), 0);
}

#[test]
fn kbin_write_to_0xc010_does_not_disturb_tape_playback() {
    use tk2000::keyboard::Key;

    // 0xC010 is a Cell::Two(Keyboard, Tape) cell. A write there (setting
    // KBIN, the normal keyboard-row-selector path) must not also arm or
    // advance the tape's half-cycle state machine, which only reacts to
    // reads (spec §4.5).
    let mut bus = SystemBus::new(patterned_rom());
    bus.keyboard.key_down(Key::Letter('Q')); // row 2, col 5
    bus.write(BusMaster::Cpu(0), 0xC010, 1 << 2);
    assert_eq!(bus.read(BusMaster::Cpu(0), 0xC010) & (1 << 5), 1 << 5);
}

#[test]
fn power_on_reset_scenario_runs_a_million_cycles_without_crashing() {
    let mut machine = Tk2000Machine::new(patterned_rom());
    // 60 frames/sec * 1,000,000/60 cycles/frame ~= 1,000,000 cycles.
    for _ in 0..60 {
        machine.run_frame();
    }
    let pc = machine.bus().rom.read(0xFFFC) as u16 | (machine.bus().rom.read(0xFFFD) as u16) << 8;
    assert_eq!(pc, 0xC100);
}

#[test]
fn lda_sta_round_trip_scenario() {
    let mut bus = SystemBus::new(patterned_rom());
    // LDA #$42 ; STA $2000 ; LDA $2000
    bus.write(BusMaster::Cpu(0), 0x0800, 0xA9);
    bus.write(BusMaster::Cpu(0), 0x0801, 0x42);
    bus.write(BusMaster::Cpu(0), 0x0802, 0x8D);
    bus.write(BusMaster::Cpu(0), 0x0803, 0x00);
    bus.write(BusMaster::Cpu(0), 0x0804, 0x20);
    bus.write(BusMaster::Cpu(0), 0x0805, 0xAD);
    bus.write(BusMaster::Cpu(0), 0x0806, 0x00);
    bus.write(BusMaster::Cpu(0), 0x0807, 0x20);

    let mut cpu = phosphor_core::cpu::M6502::new();
    cpu.pc = 0x0800;
    for _ in 0..64 {
        phosphor_core::core::BusMasterComponent::tick_with_bus(&mut cpu, &mut bus, BusMaster::Cpu(0));
    }

    assert_eq!(cpu.a, 0x42);
    assert_eq!(bus.ram.read(0x2000), 0x42);
}

#[test]
fn decimal_adc_scenario() {
    use phosphor_core::cpu::m6502::StatusFlag;

    let mut bus = SystemBus::new(patterned_rom());
    bus.write(BusMaster::Cpu(0), 0x0800, 0x69); // ADC #$17
    bus.write(BusMaster::Cpu(0), 0x0801, 0x17);

    let mut cpu = phosphor_core::cpu::M6502::new();
    cpu.pc = 0x0800;
    cpu.a = 0x25;
    cpu.p |= StatusFlag::D as u8;
    cpu.p &= !(StatusFlag::C as u8);

    for _ in 0..8 {
        phosphor_core::core::BusMasterComponent::tick_with_bus(&mut cpu, &mut bus, BusMaster::Cpu(0));
    }

    assert_eq!(cpu.a, 0x42);
    assert_eq!(cpu.p & (StatusFlag::C as u8), 0);
}

#[test]
fn reset_reselects_rom_bank() {
    use tk2000::bank_sw::Bank;

    let mut machine = Tk2000Machine::new(patterned_rom());
    assert_eq!(machine.bus().bank_sw.active(), Bank::Rom);
    machine.reset();
    assert_eq!(machine.bus().bank_sw.active(), Bank::Rom);
}
