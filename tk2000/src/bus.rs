//! 64 KiB address-mapped bus wiring RAM/ROM/BankSW/Keyboard/Tape/Sound/
//! Video per spec §4.1 and the exact device table in §4.9.
//!
//! Per spec §9 "Bus multi-device cells": addresses map to {Empty, One, Two}
//! devices rather than an inheritance hierarchy. TK2000 only ever needs up
//! to two devices sharing a single address (0xC010: keyboard strobe-clear
//! and tape CASIN), so the small enum below is exact rather than a
//! general-purpose list.

use phosphor_core::core::{Bus as CoreBus, BusMaster, bus::InterruptState};

use crate::bank_sw::{Bank, BankSw};
use crate::keyboard::Keyboard;
use crate::ram::Ram;
use crate::rom::Rom;
use crate::sound::{AudioSink, NullSink, Sound};
use crate::tape::Tape;
use crate::video::Video;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Device {
    Ram,
    Rom,
    Keyboard,
    Tape,
    Sound,
    Video,
    BankSw,
}

#[derive(Clone, Copy, Debug, Default)]
enum Cell {
    #[default]
    Empty,
    One(Device),
    Two(Device, Device),
}

pub enum AttachMode {
    Replace,
    Add,
}

pub struct SystemBus {
    map: Vec<Cell>,
    pub ram: Ram,
    pub rom: Rom,
    pub bank_sw: BankSw,
    pub keyboard: Keyboard,
    pub tape: Tape,
    pub sound: Sound,
    pub video: Video,
    clock: u64,
    audio_sink: Box<dyn AudioSink>,
}

impl SystemBus {
    pub fn new(rom: Rom) -> Self {
        let mut bus = Self {
            map: vec![Cell::default(); 0x10000],
            ram: Ram::new(),
            rom,
            bank_sw: BankSw::new(),
            keyboard: Keyboard::new(),
            tape: Tape::new(),
            sound: Sound::new(),
            video: Video::new(),
            clock: 0,
            audio_sink: Box::new(NullSink),
        };
        bus.wire();
        bus
    }

    pub fn set_audio_sink(&mut self, sink: Box<dyn AudioSink>) {
        self.audio_sink = sink;
    }

    fn attach(&mut self, range: std::ops::RangeInclusive<u16>, device: Device, mode: AttachMode) {
        for addr in range {
            let cell = &mut self.map[addr as usize];
            *cell = match (mode, *cell) {
                (AttachMode::Replace, _) => Cell::One(device),
                (AttachMode::Add, Cell::Empty) => Cell::One(device),
                (AttachMode::Add, Cell::One(existing)) => Cell::Two(existing, device),
                (AttachMode::Add, Cell::Two(_a, b)) => {
                    tracing::debug!(addr, "bus cell already has two devices; dropping oldest");
                    Cell::Two(b, device)
                }
            };
        }
    }

    /// Wire the device graph exactly per spec §4.9's table.
    fn wire(&mut self) {
        use AttachMode::*;
        self.attach(0x0000..=0xBFFF, Device::Ram, Replace);
        self.attach(0xC000..=0xC01F, Device::Keyboard, Replace);
        self.attach(0xC010..=0xC010, Device::Tape, Add);
        self.attach(0xC020..=0xC02F, Device::Tape, Replace);
        self.attach(0xC030..=0xC03F, Device::Sound, Replace);
        self.attach(0xC050..=0xC051, Device::Video, Replace);
        self.attach(0xC052..=0xC053, Device::Tape, Replace);
        self.attach(0xC054..=0xC055, Device::Video, Replace);
        self.attach(0xC056..=0xC057, Device::Tape, Replace);
        self.attach(0xC05A..=0xC05B, Device::BankSw, Replace);
        self.attach(0xC05E..=0xC05F, Device::Keyboard, Replace);
        self.attach(0xC070..=0xC071, Device::Tape, Replace);
        self.attach(0xC080..=0xC08B, Device::BankSw, Replace);
        self.rewrite_bank_window();
    }

    /// Rewrite the 0xC100-0xFFFF window to point at ROM or RAM per the
    /// current bank. TK2000 has no cartridge slot, so (per DESIGN.md) the
    /// full window is always remapped, never the narrower 0xC200-0xFFFF
    /// the cartridge-probe variant in spec §4.3 describes.
    fn rewrite_bank_window(&mut self) {
        let device = match self.bank_sw.active() {
            Bank::Rom => Device::Rom,
            Bank::Ram => Device::Ram,
        };
        self.attach(0xC100..=0xFFFF, device, AttachMode::Replace);
    }

    fn select_bank(&mut self, bank: Bank) {
        if self.bank_sw.active() != bank {
            self.bank_sw.select(bank);
            self.rewrite_bank_window();
        }
    }

    pub fn reset(&mut self) {
        self.bank_sw.reset();
        self.rewrite_bank_window();
        self.video.reset();
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    fn read_device(&mut self, device: Device, addr: u16) -> u8 {
        match device {
            Device::Ram => self.ram.read(addr),
            Device::Rom => self.rom.read(addr),
            Device::Keyboard => self.keyboard.read(addr),
            Device::Tape => {
                let (value, toggle_speaker) = self.tape.read(addr, self.clock);
                if toggle_speaker {
                    self.sound.toggle(self.clock, self.audio_sink.as_mut());
                }
                value
            }
            Device::Sound => self.sound.toggle(self.clock, self.audio_sink.as_mut()),
            Device::Video => self.video.access(addr),
            Device::BankSw => {
                let bank = if addr == 0xC05A || (0xC080..=0xC08B).contains(&addr) && addr & 1 == 0
                {
                    Bank::Rom
                } else {
                    Bank::Ram
                };
                self.select_bank(bank);
                0xFF
            }
        }
    }

    fn write_device(&mut self, device: Device, addr: u16, value: u8) {
        match device {
            Device::Ram => self.ram.write(addr, value),
            Device::Rom => self.rom.write(addr, value),
            Device::Keyboard => self.keyboard.write(addr, value),
            // Tape has no defined write-side behavior (spec §4.5 only
            // advances playback on reads of 0xC010/0xC020-0xC02F); a write
            // here is a no-op, mirroring Rom::write. This matters because
            // 0xC010 is a Cell::Two(Keyboard, Tape) cell: a legitimate
            // KBIN write must not also arm/advance the tape half-cycle.
            Device::Tape => {}
            Device::Sound => {
                self.sound.toggle(self.clock, self.audio_sink.as_mut());
            }
            Device::Video => {
                self.video.access(addr);
            }
            Device::BankSw => {
                let bank = if addr == 0xC05B || (0xC080..=0xC08B).contains(&addr) && addr & 1 == 1
                {
                    Bank::Ram
                } else {
                    Bank::Rom
                };
                self.select_bank(bank);
            }
        }
    }
}

impl CoreBus for SystemBus {
    type Address = u16;
    type Data = u8;

    fn read(&mut self, _master: BusMaster, addr: u16) -> u8 {
        match self.map[addr as usize] {
            Cell::Empty => 0xFF,
            Cell::One(d) => self.read_device(d, addr),
            Cell::Two(d1, d2) => self.read_device(d1, addr) | self.read_device(d2, addr),
        }
    }

    fn write(&mut self, _master: BusMaster, addr: u16, data: u8) {
        match self.map[addr as usize] {
            Cell::Empty => {}
            Cell::One(d) => self.write_device(d, addr, data),
            Cell::Two(d1, d2) => {
                self.write_device(d1, addr, data);
                self.write_device(d2, addr, data);
            }
        }
    }

    fn is_halted_for(&self, _master: BusMaster) -> bool {
        false
    }

    fn check_interrupts(&self, _target: BusMaster) -> InterruptState {
        // No TK2000 device in scope raises NMI/IRQ.
        InterruptState::default()
    }
}

/// Advance the clock by one CPU cycle. Called once per `tick_with_bus` by
/// `Machine::run_frame` (the clock itself lives on the bus rather than the
/// CPU so that Tape/Sound, which only see the bus, can read it — spec §5).
impl SystemBus {
    pub fn tick_clock(&mut self) {
        self.clock = self.clock.wrapping_add(1);
    }

    pub fn fill_video_pages(&mut self, value: u8) {
        self.ram.fill(0x2000, 0x2000, value);
        self.ram.fill(0xA000, 0x2000, value);
    }
}
