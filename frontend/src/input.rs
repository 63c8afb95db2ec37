use std::collections::HashMap;

use phosphor_core::core::machine::InputButton;
use sdl2::keyboard::Scancode;

/// Maps SDL scancodes to machine button IDs.
pub struct KeyMap {
    map: HashMap<Scancode, u8>,
}

impl KeyMap {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Bind a scancode to a machine button ID.
    pub fn bind(&mut self, scancode: Scancode, button_id: u8) {
        self.map.insert(scancode, button_id);
    }

    /// Look up the machine button ID for a scancode.
    pub fn get(&self, scancode: Scancode) -> Option<u8> {
        self.map.get(&scancode).copied()
    }
}

/// Build the default key map for TK2000's button table: letters, digits,
/// arrows, and the handful of punctuation keys the matrix exposes directly.
/// Symbols reached via a host Shift chord (`!@#$%^&*()`) aren't bound here —
/// `KeyMap` binds one scancode per button with no modifier awareness, and
/// wiring that up is host-UI polish outside the core's scope (spec.md §1).
pub fn default_key_map(buttons: &[InputButton]) -> KeyMap {
    let mut km = KeyMap::new();

    for button in buttons {
        let scancode = match button.name {
            "A" => Some(Scancode::A),
            "B" => Some(Scancode::B),
            "C" => Some(Scancode::C),
            "D" => Some(Scancode::D),
            "E" => Some(Scancode::E),
            "F" => Some(Scancode::F),
            "G" => Some(Scancode::G),
            "H" => Some(Scancode::H),
            "I" => Some(Scancode::I),
            "J" => Some(Scancode::J),
            "K" => Some(Scancode::K),
            "L" => Some(Scancode::L),
            "M" => Some(Scancode::M),
            "N" => Some(Scancode::N),
            "O" => Some(Scancode::O),
            "P" => Some(Scancode::P),
            "Q" => Some(Scancode::Q),
            "R" => Some(Scancode::R),
            "S" => Some(Scancode::S),
            "T" => Some(Scancode::T),
            "U" => Some(Scancode::U),
            "V" => Some(Scancode::V),
            "W" => Some(Scancode::W),
            "X" => Some(Scancode::X),
            "Y" => Some(Scancode::Y),
            "Z" => Some(Scancode::Z),

            "0" => Some(Scancode::Num0),
            "1" => Some(Scancode::Num1),
            "2" => Some(Scancode::Num2),
            "3" => Some(Scancode::Num3),
            "4" => Some(Scancode::Num4),
            "5" => Some(Scancode::Num5),
            "6" => Some(Scancode::Num6),
            "7" => Some(Scancode::Num7),
            "8" => Some(Scancode::Num8),
            "9" => Some(Scancode::Num9),

            "Left" => Some(Scancode::Left),
            "Right" => Some(Scancode::Right),
            "Up" => Some(Scancode::Up),
            "Down" => Some(Scancode::Down),
            "Enter" => Some(Scancode::Return),
            "Backspace" => Some(Scancode::Backspace),
            "Space" => Some(Scancode::Space),
            "Colon" => Some(Scancode::Semicolon),
            "Comma" => Some(Scancode::Comma),
            "Period" => Some(Scancode::Period),
            "Question" => Some(Scancode::Slash),
            "Shift" => Some(Scancode::LShift),
            "Ctrl" => Some(Scancode::LCtrl),

            _ => None,
        };

        if let Some(sc) = scancode {
            km.bind(sc, button.id);
        }
    }

    km
}
