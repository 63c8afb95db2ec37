//! 8x8 scan-matrix keyboard at 0xC000-0xC01F / 0xC05E-0xC05F (spec §4.4).
//!
//! TK2000 exposes only the "direct" variant: at most one key is active at a
//! time, with no hold timing and no event queue (spec §9 "Keyboard variant").

/// A physical key as identified by the host. The row/col matrix and shift
/// requirements are resolved internally by `Keyboard::key_to_cell`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Letter(char),
    Digit(u8),
    Left,
    Right,
    Up,
    Down,
    Enter,
    Backspace,
    Space,
    Colon,
    Comma,
    Period,
    Question,
    /// One of the shifted symbols `!"#$%&/()=-+*^@`.
    Symbol(char),
}

/// Matrix cell plus whether producing this key also requires the SHIFT
/// line to read asserted (spec §4.4 "Symbols ... map to a letter/digit
/// cell with SHIFT asserted").
#[derive(Debug, Clone, Copy)]
struct Cell {
    row: u8,
    col: u8,
    shift: bool,
}

const fn cell(row: u8, col: u8) -> Cell {
    Cell {
        row,
        col,
        shift: false,
    }
}

const fn shifted(row: u8, col: u8) -> Cell {
    Cell {
        row,
        col,
        shift: true,
    }
}

pub struct Keyboard {
    /// Row-selector written to KBIN; one-hot (bit N selects row N).
    kbin: u8,
    /// Last value written to KBIN, independent of decoding above (spec §3).
    last_kbin_write: u8,
    /// Currently-pressed key's matrix cell, if any.
    active: Option<Cell>,
    ctrl: bool,
    shift: bool,
    /// Set by a write to 0xC05F: the next read answers the control-key
    /// query instead of the matrix.
    control_query: bool,
}

impl Default for Keyboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Keyboard {
    pub fn new() -> Self {
        Self {
            kbin: 0,
            last_kbin_write: 0,
            active: None,
            ctrl: false,
            shift: false,
            control_query: false,
        }
    }

    /// Translate a host `Key` into its matrix cell. Letters map by
    /// uppercase; digits 1-5 sit on row 3, 6-0 on row 4 (spec §4.4).
    ///
    /// The five symbols without an obvious shift-digit home (`-+*^@`) are a
    /// documented judgment call — see DESIGN.md — since the spec's
    /// referenced glossary symbol table is not present in the retrieved
    /// spec text.
    fn key_to_cell(key: Key) -> Option<Cell> {
        Some(match key {
            Key::Letter(c) => match c.to_ascii_uppercase() {
                'B' => cell(0, 1),
                'V' => cell(0, 2),
                'C' => cell(0, 3),
                'X' => cell(0, 4),
                'Z' => cell(0, 5),
                'G' => cell(1, 1),
                'F' => cell(1, 2),
                'D' => cell(1, 3),
                'S' => cell(1, 4),
                'A' => cell(1, 5),
                'T' => cell(2, 1),
                'R' => cell(2, 2),
                'E' => cell(2, 3),
                'W' => cell(2, 4),
                'Q' => cell(2, 5),
                'Y' => cell(5, 1),
                'U' => cell(5, 2),
                'I' => cell(5, 3),
                'O' => cell(5, 4),
                'P' => cell(5, 5),
                'H' => cell(6, 1),
                'J' => cell(6, 2),
                'K' => cell(6, 3),
                'L' => cell(6, 4),
                'N' => cell(7, 1),
                'M' => cell(7, 2),
                _ => return None,
            },
            Key::Digit(d) => match d {
                // Row 3 runs LEFT,5,4,3,2,1 column-wise (glossary matrix table).
                1 => cell(3, 5),
                2 => cell(3, 4),
                3 => cell(3, 3),
                4 => cell(3, 2),
                5 => cell(3, 1),
                6 => cell(4, 1),
                7 => cell(4, 2),
                8 => cell(4, 3),
                9 => cell(4, 4),
                0 => cell(4, 5),
                _ => return None,
            },
            Key::Left | Key::Backspace => cell(3, 0),
            Key::Right => cell(4, 0),
            Key::Down => cell(5, 0),
            Key::Up => cell(6, 0),
            Key::Space => cell(2, 0),
            Key::Enter => cell(7, 0),
            Key::Colon => cell(6, 5),
            Key::Comma => cell(7, 3),
            Key::Period => cell(7, 4),
            Key::Question => cell(7, 5),
            Key::Symbol(c) => match c {
                // Shift of the row-3 digit cells, which run 5,4,3,2,1 (see above).
                '!' => shifted(3, 5),
                '"' => shifted(3, 4),
                '#' => shifted(3, 3),
                '$' => shifted(3, 2),
                '%' => shifted(3, 1),
                '&' => shifted(4, 1),
                '/' => shifted(4, 2),
                '(' => shifted(4, 3),
                ')' => shifted(4, 4),
                '=' => shifted(4, 5),
                '-' => shifted(6, 5), // shift of ':'
                '+' => shifted(7, 3), // shift of ','
                '*' => shifted(7, 4), // shift of '.'
                '^' => shifted(7, 5), // shift of '?'
                '@' => shifted(2, 0), // shift of SPACE
                _ => return None,
            },
        })
    }

    /// Host reports a key press. Unmapped keys are silently ignored (the
    /// direct variant only tracks a single active cell).
    pub fn key_down(&mut self, key: Key) {
        self.active = Self::key_to_cell(key);
    }

    /// Host reports key release; clears the active cell.
    pub fn key_up(&mut self) {
        self.active = None;
    }

    pub fn set_ctrl(&mut self, held: bool) {
        self.ctrl = held;
    }

    pub fn set_shift(&mut self, held: bool) {
        self.shift = held;
    }

    /// The active cell's own shift requirement ORed with the physical
    /// SHIFT key.
    fn effective_shift(&self) -> bool {
        self.shift || self.active.map(|c| c.shift).unwrap_or(false)
    }

    /// Read of 0xC000-0xC01F (matrix) or 0xC05E-0xC05F (control-key line).
    pub fn read(&mut self, addr: u16) -> u8 {
        match addr {
            0xC05E => {
                let v = if self.ctrl { 1 } else { 0 };
                self.control_query = false;
                v
            }
            0xC05F => {
                self.control_query = true;
                0
            }
            _ => self.read_matrix(),
        }
    }

    fn read_matrix(&self) -> u8 {
        if self.control_query && self.ctrl {
            return 1;
        }
        if self.kbin == 0x01 && self.effective_shift() {
            return 1;
        }
        match self.active {
            Some(cell) if self.kbin == (1u8 << cell.row) => 1u8 << cell.col,
            _ => 0,
        }
    }

    /// Write of 0xC000-0xC01F (sets KBIN) or 0xC05E-0xC05F (control query
    /// arm / clear).
    pub fn write(&mut self, addr: u16, value: u8) {
        self.last_kbin_write = value;
        match addr {
            0xC05F => self.control_query = true,
            0xC05E => self.control_query = false,
            _ => self.kbin = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_key_reads_zero() {
        let mut kb = Keyboard::new();
        kb.write(0xC000, 0x01);
        assert_eq!(kb.read(0xC000), 0);
    }

    #[test]
    fn matching_row_returns_column_bit() {
        let mut kb = Keyboard::new();
        kb.key_down(Key::Letter('Q')); // row 2, col 5
        kb.write(0xC000, 1 << 2);
        assert_eq!(kb.read(0xC000), 1 << 5);
    }

    #[test]
    fn mismatched_row_returns_zero() {
        let mut kb = Keyboard::new();
        kb.key_down(Key::Letter('Q'));
        kb.write(0xC000, 1 << 3);
        assert_eq!(kb.read(0xC000), 0);
    }

    #[test]
    fn shift_line_on_kbin_one() {
        let mut kb = Keyboard::new();
        kb.set_shift(true);
        kb.write(0xC000, 0x01);
        assert_eq!(kb.read(0xC000), 1);
    }

    #[test]
    fn control_line_query() {
        let mut kb = Keyboard::new();
        kb.set_ctrl(true);
        kb.write(0xC05F, 0);
        assert_eq!(kb.read(0xC05E), 1);
    }

    #[test]
    fn key_release_clears_state() {
        let mut kb = Keyboard::new();
        kb.key_down(Key::Letter('A')); // row 1, col 5
        kb.key_up();
        kb.write(0xC000, 1 << 1);
        assert_eq!(kb.read(0xC000), 0);
    }

    #[test]
    fn symbol_asserts_shift_automatically() {
        let mut kb = Keyboard::new();
        kb.key_down(Key::Symbol('!')); // shifted digit 1, row 3 col 5
        kb.write(0xC000, 0x01);
        assert_eq!(kb.read(0xC000), 1, "KBIN=0x01 should read shift line high");
        kb.write(0xC000, 1 << 3);
        assert_eq!(kb.read(0xC000), 1 << 5);
    }
}
