use super::Editor;
use crate::mode::Mode;
use crate::undo::ActionKind;

impl Editor {
    pub fn enter_insert_mode(&mut self) {
        self.set_mode(Mode::insert());
    }

    pub fn enter_insert_ascii_mode(&mut self) {
        self.set_mode(Mode::InsertAscii);
    }

    pub fn enter_append_mode(&mut self) {
        self.set_mode(Mode::append());
    }

    pub fn enter_append_ascii_mode(&mut self) {
        self.set_mode(Mode::AppendAscii);
    }

    pub fn enter_replace_mode(&mut self) {
        self.set_mode(Mode::replace());
    }

    /// Leave any edit mode, dropping a half-typed hex pair.
    pub fn exit_to_normal(&mut self) {
        self.set_mode(Mode::Normal);
    }

    fn set_mode(&mut self, mode: Mode) {
        self.insert_tail = None;
        tracing::debug!(target: "mode", from = %self.mode, to = %mode, "switch");
        self.info(mode.label());
        self.mode = mode;
    }

    /// Feed one keystroke to the hex pair of the current entry mode. Once
    /// two digits are in, the byte is inserted, appended or replaced.
    pub fn hex_input(&mut self, ch: char) {
        let pushed = match &mut self.mode {
            Mode::Insert(pair) | Mode::Append(pair) | Mode::Replace(pair) => pair.push(ch),
            _ => return,
        };
        let byte = match pushed {
            Ok(Some(byte)) => byte,
            Ok(None) => return,
            Err(bad) => {
                self.error(format!("'{}' is not valid hex", bad.escape_default()));
                return;
            }
        };
        match self.mode {
            Mode::Insert(_) => self.insert_byte(byte),
            Mode::Append(_) => self.append_byte(byte),
            Mode::Replace(_) => self.replace_byte(byte),
            _ => {}
        }
    }

    /// Take a literal keystroke in the ASCII entry modes.
    pub fn ascii_input(&mut self, ch: char) {
        if !ch.is_ascii() || ch.is_ascii_control() {
            self.error(format!("'{}' is not a printable byte", ch.escape_default()));
            return;
        }
        match self.mode {
            Mode::InsertAscii => self.insert_byte(ch as u8),
            Mode::AppendAscii => self.append_byte(ch as u8),
            _ => {}
        }
    }

    /// Insert `byte` before the cursor, then step right.
    pub fn insert_byte(&mut self, byte: u8) {
        if self.buffer.is_empty() {
            self.buffer.insert(0, byte, false);
            self.history.record(ActionKind::Insert, 0, byte);
            self.insert_tail = Some(0);
            self.dirty = true;
            self.viewport.reset();
            return;
        }
        let offset = self.offset();
        if self.insert_tail == Some(offset) && offset + 1 == self.buffer.len() {
            // The cursor cannot move past the last byte, so keep growing the
            // run from its end.
            self.buffer.insert(offset, byte, true);
            self.history.record(ActionKind::Append, offset, byte);
            self.insert_tail = Some(offset + 1);
            self.dirty = true;
            self.move_right();
            return;
        }
        let at = self.buffer.insert(offset, byte, false);
        self.history.record(ActionKind::Insert, at, byte);
        self.dirty = true;
        self.move_right();
    }

    /// Insert `byte` after the cursor, then step onto it.
    pub fn append_byte(&mut self, byte: u8) {
        if self.buffer.is_empty() {
            // Nothing to append after: the byte becomes offset 0.
            self.buffer.insert(0, byte, false);
            self.history.record(ActionKind::Insert, 0, byte);
            self.dirty = true;
            self.viewport.reset();
            return;
        }
        let offset = self.offset();
        self.buffer.insert(offset, byte, true);
        self.history.record(ActionKind::Append, offset, byte);
        self.dirty = true;
        self.move_right();
    }

    /// Overwrite the byte under the cursor, then step right.
    pub fn replace_byte(&mut self, byte: u8) {
        let offset = self.offset();
        let Some(previous) = self.buffer.replace(offset, byte) else {
            self.warn("Nothing to replace");
            return;
        };
        self.history.record(ActionKind::Replace, offset, previous);
        self.dirty = true;
        self.info(format!(
            "Replaced byte at offset 0x{offset:09x} with {byte:02x}"
        ));
        self.move_right();
    }

    /// Add `delta` to the byte under the cursor, wrapping around (`]` / `[`).
    pub fn increment_byte(&mut self, delta: i8) {
        let offset = self.offset();
        let Some(current) = self.buffer.get(offset) else {
            self.warn("Nothing to change");
            return;
        };
        let updated = current.wrapping_add_signed(delta);
        if let Some(previous) = self.buffer.replace(offset, updated) {
            self.history.record(ActionKind::Replace, offset, previous);
            self.dirty = true;
        }
    }
}
