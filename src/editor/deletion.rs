use super::Editor;
use crate::undo::ActionKind;

impl Editor {
    /// Delete the byte under the cursor (vim `x`).
    pub fn delete_at_cursor(&mut self) {
        let offset = self.offset();
        let Some(byte) = self.buffer.delete(offset) else {
            self.warn("Nothing to delete");
            return;
        };
        self.history.record(ActionKind::Delete, offset, byte);
        self.dirty = true;
        // Deleting the last byte pulls the cursor back one.
        self.viewport.clamp_cursor(self.buffer.len());
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_editor;
    use crate::editor::Severity;
    use crate::undo::{Action, ActionKind};

    #[test]
    fn delete_mid_buffer() {
        let mut ed = test_editor(b"ABC");
        ed.move_right();
        ed.delete_at_cursor();
        assert_eq!(ed.buffer.as_bytes(), b"AC");
        assert_eq!(ed.offset(), 1);
        assert!(ed.dirty);
        assert_eq!(
            ed.history.actions(),
            &[Action {
                kind: ActionKind::Delete,
                offset: 1,
                byte: 0x42
            }]
        );
    }

    #[test]
    fn delete_last_byte_moves_cursor_back() {
        let mut ed = test_editor(b"ABC");
        ed.move_right();
        ed.move_right();
        ed.delete_at_cursor();
        assert_eq!(ed.buffer.as_bytes(), b"AB");
        assert_eq!(ed.offset(), 1);
        assert_eq!((ed.viewport.cursor_x, ed.viewport.cursor_y), (2, 1));
    }

    #[test]
    fn delete_until_empty() {
        let mut ed = test_editor(b"AB");
        ed.delete_at_cursor();
        ed.delete_at_cursor();
        assert!(ed.buffer.is_empty());
        assert_eq!(ed.history.len(), 2);

        ed.delete_at_cursor();
        assert_eq!(ed.status.severity, Severity::Warning);
        assert_eq!(ed.status.text, "Nothing to delete");
        assert_eq!(ed.history.len(), 2);
    }
}
