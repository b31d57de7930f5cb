use super::Editor;
use crate::undo::Applied;

impl Editor {
    pub fn undo(&mut self) {
        match self.history.undo(&mut self.buffer) {
            Some(applied) => self.after_replay("Undone", applied),
            None => self.info("Nothing to undo"),
        }
    }

    pub fn redo(&mut self) {
        match self.history.redo(&mut self.buffer) {
            Some(applied) => self.after_replay("Redone", applied),
            None => self.info("Nothing to redo"),
        }
    }

    fn after_replay(&mut self, verb: &str, applied: Applied) {
        self.dirty = true;
        tracing::debug!(
            target: "undo",
            kind = %applied.kind,
            offset = applied.offset,
            position = ?self.history.status(),
            "{verb}"
        );
        let len = self.buffer.len();
        if self.jump_to(applied.offset.min(len)) {
            self.info(format!(
                "{verb} {} at offset 0x{:09x} ({}/{})",
                applied.kind,
                applied.offset,
                self.history.position(),
                self.history.len()
            ));
        }
    }
}
