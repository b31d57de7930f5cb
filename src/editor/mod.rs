mod command;
mod deletion;
mod history;
mod insert;
mod keymap;
mod movement;
mod search;
mod status;

pub use keymap::handle_key;
pub use status::{Severity, StatusMessage};

use crate::buffer::ByteBuffer;
use crate::mode::Mode;
use crate::undo::UndoLog;
use crate::viewport::{Viewport, clamp_grouping, clamp_octets};

pub struct Editor {
    pub buffer: ByteBuffer,
    pub history: UndoLog,
    pub viewport: Viewport,
    pub mode: Mode,
    pub running: bool,
    /// Set whenever the buffer diverges from what was last read or written.
    pub dirty: bool,
    /// Tracks whether the previous key was 'g' (for the gg command).
    pub pending_g: bool,
    pub status: StatusMessage,
    /// Raw text of the last successful search, replayed by `n`/`N`.
    pub last_search: Option<String>,
    /// Offset of the last byte typed in Insert mode when the run started in
    /// an empty buffer. Further bytes go after it instead of before.
    pub(crate) insert_tail: Option<usize>,
}

impl Editor {
    pub fn new(buffer: ByteBuffer) -> Self {
        let mut editor = Self {
            buffer,
            history: UndoLog::new(),
            viewport: Viewport::default(),
            mode: Mode::Normal,
            running: true,
            dirty: false,
            pending_g: false,
            status: StatusMessage::default(),
            last_search: None,
            insert_tail: None,
        };
        editor.announce_file();
        editor
    }

    /// Apply the octets-per-line and grouping settings, clamped to what the
    /// grid can show.
    pub fn with_layout(mut self, octets_per_line: usize, grouping: usize) -> Self {
        self.viewport.octets_per_line = clamp_octets(octets_per_line);
        self.viewport.grouping = clamp_grouping(grouping, self.viewport.octets_per_line);
        self
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Offset of the byte under the cursor.
    pub fn offset(&self) -> usize {
        self.viewport.offset_at_cursor(self.buffer.len())
    }

    /// Move the view to `offset`, reporting out-of-range requests on the status line.
    pub(crate) fn jump_to(&mut self, offset: usize) -> bool {
        match self.viewport.scroll_to_offset(offset, self.buffer.len()) {
            Ok(()) => true,
            Err(e) => {
                self.error(e.to_string());
                false
            }
        }
    }

    pub(crate) fn info(&mut self, text: impl Into<String>) {
        self.status = StatusMessage::new(Severity::Info, text);
    }

    pub(crate) fn warn(&mut self, text: impl Into<String>) {
        self.status = StatusMessage::new(Severity::Warning, text);
    }

    pub(crate) fn error(&mut self, text: impl Into<String>) {
        self.status = StatusMessage::new(Severity::Error, text);
    }

    fn announce_file(&mut self) {
        let name = self.buffer.filename().display().to_string();
        let len = self.buffer.len();
        if self.buffer.is_new() {
            self.info(format!("\"{name}\" [New file]"));
        } else if self.buffer.readonly() {
            self.warn(format!("\"{name}\" ({len} bytes) [readonly]"));
        } else {
            self.info(format!("\"{name}\" ({len} bytes)"));
        }
    }
}

#[cfg(test)]
pub(crate) fn test_editor(content: &[u8]) -> Editor {
    use std::io::Write;
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(content).unwrap();
    let buf = ByteBuffer::from_file(tmp.path().to_path_buf()).unwrap();
    Editor::new(buf)
}
