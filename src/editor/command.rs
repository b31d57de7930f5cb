use std::str::FromStr;

use thiserror::Error;

use super::Editor;
use crate::mode::Mode;
use crate::viewport::{clamp_grouping, clamp_octets};

/// A parsed `:` command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `:123`, clamped to the last byte.
    Goto(usize),
    /// `:0x7b`, clamped like `Goto`.
    GotoHex(usize),
    Write,
    Quit,
    ForceQuit,
    WriteQuit,
    SetOctets(usize),
    SetGrouping(usize),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Command not found: {0}")]
    NotFound(String),
    #[error("Unknown setting: {0}")]
    UnknownSetting(String),
    #[error("Invalid value for '{setting}': {value}")]
    InvalidValue { setting: String, value: String },
    #[error("Offset too large: {0}")]
    HexOverflow(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cmd = s.trim();

        if !cmd.is_empty() && cmd.bytes().all(|b| b.is_ascii_digit()) {
            // All digits, so the only way to fail is overflow.
            return Ok(Command::Goto(cmd.parse().unwrap_or(usize::MAX)));
        }

        if let Some(hex) = cmd.strip_prefix("0x") {
            if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return usize::from_str_radix(hex, 16)
                    .map(Command::GotoHex)
                    .map_err(|_| CommandError::HexOverflow(cmd.to_string()));
            }
        }

        if let Some(setting) = cmd.strip_prefix("set ") {
            return parse_setting(setting.trim());
        }

        match cmd {
            "w" => Ok(Command::Write),
            "q" => Ok(Command::Quit),
            "q!" => Ok(Command::ForceQuit),
            "wq" => Ok(Command::WriteQuit),
            _ => Err(CommandError::NotFound(cmd.to_string())),
        }
    }
}

fn parse_setting(setting: &str) -> Result<Command, CommandError> {
    let Some((name, value)) = setting.split_once('=') else {
        return Err(CommandError::UnknownSetting(setting.to_string()));
    };
    let (name, value) = (name.trim(), value.trim());
    let invalid = || CommandError::InvalidValue {
        setting: name.to_string(),
        value: value.to_string(),
    };

    match name {
        "o" | "octets" => value.parse().map(Command::SetOctets).map_err(|_| invalid()),
        "g" | "grouping" => value.parse().map(Command::SetGrouping).map_err(|_| invalid()),
        _ => Err(CommandError::UnknownSetting(name.to_string())),
    }
}

impl Editor {
    pub fn enter_command_mode(&mut self) {
        self.mode = Mode::Command(String::new());
    }

    pub fn exit_command_mode(&mut self) {
        self.mode = Mode::Normal;
    }

    /// Append a typed character to the command or search line.
    pub fn input_push(&mut self, ch: char) {
        if let Mode::Command(input) | Mode::Search(input) = &mut self.mode {
            input.push(ch);
        }
    }

    /// Backspace on the command or search line. On an empty line this
    /// leaves the mode instead.
    pub fn input_pop(&mut self) {
        let emptied = match &mut self.mode {
            Mode::Command(input) | Mode::Search(input) => input.pop().is_none(),
            _ => false,
        };
        if emptied {
            self.mode = Mode::Normal;
        }
    }

    /// Parse and run the command line typed so far.
    pub fn execute_command(&mut self) {
        let Mode::Command(input) = std::mem::replace(&mut self.mode, Mode::Normal) else {
            return;
        };
        tracing::debug!(target: "command", input = %input, "execute");
        match input.parse::<Command>() {
            Ok(command) => self.run_command(command),
            Err(e) => self.error(e.to_string()),
        }
    }

    pub fn run_command(&mut self, command: Command) {
        let len = self.buffer.len();
        match command {
            Command::Goto(offset) => {
                self.jump_to(offset.min(len.saturating_sub(1)));
            }
            Command::GotoHex(offset) => {
                let offset = offset.min(len.saturating_sub(1));
                if self.jump_to(offset) {
                    self.info(format!("Positioned to offset 0x{offset:09x} ({offset})"));
                }
            }
            Command::Write => {
                self.write_file();
            }
            Command::Quit => {
                if self.dirty {
                    self.error("No write since last change (add ! to override)");
                } else {
                    self.quit();
                }
            }
            Command::ForceQuit => self.quit(),
            Command::WriteQuit => {
                if self.write_file() {
                    self.quit();
                }
            }
            Command::SetOctets(octets) => {
                let offset = self.offset();
                self.viewport.octets_per_line = clamp_octets(octets);
                self.viewport.grouping =
                    clamp_grouping(self.viewport.grouping, self.viewport.octets_per_line);
                self.relayout(offset);
            }
            Command::SetGrouping(grouping) => {
                let offset = self.offset();
                self.viewport.grouping = clamp_grouping(grouping, self.viewport.octets_per_line);
                self.relayout(offset);
            }
        }
    }

    /// Write the buffer to disk, reporting the outcome on the status line.
    pub fn write_file(&mut self) -> bool {
        match self.buffer.write() {
            Ok(()) => {
                self.dirty = false;
                self.info(format!(
                    "\"{}\", {} bytes written",
                    self.buffer.filename().display(),
                    self.buffer.len()
                ));
                true
            }
            Err(e) => {
                tracing::warn!(target: "io", error = %e, "write_failed");
                self.error(e.to_string());
                false
            }
        }
    }

    /// Keep the same byte under the cursor after the grid changes shape.
    fn relayout(&mut self, offset: usize) {
        let len = self.buffer.len();
        self.viewport.scroll(0, len);
        self.jump_to(offset);
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_editor;
    use super::*;
    use crate::buffer::ByteBuffer;
    use crate::editor::Severity;

    fn run(ed: &mut Editor, text: &str) {
        ed.enter_command_mode();
        for ch in text.chars() {
            ed.input_push(ch);
        }
        ed.execute_command();
    }

    #[test]
    fn parse_grammar() {
        assert_eq!("123".parse::<Command>(), Ok(Command::Goto(123)));
        assert_eq!("0x0a".parse::<Command>(), Ok(Command::GotoHex(10)));
        assert_eq!("w".parse::<Command>(), Ok(Command::Write));
        assert_eq!("q".parse::<Command>(), Ok(Command::Quit));
        assert_eq!("q!".parse::<Command>(), Ok(Command::ForceQuit));
        assert_eq!("wq".parse::<Command>(), Ok(Command::WriteQuit));
        assert_eq!("set o=32".parse::<Command>(), Ok(Command::SetOctets(32)));
        assert_eq!("set octets=24".parse::<Command>(), Ok(Command::SetOctets(24)));
        assert_eq!("set g=4".parse::<Command>(), Ok(Command::SetGrouping(4)));
        assert_eq!("set grouping = 8".parse::<Command>(), Ok(Command::SetGrouping(8)));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            "frobnicate".parse::<Command>(),
            Err(CommandError::NotFound("frobnicate".into()))
        );
        assert_eq!(
            "0x".parse::<Command>(),
            Err(CommandError::NotFound("0x".into()))
        );
        assert_eq!(
            "set o=abc".parse::<Command>(),
            Err(CommandError::InvalidValue {
                setting: "o".into(),
                value: "abc".into()
            })
        );
        assert_eq!(
            "set colour=red".parse::<Command>(),
            Err(CommandError::UnknownSetting("colour".into()))
        );
        assert!(matches!(
            "0xffffffffffffffffffff".parse::<Command>(),
            Err(CommandError::HexOverflow(_))
        ));
    }

    #[test]
    fn command_push_and_pop() {
        let mut ed = test_editor(b"hello");
        ed.enter_command_mode();
        ed.input_push('w');
        assert_eq!(ed.mode.input(), Some("w"));
        ed.input_pop();
        assert_eq!(ed.mode.input(), Some(""));
        // Backspace on an empty line leaves command mode
        ed.input_pop();
        assert_eq!(ed.mode, Mode::Normal);
    }

    #[test]
    fn goto_decimal_offset() {
        let mut ed = test_editor(b"0123456789");
        run(&mut ed, "5");
        assert_eq!(ed.offset(), 5);
        assert_eq!(ed.mode, Mode::Normal);
    }

    #[test]
    fn goto_decimal_clamps_to_last_byte() {
        let mut ed = test_editor(b"0123456789");
        run(&mut ed, "999");
        assert_eq!(ed.offset(), 9);
    }

    #[test]
    fn goto_hex_offset() {
        let mut ed = test_editor(&[0u8; 32]);
        run(&mut ed, "0x1a");
        assert_eq!(ed.offset(), 26);
        assert_eq!(ed.status.text, "Positioned to offset 0x00000001a (26)");
    }

    #[test]
    fn goto_hex_at_length_lands_on_last_byte() {
        let mut ed = test_editor(b"0123456789");
        run(&mut ed, "0x0a");
        assert_eq!(ed.offset(), 9);
        assert_eq!(ed.status.text, "Positioned to offset 0x000000009 (9)");
    }

    #[test]
    fn goto_hex_past_end_clamps_like_decimal() {
        let mut ed = test_editor(b"0123456789");
        ed.move_right();
        run(&mut ed, "0xff");
        assert_eq!(ed.offset(), 9);
        assert_eq!(ed.status.severity, Severity::Info);
        assert_eq!(ed.status.text, "Positioned to offset 0x000000009 (9)");

        run(&mut ed, "2");
        run(&mut ed, "99");
        assert_eq!(ed.offset(), 9);
    }

    #[test]
    fn unknown_command_changes_nothing() {
        let mut ed = test_editor(b"hello");
        run(&mut ed, "x");
        assert!(ed.running);
        assert_eq!(ed.mode, Mode::Normal);
        assert_eq!(ed.status.text, "Command not found: x");
    }

    #[test]
    fn q_quits_when_clean() {
        let mut ed = test_editor(b"hello");
        run(&mut ed, "q");
        assert!(!ed.running);
    }

    #[test]
    fn q_refuses_when_dirty() {
        let mut ed = test_editor(b"hello");
        ed.delete_at_cursor();
        run(&mut ed, "q");
        assert!(ed.running);
        assert_eq!(ed.status.severity, Severity::Error);
        run(&mut ed, "q!");
        assert!(!ed.running);
    }

    #[test]
    fn w_writes_and_clears_dirty() {
        let mut ed = test_editor(b"hello");
        ed.enter_replace_mode();
        ed.hex_input('4');
        ed.hex_input('a');
        ed.exit_to_normal();
        assert!(ed.dirty);

        run(&mut ed, "w");
        assert!(!ed.dirty);
        assert!(ed.running);
        assert!(ed.status.text.ends_with("5 bytes written"));

        let reread = ByteBuffer::from_file(ed.buffer.filename().to_path_buf()).unwrap();
        assert_eq!(reread.as_bytes(), b"Jello");
    }

    #[test]
    fn w_failure_keeps_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let buf = ByteBuffer::new(dir.path().join("missing").join("out.bin"), b"x".to_vec());
        let mut ed = Editor::new(buf);
        ed.delete_at_cursor();
        run(&mut ed, "wq");
        assert!(ed.dirty);
        assert!(ed.running);
        assert_eq!(ed.status.severity, Severity::Error);
    }

    #[test]
    fn wq_writes_and_quits() {
        let mut ed = test_editor(b"hello");
        ed.delete_at_cursor();
        run(&mut ed, "wq");
        assert!(!ed.running);
        assert!(!ed.dirty);
    }

    #[test]
    fn set_octets_keeps_byte_under_cursor() {
        let mut ed = test_editor(&[0u8; 256]);
        run(&mut ed, "40");
        run(&mut ed, "set o=32");
        assert_eq!(ed.viewport.octets_per_line, 32);
        assert_eq!(ed.offset(), 40);
        assert_eq!((ed.viewport.cursor_x, ed.viewport.cursor_y), (9, 2));
    }

    #[test]
    fn set_octets_clamps() {
        let mut ed = test_editor(&[0u8; 256]);
        run(&mut ed, "set o=4");
        assert_eq!(ed.viewport.octets_per_line, 16);
        run(&mut ed, "set o=1000");
        assert_eq!(ed.viewport.octets_per_line, 64);
    }

    #[test]
    fn set_grouping_clamps() {
        let mut ed = test_editor(&[0u8; 256]);
        run(&mut ed, "set g=8");
        assert_eq!(ed.viewport.grouping, 8);
        run(&mut ed, "set grouping=99");
        assert_eq!(ed.viewport.grouping, 16);
        run(&mut ed, "set g=0");
        assert_eq!(ed.viewport.grouping, 2);
    }
}
