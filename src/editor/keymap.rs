use super::Editor;
use super::search::SearchDirection;
use crate::mode::Mode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn handle_key(editor: &mut Editor, key: KeyEvent) {
    // Chords that work the same in every mode
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('q') => {
                editor.quit();
                return;
            }
            KeyCode::Char('s') => {
                editor.write_file();
                return;
            }
            _ => {}
        }
    }

    match editor.mode {
        Mode::Normal => handle_normal_key(editor, key),
        Mode::Insert(_) | Mode::Append(_) | Mode::Replace(_) => handle_hex_key(editor, key),
        Mode::InsertAscii | Mode::AppendAscii => handle_ascii_key(editor, key),
        Mode::Command(_) | Mode::Search(_) => handle_line_key(editor, key),
    }
}

fn handle_normal_key(editor: &mut Editor, key: KeyEvent) {
    // Handle 'g' prefix for gg command
    if editor.pending_g {
        editor.pending_g = false;
        if key.code == KeyCode::Char('g') {
            editor.goto_top();
        }
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('r') => editor.redo(),
            KeyCode::Char('u') | KeyCode::Char('b') => editor.page_up(),
            KeyCode::Char('d') | KeyCode::Char('f') => editor.page_down(),
            _ => {}
        }
        return;
    }

    match key.code {
        // Line input
        KeyCode::Char(':') => editor.enter_command_mode(),
        KeyCode::Char('/') => editor.enter_search_mode(),

        // Edit modes
        KeyCode::Char('i') => editor.enter_insert_mode(),
        KeyCode::Char('I') => editor.enter_insert_ascii_mode(),
        KeyCode::Char('a') => editor.enter_append_mode(),
        KeyCode::Char('A') => editor.enter_append_ascii_mode(),
        KeyCode::Char('r') => editor.enter_replace_mode(),

        // Movement
        KeyCode::Char('h') | KeyCode::Left => editor.move_left(),
        KeyCode::Char('j') | KeyCode::Down => editor.move_down(),
        KeyCode::Char('k') | KeyCode::Up => editor.move_up(),
        KeyCode::Char('l') | KeyCode::Right => editor.move_right(),
        KeyCode::Char('w') => editor.move_group_forward(),
        KeyCode::Char('b') => editor.move_group_backward(),
        KeyCode::Home => editor.goto_line_start(),
        KeyCode::End => editor.goto_line_end(),
        KeyCode::PageUp => editor.page_up(),
        KeyCode::PageDown => editor.page_down(),

        // Jump to top/bottom
        KeyCode::Char('g') => editor.pending_g = true,
        KeyCode::Char('G') => editor.goto_bottom(),

        // Byte edits
        KeyCode::Char('x') | KeyCode::Delete => editor.delete_at_cursor(),
        KeyCode::Char(']') => editor.increment_byte(1),
        KeyCode::Char('[') => editor.increment_byte(-1),

        // Search repeat
        KeyCode::Char('n') => editor.search_next(SearchDirection::Forward),
        KeyCode::Char('N') => editor.search_next(SearchDirection::Backward),

        // History
        KeyCode::Char('u') => editor.undo(),

        _ => {}
    }
}

fn handle_hex_key(editor: &mut Editor, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => editor.exit_to_normal(),

        // Arrow keys still navigate
        KeyCode::Left => editor.move_left(),
        KeyCode::Down => editor.move_down(),
        KeyCode::Up => editor.move_up(),
        KeyCode::Right => editor.move_right(),

        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            editor.hex_input(c)
        }

        _ => {}
    }
}

fn handle_ascii_key(editor: &mut Editor, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => editor.exit_to_normal(),

        KeyCode::Left => editor.move_left(),
        KeyCode::Down => editor.move_down(),
        KeyCode::Up => editor.move_up(),
        KeyCode::Right => editor.move_right(),

        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            editor.ascii_input(c)
        }

        _ => {}
    }
}

fn handle_line_key(editor: &mut Editor, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => editor.exit_command_mode(),
        KeyCode::Enter => match editor.mode {
            Mode::Search(_) => editor.execute_search(),
            _ => editor.execute_command(),
        },
        KeyCode::Backspace => editor.input_pop(),
        KeyCode::Char(c) if !c.is_control() => editor.input_push(c),
        _ => {}
    }
}
