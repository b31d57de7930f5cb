use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::editor::{Editor, Severity};
use crate::mode::Mode;

/// Width of the `000000000:` address column.
const ADDRESS_WIDTH: u16 = 10;

/// Render the editor state to the terminal.
pub fn draw(frame: &mut Frame, editor: &Editor) {
    let area = frame.area();

    // Split into the hex grid (all but last row) and status bar (last row).
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // hex grid
            Constraint::Length(1), // status bar
        ])
        .split(area);

    draw_hex_area(frame, editor, chunks[0]);
    match editor.mode.input() {
        Some(input) => draw_input_line(frame, editor, input, chunks[1]),
        None => draw_status_bar(frame, editor, chunks[1]),
    }
}

/// Column (relative to the row start) where the hex digits of byte `col` begin.
/// Every group of bytes is preceded by one space.
fn hex_column(col: usize, grouping: usize) -> u16 {
    (ADDRESS_WIDTH as usize + col * 2 + col / grouping + 1) as u16
}

fn draw_hex_area(frame: &mut Frame, editor: &Editor, area: Rect) {
    let bytes = editor.buffer.as_bytes();
    if bytes.is_empty() {
        frame.render_widget(Paragraph::new("empty"), area);
        return;
    }

    let vp = &editor.viewport;
    let opl = vp.octets_per_line;
    let cursor_offset = editor.offset();
    let address_style = Style::default().fg(Color::Yellow);
    let ascii_style = Style::default().fg(Color::Green);
    let cursor_style = Style::default().fg(Color::Black).bg(Color::White);

    let mut lines: Vec<Line> = Vec::with_capacity(area.height as usize);
    for i in 0..area.height as usize {
        let start = (vp.top_line + i) * opl;
        if start >= bytes.len() {
            break;
        }
        let row = &bytes[start..(start + opl).min(bytes.len())];

        let mut hex = String::with_capacity(opl * 3);
        for (col, byte) in row.iter().enumerate() {
            if col % vp.grouping == 0 {
                hex.push(' ');
            }
            hex.push_str(&format!("{byte:02x}"));
        }
        // Pad short final rows so the ASCII column lines up.
        let full_width = (hex_column(opl, vp.grouping) - ADDRESS_WIDTH) as usize - 1;
        let padding = " ".repeat(full_width.saturating_sub(hex.len()) + 2);

        let mut spans = vec![
            Span::styled(format!("{start:09x}:"), address_style),
            Span::raw(hex),
            Span::raw(padding),
        ];
        for (col, byte) in row.iter().enumerate() {
            let ch = if byte.is_ascii_graphic() || *byte == b' ' {
                *byte as char
            } else {
                '.'
            };
            let style = if start + col == cursor_offset {
                cursor_style
            } else {
                ascii_style
            };
            spans.push(Span::styled(ch.to_string(), style));
        }
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).block(Block::default());
    frame.render_widget(paragraph, area);

    // Sit on the low nibble while a hex pair is half typed.
    let pending = matches!(
        &editor.mode,
        Mode::Insert(pair) | Mode::Append(pair) | Mode::Replace(pair) if pair.is_pending()
    );
    let cursor_x = area.x + hex_column(vp.cursor_x - 1, vp.grouping) + pending as u16;
    let cursor_y = area.y + (vp.cursor_y - 1) as u16;
    frame.set_cursor_position((cursor_x, cursor_y));
}

/// Offset, byte value and position through the file, e.g. `0x000000010,16 (41)  25%`.
fn ruler(editor: &Editor) -> Option<String> {
    let len = editor.buffer.len();
    let offset = editor.offset();
    let byte = editor.buffer.get(offset)?;
    let percentage = (offset + 1) * 100 / len;
    Some(format!("0x{offset:09x},{offset} ({byte:02x})  {percentage}%"))
}

fn draw_status_bar(frame: &mut Frame, editor: &Editor, area: Rect) {
    let style = match editor.status.severity {
        Severity::Info => Style::default().bg(Color::Gray).fg(Color::Black),
        Severity::Warning => Style::default().bg(Color::Yellow).fg(Color::Black),
        Severity::Error => Style::default()
            .bg(Color::Red)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    };

    let message = &editor.status.text;
    let ruler = ruler(editor).unwrap_or_default();
    let dirty = if editor.dirty { "[+] " } else { "" };
    // Right-align the ruler
    let spacing_len =
        (area.width as usize).saturating_sub(message.len() + dirty.len() + ruler.len() + 1);
    let spacing = " ".repeat(spacing_len);

    let mut spans = Vec::new();
    if !message.is_empty() {
        spans.push(Span::styled(message.clone(), style));
    }
    spans.push(Span::raw(format!("{spacing}{dirty}{ruler} ")));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_input_line(frame: &mut Frame, editor: &Editor, input: &str, area: Rect) {
    let prompt = match editor.mode {
        Mode::Search(_) => '/',
        _ => ':',
    };
    let text = format!("{prompt}{input}");
    let cursor_x = area.x + text.chars().count() as u16;
    frame.render_widget(Paragraph::new(text), area);
    frame.set_cursor_position((cursor_x, area.y));
}
