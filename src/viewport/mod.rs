//! Mapping between linear byte offsets and the 2-D hex grid on screen.
//!
//! Cursor coordinates are 1-based: `cursor_x` is the column within a row of
//! `octets_per_line` bytes, `cursor_y` the row counted from the first visible
//! line `top_line`. The bottom screen row is reserved for the status line.

use thiserror::Error;

pub const DEFAULT_OCTETS_PER_LINE: usize = 16;
pub const DEFAULT_GROUPING: usize = 2;
pub const MIN_OCTETS_PER_LINE: usize = 16;
pub const MAX_OCTETS_PER_LINE: usize = 64;
pub const MIN_GROUPING: usize = 2;
pub const MAX_GROUPING: usize = 16;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Out of range: 0x{offset:09x} ({offset})")]
pub struct OutOfRange {
    pub offset: usize,
    pub len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

pub fn clamp_octets(octets: usize) -> usize {
    octets.clamp(MIN_OCTETS_PER_LINE, MAX_OCTETS_PER_LINE)
}

pub fn clamp_grouping(grouping: usize, octets_per_line: usize) -> usize {
    grouping
        .clamp(MIN_GROUPING, MAX_GROUPING)
        .min(octets_per_line)
}

#[derive(Debug, Clone)]
pub struct Viewport {
    pub cursor_x: usize,
    pub cursor_y: usize,
    pub top_line: usize,
    pub octets_per_line: usize,
    pub grouping: usize,
    pub screen_rows: usize,
    pub screen_cols: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            cursor_x: 1,
            cursor_y: 1,
            top_line: 0,
            octets_per_line: DEFAULT_OCTETS_PER_LINE,
            grouping: DEFAULT_GROUPING,
            screen_rows: 24,
            screen_cols: 80,
        }
    }
}

impl Viewport {
    pub fn resize(&mut self, rows: usize, cols: usize) {
        self.screen_rows = rows;
        self.screen_cols = cols;
    }

    /// Rows available to the hex grid.
    pub fn visible_rows(&self) -> usize {
        self.screen_rows.saturating_sub(1).max(1)
    }

    /// Offset of the byte under the cursor, clamped into `[0, len)`.
    pub fn offset_at_cursor(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.raw_offset().min(len - 1)
    }

    /// Screen coordinates of `offset` for the current `top_line`. Does not scroll.
    pub fn cursor_at_offset(&self, offset: usize) -> (usize, usize) {
        let x = offset % self.octets_per_line + 1;
        let y = (offset / self.octets_per_line + 1).saturating_sub(self.top_line);
        (x, y)
    }

    pub fn move_cursor(&mut self, direction: Direction, amount: usize, len: usize) {
        if len == 0 {
            self.reset();
            return;
        }

        let opl = self.octets_per_line as isize;
        let line = self.top_line as isize;
        let amount = amount as isize;
        let mut x = self.cursor_x as isize;
        // Row counted from the start of the file, 0-based.
        let mut row = self.cursor_y as isize - 1 + line;

        match direction {
            Direction::Up => row -= amount,
            Direction::Down => row += amount,
            Direction::Left | Direction::Right => {
                let delta = if direction == Direction::Left {
                    -amount
                } else {
                    amount
                };
                let pos = row * opl + (x - 1) + delta;
                if pos < 0 {
                    x = 1;
                    row = 0;
                } else {
                    x = pos % opl + 1;
                    row = pos / opl;
                }
            }
        }
        row = row.max(0);

        let visible = self.visible_rows() as isize;
        let y = row - line + 1;
        if y < 1 {
            self.scroll(y - 1, len);
        } else if y > visible {
            self.scroll(y - visible, len);
        }
        let y = (row - self.top_line as isize + 1).clamp(1, visible);

        self.cursor_x = x as usize;
        self.cursor_y = y as usize;

        if self.raw_offset() >= len - 1 {
            self.place_cursor(len - 1, len);
        }
    }

    /// Move `top_line` by `units`, keeping it between 0 and the last line that
    /// still fills the screen (minus two rows of slack).
    pub fn scroll(&mut self, units: isize, len: usize) {
        let line = self.top_line as isize + units;
        self.top_line = line.clamp(0, self.max_top_line(len)) as usize;
    }

    /// Bring `offset` under the cursor. Offsets already on screen only move the
    /// cursor; others re-center the view on them.
    pub fn scroll_to_offset(&mut self, offset: usize, len: usize) -> Result<(), OutOfRange> {
        if offset > len {
            return Err(OutOfRange { offset, len });
        }
        if len == 0 {
            self.reset();
            return Ok(());
        }
        self.place_cursor(offset.min(len - 1), len);
        Ok(())
    }

    /// Pull the cursor back onto the last byte if it sits past end of file.
    pub fn clamp_cursor(&mut self, len: usize) {
        if len == 0 {
            self.reset();
        } else if self.raw_offset() > len - 1 {
            self.place_cursor(len - 1, len);
        }
    }

    pub fn goto_line_start(&mut self) {
        self.cursor_x = 1;
    }

    pub fn goto_line_end(&mut self, len: usize) {
        self.cursor_x = self.octets_per_line;
        self.clamp_cursor(len);
    }

    pub fn reset(&mut self) {
        self.cursor_x = 1;
        self.cursor_y = 1;
        self.top_line = 0;
    }

    fn raw_offset(&self) -> usize {
        (self.cursor_y - 1 + self.top_line) * self.octets_per_line + (self.cursor_x - 1)
    }

    fn max_top_line(&self, len: usize) -> isize {
        let upper = (len / self.octets_per_line) as isize - (self.screen_rows as isize - 2);
        upper.max(0)
    }

    fn place_cursor(&mut self, offset: usize, len: usize) {
        let first = self.top_line * self.octets_per_line;
        let end = first + self.visible_rows() * self.octets_per_line;
        if !(first..end).contains(&offset) {
            let line = (offset / self.octets_per_line) as isize - (self.visible_rows() / 2) as isize;
            self.top_line = line.clamp(0, self.max_top_line(len)) as usize;
        }
        let (x, y) = self.cursor_at_offset(offset);
        self.cursor_x = x;
        self.cursor_y = y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(rows: usize) -> Viewport {
        Viewport {
            screen_rows: rows,
            ..Viewport::default()
        }
    }

    #[test]
    fn starts_at_origin() {
        let vp = Viewport::default();
        assert_eq!((vp.cursor_x, vp.cursor_y, vp.top_line), (1, 1, 0));
        assert_eq!(vp.offset_at_cursor(100), 0);
    }

    #[test]
    fn offset_on_empty_buffer_is_zero() {
        let mut vp = Viewport::default();
        vp.cursor_x = 5;
        assert_eq!(vp.offset_at_cursor(0), 0);
    }

    #[test]
    fn offset_formula_includes_top_line() {
        let mut vp = Viewport::default();
        vp.top_line = 2;
        vp.cursor_y = 3;
        vp.cursor_x = 5;
        assert_eq!(vp.offset_at_cursor(1000), (2 + 2) * 16 + 4);
    }

    #[test]
    fn offset_clamped_to_last_byte() {
        let mut vp = Viewport::default();
        vp.cursor_y = 4;
        assert_eq!(vp.offset_at_cursor(20), 19);
    }

    #[test]
    fn cursor_offset_bijection() {
        for top_line in [0, 3] {
            let mut vp = viewport(40);
            vp.top_line = top_line;
            let len = 2000;
            let first = top_line * 16;
            for o in first..first + 16 * 20 {
                let (x, y) = vp.cursor_at_offset(o);
                vp.cursor_x = x;
                vp.cursor_y = y;
                assert_eq!(vp.offset_at_cursor(len), o);
            }
        }
    }

    #[test]
    fn move_left_at_origin_stays() {
        let mut vp = Viewport::default();
        vp.move_cursor(Direction::Left, 1, 100);
        assert_eq!((vp.cursor_x, vp.cursor_y), (1, 1));
    }

    #[test]
    fn move_up_at_top_keeps_column() {
        let mut vp = Viewport::default();
        vp.cursor_x = 7;
        vp.move_cursor(Direction::Up, 1, 100);
        assert_eq!((vp.cursor_x, vp.cursor_y), (7, 1));
    }

    #[test]
    fn move_left_wraps_to_previous_row() {
        let mut vp = Viewport::default();
        vp.cursor_y = 2;
        vp.move_cursor(Direction::Left, 1, 100);
        assert_eq!((vp.cursor_x, vp.cursor_y), (16, 1));
    }

    #[test]
    fn move_right_wraps_to_next_row() {
        let mut vp = Viewport::default();
        vp.cursor_x = 16;
        vp.move_cursor(Direction::Right, 1, 100);
        assert_eq!((vp.cursor_x, vp.cursor_y), (1, 2));
    }

    #[test]
    fn move_right_from_last_byte_stays() {
        let mut vp = Viewport::default();
        vp.scroll_to_offset(9, 10).unwrap();
        vp.move_cursor(Direction::Right, 1, 10);
        assert_eq!(vp.offset_at_cursor(10), 9);
        assert_eq!((vp.cursor_x, vp.cursor_y), (10, 1));
    }

    #[test]
    fn move_down_past_eof_lands_on_last_byte() {
        let mut vp = Viewport::default();
        vp.cursor_x = 12;
        vp.move_cursor(Direction::Down, 1, 20);
        assert_eq!(vp.offset_at_cursor(20), 19);
        assert_eq!((vp.cursor_x, vp.cursor_y), (4, 2));
    }

    #[test]
    fn group_skip_moves_by_amount() {
        let mut vp = Viewport::default();
        vp.move_cursor(Direction::Right, 4, 100);
        assert_eq!(vp.offset_at_cursor(100), 4);
        vp.move_cursor(Direction::Left, 4, 100);
        assert_eq!(vp.offset_at_cursor(100), 0);
    }

    #[test]
    fn move_down_past_screen_scrolls() {
        let mut vp = viewport(10);
        let len = 16 * 100;
        for _ in 0..8 {
            vp.move_cursor(Direction::Down, 1, len);
        }
        assert_eq!(vp.cursor_y, 9);
        assert_eq!(vp.top_line, 0);
        vp.move_cursor(Direction::Down, 1, len);
        assert_eq!(vp.cursor_y, 9);
        assert_eq!(vp.top_line, 1);
        assert_eq!(vp.offset_at_cursor(len), 9 * 16);
    }

    #[test]
    fn move_up_from_first_row_scrolls_back() {
        let mut vp = viewport(10);
        let len = 16 * 100;
        vp.top_line = 5;
        vp.move_cursor(Direction::Up, 1, len);
        assert_eq!(vp.top_line, 4);
        assert_eq!(vp.cursor_y, 1);
    }

    #[test]
    fn move_left_from_first_visible_row_scrolls_back() {
        let mut vp = viewport(10);
        let len = 16 * 100;
        vp.top_line = 5;
        vp.move_cursor(Direction::Left, 1, len);
        assert_eq!(vp.top_line, 4);
        assert_eq!((vp.cursor_x, vp.cursor_y), (16, 1));
        assert_eq!(vp.offset_at_cursor(len), 5 * 16 - 1);
    }

    #[test]
    fn move_on_empty_buffer_stays_home() {
        let mut vp = Viewport::default();
        vp.move_cursor(Direction::Right, 1, 0);
        assert_eq!((vp.cursor_x, vp.cursor_y), (1, 1));
    }

    #[test]
    fn scroll_clamps_both_ends() {
        let mut vp = viewport(10);
        let len = 16 * 100;
        vp.scroll(-5, len);
        assert_eq!(vp.top_line, 0);
        vp.scroll(1000, len);
        assert_eq!(vp.top_line, 100 - 8);
    }

    #[test]
    fn scroll_small_file_stays_at_zero() {
        let mut vp = viewport(24);
        vp.scroll(3, 40);
        assert_eq!(vp.top_line, 0);
    }

    #[test]
    fn scroll_to_visible_offset_does_not_scroll() {
        let mut vp = viewport(10);
        vp.scroll_to_offset(40, 1600).unwrap();
        assert_eq!(vp.top_line, 0);
        assert_eq!((vp.cursor_x, vp.cursor_y), (9, 3));
    }

    #[test]
    fn scroll_to_far_offset_centers() {
        let mut vp = viewport(10);
        let len = 16 * 100;
        vp.scroll_to_offset(50 * 16 + 3, len).unwrap();
        assert_eq!(vp.top_line, 50 - 4);
        assert_eq!(vp.offset_at_cursor(len), 50 * 16 + 3);
    }

    #[test]
    fn scroll_to_offset_near_end_clamps_top_line() {
        let mut vp = viewport(10);
        let len = 16 * 100;
        vp.scroll_to_offset(len - 1, len).unwrap();
        assert_eq!(vp.top_line, 92);
        assert_eq!(vp.offset_at_cursor(len), len - 1);
        assert!(vp.cursor_y <= vp.visible_rows());
    }

    #[test]
    fn scroll_to_offset_out_of_range_is_error() {
        let mut vp = Viewport::default();
        assert_eq!(
            vp.scroll_to_offset(11, 10),
            Err(OutOfRange { offset: 11, len: 10 })
        );
        assert_eq!((vp.cursor_x, vp.cursor_y), (1, 1));
    }

    #[test]
    fn scroll_to_offset_at_length_lands_on_last_byte() {
        let mut vp = Viewport::default();
        vp.scroll_to_offset(10, 10).unwrap();
        assert_eq!(vp.offset_at_cursor(10), 9);
    }

    #[test]
    fn line_end_clamps_to_eof() {
        let mut vp = Viewport::default();
        vp.goto_line_end(5);
        assert_eq!(vp.cursor_x, 5);
        vp.goto_line_start();
        assert_eq!(vp.cursor_x, 1);
    }

    #[test]
    fn grouping_clamps_to_octets() {
        assert_eq!(clamp_octets(8), 16);
        assert_eq!(clamp_octets(100), 64);
        assert_eq!(clamp_grouping(1, 16), 2);
        assert_eq!(clamp_grouping(32, 16), 16);
        assert_eq!(clamp_grouping(8, 32), 8);
    }
}
