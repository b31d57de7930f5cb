use super::Editor;
use crate::viewport::Direction;

impl Editor {
    pub fn move_left(&mut self) {
        self.move_by(Direction::Left, 1);
    }

    pub fn move_down(&mut self) {
        self.move_by(Direction::Down, 1);
    }

    pub fn move_up(&mut self) {
        self.move_by(Direction::Up, 1);
    }

    pub fn move_right(&mut self) {
        self.move_by(Direction::Right, 1);
    }

    /// Skip forward one group of bytes (vim `w`).
    pub fn move_group_forward(&mut self) {
        self.move_by(Direction::Right, self.viewport.grouping);
    }

    /// Skip back one group of bytes (vim `b`).
    pub fn move_group_backward(&mut self) {
        self.move_by(Direction::Left, self.viewport.grouping);
    }

    pub fn goto_top(&mut self) {
        self.viewport.reset();
    }

    pub fn goto_bottom(&mut self) {
        let len = self.buffer.len();
        self.viewport.scroll(len as isize, len);
        self.jump_to(len.saturating_sub(1));
    }

    pub fn goto_line_start(&mut self) {
        self.viewport.goto_line_start();
    }

    pub fn goto_line_end(&mut self) {
        self.viewport.goto_line_end(self.buffer.len());
    }

    pub fn page_down(&mut self) {
        self.page(1);
    }

    pub fn page_up(&mut self) {
        self.page(-1);
    }

    /// Scroll by a screenful, minus the status and ruler rows.
    fn page(&mut self, sign: isize) {
        let len = self.buffer.len();
        let amount = self.viewport.screen_rows.saturating_sub(2).max(1) as isize;
        self.viewport.scroll(sign * amount, len);
        self.viewport.clamp_cursor(len);
    }

    fn move_by(&mut self, direction: Direction, amount: usize) {
        self.viewport
            .move_cursor(direction, amount, self.buffer.len());
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_editor;

    #[test]
    fn move_right_then_left() {
        let mut ed = test_editor(b"abcdef");
        ed.move_right();
        ed.move_right();
        assert_eq!(ed.offset(), 2);
        ed.move_left();
        assert_eq!(ed.offset(), 1);
    }

    #[test]
    fn move_right_stops_at_last_byte() {
        let mut ed = test_editor(b"abc");
        for _ in 0..10 {
            ed.move_right();
        }
        assert_eq!(ed.offset(), 2);
    }

    #[test]
    fn move_down_stops_at_last_byte() {
        let mut ed = test_editor(&[0u8; 40]);
        for _ in 0..10 {
            ed.move_down();
        }
        assert_eq!(ed.offset(), 39);
    }

    #[test]
    fn group_skip_uses_grouping() {
        let mut ed = test_editor(&[0u8; 64]).with_layout(16, 4);
        ed.move_group_forward();
        assert_eq!(ed.offset(), 4);
        ed.move_group_forward();
        ed.move_group_backward();
        assert_eq!(ed.offset(), 4);
    }

    #[test]
    fn goto_top_and_bottom() {
        let mut ed = test_editor(&[0u8; 1000]);
        ed.goto_bottom();
        assert_eq!(ed.offset(), 999);
        assert!(ed.viewport.top_line > 0);
        ed.goto_top();
        assert_eq!(ed.offset(), 0);
        assert_eq!(ed.viewport.top_line, 0);
    }

    #[test]
    fn home_and_end_stay_on_row() {
        let mut ed = test_editor(&[0u8; 40]);
        ed.move_down();
        ed.move_right();
        ed.goto_line_end();
        assert_eq!(ed.offset(), 31);
        ed.goto_line_start();
        assert_eq!(ed.offset(), 16);
    }

    #[test]
    fn page_down_scrolls_view() {
        let mut ed = test_editor(&[0u8; 16 * 200]);
        ed.viewport.resize(24, 80);
        ed.page_down();
        assert_eq!(ed.viewport.top_line, 22);
        assert_eq!(ed.offset(), 22 * 16);
        ed.page_up();
        assert_eq!(ed.viewport.top_line, 0);
    }

    #[test]
    fn page_down_near_end_keeps_cursor_in_file() {
        let mut ed = test_editor(&[0u8; 30]);
        ed.move_down();
        ed.page_down();
        assert_eq!(ed.viewport.top_line, 0);
        assert!(ed.offset() < 30);
    }
}
