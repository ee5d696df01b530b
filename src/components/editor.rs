use color_eyre::Result;
use dynojson::Direction;
use ratatui::{
    crossterm::event::{KeyCode, KeyEvent, KeyModifiers},
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use tracing::debug;

use crate::{action::Action, constants::ACTIVE_PANE_COLOR};

use super::{panes, Component};

const TAB: &str = "  ";

/// Multi-line input pane. The cursor is a (row, column) pair counted in chars.
pub struct Editor {
    lines: Vec<String>,
    row: usize,
    col: usize,
    vertical_scroll: usize,
    horizontal_scroll: usize,
    direction: Direction,
}

impl Default for Editor {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
            vertical_scroll: 0,
            horizontal_scroll: 0,
            direction: Direction::default(),
        }
    }
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    #[cfg(test)]
    fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn set_text(&mut self, text: &str) {
        self.clear();
        self.insert_str(text);
        self.row = 0;
        self.col = 0;
    }

    pub fn clear(&mut self) {
        *self = Self {
            direction: self.direction,
            ..Self::default()
        };
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index();
        self.lines[self.row].insert(at, c);
        self.col += 1;
    }

    /// Insert pasted text; CRLF line endings and terminal color codes are dropped.
    pub fn insert_str(&mut self, text: &str) {
        let mut text = text
            .replace("\r\n", "\n")
            .replace('\r', "\n")
            .replace('\t', TAB);
        if text.contains('\u{1b}') {
            text = strip_ansi_escapes::strip_str(&text);
        }

        for (i, segment) in text.split('\n').enumerate() {
            if i > 0 {
                self.newline();
            }
            segment.chars().for_each(|c| self.insert_char(c));
        }
    }

    pub fn newline(&mut self) {
        let at = self.byte_index();
        let rest = self.lines[self.row].split_off(at);
        self.row += 1;
        self.lines.insert(self.row, rest);
        self.col = 0;
    }

    pub fn backspace(&mut self) {
        if self.col > 0 {
            self.col -= 1;
            let at = self.byte_index();
            self.lines[self.row].remove(at);
        } else if self.row > 0 {
            let line = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.line_len();
            self.lines[self.row].push_str(&line);
        }
    }

    pub fn delete(&mut self) {
        if self.col < self.line_len() {
            let at = self.byte_index();
            self.lines[self.row].remove(at);
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
        }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.line_len();
        }
    }

    pub fn move_right(&mut self) {
        if self.col < self.line_len() {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(self.line_len());
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(self.line_len());
        }
    }

    pub fn move_home(&mut self) {
        self.col = 0;
    }

    pub fn move_end(&mut self) {
        self.col = self.line_len();
    }

    fn line_len(&self) -> usize {
        self.lines[self.row].chars().count()
    }

    fn byte_index(&self) -> usize {
        let line = &self.lines[self.row];
        line.char_indices()
            .nth(self.col)
            .map(|(i, _)| i)
            .unwrap_or(line.len())
    }

    /// Keep the cursor inside a `width` x `height` viewport.
    fn scroll_to_cursor(&mut self, width: usize, height: usize, cursor_x: usize) {
        if self.row < self.vertical_scroll {
            self.vertical_scroll = self.row;
        } else if height > 0 && self.row >= self.vertical_scroll + height {
            self.vertical_scroll = self.row + 1 - height;
        }

        if cursor_x < self.horizontal_scroll {
            self.horizontal_scroll = cursor_x;
        } else if width > 0 && cursor_x >= self.horizontal_scroll + width {
            self.horizontal_scroll = cursor_x + 1 - width;
        }
    }
}

impl Component for Editor {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // AltGr arrives as Ctrl+Alt on Windows and still types characters.
        let altgr = KeyModifiers::CONTROL | KeyModifiers::ALT;
        if !key.modifiers.contains(altgr)
            && key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return Ok(None);
        }

        match key.code {
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Tab => self.insert_str(TAB),
            KeyCode::Enter => self.newline(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => {}
        }

        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Convert => return Ok(Some(Action::SubmitInput(self.text()))),
            Action::Paste(text) => self.insert_str(&text),
            Action::LoadSample => {
                debug!("loading {} sample", self.direction);
                self.set_text(self.direction.sample());
            }
            Action::ClearInput => self.clear(),
            Action::SetDirection(direction) => self.direction = direction,
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let area = panes(area).input;

        let block = Block::new()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ACTIVE_PANE_COLOR))
            .title(format!("Input ({})", self.direction.input_label()));

        let inner = block.inner(area);
        let before_cursor = &self.lines[self.row][..self.byte_index()];
        let cursor_x = Line::from(before_cursor).width();
        self.scroll_to_cursor(inner.width as usize, inner.height as usize, cursor_x);

        let lines: Vec<Line> = self.lines.iter().map(|line| Line::from(line.as_str())).collect();
        let paragraph = Paragraph::new(lines)
            .block(block)
            .scroll((self.vertical_scroll as u16, self.horizontal_scroll as u16));
        frame.render_widget(paragraph, area);

        if inner.width > 0 && inner.height > 0 {
            frame.set_cursor_position((
                inner.x + (cursor_x - self.horizontal_scroll) as u16,
                inner.y + (self.row - self.vertical_scroll) as u16,
            ));
        }

        Ok(())
    }
}
