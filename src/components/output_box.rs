use clipboard::{ClipboardContext, ClipboardProvider};
use color_eyre::{eyre::eyre, Result};
use dynojson::Direction;
use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Style},
    symbols::scrollbar,
    text::Line,
    widgets::{
        Block, BorderType, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
    },
    Frame,
};
use tracing::{info, warn};

use crate::action::Action;

use super::{panes, Component};

const SCROLL_STEP: usize = 10;

/// Read-only pane holding the last successful conversion.
#[derive(Default)]
pub struct OutputBox {
    text: String,
    line_count: usize,
    direction: Direction,
    vertical_scroll: usize,
    vertical_scroll_state: ScrollbarState,
}

impl OutputBox {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: String) {
        self.line_count = text.lines().count();
        self.text = text;
        self.vertical_scroll = 0;
        self.vertical_scroll_state = ScrollbarState::new(self.line_count);
    }

    fn scroll_up(&mut self) {
        self.vertical_scroll = self.vertical_scroll.saturating_sub(SCROLL_STEP);
        self.vertical_scroll_state = self.vertical_scroll_state.position(self.vertical_scroll);
    }

    fn scroll_down(&mut self) {
        self.vertical_scroll = self
            .vertical_scroll
            .saturating_add(SCROLL_STEP)
            .min(self.line_count.saturating_sub(1));
        self.vertical_scroll_state = self.vertical_scroll_state.position(self.vertical_scroll);
    }

    fn copy_to_clipboard(&self) -> Result<()> {
        let mut ctx: ClipboardContext =
            ClipboardProvider::new().map_err(|e| eyre!("cannot access clipboard: {e}"))?;
        ctx.set_contents(self.text.clone())
            .map_err(|e| eyre!("cannot copy to clipboard: {e}"))
    }

    fn copy_action(&self) -> Action {
        if self.text.is_empty() {
            return Action::Error("Nothing to copy yet. Convert a document first.".to_string());
        }

        match self.copy_to_clipboard() {
            Ok(()) => {
                info!("copied {} bytes to clipboard", self.text.len());
                Action::Status("Copied output to clipboard".to_string())
            }
            Err(err) => {
                warn!("{err}");
                Action::Error(err.to_string())
            }
        }
    }
}

impl Component for OutputBox {
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ShowOutput(text) => self.set_text(text),
            Action::SetDirection(direction) => self.direction = direction,
            Action::ScrollOutputUp => self.scroll_up(),
            Action::ScrollOutputDown => self.scroll_down(),
            Action::CopyOutput => return Ok(Some(self.copy_action())),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let area = panes(area).output;

        let block = Block::new()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Gray))
            .title(format!("Output ({})", self.direction.output_label()));

        let lines: Vec<Line> = self.text.lines().map(Line::from).collect();
        let paragraph = Paragraph::new(lines)
            .block(block)
            .scroll((self.vertical_scroll as u16, 0));
        frame.render_widget(paragraph, area);

        self.vertical_scroll_state = self.vertical_scroll_state.content_length(self.line_count);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .symbols(scrollbar::VERTICAL)
                .begin_symbol(None)
                .track_symbol(None)
                .end_symbol(None),
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut self.vertical_scroll_state,
        );

        Ok(())
    }
}
