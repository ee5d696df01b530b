use color_eyre::Result;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Padding, Paragraph},
    Frame,
};

use crate::{
    action::Action,
    constants::{ERROR_STYLE, STATUS_COLOR, STATUS_TICKS},
};

use super::{panes, Component};

/// Footer line: a sticky error banner, or a status message that fades after a few ticks.
#[derive(Default)]
pub struct StatusBox {
    status_text: String,
    ticks_left: u8,
    error: Option<String>,
}

impl StatusBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status_text(&mut self, new_status: &str) {
        self.status_text = new_status.to_string();
        self.ticks_left = STATUS_TICKS;
    }

    fn on_tick(&mut self) {
        if self.ticks_left > 0 {
            self.ticks_left -= 1;
            if self.ticks_left == 0 {
                self.status_text.clear();
            }
        }
    }
}

impl Component for StatusBox {
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => self.on_tick(),
            Action::Status(text) => {
                self.error = None;
                self.set_status_text(&text);
            }
            Action::Error(message) => self.error = Some(message),
            // a new attempt hides the previous error
            Action::SubmitInput(_) | Action::ClearInput => self.error = None,
            _ => {}
        };

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let area = panes(area).footer;

        let paragraph = match &self.error {
            Some(message) => Paragraph::new(format!("Error: {message}")).style(ERROR_STYLE),
            None => Paragraph::new(self.status_text.clone())
                .style(Style::new().fg(STATUS_COLOR)),
        };

        frame.render_widget(
            paragraph.block(Block::default().padding(Padding::horizontal(2))),
            area,
        );

        Ok(())
    }
}
