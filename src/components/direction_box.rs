use color_eyre::Result;
use dynojson::Direction;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::{
    action::Action,
    constants::{ACTIVE_PANE_COLOR, HINT_COLOR},
};

use super::{panes, Component};

const KEY_HINTS: &str =
    "^S convert  ^T direction  ^Y copy  ^L sample  ^K clear  PgUp/PgDn scroll  Esc quit";

/// Header showing which way documents are converted.
#[derive(Default)]
pub struct DirectionBox {
    direction: Direction,
}

impl DirectionBox {
    pub fn new(direction: Direction) -> Self {
        Self { direction }
    }

    fn summary(&self) -> String {
        format!(
            "{} -> {}",
            self.direction.input_label(),
            self.direction.output_label()
        )
    }
}

impl Component for DirectionBox {
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if let Action::SetDirection(direction) = action {
            self.direction = direction;
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let area = panes(area).header;

        let block = Block::new()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ACTIVE_PANE_COLOR))
            .title("Direction");

        let line = Line::from(vec![
            Span::styled(
                self.summary(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled(KEY_HINTS, Style::default().fg(HINT_COLOR)),
        ]);

        frame.render_widget(
            Paragraph::new(line).alignment(Alignment::Center).block(block),
            area,
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_follows_direction() {
        let mut header = DirectionBox::new(Direction::ToPlain);
        assert_eq!(header.summary(), "DynamoDB JSON -> Plain JSON");

        header
            .update(Action::SetDirection(Direction::ToDynamo))
            .unwrap();
        assert_eq!(header.summary(), "Plain JSON -> DynamoDB JSON");
    }
}
