use color_eyre::Result;
use ratatui::{
    crossterm::event::KeyEvent,
    layout::{Constraint, Layout, Rect},
    Frame,
};

use crate::action::Action;

pub mod direction_box;
pub mod editor;
pub mod output_box;
pub mod status_text;

pub trait Component {
    /// Handle a key press that the app did not claim as a global shortcut.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    /// React to an action, optionally producing a follow-up action.
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    /// Render into the component's part of `area` (the whole frame).
    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}

/// Screen regions shared by every component.
pub struct Panes {
    pub header: Rect,
    pub input: Rect,
    pub output: Rect,
    pub footer: Rect,
}

pub fn panes(area: Rect) -> Panes {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    let [input, output] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(body);

    Panes {
        header,
        input,
        output,
        footer,
    }
}
