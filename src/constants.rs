use ratatui::style::{
    palette::tailwind::{EMERALD, INDIGO, RED, SLATE},
    Color, Modifier, Style,
};

pub const ACTIVE_PANE_COLOR: Color = EMERALD.c300;

pub const STATUS_COLOR: Color = INDIGO.c300;

pub const HINT_COLOR: Color = SLATE.c400;

pub const ERROR_STYLE: Style = Style::new().fg(RED.c400).add_modifier(Modifier::BOLD);

/// Ticks a status message stays visible (4 ticks per second).
pub const STATUS_TICKS: u8 = 8;
