use std::time::Duration;

use color_eyre::Result;
use crossterm::{
    event::{
        DisableBracketedPaste, EnableBracketedPaste, Event, EventStream, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers,
    },
    execute,
};
use dynojson::{document, Converter, Direction};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::{
    action::Action,
    components::{
        direction_box::DirectionBox, editor::Editor, output_box::OutputBox,
        status_text::StatusBox, Component,
    },
    config::Config,
};

const TICK_RATE: Duration = Duration::from_millis(250);

pub struct App {
    config: Config,
    converter: Converter,
    direction: Direction,
    components: Vec<Box<dyn Component>>,
    should_quit: bool,
    action_tx: UnboundedSender<Action>,
    action_rx: UnboundedReceiver<Action>,
}

impl App {
    pub fn new(config: Config, direction: Option<Direction>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let direction = direction.unwrap_or(config.direction);

        Self {
            converter: config.converter(),
            config,
            direction,
            components: vec![
                Box::new(DirectionBox::new(direction)),
                Box::new(Editor::new()),
                Box::new(OutputBox::new()),
                Box::new(StatusBox::new()),
            ],
            should_quit: false,
            action_tx,
            action_rx,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::init();
        execute!(std::io::stdout(), EnableBracketedPaste)?;

        let result = self.event_loop(&mut terminal).await;

        execute!(std::io::stdout(), DisableBracketedPaste)?;
        ratatui::restore();

        result
    }

    async fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        info!(direction = %self.direction, "starting interactive converter");
        self.action_tx.send(Action::SetDirection(self.direction))?;

        let mut events = EventStream::new();
        let mut ticker = tokio::time::interval(TICK_RATE);

        loop {
            tokio::select! {
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_event(event)?,
                    Some(Err(err)) => return Err(err.into()),
                    None => break,
                },
                _ = ticker.tick() => self.action_tx.send(Action::Tick)?,
            }

            self.handle_actions()?;
            if self.should_quit {
                break;
            }
            self.render(terminal)?;
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key_event(key)?,
            Event::Paste(text) => self.action_tx.send(Action::Paste(text))?,
            _ => {}
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if let Some(action) = global_action(key) {
            self.action_tx.send(action)?;
            return Ok(());
        }

        for component in self.components.iter_mut() {
            if let Some(action) = component.handle_key_event(key)? {
                self.action_tx.send(action)?;
            }
        }
        Ok(())
    }

    fn handle_actions(&mut self) -> Result<()> {
        while let Ok(action) = self.action_rx.try_recv() {
            if action != Action::Tick {
                debug!("{action:?}");
            }

            match &action {
                Action::Quit => self.should_quit = true,
                Action::ToggleDirection => {
                    self.direction = self.direction.flip();
                    self.action_tx.send(Action::SetDirection(self.direction))?;
                }
                Action::SubmitInput(input) => self.convert(input)?,
                _ => {}
            }

            for component in self.components.iter_mut() {
                if let Some(action) = component.update(action.clone())? {
                    self.action_tx.send(action)?;
                }
            }
        }
        Ok(())
    }

    fn convert(&self, input: &str) -> Result<()> {
        match document::convert_text(input, self.direction, &self.converter) {
            Ok(value) => {
                let rendered = document::render(&value, self.config.indent)?;
                info!(direction = %self.direction, bytes = rendered.len(), "converted document");
                self.action_tx.send(Action::ShowOutput(rendered))?;
                self.action_tx.send(Action::Status(format!(
                    "Converted to {}",
                    self.direction.output_label()
                )))?;
            }
            Err(err) => {
                warn!(direction = %self.direction, "{err}");
                self.action_tx
                    .send(Action::Error(format!("{err}. {}", err.hint())))?;
            }
        }
        Ok(())
    }

    fn render(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let mut result = Ok(());
        terminal.draw(|frame| {
            let area = frame.area();
            for component in self.components.iter_mut() {
                if let Err(err) = component.draw(frame, area) {
                    result = Err(err);
                }
            }
        })?;
        result
    }
}

/// Shortcuts handled by the app before any component sees the key.
pub fn global_action(key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    let action = match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => Action::Quit,
        KeyCode::Enter if ctrl => Action::Convert,
        KeyCode::Char('s') if ctrl => Action::Convert,
        KeyCode::F(5) => Action::Convert,
        KeyCode::Char('t') if ctrl => Action::ToggleDirection,
        KeyCode::F(2) => Action::ToggleDirection,
        KeyCode::Char('y') if ctrl => Action::CopyOutput,
        KeyCode::F(3) => Action::CopyOutput,
        KeyCode::Char('l') if ctrl => Action::LoadSample,
        KeyCode::F(4) => Action::LoadSample,
        KeyCode::Char('k') if ctrl => Action::ClearInput,
        KeyCode::PageUp => Action::ScrollOutputUp,
        KeyCode::PageDown => Action::ScrollOutputDown,
        _ => return None,
    };

    Some(action)
}
