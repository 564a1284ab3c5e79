//! Application state management

use crossterm::event::{KeyCode, KeyModifiers};
use pomotimer_core::models::{DisplayState, Mode, Settings, SettingsField};
use pomotimer_engine::{Command, EngineEventType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    Timer,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    EditSetting(SettingsField),
}

pub struct App {
    pub current_view: AppView,
    pub show_help: bool,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub selected_setting_index: usize,

    // Mirrors of engine state, refreshed from engine events
    pub display: DisplayState,
    pub settings: Settings,

    pub status_message: String,
    pub should_quit: bool,
}

impl App {
    pub fn new(display: DisplayState, settings: Settings) -> Self {
        Self {
            current_view: AppView::Timer,
            show_help: false,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            selected_setting_index: 0,
            display,
            settings,
            status_message: String::new(),
            should_quit: false,
        }
    }

    pub fn selected_field(&self) -> SettingsField {
        SettingsField::ALL[self.selected_setting_index.min(SettingsField::ALL.len() - 1)]
    }

    /// Map a key press to an engine command, updating local UI state on the way.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
        if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }

        if let InputMode::EditSetting(field) = self.input_mode {
            return self.handle_input_key(field, code);
        }

        if self.show_help {
            self.show_help = false;
            return None;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                None
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.current_view = match self.current_view {
                    AppView::Timer => AppView::Settings,
                    AppView::Settings => AppView::Timer,
                };
                None
            }
            KeyCode::Char(' ') => Some(Command::Toggle),
            KeyCode::Char('r') => Some(Command::Reset),
            KeyCode::Char('s') => Some(Command::Skip),
            KeyCode::Char('1') => Some(Command::SwitchMode(Mode::Work)),
            KeyCode::Char('2') => Some(Command::SwitchMode(Mode::ShortBreak)),
            KeyCode::Char('3') => Some(Command::SwitchMode(Mode::LongBreak)),
            _ if self.current_view == AppView::Settings => self.handle_settings_key(code),
            _ => None,
        }
    }

    fn handle_settings_key(&mut self, code: KeyCode) -> Option<Command> {
        let count = SettingsField::ALL.len();
        match code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected_setting_index = (self.selected_setting_index + 1) % count;
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_setting_index = (self.selected_setting_index + count - 1) % count;
                None
            }
            KeyCode::Left | KeyCode::Char('h') => self.adjust_selected(-1),
            KeyCode::Right | KeyCode::Char('l') => self.adjust_selected(1),
            KeyCode::Enter => {
                let field = self.selected_field();
                if field.is_duration() {
                    self.input_buffer.clear();
                    self.input_mode = InputMode::EditSetting(field);
                    self.status_message = format!("{} (minutes):", field.label());
                    None
                } else {
                    self.adjust_selected(1)
                }
            }
            _ => None,
        }
    }

    fn handle_input_key(&mut self, field: SettingsField, code: KeyCode) -> Option<Command> {
        match code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
                self.status_message.clear();
                None
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
                None
            }
            KeyCode::Char(c) => {
                self.input_buffer.push(c);
                None
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                let raw = std::mem::take(&mut self.input_buffer);

                let mut next = self.settings;
                match next.set_field(field, &raw) {
                    Ok(()) => {
                        self.status_message.clear();
                        self.settings = next;
                        Some(Command::ApplySettings(next))
                    }
                    Err(e) => {
                        tracing::debug!("Rejected settings input: {}", e);
                        self.status_message = e.to_string();
                        None
                    }
                }
            }
            _ => None,
        }
    }

    fn adjust_selected(&mut self, delta: i64) -> Option<Command> {
        let mut next = self.settings;
        next.adjust(self.selected_field(), delta);
        if next == self.settings {
            return None;
        }
        self.settings = next;
        Some(Command::ApplySettings(next))
    }

    /// Fold an engine event into the mirrored state.
    pub fn apply_event(&mut self, event: EngineEventType) {
        match event {
            EngineEventType::Render { display } => self.display = display,
            EngineEventType::SettingsApplied { settings } => {
                self.settings = settings;
                self.status_message = "Settings saved".to_string();
            }
            EngineEventType::Started { mode } => {
                self.status_message = format!("{} started", mode.label());
            }
            EngineEventType::Paused { .. } => {
                self.status_message = "Timer paused".to_string();
            }
            EngineEventType::Reset { .. } => {
                self.status_message = "Timer reset".to_string();
            }
            EngineEventType::SessionCompleted {
                mode,
                next_mode,
                skipped,
            } => {
                let verb = if skipped { "skipped" } else { "completed" };
                self.status_message = format!(
                    "🍅 {} {}! Up next: {}",
                    mode.label(),
                    verb,
                    next_mode.label()
                );
            }
            EngineEventType::ModeChanged { .. }
            | EngineEventType::Tick { .. }
            | EngineEventType::PlaySound
            | EngineEventType::Notify { .. } => {}
        }
    }
}
