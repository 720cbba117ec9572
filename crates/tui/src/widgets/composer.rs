//! Input line with slash command autocomplete.
//!
//! Plain text is submitted as a request. Lines starting with `/` are
//! session commands; while one is being typed a popup lists the matching
//! commands and Tab completes the highlighted one.

use crate::event::EventStatus;
use crate::session_view::SessionView;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ng_protocol::{Mode, Op};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Available slash commands with their descriptions.
pub const COMMANDS: &[(&str, &str)] = &[
    ("/run", "Execute the last generated script"),
    ("/mode [manual|agent]", "Switch between script and agent mode"),
    ("/clear", "Clear the conversation"),
    ("/sync", "Reload the session from the core"),
    ("/quit", "Exit NetGenius"),
];

#[derive(Debug, Clone, Default)]
pub struct Composer {
    input: String,
    /// Cursor position in characters, not bytes.
    cursor_pos: usize,
    show_popup: bool,
    selected_index: usize,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn should_show_popup(&self) -> bool {
        self.show_popup
    }

    /// Commands whose name starts with the typed prefix.
    pub fn suggestions(&self) -> Vec<(&'static str, &'static str)> {
        if !self.input.starts_with('/') {
            return Vec::new();
        }

        let filter = self.input.trim();
        COMMANDS
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(filter))
            .copied()
            .collect()
    }

    pub fn selected_suggestion(&self) -> Option<(&'static str, &'static str)> {
        self.suggestions().get(self.selected_index).copied()
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_offset();
        self.input.insert(at, c);
        self.cursor_pos += 1;
        self.update_popup_state();
    }

    /// Insert pasted text at the cursor. Newlines become spaces.
    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars() {
            let c = if c == '\n' || c == '\r' { ' ' } else { c };
            let at = self.byte_offset();
            self.input.insert(at, c);
            self.cursor_pos += 1;
        }
        self.update_popup_state();
    }

    pub fn delete_char(&mut self) {
        if self.cursor_pos == 0 {
            return;
        }
        self.cursor_pos -= 1;
        let at = self.byte_offset();
        self.input.remove(at);
        self.update_popup_state();
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor_pos = 0;
        self.show_popup = false;
        self.selected_index = 0;
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_pos = self.cursor_pos.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_pos < self.input.chars().count() {
            self.cursor_pos += 1;
        }
    }

    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.suggestions().len() {
            self.selected_index += 1;
        }
    }

    /// Replace the input with the highlighted command name.
    pub fn complete_with_selection(&mut self) {
        if let Some((cmd, _)) = self.selected_suggestion() {
            let cmd_name = cmd.split_whitespace().next().unwrap_or(cmd);
            self.input = format!("{cmd_name} ");
            self.cursor_pos = self.input.chars().count();
            self.show_popup = false;
            self.selected_index = 0;
        }
    }

    /// Editing keys. Enter is left to the caller.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> EventStatus {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return EventStatus::NotConsumed;
        }

        match key.code {
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Backspace => self.delete_char(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Up if self.show_popup => self.move_selection_up(),
            KeyCode::Down if self.show_popup => self.move_selection_down(),
            KeyCode::Tab if self.show_popup => self.complete_with_selection(),
            KeyCode::Esc if self.show_popup => self.show_popup = false,
            _ => return EventStatus::NotConsumed,
        }
        EventStatus::Consumed
    }

    fn byte_offset(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor_pos)
            .map_or(self.input.len(), |(i, _)| i)
    }

    fn update_popup_state(&mut self) {
        self.show_popup = self.input.starts_with('/') && !self.input.contains(' ');

        let suggestions = self.suggestions();
        if self.selected_index >= suggestions.len() {
            self.selected_index = suggestions.len().saturating_sub(1);
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, busy: bool) {
        let title = if busy {
            "Request (working...)"
        } else {
            "Request (Enter to send, Tab to switch mode, Ctrl-C to quit)"
        };
        let block = Block::default().borders(Borders::ALL).title(title);

        let inner = block.inner(area);
        block.render(area, buf);

        let style = if busy {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Yellow)
        };
        Paragraph::new(format!("> {}", self.input))
            .style(style)
            .render(inner, buf);
    }

    pub fn render_popup(&self, area: Rect, buf: &mut Buffer) {
        if !self.show_popup {
            return;
        }

        let suggestions = self.suggestions();
        if suggestions.is_empty() {
            return;
        }

        Clear.render(area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Commands")
            .style(Style::default().bg(Color::Black));

        let inner = block.inner(area);
        block.render(area, buf);

        for (i, (cmd, desc)) in suggestions.iter().enumerate() {
            let y = inner.y + i as u16;
            if y >= inner.y + inner.height {
                break;
            }

            let style = if i == self.selected_index {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let line = Line::from(vec![
                Span::styled(format!("{cmd:<22}"), style),
                Span::styled(desc.to_string(), style.fg(Color::Gray)),
            ]);
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }

    /// Turn the current input into an operation for the core.
    ///
    /// Returns `Ok(None)` for blank input and `Err` with a user-facing
    /// message for unknown or unusable commands.
    pub fn parse_command(&self, view: &SessionView) -> Result<Option<Op>, String> {
        let input = self.input.trim();

        if input.is_empty() {
            return Ok(None);
        }

        if !input.starts_with('/') {
            return Ok(Some(Op::Submit {
                text: input.to_string(),
            }));
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts.first().copied().unwrap_or(input);

        match cmd {
            "/run" => {
                let code = view.last_script().ok_or("No script to run yet")?;
                Ok(Some(Op::ExecuteCode {
                    code: code.to_string(),
                }))
            }
            "/mode" => {
                let mode = match parts.get(1).copied() {
                    None => view.mode.toggled(),
                    Some("manual" | "script") => Mode::Manual,
                    Some("agent" | "autonomous") => Mode::Autonomous,
                    Some(other) => return Err(format!("Unknown mode: {other}")),
                };
                Ok(Some(Op::SetMode { mode }))
            }
            "/clear" => Ok(Some(Op::ClearHistory)),
            "/sync" => Ok(Some(Op::GetSnapshot)),
            "/quit" => Ok(Some(Op::Shutdown)),
            _ => Err(format!("Unknown command: {cmd}")),
        }
    }
}
