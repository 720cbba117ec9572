//! Scrollable transcript of the chat session.
//!
//! Each message renders as a header line (time and who/what produced it)
//! followed by its body, wrapped to the panel width. The view follows the
//! tail of the transcript until the user scrolls up.

use ng_protocol::{Message, MessageKind, MessageRole, Transcript};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use std::cell::Cell;

pub struct TranscriptView {
    scroll_offset: usize,
    follow: bool,
    /// Largest valid offset as of the last render.
    max_offset: Cell<usize>,
    /// Body height as of the last render, used for paging.
    page_size: Cell<usize>,
}

impl TranscriptView {
    pub fn new() -> Self {
        Self {
            scroll_offset: 0,
            follow: true,
            max_offset: Cell::new(0),
            page_size: Cell::new(10),
        }
    }

    pub fn is_following(&self) -> bool {
        self.follow
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, title: &str, transcript: &Transcript) {
        let block = Block::default().borders(Borders::ALL).title(title.to_string());

        let width = area.width.saturating_sub(2) as usize;
        let visible = area.height.saturating_sub(2) as usize;
        let lines = transcript_lines(transcript, width);

        let max = lines.len().saturating_sub(visible);
        self.max_offset.set(max);
        self.page_size.set(visible.max(1));
        let offset = if self.follow {
            max
        } else {
            self.scroll_offset.min(max)
        };

        let total_lines = lines.len();
        let paragraph = Paragraph::new(lines)
            .block(block)
            .scroll((offset.min(u16::MAX as usize) as u16, 0));
        frame.render_widget(paragraph, area);

        if total_lines > visible {
            let mut scrollbar_state = ScrollbarState::default()
                .content_length(max + 1)
                .viewport_content_length(visible)
                .position(offset);

            let scrollbar = Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));

            frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
        }
    }

    pub fn scroll_up(&mut self) {
        self.detach();
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = (self.scroll_offset + 1).min(self.max_offset.get());
        self.reattach_at_bottom();
    }

    pub fn page_up(&mut self) {
        self.detach();
        self.scroll_offset = self.scroll_offset.saturating_sub(self.page_size.get());
    }

    pub fn page_down(&mut self) {
        self.scroll_offset = (self.scroll_offset + self.page_size.get()).min(self.max_offset.get());
        self.reattach_at_bottom();
    }

    pub fn scroll_to_top(&mut self) {
        self.detach();
        self.scroll_offset = 0;
    }

    /// Jump to the newest message and keep following new ones.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.max_offset.get();
        self.follow = true;
    }

    fn detach(&mut self) {
        if self.follow {
            self.follow = false;
            self.scroll_offset = self.max_offset.get();
        }
    }

    fn reattach_at_bottom(&mut self) {
        if self.scroll_offset >= self.max_offset.get() {
            self.follow = true;
        }
    }
}

impl Default for TranscriptView {
    fn default() -> Self {
        Self::new()
    }
}

/// Render every message to display lines, wrapped to `width` columns.
pub fn transcript_lines(transcript: &Transcript, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, message) in transcript.messages().iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.push(header_line(message));

        let style = body_style(&message.kind, message.role);
        for raw in message.content.lines() {
            for chunk in wrap(raw, width) {
                lines.push(Line::from(Span::styled(chunk, style)));
            }
        }
    }
    lines
}

fn header_line(message: &Message) -> Line<'static> {
    let (label, color) = match (message.role, &message.kind) {
        (MessageRole::User, _) => ("You".to_string(), Color::Yellow),
        (MessageRole::System, _) => ("System".to_string(), Color::DarkGray),
        (_, MessageKind::Code { language }) => (format!("Script ({language})"), Color::Green),
        (_, MessageKind::ReasoningTrace) => ("Reasoning".to_string(), Color::Cyan),
        (_, MessageKind::ExecutionOutput) => ("Output".to_string(), Color::Magenta),
        (_, MessageKind::AgentResponse) => ("Agent".to_string(), Color::LightBlue),
        (_, MessageKind::PlainText) => ("NetGenius".to_string(), Color::LightBlue),
    };

    Line::from(vec![
        Span::styled(
            message.created_at.format("%H:%M:%S ").to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])
}

fn body_style(kind: &MessageKind, role: MessageRole) -> Style {
    match (role, kind) {
        (MessageRole::System, MessageKind::ExecutionOutput) => Style::default().fg(Color::Gray),
        (MessageRole::System, _) => Style::default().fg(Color::DarkGray),
        (_, MessageKind::Code { .. }) => Style::default().fg(Color::Green),
        (_, MessageKind::ExecutionOutput) => Style::default().fg(Color::Gray),
        (_, MessageKind::ReasoningTrace) => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::ITALIC),
        _ => Style::default(),
    }
}

/// Hard-wrap on character boundaries. An empty line stays one empty line.
fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
