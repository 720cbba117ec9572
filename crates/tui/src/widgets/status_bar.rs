//! One-line session header: mode, pipeline phase and busy indicator.

use crate::session_view::SessionView;
use ng_protocol::{BusyState, Mode, Phase};
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Render the header. `tick` advances the spinner while busy.
pub fn render_status_bar(frame: &mut Frame, area: Rect, view: &SessionView, tick: usize) {
    let mut spans = vec![
        Span::styled(
            " NetGenius ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            view.mode.title(),
            Style::default().fg(mode_color(view.mode)).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(format!("{:?}", view.phase).to_uppercase(), phase_style(view.phase)),
    ];

    if let Some(label) = busy_label(view.busy) {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("{} {}", SPINNER[tick % SPINNER.len()], label),
            Style::default().fg(Color::Yellow),
        ));
    }

    if let Some(notice) = &view.notice {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(notice.clone(), Style::default().fg(Color::Gray)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Executing wins over thinking when both are reported.
pub fn busy_label(busy: BusyState) -> Option<&'static str> {
    if busy.is_executing {
        Some("Executing")
    } else if busy.is_thinking {
        Some("Thinking")
    } else {
        None
    }
}

fn mode_color(mode: Mode) -> Color {
    match mode {
        Mode::Manual => Color::Green,
        Mode::Autonomous => Color::Magenta,
    }
}

fn phase_style(phase: Phase) -> Style {
    let color = match phase {
        Phase::Idle => Color::DarkGray,
        Phase::Done => Color::Green,
        Phase::Failed => Color::Red,
        _ => Color::Yellow,
    };
    Style::default().fg(color)
}
