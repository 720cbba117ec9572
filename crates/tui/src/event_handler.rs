//! Event handling utilities for the TUI.
//!
//! - Core events are folded into the local [`SessionView`]
//! - Keyboard events go to the composer first, then to the global bindings
//! - Enter turns the composer input into an `Op` for the core

use crate::session_view::SessionView;
use crate::widgets::{Composer, TranscriptView};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ng_protocol::{Event, Op};
use tokio::sync::mpsc::UnboundedSender;

/// Handle an event received from the core.
pub fn handle_core_event(view: &mut SessionView, event: Event) {
    tracing::trace!(?event, "core event");
    view.apply(event);
}

/// Handle a keyboard event from the user.
///
/// Returns `true` if the application should exit, `false` otherwise.
pub fn handle_keyboard_event(
    key_event: KeyEvent,
    composer: &mut Composer,
    transcript_view: &mut TranscriptView,
    view: &mut SessionView,
    op_tx: &UnboundedSender<Op>,
) -> bool {
    if key_event.kind != KeyEventKind::Press {
        return false;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return true;
    }

    if composer.handle_key_event(key_event).is_consumed() {
        return false;
    }

    match key_event.code {
        KeyCode::Enter => return submit_command(composer, view, op_tx),
        KeyCode::Tab => {
            let _ = op_tx.send(Op::SetMode {
                mode: view.mode.toggled(),
            });
        }
        KeyCode::Esc if composer.input().is_empty() => return true,
        KeyCode::Esc => composer.clear(),
        KeyCode::Up => transcript_view.scroll_up(),
        KeyCode::Down => transcript_view.scroll_down(),
        KeyCode::PageUp => transcript_view.page_up(),
        KeyCode::PageDown => transcript_view.page_down(),
        KeyCode::Home => transcript_view.scroll_to_top(),
        KeyCode::End => transcript_view.scroll_to_bottom(),
        _ => {}
    }

    false
}

/// Send the composer input to the core.
///
/// Returns `true` when the input was `/quit`.
fn submit_command(
    composer: &mut Composer,
    view: &mut SessionView,
    op_tx: &UnboundedSender<Op>,
) -> bool {
    let op = match composer.parse_command(view) {
        Ok(Some(op)) => op,
        Ok(None) => return false,
        Err(message) => {
            view.notice = Some(message);
            return false;
        }
    };

    // Keep the text so it can be sent once the current run finishes
    if view.busy.is_busy() && matches!(op, Op::Submit { .. } | Op::ExecuteCode { .. }) {
        view.notice = Some("Still working on the previous request.".to_string());
        return false;
    }

    let quit = matches!(op, Op::Shutdown);
    let _ = op_tx.send(op);
    composer.clear();
    quit
}
