//! TUI application state and event loop.
//!
//! This module defines the main `App` struct that manages the TUI state
//! and the event loop using `tokio::select!`.

use anyhow::Result;
use crossterm::event::KeyEvent;
use ng_protocol::{Event, Op, SessionSnapshot};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};
use std::time::Duration;
use tokio::select;
use tokio::sync::mpsc::{Receiver, UnboundedSender};
use tokio_stream::StreamExt;

use crate::event_handler;
use crate::session_view::SessionView;
use crate::tui::{Tui, TuiEvent};
use crate::widgets::status_bar::render_status_bar;
use crate::widgets::{Composer, TranscriptView};

const SPINNER_INTERVAL: Duration = Duration::from_millis(120);

/// Main TUI application state.
pub struct App {
    /// Local copy of the session, kept current by core events.
    pub view: SessionView,
    pub composer: Composer,
    pub transcript_view: TranscriptView,
    /// Channel to send operations to the core.
    pub op_tx: UnboundedSender<Op>,
    /// Channel to receive events from the core.
    pub event_rx: Receiver<Event>,
    pub should_exit: bool,
    /// Spinner frame counter, advanced on every draw while busy.
    tick: usize,
}

impl App {
    pub fn new(
        op_tx: UnboundedSender<Op>,
        event_rx: Receiver<Event>,
        snapshot: SessionSnapshot,
    ) -> Self {
        Self {
            view: SessionView::from_snapshot(snapshot),
            composer: Composer::new(),
            transcript_view: TranscriptView::new(),
            op_tx,
            event_rx,
            should_exit: false,
            tick: 0,
        }
    }

    /// Main event loop.
    ///
    /// Uses `tokio::select!` to handle keyboard input and core events concurrently.
    pub async fn run(&mut self, tui: &mut Tui) -> Result<()> {
        let mut tui_events = tui.event_stream();

        tui.frame_requester().schedule_frame();

        while !self.should_exit {
            select! {
                Some(event) = self.event_rx.recv() => {
                    self.handle_core_event(event);
                    tui.frame_requester().schedule_frame();
                }
                Some(tui_event) = tui_events.next() => {
                    self.handle_tui_event(tui, tui_event)?;
                }
                else => break,
            }
        }

        Ok(())
    }

    pub fn handle_core_event(&mut self, event: Event) {
        event_handler::handle_core_event(&mut self.view, event);
    }

    fn handle_tui_event(&mut self, tui: &mut Tui, event: TuiEvent) -> Result<()> {
        match event {
            TuiEvent::Key(key_event) => {
                self.handle_key_event(key_event);
                tui.frame_requester().schedule_frame();
            }
            TuiEvent::Paste(text) => {
                self.composer.insert_str(&text);
                tui.frame_requester().schedule_frame();
            }
            TuiEvent::Draw => {
                tui.draw(|frame| self.render(frame))?;
                if self.view.busy.is_busy() {
                    self.tick = self.tick.wrapping_add(1);
                    tui.frame_requester().schedule_frame_in(SPINNER_INTERVAL);
                }
            }
        }
        Ok(())
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        self.should_exit = event_handler::handle_keyboard_event(
            key_event,
            &mut self.composer,
            &mut self.transcript_view,
            &mut self.view,
            &self.op_tx,
        );
    }

    /// Render the TUI.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Header, transcript, input
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(3),
            ])
            .split(area);

        render_status_bar(frame, chunks[0], &self.view, self.tick);
        self.transcript_view.render(
            frame,
            chunks[1],
            self.view.mode.title(),
            &self.view.transcript,
        );
        self.composer
            .render(chunks[2], frame.buffer_mut(), self.view.busy.is_busy());

        let popup = popup_area(chunks[1], self.composer.suggestions().len());
        self.composer.render_popup(popup, frame.buffer_mut());
    }
}

/// Popup anchored to the bottom of the transcript panel, just above the input.
fn popup_area(above: Rect, rows: usize) -> Rect {
    let height = (rows as u16 + 2).min(above.height);
    Rect {
        x: above.x + 1,
        y: above.y + above.height - height,
        width: above.width.saturating_sub(2).min(64),
        height,
    }
}
