use anyhow::Result;
use ratatui::layout::{Constraint, Direction, Layout};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::action::Action;
use crate::components::diff_view::DiffView;
use crate::components::status_bar::StatusBar;
use crate::config::{self, PersistentSettings};
use crate::event::{map_key_to_action, map_mouse_to_action, Event, EventReader};
use crate::state::{CommittedSelection, DiffViewMode};
use crate::theme::{next_theme, Theme};
use crate::tui::Tui;
use crate::viewer::DiffViewer;

pub struct App {
    viewer: DiffViewer,
    diff_view: DiffView,
    theme: Theme,
    status_message: Option<(String, bool)>,
    status_clear_countdown: u32,
    should_quit: bool,
    persist_settings: bool,
    /// Actions raised by the viewer's listeners, applied after each batch.
    listener_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(mut viewer: DiffViewer, theme: Theme, persist_settings: bool) -> Self {
        let (tx, listener_rx) = mpsc::unbounded_channel();

        let mode_tx = tx.clone();
        viewer.on_mode_change(Box::new(move |mode| {
            let _ = mode_tx.send(Action::ViewModeChanged(mode));
        }));
        let selection_tx = tx;
        viewer.on_selection(Box::new(move |selection| {
            let _ = selection_tx.send(Action::SelectionCommitted(selection.clone()));
        }));

        Self {
            viewer,
            diff_view: DiffView::new(),
            theme,
            status_message: None,
            status_clear_countdown: 0,
            should_quit: false,
            persist_settings,
            listener_rx,
        }
    }

    pub async fn run(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut events = EventReader::new(Duration::from_millis(50));

        loop {
            self.draw(terminal)?;

            // Wait for at least one event, then drain all pending events
            // to avoid input lag from buffered scroll/key events.
            let first = events.next().await;
            let mut pending = Vec::new();
            if let Some(ev) = first {
                pending.push(ev);
            } else {
                break;
            }
            while let Some(ev) = events.try_next() {
                pending.push(ev);
            }

            self.handle_events(pending);

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw(&mut self, terminal: &mut Tui) -> Result<()> {
        let Self {
            viewer,
            diff_view,
            theme,
            status_message,
            ..
        } = self;

        terminal.draw(|frame| {
            let outer = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(3), Constraint::Length(1)])
                .split(frame.area());

            diff_view.render(frame, outer[0], viewer, theme);

            let bar = StatusBar {
                mode: viewer.view_mode(),
                stats: diff_view.stats(),
                message: status_message
                    .as_ref()
                    .map(|(msg, is_error)| (msg.as_str(), *is_error)),
                dragging: viewer.is_dragging(),
                theme,
            };
            frame.render_widget(bar, outer[1]);
        })?;
        Ok(())
    }

    /// Apply one batch of terminal events in order. Each run of consecutive
    /// scrolls is collapsed into one net movement.
    fn handle_events(&mut self, pending: Vec<Event>) {
        let mut scroll_delta: isize = 0;

        for event in pending {
            let action = match event {
                Event::Key(key) => map_key_to_action(key),
                Event::Mouse(mouse) => map_mouse_to_action(mouse),
                Event::Resize => Some(Action::Resize),
                Event::Tick => Some(Action::Tick),
            };
            match action {
                Some(Action::ScrollUp) => scroll_delta -= 1,
                Some(Action::ScrollDown) => scroll_delta += 1,
                // Ticks don't depend on position, so they don't end a run.
                Some(Action::Tick) => self.update(Action::Tick),
                Some(other) => {
                    self.flush_scroll(&mut scroll_delta);
                    self.update(other);
                }
                None => {}
            }
        }
        self.flush_scroll(&mut scroll_delta);

        // Listener notifications raised while applying the batch
        while let Ok(action) = self.listener_rx.try_recv() {
            self.update(action);
        }
    }

    fn flush_scroll(&mut self, delta: &mut isize) {
        if *delta != 0 {
            self.viewer.scroll_rows(*delta);
            *delta = 0;
        }
    }

    fn update(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Tick => {
                if self.status_clear_countdown > 0 {
                    self.status_clear_countdown -= 1;
                    if self.status_clear_countdown == 0 {
                        self.status_message = None;
                    }
                }
            }

            Action::ScrollUp => {
                self.viewer.scroll_rows(-1);
            }
            Action::ScrollDown => {
                self.viewer.scroll_rows(1);
            }
            Action::ScrollPageUp => {
                self.viewer.scroll_pages(-1);
            }
            Action::ScrollPageDown => {
                self.viewer.scroll_pages(1);
            }
            Action::ScrollToTop => {
                self.viewer.scroll_to_top();
            }
            Action::ScrollToBottom => {
                self.viewer.scroll_to_bottom();
            }

            Action::ToggleViewMode => self.viewer.toggle_mode(),
            Action::CycleTheme => {
                self.theme = Theme::from_name(next_theme(&self.theme.name));
                self.set_status(format!("Theme: {}", self.theme.name), false);
                self.save_settings();
            }

            Action::PointerDown { column, row } => {
                self.viewer.pointer_down(column, row);
            }
            Action::PointerDrag { column, row } => self.viewer.pointer_drag(column, row),
            Action::PointerUp => {
                // The selection listener reports the commit.
                self.viewer.pointer_up();
            }

            Action::ViewModeChanged(mode) => {
                log::info!("view mode changed to {}", mode.label());
                self.save_settings();
            }
            Action::SelectionCommitted(selection) => self.copy_selection(&selection),

            Action::Resize => self.viewer.invalidate_viewport(),
        }
    }

    fn copy_selection(&mut self, selection: &CommittedSelection) {
        let count = selection.lines.len();
        let label = format!(
            "{} {}-{}",
            selection.side.label(),
            selection.start_line,
            selection.end_line
        );
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(selection.text())) {
            Ok(()) => {
                let noun = if count == 1 { "line" } else { "lines" };
                self.set_status(format!("Copied {count} {noun} ({label})"), false);
            }
            Err(e) => {
                log::warn!("clipboard unavailable: {e}");
                self.set_status(format!("Clipboard error: {e}"), true);
            }
        }
    }

    fn save_settings(&self) {
        if !self.persist_settings {
            return;
        }
        config::save_settings(&PersistentSettings {
            theme: self.theme.name.clone(),
            unified: self.viewer.view_mode() == DiffViewMode::Unified,
        });
    }

    fn set_status(&mut self, msg: String, is_error: bool) {
        self.status_message = Some((msg, is_error));
        // ~3 seconds at 50ms tick rate
        self.status_clear_countdown = 60;
    }
}
