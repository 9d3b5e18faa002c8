use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use crate::app::App;
use crate::config;
use crate::session::Placement;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    pending_zz: bool,
    /// Digits typed before `P`.
    pub count: Option<usize>,
    last_tick: Instant,
}

impl Default for EventLoopState {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoopState {
    pub fn new() -> Self {
        Self {
            pending_gg: false,
            pending_zz: false,
            count: None,
            last_tick: Instant::now(),
        }
    }

    fn clear_prefixes(&mut self) {
        self.pending_gg = false;
        self.pending_zz = false;
        self.count = None;
    }
}

/// Main terminal event loop: handles input, the playback clock and drawing.
/// Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let now = Instant::now();
        app.tick(now - state.last_tick, settings.playback.auto_advance);
        state.last_tick = now;

        terminal.draw(|f| ui::draw(f, app, &settings.ui))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply one key press to `app`. Returns true when the user asked to quit.
fn handle_key_event(key: KeyEvent, app: &mut App, state: &mut EventLoopState) -> bool {
    if let KeyCode::Char(c @ '0'..='9') = key.code {
        state.pending_gg = false;
        state.pending_zz = false;
        let digit = c as usize - '0' as usize;
        state.count = Some(
            state
                .count
                .unwrap_or(0)
                .saturating_mul(10)
                .saturating_add(digit),
        );
        return false;
    }

    app.status = None;

    match key.code {
        KeyCode::Char('q') => {
            state.clear_prefixes();
            return true;
        }
        KeyCode::Esc => {
            state.clear_prefixes();
            app.metadata_window = false;
        }
        KeyCode::Char('g') => {
            let was_pending = state.pending_gg;
            state.clear_prefixes();
            if was_pending {
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('z') => {
            let was_pending = state.pending_zz;
            state.clear_prefixes();
            if was_pending {
                app.select_current();
            } else {
                state.pending_zz = true;
            }
        }
        KeyCode::Char('G') => {
            state.clear_prefixes();
            app.select_last();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.clear_prefixes();
            app.select_next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.clear_prefixes();
            app.select_prev();
        }
        KeyCode::Enter => {
            state.clear_prefixes();
            app.play_selected();
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            state.clear_prefixes();
            app.toggle_play_pause();
        }
        KeyCode::Char('l') => {
            state.clear_prefixes();
            app.next_track();
        }
        KeyCode::Char('h') => {
            state.clear_prefixes();
            app.previous_track();
        }
        KeyCode::Char('d') => {
            state.clear_prefixes();
            app.remove_selected();
        }
        KeyCode::Char('y') => {
            state.clear_prefixes();
            app.yank_selected();
        }
        KeyCode::Char('I') => {
            state.clear_prefixes();
            app.paste(Placement::Head);
        }
        KeyCode::Char('A') => {
            state.clear_prefixes();
            app.paste(Placement::Tail);
        }
        KeyCode::Char('o') => {
            state.clear_prefixes();
            app.paste_after_selection();
        }
        KeyCode::Char('O') => {
            state.clear_prefixes();
            app.paste_before_selection();
        }
        KeyCode::Char('P') => {
            let count = state.count;
            state.clear_prefixes();
            match count {
                Some(n) => app.paste_at(isize::try_from(n).unwrap_or(isize::MAX)),
                None => app.paste_by_mode(),
            }
        }
        KeyCode::Char('K') => {
            state.clear_prefixes();
            app.toggle_metadata_window();
        }
        other => {
            // Pending prefixes clear on any other key.
            debug!(?other, "unbound key");
            state.clear_prefixes();
        }
    }

    false
}
