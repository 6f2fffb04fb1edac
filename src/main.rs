mod config;
mod controller;
mod error;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use anyhow::Result;
use std::time::Duration;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use config::Config;
use controller::PlaylistController;
use model::{Action, AppState, SpotifyClient, Store};
use view::PlaylistView;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    // Held until shutdown so buffered log lines are flushed
    let _log_guard = match logging::init_logging(&config.log_dir) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {}", e);
            None
        }
    };

    tracing::info!(playlist_id = %config.playlist_id, api_base = %config.api_base, "=== Playlist View Starting ===");

    let store = Store::new(AppState::default());
    store.dispatch(Action::SetToken(config.token()?)).await;
    store.dispatch(Action::SetPlaylistId(config.playlist_id.clone())).await;
    let api = SpotifyClient::new(config.api_base.clone());
    let controller = PlaylistController::new(store.clone(), Arc::new(api));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, store, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Playlist View shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    store: Store,
    controller: PlaylistController,
) -> io::Result<()> {
    loop {
        // Starts a background load whenever the token or playlist changed
        controller.sync().await;

        let state = store.state().await;
        let view_state = controller.get_view_state().await;

        terminal.draw(|f| {
            PlaylistView::render(f, &state, &view_state);
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                controller.handle_key_event(key).await;
            }
        }

        if controller.should_quit().await {
            break;
        }
    }

    Ok(())
}
