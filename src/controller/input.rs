//! Key event handling

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::PlaylistController;

impl PlaylistController {
    pub async fn handle_key_event(&self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.view_state.lock().await.should_quit = true;
            return;
        }

        let track_count = self
            .store
            .state()
            .await
            .selected_playlist
            .map(|p| p.tracks.len())
            .unwrap_or(0);

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.view_state.lock().await.should_quit = true;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.view_state.lock().await.move_up();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.view_state.lock().await.move_down(track_count);
            }
            KeyCode::Home => {
                self.view_state.lock().await.selected_index = 0;
            }
            KeyCode::End => {
                self.view_state.lock().await.selected_index = track_count.saturating_sub(1);
            }
            KeyCode::Enter => {
                // Ignore rows the user cannot see while loading
                if self.view_state.lock().await.loading {
                    return;
                }
                let controller = self.clone();
                tokio::spawn(async move {
                    controller.play_selected().await;
                });
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                tracing::info!("Reload requested");
                self.reload().await;
            }
            _ => {}
        }
    }
}
