//! Core type definitions for the playlist view

/// A track row of the playlist view
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    /// Album thumbnail, empty when the album has no image at that tier
    pub image: String,
    pub duration_ms: u32,
    pub album: String,
    /// Album URI, the context playback is started in
    pub context_uri: String,
    /// 1-based position within the album
    pub track_number: u32,
}

/// The playlist shown by the view
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub tracks: Vec<Track>,
}

/// What is published as "now playing" once playback starts
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentlyPlaying {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub image: String,
}

impl From<&Track> for CurrentlyPlaying {
    fn from(track: &Track) -> Self {
        Self {
            id: track.id.clone(),
            name: track.name.clone(),
            artists: track.artists.clone(),
            image: track.image.clone(),
        }
    }
}

/// Local state of the view, not shared with the rest of the application
#[derive(Clone, Debug)]
pub struct ViewState {
    pub loading: bool,
    pub selected_index: usize,
    pub should_quit: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            // The view mounts in the loading state
            loading: true,
            selected_index: 0,
            should_quit: false,
        }
    }
}

impl ViewState {
    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_down(&mut self, track_count: usize) {
        if self.selected_index < track_count.saturating_sub(1) {
            self.selected_index += 1;
        }
    }

    pub fn clamp_selection(&mut self, track_count: usize) {
        self.selected_index = self.selected_index.min(track_count.saturating_sub(1));
    }
}
