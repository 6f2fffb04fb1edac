//! Utility functions for rendering UI components

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, List, ListItem, ListState},
    Frame,
};

pub fn render_scrollable_list(
    frame: &mut Frame,
    area: Rect,
    items: Vec<ListItem>,
    selected_index: usize,
    block: Block,
) {
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default()); // Highlight handled by item styles

    let mut list_state = ListState::default();
    list_state.select(Some(selected_index));

    frame.render_stateful_widget(list, area, &mut list_state);
}

/// `M:SS`. Seconds are rounded to the nearest whole second (halves up) and
/// never carried into the minutes, so 59.5s renders as `0:60`.
pub fn format_duration(ms: u32) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000 + 500) / 1000;
    format!("{}:{:02}", minutes, seconds)
}

/// Calculate width needed for index column (log10(n) + padding)
pub fn calculate_num_width(item_count: usize) -> usize {
    if item_count == 0 {
        2
    } else {
        let digits = (item_count as f64).log10().floor() as usize + 1;
        digits + 1
    }
}

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_width)
    } else {
        format!("{:<width$}", s, width = max_width)
    }
}

/// Column widths of the track list: (index, title, album, duration)
pub fn calculate_track_column_widths(content_width: usize, item_count: usize) -> (usize, usize, usize, usize) {
    // " {num}   {title}   {album}   {duration}"
    let num_width = calculate_num_width(item_count);
    let duration_width = 5;
    let fixed_width = 1 + num_width + 3 + 3 + 3 + duration_width;
    let remaining_width = content_width.saturating_sub(fixed_width);
    let title_width = (remaining_width * 60) / 100;
    let album_width = remaining_width.saturating_sub(title_width);

    (num_width, title_width, album_width, duration_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_duration_test() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(65_000), "1:05");
        assert_eq!(format_duration(600_000), "10:00");
        assert_eq!(format_duration(185_000), "3:05");
        assert_eq!(format_duration(1_499), "0:01");
        assert_eq!(format_duration(1_500), "0:02");
    }

    #[test]
    fn format_duration_does_not_carry() {
        assert_eq!(format_duration(59_500), "0:60");
        assert_eq!(format_duration(119_999), "1:60");
        assert_eq!(format_duration(59_499), "0:59");
    }

    #[test]
    fn truncate_string_pads_and_cuts() {
        assert_eq!(truncate_string("abc", 5), "abc  ");
        assert_eq!(truncate_string("abcdefgh", 6), "abc...");
    }

    #[test]
    fn column_widths_fill_content() {
        let (num, title, album, duration) = calculate_track_column_widths(80, 12);
        assert_eq!(num, 3);
        assert_eq!(duration, 5);
        assert_eq!(1 + num + 3 + title + 3 + album + 3 + duration, 80);
    }
}
