//! Reusable UI widget helpers

use ratatui::{
    layout::Rect,
    widgets::{List, ListState},
    Frame,
};

/// Render a scrollable list that automatically keeps the selected item visible.
///
/// ```ignore
/// let list = List::new(items).block(block);
/// render_scrollable_list(frame, area, list, app.state.selected_index);
/// ```
pub fn render_scrollable_list(frame: &mut Frame, area: Rect, list: List, selected_index: usize) {
    let mut list_state = ListState::default().with_selected(Some(selected_index));
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// First item to draw so that `active` fits in `available` rows.
///
/// Items are drawn top to bottom with the given heights; scrolling only
/// starts once the active item would fall off the bottom.
pub fn scroll_start(heights: &[u16], active: usize, available: u16) -> usize {
    let active = active.min(heights.len().saturating_sub(1));
    let mut start = 0;
    let mut used: u16 = heights.iter().take(active + 1).sum();
    while used > available && start < active {
        used -= heights[start];
        start += 1;
    }
    start
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_scroll_when_it_fits() {
        assert_eq!(scroll_start(&[5, 5, 5], 2, 20), 0);
    }

    #[test]
    fn test_scrolls_to_keep_active_visible() {
        assert_eq!(scroll_start(&[5, 5, 5, 5], 3, 12), 2);
    }

    #[test]
    fn test_oversized_active_item_starts_at_itself() {
        assert_eq!(scroll_start(&[5, 30], 1, 10), 1);
    }

    #[test]
    fn test_empty() {
        assert_eq!(scroll_start(&[], 0, 10), 0);
    }
}
