//! Application state for the result list: the active match set and how many
//! pages of it have been rendered.

use crate::models::Book;

/// Current page plus the active match set. Only the view controller mutates
/// it, either by a new search or by advancing a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    current_page: usize,
    matches: Vec<Book>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl AppState {
    /// Start on page one of `matches`.
    pub fn new(matches: Vec<Book>) -> Self {
        Self {
            current_page: 1,
            matches,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn matches(&self) -> &[Book] {
        &self.matches
    }

    /// Replace the match set and go back to page one.
    pub fn reset(&mut self, matches: Vec<Book>) {
        self.matches = matches;
        self.current_page = 1;
    }

    /// Books on the current page: `[(page - 1) * size, page * size)`.
    pub fn page_slice(&self, page_size: usize) -> &[Book] {
        self.slice_for(self.current_page, page_size)
    }

    /// Books on the page after the current one. Empty once the data runs out.
    pub fn next_slice(&self, page_size: usize) -> &[Book] {
        self.slice_for(self.current_page + 1, page_size)
    }

    pub fn advance(&mut self) {
        self.current_page += 1;
    }

    /// Matches not yet rendered after the current page. Negative once the
    /// pages shown overrun the data.
    pub fn remaining(&self, page_size: usize) -> i64 {
        self.matches.len() as i64 - (self.current_page * page_size) as i64
    }

    pub fn show_more(&self, page_size: usize) -> ShowMore {
        ShowMore::from_remaining(self.remaining(page_size))
    }

    fn slice_for(&self, page: usize, page_size: usize) -> &[Book] {
        let len = self.matches.len();
        let start = page.saturating_sub(1).saturating_mul(page_size).min(len);
        let end = page.saturating_mul(page_size).min(len);
        &self.matches[start..end]
    }
}

/// State of the "Show more" control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShowMore {
    /// Count shown in the label, never negative.
    pub remaining: usize,
    pub enabled: bool,
}

impl ShowMore {
    pub fn from_remaining(remaining: i64) -> Self {
        Self {
            remaining: remaining.max(0) as usize,
            enabled: remaining > 0,
        }
    }

    pub fn label(&self) -> String {
        format!("Show more ({})", self.remaining)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn books(count: usize) -> Vec<Book> {
        (0..count)
            .map(|i| Book {
                id: format!("b{i}"),
                title: format!("Book {i}"),
                image: String::new(),
                author: "a".into(),
                description: String::new(),
                published: NaiveDate::from_ymd_opt(2001, 1, 1).unwrap(),
                genres: Vec::new(),
            })
            .collect()
    }

    #[test]
    fn twenty_books_in_pages_of_ten() {
        let mut state = AppState::new(books(20));
        assert_eq!(state.page_slice(10).len(), 10);
        assert_eq!(state.show_more(10).label(), "Show more (10)");
        assert!(state.show_more(10).enabled);

        assert_eq!(state.next_slice(10)[0].id, "b10");
        state.advance();
        assert_eq!(state.page_slice(10).len(), 10);
        let show_more = state.show_more(10);
        assert!(!show_more.enabled);
        assert_eq!(show_more.label(), "Show more (0)");
    }

    #[test]
    fn cumulative_render_count_follows_clicks() {
        let page_size = 7;
        for len in [0usize, 1, 6, 7, 8, 20, 21, 22] {
            let mut state = AppState::new(books(len));
            let mut rendered = state.page_slice(page_size).len();
            for k in 0..5usize {
                assert_eq!(rendered, len.min((k + 1) * page_size));
                assert_eq!(
                    state.show_more(page_size).enabled,
                    len > (k + 1) * page_size
                );
                rendered += state.next_slice(page_size).len();
                state.advance();
            }
        }
    }

    #[test]
    fn advancing_past_the_end_yields_empty_slices() {
        let mut state = AppState::new(books(3));
        state.advance();
        state.advance();
        assert!(state.page_slice(2).is_empty());
        assert!(state.next_slice(2).is_empty());
        assert_eq!(state.remaining(2), -3);
        assert_eq!(state.show_more(2).remaining, 0);
    }

    #[test]
    fn reset_returns_to_first_page() {
        let mut state = AppState::new(books(10));
        state.advance();
        state.advance();
        state.reset(books(4));
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.matches().len(), 4);
    }
}
