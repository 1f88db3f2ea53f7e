use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::theme::{RootStyle, COLOR_DARK, COLOR_LIGHT};
use crate::widgets::BookPreview;

/// Terminal colours derived from the root theme tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Palette {
    pub(crate) fg: Color,
    pub(crate) bg: Color,
}

impl Palette {
    pub(crate) fn from_root(root: &RootStyle) -> Self {
        Self {
            fg: root.rgb(COLOR_DARK).unwrap_or(Color::Reset),
            bg: root.rgb(COLOR_LIGHT).unwrap_or(Color::Reset),
        }
    }

    pub(crate) fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub(crate) fn dim(&self) -> Style {
        self.base().add_modifier(Modifier::DIM)
    }

    pub(crate) fn highlight(&self) -> Style {
        self.base().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    }
}

/// Text lines for one book-preview card.
pub(crate) fn build_preview_lines(
    preview: &BookPreview,
    palette: Palette,
    selected: bool,
) -> Vec<Line<'static>> {
    let title = if selected {
        format!("▶ {}", preview.title)
    } else {
        preview.title.clone()
    };
    vec![
        Line::from(Span::styled(
            title,
            palette.base().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(preview.author_name.clone(), palette.dim())),
    ]
}

/// First row of a window of `capacity` rows that keeps `selected` visible.
pub(crate) fn window_start(selected: usize, capacity: usize, len: usize) -> usize {
    let capacity = capacity.max(1);
    let mut start = if selected >= capacity {
        selected + 1 - capacity
    } else {
        0
    };
    if start + capacity > len {
        start = len.saturating_sub(capacity);
    }
    start
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for overlays.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}
