use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::controller::FormData;
use crate::filter::ANY;
use crate::theme::Theme;
use crate::widgets::{OptionEntry, ThemeSwitch};

/// Fields of the search overlay, in tab order.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub(crate) enum SearchField {
    #[default]
    Title,
    Author,
    Genre,
}

impl SearchField {
    fn next(self) -> Self {
        match self {
            SearchField::Title => SearchField::Author,
            SearchField::Author => SearchField::Genre,
            SearchField::Genre => SearchField::Title,
        }
    }

    fn previous(self) -> Self {
        match self {
            SearchField::Title => SearchField::Genre,
            SearchField::Author => SearchField::Title,
            SearchField::Genre => SearchField::Author,
        }
    }
}

/// Search overlay form. Values survive closing the overlay, the way a page
/// form keeps its inputs.
#[derive(Default, Clone, Debug)]
pub(crate) struct SearchForm {
    pub(crate) title: String,
    /// Index into the author selector entries.
    pub(crate) author: usize,
    /// Index into the genre selector entries.
    pub(crate) genre: usize,
    pub(crate) active: SearchField,
}

impl SearchForm {
    pub(crate) fn focus(&mut self, field: SearchField) {
        self.active = field;
    }

    pub(crate) fn next_field(&mut self) {
        self.active = self.active.next();
    }

    pub(crate) fn previous_field(&mut self) {
        self.active = self.active.previous();
    }

    /// Append a character to the title. Selectors ignore typed input.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if self.active == SearchField::Title && !ch.is_control() {
            self.title.push(ch);
            true
        } else {
            false
        }
    }

    pub(crate) fn backspace(&mut self) {
        if self.active == SearchField::Title {
            self.title.pop();
        }
    }

    /// Step the active selector by `offset`, wrapping around `len` entries.
    pub(crate) fn cycle_option(&mut self, offset: isize, len: usize) {
        if len == 0 {
            return;
        }
        let slot = match self.active {
            SearchField::Title => return,
            SearchField::Author => &mut self.author,
            SearchField::Genre => &mut self.genre,
        };
        let len = len as isize;
        *slot = ((*slot as isize + offset).rem_euclid(len)) as usize;
    }

    /// Submitted field values. A stale index outside the selector submits
    /// [`ANY`].
    pub(crate) fn form_data(&self, authors: &[OptionEntry], genres: &[OptionEntry]) -> FormData {
        FormData::new()
            .with("title", &self.title)
            .with("author", selected_value(authors, self.author))
            .with("genre", selected_value(genres, self.genre))
    }

    pub(crate) fn title_len(&self) -> usize {
        self.title.chars().count()
    }

    /// Render one labelled line for `field`.
    pub(crate) fn build_line(
        &self,
        field: SearchField,
        options: &[OptionEntry],
        base: Style,
    ) -> Line<'static> {
        let (name, value) = match field {
            SearchField::Title => ("Title", self.title.clone()),
            SearchField::Author => ("Author", selected_label(options, self.author)),
            SearchField::Genre => ("Genre", selected_label(options, self.genre)),
        };
        let value = if field == SearchField::Title {
            value
        } else {
            format!("◀ {value} ▶")
        };
        let style = if self.active == field {
            base.add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            base
        };
        Line::from(vec![
            Span::styled(format!("{name}: "), base),
            Span::styled(value, style),
        ])
    }
}

fn selected_value(options: &[OptionEntry], index: usize) -> &str {
    options
        .get(index)
        .map(|entry| entry.value.as_str())
        .unwrap_or(ANY)
}

fn selected_label(options: &[OptionEntry], index: usize) -> String {
    options
        .get(index)
        .map(|entry| entry.label.clone())
        .unwrap_or_default()
}

/// Settings overlay form holding the theme switch.
#[derive(Default, Clone, Copy, Debug)]
pub(crate) struct SettingsForm {
    pub(crate) switch: ThemeSwitch,
}

impl SettingsForm {
    pub(crate) fn from_theme(theme: Theme) -> Self {
        Self {
            switch: ThemeSwitch { theme },
        }
    }

    pub(crate) fn toggle(&mut self) {
        self.switch.toggle();
    }

    pub(crate) fn form_data(&self) -> FormData {
        FormData::new().with("theme", self.switch.theme.as_str())
    }

    pub(crate) fn build_line(&self, base: Style) -> Line<'static> {
        let option = |theme: Theme| {
            let marker = if self.switch.theme == theme { "(•)" } else { "( )" };
            let style = if self.switch.theme == theme {
                base.add_modifier(Modifier::BOLD)
            } else {
                base
            };
            Span::styled(format!("{marker} {}   ", label(theme)), style)
        };
        Line::from(vec![
            Span::styled("Theme: ", base),
            option(Theme::Day),
            option(Theme::Night),
        ])
    }
}

fn label(theme: Theme) -> &'static str {
    match theme {
        Theme::Day => "Day",
        Theme::Night => "Night",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(values: &[&str]) -> Vec<OptionEntry> {
        values
            .iter()
            .map(|v| OptionEntry {
                value: v.to_string(),
                label: v.to_uppercase(),
            })
            .collect()
    }

    #[test]
    fn typing_only_edits_title() {
        let mut form = SearchForm::default();
        assert!(form.push_char('d'));
        assert!(form.push_char('u'));
        form.next_field();
        assert!(!form.push_char('x'));
        form.backspace();
        assert_eq!(form.title, "du");
        form.previous_field();
        form.backspace();
        assert_eq!(form.title, "d");
        assert_eq!(form.title_len(), 1);
    }

    #[test]
    fn selectors_wrap_around() {
        let mut form = SearchForm::default();
        form.focus(SearchField::Genre);
        form.cycle_option(-1, 3);
        assert_eq!(form.genre, 2);
        form.cycle_option(1, 3);
        assert_eq!(form.genre, 0);
        form.focus(SearchField::Title);
        form.cycle_option(1, 3);
        assert_eq!((form.author, form.genre), (0, 0));
    }

    #[test]
    fn form_data_uses_selector_values() {
        let authors = options(&["any", "austen", "herbert"]);
        let genres = options(&["any", "scifi"]);
        let mut form = SearchForm::default();
        form.title = "dune".into();
        form.author = 2;
        form.genre = 7;
        let data = form.form_data(&authors, &genres);
        assert_eq!(data.get("title"), Some("dune"));
        assert_eq!(data.get("author"), Some("herbert"));
        assert_eq!(data.get("genre"), Some(ANY));
    }

    #[test]
    fn settings_submit_current_switch() {
        let mut form = SettingsForm::from_theme(Theme::Day);
        form.toggle();
        assert_eq!(form.form_data().get("theme"), Some("night"));
    }
}
