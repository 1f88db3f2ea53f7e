//! Typed configuration for the presentational widgets. Each struct lists
//! exactly the fields its widget accepts; the terminal renderer draws them.

use std::collections::BTreeMap;

use crate::data::Catalog;
use crate::filter::ANY;
use crate::models::Book;
use crate::theme::Theme;

/// A book-preview card. Activating it emits a selection event with `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookPreview {
    pub id: String,
    pub image: String,
    pub title: String,
    pub author_name: String,
}

impl BookPreview {
    pub fn from_book(book: &Book, catalog: &Catalog) -> Self {
        Self {
            id: book.id.clone(),
            image: book.image.clone(),
            title: book.title.clone(),
            author_name: catalog.author_name(&book.author).to_string(),
        }
    }
}

/// One entry in a selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    pub value: String,
    pub label: String,
}

/// Selector entries for `options`, led by an [`ANY`] entry labelled
/// `default_label`.
pub fn create_options(options: &BTreeMap<String, String>, default_label: &str) -> Vec<OptionEntry> {
    let mut entries = Vec::with_capacity(options.len() + 1);
    entries.push(OptionEntry {
        value: ANY.to_string(),
        label: default_label.to_string(),
    });
    entries.extend(options.iter().map(|(id, name)| OptionEntry {
        value: id.clone(),
        label: name.clone(),
    }));
    entries
}

/// The day/night switch inside the settings overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeSwitch {
    pub theme: Theme,
}

impl ThemeSwitch {
    pub fn toggle(&mut self) {
        self.theme = self.theme.toggled();
    }
}
