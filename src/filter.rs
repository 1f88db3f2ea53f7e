//! Search criteria and the pure filter over the catalog.

use crate::models::Book;

/// Selector value meaning "no constraint on this field".
pub const ANY: &str = "any";

/// Criteria read from one search-form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the title. Blank matches everything.
    pub title: String,
    /// Author id or [`ANY`].
    pub author: String,
    /// Genre id or [`ANY`].
    pub genre: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: ANY.to_string(),
            genre: ANY.to_string(),
        }
    }
}

impl FilterCriteria {
    /// Build criteria from submitted `name=value` pairs. Missing or blank
    /// selector fields fall back to [`ANY`]; unknown names are ignored.
    pub fn from_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut criteria = Self::default();
        for (name, value) in fields {
            match name {
                "title" => criteria.title = value.to_string(),
                "author" => criteria.author = selector_value(value),
                "genre" => criteria.genre = selector_value(value),
                _ => {}
            }
        }
        criteria
    }

    /// Whether `book` satisfies all three predicates.
    pub fn matches(&self, book: &Book) -> bool {
        self.title_matches(book) && self.author_matches(book) && self.genre_matches(book)
    }

    fn title_matches(&self, book: &Book) -> bool {
        self.title.trim().is_empty()
            || book
                .title
                .to_lowercase()
                .contains(&self.title.to_lowercase())
    }

    fn author_matches(&self, book: &Book) -> bool {
        self.author == ANY || book.author == self.author
    }

    fn genre_matches(&self, book: &Book) -> bool {
        self.genre == ANY || book.has_genre(&self.genre)
    }
}

fn selector_value(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        ANY.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Every book matching `criteria`, in catalog order.
pub fn filter(books: &[Book], criteria: &FilterCriteria) -> Vec<Book> {
    books
        .iter()
        .filter(|book| criteria.matches(book))
        .cloned()
        .collect()
}
