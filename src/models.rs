//! Domain models for the catalog. These stay light-weight data holders so the
//! filter, pagination and view layers can borrow them freely. Everything here
//! is immutable once the dataset provider hands it out.

use std::fmt;

use chrono::{Datelike, NaiveDate};

/// Identifier used in the author map and in [`Book::author`].
pub type AuthorId = String;
/// Identifier used in the genre map and in [`Book::genres`].
pub type GenreId = String;

#[derive(Debug, Clone, PartialEq, Eq)]
/// One catalog entry.
pub struct Book {
    /// Unique id. Selection events carry this value back to the controller.
    pub id: String,
    /// Title shown on preview cards and in the detail overlay.
    pub title: String,
    /// Cover image URL. The detail overlay uses it for both the cover and the
    /// blurred backdrop.
    pub image: String,
    /// Reference into the author map.
    pub author: AuthorId,
    pub description: String,
    pub published: NaiveDate,
    /// References into the genre map. Order is preserved from the dataset.
    pub genres: Vec<GenreId>,
}

impl Book {
    /// Calendar year of publication, used by the detail subtitle.
    pub fn publication_year(&self) -> i32 {
        self.published.year()
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Book {
        Book {
            id: "b1".into(),
            title: "Dune".into(),
            image: "https://images.example.org/covers/dune.jpg".into(),
            author: "herbert".into(),
            description: "Desert planet.".into(),
            published: NaiveDate::from_ymd_opt(1965, 8, 1).unwrap(),
            genres: vec!["scifi".into(), "classic".into()],
        }
    }

    #[test]
    fn publication_year_comes_from_date() {
        assert_eq!(sample().publication_year(), 1965);
    }

    #[test]
    fn has_genre_is_exact() {
        let book = sample();
        assert!(book.has_genre("scifi"));
        assert!(!book.has_genre("sci"));
    }

    #[test]
    fn display_uses_title() {
        assert_eq!(sample().to_string(), "Dune");
    }
}
