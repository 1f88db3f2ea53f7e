//! Static dataset provider. The catalog is read-only from the moment it is
//! constructed: books keep their original order, and the author and genre maps
//! resolve the ids stored on each book.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;

use crate::error::{CatalogError, Result};
use crate::models::{AuthorId, Book, GenreId};

/// Number of preview cards rendered per page of results.
pub const BOOKS_PER_PAGE: usize = 36;

/// Base URL for the seed dataset's cover images.
const COVER_BASE_URL: &str = "https://images.example.org/covers";

/// Immutable catalog handed to the view controller at startup.
#[derive(Debug, Clone)]
pub struct Catalog {
    books: Vec<Book>,
    authors: BTreeMap<AuthorId, String>,
    genres: BTreeMap<GenreId, String>,
    page_size: usize,
}

impl Catalog {
    /// Build a catalog after checking that every reference resolves and ids
    /// are unique.
    pub fn new(
        books: Vec<Book>,
        authors: BTreeMap<AuthorId, String>,
        genres: BTreeMap<GenreId, String>,
        page_size: usize,
    ) -> Result<Self> {
        if page_size == 0 {
            return Err(CatalogError::InvalidPageSize);
        }

        let mut seen = HashSet::with_capacity(books.len());
        for book in &books {
            if !seen.insert(book.id.as_str()) {
                return Err(CatalogError::DuplicateBook(book.id.clone()));
            }
            if !authors.contains_key(&book.author) {
                return Err(CatalogError::UnknownAuthor {
                    book: book.id.clone(),
                    author: book.author.clone(),
                });
            }
            if let Some(genre) = book.genres.iter().find(|g| !genres.contains_key(*g)) {
                return Err(CatalogError::UnknownGenre {
                    book: book.id.clone(),
                    genre: genre.clone(),
                });
            }
        }

        Ok(Self {
            books,
            authors,
            genres,
            page_size,
        })
    }

    /// The seed dataset bundled with the binary.
    pub fn builtin() -> Result<Self> {
        let authors = AUTHORS
            .iter()
            .map(|(id, name)| (id.to_string(), name.to_string()))
            .collect();
        let genres = GENRES
            .iter()
            .map(|(id, name)| (id.to_string(), name.to_string()))
            .collect();
        let books = SEED_BOOKS
            .iter()
            .map(|seed| seed.to_book())
            .collect::<Result<Vec<_>>>()?;

        let catalog = Self::new(books, authors, genres, BOOKS_PER_PAGE)?;
        tracing::debug!(
            books = catalog.books.len(),
            authors = catalog.authors.len(),
            genres = catalog.genres.len(),
            "loaded built-in catalog"
        );
        Ok(catalog)
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn authors(&self) -> &BTreeMap<AuthorId, String> {
        &self.authors
    }

    pub fn genres(&self) -> &BTreeMap<GenreId, String> {
        &self.genres
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// First book carrying `id`, if any.
    pub fn book(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Display name for an author id. Ids are validated at construction, so the
    /// fallback only shows up for ids that did not come from a book.
    pub fn author_name(&self, id: &str) -> &str {
        self.authors.get(id).map(String::as_str).unwrap_or("Unknown author")
    }

    pub fn genre_name(&self, id: &str) -> &str {
        self.genres.get(id).map(String::as_str).unwrap_or("Unknown genre")
    }
}

/// Parse an ISO calendar date, tagging failures with the owning book.
pub(crate) fn parse_published(book: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| CatalogError::InvalidDate {
        book: book.to_string(),
        value: value.to_string(),
    })
}

/// Compact row format for the bundled dataset.
struct SeedBook {
    id: &'static str,
    title: &'static str,
    author: &'static str,
    published: &'static str,
    genres: &'static [&'static str],
    description: &'static str,
}

impl SeedBook {
    fn to_book(&self) -> Result<Book> {
        Ok(Book {
            id: self.id.to_string(),
            title: self.title.to_string(),
            image: format!("{COVER_BASE_URL}/{}.jpg", self.id),
            author: self.author.to_string(),
            description: self.description.to_string(),
            published: parse_published(self.id, self.published)?,
            genres: self.genres.iter().map(|g| g.to_string()).collect(),
        })
    }
}

const AUTHORS: &[(&str, &str)] = &[
    ("asimov", "Isaac Asimov"),
    ("austen", "Jane Austen"),
    ("bradbury", "Ray Bradbury"),
    ("bronte", "Charlotte Bronte"),
    ("christie", "Agatha Christie"),
    ("dickens", "Charles Dickens"),
    ("doyle", "Arthur Conan Doyle"),
    ("herbert", "Frank Herbert"),
    ("huxley", "Aldous Huxley"),
    ("leguin", "Ursula K. Le Guin"),
    ("orwell", "George Orwell"),
    ("shelley", "Mary Shelley"),
    ("steinbeck", "John Steinbeck"),
    ("tolkien", "J.R.R. Tolkien"),
    ("twain", "Mark Twain"),
    ("woolf", "Virginia Woolf"),
];

const GENRES: &[(&str, &str)] = &[
    ("adventure", "Adventure"),
    ("classic", "Classic"),
    ("dystopia", "Dystopia"),
    ("fantasy", "Fantasy"),
    ("horror", "Horror"),
    ("mystery", "Mystery"),
    ("romance", "Romance"),
    ("scifi", "Science Fiction"),
];

#[rustfmt::skip]
const SEED_BOOKS: &[SeedBook] = &[
    SeedBook { id: "b01", title: "Dune", author: "herbert", published: "1965-08-01", genres: &["scifi", "classic"], description: "A noble family takes stewardship of a desert planet and the spice that binds an empire together." },
    SeedBook { id: "b02", title: "Dune Messiah", author: "herbert", published: "1969-10-15", genres: &["scifi"], description: "Twelve years into his reign, an emperor fights the conspiracy and the prophecy that built his rule." },
    SeedBook { id: "b03", title: "Children of Dune", author: "herbert", published: "1976-04-01", genres: &["scifi"], description: "Twin heirs inherit a desert world that is slowly turning green." },
    SeedBook { id: "b04", title: "Foundation", author: "asimov", published: "1951-05-01", genres: &["scifi", "classic"], description: "A mathematician predicts the fall of a galactic empire and plans to shorten the dark age that follows." },
    SeedBook { id: "b05", title: "Foundation and Empire", author: "asimov", published: "1952-01-01", genres: &["scifi"], description: "The Foundation faces a dying empire and a mutant no equation foresaw." },
    SeedBook { id: "b06", title: "I, Robot", author: "asimov", published: "1950-12-02", genres: &["scifi"], description: "Linked stories trace the growing pains of machines bound by three laws." },
    SeedBook { id: "b07", title: "The Caves of Steel", author: "asimov", published: "1954-02-01", genres: &["scifi", "mystery"], description: "A detective and a robot partner investigate a murder in a domed future city." },
    SeedBook { id: "b08", title: "Pride and Prejudice", author: "austen", published: "1813-01-28", genres: &["romance", "classic"], description: "Elizabeth Bennet trades barbs and first impressions with the proud Mr. Darcy." },
    SeedBook { id: "b09", title: "Emma", author: "austen", published: "1815-12-23", genres: &["romance", "classic"], description: "A confident matchmaker misreads every heart in her village, her own included." },
    SeedBook { id: "b10", title: "Persuasion", author: "austen", published: "1817-12-20", genres: &["romance"], description: "Years after breaking an engagement, Anne Elliot meets her former suitor again." },
    SeedBook { id: "b11", title: "Fahrenheit 451", author: "bradbury", published: "1953-10-19", genres: &["dystopia", "scifi"], description: "A fireman whose job is burning books begins to read them." },
    SeedBook { id: "b12", title: "The Martian Chronicles", author: "bradbury", published: "1950-05-04", genres: &["scifi"], description: "Settlers from Earth arrive on Mars in waves and bring their old habits with them." },
    SeedBook { id: "b13", title: "Something Wicked This Way Comes", author: "bradbury", published: "1962-09-01", genres: &["horror", "fantasy"], description: "A dark carnival arrives in town one October and two boys see what it sells." },
    SeedBook { id: "b14", title: "Jane Eyre", author: "bronte", published: "1847-10-16", genres: &["romance", "classic"], description: "An orphaned governess finds love and a locked secret at Thornfield Hall." },
    SeedBook { id: "b15", title: "Villette", author: "bronte", published: "1853-01-28", genres: &["romance"], description: "A young Englishwoman starts over as a teacher in a foreign city." },
    SeedBook { id: "b16", title: "Murder on the Orient Express", author: "christie", published: "1934-01-01", genres: &["mystery", "classic"], description: "A snowbound train, a stabbed passenger, and a dozen suspects with alibis." },
    SeedBook { id: "b17", title: "And Then There Were None", author: "christie", published: "1939-11-06", genres: &["mystery"], description: "Ten strangers lured to an island die one by one following a nursery rhyme." },
    SeedBook { id: "b18", title: "The Murder of Roger Ackroyd", author: "christie", published: "1926-06-01", genres: &["mystery"], description: "A village doctor narrates the case that made a detective famous." },
    SeedBook { id: "b19", title: "Great Expectations", author: "dickens", published: "1861-08-01", genres: &["classic"], description: "An orphan blacksmith's boy receives a fortune from an unknown benefactor." },
    SeedBook { id: "b20", title: "A Tale of Two Cities", author: "dickens", published: "1859-11-26", genres: &["classic", "adventure"], description: "London and Paris on the eve of revolution, and a man who gives his life for another." },
    SeedBook { id: "b21", title: "Oliver Twist", author: "dickens", published: "1838-11-09", genres: &["classic"], description: "A workhouse orphan falls in with a gang of London pickpockets." },
    SeedBook { id: "b22", title: "A Study in Scarlet", author: "doyle", published: "1887-11-01", genres: &["mystery", "classic"], description: "Sherlock Holmes and Dr. Watson meet and take on their first case." },
    SeedBook { id: "b23", title: "The Hound of the Baskervilles", author: "doyle", published: "1902-03-25", genres: &["mystery", "horror"], description: "A family curse and a spectral hound haunt the moors of Devon." },
    SeedBook { id: "b24", title: "The Lost World", author: "doyle", published: "1912-10-01", genres: &["adventure", "scifi"], description: "An expedition finds a plateau where prehistoric creatures still live." },
    SeedBook { id: "b25", title: "Brave New World", author: "huxley", published: "1932-01-01", genres: &["dystopia", "classic"], description: "A future society engineered for happiness meets a man raised outside it." },
    SeedBook { id: "b26", title: "Island", author: "huxley", published: "1962-03-01", genres: &["dystopia"], description: "A journalist shipwrecked on a utopian island is sent to undermine it." },
    SeedBook { id: "b27", title: "A Wizard of Earthsea", author: "leguin", published: "1968-11-01", genres: &["fantasy", "classic"], description: "A gifted young wizard unleashes a shadow and must hunt it across the sea." },
    SeedBook { id: "b28", title: "The Left Hand of Darkness", author: "leguin", published: "1969-03-01", genres: &["scifi"], description: "An envoy to a winter world learns what its people are and are not." },
    SeedBook { id: "b29", title: "The Dispossessed", author: "leguin", published: "1974-05-01", genres: &["scifi", "dystopia"], description: "A physicist crosses between an anarchist moon and its wealthy twin planet." },
    SeedBook { id: "b30", title: "Nineteen Eighty-Four", author: "orwell", published: "1949-06-08", genres: &["dystopia", "classic"], description: "Under constant surveillance, a records clerk starts a diary and a rebellion." },
    SeedBook { id: "b31", title: "Animal Farm", author: "orwell", published: "1945-08-17", genres: &["dystopia", "classic"], description: "Farm animals overthrow their owner and watch the new order turn familiar." },
    SeedBook { id: "b32", title: "Frankenstein", author: "shelley", published: "1818-01-01", genres: &["horror", "scifi", "classic"], description: "A scientist builds a living being and abandons it to a world that rejects it." },
    SeedBook { id: "b33", title: "The Last Man", author: "shelley", published: "1826-01-23", genres: &["scifi"], description: "A plague sweeps the twenty-first century and leaves one survivor to tell it." },
    SeedBook { id: "b34", title: "Of Mice and Men", author: "steinbeck", published: "1937-02-06", genres: &["classic"], description: "Two drifting ranch hands share a dream of a place of their own." },
    SeedBook { id: "b35", title: "The Grapes of Wrath", author: "steinbeck", published: "1939-04-14", genres: &["classic"], description: "A dust bowl family heads west to California in search of work." },
    SeedBook { id: "b36", title: "The Hobbit", author: "tolkien", published: "1937-09-21", genres: &["fantasy", "adventure"], description: "A comfortable hobbit is swept into a quest to reclaim a dragon's hoard." },
    SeedBook { id: "b37", title: "The Fellowship of the Ring", author: "tolkien", published: "1954-07-29", genres: &["fantasy", "adventure"], description: "Nine companions set out to destroy a ring of terrible power." },
    SeedBook { id: "b38", title: "Adventures of Huckleberry Finn", author: "twain", published: "1884-12-10", genres: &["adventure", "classic"], description: "A boy and an escaped slave raft down the Mississippi." },
    SeedBook { id: "b39", title: "The Adventures of Tom Sawyer", author: "twain", published: "1876-06-01", genres: &["adventure"], description: "A mischievous boy grows up along the river in a small Missouri town." },
    SeedBook { id: "b40", title: "Mrs Dalloway", author: "woolf", published: "1925-05-14", genres: &["classic"], description: "One June day in London as a society hostess prepares for her party." },
    SeedBook { id: "b41", title: "Orlando", author: "woolf", published: "1928-10-11", genres: &["fantasy", "romance"], description: "A poet lives for centuries and wakes one morning as a woman." },
    SeedBook { id: "b42", title: "To the Lighthouse", author: "woolf", published: "1927-05-05", genres: &["classic"], description: "A family's summer visits to the Isle of Skye across a decade." },
];
