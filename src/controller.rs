//! View controller: routes UI events through an explicit dispatch table and
//! keeps the rendered view in step with the application state.
//!
//! Handlers receive the current [`AppState`] by value and return the next one,
//! so the filter/paginate cycle can be exercised without a terminal.

use std::mem;

use crate::data::Catalog;
use crate::filter::{filter, FilterCriteria};
use crate::pagination::{AppState, ShowMore};
use crate::theme::{apply_theme, RootStyle, Theme};
use crate::widgets::{create_options, BookPreview, OptionEntry};

/// Control or container that raised an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventSource {
    HeaderSearch,
    HeaderSettings,
    SearchCancel,
    SettingsCancel,
    SearchForm,
    SettingsForm,
    ListButton,
    ListItems,
    ListClose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Submit,
    /// A book-preview card inside the list was activated.
    PreviewSelected,
}

/// Payload carried with an event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EventData {
    #[default]
    None,
    Form(FormData),
    Selection {
        id: String,
    },
}

/// Submitted `name=value` pairs, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.fields.push((name.to_string(), value.to_string()));
        self
    }

    /// First value submitted under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

/// Input that should receive focus on the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    SearchTitle,
}

/// Pending viewport scroll request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scroll {
    TopSmooth,
}

/// Contents of the book detail overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailOverlay {
    pub open: bool,
    pub book_id: Option<String>,
    /// Backdrop image, always the same URL as `image`.
    pub blur: String,
    pub image: String,
    pub title: String,
    /// `"{author} ({year})"`.
    pub subtitle: String,
    pub description: String,
}

/// Everything the renderer needs to draw one frame.
#[derive(Debug, Clone, Default)]
pub struct View {
    pub search_open: bool,
    pub settings_open: bool,
    pub detail: DetailOverlay,
    /// Cards rendered so far, in display order.
    pub items: Vec<BookPreview>,
    /// The "no results" message.
    pub message_visible: bool,
    pub show_more: ShowMore,
    pub author_options: Vec<OptionEntry>,
    pub genre_options: Vec<OptionEntry>,
    pub theme: Theme,
    pub root: RootStyle,
    focus: Option<Focus>,
    scroll: Option<Scroll>,
}

impl View {
    pub fn take_focus(&mut self) -> Option<Focus> {
        self.focus.take()
    }

    pub fn take_scroll(&mut self) -> Option<Scroll> {
        self.scroll.take()
    }

    fn append_previews(&mut self, catalog: &Catalog, state: &AppState, books: PageRef) {
        let slice = match books {
            PageRef::Current => state.page_slice(catalog.page_size()),
            PageRef::Next => state.next_slice(catalog.page_size()),
        };
        self.items
            .extend(slice.iter().map(|book| BookPreview::from_book(book, catalog)));
    }

    fn update_show_more(&mut self, catalog: &Catalog, state: &AppState) {
        self.show_more = state.show_more(catalog.page_size());
    }
}

#[derive(Clone, Copy)]
enum PageRef {
    Current,
    Next,
}

type Handler = fn(&Catalog, &mut View, AppState, &EventData) -> AppState;

/// The dispatch table: which handler runs for each (source, kind) pair.
fn route(source: EventSource, kind: EventKind) -> Option<Handler> {
    let handler: Handler = match (source, kind) {
        (EventSource::HeaderSearch, EventKind::Click) => open_search,
        (EventSource::SearchCancel, EventKind::Click) => close_search,
        (EventSource::HeaderSettings, EventKind::Click) => open_settings,
        (EventSource::SettingsCancel, EventKind::Click) => close_settings,
        (EventSource::ListClose, EventKind::Click) => close_detail,
        (EventSource::SettingsForm, EventKind::Submit) => submit_settings,
        (EventSource::SearchForm, EventKind::Submit) => submit_search,
        (EventSource::ListButton, EventKind::Click) => show_more,
        (EventSource::ListItems, EventKind::PreviewSelected) => select_preview,
        _ => return None,
    };
    Some(handler)
}

fn open_search(_: &Catalog, view: &mut View, state: AppState, _: &EventData) -> AppState {
    view.search_open = true;
    view.focus = Some(Focus::SearchTitle);
    state
}

fn close_search(_: &Catalog, view: &mut View, state: AppState, _: &EventData) -> AppState {
    view.search_open = false;
    state
}

fn open_settings(_: &Catalog, view: &mut View, state: AppState, _: &EventData) -> AppState {
    view.settings_open = true;
    state
}

fn close_settings(_: &Catalog, view: &mut View, state: AppState, _: &EventData) -> AppState {
    view.settings_open = false;
    state
}

fn close_detail(_: &Catalog, view: &mut View, state: AppState, _: &EventData) -> AppState {
    view.detail.open = false;
    state
}

fn submit_settings(_: &Catalog, view: &mut View, state: AppState, data: &EventData) -> AppState {
    let value = match data {
        EventData::Form(form) => form.get("theme").unwrap_or_default(),
        _ => "",
    };
    let theme = Theme::from_value(value);
    apply_theme(&mut view.root, theme);
    view.theme = theme;
    view.settings_open = false;
    tracing::info!(theme = %theme, "theme changed");
    state
}

fn submit_search(catalog: &Catalog, view: &mut View, mut state: AppState, data: &EventData) -> AppState {
    let criteria = match data {
        EventData::Form(form) => FilterCriteria::from_fields(form.fields()),
        _ => FilterCriteria::default(),
    };
    state.reset(filter(catalog.books(), &criteria));

    view.message_visible = state.matches().is_empty();
    view.items.clear();
    view.append_previews(catalog, &state, PageRef::Current);
    view.update_show_more(catalog, &state);
    view.scroll = Some(Scroll::TopSmooth);
    view.search_open = false;

    tracing::info!(
        title = %criteria.title,
        author = %criteria.author,
        genre = %criteria.genre,
        matches = state.matches().len(),
        "search submitted"
    );
    state
}

fn show_more(catalog: &Catalog, view: &mut View, mut state: AppState, _: &EventData) -> AppState {
    view.append_previews(catalog, &state, PageRef::Next);
    state.advance();
    view.update_show_more(catalog, &state);
    tracing::debug!(page = state.current_page(), rendered = view.items.len(), "page advanced");
    state
}

fn select_preview(catalog: &Catalog, view: &mut View, state: AppState, data: &EventData) -> AppState {
    let EventData::Selection { id } = data else {
        return state;
    };
    let Some(book) = catalog.book(id) else {
        tracing::debug!(id = %id, "ignoring selection of unknown book");
        return state;
    };

    view.detail = DetailOverlay {
        open: true,
        book_id: Some(book.id.clone()),
        blur: book.image.clone(),
        image: book.image.clone(),
        title: book.title.clone(),
        subtitle: format!(
            "{} ({})",
            catalog.author_name(&book.author),
            book.publication_year()
        ),
        description: book.description.clone(),
    };
    tracing::debug!(id = %book.id, "opened book detail");
    state
}

/// Owns the catalog, the application state and the rendered view.
pub struct ViewController {
    catalog: Catalog,
    state: AppState,
    view: View,
}

impl ViewController {
    /// Populate the selectors, apply `theme`, and render the first page of the
    /// full catalog.
    pub fn new(catalog: Catalog, theme: Theme) -> Self {
        let mut view = View {
            genre_options: create_options(catalog.genres(), "All Genres"),
            author_options: create_options(catalog.authors(), "All Authors"),
            theme,
            ..View::default()
        };
        apply_theme(&mut view.root, theme);

        let state = AppState::new(catalog.books().to_vec());
        view.append_previews(&catalog, &state, PageRef::Current);
        view.update_show_more(&catalog, &state);

        Self {
            catalog,
            state,
            view,
        }
    }

    /// Run the handler registered for `(source, kind)`. Returns `false` when
    /// nothing is registered.
    pub fn dispatch(&mut self, source: EventSource, kind: EventKind, data: EventData) -> bool {
        let Some(handler) = route(source, kind) else {
            tracing::trace!(?source, ?kind, "no handler registered");
            return false;
        };
        let state = mem::take(&mut self.state);
        self.state = handler(&self.catalog, &mut self.view, state, &data);
        true
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    use super::*;
    use crate::filter::ANY;
    use crate::models::Book;
    use crate::theme::{COLOR_DARK, COLOR_LIGHT};

    fn catalog(count: usize, page_size: usize) -> Catalog {
        let books = (0..count)
            .map(|i| Book {
                id: format!("b{i}"),
                title: if i == 3 { "Dune".to_string() } else { format!("Volume {i}") },
                image: format!("https://images.example.org/{i}.jpg"),
                author: if i % 2 == 0 { "a1" } else { "a2" }.to_string(),
                description: format!("Description {i}"),
                published: NaiveDate::from_ymd_opt(1900 + i as i32, 6, 1).unwrap(),
                genres: vec!["g1".to_string()],
            })
            .collect();
        let authors: BTreeMap<_, _> = [("a1", "Ann"), ("a2", "Bob")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let genres: BTreeMap<_, _> = [("g1".to_string(), "Fiction".to_string())]
            .into_iter()
            .collect();
        Catalog::new(books, authors, genres, page_size).unwrap()
    }

    fn search(title: &str) -> EventData {
        EventData::Form(
            FormData::new()
                .with("title", title)
                .with("author", ANY)
                .with("genre", ANY),
        )
    }

    #[test]
    fn bootstrap_renders_first_page() {
        let controller = ViewController::new(catalog(20, 10), Theme::Day);
        let view = controller.view();
        assert_eq!(view.items.len(), 10);
        assert_eq!(view.show_more.label(), "Show more (10)");
        assert!(view.show_more.enabled);
        assert!(!view.message_visible);
        assert_eq!(view.genre_options[0].label, "All Genres");
        assert_eq!(view.author_options.len(), 3);
        assert_eq!(view.root.property(COLOR_DARK), Some("10,10,20"));
    }

    #[test]
    fn show_more_appends_until_exhausted() {
        let mut controller = ViewController::new(catalog(20, 10), Theme::Day);
        assert!(controller.dispatch(EventSource::ListButton, EventKind::Click, EventData::None));
        let view = controller.view();
        assert_eq!(view.items.len(), 20);
        assert_eq!(view.items[10].id, "b10");
        assert!(!view.show_more.enabled);
        assert_eq!(view.show_more.label(), "Show more (0)");
        assert_eq!(controller.state().current_page(), 2);

        controller.dispatch(EventSource::ListButton, EventKind::Click, EventData::None);
        assert_eq!(controller.view().items.len(), 20);
    }

    #[test]
    fn search_resets_page_and_hides_message() {
        let mut controller = ViewController::new(catalog(20, 10), Theme::Day);
        controller.dispatch(EventSource::ListButton, EventKind::Click, EventData::None);
        controller.dispatch(EventSource::HeaderSearch, EventKind::Click, EventData::None);
        assert!(controller.view().search_open);
        assert_eq!(controller.view_mut().take_focus(), Some(Focus::SearchTitle));

        controller.dispatch(EventSource::SearchForm, EventKind::Submit, search("dune"));
        assert_eq!(controller.state().matches().len(), 1);
        assert_eq!(controller.state().current_page(), 1);

        let view = controller.view_mut();
        assert!(!view.message_visible);
        assert!(!view.search_open);
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].title, "Dune");
        assert!(!view.show_more.enabled);
        assert_eq!(view.take_scroll(), Some(Scroll::TopSmooth));
        assert_eq!(view.take_scroll(), None);
    }

    #[test]
    fn search_without_matches_shows_message() {
        let mut controller = ViewController::new(catalog(20, 10), Theme::Day);
        controller.dispatch(EventSource::SearchForm, EventKind::Submit, search("zzzznomatch"));
        assert!(controller.state().matches().is_empty());
        assert!(controller.view().message_visible);
        assert!(controller.view().items.is_empty());
        assert_eq!(controller.view().show_more.label(), "Show more (0)");
    }

    #[test]
    fn search_by_author_keeps_order() {
        let mut controller = ViewController::new(catalog(20, 4), Theme::Day);
        let form = FormData::new().with("title", "").with("author", "a2").with("genre", ANY);
        controller.dispatch(EventSource::SearchForm, EventKind::Submit, EventData::Form(form));
        let ids: Vec<&str> = controller.view().items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["b1", "b3", "b5", "b7"]);
        assert_eq!(controller.view().show_more.remaining, 6);
    }

    #[test]
    fn selection_opens_detail() {
        let mut controller = ViewController::new(catalog(20, 10), Theme::Day);
        controller.dispatch(
            EventSource::ListItems,
            EventKind::PreviewSelected,
            EventData::Selection { id: "b3".into() },
        );
        let detail = &controller.view().detail;
        assert!(detail.open);
        assert_eq!(detail.title, "Dune");
        assert_eq!(detail.subtitle, "Bob (1903)");
        assert_eq!(detail.blur, detail.image);

        controller.dispatch(EventSource::ListClose, EventKind::Click, EventData::None);
        assert!(!controller.view().detail.open);
    }

    #[test]
    fn unknown_selection_is_ignored() {
        let mut controller = ViewController::new(catalog(20, 10), Theme::Day);
        let before = controller.view().detail.clone();
        controller.dispatch(
            EventSource::ListItems,
            EventKind::PreviewSelected,
            EventData::Selection { id: "nope".into() },
        );
        assert_eq!(controller.view().detail, before);
        assert!(!controller.view().detail.open);
    }

    #[test]
    fn settings_submission_applies_theme_and_closes() {
        let mut controller = ViewController::new(catalog(2, 10), Theme::Day);
        controller.dispatch(EventSource::HeaderSettings, EventKind::Click, EventData::None);
        assert!(controller.view().settings_open);

        let form = FormData::new().with("theme", "night");
        controller.dispatch(EventSource::SettingsForm, EventKind::Submit, EventData::Form(form));
        let view = controller.view();
        assert!(!view.settings_open);
        assert_eq!(view.theme, Theme::Night);
        assert_eq!(view.root.property(COLOR_DARK), Some("255,255,255"));
        assert_eq!(view.root.property(COLOR_LIGHT), Some("10,10,20"));
    }

    #[test]
    fn cancel_controls_close_overlays() {
        let mut controller = ViewController::new(catalog(2, 10), Theme::Night);
        controller.dispatch(EventSource::HeaderSearch, EventKind::Click, EventData::None);
        controller.dispatch(EventSource::HeaderSettings, EventKind::Click, EventData::None);
        controller.dispatch(EventSource::SearchCancel, EventKind::Click, EventData::None);
        assert!(!controller.view().search_open);
        assert!(controller.view().settings_open);
        controller.dispatch(EventSource::SettingsCancel, EventKind::Click, EventData::None);
        assert!(!controller.view().settings_open);
        assert_eq!(controller.view().theme, Theme::Night);
    }

    #[test]
    fn unrouted_events_are_rejected() {
        let mut controller = ViewController::new(catalog(2, 10), Theme::Day);
        assert!(!controller.dispatch(EventSource::SearchForm, EventKind::Click, EventData::None));
        assert!(!controller.dispatch(
            EventSource::HeaderSearch,
            EventKind::PreviewSelected,
            EventData::None
        ));
    }
}
