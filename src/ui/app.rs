use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use open::that as open_link;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::controller::{EventData, EventKind, EventSource, Focus, Scroll, ViewController};

use super::forms::{SearchField, SearchForm, SettingsForm};
use super::helpers::{build_preview_lines, centered_rect, surface_error, window_start, Palette};

/// Height of the title bar above the list.
const HEADER_HEIGHT: u16 = 3;
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Row reserved for the "Show more" control.
const SHOW_MORE_HEIGHT: u16 = 3;
/// Height allocation per book-preview card.
const PREVIEW_CARD_HEIGHT: u16 = 4;
/// Cards skipped by PageUp/PageDown.
const PAGE_JUMP: isize = 5;
/// Shown in place of the list when a search matches nothing.
const EMPTY_MESSAGE: &str = "No results found. Your filters might be too narrow.";

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Terminal-side state wrapped around the view controller: the card cursor,
/// the two overlay forms, and the footer status.
pub struct App {
    controller: ViewController,
    selected: usize,
    search_form: SearchForm,
    settings_form: SettingsForm,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(controller: ViewController) -> Self {
        let settings_form = SettingsForm::from_theme(controller.view().theme);
        Self {
            controller,
            selected: 0,
            search_form: SearchForm::default(),
            settings_form,
            status: None,
        }
    }

    /// Route a key press to whichever surface has focus. Returns `true` when
    /// the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let view = self.controller.view();
        let (detail_open, settings_open, search_open) =
            (view.detail.open, view.settings_open, view.search_open);

        if detail_open {
            self.handle_detail_key(code)?;
        } else if settings_open {
            self.handle_settings_key(code);
        } else if search_open {
            self.handle_search_key(code);
        } else {
            self.handle_list_key(code, &mut exit);
        }

        self.apply_view_requests();
        Ok(exit)
    }

    fn handle_list_key(&mut self, code: KeyCode, exit: &mut bool) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
            }
            KeyCode::Char('/') | KeyCode::Char('f') => {
                self.clear_status();
                self.click(EventSource::HeaderSearch);
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.clear_status();
                self.settings_form = SettingsForm::from_theme(self.controller.view().theme);
                self.click(EventSource::HeaderSettings);
            }
            KeyCode::Char('m') | KeyCode::Char(' ') => {
                if self.controller.view().show_more.enabled {
                    let before = self.item_count();
                    self.click(EventSource::ListButton);
                    if self.item_count() > before {
                        self.selected = before;
                    }
                    self.clear_status();
                } else {
                    self.set_status("No more books to show.", StatusKind::Info);
                }
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-PAGE_JUMP),
            KeyCode::PageDown => self.move_selection(PAGE_JUMP),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.item_count().saturating_sub(1),
            KeyCode::Enter => {
                if let Some(preview) = self.controller.view().items.get(self.selected) {
                    let id = preview.id.clone();
                    self.controller.dispatch(
                        EventSource::ListItems,
                        EventKind::PreviewSelected,
                        EventData::Selection { id },
                    );
                    self.clear_status();
                } else {
                    self.set_status("No book selected.", StatusKind::Error);
                }
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.click(EventSource::SearchCancel),
            KeyCode::Tab | KeyCode::Down => self.search_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.search_form.previous_field(),
            KeyCode::Left => self.cycle_search_option(-1),
            KeyCode::Right => self.cycle_search_option(1),
            KeyCode::Backspace => self.search_form.backspace(),
            KeyCode::Char(ch) => {
                self.search_form.push_char(ch);
            }
            KeyCode::Enter => {
                let view = self.controller.view();
                let form = self
                    .search_form
                    .form_data(&view.author_options, &view.genre_options);
                self.controller
                    .dispatch(EventSource::SearchForm, EventKind::Submit, EventData::Form(form));
                let found = self.controller.state().matches().len();
                let noun = if found == 1 { "book" } else { "books" };
                self.set_status(format!("{found} matching {noun}."), StatusKind::Info);
            }
            _ => {}
        }
    }

    fn handle_settings_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.click(EventSource::SettingsCancel),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char(' ') => {
                self.settings_form.toggle()
            }
            KeyCode::Enter => {
                let form = self.settings_form.form_data();
                self.controller.dispatch(
                    EventSource::SettingsForm,
                    EventKind::Submit,
                    EventData::Form(form),
                );
            }
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, code: KeyCode) -> Result<()> {
        match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('c') => {
                self.click(EventSource::ListClose);
            }
            KeyCode::Char('o') | KeyCode::Char('O') => {
                let detail = &self.controller.view().detail;
                let image = detail.image.trim().to_string();
                let title = detail.title.clone();
                if image.is_empty() {
                    self.set_status("This book does not have a cover image.", StatusKind::Error);
                } else if let Err(err) = open_cover(&image) {
                    self.set_status(
                        format!("Failed to open cover: {}", surface_error(&err)),
                        StatusKind::Error,
                    );
                } else {
                    self.set_status(format!("Opened cover for {title}."), StatusKind::Info);
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Honour focus and scroll requests left behind by the last handler.
    fn apply_view_requests(&mut self) {
        let view = self.controller.view_mut();
        if let Some(Focus::SearchTitle) = view.take_focus() {
            self.search_form.focus(SearchField::Title);
        }
        if let Some(Scroll::TopSmooth) = view.take_scroll() {
            self.selected = 0;
        }
        let len = self.item_count();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    fn click(&mut self, source: EventSource) {
        self.controller
            .dispatch(source, EventKind::Click, EventData::None);
    }

    fn cycle_search_option(&mut self, offset: isize) {
        let view = self.controller.view();
        let len = match self.search_form.active {
            SearchField::Title => return,
            SearchField::Author => view.author_options.len(),
            SearchField::Genre => view.genre_options.len(),
        };
        self.search_form.cycle_option(offset, len);
    }

    fn item_count(&self) -> usize {
        self.controller.view().items.len()
    }

    fn move_selection(&mut self, offset: isize) {
        let len = self.item_count();
        if len == 0 {
            return;
        }
        let next = (self.selected as isize + offset).clamp(0, len as isize - 1);
        self.selected = next as usize;
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let view = self.controller.view();
        let palette = Palette::from_root(&view.root);
        let area = frame.area();
        frame.render_widget(Block::default().style(palette.base()), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(SHOW_MORE_HEIGHT),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_header(frame, chunks[0], palette);
        if view.message_visible {
            self.draw_empty_message(frame, chunks[1], palette);
        } else {
            self.draw_previews(frame, chunks[1], palette);
        }
        self.draw_show_more(frame, chunks[2], palette);
        self.draw_footer(frame, chunks[3], palette);

        if view.search_open {
            self.draw_search_overlay(frame, area, palette);
        }
        if view.settings_open {
            self.draw_settings_overlay(frame, area, palette);
        }
        if view.detail.open {
            self.draw_detail_overlay(frame, area, palette);
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect, palette: Palette) {
        let state = self.controller.state();
        let total = self.controller.catalog().books().len();
        let title = Line::from(vec![
            Span::styled("Book Connect", palette.base().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("   {} of {} books", state.matches().len(), total),
                palette.dim(),
            ),
        ]);
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .style(palette.base());
        let paragraph = Paragraph::new(title).block(block);
        frame.render_widget(paragraph, area);
    }

    fn draw_empty_message(&self, frame: &mut Frame, area: Rect, palette: Palette) {
        let message = Paragraph::new(EMPTY_MESSAGE)
            .alignment(Alignment::Center)
            .style(palette.base())
            .wrap(Wrap { trim: true });
        frame.render_widget(message, area);
    }

    fn draw_previews(&self, frame: &mut Frame, area: Rect, palette: Palette) {
        let items = &self.controller.view().items;
        if items.is_empty() || area.height == 0 {
            return;
        }

        let capacity = ((area.height / PREVIEW_CARD_HEIGHT) as usize).max(1);
        let start = window_start(self.selected, capacity, items.len());
        let end = (start + capacity).min(items.len());

        let constraints: Vec<Constraint> = (start..end)
            .map(|_| Constraint::Length(PREVIEW_CARD_HEIGHT))
            .collect();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (chunk, index) in rows.iter().zip(start..end) {
            if chunk.height == 0 {
                continue;
            }
            let preview = &items[index];
            let selected = index == self.selected;
            let mut block = Block::default()
                .borders(Borders::ALL)
                .style(palette.base());
            if selected {
                block = block.border_style(palette.highlight());
            }
            let card = Paragraph::new(build_preview_lines(preview, palette, selected))
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(card, *chunk);
        }
    }

    fn draw_show_more(&self, frame: &mut Frame, area: Rect, palette: Palette) {
        let show_more = self.controller.view().show_more;
        let style = if show_more.enabled {
            palette.base().add_modifier(Modifier::BOLD)
        } else {
            palette.dim()
        };
        let line = Line::from(vec![
            Span::styled("Show more ", style),
            Span::styled(format!("({})", show_more.remaining), style),
        ]);
        let paragraph = Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).style(style));
        frame.render_widget(paragraph, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect, palette: Palette) {
        let block = Block::default().borders(Borders::TOP).style(palette.base());
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .style(palette.base())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let view = self.controller.view();
        let hints: &[(&str, &str)] = if view.detail.open {
            &[("[Esc]", " Close   "), ("[o]", " Open cover")]
        } else if view.settings_open {
            &[("[←→]", " Switch theme   "), ("[Enter]", " Save   "), ("[Esc]", " Cancel")]
        } else if view.search_open {
            &[
                ("[Tab]", " Next field   "),
                ("[←→]", " Change option   "),
                ("[Enter]", " Search   "),
                ("[Esc]", " Cancel"),
            ]
        } else {
            &[
                ("[↑↓]", " Navigate   "),
                ("[Enter]", " Details   "),
                ("[/]", " Search   "),
                ("[m]", " Show more   "),
                ("[s]", " Settings   "),
                ("[q]", " Quit"),
            ]
        };
        let spans: Vec<Span<'static>> = hints
            .iter()
            .flat_map(|(key, text)| [Span::styled(*key, key_style), Span::raw(*text)])
            .collect();
        Line::from(spans)
    }

    fn draw_search_overlay(&self, frame: &mut Frame, area: Rect, palette: Palette) {
        let view = self.controller.view();
        let popup_area = centered_rect(70, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Search")
            .borders(Borders::ALL)
            .style(palette.base());
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let base = palette.base();
        let lines = vec![
            self.search_form.build_line(SearchField::Title, &[], base),
            self.search_form
                .build_line(SearchField::Author, &view.author_options, base),
            self.search_form
                .build_line(SearchField::Genre, &view.genre_options, base),
            Line::from(""),
            Line::from(Span::styled(
                "Enter to search • Tab to switch • Esc to cancel",
                palette.dim(),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);

        if self.search_form.active == SearchField::Title {
            let prefix = "Title: ".len() as u16;
            let cursor_x = inner.x + prefix + self.search_form.title_len() as u16;
            frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
        }
    }

    fn draw_settings_overlay(&self, frame: &mut Frame, area: Rect, palette: Palette) {
        let popup_area = centered_rect(50, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Settings")
            .borders(Borders::ALL)
            .style(palette.base());
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            self.settings_form.build_line(palette.base()),
            Line::from(""),
            Line::from(Span::styled(
                "Enter to save • ←→ to switch • Esc to cancel",
                palette.dim(),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    }

    fn draw_detail_overlay(&self, frame: &mut Frame, area: Rect, palette: Palette) {
        let detail = &self.controller.view().detail;
        let popup_area = centered_rect(80, 60, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(detail.title.clone())
            .borders(Borders::ALL)
            .style(palette.base());
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(Span::styled(
                detail.title.clone(),
                palette.base().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(detail.subtitle.clone(), palette.dim())),
            Line::from(""),
            Line::from(Span::styled(detail.description.clone(), palette.base())),
            Line::from(""),
            Line::from(Span::styled(
                format!("Cover: {}", detail.image),
                Style::default().fg(Color::Cyan),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    }
}

fn open_cover(url: &str) -> Result<()> {
    open_link(url).with_context(|| format!("failed to open {url}"))
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;
    use crate::data::Catalog;
    use crate::theme::Theme;

    fn app() -> App {
        App::new(ViewController::new(Catalog::builtin().unwrap(), Theme::Day))
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch)).unwrap();
        }
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn search_flow_through_keys() {
        let mut app = app();
        app.handle_key(KeyCode::Char('/')).unwrap();
        assert!(app.controller.view().search_open);

        type_text(&mut app, "dune");
        app.handle_key(KeyCode::Enter).unwrap();

        let view = app.controller.view();
        assert!(!view.search_open);
        assert_eq!(view.items.len(), 3);
        assert_eq!(app.status.as_ref().unwrap().text, "3 matching books.");
    }

    #[test]
    fn selector_keys_filter_by_author() {
        let mut app = app();
        app.handle_key(KeyCode::Char('/')).unwrap();
        app.handle_key(KeyCode::Tab).unwrap();
        // Options are ordered by id; "asimov" follows the leading "any" entry.
        app.handle_key(KeyCode::Right).unwrap();
        app.handle_key(KeyCode::Enter).unwrap();

        let view = app.controller.view();
        assert!(view.items.iter().all(|p| p.author_name == "Isaac Asimov"));
        assert_eq!(view.items.len(), 4);
    }

    #[test]
    fn show_more_moves_cursor_to_new_cards() {
        let mut app = app();
        assert_eq!(app.item_count(), 36);
        app.handle_key(KeyCode::Char('m')).unwrap();
        assert_eq!(app.item_count(), 42);
        assert_eq!(app.selected, 36);

        app.handle_key(KeyCode::Char('m')).unwrap();
        assert_eq!(app.item_count(), 42);
        assert_eq!(app.status.as_ref().unwrap().text, "No more books to show.");
    }

    #[test]
    fn enter_opens_detail_and_escape_closes_it() {
        let mut app = app();
        app.handle_key(KeyCode::Enter).unwrap();
        assert!(app.controller.view().detail.open);
        assert_eq!(app.controller.view().detail.subtitle, "Frank Herbert (1965)");

        let exit = app.handle_key(KeyCode::Esc).unwrap();
        assert!(!exit);
        assert!(!app.controller.view().detail.open);
        assert!(app.handle_key(KeyCode::Char('q')).unwrap());
    }

    #[test]
    fn settings_keys_switch_theme() {
        let mut app = app();
        app.handle_key(KeyCode::Char('s')).unwrap();
        app.handle_key(KeyCode::Right).unwrap();
        app.handle_key(KeyCode::Enter).unwrap();
        assert_eq!(app.controller.view().theme, Theme::Night);
        assert!(!app.controller.view().settings_open);
    }

    #[test]
    fn search_resets_cursor_to_top() {
        let mut app = app();
        app.handle_key(KeyCode::End).unwrap();
        assert_eq!(app.selected, 35);
        app.handle_key(KeyCode::Char('/')).unwrap();
        app.handle_key(KeyCode::Enter).unwrap();
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn draws_list_and_overlays() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Book Connect"));
        assert!(text.contains("Dune"));
        assert!(text.contains("(6)"));

        app.handle_key(KeyCode::Enter).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        assert!(buffer_text(&terminal).contains("Frank Herbert (1965)"));
    }

    #[test]
    fn draws_empty_state_message() {
        let mut app = app();
        app.handle_key(KeyCode::Char('/')).unwrap();
        type_text(&mut app, "zzzznomatch");
        app.handle_key(KeyCode::Enter).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        assert!(buffer_text(&terminal).contains("No results found."));
    }
}
