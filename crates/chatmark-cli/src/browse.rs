//! Terminal browser for a rendered fragment: the HTML on the left, its
//! links on the right. Enter activates the selected link.

use anyhow::Result;
use chatmark_engine::{Fragment, LinkId};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::{
    io::{Stdout, stdout},
    sync::{Arc, Mutex},
};

struct App {
    fragment: Fragment,
    link_ids: Vec<LinkId>,
    link_list_state: ListState,
    /// Written by the fragment's activation handler.
    status: Arc<Mutex<String>>,
}

impl App {
    fn new(fragment: Fragment, status: Arc<Mutex<String>>) -> Self {
        let link_ids: Vec<LinkId> = fragment.links().entries().map(|e| e.id).collect();
        let mut link_list_state = ListState::default();
        if !link_ids.is_empty() {
            link_list_state.select(Some(0));
        }
        Self {
            fragment,
            link_ids,
            link_list_state,
            status,
        }
    }

    fn next_link(&mut self) {
        if self.link_ids.is_empty() {
            return;
        }
        let i = match self.link_list_state.selected() {
            Some(i) => (i + 1) % self.link_ids.len(),
            None => 0,
        };
        self.link_list_state.select(Some(i));
    }

    fn previous_link(&mut self) {
        if self.link_ids.is_empty() {
            return;
        }
        let i = match self.link_list_state.selected() {
            Some(0) | None => self.link_ids.len() - 1,
            Some(i) => i - 1,
        };
        self.link_list_state.select(Some(i));
    }

    fn activate_selected_link(&self) -> bool {
        self.link_list_state
            .selected()
            .and_then(|i| self.link_ids.get(i))
            .is_some_and(|id| self.fragment.activate(id))
    }

    fn status_line(&self) -> String {
        self.status
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }
}

pub fn run(fragment: Fragment, status: Arc<Mutex<String>>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(fragment, status);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_link(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_link(),
                KeyCode::Enter | KeyCode::Char(' ') => {
                    app.activate_selected_link();
                }
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1), Constraint::Length(1)])
        .split(f.area());
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[0]);

    let html: Vec<Line> = app
        .fragment
        .html()
        .lines()
        .map(|line| Line::from(vec![Span::raw(line.to_string())]))
        .collect();
    let content = Paragraph::new(html)
        .block(Block::default().borders(Borders::ALL).title("HTML"))
        .wrap(Wrap { trim: false });
    f.render_widget(content, panes[0]);

    let link_items: Vec<ListItem> = app
        .fragment
        .links()
        .entries()
        .map(|entry| {
            ListItem::new(vec![
                Line::from(Span::raw(entry.label.clone())),
                Line::from(Span::styled(
                    format!("  {}", entry.url),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();
    let links = List::new(link_items)
        .block(Block::default().borders(Borders::ALL).title("Links"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));
    f.render_stateful_widget(links, panes[1], &mut app.link_list_state);

    f.render_widget(Paragraph::new(app.status_line()), rows[1]);

    let help = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k: Previous | "),
        Span::raw("↓/j: Next | "),
        Span::raw("Enter/Space: Open source"),
    ]);
    f.render_widget(Paragraph::new(help), rows[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatmark_engine::render;

    fn app(src: &str) -> App {
        let status = Arc::new(Mutex::new(String::new()));
        let sink = Arc::clone(&status);
        let fragment = render(src, move |url, label| {
            *sink.lock().unwrap() = format!("Opening source: {label} ({url})");
        });
        App::new(fragment, status)
    }

    #[test]
    fn enter_reports_selected_source() {
        let mut app = app("[NHS](https://www.nhs.uk/) and [CDC](https://www.cdc.gov/)");
        app.next_link();

        assert!(app.activate_selected_link());
        assert_eq!(app.status_line(), "Opening source: CDC (https://www.cdc.gov/)");
    }

    #[test]
    fn selection_wraps() {
        let mut app = app("[a](x) [b](y)");
        app.previous_link();
        assert_eq!(app.link_list_state.selected(), Some(1));
        app.next_link();
        assert_eq!(app.link_list_state.selected(), Some(0));
    }

    #[test]
    fn no_links_means_nothing_to_activate() {
        let mut app = app("plain text");
        app.next_link();
        assert!(!app.activate_selected_link());
        assert_eq!(app.status_line(), "");
    }
}
