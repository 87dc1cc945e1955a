use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io::{Stdout, stdout};

use crate::terminal::Lines;

/// Scroll state over the rendered document.
pub struct App {
    title: String,
    lines: Lines,
    scroll: usize,
    /// Content rows visible in the last frame; paging moves by this much.
    page_height: usize,
    /// Rows the content takes once wrapped to the last frame's width.
    content_height: usize,
}

impl App {
    /// Top-level nodes are separated by a blank line.
    pub fn new(title: String, nodes: Vec<Lines>) -> Self {
        let mut lines = Vec::new();
        for (idx, node) in nodes.into_iter().enumerate() {
            if idx > 0 {
                lines.push(Line::default());
            }
            lines.extend(node);
        }
        let content_height = lines.len();
        Self {
            title,
            lines,
            scroll: 0,
            page_height: 1,
            content_height,
        }
    }

    fn max_scroll(&self) -> usize {
        self.content_height.saturating_sub(self.page_height)
    }

    pub fn scroll_down(&mut self, by: usize) {
        self.scroll = (self.scroll + by).min(self.max_scroll());
    }

    pub fn scroll_up(&mut self, by: usize) {
        self.scroll = self.scroll.saturating_sub(by);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.page_height.max(1));
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.page_height.max(1));
    }
}

/// Open the viewer on the alternate screen until the user quits.
pub fn run(app: &mut App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.scroll_down(1),
                KeyCode::Up | KeyCode::Char('k') => app.scroll_up(1),
                KeyCode::PageDown | KeyCode::Char(' ') => app.page_down(),
                KeyCode::PageUp => app.page_up(),
                KeyCode::Home | KeyCode::Char('g') => app.scroll = 0,
                KeyCode::End | KeyCode::Char('G') => app.scroll = app.max_scroll(),
                _ => {}
            }
        }
    }
}

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    let content = if app.lines.is_empty() {
        vec![Line::from("This document has no blocks")]
    } else {
        app.lines.clone()
    };
    let paragraph = Paragraph::new(content).wrap(Wrap { trim: false });

    // Borders take two rows and two columns.
    app.page_height = usize::from(chunks[0].height.saturating_sub(2)).max(1);
    app.content_height = paragraph.line_count(chunks[0].width.saturating_sub(2));
    app.scroll = app.scroll.min(app.max_scroll());

    let scroll = u16::try_from(app.scroll).unwrap_or(u16::MAX);
    let document = paragraph
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(app.title.clone()),
        )
        .scroll((scroll, 0));

    f.render_widget(document, chunks[0]);

    let help = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k ↓/j: Scroll | "),
        Span::raw("PgUp/PgDn: Page | "),
        Span::raw("g/G: Top/Bottom"),
    ]);
    f.render_widget(Paragraph::new(help), chunks[1]);
}
